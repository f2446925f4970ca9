//! Scatter-gather vector descriptors.
//!
//! A call carries its arguments in up to [`MAX_IOVEC`] caller-owned read-only
//! buffers ([`InVec`]) and receives results in up to [`MAX_IOVEC`] caller-owned
//! writable buffers ([`OutVec`]). Both are `(base, len)` pairs whose layout
//! matches the platform's `psa_invec` and `psa_outvec`, so a slice of them can
//! be handed to the C client API directly.
//!
//! The descriptors borrow the buffer they describe for `'a`, which ties the
//! buffer's lifetime to the call that uses it.

use core::{ffi::c_void, marker::PhantomData, ptr};

use static_assertions::const_assert_eq;

/// Maximum number of vectors per direction in a single call.
pub const MAX_IOVEC: usize = 4;

/// Read-only request buffer descriptor (`psa_invec`).
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct InVec<'a> {
    base: *const c_void,
    len: usize,
    _buf: PhantomData<&'a [u8]>,
}

const_assert_eq!(size_of::<InVec<'_>>(), 2 * size_of::<usize>());

impl<'a> InVec<'a> {
    /// An empty vector (null base, zero length).
    pub const EMPTY: Self = Self {
        base: ptr::null(),
        len: 0,
        _buf: PhantomData,
    };

    /// Creates a descriptor for `buf`.
    #[inline]
    pub const fn new(buf: &'a [u8]) -> Self {
        Self {
            base: buf.as_ptr().cast(),
            len: buf.len(),
            _buf: PhantomData,
        }
    }

    /// Creates a descriptor from a raw pointer and length.
    ///
    /// # Safety
    ///
    /// `base` must be valid for reads of `len` bytes for `'a`, or null with
    /// `len == 0`.
    #[inline]
    pub const unsafe fn from_raw_parts(base: *const c_void, len: usize) -> Self {
        Self {
            base,
            len,
            _buf: PhantomData,
        }
    }

    /// Returns the described length in bytes.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns whether the vector describes no bytes.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the described bytes.
    #[inline]
    pub fn as_slice(&self) -> &'a [u8] {
        if self.base.is_null() {
            return &[];
        }
        // SAFETY: base is valid for `len` bytes for 'a, per construction.
        unsafe { core::slice::from_raw_parts(self.base.cast::<u8>(), self.len) }
    }
}

impl<'a> From<&'a [u8]> for InVec<'a> {
    fn from(buf: &'a [u8]) -> Self {
        Self::new(buf)
    }
}

/// Writable response buffer descriptor (`psa_outvec`).
#[derive(Debug)]
#[repr(C)]
pub struct OutVec<'a> {
    base: *mut c_void,
    len: usize,
    _buf: PhantomData<&'a mut [u8]>,
}

const_assert_eq!(size_of::<OutVec<'_>>(), 2 * size_of::<usize>());

impl<'a> OutVec<'a> {
    /// An empty vector (null base, zero capacity).
    pub const EMPTY: Self = Self {
        base: ptr::null_mut(),
        len: 0,
        _buf: PhantomData,
    };

    /// Creates a descriptor for `buf`. Its capacity is `buf.len()`.
    #[inline]
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self {
            base: buf.as_mut_ptr().cast(),
            len: buf.len(),
            _buf: PhantomData,
        }
    }

    /// Creates a descriptor from a raw pointer and capacity.
    ///
    /// # Safety
    ///
    /// `base` must be valid for writes of `len` bytes for `'a` and not aliased,
    /// or null with `len == 0`.
    #[inline]
    pub const unsafe fn from_raw_parts(base: *mut c_void, len: usize) -> Self {
        Self {
            base,
            len,
            _buf: PhantomData,
        }
    }

    /// Returns the described capacity in bytes.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns whether the vector has zero capacity.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the described buffer for writing.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        if self.base.is_null() {
            return &mut [];
        }
        // SAFETY: base is valid and unaliased for `len` bytes for 'a, per construction.
        unsafe { core::slice::from_raw_parts_mut(self.base.cast::<u8>(), self.len) }
    }
}

impl<'a> From<&'a mut [u8]> for OutVec<'a> {
    fn from(buf: &'a mut [u8]) -> Self {
        Self::new(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_vec_describes_buffer() {
        let data = [1u8, 2, 3];
        let vec = InVec::new(&data);

        assert_eq!(vec.len(), 3);
        assert_eq!(vec.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_empty_vectors_yield_empty_slices() {
        assert!(InVec::EMPTY.is_empty());
        assert_eq!(InVec::EMPTY.as_slice(), &[] as &[u8]);

        let mut out = OutVec::EMPTY;
        assert!(out.as_mut_slice().is_empty());
    }

    #[test]
    fn test_out_vec_writes_reach_caller_buffer() {
        let mut buf = [0u8; 4];
        {
            let mut vec = OutVec::new(&mut buf);
            vec.as_mut_slice().copy_from_slice(&[9, 8, 7, 6]);
        }
        assert_eq!(buf, [9, 8, 7, 6]);
    }
}
