//! Raw byte dump and reload of vector buffers.
//!
//! The bytes are the elements' in-memory representation in native byte
//! order. A dump is only meaningful on a machine with the same endianness
//! and the same element type.

use bytemuck::Pod;
use log::{debug, trace};

use crate::{MinimathError, Result, Scalar, Vector};

impl<T: Scalar + Pod> Vector<T> {
    /// Borrow the buffer as bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.as_slice())
    }

    /// Copy the buffer out as bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    /// Element count and buffer bytes, the pair [`from_bytes`](Self::from_bytes)
    /// expects.
    pub fn raw_state(&self) -> (usize, Vec<u8>) {
        (self.len(), self.to_bytes())
    }

    /// Rebuild a vector of `size` elements from a raw byte dump.
    ///
    /// `bytes` may have any alignment; it is copied into a fresh buffer.
    ///
    /// # Errors
    /// Returns [`MinimathError::ByteLength`] if `bytes.len()` is not
    /// `size * size_of::<T>()`, and [`MinimathError::Allocation`] if the
    /// buffer cannot be allocated.
    pub fn from_bytes(size: usize, bytes: &[u8]) -> Result<Self> {
        let expected = size
            .checked_mul(std::mem::size_of::<T>())
            .unwrap_or(usize::MAX);
        if bytes.len() != expected {
            debug!(
                "byte dump of {} bytes does not hold {size} elements",
                bytes.len()
            );
            return Err(MinimathError::ByteLength {
                expected,
                actual: bytes.len(),
            });
        }
        trace!("reloading vector of {size} elements from bytes");
        let mut v = Self::try_new(size)?;
        bytemuck::cast_slice_mut::<T, u8>(v.as_mut_slice()).copy_from_slice(bytes);
        Ok(v)
    }
}
