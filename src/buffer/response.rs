//! Fixed-capacity response region.

use super::lend::LentBufferMut;
use std::fmt;
use std::num::NonZeroUsize;

/// Capacity of the response buffer allocated for every call cycle.
pub const RESPONSE_BUFFER_CAPACITY: usize = 512_000;

/// The host reported more bytes than the buffer can hold.
///
/// When this happens the buffer contents are never used; a body is either
/// read whole or not at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Oversized {
    /// Byte count reported by the host
    pub reported: u32,
    /// Capacity of the destination buffer
    pub capacity: usize,
}

impl fmt::Display for Oversized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "host reported {} bytes for a {}-byte buffer",
            self.reported, self.capacity
        )
    }
}

impl std::error::Error for Oversized {}

/// A preallocated, zeroed byte region the host copies a response body into.
pub struct ResponseBuffer {
    storage: Box<[u8]>,
}

impl fmt::Debug for ResponseBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseBuffer")
            .field("capacity", &self.storage.len())
            .finish_non_exhaustive()
    }
}

impl Default for ResponseBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseBuffer {
    /// Allocates a buffer of [`RESPONSE_BUFFER_CAPACITY`] bytes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: vec![0u8; RESPONSE_BUFFER_CAPACITY].into_boxed_slice(),
        }
    }

    /// Allocates a buffer with a custom capacity.
    ///
    /// Guest modules use [`ResponseBuffer::new`]; this exists so tests can
    /// exercise the size limit without half-megabyte fixtures.
    #[must_use]
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            storage: vec![0u8; capacity.get()].into_boxed_slice(),
        }
    }

    /// Capacity in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Lends the whole region to the host for writing.
    pub fn lend_mut(&mut self) -> LentBufferMut<'_> {
        LentBufferMut::from_region(&mut self.storage)
    }

    /// Interprets the byte count the host returned.
    ///
    /// Returns `Ok(None)` for zero (no content), `Ok(Some(body))` when the
    /// count fits, and [`Oversized`] when it exceeds capacity.
    ///
    /// # Errors
    ///
    /// Returns [`Oversized`] if `reported` is larger than the capacity.
    pub fn filled(&self, reported: u32) -> Result<Option<&[u8]>, Oversized> {
        let used = reported as usize;
        if used > self.storage.len() {
            return Err(Oversized {
                reported,
                capacity: self.storage.len(),
            });
        }
        if used == 0 {
            return Ok(None);
        }
        Ok(Some(&self.storage[..used]))
    }
}
