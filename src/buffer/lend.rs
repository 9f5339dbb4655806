//! Scoped lending of guest memory.

use std::fmt;

/// Error returned when asked to lend a zero-length sequence.
///
/// An empty slice has no address the host can read from, so callers must
/// map empty logical values to a non-empty encoding (`{}` for headers)
/// or to an explicit "absent" marker before lending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyBuffer {
    /// Which value was empty
    pub what: &'static str,
}

impl fmt::Display for EmptyBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot lend an empty {} buffer to the host", self.what)
    }
}

impl std::error::Error for EmptyBuffer {}

/// A read-only capability over guest bytes, valid for lifetime `'a`.
///
/// The lend does not copy. It holds a shared borrow of the owning
/// allocation, so the allocation can be neither mutated nor dropped while
/// the host may still read it. It is deliberately not `Clone`.
#[derive(Debug)]
pub struct LentBuffer<'a> {
    bytes: &'a [u8],
}

#[allow(clippy::len_without_is_empty)]
impl<'a> LentBuffer<'a> {
    /// Lends `bytes` to the host.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyBuffer`] if `bytes` is empty.
    pub fn new(what: &'static str, bytes: &'a [u8]) -> Result<Self, EmptyBuffer> {
        if bytes.is_empty() {
            return Err(EmptyBuffer { what });
        }
        Ok(Self { bytes })
    }

    /// Address of the first byte in guest linear memory.
    #[must_use]
    pub fn address(&self) -> usize {
        self.bytes.as_ptr() as usize
    }

    /// Number of lent bytes. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// The lent bytes, for hosts that live in the same address space.
    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

/// A writable capability over guest bytes, valid for lifetime `'a`.
///
/// Holds the only mutable borrow of the destination, so nothing else in
/// the guest can observe the region while the host is filling it.
#[derive(Debug)]
pub struct LentBufferMut<'a> {
    bytes: &'a mut [u8],
}

impl<'a> LentBufferMut<'a> {
    /// Lends `bytes` to the host for writing.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyBuffer`] if `bytes` is empty.
    pub fn new(what: &'static str, bytes: &'a mut [u8]) -> Result<Self, EmptyBuffer> {
        if bytes.is_empty() {
            return Err(EmptyBuffer { what });
        }
        Ok(Self { bytes })
    }

    /// Wraps a region whose length is non-zero by construction.
    pub(crate) fn from_region(bytes: &'a mut [u8]) -> Self {
        debug_assert!(!bytes.is_empty(), "lent regions are never empty");
        Self { bytes }
    }

    /// Address of the first byte in guest linear memory.
    #[must_use]
    pub fn address(&mut self) -> usize {
        self.bytes.as_mut_ptr() as usize
    }

    /// Writable capacity in bytes. Never zero.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// The destination region, for hosts that live in the same address space.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        self.bytes
    }
}
