//! Fixed-capacity accumulation buffer for one session's inbound bytes.
//!
//! Bytes arrive in arbitrary fragments and are appended at the write offset.
//! The framer reads from the consumed offset and advances it PDU by PDU.
//! After each drain the unread tail is moved back to the start so the
//! buffer never needs to grow.
//!
//! ```text
//! 0          consumed          written            capacity
//! |----------|=================|------------------|
//!   reclaimed      window           free
//! ```

use std::num::NonZeroUsize;

use crate::error::BufferExhausted;

/// Growable-by-compaction read buffer with a fixed allocation.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroUsize;
///
/// use ldpframe::ReadBuffer;
///
/// let mut buffer = ReadBuffer::with_capacity(NonZeroUsize::new(8).expect("non-zero"));
/// buffer.append(&[1, 2, 3]).expect("fits");
/// buffer.advance(2);
/// assert_eq!(buffer.window(), &[3]);
/// buffer.compact();
/// assert_eq!(buffer.consumed_offset(), 0);
/// assert_eq!(buffer.write_offset(), 1);
/// ```
#[derive(Debug)]
pub struct ReadBuffer {
    data: Box<[u8]>,
    consumed: usize,
    written: usize,
}

impl ReadBuffer {
    /// Allocate a buffer holding at most `capacity` unread bytes.
    #[must_use]
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            data: vec![0u8; capacity.get()].into_boxed_slice(),
            consumed: 0,
            written: 0,
        }
    }

    /// Total bytes the buffer can hold.
    #[must_use]
    pub fn capacity(&self) -> usize { self.data.len() }

    /// Start of unread data.
    #[must_use]
    pub fn consumed_offset(&self) -> usize { self.consumed }

    /// End of written data.
    #[must_use]
    pub fn write_offset(&self) -> usize { self.written }

    /// Number of unread bytes.
    #[must_use]
    pub fn len(&self) -> usize { self.written - self.consumed }

    /// Report whether every written byte has been consumed.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.written == self.consumed }

    /// Bytes that can still be appended before the next compaction.
    #[must_use]
    pub fn remaining_capacity(&self) -> usize { self.data.len() - self.written }

    /// Copy `bytes` after the written data.
    ///
    /// # Errors
    ///
    /// Returns [`BufferExhausted`] when `bytes` does not fit behind the write
    /// offset. The buffer is left untouched in that case.
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), BufferExhausted> {
        let available = self.remaining_capacity();
        if bytes.len() > available {
            return Err(BufferExhausted {
                requested: bytes.len(),
                available,
            });
        }
        let end = self.written + bytes.len();
        self.data[self.written..end].copy_from_slice(bytes);
        self.written = end;
        Ok(())
    }

    /// Unread bytes, borrowed in place.
    #[must_use]
    pub fn window(&self) -> &[u8] { &self.data[self.consumed..self.written] }

    /// Mark `n` unread bytes as consumed.
    ///
    /// # Panics
    ///
    /// Panics if `n` exceeds [`len`](Self::len).
    pub fn advance(&mut self, n: usize) {
        assert!(n <= self.len(), "advance past written data");
        self.consumed += n;
    }

    /// Move the unread tail to offset zero.
    ///
    /// Safe to call any number of times; on a drained buffer it only resets
    /// both offsets.
    pub fn compact(&mut self) {
        let unread = self.len();
        if unread > 0 && self.consumed > 0 {
            self.data.copy_within(self.consumed..self.written, 0);
        }
        self.consumed = 0;
        self.written = unread;
    }
}
