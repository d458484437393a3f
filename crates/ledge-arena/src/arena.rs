//! Fixed-capacity bump allocator.
//!
//! [`Arena`] reserves its whole backing buffer at construction and hands
//! out contiguous spans by advancing a cursor. It never grows: a request
//! that does not fit fails with [`ArenaError::CapacityExceeded`] instead of
//! being truncated. Every span is default-filled (zeroed for numeric
//! types) before it is returned.

use std::fmt;
use std::ops::Range;

use crate::error::ArenaError;

/// A contiguous run of elements handed out by [`Arena::alloc`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArenaSpan {
    /// Element offset from the start of the arena.
    pub offset: usize,
    /// Number of elements.
    pub len: usize,
}

impl ArenaSpan {
    /// The span as an index range.
    #[inline]
    pub fn range(self) -> Range<usize> {
        self.offset..self.offset + self.len
    }
}

/// Bump allocator over a fixed `Vec<T>`.
///
/// Invariant: `used() <= capacity()`, and every element at or past the
/// cursor equals `T::default()`.
#[derive(Clone, Debug)]
pub struct Arena<T: Copy + Default = u8> {
    /// Backing storage, sized once at construction.
    data: Vec<T>,
    /// Number of elements allocated so far.
    cursor: usize,
}

impl<T: Copy + Default> Arena<T> {
    /// Create an arena holding at most `capacity` elements.
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![T::default(); capacity],
            cursor: 0,
        }
    }

    /// Allocate `len` default-filled elements.
    ///
    /// Returns `Err(CapacityExceeded)` if the request does not fit. The
    /// cursor is unchanged on failure.
    pub fn alloc(&mut self, len: usize) -> Result<ArenaSpan, ArenaError> {
        let end = self
            .cursor
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or(ArenaError::CapacityExceeded {
                requested: len,
                used: self.cursor,
                capacity: self.data.len(),
            })?;
        let span = ArenaSpan {
            offset: self.cursor,
            len,
        };
        self.data[span.range()].fill(T::default());
        self.cursor = end;
        Ok(span)
    }

    /// Allocate `len` elements and return them as a mutable slice.
    pub fn alloc_slice(&mut self, len: usize) -> Result<&mut [T], ArenaError> {
        let span = self.alloc(len)?;
        Ok(&mut self.data[span.range()])
    }

    /// Read a previously allocated span. `None` if it lies past the cursor.
    pub fn get(&self, span: ArenaSpan) -> Option<&[T]> {
        let end = span.offset.checked_add(span.len)?;
        self.data[..self.cursor].get(span.offset..end)
    }

    /// Mutable access to a previously allocated span.
    pub fn get_mut(&mut self, span: ArenaSpan) -> Option<&mut [T]> {
        let end = span.offset.checked_add(span.len)?;
        self.data[..self.cursor].get_mut(span.offset..end)
    }

    /// Every allocated element, in allocation order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data[..self.cursor]
    }

    /// Mutable access to every allocated element.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data[..self.cursor]
    }

    /// Release every allocation and zero the buffer.
    ///
    /// Elements past the cursor are always `T::default()`: the buffer
    /// starts default-filled and no accessor reaches past the cursor.
    /// Filling only the allocated prefix therefore leaves the whole
    /// buffer back in its freshly constructed state.
    pub fn reset(&mut self) {
        self.data[..self.cursor].fill(T::default());
        self.cursor = 0;
    }

    /// Elements allocated so far.
    #[inline]
    pub fn used(&self) -> usize {
        self.cursor
    }

    /// Elements still available.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.cursor
    }

    /// Fixed capacity in elements.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Memory usage of the backing storage in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.data.len() * std::mem::size_of::<T>()
    }
}

/// Text written through `fmt::Write` is appended as freshly allocated bytes.
impl fmt::Write for Arena<u8> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let dst = self.alloc_slice(s.len()).map_err(|_| fmt::Error)?;
        dst.copy_from_slice(s.as_bytes());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write as _;

    #[test]
    fn alloc_advances_cursor() {
        let mut arena: Arena<u32> = Arena::new(16);
        let a = arena.alloc(4).unwrap();
        let b = arena.alloc(3).unwrap();
        assert_eq!(a, ArenaSpan { offset: 0, len: 4 });
        assert_eq!(b, ArenaSpan { offset: 4, len: 3 });
        assert_eq!(arena.used(), 7);
        assert_eq!(arena.remaining(), 9);
    }

    #[test]
    fn alloc_past_capacity_fails_without_moving_cursor() {
        let mut arena: Arena<u8> = Arena::new(8);
        arena.alloc(6).unwrap();
        let err = arena.alloc(3).unwrap_err();
        assert_eq!(
            err,
            ArenaError::CapacityExceeded {
                requested: 3,
                used: 6,
                capacity: 8
            }
        );
        assert_eq!(arena.used(), 6);
        // An exact fit still succeeds.
        assert!(arena.alloc(2).is_ok());
    }

    #[test]
    fn reset_zeroes_previous_contents() {
        let mut arena: Arena<u8> = Arena::new(8);
        arena.alloc_slice(8).unwrap().fill(0xAB);
        arena.reset();
        assert_eq!(arena.used(), 0);
        let s = arena.alloc_slice(8).unwrap();
        assert!(s.iter().all(|&b| b == 0));
    }

    #[test]
    fn partial_use_then_reset_leaves_whole_buffer_zeroed() {
        let mut arena: Arena<u8> = Arena::new(8);
        for used in [3, 5, 1] {
            arena.alloc_slice(used).unwrap().fill(0xCD);
            arena.reset();
        }
        assert!(arena.alloc_slice(8).unwrap().iter().all(|&b| b == 0));
    }

    #[test]
    fn get_rejects_unallocated_span() {
        let mut arena: Arena<u8> = Arena::new(8);
        let span = arena.alloc(2).unwrap();
        assert_eq!(arena.get(span).map(<[u8]>::len), Some(2));
        assert!(arena.get(ArenaSpan { offset: 1, len: 4 }).is_none());
    }

    #[test]
    fn fmt_write_appends_bytes() {
        let mut arena: Arena<u8> = Arena::new(32);
        write!(arena, "Entity: type={}", 2).unwrap();
        arena.write_str("\n").unwrap();
        assert_eq!(arena.as_slice(), b"Entity: type=2\n");
    }

    #[test]
    fn fmt_write_fails_when_full() {
        let mut arena: Arena<u8> = Arena::new(4);
        assert!(arena.write_str("toolong").is_err());
        assert_eq!(arena.used(), 0);
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn spans_never_overlap_and_start_zeroed(
                capacity in 0usize..256,
                requests in proptest::collection::vec(0usize..64, 1..20),
            ) {
                let mut arena: Arena<u8> = Arena::new(capacity);
                let mut spans = Vec::new();
                for len in requests {
                    let before = arena.used();
                    match arena.alloc(len) {
                        Ok(span) => {
                            prop_assert!(arena.get(span).unwrap().iter().all(|&b| b == 0));
                            arena.get_mut(span).unwrap().fill(0xFF);
                            spans.push(span);
                        }
                        Err(_) => {
                            prop_assert!(before + len > capacity);
                            prop_assert_eq!(arena.used(), before);
                        }
                    }
                    prop_assert!(arena.used() <= arena.capacity());
                }
                for pair in spans.windows(2) {
                    prop_assert!(pair[0].offset + pair[0].len <= pair[1].offset);
                }
            }
        }
    }
}
