//! Per-tick scratch space for the overlap pass.
//!
//! [`ScratchRegion`] is a bump allocator over a `Vec<T>`. It is reset at
//! the start of every overlap pass, so each pass sees a fresh, empty
//! region. The backing allocation is reused across ticks to avoid
//! repeated heap allocation.

/// Bump-allocated scratch space for temporary per-tick data.
///
/// Unlike [`Arena`](crate::Arena), a scratch region grows on demand: its
/// contents never outlive the pass that produced them, so growth cannot
/// invalidate anything the simulation holds on to.
#[derive(Clone, Debug, Default)]
pub struct ScratchRegion<T: Copy + Default> {
    /// Backing storage. Grows on demand, never shrinks during runtime.
    data: Vec<T>,
    /// Current bump pointer (number of elements allocated so far).
    cursor: usize,
}

impl<T: Copy + Default> ScratchRegion<T> {
    /// Create a new scratch region with the given initial capacity.
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            data: vec![T::default(); initial_capacity],
            cursor: 0,
        }
    }

    /// Allocate `len` default-filled elements.
    ///
    /// Returns `None` only if the cursor arithmetic would overflow.
    pub fn alloc(&mut self, len: usize) -> Option<&mut [T]> {
        let new_cursor = self.cursor.checked_add(len)?;
        self.ensure(new_cursor);
        let start = self.cursor;
        self.cursor = new_cursor;
        // May hold stale data from a previous pass.
        let slice = &mut self.data[start..new_cursor];
        slice.fill(T::default());
        Some(slice)
    }

    /// Append one element and return its position.
    pub fn push(&mut self, value: T) -> usize {
        let at = self.cursor;
        self.ensure(at + 1);
        self.data[at] = value;
        self.cursor = at + 1;
        at
    }

    /// Every element allocated since the last reset.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data[..self.cursor]
    }

    /// Mutable access to every element allocated since the last reset.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data[..self.cursor]
    }

    /// Reset the bump pointer. Stale data is overwritten on the next
    /// `alloc`.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Number of elements currently allocated.
    pub fn used(&self) -> usize {
        self.cursor
    }

    /// Total capacity of the backing storage in elements.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Memory usage of the backing storage in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.data.len() * std::mem::size_of::<T>()
    }

    fn ensure(&mut self, required: usize) {
        if required > self.data.len() {
            // Grow to at least double or the required size, whichever is larger.
            let new_cap = self
                .data
                .len()
                .max(64)
                .max(required)
                .checked_mul(2)
                .unwrap_or(required);
            self.data.resize(new_cap, T::default());
        }
    }
}
