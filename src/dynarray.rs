//! A growable, index-addressable sequence with chunked allocation.
//!
//! `DynArray` backs array-kind values in the tree and the hash buckets of
//! [`Dict`](crate::dict::Dict). Its defining quirk is [`get_or_extend`]:
//! indexing past the end does not fail, it grows the sequence to cover the
//! index, default-constructing every newly exposed slot.
//!
//! [`get_or_extend`]: DynArray::get_or_extend

/// An amortized-growth sequence of `T`, index-addressable `0..len`.
///
/// `MIN_CHUNK` is the minimum number of slots added per reallocation;
/// array payloads use the default of 10, dictionary buckets use 64.
#[derive(Debug, Clone, PartialEq)]
pub struct DynArray<T, const MIN_CHUNK: usize = 10> {
    items: Vec<T>,
}

impl<T, const MIN_CHUNK: usize> DynArray<T, MIN_CHUNK> {
    /// Create an empty sequence. No allocation until first use.
    pub fn new() -> Self {
        DynArray { items: Vec::new() }
    }

    /// Create an empty sequence with `size` slots preallocated.
    pub fn with_capacity(size: usize) -> Self {
        DynArray {
            items: Vec::with_capacity(size),
        }
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the sequence holds no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of allocated-but-unused trailing slots.
    pub fn available(&self) -> usize {
        self.items.capacity() - self.items.len()
    }

    /// Get a shared reference to the element at `i`, if in range.
    pub fn get(&self, i: usize) -> Option<&T> {
        self.items.get(i)
    }

    /// Get a mutable reference to the element at `i`, if in range.
    pub fn get_mut(&mut self, i: usize) -> Option<&mut T> {
        self.items.get_mut(i)
    }

    /// Get a mutable slot at `i`, extending the sequence to cover it.
    ///
    /// If `i` is beyond capacity, reallocates to at least `i + MIN_CHUNK`
    /// slots. If `i >= len`, the length becomes `i + 1` and every newly
    /// exposed slot is default-constructed. Reading out of range is defined
    /// to allocate and extend rather than fail.
    pub fn get_or_extend(&mut self, i: usize) -> &mut T
    where
        T: Default,
    {
        if i >= self.items.len() {
            if i >= self.items.capacity() {
                self.items.reserve(i + MIN_CHUNK - self.items.len());
            }
            self.items.resize_with(i + 1, T::default);
        }
        &mut self.items[i]
    }

    /// Append `value` at the end, returning a reference to its slot.
    pub fn append(&mut self, value: T) -> &mut T {
        if self.items.len() == self.items.capacity() {
            self.items.reserve(MIN_CHUNK);
        }
        let slot = self.items.len();
        self.items.push(value);
        &mut self.items[slot]
    }

    /// Remove the element at `i`, shifting all later elements left.
    ///
    /// Linear in the number of trailing elements. Out-of-range indices and
    /// an empty sequence are no-ops.
    pub fn remove(&mut self, i: usize) {
        if i < self.items.len() {
            self.items.remove(i);
        }
    }

    /// Release unused trailing capacity. Length and contents are unchanged.
    pub fn trim(&mut self) {
        self.items.shrink_to_fit();
    }

    /// Remove all elements, keeping the allocation.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterate over the elements in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T, const MIN_CHUNK: usize> std::ops::Index<usize> for DynArray<T, MIN_CHUNK> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        &self.items[i]
    }
}

impl<T, const MIN_CHUNK: usize> std::ops::IndexMut<usize> for DynArray<T, MIN_CHUNK> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.items[i]
    }
}

impl<T, const MIN_CHUNK: usize> Default for DynArray<T, MIN_CHUNK> {
    fn default() -> Self {
        DynArray::new()
    }
}

impl<'a, T, const MIN_CHUNK: usize> IntoIterator for &'a DynArray<T, MIN_CHUNK> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T, const MIN_CHUNK: usize> FromIterator<T> for DynArray<T, MIN_CHUNK> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        DynArray {
            items: Vec::from_iter(iter),
        }
    }
}
