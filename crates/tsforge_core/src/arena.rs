//! Arena allocation for syntax trees.
//!
//! Trees handed to the binder and printer are allocated from a bump arena.
//! Nodes never move and are freed together when the arena is dropped, which
//! is what lets the binder keep `&'a` references to nodes in its side tables.

use bumpalo::Bump;

/// The arena that owns every node of one or more syntax trees.
pub struct CompilerArena {
    bump: Bump,
}

impl CompilerArena {
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bump: Bump::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn bump(&self) -> &Bump {
        &self.bump
    }

    /// Allocate a value and return a shared reference that lives as long as the arena.
    #[inline]
    pub fn alloc<T>(&self, val: T) -> &T {
        self.bump.alloc(val)
    }

    #[inline]
    pub fn alloc_str(&self, s: &str) -> &str {
        self.bump.alloc_str(s)
    }

    /// Move the elements of a vector into the arena as a slice.
    ///
    /// Node lists are built up in ordinary vectors and frozen here once the
    /// owning node is created.
    pub fn alloc_vec<T>(&self, items: Vec<T>) -> &[T] {
        if items.is_empty() {
            return &[];
        }
        self.bump.alloc_slice_fill_iter(items)
    }

    #[inline]
    pub fn alloc_slice_copy<T: Copy>(&self, src: &[T]) -> &[T] {
        self.bump.alloc_slice_copy(src)
    }

    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }

    pub fn reset(&mut self) {
        self.bump.reset();
    }
}

impl Default for CompilerArena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_vec_preserves_order() {
        let arena = CompilerArena::new();
        let items = arena.alloc_vec(vec![String::from("a"), String::from("b")]);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], "a");
        assert_eq!(items[1], "b");
    }

    #[test]
    fn test_alloc_empty_vec() {
        let arena = CompilerArena::new();
        let items: &[u32] = arena.alloc_vec(Vec::new());
        assert!(items.is_empty());
    }
}
