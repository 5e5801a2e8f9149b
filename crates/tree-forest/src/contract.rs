//! The shared ordered-set contract.
//!
//! A position in a container is a [`OrderedSet::Cursor`]; the synthetic
//! end position is expressed as `Option::None` and is never
//! dereferenceable. For the binary variants a cursor is a stable arena
//! index; the B-tree uses a descent path. Decrementing from end is
//! spelled [`OrderedSet::last`].

use std::fmt::Debug;
use std::marker::PhantomData;

/// Uniform unique-key ordered-set operations shared by all four variants.
///
/// Duplicate `insert` and absent-key `erase` are no-ops, not errors.
/// Dereferencing a cursor whose element has been erased is a caller
/// contract violation: it may panic or address a recycled element.
pub trait OrderedSet<K> {
    type Cursor: Clone + PartialEq + Debug;

    /// Inserts `key` if no equal key exists. Returns the position of the
    /// key and `true` if a new element was created, or the position of
    /// the existing element and `false`.
    fn insert(&mut self, key: K) -> (Self::Cursor, bool);

    /// Removes the element equal to `key`; returns 0 or 1.
    fn erase(&mut self, key: &K) -> usize;

    /// Removes the element at `cursor`; returns the following position.
    fn erase_at(&mut self, cursor: Self::Cursor) -> Option<Self::Cursor>;

    fn find(&self, key: &K) -> Option<Self::Cursor>;

    /// First element not less than `key`.
    fn lower_bound(&self, key: &K) -> Option<Self::Cursor>;

    /// First element strictly greater than `key`.
    fn upper_bound(&self, key: &K) -> Option<Self::Cursor>;

    fn first(&self) -> Option<Self::Cursor>;

    /// Maximum element; this is also decrement-from-end. `None` on an
    /// empty container (a no-op, not an error).
    fn last(&self) -> Option<Self::Cursor>;

    fn next(&self, cursor: &Self::Cursor) -> Option<Self::Cursor>;

    fn prev(&self, cursor: &Self::Cursor) -> Option<Self::Cursor>;

    fn key(&self, cursor: &Self::Cursor) -> &K;

    fn len(&self) -> usize;

    fn clear(&mut self);

    fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ascending key iterator over any [`OrderedSet`], double-ended.
pub struct Keys<'a, K, S>
where
    S: OrderedSet<K> + ?Sized,
{
    set: &'a S,
    front: Option<S::Cursor>,
    back: Option<S::Cursor>,
    done: bool,
    _key: PhantomData<fn() -> K>,
}

impl<'a, K, S> Keys<'a, K, S>
where
    S: OrderedSet<K> + ?Sized,
{
    pub fn new(set: &'a S) -> Self {
        let front = set.first();
        let back = set.last();
        let done = front.is_none();
        Self {
            set,
            front,
            back,
            done,
            _key: PhantomData,
        }
    }
}

impl<'a, K, S> Iterator for Keys<'a, K, S>
where
    K: 'a,
    S: OrderedSet<K> + ?Sized,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        if self.done {
            return None;
        }
        let curr = self.front.clone()?;
        let out = self.set.key(&curr);
        if self.back.as_ref() == Some(&curr) {
            self.done = true;
        } else {
            self.front = self.set.next(&curr);
        }
        Some(out)
    }
}

impl<'a, K, S> DoubleEndedIterator for Keys<'a, K, S>
where
    K: 'a,
    S: OrderedSet<K> + ?Sized,
{
    fn next_back(&mut self) -> Option<&'a K> {
        if self.done {
            return None;
        }
        let curr = self.back.clone()?;
        let out = self.set.key(&curr);
        if self.front.as_ref() == Some(&curr) {
            self.done = true;
        } else {
            self.back = self.set.prev(&curr);
        }
        Some(out)
    }
}
