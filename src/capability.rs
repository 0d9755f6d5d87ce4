use crate::error::Result;

/// The map capability shared by [`TreeMap`] and [`ChainedHashMap`].
///
/// Both implementations expose the same operations and differ only in their
/// iteration order guarantee (ascending key order versus bucket order) and in
/// the asymptotic profile of lookups (O(height) versus O(chain length)).
///
/// # Examples
///
/// ```
/// use satchel::{ChainedHashMap, Map, TreeMap};
///
/// fn tally<M: Map<&'static str, u32>>(map: &mut M) -> usize {
///     map.insert("a", 1);
///     map.insert("b", 2);
///     map.len()
/// }
///
/// assert_eq!(tally(&mut TreeMap::new()), 2);
/// assert_eq!(tally(&mut ChainedHashMap::new()), 2);
/// ```
///
/// [`TreeMap`]: crate::TreeMap
/// [`ChainedHashMap`]: crate::ChainedHashMap
pub trait Map<K, V> {
    /// Iterator over references to the map's keys.
    type Keys<'a>: Iterator<Item = &'a K>
    where
        Self: 'a,
        K: 'a;

    /// Iterator over references to the map's values, in the same order as
    /// [`keys`](Map::keys).
    type Values<'a>: Iterator<Item = &'a V>
    where
        Self: 'a,
        V: 'a;

    /// Adds the key/value pair to the map, returning the prior value if the
    /// key was already present.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Removes the pair identified by `key`. Returns true if a pair was
    /// found and removed.
    fn remove(&mut self, key: &K) -> bool;

    /// Returns a reference to the value associated with `key`.
    fn get(&self, key: &K) -> Option<&V>;

    /// Returns the first key found with the given value, in this map's
    /// iteration order. O(len).
    fn key_of(&self, value: &V) -> Option<&K>
    where
        V: PartialEq;

    /// Returns true if the map has a value for `key`.
    fn contains_key(&self, key: &K) -> bool;

    /// Iterates the map's keys.
    fn keys(&self) -> Self::Keys<'_>;

    /// Iterates the map's values, corresponding to their keys in key
    /// iteration order.
    fn values(&self) -> Self::Values<'_>;

    /// Returns the number of pairs in the map.
    fn len(&self) -> usize;

    /// Returns true if the map contains no pairs.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resets the map to an empty state.
    fn clear(&mut self);
}

/// The queue capability shared by [`ArrayPriorityQueue`] and
/// [`CircularList`].
///
/// The priority queue yields elements in ascending comparison order; the
/// circular list behaves as a plain FIFO. For both, iteration produces
/// elements in the order repeated [`poll`](Queue::poll) calls would.
///
/// [`ArrayPriorityQueue`]: crate::ArrayPriorityQueue
/// [`CircularList`]: crate::CircularList
pub trait Queue<E> {
    /// Iterator over references to the queue's elements in poll order.
    type Iter<'a>: Iterator<Item = &'a E>
    where
        Self: 'a,
        E: 'a;

    /// Inserts the element into the queue. Returns true if the element was
    /// added.
    fn offer(&mut self, element: E) -> bool;

    /// Removes and returns the head of the queue, or `None` if the queue is
    /// empty.
    fn poll(&mut self) -> Option<E>;

    /// Returns a reference to the head of the queue without removing it, or
    /// `None` if the queue is empty.
    fn peek(&self) -> Option<&E>;

    /// Removes and returns the head of the queue. Differs from
    /// [`poll`](Queue::poll) only in that it fails with
    /// [`Error::EmptyContainer`](crate::Error::EmptyContainer) if the queue
    /// is empty.
    fn remove(&mut self) -> Result<E>;

    /// Returns a reference to the head of the queue. Differs from
    /// [`peek`](Queue::peek) only in that it fails with
    /// [`Error::EmptyContainer`](crate::Error::EmptyContainer) if the queue
    /// is empty.
    fn element(&self) -> Result<&E>;

    /// Iterates the queue's elements in poll order.
    fn iter(&self) -> Self::Iter<'_>;

    /// Returns the number of elements in the queue.
    fn len(&self) -> usize;

    /// Returns true if the queue contains no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every element from the queue.
    fn clear(&mut self);
}
