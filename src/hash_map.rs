use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use core::mem;
use core::slice;

use ahash::RandomState;
use alloc::vec::Vec;
use smallvec::SmallVec;

use crate::capability::Map;

/// Smallest permitted bucket-array capacity. Prime.
const MIN_CAPACITY: usize = 17;

/// Entries chained per bucket before spilling to the heap.
const BUCKET_INLINE: usize = 2;

/// One collision chain: entries sharing a bucket index, in insertion order.
type Bucket<K, V> = SmallVec<[(K, V); BUCKET_INLINE]>;

/// A separate-chaining hash map with a prime-sized bucket array.
///
/// Each bucket holds its entries in insertion order; a key's bucket is
/// `hash(key) % capacity`. The bucket array always has prime capacity, at
/// least 17. When the load factor (entries / capacity) reaches 0.75 the
/// array grows to the smallest prime ≥ 1.75 × the old capacity, and when a
/// removal leaves the load factor at or below 0.15 it shrinks to the
/// smallest prime ≥ 0.25 × the old capacity (never below 17). The wide gap
/// between the two thresholds keeps alternating inserts and removals from
/// bouncing the capacity back and forth.
///
/// Iteration visits buckets in array order and each chain in insertion
/// order; this order is implementation-defined and not stable across a
/// resize.
///
/// # Examples
///
/// ```
/// use satchel::ChainedHashMap;
///
/// let mut counts = ChainedHashMap::new();
/// counts.insert("ant", 5);
/// counts.insert("cat", 2);
///
/// assert_eq!(counts.get(&"ant"), Some(&5));
/// assert_eq!(counts.insert("cat", 3), Some(2));
/// assert_eq!(counts.remove(&"ant"), Some(5));
/// assert_eq!(counts.len(), 1);
/// ```
pub struct ChainedHashMap<K, V, S = RandomState> {
    buckets: Vec<Bucket<K, V>>,
    len: usize,
    hasher: S,
}

impl<K, V> ChainedHashMap<K, V, RandomState> {
    /// Creates a new, empty map with the default capacity of 17 buckets.
    pub fn new() -> Self {
        Self::with_capacity(MIN_CAPACITY)
    }

    /// Creates a new, empty map with at least `capacity` buckets.
    ///
    /// The requested capacity is raised to at least 17 and then to the
    /// smallest prime at or above it, since the bucket-array capacity is
    /// always prime.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }
}

impl<K, V, S> ChainedHashMap<K, V, S> {
    /// Creates a new, empty map with the default capacity, using `hasher` to
    /// hash the keys.
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(MIN_CAPACITY, hasher)
    }

    /// Creates a new, empty map with at least `capacity` buckets, using
    /// `hasher` to hash the keys.
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            buckets: alloc_buckets(next_prime_at_least(capacity.max(MIN_CAPACITY))),
            len: 0,
            hasher,
        }
    }

    /// Returns the number of key/value pairs in the map.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the map contains no pairs.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current bucket-array capacity.
    pub const fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Resets the map to an empty state with the default capacity.
    pub fn clear(&mut self) {
        self.buckets = alloc_buckets(MIN_CAPACITY);
        self.len = 0;
    }

    /// Returns an iterator over the map's entries, in bucket order and then
    /// chain insertion order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let empty: &[(K, V)] = &[];
        Iter {
            buckets: self.buckets.iter(),
            chain: empty.iter(),
            remaining: self.len,
        }
    }

    /// Returns an iterator over the map's keys, in iteration order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the map's values, in iteration order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns the first key found with the given value, scanning buckets in
    /// array order and chains in insertion order. O(len).
    pub fn key_of(&self, value: &V) -> Option<&K>
    where
        V: PartialEq,
    {
        self.iter().find(|&(_, v)| v == value).map(|(k, _)| k)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> ChainedHashMap<K, V, S> {
    /// Adds the key/value pair to the map.
    ///
    /// If the key was already present its value is overwritten and the prior
    /// value returned. A fresh insertion that pushes the load factor to 0.75
    /// or above triggers growth.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let index = self.bucket_index(&key);
        if let Some((_, existing)) = self.buckets[index].iter_mut().find(|(k, _)| *k == key) {
            return Some(mem::replace(existing, value));
        }
        self.buckets[index].push((key, value));
        self.len += 1;
        if self.len * 4 >= self.buckets.len() * 3 {
            self.grow();
        }
        None
    }

    /// Removes the pair identified by `key` from the map, returning its
    /// value.
    ///
    /// A removal that leaves the load factor at or below 0.15 triggers a
    /// shrink.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.bucket_index(key);
        let position = self.buckets[index].iter().position(|(k, _)| k.borrow() == key)?;
        let (_, value) = self.buckets[index].remove(position);
        self.len -= 1;
        if self.len * 20 <= self.buckets.len() * 3 {
            self.shrink();
        }
        Some(value)
    }

    /// Returns a reference to the value associated with `key`. Scans only
    /// the key's bucket.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.bucket_index(key);
        self.buckets[index].iter().find(|(k, _)| k.borrow() == key).map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value associated with `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.bucket_index(key);
        self.buckets[index].iter_mut().find(|(k, _)| k.borrow() == key).map(|(_, v)| v)
    }

    /// Returns true if the map has a value for `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(key).is_some()
    }

    /// Maps a key to its bucket index under the current capacity.
    fn bucket_index<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized + Hash,
    {
        let hash = self.hasher.hash_one(key);
        (hash % self.buckets.len() as u64) as usize
    }

    fn grow(&mut self) {
        let target = (self.buckets.len() * 7).div_ceil(4);
        self.resize(next_prime_at_least(target));
    }

    fn shrink(&mut self) {
        let target = self.buckets.len().div_ceil(4);
        self.resize(next_prime_at_least(target.max(MIN_CAPACITY)));
    }

    /// Reallocates the bucket array at `new_capacity` and re-buckets every
    /// entry. Entries are placed directly, so a rehash can never cascade
    /// into another resize.
    fn resize(&mut self, new_capacity: usize) {
        if new_capacity == self.buckets.len() {
            return;
        }
        let old = mem::replace(&mut self.buckets, alloc_buckets(new_capacity));
        for bucket in old {
            for (key, value) in bucket {
                let index = self.bucket_index(&key);
                self.buckets[index].push((key, value));
            }
        }
    }
}

fn alloc_buckets<K, V>(capacity: usize) -> Vec<Bucket<K, V>> {
    let mut buckets = Vec::new();
    buckets.resize_with(capacity, SmallVec::new);
    buckets
}

/// Smallest prime at or above `n`.
fn next_prime_at_least(n: usize) -> usize {
    if n <= 2 {
        return 2;
    }
    let mut candidate = if n % 2 == 0 { n + 1 } else { n };
    while !is_prime(candidate) {
        candidate += 2;
    }
    candidate
}

fn is_prime(n: usize) -> bool {
    if n % 2 == 0 {
        return n == 2;
    }
    let mut divisor = 3;
    while divisor * divisor <= n {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    n > 1
}

impl<K, V, S: Default> Default for ChainedHashMap<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K: Clone, V: Clone, S: Clone> Clone for ChainedHashMap<K, V, S> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            len: self.len,
            hasher: self.hasher.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for ChainedHashMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher + Default> FromIterator<(K, V)> for ChainedHashMap<K, V, S> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::with_hasher(S::default());
        map.extend(iter);
        map
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> Extend<(K, V)> for ChainedHashMap<K, V, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// An iterator over the entries of a `ChainedHashMap`, in bucket order and
/// then chain insertion order.
///
/// This `struct` is created by the [`iter`] method on [`ChainedHashMap`].
///
/// [`iter`]: ChainedHashMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    buckets: slice::Iter<'a, Bucket<K, V>>,
    chain: slice::Iter<'a, (K, V)>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        loop {
            if let Some((key, value)) = self.chain.next() {
                self.remaining -= 1;
                return Some((key, value));
            }
            self.chain = self.buckets.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            chain: self.chain.clone(),
            remaining: self.remaining,
        }
    }
}

/// An iterator over the keys of a `ChainedHashMap`, in iteration order.
///
/// This `struct` is created by the [`keys`] method on [`ChainedHashMap`].
///
/// [`keys`]: ChainedHashMap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// An iterator over the values of a `ChainedHashMap`, in iteration order.
///
/// This `struct` is created by the [`values`] method on [`ChainedHashMap`].
///
/// [`values`]: ChainedHashMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

/// An owning iterator over the entries of a `ChainedHashMap`, in bucket
/// order and then chain insertion order.
pub struct IntoIter<K, V> {
    buckets: alloc::vec::IntoIter<Bucket<K, V>>,
    chain: smallvec::IntoIter<[(K, V); BUCKET_INLINE]>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        loop {
            if let Some(entry) = self.chain.next() {
                self.remaining -= 1;
                return Some(entry);
            }
            self.chain = self.buckets.next()?.into_iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V, S> IntoIterator for ChainedHashMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter {
            buckets: self.buckets.into_iter(),
            chain: SmallVec::new().into_iter(),
            remaining: self.len,
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChainedHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> Map<K, V> for ChainedHashMap<K, V, S> {
    type Keys<'a>
        = Keys<'a, K, V>
    where
        Self: 'a,
        K: 'a;

    type Values<'a>
        = Values<'a, K, V>
    where
        Self: 'a,
        V: 'a;

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        ChainedHashMap::insert(self, key, value)
    }

    fn remove(&mut self, key: &K) -> bool {
        ChainedHashMap::remove(self, key).is_some()
    }

    fn get(&self, key: &K) -> Option<&V> {
        ChainedHashMap::get(self, key)
    }

    fn key_of(&self, value: &V) -> Option<&K>
    where
        V: PartialEq,
    {
        ChainedHashMap::key_of(self, value)
    }

    fn contains_key(&self, key: &K) -> bool {
        ChainedHashMap::contains_key(self, key)
    }

    fn keys(&self) -> Keys<'_, K, V> {
        ChainedHashMap::keys(self)
    }

    fn values(&self) -> Values<'_, K, V> {
        ChainedHashMap::values(self)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        ChainedHashMap::clear(self);
    }
}
