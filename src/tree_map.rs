use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;
use core::mem;

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::capability::Map;

/// A node owns its key, its value, and both of its subtrees.
struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
}

type Link<K, V> = Option<Box<Node<K, V>>>;

impl<K, V> Node<K, V> {
    const fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
        }
    }
}

/// An ordered map based on an unbalanced binary search tree.
///
/// Every key in a node's left subtree compares less than the node's key and
/// every key in its right subtree compares greater; keys are unique. Lookups,
/// insertions, and removals descend the tree in O(height). Removal of a node
/// with two children promotes its in-order predecessor (the rightmost node of
/// the left subtree) into its place.
///
/// Iteration is in ascending key order. An iterator snapshots the in-order
/// traversal when it is created and then consumes it lazily.
///
/// # Examples
///
/// ```
/// use satchel::TreeMap;
///
/// let mut counts = TreeMap::new();
/// counts.insert("cat", 2);
/// counts.insert("ant", 5);
/// counts.insert("dog", 1);
///
/// assert_eq!(counts.get(&"ant"), Some(&5));
/// assert_eq!(counts.insert("cat", 3), Some(2));
///
/// let keys: Vec<_> = counts.keys().copied().collect();
/// assert_eq!(keys, ["ant", "cat", "dog"]);
/// ```
pub struct TreeMap<K, V> {
    root: Link<K, V>,
    len: usize,
}

impl<K, V> TreeMap<K, V> {
    /// Creates a new, empty map.
    pub const fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Returns the number of key/value pairs in the map.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the map contains no pairs.
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Resets the map to an empty state with no entries.
    ///
    /// The tree is torn down iteratively so that dropping a deep,
    /// badly-balanced tree cannot overflow the stack.
    pub fn clear(&mut self) {
        let mut pending = Vec::new();
        if let Some(root) = self.root.take() {
            pending.push(root);
        }
        while let Some(mut node) = pending.pop() {
            if let Some(left) = node.left.take() {
                pending.push(left);
            }
            if let Some(right) = node.right.take() {
                pending.push(right);
            }
        }
        self.len = 0;
    }

    /// Returns an iterator over the map's entries in ascending key order.
    ///
    /// The in-order traversal is taken once, when this method is called.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut entries = Vec::with_capacity(self.len);
        Self::push_in_order(&self.root, &mut entries);
        Iter {
            entries: entries.into_iter(),
        }
    }

    /// Returns an iterator over the map's keys in ascending order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the map's values, corresponding to their
    /// keys in ascending key order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns the first key found with the given value, scanning in
    /// ascending key order. O(len).
    ///
    /// # Examples
    ///
    /// ```
    /// use satchel::TreeMap;
    ///
    /// let map = TreeMap::from_iter([(1, "one"), (2, "two"), (3, "two")]);
    /// assert_eq!(map.key_of(&"two"), Some(&2));
    /// assert_eq!(map.key_of(&"four"), None);
    /// ```
    pub fn key_of(&self, value: &V) -> Option<&K>
    where
        V: PartialEq,
    {
        self.iter().find(|&(_, v)| v == value).map(|(k, _)| k)
    }

    fn push_in_order<'a>(link: &'a Link<K, V>, out: &mut Vec<(&'a K, &'a V)>) {
        if let Some(node) = link {
            Self::push_in_order(&node.left, out);
            out.push((&node.key, &node.value));
            Self::push_in_order(&node.right, out);
        }
    }

    fn drain_in_order(link: Link<K, V>, out: &mut Vec<(K, V)>) {
        if let Some(node) = link {
            let node = *node;
            Self::drain_in_order(node.left, out);
            out.push((node.key, node.value));
            Self::drain_in_order(node.right, out);
        }
    }
}

impl<K: Ord, V> TreeMap<K, V> {
    /// Adds the key/value pair to the map.
    ///
    /// If the key was already present its value is overwritten and the prior
    /// value returned; the map's length changes only on a fresh insertion.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let prior = Self::insert_into(&mut self.root, key, value);
        if prior.is_none() {
            self.len += 1;
        }
        prior
    }

    fn insert_into(link: &mut Link<K, V>, key: K, value: V) -> Option<V> {
        match link {
            None => {
                *link = Some(Box::new(Node::new(key, value)));
                None
            }
            Some(node) => match key.cmp(&node.key) {
                Ordering::Less => Self::insert_into(&mut node.left, key, value),
                Ordering::Greater => Self::insert_into(&mut node.right, key, value),
                Ordering::Equal => Some(mem::replace(&mut node.value, value)),
            },
        }
    }

    /// Removes the pair identified by `key` from the map, returning its
    /// value.
    ///
    /// A node with a single child is replaced by that child. A node with two
    /// children has its key and value overwritten by those of its in-order
    /// predecessor, and the predecessor node is spliced out of the left
    /// subtree.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let removed = Self::remove_from(&mut self.root, key);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    fn remove_from<Q>(link: &mut Link<K, V>, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        match link {
            None => None,
            Some(node) => match key.cmp(node.key.borrow()) {
                Ordering::Less => Self::remove_from(&mut node.left, key),
                Ordering::Greater => Self::remove_from(&mut node.right, key),
                Ordering::Equal => Self::splice(link),
            },
        }
    }

    /// Unlinks the node held by `link`, which must be occupied.
    fn splice(link: &mut Link<K, V>) -> Option<V> {
        let mut node = link.take()?;
        match (node.left.take(), node.right.take()) {
            (None, right) => {
                *link = right;
                Some(node.value)
            }
            (left, None) => {
                *link = left;
                Some(node.value)
            }
            (Some(left), Some(right)) => {
                node.left = Some(left);
                node.right = Some(right);
                let (key, value) = Self::pop_rightmost(&mut node.left)
                    .expect("`TreeMap::remove()` - left subtree of a two-child node is never empty");
                node.key = key;
                let removed = mem::replace(&mut node.value, value);
                *link = Some(node);
                Some(removed)
            }
        }
    }

    /// Detaches the rightmost node of the subtree held by `link` and returns
    /// its key and value. The detached node's left child takes its place.
    fn pop_rightmost(link: &mut Link<K, V>) -> Option<(K, V)> {
        match link {
            None => None,
            Some(node) if node.right.is_some() => Self::pop_rightmost(&mut node.right),
            Some(_) => {
                let node = link.take()?;
                *link = node.left;
                Some((node.key, node.value))
            }
        }
    }

    /// Returns a reference to the value associated with `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
                Ordering::Equal => return Some(&node.value),
            }
        }
        None
    }

    /// Returns a mutable reference to the value associated with `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left.as_deref_mut(),
                Ordering::Greater => current = node.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.value),
            }
        }
        None
    }

    /// Returns true if the map has a value for `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.get(key).is_some()
    }
}

impl<K, V> Drop for TreeMap<K, V> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K, V> Default for TreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Ord, V: Clone> Clone for TreeMap<K, V> {
    fn clone(&self) -> Self {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for TreeMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for TreeMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for TreeMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// An iterator over the entries of a `TreeMap` in ascending key order.
///
/// This `struct` is created by the [`iter`] method on [`TreeMap`]. The
/// traversal is snapshotted when the iterator is created.
///
/// [`iter`]: TreeMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    entries: alloc::vec::IntoIter<(&'a K, &'a V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.entries.next_back()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// An iterator over the keys of a `TreeMap` in ascending order.
///
/// This `struct` is created by the [`keys`] method on [`TreeMap`].
///
/// [`keys`]: TreeMap::keys
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

/// An iterator over the values of a `TreeMap`, in ascending order of their
/// keys.
///
/// This `struct` is created by the [`values`] method on [`TreeMap`].
///
/// [`values`]: TreeMap::values
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

/// An owning iterator over the entries of a `TreeMap` in ascending key
/// order.
pub struct IntoIter<K, V> {
    entries: alloc::vec::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.entries.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V> IntoIterator for TreeMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> IntoIter<K, V> {
        let mut entries = Vec::with_capacity(self.len);
        Self::drain_in_order(self.root.take(), &mut entries);
        self.len = 0;
        IntoIter {
            entries: entries.into_iter(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a TreeMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K: Ord, V> Map<K, V> for TreeMap<K, V> {
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
        TreeMap::insert(self, key, value)
    }

    fn remove(&mut self, key: &K) -> bool {
        TreeMap::remove(self, key).is_some()
    }

    fn get(&self, key: &K) -> Option<&V> {
        TreeMap::get(self, key)
    }

    fn key_of(&self, value: &V) -> Option<&K>
    where
        V: PartialEq,
    {
        TreeMap::key_of(self, value)
    }

    fn contains_key(&self, key: &K) -> bool {
        TreeMap::contains_key(self, key)
    }

    fn keys(&self) -> Keys<'_, K, V> {
        TreeMap::keys(self)
    }

    fn values(&self) -> Values<'_, K, V> {
        TreeMap::values(self)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        TreeMap::clear(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    impl<K: Ord, V> TreeMap<K, V> {
        /// Validates the BST property and the incrementally tracked length.
        fn validate_invariants(&self) {
            fn check<K: Ord, V>(link: &Link<K, V>, lower: Option<&K>, upper: Option<&K>) -> usize {
                match link {
                    None => 0,
                    Some(node) => {
                        if let Some(lower) = lower {
                            assert!(*lower < node.key, "left-subtree key ordering violated");
                        }
                        if let Some(upper) = upper {
                            assert!(node.key < *upper, "right-subtree key ordering violated");
                        }
                        1 + check(&node.left, lower, Some(&node.key)) + check(&node.right, Some(&node.key), upper)
                    }
                }
            }
            assert_eq!(check(&self.root, None, None), self.len, "tracked len disagrees with node count");
        }
    }

    #[test]
    fn delete_promotes_the_inorder_predecessor() {
        let mut map = TreeMap::new();
        map.insert(5, "five");
        map.insert(3, "three");
        map.insert(8, "eight");
        assert_eq!(map.remove(&5), Some("five"));

        // The root had two children, so its predecessor (3) moved up.
        let root = map.root.as_ref().unwrap();
        assert_eq!(root.key, 3);
        assert_eq!(root.value, "three");
        assert!(root.left.is_none());
        assert_eq!(root.right.as_ref().map(|n| n.key), Some(8));
        map.validate_invariants();
    }

    #[test]
    fn deep_predecessor_is_spliced_out_of_the_left_subtree() {
        // Predecessor of 50 is 45, two levels into the left subtree, and it
        // has a left child (42) that must replace it.
        let mut map: TreeMap<i32, i32> = [50, 20, 70, 10, 40, 30, 45, 42].iter().map(|&k| (k, k)).collect();
        assert_eq!(map.remove(&50), Some(50));
        map.validate_invariants();

        let root = map.root.as_ref().unwrap();
        assert_eq!(root.key, 45);
        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, [10, 20, 30, 40, 42, 45, 70]);
    }

    #[test]
    fn single_child_nodes_are_replaced_by_that_child() {
        let mut map: TreeMap<i32, i32> = [10, 5, 3].iter().map(|&k| (k, k)).collect();
        assert_eq!(map.remove(&5), Some(5));
        map.validate_invariants();
        let root = map.root.as_ref().unwrap();
        assert_eq!(root.left.as_ref().map(|n| n.key), Some(3));
    }

    #[test]
    fn insert_overwrites_without_growing() {
        let mut map = TreeMap::new();
        assert_eq!(map.insert(1, "a"), None);
        assert_eq!(map.insert(1, "b"), Some("a"));
        assert_eq!(map.len(), 1);
        map.validate_invariants();
    }

    #[test]
    fn clear_tears_down_a_deep_tree() {
        // Ascending inserts degenerate into a right spine; the iterative
        // teardown must still handle it.
        let mut map: TreeMap<u32, u32> = (0..10_000).map(|k| (k, k)).collect();
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
    }
}
