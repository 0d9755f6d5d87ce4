use core::fmt;
use core::iter::FusedIterator;
use core::mem;
use core::ops::{Index, IndexMut};

use alloc::vec::Vec;

use crate::capability::Queue;
use crate::error::{Error, Result, check_index};

/// Default capacity of the backing buffer.
const MIN_CAPACITY: usize = 10;

/// A dynamically growing, index-addressable sequence backed by a circular
/// buffer.
///
/// A `CircularList` behaves like a growable array, but additions and removals
/// at the list's front occur in constant time: instead of shifting every
/// element, the list moves a head offset through the backing buffer and maps
/// logical index `i` to physical slot `(head + i) % capacity`.
///
/// Interior insertion and removal shift the shorter of the two runs
/// neighboring the affected position, so an operation near either end stays
/// cheap regardless of which end it is near.
///
/// The buffer grows once the list fills 75% of its capacity: the capacity
/// doubles (relative to the current length) and the contents are
/// re-linearized with the head reset to slot 0.
///
/// # Examples
///
/// ```
/// use satchel::CircularList;
///
/// let mut list = CircularList::new();
/// list.push_back('b');
/// list.push_front('a');
/// list.push_back('c');
///
/// assert_eq!(list.len(), 3);
/// assert_eq!(list.get(0), Ok(&'a'));
/// assert_eq!(list.pop_front(), Some('a'));
/// assert_eq!(list.pop_back(), Some('c'));
/// ```
pub struct CircularList<E> {
    /// Physical slots; `data.len()` is the capacity. Exactly `len` circularly
    /// contiguous slots starting at `head` are populated.
    data: Vec<Option<E>>,
    /// Physical slot of logical index 0.
    head: usize,
    /// Number of populated slots.
    len: usize,
}

impl<E> CircularList<E> {
    /// Creates a new, empty list.
    ///
    /// The backing buffer is allocated on the first insertion.
    ///
    /// # Examples
    ///
    /// ```
    /// use satchel::CircularList;
    ///
    /// let list: CircularList<i32> = CircularList::new();
    /// assert!(list.is_empty());
    /// ```
    pub const fn new() -> Self {
        Self {
            data: Vec::new(),
            head: 0,
            len: 0,
        }
    }

    /// Creates a new, empty list whose backing buffer holds `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut data = Vec::new();
        data.resize_with(capacity, || None);
        Self { data, head: 0, len: 0 }
    }

    /// Returns the number of elements in the list.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of physical slots in the backing buffer.
    pub const fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Returns a reference to the element at logical position `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= self.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use satchel::{CircularList, Error};
    ///
    /// let list = CircularList::from_iter([10, 20]);
    /// assert_eq!(list.get(1), Ok(&20));
    /// assert_eq!(list.get(2), Err(Error::IndexOutOfRange { index: 2, len: 2 }));
    /// ```
    pub fn get(&self, index: usize) -> Result<&E> {
        check_index(index, self.len)?;
        Ok(self.occupied(index))
    }

    /// Returns a mutable reference to the element at logical position
    /// `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= self.len()`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut E> {
        check_index(index, self.len)?;
        Ok(self.occupied_mut(index))
    }

    /// Replaces the element at logical position `index`, returning the
    /// element previously at that position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= self.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use satchel::CircularList;
    ///
    /// let mut list = CircularList::from_iter(["a", "b"]);
    /// assert_eq!(list.set(1, "c"), Ok("b"));
    /// assert_eq!(list.get(1), Ok(&"c"));
    /// ```
    pub fn set(&mut self, index: usize, value: E) -> Result<E> {
        check_index(index, self.len)?;
        Ok(mem::replace(self.occupied_mut(index), value))
    }

    /// Inserts `value` at logical position `index`, shifting subsequent
    /// elements one position toward the back.
    ///
    /// Insertion at the front rotates the head backward one slot, and
    /// insertion at the back fills the slot past the tail; both are O(1).
    /// Interior insertion shifts the shorter of the two neighboring runs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index > self.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use satchel::CircularList;
    ///
    /// let mut list = CircularList::new();
    /// list.insert(0, "a").unwrap();
    /// list.insert(1, "b").unwrap();
    /// list.insert(0, "c").unwrap();
    /// assert!(list.iter().eq(&["c", "a", "b"]));
    /// ```
    pub fn insert(&mut self, index: usize, value: E) -> Result<()> {
        if index > self.len {
            return Err(Error::index_out_of_range(index, self.len));
        }
        if self.len * 4 >= self.data.len() * 3 {
            self.grow();
        }
        let cap = self.data.len();

        if self.len == 0 {
            self.head = 0;
            self.data[0] = Some(value);
        } else if index == 0 {
            self.head = (self.head + cap - 1) % cap;
            self.data[self.head] = Some(value);
        } else if index == self.len {
            self.data[(self.head + index) % cap] = Some(value);
        } else if index <= self.len - index {
            // Shift the left run one slot backward, rotating the head with it.
            let new_head = (self.head + cap - 1) % cap;
            for i in 0..index {
                let from = (new_head + i + 1) % cap;
                let to = (new_head + i) % cap;
                self.data[to] = self.data[from].take();
            }
            self.data[(new_head + index) % cap] = Some(value);
            self.head = new_head;
        } else {
            // Shift the right run one slot forward.
            for i in (index..self.len).rev() {
                let from = (self.head + i) % cap;
                let to = (self.head + i + 1) % cap;
                self.data[to] = self.data[from].take();
            }
            self.data[(self.head + index) % cap] = Some(value);
        }

        self.len += 1;
        Ok(())
    }

    /// Removes and returns the element at logical position `index`, shifting
    /// subsequent elements one position toward the front.
    ///
    /// Removal at the head or tail adjusts the corresponding offset in O(1);
    /// interior removal shifts the shorter neighboring run to close the gap.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= self.len()`.
    pub fn remove(&mut self, index: usize) -> Result<E> {
        check_index(index, self.len)?;
        let cap = self.data.len();
        let pos = (self.head + index) % cap;
        let value = self.data[pos].take().expect("`CircularList::remove()` - populated slot was vacant");

        if index == 0 {
            self.head = (self.head + 1) % cap;
        } else if index == self.len - 1 {
            // The tail slot is already vacant.
        } else if index <= self.len - 1 - index {
            // Close the gap by shifting the left run one slot forward.
            for i in (0..index).rev() {
                let from = (self.head + i) % cap;
                let to = (self.head + i + 1) % cap;
                self.data[to] = self.data[from].take();
            }
            self.head = (self.head + 1) % cap;
        } else {
            // Close the gap by shifting the right run one slot backward.
            for i in index..self.len - 1 {
                let from = (self.head + i + 1) % cap;
                let to = (self.head + i) % cap;
                self.data[to] = self.data[from].take();
            }
        }

        self.len -= 1;
        Ok(value)
    }

    /// Prepends `value` to the front of the list in O(1).
    pub fn push_front(&mut self, value: E) {
        self.insert(0, value).expect("`CircularList::push_front()` - index 0 is always in range");
    }

    /// Appends `value` to the back of the list in O(1).
    pub fn push_back(&mut self, value: E) {
        let back = self.len;
        self.insert(back, value).expect("`CircularList::push_back()` - the back index is always in range");
    }

    /// Removes and returns the first element, or `None` if the list is
    /// empty. O(1).
    pub fn pop_front(&mut self) -> Option<E> {
        self.remove(0).ok()
    }

    /// Removes and returns the last element, or `None` if the list is
    /// empty. O(1).
    pub fn pop_back(&mut self) -> Option<E> {
        if self.len == 0 {
            return None;
        }
        self.remove(self.len - 1).ok()
    }

    /// Returns a reference to the first element, or `None` if the list is
    /// empty.
    pub fn front(&self) -> Option<&E> {
        self.get(0).ok()
    }

    /// Returns a reference to the last element, or `None` if the list is
    /// empty.
    pub fn back(&self) -> Option<&E> {
        if self.len == 0 {
            return None;
        }
        self.get(self.len - 1).ok()
    }

    /// Removes every element from the list, keeping the backing buffer.
    pub fn clear(&mut self) {
        for slot in &mut self.data {
            *slot = None;
        }
        self.head = 0;
        self.len = 0;
    }

    /// Returns an iterator over the elements front to back.
    ///
    /// # Examples
    ///
    /// ```
    /// use satchel::CircularList;
    ///
    /// let list = CircularList::from_iter([1, 2, 3]);
    /// let doubled: Vec<_> = list.iter().map(|x| x * 2).collect();
    /// assert_eq!(doubled, [2, 4, 6]);
    /// ```
    pub fn iter(&self) -> Iter<'_, E> {
        Iter {
            list: self,
            front: 0,
            remaining: self.len,
        }
    }

    /// Doubles the capacity relative to the current length and re-linearizes
    /// the contents so the head returns to slot 0.
    fn grow(&mut self) {
        let new_capacity = (self.len * 2).max(MIN_CAPACITY);
        let mut data = Vec::new();
        data.resize_with(new_capacity, || None);
        let cap = self.data.len();
        for (i, slot) in data.iter_mut().enumerate().take(self.len) {
            *slot = self.data[(self.head + i) % cap].take();
        }
        self.data = data;
        self.head = 0;
    }

    /// Returns the populated slot at logical `index`. The index must be in
    /// range.
    fn occupied(&self, index: usize) -> &E {
        let pos = (self.head + index) % self.data.len();
        self.data[pos].as_ref().expect("`CircularList` - populated slot was vacant")
    }

    /// Returns the populated slot at logical `index`, mutably. The index
    /// must be in range.
    fn occupied_mut(&mut self, index: usize) -> &mut E {
        let pos = (self.head + index) % self.data.len();
        self.data[pos].as_mut().expect("`CircularList` - populated slot was vacant")
    }
}

impl<E> Default for CircularList<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone> Clone for CircularList<E> {
    fn clone(&self) -> Self {
        // Clone into a linearized buffer rather than slot-for-slot.
        let mut list = Self::with_capacity(self.data.len());
        for (i, slot) in list.data.iter_mut().enumerate().take(self.len) {
            *slot = Some(self.occupied(i).clone());
        }
        list.len = self.len;
        list
    }
}

impl<E: fmt::Debug> fmt::Debug for CircularList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<E: PartialEq> PartialEq for CircularList<E> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<E: Eq> Eq for CircularList<E> {}

impl<E> Index<usize> for CircularList<E> {
    type Output = E;

    fn index(&self, index: usize) -> &E {
        match self.get(index) {
            Ok(value) => value,
            Err(_) => panic!("`CircularList::index()` - index {index} out of range for length {}", self.len),
        }
    }
}

impl<E> IndexMut<usize> for CircularList<E> {
    fn index_mut(&mut self, index: usize) -> &mut E {
        let len = self.len;
        match self.get_mut(index) {
            Ok(value) => value,
            Err(_) => panic!("`CircularList::index_mut()` - index {index} out of range for length {len}"),
        }
    }
}

impl<E> FromIterator<E> for CircularList<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<E> Extend<E> for CircularList<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

/// An iterator over the elements of a `CircularList`, front to back.
///
/// This `struct` is created by the [`iter`] method on [`CircularList`].
///
/// [`iter`]: CircularList::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, E> {
    list: &'a CircularList<E>,
    front: usize,
    remaining: usize,
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<&'a E> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.list.occupied(self.front);
        self.front += 1;
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<E> DoubleEndedIterator for Iter<'_, E> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.list.occupied(self.front + self.remaining))
    }
}

impl<E> ExactSizeIterator for Iter<'_, E> {}
impl<E> FusedIterator for Iter<'_, E> {}

impl<E> Clone for Iter<'_, E> {
    fn clone(&self) -> Self {
        Self {
            list: self.list,
            front: self.front,
            remaining: self.remaining,
        }
    }
}

impl<'a, E> IntoIterator for &'a CircularList<E> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Iter<'a, E> {
        self.iter()
    }
}

/// An owning iterator over the elements of a `CircularList`, front to back.
///
/// This `struct` is created by the [`into_iter`] method on [`CircularList`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<E> {
    list: CircularList<E>,
}

impl<E> Iterator for IntoIter<E> {
    type Item = E;

    fn next(&mut self) -> Option<E> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<E> DoubleEndedIterator for IntoIter<E> {
    fn next_back(&mut self) -> Option<E> {
        self.list.pop_back()
    }
}

impl<E> ExactSizeIterator for IntoIter<E> {}
impl<E> FusedIterator for IntoIter<E> {}

impl<E> IntoIterator for CircularList<E> {
    type Item = E;
    type IntoIter = IntoIter<E>;

    fn into_iter(self) -> IntoIter<E> {
        IntoIter { list: self }
    }
}

/// FIFO rendering of the queue capability: `offer` appends to the back and
/// `poll` removes from the front, so iteration order equals poll order.
impl<E> Queue<E> for CircularList<E> {
    type Iter<'a>
        = Iter<'a, E>
    where
        Self: 'a,
        E: 'a;

    fn offer(&mut self, element: E) -> bool {
        self.push_back(element);
        true
    }

    fn poll(&mut self) -> Option<E> {
        self.pop_front()
    }

    fn peek(&self) -> Option<&E> {
        self.front()
    }

    fn remove(&mut self) -> Result<E> {
        self.pop_front().ok_or(Error::EmptyContainer)
    }

    fn element(&self) -> Result<&E> {
        self.front().ok_or(Error::EmptyContainer)
    }

    fn iter(&self) -> Iter<'_, E> {
        CircularList::iter(self)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        CircularList::clear(self);
    }
}
