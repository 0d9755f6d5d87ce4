use core::fmt;

use crate::capability::Queue;
use crate::circular_list::{self, CircularList};
use crate::error::{Error, Result};

/// An array-backed priority queue that keeps its elements in ascending
/// comparison order.
///
/// The queue wraps one [`CircularList`] and locates each new element's
/// position with an upper-bound binary search, so elements that compare equal
/// retain their insertion order: a new element always lands after the run of
/// existing equals. Polling the head is O(1); offering costs O(log n) for the
/// search plus whatever shift the underlying list performs.
///
/// Only head-oriented operations and iteration are exposed. Arbitrary
/// insertion or removal by index would break the priority-queue abstraction.
///
/// # Examples
///
/// ```
/// use satchel::ArrayPriorityQueue;
///
/// let mut queue = ArrayPriorityQueue::new();
/// queue.offer(5);
/// queue.offer(3);
/// queue.offer(3);
/// queue.offer(7);
///
/// assert_eq!(queue.poll(), Some(3));
/// assert_eq!(queue.poll(), Some(3));
/// assert_eq!(queue.poll(), Some(5));
/// assert_eq!(queue.poll(), Some(7));
/// assert_eq!(queue.poll(), None);
/// ```
pub struct ArrayPriorityQueue<E> {
    list: CircularList<E>,
}

impl<E> ArrayPriorityQueue<E> {
    /// Creates a new, empty priority queue.
    pub const fn new() -> Self {
        Self {
            list: CircularList::new(),
        }
    }

    /// Returns the number of elements in the queue.
    pub const fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns true if the queue contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Removes every element from the queue.
    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Removes and returns the lowest-ordered element, or `None` if the
    /// queue is empty.
    pub fn poll(&mut self) -> Option<E> {
        self.list.pop_front()
    }

    /// Removes and returns the lowest-ordered element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyContainer`] if the queue is empty.
    pub fn remove(&mut self) -> Result<E> {
        self.poll().ok_or(Error::EmptyContainer)
    }

    /// Returns a reference to the lowest-ordered element without removing
    /// it, or `None` if the queue is empty.
    pub fn peek(&self) -> Option<&E> {
        self.list.front()
    }

    /// Returns a reference to the lowest-ordered element without removing
    /// it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyContainer`] if the queue is empty.
    pub fn element(&self) -> Result<&E> {
        self.peek().ok_or(Error::EmptyContainer)
    }

    /// Returns an iterator producing elements in the order repeated
    /// [`poll`](ArrayPriorityQueue::poll) calls would.
    ///
    /// # Examples
    ///
    /// ```
    /// use satchel::ArrayPriorityQueue;
    ///
    /// let queue = ArrayPriorityQueue::from_iter([2, 1, 3]);
    /// let sorted: Vec<_> = queue.iter().copied().collect();
    /// assert_eq!(sorted, [1, 2, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, E> {
        Iter {
            inner: self.list.iter(),
        }
    }
}

impl<E: Ord> ArrayPriorityQueue<E> {
    /// Inserts the element at its position in the ascending order. Returns
    /// true if the element was added.
    ///
    /// Ties resolve to "after the run of equal elements", so elements of
    /// equal priority poll in FIFO order.
    pub fn offer(&mut self, element: E) -> bool {
        let position = match self.list.len() {
            0 => 0,
            // Binary search needs two or more elements; compare directly.
            1 => usize::from(element >= self.list[0]),
            _ => self.insertion_point(&element),
        };
        self.list.insert(position, element).is_ok()
    }

    /// Upper-bound binary search: the first position whose element compares
    /// greater than `element`, or the back of the list if none does.
    fn insertion_point(&self, element: &E) -> usize {
        let mut lo = 0;
        let mut hi = self.list.len();
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if *element < self.list[mid] {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        lo
    }
}

impl<E> Default for ArrayPriorityQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone> Clone for ArrayPriorityQueue<E> {
    fn clone(&self) -> Self {
        Self {
            list: self.list.clone(),
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for ArrayPriorityQueue<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<E: Ord> FromIterator<E> for ArrayPriorityQueue<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

impl<E: Ord> Extend<E> for ArrayPriorityQueue<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        for element in iter {
            self.offer(element);
        }
    }
}

/// An iterator over an `ArrayPriorityQueue` in ascending comparison order.
///
/// This `struct` is created by the [`iter`] method on [`ArrayPriorityQueue`].
///
/// [`iter`]: ArrayPriorityQueue::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, E> {
    inner: circular_list::Iter<'a, E>,
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<&'a E> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<E> ExactSizeIterator for Iter<'_, E> {}
impl<E> core::iter::FusedIterator for Iter<'_, E> {}

impl<'a, E> IntoIterator for &'a ArrayPriorityQueue<E> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Iter<'a, E> {
        self.iter()
    }
}

/// An owning iterator over an `ArrayPriorityQueue` in ascending comparison
/// order.
pub struct IntoIter<E> {
    inner: circular_list::IntoIter<E>,
}

impl<E> Iterator for IntoIter<E> {
    type Item = E;

    fn next(&mut self) -> Option<E> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<E> ExactSizeIterator for IntoIter<E> {}
impl<E> core::iter::FusedIterator for IntoIter<E> {}

impl<E> IntoIterator for ArrayPriorityQueue<E> {
    type Item = E;
    type IntoIter = IntoIter<E>;

    fn into_iter(self) -> IntoIter<E> {
        IntoIter {
            inner: self.list.into_iter(),
        }
    }
}

impl<E: Ord> Queue<E> for ArrayPriorityQueue<E> {
    type Iter<'a>
        = Iter<'a, E>
    where
        Self: 'a,
        E: 'a;

    fn offer(&mut self, element: E) -> bool {
        ArrayPriorityQueue::offer(self, element)
    }

    fn poll(&mut self) -> Option<E> {
        ArrayPriorityQueue::poll(self)
    }

    fn peek(&self) -> Option<&E> {
        ArrayPriorityQueue::peek(self)
    }

    fn remove(&mut self) -> Result<E> {
        ArrayPriorityQueue::remove(self)
    }

    fn element(&self) -> Result<&E> {
        ArrayPriorityQueue::element(self)
    }

    fn iter(&self) -> Iter<'_, E> {
        ArrayPriorityQueue::iter(self)
    }

    fn len(&self) -> usize {
        self.list.len()
    }

    fn clear(&mut self) {
        self.list.clear();
    }
}
