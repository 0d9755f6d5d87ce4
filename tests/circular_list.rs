use std::collections::VecDeque;

use proptest::prelude::*;
use satchel::{CircularList, Error, Queue};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 5_000;

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum ListOp {
    PushFront(i64),
    PushBack(i64),
    PopFront,
    PopBack,
    Insert(usize, i64),
    Remove(usize),
    Get(usize),
    Set(usize, i64),
}

fn list_op_strategy() -> impl Strategy<Value = ListOp> {
    prop_oneof![
        3 => value_strategy().prop_map(ListOp::PushFront),
        3 => value_strategy().prop_map(ListOp::PushBack),
        2 => Just(ListOp::PopFront),
        2 => Just(ListOp::PopBack),
        3 => (any::<usize>(), value_strategy()).prop_map(|(i, v)| ListOp::Insert(i, v)),
        2 => any::<usize>().prop_map(ListOp::Remove),
        2 => any::<usize>().prop_map(ListOp::Get),
        1 => (any::<usize>(), value_strategy()).prop_map(|(i, v)| ListOp::Set(i, v)),
    ]
}

// ─── Model comparison against VecDeque ───────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both CircularList and
    /// VecDeque and asserts identical results at every step.
    #[test]
    fn list_ops_match_vecdeque(ops in proptest::collection::vec(list_op_strategy(), TEST_SIZE)) {
        let mut list: CircularList<i64> = CircularList::new();
        let mut deque: VecDeque<i64> = VecDeque::new();

        for op in &ops {
            match op {
                ListOp::PushFront(v) => {
                    list.push_front(*v);
                    deque.push_front(*v);
                }
                ListOp::PushBack(v) => {
                    list.push_back(*v);
                    deque.push_back(*v);
                }
                ListOp::PopFront => {
                    prop_assert_eq!(list.pop_front(), deque.pop_front());
                }
                ListOp::PopBack => {
                    prop_assert_eq!(list.pop_back(), deque.pop_back());
                }
                ListOp::Insert(i, v) => {
                    let index = i % (deque.len() + 1);
                    list.insert(index, *v).unwrap();
                    deque.insert(index, *v);
                }
                ListOp::Remove(i) => {
                    if deque.is_empty() {
                        prop_assert!(list.remove(*i).is_err());
                    } else {
                        let index = i % deque.len();
                        prop_assert_eq!(list.remove(index).ok(), deque.remove(index));
                    }
                }
                ListOp::Get(i) => {
                    prop_assert_eq!(list.get(*i).ok(), deque.get(*i), "get({})", i);
                }
                ListOp::Set(i, v) => {
                    if deque.is_empty() {
                        prop_assert!(list.set(*i, *v).is_err());
                    } else {
                        let index = i % deque.len();
                        let prior = std::mem::replace(&mut deque[index], *v);
                        prop_assert_eq!(list.set(index, *v), Ok(prior));
                    }
                }
            }
            prop_assert_eq!(list.len(), deque.len());
        }

        prop_assert!(list.iter().eq(deque.iter()));
    }

    /// Length always equals net inserts minus removes.
    #[test]
    fn len_tracks_net_insertions(ops in proptest::collection::vec(list_op_strategy(), 500)) {
        let mut list: CircularList<i64> = CircularList::new();
        let mut inserted: usize = 0;
        let mut removed: usize = 0;

        for op in &ops {
            match op {
                ListOp::PushFront(v) | ListOp::PushBack(v) => {
                    list.push_back(*v);
                    inserted += 1;
                }
                ListOp::PopFront => {
                    if list.pop_front().is_some() {
                        removed += 1;
                    }
                }
                ListOp::Remove(i) => {
                    if list.remove(*i % list.len().max(1)).is_ok() {
                        removed += 1;
                    }
                }
                _ => {}
            }
            prop_assert_eq!(list.len(), inserted - removed);
        }
    }
}

// ─── Scenario and contract tests ─────────────────────────────────────────────

#[test]
fn insert_scenario_from_both_ends() {
    let mut list = CircularList::new();
    list.insert(0, "a").unwrap();
    list.insert(1, "b").unwrap();
    list.insert(0, "c").unwrap();

    let items: Vec<_> = list.iter().copied().collect();
    pretty_assertions::assert_eq!(items, ["c", "a", "b"]);
}

#[test]
fn out_of_range_accesses_report_index_and_len() {
    let mut list = CircularList::from_iter([1, 2, 3]);
    assert_eq!(list.get(3), Err(Error::IndexOutOfRange { index: 3, len: 3 }));
    assert_eq!(list.set(7, 9), Err(Error::IndexOutOfRange { index: 7, len: 3 }));
    assert_eq!(list.insert(5, 9), Err(Error::IndexOutOfRange { index: 5, len: 3 }));
}

#[test]
fn list_behaves_as_a_fifo_queue() {
    let mut list = CircularList::new();
    assert!(Queue::offer(&mut list, 3));
    assert!(Queue::offer(&mut list, 1));
    assert!(Queue::offer(&mut list, 2));

    // FIFO: iteration and polling both follow insertion order.
    let in_order: Vec<_> = Queue::iter(&list).copied().collect();
    assert_eq!(in_order, [3, 1, 2]);
    assert_eq!(Queue::poll(&mut list), Some(3));
    assert_eq!(Queue::remove(&mut list), Ok(1));
    assert_eq!(Queue::element(&list), Ok(&2));
    assert_eq!(Queue::poll(&mut list), Some(2));
    assert_eq!(Queue::remove(&mut list), Err(Error::EmptyContainer));
}

#[test]
fn equality_ignores_physical_layout() {
    // Same logical contents, different head positions.
    let mut rotated = CircularList::from_iter([9, 1, 2, 3]);
    rotated.pop_front();
    rotated.push_back(4);
    let plain = CircularList::from_iter([1, 2, 3, 4]);
    assert_eq!(rotated, plain);
}

#[test]
fn double_ended_iteration() {
    let list = CircularList::from_iter(1..=5);
    let reversed: Vec<_> = list.iter().rev().copied().collect();
    assert_eq!(reversed, [5, 4, 3, 2, 1]);

    let mut iter = list.iter();
    assert_eq!(iter.next(), Some(&1));
    assert_eq!(iter.next_back(), Some(&5));
    assert_eq!(iter.len(), 3);
}
