use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::state::SearchState;

struct Entry<'t> {
    priority: usize,
    seq: u64,
    state: SearchState<'t>,
}

impl PartialEq for Entry<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}

impl Eq for Entry<'_> {}

impl PartialOrd for Entry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.priority, self.seq).cmp(&(other.priority, other.seq))
    }
}

/// Priority-ordered working set of continuing states.
///
/// Pops the most advanced state first. Among equally advanced states the
/// most recently pushed wins, so a branch point's successors are explored
/// depth-first in the order they were produced in reverse.
#[derive(Default)]
pub struct Frontier<'t> {
    heap: BinaryHeap<Entry<'t>>,
    seq: u64,
}

impl<'t> Frontier<'t> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, state: SearchState<'t>) {
        self.seq += 1;
        self.heap.push(Entry {
            priority: state.priority(),
            seq: self.seq,
            state,
        });
    }

    pub fn pop(&mut self) -> Option<SearchState<'t>> {
        self.heap.pop().map(|entry| entry.state)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
