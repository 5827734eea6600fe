use std::borrow::Borrow;
use std::cmp::Ordering::*;

use crate::trace::Trace;
use super::{Link, SkipList};

impl<K, V> SkipList<K, V> {
    /// Returns the tower holding `key`, or the rightmost tower whose key is
    /// less than `key`, which may be the left sentinel.
    ///
    /// Starting from the top lane of the left sentinel, we move across while
    /// the next tower's key is not greater than `key`, and down otherwise.
    /// When a trace is passed, each tower we move across from is marked with
    /// the level we left it at.
    pub(crate) fn search<Q>(&self, key: &Q, mut trace: Option<&mut Trace>) -> Link
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = Link::Head;
        let mut height = self.height();

        'across: while height > 0 {
            let level = height - 1;

            if let Link::Node(idx) = self.next(current, level) {
                let next_key: &Q = self.node(idx).key.borrow();
                match next_key.cmp(key) {
                    Greater => {}
                    found => {
                        if let Some(trace) = &mut trace {
                            trace.record(current, level);
                        }
                        current = Link::Node(idx);
                        match found {
                            Equal => break 'across,
                            _ => continue 'across,
                        }
                    }
                }
            }

            height -= 1;
        }

        current
    }

    /// Arena index of the tower holding `key`, if there is one.
    pub(crate) fn find<Q>(&self, key: &Q, trace: Option<&mut Trace>) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.search(key, trace) {
            Link::Node(idx) => {
                let found: &Q = self.node(idx).key.borrow();
                if found == key { Some(idx) } else { None }
            }
            _ => None,
        }
    }
}
