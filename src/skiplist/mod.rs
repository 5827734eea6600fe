mod get;
mod insert;
mod iter;
mod remove;

use std::fmt;

use log::debug;

pub(crate) use self::iter::*;

/// A reference to a tower: one of the two sentinels, or an index into the
/// arena of real towers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Link {
    Head,
    Node(usize),
    Tail,
}

/// The link graph of the skip list.
///
/// Towers live in an arena and refer to each other by index. The left
/// sentinel only ever needs forward links and the right sentinel only
/// backward links, so each is just a growable lane vector; the two are
/// always the same length, which is the height of the list.
pub(crate) struct SkipList<K, V> {
    head: Vec<Link>,
    tail: Vec<Link>,
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<usize>,
    len: usize,
}

pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    // NB: fixed at creation, regular towers never change height.
    next: Box<[Link]>,
    prev: Box<[Link]>,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V, height: usize) -> Node<K, V> {
        Node {
            key,
            value,
            next: vec![Link::Tail; height].into_boxed_slice(),
            prev: vec![Link::Head; height].into_boxed_slice(),
        }
    }

    pub(crate) fn height(&self) -> usize {
        self.next.len()
    }
}

impl<K, V> SkipList<K, V> {
    pub(crate) fn new() -> SkipList<K, V> {
        SkipList {
            head: vec![Link::Tail],
            tail: vec![Link::Head],
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Height of the sentinels, which is at least the height of every tower.
    pub(crate) fn height(&self) -> usize {
        self.head.len()
    }

    pub(crate) fn node(&self, idx: usize) -> &Node<K, V> {
        match self.slots.get(idx) {
            Some(Some(node)) => node,
            _ => panic!("dangling tower index {}", idx),
        }
    }

    pub(crate) fn node_mut(&mut self, idx: usize) -> &mut Node<K, V> {
        match self.slots.get_mut(idx) {
            Some(Some(node)) => node,
            _ => panic!("dangling tower index {}", idx),
        }
    }

    pub(crate) fn key(&self, tower: Link) -> Option<&K> {
        match tower {
            Link::Node(idx) => Some(&self.node(idx).key),
            Link::Head | Link::Tail => None,
        }
    }

    pub(crate) fn tower_height(&self, tower: Link) -> usize {
        match tower {
            Link::Node(idx) => self.node(idx).height(),
            Link::Head | Link::Tail => self.height(),
        }
    }

    pub(crate) fn next(&self, from: Link, level: usize) -> Link {
        match from {
            Link::Head => self.head[level],
            Link::Node(idx) => self.node(idx).next[level],
            Link::Tail => panic!("the right sentinel has no forward links"),
        }
    }

    pub(crate) fn prev(&self, from: Link, level: usize) -> Link {
        match from {
            Link::Head => panic!("the left sentinel has no backward links"),
            Link::Node(idx) => self.node(idx).prev[level],
            Link::Tail => self.tail[level],
        }
    }

    fn set_next(&mut self, from: Link, level: usize, to: Link) {
        match from {
            Link::Head => self.head[level] = to,
            Link::Node(idx) => self.node_mut(idx).next[level] = to,
            Link::Tail => panic!("the right sentinel has no forward links"),
        }
    }

    fn set_prev(&mut self, from: Link, level: usize, to: Link) {
        match from {
            Link::Head => panic!("the left sentinel has no backward links"),
            Link::Node(idx) => self.node_mut(idx).prev[level] = to,
            Link::Tail => self.tail[level] = to,
        }
    }

    fn alloc(&mut self, node: Node<K, V>) -> Link {
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                Link::Node(idx)
            }
            None => {
                self.slots.push(Some(node));
                Link::Node(self.slots.len() - 1)
            }
        }
    }

    fn dealloc(&mut self, idx: usize) -> Node<K, V> {
        match self.slots.get_mut(idx).and_then(Option::take) {
            Some(node) => {
                self.free.push(idx);
                node
            }
            None => panic!("dangling tower index {}", idx),
        }
    }

    /// Raises both sentinels to `height` levels. The new levels link the
    /// sentinels straight to each other.
    fn grow(&mut self, height: usize) {
        debug!("growing sentinels from {} to {} levels", self.height(), height);
        while self.head.len() < height {
            self.head.push(Link::Tail);
            self.tail.push(Link::Head);
        }
    }

    /// Drops every tower. The sentinels keep their height.
    pub(crate) fn clear(&mut self) {
        debug!("clearing {} towers, keeping {} levels", self.len, self.height());
        self.head.iter_mut().for_each(|lane| *lane = Link::Tail);
        self.tail.iter_mut().for_each(|lane| *lane = Link::Head);
        self.slots.clear();
        self.free.clear();
        self.len = 0;
    }

    pub(crate) fn first(&self) -> Option<usize> {
        match self.head[0] {
            Link::Node(idx) => Some(idx),
            _ => None,
        }
    }

    pub(crate) fn last(&self) -> Option<usize> {
        match self.tail[0] {
            Link::Node(idx) => Some(idx),
            _ => None,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Node<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("next", &self.next)
            .field("prev", &self.prev)
            .finish()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for SkipList<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.nodes()).finish()
    }
}

#[cfg(test)]
impl<K: Ord + fmt::Debug, V> SkipList<K, V> {
    /// Walks every level and panics if any structural invariant is broken.
    pub(crate) fn check_invariants(&self) {
        assert!(self.height() >= 1);
        assert_eq!(self.head.len(), self.tail.len());

        let mut seen = 0;
        let mut lanes = 0;
        for level in 0..self.height() {
            let mut prev = Link::Head;
            let mut cursor = self.next(Link::Head, level);
            let mut count = 0;
            while cursor != Link::Tail {
                let node = match cursor {
                    Link::Node(idx) => self.node(idx),
                    other => panic!("level {} reached {:?}", level, other),
                };
                assert!(node.height() > level, "tower too short for level {}", level);
                assert_eq!(node.prev[level], prev, "broken backward link at level {}", level);
                if let Some(prev_key) = self.key(prev) {
                    assert!(prev_key < &node.key, "{:?} >= {:?} at level {}", prev_key, node.key, level);
                }
                prev = cursor;
                cursor = node.next[level];
                count += 1;
            }
            assert_eq!(self.tail[level], prev, "broken backward link into tail at level {}", level);
            lanes += count;
            if level == 0 {
                seen = count;
            } else {
                assert!(count <= seen);
            }
        }

        assert_eq!(seen, self.len);
        let occupied = self.slots.iter().filter(|slot| slot.is_some()).count();
        assert_eq!(occupied, self.len);
        assert_eq!(self.slots.len() - occupied, self.free.len());

        // Every tower must be reachable at every level it has.
        assert_eq!(lanes, self.nodes().map(|node| node.height()).sum::<usize>());
        for node in self.nodes() {
            for level in 0..node.height() {
                let back = node.prev[level];
                let forward = node.next[level];
                assert!(self.tower_height(back) > level);
                assert!(self.tower_height(forward) > level);
            }
        }
    }
}
