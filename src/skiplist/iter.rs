use std::iter::Flatten;
use std::vec;

use super::{Link, Node, SkipList};

/// Walks the bottom lane from the left sentinel to the right sentinel,
/// from either end.
pub(crate) struct Nodes<'a, K, V> {
    list: &'a SkipList<K, V>,
    front: Link,
    back: Link,
    remaining: usize,
}

impl<'a, K, V> Iterator for Nodes<'a, K, V> {
    type Item = &'a Node<K, V>;

    fn next(&mut self) -> Option<&'a Node<K, V>> {
        if self.remaining == 0 {
            return None;
        }
        match self.front {
            Link::Node(idx) => {
                let node: &'a Node<K, V> = self.list.node(idx);
                self.front = node.next[0];
                self.remaining -= 1;
                Some(node)
            }
            _ => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> DoubleEndedIterator for Nodes<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a Node<K, V>> {
        if self.remaining == 0 {
            return None;
        }
        match self.back {
            Link::Node(idx) => {
                let node: &'a Node<K, V> = self.list.node(idx);
                self.back = node.prev[0];
                self.remaining -= 1;
                Some(node)
            }
            _ => None,
        }
    }
}

impl<'a, K, V> ExactSizeIterator for Nodes<'a, K, V> { }

impl<'a, K, V> Clone for Nodes<'a, K, V> {
    fn clone(&self) -> Self {
        Nodes {
            list: self.list,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

/// Mutable access to every tower in key order.
///
/// The arena hands out disjoint borrows only in slot order, so the towers
/// are ranked along the bottom lane first and the borrows sorted by rank.
pub(crate) struct NodesMut<'a, K, V> {
    inner: Flatten<vec::IntoIter<Option<&'a mut Node<K, V>>>>,
}

impl<'a, K, V> Iterator for NodesMut<'a, K, V> {
    type Item = &'a mut Node<K, V>;

    fn next(&mut self) -> Option<&'a mut Node<K, V>> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for NodesMut<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a mut Node<K, V>> {
        self.inner.next_back()
    }
}

/// Takes every tower out of the list in key order.
pub(crate) struct IntoNodes<K, V> {
    list: SkipList<K, V>,
    cursor: Link,
}

impl<K, V> Iterator for IntoNodes<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        let idx = match self.cursor {
            Link::Node(idx) => idx,
            _ => return None,
        };
        let node = self.list.dealloc(idx);
        self.cursor = node.next[0];
        self.list.len -= 1;
        Some((node.key, node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<K, V> ExactSizeIterator for IntoNodes<K, V> { }

impl<K, V> SkipList<K, V> {
    pub(crate) fn nodes(&self) -> Nodes<'_, K, V> {
        Nodes {
            list: self,
            front: self.head[0],
            back: self.tail[0],
            remaining: self.len,
        }
    }

    pub(crate) fn nodes_mut(&mut self) -> NodesMut<'_, K, V> {
        let mut rank: Vec<Option<usize>> = vec![None; self.slots.len()];
        let mut cursor = self.head[0];
        let mut position = 0;
        while let Link::Node(idx) = cursor {
            rank[idx] = Some(position);
            position += 1;
            cursor = self.node(idx).next[0];
        }

        let mut ordered: Vec<Option<&mut Node<K, V>>> = (0..self.len).map(|_| None).collect();
        for (slot, rank) in self.slots.iter_mut().zip(rank) {
            if let (Some(node), Some(rank)) = (slot, rank) {
                ordered[rank] = Some(node);
            }
        }

        NodesMut { inner: ordered.into_iter().flatten() }
    }

    pub(crate) fn into_nodes(self) -> IntoNodes<K, V> {
        let cursor = self.head[0];
        IntoNodes { list: self, cursor }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> SkipList<u32, u32> {
        let mut list = SkipList::new();
        for (key, height) in [(3, 1), (1, 2), (4, 1), (5, 3), (9, 1), (2, 2), (6, 1)].iter().copied() {
            list.insert_new(key, key * 100, height);
        }
        list
    }

    #[test]
    fn nodes_from_both_ends() {
        let list = list();
        let forward: Vec<u32> = list.nodes().map(|node| node.key).collect();
        assert_eq!(forward, vec![1, 2, 3, 4, 5, 6, 9]);
        let backward: Vec<u32> = list.nodes().rev().map(|node| node.key).collect();
        assert_eq!(backward, vec![9, 6, 5, 4, 3, 2, 1]);

        let mut nodes = list.nodes();
        assert_eq!(nodes.len(), 7);
        assert_eq!(nodes.next().map(|n| n.key), Some(1));
        assert_eq!(nodes.next_back().map(|n| n.key), Some(9));
        assert_eq!(nodes.len(), 5);
        assert_eq!(nodes.map(|n| n.key).collect::<Vec<_>>(), vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn nodes_mut_in_key_order() {
        let mut list = list();
        // Free a slot in the middle so arena order and key order differ.
        let idx = list.find(&4, None).unwrap();
        list.unlink(idx);
        list.insert_new(0, 0, 1);

        let mut seen = vec![];
        for node in list.nodes_mut() {
            seen.push(node.key);
            node.value += 1;
        }
        assert_eq!(seen, vec![0, 1, 2, 3, 5, 6, 9]);
        let values: Vec<u32> = list.nodes().map(|node| node.value).collect();
        assert_eq!(values, vec![1, 101, 201, 301, 501, 601, 901]);
        list.check_invariants();
    }

    #[test]
    fn into_nodes_drains_in_order() {
        let list = list();
        let mut drain = list.into_nodes();
        assert_eq!(drain.len(), 7);
        assert_eq!(drain.next(), Some((1, 100)));
        let rest: Vec<(u32, u32)> = drain.collect();
        assert_eq!(rest.len(), 6);
        assert_eq!(rest.last(), Some(&(9, 900)));
    }
}
