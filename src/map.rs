use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;
use std::mem;

use log::trace;

use crate::error::{Error, Result};
use crate::height::{CoinFlip, HeightGenerator, MAX_HEIGHT};
use crate::skiplist::{IntoNodes, Link, Nodes, NodesMut, SkipList};
use crate::trace::Trace;
use crate::view::Towers;

/// An ordered map built on a doubly-linked skip list.
///
/// Each entry lives in a tower whose height is drawn from `G` when the key
/// is first inserted. Lookups, insertions and removals take expected
/// O(log n) comparisons.
///
/// The map can also record the path taken by a search, for drawing the
/// list; see [`get_traced`](SkipMap::get_traced) and
/// [`towers`](SkipMap::towers).
pub struct SkipMap<K, V, G = CoinFlip> {
    inner: SkipList<K, V>,
    heights: G,
    trace: Trace,
}

impl<K: Ord, V> SkipMap<K, V> {
    pub fn new() -> SkipMap<K, V> {
        SkipMap::with_height_generator(CoinFlip::new())
    }

    /// A map whose tower heights are reproducible from `seed`.
    pub fn seeded(seed: u64) -> SkipMap<K, V> {
        SkipMap::with_height_generator(CoinFlip::seeded(seed))
    }
}

impl<K: Ord, V, G: HeightGenerator> SkipMap<K, V, G> {
    pub fn with_height_generator(heights: G) -> SkipMap<K, V, G> {
        SkipMap {
            inner: SkipList::new(),
            heights,
            trace: Trace::new(),
        }
    }

    /// Inserts `value` under `key`, returning the value it replaced.
    ///
    /// An existing entry keeps its tower and only has its value swapped.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(idx) = self.inner.find(&key, None) {
            return Some(mem::replace(&mut self.inner.node_mut(idx).value, value));
        }

        let height = self.heights.gen_height().max(1).min(MAX_HEIGHT);
        self.inner.insert_new(key, value, height);
        trace!("new tower of height {}, {} entries", height, self.inner.len());
        None
    }
}

impl<K: Ord, V, G> SkipMap<K, V, G> {
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        Q: Ord + ?Sized,
        K: Borrow<Q>,
    {
        self.inner.find(key, None).map(|idx| &self.inner.node(idx).value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        Q: Ord + ?Sized,
        K: Borrow<Q>,
    {
        let idx = self.inner.find(key, None)?;
        Some(&mut self.inner.node_mut(idx).value)
    }

    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        Q: Ord + ?Sized,
        K: Borrow<Q>,
    {
        self.inner.find(key, None).map(|idx| {
            let node = self.inner.node(idx);
            (&node.key, &node.value)
        })
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: Ord + ?Sized,
        K: Borrow<Q>,
    {
        self.inner.find(key, None).is_some()
    }

    /// Scans every entry for `value`.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.inner.nodes().any(|node| node.value == *value)
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        Q: Ord + ?Sized,
        K: Borrow<Q>,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        Q: Ord + ?Sized,
        K: Borrow<Q>,
    {
        let idx = self.inner.find(key, None)?;
        self.trace.forget(Link::Node(idx));
        let entry = self.inner.unlink(idx);
        trace!("removed tower, {} entries", self.inner.len());
        Some(entry)
    }

    /// Looks up `key`, recording the path of the search.
    ///
    /// Markers from any earlier search are discarded first. Read them back
    /// with [`towers`](SkipMap::towers).
    pub fn get_traced<Q>(&mut self, key: &Q) -> Option<&V>
    where
        Q: Ord + ?Sized,
        K: Borrow<Q>,
    {
        self.trace.clear();
        let idx = self.inner.find(key, Some(&mut self.trace))?;
        Some(&self.inner.node(idx).value)
    }

    pub fn contains_key_traced<Q>(&mut self, key: &Q) -> bool
    where
        Q: Ord + ?Sized,
        K: Borrow<Q>,
    {
        self.get_traced(key).is_some()
    }
}

impl<K, V, G> SkipMap<K, V, G> {
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }

    /// Number of lanes in the sentinel towers. Never shrinks, even when
    /// the map is cleared.
    pub fn height(&self) -> usize {
        self.inner.height()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.inner.clear();
        self.trace.clear();
    }

    /// Discards the markers left by the last traced search.
    pub fn reset_trace(&mut self) {
        self.trace.clear();
    }

    /// The smallest key, or [`Error::Empty`].
    pub fn first_key(&self) -> Result<&K> {
        self.first_key_value().map(|(key, _)| key).ok_or(Error::Empty)
    }

    /// The largest key, or [`Error::Empty`].
    pub fn last_key(&self) -> Result<&K> {
        self.last_key_value().map(|(key, _)| key).ok_or(Error::Empty)
    }

    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.inner.first().map(|idx| {
            let node = self.inner.node(idx);
            (&node.key, &node.value)
        })
    }

    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.inner.last().map(|idx| {
            let node = self.inner.node(idx);
            (&node.key, &node.value)
        })
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { nodes: self.inner.nodes() }
    }

    /// Entries in ascending key order, with values writable in place.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut { nodes: self.inner.nodes_mut() }
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { nodes: self.inner.nodes() }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values { nodes: self.inner.nodes() }
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut { nodes: self.inner.nodes_mut() }
    }

    /// The layout of the list, one column per tower, starting with the left
    /// sentinel. The right sentinel is left out; its height is
    /// [`height`](SkipMap::height).
    pub fn towers(&self) -> Towers<'_, K, V> {
        Towers::new(&self.inner, &self.trace)
    }
}

impl<K: Ord, V> Default for SkipMap<K, V> {
    fn default() -> SkipMap<K, V> {
        SkipMap::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, G> fmt::Debug for SkipMap<K, V, G> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V, G: HeightGenerator> Extend<(K, V)> for SkipMap<K, V, G> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        iter.into_iter().for_each(|(key, value)| {
            self.insert(key, value);
        });
    }
}

impl<'a, K: Ord + Copy, V: Copy, G: HeightGenerator> Extend<(&'a K, &'a V)> for SkipMap<K, V, G> {
    fn extend<I: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: I) {
        iter.into_iter().for_each(|(&key, &value)| {
            self.insert(key, value);
        });
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for SkipMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = SkipMap::new();
        map.extend(iter);
        map
    }
}

impl<K, V, G> IntoIterator for SkipMap<K, V, G> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);
    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter { inner: self.inner.into_nodes() }
    }
}

impl<'a, K, V, G> IntoIterator for &'a SkipMap<K, V, G> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);
    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V, G> IntoIterator for &'a mut SkipMap<K, V, G> {
    type IntoIter = IterMut<'a, K, V>;
    type Item = (&'a K, &'a mut V);
    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

pub struct Iter<'a, K, V> {
    nodes: Nodes<'a, K, V>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<Self::Item> {
        self.nodes.next().map(|node| (&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.nodes.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.nodes.next_back().map(|node| (&node.key, &node.value))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> { }

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Iter { nodes: self.nodes.clone() }
    }
}

pub struct IterMut<'a, K, V> {
    nodes: NodesMut<'a, K, V>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    fn next(&mut self) -> Option<Self::Item> {
        self.nodes.next().map(|node| (&node.key, &mut node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.nodes.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for IterMut<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.nodes.next_back().map(|node| (&node.key, &mut node.value))
    }
}

pub struct Keys<'a, K, V> {
    nodes: Nodes<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;
    fn next(&mut self) -> Option<&'a K> {
        self.nodes.next().map(|node| &node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.nodes.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Keys<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a K> {
        self.nodes.next_back().map(|node| &node.key)
    }
}

impl<'a, K, V> ExactSizeIterator for Keys<'a, K, V> { }

pub struct Values<'a, K, V> {
    nodes: Nodes<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;
    fn next(&mut self) -> Option<&'a V> {
        self.nodes.next().map(|node| &node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.nodes.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Values<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a V> {
        self.nodes.next_back().map(|node| &node.value)
    }
}

impl<'a, K, V> ExactSizeIterator for Values<'a, K, V> { }

pub struct ValuesMut<'a, K, V> {
    nodes: NodesMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;
    fn next(&mut self) -> Option<&'a mut V> {
        self.nodes.next().map(|node| &mut node.value)
    }
}

pub struct IntoIter<K, V> {
    inner: IntoNodes<K, V>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);
    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> { }
