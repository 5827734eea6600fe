use crate::skiplist::{Link, SkipList};
use crate::trace::Trace;

/// One column of a skip list diagram: the left sentinel or a tower, with
/// the reach of each of its forward links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TowerView<'a, K> {
    key: Option<&'a K>,
    spans: Vec<usize>,
    followed: Option<usize>,
}

impl<'a, K> TowerView<'a, K> {
    /// The tower's key, or `None` for the left sentinel.
    pub fn key(&self) -> Option<&'a K> {
        self.key
    }

    pub fn is_sentinel(&self) -> bool {
        self.key.is_none()
    }

    pub fn height(&self) -> usize {
        self.spans.len()
    }

    /// For each level, the number of bottom-lane steps covered by the
    /// forward link at that level. A link to the next tower spans 1.
    pub fn spans(&self) -> &[usize] {
        &self.spans
    }

    /// The level at which the last traced search left this tower, if it
    /// went through it at all.
    pub fn followed(&self) -> Option<usize> {
        self.followed
    }
}

/// Columns of the list from the left sentinel up to, but not including,
/// the right sentinel.
pub struct Towers<'a, K, V> {
    list: &'a SkipList<K, V>,
    trace: &'a Trace,
    cursor: Link,
}

impl<'a, K, V> Towers<'a, K, V> {
    pub(crate) fn new(list: &'a SkipList<K, V>, trace: &'a Trace) -> Towers<'a, K, V> {
        Towers { list, trace, cursor: Link::Head }
    }
}

fn span<K, V>(list: &SkipList<K, V>, from: Link, level: usize) -> usize {
    let target = list.next(from, level);
    let mut cursor = list.next(from, 0);
    let mut steps = 1;
    while cursor != target {
        cursor = list.next(cursor, 0);
        steps += 1;
    }
    steps
}

impl<'a, K, V> Iterator for Towers<'a, K, V> {
    type Item = TowerView<'a, K>;

    fn next(&mut self) -> Option<TowerView<'a, K>> {
        let list = self.list;
        let tower = self.cursor;
        if tower == Link::Tail {
            return None;
        }

        let spans = (0..list.tower_height(tower)).map(|level| span(list, tower, level)).collect();
        self.cursor = list.next(tower, 0);

        Some(TowerView {
            key: list.key(tower),
            spans,
            followed: self.trace.followed(tower),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let columns = match self.cursor {
            Link::Head => self.list.len() + 1,
            Link::Node(_) => 1,
            Link::Tail => 0,
        };
        (columns, Some(self.list.len() + 1))
    }
}
