use rustc_hash::FxHashMap;

use crate::skiplist::Link;

/// The path taken by the most recent traced search.
///
/// For every tower the search left by following one of its forward links,
/// records the level of that link. Towers the search passed under, or
/// stopped at, have no marker.
#[derive(Debug, Default)]
pub(crate) struct Trace {
    followed: FxHashMap<Link, usize>,
}

impl Trace {
    pub(crate) fn new() -> Trace {
        Trace::default()
    }

    pub(crate) fn clear(&mut self) {
        self.followed.clear();
    }

    pub(crate) fn record(&mut self, tower: Link, level: usize) {
        self.followed.insert(tower, level);
    }

    // Arena slots are reused, so a removed tower must not leave a marker
    // behind for whatever moves into its slot.
    pub(crate) fn forget(&mut self, tower: Link) {
        self.followed.remove(&tower);
    }

    pub(crate) fn followed(&self, tower: Link) -> Option<usize> {
        self.followed.get(&tower).copied()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.followed.len()
    }
}
