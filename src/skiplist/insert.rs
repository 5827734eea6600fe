use crate::height::MAX_HEIGHT;
use super::{Link, Node, SkipList};

impl<K: Ord, V> SkipList<K, V> {
    /// Links a new tower of `height` lanes holding `key`, which must not
    /// already be present.
    pub(crate) fn insert_new(&mut self, key: K, value: V, height: usize) -> Link {
        debug_assert!(height >= 1 && height <= MAX_HEIGHT);

        // The sentinels always keep at least one empty lane above the
        // tallest tower.
        if height >= self.height() {
            self.grow(height + 1);
        }

        // The immediate predecessor of the new tower in each of its lanes:
        // the rightmost tower whose key is strictly less than the new key.
        // We walk across and down from the left sentinel, starting at the
        // top lane of the new tower.
        let mut spots = [Link::Head; MAX_HEIGHT];
        let mut current = Link::Head;

        for level in (0..height).rev() {
            while let Link::Node(idx) = self.next(current, level) {
                if self.node(idx).key >= key {
                    break;
                }
                current = Link::Node(idx);
            }
            spots[level] = current;
        }

        let new = self.alloc(Node::new(key, value, height));

        for (level, &pred) in spots[..height].iter().enumerate() {
            let succ = self.next(pred, level);
            self.set_next(new, level, succ);
            self.set_prev(succ, level, new);
            self.set_prev(new, level, pred);
            self.set_next(pred, level, new);
        }

        self.len += 1;
        new
    }
}
