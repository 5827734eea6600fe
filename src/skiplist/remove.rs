use super::{Link, SkipList};

impl<K, V> SkipList<K, V> {
    /// Detaches the tower at `idx` from every lane it occupies and releases
    /// its slot. Its neighbours on each lane are linked straight to each
    /// other.
    pub(crate) fn unlink(&mut self, idx: usize) -> (K, V) {
        let tower = Link::Node(idx);

        for level in 0..self.node(idx).height() {
            let left = self.prev(tower, level);
            let right = self.next(tower, level);
            self.set_next(left, level, right);
            self.set_prev(right, level, left);
        }

        self.len -= 1;
        let node = self.dealloc(idx);
        (node.key, node.value)
    }
}
