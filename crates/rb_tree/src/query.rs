use std::cmp::Ordering;

use crate::cursor::Position;
use crate::node::Link;
use crate::policy::{Comparator, KeyOf};
use crate::tree::RbTree;

impl<V, X, C> RbTree<V, X, C>
where
    X: KeyOf<V>,
    C: Comparator<X::Key>,
{
    pub(crate) fn find_node(&self, key: &X::Key) -> Link {
        let mut cur = self.header.root;
        while let Some(id) = cur {
            cur = match self.compare.compare(key, self.key(id)) {
                Ordering::Less => self.nodes[id].left,
                Ordering::Greater => self.nodes[id].right,
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    fn lower_bound_node(&self, key: &X::Key) -> Link {
        let mut best = None;
        let mut cur = self.header.root;
        while let Some(id) = cur {
            if self.compare.compare(self.key(id), key) == Ordering::Less {
                cur = self.nodes[id].right;
            } else {
                best = Some(id);
                cur = self.nodes[id].left;
            }
        }
        best
    }

    fn upper_bound_node(&self, key: &X::Key) -> Link {
        let mut best = None;
        let mut cur = self.header.root;
        while let Some(id) = cur {
            if self.compare.compare(key, self.key(id)) == Ordering::Less {
                best = Some(id);
                cur = self.nodes[id].left;
            } else {
                cur = self.nodes[id].right;
            }
        }
        best
    }

    /// With duplicates present, which of the equal elements is found is
    /// unspecified.
    pub fn find(&self, key: &X::Key) -> Position {
        self.position(self.find_node(key))
    }

    pub fn get(&self, key: &X::Key) -> Option<&V> {
        self.find_node(key).map(|id| &self.nodes[id].value)
    }

    pub fn contains(&self, key: &X::Key) -> bool {
        self.find_node(key).is_some()
    }

    pub fn lower_bound(&self, key: &X::Key) -> Position {
        self.position(self.lower_bound_node(key))
    }

    pub fn upper_bound(&self, key: &X::Key) -> Position {
        self.position(self.upper_bound_node(key))
    }

    pub fn equal_range_multi(&self, key: &X::Key) -> (Position, Position) {
        (self.lower_bound(key), self.upper_bound(key))
    }

    /// Like [`equal_range_multi`](Self::equal_range_multi) for trees built
    /// with unique inserts only: the range holds at most one element.
    pub fn equal_range_unique(&self, key: &X::Key) -> (Position, Position) {
        match self.find_node(key) {
            Some(id) => (self.position(Some(id)), self.position(self.successor(id))),
            None => (self.end(), self.end()),
        }
    }

    pub fn count_unique(&self, key: &X::Key) -> usize {
        usize::from(self.contains(key))
    }

    pub fn count_multi(&self, key: &X::Key) -> usize {
        let stop = self.upper_bound_node(key);
        let mut cur = self.lower_bound_node(key);
        let mut count = 0;
        while let Some(id) = cur {
            if Some(id) == stop {
                break;
            }
            count += 1;
            cur = self.successor(id);
        }
        count
    }
}
