use std::iter::FusedIterator;

use crate::node::{Link, NodeId};
use crate::tree::RbTree;

/// A place in a tree: one element, or the end.
///
/// Positions are plain handles and do not borrow the tree. A position stays
/// valid until the element it names is erased or the tree is cleared; using an
/// invalid position, or one from another tree, panics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    owner: u64,
    node: Option<(NodeId, u64)>,
}

impl Position {
    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }
}

impl<V, X, C> RbTree<V, X, C> {
    pub(crate) fn position(&self, link: Link) -> Position {
        Position {
            owner: self.nodes.owner(),
            node: link.map(|id| {
                let generation = self
                    .nodes
                    .generation(id)
                    .expect("position of a live node");
                (id, generation)
            }),
        }
    }

    pub(crate) fn resolve(&self, pos: Position) -> Link {
        assert_eq!(
            pos.owner,
            self.nodes.owner(),
            "position belongs to another tree"
        );
        let (id, generation) = pos.node?;
        assert_eq!(
            self.nodes.generation(id),
            Some(generation),
            "stale position"
        );
        Some(id)
    }

    pub(crate) fn minimum(&self, mut x: NodeId) -> NodeId {
        while let Some(left) = self.nodes[x].left {
            x = left;
        }
        x
    }

    pub(crate) fn maximum(&self, mut x: NodeId) -> NodeId {
        while let Some(right) = self.nodes[x].right {
            x = right;
        }
        x
    }

    pub(crate) fn successor(&self, mut x: NodeId) -> Link {
        if let Some(right) = self.nodes[x].right {
            return Some(self.minimum(right));
        }
        let mut parent = self.nodes[x].parent;
        while let Some(p) = parent {
            if self.nodes[p].right != Some(x) {
                break;
            }
            x = p;
            parent = self.nodes[p].parent;
        }
        parent
    }

    pub(crate) fn predecessor(&self, mut x: NodeId) -> Link {
        if let Some(left) = self.nodes[x].left {
            return Some(self.maximum(left));
        }
        let mut parent = self.nodes[x].parent;
        while let Some(p) = parent {
            if self.nodes[p].left != Some(x) {
                break;
            }
            x = p;
            parent = self.nodes[p].parent;
        }
        parent
    }

    pub fn begin(&self) -> Position {
        self.position(self.header.min)
    }

    pub fn end(&self) -> Position {
        self.position(None)
    }

    pub fn next(&self, pos: Position) -> Position {
        let id = self.resolve(pos).expect("cannot advance past the end");
        self.position(self.successor(id))
    }

    /// From `end()` this steps to the last element.
    pub fn prev(&self, pos: Position) -> Position {
        let link = match self.resolve(pos) {
            Some(id) => self.predecessor(id),
            None => self.header.max,
        };
        assert!(link.is_some(), "cannot step back from the first position");
        self.position(link)
    }

    pub fn get_at(&self, pos: Position) -> Option<&V> {
        self.resolve(pos).map(|id| &self.nodes[id].value)
    }

    pub fn value(&self, pos: Position) -> &V {
        self.get_at(pos).expect("end position has no value")
    }

    /// Changing the element's key so that it orders differently is a logic
    /// error.
    pub fn value_mut(&mut self, pos: Position) -> &mut V {
        let id = self.resolve(pos).expect("end position has no value");
        &mut self.nodes[id].value
    }

    pub fn iter(&self) -> Iter<'_, V, X, C> {
        Iter {
            tree: self,
            front: self.header.min,
            back: self.header.max,
            len: self.len(),
        }
    }

    /// Elements in `[first, last)`.
    pub fn range(&self, first: Position, last: Position) -> Iter<'_, V, X, C> {
        let stop = self.resolve(last);
        let front = self.resolve(first);
        let mut back = None;
        let mut len = 0;
        let mut cur = front;
        while cur != stop {
            let id = cur.expect("range end precedes range start");
            back = Some(id);
            cur = self.successor(id);
            len += 1;
        }
        Iter {
            tree: self,
            front,
            back,
            len,
        }
    }
}

pub struct Iter<'a, V, X, C> {
    tree: &'a RbTree<V, X, C>,
    front: Link,
    back: Link,
    len: usize,
}

impl<V, X, C> Clone for Iter<'_, V, X, C> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, V, X, C> Iterator for Iter<'a, V, X, C> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        if self.len == 0 {
            return None;
        }
        let id = self.front?;
        self.len -= 1;
        self.front = self.tree.successor(id);
        Some(&self.tree.nodes[id].value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, V, X, C> DoubleEndedIterator for Iter<'a, V, X, C> {
    fn next_back(&mut self) -> Option<&'a V> {
        if self.len == 0 {
            return None;
        }
        let id = self.back?;
        self.len -= 1;
        self.back = self.tree.predecessor(id);
        Some(&self.tree.nodes[id].value)
    }
}

impl<V, X, C> ExactSizeIterator for Iter<'_, V, X, C> {}

impl<V, X, C> FusedIterator for Iter<'_, V, X, C> {}

impl<'a, V, X, C> IntoIterator for &'a RbTree<V, X, C> {
    type Item = &'a V;
    type IntoIter = Iter<'a, V, X, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct IntoIter<V> {
    inner: std::vec::IntoIter<V>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for IntoIter<V> {
    fn next_back(&mut self) -> Option<V> {
        self.inner.next_back()
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}

impl<V> FusedIterator for IntoIter<V> {}

impl<V, X, C> IntoIterator for RbTree<V, X, C> {
    type Item = V;
    type IntoIter = IntoIter<V>;

    fn into_iter(mut self) -> IntoIter<V> {
        let mut order = Vec::with_capacity(self.len());
        let mut cur = self.header.min;
        while let Some(id) = cur {
            order.push(id);
            cur = self.successor(id);
        }
        let values: Vec<V> = order
            .into_iter()
            .map(|id| self.nodes.remove(id).value)
            .collect();
        self.header.reset();
        IntoIter {
            inner: values.into_iter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::RbTree;

    fn sample() -> RbTree<u32> {
        (0..50).map(|k| k * 2).collect()
    }

    #[test]
    fn walk_forward_and_backward() {
        let tree = sample();
        let mut pos = tree.begin();
        let mut forward = Vec::new();
        while pos != tree.end() {
            forward.push(*tree.value(pos));
            pos = tree.next(pos);
        }
        assert_eq!(forward, (0..50).map(|k| k * 2).collect::<Vec<_>>());

        let mut backward = Vec::new();
        let mut pos = tree.end();
        while pos != tree.begin() {
            pos = tree.prev(pos);
            backward.push(*tree.value(pos));
        }
        forward.reverse();
        assert_eq!(backward, forward);
    }

    #[test]
    fn iter_is_double_ended_and_exact() {
        let tree = sample();
        let mut iter = tree.iter();
        assert_eq!(iter.len(), 50);
        assert_eq!(iter.next(), Some(&0));
        assert_eq!(iter.next_back(), Some(&98));
        assert_eq!(iter.len(), 48);
        let rest: Vec<_> = iter.collect();
        assert_eq!(rest.len(), 48);
        assert_eq!(rest.first(), Some(&&2));
        assert_eq!(rest.last(), Some(&&96));
    }

    #[test]
    fn range_between_positions() {
        let tree = sample();
        let first = tree.lower_bound(&11);
        let last = tree.upper_bound(&20);
        let span: Vec<_> = tree.range(first, last).copied().collect();
        assert_eq!(span, vec![12, 14, 16, 18, 20]);
        let back: Vec<_> = tree.range(first, last).rev().copied().collect();
        assert_eq!(back, vec![20, 18, 16, 14, 12]);
        assert_eq!(tree.range(first, first).count(), 0);
    }

    #[test]
    fn into_iter_consumes_in_order() {
        let tree: RbTree<u32> = [5, 3, 9, 3, 1].into_iter().collect();
        let values: Vec<_> = tree.into_iter().collect();
        assert_eq!(values, vec![1, 3, 3, 5, 9]);
    }

    #[test]
    fn single_element_positions() {
        let mut tree = RbTree::<u32>::new();
        let (pos, _) = tree.insert_unique(1).unwrap();
        assert_eq!(pos, tree.begin());
        assert_eq!(tree.next(pos), tree.end());
        assert_eq!(tree.prev(tree.end()), pos);
        assert!(tree.end().is_end());
        *tree.value_mut(pos) = 1;
        assert_eq!(tree.get_at(tree.end()), None);
    }

    #[test]
    #[should_panic(expected = "past the end")]
    fn next_of_end_panics() {
        let tree = sample();
        tree.next(tree.end());
    }

    #[test]
    #[should_panic(expected = "first position")]
    fn prev_of_begin_panics() {
        let tree = sample();
        tree.prev(tree.begin());
    }
}
