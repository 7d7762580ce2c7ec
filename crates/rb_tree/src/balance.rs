use crate::node::{Color, Dir, Link, NodeId};
use crate::tree::RbTree;

impl<V, X, C> RbTree<V, X, C> {
    /// Rotates the subtree at `x` towards `dir`: `x`'s child on the opposite
    /// side takes its place and `x` becomes that child's `dir` child.
    ///
    /// `rotate(x, Dir::Left)` is the classic left rotation.
    pub(crate) fn rotate(&mut self, x: NodeId, dir: Dir) {
        let y = self.nodes[x]
            .child(dir.opposite())
            .expect("rotation needs a child on the far side");
        let inner = self.nodes[y].child(dir);
        self.nodes[x].set_child(dir.opposite(), inner);
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(x);
        }
        let parent = self.nodes[x].parent;
        self.nodes[y].parent = parent;
        self.replace_child(parent, x, Some(y));
        self.nodes[y].set_child(dir, Some(x));
        self.nodes[x].parent = Some(y);
    }

    pub(crate) fn rebalance_after_insert(&mut self, mut x: NodeId) {
        while let Some(mut parent) = self.nodes[x].parent {
            if self.nodes[parent].color == Color::Black {
                break;
            }
            let grand = self.nodes[parent]
                .parent
                .expect("a red node is never the root");
            let side = self.side_of(parent, grand);
            let uncle = self.nodes[grand].child(side.opposite());

            if let Some(uncle) = uncle
                && self.nodes[uncle].color == Color::Red
            {
                self.nodes[parent].color = Color::Black;
                self.nodes[uncle].color = Color::Black;
                self.nodes[grand].color = Color::Red;
                x = grand;
                continue;
            }

            if self.side_of(x, parent) != side {
                self.rotate(parent, side);
                x = parent;
                parent = self.nodes[x].parent.expect("rotation keeps a parent");
            }
            self.nodes[parent].color = Color::Black;
            self.nodes[grand].color = Color::Red;
            self.rotate(grand, side.opposite());
            break;
        }

        if let Some(root) = self.header.root {
            self.nodes[root].color = Color::Black;
        }
    }

    /// Repairs a black-height deficit at `x` (possibly an empty link) whose
    /// parent is `parent`.
    pub(crate) fn rebalance_after_erase(&mut self, mut x: Link, mut parent: Link) {
        while x != self.header.root && !self.is_red(x) {
            let Some(p) = parent else {
                break;
            };
            let side = if self.nodes[p].left == x {
                Dir::Left
            } else {
                Dir::Right
            };
            let mut sibling = self.sibling(p, side);

            if self.nodes[sibling].color == Color::Red {
                self.nodes[sibling].color = Color::Black;
                self.nodes[p].color = Color::Red;
                self.rotate(p, side);
                sibling = self.sibling(p, side);
            }

            let near = self.nodes[sibling].child(side);
            let far = self.nodes[sibling].child(side.opposite());
            if !self.is_red(near) && !self.is_red(far) {
                self.nodes[sibling].color = Color::Red;
                x = Some(p);
                parent = self.nodes[p].parent;
                continue;
            }

            if !self.is_red(far) {
                let near = near.expect("red near child exists");
                self.nodes[near].color = Color::Black;
                self.nodes[sibling].color = Color::Red;
                self.rotate(sibling, side.opposite());
                sibling = self.sibling(p, side);
            }
            self.nodes[sibling].color = self.nodes[p].color;
            self.nodes[p].color = Color::Black;
            if let Some(far) = self.nodes[sibling].child(side.opposite()) {
                self.nodes[far].color = Color::Black;
            }
            self.rotate(p, side);
            break;
        }

        if let Some(x) = x {
            self.nodes[x].color = Color::Black;
        }
    }

    fn sibling(&self, parent: NodeId, side: Dir) -> NodeId {
        self.nodes[parent]
            .child(side.opposite())
            .expect("a black-height deficit always has a sibling")
    }
}

#[cfg(test)]
mod tests {
    use crate::RbTree;
    use crate::node::{Color, Dir};

    #[test]
    fn rotation_preserves_order() {
        let mut tree = RbTree::<u32>::new();
        tree.insert_unique_iter([2, 1, 3]).unwrap();
        let root = tree.header.root.unwrap();
        tree.rotate(root, Dir::Left);
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        let new_root = tree.header.root.unwrap();
        assert_eq!(tree.nodes[new_root].value, 3);
        assert_eq!(tree.nodes[new_root].parent, None);
        tree.rotate(new_root, Dir::Right);
        assert_eq!(tree.nodes[tree.header.root.unwrap()].value, 2);
    }

    #[test]
    fn red_uncle_recolors() {
        let mut tree = RbTree::<u32>::new();
        tree.insert_unique_iter([20, 10, 30, 5]).unwrap();
        let root = tree.header.root.unwrap();
        assert_eq!(tree.nodes[root].value, 20);
        let left = tree.nodes[root].left.unwrap();
        let right = tree.nodes[root].right.unwrap();
        assert_eq!(tree.nodes[left].color, Color::Black);
        assert_eq!(tree.nodes[right].color, Color::Black);
        let leaf = tree.nodes[left].left.unwrap();
        assert_eq!(tree.nodes[leaf].color, Color::Red);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn inner_grandchild_double_rotation() {
        let mut tree = RbTree::<u32>::new();
        tree.insert_unique_iter([30, 10, 20]).unwrap();
        let root = tree.header.root.unwrap();
        assert_eq!(tree.nodes[root].value, 20);
        assert_eq!(tree.nodes[root].color, Color::Black);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn erase_every_shape() {
        // Every deletion order of a small perfect-ish tree.
        let keys = [4u32, 2, 6, 1, 3, 5, 7];
        for first in keys {
            for second in keys {
                if first == second {
                    continue;
                }
                let mut tree = RbTree::<u32>::new();
                tree.insert_unique_iter(keys).unwrap();
                tree.erase_unique(&first);
                tree.check_invariants().unwrap();
                tree.erase_unique(&second);
                tree.check_invariants().unwrap();
                assert_eq!(tree.len(), 5);
            }
        }
    }
}
