use std::cmp::Ordering;

use crate::error::Violation;
use crate::node::{Color, Link, NodeId};
use crate::policy::{Comparator, KeyOf};
use crate::tree::RbTree;

impl<V, X, C> RbTree<V, X, C>
where
    X: KeyOf<V>,
    C: Comparator<X::Key>,
{
    /// Checks the red-black rules, parent links, ordering, boundary caches and
    /// length. Runs in O(n) without recursion.
    pub fn check_invariants(&self) -> Result<(), Violation> {
        let Some(root) = self.header.root else {
            if self.header.min.is_some() || self.header.max.is_some() {
                return Err(Violation::StaleBoundary);
            }
            return match self.len() {
                0 => Ok(()),
                found => Err(Violation::LengthMismatch { expected: 0, found }),
            };
        };
        if self.nodes[root].color == Color::Red {
            return Err(Violation::RedRoot);
        }
        if self.nodes[root].parent.is_some() {
            return Err(Violation::BrokenParentLink);
        }

        let mut expected_black: Option<usize> = None;
        let mut visited = 0;
        let mut stack: Vec<(NodeId, usize)> = vec![(root, 0)];
        while let Some((id, above)) = stack.pop() {
            visited += 1;
            let node = &self.nodes[id];
            let blacks = above + usize::from(node.color == Color::Black);
            for child in [node.left, node.right] {
                match child {
                    Some(child) => {
                        if self.nodes[child].parent != Some(id) {
                            return Err(Violation::BrokenParentLink);
                        }
                        if node.color == Color::Red && self.nodes[child].color == Color::Red {
                            return Err(Violation::RedChildOfRed);
                        }
                        stack.push((child, blacks));
                    }
                    None => match expected_black {
                        None => expected_black = Some(blacks),
                        Some(expected) if expected != blacks => {
                            return Err(Violation::BlackHeight {
                                expected,
                                found: blacks,
                            });
                        }
                        Some(_) => {}
                    },
                }
            }
        }
        if visited != self.len() {
            return Err(Violation::LengthMismatch {
                expected: self.len(),
                found: visited,
            });
        }

        if self.header.min != Some(self.minimum(root)) || self.header.max != Some(self.maximum(root))
        {
            return Err(Violation::StaleBoundary);
        }

        let mut prev: Link = None;
        let mut cur = self.header.min;
        while let Some(id) = cur {
            if let Some(p) = prev
                && self.compare.compare(self.key(id), self.key(p)) == Ordering::Less
            {
                return Err(Violation::Unsorted);
            }
            prev = Some(id);
            cur = self.successor(id);
        }
        Ok(())
    }
}
