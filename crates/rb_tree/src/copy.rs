use std::marker::PhantomData;

use crate::arena::Arena;
use crate::error::Result;
use crate::node::{Dir, Header, Link, Node, NodeId};
use crate::tree::RbTree;

impl<V: Clone, X, C: Clone> RbTree<V, X, C> {
    /// Deep copy with the same shape, colors and configuration.
    ///
    /// Walks the source with an explicit stack, so skewed trees cannot
    /// overflow the call stack.
    pub fn try_clone(&self) -> Result<Self> {
        let mut nodes = Arena::with_config(&self.config);
        let mut header = Header::default();
        let mut pending: Vec<(NodeId, Link, Dir)> = Vec::new();
        if let Some(root) = self.header.root {
            pending.push((root, None, Dir::Left));
        }

        while let Some((src, parent, dir)) = pending.pop() {
            let source = &self.nodes[src];
            nodes.reserve()?;
            let id = nodes.insert(Node {
                value: source.value.clone(),
                color: source.color,
                parent,
                left: None,
                right: None,
            });
            match parent {
                Some(parent) => nodes[parent].set_child(dir, Some(id)),
                None => header.root = Some(id),
            }
            if self.header.min == Some(src) {
                header.min = Some(id);
            }
            if self.header.max == Some(src) {
                header.max = Some(id);
            }
            if let Some(right) = source.right {
                pending.push((right, Some(id), Dir::Right));
            }
            if let Some(left) = source.left {
                pending.push((left, Some(id), Dir::Left));
            }
        }

        Ok(Self {
            nodes,
            header,
            compare: self.compare.clone(),
            config: self.config,
            _key: PhantomData,
        })
    }
}

impl<V: Clone, X, C: Clone> Clone for RbTree<V, X, C> {
    /// # Panics
    ///
    /// Panics if node storage cannot be reserved.
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(tree) => tree,
            Err(err) => panic!("failed to clone tree: {err}"),
        }
    }
}
