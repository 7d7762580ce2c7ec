/// Node color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Color {
    Red,
    Black,
}

/// Stable index of a node inside the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct NodeId(u32);

impl NodeId {
    pub(crate) const MAX_INDEX: usize = u32::MAX as usize;

    pub(crate) fn new(index: usize) -> Self {
        debug_assert!(index < Self::MAX_INDEX);
        Self(index as u32)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

pub(crate) type Link = Option<NodeId>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Dir {
    Left,
    Right,
}

impl Dir {
    pub(crate) fn opposite(self) -> Self {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

pub(crate) struct Node<V> {
    pub(crate) value: V,
    pub(crate) color: Color,
    pub(crate) parent: Link,
    pub(crate) left: Link,
    pub(crate) right: Link,
}

impl<V> Node<V> {
    /// Detached red node, the shape every insertion starts from.
    pub(crate) fn new(value: V) -> Self {
        Self {
            value,
            color: Color::Red,
            parent: None,
            left: None,
            right: None,
        }
    }

    pub(crate) fn child(&self, dir: Dir) -> Link {
        match dir {
            Dir::Left => self.left,
            Dir::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, dir: Dir, link: Link) {
        match dir {
            Dir::Left => self.left = link,
            Dir::Right => self.right = link,
        }
    }
}

/// Boundary sentinel: the root plus cached minimum and maximum nodes.
///
/// All three are `None` exactly when the tree is empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Header {
    pub(crate) root: Link,
    pub(crate) min: Link,
    pub(crate) max: Link,
}

impl Header {
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}
