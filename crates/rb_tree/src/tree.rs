use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use crate::arena::Arena;
use crate::config::TreeConfig;
use crate::cursor::Position;
use crate::error::Result;
use crate::node::{Color, Dir, Header, Link, Node, NodeId};
use crate::policy::{Comparator, Identity, KeyOf, Natural};

/// Red-black tree over values of type `V`.
///
/// `X` extracts the ordering key from a value ([`Identity`] for sets,
/// [`First`](crate::First) for maps) and `C` compares keys. The same tree
/// serves unique-key and duplicate-key containers: the caller picks
/// [`insert_unique`](Self::insert_unique) or [`insert_multi`](Self::insert_multi).
pub struct RbTree<V, X = Identity, C = Natural> {
    pub(crate) nodes: Arena<V>,
    pub(crate) header: Header,
    pub(crate) compare: C,
    pub(crate) config: TreeConfig,
    pub(crate) _key: PhantomData<fn() -> X>,
}

/// Where a new node goes: below `parent` on side `dir`, or as the root.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Slot {
    pub(crate) parent: Link,
    pub(crate) dir: Dir,
}

impl<V, X, C: Default> RbTree<V, X, C> {
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default(), C::default())
    }
}

impl<V, X, C: Default> Default for RbTree<V, X, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, X, C> RbTree<V, X, C> {
    pub fn with_comparator(compare: C) -> Self {
        Self::with_config(TreeConfig::default(), compare)
    }

    pub fn with_config(config: TreeConfig, compare: C) -> Self {
        Self {
            nodes: Arena::with_config(&config),
            header: Header::default(),
            compare,
            config,
            _key: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn max_size(&self) -> usize {
        self.nodes.limit().unwrap_or(NodeId::MAX_INDEX)
    }

    pub fn comparator(&self) -> &C {
        &self.compare
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.header.reset();
    }

    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    pub fn first(&self) -> Option<&V> {
        self.header.min.map(|id| &self.nodes[id].value)
    }

    pub fn last(&self) -> Option<&V> {
        self.header.max.map(|id| &self.nodes[id].value)
    }

    /// Only positions naming the erased element are invalidated.
    pub fn erase(&mut self, pos: Position) -> V {
        let z = self.resolve(pos).expect("cannot erase the end position");
        self.unlink(z).value
    }

    /// Removes `[first, last)` and returns how many elements were removed.
    pub fn erase_range(&mut self, first: Position, last: Position) -> usize {
        let stop = self.resolve(last);
        let mut cur = self.resolve(first);
        let mut removed = 0;
        while cur != stop {
            let z = cur.expect("range end precedes range start");
            cur = self.successor(z);
            self.unlink(z);
            removed += 1;
        }
        removed
    }

    pub(crate) fn color(&self, link: Link) -> Color {
        link.map_or(Color::Black, |id| self.nodes[id].color)
    }

    pub(crate) fn is_red(&self, link: Link) -> bool {
        self.color(link) == Color::Red
    }

    pub(crate) fn side_of(&self, child: NodeId, parent: NodeId) -> Dir {
        if self.nodes[parent].left == Some(child) {
            Dir::Left
        } else {
            Dir::Right
        }
    }

    pub(crate) fn attach(&mut self, slot: Slot, id: NodeId) {
        self.nodes[id].parent = slot.parent;
        match slot.parent {
            None => {
                debug_assert!(self.header.root.is_none());
                self.header.root = Some(id);
                self.header.min = Some(id);
                self.header.max = Some(id);
            }
            Some(parent) => {
                self.nodes[parent].set_child(slot.dir, Some(id));
                match slot.dir {
                    Dir::Left if self.header.min == Some(parent) => self.header.min = Some(id),
                    Dir::Right if self.header.max == Some(parent) => self.header.max = Some(id),
                    _ => {}
                }
            }
        }
        self.rebalance_after_insert(id);
    }

    /// Splices node `z` out of the tree, rebalances, and frees it.
    ///
    /// When `z` has two children its in-order successor is moved into `z`'s
    /// place, taking `z`'s color, so no payload ever changes nodes.
    pub(crate) fn unlink(&mut self, z: NodeId) -> Node<V> {
        if self.header.min == Some(z) {
            self.header.min = self.successor(z);
        }
        if self.header.max == Some(z) {
            self.header.max = self.predecessor(z);
        }

        let Node {
            left, right, color, ..
        } = self.nodes[z];
        let (x, x_parent, removed_color) = match (left, right) {
            (None, child) | (child, None) => {
                let parent = self.nodes[z].parent;
                self.transplant(z, child);
                (child, parent, color)
            }
            (Some(l), Some(r)) => {
                let y = self.minimum(r);
                let y_color = self.nodes[y].color;
                let x = self.nodes[y].right;
                let x_parent = if self.nodes[y].parent == Some(z) {
                    Some(y)
                } else {
                    let y_parent = self.nodes[y].parent;
                    self.transplant(y, x);
                    self.nodes[y].right = Some(r);
                    self.nodes[r].parent = Some(y);
                    y_parent
                };
                self.transplant(z, Some(y));
                self.nodes[y].left = Some(l);
                self.nodes[l].parent = Some(y);
                self.nodes[y].color = color;
                (x, x_parent, y_color)
            }
        };

        let node = self.nodes.remove(z);
        if removed_color == Color::Black {
            self.rebalance_after_erase(x, x_parent);
        }
        node
    }

    fn transplant(&mut self, old: NodeId, with: Link) {
        let parent = self.nodes[old].parent;
        self.replace_child(parent, old, with);
        if let Some(id) = with {
            self.nodes[id].parent = parent;
        }
    }

    // A `None` parent means the root.
    pub(crate) fn replace_child(&mut self, parent: Link, old: NodeId, with: Link) {
        match parent {
            None => self.header.root = with,
            Some(p) => {
                let dir = self.side_of(old, p);
                self.nodes[p].set_child(dir, with);
            }
        }
    }
}

impl<V, X, C> RbTree<V, X, C>
where
    X: KeyOf<V>,
    C: Comparator<X::Key>,
{
    pub(crate) fn key(&self, id: NodeId) -> &X::Key {
        X::key(&self.nodes[id].value)
    }

    /// Attachment point for a duplicate-tolerant insert. Equal keys descend
    /// right, so the new node lands after every equal element.
    pub(crate) fn locate_multi(&self, key: &X::Key) -> Slot {
        let mut slot = Slot {
            parent: None,
            dir: Dir::Left,
        };
        let mut cur = self.header.root;
        while let Some(id) = cur {
            let dir = match self.compare.compare(key, self.key(id)) {
                Ordering::Less => Dir::Left,
                Ordering::Equal | Ordering::Greater => Dir::Right,
            };
            slot = Slot {
                parent: Some(id),
                dir,
            };
            cur = self.nodes[id].child(dir);
        }
        slot
    }

    pub(crate) fn locate_unique(&self, key: &X::Key) -> std::result::Result<Slot, NodeId> {
        let mut slot = Slot {
            parent: None,
            dir: Dir::Left,
        };
        let mut cur = self.header.root;
        while let Some(id) = cur {
            let dir = match self.compare.compare(key, self.key(id)) {
                Ordering::Less => Dir::Left,
                Ordering::Greater => Dir::Right,
                Ordering::Equal => return Err(id),
            };
            slot = Slot {
                parent: Some(id),
                dir,
            };
            cur = self.nodes[id].child(dir);
        }
        Ok(slot)
    }

    fn insert_at(&mut self, slot: Slot, value: V) -> Result<NodeId> {
        self.nodes.reserve()?;
        let id = self.nodes.insert(Node::new(value));
        self.attach(slot, id);
        Ok(id)
    }

    /// A rejected `value` is dropped.
    pub fn insert_unique(&mut self, value: V) -> Result<(Position, bool)> {
        match self.locate_unique(X::key(&value)) {
            Ok(slot) => {
                let id = self.insert_at(slot, value)?;
                Ok((self.position(Some(id)), true))
            }
            Err(existing) => Ok((self.position(Some(existing)), false)),
        }
    }

    pub fn insert_multi(&mut self, value: V) -> Result<Position> {
        let slot = self.locate_multi(X::key(&value));
        let id = self.insert_at(slot, value)?;
        Ok(self.position(Some(id)))
    }

    pub fn insert_unique_iter<I: IntoIterator<Item = V>>(&mut self, iter: I) -> Result<()> {
        for value in iter {
            self.insert_unique(value)?;
        }
        Ok(())
    }

    pub fn insert_multi_iter<I: IntoIterator<Item = V>>(&mut self, iter: I) -> Result<()> {
        for value in iter {
            self.insert_multi(value)?;
        }
        Ok(())
    }

    /// Returns the element keyed by `key`, inserting `make()` first when there
    /// is none. `make` must produce a value whose key equals `key`.
    pub fn get_or_insert_with<F>(&mut self, key: &X::Key, make: F) -> Result<&mut V>
    where
        F: FnOnce() -> V,
    {
        let id = match self.locate_unique(key) {
            Err(existing) => existing,
            Ok(slot) => {
                let value = make();
                assert!(
                    self.compare.compare(X::key(&value), key) == Ordering::Equal,
                    "constructed value has a different key"
                );
                self.insert_at(slot, value)?
            }
        };
        Ok(&mut self.nodes[id].value)
    }

    pub fn erase_unique(&mut self, key: &X::Key) -> Option<V> {
        let id = self.find_node(key)?;
        Some(self.unlink(id).value)
    }

    pub fn erase_multi(&mut self, key: &X::Key) -> usize {
        let (first, last) = self.equal_range_multi(key);
        self.erase_range(first, last)
    }
}

impl<V: fmt::Debug, X, C> fmt::Debug for RbTree<V, X, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<V: PartialEq, X, C> PartialEq for RbTree<V, X, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<V: Eq, X, C> Eq for RbTree<V, X, C> {}

impl<V, X, C> Extend<V> for RbTree<V, X, C>
where
    X: KeyOf<V>,
    C: Comparator<X::Key>,
{
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        if let Err(err) = self.insert_multi_iter(iter) {
            panic!("extend failed: {err}");
        }
    }
}

impl<V, X, C> FromIterator<V> for RbTree<V, X, C>
where
    X: KeyOf<V>,
    C: Comparator<X::Key> + Default,
{
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}
