use std::ops::{Index, IndexMut};
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, trace};

use crate::config::TreeConfig;
use crate::error::{Error, Result};
use crate::node::{Node, NodeId};

static NEXT_OWNER: AtomicU64 = AtomicU64::new(1);

fn fresh_owner() -> u64 {
    NEXT_OWNER.fetch_add(1, Ordering::Relaxed)
}

enum Slot<V> {
    Occupied { generation: u64, node: Node<V> },
    Vacant { generation: u64, next_free: Option<NodeId> },
}

/// Node storage with a free list.
///
/// Allocation is split in two: [`Arena::reserve`] may fail and touches no
/// node, [`Arena::insert`] places a node into the reserved room and cannot
/// fail. Freed slots bump their generation so stale handles can be told apart
/// from the slot's next tenant.
pub(crate) struct Arena<V> {
    slots: Vec<Slot<V>>,
    free_head: Option<NodeId>,
    len: usize,
    limit: Option<usize>,
    owner: u64,
}

impl<V> Arena<V> {
    pub(crate) fn with_config(config: &TreeConfig) -> Self {
        let capacity = match config.node_limit {
            Some(limit) => config.initial_capacity.min(limit),
            None => config.initial_capacity,
        };
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
            limit: config.node_limit,
            owner: fresh_owner(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub(crate) fn owner(&self) -> u64 {
        self.owner
    }

    /// Makes sure the next [`Arena::insert`] has room.
    pub(crate) fn reserve(&mut self) -> Result<()> {
        if let Some(limit) = self.limit
            && self.len >= limit
        {
            debug!("node limit of {limit} reached");
            return Err(Error::NodeLimitReached { limit });
        }
        if self.free_head.is_some() {
            return Ok(());
        }
        if self.slots.len() >= NodeId::MAX_INDEX {
            debug!("node index space exhausted at {} slots", self.slots.len());
            return Err(Error::IndexSpaceExhausted);
        }
        self.slots.try_reserve(1)?;
        Ok(())
    }

    /// Places `node` into a slot. Must follow a successful [`Arena::reserve`].
    pub(crate) fn insert(&mut self, node: Node<V>) -> NodeId {
        let id = match self.free_head {
            Some(id) => {
                let slot = &mut self.slots[id.index()];
                let Slot::Vacant {
                    generation,
                    next_free,
                } = *slot
                else {
                    unreachable!("free list points at an occupied slot");
                };
                self.free_head = next_free;
                *slot = Slot::Occupied { generation, node };
                id
            }
            None => {
                let id = NodeId::new(self.slots.len());
                self.slots.push(Slot::Occupied {
                    generation: 0,
                    node,
                });
                id
            }
        };
        self.len += 1;
        trace!("allocated node {}", id.index());
        id
    }

    /// Frees the slot and hands back its node.
    pub(crate) fn remove(&mut self, id: NodeId) -> Node<V> {
        let slot = &mut self.slots[id.index()];
        let generation = match slot {
            Slot::Occupied { generation, .. } => *generation + 1,
            Slot::Vacant { .. } => panic!("node {} freed twice", id.index()),
        };
        let vacant = Slot::Vacant {
            generation,
            next_free: self.free_head,
        };
        let Slot::Occupied { node, .. } = std::mem::replace(slot, vacant) else {
            unreachable!();
        };
        self.free_head = Some(id);
        self.len -= 1;
        trace!("freed node {}", id.index());
        node
    }

    /// Generation of a live slot, `None` when the slot is free or out of range.
    pub(crate) fn generation(&self, id: NodeId) -> Option<u64> {
        match self.slots.get(id.index())? {
            Slot::Occupied { generation, .. } => Some(*generation),
            Slot::Vacant { .. } => None,
        }
    }

    /// Drops every node at once. Handles issued before are rejected afterwards.
    pub(crate) fn clear(&mut self) {
        debug!("clearing {} nodes", self.len);
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
        self.owner = fresh_owner();
    }
}

impl<V> Index<NodeId> for Arena<V> {
    type Output = Node<V>;

    fn index(&self, id: NodeId) -> &Node<V> {
        match &self.slots[id.index()] {
            Slot::Occupied { node, .. } => node,
            Slot::Vacant { .. } => panic!("dangling node {}", id.index()),
        }
    }
}

impl<V> IndexMut<NodeId> for Arena<V> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<V> {
        match &mut self.slots[id.index()] {
            Slot::Occupied { node, .. } => node,
            Slot::Vacant { .. } => panic!("dangling node {}", id.index()),
        }
    }
}
