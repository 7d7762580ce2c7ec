//! Red-black tree engine for ordered set, map, multiset and multimap
//! containers.
//!
//! Nodes live in an index arena; the tree keeps an explicit header caching the
//! root and both extreme nodes. Positions are `Copy` handles that stay valid
//! until the node they name is erased.

mod arena;
mod balance;
mod config;
mod copy;
mod cursor;
mod error;
mod node;
mod policy;
mod query;
mod tree;
mod verify;

pub use config::TreeConfig;
pub use cursor::{IntoIter, Iter, Position};
pub use error::{Error, Result, Violation};
pub use policy::{ByFn, Comparator, First, Identity, KeyOf, Natural, Reverse};
pub use tree::RbTree;
