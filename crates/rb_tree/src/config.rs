/// Storage settings for a tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TreeConfig {
    /// Upper bound on live nodes. Insertions beyond it fail with
    /// [`Error::NodeLimitReached`](crate::Error::NodeLimitReached).
    pub node_limit: Option<usize>,
    /// Slots reserved up front.
    pub initial_capacity: usize,
}

impl TreeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node_limit(mut self, limit: usize) -> Self {
        self.node_limit = Some(limit);
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }
}
