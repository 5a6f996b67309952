//! Options for file finding
//!
//! This module provides options for configuring the traversal. They are
//! set by the global options (`-maxdepth`, `-mindepth`) of an expression.

/// Options for configuring the traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindOptions {
    /// Deepest level whose entries are visited (None for unlimited)
    pub max_depth: Option<usize>,

    /// Shallowest level whose entries are evaluated
    pub min_depth: usize,
}

impl FindOptions {
    /// Create a new FindOptions with default values
    pub fn new() -> Self {
        Self {
            max_depth: None,
            min_depth: 0,
        }
    }

    /// Set the maximum depth to search
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the minimum depth of reported entries
    pub fn with_min_depth(mut self, min_depth: usize) -> Self {
        self.min_depth = min_depth;
        self
    }

    /// Whether the children of a directory at `depth` should be listed
    pub fn descends_below(&self, depth: usize) -> bool {
        self.max_depth.map_or(true, |max| depth < max)
    }

    /// Whether an entry at `depth` takes part in evaluation
    pub fn evaluates_at(&self, depth: usize) -> bool {
        depth >= self.min_depth && self.max_depth.map_or(true, |max| depth <= max)
    }
}

impl Default for FindOptions {
    fn default() -> Self {
        Self::new()
    }
}
