//! Resource limits for parsing
//!
//! These limits keep hostile input from exhausting memory or the stack.

/// Limits applied to a single parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserLimits {
    /// Maximum size of the input stream in bytes
    /// Default: 10 MiB
    pub max_input_bytes: usize,

    /// Maximum depth of the tree: each compound command (subshell, block,
    /// if, while, function body) and each chain link adds one level
    /// Default: 100
    pub max_depth: usize,
}

impl Default for ParserLimits {
    fn default() -> Self {
        Self {
            max_input_bytes: 10 * 1024 * 1024,
            max_depth: 100,
        }
    }
}

impl ParserLimits {
    /// Create new limits with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum input size
    pub fn max_input_bytes(mut self, bytes: usize) -> Self {
        self.max_input_bytes = bytes;
        self
    }

    /// Set maximum nesting depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

/// Tracks nesting depth during one parse.
#[derive(Debug, Clone, Default)]
pub(crate) struct DepthCounter {
    depth: usize,
}

impl DepthCounter {
    /// Go one level deeper, returns error if limit exceeded
    pub(crate) fn push(&mut self, limits: &ParserLimits) -> Result<(), LimitExceeded> {
        if self.depth >= limits.max_depth {
            return Err(LimitExceeded::MaxDepth(limits.max_depth));
        }
        self.depth += 1;
        Ok(())
    }

    /// Come back up one level
    pub(crate) fn pop(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

/// Error returned when a resource limit is exceeded
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LimitExceeded {
    #[error("input larger than {0} bytes")]
    InputTooLarge(usize),

    #[error("maximum nesting depth exceeded ({0})")]
    MaxDepth(usize),
}
