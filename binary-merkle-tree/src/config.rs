//! Build-time knobs for [`MerkleTree`](crate::MerkleTree).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Below this many digests a level is always hashed on the calling thread.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1 << 14;

/// How the filler digest for odd-length levels is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PaddingPolicy {
    /// `blake3("0")` at every level of every tree.
    ///
    /// The value is public, so anyone can tell which positions are
    /// synthetic, and unrelated trees share identical filler nodes.
    #[default]
    Fixed,
    /// A filler bound to the tree's leaf count and the level index.
    LevelDerived,
}

/// Options for building a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TreeConfig {
    /// Filler used when a level has an odd number of digests.
    pub padding: PaddingPolicy,
    /// Minimum level length hashed with rayon. Only read when the
    /// `parallel` feature is enabled.
    pub parallel_threshold: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            padding: PaddingPolicy::Fixed,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl TreeConfig {
    /// Use `padding` instead of the fixed filler.
    pub fn with_padding(mut self, padding: PaddingPolicy) -> Self {
        self.padding = padding;
        self
    }

    /// Hash levels of at least `threshold` digests in parallel.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }
}
