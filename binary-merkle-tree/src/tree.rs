use log::{debug, trace};

use crate::{
    MerkleTreeError, Result,
    config::TreeConfig,
    hash::{Digest, digest_to_hex, leaf_hash, node_hash, padding_for},
};

/// A binary Merkle tree with every level retained.
///
/// Level 0 holds the leaf digests, the last level holds only the root. Any
/// level longer than one digest has even length: when pairing would leave a
/// digest without a partner, a padding digest is appended first.
///
/// The tree is immutable once built. It owns its levels, so the caller's
/// leaf buffer is never padded in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    levels: Vec<Vec<Digest>>,
    root: Digest,
    leaf_count: usize,
    hash_calls: u64,
}

impl MerkleTree {
    /// Build a tree from pre-hashed leaves with the default configuration.
    ///
    /// Accepts a `Vec<Digest>` (taken by value) or a `&[Digest]` (copied).
    pub fn new(leaves: impl Into<Vec<Digest>>) -> Result<Self> {
        Self::with_config(leaves, TreeConfig::default())
    }

    /// Hash each raw value with [`leaf_hash`] and build a tree over them.
    pub fn from_raw_leaves<I, T>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let leaves: Vec<Digest> = values
            .into_iter()
            .map(|value| leaf_hash(value.as_ref()))
            .collect();
        Self::new(leaves)
    }

    /// Build a tree from pre-hashed leaves.
    ///
    /// Fails with `InvalidInput` if `leaves` is empty. A single leaf gives a
    /// one-level tree whose root is that leaf, unhashed.
    pub fn with_config(leaves: impl Into<Vec<Digest>>, config: TreeConfig) -> Result<Self> {
        let mut level: Vec<Digest> = leaves.into();
        if level.is_empty() {
            return Err(MerkleTreeError::InvalidInput(
                "cannot build a Merkle tree from zero leaves".into(),
            ));
        }
        let leaf_count = level.len();

        let mut levels: Vec<Vec<Digest>> = Vec::new();
        let mut hash_calls = 0u64;
        pad_level(&mut level, &config, leaf_count, 0);

        while level.len() != 1 {
            let mut next = hash_level(&level, &config);
            hash_calls += next.len() as u64;
            levels.push(level);
            pad_level(&mut next, &config, leaf_count, levels.len());
            level = next;
        }

        let root = level[0];
        levels.push(level);

        debug!(
            "built merkle tree: {} leaves, {} levels, root {}",
            leaf_count,
            levels.len(),
            digest_to_hex(&root)
        );

        Ok(Self {
            levels,
            root,
            leaf_count,
            hash_calls,
        })
    }

    /// The root digest.
    pub fn root(&self) -> Digest {
        self.root
    }

    /// All levels, from the leaves (index 0) up to the root.
    pub fn levels(&self) -> &[Vec<Digest>] {
        &self.levels
    }

    /// The digests at `index`, or `None` above the root.
    pub fn level(&self, index: usize) -> Option<&[Digest]> {
        self.levels.get(index).map(Vec::as_slice)
    }

    /// Number of levels including the leaf level and the root level.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Number of leaves supplied by the caller, excluding padding.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Length of level 0 after padding.
    pub fn padded_leaf_count(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    /// The leaf digest at `index`, or `None` past the caller's leaves.
    pub fn leaf(&self, index: usize) -> Option<&Digest> {
        if index >= self.leaf_count {
            return None;
        }
        self.levels.first().and_then(|leaves| leaves.get(index))
    }

    /// Number of `node_hash` calls made while building.
    pub fn hash_calls(&self) -> u64 {
        self.hash_calls
    }

    /// Consume the tree and return its levels.
    pub fn into_levels(self) -> Vec<Vec<Digest>> {
        self.levels
    }
}

/// Append a padding digest when `level` is odd and not the root.
fn pad_level(level: &mut Vec<Digest>, config: &TreeConfig, leaf_count: usize, height: usize) {
    if level.len() % 2 == 1 && level.len() > 1 {
        level.push(padding_for(config.padding, leaf_count, height));
        trace!("padded level {} to {} digests", height, level.len());
    }
}

/// Hash an even-length level pairwise into the level above it.
fn hash_level(level: &[Digest], config: &TreeConfig) -> Vec<Digest> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        if level.len() >= config.parallel_threshold {
            return level
                .par_chunks_exact(2)
                .map(|pair| node_hash(&pair[0], &pair[1]))
                .collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = config;

    level
        .chunks_exact(2)
        .map(|pair| node_hash(&pair[0], &pair[1]))
        .collect()
}
