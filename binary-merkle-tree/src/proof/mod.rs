//! Inclusion proof generation.
//!
//! A `MerkleProof` is the sibling path from one leaf up to (not including)
//! the root. Each step records the sibling digest and which side the
//! running hash takes when the two are combined, so verification never needs
//! the tree itself.

use bincode::{Decode, Encode};
use log::{debug, trace};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    MerkleTree, MerkleTreeError, Result,
    hash::{Digest, HASH_LENGTH},
};


/// Upper bound on the encoded size accepted by
/// [`MerkleProof::decode_from_slice`].
const MAX_ENCODED_PROOF_BYTES: usize = 1024 * 1024;

/// Which operand the running hash is at the next combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// `node_hash(running, sibling)`: the sibling sits to the right.
    Left,
    /// `node_hash(sibling, running)`: the sibling sits to the left.
    Right,
}

impl Direction {
    /// Wire tag: `0` for `Left`, `1` for `Right`.
    pub const fn tag(self) -> u8 {
        match self {
            Direction::Left => 0,
            Direction::Right => 1,
        }
    }

    /// Parse a wire tag, rejecting anything but `0` and `1`.
    pub fn from_tag(tag: u8) -> Result<Self> {
        match tag {
            0 => Ok(Direction::Left),
            1 => Ok(Direction::Right),
            other => Err(MerkleTreeError::InvalidProof(format!(
                "unrecognized direction tag {}",
                other
            ))),
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = MerkleTreeError;

    fn try_from(tag: u8) -> Result<Self> {
        Self::from_tag(tag)
    }
}

/// One level of a proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProofStep {
    pub direction: Direction,
    pub sibling: Digest,
}

impl ProofStep {
    pub fn new(direction: Direction, sibling: Digest) -> Self {
        Self { direction, sibling }
    }

    /// Build a step from an untyped `(tag, sibling)` pair.
    ///
    /// Fails with `InvalidProof` if the tag is unknown or the sibling is not
    /// exactly [`HASH_LENGTH`] bytes.
    pub fn from_raw(tag: u8, sibling: &[u8]) -> Result<Self> {
        let direction = Direction::from_tag(tag)?;
        let sibling: Digest = sibling.try_into().map_err(|_| {
            MerkleTreeError::InvalidProof(format!(
                "sibling digest must be {} bytes, got {}",
                HASH_LENGTH,
                sibling.len()
            ))
        })?;
        Ok(Self { direction, sibling })
    }
}

/// An inclusion proof for a single leaf, ordered from the leaf level upward.
#[derive(Debug, Clone, Default, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MerkleProof {
    steps: Vec<ProofStep>,
}

impl MerkleProof {
    pub fn new(steps: Vec<ProofStep>) -> Self {
        Self { steps }
    }

    /// Build a proof from untyped `(tag, sibling)` pairs, validating each.
    pub fn from_raw_steps<I, S>(raw_steps: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, S)>,
        S: AsRef<[u8]>,
    {
        let steps = raw_steps
            .into_iter()
            .enumerate()
            .map(|(i, (tag, sibling))| {
                ProofStep::from_raw(tag, sibling.as_ref()).map_err(|e| match e {
                    MerkleTreeError::InvalidProof(msg) => {
                        MerkleTreeError::InvalidProof(format!("step {}: {}", i, msg))
                    }
                    other => other,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[ProofStep] {
        &self.steps
    }

    /// Number of steps; one per non-root level of the tree.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// `true` only for proofs from a single-leaf tree.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProofStep> {
        self.steps.iter()
    }

    pub fn into_steps(self) -> Vec<ProofStep> {
        self.steps
    }

    /// Encode to bytes using bincode.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_no_limit();
        bincode::encode_to_vec(self, config)
            .map_err(|e| MerkleTreeError::InvalidProof(format!("encode error: {}", e)))
    }

    /// Decode from bytes using bincode.
    ///
    /// Rejects unknown direction variants, short sibling digests and
    /// trailing bytes.
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_limit::<{ MAX_ENCODED_PROOF_BYTES }>();
        let (proof, read): (Self, usize) =
            bincode::decode_from_slice(bytes, config).map_err(|e| {
                debug!("rejecting encoded proof of {} bytes: {}", bytes.len(), e);
                MerkleTreeError::InvalidProof(format!("decode error: {}", e))
            })?;
        if read != bytes.len() {
            return Err(MerkleTreeError::InvalidProof(format!(
                "{} trailing bytes after proof",
                bytes.len() - read
            )));
        }
        Ok(proof)
    }
}

impl<'a> IntoIterator for &'a MerkleProof {
    type Item = &'a ProofStep;
    type IntoIter = std::slice::Iter<'a, ProofStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl MerkleTree {
    /// Generate the inclusion proof for the leaf at `leaf_index`.
    ///
    /// Fails with `IndexOutOfRange` unless `leaf_index < leaf_count()`.
    /// Padding leaves are not provable.
    pub fn proof(&self, leaf_index: usize) -> Result<MerkleProof> {
        if leaf_index >= self.leaf_count() {
            return Err(MerkleTreeError::IndexOutOfRange {
                index: leaf_index,
                leaf_count: self.leaf_count(),
            });
        }

        let levels = self.levels();
        let path_len = levels.len() - 1;
        let mut steps = Vec::with_capacity(path_len);
        let mut index = leaf_index;
        // Every level below the root has even length, so the partner of any
        // index is in bounds.
        for level in &levels[..path_len] {
            let step = if index % 2 == 0 {
                ProofStep::new(Direction::Left, level[index + 1])
            } else {
                ProofStep::new(Direction::Right, level[index - 1])
            };
            steps.push(step);
            index /= 2;
        }

        trace!("generated {}-step proof for leaf {}", steps.len(), leaf_index);
        Ok(MerkleProof { steps })
    }
}
