//! Proof verification.
//!
//! Pure functions, no tree required: the root is recomputed from the leaf
//! and the sibling path, then compared with the root the caller trusts.

use crate::{
    MerkleTreeError, Result,
    hash::{Digest, digest_to_hex, digests_equal, leaf_hash, node_hash},
    proof::{Direction, MerkleProof, ProofStep},
};

/// Recompute the root committed to by `raw_leaf` and `proof`.
///
/// The leaf is hashed with [`leaf_hash`] first.
pub fn recompute_root(raw_leaf: &[u8], proof: &MerkleProof) -> Digest {
    recompute_root_from_leaf_digest(leaf_hash(raw_leaf), proof)
}

/// Recompute the root starting from an already hashed leaf.
pub fn recompute_root_from_leaf_digest(leaf: Digest, proof: &MerkleProof) -> Digest {
    fold_steps(leaf, proof.steps())
}

/// Recompute the root from untyped `(tag, sibling)` steps.
///
/// Fails with `InvalidProof` on an unknown direction tag or a sibling that is
/// not 32 bytes; malformed steps are never hashed.
pub fn recompute_root_from_raw_steps<I, S>(raw_leaf: &[u8], raw_steps: I) -> Result<Digest>
where
    I: IntoIterator<Item = (u8, S)>,
    S: AsRef<[u8]>,
{
    let proof = MerkleProof::from_raw_steps(raw_steps)?;
    Ok(recompute_root(raw_leaf, &proof))
}

/// Check that `raw_leaf` is included under `expected_root`.
///
/// The final comparison runs in constant time.
pub fn verify(raw_leaf: &[u8], proof: &MerkleProof, expected_root: &Digest) -> bool {
    digests_equal(&recompute_root(raw_leaf, proof), expected_root)
}

fn fold_steps(leaf: Digest, steps: &[ProofStep]) -> Digest {
    steps.iter().fold(leaf, |current, step| match step.direction {
        Direction::Left => node_hash(&current, &step.sibling),
        Direction::Right => node_hash(&step.sibling, &current),
    })
}

impl MerkleProof {
    /// Root committed to by `raw_leaf` and this proof.
    pub fn compute_root(&self, raw_leaf: &[u8]) -> Digest {
        recompute_root(raw_leaf, self)
    }

    /// Same as [`verify`] with this proof.
    pub fn verify(&self, raw_leaf: &[u8], expected_root: &Digest) -> bool {
        verify(raw_leaf, self, expected_root)
    }

    /// Like [`verify`](Self::verify), but reports a mismatch as
    /// `InvalidProof` carrying both roots in hex.
    pub fn verify_against_root(&self, raw_leaf: &[u8], expected_root: &Digest) -> Result<()> {
        let computed = recompute_root(raw_leaf, self);
        if !digests_equal(&computed, expected_root) {
            return Err(MerkleTreeError::InvalidProof(format!(
                "root hash mismatch: expected {}, got {}",
                digest_to_hex(expected_root),
                digest_to_hex(&computed)
            )));
        }
        Ok(())
    }
}
