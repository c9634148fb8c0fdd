//! Blake3 hashing primitives for the tree.
//!
//! - Leaves:   `blake3(value)`
//! - Nodes:    `blake3(left || right)`
//! - Padding:  `blake3("0")`
//!
//! No domain tags are mixed in; callers hash raw data with [`leaf_hash`]
//! before building.

use crate::config::PaddingPolicy;

/// Size in bytes of every digest produced by this crate.
pub const HASH_LENGTH: usize = 32;

/// A Blake3 output.
pub type Digest = [u8; HASH_LENGTH];

/// Reserved input hashed to produce the padding digest.
pub const PADDING_SEED: &[u8] = b"0";

/// Hash raw leaf bytes: `blake3(raw)`.
pub fn leaf_hash(raw: &[u8]) -> Digest {
    *blake3::hash(raw).as_bytes()
}

/// Hash two child digests into their parent: `blake3(left || right)`.
///
/// Operand order matters; swapping `left` and `right` yields a different
/// parent.
pub fn node_hash(left: &Digest, right: &Digest) -> Digest {
    let mut hasher = blake3::Hasher::new();
    hasher.update(left);
    hasher.update(right);
    *hasher.finalize().as_bytes()
}

/// The filler appended to odd-length levels: `leaf_hash(PADDING_SEED)`.
///
/// The same constant is used at every level of every tree.
pub fn padding_digest() -> Digest {
    leaf_hash(PADDING_SEED)
}

/// Padding digest for `level` of a tree built from `leaf_count` leaves.
///
/// `LevelDerived` mixes the tree size and level index into the seed:
/// `blake3("0" || leaf_count as u64 BE || level as u32 BE)`.
pub(crate) fn padding_for(policy: PaddingPolicy, leaf_count: usize, level: usize) -> Digest {
    match policy {
        PaddingPolicy::Fixed => padding_digest(),
        PaddingPolicy::LevelDerived => {
            let mut hasher = blake3::Hasher::new();
            hasher.update(PADDING_SEED);
            hasher.update(&(leaf_count as u64).to_be_bytes());
            hasher.update(&(level as u32).to_be_bytes());
            *hasher.finalize().as_bytes()
        }
    }
}

/// Lowercase hex rendering of a digest (64 characters).
pub fn digest_to_hex(digest: &Digest) -> String {
    hex::encode(digest)
}

/// Equality of two digests that does not short-circuit on the first
/// differing byte.
pub(crate) fn digests_equal(a: &Digest, b: &Digest) -> bool {
    blake3::Hash::from(*a) == blake3::Hash::from(*b)
}
