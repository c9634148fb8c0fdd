//! Binary Merkle tree over an ordered list of leaf digests, using Blake3.
//!
//! - Leaves are hashed by the caller with [`leaf_hash`]: `blake3(value)`.
//! - Each parent is `blake3(left || right)`.
//! - A level with an odd number of digests (other than the root) is padded
//!   with [`padding_digest`] before pairing.
//! - A tree of one leaf has that leaf as its root, unhashed.
//!
//! [`MerkleTree::proof`] returns the sibling path for one leaf;
//! [`recompute_root`] and [`verify`] check it without the tree.

mod config;
mod error;
pub(crate) mod hash;
pub(crate) mod proof;
pub(crate) mod tree;
mod verify;


pub use config::{DEFAULT_PARALLEL_THRESHOLD, PaddingPolicy, TreeConfig};
pub use error::{MerkleTreeError, Result};
pub use hash::{
    Digest, HASH_LENGTH, PADDING_SEED, digest_to_hex, leaf_hash, node_hash, padding_digest,
};
pub use proof::{Direction, MerkleProof, ProofStep};
pub use tree::MerkleTree;
pub use verify::{
    recompute_root, recompute_root_from_leaf_digest, recompute_root_from_raw_steps, verify,
};
