use thiserror::Error;

/// Errors from Merkle tree construction, proof generation and proof
/// verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MerkleTreeError {
    /// The leaf sequence handed to the builder was rejected (e.g. empty).
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A proof was requested for a leaf position the tree does not have.
    #[error("leaf index {index} is out of range (leaf count {leaf_count})")]
    IndexOutOfRange { index: usize, leaf_count: usize },
    /// A proof could not be decoded or a step was malformed.
    #[error("invalid proof: {0}")]
    InvalidProof(String),
}

/// Alias for `core::result::Result<T, MerkleTreeError>`.
pub type Result<T> = core::result::Result<T, MerkleTreeError>;
