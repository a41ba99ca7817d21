// Copyright 2024 Irreducible Inc.

//! Binary Merkle tree commitments to vectors of field elements.

mod binary_merkle_tree;
mod errors;
mod merkle_tree_vcs;
mod prover;
mod scheme;
#[cfg(test)]
mod tests;

pub use binary_merkle_tree::*;
pub use errors::{Error, VerificationError};
pub use merkle_tree_vcs::*;
pub use prover::BinaryMerkleTreeProver;
pub use scheme::BinaryMerkleTreeScheme;
