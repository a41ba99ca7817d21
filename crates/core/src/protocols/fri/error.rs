// Copyright 2024 Irreducible Inc.

use fibra_ntt::Error as NttError;
use fibra_utils::SerializationError;

use crate::{merkle_tree, transcript};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("cannot calculate parameters satisfying the security target")]
	ParameterError,
	#[error("conflicting or incorrect constructor argument: {0}")]
	InvalidArgs(String),
	#[error("evaluation domain error: {0}")]
	Domain(#[from] NttError),
	#[error("message length is {actual}, expected {expected}")]
	IncorrectMessageLength { expected: usize, actual: usize },
	#[error("serialization error: {0}")]
	Serialization(#[from] SerializationError),
	#[error("transcript error: {0}")]
	Transcript(#[from] transcript::Error),
	#[error("Merkle tree error: {0}")]
	MerkleTree(#[from] merkle_tree::Error),
	#[error("attempted to fold more than maximum of {max_folds} times")]
	TooManyFoldExecutions { max_folds: usize },
	#[error("attempted to finish prover before executing all fold rounds")]
	EarlyProverFinish,
	#[error("verification error: {0}")]
	Verification(#[from] VerificationError),
}

/// Coarse classification of [`Error`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// Invalid parameters or misuse of the prover state machine.
	Configuration,
	/// Malformed buffers or inputs of the wrong length.
	Encoding,
	/// Failure inside the Fiat-Shamir transcript.
	Transcript,
	/// The proof was checked and rejected.
	Rejected,
}

impl Error {
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::ParameterError
			| Self::InvalidArgs(_)
			| Self::Domain(_)
			| Self::TooManyFoldExecutions { .. }
			| Self::EarlyProverFinish => ErrorKind::Configuration,
			Self::IncorrectMessageLength { .. } | Self::Serialization(_) | Self::MerkleTree(_) => {
				ErrorKind::Encoding
			}
			Self::Transcript(_) => ErrorKind::Transcript,
			Self::Verification(_) => ErrorKind::Rejected,
		}
	}

	/// Whether this error means a well-formed run of the verifier rejected the proof.
	pub fn is_rejection(&self) -> bool {
		self.kind() == ErrorKind::Rejected
	}
}

#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
	#[error("incorrect codeword folding in query round {query_round} at index {index}")]
	IncorrectFold { query_round: usize, index: usize },
	#[error("the size of the query proof is incorrect, expected {expected}")]
	IncorrectQueryProofLength { expected: usize },
	#[error("the number of query proofs is incorrect, expected {expected}")]
	IncorrectQueryCount { expected: usize },
	#[error("the number of round commitments is incorrect, expected {expected}")]
	IncorrectRoundCount { expected: usize },
	#[error("the terminal codeword length is incorrect, expected {expected}")]
	IncorrectTerminalLength { expected: usize },
	#[error("the terminal codeword is not of admissible degree")]
	IncorrectDegree,
	#[error("position {position} is out of range, maximum is {max}")]
	PositionOutOfRange { position: usize, max: usize },
	#[error("the opening proof is for leaf {actual}, expected leaf {expected}")]
	LeafIndexMismatch { expected: usize, actual: usize },
	#[error("the opening proof is for a tree of {actual} leaves, expected {expected}")]
	IncorrectLeafCount { expected: usize, actual: usize },
	#[error("the Merkle path for round {round} does not resolve to the round commitment")]
	InvalidMerklePath {
		round: usize,
		#[source]
		source: merkle_tree::Error,
	},
}
