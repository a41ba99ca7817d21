// Copyright 2024 Irreducible Inc.

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("cannot commit {len} leaves, the leaf count must be a power of two")]
	PowerOfTwoLengthRequired { len: usize },
	#[error("index {index} is out of range, the largest index is {max}")]
	IndexOutOfRange { index: usize, max: usize },
	#[error("depth {depth} exceeds the tree depth {max_depth}")]
	IncorrectLayerDepth { depth: usize, max_depth: usize },
	#[error("verification failure: {0}")]
	Verification(#[from] VerificationError),
}

#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
	#[error("the branch length or leaf count does not match the tree shape")]
	IncorrectProofShape,
	#[error("the recomputed root does not match the commitment")]
	RootMismatch,
}
