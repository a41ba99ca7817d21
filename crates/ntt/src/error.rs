// Copyright 2024 Irreducible Inc.

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
	#[error("field has no multiplicative subgroup of order 2**{log_size}, maximum is 2**{max}")]
	DomainTooLarge { log_size: usize, max: usize },
	#[error("the input length must be a power of two")]
	PowerOfTwoLengthRequired,
	#[error("buffer length {actual} does not match the domain size {expected}")]
	IncorrectBufferLength { expected: usize, actual: usize },
	#[error("the domain of size 1 cannot be halved")]
	DomainTooSmall,
	#[error("field error: {0}")]
	Field(#[from] fibra_field::Error),
}
