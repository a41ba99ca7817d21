// Copyright 2023-2024 Irreducible Inc.

/// Error thrown when a field operation fails.
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
	/// Thrown when trying to initialize a field element from an integer that is not reduced
	/// modulo the field characteristic.
	#[error("value is not in the field")]
	NotInField,
	#[error("the field has no multiplicative subgroup of order 2**{log_order}")]
	TwoAdicityExceeded { log_order: usize },
}
