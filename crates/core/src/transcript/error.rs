// Copyright 2024-2025 Irreducible Inc.

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("challenge {label:?} was not declared in the transcript")]
	UnknownChallenge { label: String },
	#[error("challenge {label:?} is declared more than once")]
	DuplicateChallenge { label: String },
	#[error("challenge {label:?} has already been computed and cannot be bound to")]
	ChallengeAlreadyComputed { label: String },
	#[error("challenge {label:?} is computed before the challenge preceding it")]
	PreviousChallengeNotComputed { label: String },
	#[error("Serialization error: {0}")]
	Serialization(#[from] fibra_utils::SerializationError),
}
