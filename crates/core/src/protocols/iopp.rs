// Copyright 2024 Irreducible Inc.

use auto_impl::auto_impl;

/// An interactive oracle proof of proximity, made non-interactive with Fiat-Shamir.
///
/// The prover commits to the evaluations of a polynomial over a domain, proves that the
/// committed word is close to a low-degree codeword, and opens it at individual positions.
#[auto_impl(&, Box, Arc)]
pub trait IOPPScheme<F> {
	/// Proof that the committed codeword is close to the code.
	type Proof;
	/// Proof of the committed value at one position of the first domain.
	type OpeningProof;
	type Error: std::error::Error + Send + Sync + 'static;

	/// Commits to the evaluations of `poly`, given by its coefficients, and proves their
	/// proximity to the code.
	fn build_proof_of_proximity(&self, poly: &[F]) -> Result<Self::Proof, Self::Error>;

	/// Opens the evaluation of `poly` at the `position`-th point of the first domain, against the
	/// commitment in the proof built from the same polynomial.
	fn open(&self, poly: &[F], position: usize) -> Result<Self::OpeningProof, Self::Error>;

	/// Verifies an opening at `position` against the first commitment of `proof`.
	fn verify_opening(
		&self,
		position: usize,
		opening: &Self::OpeningProof,
		proof: &Self::Proof,
	) -> Result<(), Self::Error>;

	fn verify_proof_of_proximity(&self, proof: &Self::Proof) -> Result<(), Self::Error>;
}
