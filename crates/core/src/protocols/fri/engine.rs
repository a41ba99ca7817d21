// Copyright 2024-2025 Irreducible Inc.

use digest::{core_api::BlockSizeUser, Digest, Output};
use fibra_field::{PrimeField, TwoAdicField};
use fibra_hash::{PseudoCompressionFunction, Sha256Compression};
use fibra_ntt::evaluate_horner;
use fibra_utils::{bail, checked_arithmetics::log2_strict_usize};
use getset::Getters;
use rayon::prelude::*;
use sha2::Sha256;
use tracing::instrument;

use super::{
	common::{
		fold_challenge_label, query_challenge_label, query_start, FRIParams, FRIProof,
		OpeningProof,
	},
	error::{Error, VerificationError},
	fiber::canonical_to_sorted,
	prove::{commit_message, CommitOutput, FRIFolder},
	verify::FRIVerifier,
};
use crate::{
	merkle_tree::{BinaryMerkleTreeProver, MerkleTreeProver, MerkleTreeScheme},
	protocols::iopp::IOPPScheme,
	transcript::Transcript,
};

/// FRI with radix-2 folding, committing every round with a binary Merkle tree.
///
/// The instance holds the domain chain and the Merkle prover and is immutable after
/// construction, so one instance can serve any number of concurrent prove and verify calls.
#[derive(Debug, Getters)]
pub struct RadixTwoFRI<F, H, C> {
	#[getset(get = "pub")]
	params: FRIParams<F>,
	#[getset(get = "pub")]
	merkle_prover: BinaryMerkleTreeProver<F, H, C>,
}

/// Radix-2 FRI hashing with SHA-256.
pub type Sha256RadixTwoFRI<F> = RadixTwoFRI<F, Sha256, Sha256Compression>;

impl<F, H, C> RadixTwoFRI<F, H, C>
where
	F: TwoAdicField + PrimeField,
	H: Digest + BlockSizeUser,
	C: PseudoCompressionFunction<Output<H>, 2> + Sync,
{
	/// Creates an instance for polynomials with `size` coefficients, using the default code rate
	/// and security level.
	pub fn new(size: usize, compression: C) -> Result<Self, Error> {
		if !size.is_power_of_two() {
			bail!(Error::InvalidArgs(format!("polynomial size {size} must be a power of two")));
		}
		let params = FRIParams::with_defaults(log2_strict_usize(size))?;
		Ok(Self::with_params(params, compression))
	}

	pub fn with_params(params: FRIParams<F>, compression: C) -> Self {
		Self {
			params,
			merkle_prover: BinaryMerkleTreeProver::new(compression),
		}
	}

	/// Binds the final commitment and the terminal codeword, then samples the query start
	/// positions.
	///
	/// Returns no positions when there are no fold rounds, since the terminal codeword is then
	/// the whole committed codeword.
	fn sample_query_starts(
		&self,
		transcript: &mut Transcript<H>,
		round_commitments: &[Output<H>],
		terminate_codeword: &[F],
	) -> Result<Vec<usize>, Error> {
		let label = query_challenge_label(0);
		if let Some(last_commitment) = round_commitments.last() {
			transcript.bind_serialized(&label, last_commitment)?;
		}
		transcript.bind_serialized(&label, terminate_codeword)?;

		if self.params.n_fold_rounds() == 0 {
			return Ok(Vec::new());
		}

		(0..self.params.n_test_queries())
			.map(|index| {
				let challenge = transcript.sample_field(&query_challenge_label(index))?;
				Ok(query_start(&self.params, challenge))
			})
			.collect()
	}
}

impl<F, H, C> IOPPScheme<F> for RadixTwoFRI<F, H, C>
where
	F: TwoAdicField + PrimeField,
	H: Digest + BlockSizeUser,
	C: PseudoCompressionFunction<Output<H>, 2> + Sync,
{
	type Proof = FRIProof<F, Output<H>>;
	type OpeningProof = OpeningProof<F, Output<H>>;
	type Error = Error;

	#[instrument(skip_all, name = "fri::RadixTwoFRI::build_proof_of_proximity", level = "debug")]
	fn build_proof_of_proximity(&self, poly: &[F]) -> Result<Self::Proof, Error> {
		let params = &self.params;
		let CommitOutput {
			commitment,
			committed,
			codeword,
		} = commit_message(params, &self.merkle_prover, poly)?;

		let mut transcript = Transcript::<H>::new(params.transcript_labels())?;
		let mut round_commitments = Vec::with_capacity(params.n_rounds());
		round_commitments.push(commitment);

		let mut folder = FRIFolder::new(params, &self.merkle_prover, &codeword, &committed)?;
		for round in 0..params.n_fold_rounds() {
			let label = fold_challenge_label(round);
			transcript.bind_serialized(&label, &round_commitments[round])?;
			let challenge = transcript.sample_field(&label)?;
			round_commitments.push(folder.execute_fold_round(challenge)?);
		}

		let (terminate_codeword, query_prover) = folder.finish()?;

		let starts =
			self.sample_query_starts(&mut transcript, &round_commitments, &terminate_codeword)?;
		let query_proofs = starts
			.into_par_iter()
			.map(|start| query_prover.prove_query(start))
			.collect::<Result<Vec<_>, _>>()?;

		Ok(FRIProof {
			round_commitments,
			terminate_codeword,
			query_proofs,
		})
	}

	#[instrument(skip_all, name = "fri::RadixTwoFRI::open", level = "debug")]
	fn open(&self, poly: &[F], position: usize) -> Result<Self::OpeningProof, Error> {
		let domain = &self.params.domains()[0];
		if position >= domain.size() {
			bail!(Error::InvalidArgs(format!(
				"position {position} is out of range for domain of size {}",
				domain.size()
			)));
		}

		let CommitOutput { committed, .. } = commit_message(&self.params, &self.merkle_prover, poly)?;

		let value = evaluate_horner(poly, domain.element(position));
		let merkle_proof = self
			.merkle_prover
			.prove_opening(&committed, canonical_to_sorted(position, domain.size()))?;

		Ok(OpeningProof {
			value,
			merkle_proof,
		})
	}

	fn verify_opening(
		&self,
		position: usize,
		opening: &Self::OpeningProof,
		proof: &Self::Proof,
	) -> Result<(), Error> {
		let root = proof
			.round_commitments
			.first()
			.ok_or(VerificationError::IncorrectRoundCount {
				expected: self.params.n_rounds(),
			})?;

		let n = self.params.domains()[0].size();
		if position >= n {
			bail!(VerificationError::PositionOutOfRange {
				position,
				max: n - 1,
			});
		}

		let merkle_proof = &opening.merkle_proof;
		if merkle_proof.n_leaves != n {
			bail!(VerificationError::IncorrectLeafCount {
				expected: n,
				actual: merkle_proof.n_leaves,
			});
		}

		let expected_index = canonical_to_sorted(position, n);
		if merkle_proof.index != expected_index {
			bail!(VerificationError::LeafIndexMismatch {
				expected: expected_index,
				actual: merkle_proof.index,
			});
		}

		self.merkle_prover
			.scheme()
			.verify_opening(root, &opening.value, merkle_proof)
			.map_err(|source| VerificationError::InvalidMerklePath { round: 0, source })?;

		Ok(())
	}

	#[instrument(skip_all, name = "fri::RadixTwoFRI::verify_proof_of_proximity", level = "debug")]
	fn verify_proof_of_proximity(&self, proof: &Self::Proof) -> Result<(), Error> {
		let params = &self.params;
		if proof.round_commitments.len() != params.n_rounds() {
			bail!(VerificationError::IncorrectRoundCount {
				expected: params.n_rounds(),
			});
		}

		let mut transcript = Transcript::<H>::new(params.transcript_labels())?;
		let mut challenges = Vec::with_capacity(params.n_fold_rounds());
		for round in 0..params.n_fold_rounds() {
			let label = fold_challenge_label(round);
			transcript.bind_serialized(&label, &proof.round_commitments[round])?;
			challenges.push(transcript.sample_field(&label)?);
		}

		let verifier = FRIVerifier::new(
			params,
			self.merkle_prover.scheme(),
			&proof.round_commitments,
			&challenges,
			&proof.terminate_codeword,
		)?;
		verifier.verify_last_oracle()?;

		let starts = self.sample_query_starts(
			&mut transcript,
			&proof.round_commitments,
			&proof.terminate_codeword,
		)?;
		if proof.query_proofs.len() != starts.len() {
			bail!(VerificationError::IncorrectQueryCount {
				expected: starts.len(),
			});
		}

		starts
			.par_iter()
			.zip(proof.query_proofs.par_iter())
			.try_for_each(|(&start, query_proof)| verifier.verify_query(start, query_proof))
	}
}
