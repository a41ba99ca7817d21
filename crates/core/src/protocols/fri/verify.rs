// Copyright 2024-2025 Irreducible Inc.

use fibra_field::TwoAdicField;
use fibra_utils::bail;
use itertools::izip;
use tracing::instrument;

use super::{
	common::{canonical_value, fold_pair, query_trajectory, FRIParams, QueryProof},
	error::{Error, VerificationError},
	fiber::to_fiber_sorted,
};
use crate::merkle_tree::MerkleTreeScheme;

/// A verifier for the FRI query phase.
///
/// The verifier is instantiated after the folding rounds and is used to test consistency of the
/// round messages and the original purported codeword.
#[derive(Debug)]
pub struct FRIVerifier<'a, F, VCS>
where
	F: TwoAdicField,
	VCS: MerkleTreeScheme<F>,
{
	params: &'a FRIParams<F>,
	scheme: &'a VCS,
	/// Received commitments to the round codewords, one per domain.
	round_commitments: &'a [VCS::Digest],
	/// The folding challenges for each round.
	fold_challenges: &'a [F],
	/// The terminal codeword, in canonical order.
	terminate_codeword: &'a [F],
}

impl<'a, F, VCS> FRIVerifier<'a, F, VCS>
where
	F: TwoAdicField,
	VCS: MerkleTreeScheme<F>,
{
	pub fn new(
		params: &'a FRIParams<F>,
		scheme: &'a VCS,
		round_commitments: &'a [VCS::Digest],
		challenges: &'a [F],
		terminate_codeword: &'a [F],
	) -> Result<Self, Error> {
		if round_commitments.len() != params.n_rounds() {
			bail!(VerificationError::IncorrectRoundCount {
				expected: params.n_rounds(),
			});
		}

		if challenges.len() != params.n_fold_rounds() {
			bail!(Error::InvalidArgs(format!(
				"got {} folding challenges, expected {}",
				challenges.len(),
				params.n_fold_rounds(),
			)));
		}

		if terminate_codeword.len() != 1 << params.log_terminal_len() {
			bail!(VerificationError::IncorrectTerminalLength {
				expected: 1 << params.log_terminal_len(),
			});
		}

		Ok(Self {
			params,
			scheme,
			round_commitments,
			fold_challenges: challenges,
			terminate_codeword,
		})
	}

	/// Number of fold rounds.
	pub fn n_rounds(&self) -> usize {
		self.params.n_fold_rounds()
	}

	/// Verifies that the last oracle sent is a codeword.
	///
	/// The terminal codeword must match the last round commitment and interpolate to a polynomial
	/// of degree less than [`FRIParams::terminal_degree_bound`].
	#[instrument(skip_all, name = "fri::FRIVerifier::verify_last_oracle", level = "debug")]
	pub fn verify_last_oracle(&self) -> Result<(), Error> {
		let last_round = self.params.n_rounds() - 1;
		let sorted = to_fiber_sorted(self.terminate_codeword);
		self.scheme
			.verify_vector(&self.round_commitments[last_round], &sorted)
			.map_err(|source| VerificationError::InvalidMerklePath {
				round: last_round,
				source,
			})?;

		let domain = &self.params.domains()[last_round];
		let coeffs = domain.interpolate(self.terminate_codeword)?;
		if coeffs[self.params.terminal_degree_bound()..]
			.iter()
			.any(|coeff| !coeff.is_zero())
		{
			bail!(VerificationError::IncorrectDegree);
		}

		Ok(())
	}

	/// Verifies a FRI challenge query.
	///
	/// A FRI challenge query tests for consistency between all consecutive oracles sent by the
	/// prover. The verifier has full access to the last oracle sent, and this is probabilistically
	/// verified to be a codeword by `Self::verify_last_oracle`.
	///
	/// ## Arguments
	///
	/// * `start` - a fiber-sorted index into the first codeword
	/// * `proof` - a query proof
	#[instrument(skip_all, name = "fri::FRIVerifier::verify_query", level = "debug")]
	pub fn verify_query(
		&self,
		start: usize,
		proof: &QueryProof<F, VCS::Digest>,
	) -> Result<(), Error> {
		if proof.len() != self.n_rounds() {
			bail!(VerificationError::IncorrectQueryProofLength {
				expected: self.n_rounds(),
			});
		}

		if start >= 1 << self.params.log_len() {
			bail!(VerificationError::PositionOutOfRange {
				position: start,
				max: (1 << self.params.log_len()) - 1,
			});
		}

		let positions = query_trajectory(self.params, start);

		let mut expected = None;
		for (query_round, (round_proof, &position, commitment)) in
			izip!(proof, &positions, self.round_commitments).enumerate()
		{
			let domain = &self.params.domains()[query_round];
			let coset_index = position / 2;

			self.scheme
				.verify_coset_opening(
					commitment,
					coset_index,
					&round_proof.values,
					domain.log_size(),
					&round_proof.branch,
				)
				.map_err(|source| VerificationError::InvalidMerklePath {
					round: query_round,
					source,
				})?;

			if let Some(expected) = expected {
				if round_proof.values[position % 2] != expected {
					bail!(VerificationError::IncorrectFold {
						query_round,
						index: position,
					});
				}
			}

			let [lo, hi] = round_proof.values;
			expected = Some(fold_pair(
				self.fold_challenges[query_round],
				domain.element_inv(coset_index),
				lo,
				hi,
			));
		}

		if let Some(expected) = expected {
			let terminal_position = positions[self.n_rounds()];
			if canonical_value(self.terminate_codeword, terminal_position) != expected {
				bail!(VerificationError::IncorrectFold {
					query_round: self.n_rounds(),
					index: terminal_position,
				});
			}
		}

		Ok(())
	}
}
