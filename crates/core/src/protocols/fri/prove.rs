// Copyright 2024-2025 Irreducible Inc.

use fibra_field::TwoAdicField;
use fibra_utils::bail;
use tracing::instrument;

use super::{
	common::{
		fold_codeword, query_trajectory, FRIParams, OpeningProof, QueryProof, QueryRoundProof,
		TerminateCodeword,
	},
	error::Error,
	fiber::{canonical_to_sorted, from_fiber_sorted, to_fiber_sorted},
	logging::{FRIFoldData, MerkleTreeDimensionData, RSEncodeDimensionData},
};
use crate::merkle_tree::{MerkleTreeProver, MerkleTreeScheme};

type Digest<F, MTProver> = <<MTProver as MerkleTreeProver<F>>::Scheme as MerkleTreeScheme<F>>::Digest;

#[derive(Debug)]
pub struct CommitOutput<F, D, Committed> {
	pub commitment: D,
	pub committed: Committed,
	/// The encoded message in fiber-sorted order.
	pub codeword: Vec<F>,
}

/// Encodes and commits the input message.
///
/// The message holds the coefficients of a polynomial of degree less than the message length. It
/// is evaluated over the first domain, reordered into fiber-sorted order, and committed.
#[instrument(skip_all, level = "debug")]
pub fn commit_message<F, MTProver>(
	params: &FRIParams<F>,
	merkle_prover: &MTProver,
	message: &[F],
) -> Result<CommitOutput<F, Digest<F, MTProver>, MTProver::Committed>, Error>
where
	F: TwoAdicField,
	MTProver: MerkleTreeProver<F>,
{
	if message.len() != params.msg_len() {
		bail!(Error::IncorrectMessageLength {
			expected: params.msg_len(),
			actual: message.len(),
		});
	}

	let domain = &params.domains()[0];

	let dimensions_data = RSEncodeDimensionData::new::<F>(params.log_len());
	let encode_span = tracing::debug_span!(
		"[task] RS Encode",
		phase = "commit",
		perfetto_category = "task.main",
		?dimensions_data,
	)
	.entered();
	let evals = domain.evaluate(message)?;
	drop(encode_span);

	let codeword = to_fiber_sorted(&evals);

	let dimensions_data = MerkleTreeDimensionData::new::<F>(params.log_len());
	let merkle_tree_span = tracing::debug_span!(
		"[task] Merkle Tree",
		phase = "commit",
		perfetto_category = "task.main",
		?dimensions_data,
	)
	.entered();
	let (commitment, committed) = merkle_prover.commit(&codeword)?;
	drop(merkle_tree_span);

	Ok(CommitOutput {
		commitment: commitment.root,
		committed,
		codeword,
	})
}

/// A stateful prover for the FRI fold phase.
pub struct FRIFolder<'a, F, MTProver>
where
	F: TwoAdicField,
	MTProver: MerkleTreeProver<F>,
{
	params: &'a FRIParams<F>,
	merkle_prover: &'a MTProver,
	codeword: &'a [F],
	codeword_committed: &'a MTProver::Committed,
	round_committed: Vec<(Vec<F>, MTProver::Committed)>,
	curr_round: usize,
}

impl<'a, F, MTProver> FRIFolder<'a, F, MTProver>
where
	F: TwoAdicField,
	MTProver: MerkleTreeProver<F>,
{
	/// Constructs a new folder over a fiber-sorted codeword committed by [`commit_message`].
	pub fn new(
		params: &'a FRIParams<F>,
		merkle_prover: &'a MTProver,
		codeword: &'a [F],
		committed: &'a MTProver::Committed,
	) -> Result<Self, Error> {
		if codeword.len() != 1 << params.log_len() {
			bail!(Error::InvalidArgs(format!(
				"codeword length {} does not match the first domain size {}",
				codeword.len(),
				1usize << params.log_len(),
			)));
		}

		Ok(Self {
			params,
			merkle_prover,
			codeword,
			codeword_committed: committed,
			round_committed: Vec::with_capacity(params.n_fold_rounds()),
			curr_round: 0,
		})
	}

	/// Number of fold rounds.
	pub fn n_rounds(&self) -> usize {
		self.params.n_fold_rounds()
	}

	/// Number of times `execute_fold_round` has been called.
	pub fn curr_round(&self) -> usize {
		self.curr_round
	}

	fn prev_codeword(&self) -> &[F] {
		self.round_committed
			.last()
			.map(|(codeword, _)| codeword.as_slice())
			.unwrap_or(self.codeword)
	}

	/// Executes the next fold round and returns the folded codeword commitment.
	pub fn execute_fold_round(&mut self, challenge: F) -> Result<Digest<F, MTProver>, Error> {
		if self.curr_round == self.n_rounds() {
			bail!(Error::TooManyFoldExecutions {
				max_folds: self.n_rounds(),
			});
		}

		let domain = &self.params.domains()[self.curr_round];
		let dimensions_data = FRIFoldData::new(self.curr_round, domain.log_size());
		let fri_fold_span = tracing::debug_span!(
			"[task] FRI Fold",
			phase = "piop_compiler",
			perfetto_category = "task.main",
			log_len = dimensions_data.log_len(),
			?dimensions_data,
		)
		.entered();
		let folded = fold_codeword(domain, self.prev_codeword(), challenge);
		let folded_codeword = to_fiber_sorted(&folded);
		drop(fri_fold_span);

		let dimensions_data = MerkleTreeDimensionData::new::<F>(domain.log_size() - 1);
		let merkle_tree_span = tracing::debug_span!(
			"[task] Merkle Tree",
			phase = "piop_compiler",
			perfetto_category = "task.main",
			?dimensions_data,
		)
		.entered();
		let (commitment, committed) = self.merkle_prover.commit(&folded_codeword)?;
		drop(merkle_tree_span);

		self.round_committed.push((folded_codeword, committed));
		self.curr_round += 1;
		Ok(commitment.root)
	}

	/// Finishes the FRI folding process.
	///
	/// This returns the terminal codeword in canonical order and a query prover instance.
	#[allow(clippy::type_complexity)]
	pub fn finish(
		self,
	) -> Result<(TerminateCodeword<F>, FRIQueryProver<'a, F, MTProver>), Error> {
		if self.curr_round != self.n_rounds() {
			bail!(Error::EarlyProverFinish);
		}

		let terminate_codeword = from_fiber_sorted(self.prev_codeword());

		let Self {
			params,
			merkle_prover,
			codeword,
			codeword_committed,
			round_committed,
			..
		} = self;

		let query_prover = FRIQueryProver {
			params,
			merkle_prover,
			codeword,
			codeword_committed,
			round_committed,
		};
		Ok((terminate_codeword, query_prover))
	}
}

/// A prover for the FRI query phase.
pub struct FRIQueryProver<'a, F, MTProver>
where
	F: TwoAdicField,
	MTProver: MerkleTreeProver<F>,
{
	params: &'a FRIParams<F>,
	merkle_prover: &'a MTProver,
	codeword: &'a [F],
	codeword_committed: &'a MTProver::Committed,
	round_committed: Vec<(Vec<F>, MTProver::Committed)>,
}

impl<F, MTProver> FRIQueryProver<'_, F, MTProver>
where
	F: TwoAdicField,
	MTProver: MerkleTreeProver<F>,
{
	/// Number of fold rounds.
	pub fn n_rounds(&self) -> usize {
		self.params.n_fold_rounds()
	}

	/// Proves a FRI challenge query.
	///
	/// ## Arguments
	///
	/// * `start` - a fiber-sorted index into the first codeword
	#[instrument(skip_all, name = "fri::FRIQueryProver::prove_query", level = "debug")]
	pub fn prove_query(&self, start: usize) -> Result<QueryProof<F, Digest<F, MTProver>>, Error> {
		if start >= self.codeword.len() {
			bail!(Error::InvalidArgs(format!(
				"query position {start} is out of range for codeword of length {}",
				self.codeword.len()
			)));
		}

		let positions = query_trajectory(self.params, start);

		let rounds = std::iter::once((self.codeword, self.codeword_committed)).chain(
			self.round_committed
				.iter()
				.map(|(codeword, committed)| (codeword.as_slice(), committed)),
		);

		rounds
			.zip(positions)
			.take(self.n_rounds())
			.map(|((codeword, committed), position)| {
				prove_coset_opening(self.merkle_prover, codeword, committed, position / 2)
			})
			.collect()
	}

	/// Opens the first codeword at the canonical index `position`.
	pub fn prove_opening(
		&self,
		position: usize,
	) -> Result<OpeningProof<F, Digest<F, MTProver>>, Error> {
		prove_opening(self.merkle_prover, self.codeword, self.codeword_committed, position)
	}
}

fn prove_coset_opening<F, MTProver>(
	merkle_prover: &MTProver,
	codeword: &[F],
	committed: &MTProver::Committed,
	coset_index: usize,
) -> Result<QueryRoundProof<F, Digest<F, MTProver>>, Error>
where
	F: TwoAdicField,
	MTProver: MerkleTreeProver<F>,
{
	let branch = merkle_prover.prove_coset_opening(committed, coset_index, 1)?;

	Ok(QueryRoundProof {
		values: [codeword[2 * coset_index], codeword[2 * coset_index + 1]],
		branch,
	})
}

/// Opens a fiber-sorted committed codeword at the canonical index `position`.
pub(super) fn prove_opening<F, MTProver>(
	merkle_prover: &MTProver,
	codeword: &[F],
	committed: &MTProver::Committed,
	position: usize,
) -> Result<OpeningProof<F, Digest<F, MTProver>>, Error>
where
	F: TwoAdicField,
	MTProver: MerkleTreeProver<F>,
{
	if position >= codeword.len() {
		bail!(Error::InvalidArgs(format!(
			"position {position} is out of range for codeword of length {}",
			codeword.len()
		)));
	}

	let index = canonical_to_sorted(position, codeword.len());
	let merkle_proof = merkle_prover.prove_opening(committed, index)?;
	Ok(OpeningProof {
		value: codeword[index],
		merkle_proof,
	})
}
