// Copyright 2024-2025 Irreducible Inc.

use bytes::{Buf, BufMut};
use fibra_field::{Field, PrimeField, TwoAdicField};
use fibra_ntt::EvaluationDomain;
use fibra_utils::{
	bail, checked_arithmetics::log2_ceil_usize, DeserializeBytes, SerializationError,
	SerializeBytes,
};
use getset::{CopyGetters, Getters};
use rayon::prelude::*;
use tracing::debug;

use super::{
	error::Error,
	fiber::{next_position, to_canonical},
};
use crate::merkle_tree::MerkleProof;

/// The binary logarithm of the default inverse code rate.
pub const DEFAULT_LOG_INV_RATE: usize = 3;

/// The default target security level in bits.
pub const DEFAULT_SECURITY_BITS: usize = 96;

/// Parameters for a radix-2 FRI proximity protocol.
///
/// The parameters fix the chain of evaluation domains the codeword is folded through. Domain `i`
/// has size `2^(log_len - i)` and its generator is the square of the generator of domain `i - 1`.
/// The last domain holds the terminal codeword, which the prover sends in the clear.
#[derive(Debug, Clone, Getters, CopyGetters)]
pub struct FRIParams<F> {
	/// The binary logarithm of the message length.
	#[getset(get_copy = "pub")]
	log_msg_len: usize,
	/// The binary logarithm of the inverse code rate.
	#[getset(get_copy = "pub")]
	log_inv_rate: usize,
	#[getset(get_copy = "pub")]
	security_bits: usize,
	/// The number oracle consistency queries required during the query phase.
	#[getset(get_copy = "pub")]
	n_test_queries: usize,
	/// The binary logarithm of the terminal codeword length.
	#[getset(get_copy = "pub")]
	log_terminal_len: usize,
	/// The evaluation domains of the round codewords, largest first.
	#[getset(get = "pub")]
	domains: Vec<EvaluationDomain<F>>,
}

impl<F: TwoAdicField> FRIParams<F> {
	pub fn new(
		log_msg_len: usize,
		log_inv_rate: usize,
		security_bits: usize,
	) -> Result<Self, Error> {
		let n_test_queries = calculate_n_test_queries(security_bits, log_inv_rate)?;

		let log_len = log_msg_len + log_inv_rate;
		let log_terminal_len = log_inv_rate
			.max(log2_ceil_usize(n_test_queries))
			.min(log_len);

		let mut domains = Vec::with_capacity(log_len - log_terminal_len + 1);
		let mut domain = EvaluationDomain::new(log_len)?;
		while domain.log_size() > log_terminal_len {
			let next = domain.squared()?;
			domains.push(domain);
			domain = next;
		}
		domains.push(domain);

		debug!(
			log_msg_len,
			log_inv_rate,
			security_bits,
			n_test_queries,
			n_rounds = domains.len(),
			"chose FRI parameters"
		);

		Ok(Self {
			log_msg_len,
			log_inv_rate,
			security_bits,
			n_test_queries,
			log_terminal_len,
			domains,
		})
	}

	/// Parameters for a message of length `2^log_msg_len` with the default rate and security.
	pub fn with_defaults(log_msg_len: usize) -> Result<Self, Error> {
		Self::new(log_msg_len, DEFAULT_LOG_INV_RATE, DEFAULT_SECURITY_BITS)
	}
}

impl<F> FRIParams<F> {
	/// The message length, i.e. the number of polynomial coefficients.
	pub fn msg_len(&self) -> usize {
		1 << self.log_msg_len
	}

	/// The binary logarithm of the length of the initial codeword.
	pub fn log_len(&self) -> usize {
		self.log_msg_len + self.log_inv_rate
	}

	/// Number of codewords in the domain chain, including the terminal one.
	pub fn n_rounds(&self) -> usize {
		self.domains.len()
	}

	/// Number of fold rounds, one fewer than the number of codewords.
	pub fn n_fold_rounds(&self) -> usize {
		self.domains.len() - 1
	}

	/// Number of coefficients the terminal codeword may have when interpolated.
	pub fn terminal_degree_bound(&self) -> usize {
		1 << (self.log_msg_len - self.n_fold_rounds())
	}

	/// Challenge labels of the Fiat-Shamir schedule, in the order they are computed.
	pub fn transcript_labels(&self) -> Vec<String> {
		(0..self.n_fold_rounds())
			.map(fold_challenge_label)
			.chain((0..self.n_test_queries).map(query_challenge_label))
			.collect()
	}
}

/// Transcript label of the folding challenge for round `round`.
pub fn fold_challenge_label(round: usize) -> String {
	format!("x{round}")
}

/// Transcript label of the `index`-th query challenge.
pub fn query_challenge_label(index: usize) -> String {
	format!("q{index}")
}

/// Calculates the number of test queries required to achieve a target security level.
///
/// Each query passes against a far codeword with probability at most the code rate, so `q`
/// queries with `q * log_inv_rate >= security_bits` suffice.
///
/// Throws [`Error::ParameterError`] if the security level is unattainable given the code rate.
pub fn calculate_n_test_queries(security_bits: usize, log_inv_rate: usize) -> Result<usize, Error> {
	if security_bits == 0 {
		bail!(Error::InvalidArgs("security_bits must be positive".to_string()));
	}
	if log_inv_rate == 0 {
		bail!(Error::ParameterError);
	}
	Ok(security_bits.div_ceil(log_inv_rate))
}

/// Folds the two members of a fiber with a challenge.
///
/// `lo` and `hi` are the evaluations at `x` and `-x`.
#[inline]
pub fn fold_pair<F: Field>(challenge: F, x_inv: F, lo: F, hi: F) -> F {
	((lo + hi) + challenge * (lo - hi) * x_inv).halve()
}

/// Folds a fiber-sorted codeword over `domain`, returning the canonical codeword over the
/// squared domain.
pub fn fold_codeword<F: TwoAdicField>(
	domain: &EvaluationDomain<F>,
	codeword: &[F],
	challenge: F,
) -> Vec<F> {
	debug_assert_eq!(codeword.len(), domain.size());

	let x_invs = std::iter::successors(Some(F::ONE), |&x| Some(x * domain.generator_inv()))
		.take(codeword.len() / 2)
		.collect::<Vec<_>>();

	codeword
		.par_chunks_exact(2)
		.zip(x_invs.par_iter())
		.map(|(pair, &x_inv)| fold_pair(challenge, x_inv, pair[0], pair[1]))
		.collect()
}

/// Threads a query starting at sorted index `start` of the first codeword through every round.
///
/// Entry `i` of the result is the sorted index visited in the codeword of round `i`.
pub fn query_trajectory<F>(params: &FRIParams<F>, start: usize) -> Vec<usize> {
	let mut positions = Vec::with_capacity(params.n_rounds());
	let mut position = start;
	positions.push(position);
	for domain in &params.domains()[..params.n_fold_rounds()] {
		position = next_position(position, 1 << domain.log_size());
		positions.push(position);
	}
	positions
}

/// Maps a query challenge to the sorted index it starts at in the first codeword.
pub fn query_start<F: PrimeField>(params: &FRIParams<F>, challenge: F) -> usize {
	let n = 1u64 << params.log_len();
	(challenge.as_canonical_u64() % n) as usize
}

/// Maps a query challenge to its trajectory through the domain chain.
pub fn derive_query_positions<F: PrimeField>(params: &FRIParams<F>, challenge: F) -> Vec<usize> {
	query_trajectory(params, query_start(params, challenge))
}

/// Value at sorted index `position` of a codeword stored in canonical order.
pub(super) fn canonical_value<F: Copy>(codeword: &[F], position: usize) -> F {
	codeword[to_canonical(position, codeword.len()).0]
}

/// The type of the termination round codeword in the FRI protocol.
pub type TerminateCodeword<F> = Vec<F>;

/// The values and vector commitment opening proofs for a fiber in one round of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRoundProof<F, D> {
	/// Values of the fiber members, in sorted order.
	pub values: [F; 2],
	/// Merkle path above the pair.
	pub branch: Vec<D>,
}

/// A proof for a single FRI consistency query, one entry per fold round.
pub type QueryProof<F, D> = Vec<QueryRoundProof<F, D>>;

/// A proof of proximity to the code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FRIProof<F, D> {
	/// Roots of the round codewords, one per domain.
	pub round_commitments: Vec<D>,
	/// The terminal codeword in canonical order.
	pub terminate_codeword: TerminateCodeword<F>,
	pub query_proofs: Vec<QueryProof<F, D>>,
}

/// Evaluation of the committed polynomial at one point of the first domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpeningProof<F, D> {
	pub value: F,
	pub merkle_proof: MerkleProof<D>,
}

impl<F: SerializeBytes, D: SerializeBytes> SerializeBytes for QueryRoundProof<F, D> {
	fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), SerializationError> {
		self.values.serialize(&mut write_buf)?;
		self.branch.serialize(&mut write_buf)
	}
}

impl<F: DeserializeBytes + Copy + Default, D: DeserializeBytes> DeserializeBytes
	for QueryRoundProof<F, D>
{
	fn deserialize(mut read_buf: impl Buf) -> Result<Self, SerializationError> {
		Ok(Self {
			values: <[F; 2]>::deserialize(&mut read_buf)?,
			branch: Vec::deserialize(&mut read_buf)?,
		})
	}
}

impl<F: SerializeBytes, D: SerializeBytes> SerializeBytes for FRIProof<F, D> {
	fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), SerializationError> {
		self.round_commitments.serialize(&mut write_buf)?;
		self.terminate_codeword.serialize(&mut write_buf)?;
		self.query_proofs.serialize(&mut write_buf)
	}
}

impl<F: DeserializeBytes + Copy + Default, D: DeserializeBytes> DeserializeBytes
	for FRIProof<F, D>
{
	fn deserialize(mut read_buf: impl Buf) -> Result<Self, SerializationError> {
		Ok(Self {
			round_commitments: Vec::deserialize(&mut read_buf)?,
			terminate_codeword: Vec::deserialize(&mut read_buf)?,
			query_proofs: Vec::deserialize(&mut read_buf)?,
		})
	}
}

impl<F: SerializeBytes, D: SerializeBytes> SerializeBytes for OpeningProof<F, D> {
	fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), SerializationError> {
		self.value.serialize(&mut write_buf)?;
		self.merkle_proof.serialize(&mut write_buf)
	}
}

impl<F: DeserializeBytes, D: DeserializeBytes> DeserializeBytes for OpeningProof<F, D> {
	fn deserialize(mut read_buf: impl Buf) -> Result<Self, SerializationError> {
		Ok(Self {
			value: F::deserialize(&mut read_buf)?,
			merkle_proof: MerkleProof::deserialize(&mut read_buf)?,
		})
	}
}
