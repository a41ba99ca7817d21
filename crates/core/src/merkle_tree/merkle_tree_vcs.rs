// Copyright 2024 Irreducible Inc.

use auto_impl::auto_impl;
use bytes::{Buf, BufMut};
use fibra_utils::{DeserializeBytes, SerializationError, SerializeBytes};

use super::errors::Error;

/// A Merkle tree commitment.
///
/// Leaves are plain SHA-256 digests while inner nodes use a domain-separated compression, so
/// the root alone binds the tree shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commitment<Digest> {
	/// The root digest of the Merkle tree.
	pub root: Digest,
}

/// An inclusion proof for a single leaf.
///
/// The proof names the leaf it opens and the number of leaves of the tree it was built against, so
/// that a verifier can reject a proof produced for a different position before hashing anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleProof<Digest> {
	/// Sibling digests from the leaf layer up to, but excluding, the root.
	pub branch: Vec<Digest>,
	/// Index of the opened leaf.
	pub index: usize,
	/// Number of leaves in the committed tree.
	pub n_leaves: usize,
}

impl<Digest: SerializeBytes> SerializeBytes for MerkleProof<Digest> {
	fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), SerializationError> {
		self.branch.serialize(&mut write_buf)?;
		self.index.serialize(&mut write_buf)?;
		self.n_leaves.serialize(&mut write_buf)
	}
}

impl<Digest: DeserializeBytes> DeserializeBytes for MerkleProof<Digest> {
	fn deserialize(mut read_buf: impl Buf) -> Result<Self, SerializationError> {
		Ok(Self {
			branch: Vec::deserialize(&mut read_buf)?,
			index: usize::deserialize(&mut read_buf)?,
			n_leaves: usize::deserialize(&mut read_buf)?,
		})
	}
}

/// A Merkle tree scheme.
#[auto_impl(&)]
pub trait MerkleTreeScheme<T> {
	type Digest: Clone + PartialEq + Eq + std::fmt::Debug + Send + Sync;

	/// Verify the opening of the full vector.
	fn verify_vector(&self, root: &Self::Digest, data: &[T]) -> Result<(), Error>;

	/// Verify an opening proof for an entry in a committed vector.
	///
	/// The index and tree size are read from the proof; callers that expect a particular index
	/// must compare it against `proof.index` themselves.
	fn verify_opening(
		&self,
		root: &Self::Digest,
		value: &T,
		proof: &MerkleProof<Self::Digest>,
	) -> Result<(), Error>;

	/// Verify the opening of `2^log_coset_size` adjacent entries starting at
	/// `coset_index << log_coset_size`.
	///
	/// `branch` holds the sibling digests above the coset's subtree, so its length must be
	/// `tree_depth - log_coset_size`.
	fn verify_coset_opening(
		&self,
		root: &Self::Digest,
		coset_index: usize,
		values: &[T],
		tree_depth: usize,
		branch: &[Self::Digest],
	) -> Result<(), Error>;
}

/// A Merkle tree prover for a particular scheme.
///
/// This is separate from [`MerkleTreeScheme`] so that it may be implemented using a
/// hardware-accelerated backend.
pub trait MerkleTreeProver<T> {
	type Scheme: MerkleTreeScheme<T>;
	/// Data generated during commitment required to generate opening proofs.
	type Committed;

	/// Returns the Merkle tree scheme used by the prover.
	fn scheme(&self) -> &Self::Scheme;

	/// Commit a vector of values.
	#[allow(clippy::type_complexity)]
	fn commit(
		&self,
		data: &[T],
	) -> Result<(Commitment<<Self::Scheme as MerkleTreeScheme<T>>::Digest>, Self::Committed), Error>;

	/// Generate an opening proof for an entry in a committed vector at the given index.
	fn prove_opening(
		&self,
		committed: &Self::Committed,
		index: usize,
	) -> Result<MerkleProof<<Self::Scheme as MerkleTreeScheme<T>>::Digest>, Error>;

	/// Generate the branch above a coset of `2^log_coset_size` adjacent entries.
	fn prove_coset_opening(
		&self,
		committed: &Self::Committed,
		coset_index: usize,
		log_coset_size: usize,
	) -> Result<Vec<<Self::Scheme as MerkleTreeScheme<T>>::Digest>, Error>;
}
