// Copyright 2024 Irreducible Inc.

use std::marker::PhantomData;

use digest::{core_api::BlockSizeUser, Digest, Output};
use fibra_field::Field;
use fibra_hash::PseudoCompressionFunction;
use fibra_utils::{bail, checked_arithmetics::log2_strict_usize};
use getset::Getters;

use super::{
	binary_merkle_tree::{fold_digests_vector_inplace, hash_leaf},
	errors::{Error, VerificationError},
	merkle_tree_vcs::{MerkleProof, MerkleTreeScheme},
};

#[derive(Debug, Getters)]
pub struct BinaryMerkleTreeScheme<T, H, C> {
	#[getset(get = "pub")]
	compression: C,
	// This makes it so that `BinaryMerkleTreeScheme` remains Send + Sync
	// See https://doc.rust-lang.org/nomicon/phantom-data.html#table-of-phantomdata-patterns
	_phantom: PhantomData<fn() -> (T, H)>,
}

impl<T, H, C> BinaryMerkleTreeScheme<T, H, C> {
	pub fn new(compression: C) -> Self {
		BinaryMerkleTreeScheme {
			compression,
			_phantom: PhantomData,
		}
	}
}

impl<T, H, C: Clone> Clone for BinaryMerkleTreeScheme<T, H, C> {
	fn clone(&self) -> Self {
		Self::new(self.compression.clone())
	}
}

impl<F, H, C> BinaryMerkleTreeScheme<F, H, C>
where
	F: Field,
	H: Digest + BlockSizeUser,
	C: PseudoCompressionFunction<Output<H>, 2> + Sync,
{
	/// Hashes a node up the tree along `branch`, using the bits of `index` to pick the side.
	fn fold_branch(&self, node: Output<H>, mut index: usize, branch: &[Output<H>]) -> Output<H> {
		branch.iter().fold(node, |node, sibling| {
			let next_node = if index & 1 == 0 {
				self.compression.compress([node, sibling.clone()])
			} else {
				self.compression.compress([sibling.clone(), node])
			};
			index >>= 1;
			next_node
		})
	}
}

impl<F, H, C> MerkleTreeScheme<F> for BinaryMerkleTreeScheme<F, H, C>
where
	F: Field,
	H: Digest + BlockSizeUser,
	C: PseudoCompressionFunction<Output<H>, 2> + Sync,
{
	type Digest = Output<H>;

	fn verify_vector(&self, root: &Self::Digest, data: &[F]) -> Result<(), Error> {
		let mut digests = data.iter().map(hash_leaf::<F, H>).collect::<Vec<_>>();

		fold_digests_vector_inplace(&self.compression, &mut digests)?;
		if digests[0] != *root {
			bail!(VerificationError::RootMismatch)
		}
		Ok(())
	}

	fn verify_opening(
		&self,
		root: &Self::Digest,
		value: &F,
		proof: &MerkleProof<Self::Digest>,
	) -> Result<(), Error> {
		if !proof.n_leaves.is_power_of_two() {
			bail!(VerificationError::IncorrectProofShape)
		}
		let tree_depth = log2_strict_usize(proof.n_leaves);

		if proof.branch.len() != tree_depth {
			bail!(VerificationError::IncorrectProofShape)
		}

		if proof.index >= proof.n_leaves {
			bail!(Error::IndexOutOfRange {
				index: proof.index,
				max: proof.n_leaves - 1,
			});
		}

		let leaf_digest = hash_leaf::<F, H>(value);
		if self.fold_branch(leaf_digest, proof.index, &proof.branch) == *root {
			Ok(())
		} else {
			bail!(VerificationError::RootMismatch)
		}
	}

	fn verify_coset_opening(
		&self,
		root: &Self::Digest,
		coset_index: usize,
		values: &[F],
		tree_depth: usize,
		branch: &[Self::Digest],
	) -> Result<(), Error> {
		if !values.len().is_power_of_two() {
			bail!(Error::PowerOfTwoLengthRequired { len: values.len() })
		}
		let log_coset_size = log2_strict_usize(values.len());

		if log_coset_size > tree_depth {
			bail!(Error::IncorrectLayerDepth {
				depth: log_coset_size,
				max_depth: tree_depth,
			})
		}

		if branch.len() != tree_depth - log_coset_size {
			bail!(VerificationError::IncorrectProofShape)
		}

		let n_cosets = 1 << (tree_depth - log_coset_size);
		if coset_index >= n_cosets {
			bail!(Error::IndexOutOfRange {
				index: coset_index,
				max: n_cosets - 1,
			});
		}

		let mut digests = values.iter().map(hash_leaf::<F, H>).collect::<Vec<_>>();
		fold_digests_vector_inplace(&self.compression, &mut digests)?;

		let subtree_root = digests.swap_remove(0);
		if self.fold_branch(subtree_root, coset_index, branch) == *root {
			Ok(())
		} else {
			bail!(VerificationError::RootMismatch)
		}
	}
}
