// Copyright 2024 Irreducible Inc.

use digest::{core_api::BlockSizeUser, Digest, Output};
use fibra_field::Field;
use fibra_hash::PseudoCompressionFunction;
use getset::Getters;
use tracing::instrument;

use super::{
	binary_merkle_tree::{self, BinaryMerkleTree},
	errors::Error,
	merkle_tree_vcs::{Commitment, MerkleProof, MerkleTreeProver},
	scheme::BinaryMerkleTreeScheme,
};

#[derive(Debug, Getters)]
pub struct BinaryMerkleTreeProver<T, H, C> {
	#[getset(get = "pub")]
	scheme: BinaryMerkleTreeScheme<T, H, C>,
}

impl<T, C, H> BinaryMerkleTreeProver<T, H, C> {
	pub fn new(compression: C) -> Self {
		Self {
			scheme: BinaryMerkleTreeScheme::new(compression),
		}
	}
}

impl<F, H, C> MerkleTreeProver<F> for BinaryMerkleTreeProver<F, H, C>
where
	F: Field,
	H: Digest + BlockSizeUser,
	C: PseudoCompressionFunction<Output<H>, 2> + Sync,
{
	type Scheme = BinaryMerkleTreeScheme<F, H, C>;
	type Committed = BinaryMerkleTree<Output<H>>;

	fn scheme(&self) -> &Self::Scheme {
		&self.scheme
	}

	#[instrument(skip_all, level = "debug")]
	fn commit(&self, data: &[F]) -> Result<(Commitment<Output<H>>, Self::Committed), Error> {
		let tree = binary_merkle_tree::build::<_, H, _>(self.scheme.compression(), data)?;

		let commitment = Commitment { root: tree.root() };
		Ok((commitment, tree))
	}

	fn prove_opening(
		&self,
		committed: &Self::Committed,
		index: usize,
	) -> Result<MerkleProof<Output<H>>, Error> {
		let branch = committed.branch(index)?;
		Ok(MerkleProof {
			branch,
			index,
			n_leaves: 1 << committed.log_len,
		})
	}

	fn prove_coset_opening(
		&self,
		committed: &Self::Committed,
		coset_index: usize,
		log_coset_size: usize,
	) -> Result<Vec<Output<H>>, Error> {
		committed.coset_branch(coset_index, log_coset_size)
	}
}
