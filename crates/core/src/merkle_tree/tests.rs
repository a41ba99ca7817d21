// Copyright 2024 Irreducible Inc.

use std::iter::repeat_with;

use assert_matches::assert_matches;
use fibra_field::{Field, Goldilocks};
use fibra_hash::Sha256Compression;
use rand::{rngs::StdRng, SeedableRng};
use sha2::Sha256;

use super::{
	BinaryMerkleTreeProver, Error, MerkleProof, MerkleTreeProver, MerkleTreeScheme,
	VerificationError,
};

type TestProver = BinaryMerkleTreeProver<Goldilocks, Sha256, Sha256Compression>;

fn random_data(rng: &mut StdRng, len: usize) -> Vec<Goldilocks> {
	repeat_with(|| Goldilocks::random(&mut *rng))
		.take(len)
		.collect()
}

#[test]
fn test_binary_merkle_vcs_commit_prove_open_correctly() {
	let mut rng = StdRng::seed_from_u64(0);

	let mr_prover = TestProver::new(Sha256Compression::default());

	let data = random_data(&mut rng, 16);
	let (commitment, tree) = mr_prover.commit(&data).unwrap();

	assert_eq!(commitment.root, tree.root());
	assert_eq!(tree.log_len, 4);

	for (i, value) in data.iter().enumerate() {
		let proof = mr_prover.prove_opening(&tree, i).unwrap();
		assert_eq!(proof.index, i);
		assert_eq!(proof.n_leaves, 16);
		mr_prover
			.scheme()
			.verify_opening(&commitment.root, value, &proof)
			.unwrap();
	}
}

#[test]
fn test_binary_merkle_vcs_single_leaf() {
	let mut rng = StdRng::seed_from_u64(1);

	let mr_prover = TestProver::new(Sha256Compression::default());

	let data = random_data(&mut rng, 1);
	let (commitment, tree) = mr_prover.commit(&data).unwrap();
	assert_eq!(tree.log_len, 0);

	let proof = mr_prover.prove_opening(&tree, 0).unwrap();
	assert!(proof.branch.is_empty());
	mr_prover
		.scheme()
		.verify_opening(&commitment.root, &data[0], &proof)
		.unwrap();
}

#[test]
fn test_binary_merkle_vcs_coset_openings() {
	let mut rng = StdRng::seed_from_u64(0);

	let mr_prover = TestProver::new(Sha256Compression::default());

	let data = random_data(&mut rng, 32);
	let (commitment, tree) = mr_prover.commit(&data).unwrap();

	for log_coset_size in 0..=5 {
		for (coset_index, coset) in data.chunks(1 << log_coset_size).enumerate() {
			let branch = mr_prover
				.prove_coset_opening(&tree, coset_index, log_coset_size)
				.unwrap();
			assert_eq!(branch.len(), 5 - log_coset_size);
			mr_prover
				.scheme()
				.verify_coset_opening(&commitment.root, coset_index, coset, 5, &branch)
				.unwrap();
		}
	}
}

#[test]
fn test_binary_merkle_vcs_layers() {
	let mut rng = StdRng::seed_from_u64(0);

	let mr_prover = TestProver::new(Sha256Compression::default());

	let data = random_data(&mut rng, 8);
	let (commitment, tree) = mr_prover.commit(&data).unwrap();

	assert_eq!(tree.layer(0).unwrap(), &[commitment.root]);
	assert_eq!(tree.layer(3).unwrap().len(), 8);
	assert_matches!(tree.layer(4), Err(Error::IncorrectLayerDepth { .. }));
}

#[test]
fn test_binary_merkle_vcs_verify_vector() {
	let mut rng = StdRng::seed_from_u64(0);

	let mr_prover = TestProver::new(Sha256Compression::default());

	let mut data = random_data(&mut rng, 4);
	let (commitment, _) = mr_prover.commit(&data).unwrap();

	mr_prover
		.scheme()
		.verify_vector(&commitment.root, &data)
		.unwrap();

	data.swap(0, 1);
	assert_matches!(
		mr_prover.scheme().verify_vector(&commitment.root, &data),
		Err(Error::Verification(VerificationError::RootMismatch))
	);
}

#[test]
fn test_binary_merkle_vcs_rejects_tampered_openings() {
	let mut rng = StdRng::seed_from_u64(2);

	let mr_prover = TestProver::new(Sha256Compression::default());

	let data = random_data(&mut rng, 8);
	let (commitment, tree) = mr_prover.commit(&data).unwrap();
	let proof = mr_prover.prove_opening(&tree, 3).unwrap();

	// Wrong value
	assert_matches!(
		mr_prover
			.scheme()
			.verify_opening(&commitment.root, &(data[3] + Goldilocks::ONE), &proof),
		Err(Error::Verification(VerificationError::RootMismatch))
	);

	// Proof moved to another index
	let moved = MerkleProof {
		index: 2,
		..proof.clone()
	};
	assert_matches!(
		mr_prover
			.scheme()
			.verify_opening(&commitment.root, &data[3], &moved),
		Err(Error::Verification(VerificationError::RootMismatch))
	);

	// Truncated branch
	let truncated = MerkleProof {
		branch: proof.branch[..2].to_vec(),
		..proof.clone()
	};
	assert_matches!(
		mr_prover
			.scheme()
			.verify_opening(&commitment.root, &data[3], &truncated),
		Err(Error::Verification(VerificationError::IncorrectProofShape))
	);

	// Index past the end of the tree
	let out_of_range = MerkleProof { index: 8, ..proof };
	assert_matches!(
		mr_prover
			.scheme()
			.verify_opening(&commitment.root, &data[3], &out_of_range),
		Err(Error::IndexOutOfRange { max: 7, .. })
	);
}

#[test]
fn test_binary_merkle_vcs_rejects_non_power_of_two() {
	let mut rng = StdRng::seed_from_u64(0);

	let mr_prover = TestProver::new(Sha256Compression::default());

	let data = random_data(&mut rng, 6);
	assert_matches!(mr_prover.commit(&data), Err(Error::PowerOfTwoLengthRequired { .. }));
}
