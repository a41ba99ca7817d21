// Copyright 2025 Irreducible Inc.

use std::iter::repeat_with;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use fibra_core::merkle_tree::{BinaryMerkleTreeProver, MerkleTreeProver};
use fibra_field::{Field, Goldilocks};
use fibra_hash::Sha256Compression;
use rand::thread_rng;
use sha2::Sha256;

const LOG_TREE_SIZE: usize = 20;

type F = Goldilocks;

fn bench_binary_merkle_tree(c: &mut Criterion) {
	let merkle_prover = BinaryMerkleTreeProver::<_, Sha256, _>::new(Sha256Compression::default());
	let mut rng = thread_rng();
	let data: Vec<F> = repeat_with(|| F::random(&mut rng))
		.take(1 << LOG_TREE_SIZE)
		.collect();
	let mut group = c.benchmark_group("slow/merkle_tree");
	group.throughput(Throughput::Bytes(((1 << LOG_TREE_SIZE) * F::BYTE_SIZE) as u64));
	group.sample_size(10);
	group.bench_function(format!("{} log tree size Goldilocks leaf", LOG_TREE_SIZE), |b| {
		b.iter(|| merkle_prover.commit(&data));
	});
	group.finish()
}

criterion_main!(binary_merkle_tree);
criterion_group!(binary_merkle_tree, bench_binary_merkle_tree);
