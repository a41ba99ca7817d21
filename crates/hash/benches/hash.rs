// Copyright 2024-2025 Irreducible Inc.

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use digest::Digest;
use fibra_hash::{PseudoCompressionFunction, Sha256Compression};
use rand::{thread_rng, RngCore};
use sha2::Sha256;

fn bench_sha256(c: &mut Criterion) {
	let mut group = c.benchmark_group("SHA-256");

	let mut rng = thread_rng();

	const N: usize = 1 << 16;
	let mut data = vec![0u8; N];
	rng.fill_bytes(&mut data);
	group.throughput(Throughput::Bytes(N as u64));
	group.bench_function("Sha256", |bench| bench.iter(|| Sha256::digest(&data)));

	let compression = Sha256Compression::default();
	let left = Sha256::digest(b"left");
	let right = Sha256::digest(b"right");
	group.throughput(Throughput::Bytes(64));
	group.bench_function("Sha256Compression", |bench| {
		bench.iter(|| compression.compress([left, right]))
	});
	group.finish()
}

criterion_group!(hash, bench_sha256);
criterion_main!(hash);
