// Copyright 2024-2025 Irreducible Inc.

use std::fmt::Debug;

use digest::{core_api::BlockSizeUser, Digest, Output};
use fibra_field::Field;
use fibra_hash::PseudoCompressionFunction;
use fibra_utils::{bail, checked_arithmetics::log2_strict_usize, SerializeBytes};
use rayon::prelude::*;
use tracing::instrument;

use super::errors::Error;

/// A binary Merkle tree that commits a vector of field elements, one element per leaf.
///
/// Each leaf digest is the hash of the canonical encoding of its element. The implementation
/// requires that the vector length is a power of two.
#[derive(Debug, Clone)]
pub struct BinaryMerkleTree<D> {
	/// Base-2 logarithm of the number of leaves
	pub log_len: usize,
	/// The inner nodes, arranged as a flattened array of layers with the root at the end
	pub inner_nodes: Vec<D>,
}

#[instrument("BinaryMerkleTree::build", skip_all, level = "debug")]
pub fn build<F, H, C>(compression: &C, elements: &[F]) -> Result<BinaryMerkleTree<Output<H>>, Error>
where
	F: Field,
	H: Digest + BlockSizeUser,
	C: PseudoCompressionFunction<Output<H>, 2> + Sync,
{
	if !elements.len().is_power_of_two() {
		bail!(Error::PowerOfTwoLengthRequired {
			len: elements.len(),
		});
	}

	let log_len = log2_strict_usize(elements.len());
	let total_length = (1 << (log_len + 1)) - 1;

	let mut inner_nodes = Vec::with_capacity(total_length);
	inner_nodes.par_extend(elements.par_iter().map(hash_leaf::<F, H>));

	let mut layer_start = 0;
	for i in 0..log_len {
		let layer_len = 1 << (log_len - i);
		let next_layer =
			compress_layer(compression, &inner_nodes[layer_start..layer_start + layer_len]);
		layer_start += layer_len;
		inner_nodes.extend(next_layer);
	}

	debug_assert_eq!(inner_nodes.len(), total_length);
	Ok(BinaryMerkleTree {
		log_len,
		inner_nodes,
	})
}

impl<D: Clone> BinaryMerkleTree<D> {
	pub fn root(&self) -> D {
		self.inner_nodes
			.last()
			.expect("MerkleTree inner nodes can't be empty")
			.clone()
	}

	/// Returns the layer of `2^layer_depth` digests, where depth 0 is the root.
	pub fn layer(&self, layer_depth: usize) -> Result<&[D], Error> {
		if layer_depth > self.log_len {
			bail!(Error::IncorrectLayerDepth {
				depth: layer_depth,
				max_depth: self.log_len,
			});
		}
		let range_start = self.inner_nodes.len() + 1 - (1 << (layer_depth + 1));

		Ok(&self.inner_nodes[range_start..range_start + (1 << layer_depth)])
	}

	/// Get a Merkle branch for the given leaf index
	///
	/// Throws if the index is out of range
	pub fn branch(&self, index: usize) -> Result<Vec<D>, Error> {
		self.coset_branch(index, 0)
	}

	/// Get the Merkle branch above the subtree holding leaves
	/// `coset_index << log_coset_size .. (coset_index + 1) << log_coset_size`.
	pub fn coset_branch(&self, coset_index: usize, log_coset_size: usize) -> Result<Vec<D>, Error> {
		if log_coset_size > self.log_len {
			bail!(Error::IncorrectLayerDepth {
				depth: log_coset_size,
				max_depth: self.log_len,
			});
		}
		if coset_index >= 1 << (self.log_len - log_coset_size) {
			bail!(Error::IndexOutOfRange {
				index: coset_index,
				max: (1 << (self.log_len - log_coset_size)) - 1,
			});
		}

		let index = coset_index << log_coset_size;
		let branch = (log_coset_size..self.log_len)
			.map(|j| {
				let layer_offset = ((1 << j) - 1) << (self.log_len + 1 - j);
				self.inner_nodes[layer_offset | ((index >> j) ^ 1)].clone()
			})
			.collect();

		Ok(branch)
	}
}

#[tracing::instrument("MerkleTree::compress_layer", skip_all, level = "debug")]
fn compress_layer<D, C>(compression: &C, prev_layer: &[D]) -> Vec<D>
where
	D: Clone + Send + Sync,
	C: PseudoCompressionFunction<D, 2> + Sync,
{
	prev_layer
		.par_chunks_exact(2)
		.map(|pair| compression.compress([pair[0].clone(), pair[1].clone()]))
		.collect()
}

/// Hashes the canonical encoding of one element into a leaf digest.
pub fn hash_leaf<F, H>(elem: &F) -> Output<H>
where
	F: Field,
	H: Digest + BlockSizeUser,
{
	let mut encoded = Vec::with_capacity(F::BYTE_SIZE);
	elem.serialize(&mut encoded)
		.expect("serializing into a Vec cannot run out of capacity");
	H::digest(&encoded)
}

/// Merkle-tree-like folding of a digest vector into its root.
pub fn fold_digests_vector_inplace<C, D>(compression: &C, digests: &mut [D]) -> Result<(), Error>
where
	C: PseudoCompressionFunction<D, 2>,
	D: Clone + Debug,
{
	if !digests.len().is_power_of_two() {
		bail!(Error::PowerOfTwoLengthRequired { len: digests.len() });
	}

	let mut len = digests.len() / 2;

	while len != 0 {
		for i in 0..len {
			digests[i] = compression.compress([digests[2 * i].clone(), digests[2 * i + 1].clone()]);
		}
		len /= 2;
	}

	Ok(())
}
