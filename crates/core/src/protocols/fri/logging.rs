// Copyright 2025 Irreducible Inc.

use fibra_field::Field;

#[derive(Debug)]
#[allow(dead_code)]
pub(super) struct RSEncodeDimensionData {
	log_elems: usize,
	element_size: usize,
}

impl RSEncodeDimensionData {
	pub(super) fn new<F: Field>(log_elems: usize) -> Self {
		Self {
			log_elems,
			element_size: F::BYTE_SIZE,
		}
	}
}

#[derive(Debug)]
#[allow(dead_code)]
pub(super) struct MerkleTreeDimensionData {
	log_elems: usize,
	element_size: usize,
}

impl MerkleTreeDimensionData {
	pub(super) fn new<F: Field>(log_elems: usize) -> Self {
		Self {
			log_elems,
			element_size: F::BYTE_SIZE,
		}
	}
}

#[derive(Debug)]
#[allow(dead_code)]
pub(super) struct FRIFoldData {
	round: usize,
	log_len: usize,
}

impl FRIFoldData {
	pub(super) fn new(round: usize, log_len: usize) -> Self {
		Self { round, log_len }
	}

	pub(super) fn log_len(&self) -> usize {
		self.log_len
	}
}
