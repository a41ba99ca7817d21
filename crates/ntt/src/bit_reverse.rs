// Copyright 2024-2025 Irreducible Inc.

use fibra_utils::{bail, checked_arithmetics::log2_strict_usize};

use crate::Error;

/// Reverses the lowest `bits` bits of `index`.
#[inline]
pub const fn bit_reverse_index(index: usize, bits: usize) -> usize {
	if bits == 0 {
		0
	} else {
		index.reverse_bits() >> (usize::BITS as usize - bits)
	}
}

/// Permutes `data` in place so that entry `i` moves to position `bit_reverse_index(i, log_n)`.
pub fn bit_reverse_permutation<T>(data: &mut [T]) -> Result<(), Error> {
	if !data.len().is_power_of_two() {
		bail!(Error::PowerOfTwoLengthRequired);
	}

	let log_n = log2_strict_usize(data.len());
	for i in 0..data.len() {
		let j = bit_reverse_index(i, log_n);
		if i < j {
			data.swap(i, j);
		}
	}
	Ok(())
}
