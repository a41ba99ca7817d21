// Copyright 2024 Irreducible Inc.

//! Conversions between the canonical and the fiber-sorted ordering of a codeword.
//!
//! In canonical order, index `k` of a codeword over a domain of size `n` with generator `g` holds
//! the evaluation at `g^k`. The points `g^k` and `g^(k + n/2)` square to the same element, so they
//! form a fiber of the squaring map onto the halved domain. The fiber-sorted order places the two
//! members of fiber `k` at indices `2k` and `2k + 1`, which lets a single Merkle path above the
//! pair open both members.

/// Maps a fiber-sorted index to its canonical exponent and the exponent of its fiber partner.
///
/// Returns `(u, v)` where `u` is the canonical index of the value stored at sorted index `p`, and
/// `v = (u + n/2) mod n`. Both `g^u` and `g^v` square to the same point.
pub fn to_canonical(p: usize, n: usize) -> (usize, usize) {
	debug_assert!(p < n);
	let u = if p % 2 == 0 {
		p / 2
	} else {
		let l = (n - 1 - p) / 2;
		n - 1 - l
	};
	(u, (u + n / 2) % n)
}

/// Maps a canonical index to its fiber-sorted index. Inverse of [`to_canonical`].
pub fn canonical_to_sorted(k: usize, n: usize) -> usize {
	debug_assert!(k < n);
	if n < 2 {
		return 0;
	}
	let half = n / 2;
	if k < half {
		2 * k
	} else {
		2 * (k - half) + 1
	}
}

/// Reorders a canonical codeword into fiber-sorted order.
pub fn to_fiber_sorted<T: Copy>(values: &[T]) -> Vec<T> {
	let (lo, hi) = values.split_at(values.len() / 2);
	if hi.len() != lo.len() {
		// Length one, or odd lengths which never occur for radix-2 domains.
		return values.to_vec();
	}
	lo.iter()
		.zip(hi)
		.flat_map(|(&lo, &hi)| [lo, hi])
		.collect()
}

/// Reorders a fiber-sorted codeword back into canonical order. Inverse of [`to_fiber_sorted`].
pub fn from_fiber_sorted<T: Copy>(values: &[T]) -> Vec<T> {
	if values.len() % 2 != 0 {
		return values.to_vec();
	}
	values
		.iter()
		.step_by(2)
		.chain(values.iter().skip(1).step_by(2))
		.copied()
		.collect()
}

/// Given the sorted index `p` of a point in a domain of size `n`, returns the sorted index of its
/// square in the halved domain.
///
/// The fold of fiber `p / 2` lands at canonical index `p / 2` of the next codeword.
pub fn next_position(p: usize, n: usize) -> usize {
	canonical_to_sorted(p / 2, n / 2)
}

#[cfg(test)]
mod tests {
	use fibra_field::{arithmetic_traits::Square, Goldilocks};
	use fibra_ntt::EvaluationDomain;
	use proptest::prelude::*;

	use super::*;

	#[test]
	fn test_to_canonical_small() {
		let n = 8;
		let expected = [(0, 4), (4, 0), (1, 5), (5, 1), (2, 6), (6, 2), (3, 7), (7, 3)];
		for (p, &pair) in expected.iter().enumerate() {
			assert_eq!(to_canonical(p, n), pair);
		}
		assert_eq!(to_canonical(0, 1), (0, 0));
	}

	#[test]
	fn test_sort_matches_index_maps() {
		let values = (0..16).collect::<Vec<usize>>();
		let sorted = to_fiber_sorted(&values);
		for (p, &k) in sorted.iter().enumerate() {
			assert_eq!(to_canonical(p, 16).0, k);
			assert_eq!(canonical_to_sorted(k, 16), p);
		}
		assert_eq!(from_fiber_sorted(&sorted), values);
		assert_eq!(to_fiber_sorted(&[7]), vec![7]);
	}

	#[test]
	fn test_fiber_members_square_to_same_point() {
		let domain = EvaluationDomain::<Goldilocks>::new(6).unwrap();
		let n = domain.size();
		for p in 0..n {
			let (u, v) = to_canonical(p, n);
			assert_ne!(u, v);
			assert_eq!(domain.element(u).square(), domain.element(v).square());
		}
	}

	#[test]
	fn test_next_position_continues_fiber() {
		let domain = EvaluationDomain::<Goldilocks>::new(5).unwrap();
		let next_domain = domain.squared().unwrap();
		let n = domain.size();
		for p in 0..n {
			let (u, _) = to_canonical(p, n);
			let (next_u, next_v) = to_canonical(next_position(p, n), n / 2);
			let image = domain.element(u).square();
			assert_eq!(image, next_domain.element(next_u));
			assert_eq!(next_domain.element(next_u).square(), next_domain.element(next_v).square());
		}
	}

	proptest! {
		#[test]
		fn test_index_maps_round_trip(log_n in 0usize..20, seed in any::<usize>()) {
			let n = 1 << log_n;
			let p = seed % n;
			let (u, v) = to_canonical(p, n);
			prop_assert!(u < n);
			prop_assert!(v < n);
			prop_assert_eq!(canonical_to_sorted(u, n), p);
			prop_assert_eq!(to_canonical(canonical_to_sorted(p, n), n).0, p);
		}

		#[test]
		fn test_sorting_round_trip(values in proptest::collection::vec(any::<u64>(), 1..6)) {
			let len = values.len().next_power_of_two();
			let mut padded = values;
			padded.resize(len, 0);
			prop_assert_eq!(from_fiber_sorted(&to_fiber_sorted(&padded)), padded.clone());
			prop_assert_eq!(to_fiber_sorted(&from_fiber_sorted(&padded)), padded);
		}
	}
}
