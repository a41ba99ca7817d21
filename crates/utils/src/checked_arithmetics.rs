// Copyright 2024 Irreducible Inc.

/// Computes `log2(n)` for an exact power of two, panicking otherwise.
#[inline]
pub fn log2_strict_usize(n: usize) -> usize {
	let res = n.trailing_zeros();
	assert_eq!(n.wrapping_shr(res), 1, "not a power of two: {n}");
	res as usize
}

/// Computes `ceil(log2(n))`, with `log2_ceil_usize(0) == 0`.
#[inline]
pub const fn log2_ceil_usize(n: usize) -> usize {
	(usize::BITS - n.saturating_sub(1).leading_zeros()) as usize
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_log2_strict_usize() {
		assert_eq!(log2_strict_usize(1), 0);
		assert_eq!(log2_strict_usize(4096), 12);
	}

	#[test]
	#[should_panic]
	fn test_log2_strict_usize_not_power_of_two() {
		_ = log2_strict_usize(12);
	}

	#[test]
	fn test_log2_ceil_usize() {
		assert_eq!(log2_ceil_usize(0), 0);
		assert_eq!(log2_ceil_usize(1), 0);
		assert_eq!(log2_ceil_usize(2), 1);
		assert_eq!(log2_ceil_usize(3), 2);
		assert_eq!(log2_ceil_usize(32), 5);
		assert_eq!(log2_ceil_usize(33), 6);
	}
}
