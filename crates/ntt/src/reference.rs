// Copyright 2024 Ulvetanna Inc.

//! Quadratic-time reference transform for testing.

use fibra_field::Field;

use crate::evaluate_horner;

/// Evaluates `coeffs` at every power of `generator`, one Horner evaluation at a time.
pub fn naive_dft<F: Field>(coeffs: &[F], generator: F) -> Vec<F> {
	let mut point = F::ONE;
	(0..coeffs.len())
		.map(|_| {
			let eval = evaluate_horner(coeffs, point);
			point *= generator;
			eval
		})
		.collect()
}
