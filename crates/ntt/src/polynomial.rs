// Copyright 2024 Irreducible Inc.

use fibra_field::Field;

/// Evaluates the polynomial with coefficients `coeffs` (lowest degree first) at `x`.
pub fn evaluate_horner<F: Field>(coeffs: &[F], x: F) -> F {
	coeffs
		.iter()
		.rev()
		.fold(F::ZERO, |acc, &coeff| acc * x + coeff)
}
