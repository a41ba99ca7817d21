// Copyright 2024-2025 Irreducible Inc.

use fibra_field::{Field, TwoAdicField};
use fibra_utils::{bail, ensure};
use getset::CopyGetters;
use rayon::prelude::*;

use crate::{bit_reverse::bit_reverse_permutation, Error};

/// A multiplicative subgroup of order `2^log_size`, generated by a primitive root of unity.
///
/// Index `k` of a codeword over this domain is the evaluation at `generator^k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, CopyGetters)]
pub struct EvaluationDomain<F> {
	/// Base-2 logarithm of the domain cardinality.
	#[getset(get_copy = "pub")]
	log_size: usize,
	generator: F,
	generator_inv: F,
	/// Inverse of the cardinality, used to scale the inverse transform.
	size_inv: F,
}

impl<F: TwoAdicField> EvaluationDomain<F> {
	/// Constructs the domain of order `2^log_size`.
	pub fn new(log_size: usize) -> Result<Self, Error> {
		if log_size > F::TWO_ADICITY {
			bail!(Error::DomainTooLarge {
				log_size,
				max: F::TWO_ADICITY,
			});
		}

		let generator = F::two_adic_generator(log_size)?;
		// Generators of a multiplicative group are never zero.
		let generator_inv = generator.invert_or_zero();
		let size_inv = F::ONE.double().pow([log_size as u64]).invert_or_zero();
		Ok(Self {
			log_size,
			generator,
			generator_inv,
			size_inv,
		})
	}

	/// The image of this domain under the squaring map: half the size, generator squared.
	pub fn squared(&self) -> Result<Self, Error> {
		ensure!(self.log_size > 0, Error::DomainTooSmall);
		Ok(Self {
			log_size: self.log_size - 1,
			generator: self.generator.square(),
			generator_inv: self.generator_inv.square(),
			size_inv: self.size_inv.double(),
		})
	}

	/// The primitive root of unity generating the domain.
	pub fn generator(&self) -> F {
		self.generator
	}

	pub fn generator_inv(&self) -> F {
		self.generator_inv
	}

	/// The domain cardinality.
	pub fn size(&self) -> usize {
		1 << self.log_size
	}

	/// Returns `generator^k`.
	pub fn element(&self, k: usize) -> F {
		self.generator.pow([k as u64])
	}

	/// Returns `generator^-k`.
	pub fn element_inv(&self, k: usize) -> F {
		self.generator_inv.pow([k as u64])
	}

	/// Evaluates a polynomial given by its coefficients in place.
	///
	/// The buffer must hold exactly [`Self::size`] coefficients; on return entry `k` holds the
	/// evaluation at `generator^k`.
	pub fn forward_transform(&self, data: &mut [F]) -> Result<(), Error> {
		self.check_buffer(data)?;

		let _scope =
			tracing::trace_span!("Radix-2 NTT forward", log_size = self.log_size).entered();
		transform(data, self.log_size, self.generator)
	}

	/// Interpolates evaluations in canonical order back into coefficients, in place.
	pub fn inverse_transform(&self, data: &mut [F]) -> Result<(), Error> {
		self.check_buffer(data)?;

		let _scope =
			tracing::trace_span!("Radix-2 NTT inverse", log_size = self.log_size).entered();
		transform(data, self.log_size, self.generator_inv)?;
		let size_inv = self.size_inv;
		data.par_iter_mut().for_each(|x| *x *= size_inv);
		Ok(())
	}

	/// Zero-pads `coeffs` to the domain size and returns its evaluations over the domain.
	pub fn evaluate(&self, coeffs: &[F]) -> Result<Vec<F>, Error> {
		if coeffs.len() > self.size() {
			bail!(Error::IncorrectBufferLength {
				expected: self.size(),
				actual: coeffs.len(),
			});
		}

		let mut evals = vec![F::ZERO; self.size()];
		evals[..coeffs.len()].copy_from_slice(coeffs);
		self.forward_transform(&mut evals)?;
		Ok(evals)
	}

	/// Returns the coefficients of the unique polynomial of degree below the domain size that
	/// takes the given values.
	pub fn interpolate(&self, evals: &[F]) -> Result<Vec<F>, Error> {
		let mut coeffs = evals.to_vec();
		self.inverse_transform(&mut coeffs)?;
		Ok(coeffs)
	}

	fn check_buffer(&self, data: &[F]) -> Result<(), Error> {
		ensure!(
			data.len() == self.size(),
			Error::IncorrectBufferLength {
				expected: self.size(),
				actual: data.len(),
			}
		);
		Ok(())
	}
}

/// Iterative Cooley–Tukey transform: bit-reverse the input, then run the butterflies of each
/// layer in parallel over independent blocks.
fn transform<F: Field>(data: &mut [F], log_n: usize, root: F) -> Result<(), Error> {
	bit_reverse_permutation(data)?;

	for layer in 0..log_n {
		let half = 1 << layer;
		// primitive root of order 2^(layer + 1)
		let omega = root.pow([1u64 << (log_n - layer - 1)]);
		let twiddles = std::iter::successors(Some(F::ONE), |w| Some(*w * omega))
			.take(half)
			.collect::<Vec<_>>();

		data.par_chunks_exact_mut(2 * half).for_each(|block| {
			let (lo, hi) = block.split_at_mut(half);
			for ((a, b), &w) in lo.iter_mut().zip(hi.iter_mut()).zip(&twiddles) {
				let t = *b * w;
				*b = *a - t;
				*a += t;
			}
		});
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use std::iter::repeat_with;

	use assert_matches::assert_matches;
	use fibra_field::{arithmetic_traits::Square, Goldilocks, PrimeField};
	use proptest::prelude::*;
	use rand::{rngs::StdRng, SeedableRng};

	use super::*;
	use crate::{evaluate_horner, reference::naive_dft};

	#[test]
	fn test_domain_too_large() {
		assert_matches!(
			EvaluationDomain::<Goldilocks>::new(33),
			Err(Error::DomainTooLarge { log_size: 33, max: 32 })
		);
	}

	#[test]
	fn test_squared_domain_matches_direct_construction() {
		let domain = EvaluationDomain::<Goldilocks>::new(10).unwrap();
		let squared = domain.squared().unwrap();
		assert_eq!(squared, EvaluationDomain::new(9).unwrap());
		assert_eq!(squared.generator(), domain.generator().square());
		assert_eq!(squared.size(), domain.size() / 2);

		let trivial = EvaluationDomain::<Goldilocks>::new(0).unwrap();
		assert_eq!(trivial.generator(), Goldilocks::ONE);
		assert_matches!(trivial.squared(), Err(Error::DomainTooSmall));
	}

	#[test]
	fn test_half_power_is_minus_one() {
		let domain = EvaluationDomain::<Goldilocks>::new(6).unwrap();
		assert_eq!(domain.element(32), -Goldilocks::ONE);
		assert_eq!(domain.element(3) * domain.element_inv(3), Goldilocks::ONE);
	}

	#[test]
	fn test_forward_transform_matches_naive_dft() {
		let mut rng = StdRng::seed_from_u64(0);
		for log_size in 0..8 {
			let domain = EvaluationDomain::<Goldilocks>::new(log_size).unwrap();
			let coeffs = repeat_with(|| Goldilocks::random(&mut rng))
				.take(domain.size())
				.collect::<Vec<_>>();

			let mut evals = coeffs.clone();
			domain.forward_transform(&mut evals).unwrap();
			assert_eq!(evals, naive_dft(&coeffs, domain.generator()));
		}
	}

	#[test]
	fn test_incorrect_buffer_length() {
		let domain = EvaluationDomain::<Goldilocks>::new(4).unwrap();
		let mut data = vec![Goldilocks::ZERO; 8];
		assert_matches!(
			domain.forward_transform(&mut data),
			Err(Error::IncorrectBufferLength {
				expected: 16,
				actual: 8
			})
		);
		assert_matches!(
			domain.evaluate(&[Goldilocks::ONE; 17]),
			Err(Error::IncorrectBufferLength { .. })
		);
	}

	proptest! {
		#[test]
		fn test_inverse_transform_round_trip(
			log_size in 0usize..10,
			seed in any::<u64>()
		) {
			let mut rng = StdRng::seed_from_u64(seed);
			let domain = EvaluationDomain::<Goldilocks>::new(log_size).unwrap();
			let coeffs = repeat_with(|| Goldilocks::random(&mut rng))
				.take(domain.size())
				.collect::<Vec<_>>();

			let evals = domain.evaluate(&coeffs).unwrap();
			prop_assert_eq!(domain.interpolate(&evals).unwrap(), coeffs);
		}

		#[test]
		fn test_evaluations_agree_with_horner(
			n_coeffs in 1usize..64,
			index in 0usize..64,
			seed in any::<u64>()
		) {
			let mut rng = StdRng::seed_from_u64(seed);
			let domain = EvaluationDomain::<Goldilocks>::new(6).unwrap();
			let coeffs = repeat_with(|| Goldilocks::random(&mut rng))
				.take(n_coeffs)
				.collect::<Vec<_>>();

			let evals = domain.evaluate(&coeffs).unwrap();
			prop_assert_eq!(evals[index], evaluate_horner(&coeffs, domain.element(index)));
		}
	}

	#[test]
	fn test_constant_polynomial() {
		let domain = EvaluationDomain::<Goldilocks>::new(5).unwrap();
		let c = Goldilocks::from_u64(42);
		let evals = domain.evaluate(&[c]).unwrap();
		assert!(evals.iter().all(|&e| e == c));
	}
}
