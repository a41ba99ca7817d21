// Copyright 2024-2025 Irreducible Inc.

use std::{
	fmt::{Debug, Display},
	hash::Hash,
	iter::{Product, Sum},
	ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

use fibra_utils::{DeserializeBytes, SerializeBytes};
use rand::RngCore;

use crate::{
	arithmetic_traits::{InvertOrZero, Square},
	error::Error,
};

/// This trait is based on `ff::Field` with some unused functionality removed.
pub trait Field:
	Sized
	+ Eq
	+ Copy
	+ Clone
	+ Default
	+ Send
	+ Sync
	+ Debug
	+ Display
	+ Hash
	+ 'static
	+ Neg<Output = Self>
	+ Add<Output = Self>
	+ Sub<Output = Self>
	+ Mul<Output = Self>
	+ Sum
	+ Product
	+ for<'a> Add<&'a Self, Output = Self>
	+ for<'a> Sub<&'a Self, Output = Self>
	+ for<'a> Mul<&'a Self, Output = Self>
	+ for<'a> Sum<&'a Self>
	+ for<'a> Product<&'a Self>
	+ AddAssign
	+ SubAssign
	+ MulAssign
	+ for<'a> AddAssign<&'a Self>
	+ for<'a> SubAssign<&'a Self>
	+ for<'a> MulAssign<&'a Self>
	+ Square
	+ InvertOrZero
	+ SerializeBytes
	+ DeserializeBytes
{
	/// The zero element of the field, the additive identity.
	const ZERO: Self;

	/// The one element of the field, the multiplicative identity.
	const ONE: Self;

	/// The characteristic of the field.
	const CHARACTERISTIC: u64;

	/// Number of bytes in the canonical encoding of an element.
	const BYTE_SIZE: usize;

	/// Returns an element chosen uniformly at random using a user-provided RNG.
	fn random(rng: impl RngCore) -> Self;

	/// Returns true iff this element is zero.
	fn is_zero(&self) -> bool {
		*self == Self::ZERO
	}

	/// Doubles this element.
	#[must_use]
	fn double(&self) -> Self;

	/// Divides this element by two.
	#[must_use]
	fn halve(&self) -> Self {
		*self * Self::ONE.double().invert_or_zero()
	}

	/// Computes the multiplicative inverse of this element,
	/// failing if the element is zero.
	fn invert(&self) -> Option<Self> {
		let inv = self.invert_or_zero();
		(!inv.is_zero()).then_some(inv)
	}

	/// Exponentiates `self` by `exp`, where `exp` is a little-endian order integer
	/// exponent.
	///
	/// # Guarantees
	///
	/// This operation is constant time with respect to `self`, for all exponents with the
	/// same number of digits (`exp.as_ref().len()`). It is variable time with respect to
	/// the number of digits in the exponent.
	fn pow<S: AsRef<[u64]>>(&self, exp: S) -> Self {
		let mut res = Self::ONE;
		for e in exp.as_ref().iter().rev() {
			for i in (0..64).rev() {
				res = res.square();
				let mut tmp = res;
				tmp *= self;
				if ((*e >> i) & 1) != 0 {
					res = tmp;
				}
			}
		}
		res
	}
}

/// A field of prime order whose elements have a canonical integer representative.
pub trait PrimeField: Field {
	/// The field modulus, equal to [`Field::CHARACTERISTIC`].
	const MODULUS: u64;

	/// Creates an element from a canonical integer, failing if `value` is not reduced.
	fn from_canonical_u64(value: u64) -> Result<Self, Error>;

	/// Creates an element from an arbitrary integer, reducing it modulo the field order.
	fn from_u64(value: u64) -> Self;

	/// Returns the canonical integer representative in `0..MODULUS`.
	fn as_canonical_u64(&self) -> u64;

	/// Interprets `bytes` as a big-endian integer of arbitrary length and reduces it modulo the
	/// field order.
	fn from_bytes_mod_order(bytes: &[u8]) -> Self {
		let radix = Self::from_u64(256);
		bytes
			.iter()
			.fold(Self::ZERO, |acc, &byte| acc * radix + Self::from_u64(byte as u64))
	}
}

/// A field whose multiplicative group contains a large subgroup of power-of-two order.
pub trait TwoAdicField: Field {
	/// The largest `k` such that `2^k` divides the order of the multiplicative group.
	const TWO_ADICITY: usize;

	/// A generator of the whole multiplicative group.
	const MULTIPLICATIVE_GENERATOR: Self;

	/// Returns an element of multiplicative order exactly `2^log_order`.
	fn two_adic_generator(log_order: usize) -> Result<Self, Error>;
}
