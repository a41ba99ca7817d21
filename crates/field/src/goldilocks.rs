// Copyright 2024-2025 Irreducible Inc.

use std::{
	fmt::{self, Debug, Display, Formatter},
	iter::{Product, Sum},
	ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

use bytes::{Buf, BufMut};
use fibra_utils::{DeserializeBytes, SerializationError, SerializeBytes};
use rand::RngCore;

use crate::{
	arithmetic_traits::{InvertOrZero, Square},
	error::Error,
	field::{Field, PrimeField, TwoAdicField},
};

/// The Goldilocks modulus $2^{64} - 2^{32} + 1$.
pub const GOLDILOCKS_MODULUS: u64 = 0xFFFF_FFFF_0000_0001;

/// $2^{64} \bmod p$, which is also $2^{64} - p$.
const EPSILON: u64 = 0xFFFF_FFFF;

/// An element of the Goldilocks field.
///
/// The inner value is always the canonical representative, strictly less than the modulus.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Goldilocks(u64);

impl Goldilocks {
	/// Constructs an element from a value already known to be canonical.
	pub const fn new_unchecked(value: u64) -> Self {
		debug_assert!(value < GOLDILOCKS_MODULUS);
		Self(value)
	}

	#[inline]
	const fn reduce_u64(value: u64) -> u64 {
		if value >= GOLDILOCKS_MODULUS {
			value - GOLDILOCKS_MODULUS
		} else {
			value
		}
	}

	/// Reduces a 128-bit product using $2^{64} \equiv 2^{32} - 1$ and $2^{96} \equiv -1$.
	#[inline]
	const fn reduce_u128(value: u128) -> u64 {
		let lo = value as u64;
		let hi = (value >> 64) as u64;
		let hi_hi = hi >> 32;
		let hi_lo = hi & EPSILON;

		let (mut t0, borrow) = lo.overflowing_sub(hi_hi);
		if borrow {
			// the wrapped value is at least 2^64 - 2^32 + 1, so this cannot underflow
			t0 -= EPSILON;
		}
		let t1 = hi_lo * EPSILON;
		let (res, carry) = t0.overflowing_add(t1);
		let res = if carry { res + EPSILON } else { res };
		Self::reduce_u64(res)
	}
}

impl Debug for Goldilocks {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "Goldilocks({:#018x})", self.0)
	}
}

impl Display for Goldilocks {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl Neg for Goldilocks {
	type Output = Self;

	#[inline]
	fn neg(self) -> Self {
		if self.0 == 0 {
			self
		} else {
			Self(GOLDILOCKS_MODULUS - self.0)
		}
	}
}

impl Add for Goldilocks {
	type Output = Self;

	#[inline]
	fn add(self, rhs: Self) -> Self {
		let (sum, overflow) = self.0.overflowing_add(rhs.0);
		if overflow {
			Self(sum + EPSILON)
		} else {
			Self(Self::reduce_u64(sum))
		}
	}
}

impl Sub for Goldilocks {
	type Output = Self;

	#[inline]
	fn sub(self, rhs: Self) -> Self {
		let (diff, borrow) = self.0.overflowing_sub(rhs.0);
		if borrow {
			Self(diff.wrapping_add(GOLDILOCKS_MODULUS))
		} else {
			Self(diff)
		}
	}
}

impl Mul for Goldilocks {
	type Output = Self;

	#[inline]
	fn mul(self, rhs: Self) -> Self {
		Self(Self::reduce_u128(self.0 as u128 * rhs.0 as u128))
	}
}

macro_rules! impl_ref_ops {
	($($op:ident $method:ident $assign_op:ident $assign_method:ident),*) => {
		$(
			impl<'a> $op<&'a Goldilocks> for Goldilocks {
				type Output = Goldilocks;

				#[inline]
				fn $method(self, rhs: &'a Goldilocks) -> Goldilocks {
					$op::$method(self, *rhs)
				}
			}

			impl $assign_op for Goldilocks {
				#[inline]
				fn $assign_method(&mut self, rhs: Goldilocks) {
					*self = $op::$method(*self, rhs);
				}
			}

			impl<'a> $assign_op<&'a Goldilocks> for Goldilocks {
				#[inline]
				fn $assign_method(&mut self, rhs: &'a Goldilocks) {
					*self = $op::$method(*self, *rhs);
				}
			}
		)*
	};
}

impl_ref_ops!(
	Add add AddAssign add_assign,
	Sub sub SubAssign sub_assign,
	Mul mul MulAssign mul_assign
);

impl Sum for Goldilocks {
	fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
		iter.fold(Self::ZERO, |acc, x| acc + x)
	}
}

impl<'a> Sum<&'a Goldilocks> for Goldilocks {
	fn sum<I: Iterator<Item = &'a Goldilocks>>(iter: I) -> Self {
		iter.fold(Self::ZERO, |acc, x| acc + x)
	}
}

impl Product for Goldilocks {
	fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
		iter.fold(Self::ONE, |acc, x| acc * x)
	}
}

impl<'a> Product<&'a Goldilocks> for Goldilocks {
	fn product<I: Iterator<Item = &'a Goldilocks>>(iter: I) -> Self {
		iter.fold(Self::ONE, |acc, x| acc * x)
	}
}

impl Square for Goldilocks {
	#[inline]
	fn square(self) -> Self {
		self * self
	}
}

impl InvertOrZero for Goldilocks {
	fn invert_or_zero(self) -> Self {
		// Fermat: a^(p-2) = a^-1, and 0^(p-2) = 0
		self.pow([GOLDILOCKS_MODULUS - 2])
	}
}

impl SerializeBytes for Goldilocks {
	fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), SerializationError> {
		if write_buf.remaining_mut() < Self::BYTE_SIZE {
			return Err(SerializationError::WriteBufferFull);
		}
		write_buf.put_u64_le(self.0);
		Ok(())
	}
}

impl DeserializeBytes for Goldilocks {
	fn deserialize(mut read_buf: impl Buf) -> Result<Self, SerializationError> {
		if read_buf.remaining() < Self::BYTE_SIZE {
			return Err(SerializationError::NotEnoughBytes);
		}
		Self::from_canonical_u64(read_buf.get_u64_le())
			.map_err(|_| SerializationError::NonCanonicalFieldElement)
	}
}

impl Field for Goldilocks {
	const ZERO: Self = Self(0);
	const ONE: Self = Self(1);
	const CHARACTERISTIC: u64 = GOLDILOCKS_MODULUS;
	const BYTE_SIZE: usize = 8;

	fn random(mut rng: impl RngCore) -> Self {
		loop {
			let candidate = rng.next_u64();
			if candidate < GOLDILOCKS_MODULUS {
				return Self(candidate);
			}
		}
	}

	#[inline]
	fn double(&self) -> Self {
		*self + *self
	}

	#[inline]
	fn halve(&self) -> Self {
		// (p + 1) / 2 is the inverse of two
		let half = self.0 >> 1;
		if self.0 & 1 == 0 {
			Self(half)
		} else {
			Self(half + (GOLDILOCKS_MODULUS >> 1) + 1)
		}
	}
}

impl PrimeField for Goldilocks {
	const MODULUS: u64 = GOLDILOCKS_MODULUS;

	fn from_canonical_u64(value: u64) -> Result<Self, Error> {
		if value < GOLDILOCKS_MODULUS {
			Ok(Self(value))
		} else {
			Err(Error::NotInField)
		}
	}

	#[inline]
	fn from_u64(value: u64) -> Self {
		Self(Self::reduce_u64(value))
	}

	#[inline]
	fn as_canonical_u64(&self) -> u64 {
		self.0
	}

	fn from_bytes_mod_order(bytes: &[u8]) -> Self {
		let reduced = bytes.iter().fold(0u64, |acc, &byte| {
			Self::reduce_u128(((acc as u128) << 8) | byte as u128)
		});
		Self(reduced)
	}
}

impl TwoAdicField for Goldilocks {
	const TWO_ADICITY: usize = 32;
	const MULTIPLICATIVE_GENERATOR: Self = Self(7);

	fn two_adic_generator(log_order: usize) -> Result<Self, Error> {
		if log_order > Self::TWO_ADICITY {
			return Err(Error::TwoAdicityExceeded { log_order });
		}
		Ok(Self::MULTIPLICATIVE_GENERATOR.pow([(GOLDILOCKS_MODULUS - 1) >> log_order]))
	}
}

impl From<u32> for Goldilocks {
	fn from(value: u32) -> Self {
		Self(value as u64)
	}
}

impl From<Goldilocks> for u64 {
	fn from(value: Goldilocks) -> Self {
		value.0
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	#[test]
	fn test_modulus_wraps() {
		let minus_one = Goldilocks::new_unchecked(GOLDILOCKS_MODULUS - 1);
		assert_eq!(minus_one + Goldilocks::ONE, Goldilocks::ZERO);
		assert_eq!(Goldilocks::ZERO - Goldilocks::ONE, minus_one);
		assert_eq!(minus_one * minus_one, Goldilocks::ONE);
		assert_eq!(-Goldilocks::ONE, minus_one);
	}

	#[test]
	fn test_halve() {
		let two = Goldilocks::from_u64(2);
		for x in [0, 1, 2, 3, GOLDILOCKS_MODULUS - 2, GOLDILOCKS_MODULUS - 1] {
			let x = Goldilocks::new_unchecked(x);
			assert_eq!(x.halve() * two, x);
		}
	}

	#[test]
	fn test_from_u64_reduces() {
		assert_eq!(Goldilocks::from_u64(GOLDILOCKS_MODULUS), Goldilocks::ZERO);
		assert_eq!(Goldilocks::from_u64(u64::MAX), Goldilocks::from_u64(EPSILON - 1));
		assert_eq!(Goldilocks::from_canonical_u64(GOLDILOCKS_MODULUS), Err(Error::NotInField));
	}

	#[test]
	fn test_reduce_u128_extremes() {
		let max = u128::MAX;
		let expected = (max % GOLDILOCKS_MODULUS as u128) as u64;
		assert_eq!(Goldilocks::reduce_u128(max), expected);

		let p_squared = (GOLDILOCKS_MODULUS as u128) * (GOLDILOCKS_MODULUS as u128);
		assert_eq!(Goldilocks::reduce_u128(p_squared), 0);
		assert_eq!(Goldilocks::reduce_u128(1u128 << 96), GOLDILOCKS_MODULUS - 1);
	}

	#[test]
	fn test_bytes_mod_order_matches_integer_reduction() {
		let bytes = [0xffu8; 32];
		let expected = Goldilocks::from_bytes_mod_order(&bytes);
		let radix = Goldilocks::from_u64(256);
		let generic = bytes.iter().fold(Goldilocks::ZERO, |acc, &byte| {
			acc * radix + Goldilocks::from_u64(byte as u64)
		});
		assert_eq!(expected, generic);

		assert_eq!(Goldilocks::from_bytes_mod_order(&[0x01, 0x00]), Goldilocks::from(256u32));
		assert_eq!(Goldilocks::from_bytes_mod_order(&[]), Goldilocks::ZERO);
	}

	#[test]
	fn test_two_adic_generator_order() {
		for log_order in [0, 1, 5, 15, 32] {
			let g = Goldilocks::two_adic_generator(log_order).unwrap();
			assert_eq!(g.pow([1u64 << log_order]), Goldilocks::ONE);
			if log_order > 0 {
				assert_ne!(g.pow([1u64 << (log_order - 1)]), Goldilocks::ONE);
			}
		}
		assert_eq!(
			Goldilocks::two_adic_generator(33),
			Err(Error::TwoAdicityExceeded { log_order: 33 })
		);
	}

	#[test]
	fn test_deserialize_rejects_non_canonical() {
		let bytes = GOLDILOCKS_MODULUS.to_le_bytes();
		assert_eq!(
			Goldilocks::deserialize(bytes.as_slice()),
			Err(SerializationError::NonCanonicalFieldElement)
		);
		assert_eq!(
			Goldilocks::deserialize(&bytes[..7]),
			Err(SerializationError::NotEnoughBytes)
		);
	}

	proptest! {
		#[test]
		fn test_mul_matches_u128_modulo(a in 0..GOLDILOCKS_MODULUS, b in 0..GOLDILOCKS_MODULUS) {
			let expected = ((a as u128 * b as u128) % GOLDILOCKS_MODULUS as u128) as u64;
			let product = Goldilocks::new_unchecked(a) * Goldilocks::new_unchecked(b);
			prop_assert_eq!(product.as_canonical_u64(), expected);
		}

		#[test]
		fn test_add_sub_match_u128_modulo(a in 0..GOLDILOCKS_MODULUS, b in 0..GOLDILOCKS_MODULUS) {
			let p = GOLDILOCKS_MODULUS as u128;
			let x = Goldilocks::new_unchecked(a);
			let y = Goldilocks::new_unchecked(b);
			prop_assert_eq!((x + y).as_canonical_u64() as u128, (a as u128 + b as u128) % p);
			prop_assert_eq!((x - y).as_canonical_u64() as u128, (a as u128 + p - b as u128) % p);
		}

		#[test]
		fn test_serialization_round_trip(a in 0..GOLDILOCKS_MODULUS) {
			let x = Goldilocks::new_unchecked(a);
			let mut buf = Vec::new();
			x.serialize(&mut buf).unwrap();
			prop_assert_eq!(buf.len(), Goldilocks::BYTE_SIZE);
			prop_assert_eq!(Goldilocks::deserialize(buf.as_slice()).unwrap(), x);
		}
	}
}
