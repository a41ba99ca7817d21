// Copyright 2023-2024 Irreducible Inc.

//! Prime field arithmetic for FRI over multiplicative radix-2 domains.
//!
//! The main implementation is the Goldilocks field with modulus $p = 2^{64} - 2^{32} + 1$. Its
//! multiplicative group has order divisible by $2^{32}$, so it contains every radix-2 evaluation
//! domain up to that size.

pub mod arithmetic_traits;
pub mod error;
pub mod field;
pub mod goldilocks;

pub use error::*;
pub use field::{Field, PrimeField, TwoAdicField};
pub use goldilocks::Goldilocks;
