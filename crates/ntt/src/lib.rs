// Copyright 2024 Ulvetanna Inc.

//! Radix-2 number-theoretic transforms over multiplicative subgroups of two-adic prime fields.
//!
//! An [`EvaluationDomain`] is the subgroup $\langle g \rangle$ of order $2^k$. The forward
//! transform maps the coefficients of a polynomial of degree less than $2^k$ to its evaluations
//! $P(g^0), P(g^1), \ldots$, in that order.

mod bit_reverse;
mod domain;
mod error;
mod polynomial;
#[cfg(test)]
mod reference;

pub use bit_reverse::{bit_reverse_index, bit_reverse_permutation};
pub use domain::EvaluationDomain;
pub use error::Error;
pub use polynomial::evaluate_horner;
