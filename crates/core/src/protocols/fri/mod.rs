// Copyright 2024 Irreducible Inc.

//! Implementation of the Fast Reed–Solomon IOPP (FRI) over multiplicative radix-2 domains.
//!
//! FRI is an IOP of Proximity for Reed–Solomon codes, introduced in [BBHR17]. The prover
//! evaluates a polynomial over a domain of size `rho` times its length and commits to the
//! evaluations with a Merkle tree. In each fold round the verifier sends a challenge and the
//! prover folds the codeword in half, pairing the evaluations at `x` and `-x`, and commits to the
//! folded codeword over the squared domain. The last codeword the prover sends entirely in the
//! clear.
//!
//! Codewords are committed in fiber-sorted order, placing the two points of each fiber of the
//! squaring map next to each other, so one Merkle path opens both. The query phase threads each
//! sampled position through all rounds and checks that consecutive codewords fold consistently.
//!
//! [BBHR17]: <https://eccc.weizmann.ac.il/report/2017/134/>

mod common;
mod engine;
mod error;
pub mod fiber;
mod logging;
mod prove;
mod verify;

pub use common::{
	calculate_n_test_queries, derive_query_positions, fold_challenge_label, fold_codeword,
	fold_pair, query_challenge_label, query_start, query_trajectory, FRIParams, FRIProof,
	OpeningProof, QueryProof, QueryRoundProof, TerminateCodeword, DEFAULT_LOG_INV_RATE,
	DEFAULT_SECURITY_BITS,
};
pub use engine::*;
pub use error::*;
pub use prove::*;
pub use verify::*;
