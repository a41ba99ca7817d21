// Copyright 2023-2024 Irreducible Inc.

//! Interactive oracle proofs of proximity, made non-interactive by the Fiat-Shamir
//! transformation.
//!
//! Each protocol has a prover-side implementation and a verifier-side implementation. The
//! prover-side implementations simulate the verifier in order to derive the same challenges from
//! the transcript.

pub mod fri;
mod iopp;

pub use iopp::IOPPScheme;
