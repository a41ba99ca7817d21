// Copyright 2023 Ulvetanna Inc.

//! Hash primitives used by the Merkle commitment and the Fiat-Shamir transcript.

pub mod compression;
pub mod sha2;

pub use compression::*;
pub use sha2::*;
