// Copyright 2023 Ulvetanna Inc.

//! Hash-based proofs of proximity to Reed–Solomon codes over prime fields.
//!
//! The [`protocols::fri`] module holds the radix-2 FRI engine. It builds on the binary
//! [`merkle_tree`] commitment and the labelled Fiat-Shamir [`transcript`].

pub mod merkle_tree;
pub mod protocols;
pub mod transcript;
