// Copyright 2024-2025 Irreducible Inc.

//! Utility modules shared by the fibra crates.

pub mod checked_arithmetics;
pub mod error_utils;
pub mod serialization;
pub mod tracing;

pub use serialization::{DeserializeBytes, Error as SerializationError, SerializeBytes};
