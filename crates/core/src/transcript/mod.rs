// Copyright 2024 Irreducible Inc.

//! Labelled Fiat-Shamir transcript.
//!
//! The set of challenges is declared up front as an ordered list of labels. Data is bound to a
//! label and the challenge for that label is the hash of the label, the preceding challenge and
//! the bound data. Chaining the challenges this way means every challenge commits to everything
//! bound before it, so the prover and verifier only need to agree on the label schedule.

mod error;

use digest::{Digest, Output};
pub use error::Error;
use fibra_field::PrimeField;
use fibra_utils::{bail, SerializeBytes};
use tracing::trace;

#[derive(Debug, Clone)]
struct Challenge<H: Digest> {
	label: String,
	bindings: Vec<u8>,
	value: Option<Output<H>>,
}

/// A Fiat-Shamir transcript over a fixed, ordered schedule of challenge labels.
#[derive(Debug, Clone)]
pub struct Transcript<H: Digest> {
	challenges: Vec<Challenge<H>>,
}

impl<H: Digest> Transcript<H> {
	/// Creates a transcript declaring the given challenge labels, in order.
	pub fn new<L: Into<String>>(labels: impl IntoIterator<Item = L>) -> Result<Self, Error> {
		let mut challenges = Vec::<Challenge<H>>::new();
		for label in labels {
			let label = label.into();
			if challenges.iter().any(|challenge| challenge.label == label) {
				bail!(Error::DuplicateChallenge { label });
			}
			challenges.push(Challenge {
				label,
				bindings: Vec::new(),
				value: None,
			});
		}
		Ok(Self { challenges })
	}

	fn position(&self, label: &str) -> Result<usize, Error> {
		self.challenges
			.iter()
			.position(|challenge| challenge.label == label)
			.ok_or_else(|| Error::UnknownChallenge {
				label: label.to_string(),
			})
	}

	fn bindings_mut(&mut self, label: &str) -> Result<&mut Vec<u8>, Error> {
		let index = self.position(label)?;
		let challenge = &mut self.challenges[index];
		if challenge.value.is_some() {
			bail!(Error::ChallengeAlreadyComputed {
				label: label.to_string(),
			});
		}
		Ok(&mut challenge.bindings)
	}

	/// Appends raw bytes to the data bound to `label`.
	pub fn bind(&mut self, label: &str, data: &[u8]) -> Result<(), Error> {
		self.bindings_mut(label)?.extend_from_slice(data);
		Ok(())
	}

	/// Appends the canonical encoding of `value` to the data bound to `label`.
	pub fn bind_serialized<T: SerializeBytes + ?Sized>(
		&mut self,
		label: &str,
		value: &T,
	) -> Result<(), Error> {
		let bindings = self.bindings_mut(label)?;
		value.serialize(bindings)?;
		Ok(())
	}

	/// Computes the challenge for `label`.
	///
	/// Every label declared before `label` must already have been computed. The value is cached,
	/// so calling this again returns the same digest.
	pub fn compute_challenge(&mut self, label: &str) -> Result<Output<H>, Error> {
		let index = self.position(label)?;
		if let Some(value) = &self.challenges[index].value {
			return Ok(value.clone());
		}

		let previous = match index {
			0 => None,
			_ => {
				let value = self.challenges[index - 1].value.clone().ok_or_else(|| {
					Error::PreviousChallengeNotComputed {
						label: label.to_string(),
					}
				})?;
				Some(value)
			}
		};

		let challenge = &mut self.challenges[index];
		let mut hasher = H::new();
		hasher.update(challenge.label.as_bytes());
		if let Some(previous) = previous {
			hasher.update(previous);
		}
		hasher.update(&challenge.bindings);
		let value = hasher.finalize();

		trace!(label, n_bound_bytes = challenge.bindings.len(), "computed challenge");
		challenge.value = Some(value.clone());
		Ok(value)
	}

	/// Computes the challenge for `label` and reduces it into a field element.
	pub fn sample_field<F: PrimeField>(&mut self, label: &str) -> Result<F, Error> {
		let challenge = self.compute_challenge(label)?;
		Ok(F::from_bytes_mod_order(&challenge))
	}
}
