// Copyright 2023-2025 Irreducible Inc.

use digest::{core_api::Block, Digest};
use sha2::{compress256, digest::Output, Sha256};

use crate::{CompressionFunction, PseudoCompressionFunction};

/// Message hashed to derive the initial state of [`Sha256Compression`].
const COMPRESSION_DOMAIN_SEPARATOR: &[u8] = b"FIBRA SHA-256 COMPRESS";

/// Two-to-one compression of SHA-256 digests for inner Merkle nodes.
///
/// A single block compression over `left || right`, chained from a domain-separated state
/// instead of the standard IV, so an inner node is never the SHA-256 digest of a 64-byte
/// message. State words are read and written big-endian, matching the SHA-256 byte order.
#[derive(Debug, Clone)]
pub struct Sha256Compression {
	chaining_value: [u32; 8],
}

impl Sha256Compression {
	fn state_from_digest(digest: &Output<Sha256>) -> [u32; 8] {
		let mut state = [0u32; 8];
		for (word, chunk) in state.iter_mut().zip(digest.chunks_exact(4)) {
			*word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
		}
		state
	}

	fn digest_from_state(state: &[u32; 8]) -> Output<Sha256> {
		let mut out = Output::<Sha256>::default();
		for (chunk, word) in out.chunks_exact_mut(4).zip(state) {
			chunk.copy_from_slice(&word.to_be_bytes());
		}
		out
	}
}

impl Default for Sha256Compression {
	fn default() -> Self {
		let chaining_value = Self::state_from_digest(&Sha256::digest(COMPRESSION_DOMAIN_SEPARATOR));
		Self { chaining_value }
	}
}

impl PseudoCompressionFunction<Output<Sha256>, 2> for Sha256Compression {
	fn compress(&self, [left, right]: [Output<Sha256>; 2]) -> Output<Sha256> {
		let mut block = Block::<Sha256>::default();
		let (lo, hi) = block.split_at_mut(32);
		lo.copy_from_slice(&left);
		hi.copy_from_slice(&right);

		let mut state = self.chaining_value;
		compress256(&mut state, &[block]);
		Self::digest_from_state(&state)
	}
}

impl CompressionFunction<Output<Sha256>, 2> for Sha256Compression {}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_compression_is_order_sensitive() {
		let compression = Sha256Compression::default();
		let left = Sha256::digest(b"left");
		let right = Sha256::digest(b"right");

		let lr = compression.compress([left, right]);
		let rl = compression.compress([right, left]);
		assert_ne!(lr, rl);
		assert_eq!(lr, compression.compress([left, right]));
	}

	#[test]
	fn test_compression_differs_from_plain_sha256() {
		let compression = Sha256Compression::default();
		let left = Sha256::digest(b"left");
		let right = Sha256::digest(b"right");

		let mut hasher = Sha256::new();
		hasher.update(left);
		hasher.update(right);
		assert_ne!(compression.compress([left, right]), hasher.finalize());
	}

	#[test]
	fn test_compression_known_answers() {
		let compression = Sha256Compression::default();

		let out = compression.compress([Sha256::digest(b"left"), Sha256::digest(b"right")]);
		assert_eq!(
			format!("{out:x}"),
			"982417c86c3d7815aaa23da604f077c54a0bd3aee303b88c007c6094943b7dc9"
		);

		let out = compression.compress([Output::<Sha256>::default(); 2]);
		assert_eq!(
			format!("{out:x}"),
			"e13c4d34fb404e5806ba73e7fc65ef234fcb02b89b74c19a43763ee84893316b"
		);
	}

	#[test]
	fn test_state_words_are_big_endian() {
		let digest = Sha256::digest(b"abc");
		let state = Sha256Compression::state_from_digest(&digest);
		assert_eq!(state[0], 0xba7816bf);
		assert_eq!(Sha256Compression::digest_from_state(&state), digest);
	}
}
