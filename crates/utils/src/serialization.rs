// Copyright 2024-2025 Irreducible Inc.

use bytes::{Buf, BufMut};
use generic_array::{ArrayLength, GenericArray};

#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
	#[error("Write buffer is full")]
	WriteBufferFull,
	#[error("Not enough data in read buffer to deserialize")]
	NotEnoughBytes,
	#[error("Value is not a canonical encoding of a field element")]
	NonCanonicalFieldElement,
	#[error("Length prefix {len} exceeds the remaining {remaining} bytes")]
	LengthPrefixTooLarge { len: usize, remaining: usize },
	#[error("Length prefix {0} does not fit in usize")]
	LengthOverflow(u64),
}

/// Represents type that can be serialized to a byte buffer.
pub trait SerializeBytes {
	fn serialize(&self, write_buf: impl BufMut) -> Result<(), Error>;
}

/// Represents type that can be deserialized from a byte buffer.
pub trait DeserializeBytes {
	fn deserialize(read_buf: impl Buf) -> Result<Self, Error>
	where
		Self: Sized;
}

impl<N: ArrayLength<u8>> SerializeBytes for GenericArray<u8, N> {
	fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), Error> {
		if write_buf.remaining_mut() < N::USIZE {
			return Err(Error::WriteBufferFull);
		}
		write_buf.put_slice(self);
		Ok(())
	}
}

impl<N: ArrayLength<u8>> DeserializeBytes for GenericArray<u8, N> {
	fn deserialize(mut read_buf: impl Buf) -> Result<Self, Error> {
		if read_buf.remaining() < N::USIZE {
			return Err(Error::NotEnoughBytes);
		}

		let mut ret = Self::default();
		read_buf.copy_to_slice(&mut ret);
		Ok(ret)
	}
}

impl SerializeBytes for u64 {
	fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), Error> {
		if write_buf.remaining_mut() < 8 {
			return Err(Error::WriteBufferFull);
		}
		write_buf.put_u64_le(*self);
		Ok(())
	}
}

impl DeserializeBytes for u64 {
	fn deserialize(mut read_buf: impl Buf) -> Result<Self, Error> {
		if read_buf.remaining() < 8 {
			return Err(Error::NotEnoughBytes);
		}
		Ok(read_buf.get_u64_le())
	}
}

/// Lengths and indices travel as 8-byte little-endian integers regardless of the platform.
impl SerializeBytes for usize {
	fn serialize(&self, write_buf: impl BufMut) -> Result<(), Error> {
		(*self as u64).serialize(write_buf)
	}
}

impl DeserializeBytes for usize {
	fn deserialize(read_buf: impl Buf) -> Result<Self, Error> {
		let value = u64::deserialize(read_buf)?;
		usize::try_from(value).map_err(|_| Error::LengthOverflow(value))
	}
}

impl<T: SerializeBytes> SerializeBytes for [T] {
	fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), Error> {
		self.len().serialize(&mut write_buf)?;
		for item in self {
			item.serialize(&mut write_buf)?;
		}
		Ok(())
	}
}

impl<T: SerializeBytes> SerializeBytes for Vec<T> {
	fn serialize(&self, write_buf: impl BufMut) -> Result<(), Error> {
		self.as_slice().serialize(write_buf)
	}
}

impl<T: DeserializeBytes> DeserializeBytes for Vec<T> {
	fn deserialize(mut read_buf: impl Buf) -> Result<Self, Error> {
		let len = usize::deserialize(&mut read_buf)?;
		// Every item occupies at least one byte, so this bounds the allocation.
		if len > read_buf.remaining() {
			return Err(Error::LengthPrefixTooLarge {
				len,
				remaining: read_buf.remaining(),
			});
		}
		(0..len).map(|_| T::deserialize(&mut read_buf)).collect()
	}
}

impl<T: SerializeBytes, const N: usize> SerializeBytes for [T; N] {
	fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), Error> {
		for item in self {
			item.serialize(&mut write_buf)?;
		}
		Ok(())
	}
}

impl<T: DeserializeBytes + Copy + Default, const N: usize> DeserializeBytes for [T; N] {
	fn deserialize(mut read_buf: impl Buf) -> Result<Self, Error> {
		let mut ret = [T::default(); N];
		for item in ret.iter_mut() {
			*item = T::deserialize(&mut read_buf)?;
		}
		Ok(ret)
	}
}

#[cfg(test)]
mod tests {
	use generic_array::typenum::U32;
	use rand::{rngs::StdRng, RngCore, SeedableRng};

	use super::*;

	#[test]
	fn test_generic_array_serialize_deserialize() {
		let mut rng = StdRng::seed_from_u64(0);

		let mut data = GenericArray::<u8, U32>::default();
		rng.fill_bytes(&mut data);

		let mut buf = Vec::new();
		data.serialize(&mut buf).unwrap();

		let data_deserialized = GenericArray::<u8, U32>::deserialize(&mut buf.as_slice()).unwrap();
		assert_eq!(data_deserialized, data);
	}

	#[test]
	fn test_vec_length_prefixed() {
		let data = vec![1u64, 2, 0xdead_beef];

		let mut buf = Vec::new();
		data.serialize(&mut buf).unwrap();
		assert_eq!(buf.len(), 8 * 4);
		assert_eq!(&buf[..8], &3u64.to_le_bytes());

		let decoded = Vec::<u64>::deserialize(buf.as_slice()).unwrap();
		assert_eq!(decoded, data);
	}

	#[test]
	fn test_truncated_buffer_is_rejected() {
		let data = vec![7u64; 4];
		let mut buf = Vec::new();
		data.serialize(&mut buf).unwrap();
		buf.truncate(buf.len() - 1);

		assert_eq!(Vec::<u64>::deserialize(buf.as_slice()), Err(Error::NotEnoughBytes));
	}

	#[test]
	fn test_oversized_length_prefix_is_rejected() {
		let mut buf = Vec::new();
		u64::MAX.serialize(&mut buf).unwrap();

		assert!(Vec::<u64>::deserialize(buf.as_slice()).is_err());
	}
}
