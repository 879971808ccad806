//! Arbitrary-magnitude integers backed by [`malachite`].

use alloc::vec::Vec;

use malachite::Integer;

use crate::encoder::Encoder;
use crate::error::Error;

/// Get the sign flag and the minimal little-endian magnitude of `value`.
///
/// Zero has no magnitude bytes.
fn sign_and_magnitude(value: &Integer) -> (bool, Vec<u8>) {
	let negative = *value < Integer::from(0);

	let mut bytes: Vec<u8> = value
		.unsigned_abs_ref()
		.to_limbs_asc()
		.into_iter()
		.flat_map(|limb| limb.to_le_bytes())
		.collect();

	while bytes.last() == Some(&0) {
		bytes.pop();
	}

	(negative, bytes)
}

impl Encoder {
	pub(crate) fn big_integer(&mut self, value: &Integer) -> Result<(), Error> {
		let (negative, magnitude) = sign_and_magnitude(value);
		self.big(u8::from(negative), &magnitude)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	use crate::Term;

	fn reconstruct(negative: bool, magnitude: &[u8]) -> Integer {
		let mut value = Integer::from(0);
		for &byte in magnitude.iter().rev() {
			value = value * Integer::from(256u64) + Integer::from(byte);
		}

		if negative {
			-value
		} else {
			value
		}
	}

	#[test]
	fn test_sign_and_magnitude() {
		assert_eq!(sign_and_magnitude(&Integer::from(0)), (false, vec![]));
		assert_eq!(sign_and_magnitude(&Integer::from(-1)), (true, vec![1]));
		assert_eq!(
			sign_and_magnitude(&Integer::from(0x0102_0304_i64)),
			(false, vec![4, 3, 2, 1])
		);
	}

	#[test]
	fn test_matches_primitive_encoding() {
		for x in [0_i64, 1, -1, 255, 256, -65_536, i64::MAX, i64::MIN] {
			let mut a = Encoder::new().unwrap();
			a.encode_term(&Term::from(Integer::from(x))).unwrap();

			let mut b = Encoder::new().unwrap();
			b.encode_term(&Term::from(x)).unwrap();

			assert_eq!(a.as_bytes(), b.as_bytes(), "{x} encodes differently");
		}
	}

	#[test]
	fn test_five_byte_magnitude_uses_large_tag() {
		let mut encoder = Encoder::new().unwrap();
		encoder.encode_term(&Term::from(Integer::from(u32::MAX))).unwrap();
		assert_eq!(encoder.as_bytes()[1..4], [110, 4, 0]);

		let mut encoder = Encoder::new().unwrap();
		encoder
			.encode_term(&Term::from(Integer::from(1_u64 << 32)))
			.unwrap();
		assert_eq!(
			encoder.as_bytes(),
			[131, 111, 0, 0, 0, 5, 0, 0, 0, 0, 0, 1]
		);
	}

	#[test]
	fn test_huge_magnitude_uses_large_tag() {
		// 2^2048 needs 257 magnitude bytes
		let mut value = Integer::from(1);
		for _ in 0..2048 {
			value = value * Integer::from(2);
		}
		let value = -value;

		let mut encoder = Encoder::new().unwrap();
		encoder.encode_term(&Term::from(value.clone())).unwrap();

		let bytes = encoder.as_bytes();
		assert_eq!(bytes[1..7], [111, 0, 0, 1, 1, 1]);
		assert_eq!(bytes.len(), 7 + 257);
		assert_eq!(reconstruct(true, &bytes[7..]), value);
	}
}
