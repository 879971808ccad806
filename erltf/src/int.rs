//! Sign and magnitude integers for the Big Integer forms.

/// An integer wider than `u8`, kept as a sign and a magnitude.
///
/// The Big Integer forms store the sign in its own byte rather than in two's
/// complement, so the split is done once, when the integer is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Integer {
	negative: bool,
	magnitude: u128,
}

impl Integer {
	/// Zero.
	pub const ZERO: Self = Self { negative: false, magnitude: 0 };

	/// Create an integer from its sign and magnitude.
	///
	/// A zero magnitude is always non-negative.
	#[inline]
	#[must_use]
	pub const fn new(negative: bool, magnitude: u128) -> Self {
		Self { negative: negative && magnitude != 0, magnitude }
	}

	/// Check whether the integer is below zero.
	#[inline]
	#[must_use]
	pub const fn is_negative(&self) -> bool {
		self.negative
	}

	/// Get the absolute value of the integer.
	#[inline]
	#[must_use]
	pub const fn magnitude(&self) -> u128 {
		self.magnitude
	}

	/// Get the sign byte of the Big Integer forms.
	#[inline]
	#[must_use]
	pub const fn sign_byte(&self) -> u8 {
		self.negative as u8
	}

	/// Get the magnitude as the fewest little-endian bytes that hold it.
	///
	/// Zero has no magnitude bytes.
	#[must_use]
	pub fn magnitude_bytes(&self) -> MagnitudeBytes {
		let bytes = self.magnitude.to_le_bytes();
		let len = bytes.len() - (self.magnitude.leading_zeros() / 8) as usize;
		MagnitudeBytes { bytes, len }
	}
}

/// The little-endian magnitude of an [`Integer`].
#[derive(Debug, Clone, Copy)]
pub struct MagnitudeBytes {
	bytes: [u8; 16],
	len: usize,
}

impl MagnitudeBytes {
	/// Get the magnitude bytes.
	#[inline]
	#[must_use]
	pub fn as_slice(&self) -> &[u8] {
		&self.bytes[..self.len]
	}
}

macro_rules! impl_from_unsigned {
	($($t:ty),*) => {
		$(
			impl From<$t> for Integer {
				#[inline]
				fn from(x: $t) -> Self {
					Self::new(false, x as u128)
				}
			}
		)*
	};
}

macro_rules! impl_from_signed {
	($($t:ty),*) => {
		$(
			impl From<$t> for Integer {
				#[inline]
				fn from(x: $t) -> Self {
					Self::new(x < 0, x.unsigned_abs() as u128)
				}
			}
		)*
	};
}

impl_from_unsigned!(u8, u16, u32, u64, u128, usize);
impl_from_signed!(i8, i16, i32, i64, i128, isize);

#[cfg(test)]
mod tests {
	use super::*;

	fn bytes_of<T: Into<Integer>>(x: T) -> (bool, alloc::vec::Vec<u8>) {
		let x = x.into();
		(x.is_negative(), x.magnitude_bytes().as_slice().to_vec())
	}

	#[test]
	fn test_magnitude_bytes() {
		assert_eq!(bytes_of(0_i32), (false, vec![]));
		assert_eq!(bytes_of(1_u16), (false, vec![1]));
		assert_eq!(bytes_of(-1_i64), (true, vec![1]));
		assert_eq!(bytes_of(256_u32), (false, vec![0, 1]));
		assert_eq!(bytes_of(0x0102_0304_u32), (false, vec![4, 3, 2, 1]));
		assert_eq!(bytes_of(u64::MAX), (false, vec![0xff; 8]));
		assert_eq!(bytes_of(u128::MAX), (false, vec![0xff; 16]));
	}

	#[test]
	fn test_signed_extremes() {
		let (neg, bytes) = bytes_of(i8::MIN);
		assert!(neg, "i8::MIN is negative");
		assert_eq!(bytes, vec![0x80]);

		let (neg, bytes) = bytes_of(i64::MIN);
		assert!(neg, "i64::MIN is negative");
		assert_eq!(bytes, vec![0, 0, 0, 0, 0, 0, 0, 0x80]);

		let (neg, bytes) = bytes_of(i128::MIN);
		assert!(neg, "i128::MIN is negative");
		assert_eq!(bytes.len(), 16);
		assert_eq!(bytes[15], 0x80);
	}

	#[test]
	fn test_no_negative_zero() {
		let x = Integer::new(true, 0);
		assert!(!x.is_negative(), "zero must not be negative");
		assert_eq!(x, Integer::ZERO);
		assert_eq!(x.sign_byte(), 0);
	}
}
