//! Tag bytes and wire constants of the External Term Format.

use core::fmt;

/// Version byte written once at the start of every encoded stream.
pub const FORMAT_VERSION: u8 = 131;

/// Largest length a String term (tag 107) can carry.
pub const MAX_STRING_LEN: usize = u16::MAX as usize;

/// Largest length any 4-byte length field can carry.
pub const MAX_LEN: usize = u32::MAX as usize;

/// Largest magnitude byte count encoded as a Small Big Integer (tag 110).
///
/// Longer magnitudes are encoded as a Large Big Integer (tag 111).
pub const MAX_SMALL_BIG_LEN: usize = 4;

/// The atom `nil`, used for null and absent values.
pub const NIL: [u8; 5] = [Tag::SmallAtomUtf8 as u8, 3, b'n', b'i', b'l'];

/// The atom `true`.
pub const TRUE: [u8; 6] =
	[Tag::SmallAtomUtf8 as u8, 4, b't', b'r', b'u', b'e'];

/// The atom `false`.
pub const FALSE: [u8; 7] =
	[Tag::SmallAtomUtf8 as u8, 5, b'f', b'a', b'l', b's', b'e'];

/// A one-byte discriminator identifying the term that follows it.
///
/// The table holds every tag this crate knows about, including the ones the
/// encoder never produces, so that a decoder can share it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Tag {
	/// 8 bytes, IEEE-754 double, big-endian.
	NewFloat = 70,
	/// Bit string with a trailing partial byte. Never produced.
	BitBinary = 77,
	/// 1 byte, unsigned.
	SmallInteger = 97,
	/// 4 bytes, big-endian, signed.
	Integer = 98,
	/// Legacy textual float. Never produced.
	Float = 99,
	/// Tuple with a 1-byte arity. Never produced.
	SmallTuple = 104,
	/// Tuple with a 4-byte arity. Never produced.
	LargeTuple = 105,
	/// The empty list.
	Nil = 106,
	/// 2-byte little-endian length followed by raw bytes.
	String = 107,
	/// 4-byte count, elements, then a [`Tag::Nil`] tail.
	List = 108,
	/// 4-byte length followed by raw bytes.
	Binary = 109,
	/// 1-byte magnitude length, sign byte, little-endian magnitude.
	SmallBig = 110,
	/// 4-byte magnitude length, sign byte, little-endian magnitude.
	LargeBig = 111,
	/// 4-byte pair count followed by interleaved keys and values.
	Map = 116,
	/// 2-byte length followed by UTF-8 bytes.
	AtomUtf8 = 118,
	/// 1-byte length followed by UTF-8 bytes.
	SmallAtomUtf8 = 119,
}

impl Tag {
	/// Get the raw byte of this tag.
	#[inline]
	#[must_use]
	pub const fn as_u8(self) -> u8 {
		self as u8
	}
}

impl From<Tag> for u8 {
	#[inline]
	fn from(tag: Tag) -> Self {
		tag.as_u8()
	}
}

/// The error returned when a byte is not a known [`Tag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownTag(pub u8);

impl fmt::Display for UnknownTag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "unknown term tag {}", self.0)
	}
}

impl core::error::Error for UnknownTag {}

impl TryFrom<u8> for Tag {
	type Error = UnknownTag;

	fn try_from(value: u8) -> Result<Self, Self::Error> {
		use Tag as T;

		let tag = match value {
			70 => T::NewFloat,
			77 => T::BitBinary,
			97 => T::SmallInteger,
			98 => T::Integer,
			99 => T::Float,
			104 => T::SmallTuple,
			105 => T::LargeTuple,
			106 => T::Nil,
			107 => T::String,
			108 => T::List,
			109 => T::Binary,
			110 => T::SmallBig,
			111 => T::LargeBig,
			116 => T::Map,
			118 => T::AtomUtf8,
			119 => T::SmallAtomUtf8,
			x => return Err(UnknownTag(x)),
		};

		Ok(tag)
	}
}
