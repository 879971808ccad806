//! Encoding of any [`serde::Serialize`] value.
//!
//! Serde's data model maps onto terms as follows:
//!
//! | Serde                                   | Term                             |
//! |-----------------------------------------|----------------------------------|
//! | `bool`                                  | the atom `true` or `false`       |
//! | `u8`                                    | Small Integer                    |
//! | every other integer                     | Small or Large Big Integer       |
//! | `f32`, `f64`                            | New Float                        |
//! | `char`, `str`                           | String or Binary                 |
//! | bytes                                   | Binary                           |
//! | `None`, `()`, unit struct               | the atom `nil`                   |
//! | `Some`, newtype struct                  | the inner value                  |
//! | sequence, tuple, tuple struct           | List                             |
//! | map, struct                             | Map                              |
//! | unit variant                            | its name as text                 |
//! | newtype, tuple or struct variant        | Map of one pair, `{name: value}` |
//!
//! Map keys must serialize as text. Fields skipped with `#[serde(skip)]` or
//! `#[serde(skip_serializing_if = "...")]` are left out of the Map and its
//! count.

use serde::ser::{self, Impossible, Serialize};

use crate::encoder::{check_len, Encoder};
use crate::error::{Error, Length, Unsupported};
use crate::int::Integer;

/// A [`serde::Serializer`] that writes into an [`Encoder`].
///
/// Most callers want [`Encoder::encode()`] instead, which also keeps the
/// encoder's statistics and logs the outcome.
#[derive(Debug)]
pub struct Serializer<'a> {
	encoder: &'a mut Encoder,
	depth: usize,
}

impl<'a> Serializer<'a> {
	/// Create a new [`Serializer`] with the full depth budget of `encoder`.
	pub fn new(encoder: &'a mut Encoder) -> Self {
		let depth = encoder.config().max_depth();
		Self { encoder, depth }
	}

	fn variant_header(&mut self, variant: &str) -> Result<usize, Error> {
		let depth = self.encoder.descend(self.depth)?;
		self.encoder.map_header(1)?;
		self.encoder.text(variant)?;
		Ok(depth)
	}
}

impl<'a> ser::Serializer for Serializer<'a> {
	type Ok = ();
	type Error = Error;

	type SerializeSeq = Compound<'a>;
	type SerializeTuple = Compound<'a>;
	type SerializeTupleStruct = Compound<'a>;
	type SerializeTupleVariant = Compound<'a>;
	type SerializeMap = Compound<'a>;
	type SerializeStruct = Compound<'a>;
	type SerializeStructVariant = Compound<'a>;

	fn serialize_bool(self, v: bool) -> Result<(), Error> {
		self.encoder.bool(v)
	}

	fn serialize_i8(self, v: i8) -> Result<(), Error> {
		self.encoder.int(Integer::from(v))
	}

	fn serialize_i16(self, v: i16) -> Result<(), Error> {
		self.encoder.int(Integer::from(v))
	}

	fn serialize_i32(self, v: i32) -> Result<(), Error> {
		self.encoder.int(Integer::from(v))
	}

	fn serialize_i64(self, v: i64) -> Result<(), Error> {
		self.encoder.int(Integer::from(v))
	}

	fn serialize_i128(self, v: i128) -> Result<(), Error> {
		self.encoder.int(Integer::from(v))
	}

	fn serialize_u8(self, v: u8) -> Result<(), Error> {
		self.encoder.small_int(v)
	}

	fn serialize_u16(self, v: u16) -> Result<(), Error> {
		self.encoder.int(Integer::from(v))
	}

	fn serialize_u32(self, v: u32) -> Result<(), Error> {
		self.encoder.int(Integer::from(v))
	}

	fn serialize_u64(self, v: u64) -> Result<(), Error> {
		self.encoder.int(Integer::from(v))
	}

	fn serialize_u128(self, v: u128) -> Result<(), Error> {
		self.encoder.int(Integer::from(v))
	}

	fn serialize_f32(self, v: f32) -> Result<(), Error> {
		self.encoder.float(f64::from(v))
	}

	fn serialize_f64(self, v: f64) -> Result<(), Error> {
		self.encoder.float(v)
	}

	fn serialize_char(self, v: char) -> Result<(), Error> {
		self.encoder.text(v.encode_utf8(&mut [0u8; 4]))
	}

	fn serialize_str(self, v: &str) -> Result<(), Error> {
		self.encoder.text(v)
	}

	fn serialize_bytes(self, v: &[u8]) -> Result<(), Error> {
		self.encoder.binary(v)
	}

	fn serialize_none(self) -> Result<(), Error> {
		self.encoder.nil()
	}

	fn serialize_some<T>(self, value: &T) -> Result<(), Error>
	where
		T: ?Sized + Serialize,
	{
		let depth = self.encoder.descend(self.depth)?;
		value.serialize(Serializer { encoder: self.encoder, depth })
	}

	fn serialize_unit(self) -> Result<(), Error> {
		self.encoder.nil()
	}

	fn serialize_unit_struct(self, _: &'static str) -> Result<(), Error> {
		self.encoder.nil()
	}

	fn serialize_unit_variant(
		self,
		_: &'static str,
		_: u32,
		variant: &'static str,
	) -> Result<(), Error> {
		self.encoder.text(variant)
	}

	fn serialize_newtype_struct<T>(
		self,
		_: &'static str,
		value: &T,
	) -> Result<(), Error>
	where
		T: ?Sized + Serialize,
	{
		let depth = self.encoder.descend(self.depth)?;
		value.serialize(Serializer { encoder: self.encoder, depth })
	}

	fn serialize_newtype_variant<T>(
		mut self,
		_: &'static str,
		_: u32,
		variant: &'static str,
		value: &T,
	) -> Result<(), Error>
	where
		T: ?Sized + Serialize,
	{
		let depth = self.variant_header(variant)?;
		value.serialize(Serializer { encoder: self.encoder, depth })
	}

	fn serialize_seq(
		self,
		len: Option<usize>,
	) -> Result<Compound<'a>, Error> {
		Compound::list(self.encoder, self.depth, len.unwrap_or(0))
	}

	fn serialize_tuple(self, len: usize) -> Result<Compound<'a>, Error> {
		Compound::list(self.encoder, self.depth, len)
	}

	fn serialize_tuple_struct(
		self,
		_: &'static str,
		len: usize,
	) -> Result<Compound<'a>, Error> {
		Compound::list(self.encoder, self.depth, len)
	}

	fn serialize_tuple_variant(
		mut self,
		_: &'static str,
		_: u32,
		variant: &'static str,
		len: usize,
	) -> Result<Compound<'a>, Error> {
		check_len(Length::List, len)?;
		let depth = self.variant_header(variant)?;
		Compound::list(self.encoder, depth, len)
	}

	fn serialize_map(
		self,
		len: Option<usize>,
	) -> Result<Compound<'a>, Error> {
		Compound::map(self.encoder, self.depth, len.unwrap_or(0))
	}

	fn serialize_struct(
		self,
		_: &'static str,
		len: usize,
	) -> Result<Compound<'a>, Error> {
		check_fields(len)?;
		Compound::map(self.encoder, self.depth, len)
	}

	fn serialize_struct_variant(
		mut self,
		_: &'static str,
		_: u32,
		variant: &'static str,
		len: usize,
	) -> Result<Compound<'a>, Error> {
		check_fields(len)?;
		let depth = self.variant_header(variant)?;
		Compound::map(self.encoder, depth, len)
	}
}

fn check_fields(count: usize) -> Result<(), Error> {
	match u32::try_from(count) {
		Ok(_) => Ok(()),
		Err(_) => Err(Unsupported::TooManyFields { count }.into()),
	}
}

/// The state of a List or Map being serialized.
///
/// The count in the header is rewritten when the compound ends. A declared
/// length is only checked against the limit of the header, and sequences of
/// unknown length start with a count of zero.
#[derive(Debug)]
pub struct Compound<'a> {
	encoder: &'a mut Encoder,
	depth: usize,
	kind: Length,
	start: usize,
	count_at: usize,
	count: usize,
	/// Set once the compound has been removed from the buffer.
	removed: Option<Error>,
}

impl<'a> Compound<'a> {
	fn list(
		encoder: &'a mut Encoder,
		depth: usize,
		len: usize,
	) -> Result<Self, Error> {
		let start = encoder.position();
		let count_at = encoder.list_header(len)?;
		Ok(Self {
			encoder,
			depth,
			kind: Length::List,
			start,
			count_at,
			count: 0,
			removed: None,
		})
	}

	fn map(
		encoder: &'a mut Encoder,
		depth: usize,
		len: usize,
	) -> Result<Self, Error> {
		let start = encoder.position();
		let count_at = encoder.map_header(len)?;
		Ok(Self {
			encoder,
			depth,
			kind: Length::Map,
			start,
			count_at,
			count: 0,
			removed: None,
		})
	}

	/// Fail with the original error if the compound is no longer in the
	/// buffer.
	fn check(&self) -> Result<(), Error> {
		match &self.removed {
			Some(e) => Err(e.clone()),
			None => Ok(()),
		}
	}

	fn child<T>(&mut self, value: &T) -> Result<(), Error>
	where
		T: ?Sized + Serialize,
	{
		self.check()?;
		let depth = self.encoder.descend(self.depth)?;
		value.serialize(Serializer { encoder: &mut *self.encoder, depth })
	}

	fn element<T>(&mut self, value: &T) -> Result<(), Error>
	where
		T: ?Sized + Serialize,
	{
		self.child(value)?;
		self.count += 1;
		Ok(())
	}

	/// Write a map key. A key that is not text removes the whole map from
	/// the buffer.
	fn key<T>(&mut self, key: &T) -> Result<(), Error>
	where
		T: ?Sized + Serialize,
	{
		self.check()?;

		let result = match self.encoder.descend(self.depth) {
			Ok(_) => {
				key.serialize(KeySerializer { encoder: &mut *self.encoder })
			},
			Err(e) => Err(e),
		};

		if let Err(e) = &result {
			self.encoder.rewind(self.start);
			self.removed = Some(e.clone());
		}

		result
	}

	fn field<T>(&mut self, key: &'static str, value: &T) -> Result<(), Error>
	where
		T: ?Sized + Serialize,
	{
		self.check()?;
		self.encoder.descend(self.depth)?;
		self.encoder.text(key)?;
		self.element(value)
	}

	fn finish(self) -> Result<(), Error> {
		self.check()?;

		let Ok(count) = u32::try_from(self.count) else {
			self.encoder.rewind(self.start);
			return Err(Error::TooLarge { kind: self.kind, len: self.count });
		};

		self.encoder.patch_count(self.count_at, count);

		match self.kind {
			Length::List => self.encoder.list_tail(),
			_ => Ok(()),
		}
	}
}

impl ser::SerializeSeq for Compound<'_> {
	type Ok = ();
	type Error = Error;

	fn serialize_element<T>(&mut self, value: &T) -> Result<(), Error>
	where
		T: ?Sized + Serialize,
	{
		self.element(value)
	}

	fn end(self) -> Result<(), Error> {
		self.finish()
	}
}

impl ser::SerializeTuple for Compound<'_> {
	type Ok = ();
	type Error = Error;

	fn serialize_element<T>(&mut self, value: &T) -> Result<(), Error>
	where
		T: ?Sized + Serialize,
	{
		self.element(value)
	}

	fn end(self) -> Result<(), Error> {
		self.finish()
	}
}

impl ser::SerializeTupleStruct for Compound<'_> {
	type Ok = ();
	type Error = Error;

	fn serialize_field<T>(&mut self, value: &T) -> Result<(), Error>
	where
		T: ?Sized + Serialize,
	{
		self.element(value)
	}

	fn end(self) -> Result<(), Error> {
		self.finish()
	}
}

impl ser::SerializeTupleVariant for Compound<'_> {
	type Ok = ();
	type Error = Error;

	fn serialize_field<T>(&mut self, value: &T) -> Result<(), Error>
	where
		T: ?Sized + Serialize,
	{
		self.element(value)
	}

	fn end(self) -> Result<(), Error> {
		self.finish()
	}
}

impl ser::SerializeMap for Compound<'_> {
	type Ok = ();
	type Error = Error;

	fn serialize_key<T>(&mut self, key: &T) -> Result<(), Error>
	where
		T: ?Sized + Serialize,
	{
		self.key(key)
	}

	fn serialize_value<T>(&mut self, value: &T) -> Result<(), Error>
	where
		T: ?Sized + Serialize,
	{
		self.element(value)
	}

	fn end(self) -> Result<(), Error> {
		self.finish()
	}
}

impl ser::SerializeStruct for Compound<'_> {
	type Ok = ();
	type Error = Error;

	fn serialize_field<T>(
		&mut self,
		key: &'static str,
		value: &T,
	) -> Result<(), Error>
	where
		T: ?Sized + Serialize,
	{
		self.field(key, value)
	}

	fn end(self) -> Result<(), Error> {
		self.finish()
	}
}

impl ser::SerializeStructVariant for Compound<'_> {
	type Ok = ();
	type Error = Error;

	fn serialize_field<T>(
		&mut self,
		key: &'static str,
		value: &T,
	) -> Result<(), Error>
	where
		T: ?Sized + Serialize,
	{
		self.field(key, value)
	}

	fn end(self) -> Result<(), Error> {
		self.finish()
	}
}

/// Serializer for map keys. Only text is accepted.
struct KeySerializer<'a> {
	encoder: &'a mut Encoder,
}

fn non_text_key<T>() -> Result<T, Error> {
	Err(Unsupported::NonTextKey.into())
}

impl ser::Serializer for KeySerializer<'_> {
	type Ok = ();
	type Error = Error;

	type SerializeSeq = Impossible<(), Error>;
	type SerializeTuple = Impossible<(), Error>;
	type SerializeTupleStruct = Impossible<(), Error>;
	type SerializeTupleVariant = Impossible<(), Error>;
	type SerializeMap = Impossible<(), Error>;
	type SerializeStruct = Impossible<(), Error>;
	type SerializeStructVariant = Impossible<(), Error>;

	fn serialize_str(self, v: &str) -> Result<(), Error> {
		self.encoder.text(v)
	}

	fn serialize_char(self, v: char) -> Result<(), Error> {
		self.encoder.text(v.encode_utf8(&mut [0u8; 4]))
	}

	fn serialize_unit_variant(
		self,
		_: &'static str,
		_: u32,
		variant: &'static str,
	) -> Result<(), Error> {
		self.encoder.text(variant)
	}

	fn serialize_newtype_struct<T>(
		self,
		_: &'static str,
		value: &T,
	) -> Result<(), Error>
	where
		T: ?Sized + Serialize,
	{
		value.serialize(self)
	}

	fn serialize_bool(self, _: bool) -> Result<(), Error> {
		non_text_key()
	}

	fn serialize_i8(self, _: i8) -> Result<(), Error> {
		non_text_key()
	}

	fn serialize_i16(self, _: i16) -> Result<(), Error> {
		non_text_key()
	}

	fn serialize_i32(self, _: i32) -> Result<(), Error> {
		non_text_key()
	}

	fn serialize_i64(self, _: i64) -> Result<(), Error> {
		non_text_key()
	}

	fn serialize_i128(self, _: i128) -> Result<(), Error> {
		non_text_key()
	}

	fn serialize_u8(self, _: u8) -> Result<(), Error> {
		non_text_key()
	}

	fn serialize_u16(self, _: u16) -> Result<(), Error> {
		non_text_key()
	}

	fn serialize_u32(self, _: u32) -> Result<(), Error> {
		non_text_key()
	}

	fn serialize_u64(self, _: u64) -> Result<(), Error> {
		non_text_key()
	}

	fn serialize_u128(self, _: u128) -> Result<(), Error> {
		non_text_key()
	}

	fn serialize_f32(self, _: f32) -> Result<(), Error> {
		non_text_key()
	}

	fn serialize_f64(self, _: f64) -> Result<(), Error> {
		non_text_key()
	}

	fn serialize_bytes(self, _: &[u8]) -> Result<(), Error> {
		non_text_key()
	}

	fn serialize_none(self) -> Result<(), Error> {
		non_text_key()
	}

	fn serialize_some<T>(self, _: &T) -> Result<(), Error>
	where
		T: ?Sized + Serialize,
	{
		non_text_key()
	}

	fn serialize_unit(self) -> Result<(), Error> {
		non_text_key()
	}

	fn serialize_unit_struct(self, _: &'static str) -> Result<(), Error> {
		non_text_key()
	}

	fn serialize_newtype_variant<T>(
		self,
		_: &'static str,
		_: u32,
		_: &'static str,
		_: &T,
	) -> Result<(), Error>
	where
		T: ?Sized + Serialize,
	{
		non_text_key()
	}

	fn serialize_seq(
		self,
		_: Option<usize>,
	) -> Result<Self::SerializeSeq, Error> {
		non_text_key()
	}

	fn serialize_tuple(self, _: usize) -> Result<Self::SerializeTuple, Error> {
		non_text_key()
	}

	fn serialize_tuple_struct(
		self,
		_: &'static str,
		_: usize,
	) -> Result<Self::SerializeTupleStruct, Error> {
		non_text_key()
	}

	fn serialize_tuple_variant(
		self,
		_: &'static str,
		_: u32,
		_: &'static str,
		_: usize,
	) -> Result<Self::SerializeTupleVariant, Error> {
		non_text_key()
	}

	fn serialize_map(
		self,
		_: Option<usize>,
	) -> Result<Self::SerializeMap, Error> {
		non_text_key()
	}

	fn serialize_struct(
		self,
		_: &'static str,
		_: usize,
	) -> Result<Self::SerializeStruct, Error> {
		non_text_key()
	}

	fn serialize_struct_variant(
		self,
		_: &'static str,
		_: u32,
		_: &'static str,
		_: usize,
	) -> Result<Self::SerializeStructVariant, Error> {
		non_text_key()
	}
}

/// A wrapper that always encodes its contents as a Binary term.
///
/// Text is encoded as a String term when the encoder is configured to do so.
/// Wrap a field in [`AsBinary`] to keep it a Binary regardless.
///
/// ```
/// use erltf::{AsBinary, Config, Encoder};
///
/// let config = Config::default().with_force_binary_strings(false);
/// let mut encoder = Encoder::with_config(config).unwrap();
///
/// encoder.encode(&AsBinary("id")).unwrap();
/// assert_eq!(encoder.as_bytes(), [131, 109, 0, 0, 0, 2, b'i', b'd']);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AsBinary<T>(pub T);

impl<T: AsRef<[u8]>> Serialize for AsBinary<T> {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: ser::Serializer,
	{
		serializer.serialize_bytes(self.0.as_ref())
	}
}
