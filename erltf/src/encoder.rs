//! Module containing the implementation for [`Encoder`].

use alloc::vec::Vec;

use crate::config::Config;
use crate::error::{Error, Length, Unsupported};
use crate::int::Integer;
use crate::statistics::Statistics;
use crate::tag::{
	self, Tag, FORMAT_VERSION, MAX_LEN, MAX_SMALL_BIG_LEN, MAX_STRING_LEN,
};
use crate::term::Term;
use crate::transaction::Transaction;

/// Writes values as External Term Format into an owned buffer.
///
/// The buffer starts with the version byte and every successful call to one
/// of the `encode*` methods appends one term to it. A stream meant for a peer
/// holds exactly one term, so most callers encode once and then take the
/// buffer with [`Encoder::into_inner()`].
///
/// A failed call may leave a partial term at the end of the buffer. Use a
/// [`Transaction`] when the buffer has to stay well-formed.
///
/// An [`Encoder`] must not be shared between concurrent callers. Encoding in
/// parallel requires one encoder per task.
#[derive(Debug, Clone)]
pub struct Encoder {
	buf: Vec<u8>,
	config: Config,
	statistics: Statistics,
}

impl Encoder {
	/// Create a new [`Encoder`] with the default configuration.
	pub fn new() -> Result<Self, Error> {
		Self::builder().build()
	}

	/// Create a new [`Encoder`] that uses `config`.
	pub fn with_config(config: Config) -> Result<Self, Error> {
		Self::builder().config(config).build()
	}

	/// Create a new builder.
	pub fn builder() -> Builder {
		Builder::new()
	}

	/// Get the configuration of this encoder.
	#[inline]
	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Get the bytes written so far, including the version byte.
	#[inline]
	#[must_use]
	pub fn as_bytes(&self) -> &[u8] {
		&self.buf
	}

	/// Consume the encoder and return its buffer.
	#[inline]
	#[must_use]
	pub fn into_inner(self) -> Vec<u8> {
		self.buf
	}

	/// Get statistics on this encoder.
	#[cfg(feature = "statistics")]
	#[inline]
	pub fn statistics(&self) -> &Statistics {
		&self.statistics
	}

	/// Encode `term`.
	///
	/// Returns the number of bytes written.
	pub fn encode_term(&mut self, term: &Term) -> Result<usize, Error> {
		self.entry("term", |enc| {
			let depth = enc.config.max_depth();
			enc.term(term, depth)
		})
	}

	/// Encode `bytes` as a Binary term.
	///
	/// Returns the number of bytes written.
	pub fn encode_binary(&mut self, bytes: &[u8]) -> Result<usize, Error> {
		self.entry("binary", |enc| enc.binary(bytes))
	}

	/// Encode any value that implements [`serde::Serialize`].
	///
	/// Returns the number of bytes written.
	#[cfg(feature = "serde")]
	pub fn encode<T>(&mut self, value: &T) -> Result<usize, Error>
	where
		T: serde::Serialize + ?Sized,
	{
		self.entry("value", |enc| {
			value.serialize(crate::ser::Serializer::new(enc))
		})
	}

	/// Start a [`Transaction`] on this encoder.
	pub fn transaction(&mut self) -> Transaction<'_> {
		Transaction::new(self)
	}

	/// Write the whole buffer to `writer` and flush it.
	pub fn write_to<W>(&mut self, mut writer: W) -> Result<(), W::Error>
	where
		W: crate::io::Write,
	{
		writer.write(&self.buf)?;
		writer.flush()?;
		self.statistics.inc_ops();
		Ok(())
	}

	fn entry<F>(&mut self, what: &str, f: F) -> Result<usize, Error>
	where
		F: FnOnce(&mut Self) -> Result<(), Error>,
	{
		let start = self.buf.len();

		match f(self) {
			Ok(()) => {
				let n = self.buf.len() - start;
				self.statistics.add_term(n as u64);
				log::trace!("encoded {what} into {n} bytes");
				Ok(n)
			},
			Err(e) => {
				log::debug!("failed to encode {what}: {e}");
				Err(e)
			},
		}
	}
}

/// Primitives shared by every front end of the encoder.
///
/// Each primitive either writes one complete header or term, or fails
/// without writing anything.
impl Encoder {
	#[inline]
	pub(crate) fn position(&self) -> usize {
		self.buf.len()
	}

	#[inline]
	pub(crate) fn rewind(&mut self, position: usize) {
		self.buf.truncate(position);
	}

	/// Spend one unit of `depth` to enter a nested value.
	#[inline]
	pub(crate) fn descend(&self, depth: usize) -> Result<usize, Error> {
		depth.checked_sub(1).ok_or(Error::DepthLimit {
			limit: self.config.max_depth(),
		})
	}

	fn put(&mut self, bytes: &[u8]) -> Result<(), Error> {
		self.buf.try_reserve(bytes.len())?;
		self.buf.extend_from_slice(bytes);
		Ok(())
	}

	pub(crate) fn nil(&mut self) -> Result<(), Error> {
		self.put(&tag::NIL)
	}

	pub(crate) fn bool(&mut self, x: bool) -> Result<(), Error> {
		if x {
			self.put(&tag::TRUE)
		} else {
			self.put(&tag::FALSE)
		}
	}

	pub(crate) fn small_int(&mut self, x: u8) -> Result<(), Error> {
		self.put(&[Tag::SmallInteger.as_u8(), x])
	}

	pub(crate) fn fixed_int(&mut self, x: i32) -> Result<(), Error> {
		let [a, b, c, d] = x.to_be_bytes();
		self.put(&[Tag::Integer.as_u8(), a, b, c, d])
	}

	pub(crate) fn int(&mut self, x: Integer) -> Result<(), Error> {
		self.big(x.sign_byte(), x.magnitude_bytes().as_slice())
	}

	/// Write a Big Integer from its sign byte and little-endian magnitude.
	pub(crate) fn big(
		&mut self,
		sign: u8,
		magnitude: &[u8],
	) -> Result<(), Error> {
		let len = magnitude.len();

		if len <= MAX_SMALL_BIG_LEN {
			self.buf.try_reserve(3 + len)?;
			self.buf.extend_from_slice(&[
				Tag::SmallBig.as_u8(),
				len as u8,
				sign,
			]);
		} else {
			let count = check_len(Length::BigInteger, len)?;
			self.buf.try_reserve(6 + len)?;
			self.buf.push(Tag::LargeBig.as_u8());
			self.buf.extend_from_slice(&count.to_be_bytes());
			self.buf.push(sign);
		}

		self.buf.extend_from_slice(magnitude);
		Ok(())
	}

	pub(crate) fn float(&mut self, x: f64) -> Result<(), Error> {
		if !x.is_finite() {
			return Err(Unsupported::NonFiniteFloat.into());
		}

		let mut bytes = [0u8; 9];
		bytes[0] = Tag::NewFloat.as_u8();
		bytes[1..].copy_from_slice(&x.to_bits().to_be_bytes());
		self.put(&bytes)
	}

	/// Write text as a String term, or as a Binary term when the
	/// configuration asks for it or the text is too long for a String.
	pub(crate) fn text(&mut self, s: &str) -> Result<(), Error> {
		if self.config.force_binary_strings() || s.len() > MAX_STRING_LEN {
			return self.binary(s.as_bytes());
		}

		let len = s.len() as u16;

		self.buf.try_reserve(3 + s.len())?;
		self.buf.push(Tag::String.as_u8());
		self.buf.extend_from_slice(&len.to_le_bytes());
		self.buf.extend_from_slice(s.as_bytes());
		Ok(())
	}

	pub(crate) fn binary(&mut self, bytes: &[u8]) -> Result<(), Error> {
		let len = check_len(Length::Binary, bytes.len())?;

		self.buf.try_reserve(5 + bytes.len())?;
		self.buf.push(Tag::Binary.as_u8());
		self.buf.extend_from_slice(&len.to_be_bytes());
		self.buf.extend_from_slice(bytes);
		Ok(())
	}

	/// Write a List header for `len` elements.
	///
	/// Returns the position of the count field for [`Encoder::patch_count()`].
	pub(crate) fn list_header(&mut self, len: usize) -> Result<usize, Error> {
		let count = check_len(Length::List, len)?;
		self.header(Tag::List, count)
	}

	pub(crate) fn list_tail(&mut self) -> Result<(), Error> {
		self.put(&[Tag::Nil.as_u8()])
	}

	/// Write a Map header for `len` pairs.
	///
	/// Returns the position of the count field for [`Encoder::patch_count()`].
	pub(crate) fn map_header(&mut self, len: usize) -> Result<usize, Error> {
		let count = check_len(Length::Map, len)?;
		self.header(Tag::Map, count)
	}

	fn header(&mut self, tag: Tag, count: u32) -> Result<usize, Error> {
		let [a, b, c, d] = count.to_be_bytes();
		self.put(&[tag.as_u8(), a, b, c, d])?;
		Ok(self.buf.len() - 4)
	}

	/// Overwrite the count field written by a header at `at`.
	#[cfg(feature = "serde")]
	pub(crate) fn patch_count(&mut self, at: usize, count: u32) {
		self.buf[at..at + 4].copy_from_slice(&count.to_be_bytes());
	}

	fn term(&mut self, term: &Term, depth: usize) -> Result<(), Error> {
		match term {
			Term::Nil => self.nil(),
			Term::Bool(x) => self.bool(*x),
			Term::SmallInt(x) => self.small_int(*x),
			Term::FixedInt(x) => self.fixed_int(*x),
			Term::Int(x) => self.int(*x),
			#[cfg(feature = "bigint")]
			Term::BigInt(x) => self.big_integer(x),
			Term::Float(x) => self.float(*x),
			Term::Str(x) => self.text(x),
			Term::Binary(x) => self.binary(x),
			Term::List(items) => {
				self.list_header(items.len())?;
				for item in items {
					let depth = self.descend(depth)?;
					self.term(item, depth)?;
				}
				self.list_tail()
			},
			Term::Map(pairs) => {
				self.map_header(pairs.len())?;
				for (key, value) in pairs {
					let depth = self.descend(depth)?;
					self.text(key)?;
					self.term(value, depth)?;
				}
				Ok(())
			},
			Term::Ref(inner) => {
				let depth = self.descend(depth)?;
				self.term(inner, depth)
			},
		}
	}
}

/// Check that `len` fits in a 4-byte length field.
pub(crate) fn check_len(kind: Length, len: usize) -> Result<u32, Error> {
	if len > MAX_LEN {
		return Err(Error::TooLarge { kind, len });
	}

	Ok(len as u32)
}

/// A builder that when completed will return an [`Encoder`].
#[derive(Debug, Clone, Default)]
pub struct Builder {
	buffer: Option<Vec<u8>>,
	config: Config,
}

impl Builder {
	/// Create a new [`Builder`] with the default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Use this buffer for output.
	///
	/// Bytes already in `buffer` are kept and the version byte is appended
	/// after them. If the buffer has less capacity than the configured
	/// buffer size, it is grown first.
	pub fn buffer(mut self, buffer: Vec<u8>) -> Self {
		self.buffer = Some(buffer);
		self
	}

	/// Use this configuration.
	pub fn config(mut self, config: Config) -> Self {
		self.config = config;
		self
	}

	/// Finalize the builder and build an [`Encoder`].
	///
	/// Fails only if the version byte cannot be written.
	pub fn build(self) -> Result<Encoder, Error> {
		let Self { buffer, config } = self;

		let mut buf = buffer.unwrap_or_default();
		buf.try_reserve(config.buffer_size().saturating_sub(buf.len()))?;

		let mut encoder =
			Encoder { buf, config, statistics: Statistics::new() };
		encoder.put(&[FORMAT_VERSION])?;

		log::trace!(
			"created encoder with a {} byte buffer",
			encoder.buf.capacity()
		);
		Ok(encoder)
	}
}

#[cfg(feature = "std")]
mod std_impl {
	use super::*;

	use std::io;

	/// Every call to [`write()`](io::Write::write) encodes the given bytes as
	/// one Binary term.
	impl io::Write for Encoder {
		fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
			self.encode_binary(buf)
				.map(|_| buf.len())
				.map_err(io::Error::other)
		}

		fn flush(&mut self) -> io::Result<()> {
			Ok(())
		}
	}
}
