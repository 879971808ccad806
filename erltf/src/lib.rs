#![doc = include_str!("../README.md")]
#![allow(
	unknown_lints,
	clippy::new_without_default,
	clippy::needless_doctest_main
)]
#![warn(
	clippy::all,
	clippy::style,
	clippy::cargo,
	clippy::perf,
	clippy::correctness,
	clippy::complexity,
	clippy::deprecated,
	clippy::missing_doc_code_examples,
	clippy::missing_panics_doc,
	clippy::missing_safety_doc,
	clippy::cast_lossless,
	clippy::cast_possible_wrap,
	clippy::useless_conversion,
	clippy::wrong_self_convention,
	rustdoc::all,
	rustdoc::broken_intra_doc_links
)]
#![deny(missing_docs)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod encoder;
mod int;
mod statistics;
mod term;
mod transaction;

pub mod config;
pub mod error;
pub mod io;
pub mod tag;

cfg_if::cfg_if! {
	if #[cfg(feature = "serde")] {
		mod ser;

		pub use self::ser::{AsBinary, Serializer};
	}
}

#[cfg(feature = "bigint")]
mod bigint;

#[cfg(feature = "statistics")]
pub use self::statistics::Statistics;

pub use self::config::Config;
pub use self::encoder::{Builder, Encoder};
pub use self::error::{Error, Length, Unsupported, WriteError};
pub use self::int::{Integer, MagnitudeBytes};
pub use self::tag::{Tag, FORMAT_VERSION};
pub use self::term::Term;
pub use self::transaction::Transaction;

use alloc::vec::Vec;

/// Encode `term` into a new buffer with the default configuration.
///
/// # Example
/// ```
/// use erltf::Term;
///
/// let bytes = erltf::term_to_vec(&Term::Bool(true)).unwrap();
/// assert_eq!(bytes, [131, 119, 4, b't', b'r', b'u', b'e']);
/// ```
pub fn term_to_vec(term: &Term) -> Result<Vec<u8>, Error> {
	let mut encoder = Encoder::new()?;
	encoder.encode_term(term)?;
	Ok(encoder.into_inner())
}

/// Encode `value` into a new buffer with the default configuration.
///
/// # Example
/// ```
/// let bytes = erltf::to_vec(&200_u8).unwrap();
/// assert_eq!(bytes, [131, 97, 200]);
/// ```
#[cfg(feature = "serde")]
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>, Error>
where
	T: serde::Serialize + ?Sized,
{
	to_vec_with_config(value, Config::default())
}

/// Encode `value` into a new buffer with `config`.
///
/// # Example
/// ```
/// use erltf::Config;
///
/// let config = Config::default().with_force_binary_strings(false);
/// let bytes = erltf::to_vec_with_config("ok", config).unwrap();
/// assert_eq!(bytes, [131, 107, 2, 0, b'o', b'k']);
/// ```
#[cfg(feature = "serde")]
pub fn to_vec_with_config<T>(value: &T, config: Config) -> Result<Vec<u8>, Error>
where
	T: serde::Serialize + ?Sized,
{
	let mut encoder = Encoder::with_config(config)?;
	encoder.encode(value)?;
	Ok(encoder.into_inner())
}

/// Encode `value` and write it to `writer`.
///
/// Nothing is written if `value` cannot be encoded.
///
/// # Example
/// ```no_run
/// use std::net::TcpStream;
///
/// let conn = TcpStream::connect("127.0.0.1:1234").unwrap();
///
/// erltf::to_writer(conn, &[1_u8, 2, 3]).unwrap();
/// ```
#[cfg(all(feature = "std", feature = "serde"))]
pub fn to_writer<W, T>(
	writer: W,
	value: &T,
) -> Result<(), WriteError<std::io::Error>>
where
	W: std::io::Write,
	T: serde::Serialize + ?Sized,
{
	let mut encoder = Encoder::new()?;
	encoder.encode(value)?;
	encoder.write_to(io::Std(writer)).map_err(WriteError::Io)
}
