//! Error types for `erltf`.
use core::fmt::{self, Debug, Display};

use alloc::collections::TryReserveError;
use alloc::string::String;

/// The kind of length field that overflowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Length {
	/// Element count of a List term.
	List,
	/// Pair count of a Map term.
	Map,
	/// Byte length of a Binary term.
	Binary,
	/// Magnitude byte count of a Big Integer term.
	BigInteger,
}

impl Display for Length {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::List => f.write_str("list"),
			Self::Map => f.write_str("map"),
			Self::Binary => f.write_str("binary"),
			Self::BigInteger => f.write_str("big integer"),
		}
	}
}

/// A value that has no representation in the term format.
///
/// These are programming mistakes at the call site, see
/// [`Error::is_contract_violation()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Unsupported {
	/// A map key that is not text.
	NonTextKey,
	/// A NaN or infinite float.
	NonFiniteFloat,
	/// A record with more fields than a Map term can hold.
	TooManyFields {
		/// Number of fields the record declared.
		count: usize,
	},
}

impl Display for Unsupported {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::NonTextKey => f.write_str("map keys must be text"),
			Self::NonFiniteFloat => {
				f.write_str("floats must be finite")
			},
			Self::TooManyFields { count } => {
				write!(f, "record declares {count} fields")
			},
		}
	}
}

/// The error type returned by [`Encoder`](crate::Encoder).
#[allow(clippy::error_impl_error)]
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
	/// A length does not fit in the field that has to hold it. Nothing of
	/// the offending term was written. This error is recoverable and the
	/// encoder can continue to be used.
	TooLarge {
		/// Which length field overflowed.
		kind: Length,
		/// The length that did not fit.
		len: usize,
	},
	/// The value is nested deeper than the configured depth budget allows.
	/// This is also what cyclic values run into.
	DepthLimit {
		/// The budget the encoder was configured with.
		limit: usize,
	},
	/// The output buffer could not grow to hold the term.
	Buffer(TryReserveError),
	/// The value cannot be represented in the term format.
	///
	/// # Contract violation
	///
	/// This error is **NOT** recoverable. It signals a bug in the calling
	/// code, which must not attempt to encode such values at all.
	Unsupported(Unsupported),
	/// A [`Serialize`] implementation reported an error.
	///
	/// [`Serialize`]: https://docs.rs/serde/latest/serde/trait.Serialize.html
	Custom(String),
}

impl Error {
	/// Check whether this error is a contract violation.
	///
	/// Contract violations are bugs in the calling code and should not be
	/// retried or silently handled.
	#[must_use]
	pub fn is_contract_violation(&self) -> bool {
		matches!(self, Self::Unsupported(_))
	}

	/// Check whether this error was caused by a length overflowing its field.
	#[must_use]
	pub fn is_too_large(&self) -> bool {
		matches!(self, Self::TooLarge { .. })
	}

	/// Check whether this error was caused by the depth budget running out.
	#[must_use]
	pub fn is_depth_limit(&self) -> bool {
		matches!(self, Self::DepthLimit { .. })
	}
}

impl From<TryReserveError> for Error {
	fn from(value: TryReserveError) -> Self {
		Self::Buffer(value)
	}
}

impl From<Unsupported> for Error {
	fn from(value: Unsupported) -> Self {
		Self::Unsupported(value)
	}
}

impl Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::TooLarge { kind, len } => {
				write!(f, "{kind} of length {len} is too large")
			},
			Self::DepthLimit { limit } => {
				write!(f, "recursion limit of {limit} exceeded")
			},
			Self::Buffer(e) => write!(f, "{e}"),
			Self::Unsupported(e) => {
				write!(f, "unsupported value: {e}")
			},
			Self::Custom(msg) => f.write_str(msg),
		}
	}
}

impl core::error::Error for Error {}

#[cfg(feature = "serde")]
impl serde::ser::Error for Error {
	fn custom<T: Display>(msg: T) -> Self {
		use alloc::string::ToString;

		Self::Custom(msg.to_string())
	}
}

/// The error type returned by operations that also write the encoded bytes
/// to a sink.
#[derive(Debug)]
#[non_exhaustive]
pub enum WriteError<Io> {
	/// The value could not be encoded. Nothing was written to the sink.
	Encode(Error),
	/// The sink returned an error while the encoded bytes were being written
	/// to it. The sink may have received part of the bytes.
	Io(Io),
}

impl<Io> From<Error> for WriteError<Io> {
	fn from(value: Error) -> Self {
		Self::Encode(value)
	}
}

impl<Io: Display> Display for WriteError<Io> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		use WriteError as A;
		match self {
			A::Encode(e) => write!(f, "{e}"),
			A::Io(e) => write!(f, "{e}"),
		}
	}
}

impl<Io: Debug + Display> core::error::Error for WriteError<Io> {}
