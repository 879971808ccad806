//! The closed set of values the encoder understands.

use alloc::borrow::ToOwned;
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::int::Integer;

/// A value ready to be encoded.
///
/// Every variant maps to exactly one term kind of the format, so encoding a
/// [`Term`] never has to guess. Most Rust values convert into a [`Term`] with
/// [`From`]:
///
/// ```
/// use erltf::Term;
///
/// assert_eq!(Term::from(true), Term::Bool(true));
/// assert_eq!(Term::from(200_u8), Term::SmallInt(200));
/// assert_eq!(Term::from(None::<i32>), Term::Nil);
/// assert_eq!(
///     Term::from(vec![1_u8, 2]),
///     Term::List(vec![Term::SmallInt(1), Term::SmallInt(2)]),
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Term {
	/// Null or absent, encoded as the atom `nil`.
	Nil,
	/// Encoded as the atom `true` or `false`.
	Bool(bool),
	/// Encoded as a Small Integer.
	SmallInt(u8),
	/// Encoded as the legacy 4-byte Integer. Conversions never produce this
	/// variant, it must be asked for explicitly.
	FixedInt(i32),
	/// Encoded as a Small or Large Big Integer.
	Int(Integer),
	/// Encoded as a Small or Large Big Integer.
	#[cfg(feature = "bigint")]
	BigInt(malachite::Integer),
	/// Encoded as a New Float. Must be finite.
	Float(f64),
	/// Text. Encoded as a String or a Binary depending on the configuration
	/// and its length.
	Str(String),
	/// Encoded as a Binary, regardless of the configuration.
	Binary(Vec<u8>),
	/// Encoded as a List.
	List(Vec<Term>),
	/// Encoded as a Map with the pairs in this order.
	Map(Vec<(String, Term)>),
	/// An indirection to another value. Following it spends one unit of the
	/// depth budget.
	Ref(Box<Term>),
}

impl Term {
	/// Create a term that is encoded as a Binary.
	///
	/// Use this to force binary encoding of text.
	pub fn binary(bytes: impl AsRef<[u8]>) -> Self {
		Self::Binary(bytes.as_ref().to_owned())
	}

	/// Create a List term from anything that yields terms.
	pub fn list<I>(items: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<Term>,
	{
		Self::List(items.into_iter().map(Into::into).collect())
	}

	/// Create a Map term from anything that yields key/value pairs.
	pub fn map<I, K, V>(pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<Term>,
	{
		Self::Map(
			pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
		)
	}

	/// Create an indirection to `term`.
	pub fn reference(term: impl Into<Term>) -> Self {
		Self::Ref(Box::new(term.into()))
	}

	/// Check whether this is [`Term::Nil`].
	#[must_use]
	pub fn is_nil(&self) -> bool {
		matches!(self, Self::Nil)
	}
}

impl From<()> for Term {
	fn from((): ()) -> Self {
		Self::Nil
	}
}

impl From<bool> for Term {
	fn from(x: bool) -> Self {
		Self::Bool(x)
	}
}

impl From<u8> for Term {
	fn from(x: u8) -> Self {
		Self::SmallInt(x)
	}
}

impl From<Integer> for Term {
	fn from(x: Integer) -> Self {
		Self::Int(x)
	}
}

macro_rules! impl_from_int {
	($($t:ty),*) => {
		$(
			impl From<$t> for Term {
				fn from(x: $t) -> Self {
					Self::Int(Integer::from(x))
				}
			}
		)*
	};
}

impl_from_int!(u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

#[cfg(feature = "bigint")]
impl From<malachite::Integer> for Term {
	fn from(x: malachite::Integer) -> Self {
		Self::BigInt(x)
	}
}

impl From<f32> for Term {
	fn from(x: f32) -> Self {
		Self::Float(f64::from(x))
	}
}

impl From<f64> for Term {
	fn from(x: f64) -> Self {
		Self::Float(x)
	}
}

impl From<char> for Term {
	fn from(x: char) -> Self {
		let mut buf = [0u8; 4];
		Self::Str(x.encode_utf8(&mut buf).to_owned())
	}
}

impl From<&str> for Term {
	fn from(x: &str) -> Self {
		Self::Str(x.to_owned())
	}
}

impl From<String> for Term {
	fn from(x: String) -> Self {
		Self::Str(x)
	}
}

impl<T: Into<Term>> From<Vec<T>> for Term {
	fn from(x: Vec<T>) -> Self {
		Self::list(x)
	}
}

impl<T: Into<Term>> From<Option<T>> for Term {
	fn from(x: Option<T>) -> Self {
		match x {
			Some(x) => Self::reference(x),
			None => Self::Nil,
		}
	}
}

impl<T: Into<Term>> From<Box<T>> for Term {
	fn from(x: Box<T>) -> Self {
		Self::reference(*x)
	}
}

impl<K, V> From<BTreeMap<K, V>> for Term
where
	K: Into<String>,
	V: Into<Term>,
{
	fn from(x: BTreeMap<K, V>) -> Self {
		Self::map(x)
	}
}

#[cfg(feature = "std")]
impl<K, V, S> From<std::collections::HashMap<K, V, S>> for Term
where
	K: Into<String>,
	V: Into<Term>,
{
	fn from(x: std::collections::HashMap<K, V, S>) -> Self {
		Self::map(x)
	}
}
