//! Configuration for [`Encoder`](crate::Encoder).

use core::fmt;

/// Initial capacity of the output buffer of a new [`Encoder`].
///
/// [`Encoder`]: crate::Encoder
pub const DEFAULT_BUFFER_SIZE: usize = 2048;

/// Default recursion depth budget of a new [`Encoder`].
///
/// [`Encoder`]: crate::Encoder
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Configuration for [`Encoder`].
///
/// Every encoder takes its own copy of the configuration when it is built;
/// changing a [`Config`] afterwards does not affect existing encoders.
///
/// [`Encoder`]: crate::Encoder
#[derive(Clone, PartialEq, Eq)]
#[must_use = "`Config`s don't do anything on their own"]
pub struct Config {
	buffer_size: usize,
	max_depth: usize,
	force_binary_strings: bool,
}

impl Default for Config {
	#[inline]
	fn default() -> Self {
		Self {
			buffer_size: DEFAULT_BUFFER_SIZE,
			max_depth: DEFAULT_MAX_DEPTH,
			force_binary_strings: true,
		}
	}
}

impl Config {
	/// Get the initial capacity of the output buffer.
	#[inline]
	#[must_use]
	pub fn buffer_size(&self) -> usize {
		self.buffer_size
	}

	/// Set the initial capacity of the output buffer.
	///
	/// A buffer handed to the encoder that has less capacity than this is
	/// grown to it before anything is written.
	#[inline]
	pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
		self.buffer_size = buffer_size;
		self
	}

	/// Get the recursion depth budget.
	#[inline]
	#[must_use]
	pub fn max_depth(&self) -> usize {
		self.max_depth
	}

	/// Set the recursion depth budget.
	///
	/// Every step into a nested value (the target of an indirection, a list
	/// element, a map key or value) spends one unit of the budget. A budget
	/// of `0` only allows scalar values at the top level.
	#[inline]
	pub fn with_max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = max_depth;
		self
	}

	/// Check whether text is always encoded as a Binary term.
	#[inline]
	#[must_use]
	pub fn force_binary_strings(&self) -> bool {
		self.force_binary_strings
	}

	/// Encode all text as Binary terms instead of String terms.
	///
	/// When disabled, text shorter than 65536 bytes is encoded as a String
	/// term and longer text still falls back to a Binary term.
	#[inline]
	pub fn with_force_binary_strings(mut self, yes: bool) -> Self {
		self.force_binary_strings = yes;
		self
	}
}

impl fmt::Debug for Config {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Config")
			.field("buffer_size", &self.buffer_size)
			.field("max_depth", &self.max_depth)
			.field("force_binary_strings", &self.force_binary_strings)
			.finish()
	}
}
