use core::fmt;
use core::hash::Hash;

trait Collector: Default + Clone + PartialEq + Eq + Hash {
	fn total_bytes(&self) -> u64;
	fn total_terms(&self) -> u64;
	fn add_term(&mut self, bytes: u64);

	fn io_ops(&self) -> u64;
	fn inc_ops(&mut self);
}

#[allow(unused)]
#[derive(Clone, Default, PartialEq, Eq, Hash)]
struct RealStatistics {
	total_bytes: u64,
	total_terms: u64,
	io_ops: u64,
}

impl Collector for RealStatistics {
	fn total_bytes(&self) -> u64 {
		self.total_bytes
	}

	fn total_terms(&self) -> u64 {
		self.total_terms
	}

	fn add_term(&mut self, bytes: u64) {
		self.total_bytes += bytes;
		self.total_terms += 1;
	}

	fn io_ops(&self) -> u64 {
		self.io_ops
	}

	fn inc_ops(&mut self) {
		self.io_ops += 1;
	}
}

#[allow(unused)]
#[derive(Clone, Default, PartialEq, Eq, Hash)]
struct MockStatistics;

impl Collector for MockStatistics {
	fn total_bytes(&self) -> u64 {
		0
	}

	fn total_terms(&self) -> u64 {
		0
	}

	fn add_term(&mut self, _: u64) {}

	fn io_ops(&self) -> u64 {
		0
	}

	fn inc_ops(&mut self) {}
}

#[cfg(feature = "statistics")]
use self::RealStatistics as StatisticsImpl;

#[cfg(not(feature = "statistics"))]
use self::MockStatistics as StatisticsImpl;

/// Encoding statistic information.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Statistics(StatisticsImpl);

impl Statistics {
	pub(crate) fn new() -> Self {
		Self(StatisticsImpl::default())
	}

	/// Record one successful top-level encode of `bytes` bytes.
	#[inline]
	pub(crate) fn add_term(&mut self, bytes: u64) {
		self.0.add_term(bytes);
	}

	#[inline]
	pub(crate) fn inc_ops(&mut self) {
		self.0.inc_ops();
	}

	/// Returns the number of bytes written by successful encodes, excluding
	/// the version byte.
	#[inline]
	#[must_use]
	pub fn total_bytes(&self) -> u64 {
		self.0.total_bytes()
	}

	/// Returns the number of successful top-level encodes.
	///
	/// A term is counted once no matter how many nested values it contains.
	#[inline]
	#[must_use]
	pub fn total_terms(&self) -> u64 {
		self.0.total_terms()
	}

	/// Returns the number of times the buffer was written out to a sink.
	#[inline]
	#[must_use]
	pub fn io_ops(&self) -> u64 {
		self.0.io_ops()
	}
}

impl fmt::Debug for Statistics {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Statistics")
			.field("total_bytes", &self.total_bytes())
			.field("total_terms", &self.total_terms())
			.field("io_ops", &self.io_ops())
			.finish()
	}
}

#[cfg(all(test, feature = "statistics"))]
mod tests {
	use crate::{Encoder, Term};

	#[test]
	fn test_counts_successful_encodes() {
		let mut encoder = Encoder::new().unwrap();

		encoder.encode_term(&Term::Nil).unwrap();
		encoder.encode_term(&Term::SmallInt(1)).unwrap();
		encoder.encode_term(&Term::Float(f64::NAN)).unwrap_err();

		let stats = encoder.statistics();
		assert_eq!(stats.total_terms(), 2);
		assert_eq!(stats.total_bytes(), 5 + 2);
		assert_eq!(stats.io_ops(), 0);
	}

	#[test]
	fn test_counts_writes() {
		let mut encoder = Encoder::new().unwrap();
		encoder.encode_term(&Term::Nil).unwrap();

		let mut out = alloc::vec::Vec::new();
		encoder.write_to(&mut out).unwrap();
		encoder.write_to(&mut out).unwrap();

		assert_eq!(encoder.statistics().io_ops(), 2);
	}
}
