//! All-or-nothing encoding over an [`Encoder`]'s buffer.

use core::ops::{Deref, DerefMut};

use crate::encoder::Encoder;

/// An all-or-nothing section of an [`Encoder`]'s output.
///
/// Everything encoded through the transaction stays in the buffer only if
/// the transaction is [`commit()`]ed. Dropping it without committing removes
/// every byte written since it started, including partial terms left by
/// failed calls.
///
/// ```
/// use erltf::{Encoder, Term};
///
/// let mut encoder = Encoder::new().unwrap();
///
/// let mut tx = encoder.transaction();
/// tx.encode_term(&Term::from(vec![f64::NAN])).unwrap_err();
/// drop(tx);
///
/// assert_eq!(encoder.as_bytes(), [131]);
/// ```
///
/// [`commit()`]: Transaction::commit
#[derive(Debug)]
#[must_use = "transactions are rolled back unless they are `.commit()`ed"]
pub struct Transaction<'a> {
	encoder: &'a mut Encoder,
	checkpoint: usize,
	committed: bool,
}

impl<'a> Transaction<'a> {
	pub(crate) fn new(encoder: &'a mut Encoder) -> Self {
		let checkpoint = encoder.position();
		Self { encoder, checkpoint, committed: false }
	}

	/// Keep everything written during the transaction.
	///
	/// Returns the number of bytes the transaction added.
	pub fn commit(mut self) -> usize {
		self.committed = true;
		self.encoder.position() - self.checkpoint
	}

	/// Discard everything written during the transaction.
	pub fn rollback(self) {}
}

impl Deref for Transaction<'_> {
	type Target = Encoder;

	fn deref(&self) -> &Self::Target {
		self.encoder
	}
}

impl DerefMut for Transaction<'_> {
	fn deref_mut(&mut self) -> &mut Self::Target {
		self.encoder
	}
}

impl Drop for Transaction<'_> {
	fn drop(&mut self) {
		if !self.committed {
			let n = self.encoder.position() - self.checkpoint;
			self.encoder.rewind(self.checkpoint);
			log::trace!("rolled back {n} bytes");
		}
	}
}
