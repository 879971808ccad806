//! Sinks for encoded bytes.

use core::convert::Infallible;

use alloc::boxed::Box;
use alloc::vec::Vec;

/// This trait allows writing encoded bytes to a sink.
///
/// Types implementing this trait are called "writers".
pub trait Write {
	/// Error type for IO operations involving the writer.
	type Error;

	/// Write all of `buf` to the writer.
	///
	/// Implementations must either write every byte of `buf` or return an
	/// error. Partial writes are not reported back to the caller.
	fn write(&mut self, buf: &[u8]) -> Result<(), Self::Error>;

	/// Flush this writer ensuring all bytes reach their destination.
	fn flush(&mut self) -> Result<(), Self::Error>;
}

macro_rules! forward_impl_write {
	($to:ty) => {
		type Error = <$to>::Error;

		fn write(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
			<$to>::write(self, buf)
		}

		fn flush(&mut self) -> Result<(), Self::Error> {
			<$to>::flush(self)
		}
	};
}

impl<T: Write + ?Sized> Write for &mut T {
	forward_impl_write!(T);
}

impl<T: Write + ?Sized> Write for Box<T> {
	forward_impl_write!(T);
}

impl Write for Vec<u8> {
	type Error = Infallible;

	fn write(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
		self.extend_from_slice(buf);
		Ok(())
	}

	fn flush(&mut self) -> Result<(), Self::Error> {
		Ok(())
	}
}

#[cfg(feature = "std")]
mod std_impl {
	use super::Write;

	use std::io::{self, ErrorKind as E};

	/// Wrapper IO type for [`std::io::Write`].
	#[derive(Debug)]
	pub struct Std<T>(pub T);

	impl<T> Std<T> {
		/// Get a reference to the inner writer.
		pub fn get(&self) -> &T {
			&self.0
		}

		/// Get a mutable reference to the inner writer.
		pub fn get_mut(&mut self) -> &mut T {
			&mut self.0
		}

		/// Destruct the wrapper and return the inner writer.
		pub fn into_inner(self) -> T {
			self.0
		}
	}

	impl<T> Write for Std<T>
	where
		T: io::Write,
	{
		type Error = io::Error;

		fn write(&mut self, mut buf: &[u8]) -> Result<(), Self::Error> {
			while !buf.is_empty() {
				match self.0.write(buf) {
					Ok(0) => return Err(io::Error::from(E::WriteZero)),
					Ok(n) => buf = &buf[n..],
					Err(e) if e.kind() == E::Interrupted => continue,
					Err(e) => return Err(e),
				}
			}

			Ok(())
		}

		fn flush(&mut self) -> Result<(), Self::Error> {
			loop {
				match self.0.flush() {
					Ok(()) => break Ok(()),
					Err(e) if e.kind() == E::Interrupted => continue,
					Err(e) => break Err(e),
				}
			}
		}
	}
}

#[cfg(feature = "std")]
pub use self::std_impl::Std;
