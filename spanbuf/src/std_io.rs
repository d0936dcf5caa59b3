// SPDX-License-Identifier: Apache-2.0

//! Interop with [`std::io`].
//!
//! [`IoBufferExt`] drives readers and writers directly against buffer memory:
//! reads land in writable regions and writes are taken from readable regions,
//! using vectored IO so wrapped or chained regions are transferred in one call.

use std::io;
use std::io::{ErrorKind, IoSlice, IoSliceMut, Read, Write};
use crate::{Buffer, ChainBuffer, Extent, ReadableBuffer, RingBuffer, WritableBuffer};

/// Zero-copy IO between byte buffers and [`Read`]ers or [`Write`]rs.
pub trait IoBufferExt: Buffer<u8> {
	/// Reads from `reader` once, directly into writable space, returning the
	/// number of bytes read. Returns zero if the reader reached its end, or if the
	/// buffer is full.
	fn fill_from_reader<R: Read + ?Sized>(&mut self, reader: &mut R) -> io::Result<usize> {
		loop {
			let result = {
				let mut regions: Vec<IoSliceMut> =
					self.writable_regions()
						.into_iter()
						.map(IoSliceMut::new)
						.collect();
				if regions.is_empty() {
					return Ok(0)
				}
				reader.read_vectored(&mut regions)
			};

			match result {
				Ok(count) => return Ok(self.commit(count)),
				Err(error) if error.kind() == ErrorKind::Interrupted => continue,
				Err(error) => return Err(error)
			}
		}
	}

	/// Reads from `reader` until it reaches its end or the buffer is full,
	/// returning the number of bytes read.
	fn fill_all_from_reader<R: Read + ?Sized>(&mut self, reader: &mut R) -> io::Result<usize> {
		let mut total = 0;
		loop {
			match self.fill_from_reader(reader)? {
				0 => return Ok(total),
				count => total += count
			}
		}
	}

	/// Writes readable data to `writer` once, discarding what was written and
	/// returning its length.
	fn drain_into_writer<W: Write + ?Sized>(&mut self, writer: &mut W) -> io::Result<usize> {
		loop {
			let result = {
				let regions: Vec<IoSlice> =
					self.readable_regions()
						.into_iter()
						.map(IoSlice::new)
						.collect();
				if regions.is_empty() {
					return Ok(0)
				}
				writer.write_vectored(&regions)
			};

			match result {
				Ok(count) => return Ok(self.discard(count)),
				Err(error) if error.kind() == ErrorKind::Interrupted => continue,
				Err(error) => return Err(error)
			}
		}
	}

	/// Writes all readable data to `writer`, returning its length. Fails with
	/// [`ErrorKind::WriteZero`] if the writer stops accepting data.
	fn drain_all_into_writer<W: Write + ?Sized>(&mut self, writer: &mut W) -> io::Result<usize> {
		let mut total = 0;
		while !self.is_empty() {
			match self.drain_into_writer(writer)? {
				0 => return Err(ErrorKind::WriteZero.into()),
				count => total += count
			}
		}
		Ok(total)
	}
}

impl<B: Buffer<u8> + ?Sized> IoBufferExt for B { }

macro_rules! impl_io {
    ($($ty:ident)+) => {
		$(
		impl Read for $ty<u8> {
			fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
				Ok(ReadableBuffer::read(self, buf))
			}
		}

		/// Writes are short when the buffer is full; [`Write::write_all`] fails
		/// with [`ErrorKind::WriteZero`] if it runs out of space.
		impl Write for $ty<u8> {
			fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
				Ok(WritableBuffer::write(self, buf))
			}

			fn flush(&mut self) -> io::Result<()> { Ok(()) }
		}
		)+
	};
}

impl_io! { RingBuffer ChainBuffer Extent }
