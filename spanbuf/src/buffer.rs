// SPDX-License-Identifier: Apache-2.0

//! The buffer contract shared by every buffer in this crate.
//!
//! Data moves through a buffer in two steps. A writer asks for
//! [writable regions](WritableBuffer::writable_regions), fills some prefix of
//! them (usually with a system call), then [commits](WritableBuffer::commit) the
//! number of elements it actually wrote. A reader asks for
//! [readable regions](ReadableBuffer::readable_regions), consumes some prefix,
//! then [discards](ReadableBuffer::discard) it. Nothing is copied in between.
//! [`read`](ReadableBuffer::read) and [`write`](WritableBuffer::write) are
//! copying shorthands built from these steps.
//!
//! Regions borrow the buffer, so they can't outlive the next mutating call:
//!
//! ```compile_fail
//! use spanbuf::{ReadableBuffer, RingBuffer, WritableBuffer};
//!
//! let mut ring = RingBuffer::<u8>::new(4);
//! let regions = ring.readable_regions();
//! ring.write(b"ab");
//! drop(regions);
//! ```

use amplify_derive::Display;
use crate::{Element, Result};
use crate::util::copy_prefix;

/// The fill state of a buffer.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Display)]
pub enum State {
	/// Nothing can be read.
	#[default]
	#[display("empty")]
	Empty,
	/// Some data can be read, and some space can be written.
	#[display("partial")]
	Partial,
	/// Nothing can be written. Only bounded buffers become full.
	#[display("full")]
	Full,
}

impl State {
	pub(crate) fn of(readable: usize, writable: usize) -> Self {
		if readable == 0 {
			Self::Empty
		} else if writable == 0 {
			Self::Full
		} else {
			Self::Partial
		}
	}
}

/// A buffer which data can be read from.
pub trait ReadableBuffer<T: Element> {
	/// The sequence of readable regions.
	type Regions<'a>: IntoIterator<Item = &'a [T]> where Self: 'a;

	/// Returns contiguous regions covering all readable data, oldest first. Empty
	/// regions are never returned.
	fn readable_regions(&self) -> Self::Regions<'_>;

	/// Returns the number of readable elements.
	fn readable_len(&self) -> usize;

	/// Returns `true` if no data can be read.
	fn is_empty(&self) -> bool { self.readable_len() == 0 }

	/// Removes up to `count` elements from the front of the readable data,
	/// returning the number removed.
	fn discard(&mut self, count: usize) -> usize;

	/// Copies readable data into `dst` and discards it, returning the number of
	/// elements read. If this is less than the length of `dst`, the buffer is now
	/// empty.
	fn read(&mut self, dst: &mut [T]) -> usize {
		let mut count = 0;
		for region in self.readable_regions() {
			count += copy_prefix(&mut dst[count..], region);
			if count == dst.len() {
				break
			}
		}
		self.discard(count)
	}
}

/// A buffer which data can be written to.
pub trait WritableBuffer<T: Element> {
	/// The sequence of writable regions.
	type RegionsMut<'a>: IntoIterator<Item = &'a mut [T]> where Self: 'a;

	/// Returns contiguous regions covering writable space, in write order. Writing
	/// into the regions has no effect until the written elements are
	/// [committed](Self::commit).
	fn writable_regions(&mut self) -> Self::RegionsMut<'_>;

	/// Returns the number of elements that can be written without growing.
	fn writable_len(&self) -> usize;

	/// Marks `count` elements at the front of the writable regions as readable,
	/// returning `count`. Committing more than [`writable_len`] is an overrun; the
	/// buffer is left unchanged.
	///
	/// [`writable_len`]: Self::writable_len
	fn try_commit(&mut self, count: usize) -> Result;

	/// Marks `count` elements at the front of the writable regions as readable,
	/// returning `count`.
	///
	/// # Panics
	///
	/// Panics if `count` exceeds the writable space. Committing space that was
	/// never offered is a bug in the caller, which can't be recovered from.
	fn commit(&mut self, count: usize) -> usize {
		match self.try_commit(count) {
			Ok(count) => count,
			Err(error) => panic!("{error}")
		}
	}

	/// Copies as much of `src` as fits into writable space, returning the number
	/// of elements written. The caller is responsible for retrying the rest.
	fn write(&mut self, src: &[T]) -> usize {
		let mut count = 0;
		for region in self.writable_regions() {
			count += copy_prefix(region, &src[count..]);
			if count == src.len() {
				break
			}
		}
		self.commit(count)
	}
}

/// A buffer which can be both read and written.
pub trait Buffer<T: Element>: ReadableBuffer<T> + WritableBuffer<T> {
	/// Discards all data, restoring full writable capacity.
	fn clear(&mut self);
}

#[cfg(test)]
mod test {
	use super::State;

	#[test]
	fn state_of() {
		assert_eq!(State::of(0, 4), State::Empty);
		assert_eq!(State::of(0, 0), State::Empty);
		assert_eq!(State::of(2, 2), State::Partial);
		assert_eq!(State::of(4, 0), State::Full);
		assert_eq!(State::Partial.to_string(), "partial");
	}
}
