// SPDX-License-Identifier: Apache-2.0

use std::cmp::min;
use std::fmt;
use std::fmt::{Debug, Formatter};
use std::ops::Range;
use all_asserts::debug_assert_le;
use crate::{Buffer, Element, ReadableBuffer, Result, State, WritableBuffer};
use crate::element::zeroed_block;
use crate::error::{check_overrun, Operation};

/// A fixed-capacity, append-only buffer: the building block of a
/// [`ChainBuffer`](crate::ChainBuffer), also usable on its own.
///
/// Data is written to the *write window*, the free space at the tail, and read
/// from the *read window*, the unconsumed data at the head. Space freed by reading
/// isn't reused until the extent is [cleared](Buffer::clear); once both windows
/// are empty, the extent is used up.
pub struct Extent<T: Element = u8> {
	data: Box<[T]>,
	/// The start of the read window.
	offset: usize,
	/// The end of the read window and start of the write window.
	length: usize,
}

impl<T: Element> Extent<T> {
	/// Creates an empty extent of `capacity` elements.
	pub fn new(capacity: usize) -> Self {
		Self {
			data: zeroed_block(capacity),
			offset: 0,
			length: 0,
		}
	}

	/// Returns the total capacity.
	pub fn capacity(&self) -> usize { self.data.len() }

	fn read_range(&self) -> Range<usize> { self.offset..self.length }

	/// Returns the unconsumed data.
	pub fn read_window(&self) -> &[T] { &self.data[self.read_range()] }

	/// Returns the free space at the tail.
	pub fn write_window(&mut self) -> &mut [T] { &mut self.data[self.length..] }

	/// Returns `true` if the write window is empty.
	pub fn is_full(&self) -> bool { self.length == self.data.len() }

	/// Returns `true` if nothing has been written since creation or the last clear.
	pub fn is_fresh(&self) -> bool { self.length == 0 }

	/// Returns `true` if both windows are empty, in which case the extent is of no
	/// further use until cleared.
	pub fn is_dead(&self) -> bool {
		self.offset == self.data.len()
	}

	/// Returns the fill state of the extent.
	pub fn state(&self) -> State {
		State::of(self.readable_len(), self.writable_len())
	}

	/// Grows the read window by up to `count` elements, returning the number
	/// grown.
	pub(crate) fn fill(&mut self, count: usize) -> usize {
		let count = min(count, self.writable_len());
		self.length += count;
		count
	}

	/// Shrinks the read window by up to `count` elements, returning the number
	/// shrunk.
	pub(crate) fn consume(&mut self, count: usize) -> usize {
		let count = min(count, self.readable_len());
		self.offset += count;
		debug_assert_le!(self.offset, self.length);
		count
	}
}

impl<T: Element> Debug for Extent<T> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Extent")
			.field("capacity", &self.capacity())
			.field("offset", &self.offset)
			.field("length", &self.length)
			.finish_non_exhaustive()
	}
}

impl<T: Element> ReadableBuffer<T> for Extent<T> {
	type Regions<'a> = Option<&'a [T]>;

	fn readable_regions(&self) -> Option<&[T]> {
		Some(self.read_window()).filter(|w| !w.is_empty())
	}

	fn readable_len(&self) -> usize { self.length - self.offset }

	fn discard(&mut self, count: usize) -> usize {
		self.consume(count)
	}

	fn read(&mut self, dst: &mut [T]) -> usize {
		let count = min(dst.len(), self.readable_len());
		dst[..count].copy_from_slice(&self.read_window()[..count]);
		self.consume(count)
	}
}

impl<T: Element> WritableBuffer<T> for Extent<T> {
	type RegionsMut<'a> = Option<&'a mut [T]>;

	fn writable_regions(&mut self) -> Option<&mut [T]> {
		Some(self.write_window()).filter(|w| !w.is_empty())
	}

	fn writable_len(&self) -> usize { self.data.len() - self.length }

	fn try_commit(&mut self, count: usize) -> Result {
		check_overrun(Operation::Commit, count, self.writable_len())?;
		Ok(self.fill(count))
	}

	fn write(&mut self, src: &[T]) -> usize {
		let count = min(src.len(), self.writable_len());
		self.write_window()[..count].copy_from_slice(&src[..count]);
		self.fill(count)
	}
}

impl<T: Element> Buffer<T> for Extent<T> {
	fn clear(&mut self) {
		self.offset = 0;
		self.length = 0;
	}
}
