// SPDX-License-Identifier: Apache-2.0

//! A fixed-capacity circular buffer.
//!
//! The buffer stores its data in a single array one element longer than its
//! capacity, with a read cursor and a write cursor offset into it. The readable
//! range runs from the read cursor up to the write cursor, and the writable range
//! from the write cursor up to one before the read cursor, both wrapping around at
//! the end of the array:
//!
//! ```text
//!  begin                          end
//! [...............................]
//!             ^ read, write            empty: everything is writable
//!
//! [...####........................]
//!     ^   ^ write                      three elements written
//!     read
//!
//! [####.........................##]
//!      ^ write                  ^ read wrapped: readable in two regions
//!
//! [##########################.####]
//!                            ^^ read
//!                            write     full: the slot before read is reserved
//! ```
//!
//! The reserved slot is what tells a full buffer apart from an empty one: writing
//! can never move the write cursor onto the read cursor.

use std::fmt;
use std::fmt::{Debug, Formatter};
use arrayvec::ArrayVec;
use all_asserts::debug_assert_lt;
use crate::{Buffer, Element, ReadableBuffer, Result, State, WritableBuffer};
use crate::element::zeroed_block;
use crate::error::{check_overrun, Operation};

/// The default capacity of a [`RingBuffer`].
pub const DEFAULT_RING_CAPACITY: usize = 4096;

/// Readable regions of a [`RingBuffer`]. There are at most two: one running to the
/// end of the array, and one wrapped around to its start.
pub type RingRegions<'a, T> = ArrayVec<&'a [T], 2>;
/// Writable regions of a [`RingBuffer`].
pub type RingRegionsMut<'a, T> = ArrayVec<&'a mut [T], 2>;

/// A fixed-capacity buffer which wraps around when it reaches the end of its
/// storage. Unlike an [`Extent`](crate::Extent), which is used up once its entire
/// capacity has been written and read, a ring buffer can be read and written
/// forever. It can never hold more than its capacity at once, however.
///
/// Ring buffers can't be cloned, as copying a buffer is almost certainly a mistake.
pub struct RingBuffer<T: Element = u8> {
	/// The storage array, one element longer than the capacity.
	data: Box<[T]>,
	/// The offset data is read from. If equal to `write`, the buffer is empty.
	read: usize,
	/// The offset data is written to.
	write: usize,
}

impl<T: Element> RingBuffer<T> {
	/// Creates an empty buffer holding up to `capacity` elements.
	///
	/// # Panics
	///
	/// Panics if `capacity` is `usize::MAX`, as the storage array holds one extra
	/// element.
	pub fn new(capacity: usize) -> Self {
		let Some(len) = capacity.checked_add(1) else {
			panic!("ring capacity {capacity} overflows the storage length")
		};
		Self {
			data: zeroed_block(len),
			read: 0,
			write: 0,
		}
	}

	/// Returns the maximum number of elements the buffer can hold.
	pub fn capacity(&self) -> usize { self.data.len() - 1 }

	/// Returns `true` if no more data can be written.
	pub fn is_full(&self) -> bool { self.writable_len() == 0 }

	/// Returns the fill state of the buffer.
	pub fn state(&self) -> State {
		State::of(self.readable_len(), self.writable_len())
	}

	/// Returns the end of the first writable span. When the read cursor sits at
	/// the start of the array, the last slot is the reserved one.
	fn write_end(&self) -> usize {
		if self.read == 0 {
			self.data.len() - 1
		} else {
			self.data.len()
		}
	}

	/// Advances `cursor` by `count`, wrapping to the start of the array when it
	/// reaches the end.
	fn advance(&self, cursor: usize, count: usize) -> usize {
		let len = self.data.len();
		debug_assert_lt!(count, len);
		let next = cursor + count;
		if next >= len { next - len } else { next }
	}

	#[cfg(test)]
	pub(crate) fn cursors(&self) -> (usize, usize) { (self.read, self.write) }
}

impl<T: Element> Default for RingBuffer<T> {
	fn default() -> Self { Self::new(DEFAULT_RING_CAPACITY) }
}

impl<T: Element> Debug for RingBuffer<T> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("RingBuffer")
			.field("capacity", &self.capacity())
			.field("read", &self.read)
			.field("write", &self.write)
			.field("len", &self.readable_len())
			.finish_non_exhaustive()
	}
}

impl<T: Element> ReadableBuffer<T> for RingBuffer<T> {
	type Regions<'a> = RingRegions<'a, T>;

	fn readable_regions(&self) -> RingRegions<'_, T> {
		let Self { ref data, read, write } = *self;
		let mut regions = ArrayVec::new();
		if read <= write {
			if read < write {
				regions.push(&data[read..write]);
			}
		} else {
			// Read from the cursor to the end, then wrap around to the start.
			regions.push(&data[read..]);
			if write > 0 {
				regions.push(&data[..write]);
			}
		}
		regions
	}

	fn readable_len(&self) -> usize {
		if self.read <= self.write {
			self.write - self.read
		} else {
			self.data.len() - self.read + self.write
		}
	}

	fn discard(&mut self, count: usize) -> usize {
		let count = count.min(self.readable_len());
		if count > 0 {
			self.read = self.advance(self.read, count);
		}
		count
	}
}

impl<T: Element> WritableBuffer<T> for RingBuffer<T> {
	type RegionsMut<'a> = RingRegionsMut<'a, T>;

	fn writable_regions(&mut self) -> RingRegionsMut<'_, T> {
		let (read, write, end) = (self.read, self.write, self.write_end());
		let mut regions = ArrayVec::new();
		if read <= write {
			// Write from the cursor to the end, then wrap around to the start,
			// stopping one short of the read cursor.
			let (head, tail) = self.data.split_at_mut(write);
			let tail = &mut tail[..end - write];
			if !tail.is_empty() {
				regions.push(tail);
			}
			if read > 1 {
				regions.push(&mut head[..read - 1]);
			}
		} else {
			let span = &mut self.data[write..read - 1];
			if !span.is_empty() {
				regions.push(span);
			}
		}
		regions
	}

	fn writable_len(&self) -> usize {
		self.capacity() - self.readable_len()
	}

	fn try_commit(&mut self, count: usize) -> Result {
		let count = check_overrun(Operation::Commit, count, self.writable_len())?;
		if count > 0 {
			self.write = self.advance(self.write, count);
			debug_assert_ne!(
				self.write,
				self.read,
				"write cursor must never catch up to the read cursor"
			);
		}
		Ok(count)
	}
}

impl<T: Element> Buffer<T> for RingBuffer<T> {
	fn clear(&mut self) {
		self.read = 0;
		self.write = 0;
	}
}

#[cfg(test)]
mod test {
	use pretty_assertions::assert_eq;
	use quickcheck_macros::quickcheck;
	use crate::{Buffer, ReadableBuffer, State, WritableBuffer};
	use super::RingBuffer;

	fn contents(ring: &RingBuffer) -> Vec<u8> {
		ring.readable_regions().concat()
	}

	fn region_lens(ring: &mut RingBuffer) -> Vec<usize> {
		ring.writable_regions()
			.into_iter()
			.map(|r| r.len())
			.collect()
	}

	#[test]
	fn empty() {
		let mut ring = RingBuffer::<u8>::new(8);
		assert!(ring.readable_regions().is_empty());
		assert_eq!(region_lens(&mut ring), [8]);
		assert_eq!(ring.state(), State::Empty);
		assert_eq!(ring.commit(0), 0);
		assert_eq!(ring.discard(0), 0);
		assert_eq!(ring.discard(5), 0);
	}

	#[test]
	fn scenario() {
		let mut ring = RingBuffer::<u8>::new(4);
		assert_eq!(ring.write(b"AB"), 2);
		assert_eq!(ring.write(b"CDEF"), 2);
		assert_eq!(contents(&ring), b"ABCD");
		assert_eq!(ring.state(), State::Full);

		let mut dst = [0; 3];
		assert_eq!(ring.read(&mut dst), 3);
		assert_eq!(&dst, b"ABC");
		assert_eq!(ring.readable_len(), 1);
		assert_eq!(ring.writable_len(), 3);

		assert_eq!(ring.write(b"XY"), 2);
		assert_eq!(contents(&ring), b"DXY");
		assert_eq!(ring.readable_regions().len(), 2);
	}

	#[test]
	fn full_at_start() {
		let mut ring = RingBuffer::<u8>::new(4);
		ring.write(b"ABCD");
		assert_eq!(ring.cursors(), (0, 4));
		assert!(ring.writable_regions().is_empty());
		assert!(ring.is_full());
	}

	#[test]
	fn full_wrapped() {
		let mut ring = RingBuffer::<u8>::new(4);
		ring.write(b"ABC");
		ring.discard(2);
		assert_eq!(region_lens(&mut ring), [2, 1]);
		assert_eq!(ring.write(b"DEFG"), 3);
		assert_eq!(ring.cursors(), (2, 1));
		assert!(ring.is_full());
		assert!(ring.writable_regions().is_empty());
		assert_eq!(contents(&ring), b"CDEF");
	}

	#[test]
	fn write_cursor_wraps_at_end() {
		let mut ring = RingBuffer::<u8>::new(4);
		ring.write(b"ABCD");
		ring.discard(1);
		// One slot free at the end of the array.
		assert_eq!(region_lens(&mut ring), [1]);
		assert_eq!(ring.commit(1), 1);
		assert_eq!(ring.cursors(), (1, 0));
		assert!(ring.is_full());
	}

	#[test]
	fn read_cursor_wraps_at_end() {
		let mut ring = RingBuffer::<u8>::new(4);
		ring.write(b"ABCD");
		ring.discard(3);
		ring.write(b"EFG");
		assert_eq!(ring.cursors(), (3, 2));
		assert_eq!(ring.discard(2), 2);
		assert_eq!(ring.cursors(), (0, 2));
		assert_eq!(contents(&ring), b"FG");
	}

	#[test]
	fn commit_written_regions() {
		let mut ring = RingBuffer::<u8>::new(6);
		ring.write(b"abcde");
		ring.discard(4);
		{
			let mut regions = ring.writable_regions().into_iter();
			let first = regions.next().unwrap();
			first.copy_from_slice(b"fg");
			let second = regions.next().unwrap();
			second[..2].copy_from_slice(b"hi");
		}
		assert_eq!(ring.commit(4), 4);
		assert_eq!(contents(&ring), b"efghi");
	}

	#[test]
	fn overrun() {
		let mut ring = RingBuffer::<u8>::new(4);
		ring.write(b"AB");
		let error = ring.try_commit(3).unwrap_err();
		assert!(error.is_overrun());
		assert_eq!(ring.cursors(), (0, 2));
	}

	#[test]
	#[should_panic(expected = "commit overran the buffer")]
	fn commit_overrun_panics() {
		let mut ring = RingBuffer::<u8>::new(4);
		ring.commit(5);
	}

	#[test]
	#[should_panic(expected = "overflows the storage length")]
	fn max_capacity_panics() {
		RingBuffer::<u8>::new(usize::MAX);
	}

	#[test]
	fn clear() {
		let mut ring = RingBuffer::<u8>::new(4);
		ring.write(b"ABC");
		ring.discard(2);
		ring.write(b"DE");
		ring.clear();
		assert!(ring.readable_regions().is_empty());
		assert_eq!(region_lens(&mut ring), [4]);
		ring.clear();
		assert_eq!(ring.cursors(), (0, 0));
	}

	#[test]
	fn zero_capacity() {
		let mut ring = RingBuffer::<u8>::new(0);
		assert_eq!(ring.write(b"A"), 0);
		assert!(ring.is_empty());
		assert!(ring.is_full());
	}

	#[test]
	fn no_data_loss_on_wrap() {
		let mut ring = RingBuffer::<u8>::new(8);
		assert_eq!(ring.write(b"01234567"), 8);
		assert_eq!(ring.discard(3), 3);
		assert_eq!(ring.write(b"abc"), 3);
		assert_eq!(contents(&ring), b"34567abc");
	}

	#[quickcheck]
	fn capacity_bound(writes: Vec<Vec<u8>>) -> bool {
		let mut ring = RingBuffer::<u8>::new(16);
		let mut expected = 0;
		writes.iter().all(|data| {
			let free = ring.writable_len();
			let written = ring.write(data);
			expected += written;
			written == data.len().min(free) &&
				ring.readable_len() == expected.min(16) &&
				ring.readable_len() <= ring.capacity()
		})
	}

	#[quickcheck]
	fn regions_cover_lengths(ops: Vec<(u8, bool)>) -> bool {
		let mut ring = RingBuffer::<u8>::new(7);
		ops.into_iter().all(|(n, is_write)| {
			let n = n as usize % 9;
			if is_write {
				ring.write(&vec![1u8; n]);
			} else {
				ring.discard(n);
			}
			let readable: usize = ring.readable_regions().iter().map(|r| r.len()).sum();
			let writable: usize = ring.writable_regions().iter().map(|r| r.len()).sum();
			readable == ring.readable_len() &&
				writable == ring.writable_len() &&
				readable + writable == 7
		})
	}
}
