// SPDX-License-Identifier: Apache-2.0

//! A buffer which grows and shrinks as required.
//!
//! A chain buffer is a deque of fixed-size [extents](Extent). Data is written to
//! the extent at the *write index*, moving to the next extent as each one fills,
//! and read from the extent at the front. Extents are appended when writable space
//! runs low, and dropped from the front once fully read. Data is never moved or
//! copied after being written, and the buffer has no upper bound.
//!
//! Two invariants hold between calls: every extent before the write index is full,
//! and every extent after it is fresh (nothing written yet).

mod options;

pub use options::*;

use std::collections::VecDeque;
use std::fmt;
use std::fmt::{Debug, Formatter};
use all_asserts::debug_assert_le;
use tracing::{debug, trace};
use crate::{Buffer, Element, Extent, ReadableBuffer, Result, State, WritableBuffer};
use crate::error::{check_overrun, Operation};
use crate::util::copy_prefix;

/// An unbounded buffer made of a chain of fixed-size [extents](Extent).
pub struct ChainBuffer<T: Element = u8> {
	extents: VecDeque<Extent<T>>,
	/// The index of the first extent with free space.
	write_index: usize,
	/// The number of readable elements.
	len: usize,
	options: ChainOptions<T>,
}

impl<T: Element> Default for ChainBuffer<T> {
	fn default() -> Self {
		Self::from_valid(ChainOptions::default())
	}
}

impl<T: Element> ChainBuffer<T> {
	/// Creates a new, empty buffer with default options. No memory is allocated
	/// until the first write.
	pub fn new() -> Self { Self::default() }

	/// Creates a new, empty buffer with `options`, failing if they're invalid.
	pub fn with_options(options: ChainOptions<T>) -> Result<Self> {
		Ok(Self::from_valid(options.validate()?))
	}

	/// Creates a new, empty buffer with extents of `extent_size` elements.
	pub fn with_extent_size(extent_size: usize) -> Result<Self> {
		Self::with_options(ChainOptions::default().with_extent_size(extent_size))
	}

	fn from_valid(options: ChainOptions<T>) -> Self {
		Self {
			extents: VecDeque::new(),
			write_index: 0,
			len: 0,
			options,
		}
	}

	/// Returns the buffer options.
	pub fn options(&self) -> ChainOptions<T> { self.options }

	/// Returns the number of extents currently allocated.
	pub fn extent_count(&self) -> usize { self.extents.len() }

	/// Returns the fill state of the buffer. Chain buffers grow on demand, so they
	/// are never [full](State::Full).
	pub fn state(&self) -> State {
		if self.len == 0 {
			State::Empty
		} else {
			State::Partial
		}
	}

	/// Returns the oldest readable region, or an empty slice.
	#[cfg(feature = "bytes")]
	pub(crate) fn head(&self) -> &[T] {
		self.extents
			.iter()
			.map(Extent::read_window)
			.find(|window| !window.is_empty())
			.unwrap_or_default()
	}

	/// Moves the write index past full extents, then appends a fresh extent if
	/// writable space is below the minimum.
	fn settle(&mut self) {
		while self.extents
				  .get(self.write_index)
				  .is_some_and(Extent::is_full) {
			self.write_index += 1;
		}

		let free = self.writable_len();
		if free == 0 || free < self.options.min_free() {
			self.extents.push_back(Extent::new(self.options.extent_size()));
			trace!(extents = self.extents.len(), free, "appended extent");
		}
		debug_assert!(self.write_index < self.extents.len());
	}

	/// Removes the dead front extent.
	fn evict_front(&mut self) {
		debug_assert!(
			self.write_index > 0,
			"the extent at the write index has free space, and can't be dead"
		);
		self.extents.pop_front();
		self.write_index = self.write_index.saturating_sub(1);
		trace!(extents = self.extents.len(), "evicted extent");
	}

	/// Rewinds the write extent of a drained buffer and releases any fresh extents
	/// after it.
	fn rewind(&mut self) {
		debug_assert_eq!(self.write_index, 0);
		if let Some(front) = self.extents.front_mut() {
			front.clear();
		}
		self.extents.truncate(1);
		self.write_index = 0;
		debug!(extents = self.extents.len(), "buffer drained, rewound write extent");
	}

	#[cfg(test)]
	pub(crate) fn check_invariants(&self) {
		let Self { extents, write_index, len, .. } = self;
		assert!(*write_index <= extents.len());
		for (i, extent) in extents.iter().enumerate() {
			if i < *write_index {
				assert!(extent.is_full(), "extent {i} before the write index isn't full");
			} else {
				assert!(!extent.is_full(), "extent {i} after the write index is full");
			}
			if i > *write_index {
				assert!(extent.is_fresh(), "extent {i} after the write index isn't fresh");
			}
			assert!(!extent.is_dead(), "dead extent {i} wasn't evicted");
		}
		let counted: usize = extents.iter().map(Extent::readable_len).sum();
		assert_eq!(counted, *len);
	}
}

impl<T: Element> Debug for ChainBuffer<T> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("ChainBuffer")
			.field("extents", &self.extents)
			.field("write_index", &self.write_index)
			.field("len", &self.len)
			.field("options", &self.options)
			.finish()
	}
}

impl<T: Element> ReadableBuffer<T> for ChainBuffer<T> {
	type Regions<'a> = Vec<&'a [T]>;

	fn readable_regions(&self) -> Vec<&[T]> {
		self.extents
			.iter()
			.map(Extent::read_window)
			.filter(|window| !window.is_empty())
			.collect()
	}

	fn readable_len(&self) -> usize { self.len }

	fn discard(&mut self, count: usize) -> usize {
		let mut discarded = 0;
		while discarded < count {
			let Some(front) = self.extents.front_mut() else { break };
			let consumed = front.consume(count - discarded);
			if consumed == 0 {
				break
			}

			discarded += consumed;
			if front.is_dead() {
				self.evict_front();
			}
		}

		debug_assert_le!(discarded, self.len);
		self.len -= discarded;
		if discarded > 0 && self.len == 0 {
			self.rewind();
		}
		discarded
	}
}

impl<T: Element> WritableBuffer<T> for ChainBuffer<T> {
	type RegionsMut<'a> = Vec<&'a mut [T]>;

	/// Returns one region per extent with free space, appending a fresh extent
	/// first if space is below the minimum.
	fn writable_regions(&mut self) -> Vec<&mut [T]> {
		self.settle();
		self.extents
			.range_mut(self.write_index..)
			.enumerate()
			.map(|(i, extent)| {
				debug_assert!(!extent.is_full());
				debug_assert!(
					i == 0 || extent.is_fresh(),
					"data was written past the write index"
				);
				extent.write_window()
			})
			.collect()
	}

	fn writable_len(&self) -> usize {
		self.extents
			.iter()
			.skip(self.write_index)
			.map(Extent::writable_len)
			.sum()
	}

	fn try_commit(&mut self, count: usize) -> Result {
		let count = check_overrun(Operation::Commit, count, self.writable_len())?;
		if count == 0 {
			return Ok(0)
		}

		let mut left = count;
		while left > 0 {
			let extent = &mut self.extents[self.write_index];
			left -= extent.fill(left);
			if extent.is_full() {
				self.write_index += 1;
			}
		}
		self.len += count;
		self.settle();
		Ok(count)
	}

	/// Writes all of `src`, growing the buffer as needed.
	fn write(&mut self, src: &[T]) -> usize {
		let mut written = 0;
		while written < src.len() {
			let mut copied = 0;
			for region in self.writable_regions() {
				copied += copy_prefix(region, &src[written + copied..]);
				if written + copied == src.len() {
					break
				}
			}
			written += self.commit(copied);
		}
		written
	}
}

impl<T: Element> Buffer<T> for ChainBuffer<T> {
	/// Drops all extents.
	fn clear(&mut self) {
		self.extents.clear();
		self.write_index = 0;
		self.len = 0;
		debug!("buffer cleared");
	}
}
