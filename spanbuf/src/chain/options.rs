// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::{fmt, mem};
use crate::{Element, Error, Result};

/// The default extent size of a [`ChainBuffer`](super::ChainBuffer), in bytes.
pub const DEFAULT_EXTENT_BYTES: usize = 4096;

/// Returns the number of `T` elements fitting in `bytes`, at least one.
pub const fn extent_size_from_bytes<T>(bytes: usize) -> usize {
	let size = mem::size_of::<T>();
	let count = if size == 0 { bytes } else { bytes / size };
	if count == 0 { 1 } else { count }
}

/// Options for tuning [`ChainBuffer`](super::ChainBuffer)'s memory use.
///
/// # Extent size
///
/// The number of elements in each extent. Defaults to as many elements as fit in
/// [`DEFAULT_EXTENT_BYTES`]. Larger extents mean fewer allocations, at the cost of
/// up to one extent of slack memory.
///
/// # Minimum free space
///
/// The least amount of writable space kept available at the tail. When writable
/// space drops below this, a new extent is appended, so callers writing directly
/// into the buffer never receive uselessly small regions. Defaults to half the
/// extent size, and can't exceed it.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct ChainOptions<T: Element = u8> {
	extent_size: usize,
	min_free: usize,
	_element: PhantomData<T>,
}

impl<T: Element> Default for ChainOptions<T> {
	fn default() -> Self {
		let extent_size = extent_size_from_bytes::<T>(DEFAULT_EXTENT_BYTES);
		Self {
			extent_size,
			min_free: extent_size / 2,
			_element: PhantomData,
		}
	}
}

impl<T: Element> Debug for ChainOptions<T> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("ChainOptions")
			.field("extent_size", &self.extent_size)
			.field("min_free", &self.min_free)
			.finish()
	}
}

impl<T: Element> ChainOptions<T> {
	/// Returns the extent size.
	pub fn extent_size(&self) -> usize { self.extent_size }
	/// Returns the minimum free space.
	pub fn min_free(&self) -> usize { self.min_free }

	/// Sets the extent size, resetting the minimum free space to half of it.
	pub fn with_extent_size(mut self, extent_size: usize) -> Self {
		self.extent_size = extent_size;
		self.min_free = extent_size / 2;
		self
	}

	/// Sets the minimum free space.
	pub fn with_min_free(mut self, min_free: usize) -> Self {
		self.min_free = min_free;
		self
	}

	/// Checks that the options are usable.
	pub fn validate(self) -> Result<Self> {
		if self.extent_size == 0 {
			Err(Error::InvalidOptions("extent size must be non-zero"))
		} else if self.min_free > self.extent_size {
			Err(Error::InvalidOptions("minimum free space can't exceed the extent size"))
		} else {
			Ok(self)
		}
	}
}
