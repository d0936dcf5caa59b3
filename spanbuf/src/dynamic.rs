// SPDX-License-Identifier: Apache-2.0

//! Type-erased buffers, for code which picks a buffer at runtime.
//!
//! The buffer traits have generic region types, so they can't be made into trait
//! objects directly. The wrappers here box any buffer behind an object-safe
//! interface, and implement the buffer traits again with [`Vec`] region lists.
//!
//! ```
//! use spanbuf::{ChainBuffer, DynBuffer, ReadableBuffer, RingBuffer, WritableBuffer};
//!
//! let mut buffers = [
//!     DynBuffer::new(RingBuffer::<u8>::new(16)),
//!     DynBuffer::new(ChainBuffer::<u8>::new()),
//! ];
//! for buf in &mut buffers {
//!     assert_eq!(buf.write(b"hello"), 5);
//!     assert_eq!(buf.readable_regions().concat(), b"hello");
//! }
//! ```

use std::fmt;
use std::fmt::{Debug, Formatter};
use crate::{Buffer, Element, ReadableBuffer, Result, WritableBuffer};

trait ErasedReadable<T: Element> {
	fn erased_regions(&self) -> Vec<&[T]>;
	fn erased_len(&self) -> usize;
	fn erased_discard(&mut self, count: usize) -> usize;
	fn erased_read(&mut self, dst: &mut [T]) -> usize;
}

trait ErasedWritable<T: Element> {
	fn erased_regions_mut(&mut self) -> Vec<&mut [T]>;
	fn erased_writable_len(&self) -> usize;
	fn erased_try_commit(&mut self, count: usize) -> Result;
	fn erased_write(&mut self, src: &[T]) -> usize;
}

trait ErasedBuffer<T: Element>: ErasedReadable<T> + ErasedWritable<T> {
	fn erased_clear(&mut self);
}

impl<T: Element, B: ReadableBuffer<T>> ErasedReadable<T> for B {
	fn erased_regions(&self) -> Vec<&[T]> {
		self.readable_regions().into_iter().collect()
	}

	fn erased_len(&self) -> usize { self.readable_len() }

	fn erased_discard(&mut self, count: usize) -> usize { self.discard(count) }

	fn erased_read(&mut self, dst: &mut [T]) -> usize { self.read(dst) }
}

impl<T: Element, B: WritableBuffer<T>> ErasedWritable<T> for B {
	fn erased_regions_mut(&mut self) -> Vec<&mut [T]> {
		self.writable_regions().into_iter().collect()
	}

	fn erased_writable_len(&self) -> usize { self.writable_len() }

	fn erased_try_commit(&mut self, count: usize) -> Result { self.try_commit(count) }

	fn erased_write(&mut self, src: &[T]) -> usize { self.write(src) }
}

impl<T: Element, B: Buffer<T>> ErasedBuffer<T> for B {
	fn erased_clear(&mut self) { self.clear() }
}

/// A boxed, type-erased [`ReadableBuffer`].
pub struct DynReadable<'a, T: Element = u8>(Box<dyn ErasedReadable<T> + 'a>);

/// A boxed, type-erased [`WritableBuffer`].
pub struct DynWritable<'a, T: Element = u8>(Box<dyn ErasedWritable<T> + 'a>);

/// A boxed, type-erased [`Buffer`].
pub struct DynBuffer<'a, T: Element = u8>(Box<dyn ErasedBuffer<T> + 'a>);

impl<'a, T: Element> DynReadable<'a, T> {
	/// Erases the type of `buf`.
	pub fn new(buf: impl ReadableBuffer<T> + 'a) -> Self { Self(Box::new(buf)) }
}

impl<'a, T: Element> DynWritable<'a, T> {
	/// Erases the type of `buf`.
	pub fn new(buf: impl WritableBuffer<T> + 'a) -> Self { Self(Box::new(buf)) }
}

impl<'a, T: Element> DynBuffer<'a, T> {
	/// Erases the type of `buf`.
	pub fn new(buf: impl Buffer<T> + 'a) -> Self { Self(Box::new(buf)) }
}

macro_rules! forward_readable {
    ($($ty:ident)+) => {
		$(
		impl<T: Element> ReadableBuffer<T> for $ty<'_, T> {
			type Regions<'b> = Vec<&'b [T]> where Self: 'b;

			fn readable_regions(&self) -> Vec<&[T]> { self.0.erased_regions() }
			fn readable_len(&self) -> usize { self.0.erased_len() }
			fn discard(&mut self, count: usize) -> usize { self.0.erased_discard(count) }
			fn read(&mut self, dst: &mut [T]) -> usize { self.0.erased_read(dst) }
		}
		)+
	};
}

macro_rules! forward_writable {
    ($($ty:ident)+) => {
		$(
		impl<T: Element> WritableBuffer<T> for $ty<'_, T> {
			type RegionsMut<'b> = Vec<&'b mut [T]> where Self: 'b;

			fn writable_regions(&mut self) -> Vec<&mut [T]> { self.0.erased_regions_mut() }
			fn writable_len(&self) -> usize { self.0.erased_writable_len() }
			fn try_commit(&mut self, count: usize) -> Result { self.0.erased_try_commit(count) }
			fn write(&mut self, src: &[T]) -> usize { self.0.erased_write(src) }
		}
		)+
	};
}

forward_readable! { DynReadable DynBuffer }
forward_writable! { DynWritable DynBuffer }

impl<T: Element> Buffer<T> for DynBuffer<'_, T> {
	fn clear(&mut self) { self.0.erased_clear() }
}

macro_rules! opaque_debug {
    ($($ty:ident)+) => {
		$(
		impl<T: Element> Debug for $ty<'_, T> {
			fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
				f.debug_struct(stringify!($ty)).finish_non_exhaustive()
			}
		}
		)+
	};
}

opaque_debug! { DynReadable DynWritable DynBuffer }

#[cfg(test)]
mod test {
	use pretty_assertions::assert_eq;
	use crate::{Buffer, ChainBuffer, ReadableBuffer, SliceSink, SliceSource, WritableBuffer};
	use super::{DynBuffer, DynReadable, DynWritable};

	#[test]
	fn readable_slice() {
		let input = "testing";
		let mut source = DynReadable::new(SliceSource::new(input.as_bytes()));
		let mut output = vec![b'X'; input.len()];
		assert_eq!(source.read(&mut output), input.len());
		assert_eq!(output, input.as_bytes());
		assert!(source.is_empty());
	}

	#[test]
	fn writable_slice() {
		let input = "testing";
		let mut output = vec![b'X'; input.len()];
		{
			let mut sink = DynWritable::new(SliceSink::new(&mut output[..]));
			assert_eq!(sink.write(input.as_bytes()), input.len());
			assert_eq!(sink.writable_len(), 0);
		}
		assert_eq!(output, input.as_bytes());
	}

	#[test]
	fn chain_regions() {
		let mut buf = DynBuffer::new(ChainBuffer::<u8>::with_extent_size(4).unwrap());
		assert_eq!(buf.write(b"abcdefghij"), 10);
		assert_eq!(buf.readable_regions(), [&b"abcd"[..], b"efgh", b"ij"]);
		buf.writable_regions()[0][0] = b'k';
		assert_eq!(buf.commit(1), 1);
		assert_eq!(buf.readable_len(), 11);
		buf.clear();
		assert!(buf.is_empty());
	}
}
