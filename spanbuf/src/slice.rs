// SPDX-License-Identifier: Apache-2.0

//! Buffers viewing existing slices.

use std::cmp::min;
use crate::{Element, ReadableBuffer, Result, State, WritableBuffer};
use crate::error::{check_overrun, Operation};

/// A readable buffer over a borrowed slice. Discarding advances through the slice.
#[derive(Copy, Clone, Debug, Default)]
pub struct SliceSource<'a, T: Element = u8> {
	data: &'a [T],
}

/// A writable buffer over a borrowed mutable slice, filled from the front.
#[derive(Debug, Default)]
pub struct SliceSink<'a, T: Element = u8> {
	data: &'a mut [T],
	written: usize,
}

impl<'a, T: Element> SliceSource<'a, T> {
	/// Creates a source reading `data`.
	pub fn new(data: &'a [T]) -> Self { Self { data } }

	/// Returns the data not yet discarded.
	pub fn remaining(&self) -> &'a [T] { self.data }
}

impl<'a, T: Element> From<&'a [T]> for SliceSource<'a, T> {
	fn from(data: &'a [T]) -> Self { Self::new(data) }
}

impl<'a, T: Element> ReadableBuffer<T> for SliceSource<'a, T> {
	type Regions<'b> = Option<&'b [T]> where Self: 'b;

	fn readable_regions(&self) -> Option<&[T]> {
		Some(self.data).filter(|data| !data.is_empty())
	}

	fn readable_len(&self) -> usize { self.data.len() }

	fn discard(&mut self, count: usize) -> usize {
		let count = min(count, self.data.len());
		self.data = &self.data[count..];
		count
	}
}

impl<'a, T: Element> SliceSink<'a, T> {
	/// Creates a sink writing into `data`.
	pub fn new(data: &'a mut [T]) -> Self { Self { data, written: 0 } }

	/// Returns the filled part of the slice.
	pub fn written(&self) -> &[T] { &self.data[..self.written] }

	/// Consumes the sink, returning the filled part of the slice.
	pub fn into_written(self) -> &'a [T] {
		let data: &'a [T] = self.data;
		&data[..self.written]
	}

	/// Returns the fill state of the sink.
	pub fn state(&self) -> State {
		State::of(self.written, self.writable_len())
	}
}

impl<'a, T: Element> From<&'a mut [T]> for SliceSink<'a, T> {
	fn from(data: &'a mut [T]) -> Self { Self::new(data) }
}

impl<'a, T: Element> WritableBuffer<T> for SliceSink<'a, T> {
	type RegionsMut<'b> = Option<&'b mut [T]> where Self: 'b;

	fn writable_regions(&mut self) -> Option<&mut [T]> {
		Some(&mut self.data[self.written..]).filter(|data| !data.is_empty())
	}

	fn writable_len(&self) -> usize { self.data.len() - self.written }

	fn try_commit(&mut self, count: usize) -> Result {
		let count = check_overrun(Operation::Commit, count, self.writable_len())?;
		self.written += count;
		Ok(count)
	}
}
