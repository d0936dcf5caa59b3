// SPDX-License-Identifier: Apache-2.0

//! [`bytes`] integration, behind the `bytes` feature.

use std::io::IoSlice;
use bytes::{Buf, BufMut};
use bytes::buf::UninitSlice;
use crate::{ChainBuffer, ReadableBuffer, RingBuffer, WritableBuffer};

fn advance_exact(buf: &mut impl ReadableBuffer<u8>, count: usize) {
	let discarded = buf.discard(count);
	assert_eq!(discarded, count, "cannot advance past the end of the buffer");
}

fn fill_io_slices<'a>(regions: impl IntoIterator<Item = &'a [u8]>, dst: &mut [IoSlice<'a>]) -> usize {
	let mut count = 0;
	for (slot, region) in dst.iter_mut().zip(regions) {
		*slot = IoSlice::new(region);
		count += 1;
	}
	count
}

impl Buf for RingBuffer<u8> {
	fn remaining(&self) -> usize { self.readable_len() }

	fn chunk(&self) -> &[u8] {
		self.readable_regions()
			.first()
			.copied()
			.unwrap_or_default()
	}

	fn chunks_vectored<'a>(&'a self, dst: &mut [IoSlice<'a>]) -> usize {
		fill_io_slices(self.readable_regions(), dst)
	}

	fn advance(&mut self, count: usize) { advance_exact(self, count) }
}

impl Buf for ChainBuffer<u8> {
	fn remaining(&self) -> usize { self.readable_len() }

	fn chunk(&self) -> &[u8] { self.head() }

	fn chunks_vectored<'a>(&'a self, dst: &mut [IoSlice<'a>]) -> usize {
		fill_io_slices(self.readable_regions(), dst)
	}

	fn advance(&mut self, count: usize) { advance_exact(self, count) }
}

unsafe impl BufMut for RingBuffer<u8> {
	fn remaining_mut(&self) -> usize { self.writable_len() }

	unsafe fn advance_mut(&mut self, count: usize) {
		self.commit(count);
	}

	fn chunk_mut(&mut self) -> &mut UninitSlice {
		let region = self.writable_regions()
						 .into_iter()
						 .next()
						 .unwrap_or_default();
		UninitSlice::new(region)
	}
}

/// Chain buffers grow without bound, so the remaining space is only limited by
/// the maximum slice length.
unsafe impl BufMut for ChainBuffer<u8> {
	fn remaining_mut(&self) -> usize { isize::MAX as usize - self.readable_len() }

	unsafe fn advance_mut(&mut self, count: usize) {
		self.commit(count);
	}

	fn chunk_mut(&mut self) -> &mut UninitSlice {
		let region = self.writable_regions()
						 .into_iter()
						 .next()
						 .unwrap_or_default();
		UninitSlice::new(region)
	}
}
