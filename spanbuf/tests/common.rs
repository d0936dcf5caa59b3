// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code, unused_macros)]

use std::fmt::{Arguments, Debug};
use spanbuf::{Buffer, ReadableBuffer};

#[ctor::ctor]
fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_test_writer()
		.try_init();
}

macro_rules! qc_assert_eq {
	($left:expr,$right:expr) => {{
		let left = $left;
		let right = $right;
		if left == right {
			quickcheck::TestResult::passed()
		} else {
			quickcheck::TestResult::error(
				common::format_qc_assert_error(&left, &right, None)
			)
		}
	}};
    ($left:expr,$right:expr,$($arg:tt)+) => {{
		let left = $left;
		let right = $right;
		if left == right {
			quickcheck::TestResult::passed()
		} else {
			quickcheck::TestResult::error(
				common::format_qc_assert_error(&left, &right, Some(format_args!($($arg)+)))
			)
		}
	}};
}

pub fn format_qc_assert_error<L: Debug, R: Debug>(left: &L, right: &R, msg: Option<Arguments>) -> String {
	if let Some(msg) = msg {
		format!(
			"assertion failed `(left == right)`: {msg}\n \
			left: `{left:?}`,\nright: `{right:?}`",
		)
	} else {
		format!(
			"assertion failed `(left == right)`:\n \
			left: `{left:?}`,\nright: `{right:?}`",
		)
	}
}

/// Returns a copy of all readable data, without consuming it.
pub fn contents(buf: &impl ReadableBuffer<u8>) -> Vec<u8> {
	buf.readable_regions()
	   .into_iter()
	   .flatten()
	   .copied()
	   .collect()
}

/// Returns the total length of the writable regions.
pub fn writable_region_len(buf: &mut impl Buffer<u8>) -> usize {
	buf.writable_regions()
	   .into_iter()
	   .map(|region| region.len())
	   .sum()
}

/// Replays interleaved writes and reads against `buf`, returning everything read.
/// Reads of zero length drain the buffer.
pub fn replay(buf: &mut impl Buffer<u8>, ops: &[(Vec<u8>, u8)]) -> (Vec<u8>, Vec<u8>) {
	let mut written = Vec::new();
	let mut read = Vec::new();
	for (data, read_len) in ops {
		let count = buf.write(data);
		written.extend_from_slice(&data[..count]);

		let mut dst = vec![0; *read_len as usize];
		let count = buf.read(&mut dst);
		read.extend_from_slice(&dst[..count]);
	}

	let mut rest = vec![0; buf.readable_len()];
	let count = buf.read(&mut rest);
	read.extend_from_slice(&rest[..count]);
	(written, read)
}
