// SPDX-License-Identifier: Apache-2.0

use std::cmp::min;

/// Copies as many elements as fit from `src` into the front of `dst`, returning
/// the number copied.
pub(crate) fn copy_prefix<T: Copy>(dst: &mut [T], src: &[T]) -> usize {
	let count = min(dst.len(), src.len());
	dst[..count].copy_from_slice(&src[..count]);
	count
}
