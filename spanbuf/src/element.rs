// SPDX-License-Identifier: Apache-2.0

/// A buffer element: a byte or any other plain-old-data type. Elements are only
/// ever copied, and new storage is zero-filled.
pub trait Element: bytemuck::Pod + Unpin { }

impl<T: bytemuck::Pod + Unpin> Element for T { }

/// Allocates a zeroed, boxed slice of `len` elements.
pub(crate) fn zeroed_block<T: Element>(len: usize) -> Box<[T]> {
	vec![T::zeroed(); len].into_boxed_slice()
}
