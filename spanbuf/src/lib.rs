// Copyright 2023 Strixpyrr
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! ## How it works
//!
//! Every buffer hands out *regions*: slices of its own memory. Writers fill
//! writable regions in place, usually straight from a system call, and *commit*
//! how much they wrote. Readers consume readable regions in place and *discard*
//! how much they used. No data is copied between the IO call and the buffer, and
//! code written against the [`ReadableBuffer`] and [`WritableBuffer`] traits works
//! with any storage strategy.
//!
//! ### Ring buffers
//!
//! A [`RingBuffer`] is a fixed array with a read cursor and a write cursor, both
//! wrapping around at the end of the array. It never allocates after creation and
//! can be reused forever, but can't hold more than its capacity. Since data can
//! wrap around the end of the array, readable and writable space each span at most
//! two regions.
//!
//! ### Chain buffers
//!
//! A [`ChainBuffer`] is a chain of fixed-size [extents](Extent). Writes fill the
//! extents in order, appending new ones as space runs low; reads drain them from
//! the front, dropping each once it's used up. A chain buffer has no size limit,
//! and holds at most about one extent more memory than its data needs. Extents are
//! allocated lazily, so an unused chain buffer costs nothing.
//!
//! ### Adapters
//!
//! [`SliceSource`] and [`SliceSink`] view existing slices as buffers, and
//! [`DynBuffer`] erases a buffer's type for runtime dispatch. Byte buffers
//! implement [`Read`](std::io::Read) and [`Write`](std::io::Write), and
//! [`IoBufferExt`] drives readers and writers directly against buffer memory.
//!
//! ```
//! use spanbuf::{ReadableBuffer, RingBuffer, WritableBuffer};
//!
//! let mut ring = RingBuffer::<u8>::new(4);
//! assert_eq!(ring.write(b"AB"), 2);
//! assert_eq!(ring.write(b"CDEF"), 2);
//!
//! let mut dst = [0; 3];
//! assert_eq!(ring.read(&mut dst), 3);
//! assert_eq!(&dst, b"ABC");
//!
//! assert_eq!(ring.write(b"XY"), 2);
//! assert_eq!(ring.readable_regions().concat(), b"DXY");
//! ```

mod buffer;
mod chain;
mod dynamic;
mod element;
mod error;
mod extent;
mod ring;
mod slice;
mod std_io;
mod util;
#[cfg(feature = "bytes")]
mod bytes_buf;

pub use buffer::*;
pub use chain::*;
pub use dynamic::*;
pub use element::Element;
pub use error::*;
pub use extent::*;
pub use ring::*;
pub use slice::*;
pub use std_io::*;
