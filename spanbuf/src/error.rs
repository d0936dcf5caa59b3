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

use std::result;
use amplify_derive::Display;

pub type Result<T = usize> = result::Result<T, Error>;

/// The buffer operation an [`Error`] occurred in.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Display)]
pub enum Operation {
	#[display("commit")]
	Commit,
	#[display("discard")]
	Discard,
}

/// A buffer error.
///
/// Running out of data or space is never an error; reads and writes return short
/// counts instead. Errors only signal a broken contract between the buffer and its
/// caller, such as committing more elements than the buffer offered for writing.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
	/// More elements were committed or discarded than were available.
	#[error("{op} overran the buffer; {requested} elements requested, {available} available")]
	Overrun {
		op: Operation,
		requested: usize,
		available: usize,
	},
	/// The buffer options were rejected.
	#[error("invalid buffer options; {0}")]
	InvalidOptions(&'static str),
}

impl Error {
	pub(crate) fn overrun(op: Operation, requested: usize, available: usize) -> Self {
		Self::Overrun { op, requested, available }
	}

	/// Returns the operation, if the error is an overrun.
	pub fn operation(&self) -> Option<Operation> {
		match self {
			Self::Overrun { op, .. } => Some(*op),
			Self::InvalidOptions(_) => None
		}
	}

	/// Returns `true` if the error is an overrun.
	pub fn is_overrun(&self) -> bool {
		matches!(self, Self::Overrun { .. })
	}
}

/// Checks that `requested` elements fit in the `available` count, returning the
/// requested count or an overrun error.
pub(crate) fn check_overrun(op: Operation, requested: usize, available: usize) -> Result {
	if requested > available {
		Err(Error::overrun(op, requested, available))
	} else {
		Ok(requested)
	}
}
