// Copyright 2021 Matthew Ingwersen.
//
// Licensed under the Apache License, Version 2.0 (the "License"); you
// may not use this file except in compliance with the License. You may
// obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or
// implied. See the License for the specific language governing
// permissions and limitations under the License.

//! Implementation of the [`Error`] type for name-related errors.

use std::fmt;

/// An error type used to report problems constructing, parsing, or
/// decompressing [`Name`](super::Name)s.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Error {
    /// An invalid pointer was encountered while parsing a compressed
    /// name. Pointers must refer to an earlier position in the message
    /// than the run of labels that contains them.
    InvalidPointer,

    /// A label was longer than 63 octets, or the length octet used one
    /// of the reserved label types.
    LabelTooLong,

    /// A label received on the wire was not valid UTF-8.
    LabelNotUtf8,

    /// A null label was found in a non-terminal position.
    NullNonTerminal,

    /// We unexpectedly encountered the end of the message while parsing
    /// the name.
    UnexpectedEom,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::InvalidPointer => f.write_str("invalid pointer"),
            Self::LabelTooLong => f.write_str("label is longer than 63 bytes"),
            Self::LabelNotUtf8 => f.write_str("label is not valid UTF-8"),
            Self::NullNonTerminal => f.write_str("non-terminal label is null"),
            Self::UnexpectedEom => f.write_str("unexpected end of message"),
        }
    }
}

impl std::error::Error for Error {}
