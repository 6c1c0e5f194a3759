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

//! Implementation of the [`Name`] type for domain names.

use std::fmt;
use std::str::FromStr;

mod error;
mod wire;
pub use error::Error;

/// The maximum length of a label in a domain name (not including the
/// octet that provides the length).
pub const MAX_LABEL_LEN: usize = 63;

////////////////////////////////////////////////////////////////////////
// NAME STRUCTURE                                                     //
////////////////////////////////////////////////////////////////////////

/// A domain name.
///
/// A `Name` is an ordered sequence of non-null labels, most specific
/// first; the terminating null label of the on-the-wire form is
/// implicit. Labels received on the wire must be valid UTF-8 and at
/// most [`MAX_LABEL_LEN`] octets long.
///
/// `Name`s can be constructed
///
/// * through the [`FromStr`] implementation, from the usual dotted
///   textual form (a single trailing dot is optional); or
/// * from a compressed on-the-wire name within a DNS message, through
///   [`Name::try_from_compressed`].
///
/// The [`Display`](fmt::Display) implementation joins the labels with
/// dots and does not add a trailing dot, except that the root name is
/// displayed as `.`.
#[derive(Clone, Default, Eq, Hash, PartialEq)]
pub struct Name {
    labels: Vec<Box<str>>,
}

impl Name {
    /// Returns the root name.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns whether this is the root name.
    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    /// Parses a compressed name starting at index `start` of `octets`.
    /// Pointers are followed, with indices interpreted as indices of
    /// `octets`; hence `octets` should be the entire DNS message.
    ///
    /// On success, the name is returned along with the number of
    /// octets it occupies at `start`. If the name is compressed, this
    /// is the length up to and including the first pointer.
    pub fn try_from_compressed(octets: &[u8], start: usize) -> Result<(Self, usize), Error> {
        wire::parse_compressed_name(octets, start)
    }

    /// Returns the uncompressed on-the-wire representation of the name.
    pub fn wire_repr(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.wire_len());
        self.write_wire_repr(&mut buf);
        buf
    }

    /// Appends the uncompressed on-the-wire representation of the name
    /// to `buf`.
    pub fn write_wire_repr(&self, buf: &mut Vec<u8>) {
        for label in &self.labels {
            // Labels are checked at construction, so the length fits.
            buf.push(label.len() as u8);
            buf.extend_from_slice(label.as_bytes());
        }
        buf.push(0);
    }

    /// Returns the length of the uncompressed on-the-wire
    /// representation of the name.
    pub fn wire_len(&self) -> usize {
        self.labels.iter().map(|l| l.len() + 1).sum::<usize>() + 1
    }

    /// Creates a name from labels that have already been validated.
    fn from_labels(labels: Vec<Box<str>>) -> Self {
        Self { labels }
    }
}

impl FromStr for Name {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.strip_suffix('.').unwrap_or(text);
        if text.is_empty() {
            return Ok(Self::root());
        }

        let mut labels = Vec::new();
        for label in text.split('.') {
            if label.is_empty() {
                return Err(Error::NullNonTerminal);
            } else if label.len() > MAX_LABEL_LEN {
                return Err(Error::LabelTooLong);
            }
            labels.push(label.into());
        }
        Ok(Self::from_labels(labels))
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_root() {
            return f.write_str(".");
        }
        for (i, label) in self.labels.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(label)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\"{}\"", self)
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_ignores_one_trailing_dot() {
        let with: Name = "example.test.".parse().unwrap();
        let without: Name = "example.test".parse().unwrap();
        assert_eq!(with, without);
        assert_eq!(with.labels.len(), 2);
        assert_eq!(with.to_string(), "example.test");
    }

    #[test]
    fn from_str_accepts_root() {
        assert!("".parse::<Name>().unwrap().is_root());
        assert!(".".parse::<Name>().unwrap().is_root());
        assert_eq!(Name::root().to_string(), ".");
    }

    #[test]
    fn from_str_rejects_null_non_terminal_labels() {
        assert_eq!("a..b".parse::<Name>(), Err(Error::NullNonTerminal));
        assert_eq!("a..".parse::<Name>(), Err(Error::NullNonTerminal));
        assert_eq!("..".parse::<Name>(), Err(Error::NullNonTerminal));
    }

    #[test]
    fn from_str_rejects_long_labels() {
        let label = "x".repeat(64);
        assert_eq!(label.parse::<Name>(), Err(Error::LabelTooLong));
        assert!("x".repeat(63).parse::<Name>().is_ok());
    }

    #[test]
    fn wire_repr_works() {
        let name: Name = "anytask.urgu.org".parse().unwrap();
        assert_eq!(name.wire_repr(), b"\x07anytask\x04urgu\x03org\x00");
        assert_eq!(name.wire_len(), 18);
        assert_eq!(Name::root().wire_repr(), b"\x00");
    }
}
