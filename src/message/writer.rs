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

//! Implementation of the [`Writer`] type to write on-the-wire DNS
//! messages.

use std::fmt;

use super::constants::HEADER_SIZE;
use super::{Header, Question};

/// Serializes a DNS query message.
///
/// A `Writer` is created from a [`Header`] with [`Writer::new`];
/// questions are then added with [`Writer::add_question`], and
/// [`Writer::finish`] produces the message. The header's count fields
/// are ignored: QDCOUNT is set to the number of questions actually
/// written and the other counts to zero, since this `Writer` never
/// writes resource records.
///
/// Domain names are written uncompressed.
#[derive(Clone, Debug)]
pub struct Writer {
    octets: Vec<u8>,
    header: Header,
    qdcount: u16,
}

impl Writer {
    /// Creates a new `Writer` for a message with the given header.
    pub fn new(header: Header) -> Self {
        let mut octets = Vec::with_capacity(512);
        octets.resize(HEADER_SIZE, 0);
        Self {
            octets,
            header,
            qdcount: 0,
        }
    }

    /// Adds a question to the message.
    pub fn add_question(&mut self, question: &Question) -> Result<()> {
        let new_qdcount = self.qdcount.checked_add(1).ok_or(Error::CountOverflow)?;
        question.write_to(&mut self.octets);
        self.qdcount = new_qdcount;
        Ok(())
    }

    /// Writes the header and returns the finished message.
    pub fn finish(mut self) -> Vec<u8> {
        let header = Header {
            qdcount: self.qdcount,
            ancount: 0,
            nscount: 0,
            arcount: 0,
            ..self.header
        };
        self.octets[..HEADER_SIZE].copy_from_slice(&header.to_octets());
        self.octets
    }
}

////////////////////////////////////////////////////////////////////////
// ERRORS                                                             //
////////////////////////////////////////////////////////////////////////

/// An error signaling that a question could not be added to a message.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Error {
    CountOverflow,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::CountOverflow => f.write_str("question count would overflow"),
        }
    }
}

impl std::error::Error for Error {}

/// The type returned by fallible [`Writer`] methods.
pub type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_works() {
        let question = Question::for_host("wayfinder.test".parse().unwrap(), false);
        let mut writer = Writer::new(Header::query(0x0703, true));
        writer.add_question(&question).unwrap();
        assert_eq!(
            writer.finish(),
            b"\x07\x03\x01\x00\x00\x01\x00\x00\x00\x00\x00\x00\
              \x09wayfinder\x04test\x00\x00\x01\x00\x01"
                .to_vec()
        );
    }

    #[test]
    fn writer_derives_counts_from_what_is_written() {
        let header = Header {
            ancount: 7,
            arcount: 9,
            ..Header::query(1, false)
        };
        let question = Question::for_host("a.test".parse().unwrap(), true);
        let mut writer = Writer::new(header);
        writer.add_question(&question).unwrap();
        writer.add_question(&question).unwrap();
        let written = Header::read(&writer.finish()).unwrap();
        assert_eq!(written.qdcount, 2);
        assert_eq!(written.ancount, 0);
        assert_eq!(written.arcount, 0);

        let empty = Header::read(&Writer::new(Header::query(1, false)).finish()).unwrap();
        assert_eq!(empty.qdcount, 0);
    }

    #[test]
    fn writer_detects_qdcount_overflow() {
        let question = Question::for_host(crate::name::Name::root(), false);
        let mut writer = Writer::new(Header::query(0, false));
        for _ in 0..u16::MAX {
            writer.add_question(&question).unwrap();
        }
        assert_eq!(writer.add_question(&question), Err(Error::CountOverflow));
    }
}
