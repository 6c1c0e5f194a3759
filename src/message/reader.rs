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

//! Implementation of the [`Reader`] type to read on-the-wire DNS
//! messages.

use std::fmt;

use super::constants::HEADER_SIZE;
use super::{Header, Question};
use crate::name::{self, Name};
use crate::rr::rdata::{Rdata, ReadRdataError};
use crate::rr::Record;

////////////////////////////////////////////////////////////////////////
// READER                                                             //
////////////////////////////////////////////////////////////////////////

/// A "frame" around a buffer containing a DNS message that enables
/// reading the message data.
///
/// A `Reader` is constructed using its [`TryFrom`] implementation. Any
/// underlying buffer for a reader must contain at least a full DNS
/// message header of 12 octets; otherwise the construction will fail.
///
/// The header is parsed at construction and is available through
/// [`Reader::header`]. For reading questions and RRs, the
/// [`Reader::read_question`] and [`Reader::read_rr`] methods are
/// provided. These read using a cursor, which is initially set to the
/// first octet after the DNS header. They must be called sequentially
/// to read any questions, and then any records, in the order they
/// appear in the message.
#[derive(Eq, PartialEq)]
pub struct Reader<'a> {
    octets: &'a [u8],
    header: Header,
    cursor: usize,
}

impl<'a> Reader<'a> {
    /// Returns the message header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Reads a [`Question`] starting at the current cursor.
    ///
    /// This method is atomic, in that the cursor is not changed on
    /// failure.
    pub fn read_question(&mut self) -> Result<Question> {
        let (qname, qname_len) =
            Name::try_from_compressed(self.octets, self.cursor).map_err(Error::InvalidOwner)?;
        let qname_end = self.cursor + qname_len;
        let fields = self
            .octets
            .get(qname_end..qname_end + 4)
            .ok_or(Error::UnexpectedEomInField)?;
        let qtype = read_u16(fields)?.into();
        let qclass = read_u16(&fields[2..])?.into();
        self.cursor = qname_end + 4;
        Ok(Question {
            qname,
            qtype,
            qclass,
        })
    }

    /// Reads a resource record at the current cursor.
    ///
    /// The cursor advances past the RDATA by the RDLENGTH given in the
    /// record, regardless of how many octets the RDATA decoder looked
    /// at. This method is atomic, in that the cursor is not changed on
    /// failure.
    pub fn read_rr(&mut self) -> Result<Record> {
        let (owner, owner_len) =
            Name::try_from_compressed(self.octets, self.cursor).map_err(Error::InvalidOwner)?;
        let owner_end = self.cursor + owner_len;
        let fields = self
            .octets
            .get(owner_end..owner_end + 10)
            .ok_or(Error::UnexpectedEomInField)?;
        let rr_type = read_u16(fields)?.into();
        let class = read_u16(&fields[2..])?.into();
        let ttl = read_u32(&fields[4..])?.into();
        let rdlength = read_u16(&fields[8..])?;
        let rdata = Rdata::read(rr_type, self.octets, owner_end + 10, rdlength)?;
        self.cursor = owner_end + 10 + rdlength as usize;
        Ok(Record {
            owner,
            rr_type,
            class,
            ttl,
            rdlength,
            rdata,
        })
    }
}

impl<'a> TryFrom<&'a [u8]> for Reader<'a> {
    type Error = Error;

    fn try_from(octets: &'a [u8]) -> Result<Self> {
        Ok(Self {
            octets,
            header: Header::read(octets)?,
            cursor: HEADER_SIZE,
        })
    }
}

impl fmt::Debug for Reader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Reader")
            .field("header", &self.header)
            .field("cursor", &self.cursor)
            .finish()
    }
}

////////////////////////////////////////////////////////////////////////
// HELPERS FOR READING MULTI-BYTE INTEGERS                            //
////////////////////////////////////////////////////////////////////////

/// Reads a network-byte-order `u16` from the beginning of `octets`.
pub fn read_u16(octets: &[u8]) -> Result<u16> {
    match *octets {
        [a, b, ..] => Ok(u16::from_be_bytes([a, b])),
        _ => Err(Error::UnexpectedEomInField),
    }
}

/// Reads a network-byte-order `u32` from the beginning of `octets`.
pub fn read_u32(octets: &[u8]) -> Result<u32> {
    match *octets {
        [a, b, c, d, ..] => Ok(u32::from_be_bytes([a, b, c, d])),
        _ => Err(Error::UnexpectedEomInField),
    }
}

////////////////////////////////////////////////////////////////////////
// ERRORS                                                             //
////////////////////////////////////////////////////////////////////////

/// An error signaling that a message, question, or resource record
/// could not be read.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Error {
    HeaderTooShort,
    UnexpectedEomInField,
    InvalidOwner(name::Error),
    InvalidRdata(ReadRdataError),
}

impl From<ReadRdataError> for Error {
    fn from(err: ReadRdataError) -> Self {
        Self::InvalidRdata(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::HeaderTooShort => f.write_str("header too short"),
            Self::UnexpectedEomInField => f.write_str("unexpected end of message in field"),
            Self::InvalidOwner(err) => write!(f, "invalid owner: {}", err),
            Self::InvalidRdata(err) => fmt::Display::fmt(&err, f),
        }
    }
}

impl std::error::Error for Error {}

/// The type returned by fallible [`Reader`] methods.
pub type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::Class;
    use crate::message::Opcode;
    use crate::rr::{Ttl, Type};

    /// This is a reply to a query for example.com. IN NS to a recursive
    /// server, made on January 7, 2022.
    const EXAMPLE_COM_NS_MESSAGE: &[u8] =
        b"\xe2\xd7\x81\x80\x00\x01\x00\x02\x00\x00\x00\x01\x07\x65\x78\x61\
          \x6d\x70\x6c\x65\x03\x63\x6f\x6d\x00\x00\x02\x00\x01\xc0\x0c\x00\
          \x02\x00\x01\x00\x01\x50\xa2\x00\x14\x01\x61\x0c\x69\x61\x6e\x61\
          \x2d\x73\x65\x72\x76\x65\x72\x73\x03\x6e\x65\x74\x00\xc0\x0c\x00\
          \x02\x00\x01\x00\x01\x50\xa2\x00\x04\x01\x62\xc0\x2b\x00\x00\x29\
          \x10\x00\x00\x00\x00\x00\x00\x00";

    #[test]
    fn reader_works() {
        let mut reader = Reader::try_from(EXAMPLE_COM_NS_MESSAGE).unwrap();
        let expected_qname: Name = "example.com.".parse().unwrap();

        // Check the header.
        let header = *reader.header();
        assert_eq!(header.id, 0xe2d7);
        assert!(header.qr);
        assert_eq!(header.opcode, Opcode::Query);
        assert!(!header.aa);
        assert!(!header.tc);
        assert!(header.rd);
        assert!(header.ra);
        assert_eq!(header.qdcount, 1);
        assert_eq!(header.ancount, 2);
        assert_eq!(header.nscount, 0);
        assert_eq!(header.arcount, 1);

        // Check the question.
        let question = reader.read_question().unwrap();
        assert_eq!(question.qname, expected_qname);
        assert_eq!(question.qtype, Type::NS);
        assert_eq!(question.qclass, Class::IN);

        // Check the answers. The second NS RDATA is compressed, so its
        // RDLENGTH is shorter than the decompressed name.
        let answer_1 = reader.read_rr().unwrap();
        assert_eq!(answer_1.owner, expected_qname);
        assert_eq!(answer_1.rr_type, Type::NS);
        assert_eq!(answer_1.class, Class::IN);
        assert_eq!(answer_1.ttl, Ttl::from(86178));
        assert_eq!(answer_1.rdlength, 20);
        assert_eq!(answer_1.rdata, Rdata::Ns("a.iana-servers.net".parse().unwrap()));
        let answer_2 = reader.read_rr().unwrap();
        assert_eq!(answer_2.owner, expected_qname);
        assert_eq!(answer_2.rdlength, 4);
        assert_eq!(answer_2.rdata, Rdata::Ns("b.iana-servers.net".parse().unwrap()));

        // Check the OPT record, which we don't interpret.
        let opt = reader.read_rr().unwrap();
        assert!(opt.owner.is_root());
        assert_eq!(opt.rr_type, Type::OPT);
        assert_eq!(opt.class, Class::from(4096));
        assert_eq!(opt.rdata, Rdata::Unknown(Box::new([])));

        // And that should be it!
        assert_eq!(
            reader.read_rr(),
            Err(Error::InvalidOwner(name::Error::UnexpectedEom))
        );
    }

    #[test]
    fn reader_constructor_rejects_short_message() {
        for size in 0..HEADER_SIZE {
            let buf = vec![0; size];
            assert_eq!(Reader::try_from(buf.as_slice()), Err(Error::HeaderTooShort));
        }
    }

    #[test]
    fn read_question_works() {
        let message = b"\x00\x00\x00\x00\x00\x01\x00\x00\x00\x00\x00\x00\
                        \x01\x61\x10\x63\x6f\x6c\x6c\x65\x63\x74\x69\x76\x65\x2d\x6d\
                        \x65\x64\x69\x61\x03\x6e\x65\x74\x00\x00\x01\x00\x01";
        let mut reader = Reader::try_from(&message[..]).unwrap();
        let question = reader.read_question().unwrap();
        assert_eq!(question.qname.to_string(), "a.collective-media.net");
        assert_eq!(question.qtype, Type::A);
        assert_eq!(question.qclass, Class::IN);
        assert_eq!(
            reader.read_question(),
            Err(Error::InvalidOwner(name::Error::UnexpectedEom))
        );
    }

    #[test]
    fn read_question_is_atomic() {
        let message = b"\x00\x00\x00\x00\x00\x01\x00\x00\x00\x00\x00\x00\x01a\x00\x00";
        let mut reader = Reader::try_from(&message[..]).unwrap();
        assert_eq!(reader.read_question(), Err(Error::UnexpectedEomInField));
        assert_eq!(reader.cursor, HEADER_SIZE);
    }

    #[test]
    fn read_rr_rejects_rdata_past_end_of_message() {
        let message = b"\x00\x00\x80\x00\x00\x00\x00\x01\x00\x00\x00\x00\
                        \x00\x00\x01\x00\x01\x00\x00\x00\x00\x00\x05\x01\x02\x03\x04";
        let mut reader = Reader::try_from(&message[..]).unwrap();
        assert_eq!(
            reader.read_rr(),
            Err(Error::InvalidRdata(ReadRdataError::UnexpectedEom))
        );
        assert_eq!(reader.cursor, HEADER_SIZE);
    }

    #[test]
    fn read_rr_rejects_truncated_fields() {
        let message = b"\x00\x00\x80\x00\x00\x00\x00\x01\x00\x00\x00\x00\x00\x00\x01\x00";
        let mut reader = Reader::try_from(&message[..]).unwrap();
        assert_eq!(reader.read_rr(), Err(Error::UnexpectedEomInField));
    }

    #[test]
    fn read_rr_rejects_bad_owner_pointers() {
        let message = b"\x00\x00\x80\x00\x00\x00\x00\x01\x00\x00\x00\x00\xc0\x0c";
        let mut reader = Reader::try_from(&message[..]).unwrap();
        assert_eq!(
            reader.read_rr(),
            Err(Error::InvalidOwner(name::Error::InvalidPointer))
        );
    }

    #[test]
    fn integer_helpers_work() {
        assert_eq!(read_u16(b"\x12\x34\x56"), Ok(0x1234));
        assert_eq!(read_u16(b"\x12"), Err(Error::UnexpectedEomInField));
        assert_eq!(read_u32(b"\x00\x00\x0a\x27"), Ok(2599));
        assert_eq!(read_u32(b"\x00\x00\x0a"), Err(Error::UnexpectedEomInField));
    }
}
