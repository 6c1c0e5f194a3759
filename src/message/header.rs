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

//! Implementation of the [`Header`] type for the fixed DNS message
//! header.

use super::constants::*;
use super::reader::{Error, Result};
use super::{Opcode, Rcode};

/// The 12-octet header of a DNS message ([RFC 1035 § 4.1.1]).
///
/// When a [`Writer`](super::Writer) serializes a message, it overwrites
/// the four count fields with the number of questions and records
/// actually written, so the counts here only matter for received
/// messages.
///
/// [RFC 1035 § 4.1.1]: https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.1
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Header {
    pub id: u16,
    pub qr: bool,
    pub opcode: Opcode,
    pub aa: bool,
    pub tc: bool,
    pub rd: bool,
    pub ra: bool,
    pub rcode: Rcode,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl Header {
    /// Creates the header of a standard query with the given ID and RD
    /// (recursion desired) bit. The header announces a single question.
    pub fn query(id: u16, rd: bool) -> Self {
        Self {
            id,
            qr: false,
            opcode: Opcode::Query,
            aa: false,
            tc: false,
            rd,
            ra: false,
            rcode: Rcode::NoError,
            qdcount: 1,
            ancount: 0,
            nscount: 0,
            arcount: 0,
        }
    }

    /// Reads a header from the beginning of `octets`, which must be at
    /// least [`HEADER_SIZE`] octets long.
    pub fn read(octets: &[u8]) -> Result<Self> {
        if octets.len() < HEADER_SIZE {
            return Err(Error::HeaderTooShort);
        }
        let field = |start: usize, end: usize| u16::from_be_bytes([octets[start], octets[end - 1]]);

        let flags = field(FLAGS_START, FLAGS_END);
        Ok(Self {
            id: field(ID_START, ID_END),
            qr: flags & QR_MASK != 0,
            opcode: Opcode::from(((flags & OPCODE_MASK) >> OPCODE_SHIFT) as u8),
            aa: flags & AA_MASK != 0,
            tc: flags & TC_MASK != 0,
            rd: flags & RD_MASK != 0,
            ra: flags & RA_MASK != 0,
            rcode: Rcode::from((flags & RCODE_MASK) as u8),
            qdcount: field(QDCOUNT_START, QDCOUNT_END),
            ancount: field(ANCOUNT_START, ANCOUNT_END),
            nscount: field(NSCOUNT_START, NSCOUNT_END),
            arcount: field(ARCOUNT_START, ARCOUNT_END),
        })
    }

    /// Returns the on-the-wire representation of the header.
    pub fn to_octets(&self) -> [u8; HEADER_SIZE] {
        let mut octets = [0; HEADER_SIZE];
        let mut put = |start: usize, end: usize, value: u16| {
            octets[start..end].copy_from_slice(&value.to_be_bytes());
        };
        put(ID_START, ID_END, self.id);
        put(FLAGS_START, FLAGS_END, self.flags());
        put(QDCOUNT_START, QDCOUNT_END, self.qdcount);
        put(ANCOUNT_START, ANCOUNT_END, self.ancount);
        put(NSCOUNT_START, NSCOUNT_END, self.nscount);
        put(ARCOUNT_START, ARCOUNT_END, self.arcount);
        octets
    }

    /// Assembles the 16-bit flag word.
    fn flags(&self) -> u16 {
        let bit = |set: bool, mask: u16| if set { mask } else { 0 };
        bit(self.qr, QR_MASK)
            | (((u8::from(self.opcode) as u16) << OPCODE_SHIFT) & OPCODE_MASK)
            | bit(self.aa, AA_MASK)
            | bit(self.tc, TC_MASK)
            | bit(self.rd, RD_MASK)
            | bit(self.ra, RA_MASK)
            | ((u8::from(self.rcode) as u16) & RCODE_MASK)
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_works() {
        let header = Header::read(b"\x80\xa5\x01\x00\x00\x01\x00\x00\x00\x00\x00\x00").unwrap();
        assert_eq!(header.id, 32933);
        assert!(!header.qr);
        assert_eq!(header.opcode, Opcode::Query);
        assert!(!header.tc);
        assert!(header.rd);
        assert_eq!(header.qdcount, 1);
        assert_eq!(header.ancount, 0);
        assert_eq!(header.nscount, 0);
        assert_eq!(header.arcount, 0);
    }

    #[test]
    fn read_extracts_every_flag() {
        // QR, opcode 2, AA, TC, RD, RA, Z bits set, RCODE 3.
        let header = Header::read(b"\x12\x34\x97\xf3\x00\x01\x00\x02\x00\x03\x00\x04").unwrap();
        assert_eq!(header.id, 0x1234);
        assert!(header.qr);
        assert_eq!(header.opcode, Opcode::Status);
        assert!(header.aa);
        assert!(header.tc);
        assert!(header.rd);
        assert!(header.ra);
        assert_eq!(header.rcode, Rcode::NxDomain);
        assert_eq!(
            (header.qdcount, header.ancount, header.nscount, header.arcount),
            (1, 2, 3, 4)
        );
    }

    #[test]
    fn query_round_trips() {
        for (id, rd) in [(0, false), (0x4121, true), (u16::MAX, true)] {
            let header = Header::query(id, rd);
            assert_eq!(Header::read(&header.to_octets()), Ok(header));
        }
    }

    #[test]
    fn query_has_expected_wire_form() {
        assert_eq!(
            &Header::query(0x80a5, true).to_octets(),
            b"\x80\xa5\x01\x00\x00\x01\x00\x00\x00\x00\x00\x00"
        );
        assert_eq!(
            &Header::query(0x80a5, false).to_octets(),
            b"\x80\xa5\x00\x00\x00\x01\x00\x00\x00\x00\x00\x00"
        );
    }

    #[test]
    fn read_rejects_short_headers() {
        for size in 0..HEADER_SIZE {
            let buf = vec![0; size];
            assert_eq!(Header::read(&buf), Err(Error::HeaderTooShort));
        }
    }
}
