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

//! Implementation of reading and writing of DNS messages.

use crate::name::Name;
use crate::rr::Record;

mod constants;
mod fmt;
mod header;
mod opcode;
mod question;
mod rcode;
pub mod reader;
pub mod writer;
pub use constants::HEADER_SIZE;
pub use header::Header;
pub use opcode::Opcode;
pub use question::Question;
pub use rcode::Rcode;
pub use reader::Reader;
pub use writer::Writer;

////////////////////////////////////////////////////////////////////////
// MESSAGES                                                           //
////////////////////////////////////////////////////////////////////////

/// A fully decoded DNS message.
///
/// The sections always hold exactly as many entries as the header
/// counts announce, since [`Message::decode`] is driven by those
/// counts.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<Record>,
    pub authority: Vec<Record>,
    pub additional: Vec<Record>,
}

impl Message {
    /// Decodes a message: the header, then QDCOUNT questions, ANCOUNT
    /// answers, NSCOUNT authority records, and ARCOUNT additional
    /// records, in that order. Any octets after the last record are
    /// ignored.
    pub fn decode(octets: &[u8]) -> reader::Result<Self> {
        let mut reader = Reader::try_from(octets)?;
        let header = *reader.header();
        let questions = (0..header.qdcount)
            .map(|_| reader.read_question())
            .collect::<reader::Result<_>>()?;
        let answers = read_rrs(&mut reader, header.ancount)?;
        let authority = read_rrs(&mut reader, header.nscount)?;
        let additional = read_rrs(&mut reader, header.arcount)?;
        Ok(Self {
            header,
            questions,
            answers,
            authority,
            additional,
        })
    }
}

/// Reads `count` consecutive resource records.
fn read_rrs(reader: &mut Reader, count: u16) -> reader::Result<Vec<Record>> {
    (0..count).map(|_| reader.read_rr()).collect()
}

/// Serializes a standard query for the addresses of `host`.
///
/// The message has the given ID, the RD bit set according to
/// `recursion_desired`, and a single IN question whose QTYPE is AAAA if
/// `ipv6` is set and A otherwise.
pub fn build_query(
    host: &Name,
    recursion_desired: bool,
    ipv6: bool,
    id: u16,
) -> writer::Result<Vec<u8>> {
    let mut writer = Writer::new(Header::query(id, recursion_desired));
    writer.add_question(&Question::for_host(host.clone(), ipv6))?;
    Ok(writer.finish())
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
