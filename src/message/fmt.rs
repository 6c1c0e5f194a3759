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

//! [`Display`](fmt::Display) implementations that render a
//! human-readable dump of a message, for debug logging.
//!
//! Each item renders as a title line followed by indented
//! `Field: value` lines. No trailing newline is written.

use std::fmt;

use super::{Header, Message, Question};
use crate::rr::{Rdata, Record};

const INDENT: &str = "    ";

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("MESSAGE HEADER")?;
        write!(f, "\n{}Message ID: {:#06x}", INDENT, self.id)?;
        let kind = if self.qr { "response" } else { "query" };
        write!(f, "\n{}Query/Response: {}", INDENT, kind)?;
        write!(f, "\n{}Opcode: {} ({})", INDENT, u8::from(self.opcode), self.opcode)?;
        write!(f, "\n{}Authoritative Answer: {}", INDENT, self.aa)?;
        write!(f, "\n{}Truncation: {}", INDENT, self.tc)?;
        write!(f, "\n{}Recursion Desired: {}", INDENT, self.rd)?;
        write!(f, "\n{}Recursion Available: {}", INDENT, self.ra)?;
        write!(f, "\n{}Response Code: {} (", INDENT, u8::from(self.rcode))?;
        match self.rcode.description() {
            Some(description) => f.write_str(description)?,
            None => fmt::Display::fmt(&self.rcode, f)?,
        }
        f.write_str(")")?;
        write!(f, "\n{}Questions: {}", INDENT, self.qdcount)?;
        write!(f, "\n{}Answers: {}", INDENT, self.ancount)?;
        write!(f, "\n{}Authority RRs: {}", INDENT, self.nscount)?;
        write!(f, "\n{}Additional RRs: {}", INDENT, self.arcount)
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}Name: {}", INDENT, self.qname)?;
        write!(f, "\n{}Type: {}", INDENT, self.qtype)?;
        write!(f, "\n{}Class: {}", INDENT, self.qclass)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}Name: {}", INDENT, self.owner)?;
        write!(f, "\n{}Type: {}", INDENT, self.rr_type)?;
        write!(f, "\n{}Class: {}", INDENT, self.class)?;
        write!(f, "\n{}TTL: {}", INDENT, self.ttl)?;
        let label = match self.rdata {
            Rdata::A(_) => "A",
            Rdata::Aaaa(_) => "AAAA",
            Rdata::Ns(_) => "NS",
            Rdata::Cname(_) => "CNAME",
            Rdata::Mx { .. } => "MX",
            Rdata::Unknown(_) => "Data",
        };
        write!(f, "\n{}{}: {}", INDENT, label, self.rdata)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.header, f)?;
        for (i, question) in self.questions.iter().enumerate() {
            write!(f, "\nQUESTION[{}]\n{}", i, question)?;
        }
        write_section(f, "ANSWER", &self.answers)?;
        write_section(f, "AUTHORITY_RR", &self.authority)?;
        write_section(f, "ADDITIONAL_RR", &self.additional)
    }
}

fn write_section(f: &mut fmt::Formatter, title: &str, records: &[Record]) -> fmt::Result {
    for (i, record) in records.iter().enumerate() {
        write!(f, "\n{}[{}]\n{}", title, i, record)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_dump_works() {
        let message = Message::decode(
            b"\x12\x34\x85\x83\x00\x01\x00\x01\x00\x00\x00\x00\
              \x07example\x00\x00\x0f\x00\x01\
              \xc0\x0c\x00\x0f\x00\x01\x00\x00\x0e\x10\x00\x07\x00\x0a\x02mx\xc0\x0c",
        )
        .unwrap();
        assert_eq!(
            message.to_string(),
            "MESSAGE HEADER\n\
             \x20   Message ID: 0x1234\n\
             \x20   Query/Response: response\n\
             \x20   Opcode: 0 (QUERY)\n\
             \x20   Authoritative Answer: true\n\
             \x20   Truncation: false\n\
             \x20   Recursion Desired: true\n\
             \x20   Recursion Available: true\n\
             \x20   Response Code: 3 (Name error)\n\
             \x20   Questions: 1\n\
             \x20   Answers: 1\n\
             \x20   Authority RRs: 0\n\
             \x20   Additional RRs: 0\n\
             QUESTION[0]\n\
             \x20   Name: example\n\
             \x20   Type: MX\n\
             \x20   Class: IN\n\
             ANSWER[0]\n\
             \x20   Name: example\n\
             \x20   Type: MX\n\
             \x20   Class: IN\n\
             \x20   TTL: 3600\n\
             \x20   MX: 10 mx.example"
        );
    }

    #[test]
    fn unknown_values_display_as_numbers() {
        let message = Message::decode(
            b"\x00\x01\x78\x0f\x00\x00\x00\x01\x00\x00\x00\x00\
              \x00\x00\x63\x00\x07\x00\x00\x00\x00\x00\x02\xab\xcd",
        )
        .unwrap();
        let dump = message.to_string();
        assert!(dump.contains("Opcode: 15 (15)"));
        assert!(dump.contains("Response Code: 15 (15)"));
        assert!(dump.contains(
            "ANSWER[0]\n    Name: .\n    Type: TYPE99\n    Class: CLASS7\n    TTL: 0\n    Data: \\# 2 abcd"
        ));
    }
}
