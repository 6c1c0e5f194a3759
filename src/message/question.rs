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

//! Implementation of types relating to DNS questions.

use crate::class::Class;
use crate::name::Name;
use crate::rr::Type;

/// The question of a DNS query.
///
/// Defined in [RFC 1035 § 4.1.2], a DNS question includes
///
/// * the QNAME, which is the domain name whose records are being
///   queried;
/// * the QTYPE, which specifies what types of records are desired; and
/// * the QCLASS, which specifies which DNS class(es) to search.
///
/// While the original specification does not rule out having multiple
/// questions per message, in practice only one question per message is
/// used.
///
/// [RFC 1035 § 4.1.2]: https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.2
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Question {
    pub qname: Name,
    pub qtype: Type,
    pub qclass: Class,
}

impl Question {
    /// Creates the question for an address lookup of `host` in class
    /// IN. The QTYPE is AAAA if `ipv6` is set, and A otherwise.
    pub fn for_host(host: Name, ipv6: bool) -> Self {
        Self {
            qname: host,
            qtype: if ipv6 { Type::AAAA } else { Type::A },
            qclass: Class::IN,
        }
    }

    /// Appends the on-the-wire representation of the question to `buf`.
    pub fn write_to(&self, buf: &mut Vec<u8>) {
        self.qname.write_wire_repr(buf);
        buf.extend_from_slice(&u16::from(self.qtype).to_be_bytes());
        buf.extend_from_slice(&u16::from(self.qclass).to_be_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_host_selects_qtype() {
        let host: Name = "anytask.urgu.org".parse().unwrap();
        let v4 = Question::for_host(host.clone(), false);
        let v6 = Question::for_host(host, true);
        assert_eq!(v4.qtype, Type::A);
        assert_eq!(v6.qtype, Type::AAAA);
        assert_eq!(v4.qclass, Class::IN);
        assert_eq!(v6.qclass, Class::IN);
    }

    #[test]
    fn write_to_works() {
        let question = Question::for_host("a.collective-media.net".parse().unwrap(), false);
        let mut buf = Vec::new();
        question.write_to(&mut buf);
        assert_eq!(
            buf,
            b"\x01a\x10collective-media\x03net\x00\x00\x01\x00\x01".to_vec()
        );
    }
}
