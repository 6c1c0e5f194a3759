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

//! Implementation of the [`Rdata`] type and DNS RDATA processing.

use std::fmt::{self, Write};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use super::Type;
use crate::name::{self, Name};
use crate::util::nibble_to_ascii_hex_digit;

////////////////////////////////////////////////////////////////////////
// RDATA TYPE                                                         //
////////////////////////////////////////////////////////////////////////

/// The decoded RDATA of a resource record.
///
/// The variant is selected by the record's [`Type`] alone; see
/// [`Rdata::read`]. Types without a dedicated variant are kept as
/// [`Rdata::Unknown`], so an unrecognized type is never an error.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Rdata {
    /// An IPv4 host address ([RFC 1035 § 3.4.1]).
    ///
    /// [RFC 1035 § 3.4.1]: https://datatracker.ietf.org/doc/html/rfc1035#section-3.4.1
    A(Ipv4Addr),

    /// An authoritative name server.
    Ns(Name),

    /// The canonical name for an alias.
    Cname(Name),

    /// A mail exchange and its preference.
    Mx { preference: u16, exchange: Name },

    /// An IPv6 host address ([RFC 3596 § 2.2]).
    ///
    /// [RFC 3596 § 2.2]: https://datatracker.ietf.org/doc/html/rfc3596#section-2.2
    Aaaa(Ipv6Addr),

    /// RDATA of any other type, uninterpreted.
    Unknown(Box<[u8]>),
}

impl Rdata {
    /// Reads RDATA of type `rr_type` and length `rdlength` starting
    /// from `&message[cursor]`.
    ///
    /// The behavior is as follows:
    ///
    /// * NS and CNAME RDATA is a single domain name, and MX RDATA is a
    ///   16-bit preference followed by a domain name. These names may
    ///   be compressed, so they are parsed against the whole message.
    /// * A and AAAA RDATA must be exactly 4 and 16 octets long.
    /// * RDATA of any other type is copied without interpretation.
    ///
    /// If the remaining part of the message is not `rdlength` long,
    /// this function will fail with [`ReadRdataError::UnexpectedEom`],
    /// rather than panic. Thus it's okay to call this without
    /// validating `rdlength` first.
    pub fn read(
        rr_type: Type,
        message: &[u8],
        cursor: usize,
        rdlength: u16,
    ) -> Result<Self, ReadRdataError> {
        let rdata = message
            .get(cursor..cursor + rdlength as usize)
            .ok_or(ReadRdataError::UnexpectedEom)?;

        match rr_type {
            Type::A => {
                let octets: [u8; 4] = rdata.try_into().or(Err(ReadRdataError::Other))?;
                Ok(Self::A(octets.into()))
            }
            Type::NS => Ok(Self::Ns(Name::try_from_compressed(message, cursor)?.0)),
            Type::CNAME => Ok(Self::Cname(Name::try_from_compressed(message, cursor)?.0)),
            Type::MX => {
                let preference = rdata
                    .get(0..2)
                    .map(|p| u16::from_be_bytes([p[0], p[1]]))
                    .ok_or(ReadRdataError::UnexpectedEom)?;
                let (exchange, _) = Name::try_from_compressed(message, cursor + 2)?;
                Ok(Self::Mx {
                    preference,
                    exchange,
                })
            }
            Type::AAAA => {
                let octets: [u8; 16] = rdata.try_into().or(Err(ReadRdataError::Other))?;
                Ok(Self::Aaaa(octets.into()))
            }
            _ => Ok(Self::Unknown(rdata.into())),
        }
    }

    /// Returns the address carried by A and AAAA RDATA.
    pub fn address(&self) -> Option<IpAddr> {
        match *self {
            Self::A(address) => Some(address.into()),
            Self::Aaaa(address) => Some(address.into()),
            _ => None,
        }
    }
}

impl fmt::Display for Rdata {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::A(address) => fmt::Display::fmt(address, f),
            Self::Aaaa(address) => fmt::Display::fmt(address, f),
            Self::Ns(name) | Self::Cname(name) => fmt::Display::fmt(name, f),
            Self::Mx {
                preference,
                exchange,
            } => write!(f, "{} {}", preference, exchange),
            Self::Unknown(octets) => {
                // We output using the RFC 3597 format for RDATA of
                // unknown type.
                write!(f, "\\# {}", octets.len())?;
                if !octets.is_empty() {
                    f.write_char(' ')?;
                    for &octet in octets.iter() {
                        f.write_char(char::from(nibble_to_ascii_hex_digit(octet >> 4)))?;
                        f.write_char(char::from(nibble_to_ascii_hex_digit(octet & 0xf)))?;
                    }
                }
                Ok(())
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////
// ERRORS                                                             //
////////////////////////////////////////////////////////////////////////

/// An error signaling that RDATA could not be read.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ReadRdataError {
    InvalidName(name::Error),
    UnexpectedEom,
    Other,
}

impl fmt::Display for ReadRdataError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidName(err) => write!(f, "invalid embedded domain name: {}", err),
            Self::UnexpectedEom => f.write_str("unexpected end of message in RDATA"),
            Self::Other => f.write_str("invalid RDATA"),
        }
    }
}

impl std::error::Error for ReadRdataError {}

impl From<name::Error> for ReadRdataError {
    fn from(err: name::Error) -> Self {
        Self::InvalidName(err)
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_a() {
        let rdata = Rdata::read(Type::A, b"\xad\xc0\xdc\x40", 0, 4).unwrap();
        assert_eq!(rdata, Rdata::A(Ipv4Addr::new(173, 192, 220, 64)));
        assert_eq!(rdata.to_string(), "173.192.220.64");
        assert_eq!(rdata.address(), Some("173.192.220.64".parse().unwrap()));
    }

    #[test]
    fn reads_aaaa() {
        let mut octets = [0; 16];
        octets[15] = 1;
        let rdata = Rdata::read(Type::AAAA, &octets, 0, 16).unwrap();
        assert_eq!(rdata, Rdata::Aaaa(Ipv6Addr::LOCALHOST));
        assert!(rdata.to_string().ends_with("::1"));

        let octets = b"\x20\x01\x0d\xb8\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x35";
        let rdata = Rdata::read(Type::AAAA, octets, 0, 16).unwrap();
        assert_eq!(rdata.to_string(), "2001:db8::35");
    }

    #[test]
    fn rejects_addresses_of_wrong_length() {
        let octets = [0; 17];
        assert_eq!(
            Rdata::read(Type::A, &octets, 0, 5),
            Err(ReadRdataError::Other)
        );
        assert_eq!(
            Rdata::read(Type::AAAA, &octets, 0, 15),
            Err(ReadRdataError::Other)
        );
    }

    #[test]
    fn reads_compressed_names_against_the_whole_message() {
        // The RDATA at 13 is "wdc" followed by a pointer to 0.
        let message = b"\x07bluekai\x03com\x00\x03wdc\xc0\x00";
        let rdata = Rdata::read(Type::CNAME, message, 13, 6).unwrap();
        assert_eq!(rdata, Rdata::Cname("wdc.bluekai.com".parse().unwrap()));
        let rdata = Rdata::read(Type::NS, message, 13, 6).unwrap();
        assert_eq!(rdata.to_string(), "wdc.bluekai.com");
    }

    #[test]
    fn reads_mx() {
        let message = b"\x07example\x00\x00\x0a\x04mail\xc0\x00";
        let rdata = Rdata::read(Type::MX, message, 9, 9).unwrap();
        assert_eq!(
            rdata,
            Rdata::Mx {
                preference: 10,
                exchange: "mail.example".parse().unwrap()
            }
        );
        assert_eq!(rdata.to_string(), "10 mail.example");
        assert_eq!(rdata.address(), None);
    }

    #[test]
    fn keeps_unknown_types_uninterpreted() {
        let rdata = Rdata::read(Type::TXT, b"junk\x03abc", 4, 4).unwrap();
        assert_eq!(rdata, Rdata::Unknown(Box::from(&b"\x03abc"[..])));
        assert_eq!(rdata.to_string(), "\\# 4 03616263");
        let rdata = Rdata::read(Type::from(0xff00), b"", 0, 0).unwrap();
        assert_eq!(rdata.to_string(), "\\# 0");
    }

    #[test]
    fn read_handles_short_messages() {
        let too_short = [0; 5];
        for i in 0..=u16::MAX {
            assert_eq!(
                Rdata::read(Type::from(i), &too_short[..], 2, 4),
                Err(ReadRdataError::UnexpectedEom),
            );
        }
    }
}
