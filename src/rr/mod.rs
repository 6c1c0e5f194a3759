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

//! Data structures and routines for handling DNS resource records.

use std::net::IpAddr;

use crate::class::Class;
use crate::name::Name;

pub mod rdata;
mod rr_type;
mod ttl;
pub use rdata::Rdata;
pub use rr_type::Type;
pub use ttl::Ttl;

/// A resource record as read from a DNS message.
///
/// `rdlength` is the RDLENGTH field as it appeared on the wire. For
/// types that embed compressed domain names, it may differ from the
/// length of the decompressed data in `rdata`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    pub owner: Name,
    pub rr_type: Type,
    pub class: Class,
    pub ttl: Ttl,
    pub rdlength: u16,
    pub rdata: Rdata,
}

impl Record {
    /// Returns the address of an A or AAAA record.
    pub fn address(&self) -> Option<IpAddr> {
        if self.rr_type.is_address() {
            self.rdata.address()
        } else {
            None
        }
    }
}
