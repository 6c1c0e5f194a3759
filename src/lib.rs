// Copyright 2022 Matthew Ingwersen.
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

//! Wayfinder is a small iterative DNS stub resolver.
//!
//! The crate is split into the on-the-wire codec ([`name`],
//! [`message`], and [`rr`]), a narrow [transport abstraction](io), and
//! the [`Resolver`](resolver::Resolver), which sends a query to a
//! starting server and, in non-recursive mode, follows referrals
//! through glue records in the additional section until some server
//! produces an answer.

pub mod class;
pub mod io;
pub mod message;
pub mod name;
pub mod resolver;
pub mod rr;
mod util;
