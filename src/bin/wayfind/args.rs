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

//! Implements command-line argument parsing.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;

use wayfinder::name::Name;

/// Parses the command line arguments.
pub fn parse() -> Args {
    Args::parse()
}

/// Look up the IP addresses of a host name
#[derive(Debug, Parser)]
#[command(author, version)]
pub struct Args {
    /// The host name to look up
    #[arg(value_name = "NAME")]
    pub name: Name,

    /// Log each decoded response
    #[arg(short, long)]
    pub debug: bool,

    /// Query without recursion, following referrals
    #[arg(short, long)]
    pub nonrecursive: bool,

    /// Set the starting server [default: 8.8.8.8]
    #[arg(short, long, value_name = "IP")]
    pub server: Option<IpAddr>,

    /// Query for AAAA records instead of A records
    #[arg(short = '6', long)]
    pub ipv6: bool,

    /// Set the configuration file to use
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
