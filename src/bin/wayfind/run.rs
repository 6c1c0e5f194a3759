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

//! Implements running a lookup.

use std::fmt::Write as _;
use std::io::{self, Write as _};
use std::process;

use anyhow::{Context, Result};
use env_logger::Env;
use log::{error, info};

use wayfinder::io::UdpTransport;
use wayfinder::resolver::{Outcome, Resolver};

use crate::args::Args;
use crate::config;

/// Runs the lookup described by `args` and prints the addresses found,
/// one per line.
pub fn run(args: Args) {
    let default_filter = if args.debug { "debug" } else { "warn" };
    env_logger::init_from_env(Env::new().default_filter_or(default_filter));

    if let Err(e) = try_running(args) {
        let mut message = String::from("Failed to run:");
        for (i, cause) in e.chain().enumerate() {
            write!(message, "\n[{}] {}", i + 1, cause).unwrap();
        }
        message.push_str("\nExiting with failure.");
        error!("{}", message);
        process::exit(1);
    }
}

fn try_running(args: Args) -> Result<()> {
    info!(
        "wayfind v{}.{}.{} starting.",
        env!("CARGO_PKG_VERSION_MAJOR"),
        env!("CARGO_PKG_VERSION_MINOR"),
        env!("CARGO_PKG_VERSION_PATCH"),
    );

    let config = config::load(args.config.as_deref(), args.server)
        .context("failed to load the configuration")?;
    let mut resolver = Resolver::new(UdpTransport::new(), config.resolver_config());
    let outcome = resolver
        .resolve(&args.name, config.server, !args.nonrecursive, args.ipv6)
        .with_context(|| format!("failed to look up {}", args.name))?;

    if let Outcome::Resolved(resolved) = outcome {
        let mut stdout = io::stdout().lock();
        for address in resolved.addresses() {
            writeln!(stdout, "{}", address).context("failed to write to standard output")?;
        }
    }
    Ok(())
}
