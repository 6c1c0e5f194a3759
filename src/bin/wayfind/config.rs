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

//! Implements the configuration file.

use std::fs;
use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use log::Level::Debug;
use log::{debug, log_enabled};
use serde::Deserialize;

use wayfinder::message::HEADER_SIZE;
use wayfinder::resolver::ResolverConfig;

////////////////////////////////////////////////////////////////////////
// CONFIGURATION LOADING                                              //
////////////////////////////////////////////////////////////////////////

/// Loads the configuration, from the file given by `path` if there is
/// one and from the defaults otherwise. A `server` given on the
/// command line overrides the configured one.
pub fn load(path: Option<&Path>, server: Option<IpAddr>) -> Result<Config> {
    let mut config = match path {
        Some(path) => load_from_path(path)?,
        None => Config::default(),
    };
    if let Some(server) = server {
        config.server = server;
    }
    config.validate()?;
    log_config_summary(&config);
    Ok(config)
}

/// Loads the configuration from the file given by `path`.
fn load_from_path(path: &Path) -> Result<Config> {
    let raw_config = fs::read(path).context("failed to read the configuration file")?;
    toml::from_slice(&raw_config).context("failed to parse the configuration file")
}

/// Summarizes the configuration in the log, if the debug log level is
/// enabled.
fn log_config_summary(config: &Config) {
    if log_enabled!(Debug) {
        debug!(
            "Configuration loaded:\n\
             Server:             {}\n\
             Port:               {}\n\
             Timeout:            {} s\n\
             Max referral depth: {}\n\
             Receive buffer:     {} octets",
            config.server,
            config.port,
            config.timeout,
            config.max_referral_depth,
            config.receive_buffer_size,
        );
    }
}

////////////////////////////////////////////////////////////////////////
// CONFIGURATION FILE STRUCTURE                                       //
////////////////////////////////////////////////////////////////////////

/// The complete configuration file.
#[derive(Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_server")]
    pub server: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default = "default_max_referral_depth")]
    pub max_referral_depth: usize,
    #[serde(default = "default_receive_buffer_size")]
    pub receive_buffer_size: usize,
}

impl Config {
    /// Returns the parameters for the
    /// [`Resolver`](wayfinder::resolver::Resolver).
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            port: self.port,
            timeout: Duration::from_secs(self.timeout),
            max_referral_depth: self.max_referral_depth,
            receive_buffer_size: self.receive_buffer_size,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.timeout == 0 {
            Err(anyhow!("the timeout must be at least one second"))
        } else if self.receive_buffer_size < HEADER_SIZE {
            Err(anyhow!(
                "the receive buffer must hold at least a message header ({} octets)",
                HEADER_SIZE,
            ))
        } else {
            Ok(())
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: default_server(),
            port: default_port(),
            timeout: default_timeout(),
            max_referral_depth: default_max_referral_depth(),
            receive_buffer_size: default_receive_buffer_size(),
        }
    }
}

fn default_server() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8))
}

fn default_port() -> u16 {
    53
}

fn default_timeout() -> u64 {
    5
}

fn default_max_referral_depth() -> usize {
    16
}

fn default_receive_buffer_size() -> usize {
    1024
}
