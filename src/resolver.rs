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

//! The iterative stub [`Resolver`].
//!
//! A resolution starts by sending a query for the A (or AAAA) records
//! of a host to a starting server. If the server answers, we are done.
//! If it does not, and recursion was not requested, the address records
//! in the additional section of its response are taken as referrals
//! (glue for the servers it delegates to), and each is queried in turn,
//! depth first and in section order, until some server answers. The
//! same host name is asked about throughout.
//!
//! Referrals are followed with an explicit stack rather than recursion.
//! Each server is queried at most once per resolution, and referral
//! chains longer than [`ResolverConfig::max_referral_depth`] are cut
//! off.
//!
//! Failures talking to the starting server are returned as [`Error`]s.
//! Failures talking to a referred-to server are logged and the next
//! candidate is tried.

use std::collections::HashSet;
use std::fmt;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::io::{is_timeout, Transport};
use crate::message::{self, reader, writer, Message};
use crate::name::Name;
use crate::rr::{Record, Type};

////////////////////////////////////////////////////////////////////////
// CONFIGURATION                                                      //
////////////////////////////////////////////////////////////////////////

/// Tunable parameters of a [`Resolver`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolverConfig {
    /// The destination port of every query.
    pub port: u16,

    /// How long to wait for each response.
    pub timeout: Duration,

    /// The maximum number of referrals followed from the starting
    /// server to any one server.
    pub max_referral_depth: usize,

    /// The size of the buffer responses are received into. Longer
    /// datagrams are truncated.
    pub receive_buffer_size: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            port: 53,
            timeout: Duration::from_secs(5),
            max_referral_depth: 16,
            receive_buffer_size: 1024,
        }
    }
}

////////////////////////////////////////////////////////////////////////
// OUTCOMES                                                           //
////////////////////////////////////////////////////////////////////////

/// The result of a resolution that did not fail outright.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Some server returned a non-empty answer section.
    Resolved(Resolved),

    /// Every server reached returned no answers, and there were no
    /// (further) referrals to follow.
    Exhausted,
}

/// The answer produced by a resolution.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Resolved {
    /// The server that answered.
    pub server: IpAddr,

    /// The server's answer section.
    pub answers: Vec<Record>,
}

impl Resolved {
    /// Returns the addresses of the A and AAAA records among the
    /// answers, in order.
    pub fn addresses(&self) -> impl Iterator<Item = IpAddr> + '_ {
        self.answers.iter().filter_map(Record::address)
    }
}

////////////////////////////////////////////////////////////////////////
// RESOLVER                                                           //
////////////////////////////////////////////////////////////////////////

/// An iterative stub resolver.
///
/// The resolver owns a [`Transport`] and the random number generator
/// that message IDs are drawn from. See the [module-level
/// documentation](self) for the resolution procedure.
pub struct Resolver<T, R = StdRng> {
    transport: T,
    rng: R,
    config: ResolverConfig,
}

/// A query waiting to be made.
#[derive(Clone, Copy, Debug)]
struct Step {
    server: IpAddr,
    recursion_desired: bool,
    ipv6: bool,
    depth: usize,
}

impl<T: Transport> Resolver<T, StdRng> {
    /// Creates a resolver whose message IDs come from an
    /// entropy-seeded [`StdRng`].
    pub fn new(transport: T, config: ResolverConfig) -> Self {
        Self::with_rng(transport, StdRng::from_entropy(), config)
    }
}

impl<T: Transport, R: Rng> Resolver<T, R> {
    /// Creates a resolver drawing message IDs from `rng`.
    pub fn with_rng(transport: T, rng: R, config: ResolverConfig) -> Self {
        Self {
            transport,
            rng,
            config,
        }
    }

    /// Resolves the addresses of `host`, starting at `server`.
    ///
    /// With `recursion_desired` set, the starting server is asked to
    /// recurse and no referrals are followed. With `ipv6` set, the
    /// starting server is asked for AAAA records instead of A records.
    /// The transport is closed before this returns.
    pub fn resolve(
        &mut self,
        host: &Name,
        server: IpAddr,
        recursion_desired: bool,
        ipv6: bool,
    ) -> Result<Outcome, Error> {
        let start = Step {
            server,
            recursion_desired,
            ipv6,
            depth: 0,
        };
        let result = self.iterate(host, start);
        self.transport.close();
        match result {
            Ok(Outcome::Resolved(ref resolved)) => {
                info!("Resolved {} with an answer from {}.", host, resolved.server)
            }
            Ok(Outcome::Exhausted) => info!("No server had an answer for {}.", host),
            Err(ref e) => info!("Resolution of {} failed: {}", host, e),
        }
        result
    }

    fn iterate(&mut self, host: &Name, start: Step) -> Result<Outcome, Error> {
        let mut buf = vec![0; self.config.receive_buffer_size];
        let mut visited = HashSet::new();
        let mut pending = vec![start];

        while let Some(step) = pending.pop() {
            if !visited.insert(step.server) {
                debug!("Skipping {}, which was already queried.", step.server);
                continue;
            }

            let response = match self.query(host, step, &mut buf) {
                Ok(response) => response,
                Err(e) if step.depth == 0 => return Err(e),
                Err(e) => {
                    warn!("Skipping referral to {}: {}", step.server, e);
                    continue;
                }
            };

            if !response.answers.is_empty() {
                return Ok(Outcome::Resolved(Resolved {
                    server: step.server,
                    answers: response.answers,
                }));
            }
            if step.recursion_desired {
                continue;
            }

            let referrals: Vec<Step> = response
                .additional
                .iter()
                .filter_map(|rr| {
                    rr.address().map(|server| Step {
                        server,
                        recursion_desired: false,
                        ipv6: rr.rr_type == Type::AAAA,
                        depth: step.depth + 1,
                    })
                })
                .collect();
            if referrals.is_empty() {
                continue;
            }
            if step.depth >= self.config.max_referral_depth {
                warn!(
                    "Dropping {} referral(s) from {}: the maximum referral depth of {} was reached.",
                    referrals.len(),
                    step.server,
                    self.config.max_referral_depth,
                );
                continue;
            }
            debug!("Following {} referral(s) from {}.", referrals.len(), step.server);

            // The stack pops from the end, so push in reverse to visit
            // referrals in section order.
            pending.extend(referrals.into_iter().rev());
        }

        Ok(Outcome::Exhausted)
    }

    /// Makes a single query and decodes the response.
    fn query(&mut self, host: &Name, step: Step, buf: &mut [u8]) -> Result<Message, Error> {
        let server = SocketAddr::new(step.server, self.config.port);
        self.transport
            .connect(server)
            .map_err(|source| Error::Connect { server, source })?;
        self.transport
            .set_read_timeout(Some(self.config.timeout))
            .map_err(|source| Error::Io { server, source })?;

        let id = self.rng.gen();
        let query = message::build_query(host, step.recursion_desired, step.ipv6, id)
            .map_err(Error::Encode)?;
        debug!(
            "Sending query {:#06x} for {} {} to {} (RD={}).",
            id,
            host,
            if step.ipv6 { Type::AAAA } else { Type::A },
            server,
            step.recursion_desired,
        );
        self.transport
            .send(&query)
            .map_err(|source| Error::Io { server, source })?;

        let len = match self.transport.recv(buf) {
            Ok(len) => len,
            Err(e) if is_timeout(&e) => return Err(Error::TimedOut { server }),
            Err(source) => return Err(Error::Io { server, source }),
        };
        let response = Message::decode(&buf[..len.min(buf.len())])
            .map_err(|source| Error::Malformed { server, source })?;
        debug!("Response from {}:\n{}", server, response);
        Ok(response)
    }
}

impl<T, R> fmt::Debug for Resolver<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

////////////////////////////////////////////////////////////////////////
// ERRORS                                                             //
////////////////////////////////////////////////////////////////////////

/// An error that ended a resolution.
#[derive(Debug)]
pub enum Error {
    /// The transport could not be connected to the server.
    Connect {
        server: SocketAddr,
        source: io::Error,
    },

    /// Sending or receiving failed for a reason other than a timeout.
    Io {
        server: SocketAddr,
        source: io::Error,
    },

    /// The server did not respond within the timeout.
    TimedOut { server: SocketAddr },

    /// The server's response could not be decoded.
    Malformed {
        server: SocketAddr,
        source: reader::Error,
    },

    /// The query could not be serialized.
    Encode(writer::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Connect { server, .. } => write!(f, "unable to connect to server {}", server),
            Self::Io { server, .. } => write!(f, "I/O error talking to server {}", server),
            Self::TimedOut { server } => write!(f, "timed out waiting for server {}", server),
            Self::Malformed { server, .. } => {
                write!(f, "malformed response from server {}", server)
            }
            Self::Encode(_) => f.write_str("failed to build the query"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Connect { source, .. } | Self::Io { source, .. } => Some(source),
            Self::TimedOut { .. } => None,
            Self::Malformed { source, .. } => Some(source),
            Self::Encode(e) => Some(e),
        }
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
