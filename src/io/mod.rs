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

//! The network transport used by the [`Resolver`](crate::resolver::Resolver).
//!
//! The resolver does not talk to sockets directly. It goes through the
//! [`Transport`] trait, which captures the small datagram API it needs:
//! aim at a server, bound the wait for a reply, send one datagram,
//! receive one datagram, and release the socket. [`UdpTransport`]
//! implements it on top of the standard library's UDP sockets; tests
//! substitute an in-memory implementation.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

mod udp;

pub use udp::UdpTransport;

/// The API that a datagram transport must implement to be driven by
/// the [`Resolver`](crate::resolver::Resolver).
pub trait Transport {
    /// Directs subsequent sends and receives to `server`. A transport
    /// may be reconnected any number of times.
    fn connect(&mut self, server: SocketAddr) -> io::Result<()>;

    /// Sets how long [`recv`](Transport::recv) may block. `None` means
    /// it blocks indefinitely.
    fn set_read_timeout(&mut self, timeout: Option<Duration>) -> io::Result<()>;

    /// Sends a single datagram to the connected server.
    fn send(&mut self, datagram: &[u8]) -> io::Result<()>;

    /// Receives a single datagram into `buf`, returning its length. A
    /// datagram longer than `buf` is truncated. When the read timeout
    /// expires, this fails with an error for which [`is_timeout`]
    /// returns `true`.
    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Releases any underlying socket. The transport may be connected
    /// again afterwards.
    fn close(&mut self);
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn connect(&mut self, server: SocketAddr) -> io::Result<()> {
        (**self).connect(server)
    }

    fn set_read_timeout(&mut self, timeout: Option<Duration>) -> io::Result<()> {
        (**self).set_read_timeout(timeout)
    }

    fn send(&mut self, datagram: &[u8]) -> io::Result<()> {
        (**self).send(datagram)
    }

    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (**self).recv(buf)
    }

    fn close(&mut self) {
        (**self).close()
    }
}

/// Returns whether `err` signals an expired read timeout. Depending on
/// the platform, the standard library reports these as either
/// [`WouldBlock`](io::ErrorKind::WouldBlock) or
/// [`TimedOut`](io::ErrorKind::TimedOut).
pub fn is_timeout(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_timeout_works() {
        assert!(is_timeout(&io::ErrorKind::WouldBlock.into()));
        assert!(is_timeout(&io::ErrorKind::TimedOut.into()));
        assert!(!is_timeout(&io::ErrorKind::ConnectionRefused.into()));
        assert!(!is_timeout(&io::ErrorKind::Interrupted.into()));
    }
}
