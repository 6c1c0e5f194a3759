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

//! A [`Transport`] implementation on the standard library's UDP
//! sockets.

use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};
use std::time::Duration;

use super::Transport;

/// A UDP [`Transport`].
///
/// The socket is bound lazily, to the unspecified address of the
/// server's family, on the first [`connect`](Transport::connect). Later
/// connects reuse it, and a new socket is bound only when the address
/// family changes. The read timeout survives rebinding.
#[derive(Debug, Default)]
pub struct UdpTransport {
    socket: Option<UdpSocket>,
    read_timeout: Option<Duration>,
}

impl UdpTransport {
    /// Creates a new transport with no socket bound yet.
    pub fn new() -> Self {
        Self::default()
    }

    fn socket(&self) -> io::Result<&UdpSocket> {
        self.socket
            .as_ref()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "transport is not connected"))
    }
}

impl Transport for UdpTransport {
    fn connect(&mut self, server: SocketAddr) -> io::Result<()> {
        let reusable = match self.socket {
            Some(ref socket) => socket.local_addr()?.is_ipv4() == server.is_ipv4(),
            None => false,
        };
        if !reusable {
            let local: SocketAddr = if server.is_ipv4() {
                (Ipv4Addr::UNSPECIFIED, 0).into()
            } else {
                (Ipv6Addr::UNSPECIFIED, 0).into()
            };
            let socket = UdpSocket::bind(local)?;
            socket.set_read_timeout(self.read_timeout)?;
            self.socket = Some(socket);
        }
        self.socket()?.connect(server)
    }

    fn set_read_timeout(&mut self, timeout: Option<Duration>) -> io::Result<()> {
        if let Some(ref socket) = self.socket {
            socket.set_read_timeout(timeout)?;
        }
        self.read_timeout = timeout;
        Ok(())
    }

    fn send(&mut self, datagram: &[u8]) -> io::Result<()> {
        let sent = self.socket()?.send(datagram)?;
        if sent == datagram.len() {
            Ok(())
        } else {
            Err(io::Error::new(io::ErrorKind::WriteZero, "datagram was only partially sent"))
        }
    }

    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let socket = self.socket()?;
        loop {
            match socket.recv(buf) {
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                result => return result,
            }
        }
    }

    fn close(&mut self) {
        self.socket = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::is_timeout;

    fn loopback_peer() -> UdpSocket {
        UdpSocket::bind((Ipv4Addr::LOCALHOST, 0)).unwrap()
    }

    #[test]
    fn exchange_works() {
        let peer = loopback_peer();
        let mut transport = UdpTransport::new();
        transport.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
        transport.connect(peer.local_addr().unwrap()).unwrap();
        transport.send(b"ping").unwrap();

        let mut buf = [0; 16];
        let (len, from) = peer.recv_from(&mut buf).unwrap();
        assert_eq!(&buf[..len], b"ping");
        peer.send_to(b"pong", from).unwrap();

        let len = transport.recv(&mut buf).unwrap();
        assert_eq!(&buf[..len], b"pong");
    }

    #[test]
    fn reconnect_reuses_socket_within_family() {
        let first = loopback_peer();
        let second = loopback_peer();
        let mut transport = UdpTransport::new();
        transport.connect(first.local_addr().unwrap()).unwrap();
        let local = transport.socket().unwrap().local_addr().unwrap();
        transport.connect(second.local_addr().unwrap()).unwrap();
        assert_eq!(transport.socket().unwrap().local_addr().unwrap(), local);
    }

    #[test]
    fn recv_times_out() {
        let peer = loopback_peer();
        let mut transport = UdpTransport::new();
        transport.connect(peer.local_addr().unwrap()).unwrap();
        transport.set_read_timeout(Some(Duration::from_millis(50))).unwrap();
        let err = transport.recv(&mut [0; 16]).unwrap_err();
        assert!(is_timeout(&err));
    }

    #[test]
    fn unconnected_transport_fails() {
        let mut transport = UdpTransport::new();
        assert_eq!(
            transport.send(b"ping").unwrap_err().kind(),
            io::ErrorKind::NotConnected
        );
        transport.connect(loopback_peer().local_addr().unwrap()).unwrap();
        transport.close();
        assert_eq!(
            transport.recv(&mut [0; 16]).unwrap_err().kind(),
            io::ErrorKind::NotConnected
        );
    }
}
