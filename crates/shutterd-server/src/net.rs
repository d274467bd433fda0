// ABOUTME: Outbound local-IP discovery for default bind-address selection.
// ABOUTME: Connects a UDP socket toward a public resolver and reads back the chosen source address.

use std::io;
use std::net::{IpAddr, UdpSocket};

/// Discover the local address the OS routes outbound traffic through.
///
/// Connecting a UDP socket sends no packets; it only commits the socket to a
/// route, whose source address is the machine's LAN-facing IP. Fails on
/// hosts with no route to the wider network.
pub fn local_ip() -> io::Result<IpAddr> {
    let socket = UdpSocket::bind(("0.0.0.0", 0))?;
    socket.connect(("8.8.8.8", 80))?;
    Ok(socket.local_addr()?.ip())
}
