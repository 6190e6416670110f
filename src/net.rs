use std::io;
use std::net::{IpAddr, UdpSocket};

/// Best-effort discovery of the LAN-routable IP address, used only for the
/// startup banner. Connecting a UDP socket makes the OS pick a source address
/// for the route; no datagrams are actually sent.
pub fn local_ip() -> io::Result<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0")?;
    socket.connect("8.8.8.8:80")?;
    Ok(socket.local_addr()?.ip())
}
