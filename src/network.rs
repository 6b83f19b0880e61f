use std::net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket};

/// Non-routable address used only to make the OS pick an outgoing interface
const ROUTE_TARGET: (Ipv4Addr, u16) = (Ipv4Addr::new(10, 255, 255, 255), 1);

/// Discover the current IP address (other than localhost) of this machine
///
/// Connecting a UDP socket sends nothing; it only asks the OS which local
/// address would be used, which is then read back from the socket. If that
/// fails the interface list is consulted, and loopback is the last resort.
pub fn discover_local_address() -> IpAddr {
    match outgoing_address() {
        Ok(ip) => return ip,
        Err(e) => log::debug!("outgoing route lookup failed: {}", e),
    }

    match local_ip_address::local_ip() {
        Ok(ip) => routable(ip).unwrap_or_else(|| {
            log::debug!("interface lookup returned {}, using loopback", ip);
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        }),
        Err(e) => {
            log::debug!("interface lookup failed: {}, using loopback", e);
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        }
    }
}

/// An address other machines on the network could reach us on
fn routable(ip: IpAddr) -> Option<IpAddr> {
    if ip.is_unspecified() || ip.is_loopback() {
        None
    } else {
        Some(ip)
    }
}

fn outgoing_address() -> std::io::Result<IpAddr> {
    let socket = UdpSocket::bind(SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)))?;
    socket.connect(ROUTE_TARGET)?;
    let ip = socket.local_addr()?.ip();

    routable(ip).ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::AddrNotAvailable,
            format!("outgoing route picked {}", ip),
        )
    })
}
