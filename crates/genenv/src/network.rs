//! local address discovery
//!
//! Only private addresses are reported (RFC 1918 for IPv4, unique local `fc00::/7` for IPv6).
//! Loopback and link-local addresses are never returned.
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFamily {
    /// either family, IPv4 preferred
    Any,
    V4,
    V6,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovery {
    Found(IpAddr),
    Unavailable(String),
}

pub trait AddressDiscovery {
    fn discover(&mut self, family: AddressFamily) -> Discovery;
}

/// Finds the address the host would use for outbound traffic
///
/// Connecting a UDP socket selects a route and a source address without sending any packets.
/// The probe targets are documentation ranges that are never actually contacted.
#[derive(Debug, Default, Clone, Copy)]
pub struct RouteDiscovery;

impl RouteDiscovery {
    const PROBE_V4: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)), 9);
    const PROBE_V6: SocketAddr = SocketAddr::new(
        IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1)),
        9,
    );

    fn probe(target: SocketAddr) -> Discovery {
        let bind: SocketAddr = match target {
            SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
            SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
        };

        let local = UdpSocket::bind(bind)
            .and_then(|socket| socket.connect(target).map(|_| socket))
            .and_then(|socket| socket.local_addr());

        match local {
            Ok(addr) if is_private(addr.ip()) => Discovery::Found(addr.ip()),
            Ok(addr) => Discovery::Unavailable(format!("{} is not a private address", addr.ip())),
            Err(err) => Discovery::Unavailable(err.to_string()),
        }
    }
}

impl AddressDiscovery for RouteDiscovery {
    fn discover(&mut self, family: AddressFamily) -> Discovery {
        match family {
            AddressFamily::V4 => Self::probe(Self::PROBE_V4),
            AddressFamily::V6 => Self::probe(Self::PROBE_V6),
            AddressFamily::Any => match Self::probe(Self::PROBE_V4) {
                found @ Discovery::Found(_) => found,
                Discovery::Unavailable(_) => Self::probe(Self::PROBE_V6),
            },
        }
    }
}

pub fn is_private(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_private(),
        IpAddr::V6(v6) => (v6.segments()[0] & 0xfe00) == 0xfc00,
    }
}
