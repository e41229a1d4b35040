//! Turn numeric host literals into socket addresses.
use std::fmt::{Display, Formatter};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use log::error;

use crate::error::KnockError;
use crate::models::Family;

/// A destination address whose family is known to match the knock family.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ResolvedAddress {
    family: Family,
    addr: SocketAddr,
}

impl ResolvedAddress {
    pub fn family(&self) -> Family {
        self.family
    }

    pub fn socket_addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn ip(&self) -> IpAddr {
        self.addr.ip()
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

impl Display for ResolvedAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.addr)
    }
}

/// Parse `host` as a literal address of `family`.
///
/// No DNS resolution is performed: hostnames, and literals of the other family, are rejected.
/// Port 0 is rejected as well since it cannot be the destination of a knock.
///
/// ```
/// use portknock::models::Family;
/// use portknock::resolver::resolve;
///
/// let addr = resolve(Family::IPv6, "2001:db8::1", 7000).unwrap();
/// assert_eq!(addr.to_string(), "[2001:db8::1]:7000");
/// assert!(resolve(Family::IPv4, "2001:db8::1", 7000).is_err());
/// ```
pub fn resolve(family: Family, host: &str, port: u16) -> Result<ResolvedAddress, KnockError> {
    let invalid = |reason: &str| {
        error!("resolve family={} host={:?} error={}", family, host, reason);
        KnockError::Address {
            family,
            host: host.to_string(),
            reason: reason.to_string(),
        }
    };

    let ip = match family {
        Family::IPv4 => host
            .parse::<Ipv4Addr>()
            .map(IpAddr::V4)
            .map_err(|_| invalid("not an IPv4 literal"))?,
        Family::IPv6 => host
            .parse::<Ipv6Addr>()
            .map(IpAddr::V6)
            .map_err(|_| invalid("not an IPv6 literal"))?,
    };

    if port == 0 {
        return Err(invalid("port 0 is not a valid destination"));
    }

    Ok(ResolvedAddress {
        family,
        addr: SocketAddr::new(ip, port),
    })
}
