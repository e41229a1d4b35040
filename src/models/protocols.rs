use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use pnet::packet::icmp::IcmpTypes;
use pnet::packet::icmpv6::Icmpv6Types;
use socket2::{Domain, Protocol};
use strum::{Display, EnumString};

/// Size of the ICMP and ICMPv6 echo headers.
pub const ICMP_HEADER_SIZE: usize = 8;

/// Size of an IPv4 header without options.
pub const MIN_IPV4_HEADER_SIZE: u16 = 20;

/// Size of an IPv4 header with the maximum amount of options.
pub const MAX_IPV4_HEADER_SIZE: u16 = 60;

/// Size of the fixed IPv6 header.
pub const IPV6_HEADER_SIZE: u16 = 40;

/// Largest IP datagram.
pub const MAX_PACKET_SIZE: u16 = 65535;

/// Address family of a knock.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Family {
    IPv4,
    IPv6,
}

impl Family {
    /// The family of an IP address.
    pub fn of(addr: &IpAddr) -> Self {
        match addr {
            IpAddr::V4(_) => Family::IPv4,
            IpAddr::V6(_) => Family::IPv6,
        }
    }

    /// The size of the echo request header for this family.
    pub fn icmp_header_size(&self) -> usize {
        // Both echo headers are type, code, checksum, identifier, sequence.
        ICMP_HEADER_SIZE
    }

    /// The size of the IP header in front of an ICMP message.
    /// `ipv4_header_size` is clamped to the valid IPv4 range and ignored for IPv6.
    pub fn ip_header_size(&self, ipv4_header_size: u16) -> u16 {
        match self {
            Family::IPv4 => ipv4_header_size.clamp(MIN_IPV4_HEADER_SIZE, MAX_IPV4_HEADER_SIZE),
            Family::IPv6 => IPV6_HEADER_SIZE,
        }
    }

    /// The largest ICMP message (header included) that fits in one IP datagram.
    pub fn max_icmp_size(&self, ipv4_header_size: u16) -> u16 {
        MAX_PACKET_SIZE - self.ip_header_size(ipv4_header_size)
    }

    /// The ICMP type of an echo request.
    pub fn echo_request_type(&self) -> u8 {
        match self {
            Family::IPv4 => IcmpTypes::EchoRequest.0,
            Family::IPv6 => Icmpv6Types::EchoRequest.0,
        }
    }

    /// The wildcard address, used to bind local ports.
    pub fn unspecified(&self) -> IpAddr {
        match self {
            Family::IPv4 => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            Family::IPv6 => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
        }
    }

    /// The socket protocol for ICMP echo requests.
    pub fn icmp_protocol(&self) -> Protocol {
        match self {
            Family::IPv4 => Protocol::ICMPV4,
            Family::IPv6 => Protocol::ICMPV6,
        }
    }
}

impl From<Family> for Domain {
    fn from(value: Family) -> Self {
        match value {
            Family::IPv4 => Domain::IPV4,
            Family::IPv6 => Domain::IPV6,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::IpAddr;

    use crate::models::Family;

    #[test]
    fn test_family_of() {
        let v4: IpAddr = "192.0.2.1".parse().unwrap();
        let v6: IpAddr = "2001:db8::1".parse().unwrap();
        assert_eq!(Family::of(&v4), Family::IPv4);
        assert_eq!(Family::of(&v6), Family::IPv6);
    }

    #[test]
    fn test_family_from_str() {
        assert_eq!("ipv4".parse::<Family>().unwrap(), Family::IPv4);
        assert_eq!("IPv6".parse::<Family>().unwrap(), Family::IPv6);
        assert!("ipv5".parse::<Family>().is_err());
        assert_eq!(Family::IPv6.to_string(), "ipv6");
    }

    #[test]
    fn test_max_icmp_size() {
        assert_eq!(Family::IPv4.max_icmp_size(20), 65515);
        assert_eq!(Family::IPv4.max_icmp_size(0), 65515);
        assert_eq!(Family::IPv4.max_icmp_size(60), 65475);
        assert_eq!(Family::IPv4.max_icmp_size(100), 65475);
        assert_eq!(Family::IPv6.max_icmp_size(60), 65495);
    }

    #[test]
    fn test_echo_request_type() {
        assert_eq!(Family::IPv4.echo_request_type(), 8);
        assert_eq!(Family::IPv6.echo_request_type(), 128);
    }
}
