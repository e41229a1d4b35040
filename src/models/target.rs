use std::fmt::{Display, Formatter};
use std::time::Duration;

use strum::{Display, EnumString};

use crate::models::protocols::Family;

/// The destination of a knock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KnockTarget {
    pub family: Family,
    /// Numeric address literal, no DNS resolution is performed.
    pub host: String,
    pub port: u16,
    /// IPv4 TTL or IPv6 hop limit. Values outside 1..=255 leave the OS default.
    pub ttl: u32,
}

impl KnockTarget {
    pub fn new(family: Family, host: &str, port: u16, ttl: u32) -> Self {
        KnockTarget {
            family,
            host: host.to_string(),
            port,
            ttl,
        }
    }

    /// The TTL to apply on the socket, `None` outside 1..=255.
    pub fn effective_ttl(&self) -> Option<u32> {
        (1..=255).contains(&self.ttl).then_some(self.ttl)
    }
}

impl Display for KnockTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "family={} dst={} port={} ttl={}",
            self.family, self.host, self.port, self.ttl
        )
    }
}

/// Parameters of an ICMP echo burst.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IcmpPlan {
    /// Total ICMP message size, header included.
    pub size: usize,
    /// Number of echo requests to send.
    pub count: u32,
    /// Delay after each echo request.
    pub delay: Duration,
    /// Repeating payload pattern, zeros if empty.
    pub pattern: Vec<u8>,
    /// How long to wait for a reply after each request (no wait by default).
    pub reply_timeout: Option<Duration>,
}

impl IcmpPlan {
    pub fn new(size: usize, count: u32, delay_ms: u64, pattern: &[u8]) -> Self {
        IcmpPlan {
            size,
            count: count.max(1),
            delay: Duration::from_millis(delay_ms),
            pattern: pattern.to_vec(),
            reply_timeout: None,
        }
    }

    pub fn with_reply_timeout(mut self, timeout: Duration) -> Self {
        self.reply_timeout = Some(timeout);
        self
    }
}

/// The datagram of a UDP knock.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UdpPayload {
    /// Local source port, 0 lets the OS pick one.
    pub local_port: u16,
    pub data: Vec<u8>,
}

impl UdpPayload {
    pub fn new(local_port: u16, data: &[u8]) -> Self {
        UdpPayload {
            local_port,
            data: data.to_vec(),
        }
    }
}

/// How a user-supplied ICMP size is interpreted.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum IcmpSizeMode {
    /// The size covers the payload only.
    WithoutHeaders,
    /// The size covers the ICMP header and the payload.
    #[default]
    WithIcmpHeader,
    /// The size covers the whole IP datagram.
    WithIpAndIcmpHeaders,
}

impl IcmpSizeMode {
    /// Bytes to add to the requested size to get the ICMP message size.
    pub fn offset(&self, family: Family, ipv4_header_size: u16) -> i32 {
        match self {
            IcmpSizeMode::WithoutHeaders => family.icmp_header_size() as i32,
            IcmpSizeMode::WithIcmpHeader => 0,
            IcmpSizeMode::WithIpAndIcmpHeaders => -(family.ip_header_size(ipv4_header_size) as i32),
        }
    }

    /// The ICMP message size for a requested size, clamped to what fits in one datagram.
    pub fn packet_size(&self, requested: u16, family: Family, ipv4_header_size: u16) -> usize {
        let max = family.max_icmp_size(ipv4_header_size) as i32;
        let size = requested as i32 + self.offset(family, ipv4_header_size);
        size.clamp(0, max) as usize
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::models::{Family, IcmpPlan, IcmpSizeMode, KnockTarget};

    #[test]
    fn test_effective_ttl() {
        let ttl = |ttl| KnockTarget::new(Family::IPv4, "192.0.2.1", 7000, ttl).effective_ttl();
        assert_eq!(ttl(0), None);
        assert_eq!(ttl(1), Some(1));
        assert_eq!(ttl(64), Some(64));
        assert_eq!(ttl(255), Some(255));
        assert_eq!(ttl(256), None);
        assert_eq!(ttl(u32::MAX), None);
    }

    #[test]
    fn test_target_display() {
        let target = KnockTarget::new(Family::IPv4, "192.0.2.1", 7000, 0);
        assert_eq!(target.to_string(), "family=ipv4 dst=192.0.2.1 port=7000 ttl=0");
    }

    #[test]
    fn test_icmp_plan_count_at_least_one() {
        let plan = IcmpPlan::new(64, 0, 100, &[0xAB]);
        assert_eq!(plan.count, 1);
        assert_eq!(plan.delay, Duration::from_millis(100));
        assert_eq!(plan.reply_timeout, None);
    }

    #[test]
    fn test_size_mode_offsets() {
        let mode = IcmpSizeMode::WithoutHeaders;
        assert_eq!(mode.packet_size(56, Family::IPv4, 20), 64);
        let mode = IcmpSizeMode::WithIcmpHeader;
        assert_eq!(mode.packet_size(64, Family::IPv6, 20), 64);
        let mode = IcmpSizeMode::WithIpAndIcmpHeaders;
        assert_eq!(mode.packet_size(84, Family::IPv4, 20), 64);
        assert_eq!(mode.packet_size(84, Family::IPv4, 24), 60);
        assert_eq!(mode.packet_size(104, Family::IPv6, 20), 64);
    }

    #[test]
    fn test_size_mode_clamping() {
        let mode = IcmpSizeMode::WithIpAndIcmpHeaders;
        assert_eq!(mode.packet_size(10, Family::IPv6, 20), 0);
        let mode = IcmpSizeMode::WithoutHeaders;
        assert_eq!(mode.packet_size(u16::MAX, Family::IPv4, 20), 65515);
        assert_eq!(mode.packet_size(u16::MAX, Family::IPv6, 20), 65495);
    }

    #[test]
    fn test_size_mode_from_str() {
        assert_eq!(
            "with_ip_and_icmp_headers".parse::<IcmpSizeMode>().unwrap(),
            IcmpSizeMode::WithIpAndIcmpHeaders
        );
        assert_eq!(IcmpSizeMode::default().to_string(), "with_icmp_header");
    }
}
