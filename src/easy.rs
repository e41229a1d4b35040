//! High-level interface for sending a single knock.
//!
//! ```no_run
//! use portknock::easy::{knock, Config};
//! use portknock::models::Step;
//!
//! let config = Config::default();
//! let step: Step = "7000:udp".parse().unwrap();
//! let outcome = knock(&config, "192.0.2.1", &step, b"open sesame").unwrap();
//!
//! println!("{}", outcome);
//! ```
use std::fmt::{Display, Formatter};
use std::time::Duration;

use anyhow::{Context, Result};
use log::info;

use crate::knock::{icmp_knock, tcp_knock, udp_knock, Outcome};
use crate::models::{IcmpPlan, IcmpSizeMode, KnockTarget, Step, UdpPayload, MIN_IPV4_HEADER_SIZE};
use crate::utilities::detect_family;

/// Knock configuration, shared by all the steps of a sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// IPv4 TTL / IPv6 hop limit, 0 (or more than 255) leaves the OS default.
    pub ttl: u32,
    /// Delay after each ICMP echo request.
    pub delay: Duration,
    /// Local source port of UDP knocks, 0 lets the OS pick one.
    pub local_port: u16,
    /// How the size of ICMP steps is interpreted.
    pub icmp_size_mode: IcmpSizeMode,
    /// IPv4 header size assumed by [`IcmpSizeMode::WithIpAndIcmpHeaders`].
    pub ipv4_header_size: u16,
    /// Time to wait for an echo reply after each ICMP request (no wait by default).
    pub reply_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ttl: 0,
            delay: Duration::from_millis(0),
            local_port: 0,
            icmp_size_mode: IcmpSizeMode::default(),
            ipv4_header_size: MIN_IPV4_HEADER_SIZE,
            reply_timeout: None,
        }
    }
}

impl Display for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ttl={:?}", self.ttl)?;
        write!(f, " delay={:?}", self.delay)?;
        write!(f, " local_port={:?}", self.local_port)?;
        write!(f, " icmp_size_mode={}", self.icmp_size_mode)?;
        write!(f, " ipv4_header_size={:?}", self.ipv4_header_size)?;
        write!(f, " reply_timeout={:?}", self.reply_timeout)
    }
}

/// Send one knock step to `host`, a numeric IPv4 or IPv6 literal.
///
/// `content` is the UDP datagram or the ICMP payload pattern, it is ignored for TCP.
pub fn knock(config: &Config, host: &str, step: &Step, content: &[u8]) -> Result<Outcome> {
    info!("{}", config);
    let family = detect_family(host)
        .with_context(|| format!("{:?} is not a numeric IP address", host))?;

    let outcome = match *step {
        Step::Icmp { size, count } => {
            let size = config
                .icmp_size_mode
                .packet_size(size, family, config.ipv4_header_size);
            let mut plan = IcmpPlan::new(size, count, 0, content);
            plan.delay = config.delay;
            plan.reply_timeout = config.reply_timeout;
            icmp_knock(&KnockTarget::new(family, host, 0, config.ttl), &plan)
        }
        Step::Tcp { port } => tcp_knock(&KnockTarget::new(family, host, port, config.ttl)),
        Step::Udp { port } => udp_knock(
            &KnockTarget::new(family, host, port, config.ttl),
            &UdpPayload::new(config.local_port, content),
        ),
    }
    .with_context(|| format!("knock {} to {} failed", step, host))?;

    info!("{} dst={} {}", step, host, outcome);
    Ok(outcome)
}
