//! Send knocks on the network.
//!
//! Each knock is a synchronous, self-contained call: the destination is resolved,
//! a socket is opened, the packets are sent, and the socket is closed (dropped)
//! before returning, on every path.
//!
//! ```no_run
//! use portknock::knock::{icmp_knock, tcp_knock, udp_knock};
//! use portknock::models::{Family, IcmpPlan, KnockTarget, UdpPayload};
//!
//! let target = KnockTarget::new(Family::IPv4, "192.0.2.1", 7000, 0);
//! tcp_knock(&target).unwrap();
//! udp_knock(&target, &UdpPayload::new(0, b"open sesame")).unwrap();
//! icmp_knock(&target, &IcmpPlan::new(64, 3, 100, &[0xAB, 0xCD])).unwrap();
//! ```
mod icmp;
mod tcp;
mod udp;

pub use icmp::*;
pub use tcp::*;
pub use udp::*;

use std::fmt::{Display, Formatter};

/// What a successful knock handed to the kernel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Packets sent (connection attempts for TCP).
    pub packets: u32,
    /// Bytes sent, excluding IP and transport headers except for ICMP.
    pub bytes: usize,
    /// The local port used by the socket, if known.
    pub local_port: Option<u16>,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "packets={} bytes={}", self.packets, self.bytes)?;
        match self.local_port {
            Some(port) => write!(f, " local_port={}", port),
            None => Ok(()),
        }
    }
}
