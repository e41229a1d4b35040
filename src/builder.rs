//! Functions for building ICMP echo request packets.
//!
//! The header is written field by field through `pnet`, in network byte order.
//! The checksum is left to zero: datagram ICMP sockets on Linux and Android
//! compute it in the kernel, raw sockets elsewhere would not.
//!
//! # Examples
//!
//! ```
//! use portknock::builder::{build_icmp_packet, set_sequence};
//! use portknock::models::Family;
//!
//! let mut packet = build_icmp_packet(Family::IPv4, 16, &[0xAB, 0xCD], 42);
//! set_sequence(&mut packet, 1);
//!
//! assert_eq!(packet.len(), 16);
//! assert_eq!(packet.payload(), &[0xAB, 0xCD, 0xAB, 0xCD, 0xAB, 0xCD, 0xAB, 0xCD]);
//! ```
mod builders;
mod packet;

pub use builders::*;
pub use packet::*;
