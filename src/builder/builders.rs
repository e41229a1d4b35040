use pnet::packet::icmp::echo_request::{IcmpCodes, MutableEchoRequestPacket};
use pnet::packet::icmp::IcmpTypes;
use pnet::packet::icmpv6::echo_request::{
    Icmpv6Codes, MutableEchoRequestPacket as MutableEchoRequestPacketV6,
};
use pnet::packet::icmpv6::Icmpv6Types;

use crate::builder::IcmpPacket;
use crate::models::Family;

const HEADER_INVARIANT: &str = "packet buffer holds at least an echo header";

/// Build a complete echo request: header with sequence 0, then the payload pattern.
pub fn build_icmp_packet(family: Family, size: usize, pattern: &[u8], identifier: u16) -> IcmpPacket {
    let mut packet = IcmpPacket::new(family, size);
    build_echo_request(&mut packet, identifier, 0);
    fill_pattern(&mut packet, pattern);
    packet
}

/// Build the ICMP or ICMPv6 Echo Request header.
///
/// The checksum is left to zero (see the module documentation).
pub fn build_echo_request(packet: &mut IcmpPacket, identifier: u16, sequence: u16) {
    match packet.family() {
        Family::IPv4 => {
            let mut icmp = MutableEchoRequestPacket::new(packet.header_mut()).expect(HEADER_INVARIANT);
            icmp.set_icmp_type(IcmpTypes::EchoRequest);
            icmp.set_icmp_code(IcmpCodes::NoCode);
            icmp.set_checksum(0);
            icmp.set_identifier(identifier);
            icmp.set_sequence_number(sequence);
        }
        Family::IPv6 => {
            let mut icmp =
                MutableEchoRequestPacketV6::new(packet.header_mut()).expect(HEADER_INVARIANT);
            icmp.set_icmpv6_type(Icmpv6Types::EchoRequest);
            icmp.set_icmpv6_code(Icmpv6Codes::NoCode);
            icmp.set_checksum(0);
            icmp.set_identifier(identifier);
            icmp.set_sequence_number(sequence);
        }
    }
}

/// Overwrite the sequence number of an echo request, leaving the rest untouched.
pub fn set_sequence(packet: &mut IcmpPacket, sequence: u16) {
    match packet.family() {
        Family::IPv4 => MutableEchoRequestPacket::new(packet.header_mut())
            .expect(HEADER_INVARIANT)
            .set_sequence_number(sequence),
        Family::IPv6 => MutableEchoRequestPacketV6::new(packet.header_mut())
            .expect(HEADER_INVARIANT)
            .set_sequence_number(sequence),
    }
}

/// Fill the payload by repeating `pattern` from its start, or with zeros if it is empty.
pub fn fill_pattern(packet: &mut IcmpPacket, pattern: &[u8]) {
    let payload = packet.payload_mut();
    if pattern.is_empty() {
        payload.fill(0);
        return;
    }
    for chunk in payload.chunks_mut(pattern.len()) {
        chunk.copy_from_slice(&pattern[..chunk.len()]);
    }
}
