use pnet::packet::icmp::echo_request::EchoRequestPacket;
use pnet::packet::icmp::IcmpTypes;
use pnet::packet::icmpv6::echo_request::EchoRequestPacket as EchoRequestPacketV6;
use pnet::packet::icmpv6::Icmpv6Types;
use pnet::packet::Packet as _;
use portknock::builder::{build_icmp_packet, set_sequence};
use portknock::models::{Family, IcmpSizeMode, MIN_IPV4_HEADER_SIZE};

#[test]
fn test_build_ipv4_echo_request() {
    let mut packet = build_icmp_packet(Family::IPv4, 64, &[0xAB, 0xCD], 0x1234);
    set_sequence(&mut packet, 1);
    assert_eq!(packet.len(), 64);
    assert_eq!(packet.bytes()[0], Family::IPv4.echo_request_type());

    let echo = EchoRequestPacket::new(packet.bytes()).unwrap();
    assert_eq!(echo.get_icmp_type(), IcmpTypes::EchoRequest);
    assert_eq!(echo.get_icmp_code().0, 0);
    assert_eq!(echo.get_checksum(), 0);
    assert_eq!(echo.get_identifier(), 0x1234);
    assert_eq!(echo.get_sequence_number(), 1);
    assert_eq!(echo.payload().len(), 56);
    assert!(echo
        .payload()
        .chunks(2)
        .all(|chunk| chunk == [0xAB, 0xCD]));
}

#[test]
fn test_build_ipv6_echo_request() {
    let mut packet = build_icmp_packet(Family::IPv6, 13, b"knock", 7);
    set_sequence(&mut packet, 65535);
    assert_eq!(packet.bytes()[0], Family::IPv6.echo_request_type());

    let echo = EchoRequestPacketV6::new(packet.bytes()).unwrap();
    assert_eq!(echo.get_icmpv6_type(), Icmpv6Types::EchoRequest);
    assert_eq!(echo.get_icmpv6_code().0, 0);
    assert_eq!(echo.get_identifier(), 7);
    assert_eq!(echo.get_sequence_number(), 65535);
    assert_eq!(echo.payload(), b"knock");
}

#[test]
fn test_sequence_keeps_payload() {
    let mut packet = build_icmp_packet(Family::IPv4, 20, &[1, 2, 3], 42);
    let payload = packet.payload().to_vec();
    for sequence in 1..=3 {
        set_sequence(&mut packet, sequence);
        assert_eq!(packet.payload(), payload.as_slice());
        assert_eq!(packet.header()[..6], [8, 0, 0, 0, 0, 42]);
    }
    assert_eq!(payload, vec![1, 2, 3, 1, 2, 3, 1, 2, 3, 1, 2, 3]);
}

#[test]
fn test_header_only_packet() {
    let packet = build_icmp_packet(Family::IPv4, 0, &[0xFF], 1);
    assert_eq!(packet.len(), 8);
    assert!(packet.payload().is_empty());
}

#[test]
fn test_size_modes() {
    let ipv4 = MIN_IPV4_HEADER_SIZE;
    let without = IcmpSizeMode::WithoutHeaders.packet_size(56, Family::IPv4, ipv4);
    let with_ip = IcmpSizeMode::WithIpAndIcmpHeaders.packet_size(84, Family::IPv4, ipv4);
    let with_ip_v6 = IcmpSizeMode::WithIpAndIcmpHeaders.packet_size(104, Family::IPv6, ipv4);
    assert_eq!(without, 64);
    assert_eq!(with_ip, 64);
    assert_eq!(with_ip_v6, 64);

    let packet = build_icmp_packet(Family::IPv4, without, &[0], 1);
    assert_eq!(packet.payload().len(), 56);
}
