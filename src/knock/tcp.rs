use log::{debug, info, trace};

use crate::error::KnockError;
use crate::knock::Outcome;
use crate::models::KnockTarget;
use crate::resolver::{resolve, ResolvedAddress};
use crate::socket::{apply_ttl, open_tcp, KnockSocket};

/// Put a TCP SYN on the wire towards `target.host:target.port`.
///
/// The handshake is never awaited: an established, refused or pending
/// connection are all successful knocks.
pub fn tcp_knock(target: &KnockTarget) -> Result<Outcome, KnockError> {
    info!("tcp {}", target);
    let dst = resolve(target.family, &target.host, target.port)?;
    let socket = open_tcp(target.family)?;
    send_syn(&socket, target, &dst)
}

/// Start a connection on a non-blocking socket and tear it down right away.
pub fn send_syn<S: KnockSocket>(
    socket: &S,
    target: &KnockTarget,
    dst: &ResolvedAddress,
) -> Result<Outcome, KnockError> {
    apply_ttl(socket, target);

    match socket.connect(dst.socket_addr()) {
        Ok(()) => debug!("tcp dst={} connected", dst),
        Err(error) => debug!("tcp dst={} connect={}", dst, error),
    }
    let local_port = socket.local_port();
    if let Err(error) = socket.shutdown() {
        trace!("tcp dst={} shutdown={}", dst, error);
    }

    Ok(Outcome {
        packets: 1,
        bytes: 0,
        local_port,
    })
}

#[cfg(test)]
mod tests {
    use crate::knock::send_syn;
    use crate::models::{Family, KnockTarget};
    use crate::resolver::resolve;
    use crate::socket::testing::{Call, RecordingSocket};

    #[test]
    fn test_syn_sequence() {
        let target = KnockTarget::new(Family::IPv4, "192.0.2.1", 7000, 64);
        let dst = resolve(Family::IPv4, "192.0.2.1", 7000).unwrap();
        let socket = RecordingSocket::default();

        let outcome = send_syn(&socket, &target, &dst).unwrap();
        assert_eq!(outcome.packets, 1);
        assert_eq!(
            socket.calls(),
            vec![
                Call::SetTtl(Family::IPv4, 64),
                Call::Connect(dst.socket_addr()),
                Call::Shutdown,
            ]
        );
    }

    #[test]
    fn test_refused_connection_is_success() {
        let target = KnockTarget::new(Family::IPv6, "2001:db8::1", 22, 0);
        let dst = resolve(Family::IPv6, "2001:db8::1", 22).unwrap();
        let socket = RecordingSocket {
            fail_connect: true,
            ..Default::default()
        };

        send_syn(&socket, &target, &dst).unwrap();
        assert_eq!(
            socket.calls(),
            vec![Call::Connect(dst.socket_addr()), Call::Shutdown]
        );
    }

    #[test]
    fn test_ttl_failure_still_connects() {
        let target = KnockTarget::new(Family::IPv4, "192.0.2.1", 7000, 64);
        let dst = resolve(Family::IPv4, "192.0.2.1", 7000).unwrap();
        let socket = RecordingSocket {
            fail_ttl: true,
            ..Default::default()
        };

        send_syn(&socket, &target, &dst).unwrap();
        assert!(socket.calls().contains(&Call::Connect(dst.socket_addr())));
    }
}
