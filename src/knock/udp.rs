use std::net::SocketAddr;

use log::{error, info, warn};

use crate::error::KnockError;
use crate::knock::Outcome;
use crate::models::{KnockTarget, UdpPayload};
use crate::resolver::{resolve, ResolvedAddress};
use crate::socket::{apply_ttl, open_udp, KnockSocket};

/// Send one datagram carrying `payload.data` to `target.host:target.port`.
pub fn udp_knock(target: &KnockTarget, payload: &UdpPayload) -> Result<Outcome, KnockError> {
    info!(
        "udp {} local_port={} size={}",
        target,
        payload.local_port,
        payload.data.len()
    );
    let dst = resolve(target.family, &target.host, target.port)?;
    let socket = open_udp(target.family)?;
    send_datagram(&socket, target, &dst, payload)
}

/// Send a datagram over an open socket.
///
/// A local port that cannot be bound falls back to a system-assigned one,
/// and a short write is only reported.
pub fn send_datagram<S: KnockSocket>(
    socket: &S,
    target: &KnockTarget,
    dst: &ResolvedAddress,
    payload: &UdpPayload,
) -> Result<Outcome, KnockError> {
    if let Err(error) = socket.set_reuse() {
        warn!("udp dst={} reuse error={}", dst, error);
    }
    apply_ttl(socket, target);

    if payload.local_port > 0 {
        let local = SocketAddr::new(target.family.unspecified(), payload.local_port);
        match socket.bind(local) {
            Ok(()) => info!("udp bound local_port={}", payload.local_port),
            Err(error) => warn!(
                "udp cannot bind local_port={} error={}, using system-assigned port",
                payload.local_port, error
            ),
        }
    }

    let sent = socket
        .send_to(&payload.data, dst.socket_addr())
        .map_err(|source| {
            error!("udp dst={} error={}", dst, source);
            KnockError::Transmission {
                dst: dst.socket_addr(),
                source,
            }
        })?;
    if sent != payload.data.len() {
        warn!(
            "udp dst={} sent {} bytes, expected {}",
            dst,
            sent,
            payload.data.len()
        );
    }

    Ok(Outcome {
        packets: 1,
        bytes: sent,
        local_port: socket.local_port(),
    })
}
