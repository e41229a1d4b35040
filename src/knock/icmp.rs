use std::thread::sleep;

use log::{debug, error, info, trace, warn};

use crate::builder::{build_icmp_packet, set_sequence};
use crate::error::KnockError;
use crate::knock::Outcome;
use crate::models::{IcmpPlan, KnockTarget};
use crate::resolver::{resolve, ResolvedAddress};
use crate::socket::{apply_ttl, open_icmp, KnockSocket};
use crate::utilities::echo_identifier;

/// ICMP has no ports, this only satisfies the resolver.
const ICMP_PLACEHOLDER_PORT: u16 = 1337;

/// Send a burst of echo requests to `target.host`. `target.port` is ignored.
pub fn icmp_knock(target: &KnockTarget, plan: &IcmpPlan) -> Result<Outcome, KnockError> {
    info!(
        "icmp {} size={} count={} delay={:?}",
        target, plan.size, plan.count, plan.delay
    );
    let dst = resolve(target.family, &target.host, ICMP_PLACEHOLDER_PORT)?;
    let socket = open_icmp(target.family)?;
    send_echo_requests(&socket, target, &dst, plan)
}

/// Send the echo requests of `plan` over an open socket.
///
/// Sequence numbers start at 1 and increase by one per packet.
/// The first send error aborts the burst.
pub fn send_echo_requests<S: KnockSocket>(
    socket: &S,
    target: &KnockTarget,
    dst: &ResolvedAddress,
    plan: &IcmpPlan,
) -> Result<Outcome, KnockError> {
    apply_ttl(socket, target);

    let mut packet = build_icmp_packet(target.family, plan.size, &plan.pattern, echo_identifier());
    let mut outcome = Outcome::default();

    for i in 1..=plan.count {
        // The sequence field is 16 bits wide, longer bursts wrap around.
        let sequence = i as u16;
        set_sequence(&mut packet, sequence);
        trace!("icmp dst={} seq={} size={}", dst.ip(), sequence, packet.len());

        let sent = socket
            .send_to(packet.bytes(), dst.socket_addr())
            .map_err(|source| {
                error!("icmp dst={} seq={} error={}", dst.ip(), sequence, source);
                KnockError::Transmission {
                    dst: dst.socket_addr(),
                    source,
                }
            })?;
        outcome.packets += 1;
        outcome.bytes += sent;

        if let Some(timeout) = plan.reply_timeout.filter(|timeout| !timeout.is_zero()) {
            match socket.wait_reply(timeout) {
                Ok(true) => debug!("icmp dst={} seq={} reply", dst.ip(), sequence),
                Ok(false) => warn!("icmp dst={} seq={} no reply in {:?}", dst.ip(), sequence, timeout),
                Err(error) => warn!("icmp dst={} seq={} wait error={}", dst.ip(), sequence, error),
            }
        }

        sleep(plan.delay);
    }

    outcome.local_port = socket.local_port();
    Ok(outcome)
}
