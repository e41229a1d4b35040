//! Sockets used to emit knocks.
//!
//! The emitters only talk to sockets through [`KnockSocket`], which is
//! implemented for [`socket2::Socket`].
use std::io;
use std::mem::MaybeUninit;
use std::net::{Shutdown, SocketAddr};
use std::time::Duration;

use log::{debug, error, warn};
use socket2::{SockAddr, Socket, Type};

use crate::error::KnockError;
use crate::models::{Family, KnockTarget};

/// The socket operations needed by the knock emitters.
pub trait KnockSocket {
    /// Set the IPv4 TTL or the IPv6 unicast hop limit.
    fn set_ttl(&self, family: Family, ttl: u32) -> io::Result<()>;
    /// Allow other sockets to share the local address and port.
    fn set_reuse(&self) -> io::Result<()>;
    fn bind(&self, addr: SocketAddr) -> io::Result<()>;
    fn send_to(&self, buf: &[u8], addr: SocketAddr) -> io::Result<usize>;
    fn connect(&self, addr: SocketAddr) -> io::Result<()>;
    /// Shut down both directions.
    fn shutdown(&self) -> io::Result<()>;
    /// Wait at most `timeout` for an incoming datagram, returns false on timeout.
    fn wait_reply(&self, timeout: Duration) -> io::Result<bool>;
    /// The local port the socket is bound to, if any.
    fn local_port(&self) -> Option<u16>;
}

impl KnockSocket for Socket {
    fn set_ttl(&self, family: Family, ttl: u32) -> io::Result<()> {
        match family {
            Family::IPv4 => Socket::set_ttl(self, ttl),
            Family::IPv6 => Socket::set_unicast_hops_v6(self, ttl),
        }
    }

    fn set_reuse(&self) -> io::Result<()> {
        self.set_reuse_address(true)?;
        #[cfg(all(unix, not(any(target_os = "solaris", target_os = "illumos"))))]
        self.set_reuse_port(true)?;
        Ok(())
    }

    fn bind(&self, addr: SocketAddr) -> io::Result<()> {
        Socket::bind(self, &SockAddr::from(addr))
    }

    fn send_to(&self, buf: &[u8], addr: SocketAddr) -> io::Result<usize> {
        Socket::send_to(self, buf, &SockAddr::from(addr))
    }

    fn connect(&self, addr: SocketAddr) -> io::Result<()> {
        Socket::connect(self, &SockAddr::from(addr))
    }

    fn shutdown(&self) -> io::Result<()> {
        Socket::shutdown(self, Shutdown::Both)
    }

    fn wait_reply(&self, timeout: Duration) -> io::Result<bool> {
        self.set_read_timeout(Some(timeout))?;
        let mut buffer = [MaybeUninit::<u8>::uninit(); 1500];
        match self.recv(&mut buffer) {
            Ok(_) => Ok(true),
            Err(error)
                if matches!(
                    error.kind(),
                    io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
                ) =>
            {
                Ok(false)
            }
            Err(error) => Err(error),
        }
    }

    fn local_port(&self) -> Option<u16> {
        self.local_addr()
            .ok()
            .and_then(|addr| addr.as_socket())
            .map(|addr| addr.port())
            .filter(|port| *port != 0)
    }
}

/// Open a datagram ICMP socket ("ping socket") for `family`.
pub fn open_icmp(family: Family) -> Result<Socket, KnockError> {
    Socket::new(family.into(), Type::DGRAM, Some(family.icmp_protocol()))
        .map_err(log_socket_error("create ICMP socket"))
}

/// Open a non-blocking TCP socket for `family`.
pub fn open_tcp(family: Family) -> Result<Socket, KnockError> {
    let socket = Socket::new(family.into(), Type::STREAM, Some(socket2::Protocol::TCP))
        .map_err(log_socket_error("create TCP socket"))?;
    socket
        .set_nonblocking(true)
        .map_err(log_socket_error("set TCP socket non-blocking"))?;
    Ok(socket)
}

/// Open a UDP socket for `family`.
pub fn open_udp(family: Family) -> Result<Socket, KnockError> {
    Socket::new(family.into(), Type::DGRAM, Some(socket2::Protocol::UDP))
        .map_err(log_socket_error("create UDP socket"))
}

/// Apply the TTL/hop limit of `target` if it is in 1..=255, otherwise leave the OS default.
///
/// A failure is only logged: the knock is still sent, with the OS default.
pub fn apply_ttl<S: KnockSocket>(socket: &S, target: &KnockTarget) {
    if let Some(ttl) = target.effective_ttl() {
        debug!("set_ttl family={} ttl={}", target.family, ttl);
        if let Err(error) = socket.set_ttl(target.family, ttl) {
            warn!(
                "set_ttl family={} ttl={} error={}, using OS default",
                target.family, ttl, error
            );
        }
    }
}

fn log_socket_error(operation: &'static str) -> impl FnOnce(io::Error) -> KnockError {
    move |source| {
        error!("{} error={}", operation, source);
        KnockError::socket(operation)(source)
    }
}
