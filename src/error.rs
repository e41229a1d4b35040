//! Errors raised by the knock primitives.
use std::io;
use std::net::SocketAddr;

use strum::Display;
use thiserror::Error;

use crate::models::Family;

/// Process exit code of a successful knock.
pub const EXIT_SUCCESS: i32 = 0;

/// Process exit code of a failed knock.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Debug, Error)]
pub enum KnockError {
    /// The host is not a numeric literal of the requested family, or the port is 0.
    #[error("invalid {family} destination {host:?}: {reason}")]
    Address {
        family: Family,
        host: String,
        reason: String,
    },
    /// A socket could not be created or configured.
    #[error("cannot {operation}: {source}")]
    Socket {
        operation: &'static str,
        #[source]
        source: io::Error,
    },
    /// A packet could not be handed to the kernel.
    #[error("cannot send to {dst}: {source}")]
    Transmission {
        dst: SocketAddr,
        #[source]
        source: io::Error,
    },
}

/// Coarse classification of a [`KnockError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Display)]
pub enum ErrorKind {
    AddressError,
    SocketError,
    TransmissionError,
}

impl KnockError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            KnockError::Address { .. } => ErrorKind::AddressError,
            KnockError::Socket { .. } => ErrorKind::SocketError,
            KnockError::Transmission { .. } => ErrorKind::TransmissionError,
        }
    }

    /// The OS error code, if the error originates from a syscall.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            KnockError::Address { .. } => None,
            KnockError::Socket { source, .. } | KnockError::Transmission { source, .. } => {
                source.raw_os_error()
            }
        }
    }

    pub(crate) fn socket(operation: &'static str) -> impl FnOnce(io::Error) -> KnockError {
        move |source| KnockError::Socket { operation, source }
    }
}

/// Map the result of a knock to the 0 (success) / 1 (failure) convention.
pub fn exit_code<T>(result: &Result<T, KnockError>) -> i32 {
    match result {
        Ok(_) => EXIT_SUCCESS,
        Err(_) => EXIT_FAILURE,
    }
}
