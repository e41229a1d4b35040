//! Utilities.
use std::net::IpAddr;

use log::LevelFilter;

use crate::models::Family;

/// Identifier of the echo requests sent by this process.
pub fn echo_identifier() -> u16 {
    std::process::id() as u16
}

/// Return the family of a numeric address literal, if `host` is one.
pub fn detect_family(host: &str) -> Option<Family> {
    host.parse::<IpAddr>().ok().map(|addr| Family::of(&addr))
}

/// Log to stderr through `env_logger`, `RUST_LOG` taking precedence over `level`.
pub fn configure_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .init();
}
