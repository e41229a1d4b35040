#![doc = include_str!("../README.md")]

pub mod builder;
pub mod easy;
pub mod error;
pub mod knock;
pub mod models;
pub mod payload;
pub mod resolver;
pub mod socket;
pub mod utilities;

pub use error::*;
pub use knock::*;
