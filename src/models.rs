//! Data structures describing knocks: targets, plans, payloads and steps.
mod protocols;
mod step;
mod target;

pub use protocols::*;
pub use step::*;
pub use target::*;
