//! DoH Relay Infrastructure Layer
pub mod dns;
