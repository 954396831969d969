pub mod https;
pub mod udp;

pub use https::HttpsForwarder;
pub use udp::UdpForwarder;
