pub mod random;
pub mod transport;

pub use random::FastRandSource;
pub use transport::{HttpsForwarder, UdpForwarder};
