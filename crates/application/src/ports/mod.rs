mod do53_forwarder;
mod doh_forwarder;
mod random_source;

pub use do53_forwarder::Do53Forwarder;
pub use doh_forwarder::{DohForwarder, DohQuery, ReplyStream, UpstreamReply};
pub use random_source::RandomSource;
