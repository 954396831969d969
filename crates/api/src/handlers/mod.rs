pub mod relay;

pub use relay::{relay_mount_root, relay_query};
