pub mod errors;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::{create_relay_routes, mount_relay_routes};
pub use state::AppState;
