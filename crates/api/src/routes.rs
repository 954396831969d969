use crate::handlers;
use crate::state::AppState;
use axum::{routing::any, Router};

/// Routes every method on `/` and any path below it to the relay.
///
/// The selector is read from the path left after any `nest` prefix.
pub fn create_relay_routes(state: AppState) -> Router {
    Router::new()
        .route("/", any(handlers::relay_query))
        .route("/{*selector}", any(handlers::relay_query))
        .with_state(state)
}

/// Serves the relay at `mount_path`, which must start with `/` and have no
/// trailing `/` unless it is the root.
///
/// Both `/relay` and `/relay/` select the default provider.
pub fn mount_relay_routes(mount_path: &str, state: AppState) -> Router {
    if mount_path == "/" {
        return create_relay_routes(state);
    }

    Router::new()
        .route(
            &format!("{}/", mount_path),
            any(handlers::relay_mount_root).with_state(state.clone()),
        )
        .nest(mount_path, create_relay_routes(state))
}
