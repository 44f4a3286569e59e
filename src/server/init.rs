/**
 * Server Initialization
 *
 * This module handles the setup of the Axum HTTP application: state
 * creation and route configuration. All state is in memory, so there is
 * no restoration step; a fresh process starts empty.
 */

use axum::Router;

use crate::routes::router::create_router;
use crate::server::config::ServerConfig;
use crate::server::state::AppState;

/// Create and configure the Axum application
///
/// Builds the shared application state (task store, milestone store and
/// event relay) and wires up the router. The returned router is ready to
/// be served.
pub fn create_app(config: ServerConfig) -> Router<()> {
    tracing::info!("Initializing Milestonenest backend server");

    let state = AppState::new(config);
    create_router(state)
}
