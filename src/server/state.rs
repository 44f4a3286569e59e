/**
 * Application State
 *
 * `AppState` is the central state container: the immutable configuration,
 * the in-memory stores, and the event relay. The relay is constructed once
 * here and injected everywhere a broadcast is needed - there is no global
 * relay handle to initialize or forget to initialize.
 *
 * All fields are cheap clones over shared interiors, and `FromRef` lets
 * handlers extract just the part of the state they use.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::milestones::store::MilestoneStore;
use crate::realtime::relay::EventRelay;
use crate::server::config::ServerConfig;
use crate::tasks::store::TaskStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub tasks: TaskStore,
    pub milestones: MilestoneStore,
    pub relay: EventRelay,
}

impl AppState {
    /// Build a fresh state from configuration with empty stores
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
            tasks: TaskStore::new(),
            milestones: MilestoneStore::new(),
            relay: EventRelay::new(),
        }
    }
}

impl FromRef<AppState> for TaskStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tasks.clone()
    }
}

impl FromRef<AppState> for MilestoneStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.milestones.clone()
    }
}

impl FromRef<AppState> for EventRelay {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.relay.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
