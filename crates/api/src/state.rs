use std::sync::Arc;

use triage_core::rulebook::{Rulebook, RULEBOOK};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (the config is behind `Arc`, the rulebook is
/// a `'static` reference).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Immutable rule tables shared by every classifier call.
    pub rulebook: &'static Rulebook,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
            rulebook: &RULEBOOK,
        }
    }
}
