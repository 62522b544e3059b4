/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 * - Cheap to Clone (everything inside is Arc/Copy)
 */
use std::sync::Arc;

use crate::services::auth::{AuthGate, AuthMode};

#[derive(Clone, Debug)]
pub struct AppState {
    pub gate: Arc<AuthGate>,
    pub auth_mode: AuthMode,
}

impl AppState {
    pub fn new(gate: Arc<AuthGate>, auth_mode: AuthMode) -> Self {
        Self { gate, auth_mode }
    }
}
