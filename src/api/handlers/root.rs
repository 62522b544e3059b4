/*
 * Responsibility
 * - GET / : public service descriptor
 * - Tells clients whether a key is needed and how to send it
 */
use axum::{Json, extract::State};
use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub status: &'static str,
    pub version: &'static str,
    pub authentication_required: bool,
    pub authentication_methods: Vec<String>,
}

pub async fn root(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Leave Manager MCP Server",
        status: "running",
        version: env!("CARGO_PKG_VERSION"),
        authentication_required: state.auth_mode.is_enforced(),
        authentication_methods: state.gate.usage(),
    })
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}
