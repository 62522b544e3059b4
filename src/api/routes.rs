/*
 * Responsibility
 * - URL layout of the service
 * - Public: GET /, GET /health
 * - Gated: /mcp (every method the MCP transport uses)
 */
use axum::{Router, routing::get};

use crate::api::handlers::{
    health::health,
    root::{not_found, root},
};
use crate::api::mcp::{self, AuthStatus};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let status = AuthStatus {
        required: state.auth_mode.is_enforced(),
        key_count: state.gate.key_count(),
        usage: state.gate.usage(),
    };

    let gated = Router::new().nest_service("/mcp", mcp::service(status));
    let gated = middleware::auth::api_key::apply(gated, state);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(gated)
        .fallback(not_found)
}
