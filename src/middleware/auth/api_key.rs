//! API-key gate in front of the MCP endpoint.
//!
//! The request is handed to the next service untouched on success; on
//! rejection the next service is never called.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::services::auth::AuthOutcome;
use crate::state::AppState;

/// Put the gate in front of every route of `router`.
///
/// ```ignore
/// let mcp = Router::new().nest_service("/mcp", service);
/// let mcp = middleware::auth::api_key::apply(mcp, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, api_key_middleware))
}

async fn api_key_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    if !state.auth_mode.is_enforced() {
        return Ok(next.run(req).await);
    }

    match state.gate.authenticate(req.headers(), req.uri()) {
        AuthOutcome::Authorized {
            source,
            fingerprint,
        } => {
            tracing::debug!(%source, key = %fingerprint, "api key accepted");
            Ok(next.run(req).await)
        }
        AuthOutcome::Rejected(reason) => {
            tracing::warn!(
                reason = reason.as_str(),
                method = %req.method(),
                path = req.uri().path(),
                "api key rejected"
            );
            Err(AppError::Unauthorized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::http::{HeaderName, StatusCode, header};
    use axum::routing::post;
    use tower::util::ServiceExt;

    use crate::services::auth::extract::{ApiKeyHeader, QueryParameter, default_chain};
    use crate::services::auth::keys::AcceptedKeys;
    use crate::services::auth::{AuthGate, AuthMode};

    fn state(keys: &[&str], mode: AuthMode) -> AppState {
        let gate = AuthGate::new(
            AcceptedKeys::new(keys.iter().copied()),
            default_chain(
                ApiKeyHeader::new(HeaderName::from_static("x-api-key"), "X-API-Key"),
                QueryParameter::new("api_key"),
            ),
        );
        AppState::new(Arc::new(gate), mode)
    }

    /// A gated `/mcp` route that counts how often it actually ran.
    fn app(state: AppState, hits: Arc<AtomicUsize>) -> Router {
        let inner = Router::new().route(
            "/mcp",
            post(move || {
                let hits = Arc::clone(&hits);
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    "tool ran"
                }
            }),
        );
        apply(inner, state.clone()).with_state(state)
    }

    fn request(uri: &str, headers: &[(&str, &str)]) -> Request<Body> {
        let mut builder = Request::builder().method("POST").uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(Body::empty()).expect("Failed to build request")
    }

    #[tokio::test]
    async fn valid_key_reaches_handler() {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = app(state(&["abc123"], AuthMode::Enforced), Arc::clone(&hits));

        let response = app
            .oneshot(request("/mcp", &[("x-api-key", "abc123")]))
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn every_transport_is_accepted() {
        let cases: [(&str, &[(&str, &str)]); 3] = [
            ("/mcp", &[("authorization", "Bearer abc123")]),
            ("/mcp", &[("x-api-key", "abc123")]),
            ("/mcp?api_key=abc123", &[]),
        ];

        for (uri, headers) in cases {
            let hits = Arc::new(AtomicUsize::new(0));
            let app = app(state(&["abc123"], AuthMode::Enforced), Arc::clone(&hits));
            let response = app.oneshot(request(uri, headers)).await.unwrap();

            assert_eq!(response.status(), StatusCode::OK, "{uri} {headers:?}");
            assert_eq!(hits.load(Ordering::SeqCst), 1);
        }
    }

    #[tokio::test]
    async fn missing_and_invalid_keys_get_same_401_and_skip_handler() {
        for headers in [&[][..], &[("x-api-key", "abc124")][..]] {
            let hits = Arc::new(AtomicUsize::new(0));
            let app = app(state(&["abc123"], AuthMode::Enforced), Arc::clone(&hits));
            let response = app.oneshot(request("/mcp", headers)).await.unwrap();

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));
            assert_eq!(hits.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn empty_key_set_rejects_all() {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = app(state(&[], AuthMode::Enforced), Arc::clone(&hits));

        let response = app
            .oneshot(request("/mcp?api_key=", &[("authorization", "Bearer ")]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn disabled_mode_lets_everything_through() {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = app(state(&[], AuthMode::Disabled), Arc::clone(&hits));

        let response = app.oneshot(request("/mcp", &[])).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
