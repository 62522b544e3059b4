/// Factory: build the authentication gate from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::extract::{ApiKeyHeader, QueryParameter, default_chain};
use crate::services::auth::keys::{AcceptedKeys, KeySetError, RECOMMENDED_MIN_KEY_LEN};
use crate::services::auth::{AuthGate, AuthMode};

/// When authentication is required, an empty key set is fatal rather than
/// producing a server that rejects every call.
pub fn build_auth_gate(config: &Config) -> Result<(Arc<AuthGate>, AuthMode), KeySetError> {
    let extractors = default_chain(
        ApiKeyHeader::new(
            config.api_key_header.clone(),
            config.api_key_header_display.clone(),
        ),
        QueryParameter::new(config.api_key_query_param.clone()),
    );

    if !config.require_api_key {
        tracing::warn!("API key authentication is disabled (REQUIRE_API_KEY=false)");
        let gate = AuthGate::new(AcceptedKeys::default(), extractors);
        return Ok((Arc::new(gate), AuthMode::Disabled));
    }

    let short = config
        .api_keys
        .iter()
        .filter(|k| k.len() < RECOMMENDED_MIN_KEY_LEN)
        .count();
    if short > 0 {
        tracing::warn!(
            count = short,
            min_len = RECOMMENDED_MIN_KEY_LEN,
            "some configured API keys are shorter than recommended"
        );
    }

    let keys = AcceptedKeys::require_non_empty(AcceptedKeys::new(&config.api_keys))?;
    tracing::info!(key_count = keys.len(), "API key authentication enabled");

    Ok((Arc::new(AuthGate::new(keys, extractors)), AuthMode::Enforced))
}
