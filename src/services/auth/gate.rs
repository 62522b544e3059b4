//! The authentication gate.
//!
//! `authenticate` is a pure decision over the request headers and URI: it
//! does no I/O and touches no shared mutable state, so one gate instance can
//! serve any number of concurrent requests.

use axum::http::{HeaderMap, Uri};

use super::credential::CredentialSource;
use super::extract::CredentialExtractor;
use super::keys::AcceptedKeys;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Nothing usable in any supported location.
    NoCredential,
    /// A credential was presented but is not in the accepted set.
    InvalidCredential,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::NoCredential => "no_credential",
            RejectReason::InvalidCredential => "invalid_credential",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Authorized {
        source: CredentialSource,
        fingerprint: String,
    },
    Rejected(RejectReason),
}

impl AuthOutcome {
    pub fn is_authorized(&self) -> bool {
        matches!(self, AuthOutcome::Authorized { .. })
    }
}

pub struct AuthGate {
    keys: AcceptedKeys,
    extractors: Vec<Box<dyn CredentialExtractor>>,
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sources: Vec<CredentialSource> = self.extractors.iter().map(|e| e.source()).collect();
        f.debug_struct("AuthGate")
            .field("keys", &self.keys)
            .field("sources", &sources)
            .finish()
    }
}

impl AuthGate {
    /// `extractors` are consulted in the given order.
    pub fn new(keys: AcceptedKeys, extractors: Vec<Box<dyn CredentialExtractor>>) -> Self {
        Self { keys, extractors }
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Usage hints for every transport, in precedence order.
    pub fn usage(&self) -> Vec<String> {
        self.extractors.iter().map(|e| e.usage()).collect()
    }

    pub fn authenticate(&self, headers: &HeaderMap, uri: &Uri) -> AuthOutcome {
        let Some(credential) = self
            .extractors
            .iter()
            .find_map(|extractor| extractor.extract(headers, uri))
        else {
            return AuthOutcome::Rejected(RejectReason::NoCredential);
        };

        if self.keys.contains(credential.token()) {
            AuthOutcome::Authorized {
                source: credential.source(),
                fingerprint: super::keys::fingerprint(credential.token()),
            }
        } else {
            AuthOutcome::Rejected(RejectReason::InvalidCredential)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::extract::{ApiKeyHeader, QueryParameter, default_chain};
    use axum::http::{HeaderName, HeaderValue, header};

    fn gate(keys: &[&str]) -> AuthGate {
        AuthGate::new(
            AcceptedKeys::new(keys.iter().copied()),
            default_chain(
                ApiKeyHeader::new(HeaderName::from_static("x-api-key"), "X-API-Key"),
                QueryParameter::new("api_key"),
            ),
        )
    }

    fn with_bearer(map: &mut HeaderMap, value: &'static str) {
        map.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
    }

    fn with_api_key(map: &mut HeaderMap, value: &'static str) {
        map.insert(
            HeaderName::from_static("x-api-key"),
            HeaderValue::from_static(value),
        );
    }

    fn source_of(outcome: AuthOutcome) -> CredentialSource {
        match outcome {
            AuthOutcome::Authorized { source, .. } => source,
            other => panic!("expected Authorized, got {other:?}"),
        }
    }

    #[test]
    fn header_scenario() {
        let gate = gate(&["abc123"]);
        let uri = Uri::from_static("/mcp");

        let mut ok = HeaderMap::new();
        with_api_key(&mut ok, "abc123");
        assert!(gate.authenticate(&ok, &uri).is_authorized());

        let mut wrong = HeaderMap::new();
        with_api_key(&mut wrong, "abc124");
        assert_eq!(
            gate.authenticate(&wrong, &uri),
            AuthOutcome::Rejected(RejectReason::InvalidCredential)
        );

        assert_eq!(
            gate.authenticate(&HeaderMap::new(), &uri),
            AuthOutcome::Rejected(RejectReason::NoCredential)
        );
    }

    #[test]
    fn accepted_key_works_over_every_transport() {
        let gate = gate(&["abc123", "def456"]);

        let mut bearer = HeaderMap::new();
        with_bearer(&mut bearer, "Bearer def456");
        assert_eq!(
            source_of(gate.authenticate(&bearer, &Uri::from_static("/mcp"))),
            CredentialSource::BearerHeader
        );

        let mut api_key = HeaderMap::new();
        with_api_key(&mut api_key, "def456");
        assert_eq!(
            source_of(gate.authenticate(&api_key, &Uri::from_static("/mcp"))),
            CredentialSource::ApiKeyHeader
        );

        assert_eq!(
            source_of(gate.authenticate(&HeaderMap::new(), &Uri::from_static("/mcp?api_key=def456"))),
            CredentialSource::QueryParameter
        );
    }

    #[test]
    fn unknown_key_is_invalid_over_every_transport() {
        let gate = gate(&["abc123"]);
        let invalid = AuthOutcome::Rejected(RejectReason::InvalidCredential);

        let mut bearer = HeaderMap::new();
        with_bearer(&mut bearer, "Bearer nope");
        assert_eq!(gate.authenticate(&bearer, &Uri::from_static("/")), invalid);

        let mut api_key = HeaderMap::new();
        with_api_key(&mut api_key, "nope");
        assert_eq!(gate.authenticate(&api_key, &Uri::from_static("/")), invalid);

        assert_eq!(
            gate.authenticate(&HeaderMap::new(), &Uri::from_static("/?api_key=nope")),
            invalid
        );
    }

    #[test]
    fn valid_bearer_wins_over_invalid_header() {
        let gate = gate(&["abc123"]);
        let mut map = HeaderMap::new();
        with_bearer(&mut map, "Bearer abc123");
        with_api_key(&mut map, "wrong");

        let outcome = gate.authenticate(&map, &Uri::from_static("/mcp?api_key=also-wrong"));
        assert_eq!(source_of(outcome), CredentialSource::BearerHeader);
    }

    #[test]
    fn invalid_bearer_is_not_rescued_by_later_sources() {
        let gate = gate(&["abc123"]);
        let mut map = HeaderMap::new();
        with_bearer(&mut map, "Bearer wrong");
        with_api_key(&mut map, "abc123");

        assert_eq!(
            gate.authenticate(&map, &Uri::from_static("/mcp")),
            AuthOutcome::Rejected(RejectReason::InvalidCredential)
        );
    }

    #[test]
    fn malformed_bearer_falls_through() {
        let gate = gate(&["abc123"]);

        let mut to_header = HeaderMap::new();
        with_bearer(&mut to_header, "Bear xyz");
        with_api_key(&mut to_header, "abc123");
        assert_eq!(
            source_of(gate.authenticate(&to_header, &Uri::from_static("/mcp"))),
            CredentialSource::ApiKeyHeader
        );

        let mut to_query = HeaderMap::new();
        with_bearer(&mut to_query, "Bear xyz");
        assert_eq!(
            source_of(gate.authenticate(&to_query, &Uri::from_static("/mcp?api_key=abc123"))),
            CredentialSource::QueryParameter
        );

        let mut alone = HeaderMap::new();
        with_bearer(&mut alone, "Bear xyz");
        assert_eq!(
            gate.authenticate(&alone, &Uri::from_static("/mcp")),
            AuthOutcome::Rejected(RejectReason::NoCredential)
        );
    }

    #[test]
    fn empty_key_set_rejects_everything() {
        let gate = gate(&[]);

        let mut map = HeaderMap::new();
        with_api_key(&mut map, "abc123");
        assert!(!gate.authenticate(&map, &Uri::from_static("/")).is_authorized());

        let mut empty_bearer = HeaderMap::new();
        with_bearer(&mut empty_bearer, "Bearer ");
        assert!(
            !gate
                .authenticate(&empty_bearer, &Uri::from_static("/?api_key="))
                .is_authorized()
        );

        assert_eq!(
            gate.authenticate(&HeaderMap::new(), &Uri::from_static("/")),
            AuthOutcome::Rejected(RejectReason::NoCredential)
        );
    }

    #[test]
    fn independently_configured_gates_do_not_interfere() {
        let first = gate(&["first-key"]);
        let second = gate(&["second-key"]);
        let uri = Uri::from_static("/mcp?api_key=first-key");

        assert!(first.authenticate(&HeaderMap::new(), &uri).is_authorized());
        assert!(!second.authenticate(&HeaderMap::new(), &uri).is_authorized());
    }

    #[test]
    fn authorized_outcome_carries_fingerprint_not_key() {
        let gate = gate(&["abc123"]);
        let outcome = gate.authenticate(&HeaderMap::new(), &Uri::from_static("/?api_key=abc123"));

        match outcome {
            AuthOutcome::Authorized { fingerprint, .. } => {
                assert_eq!(fingerprint, crate::services::auth::keys::fingerprint("abc123"));
                assert!(!fingerprint.contains("abc123"));
            }
            other => panic!("expected Authorized, got {other:?}"),
        }
    }
}
