//! Credential extraction strategies.
//!
//! Each extractor looks at one place on the request. The gate walks them in
//! order and stops at the first one that yields a well-formed token, so a new
//! transport only needs a new extractor.

use axum::http::{HeaderMap, HeaderName, Uri, header};

use super::credential::{Credential, CredentialSource};

/// Attempt to produce a candidate credential from a request.
///
/// Returning `None` means "absent or malformed here"; the gate then moves on
/// to the next extractor.
pub trait CredentialExtractor: Send + Sync {
    fn source(&self) -> CredentialSource;

    fn extract(&self, headers: &HeaderMap, uri: &Uri) -> Option<Credential>;

    /// Human readable usage hint, e.g. `X-API-Key: <api_key>`.
    fn usage(&self) -> String;
}

/// `Authorization: Bearer <token>`. The scheme prefix is matched case-sensitively.
#[derive(Debug, Clone, Default)]
pub struct BearerHeader;

const BEARER_PREFIX: &str = "Bearer ";

impl CredentialExtractor for BearerHeader {
    fn source(&self) -> CredentialSource {
        CredentialSource::BearerHeader
    }

    fn extract(&self, headers: &HeaderMap, _uri: &Uri) -> Option<Credential> {
        let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
        let token = value.strip_prefix(BEARER_PREFIX)?;
        if token.is_empty() {
            return None;
        }
        Some(Credential::new(token, self.source()))
    }

    fn usage(&self) -> String {
        "Authorization: Bearer <api_key>".to_string()
    }
}

/// Dedicated header carrying the raw key (`X-API-Key` unless configured otherwise).
#[derive(Debug, Clone)]
pub struct ApiKeyHeader {
    name: HeaderName,
    display_name: String,
}

impl ApiKeyHeader {
    pub fn new(name: HeaderName, display_name: impl Into<String>) -> Self {
        Self {
            name,
            display_name: display_name.into(),
        }
    }
}

impl CredentialExtractor for ApiKeyHeader {
    fn source(&self) -> CredentialSource {
        CredentialSource::ApiKeyHeader
    }

    fn extract(&self, headers: &HeaderMap, _uri: &Uri) -> Option<Credential> {
        let token = headers.get(&self.name)?.to_str().ok()?;
        if token.is_empty() {
            return None;
        }
        Some(Credential::new(token, self.source()))
    }

    fn usage(&self) -> String {
        format!("{}: <api_key>", self.display_name)
    }
}

/// `?api_key=<token>`; the first occurrence of the parameter is used.
#[derive(Debug, Clone)]
pub struct QueryParameter {
    name: String,
}

impl QueryParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl CredentialExtractor for QueryParameter {
    fn source(&self) -> CredentialSource {
        CredentialSource::QueryParameter
    }

    fn extract(&self, _headers: &HeaderMap, uri: &Uri) -> Option<Credential> {
        let query = uri.query()?;
        let (_, value) = url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key.as_ref() == self.name)?;
        if value.is_empty() {
            return None;
        }
        Some(Credential::new(value.into_owned(), self.source()))
    }

    fn usage(&self) -> String {
        format!("?{}=<api_key>", self.name)
    }
}

/// Bearer header, then the dedicated header, then the query parameter.
pub fn default_chain(
    header: ApiKeyHeader,
    query: QueryParameter,
) -> Vec<Box<dyn CredentialExtractor>> {
    vec![Box::new(BearerHeader), Box::new(header), Box::new(query)]
}
