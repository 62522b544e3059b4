/*
 * Responsibility
 * - A credential presented by a caller, and where it came from
 * - The raw token never shows up in Debug output
 */
use std::fmt;

/// Where a credential was found on the inbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    BearerHeader,
    ApiKeyHeader,
    QueryParameter,
}

impl CredentialSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialSource::BearerHeader => "bearer_header",
            CredentialSource::ApiKeyHeader => "api_key_header",
            CredentialSource::QueryParameter => "query_parameter",
        }
    }
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-request candidate token. Dropped once the gate has decided.
#[derive(Clone)]
pub struct Credential {
    token: String,
    source: CredentialSource,
}

impl Credential {
    pub fn new(token: impl Into<String>, source: CredentialSource) -> Self {
        Self {
            token: token.into(),
            source,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn source(&self) -> CredentialSource {
        self.source
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"[REDACTED]")
            .field("source", &self.source)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_token() {
        let credential = Credential::new("abc123", CredentialSource::ApiKeyHeader);
        let printed = format!("{credential:?}");

        assert!(!printed.contains("abc123"));
        assert!(printed.contains("REDACTED"));
        assert!(printed.contains("ApiKeyHeader"));
    }
}
