// crates/dinedb-core/src/error.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised while loading datasets or configuration.
///
/// Row-level problems never surface here: a row without its identity field
/// is dropped during normalization. These variants cover whole-file and
/// environment failures only.
#[derive(Debug, Error)]
pub enum DineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<figment::Error> for DineError {
    fn from(e: figment::Error) -> Self {
        DineError::Config(Box::new(e))
    }
}

pub type Result<T, E = DineError> = std::result::Result<T, E>;

/// External geocoding service. Tags both results and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Tgos,
    Nominatim,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Tgos => f.write_str("tgos"),
            Provider::Nominatim => f.write_str("nominatim"),
        }
    }
}

/// The three treatments a caller can give a failed geocode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Input must be corrected (empty address).
    BadInput,
    /// The services answered but had no match.
    NotFound,
    /// The services could not be reached or answered garbage; retry later.
    Unavailable,
}

/// Errors from the geocode chain and the TGOS data API.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("address must not be empty")]
    EmptyAddress,

    #[error("{provider}: no match for the requested location")]
    NotFound { provider: Provider },

    #[error("{provider}: request failed: {detail}")]
    Transport { provider: Provider, detail: String },

    #[error("{provider}: service responded with HTTP {status}")]
    Status { provider: Provider, status: u16 },

    #[error("{provider}: service reported an error: {detail}")]
    Upstream { provider: Provider, detail: String },

    #[error("{provider}: malformed response: {detail}")]
    Malformed { provider: Provider, detail: String },

    #[error("TGOS credentials are not configured")]
    MissingCredentials,

    #[error("locator capability unavailable: {0}")]
    Capability(String),
}

impl GeocodeError {
    /// Collapses the variant into the UI treatment it warrants.
    pub fn kind(&self) -> FailureKind {
        match self {
            GeocodeError::EmptyAddress => FailureKind::BadInput,
            GeocodeError::NotFound { .. } => FailureKind::NotFound,
            GeocodeError::Transport { .. }
            | GeocodeError::Status { .. }
            | GeocodeError::Upstream { .. }
            | GeocodeError::Malformed { .. }
            | GeocodeError::MissingCredentials
            | GeocodeError::Capability(_) => FailureKind::Unavailable,
        }
    }

    /// The provider that produced this error, if any.
    pub fn provider(&self) -> Option<Provider> {
        match self {
            GeocodeError::NotFound { provider }
            | GeocodeError::Transport { provider, .. }
            | GeocodeError::Status { provider, .. }
            | GeocodeError::Upstream { provider, .. }
            | GeocodeError::Malformed { provider, .. } => Some(*provider),
            GeocodeError::MissingCredentials | GeocodeError::Capability(_) => Some(Provider::Tgos),
            GeocodeError::EmptyAddress => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_separate_the_three_ui_cases() {
        assert_eq!(GeocodeError::EmptyAddress.kind(), FailureKind::BadInput);
        assert_eq!(
            GeocodeError::NotFound { provider: Provider::Nominatim }.kind(),
            FailureKind::NotFound
        );
        assert_eq!(
            GeocodeError::Status { provider: Provider::Nominatim, status: 503 }.kind(),
            FailureKind::Unavailable
        );
        assert_eq!(
            GeocodeError::Malformed { provider: Provider::Tgos, detail: "x".into() }.kind(),
            FailureKind::Unavailable
        );
    }

    #[test]
    fn messages_name_the_provider() {
        let e = GeocodeError::Upstream {
            provider: Provider::Tgos,
            detail: "Lng: out of range".into(),
        };
        assert_eq!(e.to_string(), "tgos: service reported an error: Lng: out of range");
        assert_eq!(e.provider(), Some(Provider::Tgos));
    }
}
