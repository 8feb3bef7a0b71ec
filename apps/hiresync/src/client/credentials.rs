use std::path::PathBuf;

use serde_json::{Map, Value};
use tracing::debug;

/// Source of the bearer token attached to outgoing requests.
///
/// Returning `None` sends the request unauthenticated; the server decides.
pub trait CredentialProvider: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

/// Never authenticates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

impl CredentialProvider for NoCredentials {
    fn bearer_token(&self) -> Option<String> {
        None
    }
}

/// A fixed token, mostly for tests and scripted use.
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

impl CredentialProvider for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        let token = self.0.trim();
        (!token.is_empty()).then(|| token.to_string())
    }
}

/// Reads the token from persisted client storage: a JSON object of string keys.
///
/// The file is re-read on every request so a token written by a sign-in flow is
/// picked up without restarting. A missing file, bad JSON, or missing key all
/// mean "no token".
#[derive(Debug, Clone)]
pub struct StorageTokenProvider {
    path: PathBuf,
    key: String,
}

impl StorageTokenProvider {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    fn read_storage(&self) -> Option<Map<String, Value>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!("Credential storage {} unreadable: {e}", self.path.display());
                return None;
            }
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => Some(map),
            Ok(_) => {
                debug!("Credential storage {} is not a JSON object", self.path.display());
                None
            }
            Err(e) => {
                debug!("Credential storage {} is not valid JSON: {e}", self.path.display());
                None
            }
        }
    }
}

impl CredentialProvider for StorageTokenProvider {
    fn bearer_token(&self) -> Option<String> {
        self.read_storage()?
            .get(&self.key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
    }
}
