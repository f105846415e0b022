//! Credential storage and the provider seam the HTTP adapter reads from.
//!
//! The bearer token is never global state: the adapter is handed a
//! [`TokenProvider`] at construction time and reads it when each request is
//! built.

use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// Source of the bearer token, read at request-construction time.
pub trait TokenProvider: Send + Sync {
    /// Current token, or `None` to send the request unauthenticated.
    fn token(&self) -> Option<String>;
}

/// Fixed token (env override, tests).
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        if token.trim().is_empty() {
            Self(None)
        } else {
            Self(Some(token))
        }
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl TokenProvider for StaticToken {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// File-backed token store under the data directory. The web frontend kept
/// the token in localStorage; this is the CLI equivalent.
pub struct TokenFile {
    path: PathBuf,
    cached: RwLock<Option<String>>,
}

impl TokenFile {
    pub fn new(path: PathBuf) -> Self {
        let cached = std::fs::read_to_string(&path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        Self {
            path,
            cached: RwLock::new(cached),
        }
    }

    pub fn save(&self, token: &str) -> Result<(), CliError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&self.path, token)?;
        if let Ok(mut cached) = self.cached.write() {
            *cached = Some(token.to_string());
        }
        tracing::debug!(target: "securetask.auth", path = %self.path.display(), "token saved");
        Ok(())
    }

    pub fn clear(&self) -> Result<(), CliError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        if let Ok(mut cached) = self.cached.write() {
            *cached = None;
        }
        tracing::debug!(target: "securetask.auth", "token cleared");
        Ok(())
    }

    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }
}

impl TokenProvider for TokenFile {
    fn token(&self) -> Option<String> {
        self.cached.read().ok().and_then(|c| c.clone())
    }
}

/// Profile as served by `GET /users/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterPayload {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Response of `POST /auth/login` and `POST /auth/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_token_treats_blank_as_anonymous() {
        assert_eq!(StaticToken::new("  ").token(), None);
        assert_eq!(StaticToken::new("abc").token(), Some("abc".to_string()));
    }

    #[test]
    fn token_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");

        let store = TokenFile::new(path.clone());
        assert!(!store.is_logged_in());

        store.save("secret-token").unwrap();
        assert_eq!(store.token(), Some("secret-token".to_string()));

        // A fresh instance reads the persisted token back.
        let reopened = TokenFile::new(path.clone());
        assert_eq!(reopened.token(), Some("secret-token".to_string()));

        store.clear().unwrap();
        assert!(!store.is_logged_in());
        assert!(!path.exists());
    }

    #[test]
    fn token_file_ignores_blank_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        std::fs::write(&path, "  \n").unwrap();
        assert_eq!(TokenFile::new(path).token(), None);
    }
}
