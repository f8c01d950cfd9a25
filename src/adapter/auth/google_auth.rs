//! Google OAuth Authentication
//!
//! YouTubeアップロード用のユーザー認証情報を構築

use google_cloud_auth::credentials::{user_account, Credentials};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;

pub const YOUTUBE_UPLOAD_SCOPE: &str = "https://www.googleapis.com/auth/youtube.upload";

const AUTHORIZED_USER: &str = "authorized_user";

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("{path} missing (set TOKEN_JSON or authorize with {client_secret})")]
    TokenMissing { path: String, client_secret: String },

    #[error("{0} has no refresh_token")]
    NoRefreshToken(String),

    #[error("{path} holds {kind} credentials, expected authorized_user")]
    UnsupportedType { path: String, kind: String },

    #[error("no OAuth client id/secret in {token} or {client_secret}")]
    ClientMissing { token: String, client_secret: String },

    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to build Google credentials: {0}")]
    Build(String),
}

/// Token file as written by gcloud or dumped by other OAuth client libraries
#[derive(Debug, Default, Deserialize)]
struct TokenFile {
    #[serde(rename = "type")]
    kind: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ClientSecretFile {
    installed: Option<ClientSection>,
    web: Option<ClientSection>,
}

#[derive(Debug, Clone, Deserialize)]
struct ClientSection {
    client_id: String,
    client_secret: String,
}

/// Normalized authorized user credentials
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizedUser {
    #[serde(rename = "type")]
    kind: String,
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl fmt::Debug for AuthorizedUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorizedUser")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .field("refresh_token", &"[redacted]")
            .finish()
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &str) -> Result<T, CredentialError> {
    let content = fs::read_to_string(path).map_err(|source| CredentialError::Io {
        path: path.to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CredentialError::Json {
        path: path.to_string(),
        source,
    })
}

/// Loads authorized user credentials from the token file.
///
/// Missing client id/secret are taken from the client secret file.
pub fn load_authorized_user(
    token_path: &str,
    client_secret_path: &str,
) -> Result<AuthorizedUser, CredentialError> {
    if !std::path::Path::new(token_path).exists() {
        return Err(CredentialError::TokenMissing {
            path: token_path.to_string(),
            client_secret: client_secret_path.to_string(),
        });
    }

    let token: TokenFile = read_json(token_path)?;

    if let Some(kind) = token.kind.as_deref() {
        if kind != AUTHORIZED_USER {
            return Err(CredentialError::UnsupportedType {
                path: token_path.to_string(),
                kind: kind.to_string(),
            });
        }
    }

    let refresh_token = token
        .refresh_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| CredentialError::NoRefreshToken(token_path.to_string()))?;

    let (client_id, client_secret) = match (token.client_id, token.client_secret) {
        (Some(id), Some(secret)) => (id, secret),
        _ => {
            let client_missing = || CredentialError::ClientMissing {
                token: token_path.to_string(),
                client_secret: client_secret_path.to_string(),
            };
            if !std::path::Path::new(client_secret_path).exists() {
                return Err(client_missing());
            }
            let secrets: ClientSecretFile = read_json(client_secret_path)?;
            let section = secrets
                .installed
                .or(secrets.web)
                .ok_or_else(client_missing)?;
            (section.client_id, section.client_secret)
        }
    };

    Ok(AuthorizedUser {
        kind: AUTHORIZED_USER.to_string(),
        client_id,
        client_secret,
        refresh_token,
    })
}

/// Creates credentials scoped for YouTube uploads.
///
/// Access tokens are refreshed by the library when they expire.
pub fn create_youtube_credentials(user: &AuthorizedUser) -> Result<Credentials, CredentialError> {
    let json = serde_json::to_value(user).map_err(|source| CredentialError::Json {
        path: "authorized user".to_string(),
        source,
    })?;

    user_account::Builder::new(json)
        .with_scopes([YOUTUBE_UPLOAD_SCOPE])
        .build()
        .map_err(|e| CredentialError::Build(e.to_string()))
}
