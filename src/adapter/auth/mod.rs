//! Authentication Module
//!
//! Google OAuth認証関連の機能

pub mod credential_files;
pub mod google_auth;
pub mod installed_flow;
pub mod token_source;

use anyhow::{Context, Result};
use log::{info, warn};
use youtube3::client::GetToken;

use crate::adapter::config::Config;

pub use google_auth::{
    create_youtube_credentials, load_authorized_user, CredentialError, YOUTUBE_UPLOAD_SCOPE,
};
pub use installed_flow::InstalledFlowAuth;
pub use token_source::{GoogleAuthToken, TokenFuture};

/// Token source handed to the YouTube client
#[derive(Clone)]
pub enum YouTubeAuth {
    /// Refresh token from the token file or `TOKEN_JSON`
    AuthorizedUser(GoogleAuthToken),
    /// Browser consent with cached tokens
    InstalledFlow(InstalledFlowAuth),
}

impl GetToken for YouTubeAuth {
    fn get_token<'a>(&'a self, scopes: &'a [&str]) -> TokenFuture<'a> {
        match self {
            YouTubeAuth::AuthorizedUser(token) => token.get_token(scopes),
            YouTubeAuth::InstalledFlow(auth) => auth.get_token(scopes),
        }
    }
}

/// Materializes credential files from the environment and builds YouTube auth.
///
/// Without a usable token file the browser consent flow is started.
pub async fn load_youtube_auth(config: &Config) -> Result<YouTubeAuth> {
    let client_secret_path = config.client_secret_path();
    let token_path = config.token_path();

    credential_files::materialize_env_files(&client_secret_path, &token_path)?;

    match load_authorized_user(&token_path, &client_secret_path) {
        Ok(user) => {
            info!("Loaded OAuth credentials for client {}", user.client_id);
            let credentials = create_youtube_credentials(&user)
                .context("Failed to authenticate with YouTube")?;
            Ok(YouTubeAuth::AuthorizedUser(GoogleAuthToken::new(credentials)))
        }
        Err(e @ (CredentialError::TokenMissing { .. } | CredentialError::NoRefreshToken(_))) => {
            warn!("{}, starting browser consent flow", e);
            let auth =
                installed_flow::authenticate(&client_secret_path, &config.token_cache_path())
                    .await?;
            Ok(YouTubeAuth::InstalledFlow(auth))
        }
        Err(e) => Err(e).context("Failed to load YouTube credentials"),
    }
}
