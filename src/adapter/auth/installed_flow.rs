//! Installed App Flow
//!
//! トークンがない場合のブラウザ同意フロー（ローカルサーバーへのリダイレクト）

use anyhow::{Context, Result};
use log::info;
use youtube3::hyper::client::HttpConnector;
use youtube3::hyper_rustls::HttpsConnector;
use youtube3::oauth2::authenticator::Authenticator;
use youtube3::oauth2::{self, InstalledFlowAuthenticator, InstalledFlowReturnMethod};

use super::google_auth::YOUTUBE_UPLOAD_SCOPE;

pub type InstalledFlowAuth = Authenticator<HttpsConnector<HttpConnector>>;

/// Runs the consent flow with the OAuth client secret file.
///
/// Tokens are cached in `token_cache_path`; later runs reuse and refresh them
/// without opening the browser again.
pub async fn authenticate(
    client_secret_path: &str,
    token_cache_path: &str,
) -> Result<InstalledFlowAuth> {
    let secret = oauth2::read_application_secret(client_secret_path)
        .await
        .with_context(|| format!("Failed to read OAuth client secret {}", client_secret_path))?;

    let auth = InstalledFlowAuthenticator::builder(secret, InstalledFlowReturnMethod::HTTPRedirect)
        .persist_tokens_to_disk(token_cache_path)
        .build()
        .await
        .context("Failed to create installed app authenticator")?;

    // 起動時に同意を済ませる
    auth.token(&[YOUTUBE_UPLOAD_SCOPE])
        .await
        .context("OAuth consent flow failed")?;
    info!("✓ Authorized via browser consent, tokens cached in {}", token_cache_path);

    Ok(auth)
}
