//! Credential Files
//!
//! 環境変数から認証ファイルを書き出す（コンテナ環境向け）

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::info;
use std::fs;
use std::path::Path;

/// OAuth client secret JSON, written verbatim
pub const CLIENT_SECRET_ENV: &str = "CLIENT_SECRET_JSON";
/// Authorized user token, base64 encoded or raw JSON
pub const TOKEN_ENV: &str = "TOKEN_JSON";

/// Decode a token payload: base64 when it decodes, the raw bytes otherwise.
pub fn decode_token_payload(data: &str) -> Vec<u8> {
    match STANDARD.decode(data.trim()) {
        Ok(bytes) => bytes,
        Err(_) => data.as_bytes().to_vec(),
    }
}

/// Writes `contents` to `path` unless the file already exists.
///
/// Returns whether the file was written.
pub fn write_if_missing(path: &str, contents: &[u8]) -> Result<bool> {
    let path = Path::new(path);
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}

/// Materializes credential files from the environment.
///
/// Existing files are never overwritten.
pub fn materialize_env_files(client_secret_path: &str, token_path: &str) -> Result<()> {
    materialize(
        client_secret_path,
        std::env::var(CLIENT_SECRET_ENV).ok(),
        token_path,
        std::env::var(TOKEN_ENV).ok(),
    )
}

fn materialize(
    client_secret_path: &str,
    client_secret: Option<String>,
    token_path: &str,
    token: Option<String>,
) -> Result<()> {
    if let Some(secret) = client_secret {
        if write_if_missing(client_secret_path, secret.as_bytes())? {
            info!("Wrote {} from {}", client_secret_path, CLIENT_SECRET_ENV);
        }
    }

    if let Some(token) = token {
        if write_if_missing(token_path, &decode_token_payload(&token))? {
            info!("Wrote {} from {}", token_path, TOKEN_ENV);
        }
    }

    Ok(())
}
