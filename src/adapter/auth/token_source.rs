//! Access Token Source
//!
//! google-cloud-authの認証情報をYouTube APIクライアントに渡すためのブリッジ

use google_cloud_auth::credentials::{CacheableResource, Credentials};
use http::header::AUTHORIZATION;
use http::{Extensions, HeaderMap};
use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use youtube3::client::GetToken;

pub type TokenError = Box<dyn StdError + Send + Sync>;
pub type TokenFuture<'a> = Pin<Box<dyn Future<Output = Result<Option<String>, TokenError>> + Send + 'a>>;

/// Access tokens from authorized user credentials, refreshed by google-cloud-auth
#[derive(Clone)]
pub struct GoogleAuthToken {
    credentials: Credentials,
}

impl GoogleAuthToken {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    async fn access_token(&self) -> Result<Option<String>, TokenError> {
        match self.credentials.headers(Extensions::new()).await? {
            CacheableResource::New { data, .. } => bearer_token(&data).map(Some),
            CacheableResource::NotModified => Err("credentials returned no auth headers".into()),
        }
    }
}

impl GetToken for GoogleAuthToken {
    // スコープは認証情報の作成時に指定済み
    fn get_token<'a>(&'a self, _scopes: &'a [&str]) -> TokenFuture<'a> {
        Box::pin(self.access_token())
    }
}

/// `Authorization: Bearer <token>` ヘッダーからトークンを取り出す
pub fn bearer_token(headers: &HeaderMap) -> Result<String, TokenError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or("credentials returned no Authorization header")?
        .to_str()?;

    value
        .strip_prefix("Bearer ")
        .map(str::to_string)
        .ok_or_else(|| "Authorization header is not a bearer token".into())
}
