use chrono::Utc;
use reqwest::{Client, Url};
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};

use crate::{
    config::{Credentials, Endpoints},
    management::store::TokenState,
    spotify, success, warning,
};

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("authorization code exchange failed: {0}")]
    AuthExchange(String),
    #[error("access token refresh failed: {0}")]
    Refresh(String),
    #[error("not authenticated, open /login first")]
    Unauthenticated,
}

/// Owns the token store and is the only writer to it.
pub struct TokenManager {
    credentials: Credentials,
    endpoints: Endpoints,
    client: Client,
    state: RwLock<TokenState>,
    // held for the whole refresh round-trip
    refresh_lock: Mutex<()>,
}

impl TokenManager {
    pub fn new(credentials: Credentials, endpoints: Endpoints) -> Self {
        Self::with_client(credentials, endpoints, Client::new())
    }

    pub fn with_client(credentials: Credentials, endpoints: Endpoints, client: Client) -> Self {
        Self::from_state(credentials, endpoints, client, TokenState::new())
    }

    /// Starts from already known tokens instead of an empty store.
    pub fn from_state(
        credentials: Credentials,
        endpoints: Endpoints,
        client: Client,
        state: TokenState,
    ) -> Self {
        TokenManager {
            credentials,
            endpoints,
            client,
            state: RwLock::new(state),
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn authorize_url(&self, state: Option<&str>) -> Result<Url, String> {
        spotify::auth::authorize_url(&self.credentials, &self.endpoints.auth_url, state)
    }

    /// Exchanges `code` and replaces the stored tokens.
    pub async fn complete_authorization(&self, code: &str) -> Result<(), TokenError> {
        if code.trim().is_empty() {
            return Err(TokenError::AuthExchange(
                "missing authorization code".to_string(),
            ));
        }

        let response =
            spotify::auth::exchange_code(&self.client, &self.credentials, &self.endpoints, code)
                .await
                .map_err(TokenError::AuthExchange)?;

        let mut state = self.state.write().await;
        state.apply(response, Utc::now());
        Ok(())
    }

    /// Returns an access token that is valid right now, refreshing at most once.
    ///
    /// Refreshes are single-flight: a caller that had to wait for a concurrent
    /// refresh re-checks the store and reuses its result. A failed refresh
    /// leaves the store untouched so the next call retries.
    pub async fn ensure_valid_access_token(&self) -> Result<String, TokenError> {
        if let Some(token) = self.state.read().await.valid_access_token(Utc::now()) {
            return Ok(token.to_string());
        }

        let _refreshing = self.refresh_lock.lock().await;

        let refresh_token = {
            let state = self.state.read().await;
            if let Some(token) = state.valid_access_token(Utc::now()) {
                return Ok(token.to_string());
            }
            state
                .refresh_token
                .clone()
                .ok_or(TokenError::Unauthenticated)?
        };

        let response = spotify::auth::refresh_token(
            &self.client,
            &self.credentials,
            &self.endpoints,
            &refresh_token,
        )
        .await
        .map_err(TokenError::Refresh)?;

        let access_token = response.access_token.clone();
        self.state.write().await.apply(response, Utc::now());
        success!("Access token refreshed");

        Ok(access_token)
    }

    /// Forces the next `ensure_valid_access_token` to refresh, unless `token`
    /// has already been replaced by a newer one.
    pub async fn invalidate_access_token(&self, token: &str) {
        if self.state.write().await.invalidate(token) {
            warning!("Access token rejected upstream, refreshing on next request");
        }
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_authenticated()
    }

    pub async fn snapshot(&self) -> TokenState {
        self.state.read().await.clone()
    }
}
