use reqwest::{Client, Url, header::AUTHORIZATION};

use crate::{
    config::{Credentials, Endpoints},
    types::TokenResponse,
    utils,
};

/// Builds the Spotify authorization URL for the authorization-code flow.
///
/// The browser of the operator is redirected to this URL by `/login`. Spotify
/// asks the user to grant the requested scopes and then redirects back to the
/// configured redirect URI with either `code` or `error` in the query string.
///
/// # Arguments
///
/// * `credentials` - Client id, redirect URI and scopes to embed
/// * `auth_url` - Base URL of the authorization endpoint
/// * `state` - Optional opaque value echoed back to the callback
///
/// # Query Parameters
///
/// - `response_type=code`
/// - `client_id`
/// - `scope` (space-joined, in configured order)
/// - `redirect_uri`
/// - `state` (only when given)
///
/// The client secret is never part of this URL.
///
/// # Errors
///
/// Returns an error string if `auth_url` is not an absolute URL.
///
/// # Example
///
/// ```
/// let url = authorize_url(&credentials, "https://accounts.spotify.com/authorize", None)?;
/// assert!(url.as_str().contains("response_type=code"));
/// ```
pub fn authorize_url(
    credentials: &Credentials,
    auth_url: &str,
    state: Option<&str>,
) -> Result<Url, String> {
    let scope = credentials.scopes.join(" ");
    let mut params = vec![
        ("response_type", "code"),
        ("client_id", credentials.client_id.as_str()),
        ("scope", scope.as_str()),
        ("redirect_uri", credentials.redirect_uri.as_str()),
    ];
    if let Some(state) = state {
        params.push(("state", state));
    }

    Url::parse_with_params(auth_url, &params).map_err(|e| e.to_string())
}

/// Exchanges an authorization code for an access and refresh token.
///
/// Completes the authorization-code flow with the code Spotify handed to the
/// callback. The client authenticates with HTTP Basic auth built from the
/// client id and secret.
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `credentials` - Client credentials and the redirect URI used for `/login`
/// * `endpoints` - Upstream endpoints, only `token_url` is used
/// * `code` - Authorization code received from the callback
///
/// # Returns
///
/// - `Ok(TokenResponse)` - Access token, lifetime and usually a refresh token
/// - `Err(String)` - Network failure, non-success status or malformed body
///
/// # Security Note
///
/// The authorization code is single-use and expires quickly. The exchange
/// should happen immediately after receiving the code.
pub async fn exchange_code(
    client: &Client,
    credentials: &Credentials,
    endpoints: &Endpoints,
    code: &str,
) -> Result<TokenResponse, String> {
    request_token(
        client,
        credentials,
        &endpoints.token_url,
        &[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", &credentials.redirect_uri),
        ],
    )
    .await
}

/// Exchanges a refresh token for a new access token.
///
/// # Returns
///
/// - `Ok(TokenResponse)` - Fresh access token; `refresh_token` is only set
///   when Spotify decided to rotate it
/// - `Err(String)` - Network failure, non-success status or malformed body
///
/// # Example
///
/// ```
/// let fresh = refresh_token(&client, &credentials, &endpoints, "AQC...").await?;
/// println!("New access token expires in {} seconds", fresh.expires_in);
/// ```
pub async fn refresh_token(
    client: &Client,
    credentials: &Credentials,
    endpoints: &Endpoints,
    refresh_token: &str,
) -> Result<TokenResponse, String> {
    request_token(
        client,
        credentials,
        &endpoints.token_url,
        &[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ],
    )
    .await
}

async fn request_token(
    client: &Client,
    credentials: &Credentials,
    token_url: &str,
    form: &[(&str, &str)],
) -> Result<TokenResponse, String> {
    let res = client
        .post(token_url)
        .header(
            AUTHORIZATION,
            utils::basic_auth_value(&credentials.client_id, &credentials.client_secret),
        )
        .form(form)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(format!("token endpoint returned {}: {}", status, truncate(&body)));
    }

    res.json::<TokenResponse>().await.map_err(|e| e.to_string())
}

pub(crate) fn truncate(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
