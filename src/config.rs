//! Configuration management for the now-playing relay.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Credentials are read once at startup into
//! [`Settings`] and stay immutable for the lifetime of the process.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf};

use thiserror::Error;

pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";
pub const DEFAULT_SCOPE: &str = "user-read-currently-playing user-read-playback-state";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8888;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} is not a valid port: {value}")]
    InvalidPort { name: &'static str, value: String },
}

/// Client credentials registered with the Spotify developer dashboard.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    /// Requested permissions, kept in the order they were configured.
    pub scopes: Vec<String>,
}

/// Upstream endpoints. Overridable so tests can point at a mock server.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub credentials: Credentials,
    pub endpoints: Endpoints,
    pub host: String,
    pub port: u16,
}

impl Settings {
    /// Builds the full configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the client id or secret is missing, or if
    /// `SERVER_PORT` does not parse as a port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            credentials: Credentials {
                client_id: spotify_client_id()?,
                client_secret: spotify_client_secret()?,
                redirect_uri: spotify_redirect_uri(),
                scopes: spotify_scope(),
            },
            endpoints: Endpoints {
                auth_url: spotify_apiauth_url(),
                token_url: spotify_apitoken_url(),
                api_url: spotify_apiurl(),
            },
            host: server_host(),
            port: server_port()?,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Base URL the operator opens in a browser, e.g. `http://127.0.0.1:8888`.
    pub fn public_url(&self) -> String {
        format!("http://{}", self.server_addr())
    }
}

/// Loads environment variables from `.env` files.
///
/// The working directory is tried first, then the platform-specific local data
/// directory under `spotwidget/.env`. Variables already present in the
/// environment are never overwritten.
///
/// # Directory Structure
///
/// The data directory file lives in:
/// - Linux: `~/.local/share/spotwidget/.env`
/// - macOS: `~/Library/Application Support/spotwidget/.env`
/// - Windows: `%LOCALAPPDATA%/spotwidget/.env`
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created or if
/// neither file could be loaded.
///
/// # Example
///
/// ```
/// use spotwidget::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let local = dotenv::dotenv().is_ok();

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotwidget/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    match dotenv::from_path(&path) {
        Ok(()) => Ok(()),
        Err(_) if local => Ok(()),
        Err(e) => Err(format!("no .env found at {}: {}", path.display(), e)),
    }
}

/// Returns the Spotify API client ID from `SPOTIFY_API_AUTH_CLIENT_ID`.
pub fn spotify_client_id() -> Result<String, ConfigError> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Returns the Spotify API client secret from `SPOTIFY_API_AUTH_CLIENT_SECRET`.
///
/// # Security Note
///
/// The client secret is only ever sent inside the Basic `Authorization` header
/// of token requests. It must not appear in logs, URLs or request bodies.
pub fn spotify_client_secret() -> Result<String, ConfigError> {
    required("SPOTIFY_API_AUTH_CLIENT_SECRET")
}

/// Returns the OAuth redirect URI.
///
/// Must match the redirect URI registered in the Spotify application settings.
/// Defaults to [`DEFAULT_REDIRECT_URI`].
pub fn spotify_redirect_uri() -> String {
    optional("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI)
}

/// Returns the requested scopes, split on whitespace with order preserved.
///
/// # Example
///
/// ```
/// // SPOTIFY_API_AUTH_SCOPE="user-read-currently-playing user-read-playback-state"
/// let scopes = spotify_scope();
/// assert_eq!(scopes[0], "user-read-currently-playing");
/// ```
pub fn spotify_scope() -> Vec<String> {
    parse_scopes(&optional("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE))
}

pub fn spotify_apiauth_url() -> String {
    optional("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

pub fn spotify_apitoken_url() -> String {
    optional("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)
}

pub fn spotify_apiurl() -> String {
    optional("SPOTIFY_API_URL", DEFAULT_API_URL)
}

pub fn server_host() -> String {
    optional("SERVER_HOST", DEFAULT_HOST)
}

/// Returns the listening port from `SERVER_PORT`, defaulting to 8888.
pub fn server_port() -> Result<u16, ConfigError> {
    match env::var("SERVER_PORT") {
        Ok(value) if !value.trim().is_empty() => {
            value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort {
                    name: "SERVER_PORT",
                    value,
                })
        }
        _ => Ok(DEFAULT_PORT),
    }
}

pub fn parse_scopes(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn optional(name: &str, default: &str) -> String {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}
