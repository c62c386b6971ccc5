//! Spotify Now-Playing Widget Relay
//!
//! This library implements a small local HTTP relay for a single streamer. It
//! performs the Spotify authorization-code flow, keeps the resulting tokens in
//! memory, refreshes them on demand and serves a browser widget that shows the
//! currently playing track.
//!
//! # Modules
//!
//! - `api` - HTTP handlers (`/login`, `/callback`, `/current-track`, `/widget`, ...)
//! - `config` - Configuration management and environment variables
//! - `management` - Token store, token lifecycle and playback normalization
//! - `server` - Shared application state and router
//! - `spotify` - Spotify Web API client functions
//! - `types` - Wire types and the playback snapshot
//! - `utils` - Formatting and small helpers
//!
//! Tokens are never persisted: after a restart the operator has to open
//! `/login` again.
//!
//! # Example
//!
//! ```
//! use spotwidget::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> spotwidget::Res<()> {
//!     config::load_env().await?;
//!     let settings = config::Settings::from_env()?;
//!     let state = server::AppState::from_settings(&settings);
//!     server::start_api_server(&settings.server_addr(), state).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Result alias for top-level plumbing such as server startup.
///
/// Library operations with a meaningful failure taxonomy return their own
/// error enums ([`config::ConfigError`], [`management::TokenError`]); this
/// alias only erases them where the caller just reports and exits.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Logs an informational line with a blue `o` marker.
///
/// Used for startup messages such as the listening address and the URLs the
/// operator has to open.
///
/// # Arguments
///
/// Same arguments as `println!`: a format string followed by its values.
///
/// # Example
///
/// ```
/// info!("Widget available at {}/widget", base_url);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Logs a completed action with a green checkmark.
///
/// Used when a login or a token refresh went through.
///
/// # Arguments
///
/// Same arguments as `println!`: a format string followed by its values.
///
/// # Example
///
/// ```
/// success!("Logged in to Spotify");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Logs a fatal error with a red `!` marker and exits with status 1.
///
/// Only for startup failures in the binary. Request handling never calls it:
/// the relay degrades instead of dying.
///
/// # Arguments
///
/// Same arguments as `println!`: a format string followed by its values.
///
/// # Example
///
/// ```
/// error!("Cannot load configuration: {}", e);
/// // unreachable
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Logs a recoverable problem with a yellow `!` marker.
///
/// Used for upstream failures the widget never sees (refresh errors,
/// non-success playback responses).
///
/// # Arguments
///
/// Same arguments as `println!`: a format string followed by its values.
///
/// # Example
///
/// ```
/// warning!("Playback request returned {}: {}", status, message);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
