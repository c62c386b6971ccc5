//! # Spotify Integration Module
//!
//! Thin, stateless wrappers around the two Spotify surfaces the relay talks to.
//! Every function takes the shared [`reqwest::Client`] and the endpoint it
//! should hit, so the same code runs against the real API and a mock server.
//!
//! ## Architecture
//!
//! ```text
//! HTTP Boundary (api)
//!          ↓
//! Managers (TokenManager, PlaybackFetcher)
//!          ↓
//! Spotify Integration Layer
//!     ├── auth   (authorize URL, code exchange, refresh)
//!     └── player (current playback state)
//!          ↓
//! Spotify Web API / Accounts service
//! ```
//!
//! ## Authentication Strategy
//!
//! The relay uses the authorization-code flow with a client secret. Token
//! requests authenticate with HTTP Basic auth (`base64(client_id:client_secret)`);
//! the secret never appears in a URL or request body.
//!
//! ## Error Types
//!
//! - [`auth`] returns `Result<_, String>` with a human readable cause
//! - [`player`] returns a discriminated [`crate::types::PlaybackResponse`] and
//!   reserves `Err(reqwest::Error)` for transport failures
//!
//! State, expiry and retries are not handled here; see [`crate::management`].

pub mod auth;
pub mod player;
