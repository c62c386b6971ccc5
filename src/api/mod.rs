//! # API Module
//!
//! HTTP endpoints served to the operator's browser and to the widget.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - Redirects (302) to the Spotify authorization page with a
//!   fresh `state` value.
//! - [`callback`] - Receives `code` (or `error`) from Spotify and completes
//!   the authorization-code exchange. Answers 400 for a denied request, a
//!   missing code or a mismatching `state`, 500 when the exchange fails.
//!
//! ### Widget
//!
//! - [`current_track`] - Normalized playback snapshot as JSON. Always 200;
//!   every failure degrades to `{"active": false}`.
//! - [`current_track_text`] - The same snapshot as a single plain-text line.
//! - [`widget`] - Static HTML page that polls `/current-track` every two seconds.
//!
//! ### Monitoring
//!
//! - [`health`] - Status, version and whether tokens are present.
//!
//! Upstream error bodies are logged, never forwarded to the browser.

mod callback;
mod current_track;
mod health;
mod login;
mod widget;

pub use callback::callback;
pub use current_track::{current_track, current_track_text};
pub use health::health;
pub use login::login;
pub use widget::widget;
