mod auth;
mod playback;
mod store;

pub use auth::TokenError;
pub use auth::TokenManager;
pub use playback::PlaybackFetcher;
pub use store::EXPIRY_SAFETY_MARGIN_SECS;
pub use store::MAX_TOKEN_LIFETIME_SECS;
pub use store::TokenState;
