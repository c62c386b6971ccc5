use axum::{
    Extension,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{server::AppState, utils, warning};

pub async fn login(Extension(state): Extension<AppState>) -> Response {
    let csrf = utils::generate_state();

    let url = match state.tokens.authorize_url(Some(&csrf)) {
        Ok(url) => url,
        Err(e) => {
            warning!("Cannot build authorization URL: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Authorization URL is misconfigured.",
            )
                .into_response();
        }
    };

    *state.pending_state.lock().await = Some(csrf);

    (StatusCode::FOUND, [(header::LOCATION, url.to_string())]).into_response()
}
