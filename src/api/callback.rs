use std::collections::HashMap;

use axum::{
    Extension,
    extract::Query,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{server::AppState, success, warning};

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<AppState>,
) -> Response {
    if let Some(error) = params.get("error") {
        warning!("Authorization denied: {}", error);
        return (
            StatusCode::BAD_REQUEST,
            format!("Authorization failed: {error}"),
        )
            .into_response();
    }

    let Some(code) = params.get("code").filter(|c| !c.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            "Missing authorization code. Start again at /login.",
        )
            .into_response();
    };

    {
        // only enforced when /login issued a state
        let pending = state.pending_state.lock().await;
        if let Some(expected) = pending.as_deref() {
            if params.get("state").map(String::as_str) != Some(expected) {
                return (
                    StatusCode::BAD_REQUEST,
                    "State mismatch. Start again at /login.",
                )
                    .into_response();
            }
        }
    }

    match state.tokens.complete_authorization(code).await {
        Ok(()) => {
            state.pending_state.lock().await.take();
            success!("Logged in to Spotify");
            Html(
                "<h2>Logged in to Spotify.</h2><p>You can close this window and add /widget to your stream.</p>",
            )
            .into_response()
        }
        Err(e) => {
            warning!("{}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<h4>Login failed.</h4>"),
            )
                .into_response()
        }
    }
}
