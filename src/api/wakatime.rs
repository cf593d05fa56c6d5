use axum::{extract::State, response::Response};
use tracing::error;

use super::{ProxyError, ProxyState};

const API: &str = "WakaTime";

/// `GET /api/wakatime`: relays the upstream stats, keeping the API key on the server.
pub async fn wakatime(State(state): State<ProxyState>) -> Result<Response, ProxyError> {
    let Some(api_key) = state.config.api_key.as_deref() else {
        error!("WAKATIME_API_KEY is not set");
        return Err(ProxyError::MissingCredential(API));
    };

    let request = state
        .http
        .get(&state.config.upstream_url)
        .query(&[("api_key", api_key)]);
    state
        .forward(API, state.config.upstream_url.clone(), request)
        .await
}
