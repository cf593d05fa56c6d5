use axum::{
    extract::{Path, State},
    response::Response,
};
use tracing::warn;

use super::{ProxyError, ProxyState};

const API: &str = "GitHub";
const MAX_USERNAME: usize = 39;

/// GitHub logins: ASCII alphanumerics and single inner hyphens.
fn is_username(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_USERNAME
        && !name.starts_with('-')
        && !name.ends_with('-')
        && !name.contains("--")
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// `GET /api/contributions/{username}`: relays the public contribution calendar.
pub async fn contributions(
    State(state): State<ProxyState>,
    Path(username): Path<String>,
) -> Result<Response, ProxyError> {
    if !is_username(&username) {
        warn!(username = %username, "Rejected contributions request");
        return Err(ProxyError::InvalidUsername);
    }

    let url = state.config.contributions_url.replace("{username}", &username);
    let request = state.http.get(&url);
    state.forward(API, url, request).await
}
