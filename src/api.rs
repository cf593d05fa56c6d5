mod contributions;
mod wakatime;

use std::{sync::Arc, time::Instant};

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use dashmap::DashMap;
use reqwest::{Client, RequestBuilder};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::config::ProxyConfig;

pub use contributions::contributions;
pub use wakatime::wakatime;

pub const WAKATIME_PATH: &str = "/api/wakatime";
pub const CONTRIBUTIONS_PATH: &str = "/api/contributions/{username}";

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("{0} API key not configured")]
    MissingCredential(&'static str),
    #[error("Invalid username")]
    InvalidUsername,
    #[error("{api} API returned HTTP {status}")]
    Upstream { api: &'static str, status: StatusCode },
    #[error("Failed to fetch {api} stats")]
    Request {
        api: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

impl ProxyError {
    fn status(&self) -> StatusCode {
        match self {
            ProxyError::Upstream { status, .. } => *status,
            ProxyError::InvalidUsername => StatusCode::BAD_REQUEST,
            ProxyError::MissingCredential(_) | ProxyError::Request { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Debug, Clone)]
pub struct CachedBody {
    pub body: serde_json::Value,
    pub fetched_at: Instant,
}

/// Shared by every proxy request.
#[derive(Clone)]
pub struct ProxyState {
    pub config: Arc<ProxyConfig>,
    pub http: Client,
    pub cache: Arc<DashMap<String, CachedBody>>,
}

impl ProxyState {
    pub fn new(config: ProxyConfig) -> Self {
        Self {
            config: Arc::new(config),
            http: Client::new(),
            cache: Arc::new(DashMap::new()),
        }
    }

    /// A cached body still inside the revalidation window.
    fn fresh(&self, key: &str) -> Option<serde_json::Value> {
        let entry = self.cache.get(key)?;
        (entry.fetched_at.elapsed() < self.config.revalidate).then(|| entry.body.clone())
    }

    fn store(&self, key: String, body: serde_json::Value) {
        self.cache.insert(
            key,
            CachedBody {
                body,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Sends `request` once and relays its JSON body, or reuses the body cached
    /// under `key`. Only successful bodies are cached.
    async fn forward(
        &self,
        api: &'static str,
        key: String,
        request: RequestBuilder,
    ) -> Result<Response, ProxyError> {
        if let Some(body) = self.fresh(&key) {
            debug!(api, "Serving stats from cache");
            return Ok(self.relay(body));
        }

        let resp = request.send().await.map_err(|source| {
            error!(api, "Stats request failed: {source}");
            ProxyError::Request { api, source }
        })?;

        let status = resp.status();
        if !status.is_success() {
            warn!(api, status = status.as_u16(), "Stats API returned an error status");
            return Err(ProxyError::Upstream { api, status });
        }

        let body: serde_json::Value = resp.json().await.map_err(|source| {
            error!(api, "Stats response wasn't JSON: {source}");
            ProxyError::Request { api, source }
        })?;
        self.store(key, body.clone());
        Ok(self.relay(body))
    }

    fn relay(&self, body: serde_json::Value) -> Response {
        let cache_control = format!(
            "public, s-maxage={}, stale-while-revalidate=60",
            self.config.revalidate.as_secs()
        );
        let mut resp = Json(body).into_response();
        if let Ok(value) = HeaderValue::from_str(&cache_control) {
            resp.headers_mut().insert(header::CACHE_CONTROL, value);
        }
        resp
    }
}

pub fn router(state: ProxyState) -> Router {
    Router::new()
        .route(WAKATIME_PATH, get(wakatime))
        .route(CONTRIBUTIONS_PATH, get(contributions))
        .with_state(state)
}
