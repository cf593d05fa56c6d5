use chrono::NaiveDate;
use reqwest::Client;

use super::{
    summary::contribution_outcome, wakatime::wakatime_outcome, StatsError, StatsOutcome,
    StatsSummary, WakaTimeStats,
};

/// One GET, no retries. Non-success statuses are errors.
pub async fn fetch_body(client: &Client, url: &str) -> Result<String, StatsError> {
    let resp = client.get(url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(StatsError::Status(status.as_u16()));
    }
    Ok(resp.text().await?)
}

pub async fn github_stats(
    client: &Client,
    url: &str,
    today: NaiveDate,
) -> StatsOutcome<StatsSummary> {
    contribution_outcome(fetch_body(client, url).await, today)
}

pub async fn wakatime_stats(client: &Client, url: &str) -> StatsOutcome<WakaTimeStats> {
    wakatime_outcome(fetch_body(client, url).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{LoadState, FALLBACK_SUMMARY};
    use axum::{http::StatusCode, routing::get, Router};

    async fn serve(status: StatusCode, body: &'static str) -> String {
        let app = Router::new().route("/stats", get(move || async move { (status, body) }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/stats")
    }

    async fn unreachable_url() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}/stats")
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[tokio::test]
    async fn test_github_stats_success() {
        let url = serve(
            StatusCode::OK,
            r#"{"total": {"lastYear": 730}, "contributions": [{"date": "2026-10-17", "count": 3}]}"#,
        )
        .await;
        let outcome = github_stats(&Client::new(), &url, today()).await;
        assert_eq!(
            outcome,
            StatsOutcome::Ok(StatsSummary {
                total: 730,
                this_week: 3,
                best: 3,
                average: 2.0,
            })
        );
    }

    #[tokio::test]
    async fn test_github_stats_network_error_falls_back() {
        let url = unreachable_url().await;
        let mut state = LoadState::Loading;
        state.settle(github_stats(&Client::new(), &url, today()).await);

        assert!(!state.is_loading());
        assert_eq!(
            state.outcome(),
            Some(&StatsOutcome::Fallback(FALLBACK_SUMMARY))
        );
    }

    #[tokio::test]
    async fn test_github_stats_error_status_falls_back() {
        let url = serve(StatusCode::NOT_FOUND, r#"{"error": "user not found"}"#).await;
        let outcome = github_stats(&Client::new(), &url, today()).await;
        assert_eq!(outcome, StatsOutcome::Fallback(FALLBACK_SUMMARY));
    }

    #[tokio::test]
    async fn test_fetch_body_reports_status() {
        let url = serve(StatusCode::BAD_GATEWAY, "").await;
        let err = fetch_body(&Client::new(), &url).await.unwrap_err();
        assert_eq!(err, StatsError::Status(502));
    }

    #[tokio::test]
    async fn test_wakatime_stats_empty_on_error() {
        let url = serve(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error": "Failed to fetch WakaTime stats"}"#,
        )
        .await;
        assert!(wakatime_stats(&Client::new(), &url).await.is_empty());
    }

    #[tokio::test]
    async fn test_wakatime_stats_success() {
        let url = serve(
            StatusCode::OK,
            r#"{"data": {"languages": [{"name": "Rust", "percent": 88.5}]}}"#,
        )
        .await;
        let outcome = wakatime_stats(&Client::new(), &url).await;
        let languages = outcome.data().unwrap().top_languages();
        assert_eq!(languages.len(), 1);
        assert_eq!(languages[0].name, "Rust");
    }
}
