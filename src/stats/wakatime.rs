use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::{StatsError, StatsOutcome};

pub const TOP_LANGUAGES: usize = 6;

/// Languages in upstream order, at most [`TOP_LANGUAGES`] of them.
pub type LanguageBreakdown = Vec<LanguageShare>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageShare {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub percent: f64,
}

/// The `data` object of a WakaTime stats response, kept as served.
///
/// Only `languages` is read by the site. Everything else stays untyped in
/// `rest`, so an unexpected shape elsewhere can't hide the languages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WakaTimeStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub languages: Vec<LanguageShare>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl WakaTimeStats {
    pub fn top_languages(&self) -> LanguageBreakdown {
        self.languages.iter().take(TOP_LANGUAGES).cloned().collect()
    }

    pub fn human_readable_total(&self) -> Option<&str> {
        self.rest.get("human_readable_total")?.as_str()
    }
}

#[derive(Deserialize)]
struct Envelope {
    data: WakaTimeStats,
}

/// WakaTime has no substitute data: anything but a readable `data` object is `Empty`.
pub fn wakatime_outcome(body: Result<String, StatsError>) -> StatsOutcome<WakaTimeStats> {
    let parsed = body
        .and_then(|body| serde_json::from_str::<Envelope>(&body).map_err(StatsError::from));
    match parsed {
        Ok(envelope) => StatsOutcome::Ok(envelope.data),
        Err(e) => {
            log::warn!("No WakaTime stats: {e}");
            StatsOutcome::Empty
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_languages_keeps_upstream_order() {
        let body = r#"{"data": {"languages": [
            {"name": "Rust", "percent": 40.1, "total_seconds": 100},
            {"name": "TypeScript", "percent": 20.0},
            {"name": "Markdown", "percent": 25.0},
            {"name": "TOML", "percent": 5.0},
            {"name": "YAML", "percent": 4.0},
            {"name": "Bash", "percent": 3.0},
            {"name": "JSON", "percent": 2.0}
        ], "human_readable_total": "21 hrs 4 mins"}}"#;

        let outcome = wakatime_outcome(Ok(body.to_string()));
        let stats = outcome.data().unwrap();
        let names: Vec<_> = stats
            .top_languages()
            .into_iter()
            .map(|l| l.name)
            .collect();

        assert_eq!(
            names,
            ["Rust", "TypeScript", "Markdown", "TOML", "YAML", "Bash"]
        );
        assert_eq!(stats.human_readable_total(), Some("21 hrs 4 mins"));
    }

    #[test]
    fn test_failures_are_empty() {
        assert!(wakatime_outcome(Err(StatsError::Status(500))).is_empty());
        assert!(wakatime_outcome(Ok(r#"{"error": "nope"}"#.to_string())).is_empty());
        assert!(wakatime_outcome(Ok("garbage".to_string())).is_empty());
    }

    #[test]
    fn test_missing_languages_is_valid_and_empty_list() {
        let outcome = wakatime_outcome(Ok(r#"{"data": {}}"#.to_string()));
        assert_eq!(outcome, StatsOutcome::Ok(WakaTimeStats::default()));
        assert!(outcome.data().unwrap().top_languages().is_empty());
    }

    #[test]
    fn test_unexpected_shapes_keep_languages() {
        let body = r#"{"data": {
            "languages": [{"name": "Rust", "percent": 90.0}, {"name": "Nix", "percent": null}],
            "range": {"start": "2026-10-11", "end": "2026-10-18"},
            "editors": null,
            "operating_systems": "Linux",
            "human_readable_total": 42
        }}"#;

        let outcome = wakatime_outcome(Ok(body.to_string()));
        assert!(!outcome.is_empty());
        let stats = outcome.data().unwrap();
        assert_eq!(
            stats.top_languages(),
            [
                LanguageShare {
                    name: "Rust".to_string(),
                    percent: 90.0,
                },
                LanguageShare {
                    name: "Nix".to_string(),
                    percent: 0.0,
                },
            ]
        );
        assert_eq!(stats.rest["range"]["start"], "2026-10-11");
        assert_eq!(stats.rest["editors"], Value::Null);
        assert_eq!(stats.human_readable_total(), None);
    }

    #[test]
    fn test_null_languages_is_empty_list() {
        let outcome = wakatime_outcome(Ok(r#"{"data": {"languages": null}}"#.to_string()));
        assert!(outcome.data().unwrap().top_languages().is_empty());
    }
}
