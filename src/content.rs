use std::sync::LazyLock;

use chrono::NaiveDate;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub static PORTFOLIO: LazyLock<Portfolio> =
    LazyLock::new(|| load_portfolio().expect("embedded portfolio.json should parse"));

#[derive(Embed)]
#[folder = "content"]
pub struct Assets;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("content file not found: {0}")]
    NotFound(String),
    #[error("couldn't parse {file}: {source}")]
    Parse {
        file: String,
        source: serde_json::Error,
    },
}

/// Reads and deserializes an embedded JSON file.
pub fn load_json<T: for<'de> Deserialize<'de>>(file: &str) -> Result<T, ContentError> {
    let asset = Assets::get(file).ok_or_else(|| ContentError::NotFound(file.to_string()))?;
    serde_json::from_slice(&asset.data).map_err(|source| ContentError::Parse {
        file: file.to_string(),
        source,
    })
}

pub fn load_portfolio() -> Result<Portfolio, ContentError> {
    load_json("portfolio.json")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub profile: Profile,
    pub skills: Vec<SkillGroup>,
    pub projects: Vec<Project>,
    pub posts: Vec<PostLink>,
    pub stats: StatsSource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub role: String,
    pub tagline: String,
    pub location: String,
    pub email: String,
    pub links: Vec<SocialLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillGroup {
    pub category: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub tech: Vec<String>,
    pub repo_url: Option<String>,
    pub live_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostLink {
    pub title: String,
    pub summary: String,
    pub url: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Where the stats widgets get their data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsSource {
    pub github_username: String,
    /// Contribution calendar URL with a `{username}` placeholder.
    pub contributions_url: String,
    pub wakatime_path: String,
}

impl Portfolio {
    pub fn contributions_url(&self) -> String {
        self.stats
            .contributions_url
            .replace("{username}", &self.stats.github_username)
    }

    /// Posts, newest first.
    pub fn recent_posts(&self) -> Vec<PostLink> {
        let mut posts = self.posts.clone();
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        posts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_portfolio_parses() {
        let portfolio = load_portfolio().expect("portfolio.json should parse");
        assert!(!portfolio.profile.name.is_empty());
        assert!(!portfolio.skills.is_empty());
        assert!(!portfolio.projects.is_empty());
        assert!(portfolio.stats.contributions_url.contains("{username}"));
    }

    #[test]
    fn test_contributions_url_fills_username() {
        let url = PORTFOLIO.contributions_url();
        assert!(!url.contains("{username}"));
        assert!(url.contains(&PORTFOLIO.stats.github_username));
    }

    #[test]
    fn test_recent_posts_sorted() {
        let posts = PORTFOLIO.recent_posts();
        assert!(posts.windows(2).all(|w| w[0].date >= w[1].date));
    }

    #[test]
    fn test_missing_file() {
        let err = load_json::<Portfolio>("nope.json").unwrap_err();
        assert!(matches!(err, ContentError::NotFound(_)));
    }
}
