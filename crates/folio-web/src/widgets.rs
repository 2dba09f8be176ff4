//! Stat widgets: LeetCode and GitHub from third-party services, HackerRank
//! and CodeChef from stats documents kept with the site content.
//!
//! All of it is best-effort: a failed fetch turns the widget into the static
//! "failed to fetch" placeholder and nothing else on the page is affected.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};
use url::Url;

use folio_common::config::WidgetsConfig;
use folio_common::sandbox::SandboxClient;
use folio_common::{FolioError, Result};

use crate::theme::Theme;

/// Display state of one widget.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum WidgetStatus<T> {
    #[default]
    Loading,
    Ready(T),
    Error(String),
}

impl<T> WidgetStatus<T> {
    pub fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(value) => WidgetStatus::Ready(value),
            Err(e) => WidgetStatus::Error(e.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, WidgetStatus::Error(_))
    }
}

/// Response of the LeetCode stats proxy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeetCodeStats {
    pub status: Option<String>,
    pub total_solved: u32,
    pub total_questions: u32,
    pub easy_solved: u32,
    pub medium_solved: u32,
    pub hard_solved: u32,
    pub acceptance_rate: f64,
    pub ranking: u64,
    pub reputation: i64,
}

impl LeetCodeStats {
    /// The proxy answers 200 with `"status": "error"` for unknown users.
    pub fn from_value(value: Value) -> Result<Self> {
        let stats: LeetCodeStats = serde_json::from_value(value)?;
        match stats.status.as_deref() {
            Some("error") => Err(FolioError::NotFound("LeetCode user".to_string())),
            _ => Ok(stats),
        }
    }
}

/// One labelled figure of a platform stats panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatLine {
    pub label: &'static str,
    pub value: String,
}

/// Fields of `hackerrank.json`, in display order.
pub const HACKERRANK_FIELDS: &[(&str, &str)] = &[
    ("totalsolved", "Total Solved"),
    ("totalquestions", "Total Questions"),
    ("mathematics", "Mathematics"),
    ("python", "Python"),
    ("problemsolving", "Problem Solving"),
    ("hackos", "Hackos"),
];

/// Fields of `codechef.json`, in display order.
pub const CODECHEF_FIELDS: &[(&str, &str)] = &[
    ("problemsolved", "Problems Solved"),
    ("rating", "Rating"),
    ("totalproblemsolved", "Total Problems Solved"),
    ("rank", "Rank"),
];

/// Picks the known fields out of a stats document. A document that is not
/// an object, or has none of the fields, is an error.
pub fn stat_lines(value: &Value, fields: &[(&str, &'static str)]) -> Result<Vec<StatLine>> {
    let object = value
        .as_object()
        .ok_or_else(|| FolioError::Config("stats document is not an object".to_string()))?;
    let lines: Vec<StatLine> = fields
        .iter()
        .filter_map(|(key, label)| {
            let value = match object.get(*key)? {
                Value::String(s) if !s.is_empty() => s.clone(),
                Value::Number(n) => n.to_string(),
                _ => return None,
            };
            Some(StatLine { label: *label, value })
        })
        .collect();
    if lines.is_empty() {
        return Err(FolioError::NotFound("stats fields".to_string()));
    }
    Ok(lines)
}

/// Latest widget data, refreshed on every load.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WidgetBoard {
    pub leetcode: WidgetStatus<LeetCodeStats>,
    pub recent_repos: WidgetStatus<Vec<String>>,
    pub hackerrank: WidgetStatus<Vec<StatLine>>,
    pub codechef: WidgetStatus<Vec<StatLine>>,
}

/// Last non-empty path segment: `https://leetcode.com/u/ada/` → `ada`.
pub fn username_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed
        .path_segments()?
        .filter(|s| !s.is_empty())
        .last()
        .map(String::from)
}

/// Names of the first `limit` repositories of a search response, minus
/// `excluded`.
pub fn parse_recent_repos(value: &Value, limit: usize, excluded: &str) -> Vec<String> {
    value["items"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .take(limit)
                .filter_map(|repo| repo["name"].as_str())
                .filter(|name| *name != excluded)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

/// `base` with `segments` appended and `query` added, every part
/// percent-encoded.
pub fn endpoint(base: &str, segments: &[&str], query: &[(&str, &str)]) -> Result<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| FolioError::Config(format!("Invalid widget URL {}: {}", base, e)))?;
    url.path_segments_mut()
        .map_err(|_| FolioError::Config(format!("Widget URL cannot take a path: {}", base)))?
        .pop_if_empty()
        .extend(segments);
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    Ok(url)
}

pub struct StatsClient {
    client: SandboxClient,
    config: WidgetsConfig,
}

impl StatsClient {
    pub fn new(client: SandboxClient, config: WidgetsConfig) -> Self {
        Self { client, config }
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        let response = self.client.get(url)?.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FolioError::Status { status: status.as_u16(), url: url.to_string() });
        }
        Ok(response.json().await?)
    }

    pub async fn leetcode(&self, user: &str) -> Result<LeetCodeStats> {
        let url = endpoint(&self.config.leetcode_api, &[user], &[])?;
        LeetCodeStats::from_value(self.get_json(url.as_str()).await?)
    }

    /// Most recently updated repositories of `org`.
    pub async fn recent_repos(&self, org: &str) -> Result<Vec<String>> {
        let query = format!("org:{}", org);
        let url = endpoint(
            &self.config.github_api,
            &["search", "repositories"],
            &[("q", query.as_str()), ("sort", "updated"), ("order", "desc")],
        )?;
        let value = self.get_json(url.as_str()).await?;
        Ok(parse_recent_repos(&value, self.config.recent_repos, &self.config.excluded_repo))
    }

    /// Fetch every widget concurrently. Widgets without a username stay
    /// in the loading state.
    pub async fn refresh(
        &self,
        leetcode_user: Option<&str>,
        github_org: Option<&str>,
    ) -> WidgetBoard {
        let leetcode = async {
            match leetcode_user {
                Some(user) => WidgetStatus::from_result(self.leetcode(user).await),
                None => WidgetStatus::Loading,
            }
        };
        let repos = async {
            match github_org {
                Some(org) => WidgetStatus::from_result(self.recent_repos(org).await),
                None => WidgetStatus::Loading,
            }
        };
        let (leetcode, recent_repos) = tokio::join!(leetcode, repos);

        if let WidgetStatus::Error(e) = &leetcode {
            warn!(error = %e, "LeetCode stats unavailable");
        }
        if let WidgetStatus::Error(e) = &recent_repos {
            warn!(error = %e, "GitHub repositories unavailable");
        }
        info!(
            leetcode_ok = matches!(leetcode, WidgetStatus::Ready(_)),
            repos_ok = matches!(recent_repos, WidgetStatus::Ready(_)),
            "Widgets refreshed"
        );

        WidgetBoard { leetcode, recent_repos, ..Default::default() }
    }
}

// ── Image cards ───────────────────────────────────────────────────────────────

const GITHUB_STATS_SHOW: &str =
    "reviews,discussions_started,discussions_answered,prs_merged,prs_merged_percentage";

/// Image widgets: rendered by the browser straight from the card service,
/// falling back to the placeholder image on load error.
#[derive(Debug, Clone, Serialize)]
pub struct StatCards {
    pub github_stats: String,
    pub top_languages: String,
    pub contributions: String,
    pub repo_pins: Vec<RepoPin>,
    pub placeholder: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RepoPin {
    pub name: String,
    pub image: String,
    pub href: String,
}

impl StatCards {
    /// Card URLs for `github_user`; `None` when a configured service URL is
    /// unusable.
    pub fn build(
        config: &WidgetsConfig,
        github_user: &str,
        theme: Theme,
        repos: &[String],
    ) -> Option<Self> {
        match Self::try_build(config, github_user, theme, repos) {
            Ok(cards) => Some(cards),
            Err(e) => {
                warn!(error = %e, "GitHub stat cards unavailable");
                None
            }
        }
    }

    fn try_build(
        config: &WidgetsConfig,
        user: &str,
        theme: Theme,
        repos: &[String],
    ) -> Result<Self> {
        let api = config.github_stats_api.as_str();
        let card_theme = theme.stats_card_theme();
        let github_stats = endpoint(api, &["api"], &[
            ("username", user),
            ("show", GITHUB_STATS_SHOW),
            ("theme", card_theme),
        ])?;
        let top_languages = endpoint(api, &["api", "top-langs", ""], &[
            ("username", user),
            ("layout", "donut-vertical"),
            ("theme", card_theme),
        ])?;
        let contributions = endpoint(&config.contributions_api, &["_", user], &[
            ("chart", "calendar"),
            ("format", "png"),
            ("quality", "7"),
            ("weeks", "50"),
            ("theme", card_theme),
        ])?;
        let repo_pins = repos
            .iter()
            .map(|repo| -> Result<RepoPin> {
                let image = endpoint(api, &["api", "pin", ""], &[
                    ("username", user),
                    ("repo", repo.as_str()),
                    ("theme", card_theme),
                ])?;
                let href = endpoint("https://github.com", &[user, repo.as_str()], &[])?;
                Ok(RepoPin { name: repo.clone(), image: image.into(), href: href.into() })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            github_stats: github_stats.into(),
            top_languages: top_languages.into(),
            contributions: contributions.into(),
            repo_pins,
            placeholder: config.failure_placeholder.clone(),
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
