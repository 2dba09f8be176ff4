//! Site configuration.
//!
//! Reads `folio.toml` from the current directory or the path in the
//! `FOLIO_CONFIG` env var. Every key has a default, so a missing file simply
//! yields [`SiteConfig::default`].

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{FolioError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub profiles: ProfilesConfig,
    #[serde(default)]
    pub widgets: WidgetsConfig,
    #[serde(default)]
    pub contact: ContactConfig,
}

// ── Server ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory served under `/static`.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    /// Public origin used for share links when the request has no `Host`.
    #[serde(default = "default_origin")]
    pub public_origin: String,
    /// Bearer token that `POST /reload` must carry; reloading is refused
    /// while unset. `FOLIO_RELOAD_TOKEN` overrides the file.
    pub reload_token: Option<String>,
}

fn default_host()       -> String { "127.0.0.1".to_string() }
fn default_port()       -> u16    { 3000 }
fn default_static_dir() -> String { "static".to_string() }
fn default_origin()     -> String { "http://localhost:3000".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            public_origin: default_origin(),
            reload_token: None,
        }
    }
}

// ── Content ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Directory holding `<resource>.json` files.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// When set, resources are fetched over HTTP from `<base_url>/<resource>.json`
    /// instead of from `data_dir`.
    pub base_url: Option<String>,
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,
}

fn default_data_dir()       -> String { "data".to_string() }
fn default_items_per_page() -> usize  { 3 }

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            base_url: None,
            items_per_page: default_items_per_page(),
        }
    }
}

// ── Profiles ──────────────────────────────────────────────────────────────────

/// Which external profiles are shown, and fallbacks for their URLs when
/// `about.json` does not carry them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilesConfig {
    #[serde(default = "bool_true")]
    pub show_leetcode: bool,
    #[serde(default = "bool_true")]
    pub show_codeforces: bool,
    #[serde(default = "bool_true")]
    pub show_codechef: bool,
    #[serde(default = "bool_true")]
    pub show_hackerrank: bool,
    #[serde(default = "bool_true")]
    pub show_github: bool,
    #[serde(default = "bool_true")]
    pub show_linkedin: bool,
    pub leetcode: Option<String>,
    pub codeforces: Option<String>,
    pub codechef: Option<String>,
    pub hackerrank: Option<String>,
}

fn bool_true() -> bool { true }

impl Default for ProfilesConfig {
    fn default() -> Self {
        Self {
            show_leetcode: true,
            show_codeforces: true,
            show_codechef: true,
            show_hackerrank: true,
            show_github: true,
            show_linkedin: true,
            leetcode: None,
            codeforces: None,
            codechef: None,
            hackerrank: None,
        }
    }
}

impl ProfilesConfig {
    /// Whether the coding profile keyed by `platform` may be displayed.
    pub fn shows(&self, platform: &str) -> bool {
        match platform {
            "leetcode"   => self.show_leetcode,
            "codeforces" => self.show_codeforces,
            "codechef"   => self.show_codechef,
            "hackerrank" => self.show_hackerrank,
            "github"     => self.show_github,
            "linkedin"   => self.show_linkedin,
            _            => true,
        }
    }

    pub fn fallback_url(&self, platform: &str) -> Option<&str> {
        let url = match platform {
            "leetcode"   => self.leetcode.as_deref(),
            "codeforces" => self.codeforces.as_deref(),
            "codechef"   => self.codechef.as_deref(),
            "hackerrank" => self.hackerrank.as_deref(),
            _            => None,
        };
        url.filter(|u| !u.is_empty())
    }
}

// ── Widgets ───────────────────────────────────────────────────────────────────

/// Third-party stat widgets. Usernames left unset are derived from the
/// matching profile URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetsConfig {
    /// Fetch widget data at startup; when false every widget shows as loading.
    #[serde(default = "bool_true")]
    pub probe: bool,
    #[serde(default = "default_leetcode_api")]
    pub leetcode_api: String,
    #[serde(default = "default_github_stats_api")]
    pub github_stats_api: String,
    #[serde(default = "default_github_api")]
    pub github_api: String,
    #[serde(default = "default_contributions_api")]
    pub contributions_api: String,
    pub leetcode_user: Option<String>,
    pub github_user: Option<String>,
    /// Organisation/user whose repositories are listed as "recent".
    pub github_org: Option<String>,
    #[serde(default = "default_recent_repos")]
    pub recent_repos: usize,
    /// Repository hidden from the recent list (the site's own repo).
    #[serde(default = "default_excluded_repo")]
    pub excluded_repo: String,
    #[serde(default = "default_placeholder")]
    pub failure_placeholder: String,
}

fn default_leetcode_api()      -> String { "https://leetcode-stats-api.herokuapp.com".to_string() }
fn default_github_stats_api()  -> String { "https://github-readme-stats.vercel.app".to_string() }
fn default_github_api()        -> String { "https://api.github.com".to_string() }
fn default_contributions_api() -> String { "https://ssr-contributions-svg.vercel.app".to_string() }
fn default_recent_repos()      -> usize  { 5 }
fn default_excluded_repo()     -> String { "portfolio".to_string() }
fn default_placeholder()       -> String { "/static/img/failed-to-fetch.svg".to_string() }

impl Default for WidgetsConfig {
    fn default() -> Self {
        Self {
            probe: true,
            leetcode_api: default_leetcode_api(),
            github_stats_api: default_github_stats_api(),
            github_api: default_github_api(),
            contributions_api: default_contributions_api(),
            leetcode_user: None,
            github_user: None,
            github_org: None,
            recent_repos: default_recent_repos(),
            excluded_repo: default_excluded_repo(),
            failure_placeholder: default_placeholder(),
        }
    }
}

// ── Contact ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactConfig {
    #[serde(default = "bool_true")]
    pub enabled: bool,
    #[serde(default = "default_captcha_question")]
    pub captcha_question: String,
    #[serde(default = "default_captcha_answer")]
    pub captcha_answer: String,
    /// Where accepted submissions are forwarded (e.g. a hosted form endpoint).
    pub form_action: Option<String>,
}

fn default_captcha_question() -> String { "What is 2 + 3?".to_string() }
fn default_captcha_answer()   -> String { "5".to_string() }

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            captcha_question: default_captcha_question(),
            captcha_answer: default_captcha_answer(),
            form_action: None,
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl SiteConfig {
    /// Load configuration from `folio.toml`.
    /// Checks `FOLIO_CONFIG` first, then the current directory; falls back to
    /// defaults when no file exists.
    pub fn load() -> Result<Self> {
        let path = std::env::var("FOLIO_CONFIG").unwrap_or_else(|_| "folio.toml".to_string());

        let mut config = if Path::new(&path).exists() {
            Self::from_toml_str(&std::fs::read_to_string(&path)?)?
        } else {
            tracing::info!(path = %path, "No config file found, using defaults");
            Self::default()
        };

        if let Ok(token) = std::env::var("FOLIO_RELOAD_TOKEN") {
            config.server.reload_token = Some(token);
        }
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: SiteConfig =
            toml::from_str(content).map_err(|e| FolioError::Config(e.to_string()))?;
        if config.content.items_per_page == 0 {
            tracing::warn!("content.items_per_page = 0 is not usable, treating as 1");
            config.content.items_per_page = 1;
        }
        Ok(config)
    }

    /// Whether `presented` matches the configured reload token. Always false
    /// when no token is configured.
    pub fn reload_allowed(&self, presented: Option<&str>) -> bool {
        match (self.server.reload_token.as_deref(), presented) {
            (Some(expected), Some(given)) => !expected.is_empty() && expected == given,
            _ => false,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content.items_per_page, 3);
        assert_eq!(config.content.data_dir, "data");
        assert_eq!(config.contact.captcha_answer, "5");
        assert!(config.profiles.show_leetcode);
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SiteConfig::from_toml_str(
            r#"
            [content]
            items_per_page = 5

            [profiles]
            show_codeforces = false
            leetcode = "https://leetcode.com/ada/"
            "#,
        )
        .unwrap();
        assert_eq!(config.content.items_per_page, 5);
        assert_eq!(config.content.data_dir, "data");
        assert!(!config.profiles.shows("codeforces"));
        assert!(config.profiles.shows("leetcode"));
        assert_eq!(config.profiles.fallback_url("leetcode"), Some("https://leetcode.com/ada/"));
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_zero_items_per_page_clamped() {
        let config = SiteConfig::from_toml_str("[content]\nitems_per_page = 0\n").unwrap();
        assert_eq!(config.content.items_per_page, 1);
    }

    #[test]
    fn test_reload_requires_configured_token() {
        let mut config = SiteConfig::default();
        assert!(!config.reload_allowed(Some("anything")));
        assert!(!config.reload_allowed(None));

        config.server.reload_token = Some("s3cret".to_string());
        assert!(config.reload_allowed(Some("s3cret")));
        assert!(!config.reload_allowed(Some("guess")));
        assert!(!config.reload_allowed(None));

        config.server.reload_token = Some(String::new());
        assert!(!config.reload_allowed(Some("")));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = SiteConfig::from_toml_str("[content\nitems_per_page = 3").unwrap_err();
        assert!(matches!(err, FolioError::Config(_)));
    }

    #[test]
    fn test_example_config_parses() {
        let example = include_str!("../../../folio.example.toml");
        let config = SiteConfig::from_toml_str(example).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.widgets.excluded_repo, "portfolio");
        assert_eq!(config.contact.captcha_answer, "5");
        assert!(config.content.base_url.is_none());
        assert!(config.server.reload_token.is_none());
    }
}
