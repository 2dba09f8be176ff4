use reqwest::{Client, ClientBuilder, Method, RequestBuilder};
use std::collections::HashSet;
use url::Url;

use crate::config::SiteConfig;
use crate::error::FolioError;

/// An HTTP client that only talks to approved hosts.
///
/// The site fetches third-party stat APIs and, optionally, its own content
/// from a remote origin; anything else is refused before a request is built.
#[derive(Debug, Clone)]
pub struct SandboxClient {
    client: Client,
    allowlist: HashSet<String>,
}

impl SandboxClient {
    /// Creates a client with the default allowlist of stat-widget hosts.
    pub fn new() -> Result<Self, FolioError> {
        let domains = [
            "leetcode-stats-api.herokuapp.com", // LeetCode stats proxy
            "github-readme-stats.vercel.app",   // GitHub stat cards
            "ssr-contributions-svg.vercel.app", // Contribution calendar
            "api.github.com",                   // Repository search
            "localhost",
            "127.0.0.1",
        ];
        let allowlist = domains.iter().map(|d| d.to_string()).collect();

        // No explicit timeout: requests run with the transport default.
        let client = ClientBuilder::new()
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FolioError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, allowlist })
    }

    /// Default allowlist plus every host named in the configuration.
    pub fn for_config(config: &SiteConfig) -> Result<Self, FolioError> {
        let mut sandbox = Self::new()?;
        let configured = [
            config.content.base_url.as_deref(),
            Some(config.widgets.leetcode_api.as_str()),
            Some(config.widgets.github_stats_api.as_str()),
            Some(config.widgets.github_api.as_str()),
            Some(config.widgets.contributions_api.as_str()),
            config.contact.form_action.as_deref(),
        ];
        for url in configured.into_iter().flatten() {
            if let Some(host) = Url::parse(url).ok().and_then(|u| u.host_str().map(String::from)) {
                sandbox.allow_domain(&host);
            }
        }
        Ok(sandbox)
    }

    /// Appends an exact hostname to the allowlist.
    pub fn allow_domain(&mut self, domain: &str) {
        self.allowlist.insert(domain.to_string());
    }

    /// Whether `url` is an http(s) URL on an allowed host or one of its
    /// subdomains.
    pub fn is_allowed(&self, url: &str) -> bool {
        Url::parse(url).is_ok_and(|parsed| self.permits(&parsed))
    }

    fn permits(&self, url: &Url) -> bool {
        if !matches!(url.scheme(), "http" | "https") {
            return false;
        }
        let Some(host) = url.host_str() else {
            return false;
        };
        self.allowlist.iter().any(|allowed| {
            host == allowed
                || host
                    .strip_suffix(allowed.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }

    /// Request builder for `url`, refused with `FolioError::Security` when the
    /// host is not on the allowlist.
    pub fn request(&self, method: Method, url: &str) -> Result<RequestBuilder, FolioError> {
        let parsed = Url::parse(url)
            .map_err(|e| FolioError::Security(format!("Unparseable URL {}: {}", url, e)))?;
        if !self.permits(&parsed) {
            return Err(FolioError::Security(format!("Host not in allowlist for URL {}", url)));
        }
        Ok(self.client.request(method, parsed))
    }

    pub fn get(&self, url: &str) -> Result<RequestBuilder, FolioError> {
        self.request(Method::GET, url)
    }

    pub fn post(&self, url: &str) -> Result<RequestBuilder, FolioError> {
        self.request(Method::POST, url)
    }
}
