//! Shared application state for the web server.

use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use folio_common::sandbox::SandboxClient;
use folio_common::{AboutProfile, FolioError, Result, SiteConfig};

use crate::loader::{ContentStore, DataLoader, Resource};
use crate::render::Renderer;
use crate::widgets::{
    stat_lines, username_from_url, StatLine, StatsClient, WidgetBoard, WidgetStatus,
    CODECHEF_FIELDS, HACKERRANK_FIELDS,
};

/// Shared state injected into every Axum handler.
///
/// The content store is written once per load and replaced whole; readers
/// never see a partially loaded mapping.
pub struct AppState {
    pub config: SiteConfig,
    pub loader: DataLoader,
    pub store: RwLock<ContentStore>,
    pub widgets: RwLock<WidgetBoard>,
    pub stats: StatsClient,
    pub client: SandboxClient,
    pub renderer: Renderer,
    /// Held for a whole reload so loads apply in the order they started.
    reload_lock: Mutex<()>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// State with an empty (still loading) store.
    pub fn new(config: SiteConfig) -> Result<Self> {
        let client = SandboxClient::for_config(&config)?;
        let loader = DataLoader::from_config(&config, client.clone());
        Self::with_loader(config, loader, client)
    }

    pub fn with_loader(
        config: SiteConfig,
        loader: DataLoader,
        client: SandboxClient,
    ) -> Result<Self> {
        let renderer = Renderer::new()
            .map_err(|e| FolioError::Config(format!("Template setup failed: {}", e)))?;
        let stats = StatsClient::new(client.clone(), config.widgets.clone());
        Ok(Self {
            config,
            loader,
            store: RwLock::new(ContentStore::pending()),
            widgets: RwLock::new(WidgetBoard::default()),
            stats,
            client,
            renderer,
            reload_lock: Mutex::new(()),
        })
    }

    /// Fetch every resource and swap the store in; returns how many loaded.
    /// Concurrent calls run one after another.
    pub async fn reload(&self) -> usize {
        let _serial = self.reload_lock.lock().await;

        let (store, hackerrank, codechef) = tokio::join!(
            self.loader.load_all(),
            self.platform_stats("hackerrank", HACKERRANK_FIELDS),
            self.platform_stats("codechef", CODECHEF_FIELDS),
        );
        let about = store.about();
        let loaded = Resource::ALL
            .into_iter()
            .filter(|r| store.get(*r).is_some())
            .count();
        *self.store.write().await = store;
        {
            let mut widgets = self.widgets.write().await;
            widgets.hackerrank = hackerrank;
            widgets.codechef = codechef;
        }

        if self.config.widgets.probe {
            self.refresh_widgets(about.as_ref()).await;
        }
        loaded
    }

    /// Stats panel for `platform`, read from `<data_dir>/<platform>.json`.
    async fn platform_stats(
        &self,
        platform: &str,
        fields: &[(&str, &'static str)],
    ) -> WidgetStatus<Vec<StatLine>> {
        let result = self
            .loader
            .fetch_stats_document(platform)
            .await
            .and_then(|value| stat_lines(&value, fields));
        if let Err(e) = &result {
            warn!(platform, error = %e, "Platform stats unavailable");
        }
        WidgetStatus::from_result(result)
    }

    /// Probe the stat APIs. Usernames come from the config, falling back to
    /// the profile URLs in `about`.
    pub async fn refresh_widgets(&self, about: Option<&AboutProfile>) {
        let widgets = &self.config.widgets;
        let leetcode_user = widgets.leetcode_user.clone().or_else(|| {
            about
                .and_then(|a| a.coding_profile("leetcode"))
                .or(self.config.profiles.fallback_url("leetcode"))
                .and_then(username_from_url)
        });
        let github_org = widgets.github_org.clone().or_else(|| widgets.github_user.clone());

        let board = self
            .stats
            .refresh(leetcode_user.as_deref(), github_org.as_deref())
            .await;
        let mut current = self.widgets.write().await;
        current.leetcode = board.leetcode;
        current.recent_repos = board.recent_repos;
        info!("Widget board updated");
    }
}
