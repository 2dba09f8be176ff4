//! Content loading.
//!
//! Every named resource is fetched concurrently; a failed fetch (I/O, non-2xx,
//! bad JSON) leaves `None` for that resource only and is logged. There are no
//! retries.

use async_trait::async_trait;
use futures_util::future::join_all;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use folio_common::content::{knowledge_strings, ContentItem};
use folio_common::sandbox::SandboxClient;
use folio_common::{
    AboutProfile, Achievement, Certification, Education, Experience, FolioError, Project,
    Research, Result, SiteConfig, TechCategory,
};

// ── Resources ─────────────────────────────────────────────────────────────────

/// The fixed set of JSON documents the site is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    About,
    TechStack,
    Projects,
    Research,
    Achievements,
    Certifications,
    Experience,
    Education,
    Knowledge,
}

impl Resource {
    pub const ALL: [Resource; 9] = [
        Resource::About,
        Resource::TechStack,
        Resource::Projects,
        Resource::Research,
        Resource::Achievements,
        Resource::Certifications,
        Resource::Experience,
        Resource::Education,
        Resource::Knowledge,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Resource::About          => "about",
            Resource::TechStack      => "techstack",
            Resource::Projects       => "projects",
            Resource::Research       => "research",
            Resource::Achievements   => "achievements",
            Resource::Certifications => "certifications",
            Resource::Experience     => "experience",
            Resource::Education      => "education",
            Resource::Knowledge      => "knowledge",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.name() == name)
    }
}

// ── Sources ───────────────────────────────────────────────────────────────────

/// Where resource documents come from. Paths are site-relative
/// (`data/projects.json`, `data/details/folio.md`).
#[async_trait]
pub trait ResourceSource: Send + Sync {
    async fn read(&self, path: &str) -> Result<String>;

    /// Short description for logs.
    fn describe(&self) -> String;
}

/// Reads documents from a directory on disk.
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path.trim_start_matches("./"));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(FolioError::Security(format!("Path escapes site root: {}", path)));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ResourceSource for FsSource {
    async fn read(&self, path: &str) -> Result<String> {
        let full = self.resolve(path)?;
        match tokio::fs::read_to_string(&full).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(FolioError::NotFound(full.display().to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn describe(&self) -> String {
        format!("dir:{}", self.root.display())
    }
}

/// Fetches documents from a remote origin with plain GETs.
pub struct HttpSource {
    client: SandboxClient,
    base_url: String,
}

impl HttpSource {
    pub fn new(client: SandboxClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ResourceSource for HttpSource {
    async fn read(&self, path: &str) -> Result<String> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let response = self.client.get(&url)?.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FolioError::Status { status: status.as_u16(), url });
        }
        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        format!("http:{}", self.base_url)
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DataLoader {
    source: Arc<dyn ResourceSource>,
    data_dir: String,
}

impl DataLoader {
    pub fn new(source: Arc<dyn ResourceSource>, data_dir: &str) -> Self {
        Self {
            source,
            data_dir: data_dir.trim_end_matches('/').to_string(),
        }
    }

    /// Filesystem or HTTP loader, depending on `content.base_url`.
    pub fn from_config(config: &SiteConfig, client: SandboxClient) -> Self {
        let source: Arc<dyn ResourceSource> = match config.content.base_url.as_deref() {
            Some(base) => Arc::new(HttpSource::new(client, base)),
            None => Arc::new(FsSource::new(".")),
        };
        Self::new(source, &config.content.data_dir)
    }

    fn data_path(&self, name: &str) -> String {
        if self.data_dir.is_empty() {
            format!("{}.json", name)
        } else {
            format!("{}/{}.json", self.data_dir, name)
        }
    }

    pub fn resource_path(&self, resource: Resource) -> String {
        self.data_path(resource.name())
    }

    /// Fetch one resource; any failure is logged and yields `None`.
    #[instrument(skip(self), fields(source = %self.source.describe()))]
    pub async fn fetch_json(&self, resource: Resource) -> Option<Value> {
        let path = self.resource_path(resource);
        let text = match self.source.read(&path).await {
            Ok(text) => text,
            Err(e) => {
                warn!(%path, error = %e, "Failed to fetch resource");
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(%path, error = %e, "Resource is not valid JSON");
                None
            }
        }
    }

    /// Fetch every resource in parallel.
    pub async fn load_all(&self) -> ContentStore {
        let results = join_all(Resource::ALL.iter().map(|r| self.fetch_json(*r))).await;

        let values: IndexMap<Resource, Option<Value>> =
            Resource::ALL.into_iter().zip(results).collect();

        let loaded = values.values().filter(|v| v.is_some()).count();
        info!(loaded, total = Resource::ALL.len(), "Content resources loaded");

        ContentStore { values, loaded: true }
    }

    /// A stats document kept beside the content (`data/hackerrank.json`).
    /// Not part of the content mapping; failures go to the caller.
    pub async fn fetch_stats_document(&self, name: &str) -> Result<Value> {
        let path = self.data_path(name);
        let text = self.source.read(&path).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Raw text of a detail document (markdown).
    pub async fn fetch_document(&self, path: &str) -> Result<String> {
        debug!(%path, "Fetching detail document");
        self.source.read(path).await
    }
}

// ── Store ─────────────────────────────────────────────────────────────────────

/// Resource name → parsed document (`None` when its fetch failed).
///
/// Written once per load and read by every renderer.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    values: IndexMap<Resource, Option<Value>>,
    loaded: bool,
}

impl ContentStore {
    /// Store for the window before the first load finishes.
    pub fn pending() -> Self {
        Self::default()
    }

    pub fn from_values(values: impl IntoIterator<Item = (Resource, Option<Value>)>) -> Self {
        let mut map: IndexMap<Resource, Option<Value>> =
            Resource::ALL.into_iter().map(|r| (r, None)).collect();
        map.extend(values);
        Self { values: map, loaded: true }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn get(&self, resource: Resource) -> Option<&Value> {
        self.values.get(&resource).and_then(Option::as_ref)
    }

    fn decode<T: DeserializeOwned>(&self, resource: Resource) -> Option<T> {
        let value = self.get(resource)?;
        match serde_json::from_value(value.clone()) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!(resource = resource.name(), error = %e, "Resource has unexpected shape");
                None
            }
        }
    }

    /// Array resources decode item by item: an entry that cannot be read is
    /// dropped with a warning and the rest still render.
    fn decode_list<T: DeserializeOwned>(&self, resource: Resource) -> Option<Vec<T>> {
        let Some(items) = self.get(resource)?.as_array() else {
            warn!(resource = resource.name(), "Resource is not a list");
            return None;
        };
        let decoded = items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| match T::deserialize(item) {
                Ok(decoded) => Some(decoded),
                Err(e) => {
                    warn!(
                        resource = resource.name(),
                        index,
                        error = %e,
                        "Skipping unreadable entry"
                    );
                    None
                }
            })
            .collect();
        Some(decoded)
    }

    pub fn about(&self) -> Option<AboutProfile> {
        self.decode(Resource::About)
    }

    pub fn techstack(&self) -> Option<Vec<TechCategory>> {
        self.decode_list(Resource::TechStack)
    }

    pub fn projects(&self) -> Option<Vec<Project>> {
        self.decode_list(Resource::Projects)
    }

    pub fn research(&self) -> Option<Vec<Research>> {
        self.decode_list(Resource::Research)
    }

    pub fn achievements(&self) -> Option<Vec<Achievement>> {
        self.decode_list(Resource::Achievements)
    }

    pub fn certifications(&self) -> Option<Vec<Certification>> {
        self.decode_list(Resource::Certifications)
    }

    pub fn experience(&self) -> Option<Vec<Experience>> {
        self.decode_list(Resource::Experience)
    }

    pub fn education(&self) -> Option<Vec<Education>> {
        self.decode_list(Resource::Education)
    }

    pub fn knowledge(&self) -> Vec<String> {
        self.get(Resource::Knowledge).map(knowledge_strings).unwrap_or_default()
    }

    /// Detail document path of the item with `anchor` in `section`.
    pub fn detail_path(&self, section: &str, anchor: &str) -> Option<String> {
        if section == Project::SECTION {
            self.projects()?
                .into_iter()
                .find(|p| p.anchor() == Some(anchor))?
                .detail
        } else if section == Achievement::SECTION {
            self.achievements()?
                .into_iter()
                .find(|a| a.anchor() == Some(anchor))?
                .detail
        } else {
            None
        }
    }

    /// The aggregate mapping as JSON, `null` for failed resources.
    pub fn to_json(&self) -> Value {
        let map: serde_json::Map<String, Value> = Resource::ALL
            .into_iter()
            .map(|r| (r.name().to_string(), self.get(r).cloned().unwrap_or(Value::Null)))
            .collect();
        Value::Object(map)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    /// In-memory source; paths missing from the map behave like a 404.
    struct MapSource(HashMap<String, String>);

    #[async_trait]
    impl ResourceSource for MapSource {
        async fn read(&self, path: &str) -> Result<String> {
            self.0.get(path).cloned().ok_or_else(|| FolioError::Status {
                status: 404,
                url: path.to_string(),
            })
        }

        fn describe(&self) -> String {
            "memory".to_string()
        }
    }

    fn full_source() -> HashMap<String, String> {
        Resource::ALL
            .into_iter()
            .map(|r| {
                let body = match r {
                    Resource::About => json!({ "name": "Ada" }),
                    Resource::Knowledge => json!({ "0": "Rust" }),
                    _ => json!([{ "id": format!("{}-1", r.name()), "title": "One" }]),
                };
                (format!("data/{}.json", r.name()), body.to_string())
            })
            .collect()
    }

    #[tokio::test]
    async fn test_load_all_success() {
        let loader = DataLoader::new(Arc::new(MapSource(full_source())), "data");
        let store = loader.load_all().await;
        assert!(store.is_loaded());
        for r in Resource::ALL {
            assert!(store.get(r).is_some(), "{} should be loaded", r.name());
        }
        assert_eq!(store.about().unwrap().name.as_deref(), Some("Ada"));
        assert_eq!(store.projects().unwrap()[0].id.as_deref(), Some("projects-1"));
        assert_eq!(store.knowledge(), vec!["Rust"]);
    }

    #[tokio::test]
    async fn test_failed_resource_is_null_and_isolated() {
        let complete = DataLoader::new(Arc::new(MapSource(full_source())), "data")
            .load_all()
            .await;

        let mut files = full_source();
        files.remove("data/research.json");
        let store = DataLoader::new(Arc::new(MapSource(files)), "data").load_all().await;

        assert!(store.get(Resource::Research).is_none());
        assert_eq!(store.to_json()["research"], Value::Null);
        for r in Resource::ALL.into_iter().filter(|r| *r != Resource::Research) {
            assert_eq!(store.get(r), complete.get(r), "{} must be unaffected", r.name());
        }
    }

    #[tokio::test]
    async fn test_invalid_json_becomes_none() {
        let mut files = full_source();
        files.insert("data/projects.json".to_string(), "{ not json".to_string());
        let store = DataLoader::new(Arc::new(MapSource(files)), "data").load_all().await;
        assert!(store.projects().is_none());
        assert!(store.about().is_some());
    }

    #[tokio::test]
    async fn test_wrong_shape_decodes_to_none() {
        let store = ContentStore::from_values([(Resource::Projects, Some(json!({ "id": "x" })))]);
        assert!(store.get(Resource::Projects).is_some());
        assert!(store.projects().is_none());
    }

    #[tokio::test]
    async fn test_fs_source_reads_and_rejects_escapes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(dir.path().join("data/about.json"), r#"{"name":"Ada"}"#).unwrap();

        let source = FsSource::new(dir.path());
        assert_eq!(source.read("data/about.json").await.unwrap(), r#"{"name":"Ada"}"#);
        assert!(matches!(
            source.read("data/missing.json").await,
            Err(FolioError::NotFound(_))
        ));
        assert!(matches!(
            source.read("../etc/passwd").await,
            Err(FolioError::Security(_))
        ));
    }

    #[test]
    fn test_unreadable_entry_is_skipped() {
        let store = ContentStore::from_values([
            (
                Resource::Projects,
                Some(json!([{ "id": "good" }, { "id": 7 }, "stray", { "id": "c", "tech": null }])),
            ),
            (Resource::Education, Some(json!([42, { "degree": "BSc" }]))),
        ]);
        let ids: Vec<_> = store.projects().unwrap().into_iter().filter_map(|p| p.id).collect();
        assert_eq!(ids, vec!["good", "7", "c"]);
        let education = store.education().unwrap();
        assert_eq!(education.len(), 1);
        assert_eq!(education[0].degree.as_deref(), Some("BSc"));
    }

    #[test]
    fn test_detail_path_lookup() {
        let store = ContentStore::from_values([
            (Resource::Projects, Some(json!([{ "id": "p1", "detail": "data/details/p1.md" }]))),
            (Resource::Achievements, Some(json!([{ "id": "a1" }]))),
        ]);
        assert_eq!(store.detail_path("projects", "p1").as_deref(), Some("data/details/p1.md"));
        assert_eq!(store.detail_path("achievements", "a1"), None);
        assert_eq!(store.detail_path("research", "p1"), None);
    }

    #[tokio::test]
    async fn test_stats_document_is_separate_from_content() {
        let mut files = full_source();
        files.insert("data/codechef.json".to_string(), r#"{"rating": 1650}"#.to_string());
        let loader = DataLoader::new(Arc::new(MapSource(files)), "data");

        let value = loader.fetch_stats_document("codechef").await.unwrap();
        assert_eq!(value["rating"], 1650);
        assert!(loader.fetch_stats_document("hackerrank").await.is_err());
        assert!(loader.load_all().await.to_json().get("codechef").is_none());
    }

    #[test]
    fn test_pending_store() {
        let store = ContentStore::pending();
        assert!(!store.is_loaded());
        assert!(store.about().is_none());
        assert!(store.knowledge().is_empty());
    }

    #[test]
    fn test_resource_names_roundtrip() {
        for r in Resource::ALL {
            assert_eq!(Resource::from_name(r.name()), Some(r));
        }
        assert_eq!(Resource::from_name("blog"), None);
    }
}
