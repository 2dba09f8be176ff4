//! Content records loaded verbatim from the JSON documents under `data/`.
//!
//! Nothing here is validated: every display field is optional, and open-string
//! flags such as `category` or `status` are kept as plain strings. Renderers
//! omit whatever is missing.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// A record that can be listed in a paginated section and linked to directly.
pub trait ContentItem {
    /// Section the item is listed under (also the resource name).
    const SECTION: &'static str;

    /// Identifier used as the DOM anchor and share-link target.
    fn anchor(&self) -> Option<&str>;

    fn title(&self) -> Option<&str>;
}

/// Text field that also accepts numbers and booleans (`"2023"` or `2023`).
/// Any other shape, `null` included, reads as absent.
fn de_opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// `null`, a missing key, or a non-array all read as an empty list; entries
/// that are not text are skipped.
fn de_text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
        _ => Vec::new(),
    })
}

/// Label → URL maps; `null` reads as empty and non-text values are dropped.
fn de_text_map<'de, D>(deserializer: D) -> Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Object(map)) => map
            .iter()
            .filter_map(|(k, v)| Some((k.clone(), scalar_text(v)?)))
            .collect(),
        _ => IndexMap::new(),
    })
}

/// Truthy flag; anything but `true` (or `"true"`) is false.
fn de_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Bool(b)) => b,
        Some(serde_json::Value::String(s)) => s == "true",
        _ => false,
    })
}

fn scalar_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// ── About ─────────────────────────────────────────────────────────────────────

/// Singleton profile record (`about.json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutProfile {
    #[serde(default, deserialize_with = "de_opt_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub tagline: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub photo: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub resume: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub google_scholar: Option<String>,

    /// Platform → URL, in document order.
    #[serde(default, deserialize_with = "de_text_map")]
    pub socials: IndexMap<String, String>,

    /// Competitive-programming platform → profile URL.
    #[serde(default, deserialize_with = "de_text_map")]
    pub coding_profiles: IndexMap<String, String>,
}

impl AboutProfile {
    pub fn social(&self, platform: &str) -> Option<&str> {
        self.socials
            .get(platform)
            .map(String::as_str)
            .filter(|url| !url.is_empty())
    }

    pub fn coding_profile(&self, platform: &str) -> Option<&str> {
        self.coding_profiles
            .get(platform)
            .map(String::as_str)
            .filter(|url| !url.is_empty())
    }
}

// ── Tech stack ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TechCategory {
    #[serde(default, deserialize_with = "de_opt_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "de_text_list")]
    pub skills: Vec<String>,
}

// ── Paginated items ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, deserialize_with = "de_opt_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub title: Option<String>,
    /// Markdown.
    #[serde(default, deserialize_with = "de_opt_text")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "de_text_list")]
    pub tech: Vec<String>,
    /// Link label → URL, in document order.
    #[serde(default, deserialize_with = "de_text_map")]
    pub links: IndexMap<String, String>,
    /// Path of a markdown document shown by "Show Details".
    #[serde(default, deserialize_with = "de_opt_text")]
    pub detail: Option<String>,
    #[serde(default, deserialize_with = "de_flag")]
    pub featured: bool,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub status: Option<String>,
}

impl ContentItem for Project {
    const SECTION: &'static str = "projects";

    fn anchor(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Research {
    #[serde(default, deserialize_with = "de_opt_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub publisher: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub doi: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub link: Option<String>,
}

impl ContentItem for Research {
    const SECTION: &'static str = "research";

    fn anchor(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Achievement {
    #[serde(default, deserialize_with = "de_opt_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub detail: Option<String>,
}

impl Achievement {
    /// Date as shown on the card: `M/D/YYYY` for ISO dates, verbatim otherwise.
    pub fn display_date(&self) -> Option<String> {
        let raw = self.date.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        let iso = raw.get(..10).unwrap_or(raw);
        match NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
            Ok(date) => Some(date.format("%-m/%-d/%Y").to_string()),
            Err(_) => Some(raw.to_string()),
        }
    }
}

impl ContentItem for Achievement {
    const SECTION: &'static str = "achievements";

    fn anchor(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Certification {
    #[serde(default, deserialize_with = "de_opt_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub issuer: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub link: Option<String>,
}

impl ContentItem for Certification {
    const SECTION: &'static str = "certifications";

    fn anchor(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

// ── Timelines ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Experience {
    #[serde(default, deserialize_with = "de_opt_text")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Education {
    #[serde(default, deserialize_with = "de_opt_text")]
    pub degree: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub institution: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub grade: Option<String>,
}

/// Typewriter strings: the values of `knowledge.json`, whether it is an array
/// or an object, in document order.
pub fn knowledge_strings(value: &serde_json::Value) -> Vec<String> {
    let values: Vec<&serde_json::Value> = match value {
        serde_json::Value::Array(items) => items.iter().collect(),
        serde_json::Value::Object(map) => map.values().collect(),
        _ => Vec::new(),
    };
    values.into_iter().filter_map(scalar_text).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
