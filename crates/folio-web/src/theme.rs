//! Light/dark presentation.
//!
//! The preference is a two-state machine (`dark` by default) persisted under
//! a fixed key through [`KeyValueStore`]. Switching applies a fixed list of
//! style mutations to whichever elements have been rendered; elements that do
//! not exist yet are skipped.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use tracing::debug;

/// Storage key of the persisted preference.
pub const THEME_KEY: &str = "mode";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Icon on the switch: the sun offers light mode, the moon dark mode.
    pub fn switch_icon(self) -> &'static str {
        match self {
            Theme::Dark => "/static/img/sun.svg",
            Theme::Light => "/static/img/moon.svg",
        }
    }

    /// Theme name understood by the GitHub stat-card service.
    pub fn stats_card_theme(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "default",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Persistence ───────────────────────────────────────────────────────────────

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore(HashMap<String, String>);

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), value.to_string());
    }
}

/// Browser cookies as the preference store.
#[derive(Debug, Clone)]
pub struct CookieStore {
    jar: CookieJar,
}

impl CookieStore {
    pub fn new(jar: CookieJar) -> Self {
        Self { jar }
    }

    /// The jar including any cookies set, to be returned with the response.
    pub fn into_jar(self) -> CookieJar {
        self.jar
    }
}

impl KeyValueStore for CookieStore {
    fn get(&self, key: &str) -> Option<String> {
        self.jar.get(key).map(|c| c.value().to_string())
    }

    fn set(&mut self, key: &str, value: &str) {
        let cookie = Cookie::build((key.to_string(), value.to_string()))
            .path("/")
            .same_site(SameSite::Lax)
            .permanent();
        self.jar = self.jar.clone().add(cookie);
    }
}

// ── Controller ────────────────────────────────────────────────────────────────

pub struct ThemeController<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> ThemeController<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persisted theme; an absent or unreadable value is replaced by dark.
    pub fn current(&mut self) -> Theme {
        match self.store.get(THEME_KEY).as_deref().and_then(Theme::parse) {
            Some(theme) => theme,
            None => {
                self.store.set(THEME_KEY, Theme::default().as_str());
                Theme::default()
            }
        }
    }

    /// Flip and persist; returns the new theme.
    pub fn toggle(&mut self) -> Theme {
        let next = self.current().toggled();
        self.store.set(THEME_KEY, next.as_str());
        debug!(theme = %next, "Theme toggled");
        next
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

// ── Style mutations ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Target {
    Id(&'static str),
    Class(&'static str),
    /// Descendant selector such as `#menu a`.
    Selector(&'static str),
}

impl Target {
    pub fn css(&self) -> String {
        match self {
            Target::Id(id) => format!("#{}", id),
            Target::Class(class) => format!(".{}", class),
            Target::Selector(sel) => sel.to_string(),
        }
    }

    /// Element key used to check whether the target has been rendered.
    fn root(&self) -> &'static str {
        match *self {
            Target::Id(key) | Target::Class(key) => key,
            Target::Selector(sel) => sel
                .split_whitespace()
                .next()
                .unwrap_or(sel)
                .trim_start_matches('#'),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StyleMutation {
    pub target: Target,
    pub property: &'static str,
    pub dark: &'static str,
    pub light: &'static str,
}

impl StyleMutation {
    pub fn value(&self, theme: Theme) -> &'static str {
        match theme {
            Theme::Dark => self.dark,
            Theme::Light => self.light,
        }
    }
}

const fn m(
    target: Target,
    property: &'static str,
    dark: &'static str,
    light: &'static str,
) -> StyleMutation {
    StyleMutation { target, property, dark, light }
}

/// Everything the switch touches.
pub const MUTATIONS: &[StyleMutation] = &[
    m(Target::Selector("#menu a"), "color", "white", "black"),
    m(Target::Selector("#menu ul.sub-menus"), "background-color", "black", "white"),
    m(Target::Id("home"), "content", "url(/static/img/home-d.svg)", "url(/static/img/home-l.svg)"),
    m(
        Target::Id("mode-switch-img"),
        "content",
        "url(/static/img/sun.svg)",
        "url(/static/img/moon.svg)",
    ),
    m(Target::Id("pre-name"), "color", "white", "black"),
    m(Target::Id("about-section"), "background-color", "black", "white"),
    m(Target::Id("about-heading"), "color", "white", "black"),
    m(Target::Id("about-para"), "color", "white", "black"),
    m(Target::Id("code-profile-title-head"), "color", "white", "black"),
    m(Target::Id("code-profile-section"), "background-color", "black", "white"),
    m(Target::Class("code-profiles"), "color", "white", "black"),
    m(Target::Class("statparm"), "color", "white", "blueviolet"),
    m(Target::Class("statres"), "color", "#00dd42", "#00dd42"),
    m(Target::Id("github-section"), "background-color", "transparent", "white"),
    m(Target::Id("github-title"), "color", "white", "black"),
    m(Target::Id("recent-rep-title"), "color", "white", "black"),
];

/// Current inline styles of rendered elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementStyles {
    rendered: BTreeSet<String>,
    styles: BTreeMap<(Target, &'static str), String>,
}

impl ElementStyles {
    /// `rendered` are the ids/classes present in the page.
    pub fn new<I, T>(rendered: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            rendered: rendered.into_iter().map(Into::into).collect(),
            styles: BTreeMap::new(),
        }
    }

    pub fn is_rendered(&self, key: &str) -> bool {
        self.rendered.contains(key)
    }

    pub fn style(&self, target: Target, property: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|((t, p), _)| *t == target && *p == property)
            .map(|(_, v)| v.as_str())
    }

    /// `selector { property: value; }` lines, one per applied mutation.
    pub fn to_css(&self) -> String {
        self.styles
            .iter()
            .map(|((target, property), value)| {
                format!("{} {{ {}: {}; }}", target.css(), property, value)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Apply every mutation for `theme` to the rendered elements.
pub fn apply(theme: Theme, elements: &mut ElementStyles) {
    for mutation in MUTATIONS {
        let root = mutation.target.root();
        if !elements.is_rendered(root) {
            debug!(element = root, "Element not rendered yet, skipping theme style");
            continue;
        }
        elements
            .styles
            .insert((mutation.target, mutation.property), mutation.value(theme).to_string());
    }
}

// ── Hero background ───────────────────────────────────────────────────────────

/// Parameters for the animated dot field behind the hero section.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HeroBackground {
    pub color: u32,
    pub color2: u32,
    pub background_color: u32,
    pub size: f32,
    pub spacing: f32,
    pub show_lines: bool,
}

impl HeroBackground {
    pub fn for_theme(theme: Theme) -> Self {
        let (color, color2, background_color) = match theme {
            Theme::Dark => (0xff7100, 0xff7100, 0x000000),
            Theme::Light => (0x4d18ae, 0x4d00d9, 0xffffff),
        };
        Self {
            color,
            color2,
            background_color,
            size: 4.0,
            spacing: 40.0,
            show_lines: false,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
