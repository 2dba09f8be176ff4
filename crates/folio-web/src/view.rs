//! Page view model.
//!
//! Pure transform from loaded content to what the templates draw: no I/O and
//! no HTML beyond markdown-rendered summaries. Missing optional fields are
//! dropped rather than replaced with placeholders.

use indexmap::IndexMap;
use serde::Serialize;

use folio_common::content::ContentItem;
use folio_common::{
    AboutProfile, Achievement, Certification, Education, Experience, Project, Research, SiteConfig,
};

use crate::loader::ContentStore;
use crate::markdown;
use crate::paginate::{PageState, Paged};
use crate::share::{CopyAction, PageLocation};
use crate::theme::{self, ElementStyles, HeroBackground, Theme};
use crate::widgets::{
    username_from_url, LeetCodeStats, StatCards, StatLine, WidgetBoard, WidgetStatus,
};

/// Render order of the page; also the set of ids `/sections/{id}` accepts.
pub const SECTION_ORDER: [&str; 12] = [
    "hero",
    "about",
    "techstack",
    "projects",
    "research",
    "achievements",
    "experience",
    "certifications",
    "profiles",
    "education",
    "contact",
    "footer",
];

/// Sections whose headings carry a copy-link icon.
pub const LINKABLE_SECTIONS: [&str; 10] = [
    "about",
    "techstack",
    "projects",
    "research",
    "achievements",
    "experience",
    "certifications",
    "profiles",
    "education",
    "contact",
];

pub const TYPED_GRADIENTS: [&str; 3] = ["gradient-text-1", "gradient-text-2", "gradient-text-3"];

/// Everything a request contributes to the view.
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub state: PageState,
    pub location: PageLocation,
    pub theme: Theme,
}

/// Inputs shared by every section builder.
pub struct ViewContext<'a> {
    pub store: &'a ContentStore,
    pub widgets: &'a WidgetBoard,
    pub config: &'a SiteConfig,
    pub request: &'a PageRequest,
}

// ── View types ────────────────────────────────────────────────────────────────

/// A section is still loading, has nothing to show, or is ready.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Section<T> {
    Loading,
    Empty,
    Ready(T),
}

impl<T> Section<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Section::Ready(_))
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LinkView {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardView {
    pub anchor: Option<String>,
    pub title: Option<String>,
    pub meta: Option<String>,
    pub tags: Vec<String>,
    pub summary_html: Option<String>,
    pub links: Vec<LinkView>,
    /// `/details/{section}/{id}` when the item has a detail document.
    pub detail_url: Option<String>,
    pub copy: Option<CopyAction>,
    pub featured: bool,
    pub category: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PagedView {
    pub id: &'static str,
    pub title: &'static str,
    pub page: Paged<CardView>,
    /// Extra heading link (Google Scholar on research).
    pub heading_link: Option<LinkView>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TimelineItem {
    pub title: Option<String>,
    pub meta: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SocialLink {
    pub platform: String,
    pub label: String,
    pub href: String,
    pub icon: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeroView {
    pub name: Option<String>,
    pub tagline: Option<String>,
    pub email: Option<String>,
    pub email_copy: Option<CopyAction>,
    pub resume: Option<String>,
    pub typed_strings: Vec<String>,
    pub gradients: [&'static str; 3],
    pub background: HeroBackground,
}

#[derive(Debug, Clone, Serialize)]
pub struct AboutView {
    pub photo: Option<String>,
    pub photo_alt: Option<String>,
    pub bio: Option<String>,
    pub socials: Vec<SocialLink>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TechCategoryView {
    pub category: Option<String>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProfileCard {
    pub key: &'static str,
    pub name: &'static str,
    pub href: String,
}

/// HackerRank / CodeChef panel.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformStatsView {
    pub key: &'static str,
    pub name: &'static str,
    pub stats: WidgetStatus<Vec<StatLine>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfilesView {
    pub cards: Vec<ProfileCard>,
    pub leetcode: WidgetStatus<LeetCodeStats>,
    pub platforms: Vec<PlatformStatsView>,
    pub stat_cards: Option<StatCards>,
    pub placeholder: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactFormView {
    pub captcha_question: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactView {
    pub email: Option<String>,
    pub email_copy: Option<CopyAction>,
    pub socials: Vec<SocialLink>,
    pub form: Option<ContactFormView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FooterView {
    pub name: Option<String>,
    pub socials: Vec<SocialLink>,
}

/// One section in whichever shape its template expects.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SectionView {
    Hero(Section<HeroView>),
    About(Section<AboutView>),
    TechStack(Section<Vec<TechCategoryView>>),
    Paged(Section<PagedView>),
    Timeline(Section<Vec<TimelineItem>>),
    Profiles(Section<ProfilesView>),
    Contact(Section<ContactView>),
    Footer(Section<FooterView>),
}

impl SectionView {
    pub fn is_ready(&self) -> bool {
        match self {
            SectionView::Hero(s) => s.is_ready(),
            SectionView::About(s) => s.is_ready(),
            SectionView::TechStack(s) => s.is_ready(),
            SectionView::Paged(s) => s.is_ready(),
            SectionView::Timeline(s) => s.is_ready(),
            SectionView::Profiles(s) => s.is_ready(),
            SectionView::Contact(s) => s.is_ready(),
            SectionView::Footer(s) => s.is_ready(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NavItem {
    pub id: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub theme: Theme,
    pub next_theme: Theme,
    pub switch_icon: &'static str,
    pub theme_css: String,
    pub nav: Vec<NavItem>,
    pub sections: IndexMap<&'static str, SectionView>,
    pub heading_links: IndexMap<&'static str, CopyAction>,
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|s| !s.is_empty()).map(String::from)
}

/// `"a • b"`, or whichever half exists.
fn joined_meta(left: Option<&str>, right: Option<&str>) -> Option<String> {
    match (non_empty(left), non_empty(right)) {
        (Some(l), Some(r)) => Some(format!("{} • {}", l, r)),
        (Some(one), None) | (None, Some(one)) => Some(one),
        (None, None) => None,
    }
}

/// Non-empty href with a harmless scheme.
fn safe_href(href: Option<&str>) -> Option<String> {
    non_empty(href).filter(|h| markdown::safe_url(h))
}

fn link(label: &str, href: Option<&str>) -> Option<LinkView> {
    safe_href(href).map(|href| LinkView { label: label.to_string(), href })
}

pub fn section_title(id: &str) -> &'static str {
    match id {
        "hero"           => "Home",
        "about"          => "About",
        "techstack"      => "Tech Stack",
        "projects"       => "Projects",
        "research"       => "Research",
        "achievements"   => "Achievements",
        "experience"     => "Experience",
        "certifications" => "Certifications",
        "profiles"       => "Profiles & Stats",
        "education"      => "Education",
        "contact"        => "Contact",
        _                => "",
    }
}

fn social_icon(platform: &str) -> Option<&'static str> {
    match platform {
        "github"    => Some("fa-brands fa-github"),
        "linkedin"  => Some("fa-brands fa-linkedin"),
        "twitter"   => Some("fa-brands fa-x-twitter"),
        "instagram" => Some("fa-brands fa-instagram"),
        "discord"   => Some("fa-brands fa-discord"),
        _           => None,
    }
}

fn social_label(platform: &str) -> String {
    match platform {
        "github"   => "Github".to_string(),
        "linkedin" => "Linkedin".to_string(),
        "twitter"  => "Twitter".to_string(),
        other      => capitalize(other),
    }
}

/// Links in the about section: everything except the chat platforms; icons
/// only for github, linkedin and twitter.
pub fn about_socials(about: &AboutProfile, config: &SiteConfig) -> Vec<SocialLink> {
    const HIDDEN: [&str; 2] = ["discord", "instagram"];
    about
        .socials
        .iter()
        .filter(|(platform, _)| !HIDDEN.contains(&platform.as_str()))
        .filter(|(platform, _)| config.profiles.shows(platform))
        .filter_map(|(platform, url)| {
            Some(SocialLink {
                platform: platform.clone(),
                label: social_label(platform),
                href: safe_href(Some(url.as_str()))?,
                icon: match platform.as_str() {
                    "github" | "linkedin" | "twitter" => social_icon(platform),
                    _ => None,
                },
            })
        })
        .collect()
}

/// Links in the contact section and footer: only platforms with an icon.
pub fn contact_socials(about: &AboutProfile, config: &SiteConfig) -> Vec<SocialLink> {
    about
        .socials
        .iter()
        .filter(|(platform, _)| config.profiles.shows(platform))
        .filter_map(|(platform, url)| {
            Some(SocialLink {
                platform: platform.clone(),
                label: social_label(platform),
                href: safe_href(Some(url.as_str()))?,
                icon: Some(social_icon(platform)?),
            })
        })
        .collect()
}

fn copy_for<T: ContentItem>(item: &T, location: &PageLocation) -> Option<CopyAction> {
    item.anchor().map(|id| CopyAction::item_link(location, id))
}

fn detail_url<T: ContentItem>(item: &T, detail: Option<&str>) -> Option<String> {
    match (item.anchor(), non_empty(detail)) {
        (Some(id), Some(_)) => Some(format!("/details/{}/{}", T::SECTION, id)),
        _ => None,
    }
}

// ── Cards ─────────────────────────────────────────────────────────────────────

pub fn project_card(project: &Project, location: &PageLocation) -> CardView {
    CardView {
        anchor: project.id.clone(),
        title: project.title.clone(),
        meta: None,
        tags: project.tech.clone(),
        summary_html: markdown::render_opt(project.summary.as_deref()),
        links: project
            .links
            .iter()
            .filter_map(|(platform, url)| link(&capitalize(platform), Some(url.as_str())))
            .collect(),
        detail_url: detail_url(project, project.detail.as_deref()),
        copy: copy_for(project, location),
        featured: project.featured,
        category: project.category.clone(),
        status: project.status.clone(),
    }
}

pub fn research_card(item: &Research, location: &PageLocation) -> CardView {
    let doi = non_empty(item.doi.as_deref()).map(|doi| format!("https://doi.org/{}", doi));
    CardView {
        anchor: item.id.clone(),
        title: item.title.clone(),
        meta: joined_meta(item.publisher.as_deref(), item.year.as_deref()),
        tags: Vec::new(),
        summary_html: markdown::render_opt(item.summary.as_deref()),
        links: [link("DOI", doi.as_deref()), link("Paper", item.link.as_deref())]
            .into_iter()
            .flatten()
            .collect(),
        detail_url: None,
        copy: copy_for(item, location),
        featured: false,
        category: None,
        status: None,
    }
}

pub fn achievement_card(item: &Achievement, location: &PageLocation) -> CardView {
    CardView {
        anchor: item.id.clone(),
        title: item.title.clone(),
        meta: item.display_date(),
        tags: Vec::new(),
        summary_html: markdown::render_opt(item.summary.as_deref()),
        links: link("View", item.link.as_deref()).into_iter().collect(),
        detail_url: detail_url(item, item.detail.as_deref()),
        copy: copy_for(item, location),
        featured: false,
        category: None,
        status: None,
    }
}

pub fn certification_card(item: &Certification, location: &PageLocation) -> CardView {
    CardView {
        anchor: item.id.clone(),
        title: item.title.clone(),
        meta: joined_meta(item.issuer.as_deref(), item.date.as_deref()),
        tags: Vec::new(),
        summary_html: None,
        links: link("View Certificate", item.link.as_deref()).into_iter().collect(),
        detail_url: None,
        copy: copy_for(item, location),
        featured: false,
        category: None,
        status: None,
    }
}

pub fn experience_item(item: &Experience) -> TimelineItem {
    TimelineItem {
        title: non_empty(item.role.as_deref()),
        meta: joined_meta(item.company.as_deref(), item.duration.as_deref()),
        description: non_empty(item.description.as_deref()),
    }
}

pub fn education_item(item: &Education) -> TimelineItem {
    TimelineItem {
        title: non_empty(item.degree.as_deref()),
        meta: joined_meta(item.institution.as_deref(), item.year.as_deref()),
        description: non_empty(item.grade.as_deref()).map(|g| format!("Grade: {}", g)),
    }
}

// ── Section builders ──────────────────────────────────────────────────────────

impl<'a> ViewContext<'a> {
    /// `Loading` before the first load, `Empty` when the resource failed.
    fn section<V, T>(&self, value: Option<V>, build: impl FnOnce(V) -> T) -> Section<T> {
        if !self.store.is_loaded() {
            return Section::Loading;
        }
        match value {
            Some(v) => Section::Ready(build(v)),
            None => Section::Empty,
        }
    }

    fn hero(&self) -> Section<HeroView> {
        self.section(self.store.about(), |about| HeroView {
            email_copy: non_empty(about.email.as_deref()).map(|e| CopyAction::email(&e)),
            email: non_empty(about.email.as_deref()),
            name: non_empty(about.name.as_deref()),
            tagline: non_empty(about.tagline.as_deref()),
            resume: safe_href(about.resume.as_deref()),
            typed_strings: self.store.knowledge(),
            gradients: TYPED_GRADIENTS,
            background: HeroBackground::for_theme(self.request.theme),
        })
    }

    fn about(&self) -> Section<AboutView> {
        self.section(self.store.about(), |about| AboutView {
            photo: non_empty(about.photo.as_deref()),
            photo_alt: non_empty(about.name.as_deref()).map(|n| format!("{} Profile Photo", n)),
            bio: non_empty(about.bio.as_deref()),
            socials: about_socials(&about, self.config),
        })
    }

    fn techstack(&self) -> Section<Vec<TechCategoryView>> {
        self.section(self.store.techstack(), |categories| {
            categories
                .into_iter()
                .map(|c| TechCategoryView { category: c.category, skills: c.skills })
                .collect()
        })
    }

    fn paged<T: Clone>(
        &self,
        id: &'static str,
        items: Option<Vec<T>>,
        card: fn(&T, &PageLocation) -> CardView,
    ) -> Section<PagedView> {
        let per_page = self.config.content.items_per_page;
        let heading_link = if id == Research::SECTION {
            self.store
                .about()
                .and_then(|a| link("Google Scholar", a.google_scholar.as_deref()))
        } else {
            None
        };
        self.section(items, |items| PagedView {
            id,
            title: section_title(id),
            page: Paged::new(id, &items, &self.request.state, per_page)
                .map(|item| card(&item, &self.request.location)),
            heading_link,
        })
    }

    fn timeline<T>(
        &self,
        items: Option<Vec<T>>,
        entry: fn(&T) -> TimelineItem,
    ) -> Section<Vec<TimelineItem>> {
        self.section(items, |items| items.iter().map(entry).collect())
    }

    fn profiles(&self) -> Section<ProfilesView> {
        const PLATFORMS: [(&str, &str); 4] = [
            ("leetcode", "LeetCode"),
            ("codeforces", "Codeforces"),
            ("codechef", "CodeChef"),
            ("hackerrank", "HackerRank"),
        ];
        let profiles = &self.config.profiles;
        let widgets = &self.config.widgets;

        self.section(self.store.about(), |about| {
            let cards = PLATFORMS
                .into_iter()
                .filter(|(key, _)| profiles.shows(key))
                .filter_map(|(key, name)| {
                    let href = about
                        .coding_profile(key)
                        .or_else(|| profiles.fallback_url(key));
                    Some(ProfileCard { key, name, href: safe_href(href)? })
                })
                .collect();

            let platforms = [
                ("hackerrank", "HackerRank", &self.widgets.hackerrank),
                ("codechef", "CodeChef", &self.widgets.codechef),
            ]
            .into_iter()
            .filter(|(key, _, _)| profiles.shows(key))
            .map(|(key, name, stats)| PlatformStatsView { key, name, stats: stats.clone() })
            .collect();

            let github_user = widgets
                .github_user
                .clone()
                .or_else(|| about.social("github").and_then(username_from_url));
            let repos: &[String] = match &self.widgets.recent_repos {
                WidgetStatus::Ready(repos) => repos.as_slice(),
                _ => &[],
            };
            let stat_cards = github_user
                .filter(|_| profiles.shows("github"))
                .and_then(|user| StatCards::build(widgets, &user, self.request.theme, repos));

            ProfilesView {
                cards,
                leetcode: self.widgets.leetcode.clone(),
                platforms,
                stat_cards,
                placeholder: widgets.failure_placeholder.clone(),
            }
        })
    }

    fn contact(&self) -> Section<ContactView> {
        let contact = &self.config.contact;
        self.section(self.store.about(), |about| ContactView {
            email_copy: non_empty(about.email.as_deref()).map(|e| CopyAction::email(&e)),
            email: non_empty(about.email.as_deref()),
            socials: contact_socials(&about, self.config),
            form: contact.enabled.then(|| ContactFormView {
                captcha_question: contact.captcha_question.clone(),
            }),
        })
    }

    fn footer(&self) -> Section<FooterView> {
        self.section(self.store.about(), |about| FooterView {
            name: non_empty(about.name.as_deref()),
            socials: contact_socials(&about, self.config),
        })
    }

    /// Build one section by id; `None` for unknown ids.
    pub fn build_section(&self, id: &str) -> Option<SectionView> {
        let store = self.store;
        let view = match id {
            "hero" => SectionView::Hero(self.hero()),
            "about" => SectionView::About(self.about()),
            "techstack" => SectionView::TechStack(self.techstack()),
            "projects" => {
                SectionView::Paged(self.paged(Project::SECTION, store.projects(), project_card))
            }
            "research" => {
                SectionView::Paged(self.paged(Research::SECTION, store.research(), research_card))
            }
            "achievements" => SectionView::Paged(self.paged(
                Achievement::SECTION,
                store.achievements(),
                achievement_card,
            )),
            "certifications" => SectionView::Paged(self.paged(
                Certification::SECTION,
                store.certifications(),
                certification_card,
            )),
            "experience" => {
                SectionView::Timeline(self.timeline(store.experience(), experience_item))
            }
            "education" => SectionView::Timeline(self.timeline(store.education(), education_item)),
            "profiles" => SectionView::Profiles(self.profiles()),
            "contact" => SectionView::Contact(self.contact()),
            "footer" => SectionView::Footer(self.footer()),
            _ => return None,
        };
        Some(view)
    }

    /// Copy-link actions for section headings.
    pub fn heading_links(&self) -> IndexMap<&'static str, CopyAction> {
        LINKABLE_SECTIONS
            .into_iter()
            .map(|id| (id, CopyAction::section_link(&self.request.location, id)))
            .collect()
    }

    /// Build the whole page.
    pub fn build_page(&self) -> PageView {
        let sections: IndexMap<&'static str, SectionView> = SECTION_ORDER
            .into_iter()
            .filter_map(|id| self.build_section(id).map(|view| (id, view)))
            .collect();

        let theme = self.request.theme;
        let mut elements = ElementStyles::new(rendered_elements(&sections));
        theme::apply(theme, &mut elements);

        PageView {
            theme,
            next_theme: theme.toggled(),
            switch_icon: theme.switch_icon(),
            theme_css: elements.to_css(),
            nav: LINKABLE_SECTIONS
                .into_iter()
                .map(|id| NavItem { id, label: section_title(id) })
                .collect(),
            sections,
            heading_links: self.heading_links(),
        }
    }
}

/// Ids and classes present in the page, for deciding which theme styles apply.
pub fn rendered_elements(sections: &IndexMap<&'static str, SectionView>) -> Vec<&'static str> {
    let mut rendered = vec!["menu", "home", "mode-switch-img", "pre-name"];
    let ready = |id: &str| sections.get(id).map(SectionView::is_ready).unwrap_or(false);

    if ready("about") {
        rendered.extend(["about-section", "about-heading", "about-para"]);
    }
    if let Some(SectionView::Profiles(Section::Ready(profiles))) = sections.get("profiles") {
        rendered.extend(["code-profile-title-head", "code-profile-section", "code-profiles"]);
        let platform_ready = profiles
            .platforms
            .iter()
            .any(|p| matches!(p.stats, WidgetStatus::Ready(_)));
        if matches!(profiles.leetcode, WidgetStatus::Ready(_)) || platform_ready {
            rendered.extend(["statparm", "statres"]);
        }
        if profiles.stat_cards.is_some() {
            rendered.extend(["github-section", "github-title", "recent-rep-title"]);
        }
    }
    rendered
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::Resource;
    use serde_json::json;

    fn request() -> PageRequest {
        PageRequest {
            state: PageState::default(),
            location: PageLocation::new("https://ada.dev", "/"),
            theme: Theme::Dark,
        }
    }

    fn store() -> ContentStore {
        let projects: Vec<_> = (1..=7)
            .map(|i| json!({ "id": format!("p{}", i), "title": format!("Project {}", i) }))
            .collect();
        ContentStore::from_values([
            (
                Resource::About,
                Some(json!({
                    "name": "Ada",
                    "email": "ada@example.com",
                    "googleScholar": "https://scholar.example/ada",
                    "socials": {
                        "github": "https://github.com/ada",
                        "discord": "https://discord.example/ada",
                        "mastodon": "https://social.example/@ada"
                    },
                    "codingProfiles": { "leetcode": "https://leetcode.com/ada/" }
                })),
            ),
            (Resource::Projects, Some(json!(projects))),
            (
                Resource::Research,
                Some(json!([{
                    "id": "r1",
                    "title": "Paper",
                    "publisher": "ACM",
                    "year": 2023,
                    "doi": "10.1/xyz"
                }])),
            ),
            (
                Resource::Education,
                Some(json!([{ "degree": "BSc", "institution": "Uni", "grade": "9.1" }])),
            ),
            (Resource::Knowledge, Some(json!(["Rust", "Systems"]))),
        ])
    }

    fn with_ctx<R>(
        store: &ContentStore,
        request: &PageRequest,
        f: impl FnOnce(&ViewContext) -> R,
    ) -> R {
        let config = SiteConfig::default();
        let widgets = WidgetBoard::default();
        let ctx = ViewContext { store, widgets: &widgets, config: &config, request };
        f(&ctx)
    }

    #[test]
    fn test_pending_store_renders_loading() {
        let store = ContentStore::pending();
        with_ctx(&store, &request(), |ctx| {
            for id in SECTION_ORDER {
                let view = ctx.build_section(id).unwrap();
                let value = serde_json::to_value(&view).unwrap();
                assert_eq!(value["status"], "loading", "{} should be loading", id);
            }
        });
    }

    #[test]
    fn test_failed_resource_renders_empty() {
        let store = store();
        with_ctx(&store, &request(), |ctx| {
            let value = serde_json::to_value(ctx.build_section("achievements").unwrap()).unwrap();
            assert_eq!(value, json!({ "status": "empty" }));
            assert!(ctx.build_section("projects").unwrap().is_ready());
            assert!(ctx.build_section("blog").is_none());
        });
    }

    #[test]
    fn test_projects_first_page() {
        let store = store();
        with_ctx(&store, &request(), |ctx| {
            let Some(SectionView::Paged(Section::Ready(paged))) =
                ctx.build_section("projects")
            else {
                panic!("projects should be ready");
            };
            let anchors: Vec<_> =
                paged.page.items.iter().filter_map(|c| c.anchor.clone()).collect();
            assert_eq!(anchors, vec!["p1", "p2", "p3"]);
            assert_eq!(paged.page.total_pages, 3);
            let controls = paged.page.controls.unwrap();
            assert!(controls.prev.disabled);
            assert!(!controls.next.disabled);
            assert_eq!(
                paged.page.items[0].copy.as_ref().map(|c| c.text.as_str()),
                Some("https://ada.dev/#p1")
            );
        });
    }

    #[test]
    fn test_page_cursor_from_request() {
        let store = store();
        let mut req = request();
        req.state = PageState::default().with_page("projects", 3);
        with_ctx(&store, &req, |ctx| {
            let Some(SectionView::Paged(Section::Ready(paged))) =
                ctx.build_section("projects")
            else {
                panic!("projects should be ready");
            };
            assert_eq!(paged.page.items.len(), 1);
            assert_eq!(paged.page.items[0].anchor.as_deref(), Some("p7"));
        });
    }

    #[test]
    fn test_research_card_fields() {
        let store = store();
        with_ctx(&store, &request(), |ctx| {
            let Some(SectionView::Paged(Section::Ready(paged))) =
                ctx.build_section("research")
            else {
                panic!("research should be ready");
            };
            let card = &paged.page.items[0];
            assert_eq!(card.meta.as_deref(), Some("ACM • 2023"));
            assert_eq!(
                card.links,
                vec![LinkView { label: "DOI".into(), href: "https://doi.org/10.1/xyz".into() }]
            );
            let heading = paged.heading_link.as_ref().map(|l| l.label.as_str());
            assert_eq!(heading, Some("Google Scholar"));
        });
    }

    #[test]
    fn test_missing_fields_are_omitted() {
        let card = certification_card(&Certification::default(), &request().location);
        assert!(card.title.is_none());
        assert!(card.meta.is_none());
        assert!(card.links.is_empty());
        assert!(card.copy.is_none());

        let item = education_item(&Education {
            degree: Some("BSc".into()),
            institution: None,
            year: Some("2020".into()),
            grade: Some("9.1".into()),
        });
        assert_eq!(item.meta.as_deref(), Some("2020"));
        assert_eq!(item.description.as_deref(), Some("Grade: 9.1"));
    }

    #[test]
    fn test_project_links_and_detail() {
        let project: Project = serde_json::from_value(json!({
            "id": "folio",
            "links": { "source": "https://git.example/folio", "demo": "" },
            "detail": "data/details/folio.md",
            "summary": "**Fast** server"
        }))
        .unwrap();
        let card = project_card(&project, &request().location);
        assert_eq!(
            card.links,
            vec![LinkView { label: "Source".into(), href: "https://git.example/folio".into() }]
        );
        assert_eq!(card.detail_url.as_deref(), Some("/details/projects/folio"));
        assert!(card.summary_html.unwrap().contains("<strong>Fast</strong>"));
    }

    #[test]
    fn test_script_links_are_dropped() {
        let project: Project = serde_json::from_value(json!({
            "id": "x",
            "links": { "demo": "JavaScript:alert(1)", "source": "https://git.example/x" }
        }))
        .unwrap();
        let card = project_card(&project, &request().location);
        assert_eq!(card.links.len(), 1);
        assert_eq!(card.links[0].label, "Source");

        let about: AboutProfile = serde_json::from_value(json!({
            "socials": {
                "github": " javascript:alert(1)",
                "linkedin": "https://linkedin.example/ada"
            }
        }))
        .unwrap();
        let config = SiteConfig::default();
        let hrefs: Vec<_> =
            contact_socials(&about, &config).into_iter().map(|s| s.href).collect();
        assert_eq!(hrefs, vec!["https://linkedin.example/ada"]);
        assert_eq!(about_socials(&about, &config).len(), 1);
        assert!(link("View", Some("vbscript:msgbox")).is_none());
    }

    #[test]
    fn test_social_filters() {
        let about = store().about().unwrap();
        let config = SiteConfig::default();

        let about_links: Vec<_> =
            about_socials(&about, &config).into_iter().map(|s| s.platform).collect();
        assert_eq!(about_links, vec!["github", "mastodon"]);

        let contact_links: Vec<_> =
            contact_socials(&about, &config).into_iter().map(|s| s.platform).collect();
        assert_eq!(contact_links, vec!["github", "discord"]);
    }

    #[test]
    fn test_profiles_use_about_then_config() {
        let store = store();
        with_ctx(&store, &request(), |ctx| {
            let Some(SectionView::Profiles(Section::Ready(profiles))) =
                ctx.build_section("profiles")
            else {
                panic!("profiles should be ready");
            };
            let keys: Vec<_> = profiles.cards.iter().map(|c| c.key).collect();
            assert_eq!(keys, vec!["leetcode"]);
            let cards = profiles.stat_cards.unwrap();
            assert!(cards.github_stats.contains("username=ada"));
            let panels: Vec<_> = profiles.platforms.iter().map(|p| p.key).collect();
            assert_eq!(panels, vec!["hackerrank", "codechef"]);
        });
    }

    #[test]
    fn test_platform_panels_follow_widgets_and_config() {
        let store = store();
        let mut config = SiteConfig::default();
        config.profiles.show_hackerrank = false;
        let widgets = WidgetBoard {
            codechef: WidgetStatus::Ready(vec![StatLine { label: "Rating", value: "1650".into() }]),
            ..Default::default()
        };
        let request = request();
        let ctx =
            ViewContext { store: &store, widgets: &widgets, config: &config, request: &request };

        let Some(SectionView::Profiles(Section::Ready(profiles))) =
            ctx.build_section("profiles")
        else {
            panic!("profiles should be ready");
        };
        assert_eq!(profiles.platforms.len(), 1);
        assert_eq!(profiles.platforms[0].name, "CodeChef");

        let page = ctx.build_page();
        assert!(page.theme_css.contains(".statparm"));
    }

    #[test]
    fn test_page_theme_css_tracks_rendered_sections() {
        let loaded = store();
        let css = with_ctx(&loaded, &request(), |ctx| ctx.build_page().theme_css);
        assert!(css.contains("#about-section { background-color: black; }"));

        let pending = ContentStore::pending();
        let css = with_ctx(&pending, &request(), |ctx| ctx.build_page().theme_css);
        assert!(!css.contains("#about-section"));
        assert!(css.contains("#pre-name { color: white; }"));
    }

    #[test]
    fn test_heading_links() {
        let store = store();
        with_ctx(&store, &request(), |ctx| {
            let links = ctx.heading_links();
            assert_eq!(links["projects"].text, "https://ada.dev/#projects");
            assert_eq!(links["projects"].toast, "Section link copied!");
            assert!(!links.contains_key("hero"));
        });
    }

    #[test]
    fn test_hero_typed_strings() {
        let store = store();
        with_ctx(&store, &request(), |ctx| {
            let Some(SectionView::Hero(Section::Ready(hero))) = ctx.build_section("hero") else {
                panic!("hero should be ready");
            };
            assert_eq!(hero.typed_strings, vec!["Rust", "Systems"]);
            assert_eq!(hero.email_copy.unwrap().toast, "Email copied to clipboard!");
        });
    }
}
