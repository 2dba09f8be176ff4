//! Template adapter: turns view models into HTML.
//!
//! Templates are embedded at compile time. Each section renders into its own
//! container element, so a fragment from `/sections/{id}` replaces the
//! container wholesale.

use minijinja::{context, Environment};
use serde::Serialize;

use crate::share::CopyAction;
use crate::view::{PageView, SectionView, section_title};

const TEMPLATES: &[(&str, &str)] = &[
    ("index.html", include_str!("../templates/index.html")),
    ("detail.html", include_str!("../templates/detail.html")),
    ("partials/heading.html", include_str!("../templates/partials/heading.html")),
    ("partials/skeleton.html", include_str!("../templates/partials/skeleton.html")),
    ("partials/card.html", include_str!("../templates/partials/card.html")),
    ("partials/pagination.html", include_str!("../templates/partials/pagination.html")),
    ("partials/socials.html", include_str!("../templates/partials/socials.html")),
    ("sections/hero.html", include_str!("../templates/sections/hero.html")),
    ("sections/about.html", include_str!("../templates/sections/about.html")),
    ("sections/techstack.html", include_str!("../templates/sections/techstack.html")),
    ("sections/paged.html", include_str!("../templates/sections/paged.html")),
    ("sections/timeline.html", include_str!("../templates/sections/timeline.html")),
    ("sections/profiles.html", include_str!("../templates/sections/profiles.html")),
    ("sections/contact.html", include_str!("../templates/sections/contact.html")),
    ("sections/footer.html", include_str!("../templates/sections/footer.html")),
];

/// Template used for a section id.
pub fn template_for(id: &str) -> Option<&'static str> {
    let name = match id {
        "hero" => "sections/hero.html",
        "about" => "sections/about.html",
        "techstack" => "sections/techstack.html",
        "projects" | "research" | "achievements" | "certifications" => "sections/paged.html",
        "experience" | "education" => "sections/timeline.html",
        "profiles" => "sections/profiles.html",
        "contact" => "sections/contact.html",
        "footer" => "sections/footer.html",
        _ => return None,
    };
    Some(name)
}

#[derive(Debug, Serialize)]
struct RenderedSection<'a> {
    id: &'a str,
    html: String,
}

pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// One section's container element.
    pub fn section(
        &self,
        id: &str,
        view: &SectionView,
        heading: Option<&CopyAction>,
    ) -> Result<String, minijinja::Error> {
        let name = template_for(id).ok_or_else(|| {
            minijinja::Error::new(
                minijinja::ErrorKind::TemplateNotFound,
                format!("no template for section {}", id),
            )
        })?;
        // Typewriter strings travel to the script as a JSON attribute.
        let typed_json = match view {
            SectionView::Hero(crate::view::Section::Ready(hero)) => {
                serde_json::to_string(&hero.typed_strings).unwrap_or_else(|_| "[]".to_string())
            }
            _ => "[]".to_string(),
        };
        self.env.get_template(name)?.render(context! {
            id,
            title => section_title(id),
            section => view,
            heading,
            typed_json,
        })
    }

    /// The full document.
    pub fn page(&self, view: &PageView) -> Result<String, minijinja::Error> {
        let sections = view
            .sections
            .iter()
            .map(|(id, section)| {
                Ok(RenderedSection {
                    id: *id,
                    html: self.section(id, section, view.heading_links.get(id))?,
                })
            })
            .collect::<Result<Vec<_>, minijinja::Error>>()?;

        self.env.get_template("index.html")?.render(context! {
            page => view,
            sections,
        })
    }

    /// Body of a "Show Details" panel; `None` renders the unavailable notice.
    pub fn detail(
        &self,
        title: Option<&str>,
        html: Option<&str>,
    ) -> Result<String, minijinja::Error> {
        self.env
            .get_template("detail.html")?
            .render(context! { title, html })
    }
}
