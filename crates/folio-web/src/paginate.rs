//! Paginated sections.
//!
//! Pages are derived purely from `(page, per_page, len)`; nothing is cached.
//! An empty list is one page with no controls, and prev/next disable at the
//! ends instead of wrapping.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Sections rendered through the paginator.
pub const PAGINATED_SECTIONS: [&str; 4] =
    ["projects", "research", "achievements", "certifications"];

/// `max(1, ceil(len / per_page))`; a zero page size counts as 1.
pub fn total_pages(len: usize, per_page: usize) -> usize {
    let per_page = per_page.max(1);
    len.div_ceil(per_page).max(1)
}

/// Slice of `items` shown on 1-based `page`, clamped into range.
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    let per_page = per_page.max(1);
    let page = page.clamp(1, total_pages(items.len(), per_page));
    let start = ((page - 1) * per_page).min(items.len());
    let end = (start + per_page).min(items.len());
    &items[start..end]
}

// ── Page state ────────────────────────────────────────────────────────────────

/// Per-section 1-based cursors for one page load. Parsed from the query
/// string, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageState {
    cursors: BTreeMap<String, usize>,
}

impl PageState {
    /// Reads `?projects=2&research=3`; unknown sections and values that are not
    /// positive integers are ignored.
    pub fn from_query(query: &HashMap<String, String>) -> Self {
        let cursors = PAGINATED_SECTIONS
            .iter()
            .filter_map(|section| {
                let page = query.get(*section)?.trim().parse::<usize>().ok()?;
                (page >= 1).then(|| (section.to_string(), page))
            })
            .collect();
        Self { cursors }
    }

    pub fn page(&self, section: &str) -> usize {
        self.cursors.get(section).copied().unwrap_or(1)
    }

    /// Same state with `section` moved to `page`.
    pub fn with_page(&self, section: &str, page: usize) -> Self {
        let mut next = self.clone();
        next.cursors.insert(section.to_string(), page);
        next
    }

    /// Query string (without `?`), pages equal to 1 omitted.
    pub fn to_query(&self) -> String {
        self.cursors
            .iter()
            .filter(|(_, page)| **page > 1)
            .map(|(section, page)| format!("{}={}", section, page))
            .collect::<Vec<_>>()
            .join("&")
    }
}

// ── Controls ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageControl {
    pub label: String,
    /// Target page; `None` when the control is disabled.
    pub page: Option<usize>,
    pub href: Option<String>,
    pub disabled: bool,
    pub active: bool,
}

/// Prev / page numbers / next for one section.
#[derive(Debug, Clone, Serialize)]
pub struct PaginationControls {
    pub section: String,
    pub current: usize,
    pub total_pages: usize,
    pub prev: PageControl,
    pub pages: Vec<PageControl>,
    pub next: PageControl,
}

impl PaginationControls {
    /// `None` when there is at most one page.
    pub fn build(section: &str, state: &PageState, total_pages: usize) -> Option<Self> {
        if total_pages <= 1 {
            return None;
        }
        let current = state.page(section).clamp(1, total_pages);

        let link = |label: String, target: Option<usize>, active: bool| {
            let href = target.map(|page| {
                let query = state.with_page(section, page).to_query();
                if query.is_empty() {
                    format!("?#{}", section)
                } else {
                    format!("?{}#{}", query, section)
                }
            });
            PageControl {
                label,
                page: target,
                href,
                disabled: target.is_none(),
                active,
            }
        };

        let prev = link("← Previous".to_string(), (current > 1).then(|| current - 1), false);
        let next = link("Next →".to_string(), (current < total_pages).then(|| current + 1), false);
        let pages = (1..=total_pages)
            .map(|i| link(i.to_string(), Some(i), i == current))
            .collect();

        Some(Self {
            section: section.to_string(),
            current,
            total_pages,
            prev,
            pages,
            next,
        })
    }
}

/// One rendered page of a section.
#[derive(Debug, Clone, Serialize)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub controls: Option<PaginationControls>,
}

impl<T: Clone> Paged<T> {
    pub fn new(section: &str, items: &[T], state: &PageState, per_page: usize) -> Self {
        let total = total_pages(items.len(), per_page);
        let page = state.page(section).clamp(1, total);
        Self {
            items: paginate(items, page, per_page).to_vec(),
            page,
            total_pages: total,
            controls: PaginationControls::build(section, state, total),
        }
    }
}

impl<T> Paged<T> {
    /// Same page with every item transformed.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paged<U> {
        Paged {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            total_pages: self.total_pages,
            controls: self.controls,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("p{}", i)).collect()
    }

    #[test]
    fn test_seven_items_three_per_page() {
        let all = items(7);
        assert_eq!(total_pages(all.len(), 3), 3);
        assert_eq!(paginate(&all, 1, 3), ["p1", "p2", "p3"]);
        assert_eq!(paginate(&all, 2, 3), ["p4", "p5", "p6"]);
        assert_eq!(paginate(&all, 3, 3), ["p7"]);
    }

    #[test]
    fn test_page_count_formula() {
        for n in 0..40 {
            for p in 1..8 {
                let expected = std::cmp::max(1, (n + p - 1) / p);
                assert_eq!(total_pages(n, p), expected, "n={} p={}", n, p);
            }
        }
    }

    #[test]
    fn test_pages_reconstruct_input_exactly_once() {
        for n in 0..25 {
            let all = items(n);
            for p in 1..6 {
                let rebuilt: Vec<String> = (1..=total_pages(n, p))
                    .flat_map(|page| paginate(&all, page, p).to_vec())
                    .collect();
                assert_eq!(rebuilt, all, "n={} p={}", n, p);
            }
        }
    }

    #[test]
    fn test_out_of_range_pages_clamp() {
        let all = items(7);
        assert_eq!(paginate(&all, 0, 3), ["p1", "p2", "p3"]);
        assert_eq!(paginate(&all, 99, 3), ["p7"]);
        assert_eq!(paginate(&all, 1, 0), ["p1"]);
    }

    #[test]
    fn test_empty_list_is_single_page_without_controls() {
        let empty: Vec<String> = Vec::new();
        assert_eq!(total_pages(0, 3), 1);
        assert!(paginate(&empty, 1, 3).is_empty());
        let paged = Paged::new("projects", &empty, &PageState::default(), 3);
        assert_eq!(paged.total_pages, 1);
        assert!(paged.controls.is_none());
    }

    #[test]
    fn test_prev_next_enablement() {
        let total = 4;
        for current in 1..=total {
            let state = PageState::default().with_page("projects", current);
            let controls = PaginationControls::build("projects", &state, total).unwrap();
            assert_eq!(controls.prev.disabled, current == 1, "prev on page {}", current);
            assert_eq!(controls.next.disabled, current == total, "next on page {}", current);
            assert_eq!(controls.pages.len(), total);
            let active: Vec<usize> = controls
                .pages
                .iter()
                .filter(|c| c.active)
                .filter_map(|c| c.page)
                .collect();
            assert_eq!(active, vec![current]);
        }
    }

    #[test]
    fn test_control_hrefs_keep_other_cursors() {
        let state = PageState::default().with_page("research", 2).with_page("projects", 2);
        let controls = PaginationControls::build("projects", &state, 3).unwrap();
        assert_eq!(controls.prev.href.as_deref(), Some("?research=2#projects"));
        assert_eq!(
            controls.next.href.as_deref(),
            Some("?projects=3&research=2#projects")
        );
    }

    #[test]
    fn test_page_state_from_query() {
        let query: HashMap<String, String> = [
            ("projects", "2"),
            ("research", "zero"),
            ("achievements", "0"),
            ("blog", "4"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        let state = PageState::from_query(&query);
        assert_eq!(state.page("projects"), 2);
        assert_eq!(state.page("research"), 1);
        assert_eq!(state.page("achievements"), 1);
        assert_eq!(state.page("blog"), 1);
        assert_eq!(state.to_query(), "projects=2");
    }

    #[test]
    fn test_paged_clamps_cursor() {
        let all = items(7);
        let state = PageState::default().with_page("projects", 10);
        let paged = Paged::new("projects", &all, &state, 3);
        assert_eq!(paged.page, 3);
        assert_eq!(paged.items, vec!["p7".to_string()]);
        assert_eq!(paged.controls.unwrap().current, 3);
    }
}
