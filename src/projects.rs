//! Project shelf: the portfolio's project cards with a technology filter.
//!
//! Projects arrive already resolved (from the config file); the shelf only
//! orders them, derives the filter choices and tracks the selected filter.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::constants::{FALLBACK_LINK, PLACEHOLDER_LINK};

/// One project card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    #[serde(default)]
    pub display_order: i32,
}

impl Project {
    pub fn live_link(&self) -> &str {
        resolve_link(self.live_url.as_deref())
    }

    pub fn github_link(&self) -> &str {
        resolve_link(self.github_url.as_deref())
    }
}

/// Map a missing or placeholder URL to the not-found route.
pub fn resolve_link(url: Option<&str>) -> &str {
    match url.map(str::trim) {
        None | Some("") => FALLBACK_LINK,
        Some(PLACEHOLDER_LINK) => FALLBACK_LINK,
        Some(url) => url,
    }
}

/// Technology filter for the shelf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TechFilter {
    All,
    Tech(String),
}

impl TechFilter {
    pub fn matches(&self, project: &Project) -> bool {
        match self {
            TechFilter::All => true,
            TechFilter::Tech(tech) => project.tech_stack.iter().any(|t| t == tech),
        }
    }
}

impl fmt::Display for TechFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TechFilter::All => write!(f, "All"),
            TechFilter::Tech(tech) => write!(f, "{tech}"),
        }
    }
}

/// Projects filtered by `filter`, in their stored order.
pub fn filter_projects<'a>(projects: &'a [Project], filter: &TechFilter) -> Vec<&'a Project> {
    projects.iter().filter(|p| filter.matches(p)).collect()
}

/// Ordered projects plus the current filter selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectShelf {
    projects: Vec<Project>,
    filters: Vec<TechFilter>,
    selected: usize,
}

impl ProjectShelf {
    /// Sort by `display_order` (stable) and derive filters: `All`, then each
    /// technology in order of first appearance.
    pub fn new(mut projects: Vec<Project>) -> Self {
        projects.sort_by_key(|p| p.display_order);

        let mut filters = vec![TechFilter::All];
        for tech in projects.iter().flat_map(|p| p.tech_stack.iter()) {
            let filter = TechFilter::Tech(tech.clone());
            if !filters.contains(&filter) {
                filters.push(filter);
            }
        }

        Self {
            projects,
            filters,
            selected: 0,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn filters(&self) -> &[TechFilter] {
        &self.filters
    }

    pub fn filter(&self) -> &TechFilter {
        &self.filters[self.selected]
    }

    /// Move to the next filter, wrapping back to `All`.
    pub fn cycle_filter(&mut self) -> &TechFilter {
        self.selected = (self.selected + 1) % self.filters.len();
        self.filter()
    }

    /// Select a filter by value. Returns false if no project uses it.
    pub fn select_filter(&mut self, filter: &TechFilter) -> bool {
        match self.filters.iter().position(|f| f == filter) {
            Some(index) => {
                self.selected = index;
                true
            }
            None => false,
        }
    }

    pub fn visible(&self) -> Vec<&Project> {
        filter_projects(&self.projects, self.filter())
    }
}

impl Default for ProjectShelf {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(title: &str, order: i32, techs: &[&str]) -> Project {
        Project {
            title: title.to_string(),
            description: String::new(),
            tech_stack: techs.iter().map(|t| t.to_string()).collect(),
            live_url: None,
            github_url: None,
            display_order: order,
        }
    }

    #[test]
    fn test_resolve_link_fallbacks() {
        assert_eq!(resolve_link(None), "/404");
        assert_eq!(resolve_link(Some("#")), "/404");
        assert_eq!(resolve_link(Some("  ")), "/404");
        assert_eq!(resolve_link(Some("https://example.com")), "https://example.com");
    }

    #[test]
    fn test_shelf_orders_and_derives_filters() {
        let shelf = ProjectShelf::new(vec![
            project("b", 2, &["React", "Node.js"]),
            project("a", 1, &["React", "MongoDB"]),
        ]);

        let titles: Vec<_> = shelf.projects().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b"]);
        assert_eq!(
            shelf.filters(),
            &[
                TechFilter::All,
                TechFilter::Tech("React".into()),
                TechFilter::Tech("MongoDB".into()),
                TechFilter::Tech("Node.js".into()),
            ]
        );
    }

    #[test]
    fn test_cycle_filter_wraps_and_filters() {
        let mut shelf = ProjectShelf::new(vec![
            project("a", 0, &["React"]),
            project("b", 1, &["Express"]),
        ]);

        assert_eq!(shelf.visible().len(), 2);
        assert_eq!(shelf.cycle_filter(), &TechFilter::Tech("React".into()));
        assert_eq!(shelf.visible()[0].title, "a");
        assert_eq!(shelf.visible().len(), 1);
        shelf.cycle_filter();
        assert_eq!(shelf.visible()[0].title, "b");
        assert_eq!(shelf.cycle_filter(), &TechFilter::All);
    }

    #[test]
    fn test_select_unknown_filter() {
        let mut shelf = ProjectShelf::new(vec![project("a", 0, &["React"])]);
        assert!(!shelf.select_filter(&TechFilter::Tech("Go".into())));
        assert_eq!(shelf.filter(), &TechFilter::All);
        assert!(shelf.select_filter(&TechFilter::Tech("React".into())));
    }

    #[test]
    fn test_empty_shelf_has_all_filter() {
        let mut shelf = ProjectShelf::default();
        assert!(shelf.visible().is_empty());
        assert_eq!(shelf.filters(), &[TechFilter::All]);
        assert_eq!(shelf.cycle_filter(), &TechFilter::All);
    }
}
