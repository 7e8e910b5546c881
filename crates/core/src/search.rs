//! Site search and portfolio category filter.
//!
//! Both run over small in-memory lists; matching is a case-insensitive
//! substring test, no ranking.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Testimonial excerpts are cut to this many characters.
pub const EXCERPT_CHARS: usize = 100;

/// Shown when a query has no hits.
pub const SEARCH_SUGGESTIONS: &[&str] = &[
    "wedding",
    "event",
    "product",
    "cinematic",
    "basic",
    "professional",
    "portfolio",
];

// ---------------------------------------------------------------------------
// Site search
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    Service,
    Portfolio,
    Pricing,
    Testimonial,
    Navigation,
}

impl SearchKind {
    /// Page anchor the result scrolls to, when the entry does not give one.
    pub fn default_section(self) -> &'static str {
        match self {
            Self::Service => "#services",
            Self::Portfolio => "#portfolio",
            Self::Pricing => "#pricing",
            Self::Testimonial => "#testimonials",
            Self::Navigation => "#home",
        }
    }
}

/// One searchable block of the page.
///
/// For pricing entries `description` holds the price; for testimonials,
/// `title` is the client name and `description` the feedback text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEntry {
    pub kind: SearchKind,
    pub title: String,
    pub description: String,
    /// Extra keywords attached to the block.
    #[serde(default)]
    pub search_data: String,
    #[serde(default)]
    pub section: Option<String>,
}

impl SearchEntry {
    pub fn new(kind: SearchKind, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: description.into(),
            search_data: String::new(),
            section: None,
        }
    }

    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.search_data = keywords.into();
        self
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    fn haystack(&self) -> String {
        match self.kind {
            // Navigation links match on their visible text only.
            SearchKind::Navigation => self.title.to_lowercase(),
            _ => format!("{} {} {}", self.search_data, self.title, self.description)
                .to_lowercase(),
        }
    }

    fn to_result(&self) -> SearchResult {
        let section = self
            .section
            .clone()
            .unwrap_or_else(|| self.kind.default_section().to_string());
        let (title, description) = match self.kind {
            SearchKind::Service | SearchKind::Portfolio => {
                (self.title.clone(), self.description.clone())
            }
            SearchKind::Pricing => (self.title.clone(), format!("Package: {}", self.description)),
            SearchKind::Testimonial => (
                format!("Testimonial from {}", self.title),
                excerpt(&self.description),
            ),
            SearchKind::Navigation => {
                let text = self.title.to_lowercase();
                (capitalize(&text), format!("Go to {text} section"))
            }
        };
        SearchResult {
            kind: self.kind,
            title,
            description,
            section,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub kind: SearchKind,
    pub title: String,
    pub description: String,
    pub section: String,
}

/// Search `entries` for `query`.
///
/// Returns `None` for a blank query so the caller can prompt for a term;
/// otherwise every matching entry in input order.
pub fn search(entries: &[SearchEntry], query: &str) -> Option<Vec<SearchResult>> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    Some(
        entries
            .iter()
            .filter(|e| e.haystack().contains(&needle))
            .map(SearchEntry::to_result)
            .collect(),
    )
}

/// Result count line, e.g. `3 results found for "wedding"`.
pub fn results_summary(count: usize, query: &str) -> String {
    if count == 0 {
        format!("No results found for \"{query}\"")
    } else {
        format!("{count} results found for \"{query}\"")
    }
}

fn excerpt(text: &str) -> String {
    let cut: String = text.chars().take(EXCERPT_CHARS).collect();
    format!("{cut}...")
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Portfolio filter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortfolioCategory {
    Wedding,
    Product,
    Event,
    Portrait,
}

impl PortfolioCategory {
    pub const ALL: [Self; 4] = [Self::Wedding, Self::Product, Self::Event, Self::Portrait];

    pub fn from_key(s: &str) -> Result<Self, CoreError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wedding" => Ok(Self::Wedding),
            "product" => Ok(Self::Product),
            "event" => Ok(Self::Event),
            "portrait" => Ok(Self::Portrait),
            other => Err(CoreError::Validation(format!(
                "Unknown portfolio category: {other}"
            ))),
        }
    }

    pub fn as_key(self) -> &'static str {
        match self {
            Self::Wedding => "wedding",
            Self::Product => "product",
            Self::Event => "event",
            Self::Portrait => "portrait",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(PortfolioCategory),
}

impl CategoryFilter {
    /// `"all"` or a category key.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            PortfolioCategory::from_key(s).map(Self::Only)
        }
    }

    pub fn shows(&self, item: &PortfolioItem) -> bool {
        match self {
            Self::All => true,
            Self::Only(cat) => item.category == Some(*cat),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioItem {
    pub title: String,
    /// Untagged items are only listed under [`CategoryFilter::All`].
    #[serde(default)]
    pub category: Option<PortfolioCategory>,
}

pub fn filter_portfolio<'a>(items: &'a [PortfolioItem], filter: CategoryFilter) -> Vec<&'a PortfolioItem> {
    items.iter().filter(|i| filter.shows(i)).collect()
}
