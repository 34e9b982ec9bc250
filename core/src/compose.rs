use crate::cardinal::cardinal;
use crate::display::DisplayMode;
use crate::search::Searcher;
use crate::slug::tag_path;
use crate::{CoverImage, SearchDocument};
use serde::Serialize;

pub const EMPTY_QUERY_HEADER: &str = "Search for a post";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagLink {
    pub name: String,
    pub href: String,
}

/// Heading level used for a post title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    H3,
    H4,
}

/// Everything a post row needs, detached from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    pub cover: Option<CoverImage>,
    pub description: String,
    pub tags: Vec<TagLink>,
}

impl PostSummary {
    /// Tag links shown next to the description; none on small screens.
    pub fn visible_tags(&self, mode: DisplayMode) -> &[TagLink] {
        match mode {
            DisplayMode::Desktop => &self.tags,
            DisplayMode::MobileOrTablet => &[],
        }
    }

    pub fn title_heading(&self, mode: DisplayMode) -> Heading {
        match mode {
            DisplayMode::Desktop => Heading::H3,
            DisplayMode::MobileOrTablet => Heading::H4,
        }
    }
}

impl From<&SearchDocument> for PostSummary {
    fn from(doc: &SearchDocument) -> Self {
        Self {
            slug: doc.url.clone(),
            title: doc.title.clone(),
            cover: doc.cover.clone(),
            description: doc.summary_text().to_string(),
            tags: doc
                .tags
                .iter()
                .map(|t| TagLink { name: t.clone(), href: tag_path(t) })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsView {
    pub query: String,
    pub header: String,
    pub items: Vec<PostSummary>,
}

/// `There's one result for "x"` / `There are three results for "x"`.
pub fn results_header(query: &str, count: usize) -> String {
    if query.is_empty() {
        return EMPTY_QUERY_HEADER.to_string();
    }
    let count = cardinal(count as u64);
    let (lead, noun) = if count == "one" { ("There's", "result") } else { ("There are", "results") };
    format!("{lead} {count} {noun} for \"{query}\"")
}

/// Run `query` and shape the hits for rendering.
pub fn compose(searcher: &Searcher, query: &str) -> ResultsView {
    let items: Vec<PostSummary> = if query.is_empty() {
        Vec::new()
    } else {
        searcher.search(query).iter().map(PostSummary::from).collect()
    };
    ResultsView { query: query.to_string(), header: results_header(query, items.len()), items }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singular_only_for_one() {
        assert_eq!(results_header("x", 1), "There's one result for \"x\"");
        assert_eq!(results_header("x", 0), "There are zero results for \"x\"");
        assert_eq!(results_header("x", 12), "There are 12 results for \"x\"");
    }

    #[test]
    fn empty_query_prompts() {
        let view = compose(&Searcher::unavailable(), "");
        assert_eq!(view.header, EMPTY_QUERY_HEADER);
        assert!(view.items.is_empty());
    }
}
