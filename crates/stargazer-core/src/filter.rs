// Filter + sort pipeline that turns the raw starred list into what gets shown
use std::collections::BTreeSet;

use serde::Serialize;

use crate::{fuzzy, models::Repository, models::SortMode, topics};

/// Everything the user has dialled in on the repositories screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub selected_topics: BTreeSet<String>,
    /// Narrows the repository list (substring match)
    pub search: String,
    /// Narrows the topic picker only (fuzzy match)
    pub topic_search: String,
    pub sort: SortMode,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the topic if missing, remove it if present. Returns whether it
    /// ended up selected.
    pub fn toggle_topic(&mut self, topic: &str) -> bool {
        if self.selected_topics.remove(topic) {
            false
        } else {
            self.selected_topics.insert(topic.to_string());
            true
        }
    }

    pub fn clear_topics(&mut self) {
        self.selected_topics.clear();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Run topic filter, text filter and sort over `repos`, in that order
///
/// Pure and cheap enough to call on every read; nothing is cached.
pub fn apply<'a>(criteria: &FilterCriteria, repos: &'a [Repository]) -> Vec<&'a Repository> {
    let query = criteria.search.trim().to_lowercase();

    let mut visible: Vec<&Repository> = repos
        .iter()
        .filter(|repo| matches_topics(&criteria.selected_topics, repo))
        .filter(|repo| matches_text(&query, repo))
        .collect();

    sort_repositories(&mut visible, criteria.sort);
    visible
}

/// Union semantics: any one selected topic is enough
fn matches_topics(selected: &BTreeSet<String>, repo: &Repository) -> bool {
    selected.is_empty() || selected.iter().any(|t| repo.has_topic(t))
}

/// `query` must already be trimmed and lower-cased
fn matches_text(query: &str, repo: &Repository) -> bool {
    if query.is_empty() {
        return true;
    }

    repo.name.to_lowercase().contains(query)
        || repo
            .description
            .as_ref()
            .is_some_and(|d| d.to_lowercase().contains(query))
}

/// Stable sort; equal keys keep their incoming order
pub fn sort_repositories(repos: &mut [&Repository], mode: SortMode) {
    match mode {
        SortMode::ByStars => repos.sort_by(|a, b| b.stars.cmp(&a.stars)),
        SortMode::ByUpdated => repos.sort_by(|a, b| a.updated_at.cmp(&b.updated_at)),
        SortMode::ByName => repos.sort_by_cached_key(|r| r.name.to_lowercase()),
    }
}

/// A row in the topic picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicOption {
    pub topic: String,
    pub count: usize,
    pub selected: bool,
}

/// Topics across all repositories, fuzzy-narrowed by the topic search and
/// ordered most common first
pub fn topic_picker(criteria: &FilterCriteria, repos: &[Repository]) -> Vec<TopicOption> {
    let mut counts = topics::aggregate(repos);
    counts.retain(|c| fuzzy::matches(&criteria.topic_search, &c.topic));
    topics::sort_by_count(&mut counts);

    counts
        .into_iter()
        .map(|c| TopicOption {
            selected: criteria.selected_topics.contains(&c.topic),
            topic: c.topic,
            count: c.count,
        })
        .collect()
}
