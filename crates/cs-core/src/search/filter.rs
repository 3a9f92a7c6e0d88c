use serde::{Deserialize, Serialize};

/// Content-type filter tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentFilter {
    Text,
    Image,
    Link,
    Code,
    Pinned,
}

/// Active filter tags, grouped by category.
///
/// 当前启用的过滤条件（按类别分组）。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    pub content: Vec<ContentFilter>,
    pub code_languages: Vec<String>,
    pub apps: Vec<String>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty() && self.code_languages.is_empty() && self.apps.is_empty()
    }

    pub fn toggle_content(&mut self, filter: ContentFilter) {
        toggle(&mut self.content, filter);
    }

    pub fn toggle_code_language(&mut self, language: impl Into<String>) {
        toggle(&mut self.code_languages, language.into());
    }

    pub fn toggle_app(&mut self, app: impl Into<String>) {
        toggle(&mut self.apps, app.into());
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.code_languages.clear();
        self.apps.clear();
    }
}

fn toggle<T: PartialEq>(values: &mut Vec<T>, value: T) {
    if let Some(pos) = values.iter().position(|v| *v == value) {
        values.remove(pos);
    } else {
        values.push(value);
    }
}

/// Payload of a backend search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    pub query: String,
    pub filters: Vec<ContentFilter>,
    pub code_filters: Vec<String>,
    pub app_filters: Vec<String>,
}

impl HistoryQuery {
    pub fn new(query: impl Into<String>, filters: &SearchFilters) -> Self {
        Self {
            query: query.into(),
            filters: filters.content.clone(),
            code_filters: filters.code_languages.clone(),
            app_filters: filters.apps.clone(),
        }
    }

    /// Every pinned entry, regardless of age. Feeds the pinned tray.
    pub fn pinned() -> Self {
        Self {
            filters: vec![ContentFilter::Pinned],
            ..Self::default()
        }
    }
}

/// Which collection the history list renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListSource {
    /// The paginated, unfiltered collection.
    #[default]
    All,
    /// The backend search result.
    Found,
}

impl ListSource {
    pub fn from_flag(has_search_or_filter: bool) -> Self {
        if has_search_or_filter {
            Self::Found
        } else {
            Self::All
        }
    }

    /// Pagination only applies to the unfiltered collection.
    pub fn paginates(self) -> bool {
        self == Self::All
    }
}

/// True when the debounced query is longer than one character or any filter
/// category is non-empty.
pub fn has_search_or_filter(debounced_query: &str, filters: &SearchFilters) -> bool {
    debounced_query.chars().count() > 1 || !filters.is_empty()
}
