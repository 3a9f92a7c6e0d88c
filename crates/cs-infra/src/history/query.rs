use cs_core::history::HistoryEntry;
use cs_core::search::{ContentFilter, HistoryQuery};

/// Whether `entry` satisfies the text query and every non-empty filter
/// category. Tags within one category are alternatives.
pub fn matches_query(entry: &HistoryEntry, query: &HistoryQuery) -> bool {
    let text = query.query.trim();
    if !text.is_empty() && !entry.value.to_lowercase().contains(&text.to_lowercase()) {
        return false;
    }

    if !query.filters.is_empty() && !query.filters.iter().any(|f| matches_content(entry, *f)) {
        return false;
    }

    if !query.code_filters.is_empty() {
        let Some(language) = entry.detected_language.as_deref() else {
            return false;
        };
        if !query
            .code_filters
            .iter()
            .any(|l| l.eq_ignore_ascii_case(language))
        {
            return false;
        }
    }

    if !query.app_filters.is_empty() {
        let Some(app) = entry.copied_from_app.as_deref() else {
            return false;
        };
        if !query.app_filters.iter().any(|a| a == app) {
            return false;
        }
    }

    true
}

fn matches_content(entry: &HistoryEntry, filter: ContentFilter) -> bool {
    match filter {
        ContentFilter::Text => entry.is_text(),
        ContentFilter::Image => entry.is_image,
        ContentFilter::Link => entry.is_link,
        ContentFilter::Code => entry.is_code,
        ContentFilter::Pinned => entry.is_pinned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cs_core::ids::HistoryId;
    use cs_core::search::SearchFilters;

    fn code(id: &str, value: &str, language: &str) -> HistoryEntry {
        let mut entry = HistoryEntry::text(HistoryId::from(id), value, 0);
        entry.is_code = true;
        entry.detected_language = Some(language.to_string());
        entry
    }

    #[test]
    fn text_query_is_case_insensitive() {
        let entry = HistoryEntry::text(HistoryId::from("a"), "Hello World", 0);
        assert!(matches_query(&entry, &HistoryQuery::new("world", &SearchFilters::default())));
        assert!(!matches_query(&entry, &HistoryQuery::new("mars", &SearchFilters::default())));
    }

    #[test]
    fn categories_combine_with_and_tags_with_or() {
        let rust = code("r", "fn main() {}", "rust");
        let mut filters = SearchFilters::default();
        filters.toggle_content(ContentFilter::Code);
        filters.toggle_content(ContentFilter::Link);
        filters.toggle_code_language("Rust");
        filters.toggle_code_language("go");
        assert!(matches_query(&rust, &HistoryQuery::new("", &filters)));

        filters.toggle_app("Terminal");
        assert!(!matches_query(&rust, &HistoryQuery::new("", &filters)));
    }

    #[test]
    fn pinned_filter_matches_only_pinned_entries() {
        let mut filters = SearchFilters::default();
        filters.toggle_content(ContentFilter::Pinned);
        let query = HistoryQuery::new("", &filters);

        let plain = HistoryEntry::text(HistoryId::from("a"), "a", 0);
        assert!(!matches_query(&plain, &query));
        assert!(matches_query(&plain.with_pinned_order(0), &query));
    }
}
