//! Collection queries over authors: category filter, free-text search and pagination.
//!
//! # Invariants
//! - Filter and search compose conjunctively.
//! - Source (insertion) order is preserved; there is no implicit sort.
//! - Effective page size is always within `1..=MAX_PAGE_SIZE`.

use serde::Deserialize;

use crate::entities::Author;

/// Largest page a client can request; larger sizes are clamped, not rejected.
pub const MAX_PAGE_SIZE: usize = 20;
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_PAGE_NUMBER: usize = 1;

/// Raw collection request as it arrives on the query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResourceParameters {
    pub main_category: Option<String>,
    pub search_query: Option<String>,
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
}

/// Normalized, immutable description of a collection request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParameters {
    category: Option<String>,
    search_query: Option<String>,
    page_number: usize,
    page_size: usize,
}

impl QueryParameters {
    pub fn new(
        category: Option<&str>,
        search_query: Option<&str>,
        page_number: Option<i64>,
        page_size: Option<i64>,
    ) -> Self {
        Self {
            category: non_blank(category),
            search_query: non_blank(search_query),
            page_number: page_number
                .map(|n| n.max(1) as usize)
                .unwrap_or(DEFAULT_PAGE_NUMBER),
            page_size: page_size
                .map(|s| s.clamp(1, MAX_PAGE_SIZE as i64) as usize)
                .unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn search_query(&self) -> Option<&str> {
        self.search_query.as_deref()
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Same filter and size, different page. Used to build navigation links.
    pub fn with_page(&self, page_number: usize) -> Self {
        Self {
            page_number: page_number.max(1),
            ..self.clone()
        }
    }

    fn matches(&self, author: &Author) -> bool {
        if let Some(category) = &self.category {
            if author.main_category.trim().to_lowercase() != category.to_lowercase() {
                return false;
            }
        }
        if let Some(query) = &self.search_query {
            let needle = query.to_lowercase();
            let in_name = author.full_name().to_lowercase().contains(&needle);
            let in_category = author.main_category.to_lowercase().contains(&needle);
            if !(in_name || in_category) {
                return false;
            }
        }
        true
    }
}

impl Default for QueryParameters {
    fn default() -> Self {
        Self::new(None, None, None, None)
    }
}

impl From<&AuthorResourceParameters> for QueryParameters {
    fn from(raw: &AuthorResourceParameters) -> Self {
        Self::new(
            raw.main_category.as_deref(),
            raw.search_query.as_deref(),
            raw.page_number,
            raw.page_size,
        )
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// One window of a filtered collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_matched: usize,
    pub page_number: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> usize {
        self.total_matched.div_ceil(self.page_size)
    }

    pub fn has_previous(&self) -> bool {
        self.page_number > 1
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_matched: self.total_matched,
            page_number: self.page_number,
            page_size: self.page_size,
        }
    }
}

/// Apply filter, search and pagination to `all`, in that order.
pub fn query_authors(all: &[Author], params: &QueryParameters) -> Page<Author> {
    let matched: Vec<&Author> = all.iter().filter(|a| params.matches(a)).collect();
    let skip = (params.page_number - 1).saturating_mul(params.page_size);

    Page {
        items: matched
            .iter()
            .skip(skip)
            .take(params.page_size)
            .map(|a| (*a).clone())
            .collect(),
        total_matched: matched.len(),
        page_number: params.page_number,
        page_size: params.page_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use uuid::Uuid;

    fn author(first: &str, last: &str, category: &str) -> Author {
        Author {
            id: Uuid::new_v4(),
            first_name: first.into(),
            last_name: last.into(),
            date_of_birth: date!(1892 - 01 - 03),
            date_of_death: None,
            main_category: category.into(),
        }
    }

    fn catalogue() -> Vec<Author> {
        (0..45)
            .map(|i| author(&format!("Author{i}"), "Doe", "History"))
            .collect()
    }

    #[test]
    fn page_size_is_clamped_to_maximum() {
        let params = QueryParameters::new(None, None, None, Some(500));
        assert_eq!(params.page_size(), MAX_PAGE_SIZE);

        let page = query_authors(&catalogue(), &params);
        assert_eq!(page.items.len(), 20);
        assert_eq!(page.total_matched, 45);
        assert_eq!(page.total_pages(), 3);
    }

    #[test]
    fn non_positive_page_size_and_number_are_raised_to_one() {
        let params = QueryParameters::new(None, None, Some(-3), Some(0));
        assert_eq!(params.page_number(), 1);
        assert_eq!(params.page_size(), 1);
    }

    #[test]
    fn defaults_apply_when_paging_is_absent() {
        let params = QueryParameters::default();
        assert_eq!(params.page_number(), DEFAULT_PAGE_NUMBER);
        assert_eq!(params.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn filter_and_search_compose_conjunctively() {
        let fantasy = author("J", "Tolkien", "Fantasy");
        let scifi = author("J", "Tolkien", "Sci-Fi");
        let other = author("Ursula", "Le Guin", "fantasy");
        let all = vec![fantasy.clone(), scifi, other];

        let params = QueryParameters::new(Some("fantasy"), Some("tolkien"), None, None);
        let page = query_authors(&all, &params);

        assert_eq!(page.items, vec![fantasy]);
        assert_eq!(page.total_matched, 1);
    }

    #[test]
    fn category_filter_trims_and_ignores_case() {
        let all = vec![author("A", "B", "  Rum "), author("C", "D", "Singing")];
        let params = QueryParameters::new(Some(" RUM "), None, None, None);
        let page = query_authors(&all, &params);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].first_name, "A");
    }

    #[test]
    fn search_matches_category_as_well_as_name() {
        let all = vec![
            author("Nancy", "Rye", "Rum"),
            author("Eli", "Ivory Bones", "Maps"),
        ];
        let params = QueryParameters::new(None, Some("MAP"), None, None);
        let page = query_authors(&all, &params);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].first_name, "Eli");
    }

    #[test]
    fn blank_filters_are_ignored() {
        let params = QueryParameters::new(Some("   "), Some(""), None, None);
        assert_eq!(params.category(), None);
        assert_eq!(params.search_query(), None);
        assert_eq!(query_authors(&catalogue(), &params).total_matched, 45);
    }

    #[test]
    fn pagination_preserves_insertion_order() {
        let all = catalogue();
        let params = QueryParameters::new(None, None, Some(2), Some(10));
        let page = query_authors(&all, &params);
        let names: Vec<_> = page.items.iter().map(|a| a.first_name.clone()).collect();
        let expected: Vec<_> = (10..20).map(|i| format!("Author{i}")).collect();
        assert_eq!(names, expected);
        assert!(page.has_previous());
        assert!(page.has_next());
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let params = QueryParameters::new(None, None, Some(99), Some(20));
        let page = query_authors(&catalogue(), &params);
        assert!(page.items.is_empty());
        assert_eq!(page.total_matched, 45);
        assert!(!page.has_next());
    }

    #[test]
    fn identical_inputs_give_identical_pages() {
        let all = catalogue();
        let params = QueryParameters::new(None, Some("author1"), Some(1), Some(5));
        assert_eq!(query_authors(&all, &params), query_authors(&all, &params));
    }

    #[test]
    fn raw_parameters_normalize() {
        let raw: AuthorResourceParameters = serde_json::from_value(serde_json::json!({
            "mainCategory": " Rum ",
            "pageSize": 50
        }))
        .unwrap();
        let params = QueryParameters::from(&raw);
        assert_eq!(params.category(), Some("Rum"));
        assert_eq!(params.page_size(), 20);
        assert_eq!(params.with_page(3).page_number(), 3);
    }
}
