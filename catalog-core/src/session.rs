//! Consumer-side search state.
//!
//! [`CatalogSession`] tracks what a browsing user has asked for and applies
//! the paging policy: any change to the query, the filter or the page size
//! sends the user back to page 1. Each such change also bumps a generation
//! number, which callers running the planner off-thread or behind a debounce
//! timer compare to discard stale results.

use crate::catalog::Catalog;
use crate::pager::{paginate, Page};
use crate::params::SearchParams;
use catalog_types::{CatalogConfig, DocId, FilterSpec};

/// Query, filter and page position for one browsing user.
#[derive(Debug, Clone)]
pub struct CatalogSession {
    query: String,
    filter: FilterSpec,
    page: usize,
    page_size: usize,
    generation: u64,
    /// Planned results and the generation they were planned for.
    results: Option<(u64, Vec<DocId>)>,
}

impl CatalogSession {
    /// Empty session on page 1 with the configured default page size.
    pub fn new(config: &CatalogConfig) -> Self {
        Self::from_params(SearchParams::new(config))
    }

    /// Session restored from decoded link parameters.
    pub fn from_params(params: SearchParams) -> Self {
        Self {
            query: params.query,
            filter: params.filter,
            page: params.page.max(1),
            page_size: params.page_size.max(1),
            generation: 0,
            results: None,
        }
    }

    /// Current state as link parameters.
    pub fn to_params(&self) -> SearchParams {
        SearchParams {
            query: self.query.clone(),
            filter: self.filter.clone(),
            page: self.page,
            page_size: self.page_size,
        }
    }

    /// Current raw query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current filter.
    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    /// Requested page, before clamping against the result count.
    pub fn requested_page(&self) -> usize {
        self.page
    }

    /// Current page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of result-affecting changes so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replaces the query. Returns the new generation.
    pub fn set_query(&mut self, query: impl Into<String>) -> u64 {
        let query = query.into();
        if query != self.query {
            self.query = query;
            self.changed();
        }
        self.generation
    }

    /// Replaces the filter. Returns the new generation.
    pub fn set_filter(&mut self, filter: FilterSpec) -> u64 {
        if filter != self.filter {
            self.filter = filter;
            self.changed();
        }
        self.generation
    }

    /// Edits the filter in place. Returns the new generation.
    pub fn update_filter<F: FnOnce(&mut FilterSpec)>(&mut self, edit: F) -> u64 {
        let mut filter = self.filter.clone();
        edit(&mut filter);
        self.set_filter(filter)
    }

    /// Clears the query and every facet.
    pub fn clear(&mut self) -> u64 {
        self.set_query(String::new());
        self.set_filter(FilterSpec::default())
    }

    /// Changes the page size, resolved against `config`, and returns to page 1.
    pub fn set_page_size(&mut self, requested: usize, config: &CatalogConfig) {
        let size = config.resolve_page_size(requested);
        if size != self.page_size {
            self.page_size = size;
            self.page = 1;
        }
    }

    /// Moves to `page`. Out-of-range pages are clamped when the page is read.
    pub fn go_to(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Marks cached results stale, e.g. after the catalog was rebuilt.
    pub fn invalidate(&mut self) -> u64 {
        self.changed();
        self.generation
    }

    /// True when `generation` is still the latest.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    fn changed(&mut self) {
        self.generation += 1;
        self.page = 1;
        self.results = None;
    }

    /// Planned results for the current query and filter.
    ///
    /// Planning runs at most once per generation.
    pub fn results(&mut self, catalog: &Catalog) -> &[DocId] {
        let generation = self.generation;
        let stale = self
            .results
            .as_ref()
            .map_or(true, |(planned, _)| *planned != generation);
        if stale {
            let docs = catalog.search(&self.query, &self.filter);
            self.results = Some((generation, docs));
        }
        match &self.results {
            Some((_, docs)) => docs,
            None => &[],
        }
    }

    /// The current page of results.
    pub fn page(&mut self, catalog: &Catalog) -> Page<'_, DocId> {
        let (page, size) = (self.page, self.page_size);
        paginate(self.results(catalog), size, page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{record, sample};
    use catalog_types::Record;

    fn big_catalog() -> Catalog {
        let records: Vec<Record> = (0..120)
            .map(|i| record(&format!("r{i}"), "Administración", "U", "Cali", 1))
            .collect();
        Catalog::build(records).unwrap()
    }

    #[test]
    fn query_change_resets_page_and_bumps_generation() {
        let config = CatalogConfig::default();
        let mut session = CatalogSession::new(&config);
        session.go_to(3);
        assert_eq!(session.requested_page(), 3);

        let g = session.set_query("software");
        assert_eq!(g, 1);
        assert_eq!(session.requested_page(), 1);

        // Same query again is not a change.
        assert_eq!(session.set_query("software"), 1);
    }

    #[test]
    fn filter_and_page_size_changes_reset_page() {
        let config = CatalogConfig::default();
        let mut session = CatalogSession::new(&config);

        session.go_to(2);
        session.update_filter(|f| f.city = "Cali".into());
        assert_eq!(session.requested_page(), 1);
        assert_eq!(session.generation(), 1);

        session.go_to(2);
        session.set_page_size(100, &config);
        assert_eq!(session.page_size(), 100);
        assert_eq!(session.requested_page(), 1);

        session.go_to(2);
        session.set_page_size(7, &config);
        assert_eq!(session.page_size(), 50);
        assert_eq!(session.requested_page(), 1);
    }

    #[test]
    fn stale_generations_are_detectable() {
        let mut session = CatalogSession::new(&CatalogConfig::default());
        let first = session.set_query("med");
        let second = session.set_query("medic");
        assert!(!session.is_current(first));
        assert!(session.is_current(second));
    }

    #[test]
    fn results_follow_state() {
        let catalog = Catalog::build(sample()).unwrap();
        let mut session = CatalogSession::new(catalog.config());
        assert_eq!(session.results(&catalog), [0, 1, 2]);

        session.set_query("software");
        assert_eq!(session.results(&catalog), [0, 2]);

        session.update_filter(|f| f.city = "Bogotá".into());
        assert_eq!(session.results(&catalog), [0, 2]);

        session.clear();
        assert_eq!(session.results(&catalog), [0, 1, 2]);
    }

    #[test]
    fn page_clamps_against_results() {
        let catalog = big_catalog();
        let mut session = CatalogSession::new(catalog.config());
        session.go_to(9);

        let page = session.page(&catalog);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 3);
        assert_eq!(page.items.len(), 20);
        assert_eq!(page.items[0], 100);
    }

    #[test]
    fn params_round_trip() {
        let config = CatalogConfig::default();
        let params = SearchParams::from_pairs([("q", "derecho"), ("page", "2")], &config);
        let session = CatalogSession::from_params(params.clone());
        assert_eq!(session.to_params(), params);
    }
}
