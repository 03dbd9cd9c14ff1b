//! Query planning: text search, guard, facet filter.
//!
//! The planner is pure and reentrant. It holds no state between calls, so
//! invoking it on every keystroke is safe; coalescing rapid invocations is
//! the caller's business (see [`CatalogConfig::debounce_ms`]).
//!
//! [`CatalogConfig::debounce_ms`]: catalog_types::CatalogConfig::debounce_ms

use crate::analyzer::{contains_normalized, normalize, query_tokens};
use crate::catalog::Catalog;
use crate::filter::FilterPredicate;
use catalog_types::{DocId, FilterSpec};

/// Resolves `query` and `filter` to matching records in dataset order.
///
/// 1. The query is normalized. A blank query selects every record.
/// 2. Otherwise the index supplies candidates, and each candidate must also
///    contain every query token in its normalized text. Candidates failing
///    this check are dropped.
/// 3. Candidates are visited in dataset order and kept when the facet
///    predicate accepts them.
///
/// The result is deterministic: identical inputs give identical output.
pub fn plan(catalog: &Catalog, query: &str, filter: &FilterSpec) -> Vec<DocId> {
    let normalized = normalize(query);
    let predicate = FilterPredicate::new(filter, &catalog.config().free_tuition_marker);

    let results: Vec<DocId> = if normalized.is_empty() {
        (0..catalog.len() as DocId)
            .filter(|&doc| predicate.matches(catalog.record(doc)))
            .collect()
    } else {
        let tokens = query_tokens(&normalized);
        // Index output is already ascending by DocId, i.e. dataset order.
        catalog
            .index()
            .search(&normalized)
            .into_iter()
            .filter(|&doc| {
                let text = catalog.text(doc);
                tokens.iter().all(|token| contains_normalized(text, token))
            })
            .filter(|&doc| predicate.matches(catalog.record(doc)))
            .collect()
    };

    if !normalized.is_empty() {
        tracing::debug!(
            query = %normalized,
            results = results.len(),
            category = ?filter.category,
            city = %filter.city,
            "search"
        );
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample;
    use catalog_types::CatalogConfig;

    fn catalog() -> Catalog {
        Catalog::build(sample()).unwrap()
    }

    fn ids(catalog: &Catalog, docs: &[DocId]) -> Vec<String> {
        docs.iter()
            .map(|&d| catalog.record(d).id.clone())
            .collect()
    }

    #[test]
    fn text_query_with_budget_keeps_free_provider() {
        let catalog = catalog();
        let filter = FilterSpec::new()
            .with_min_tuition(5_000_000)
            .with_max_tuition(10_000_000);
        let docs = plan(&catalog, "software", &filter);
        assert_eq!(ids(&catalog, &docs), ["A", "C"]);
    }

    #[test]
    fn budget_alone_keeps_free_provider() {
        let catalog = catalog();
        let filter = FilterSpec::new().with_max_tuition(10_000_000);
        let docs = plan(&catalog, "software", &filter);
        assert_eq!(ids(&catalog, &docs), ["A", "C"]);
    }

    #[test]
    fn blank_query_tiny_budget_leaves_free_provider() {
        let catalog = catalog();
        let filter = FilterSpec::new().with_max_tuition(1);
        assert_eq!(ids(&catalog, &plan(&catalog, "", &filter)), ["C"]);
    }

    #[test]
    fn every_token_of_a_long_query_counts() {
        let catalog = catalog();
        let present = "ingenieria de software universidad nacional bogota pregrado presencial";
        // Sixteen distinct tokens A contains, then one it does not.
        let tokens: Vec<String> = present
            .split(' ')
            .chain(["soft", "ing", "univ", "nac", "bog", "pre", "pres", "softw"])
            .map(str::to_owned)
            .collect();
        let query = format!("{} veterinaria", tokens.join(" "));
        assert!(plan(&catalog, &query, &FilterSpec::new()).is_empty());

        let query = tokens.join(" ");
        assert_eq!(ids(&catalog, &plan(&catalog, &query, &FilterSpec::new())), ["A"]);
    }

    #[test]
    fn unicode_punctuation_does_not_hide_words() {
        let mut records = sample();
        records[0].program.title = "Inglés–Español".to_owned();
        records[1].program.title = "Diseño “Software”".to_owned();
        let catalog = Catalog::build(records).unwrap();

        assert_eq!(ids(&catalog, &plan(&catalog, "espanol", &FilterSpec::new())), ["A"]);
        assert_eq!(
            ids(&catalog, &plan(&catalog, "software", &FilterSpec::new())),
            ["B", "C"]
        );
        assert_eq!(
            ids(&catalog, &plan(&catalog, "¿medellín?", &FilterSpec::new())),
            ["B"]
        );
    }

    #[test]
    fn city_filter_narrows_text_results() {
        let catalog = catalog();
        let filter = FilterSpec::new().with_city("Bogotá");
        let docs = plan(&catalog, "sena", &filter);
        assert_eq!(ids(&catalog, &docs), ["C"]);
    }

    #[test]
    fn accent_insensitive_query() {
        let catalog = catalog();
        let docs = plan(&catalog, "MEDELLÍN", &FilterSpec::new());
        assert_eq!(ids(&catalog, &docs), ["B"]);
    }

    #[test]
    fn blank_query_selects_all_in_order() {
        let catalog = catalog();
        assert_eq!(plan(&catalog, "", &FilterSpec::new()), [0, 1, 2]);
        assert_eq!(plan(&catalog, "  \t ", &FilterSpec::new()), [0, 1, 2]);
    }

    #[test]
    fn blank_query_still_filters() {
        let catalog = catalog();
        let filter = FilterSpec::new().with_city_query("bogota");
        assert_eq!(plan(&catalog, "", &filter), [0, 2]);
    }

    #[test]
    fn repeated_plans_are_identical() {
        let catalog = catalog();
        let filter = FilterSpec::new().with_max_tuition(9_000_000);
        let first = plan(&catalog, "soft", &filter);
        for _ in 0..5 {
            assert_eq!(plan(&catalog, "soft", &filter), first);
        }
    }

    #[test]
    fn unmatched_query_is_empty() {
        let catalog = catalog();
        assert!(plan(&catalog, "veterinaria", &FilterSpec::new()).is_empty());
    }

    #[test]
    fn custom_marker_drives_exemption() {
        let mut records = sample();
        records[1].institution.name = "Fundación Gratuita".to_owned();
        records[2].program.tuition_year_amount = 2_000_000;
        let config = CatalogConfig {
            free_tuition_marker: "gratuita".to_owned(),
            ..CatalogConfig::default()
        };
        let catalog = Catalog::with_config(records, config).unwrap();
        let filter = FilterSpec::new().with_max_tuition(1_000_000);
        // SENA no longer exempt, the renamed institution is.
        assert_eq!(ids(&catalog, &plan(&catalog, "", &filter)), ["B"]);
    }
}
