//! The loaded dataset and everything derived from it.

use rustc_hash::FxHashMap;

use crate::facets;
use crate::index::{IndexStats, RecordIndex};
use crate::planner;
use catalog_types::{CatalogConfig, CatalogError, DocId, FilterSpec, Record, Result};

/// An immutable, searchable catalog.
///
/// Built once per dataset load. A new dataset means a new `Catalog`; swapping
/// the value replaces records, text cache and index together, so readers
/// never see a mix of old and new.
#[derive(Debug)]
pub struct Catalog {
    records: Vec<Record>,
    texts: Vec<String>,
    index: RecordIndex,
    by_id: FxHashMap<String, DocId>,
    config: CatalogConfig,
}

impl Catalog {
    /// Builds a catalog with the default configuration.
    ///
    /// # Errors
    ///
    /// See [`Catalog::with_config`].
    pub fn build(records: Vec<Record>) -> Result<Self> {
        Self::with_config(records, CatalogConfig::default())
    }

    /// Validates `records` and indexes them under `config`.
    ///
    /// An empty dataset is valid and yields an empty catalog.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidConfig`] if `config` fails validation
    /// - [`CatalogError::TooManyRecords`] if the dataset exceeds the id space
    /// - [`CatalogError::MalformedRecord`] for a blank id, a blank title or a
    ///   zero duration
    /// - [`CatalogError::DuplicateId`] if two records share an id
    pub fn with_config(records: Vec<Record>, config: CatalogConfig) -> Result<Self> {
        config.validate()?;

        let max = DocId::MAX as usize;
        if records.len() > max {
            return Err(CatalogError::TooManyRecords {
                count: records.len(),
                max,
            });
        }

        let mut by_id = FxHashMap::default();
        by_id.reserve(records.len());
        for (doc, record) in records.iter().enumerate() {
            check_record(record)?;
            if by_id.insert(record.id.clone(), doc as DocId).is_some() {
                return Err(CatalogError::DuplicateId(record.id.clone()));
            }
        }

        let built = RecordIndex::build(&records, &config.indexed_fields, config.max_candidates);
        let stats = built.index.stats();
        tracing::info!(
            records = stats.num_records,
            terms = stats.num_terms,
            postings = stats.total_postings,
            bytes = stats.memory_usage_bytes(),
            "catalog built"
        );

        Ok(Self {
            records,
            texts: built.texts,
            index: built.index,
            by_id,
            config,
        })
    }

    /// Number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the catalog holds no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in dataset order.
    #[inline]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// The record behind `doc`.
    ///
    /// # Panics
    ///
    /// If `doc` did not come from this catalog.
    #[inline]
    pub fn record(&self, doc: DocId) -> &Record {
        &self.records[doc as usize]
    }

    /// Normalized searchable text of `doc`.
    #[inline]
    pub fn text(&self, doc: DocId) -> &str {
        &self.texts[doc as usize]
    }

    /// Looks a record up by its id.
    pub fn get(&self, id: &str) -> Option<&Record> {
        self.doc_id(id).map(|doc| self.record(doc))
    }

    /// The `DocId` of the record with `id`.
    pub fn doc_id(&self, id: &str) -> Option<DocId> {
        self.by_id.get(id).copied()
    }

    /// The underlying index.
    #[inline]
    pub fn index(&self) -> &RecordIndex {
        &self.index
    }

    /// Configuration the catalog was built with.
    #[inline]
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Index statistics.
    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }

    /// Records matching `query` and `filter`, in dataset order.
    ///
    /// See [`planner::plan`].
    pub fn search(&self, query: &str, filter: &FilterSpec) -> Vec<DocId> {
        planner::plan(self, query, filter)
    }

    /// Record ids for `docs`.
    pub fn ids(&self, docs: &[DocId]) -> Vec<&str> {
        docs.iter().map(|&doc| self.record(doc).id.as_str()).collect()
    }

    /// Records for `docs`.
    pub fn hydrate<'c>(&'c self, docs: &'c [DocId]) -> impl Iterator<Item = &'c Record> + 'c {
        docs.iter().map(move |&doc| self.record(doc))
    }

    /// Distinct cities, sorted.
    pub fn distinct_cities(&self) -> Vec<&str> {
        facets::distinct_cities(&self.records)
    }

    /// Distinct countries, sorted.
    pub fn distinct_countries(&self) -> Vec<&str> {
        facets::distinct_countries(&self.records)
    }

    /// Distinct knowledge areas, sorted.
    pub fn distinct_areas(&self) -> Vec<&str> {
        facets::distinct_areas(&self.records)
    }
}

fn check_record(record: &Record) -> Result<()> {
    let reason = if record.id.trim().is_empty() {
        "blank id"
    } else if record.program.title.trim().is_empty() {
        "blank program title"
    } else if record.program.duration_months == 0 {
        "zero duration"
    } else {
        return Ok(());
    };
    Err(CatalogError::MalformedRecord {
        id: record.id.clone(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{record, sample};

    #[test]
    fn builds_and_looks_up() {
        let catalog = Catalog::build(sample()).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.doc_id("B"), Some(1));
        assert_eq!(catalog.get("C").unwrap().program.title, "SENA Técnico en Software");
        assert!(catalog.get("Z").is_none());
        assert_eq!(catalog.stats().num_records, 3);
    }

    #[test]
    fn empty_dataset_is_valid() {
        let catalog = Catalog::build(Vec::new()).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.search("", &FilterSpec::new()).is_empty());
        assert!(catalog.search("software", &FilterSpec::new()).is_empty());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut records = sample();
        records[2].id = "A".to_owned();
        assert_eq!(
            Catalog::build(records).unwrap_err(),
            CatalogError::DuplicateId("A".to_owned())
        );
    }

    #[test]
    fn rejects_malformed_records() {
        let mut records = sample();
        records[1].program.duration_months = 0;
        assert!(matches!(
            Catalog::build(records),
            Err(CatalogError::MalformedRecord { ref id, reason: "zero duration" }) if id == "B"
        ));

        let records = vec![record(" ", "Derecho", "U", "Cali", 1)];
        assert!(matches!(
            Catalog::build(records),
            Err(CatalogError::MalformedRecord { reason: "blank id", .. })
        ));

        let records = vec![record("X", "", "U", "Cali", 1)];
        assert!(Catalog::build(records).is_err());
    }

    #[test]
    fn rejects_invalid_config() {
        let config = CatalogConfig {
            max_candidates: 0,
            ..CatalogConfig::default()
        };
        assert!(matches!(
            Catalog::with_config(sample(), config),
            Err(CatalogError::InvalidConfig(_))
        ));
    }

    #[test]
    fn ids_and_hydrate_preserve_order() {
        let catalog = Catalog::build(sample()).unwrap();
        let docs = catalog.search("bogota", &FilterSpec::new());
        assert_eq!(catalog.ids(&docs), ["A", "C"]);
        let titles: Vec<&str> = catalog
            .hydrate(&docs)
            .map(|r| r.program.title.as_str())
            .collect();
        assert_eq!(titles, ["Ingeniería de Software", "SENA Técnico en Software"]);
    }

    #[test]
    fn facet_lists() {
        let catalog = Catalog::build(sample()).unwrap();
        assert_eq!(catalog.distinct_cities(), ["Bogotá", "Medellín"]);
        assert_eq!(catalog.distinct_countries(), ["Colombia"]);
        assert!(catalog.distinct_areas().is_empty());
    }
}
