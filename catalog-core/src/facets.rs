//! Facet value lists derived from the dataset.

use std::collections::BTreeSet;

use catalog_types::Record;

fn distinct<'r, F>(records: &'r [Record], field: F) -> Vec<&'r str>
where
    F: Fn(&'r Record) -> &'r str,
{
    records
        .iter()
        .map(field)
        .filter(|value| !value.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct non-empty institution cities, sorted.
pub fn distinct_cities(records: &[Record]) -> Vec<&str> {
    distinct(records, |r| r.institution.city.as_str())
}

/// Distinct non-empty institution countries, sorted.
pub fn distinct_countries(records: &[Record]) -> Vec<&str> {
    distinct(records, |r| r.institution.country.as_str())
}

/// Distinct non-empty knowledge areas, sorted.
pub fn distinct_areas(records: &[Record]) -> Vec<&str> {
    distinct(records, |r| r.program.area.as_str())
}
