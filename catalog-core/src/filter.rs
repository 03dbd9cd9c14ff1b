//! Facet predicate evaluation.
//!
//! A [`FilterPredicate`] is prepared once per query from a [`FilterSpec`] and
//! then applied to every candidate record. All active facets are combined
//! with AND; an unset facet always passes.
//!
//! Tuition bounds are the one conditional facet: institutions that never
//! charge tuition pass them unconditionally, so a tuition range can never
//! hide a free provider.

use crate::analyzer::{contains_normalized, normalize, Tokenizer};
use catalog_types::{FilterSpec, Institution, Record, SearchField, DEFAULT_FREE_TUITION_MARKER};
use smallvec::SmallVec;

/// True when the words of `marker` appear as consecutive whole words of
/// `name`, both compared in normalized form.
///
/// "Servicio Nacional de Aprendizaje SENA" carries the marker `"sena"`;
/// "Enseñanza Superior" does not, although `"ensenanza"` contains it.
///
/// This is the same check rendering layers use to label free providers, so
/// filtering and labeling can never disagree.
pub fn is_free_provider(name: &str, marker: &str) -> bool {
    let marker = normalize(marker);
    has_marker(name, &marker)
}

/// True when tuition bounds do not apply to `institution`.
pub fn is_tuition_exempt(institution: &Institution, marker: &str) -> bool {
    institution.tuition_free || is_free_provider(&institution.name, marker)
}

fn words(normalized: &str) -> SmallVec<[&str; 8]> {
    let mut out = SmallVec::new();
    Tokenizer::new(SearchField::Institution).tokenize(normalized, |word, _, _| out.push(word));
    out
}

fn has_marker(name: &str, normalized_marker: &str) -> bool {
    let marker = words(normalized_marker);
    if marker.is_empty() {
        return false;
    }
    let name = normalize(name);
    let found = words(&name)
        .windows(marker.len())
        .any(|window| window == marker.as_slice());
    found
}

/// A [`FilterSpec`] prepared for repeated evaluation.
#[derive(Debug, Clone)]
pub struct FilterPredicate<'f> {
    spec: &'f FilterSpec,
    city_query: String,
    country_query: String,
    marker: String,
    tuition: (Option<u64>, Option<u64>),
    duration: (Option<u32>, Option<u32>),
}

impl<'f> FilterPredicate<'f> {
    /// Prepares `spec`, normalizing its substring facets and the free-provider
    /// marker up front.
    pub fn new(spec: &'f FilterSpec, free_tuition_marker: &str) -> Self {
        Self {
            spec,
            city_query: normalize(&spec.city_query),
            country_query: normalize(&spec.country_query),
            marker: normalize(free_tuition_marker),
            tuition: spec.tuition_bounds(),
            duration: spec.duration_bounds(),
        }
    }

    /// The spec this predicate evaluates.
    #[inline]
    pub fn spec(&self) -> &'f FilterSpec {
        self.spec
    }

    /// True when `record` satisfies every active facet.
    pub fn matches(&self, record: &Record) -> bool {
        let spec = self.spec;
        let institution = &record.institution;
        let program = &record.program;

        if spec.category.is_some() && institution.category != spec.category {
            return false;
        }
        if !spec.area.is_empty() && program.area != spec.area {
            return false;
        }
        if spec.level.is_some_and(|level| program.level != level) {
            return false;
        }
        if spec.modality.is_some_and(|modality| program.modality != modality) {
            return false;
        }
        if !spec.city.is_empty() && institution.city != spec.city {
            return false;
        }
        if !spec.country.is_empty() && institution.country != spec.country {
            return false;
        }
        if !self.city_query.is_empty()
            && !contains_normalized(&normalize(&institution.city), &self.city_query)
        {
            return false;
        }
        if !self.country_query.is_empty()
            && !contains_normalized(&normalize(&institution.country), &self.country_query)
        {
            return false;
        }
        if !spec.institution_type.is_empty() && institution.kind != spec.institution_type {
            return false;
        }

        if self.tuition != (None, None) && !self.is_exempt(institution) {
            let amount = program.tuition_year_amount;
            if self.tuition.0.is_some_and(|min| amount < min) {
                return false;
            }
            if self.tuition.1.is_some_and(|max| amount > max) {
                return false;
            }
        }

        let months = program.duration_months;
        if self.duration.0.is_some_and(|min| months < min) {
            return false;
        }
        if self.duration.1.is_some_and(|max| months > max) {
            return false;
        }

        true
    }

    #[inline]
    fn is_exempt(&self, institution: &Institution) -> bool {
        institution.tuition_free || has_marker(&institution.name, &self.marker)
    }
}

/// Evaluates `spec` against a single record using the default free-provider
/// marker.
///
/// Prefer [`FilterPredicate`] when filtering many records.
pub fn matches(record: &Record, spec: &FilterSpec) -> bool {
    FilterPredicate::new(spec, DEFAULT_FREE_TUITION_MARKER).matches(record)
}
