//! Deep-link parameter parsing.
//!
//! Parsing fails open: an unknown key, an unknown enum label, or a number
//! that does not parse is skipped, leaving that facet unset. A bad link
//! therefore shows more results, never an error page.

use std::str::FromStr;

use catalog_types::{CatalogConfig, FilterSpec, InstitutionCategory};

/// Query, facets and page position decoded from link parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Free-text query, unnormalized.
    pub query: String,
    /// Facet filter.
    pub filter: FilterSpec,
    /// Requested 1-based page.
    pub page: usize,
    /// Requested page size, resolved against the configured sizes.
    pub page_size: usize,
}

impl SearchParams {
    /// Defaults for `config`: no query, no facets, first page.
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            query: String::new(),
            filter: FilterSpec::default(),
            page: 1,
            page_size: config.default_page_size,
        }
    }

    /// Decodes `(key, value)` pairs.
    ///
    /// Recognized keys: `q`, `cat` (or `category`), `area`, `level`,
    /// `modality`, `city`, `country`, `city_q`, `country_q`, `type`,
    /// `min_tuition`, `max_tuition`, `min_months`, `max_months`, `page` and
    /// `page_size`. Later pairs override earlier ones.
    pub fn from_pairs<I, K, V>(pairs: I, config: &CatalogConfig) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = Self::new(config);
        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref().trim());
            if value.is_empty() {
                continue;
            }
            if !params.apply(key, value, config) {
                tracing::debug!(key, value, "ignoring search parameter");
            }
        }
        params
    }

    fn apply(&mut self, key: &str, value: &str, config: &CatalogConfig) -> bool {
        let filter = &mut self.filter;
        match key {
            "q" => self.query = value.to_owned(),
            "cat" | "category" => {
                // An unknown category clears any earlier one.
                filter.category = InstitutionCategory::from_str(value).ok();
                return filter.category.is_some();
            }
            "area" => filter.area = value.to_owned(),
            "level" => return set_parsed(&mut filter.level, value),
            "modality" => return set_parsed(&mut filter.modality, value),
            "city" => filter.city = value.to_owned(),
            "country" => filter.country = value.to_owned(),
            "city_q" => filter.city_query = value.to_owned(),
            "country_q" => filter.country_query = value.to_owned(),
            "type" => filter.institution_type = value.to_owned(),
            "min_tuition" => return set_number(&mut filter.min_tuition, value),
            "max_tuition" => return set_positive(&mut filter.max_tuition, value),
            "min_months" => return set_number(&mut filter.min_duration_months, value),
            "max_months" => return set_positive(&mut filter.max_duration_months, value),
            "page" => return set_positive(&mut self.page, value),
            "page_size" => {
                let Ok(requested) = value.parse() else {
                    return false;
                };
                self.page_size = config.resolve_page_size(requested);
                return self.page_size == requested;
            }
            _ => return false,
        }
        true
    }

    /// Encodes the non-default parameters back into link pairs.
    ///
    /// Strings are trimmed and unset bounds are omitted. For params produced
    /// by [`SearchParams::from_pairs`], decoding the output yields `self`
    /// again; hand-built values such as `page: 0` or padded facet strings
    /// come back in their normalized form.
    pub fn to_pairs(&self, config: &CatalogConfig) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let f = &self.filter;

        push_str(&mut pairs, "q", &self.query);
        if let Some(category) = f.category {
            pairs.push(("cat", category.label().to_owned()));
        }
        push_str(&mut pairs, "area", &f.area);
        if let Some(level) = f.level {
            pairs.push(("level", level.label().to_owned()));
        }
        if let Some(modality) = f.modality {
            pairs.push(("modality", modality.label().to_owned()));
        }
        push_str(&mut pairs, "city", &f.city);
        push_str(&mut pairs, "country", &f.country);
        push_str(&mut pairs, "city_q", &f.city_query);
        push_str(&mut pairs, "country_q", &f.country_query);
        push_str(&mut pairs, "type", &f.institution_type);

        let (min_tuition, max_tuition) = f.tuition_bounds();
        if let Some(min) = min_tuition {
            pairs.push(("min_tuition", min.to_string()));
        }
        if let Some(max) = max_tuition {
            pairs.push(("max_tuition", max.to_string()));
        }
        let (min_months, max_months) = f.duration_bounds();
        if let Some(min) = min_months {
            pairs.push(("min_months", min.to_string()));
        }
        if let Some(max) = max_months {
            pairs.push(("max_months", max.to_string()));
        }

        if self.page > 1 {
            pairs.push(("page", self.page.to_string()));
        }
        if self.page_size != config.default_page_size {
            pairs.push(("page_size", self.page_size.to_string()));
        }
        pairs
    }
}

fn push_str(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        pairs.push((key, value.to_owned()));
    }
}

fn set_parsed<T: FromStr>(slot: &mut Option<T>, value: &str) -> bool {
    match value.parse() {
        Ok(parsed) => {
            *slot = Some(parsed);
            true
        }
        Err(_) => false,
    }
}

/// Like [`set_number`], but zero is rejected: a zero maximum or page means
/// "unset" and leaves the default in place.
fn set_positive<T: FromStr + Default + PartialEq>(slot: &mut T, value: &str) -> bool {
    match value.parse() {
        Ok(parsed) if parsed != T::default() => {
            *slot = parsed;
            true
        }
        _ => false,
    }
}

fn set_number<T: FromStr>(slot: &mut T, value: &str) -> bool {
    match value.parse() {
        Ok(parsed) => {
            *slot = parsed;
            true
        }
        Err(_) => false,
    }
}
