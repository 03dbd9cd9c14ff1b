//! Facet filter specification.

use serde::{Deserialize, Serialize};

use crate::record::{InstitutionCategory, Level, Modality};

/// Structured facet filter.
///
/// Every facet defaults to "no constraint": empty strings, `None` enums,
/// zero minimums and unbounded maximums. A numeric bound of zero is also
/// treated as unset, so a zeroed spec and [`FilterSpec::default`] behave
/// identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterSpec {
    /// Exact institution category.
    pub category: Option<InstitutionCategory>,
    /// Exact knowledge area.
    pub area: String,
    /// Exact program level.
    pub level: Option<Level>,
    /// Exact delivery modality.
    pub modality: Option<Modality>,
    /// Exact city.
    pub city: String,
    /// Exact country.
    pub country: String,
    /// Accent-insensitive substring of the city.
    pub city_query: String,
    /// Accent-insensitive substring of the country.
    pub country_query: String,
    /// Exact institution type.
    #[serde(rename = "type")]
    pub institution_type: String,
    /// Minimum yearly tuition (0 = unset).
    pub min_tuition: u64,
    /// Maximum yearly tuition (0 or [`FilterSpec::UNBOUNDED_TUITION`] = unset).
    pub max_tuition: u64,
    /// Minimum duration in months (0 = unset).
    #[serde(alias = "minDurationMonths")]
    pub min_duration_months: u32,
    /// Maximum duration in months (0 or [`FilterSpec::UNBOUNDED_MONTHS`] = unset).
    #[serde(alias = "maxDurationMonths")]
    pub max_duration_months: u32,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            category: None,
            area: String::new(),
            level: None,
            modality: None,
            city: String::new(),
            country: String::new(),
            city_query: String::new(),
            country_query: String::new(),
            institution_type: String::new(),
            min_tuition: 0,
            max_tuition: Self::UNBOUNDED_TUITION,
            min_duration_months: 0,
            max_duration_months: Self::UNBOUNDED_MONTHS,
        }
    }
}

impl FilterSpec {
    /// Sentinel for an unset tuition maximum.
    pub const UNBOUNDED_TUITION: u64 = u64::MAX;
    /// Sentinel for an unset duration maximum.
    pub const UNBOUNDED_MONTHS: u32 = u32::MAX;

    /// A spec with every facet unset.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Active tuition bounds as `(min, max)`.
    #[inline]
    #[must_use]
    pub fn tuition_bounds(&self) -> (Option<u64>, Option<u64>) {
        (
            lower_bound(self.min_tuition),
            upper_bound(self.max_tuition, Self::UNBOUNDED_TUITION),
        )
    }

    /// Active duration bounds as `(min, max)`.
    #[inline]
    #[must_use]
    pub fn duration_bounds(&self) -> (Option<u32>, Option<u32>) {
        (
            lower_bound(self.min_duration_months),
            upper_bound(self.max_duration_months, Self::UNBOUNDED_MONTHS),
        )
    }

    /// True when no facet constrains anything.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.category.is_none()
            && self.area.is_empty()
            && self.level.is_none()
            && self.modality.is_none()
            && self.city.is_empty()
            && self.country.is_empty()
            && self.city_query.trim().is_empty()
            && self.country_query.trim().is_empty()
            && self.institution_type.is_empty()
            && self.tuition_bounds() == (None, None)
            && self.duration_bounds() == (None, None)
    }

    /// Sets the category facet.
    #[must_use]
    pub fn with_category(mut self, category: InstitutionCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Sets the area facet.
    #[must_use]
    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = area.into();
        self
    }

    /// Sets the level facet.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    /// Sets the modality facet.
    #[must_use]
    pub fn with_modality(mut self, modality: Modality) -> Self {
        self.modality = Some(modality);
        self
    }

    /// Sets the exact city facet.
    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    /// Sets the exact country facet.
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    /// Sets the city substring facet.
    #[must_use]
    pub fn with_city_query(mut self, query: impl Into<String>) -> Self {
        self.city_query = query.into();
        self
    }

    /// Sets the country substring facet.
    #[must_use]
    pub fn with_country_query(mut self, query: impl Into<String>) -> Self {
        self.country_query = query.into();
        self
    }

    /// Sets the institution type facet.
    #[must_use]
    pub fn with_institution_type(mut self, kind: impl Into<String>) -> Self {
        self.institution_type = kind.into();
        self
    }

    /// Sets the minimum tuition.
    #[must_use]
    pub fn with_min_tuition(mut self, min: u64) -> Self {
        self.min_tuition = min;
        self
    }

    /// Sets the maximum tuition.
    #[must_use]
    pub fn with_max_tuition(mut self, max: u64) -> Self {
        self.max_tuition = max;
        self
    }

    /// Sets the minimum duration in months.
    #[must_use]
    pub fn with_min_duration(mut self, months: u32) -> Self {
        self.min_duration_months = months;
        self
    }

    /// Sets the maximum duration in months.
    #[must_use]
    pub fn with_max_duration(mut self, months: u32) -> Self {
        self.max_duration_months = months;
        self
    }
}

#[inline(always)]
fn lower_bound<T: PartialEq + Default>(value: T) -> Option<T> {
    (value != T::default()).then_some(value)
}

#[inline(always)]
fn upper_bound<T: PartialEq + Default>(value: T, unbounded: T) -> Option<T> {
    (value != T::default() && value != unbounded).then_some(value)
}
