//! Catalog records.
//!
//! A [`Record`] pairs one program with the institution offering it. Records
//! are immutable once loaded; institution aggregates such as
//! `total_program_count` arrive precomputed with the dataset.
//!
//! Serde field names are camelCase. The aliases accept the Spanish labels and
//! key names found in the raw institution datasets (`university`,
//! `tuitionCOPYear`, `"Maestría"`, ...).

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseLabelError;

/// One (institution, program) pairing: the unit of search and filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unique, stable identifier.
    pub id: String,
    /// Institution offering the program.
    #[serde(alias = "university")]
    pub institution: Institution,
    /// The program itself.
    pub program: Program,
}

impl Record {
    /// Raw text of one searchable field.
    ///
    /// Enum-valued fields yield their display label so that a query for
    /// "maestria" finds master's programs.
    #[must_use]
    pub fn field_text(&self, field: SearchField) -> &str {
        match field {
            SearchField::Title => &self.program.title,
            SearchField::Institution => &self.institution.name,
            SearchField::City => &self.institution.city,
            SearchField::Department => &self.institution.department,
            SearchField::Area => &self.program.area,
            SearchField::Level => self.program.level.label(),
            SearchField::Modality => self.program.modality.label(),
        }
    }
}

/// An institution and its precomputed aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Institution {
    /// Institution identifier (shared by all its programs).
    pub id: String,
    /// Display name.
    pub name: String,
    /// City of the main campus.
    #[serde(default)]
    pub city: String,
    /// Department or region.
    #[serde(default, alias = "dept")]
    pub department: String,
    /// Country.
    #[serde(default)]
    pub country: String,
    /// Catalog category. Absent in some datasets.
    #[serde(default)]
    pub category: Option<InstitutionCategory>,
    /// Free-form institution type ("Universidad", "Institución Técnica", ...).
    #[serde(default, rename = "type")]
    pub kind: String,
    /// Official registry code.
    #[serde(default)]
    pub institution_code: Option<String>,
    /// Number of programs this institution offers in the full dataset.
    #[serde(default, alias = "programCount")]
    pub total_program_count: u32,
    /// Explicitly marked as tuition-free.
    #[serde(default)]
    pub tuition_free: bool,
}

/// A program offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    /// Program title.
    pub title: String,
    /// Knowledge area.
    #[serde(default)]
    pub area: String,
    /// Academic level.
    pub level: Level,
    /// Delivery modality.
    pub modality: Modality,
    /// Nominal duration in months. Must be positive.
    pub duration_months: u32,
    /// Reference yearly tuition.
    #[serde(alias = "tuitionCOPYear")]
    pub tuition_year_amount: u64,
    /// Lower end of the yearly tuition, when published.
    #[serde(default, alias = "tuitionCOPYearMin")]
    pub tuition_year_min: Option<u64>,
    /// Upper end of the yearly tuition, when published.
    #[serde(default, alias = "tuitionCOPYearMax")]
    pub tuition_year_max: Option<u64>,
    /// Explicit price range, which overrides the yearly figures.
    #[serde(default, alias = "priceRangeCOP")]
    pub price_range: Option<PriceRange>,
    /// Free-form note attached to the tuition figure.
    #[serde(default)]
    pub tuition_note: Option<String>,
}

impl Program {
    /// Price band shown for this program.
    ///
    /// An explicit [`PriceRange`] wins. Otherwise the published yearly
    /// min/max are used, each falling back to ±10% of the reference amount.
    /// Without a tuition note the band is flagged as an estimate.
    #[must_use]
    pub fn tuition_band(&self) -> TuitionBand {
        if let Some(range) = self.price_range {
            return TuitionBand {
                min: range.min,
                max: range.max,
                billing_unit: range.billing_unit,
                estimated: false,
            };
        }

        let amount = self.tuition_year_amount;
        TuitionBand {
            min: self
                .tuition_year_min
                .unwrap_or_else(|| scale_rounded(amount, 9)),
            max: self
                .tuition_year_max
                .unwrap_or_else(|| scale_rounded(amount, 11)),
            billing_unit: BillingUnit::Year,
            estimated: self.tuition_note.is_none(),
        }
    }
}

/// `amount * tenths / 10`, rounded half up.
#[inline]
fn scale_rounded(amount: u64, tenths: u64) -> u64 {
    amount.saturating_mul(tenths).saturating_add(5) / 10
}

/// Explicit price range published for a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    /// Lowest price.
    pub min: u64,
    /// Highest price.
    pub max: u64,
    /// Period the price covers.
    #[serde(default, alias = "billing")]
    pub billing_unit: BillingUnit,
}

/// Displayable price band derived by [`Program::tuition_band`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TuitionBand {
    /// Lower bound.
    pub min: u64,
    /// Upper bound.
    pub max: u64,
    /// Period the band covers.
    pub billing_unit: BillingUnit,
    /// True when the band was derived rather than published.
    pub estimated: bool,
}

impl TuitionBand {
    /// True when the band collapses to a single price.
    #[inline]
    #[must_use]
    pub const fn is_exact(&self) -> bool {
        self.min == self.max
    }
}

/// Textual fields that feed the search index and the normalized text cache.
///
/// `#[repr(u8)]` keeps the tag one byte wide for packed storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum SearchField {
    /// Program title.
    Title = 0,
    /// Institution name.
    Institution = 1,
    /// Institution city.
    City = 2,
    /// Institution department or region.
    Department = 3,
    /// Program knowledge area.
    Area = 4,
    /// Program level label.
    Level = 5,
    /// Program modality label.
    Modality = 6,
}

impl SearchField {
    /// Every searchable field, in cache concatenation order.
    pub const ALL: [SearchField; 7] = [
        SearchField::Title,
        SearchField::Institution,
        SearchField::City,
        SearchField::Department,
        SearchField::Area,
        SearchField::Level,
        SearchField::Modality,
    ];
}

/// Enums that can be parsed from any of their known labels.
trait Labeled: Copy + 'static {
    const KIND: &'static str;
    const ALL: &'static [Self];

    /// Canonical key first, display label second, extra spellings after.
    fn names(self) -> &'static [&'static str];
}

fn parse_label<T: Labeled>(input: &str) -> Result<T, ParseLabelError> {
    let wanted = input.trim().to_lowercase();
    T::ALL
        .iter()
        .copied()
        .find(|v| v.names().iter().any(|n| n.to_lowercase() == wanted))
        .ok_or_else(|| ParseLabelError {
            kind: T::KIND,
            value: input.to_owned(),
        })
}

/// Institution category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstitutionCategory {
    /// Domestic institutions.
    #[serde(rename = "national", alias = "Nacional")]
    National,
    /// Institutions abroad.
    #[serde(rename = "international", alias = "Internacional")]
    International,
    /// Online learning platforms.
    #[serde(
        rename = "digital_platform",
        alias = "Plataformas Digitales",
        alias = "digital-platform"
    )]
    DigitalPlatform,
    /// Language schools and immersion programs.
    #[serde(
        rename = "language_immersion",
        alias = "Idiomas e Inmersión",
        alias = "Idiomas e Inmersion",
        alias = "language-immersion"
    )]
    LanguageImmersion,
}

impl InstitutionCategory {
    /// Every category, in navigation order.
    pub const ALL: [InstitutionCategory; 4] = [
        InstitutionCategory::National,
        InstitutionCategory::International,
        InstitutionCategory::DigitalPlatform,
        InstitutionCategory::LanguageImmersion,
    ];

    /// Display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        self.names()[1]
    }
}

impl Labeled for InstitutionCategory {
    const KIND: &'static str = "category";
    const ALL: &'static [Self] = &InstitutionCategory::ALL;

    fn names(self) -> &'static [&'static str] {
        match self {
            Self::National => &["national", "Nacional"],
            Self::International => &["international", "Internacional"],
            Self::DigitalPlatform => &[
                "digital_platform",
                "Plataformas Digitales",
                "digital-platform",
            ],
            Self::LanguageImmersion => &[
                "language_immersion",
                "Idiomas e Inmersión",
                "Idiomas e Inmersion",
                "language-immersion",
            ],
        }
    }
}

/// Academic level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    /// Technical professional.
    #[serde(rename = "technical", alias = "Técnico", alias = "Tecnico")]
    Technical,
    /// Technologist.
    #[serde(rename = "technologist", alias = "Tecnólogo", alias = "Tecnologo")]
    Technologist,
    /// Undergraduate degree.
    #[serde(rename = "undergraduate", alias = "Pregrado", alias = "Profesional")]
    Undergraduate,
    /// Graduate specialization.
    #[serde(
        rename = "specialization",
        alias = "Especialización",
        alias = "Especializacion"
    )]
    Specialization,
    /// Master's degree.
    #[serde(rename = "masters", alias = "Maestría", alias = "Maestria")]
    Masters,
    /// Doctorate.
    #[serde(rename = "doctorate", alias = "Doctorado")]
    Doctorate,
    /// Short course or diploma.
    #[serde(rename = "course", alias = "Curso", alias = "Diplomado")]
    Course,
    /// Any level the dataset names that is not listed above.
    #[serde(rename = "other", other)]
    Other,
}

impl Level {
    /// Every level.
    pub const ALL: [Level; 8] = [
        Level::Technical,
        Level::Technologist,
        Level::Undergraduate,
        Level::Specialization,
        Level::Masters,
        Level::Doctorate,
        Level::Course,
        Level::Other,
    ];

    /// Display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        self.names()[1]
    }
}

impl Labeled for Level {
    const KIND: &'static str = "level";
    const ALL: &'static [Self] = &Level::ALL;

    fn names(self) -> &'static [&'static str] {
        match self {
            Self::Technical => &["technical", "Técnico", "Tecnico"],
            Self::Technologist => &["technologist", "Tecnólogo", "Tecnologo"],
            Self::Undergraduate => &["undergraduate", "Pregrado", "Profesional"],
            Self::Specialization => &["specialization", "Especialización", "Especializacion"],
            Self::Masters => &["masters", "Maestría", "Maestria"],
            Self::Doctorate => &["doctorate", "Doctorado"],
            Self::Course => &["course", "Curso", "Diplomado"],
            Self::Other => &["other", "Otro"],
        }
    }
}

/// Delivery modality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modality {
    /// Classroom attendance.
    #[serde(rename = "on_site", alias = "Presencial")]
    OnSite,
    /// Fully online.
    #[serde(rename = "virtual", alias = "Virtual", alias = "Online")]
    Virtual,
    /// Mixed attendance.
    #[serde(
        rename = "hybrid",
        alias = "Híbrida",
        alias = "Híbrido",
        alias = "Hibrida",
        alias = "Hibrido"
    )]
    Hybrid,
    /// Distance learning with periodic sessions.
    #[serde(rename = "distance", alias = "A distancia", alias = "Distancia")]
    Distance,
}

impl Modality {
    /// Every modality.
    pub const ALL: [Modality; 4] = [
        Modality::OnSite,
        Modality::Virtual,
        Modality::Hybrid,
        Modality::Distance,
    ];

    /// Display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        self.names()[1]
    }
}

impl Labeled for Modality {
    const KIND: &'static str = "modality";
    const ALL: &'static [Self] = &Modality::ALL;

    fn names(self) -> &'static [&'static str] {
        match self {
            Self::OnSite => &["on_site", "Presencial"],
            Self::Virtual => &["virtual", "Virtual", "Online"],
            Self::Hybrid => &["hybrid", "Híbrida", "Híbrido", "Hibrida", "Hibrido"],
            Self::Distance => &["distance", "A distancia", "Distancia"],
        }
    }
}

/// Period a published price covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BillingUnit {
    /// Per academic year.
    #[default]
    #[serde(rename = "year", alias = "año", alias = "ano")]
    Year,
    /// Per month.
    #[serde(rename = "month", alias = "mes")]
    Month,
    /// For the whole course.
    #[serde(rename = "course", alias = "curso")]
    Course,
}

impl BillingUnit {
    /// Every billing unit.
    pub const ALL: [BillingUnit; 3] = [BillingUnit::Year, BillingUnit::Month, BillingUnit::Course];

    /// Display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        self.names()[1]
    }
}

impl Labeled for BillingUnit {
    const KIND: &'static str = "billing unit";
    const ALL: &'static [Self] = &BillingUnit::ALL;

    fn names(self) -> &'static [&'static str] {
        match self {
            Self::Year => &["year", "año", "ano"],
            Self::Month => &["month", "mes"],
            Self::Course => &["course", "curso"],
        }
    }
}

macro_rules! impl_label_traits {
    ($($ty:ty),+) => {
        $(
            impl FromStr for $ty {
                type Err = ParseLabelError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    parse_label(s)
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )+
    };
}

impl_label_traits!(InstitutionCategory, Level, Modality, BillingUnit);
