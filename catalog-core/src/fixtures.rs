//! Record builders shared by unit tests.

use catalog_types::{Institution, InstitutionCategory, Level, Modality, Program, Record};

pub(crate) fn record(id: &str, title: &str, institution: &str, city: &str, tuition: u64) -> Record {
    Record {
        id: id.to_owned(),
        institution: Institution {
            id: format!("inst-{institution}"),
            name: institution.to_owned(),
            city: city.to_owned(),
            department: String::new(),
            country: "Colombia".to_owned(),
            category: Some(InstitutionCategory::National),
            kind: "Universidad".to_owned(),
            institution_code: None,
            total_program_count: 1,
            tuition_free: false,
        },
        program: Program {
            title: title.to_owned(),
            area: String::new(),
            level: Level::Undergraduate,
            modality: Modality::OnSite,
            duration_months: 48,
            tuition_year_amount: tuition,
            tuition_year_min: None,
            tuition_year_max: None,
            price_range: None,
            tuition_note: None,
        },
    }
}

/// The three-record dataset: A and C in Bogotá, B in Medellín, C free.
pub(crate) fn sample() -> Vec<Record> {
    vec![
        record(
            "A",
            "Ingeniería de Software",
            "Universidad Nacional",
            "Bogotá",
            8_000_000,
        ),
        record("B", "Medicina", "Universidad de Antioquia", "Medellín", 15_000_000),
        record(
            "C",
            "SENA Técnico en Software",
            "Servicio Nacional de Aprendizaje SENA",
            "Bogotá",
            0,
        ),
    ]
}
