use serde::Serialize;

use crate::app::query::{QueryState, QueryStatus};

/// One athlete as the panel shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AthleteRow {
    pub name: String,
    pub nationality: String,
    pub medal: String,
    pub event: String,
    pub year: String,
    pub result: String,
}

/// Messages shown above the result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelNotice {
    Loading,
    Error(String),
    NoAthletes,
}

/// Capitalise the first letter of every space separated token and lower-case
/// the rest: `"JOHN O'NEIL"` becomes `"John O'neil"`.
pub fn normalize_name(name: &str) -> String {
    name.split(' ')
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_rows(state: &QueryState) -> Vec<AthleteRow> {
    state
        .results
        .iter()
        .map(|athlete| AthleteRow {
            name: normalize_name(&athlete.name),
            nationality: athlete.nationality.clone(),
            medal: athlete.medal.clone(),
            event: athlete.event.clone(),
            year: athlete.year.clone(),
            result: athlete.result.clone(),
        })
        .collect()
}

pub fn panel_notices(state: &QueryState, city_open: bool) -> Vec<PanelNotice> {
    let mut notices = Vec::new();

    if state.status == QueryStatus::Loading {
        notices.push(PanelNotice::Loading);
    }
    if let Some(message) = &state.error_message {
        notices.push(PanelNotice::Error(message.clone()));
    }
    if city_open && state.status == QueryStatus::Success && state.results.is_empty() {
        notices.push(PanelNotice::NoAthletes);
    }

    notices
}

pub fn panel_title(open_city: Option<&str>) -> String {
    open_city.map_or_else(
        || "Click a city on the globe".to_string(),
        |city| format!("Athletes from {city}"),
    )
}

pub fn medal_label(code: &str) -> &str {
    match code {
        "G" => "Gold",
        "S" => "Silver",
        "B" => "Bronze",
        _ => code,
    }
}
