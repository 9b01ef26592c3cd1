//! Command output rendering.
//!
//! Pretty output reuses the TUI panel builders so both front ends print
//! the same text; JSON output serializes the domain types directly.

use chrono::NaiveDate;
use ratatui::text::Line;
use serde::Serialize;

use petcare_core::{Pet, PetRegistry};
use petcare_tui::{TuiTheme, care_panel_lines, details_lines, overdue_lines, pet_list_items};

pub(crate) const NO_PETS_TEXT: &str = "No pets yet. Add one with `petcare add-pet`.";

fn plain(lines: &[Line<'_>]) -> String {
    lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

pub(crate) fn pet_list(registry: &PetRegistry) -> String {
    if registry.is_empty() {
        return NO_PETS_TEXT.to_string();
    }
    pet_list_items(registry).join("\n")
}

/// Details followed by the care panel, as the TUI shows them.
pub(crate) fn pet_report(pet: &Pet, today: NaiveDate, health_preview_limit: usize) -> String {
    let theme = TuiTheme::default_dark();
    let mut lines = details_lines(pet);
    lines.push(Line::from(""));
    lines.extend(care_panel_lines(Some(pet), today, health_preview_limit, &theme));
    plain(&lines).trim_end().to_string()
}

pub(crate) fn overdue_report(registry: &PetRegistry, today: NaiveDate) -> String {
    plain(&overdue_lines(registry, today, &TuiTheme::default_dark()))
}
