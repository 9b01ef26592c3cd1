//! Shared test helpers for TUI sub-module tests.

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::text::Line;

use petcare_core::{Pet, PetKind, PetRegistry, Species, parse_date};

use super::*;

pub fn day(s: &str) -> NaiveDate {
    parse_date(s).expect("valid test date")
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn ch(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}

pub fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

pub fn type_text(app: &mut PetCareApp, text: &str) {
    for c in text.chars() {
        app.handle_key(&ch(c));
    }
}

/// Rex, a dog with the default schedule from 2024-03-01, and Tom, an
/// indoor cat loaded without any tasks.
pub fn sample_registry() -> PetRegistry {
    let start = day("2024-03-01");
    let rex = Pet::new("Rex", 3, "Beagle", Species::Dog.default_kind(), start).expect("rex");
    let mut tom = Pet::new("Tom", 2, "", PetKind::Cat { indoor: true }, start).expect("tom");
    tom.care_schedule.clear();
    PetRegistry::from_pets(vec![rex, tom])
}

pub fn sample_app() -> PetCareApp {
    PetCareApp::new(sample_registry(), day("2024-03-01"), 3)
}

pub fn line_plain(line: &Line<'_>) -> String {
    line.spans
        .iter()
        .map(|s| s.content.as_ref())
        .collect::<String>()
}

pub fn lines_plain(lines: &[Line<'_>]) -> Vec<String> {
    lines.iter().map(line_plain).collect()
}
