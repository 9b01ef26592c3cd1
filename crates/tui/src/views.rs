//! Panel content builders. Pure functions from domain state to styled lines.

use chrono::NaiveDate;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use petcare_core::{CareStatus, DATE_FORMAT, Pet, PetRegistry};

use crate::input_handler::KEY_BINDINGS;
use crate::state::{Mode, PetCareApp, StatusLevel};
use crate::theme::TuiTheme;

pub const APP_TITLE: &str = "🐾 Pet Care Management System 🐾";
pub const NO_OVERDUE_TEXT: &str = "No overdue tasks! Great job taking care of your pets! 🎉";

/// "3 days ago", or "in 2 days" for dates in the future.
pub fn days_ago_text(days: i64) -> String {
    if days < 0 {
        format!("in {} days", -days)
    } else {
        format!("{} days ago", days)
    }
}

pub fn title_line<'a>(app: &PetCareApp, theme: &TuiTheme) -> Line<'a> {
    let overdue = app.registry().all_overdue_tasks(app.today()).len();
    let overdue_style = if overdue > 0 {
        Style::default().fg(theme.danger)
    } else {
        Style::default().fg(theme.success)
    };
    Line::from(vec![
        Span::styled(
            format!(" {} ", APP_TITLE),
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} pets ", app.registry().len()),
            Style::default().fg(theme.text_base),
        ),
        Span::styled(format!(" {} overdue ", overdue), overdue_style),
        Span::styled(
            format!(" {} ", app.today().format(DATE_FORMAT)),
            Style::default().fg(theme.text_muted),
        ),
    ])
}

pub fn pet_list_items(registry: &PetRegistry) -> Vec<String> {
    registry.pets().iter().map(Pet::summary).collect()
}

/// Care tasks, requirements and recent health records of one pet.
pub fn care_panel_lines<'a>(
    pet: Option<&Pet>,
    today: NaiveDate,
    health_preview_limit: usize,
    theme: &TuiTheme,
) -> Vec<Line<'a>> {
    let Some(pet) = pet else {
        return vec![Line::from(Span::styled(
            "Select a pet to see its care tasks.",
            Style::default().fg(theme.text_muted),
        ))];
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format!("Care Tasks for {}:", pet.name),
            Style::default()
                .fg(theme.text_strong)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Care Requirements: {}", pet.care_requirements()),
            Style::default().fg(theme.text_base),
        )),
        Line::from(""),
    ];

    for (i, task) in pet.care_schedule.iter().enumerate() {
        let status = task.status(today);
        let status_color = match status {
            CareStatus::Done => theme.success,
            CareStatus::Overdue { .. } => theme.danger,
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}. {} (every {} days) - ", i + 1, task.task, task.frequency_days),
                Style::default().fg(theme.text_strong),
            ),
            Span::styled(status.label(), Style::default().fg(status_color)),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "   Last done: {} ({})",
                task.last_done.format(DATE_FORMAT),
                days_ago_text(task.days_since(today))
            ),
            Style::default().fg(theme.text_muted),
        )));
        lines.push(Line::from(""));
    }

    let records = pet.recent_health_records(health_preview_limit);
    if !records.is_empty() {
        lines.push(Line::from(Span::styled(
            "--- Health Records ---",
            Style::default().fg(theme.info).add_modifier(Modifier::BOLD),
        )));
        for record in records {
            lines.push(Line::from(format!(
                "📋 {}: {} - {}",
                record.date.format(DATE_FORMAT),
                record.kind,
                record.description
            )));
        }
    }
    lines
}

pub fn overdue_lines<'a>(registry: &PetRegistry, today: NaiveDate, theme: &TuiTheme) -> Vec<Line<'a>> {
    let overdue = registry.all_overdue_tasks(today);
    if overdue.is_empty() {
        return vec![Line::from(Span::styled(
            NO_OVERDUE_TEXT,
            Style::default().fg(theme.success),
        ))];
    }
    overdue
        .iter()
        .map(|task| {
            Line::from(Span::styled(
                format!(
                    "🚨 {}: {} (overdue by {} days)",
                    task.pet_name, task.task, task.days_overdue
                ),
                Style::default().fg(theme.warning),
            ))
        })
        .collect()
}

pub fn details_lines<'a>(pet: &Pet) -> Vec<Line<'a>> {
    vec![
        Line::from(format!("Name: {}", pet.name)),
        Line::from(format!("Type: {}", pet.kind_name())),
        Line::from(format!("Age: {}", pet.age)),
        Line::from(format!("Breed: {}", pet.breed)),
        Line::from(format!("Sound: {}", pet.sound())),
        Line::from(format!("Care Requirements: {}", pet.care_requirements())),
    ]
}

pub fn help_lines<'a>(theme: &TuiTheme) -> Vec<Line<'a>> {
    KEY_BINDINGS
        .iter()
        .map(|(keys, what)| {
            Line::from(vec![
                Span::styled(format!("{:>12}  ", keys), Style::default().fg(theme.primary)),
                Span::raw(*what),
            ])
        })
        .collect()
}

/// Key hints for the current mode, or the latest status message.
pub fn status_line<'a>(app: &PetCareApp, theme: &TuiTheme) -> Line<'a> {
    if let Some(status) = app.status() {
        let color = match status.level {
            StatusLevel::Info => theme.info,
            StatusLevel::Success => theme.success,
            StatusLevel::Warning => theme.warning,
            StatusLevel::Error => theme.danger,
        };
        return Line::from(Span::styled(
            format!(" {} ", status.text),
            Style::default().fg(color),
        ));
    }
    let hint = match app.mode() {
        Mode::Browse => " a add · x remove · Enter details · d done · t task · h health · F5 refresh · ? help · q quit ",
        Mode::Form(_) => " Tab next field · ←/→ change choice · Enter save · Esc cancel ",
        Mode::PickTask(_) => " ↑/↓ choose task · Enter mark done · Esc cancel ",
        Mode::ConfirmRemove { .. } => " y confirm · n cancel ",
        Mode::Details(_) | Mode::Help => " any key to close ",
    };
    Line::from(Span::styled(hint, Style::default().fg(theme.text_muted)))
}
