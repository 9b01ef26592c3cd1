//! Frame rendering: main panels plus the modal dialogs.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};

use crate::forms::{Form, TaskPicker};
use crate::layout_manager::{centered_rect, screen_areas};
use crate::state::{Mode, PetCareApp};
use crate::theme::TuiTheme;
use crate::views::*;

fn panel<'a>(title: &'a str, theme: &TuiTheme, active: bool) -> Block<'a> {
    let border = if active {
        theme.border_active
    } else {
        theme.border_normal
    };
    Block::default()
        .title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
}

pub fn draw(frame: &mut Frame, app: &PetCareApp, theme: &TuiTheme) {
    let areas = screen_areas(frame.area());
    let browsing = matches!(app.mode(), Mode::Browse);

    frame.render_widget(
        Paragraph::new(title_line(app, theme)).style(Style::default().bg(theme.bar_bg)),
        areas.title,
    );

    let items: Vec<ListItem> = pet_list_items(app.registry())
        .into_iter()
        .map(ListItem::new)
        .collect();
    let list = List::new(items)
        .block(panel("My Pets", theme, browsing))
        .highlight_style(
            Style::default()
                .bg(theme.selection_bg)
                .fg(theme.text_strong)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");
    let mut list_state = ListState::default().with_selected(app.selected_index());
    frame.render_stateful_widget(list, areas.pets, &mut list_state);

    let care = care_panel_lines(
        app.selected_pet(),
        app.today(),
        app.health_preview_limit(),
        theme,
    );
    frame.render_widget(
        Paragraph::new(Text::from(care))
            .block(panel("Care Tasks", theme, false))
            .wrap(Wrap { trim: false })
            .scroll((app.care_scroll(), 0)),
        areas.care,
    );

    frame.render_widget(
        Paragraph::new(Text::from(overdue_lines(app.registry(), app.today(), theme)))
            .block(panel("⚠️ Overdue Tasks", theme, false))
            .wrap(Wrap { trim: false }),
        areas.overdue,
    );

    frame.render_widget(
        Paragraph::new(status_line(app, theme)).style(Style::default().bg(theme.bar_bg)),
        areas.status,
    );

    match app.mode() {
        Mode::Browse => {}
        Mode::Form(form) => draw_form(frame, form, theme),
        Mode::PickTask(picker) => draw_picker(frame, picker, theme),
        Mode::ConfirmRemove { name, .. } => {
            let lines = vec![
                Line::from(format!("Are you sure you want to remove {}?", name)),
                Line::from(""),
                Line::from(Span::styled(
                    "[y] Yes    [n] No",
                    Style::default().fg(theme.warning),
                )),
            ];
            draw_popup(frame, "Confirm", lines, 50, theme);
        }
        Mode::Details(pet_id) => {
            if let Some(pet) = app.registry().get(*pet_id) {
                let title = format!("Details for {}", pet.name);
                draw_popup(frame, &title, details_lines(pet), 64, theme);
            }
        }
        Mode::Help => draw_popup(frame, "Keys", help_lines(theme), 46, theme),
    }
}

/// Bordered popup sized to its content, drawn over whatever is below.
fn draw_popup(frame: &mut Frame, title: &str, lines: Vec<Line<'_>>, width: u16, theme: &TuiTheme) {
    // wrapped lines may need more rows than lines.len()
    let inner_width = width.saturating_sub(2).max(1) as usize;
    let rows: usize = lines
        .iter()
        .map(|l| l.width().div_ceil(inner_width).max(1))
        .sum();
    let area = centered_rect(width, rows as u16 + 2, frame.area());
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .block(panel(title, theme, true))
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn form_lines<'a>(form: &Form, theme: &TuiTheme) -> Vec<Line<'a>> {
    let mut lines: Vec<Line<'a>> = form
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let focused = i == form.focus;
            let label_style = if focused {
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text_base)
            };
            let value = if field.is_choice() {
                format!("◀ {} ▶", field.display())
            } else if focused {
                format!("{}▏", field.display())
            } else {
                field.display().to_string()
            };
            Line::from(vec![
                Span::styled(format!("{:<18} ", field.label), label_style),
                Span::styled(value, Style::default().fg(theme.text_strong)),
            ])
        })
        .collect();
    if let Some(error) = &form.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(theme.danger),
        )));
    }
    lines
}

fn draw_form(frame: &mut Frame, form: &Form, theme: &TuiTheme) {
    draw_popup(frame, &form.title, form_lines(form, theme), 56, theme);
}

fn draw_picker(frame: &mut Frame, picker: &TaskPicker, theme: &TuiTheme) {
    let title = format!("Mark Task as Done - {}", picker.pet_name);
    let height = picker.items.len() as u16 + 2;
    let area: Rect = centered_rect(48, height, frame.area());
    let items: Vec<ListItem> = picker.items.iter().cloned().map(ListItem::new).collect();
    let list = List::new(items)
        .block(panel(&title, theme, true))
        .highlight_style(
            Style::default()
                .bg(theme.selection_bg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");
    let mut state = ListState::default().with_selected(Some(picker.selected));
    frame.render_widget(Clear, area);
    frame.render_stateful_widget(list, area, &mut state);
}
