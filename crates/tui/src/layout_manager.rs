//! Layout manager: screen regions and popup placement.

use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};

/// Height of the overdue panel, borders included.
pub const OVERDUE_PANEL_HEIGHT: u16 = 7;

/// Below this width the pet list and care panel stack vertically.
pub const NARROW_WIDTH: u16 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub title: Rect,
    pub pets: Rect,
    pub care: Rect,
    pub overdue: Rect,
    pub status: Rect,
}

pub fn screen_areas(area: Rect) -> ScreenAreas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(6),
            Constraint::Length(OVERDUE_PANEL_HEIGHT),
            Constraint::Length(1),
        ])
        .split(area);
    let (pets, care) = body_split(rows[1]);
    ScreenAreas {
        title: rows[0],
        pets,
        care,
        overdue: rows[2],
        status: rows[3],
    }
}

/// Pet list beside the care panel, or above it on narrow terminals.
pub fn body_split(area: Rect) -> (Rect, Rect) {
    let (direction, constraints) = if area.width < NARROW_WIDTH {
        (
            Direction::Vertical,
            [Constraint::Percentage(35), Constraint::Percentage(65)],
        )
    } else {
        (
            Direction::Horizontal,
            [Constraint::Percentage(40), Constraint::Percentage(60)],
        )
    };
    let chunks = Layout::default()
        .direction(direction)
        .constraints(constraints)
        .split(area);
    (chunks[0], chunks[1])
}

/// A `width` x `height` rectangle centred in `area`, shrunk to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}
