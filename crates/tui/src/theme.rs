//! Colour palette shared by every panel.

use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct TuiTheme {
    pub text_strong: Color,
    pub text_base: Color,
    pub text_muted: Color,
    pub primary: Color,
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub info: Color,
    pub border_normal: Color,
    pub border_active: Color,
    pub selection_bg: Color,
    pub bar_bg: Color,
}

impl TuiTheme {
    pub fn default_dark() -> Self {
        Self {
            text_strong: Color::White,
            text_base: Color::Gray,
            text_muted: Color::DarkGray,
            primary: Color::Cyan,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
            info: Color::Blue,
            border_normal: Color::DarkGray,
            border_active: Color::Cyan,
            selection_bg: Color::Rgb(40, 60, 80),
            bar_bg: Color::Rgb(30, 30, 30),
        }
    }
}

impl Default for TuiTheme {
    fn default() -> Self {
        Self::default_dark()
    }
}
