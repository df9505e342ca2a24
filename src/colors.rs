//! Colour constants and styling for console output.

use crossterm::style::{style, Color, Stylize};

use crate::task::TaskKind;

/// Used for code tasks
pub const CODE: Color = Color::Cyan;
/// Used for social tasks
pub const SOCIAL: Color = Color::Magenta;
/// Used for business tasks
pub const BUSINESS: Color = Color::Rgb { r: 255, g: 215, b: 0 };
/// Used for reported errors
pub const ERROR: Color = Color::Red;
/// Used for the input prompt and list headers
pub const ACCENT: Color = Color::DarkGreen;

/// Colour associated with a task kind.
pub fn kind_color(kind: &TaskKind) -> Color {
    match kind {
        TaskKind::Code { .. } => CODE,
        TaskKind::Social { .. } => SOCIAL,
        TaskKind::Business => BUSINESS,
    }
}

/// Applies colours when enabled, passes text through otherwise.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Palette { enabled }
    }

    pub fn paint(&self, text: &str, color: Color) -> String {
        if self.enabled {
            style(text).with(color).to_string()
        } else {
            text.to_string()
        }
    }
}
