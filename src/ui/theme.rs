//! Theme definitions for countdown
//!
//! Provides the two built-in palettes: Light and Dark.
//! Each palette defines colors for all UI elements; every block is painted
//! on `bg`, so switching palettes restyles the whole screen.

use crate::config::ThemeName;
use crate::preferences::ApplyTheme;
use crate::types::RunState;
use ratatui::style::{Color, Modifier, Style};

/// Complete theme with all required colors
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub fg_dim: Color,

    // Accent colors
    pub accent: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // UI element colors
    pub border: Color,
    pub border_focused: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
}

impl Theme {
    /// Create a theme from a theme name
    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Light => Self::light(),
            ThemeName::Dark => Self::dark(),
        }
    }

    /// Light theme (default)
    pub fn light() -> Self {
        Self {
            // Base
            bg: Color::Rgb(250, 250, 250),        // #fafafa
            fg: Color::Rgb(33, 33, 33),           // #212121
            fg_dim: Color::Rgb(117, 117, 117),    // #757575

            // Accent (blue)
            accent: Color::Rgb(25, 118, 210),     // #1976d2

            // Status
            success: Color::Rgb(56, 142, 60),     // #388e3c
            warning: Color::Rgb(245, 124, 0),     // #f57c00
            error: Color::Rgb(211, 47, 47),       // #d32f2f

            // UI elements
            border: Color::Rgb(189, 189, 189),    // #bdbdbd
            border_focused: Color::Rgb(25, 118, 210), // #1976d2
            selection_bg: Color::Rgb(227, 242, 253), // #e3f2fd
            selection_fg: Color::Rgb(13, 71, 161),   // #0d47a1
        }
    }

    /// Dark theme
    pub fn dark() -> Self {
        Self {
            // Base
            bg: Color::Rgb(40, 40, 40),           // #282828
            fg: Color::Rgb(235, 219, 178),        // #ebdbb2
            fg_dim: Color::Rgb(146, 131, 116),    // #928374

            // Accent (orange)
            accent: Color::Rgb(254, 128, 25),     // #fe8019

            // Status
            success: Color::Rgb(184, 187, 38),    // #b8bb26
            warning: Color::Rgb(250, 189, 47),    // #fabd2f
            error: Color::Rgb(251, 73, 52),       // #fb4934

            // UI elements
            border: Color::Rgb(80, 73, 69),       // #504945
            border_focused: Color::Rgb(168, 153, 132), // #a89984
            selection_bg: Color::Rgb(80, 73, 69), // #504945
            selection_fg: Color::Rgb(235, 219, 178), // #ebdbb2
        }
    }

    // Style helpers for common UI patterns

    /// Background fill for blocks
    pub fn block_style(&self) -> Style {
        Style::default().bg(self.bg)
    }

    /// Default text style
    pub fn text(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Dimmed text style
    pub fn text_dim(&self) -> Style {
        Style::default().fg(self.fg_dim).bg(self.bg)
    }

    /// Title/header style
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Focused input field
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.selection_fg)
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Border style (unfocused)
    pub fn border(&self) -> Style {
        Style::default().fg(self.border).bg(self.bg)
    }

    /// Border style (focused)
    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.border_focused).bg(self.bg)
    }

    /// Button label, greyed out when the action is unavailable
    pub fn button(&self, enabled: bool) -> Style {
        if enabled {
            Style::default()
                .fg(self.accent)
                .bg(self.bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(self.border)
                .bg(self.bg)
                .add_modifier(Modifier::CROSSED_OUT)
        }
    }

    /// Countdown readout, colored by run state
    pub fn readout(&self, state: RunState) -> Style {
        let fg = match state {
            RunState::Idle => self.fg,
            RunState::Running => self.success,
            RunState::Paused => self.warning,
        };
        Style::default().fg(fg).bg(self.bg).add_modifier(Modifier::BOLD)
    }

    /// Success message style
    pub fn success(&self) -> Style {
        Style::default().fg(self.success).bg(self.bg)
    }

    /// Warning message style
    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning).bg(self.bg)
    }

    /// Error message style
    pub fn error(&self) -> Style {
        Style::default().fg(self.error).bg(self.bg)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl ApplyTheme for Theme {
    fn apply_theme(&mut self, theme: ThemeName) {
        *self = Theme::from_name(theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_name() {
        let light = Theme::from_name(ThemeName::Light);
        assert_eq!(light.bg, Color::Rgb(250, 250, 250));

        let dark = Theme::from_name(ThemeName::Dark);
        assert_eq!(dark.bg, Color::Rgb(40, 40, 40));
    }

    #[test]
    fn test_apply_theme_swaps_palette() {
        let mut theme = Theme::default();
        theme.apply_theme(ThemeName::Dark);
        assert_eq!(theme, Theme::dark());
    }

    #[test]
    fn test_disabled_button_is_dimmed() {
        let theme = Theme::dark();
        assert_eq!(theme.button(true).fg, Some(theme.accent));
        assert_eq!(theme.button(false).fg, Some(theme.border));
    }
}
