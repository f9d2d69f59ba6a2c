//! Main rendering module
//!
//! Handles rendering the complete UI including:
//! - Header with the current theme
//! - Input fields, countdown readout and buttons
//! - Popups and overlays
//! - Status bar

use crate::app::{App, PopupState};
use crate::config::ThemeName;
use crate::types::{Field, RunState};
use crate::ui::widgets;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Key bindings shown in the help popup
pub const KEY_BINDINGS: &[(&str, &str)] = &[
    ("s", "Start"),
    ("p / Space", "Pause / Resume"),
    ("r", "Reset"),
    ("t", "Toggle theme"),
    ("Tab / ← →", "Switch field"),
    ("0-9", "Type into field"),
    ("Backspace", "Delete digit"),
    ("↑ ↓ / + -", "Adjust field"),
    ("?", "This help"),
    ("q", "Quit"),
];

/// Main render function - entry point for all UI rendering
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Paint the whole screen with the palette first
    frame.render_widget(Block::default().style(app.theme.block_style()), area);

    // Main layout: header, content, status bar
    let layout = Layout::vertical([
        Constraint::Length(2), // Header
        Constraint::Min(12),   // Timer
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_header(frame, app, layout[0]);
    render_timer(frame, app, layout[1]);
    render_status_bar(frame, app, layout[2]);

    // Render popup overlays (if any)
    render_popups(frame, app, area);
}

/// Render header with title and theme
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let header_block = Block::default()
        .style(theme.block_style())
        .title(" countdown ")
        .title_style(theme.title())
        .borders(Borders::BOTTOM)
        .border_style(theme.border());

    frame.render_widget(header_block, area);
}

/// Render the timer card: fields, readout, buttons
fn render_timer(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let card = widgets::centered_rect(44, 13, area);

    let block = Block::default()
        .style(theme.block_style())
        .borders(Borders::ALL)
        .border_style(theme.border());
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let rows = Layout::vertical([
        Constraint::Length(3), // Input fields
        Constraint::Length(1),
        Constraint::Length(1), // Readout
        Constraint::Length(1), // Run state
        Constraint::Length(1),
        Constraint::Length(1), // Controls
        Constraint::Length(1), // Theme toggle
        Constraint::Min(0),
    ])
    .split(inner);

    // Input fields: [ Minutes ] : [ Seconds ]
    let fields = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(14),
        Constraint::Length(3),
        Constraint::Length(14),
        Constraint::Min(0),
    ])
    .split(rows[0]);

    let countdown = app.timer.countdown();
    widgets::render_input_field(
        frame,
        Field::Minutes.label(),
        countdown.minutes(),
        app.focus == Field::Minutes,
        theme,
        fields[1],
    );
    let colon = Paragraph::new(vec![Line::raw(""), Line::styled(":", theme.text())])
        .alignment(Alignment::Center)
        .style(theme.block_style());
    frame.render_widget(colon, fields[2]);
    widgets::render_input_field(
        frame,
        Field::Seconds.label(),
        countdown.seconds(),
        app.focus == Field::Seconds,
        theme,
        fields[3],
    );

    // Readout
    let state = app.timer.state();
    let readout = Paragraph::new(Line::styled(countdown.to_string(), theme.readout(state)))
        .alignment(Alignment::Center);
    frame.render_widget(readout, rows[2]);

    let state_style = match state {
        RunState::Idle => theme.text_dim(),
        RunState::Running => theme.success(),
        RunState::Paused => theme.warning(),
    };
    let state_line = Paragraph::new(Line::styled(state.as_str(), state_style))
        .alignment(Alignment::Center);
    frame.render_widget(state_line, rows[3]);

    // Controls
    let mut controls: Vec<Span> = Vec::new();
    controls.extend(widgets::button_spans("s", "Start", app.timer.can_start(), theme));
    controls.push(Span::raw("  "));
    controls.extend(widgets::button_spans(
        "p",
        app.timer.pause_label(),
        app.timer.can_pause(),
        theme,
    ));
    controls.push(Span::raw("  "));
    controls.extend(widgets::button_spans("r", "Reset", true, theme));

    let controls_widget = Paragraph::new(Line::from(controls))
        .alignment(Alignment::Center)
        .style(theme.block_style());
    frame.render_widget(controls_widget, rows[5]);

    let toggle_label = match app.preference.current() {
        ThemeName::Light => "🌙 Dark mode",
        ThemeName::Dark => "🌞 Light mode",
    };
    let toggle = Paragraph::new(Line::from(widgets::button_spans("t", toggle_label, true, theme)))
        .alignment(Alignment::Center)
        .style(theme.block_style());
    frame.render_widget(toggle, rows[6]);
}

/// Render status bar with keybindings
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hints = "[s] Start  [p] Pause  [r] Reset  [t] Theme  [?] Help  [q] Quit";
    let right = format!("{} theme", app.preference.current().as_str());
    widgets::render_status_bar(frame, hints, &right, &app.theme, area);
}

/// Render popups if active
fn render_popups(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    match &app.popup {
        PopupState::None => {}

        PopupState::TimesUp { finished_at } => {
            widgets::render_times_up_popup(frame, finished_at, theme, area);
        }

        PopupState::Error { title, message } => {
            widgets::render_error_popup(frame, title, message, theme, area);
        }

        PopupState::Help => {
            widgets::render_help_popup(frame, KEY_BINDINGS, theme, area);
        }
    }

    // Flash message (success/error feedback)
    if let Some((msg, is_error, _)) = &app.flash_message {
        widgets::render_flash_message(frame, msg, *is_error, theme, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::storage::MemoryStore;
    use crate::types::Countdown;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::{Duration, Instant};

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app_with(initial: Countdown) -> App {
        App::new(Config::default(), Box::new(MemoryStore::new()), initial).unwrap()
    }

    #[test]
    fn test_renders_readout_and_buttons() {
        let app = app_with(Countdown::new(3, 5));
        let text = screen_text(&app);

        assert!(text.contains("03:05"));
        assert!(text.contains("Start"));
        assert!(text.contains("Pause"));
        assert!(text.contains("Idle"));
    }

    #[test]
    fn test_renders_times_up_popup() {
        let t0 = Instant::now();
        let mut app = app_with(Countdown::new(0, 1));
        app.timer.start(t0);
        app.update(t0 + Duration::from_secs(1));

        let text = screen_text(&app);
        assert!(text.contains("Time's up!"));
    }

    #[test]
    fn test_renders_in_tiny_terminal() {
        let app = app_with(Countdown::ZERO);
        let mut terminal = Terminal::new(TestBackend::new(10, 5)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();
    }
}
