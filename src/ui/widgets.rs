//! Reusable UI widgets
//!
//! Contains common UI components:
//! - Popup dialogs (time's up, error, help)
//! - Input fields and buttons
//! - Flash message and status bar

use crate::ui::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render a centered popup dialog
pub fn render_popup(
    frame: &mut Frame,
    title: &str,
    content: Vec<Line>,
    buttons: &[(&str, &str)], // (label, key)
    theme: &Theme,
    area: Rect,
) {
    // Calculate popup size
    let popup_width = 48.min(area.width.saturating_sub(4));
    let popup_height = (content.len() as u16 + 6).min(area.height.saturating_sub(2));

    let popup_area = centered_rect(popup_width, popup_height, area);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused())
        .style(theme.text());

    frame.render_widget(block, popup_area);

    let inner = Rect {
        x: popup_area.x + 2,
        y: popup_area.y + 1,
        width: popup_area.width.saturating_sub(4),
        height: popup_area.height.saturating_sub(4),
    };

    let content_widget = Paragraph::new(content)
        .style(theme.text())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    frame.render_widget(content_widget, inner);

    // Render buttons at bottom
    if !buttons.is_empty() && popup_area.height >= 3 {
        let button_area = Rect {
            x: popup_area.x + 2,
            y: popup_area.y + popup_area.height - 2,
            width: popup_area.width.saturating_sub(4),
            height: 1,
        };

        let button_spans: Vec<Span> = buttons
            .iter()
            .enumerate()
            .flat_map(|(i, (label, key))| {
                let mut spans = key_hint(key, label, theme);
                if i < buttons.len() - 1 {
                    spans.push(Span::raw("    "));
                }
                spans
            })
            .collect();

        let buttons_widget = Paragraph::new(Line::from(button_spans))
            .alignment(Alignment::Center);
        frame.render_widget(buttons_widget, button_area);
    }
}

/// Render the blocking "time's up" notification
pub fn render_times_up_popup(frame: &mut Frame, finished_at: &str, theme: &Theme, area: Rect) {
    let content = vec![
        Line::raw(""),
        Line::styled(
            "⏰  Time's up!",
            theme.warning().add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled(format!("Finished at {}", finished_at), theme.text_dim()),
    ];

    render_popup(frame, "Countdown", content, &[("OK", "Enter")], theme, area);
}

/// Render an error popup
pub fn render_error_popup(
    frame: &mut Frame,
    title: &str,
    message: &str,
    theme: &Theme,
    area: Rect,
) {
    let content = vec![
        Line::raw(""),
        Line::styled(message, theme.error()),
        Line::raw(""),
    ];

    render_popup(frame, title, content, &[("OK", "o")], theme, area);
}

/// Render the key binding overview
pub fn render_help_popup(frame: &mut Frame, bindings: &[(&str, &str)], theme: &Theme, area: Rect) {
    let content: Vec<Line> = bindings
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{:>12}  ", key), Style::default().fg(theme.accent)),
                Span::styled(format!("{:<22}", action), theme.text()),
            ])
        })
        .collect();

    render_popup(frame, "Keys", content, &[("Close", "Esc")], theme, area);
}

/// Render a labelled numeric input field
pub fn render_input_field(
    frame: &mut Frame,
    label: &str,
    value: u32,
    focused: bool,
    theme: &Theme,
    area: Rect,
) {
    let (border, value_style) = if focused {
        (theme.border_focused(), theme.selected())
    } else {
        (theme.border(), theme.text())
    };

    let block = Block::default()
        .title(format!(" {} ", label))
        .title_style(if focused { theme.title() } else { theme.text_dim() })
        .borders(Borders::ALL)
        .border_style(border)
        .style(theme.block_style());

    let field = Paragraph::new(Line::styled(format!("{:02}", value), value_style))
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(field, area);
}

/// Build the spans for one button, greyed out when disabled
pub fn button_spans<'a>(key: &'a str, label: &'a str, enabled: bool, theme: &Theme) -> Vec<Span<'a>> {
    if enabled {
        key_hint(key, label, theme)
    } else {
        vec![
            Span::styled("[", theme.text_dim()),
            Span::styled(key, theme.button(false)),
            Span::styled("] ", theme.text_dim()),
            Span::styled(label, theme.button(false)),
        ]
    }
}

/// `[key] label`
fn key_hint<'a>(key: &'a str, label: &'a str, theme: &Theme) -> Vec<Span<'a>> {
    vec![
        Span::styled("[", theme.text_dim()),
        Span::styled(key, theme.button(true)),
        Span::styled("] ", theme.text_dim()),
        Span::styled(label, theme.text()),
    ]
}

/// Render a flash message (bottom of screen)
pub fn render_flash_message(
    frame: &mut Frame,
    message: &str,
    is_error: bool,
    theme: &Theme,
    area: Rect,
) {
    let style = if is_error { theme.error() } else { theme.success() };
    let prefix = if is_error { "✗ " } else { "✓ " };

    let flash_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    frame.render_widget(Clear, flash_area);
    let flash = Paragraph::new(Line::from(vec![
        Span::styled(prefix, style),
        Span::styled(message, style),
    ]))
    .style(theme.block_style());

    frame.render_widget(flash, flash_area);
}

/// Render status bar at bottom
pub fn render_status_bar(
    frame: &mut Frame,
    left_content: &str,
    right_content: &str,
    theme: &Theme,
    area: Rect,
) {
    let status_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    // Clear the line first
    frame.render_widget(Clear, status_area);

    let left_widget = Paragraph::new(left_content)
        .style(theme.text_dim());

    let right_len = right_content.chars().count() as u16;
    let right_area = Rect {
        x: status_area.x + status_area.width.saturating_sub(right_len + 1),
        y: status_area.y,
        width: (right_len + 1).min(status_area.width),
        height: 1,
    };
    let right_widget = Paragraph::new(right_content)
        .style(theme.text_dim());

    frame.render_widget(left_widget, status_area);
    frame.render_widget(right_widget, right_area);
}

/// Helper: Create a centered rect of given size, clipped to `area`
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect { x, y, width, height }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(40, 20, area);

        assert_eq!(popup.x, 30);
        assert_eq!(popup.y, 15);
        assert_eq!(popup.width, 40);
        assert_eq!(popup.height, 20);
    }

    #[test]
    fn test_centered_rect_clips_to_area() {
        let area = Rect::new(5, 5, 10, 4);
        let popup = centered_rect(40, 20, area);
        assert_eq!(popup, area);
    }

    #[test]
    fn test_disabled_button_uses_disabled_style() {
        let theme = Theme::light();
        let spans = button_spans("s", "Start", false, &theme);
        assert_eq!(spans[3].style, theme.button(false));

        let spans = button_spans("s", "Start", true, &theme);
        assert_eq!(spans[3].style, theme.text());
    }
}
