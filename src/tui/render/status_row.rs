use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode, View};

/// Render the status row (bottom of screen): last action message on the
/// left, key hints for the current mode on the right
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let hint = match (app.mode, app.view) {
        (Mode::Navigate, View::Board) => {
            "n new  enter pick up  d delete  p person  t tag  c clear  tab metrics  q quit"
        }
        (Mode::Navigate, View::Metrics) => "r recompute  tab board  q quit",
        (Mode::Drag, _) => "\u{2190}/\u{2192} target column  enter drop  esc cancel",
        (Mode::Form, _) => "tab field  enter create  esc close",
        (Mode::Confirm, _) => "y confirm  n cancel",
    };

    let message = app.status_message.as_deref().unwrap_or("");
    let mut spans = vec![Span::styled(
        format!(" {}", message),
        Style::default().fg(app.theme.text).bg(bg),
    )];

    let content_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let hint_width = hint.chars().count();
    if content_width + hint_width + 1 < width {
        let padding = width - content_width - hint_width - 1;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(
            hint,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
        spans.push(Span::styled(" ", Style::default().bg(bg)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
