use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, View};

use super::helpers::spans_width;

/// Render the tab bar: view tabs + total counter, with separator line below
pub fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // separator
        ])
        .split(area);

    let sep_cols = render_tabs(frame, app, chunks[0]);
    render_separator(frame, app, chunks[1], &sep_cols);
}

/// Render tabs and return the column positions of each separator character.
fn render_tabs(frame: &mut Frame, app: &App, area: Rect) -> Vec<usize> {
    let bg = app.theme.background;
    let bg_style = Style::default().bg(bg);
    let mut spans: Vec<Span> = Vec::new();
    let mut sep_cols: Vec<usize> = Vec::new();
    let sep = Span::styled("\u{2502}", Style::default().fg(app.theme.dim).bg(bg));

    spans.push(Span::styled(" ", bg_style));
    spans.push(Span::styled(
        "\u{25A4}",
        Style::default().fg(app.theme.highlight).bg(bg),
    ));
    spans.push(Span::styled(" ", bg_style));

    spans.push(Span::styled(
        " Board ",
        tab_style(app, app.view == View::Board),
    ));
    sep_cols.push(spans_width(&spans));
    spans.push(sep.clone());

    spans.push(Span::styled(
        " Metrics ",
        tab_style(app, app.view == View::Metrics),
    ));
    sep_cols.push(spans_width(&spans));
    spans.push(sep);

    // Right-aligned grand total, recomputed from the full unfiltered
    // sequence on every render
    let total = app.counters().total;
    let counter = format!("{} task{} ", total, if total == 1 { "" } else { "s" });
    let width = area.width as usize;
    let used = spans_width(&spans);
    let counter_width = counter.chars().count();
    if used + counter_width < width {
        spans.push(Span::styled(" ".repeat(width - used - counter_width), bg_style));
        spans.push(Span::styled(
            counter,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    let tabs = Paragraph::new(Line::from(spans)).style(bg_style);
    frame.render_widget(tabs, area);
    sep_cols
}

fn render_separator(frame: &mut Frame, app: &App, area: Rect, sep_cols: &[usize]) {
    let width = area.width as usize;
    let bg = app.theme.background;
    let dim = app.theme.dim;

    // Active filters are surfaced on the right end of the separator
    let filter = &app.filters;
    let show_filter = app.view == View::Board && filter.is_active();

    let mut indicator_spans: Vec<Span> = Vec::new();
    if show_filter {
        indicator_spans.push(Span::styled(
            "filter: ",
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
        if let Some(person) = &filter.person {
            indicator_spans.push(Span::styled(
                person.clone(),
                Style::default().fg(app.theme.text_bright).bg(bg),
            ));
        }
        if let Some(tag) = &filter.tag {
            if filter.person.is_some() {
                indicator_spans.push(Span::styled(" ", Style::default().bg(bg)));
            }
            indicator_spans.push(Span::styled(
                format!("#{}", tag),
                Style::default().fg(app.theme.tag_color(tag)).bg(bg),
            ));
        }
    }

    let indicator_width = spans_width(&indicator_spans);
    // +2: one space before the indicator, one space right-edge buffer
    let separator_end = if indicator_width > 0 {
        width.saturating_sub(indicator_width + 2)
    } else {
        width
    };

    let mut sep_text = String::with_capacity(separator_end * 3);
    for col in 0..separator_end {
        if sep_cols.contains(&col) {
            sep_text.push('\u{2534}');
        } else {
            sep_text.push('\u{2500}');
        }
    }

    let mut spans: Vec<Span> = vec![Span::styled(sep_text, Style::default().fg(dim).bg(bg))];
    if indicator_width > 0 {
        spans.push(Span::styled(" ", Style::default().bg(bg)));
        spans.extend(indicator_spans);
        spans.push(Span::styled(" ", Style::default().bg(bg)));
    }

    let sep_widget = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(sep_widget, area);
}

/// Style for a tab: highlighted if current, normal otherwise
fn tab_style(app: &App, is_current: bool) -> Style {
    if is_current {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(app.theme.background)
    }
}
