use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph,
    Row, Table,
};

use crate::ops::metrics::MetricsReport;
use crate::tui::app::App;
use crate::util::unicode;

/// Render the metrics dashboard: KPI row, three charts, aging table
pub fn render_metrics_view(frame: &mut Frame, app: &App, area: Rect) {
    let report = match &app.metrics {
        Some(report) => report,
        None => {
            let empty = Paragraph::new(" no metrics yet")
                .style(Style::default().fg(app.theme.dim).bg(app.theme.background));
            frame.render_widget(empty, area);
            return;
        }
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // KPI tiles
            Constraint::Min(10),   // charts
            Constraint::Length(9), // aging table
        ])
        .split(area);

    render_kpis(frame, app, report, chunks[0]);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(chunks[1]);
    render_burndown(frame, app, report, charts[0]);
    render_by_person(frame, app, report, charts[1]);
    render_by_status(frame, app, report, charts[2]);

    render_aging_table(frame, app, report, chunks[2]);
}

fn titled_block<'a>(app: &App, title: &'a str) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(app.theme.background))
        .title(Span::styled(
            title,
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.background),
        ))
        .style(Style::default().bg(app.theme.background))
}

fn render_kpis(frame: &mut Frame, app: &App, report: &MetricsReport, area: Rect) {
    let tiles = [
        ("Total", report.kpis.total.to_string()),
        ("Completed", report.kpis.completed.to_string()),
        ("Completion", format!("{}%", report.kpis.completion_rate)),
        ("Velocity", format!("{:.1}/day", report.kpis.velocity)),
    ];

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    for (chunk, (label, value)) in chunks.iter().zip(tiles) {
        let block = titled_block(app, label);
        let inner = block.inner(*chunk);
        frame.render_widget(block, *chunk);

        let value_line = Line::from(Span::styled(
            value,
            Style::default()
                .fg(app.theme.highlight)
                .bg(app.theme.background)
                .add_modifier(Modifier::BOLD),
        ));
        let paragraph = Paragraph::new(vec![Line::default(), value_line])
            .alignment(Alignment::Center)
            .style(Style::default().bg(app.theme.background));
        frame.render_widget(paragraph, inner);
    }
}

/// The burndown series is synthetic (no historical snapshots exist), but it
/// still gets a real line chart
fn render_burndown(frame: &mut Frame, app: &App, report: &MetricsReport, area: Rect) {
    let points: Vec<(f64, f64)> = report
        .burndown
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.remaining as f64))
        .collect();
    let max_y = report
        .burndown
        .iter()
        .map(|p| p.remaining)
        .max()
        .unwrap_or(0)
        .max(1);

    let datasets = vec![
        Dataset::default()
            .name("remaining")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(app.theme.warning))
            .data(&points),
    ];

    let first = report
        .burndown
        .first()
        .map(|p| p.label.clone())
        .unwrap_or_default();
    let last = report
        .burndown
        .last()
        .map(|p| p.label.clone())
        .unwrap_or_default();

    let axis_style = Style::default().fg(app.theme.dim).bg(app.theme.background);
    let chart = Chart::new(datasets)
        .block(titled_block(app, " Burndown, last 7 days "))
        .x_axis(
            Axis::default()
                .style(axis_style)
                .bounds([0.0, 6.0])
                .labels(vec![first, last]),
        )
        .y_axis(
            Axis::default()
                .style(axis_style)
                .bounds([0.0, max_y as f64])
                .labels(vec!["0".to_string(), max_y.to_string()]),
        )
        .style(Style::default().bg(app.theme.background));
    frame.render_widget(chart, area);
}

/// One bar per roster member, in roster order, free-text assignees excluded
fn render_by_person(frame: &mut Frame, app: &App, report: &MetricsReport, area: Rect) {
    let bars: Vec<Bar> = report
        .by_person
        .iter()
        .map(|pc| {
            Bar::default()
                .value(pc.count as u64)
                .label(Line::from(pc.person.initials))
                .style(
                    Style::default()
                        .fg(app.theme.person_color(pc.person))
                        .bg(app.theme.background),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(titled_block(app, " By person "))
        .data(BarGroup::default().bars(&bars))
        .bar_width(3)
        .bar_gap(2)
        .style(Style::default().bg(app.theme.background));
    frame.render_widget(chart, area);
}

/// The status distribution: a proportional bar per slice with its share
fn render_by_status(frame: &mut Frame, app: &App, report: &MetricsReport, area: Rect) {
    let bg = app.theme.background;
    let block = titled_block(app, " By status ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let mut lines: Vec<Line> = vec![Line::default()];
    for slice in &report.by_status {
        let color = app.theme.status_color(slice.status);
        let label = format!(" \u{25CF} {:<12}", slice.status.label());
        let figures = format!("{:>3}  {:>3}%  ", slice.count, slice.share);
        let used = unicode::display_width(&label) + unicode::display_width(&figures);
        let bar_budget = width.saturating_sub(used + 1);
        let bar_len = bar_budget * slice.share as usize / 100;

        lines.push(Line::from(vec![
            Span::styled(label, Style::default().fg(color).bg(bg)),
            Span::styled(
                figures,
                Style::default().fg(app.theme.text_bright).bg(bg),
            ),
            Span::styled(
                "\u{2588}".repeat(bar_len),
                Style::default().fg(color).bg(bg),
            ),
        ]));
        lines.push(Line::default());
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, inner);
}

fn render_aging_table(frame: &mut Frame, app: &App, report: &MetricsReport, area: Rect) {
    let bg = app.theme.background;
    let block = titled_block(app, " Oldest incomplete ");

    if report.oldest_incomplete.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let empty = Paragraph::new(" nothing pending, the board is clear")
            .style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, inner);
        return;
    }

    let dim_italic = Style::default()
        .fg(app.theme.dim)
        .bg(bg)
        .add_modifier(Modifier::ITALIC);

    let header = Row::new(["Task", "Assignee", "Status", "Days", "Tags"]).style(
        Style::default()
            .fg(app.theme.dim)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = report
        .oldest_incomplete
        .iter()
        .map(|row| {
            let assignee = if row.assignee.is_empty() {
                Cell::from(Span::styled("unassigned", dim_italic))
            } else {
                Cell::from(row.assignee.clone())
            };
            let days_style = if row.warning {
                Style::default()
                    .fg(app.theme.warning)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(app.theme.text).bg(bg)
            };
            let tags = if row.tags.is_empty() {
                Cell::from(Span::styled("no tags", dim_italic))
            } else {
                Cell::from(Line::from(
                    row.tags
                        .iter()
                        .map(|tag| {
                            Span::styled(
                                format!("#{} ", tag),
                                Style::default().fg(app.theme.tag_color(tag)).bg(bg),
                            )
                        })
                        .collect::<Vec<_>>(),
                ))
            };

            Row::new(vec![
                Cell::from(row.title.clone()),
                assignee,
                Cell::from(Span::styled(
                    row.status.label(),
                    Style::default().fg(app.theme.status_color(row.status)).bg(bg),
                )),
                Cell::from(Span::styled(format!("{}", row.days_active), days_style)),
                tags,
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(34),
            Constraint::Percentage(20),
            Constraint::Percentage(14),
            Constraint::Percentage(8),
            Constraint::Percentage(24),
        ],
    )
    .header(header)
    .column_spacing(1)
    .style(Style::default().fg(app.theme.text).bg(bg))
    .block(block);
    frame.render_widget(table, area);
}
