use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::model::roster::{ROSTER, TAGS};
use crate::tui::app::{App, FormField, FormState};
use crate::tui::theme::Theme;

/// Render the new-task popup form
pub fn render_form_popup(frame: &mut Frame, app: &App, area: Rect) {
    let form = match &app.form {
        Some(form) => form,
        None => return,
    };

    let theme = &app.theme;
    let bg = theme.background;

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::default());

    // Title field (focused on open)
    lines.push(label_line(theme, "Title", form.field == FormField::Title));
    lines.push(text_field_line(
        theme,
        &form.title,
        form.title_cursor,
        form.field == FormField::Title,
    ));
    lines.push(Line::default());

    lines.push(label_line(
        theme,
        "Description",
        form.field == FormField::Description,
    ));
    lines.push(text_field_line(
        theme,
        &form.description,
        form.description_cursor,
        form.field == FormField::Description,
    ));
    lines.push(Line::default());

    lines.push(label_line(theme, "Assignee", form.field == FormField::Assignee));
    lines.push(assignee_line(theme, form));
    lines.push(Line::default());

    lines.push(label_line(theme, "Tags", form.field == FormField::Tags));
    lines.push(tags_line(theme, form));
    lines.push(Line::default());

    // Key hints
    lines.push(Line::from(vec![
        Span::styled("  ", Style::default().bg(bg)),
        Span::styled("Enter", Style::default().fg(theme.dim).bg(bg)),
        Span::styled(" create  ", Style::default().fg(theme.text).bg(bg)),
        Span::styled("Tab", Style::default().fg(theme.dim).bg(bg)),
        Span::styled(" next field  ", Style::default().fg(theme.text).bg(bg)),
        Span::styled("Esc", Style::default().fg(theme.dim).bg(bg)),
        Span::styled(" cancel", Style::default().fg(theme.text).bg(bg)),
    ]));

    let popup_w: u16 = 56.min(area.width.saturating_sub(2));
    let popup_h = ((lines.len() as u16) + 2).min(area.height.saturating_sub(2));
    let overlay = super::helpers::centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.highlight).bg(bg))
        .title(Span::styled(
            " New Task ",
            Style::default()
                .fg(theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, overlay);
}

fn label_line(theme: &Theme, label: &str, focused: bool) -> Line<'static> {
    let bg = theme.background;
    if focused {
        Line::from(vec![
            Span::styled("  \u{203A} ", Style::default().fg(theme.highlight).bg(bg)),
            Span::styled(
                label.to_string(),
                Style::default()
                    .fg(theme.highlight)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        Line::from(Span::styled(
            format!("    {}", label),
            Style::default().fg(theme.dim).bg(bg),
        ))
    }
}

fn text_field_line(theme: &Theme, text: &str, cursor: usize, focused: bool) -> Line<'static> {
    let bg = theme.background;
    let mut spans = vec![Span::styled("    ", Style::default().bg(bg))];
    if focused {
        let split = cursor.min(text.len());
        let (before, after) = text.split_at(split);
        spans.push(Span::styled(
            before.to_string(),
            Style::default().fg(theme.text_bright).bg(bg),
        ));
        spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(theme.highlight).bg(bg),
        ));
        spans.push(Span::styled(
            after.to_string(),
            Style::default().fg(theme.text_bright).bg(bg),
        ));
    } else {
        spans.push(Span::styled(
            text.to_string(),
            Style::default().fg(theme.text).bg(bg),
        ));
    }
    Line::from(spans)
}

fn assignee_line(theme: &Theme, form: &FormState) -> Line<'static> {
    let bg = theme.background;
    let name = form
        .assignee
        .and_then(|i| ROSTER.get(i))
        .map(|p| p.name)
        .unwrap_or("unassigned");
    let style = if form.assignee.is_some() {
        Style::default().fg(theme.text_bright).bg(bg)
    } else {
        Style::default()
            .fg(theme.dim)
            .bg(bg)
            .add_modifier(Modifier::ITALIC)
    };
    Line::from(vec![
        Span::styled("    \u{2039} ", Style::default().fg(theme.dim).bg(bg)),
        Span::styled(name.to_string(), style),
        Span::styled(" \u{203A}", Style::default().fg(theme.dim).bg(bg)),
    ])
}

fn tags_line(theme: &Theme, form: &FormState) -> Line<'static> {
    let bg = theme.background;
    let mut spans = vec![Span::styled("    ", Style::default().bg(bg))];
    for (i, tag) in TAGS.iter().enumerate() {
        let checked = form.tags_selected[i];
        let mut style = if checked {
            Style::default().fg(theme.tag_color(tag)).bg(bg)
        } else {
            Style::default().fg(theme.text).bg(bg)
        };
        if form.field == FormField::Tags && form.tag_cursor == i {
            style = style.bg(theme.selection_bg).add_modifier(Modifier::BOLD);
        }
        let mark = if checked { "x" } else { " " };
        spans.push(Span::styled(format!("[{}] {}", mark, tag), style));
        spans.push(Span::styled("  ", Style::default().bg(bg)));
    }
    Line::from(spans)
}
