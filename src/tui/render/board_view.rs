use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::ops::board::{CardModel, ColumnModel};
use crate::tui::app::{App, Mode};
use crate::tui::theme::Theme;
use crate::util::unicode;

/// Render the three-column board
pub fn render_board_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let columns = app.columns();
    let counts = app.counters();

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(area);

    for (i, column) in columns.iter().enumerate() {
        render_column(
            frame,
            app,
            column,
            counts.for_status(column.status),
            chunks[i],
            i,
        );
    }
}

fn render_column(
    frame: &mut Frame,
    app: &mut App,
    column: &ColumnModel,
    count: usize,
    area: Rect,
    col_idx: usize,
) {
    let bg = app.theme.background;
    let is_selected_col = col_idx == app.selected_column;
    let is_drop_target = app.mode == Mode::Drag
        && app.drag.as_ref().is_some_and(|d| d.target == column.status);
    let dragging_id = app.drag.as_ref().map(|d| d.task_id.clone());

    // The drop affordance is purely visual: a highlighted border on the
    // column the drag currently points at
    let border_style = if is_drop_target {
        Style::default()
            .fg(app.theme.drop_target)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else if is_selected_col && app.mode != Mode::Drag {
        Style::default().fg(app.theme.highlight).bg(bg)
    } else {
        Style::default().fg(app.theme.dim).bg(bg)
    };

    // Column headings always show the unfiltered count
    let title = Span::styled(
        format!(" {} {} ", column.status.label(), count),
        Style::default()
            .fg(app.theme.status_color(column.status))
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title)
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if column.cards.is_empty() {
        if app.filters.is_active() && count > 0 {
            let empty = Paragraph::new(" no matching tasks")
                .style(Style::default().fg(app.theme.dim).bg(bg));
            frame.render_widget(empty, inner);
        }
        return;
    }

    let width = inner.width as usize;
    let card_blocks: Vec<Vec<Line>> = column
        .cards
        .iter()
        .enumerate()
        .map(|(row, card)| {
            let selected =
                is_selected_col && row == app.selected_row && app.mode != Mode::Drag;
            let ghost = dragging_id.as_deref() == Some(card.id.as_str());
            card_lines(&app.theme, card, width, selected, ghost)
        })
        .collect();

    // Scroll by whole cards so the selected card stays fully visible
    let visible = inner.height as usize;
    let mut scroll = app.column_scroll[col_idx].min(column.cards.len() - 1);
    if is_selected_col {
        let sel = app.selected_row.min(column.cards.len() - 1);
        if sel < scroll {
            scroll = sel;
        }
        while scroll < sel {
            let used: usize = card_blocks[scroll..=sel]
                .iter()
                .map(|b| b.len() + 1)
                .sum::<usize>()
                - 1;
            if used <= visible {
                break;
            }
            scroll += 1;
        }
    }
    app.column_scroll[col_idx] = scroll;

    let mut lines: Vec<Line> = Vec::with_capacity(visible);
    'outer: for card in &card_blocks[scroll..] {
        for line in card {
            if lines.len() >= visible {
                break 'outer;
            }
            lines.push(line.clone());
        }
        if lines.len() >= visible {
            break;
        }
        lines.push(Line::default()); // spacer between cards
    }
    lines.truncate(visible);

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, inner);
}

/// Build the display lines for one card
fn card_lines(
    theme: &Theme,
    card: &CardModel,
    width: usize,
    selected: bool,
    ghost: bool,
) -> Vec<Line<'static>> {
    let bg = if selected { theme.selection_bg } else { theme.background };
    let body_fg = if ghost { theme.dim } else { theme.text };
    let mut lines: Vec<Line> = Vec::new();

    // Title row with the right-aligned display id
    let id_label = format!("#{}", card.short_id);
    let id_width = unicode::display_width(&id_label);
    let title_budget = width.saturating_sub(id_width + 3);
    let title = unicode::truncate_to_width(&card.title, title_budget);
    let mut title_style = Style::default().bg(bg).add_modifier(Modifier::BOLD);
    title_style = if ghost {
        title_style.fg(theme.dim).add_modifier(Modifier::ITALIC)
    } else {
        title_style.fg(theme.text_bright)
    };
    let title_width = unicode::display_width(&title);
    let pad = width.saturating_sub(title_width + id_width + 2);
    lines.push(Line::from(vec![
        Span::styled(" ".to_string(), Style::default().bg(bg)),
        Span::styled(title, title_style),
        Span::styled(" ".repeat(pad), Style::default().bg(bg)),
        Span::styled(id_label, Style::default().fg(theme.dim).bg(bg)),
        Span::styled(" ".to_string(), Style::default().bg(bg)),
    ]));

    if !card.description.is_empty() {
        let description = unicode::truncate_to_width(&card.description, width.saturating_sub(2));
        lines.push(Line::from(vec![
            Span::styled(" ".to_string(), Style::default().bg(bg)),
            Span::styled(description, Style::default().fg(theme.dim).bg(bg)),
        ]));
    }

    // Assignee row renders only for exact roster matches
    if let Some(person) = card.person {
        lines.push(Line::from(vec![
            Span::styled(" ".to_string(), Style::default().bg(bg)),
            Span::styled(
                format!("\u{25CF} {} ", person.initials),
                Style::default().fg(theme.person_color(person)).bg(bg),
            ),
            Span::styled(
                person.name.to_string(),
                Style::default().fg(body_fg).bg(bg),
            ),
        ]));
    }

    if !card.tags.is_empty() {
        let mut spans = vec![Span::styled(" ".to_string(), Style::default().bg(bg))];
        for tag in &card.tags {
            spans.push(Span::styled(
                format!("#{} ", tag),
                Style::default().fg(theme.tag_color(tag)).bg(bg),
            ));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(vec![
        Span::styled(" ".to_string(), Style::default().bg(bg)),
        Span::styled(
            card.created_label.clone(),
            Style::default().fg(theme.dim).bg(bg),
        ),
    ]));

    // Pad every line so the selection background covers the full width
    for line in &mut lines {
        let used: usize = line
            .spans
            .iter()
            .map(|s| unicode::display_width(&s.content))
            .sum();
        if used < width {
            line.spans.push(Span::styled(
                " ".repeat(width - used),
                Style::default().bg(bg),
            ));
        }
    }

    lines
}
