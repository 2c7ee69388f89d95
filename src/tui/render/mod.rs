pub mod board_view;
pub mod confirm_popup;
pub mod form_popup;
pub mod helpers;
pub mod metrics_view;
pub mod status_row;
pub mod tab_bar;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::{App, Mode, View};

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: tab bar (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // tab bar + separator
            Constraint::Min(1),    // content area
            Constraint::Length(1), // status row
        ])
        .split(area);

    tab_bar::render_tab_bar(frame, app, chunks[0]);

    match app.view {
        View::Board => board_view::render_board_view(frame, app, chunks[1]),
        View::Metrics => metrics_view::render_metrics_view(frame, app, chunks[1]),
    }

    // Popups are rendered on top of everything
    if app.mode == Mode::Form {
        form_popup::render_form_popup(frame, app, frame.area());
    }
    if app.mode == Mode::Confirm {
        confirm_popup::render_confirm_popup(frame, app, frame.area());
    }

    status_row::render_status_row(frame, app, chunks[2]);
}
