use crossterm::event::{KeyCode, KeyEvent};

use crate::model::roster::{ROSTER, TAGS};
use crate::ops::board::BoardCommand;
use crate::tui::app::{App, ConfirmAction, FormState, Mode, View};

use super::drag;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Tab => toggle_view(app),
        _ => match app.view {
            View::Board => handle_board_key(app, key),
            View::Metrics => handle_metrics_key(app, key),
        },
    }
}

fn toggle_view(app: &mut App) {
    app.view = match app.view {
        View::Board => {
            // Entering metrics re-derives the whole report, like a page load
            app.refresh_metrics();
            View::Metrics
        }
        View::Metrics => View::Board,
    };
}

fn handle_board_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => move_column(app, -1),
        KeyCode::Right | KeyCode::Char('l') => move_column(app, 1),
        KeyCode::Up | KeyCode::Char('k') => move_row(app, -1),
        KeyCode::Down | KeyCode::Char('j') => move_row(app, 1),
        KeyCode::Char('n') => {
            app.form = Some(FormState::new());
            app.mode = Mode::Form;
        }
        KeyCode::Char('d') | KeyCode::Delete => request_delete(app),
        KeyCode::Char(' ') | KeyCode::Enter => drag::pick_up(app),
        KeyCode::Char('p') => cycle_person_filter(app),
        KeyCode::Char('t') => cycle_tag_filter(app),
        KeyCode::Char('c') => {
            if app.filters.is_active() {
                app.dispatch(BoardCommand::ClearFilters);
                app.status_message = Some("filters cleared".to_string());
            }
        }
        _ => {}
    }
}

fn handle_metrics_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('r') {
        app.refresh_metrics();
        app.status_message = Some("metrics recomputed".to_string());
    }
}

fn move_column(app: &mut App, delta: isize) {
    let column = (app.selected_column as isize + delta).clamp(0, 2) as usize;
    if column != app.selected_column {
        app.selected_column = column;
        app.clamp_cursor();
    }
}

fn move_row(app: &mut App, delta: isize) {
    let len = app.columns()[app.selected_column.min(2)].cards.len();
    if len == 0 {
        return;
    }
    let row = (app.selected_row as isize + delta).clamp(0, len as isize - 1) as usize;
    app.selected_row = row;
}

fn request_delete(app: &mut App) {
    if let Some(card) = app.selected_card() {
        app.confirm = Some(ConfirmAction::DeleteTask {
            id: card.id,
            title: card.title,
        });
        app.mode = Mode::Confirm;
    }
}

/// Cycle the person filter: off → each roster member in order → off
fn cycle_person_filter(app: &mut App) {
    let next = match &app.filters.person {
        None => Some(ROSTER[0].name.to_string()),
        Some(current) => ROSTER
            .iter()
            .position(|p| p.name == current)
            .and_then(|i| ROSTER.get(i + 1))
            .map(|p| p.name.to_string()),
    };
    let message = match &next {
        Some(name) => format!("showing tasks for {}", name),
        None => "person filter off".to_string(),
    };
    app.dispatch(BoardCommand::SetPersonFilter(next));
    app.status_message = Some(message);
}

/// Cycle the tag filter: off → each tag in order → off
fn cycle_tag_filter(app: &mut App) {
    let next = match &app.filters.tag {
        None => Some(TAGS[0].to_string()),
        Some(current) => TAGS
            .iter()
            .position(|t| t == current)
            .and_then(|i| TAGS.get(i + 1))
            .map(|t| t.to_string()),
    };
    let message = match &next {
        Some(tag) => format!("showing #{} tasks", tag),
        None => "tag filter off".to_string(),
    };
    app.dispatch(BoardCommand::SetTagFilter(next));
    app.status_message = Some(message);
}
