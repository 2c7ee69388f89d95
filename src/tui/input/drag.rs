use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::board::BoardCommand;
use crate::tui::app::{App, DragState, Mode};

/// idle → dragging: capture the card under the cursor. The drag session
/// carries both the task id and a snapshot of the card.
pub(super) fn pick_up(app: &mut App) {
    let card = match app.selected_card() {
        Some(card) => card,
        None => return,
    };
    let from = app.selected_status();
    app.drag = Some(DragState {
        task_id: card.id.clone(),
        card,
        from,
        target: from,
    });
    app.mode = Mode::Drag;
}

pub(super) fn handle_drag(app: &mut App, key: KeyEvent) {
    match key.code {
        // Dragging over a column only changes the highlighted drop target
        KeyCode::Left | KeyCode::Char('h') => retarget(app, -1),
        KeyCode::Right | KeyCode::Char('l') => retarget(app, 1),
        // Drop: write the target status and return to idle
        KeyCode::Enter | KeyCode::Char(' ') => drop_card(app),
        // Abandoned drag: back to idle with no effect
        KeyCode::Esc => {
            app.drag = None;
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}

fn retarget(app: &mut App, delta: isize) {
    if let Some(drag) = &mut app.drag {
        drag.target = if delta < 0 {
            drag.target.left()
        } else {
            drag.target.right()
        };
    }
}

fn drop_card(app: &mut App) {
    let drag = match app.drag.take() {
        Some(drag) => drag,
        None => {
            app.mode = Mode::Navigate;
            return;
        }
    };
    app.mode = Mode::Navigate;

    // Dropping on the source column is a plain same-value write
    app.dispatch(BoardCommand::UpdateStatus {
        id: drag.task_id.clone(),
        status: drag.target,
    });

    // Follow the card to its new column
    app.selected_column = drag.target.index();
    let columns = app.columns();
    match columns[drag.target.index()]
        .cards
        .iter()
        .position(|c| c.id == drag.task_id)
    {
        Some(row) => app.selected_row = row,
        None => app.clamp_cursor(),
    }

    app.status_message = Some(format!(
        "moved \"{}\" to {}",
        drag.card.title,
        drag.target.label()
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::TASKS_FILE;
    use crate::model::config::BoardConfig;
    use crate::model::task::Status;
    use crate::ops::store::TaskStore;
    use crate::tui::app::View;
    use crossterm::event::KeyModifiers;
    use std::fs;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with_one_task(dir: &TempDir) -> (App, String) {
        fs::write(dir.path().join(TASKS_FILE), "[]").unwrap();
        let mut store = TaskStore::open(dir.path().to_path_buf());
        let id = store.create("Card", "", "", Vec::new()).unwrap();
        (
            App::new(store, &BoardConfig::default(), View::Board),
            id,
        )
    }

    #[test]
    fn pick_up_retarget_drop_moves_the_task() {
        let dir = TempDir::new().unwrap();
        let (mut app, id) = app_with_one_task(&dir);

        pick_up(&mut app);
        assert_eq!(app.mode, Mode::Drag);
        assert_eq!(app.drag.as_ref().unwrap().task_id, id);

        handle_drag(&mut app, key(KeyCode::Right));
        assert_eq!(app.drag.as_ref().unwrap().target, Status::InProgress);

        handle_drag(&mut app, key(KeyCode::Enter));
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.drag.is_none());
        assert_eq!(app.store.find(&id).unwrap().status, Status::InProgress);
        // Cursor followed the card
        assert_eq!(app.selected_column, 1);
        assert_eq!(app.selected_row, 0);
    }

    #[test]
    fn retarget_clamps_at_the_outer_columns() {
        let dir = TempDir::new().unwrap();
        let (mut app, _) = app_with_one_task(&dir);

        pick_up(&mut app);
        handle_drag(&mut app, key(KeyCode::Left));
        assert_eq!(app.drag.as_ref().unwrap().target, Status::Todo);
        for _ in 0..4 {
            handle_drag(&mut app, key(KeyCode::Right));
        }
        assert_eq!(app.drag.as_ref().unwrap().target, Status::Done);
    }

    #[test]
    fn abandoned_drag_changes_nothing() {
        let dir = TempDir::new().unwrap();
        let (mut app, id) = app_with_one_task(&dir);

        pick_up(&mut app);
        handle_drag(&mut app, key(KeyCode::Right));
        handle_drag(&mut app, key(KeyCode::Esc));

        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.drag.is_none());
        assert_eq!(app.store.find(&id).unwrap().status, Status::Todo);
    }

    #[test]
    fn same_column_drop_is_a_harmless_write() {
        let dir = TempDir::new().unwrap();
        let (mut app, id) = app_with_one_task(&dir);

        pick_up(&mut app);
        handle_drag(&mut app, key(KeyCode::Enter));
        assert_eq!(app.store.find(&id).unwrap().status, Status::Todo);
        assert_eq!(app.store.len(), 1);
    }

    #[test]
    fn pick_up_with_no_card_stays_idle() {
        let dir = TempDir::new().unwrap();
        let (mut app, _) = app_with_one_task(&dir);
        app.selected_column = 2; // Done column is empty

        pick_up(&mut app);
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.drag.is_none());
    }
}
