use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::board::BoardCommand;
use crate::tui::app::{App, ConfirmAction, Mode};

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Confirm: y
        (KeyModifiers::NONE, KeyCode::Char('y')) => {
            let action = app.confirm.take();
            app.mode = Mode::Navigate;
            if let Some(ConfirmAction::DeleteTask { id, title }) = action {
                app.dispatch(BoardCommand::Delete { id });
                app.status_message = Some(format!("deleted \"{}\"", title));
            }
        }
        // Cancel: n or Esc
        (KeyModifiers::NONE, KeyCode::Char('n')) | (_, KeyCode::Esc) => {
            app.confirm = None;
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::TASKS_FILE;
    use crate::model::config::BoardConfig;
    use crate::ops::store::TaskStore;
    use crate::tui::app::View;
    use std::fs;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_confirming_delete(dir: &TempDir) -> (App, String) {
        fs::write(dir.path().join(TASKS_FILE), "[]").unwrap();
        let mut store = TaskStore::open(dir.path().to_path_buf());
        let id = store.create("Doomed", "", "", Vec::new()).unwrap();
        let mut app = App::new(store, &BoardConfig::default(), View::Board);
        app.confirm = Some(ConfirmAction::DeleteTask {
            id: id.clone(),
            title: "Doomed".into(),
        });
        app.mode = Mode::Confirm;
        (app, id)
    }

    #[test]
    fn y_deletes_the_task() {
        let dir = TempDir::new().unwrap();
        let (mut app, id) = app_confirming_delete(&dir);

        handle_confirm(&mut app, key(KeyCode::Char('y')));
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.store.find(&id).is_none());
        assert!(app.store.is_empty());
    }

    #[test]
    fn n_and_esc_cancel_without_deleting() {
        let dir = TempDir::new().unwrap();
        let (mut app, id) = app_confirming_delete(&dir);

        handle_confirm(&mut app, key(KeyCode::Char('n')));
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.store.find(&id).is_some());

        app.confirm = Some(ConfirmAction::DeleteTask {
            id: id.clone(),
            title: "Doomed".into(),
        });
        app.mode = Mode::Confirm;
        handle_confirm(&mut app, key(KeyCode::Esc));
        assert!(app.store.find(&id).is_some());
    }

    #[test]
    fn other_keys_keep_waiting() {
        let dir = TempDir::new().unwrap();
        let (mut app, id) = app_confirming_delete(&dir);

        handle_confirm(&mut app, key(KeyCode::Char('x')));
        assert_eq!(app.mode, Mode::Confirm);
        assert!(app.store.find(&id).is_some());
    }
}
