use crossterm::event::{KeyCode, KeyEvent};

use crate::model::roster::{ROSTER, TAGS};
use crate::ops::board::BoardCommand;
use crate::tui::app::{App, FormField, Mode};
use crate::util::unicode;

pub(super) fn handle_form(app: &mut App, key: KeyEvent) {
    match key.code {
        // Close and reset, no side effects
        KeyCode::Esc => {
            app.form = None;
            app.mode = Mode::Navigate;
        }
        KeyCode::Enter => submit(app),
        KeyCode::Tab => {
            if let Some(form) = &mut app.form {
                form.field = form.field.next();
            }
        }
        KeyCode::BackTab => {
            if let Some(form) = &mut app.form {
                form.field = form.field.prev();
            }
        }
        _ => handle_field_key(app, key),
    }
}

/// Validate and create. An empty trimmed title drops the request silently
/// and leaves the form open.
fn submit(app: &mut App) {
    let form = match app.form.take() {
        Some(form) => form,
        None => {
            app.mode = Mode::Navigate;
            return;
        }
    };

    if form.title.trim().is_empty() {
        app.form = Some(form);
        return;
    }

    let title = form.title.clone();
    let assignee = form
        .assignee
        .and_then(|i| ROSTER.get(i))
        .map(|p| p.name.to_string())
        .unwrap_or_default();

    app.mode = Mode::Navigate;
    app.status_message = Some(format!("created \"{}\"", title.trim()));
    app.dispatch(BoardCommand::Create {
        title,
        description: form.description.clone(),
        assignee,
        tags: form.selected_tags(),
    });
}

fn handle_field_key(app: &mut App, key: KeyEvent) {
    let form = match &mut app.form {
        Some(form) => form,
        None => return,
    };

    // Up/Down also walk the fields, like Tab/BackTab
    match key.code {
        KeyCode::Down => {
            form.field = form.field.next();
            return;
        }
        KeyCode::Up => {
            form.field = form.field.prev();
            return;
        }
        _ => {}
    }

    match form.field {
        FormField::Title => {
            edit_text(&mut form.title, &mut form.title_cursor, key);
        }
        FormField::Description => {
            edit_text(&mut form.description, &mut form.description_cursor, key);
        }
        FormField::Assignee => match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                form.assignee = match form.assignee {
                    None => Some(ROSTER.len() - 1),
                    Some(0) => None,
                    Some(i) => Some(i - 1),
                };
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
                form.assignee = match form.assignee {
                    None => Some(0),
                    Some(i) if i + 1 < ROSTER.len() => Some(i + 1),
                    Some(_) => None,
                };
            }
            _ => {}
        },
        FormField::Tags => match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                form.tag_cursor = form.tag_cursor.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                form.tag_cursor = (form.tag_cursor + 1).min(TAGS.len() - 1);
            }
            KeyCode::Char(' ') => {
                form.tags_selected[form.tag_cursor] = !form.tags_selected[form.tag_cursor];
            }
            _ => {}
        },
    }
}

/// Single-line text editing with a byte cursor kept on grapheme boundaries
fn edit_text(buffer: &mut String, cursor: &mut usize, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) => {
            buffer.insert(*cursor, c);
            *cursor += c.len_utf8();
        }
        KeyCode::Backspace => {
            if let Some(prev) = unicode::prev_grapheme_boundary(buffer, *cursor) {
                buffer.replace_range(prev..*cursor, "");
                *cursor = prev;
            }
        }
        KeyCode::Delete => {
            if let Some(next) = unicode::next_grapheme_boundary(buffer, *cursor) {
                buffer.replace_range(*cursor..next, "");
            }
        }
        KeyCode::Left => {
            if let Some(prev) = unicode::prev_grapheme_boundary(buffer, *cursor) {
                *cursor = prev;
            }
        }
        KeyCode::Right => {
            if let Some(next) = unicode::next_grapheme_boundary(buffer, *cursor) {
                *cursor = next;
            }
        }
        KeyCode::Home => *cursor = 0,
        KeyCode::End => *cursor = buffer.len(),
        _ => {}
    }
}
