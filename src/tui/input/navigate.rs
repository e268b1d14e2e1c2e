use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::board_ops;
use crate::tui::app::{App, EditState, EditTarget, Mode};

use super::move_mode::enter_move_mode;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    app.status = None;
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,

        // Columns
        KeyCode::Char('h') | KeyCode::Left => {
            if let Some(prev) = app.list.prev() {
                app.list = prev;
            }
        }
        KeyCode::Char('l') | KeyCode::Right => {
            if let Some(next) = app.list.next() {
                app.list = next;
            }
        }

        // Rows
        KeyCode::Char('j') | KeyCode::Down => app.set_row(app.row() + 1),
        KeyCode::Char('k') | KeyCode::Up => app.set_row(app.row().saturating_sub(1)),
        KeyCode::Char('g') | KeyCode::Home => app.set_row(0),
        KeyCode::Char('G') | KeyCode::End => app.set_row(usize::MAX),

        KeyCode::Char('a') => {
            let target = EditTarget::NewItem(app.list);
            begin_edit(app, target, String::new());
        }
        KeyCode::Char('e') => {
            if let Some(item) = app.cursor_item() {
                let target = EditTarget::Rename(item.id.clone());
                let name = item.name.clone();
                begin_edit(app, target, name);
            }
        }
        KeyCode::Char('x') | KeyCode::Delete => delete_at_cursor(app),
        KeyCode::Char(']') => step_at_cursor(app, true),
        KeyCode::Char('[') => step_at_cursor(app, false),
        KeyCode::Char('m') => enter_move_mode(app),
        _ => {}
    }
}

fn begin_edit(app: &mut App, target: EditTarget, buffer: String) {
    app.edit = Some(EditState {
        target,
        cursor: buffer.len(),
        buffer,
    });
    app.mode = Mode::Edit;
}

fn delete_at_cursor(app: &mut App) {
    let Some(id) = app.cursor_item().map(|i| i.id.clone()) else {
        return;
    };
    if let Some(item) = board_ops::delete_item(&mut app.ws.board, &id) {
        app.clamp_rows();
        if app.save() {
            app.set_info(format!("deleted {} {}", item.id, item.name));
        }
    }
}

/// `]` / `[`: the card's Start/Complete and Back buttons
fn step_at_cursor(app: &mut App, forward: bool) {
    let Some(id) = app.cursor_item().map(|i| i.id.clone()) else {
        return;
    };
    let result = if forward {
        board_ops::advance_item(&mut app.ws.board, &id)
    } else {
        board_ops::retreat_item(&mut app.ws.board, &id)
    };
    match result {
        Ok(list) => {
            app.clamp_rows();
            if app.save() {
                let title = app.list_title(list).to_string();
                app.set_info(format!("{} -> {}", id, title));
            }
        }
        Err(e) => app.set_error(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;

    use crate::io::board_io::load_workspace;
    use crate::model::board::ListKind;
    use crate::tui::app::Mode;
    use crate::tui::app::tests::test_app;
    use crate::tui::input::test_keys::press;

    #[test]
    fn test_column_and_row_navigation() {
        let (_tmp, mut app) = test_app();
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.cursor_item().unwrap().name, "Go");
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.cursor_item().unwrap().name, "Go");

        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.list, ListKind::InProgress);
        assert_eq!(app.cursor_item().unwrap().name, "React");

        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.list, ListKind::Done);
        assert!(app.cursor_item().is_none());

        // Each column remembers its own row
        press(&mut app, KeyCode::Char('h'));
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.cursor_item().unwrap().name, "Go");
    }

    #[test]
    fn test_delete_saves() {
        let (tmp, mut app) = test_app();
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.cursor_item().unwrap().name, "Go");

        let ws = load_workspace(tmp.path()).unwrap();
        assert!(!ws.board.contains("SK-001"));
    }

    #[test]
    fn test_delete_on_empty_column_is_noop() {
        let (_tmp, mut app) = test_app();
        app.list = ListKind::Done;
        press(&mut app, KeyCode::Delete);
        assert_eq!(app.ws.board.len(), 3);
        assert!(app.status.is_none());
    }

    #[test]
    fn test_step_forward_and_back() {
        let (tmp, mut app) = test_app();
        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.ws.board.locate("SK-001"), Some((ListKind::InProgress, 1)));
        assert_eq!(app.status.as_ref().unwrap().text, "SK-001 -> Learning");

        app.list = ListKind::InProgress;
        app.set_row(1);
        press(&mut app, KeyCode::Char('['));
        assert_eq!(app.ws.board.locate("SK-001"), Some((ListKind::Todo, 1)));

        let ws = load_workspace(tmp.path()).unwrap();
        assert_eq!(ws.board, app.ws.board);
    }

    #[test]
    fn test_step_back_from_first_list_reports_error() {
        let (_tmp, mut app) = test_app();
        let before = app.ws.board.clone();
        press(&mut app, KeyCode::Char('['));
        assert_eq!(app.ws.board, before);
        assert!(app.status.as_ref().unwrap().is_error);
    }

    #[test]
    fn test_quit() {
        let (_tmp, mut app) = test_app();
        assert_eq!(app.mode, Mode::Navigate);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
