use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::debug;

use crate::ops::board_ops;
use crate::tui::app::{App, EditState, EditTarget, Mode};
use crate::util::unicode;

pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    let Some(edit) = app.edit.as_mut() else {
        app.mode = Mode::Navigate;
        return;
    };

    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => {
            app.edit = None;
            app.mode = Mode::Navigate;
            app.status = None;
        }
        (_, KeyCode::Enter) => commit(app),

        // Ctrl+A / Ctrl+E as well as Home / End
        (m, KeyCode::Char('a')) if m.contains(KeyModifiers::CONTROL) => edit.cursor = 0,
        (m, KeyCode::Char('e')) if m.contains(KeyModifiers::CONTROL) => {
            edit.cursor = edit.buffer.len()
        }
        // Kill to start of line
        (m, KeyCode::Char('u')) if m.contains(KeyModifiers::CONTROL) => {
            edit.buffer.drain(..edit.cursor);
            edit.cursor = 0;
        }
        (_, KeyCode::Home) => edit.cursor = 0,
        (_, KeyCode::End) => edit.cursor = edit.buffer.len(),

        (_, KeyCode::Left) => {
            if let Some(prev) = unicode::prev_grapheme_boundary(&edit.buffer, edit.cursor) {
                edit.cursor = prev;
            }
        }
        (_, KeyCode::Right) => {
            if let Some(next) = unicode::next_grapheme_boundary(&edit.buffer, edit.cursor) {
                edit.cursor = next;
            }
        }
        (_, KeyCode::Backspace) => {
            if let Some(prev) = unicode::prev_grapheme_boundary(&edit.buffer, edit.cursor) {
                edit.buffer.drain(prev..edit.cursor);
                edit.cursor = prev;
            }
        }
        (_, KeyCode::Delete) => {
            if let Some(next) = unicode::next_grapheme_boundary(&edit.buffer, edit.cursor) {
                edit.buffer.drain(edit.cursor..next);
            }
        }
        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => {
            edit.buffer.insert(edit.cursor, c);
            edit.cursor += c.len_utf8();
        }
        _ => {}
    }
}

/// Apply the buffer. A rejected name keeps the prompt open with the error
/// shown; the board is not touched.
fn commit(app: &mut App) {
    let Some(EditState { target, buffer, .. }) = app.edit.clone() else {
        return;
    };

    let result = match &target {
        EditTarget::NewItem(list) => {
            let prefix = app.ws.config.ids.prefix.clone();
            board_ops::add_item(&mut app.ws.board, *list, &buffer, "", None, &prefix)
                .map(|item| item.id)
        }
        EditTarget::Rename(id) => {
            board_ops::update_item(&mut app.ws.board, id, Some(&buffer), None).map(|()| id.clone())
        }
    };

    let id = match result {
        Ok(id) => id,
        Err(e) => {
            app.set_error(e.to_string());
            return;
        }
    };

    app.edit = None;
    app.mode = Mode::Navigate;
    app.focus_item(&id);
    if app.save() {
        debug!("event=tui_edit_committed id={}", id);
        let verb = match target {
            EditTarget::NewItem(_) => "added",
            EditTarget::Rename(_) => "renamed",
        };
        app.set_info(format!("{} {}", verb, id));
    }
    app.clamp_rows();
}
