use crossterm::event::{KeyCode, KeyEvent};
use log::debug;

use crate::model::board::ListKind;
use crate::ops::board_ops;
use crate::tui::app::{App, Mode, MoveState};

/// Pick up the item under the cursor.
pub(super) fn enter_move_mode(app: &mut App) {
    let Some(id) = app.cursor_item().map(|i| i.id.clone()) else {
        return;
    };
    app.move_state = Some(MoveState {
        item_id: id,
        original_list: app.list,
        original_index: app.row(),
    });
    app.mode = Mode::Move;
}

/// Keyboard drag: every step is one `move_item` on the board, and the
/// cursor follows the item.
pub(super) fn handle_move(app: &mut App, key: KeyEvent) {
    let Some(state) = app.move_state.clone() else {
        app.mode = Mode::Navigate;
        return;
    };
    let Some((list, index)) = app.ws.board.locate(&state.item_id) else {
        // Gone after a reload
        app.move_state = None;
        app.mode = Mode::Navigate;
        return;
    };

    match key.code {
        KeyCode::Enter | KeyCode::Char('m') => commit(app, state),
        KeyCode::Esc => cancel(app, state),

        // Neighbouring column, same row (clamped to its end)
        KeyCode::Char('h') | KeyCode::Left => {
            if let Some(prev) = list.prev() {
                step(app, &state.item_id, prev, index);
            }
        }
        KeyCode::Char('l') | KeyCode::Right => {
            if let Some(next) = list.next() {
                step(app, &state.item_id, next, index);
            }
        }

        KeyCode::Char('j') | KeyCode::Down => step(app, &state.item_id, list, index + 1),
        KeyCode::Char('k') | KeyCode::Up => {
            step(app, &state.item_id, list, index.saturating_sub(1))
        }
        KeyCode::Char('g') | KeyCode::Home => step(app, &state.item_id, list, 0),
        KeyCode::Char('G') | KeyCode::End => step(app, &state.item_id, list, usize::MAX),
        _ => {}
    }
}

fn step(app: &mut App, id: &str, target: ListKind, position: usize) {
    match board_ops::move_item(&mut app.ws.board, id, target, position) {
        Ok(()) => app.focus_item(id),
        Err(e) => app.set_error(e.to_string()),
    }
}

fn commit(app: &mut App, state: MoveState) {
    app.move_state = None;
    app.mode = Mode::Navigate;
    let Some((list, index)) = app.ws.board.locate(&state.item_id) else {
        return;
    };
    if (list, index) == (state.original_list, state.original_index) {
        return;
    }
    if app.save() {
        debug!(
            "event=tui_move_committed id={} to={}:{}",
            state.item_id,
            list.key(),
            index
        );
        let title = app.list_title(list).to_string();
        app.set_info(format!("moved {} to {} #{}", state.item_id, title, index + 1));
    }
    app.clamp_rows();
}

/// Put the item back exactly where it was picked up.
fn cancel(app: &mut App, state: MoveState) {
    step(
        app,
        &state.item_id,
        state.original_list,
        state.original_index,
    );
    app.move_state = None;
    app.mode = Mode::Navigate;
}
