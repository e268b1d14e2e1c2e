use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::board::ListKind;
use crate::model::item::Item;
use crate::tui::app::{App, Mode};
use crate::util::unicode;

/// Three bordered columns side by side, in board order
pub fn render_board_view(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    for (kind, column) in ListKind::ALL.into_iter().zip(columns.iter()) {
        render_column(frame, app, kind, *column);
    }
}

fn render_column(frame: &mut Frame, app: &App, kind: ListKind, area: Rect) {
    let bg = app.theme.background;
    let focused = app.list == kind;
    let items = app.ws.board.list(kind);

    let border_style = if focused {
        Style::default().fg(app.theme.highlight).bg(bg)
    } else {
        app.theme.dim_style()
    };
    let title_style = if focused {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        app.theme.base()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(
            format!(" {} ({}) ", app.list_title(kind), items.len()),
            title_style,
        ))
        .style(Style::default().bg(bg));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    if items.is_empty() {
        let empty = Line::from(Span::styled("  (empty)", app.theme.dim_style()));
        frame.render_widget(Paragraph::new(empty), inner);
        return;
    }

    let height = inner.height as usize;
    let row = app.rows[kind.index()];
    // Keep the cursor row on screen
    let offset = (row + 1).saturating_sub(height);

    let lines: Vec<Line> = items
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(i, item)| item_line(app, item, focused && i == row, inner.width as usize))
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn item_line<'a>(app: &App, item: &Item, is_cursor: bool, width: usize) -> Line<'a> {
    let bg = app.theme.background;
    let is_moving = app.mode == Mode::Move
        && app
            .move_state
            .as_ref()
            .is_some_and(|m| m.item_id == item.id);

    let (marker, style) = if is_moving {
        ("* ", app.theme.moving())
    } else if is_cursor {
        ("> ", app.theme.selected())
    } else {
        ("  ", app.theme.base())
    };
    let id_style = if is_moving || is_cursor {
        style
    } else {
        Style::default().fg(app.theme.dim).bg(bg)
    };

    let text_width = width.saturating_sub(2);
    let id = unicode::truncate_to_width(&item.id, text_width);
    let rest = text_width.saturating_sub(unicode::display_width(&id));
    let name = unicode::fit_to_width(&format!(" {}", item.name), rest);

    Line::from(vec![
        Span::styled(marker, style),
        Span::styled(id, id_style),
        Span::styled(name, style),
    ])
}
