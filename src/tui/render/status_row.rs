use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, EditTarget, Mode};
use crate::util::unicode;

const NAVIGATE_HINT: &str = "a add  e rename  x delete  [ ] step  m move  q quit";
const MOVE_HINT: &str = "hjkl move  Enter drop  Esc cancel";
const EDIT_HINT: &str = "Enter save  Esc cancel";

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = match app.mode {
        Mode::Navigate => match &app.status {
            Some(msg) => Line::from(message_span(app, &msg.text, msg.is_error, width)),
            None => with_hint(app, Vec::new(), NAVIGATE_HINT, width),
        },
        Mode::Move => {
            let id = app
                .move_state
                .as_ref()
                .map_or("", |m| m.item_id.as_str());
            let label = Span::styled(
                format!(" MOVE {} ", id),
                app.theme.moving(),
            );
            with_hint(app, vec![label], MOVE_HINT, width)
        }
        Mode::Edit => {
            let Some(edit) = &app.edit else {
                return;
            };
            let prompt = match &edit.target {
                EditTarget::NewItem(list) => format!("New item in {}: ", app.list_title(*list)),
                EditTarget::Rename(id) => format!("Rename {}: ", id),
            };
            let prompt_width = unicode::display_width(&prompt);
            let col = prompt_width + unicode::cursor_col(&edit.buffer, edit.cursor);
            if col < width {
                frame.set_cursor_position((area.x + col as u16, area.y));
            }

            let spans = vec![
                Span::styled(prompt, Style::default().fg(app.theme.highlight).bg(bg)),
                Span::styled(
                    edit.buffer.clone(),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ),
            ];
            // A rejected name is reported here while the prompt stays open
            let hint = match &app.status {
                Some(msg) if msg.is_error => msg.text.as_str(),
                _ => EDIT_HINT,
            };
            let is_error = app.status.as_ref().is_some_and(|m| m.is_error);
            let mut line = with_hint(app, spans, hint, width);
            if is_error && let Some(last) = line.spans.last_mut() {
                last.style = Style::default().fg(app.theme.red).bg(bg);
            }
            line
        }
    };

    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(bg)),
        area,
    );
}

fn message_span<'a>(app: &App, text: &str, is_error: bool, width: usize) -> Span<'a> {
    let style = if is_error {
        Style::default()
            .fg(app.theme.red)
            .bg(app.theme.background)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.green).bg(app.theme.background)
    };
    Span::styled(unicode::truncate_to_width(&format!(" {}", text), width), style)
}

/// Right-align a dim hint after `spans` when there is room for it
fn with_hint<'a>(app: &App, mut spans: Vec<Span<'a>>, hint: &str, width: usize) -> Line<'a> {
    let content_width: usize = spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum();
    let hint_width = unicode::display_width(hint) + 1;
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(
            " ".repeat(padding),
            Style::default().bg(app.theme.background),
        ));
        spans.push(Span::styled(format!("{} ", hint), app.theme.dim_style()));
    }
    Line::from(spans)
}
