use crate::model::board::{Board, ListKind};
use crate::model::item::Item;

/// Serialize a board to its markdown representation.
/// All three sections are always written, in board order.
pub fn serialize_board(title: &str, board: &Board) -> String {
    let mut lines = vec![format!("# {}", title), String::new()];

    for kind in ListKind::ALL {
        lines.push(format!("## {}", kind.heading()));
        lines.push(String::new());
        let items = board.list(kind);
        for item in items {
            serialize_item(item, &mut lines);
        }
        if !items.is_empty() {
            lines.push(String::new());
        }
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn serialize_item(item: &Item, lines: &mut Vec<String>) {
    lines.push(format!("- `{}` {}", item.id, item.name));

    if let Some(ref added) = item.added {
        lines.push(format!("  - added: {}", added));
    }

    if item.description.contains('\n') {
        lines.push("  - description:".to_string());
        for desc_line in item.description.lines() {
            if desc_line.trim().is_empty() {
                lines.push(String::new());
            } else {
                lines.push(format!("    {}", desc_line));
            }
        }
    } else if !item.description.is_empty() {
        lines.push(format!("  - description: {}", item.description));
    }
}
