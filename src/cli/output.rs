use serde::Serialize;

use crate::model::board::{Board, ListKind};
use crate::model::config::ListTitles;
use crate::model::item::Item;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

/// One item with its location, for `show` and `add`
#[derive(Serialize)]
pub struct ItemJson<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added: Option<&'a str>,
    pub list: ListKind,
    pub index: usize,
}

/// A single list, for `list <LIST>`
#[derive(Serialize)]
pub struct ListJson<'a> {
    pub list: ListKind,
    pub title: &'a str,
    pub items: Vec<&'a Item>,
}

#[derive(Serialize)]
pub struct RmJson {
    pub deleted: Vec<String>,
    pub missing: Vec<String>,
}

pub fn item_to_json(item: &Item, list: ListKind, index: usize) -> ItemJson<'_> {
    ItemJson {
        id: &item.id,
        name: &item.name,
        description: &item.description,
        added: item.added.as_deref(),
        list,
        index,
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// `SK-001 Learn Rust`
pub fn format_item_line(item: &Item) -> String {
    format!("{} {}", item.id, item.name)
}

/// `== To Learn (todo) 3 ==`
pub fn format_list_header(kind: ListKind, titles: &ListTitles, count: usize) -> String {
    format!("== {} ({}) {} ==", titles.title(kind), kind.key(), count)
}

/// Header plus one indented line per item
pub fn format_list(kind: ListKind, titles: &ListTitles, items: &[&Item]) -> Vec<String> {
    let mut lines = vec![format_list_header(kind, titles, items.len())];
    lines.extend(items.iter().map(|item| format!("  {}", format_item_line(item))));
    lines
}

/// Every list, separated by blank lines. `keep` filters items.
pub fn format_board(board: &Board, titles: &ListTitles, keep: impl Fn(&Item) -> bool) -> Vec<String> {
    let mut lines = Vec::new();
    for (kind, items) in board.lists() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        let kept: Vec<&Item> = items.iter().filter(|&item| keep(item)).collect();
        lines.extend(format_list(kind, titles, &kept));
    }
    lines
}

pub fn format_item_detail(item: &Item, kind: ListKind, index: usize, titles: &ListTitles) -> Vec<String> {
    let mut lines = vec![format_item_line(item)];
    lines.push(format!(
        "list: {} ({}), position {}",
        titles.title(kind),
        kind.key(),
        index
    ));
    if let Some(ref added) = item.added {
        lines.push(format!("added: {}", added));
    }
    if !item.description.is_empty() {
        lines.push("description:".to_string());
        for line in item.description.lines() {
            lines.push(format!("  {}", line));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::board::BoardSnapshot;
    use crate::ops::board_ops::seed_board;
    use pretty_assertions::assert_eq;

    fn board() -> Board {
        seed_board(BoardSnapshot {
            todo: vec![
                Item::new("SK-001".into(), "Rust".into(), String::new()),
                Item::new("SK-002".into(), "Go".into(), String::new()),
            ],
            in_progress: vec![],
            done: vec![Item::new("SK-003".into(), "HTML".into(), "Tags\nForms".into())],
        })
        .unwrap()
    }

    #[test]
    fn test_format_board() {
        let lines = format_board(&board(), &ListTitles::default(), |_| true);
        assert_eq!(
            lines.join("\n"),
            "\
== To Learn (todo) 2 ==
  SK-001 Rust
  SK-002 Go

== Learning (inProgress) 0 ==

== Done (done) 1 ==
  SK-003 HTML"
        );
    }

    #[test]
    fn test_format_board_filtered_counts_kept_items() {
        let lines = format_board(&board(), &ListTitles::default(), |i| i.name == "Go");
        assert_eq!(lines[0], "== To Learn (todo) 1 ==");
        assert_eq!(lines[1], "  SK-002 Go");
    }

    #[test]
    fn test_format_item_detail() {
        let b = board();
        let item = &b.list(ListKind::Done)[0];
        let lines = format_item_detail(item, ListKind::Done, 0, &ListTitles::default());
        assert_eq!(
            lines,
            vec![
                "SK-003 HTML",
                "list: Done (done), position 0",
                "description:",
                "  Tags",
                "  Forms",
            ]
        );
    }

    #[test]
    fn test_item_json_shape() {
        let b = board();
        let json = serde_json::to_value(item_to_json(&b.list(ListKind::Todo)[1], ListKind::Todo, 1))
            .unwrap();
        assert_eq!(json["id"], "SK-002");
        assert_eq!(json["list"], "todo");
        assert_eq!(json["index"], 1);
        assert!(json.get("added").is_none());
    }
}
