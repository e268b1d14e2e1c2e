use crate::model::board::{BoardSnapshot, ListKind};
use crate::model::item::Item;

/// Indent of an item's metadata lines (`  - added: ...`)
const META_INDENT: usize = 2;
/// Indent of a multi-line description block
const BLOCK_INDENT: usize = 4;

/// Result of parsing a board file
#[derive(Debug, Clone, Default)]
pub struct ParsedBoard {
    /// Text of the `# Title` line
    pub title: String,
    /// Items per list, in file order
    pub snapshot: BoardSnapshot,
    /// Non-blank lines that could not be understood, in order
    pub dropped: Vec<String>,
}

/// Parse a board file. Never fails: unrecognised lines are collected in
/// `dropped` so the caller can report them.
pub fn parse_board(source: &str) -> ParsedBoard {
    let mut parsed = ParsedBoard::default();
    let mut section: Option<ListKind> = None;
    let mut current: Option<Item> = None;
    // Collecting a `- description:` block
    let mut in_block = false;
    let mut block_lines: Vec<String> = Vec::new();
    let mut pending_blanks = 0usize;

    for line in source.lines() {
        let trimmed = line.trim();

        if in_block {
            if trimmed.is_empty() {
                pending_blanks += 1;
                continue;
            }
            if count_indent(line) >= BLOCK_INDENT {
                block_lines.extend(std::iter::repeat_n(String::new(), pending_blanks));
                pending_blanks = 0;
                block_lines.push(line[BLOCK_INDENT..].to_string());
                continue;
            }
            // Dedent ends the block
            finish_block(&mut current, &mut block_lines);
            in_block = false;
            pending_blanks = 0;
        }

        if trimmed.is_empty() {
            continue;
        }

        // `# Title`
        if let Some(title) = line.strip_prefix("# ") {
            flush_item(&mut current, section, &mut parsed.snapshot);
            parsed.title = title.trim().to_string();
            continue;
        }

        // `## Todo`, `## In Progress`, `## Done`
        if let Some(header) = line.strip_prefix("## ") {
            flush_item(&mut current, section, &mut parsed.snapshot);
            section = parse_section_name(header);
            if section.is_none() {
                parsed.dropped.push(line.to_string());
            }
            continue;
        }

        // `- `ID` Name`
        if line.starts_with("- ") {
            flush_item(&mut current, section, &mut parsed.snapshot);
            match (section, parse_item_line(line)) {
                (Some(_), Some(item)) => current = Some(item),
                _ => parsed.dropped.push(line.to_string()),
            }
            continue;
        }

        // `  - key: value`
        if count_indent(line) == META_INDENT
            && let Some(meta) = line[META_INDENT..].strip_prefix("- ")
            && let Some(item) = current.as_mut()
        {
            match meta.split_once(':') {
                Some(("added", value)) => {
                    item.added = Some(value.trim().to_string());
                }
                Some(("description", value)) => {
                    let value = value.strip_prefix(' ').unwrap_or(value);
                    if value.trim().is_empty() {
                        in_block = true;
                        block_lines.clear();
                        pending_blanks = 0;
                    } else {
                        item.description = value.trim_end().to_string();
                    }
                }
                _ => parsed.dropped.push(line.to_string()),
            }
            continue;
        }

        parsed.dropped.push(line.to_string());
    }

    if in_block {
        finish_block(&mut current, &mut block_lines);
    }
    flush_item(&mut current, section, &mut parsed.snapshot);
    parsed
}

/// Map a section header to its list. Accepts the canonical headings and the
/// same aliases as list names on the command line.
fn parse_section_name(header: &str) -> Option<ListKind> {
    let header = header.trim();
    ListKind::ALL
        .into_iter()
        .find(|k| k.heading().eq_ignore_ascii_case(header))
        .or_else(|| ListKind::parse_list(header))
}

/// Parse `- `ID` Name`. Returns None when there is no backtick-quoted ID.
fn parse_item_line(line: &str) -> Option<Item> {
    let rest = line.strip_prefix("- `")?;
    let end_tick = rest.find('`')?;
    let id = &rest[..end_tick];
    if id.is_empty() {
        return None;
    }
    let name = rest[end_tick + 1..].trim();
    Some(Item::new(id.to_string(), name.to_string(), String::new()))
}

fn finish_block(current: &mut Option<Item>, block_lines: &mut Vec<String>) {
    if let Some(item) = current.as_mut() {
        item.description = std::mem::take(block_lines).join("\n").trim_end().to_string();
    }
    block_lines.clear();
}

fn flush_item(current: &mut Option<Item>, section: Option<ListKind>, snapshot: &mut BoardSnapshot) {
    if let (Some(item), Some(kind)) = (current.take(), section) {
        snapshot.list_mut(kind).push(item);
    }
}

/// Count leading spaces
fn count_indent(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}
