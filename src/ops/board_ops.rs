use chrono::{Local, NaiveDate};
use log::debug;

use crate::model::board::{Board, BoardSnapshot, ListKind};
use crate::model::item::Item;

/// Error type for board operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("item not found: {0}")]
    NotFound(String),
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Resolve a user-supplied list name.
pub fn parse_list(name: &str) -> Result<ListKind, BoardError> {
    ListKind::parse_list(name).ok_or_else(|| {
        BoardError::Validation(format!(
            "unknown list \"{}\" (expected todo, inProgress or done)",
            name
        ))
    })
}

/// Trim and check an item name. Names are single-line and never empty.
fn validate_name(name: &str) -> Result<String, BoardError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(BoardError::Validation("item name cannot be empty".into()));
    }
    if name.contains('\n') || name.contains('\r') {
        return Err(BoardError::Validation(
            "item name must be a single line".into(),
        ));
    }
    Ok(name.to_string())
}

/// `added:` dates are `YYYY-MM-DD`, nothing else.
fn validate_added(added: &str) -> Result<(), BoardError> {
    NaiveDate::parse_from_str(added, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| {
            BoardError::Validation(format!(
                "invalid added date {:?} (expected YYYY-MM-DD)",
                added
            ))
        })
}

/// Descriptions are stored without trailing whitespace on any line, which is
/// also how board.md gives them back.
fn normalize_description(description: &str) -> String {
    description
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim_end()
        .to_string()
}

fn validate_id(id: &str) -> Result<(), BoardError> {
    if id.is_empty() {
        return Err(BoardError::Validation("item id cannot be empty".into()));
    }
    if id.chars().any(|c| c.is_whitespace() || c == '`') {
        return Err(BoardError::Validation(format!(
            "invalid item id \"{}\": no whitespace or backticks allowed",
            id
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// Add a new item to `list` at `position` (clamped), or at the end if `None`.
/// Returns a copy of the created item.
pub fn add_item(
    board: &mut Board,
    list: ListKind,
    name: &str,
    description: &str,
    position: Option<usize>,
    prefix: &str,
) -> Result<Item, BoardError> {
    let name = validate_name(name)?;
    // Generated ids must pass the same check as loaded ones
    validate_id(prefix).map_err(|_| {
        BoardError::Validation(format!("invalid id prefix {:?} in [ids] prefix", prefix))
    })?;
    let id = next_id(board, prefix)?;

    let mut item = Item::new(id, name, normalize_description(description));
    item.added = Some(today_str());

    let items = board.list_mut(list);
    let idx = position.map_or(items.len(), |p| p.min(items.len()));
    items.insert(idx, item.clone());
    debug!(
        "event=item_added id={} list={} index={}",
        item.id,
        list.key(),
        idx
    );
    Ok(item)
}

/// Remove an item from whichever list holds it. Unknown IDs are a no-op.
pub fn delete_item(board: &mut Board, id: &str) -> Option<Item> {
    let (list, idx) = board.locate(id)?;
    let item = board.list_mut(list).remove(idx);
    debug!("event=item_deleted id={} list={}", id, list.key());
    Some(item)
}

/// Rename an item and/or replace its description.
pub fn update_item(
    board: &mut Board,
    id: &str,
    name: Option<&str>,
    description: Option<&str>,
) -> Result<(), BoardError> {
    let (list, idx) = board
        .locate(id)
        .ok_or_else(|| BoardError::NotFound(id.to_string()))?;
    // Validate before touching anything so a bad name leaves the item as-is.
    let name = name.map(validate_name).transpose()?;

    let item = &mut board.list_mut(list)[idx];
    if let Some(name) = name {
        item.name = name;
    }
    if let Some(desc) = description {
        item.description = normalize_description(desc);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Move operations
// ---------------------------------------------------------------------------

/// Move an item to `target` at `position`.
///
/// The position is clamped against the destination list *after* the item has
/// been taken out, so moving within one list never lands off by one. Moving
/// to the item's current list and index leaves the order unchanged.
pub fn move_item(
    board: &mut Board,
    id: &str,
    target: ListKind,
    position: usize,
) -> Result<(), BoardError> {
    let (source, source_idx) = board
        .locate(id)
        .ok_or_else(|| BoardError::NotFound(id.to_string()))?;

    let item = board.list_mut(source).remove(source_idx);
    let dest = board.list_mut(target);
    let idx = position.min(dest.len());
    dest.insert(idx, item);
    debug!(
        "event=item_moved id={} from={}:{} to={}:{}",
        id,
        source.key(),
        source_idx,
        target.key(),
        idx
    );
    Ok(())
}

/// Reorder within one list: the item at `from` ends up at `to` (clamped).
pub fn reorder(board: &mut Board, list: ListKind, from: usize, to: usize) -> Result<(), BoardError> {
    let len = board.list(list).len();
    let id = board
        .list(list)
        .get(from)
        .map(|item| item.id.clone())
        .ok_or_else(|| {
            BoardError::Validation(format!(
                "index {} out of range for {} ({} items)",
                from,
                list.key(),
                len
            ))
        })?;
    move_item(board, &id, list, to)
}

/// Step an item one list to the right (todo → inProgress → done), appended at
/// the end of the destination. Returns the new list.
pub fn advance_item(board: &mut Board, id: &str) -> Result<ListKind, BoardError> {
    step_item(board, id, ListKind::next, "already in the last list")
}

/// Step an item one list to the left, appended at the end of the destination.
pub fn retreat_item(board: &mut Board, id: &str) -> Result<ListKind, BoardError> {
    step_item(board, id, ListKind::prev, "already in the first list")
}

fn step_item(
    board: &mut Board,
    id: &str,
    step: fn(ListKind) -> Option<ListKind>,
    edge_msg: &str,
) -> Result<ListKind, BoardError> {
    let (current, _) = board
        .locate(id)
        .ok_or_else(|| BoardError::NotFound(id.to_string()))?;
    let target = step(current)
        .ok_or_else(|| BoardError::Validation(format!("{}: {}", id, edge_msg)))?;
    let end = board.list(target).len();
    move_item(board, id, target, end)?;
    Ok(target)
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

/// Build a board from a snapshot, checking every board invariant.
pub fn seed_board(snapshot: BoardSnapshot) -> Result<Board, BoardError> {
    let mut seen: Vec<&str> = Vec::new();
    for kind in ListKind::ALL {
        for item in snapshot.list(kind) {
            validate_id(&item.id)?;
            if seen.contains(&item.id.as_str()) {
                return Err(BoardError::Validation(format!(
                    "duplicate item id {}",
                    item.id
                )));
            }
            seen.push(&item.id);
            validate_name(&item.name)
                .map_err(|e| BoardError::Validation(format!("{}: {}", item.id, e)))?;
            if let Some(added) = &item.added {
                validate_added(added)
                    .map_err(|e| BoardError::Validation(format!("{}: {}", item.id, e)))?;
            }
        }
    }

    let BoardSnapshot {
        todo,
        in_progress,
        done,
    } = snapshot;
    let mut board = Board {
        todo,
        in_progress,
        done,
    };
    // Stored the same way add_item stores them
    for kind in ListKind::ALL {
        for item in board.list_mut(kind).iter_mut() {
            item.name = item.name.trim().to_string();
            item.description = normalize_description(&item.description);
        }
    }
    Ok(board)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn today_str() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Next free ID with the given prefix: one past the highest number in use.
/// Fails when that number does not fit.
pub fn next_id(board: &Board, prefix: &str) -> Result<String, BoardError> {
    let prefix_dash = format!("{}-", prefix);
    let max = board
        .items()
        .filter_map(|item| item.id.strip_prefix(&prefix_dash))
        .filter_map(|num| num.parse::<usize>().ok())
        .max()
        .unwrap_or(0);

    let exhausted = || BoardError::Validation(format!("no free {}- id left", prefix));
    let mut n = max.checked_add(1).ok_or_else(exhausted)?;
    loop {
        let id = format!("{}-{:03}", prefix, n);
        if !board.contains(&id) {
            return Ok(id);
        }
        n = n.checked_add(1).ok_or_else(exhausted)?;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
