use serde::{Deserialize, Serialize};

use super::item::Item;

/// One of the three columns of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListKind {
    Todo,
    InProgress,
    Done,
}

impl ListKind {
    /// All lists in board order
    pub const ALL: [ListKind; 3] = [ListKind::Todo, ListKind::InProgress, ListKind::Done];

    /// Identifier used in snapshots and on the command line
    pub fn key(self) -> &'static str {
        match self {
            ListKind::Todo => "todo",
            ListKind::InProgress => "inProgress",
            ListKind::Done => "done",
        }
    }

    /// Section header used in the board file
    pub fn heading(self) -> &'static str {
        match self {
            ListKind::Todo => "Todo",
            ListKind::InProgress => "In Progress",
            ListKind::Done => "Done",
        }
    }

    /// Parse a list name as typed by a user (case-insensitive, a few aliases)
    pub fn parse_list(s: &str) -> Option<ListKind> {
        match s.trim().to_lowercase().as_str() {
            "todo" | "to-do" | "to do" | "to_do" => Some(ListKind::Todo),
            "inprogress" | "in-progress" | "in progress" | "in_progress" | "progress"
            | "doing" => Some(ListKind::InProgress),
            "done" => Some(ListKind::Done),
            _ => None,
        }
    }

    /// Position in board order (0, 1, 2)
    pub fn index(self) -> usize {
        match self {
            ListKind::Todo => 0,
            ListKind::InProgress => 1,
            ListKind::Done => 2,
        }
    }

    /// The list to the right, if any
    pub fn next(self) -> Option<ListKind> {
        ListKind::ALL.get(self.index() + 1).copied()
    }

    /// The list to the left, if any
    pub fn prev(self) -> Option<ListKind> {
        self.index().checked_sub(1).map(|i| ListKind::ALL[i])
    }
}

impl std::fmt::Display for ListKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// The three ordered lists. Every item lives in exactly one of them.
///
/// Lists can only be mutated from inside the crate (see `ops::board_ops`);
/// everyone else reads slices or takes a [`BoardSnapshot`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    pub(crate) todo: Vec<Item>,
    pub(crate) in_progress: Vec<Item>,
    pub(crate) done: Vec<Item>,
}

impl Board {
    pub fn new() -> Self {
        Board::default()
    }

    /// Items of one list, in order
    pub fn list(&self, kind: ListKind) -> &[Item] {
        match kind {
            ListKind::Todo => &self.todo,
            ListKind::InProgress => &self.in_progress,
            ListKind::Done => &self.done,
        }
    }

    pub(crate) fn list_mut(&mut self, kind: ListKind) -> &mut Vec<Item> {
        match kind {
            ListKind::Todo => &mut self.todo,
            ListKind::InProgress => &mut self.in_progress,
            ListKind::Done => &mut self.done,
        }
    }

    /// Iterate over `(kind, items)` in board order
    pub fn lists(&self) -> impl Iterator<Item = (ListKind, &[Item])> {
        ListKind::ALL.into_iter().map(move |k| (k, self.list(k)))
    }

    /// Iterate over every item on the board in board order
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.lists().flat_map(|(_, items)| items.iter())
    }

    /// Total number of items across all lists
    pub fn len(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find which list holds `id` and at what index
    pub fn locate(&self, id: &str) -> Option<(ListKind, usize)> {
        self.lists().find_map(|(kind, items)| {
            items
                .iter()
                .position(|item| item.id == id)
                .map(|idx| (kind, idx))
        })
    }

    /// Find an item by ID
    pub fn find(&self, id: &str) -> Option<&Item> {
        self.locate(id).map(|(kind, idx)| &self.list(kind)[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.locate(id).is_some()
    }

    /// Copy the lists out for persistence or presentation
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            todo: self.todo.clone(),
            in_progress: self.in_progress.clone(),
            done: self.done.clone(),
        }
    }
}

/// Detached copy of a board: list name → ordered items.
///
/// This is the JSON shape used for seeding and export:
/// `{"todo": [...], "inProgress": [...], "done": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    #[serde(default)]
    pub todo: Vec<Item>,
    #[serde(default)]
    pub in_progress: Vec<Item>,
    #[serde(default)]
    pub done: Vec<Item>,
}

impl BoardSnapshot {
    pub fn list(&self, kind: ListKind) -> &[Item] {
        match kind {
            ListKind::Todo => &self.todo,
            ListKind::InProgress => &self.in_progress,
            ListKind::Done => &self.done,
        }
    }

    pub fn list_mut(&mut self, kind: ListKind) -> &mut Vec<Item> {
        match kind {
            ListKind::Todo => &mut self.todo,
            ListKind::InProgress => &mut self.in_progress,
            ListKind::Done => &mut self.done,
        }
    }
}
