use std::ops::Range;

use regex::Regex;

use crate::model::board::{Board, ListKind};

/// Which field of an item matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    Id,
    Name,
    Description,
}

/// A search hit for one field of one item
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub list: ListKind,
    pub index: usize,
    pub item_id: String,
    pub field: MatchField,
    pub spans: Vec<Range<usize>>,
}

/// Compile a case-insensitive pattern. Falls back to a literal match when the
/// pattern is not a valid regex.
pub fn build_regex(pattern: &str) -> Regex {
    Regex::new(&format!("(?i){}", pattern)).unwrap_or_else(|_| {
        // An escaped pattern is always valid
        Regex::new(&format!("(?i){}", regex::escape(pattern)))
            .unwrap_or_else(|_| unreachable!("escaped regex must compile"))
    })
}

/// Collect all non-overlapping match byte-ranges for a regex in the given text.
fn find_matches(re: &Regex, text: &str) -> Vec<Range<usize>> {
    re.find_iter(text).map(|m| m.start()..m.end()).collect()
}

/// Search every item on the board, in board order.
pub fn search_items(board: &Board, re: &Regex) -> Vec<SearchHit> {
    let mut hits = Vec::new();
    for (list, items) in board.lists() {
        for (index, item) in items.iter().enumerate() {
            let fields = [
                (MatchField::Id, item.id.as_str()),
                (MatchField::Name, item.name.as_str()),
                (MatchField::Description, item.description.as_str()),
            ];
            for (field, text) in fields {
                let spans = find_matches(re, text);
                if !spans.is_empty() {
                    hits.push(SearchHit {
                        list,
                        index,
                        item_id: item.id.clone(),
                        field,
                        spans,
                    });
                }
            }
        }
    }
    hits
}

/// IDs of matching items, each reported once, in board order.
pub fn matching_ids(board: &Board, re: &Regex) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for hit in search_items(board, re) {
        if !ids.contains(&hit.item_id) {
            ids.push(hit.item_id);
        }
    }
    ids
}
