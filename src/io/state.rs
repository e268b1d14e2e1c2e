use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::board::ListKind;

const STATE_FILE: &str = ".state.json";

/// Persisted TUI state (written to board/.state.json)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiState {
    /// Focused column
    pub list: ListKind,
    /// Cursor row within that column
    #[serde(default)]
    pub index: usize,
}

impl Default for UiState {
    fn default() -> Self {
        UiState {
            list: ListKind::Todo,
            index: 0,
        }
    }
}

/// Read the saved state. A missing or unreadable file gives `None`.
pub fn read_ui_state(board_dir: &Path) -> Option<UiState> {
    let content = fs::read_to_string(board_dir.join(STATE_FILE)).ok()?;
    serde_json::from_str(&content).ok()
}

pub fn write_ui_state(board_dir: &Path, state: &UiState) -> Result<(), std::io::Error> {
    let content = serde_json::to_string_pretty(state)?;
    fs::write(board_dir.join(STATE_FILE), content)
}
