use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::board::ListKind;

/// Configuration from board.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub board: BoardInfo,
    #[serde(default)]
    pub ids: IdConfig,
    #[serde(default)]
    pub lists: ListTitles,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl BoardConfig {
    pub fn new(name: &str) -> Self {
        BoardConfig {
            board: BoardInfo {
                name: name.to_string(),
            },
            ids: IdConfig::default(),
            lists: ListTitles::default(),
            log: LogConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardInfo {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdConfig {
    /// Prefix for generated item IDs (`SK` → `SK-001`)
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for IdConfig {
    fn default() -> Self {
        IdConfig {
            prefix: default_prefix(),
        }
    }
}

fn default_prefix() -> String {
    "SK".to_string()
}

/// Display titles for the three columns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTitles {
    #[serde(default = "default_todo_title")]
    pub todo: String,
    #[serde(default = "default_in_progress_title")]
    pub in_progress: String,
    #[serde(default = "default_done_title")]
    pub done: String,
}

impl Default for ListTitles {
    fn default() -> Self {
        ListTitles {
            todo: default_todo_title(),
            in_progress: default_in_progress_title(),
            done: default_done_title(),
        }
    }
}

impl ListTitles {
    pub fn title(&self, kind: ListKind) -> &str {
        match kind {
            ListKind::Todo => &self.todo,
            ListKind::InProgress => &self.in_progress,
            ListKind::Done => &self.done,
        }
    }

    /// Key of this list's entry in the `[lists]` table
    pub fn config_key(kind: ListKind) -> &'static str {
        match kind {
            ListKind::Todo => "todo",
            ListKind::InProgress => "in_progress",
            ListKind::Done => "done",
        }
    }
}

fn default_todo_title() -> String {
    "To Learn".to_string()
}

fn default_in_progress_title() -> String {
    "Learning".to_string()
}

fn default_done_title() -> String {
    "Done".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// trace | debug | info | warn | error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    #[serde(default)]
    pub colors: HashMap<String, String>,
}
