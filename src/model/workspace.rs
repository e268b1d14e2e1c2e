use std::path::PathBuf;

use super::board::Board;
use super::config::BoardConfig;

/// A fully loaded board workspace
#[derive(Debug)]
pub struct Workspace {
    /// Root directory of the workspace (parent of `board/`)
    pub root: PathBuf,
    /// Path to the `board/` directory
    pub board_dir: PathBuf,
    /// Parsed board.toml
    pub config: BoardConfig,
    /// Loaded board.md
    pub board: Board,
}
