use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};
use tempfile::NamedTempFile;

use crate::io::config_io;
use crate::model::board::Board;
use crate::model::config::BoardConfig;
use crate::model::workspace::Workspace;
use crate::ops::board_ops::{BoardError, seed_board};
use crate::parse::{parse_board, serialize_board};

/// Name of the directory holding the board files
pub const BOARD_DIR: &str = "board";
pub const CONFIG_FILE: &str = "board.toml";
pub const BOARD_FILE: &str = "board.md";

const CONFIG_TEMPLATE: &str = r##"[board]
name = ""

[ids]
prefix = "SK"

# Column titles shown in the UI. The lists themselves are always
# todo, inProgress and done.
[lists]
todo = "To Learn"
in_progress = "Learning"
done = "Done"

[log]
level = "warn"

# [ui.colors]
# background = "#0C001B"
# text = "#A09BFE"
# text_bright = "#FFFFFF"
# highlight = "#FB4196"
# dim = "#5A5580"
# red = "#FF4444"
# green = "#44FF88"
"##;

/// Error type for workspace I/O
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("not a skillboard workspace: no board/ directory found (run `sb init`)")]
    NotAWorkspace,
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("could not parse board.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("could not edit board.toml: {0}")]
    ConfigEditError(#[from] toml_edit::TomlError),
    #[error("invalid board.md: {0}")]
    InvalidBoard(#[from] BoardError),
    #[error("a board already exists in {0} (use --force to overwrite)")]
    AlreadyInitialized(PathBuf),
    #[error("io error: {0}")]
    IoError(#[from] io::Error),
}

/// Walk up from `start` looking for a directory that contains
/// `board/board.toml`. Returns the workspace root.
pub fn discover_workspace(start: &Path) -> Result<PathBuf, WorkspaceError> {
    let mut current = start.to_path_buf();
    loop {
        let board_dir = current.join(BOARD_DIR);
        if board_dir.is_dir() && board_dir.join(CONFIG_FILE).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(WorkspaceError::NotAWorkspace);
        }
    }
}

/// Load config and board from a workspace root.
///
/// The board goes through `seed_board`, so a hand-edited file with a
/// duplicate id or an empty name is rejected instead of half-loaded.
pub fn load_workspace(root: &Path) -> Result<Workspace, WorkspaceError> {
    let board_dir = root.join(BOARD_DIR);
    if !board_dir.is_dir() {
        return Err(WorkspaceError::NotAWorkspace);
    }
    let config = read_board_config(&board_dir)?;
    let board = load_board(&board_dir)?;
    Ok(Workspace {
        root: root.to_path_buf(),
        board_dir,
        config,
        board,
    })
}

/// Parse board.toml into a [`BoardConfig`]
pub fn read_board_config(board_dir: &Path) -> Result<BoardConfig, WorkspaceError> {
    let path = board_dir.join(CONFIG_FILE);
    let text = read_file(&path)?;
    Ok(toml::from_str(&text)?)
}

/// Read and validate board.md. A missing file is an empty board.
pub fn load_board(board_dir: &Path) -> Result<Board, WorkspaceError> {
    let path = board_dir.join(BOARD_FILE);
    if !path.exists() {
        return Ok(Board::new());
    }
    let text = read_file(&path)?;
    let parsed = parse_board(&text);
    for line in &parsed.dropped {
        warn!(
            "event=line_dropped file={} line={:?}",
            path.display(),
            line
        );
    }
    Ok(seed_board(parsed.snapshot)?)
}

/// Write the workspace's board back to board.md
pub fn save_board(ws: &Workspace) -> Result<(), WorkspaceError> {
    write_board(&ws.board_dir, &ws.config.board.name, &ws.board)
}

pub fn write_board(board_dir: &Path, title: &str, board: &Board) -> Result<(), WorkspaceError> {
    let path = board_dir.join(BOARD_FILE);
    let content = serialize_board(title, board);
    atomic_write(&path, content.as_bytes()).map_err(|e| {
        warn!("event=save_failed file={} error={}", path.display(), e);
        WorkspaceError::WriteError {
            path: path.clone(),
            source: e,
        }
    })?;
    info!("event=board_saved items={}", board.len());
    Ok(())
}

/// Create `board/` under `root` with a config and the given board.
/// Refuses to touch an existing board unless `force` is set.
pub fn init_workspace(
    root: &Path,
    name: &str,
    board: Board,
    force: bool,
) -> Result<Workspace, WorkspaceError> {
    let board_dir = root.join(BOARD_DIR);
    let config_path = board_dir.join(CONFIG_FILE);
    if config_path.exists() && !force {
        return Err(WorkspaceError::AlreadyInitialized(board_dir));
    }
    fs::create_dir_all(&board_dir).map_err(|e| WorkspaceError::WriteError {
        path: board_dir.clone(),
        source: e,
    })?;

    let config_text = render_config(name)?;
    atomic_write(&config_path, config_text.as_bytes()).map_err(|e| {
        WorkspaceError::WriteError {
            path: config_path.clone(),
            source: e,
        }
    })?;
    let config: BoardConfig = toml::from_str(&config_text)?;

    let ws = Workspace {
        root: root.to_path_buf(),
        board_dir,
        config,
        board,
    };
    save_board(&ws)?;
    info!(
        "event=workspace_initialized root={} items={}",
        root.display(),
        ws.board.len()
    );
    Ok(ws)
}

/// Fill the board name into the config template. Goes through toml_edit so
/// quotes in the name are escaped properly.
fn render_config(name: &str) -> Result<String, WorkspaceError> {
    let mut doc: toml_edit::DocumentMut = CONFIG_TEMPLATE.parse()?;
    config_io::set_board_name(&mut doc, name);
    Ok(doc.to_string())
}

fn read_file(path: &Path) -> Result<String, WorkspaceError> {
    fs::read_to_string(path).map_err(|e| WorkspaceError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write to a temp file in the same directory, then rename over `path`.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
