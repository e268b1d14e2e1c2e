use std::path::Path;

use crate::io::board_io::{CONFIG_FILE, WorkspaceError, atomic_write};
use crate::model::board::ListKind;
use crate::model::config::{BoardConfig, ListTitles};

/// Read board.toml, returning both the parsed config and the raw
/// toml_edit document for round-trip-safe editing.
pub fn read_config(
    board_dir: &Path,
) -> Result<(BoardConfig, toml_edit::DocumentMut), WorkspaceError> {
    let path = board_dir.join(CONFIG_FILE);
    let text = std::fs::read_to_string(&path).map_err(|e| WorkspaceError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    let config: BoardConfig = toml::from_str(&text)?;
    let doc: toml_edit::DocumentMut = text.parse()?;
    Ok((config, doc))
}

/// Write the document back, preserving comments and formatting.
pub fn write_config(board_dir: &Path, doc: &toml_edit::DocumentMut) -> Result<(), WorkspaceError> {
    let path = board_dir.join(CONFIG_FILE);
    atomic_write(&path, doc.to_string().as_bytes())
        .map_err(|e| WorkspaceError::WriteError { path, source: e })
}

/// Set the display title of one column
pub fn set_list_title(doc: &mut toml_edit::DocumentMut, list: ListKind, title: &str) {
    if !doc.contains_key("lists") {
        doc["lists"] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    doc["lists"][ListTitles::config_key(list)] = toml_edit::value(title);
}

/// Set `[board] name`
pub fn set_board_name(doc: &mut toml_edit::DocumentMut, name: &str) {
    doc["board"]["name"] = toml_edit::value(name);
}
