use log::info;

use super::{CmdResult, Context};
use crate::cli::commands::InitArgs;
use crate::io::board_io::{self, BOARD_DIR};
use crate::logging;
use crate::model::board::{Board, ListKind};
use crate::ops::board_ops::{BoardError, add_item};

const DEMO_PREFIX: &str = "SK";

/// Sample skills per list, with the description template for that list
const DEMO_SKILLS: [(ListKind, &[&str], &str); 3] = [
    (
        ListKind::Todo,
        &["TypeScript", "Docker", "GraphQL"],
        "Master {} fundamentals",
    ),
    (
        ListKind::InProgress,
        &["React", "Node.js"],
        "Currently learning {}",
    ),
    (
        ListKind::Done,
        &["HTML", "CSS", "JavaScript"],
        "Successfully completed {}",
    ),
];

/// Infer a board name from a directory name: hyphens and underscores become
/// spaces, words are title-cased.
fn infer_name(dir_name: &str) -> String {
    dir_name
        .split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A board pre-filled with a few skills in every list.
pub fn demo_board() -> Result<Board, BoardError> {
    let mut board = Board::new();
    for (list, names, template) in DEMO_SKILLS {
        for name in names {
            let description = template.replace("{}", name);
            add_item(&mut board, list, name, &description, None, DEMO_PREFIX)?;
        }
    }
    Ok(board)
}

pub fn cmd_init(args: InitArgs, ctx: &Context) -> CmdResult {
    let root = &ctx.start;

    if let Some(parent) = root.parent()
        && let Ok(parent_root) = board_io::discover_workspace(parent)
    {
        eprintln!(
            "note: parent board found at {}/",
            parent_root.join(BOARD_DIR).display()
        );
    }

    let name = match args.name {
        Some(name) if !name.trim().is_empty() => name.trim().to_string(),
        Some(_) => return Err(BoardError::Validation("board name cannot be empty".into()).into()),
        None => root
            .file_name()
            .and_then(|n| n.to_str())
            .map(infer_name)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Skills".to_string()),
    };

    let board = if args.demo { demo_board()? } else { Board::new() };
    let ws = board_io::init_workspace(root, &name, board, args.force)?;
    logging::init_for_board(&ws.board_dir, ctx.log_level.as_deref());
    info!(
        "event=init name={:?} demo={} force={}",
        name, args.demo, args.force
    );

    println!("Initialized board: {}", name);
    if args.demo {
        for (kind, items) in ws.board.lists() {
            println!("  {}: {} items", ws.config.lists.title(kind), items.len());
        }
    }
    Ok(())
}
