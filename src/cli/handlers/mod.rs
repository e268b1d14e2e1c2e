mod init;
pub use init::cmd_init;

use std::error::Error;
use std::io::Read;
use std::path::PathBuf;

use log::{info, warn};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::board_io::{self, BOARD_DIR};
use crate::io::config_io;
use crate::io::lock::FileLock;
use crate::logging;
use crate::model::board::BoardSnapshot;
use crate::model::item::Item;
use crate::model::workspace::Workspace;
use crate::ops::board_ops::{self, BoardError};
use crate::ops::search;

type CmdResult = Result<(), Box<dyn Error>>;

/// Settings shared by every command, taken from the global flags
pub struct Context {
    pub json: bool,
    /// Directory to start workspace discovery from (`-C` or the cwd)
    pub start: PathBuf,
    pub log_level: Option<String>,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self, Box<dyn Error>> {
        let start = match cli.board_dir {
            Some(ref dir) => std::fs::canonicalize(dir)
                .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?,
            None => std::env::current_dir()?,
        };
        Ok(Context {
            json: cli.json,
            start,
            log_level: cli.log_level.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let ctx = Context::from_cli(&cli)?;

    let Some(cmd) = cli.command else {
        return crate::tui::run(&ctx.start, ctx.log_level.as_deref());
    };

    let name = cmd.name();
    let result = match cmd {
        // Init runs before there is a workspace to discover
        Commands::Init(args) => cmd_init(args, &ctx),

        // Read commands
        Commands::List(args) => cmd_list(args, &ctx),
        Commands::Show(args) => cmd_show(args, &ctx),

        // Write commands
        Commands::Add(args) => cmd_add(args, &ctx),
        Commands::Rm(args) => cmd_rm(args, &ctx),
        Commands::Mv(args) => cmd_mv(args, &ctx),
        Commands::Reorder(args) => cmd_reorder(args, &ctx),
        Commands::Edit(args) => cmd_edit(args, &ctx),
        Commands::Next(args) => cmd_step(args, &ctx, true),
        Commands::Back(args) => cmd_step(args, &ctx, false),
        Commands::Import(args) => cmd_import(args, &ctx),
        Commands::Title(args) => cmd_title(args, &ctx),
    };
    match result {
        Ok(()) => info!("event=command_finished command={} status=ok", name),
        Err(ref e) => warn!(
            "event=command_finished command={} status=error error={:?}",
            name,
            e.to_string()
        ),
    }
    result
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Find the workspace root and start logging for it
fn open_workspace(ctx: &Context) -> Result<PathBuf, Box<dyn Error>> {
    let root = board_io::discover_workspace(&ctx.start)?;
    logging::init_for_board(&root.join(BOARD_DIR), ctx.log_level.as_deref());
    Ok(root)
}

fn read_workspace(ctx: &Context) -> Result<Workspace, Box<dyn Error>> {
    let root = open_workspace(ctx)?;
    Ok(board_io::load_workspace(&root)?)
}

/// Run `f` as one read-modify-write cycle: lock, load, mutate, save.
/// If `f` fails nothing is written. Returns the saved workspace.
fn write_workspace<T>(
    ctx: &Context,
    f: impl FnOnce(&mut Workspace) -> Result<T, Box<dyn Error>>,
) -> Result<(Workspace, T), Box<dyn Error>> {
    let root = open_workspace(ctx)?;
    let _lock = FileLock::acquire_default(&root.join(BOARD_DIR))?;
    let mut ws = board_io::load_workspace(&root)?;
    let out = f(&mut ws)?;
    board_io::save_board(&ws)?;
    Ok((ws, out))
}

/// Print an item's location as JSON
fn print_item_json(ws: &Workspace, id: &str) -> CmdResult {
    let (list, index) = ws
        .board
        .locate(id)
        .ok_or_else(|| BoardError::NotFound(id.to_string()))?;
    let item = &ws.board.list(list)[index];
    println!(
        "{}",
        serde_json::to_string_pretty(&item_to_json(item, list, index))?
    );
    Ok(())
}

fn read_input(path: &str) -> Result<String, Box<dyn Error>> {
    if path == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        std::fs::read_to_string(path).map_err(|e| format!("could not read {}: {}", path, e).into())
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(args: ListArgs, ctx: &Context) -> CmdResult {
    let ws = read_workspace(ctx)?;
    let list = args.list.as_deref().map(board_ops::parse_list).transpose()?;
    let matching = args
        .grep
        .as_deref()
        .map(|pattern| search::matching_ids(&ws.board, &search::build_regex(pattern)));
    let keep = |item: &Item| matching.as_ref().is_none_or(|ids| ids.contains(&item.id));
    let titles = &ws.config.lists;

    match (list, ctx.json) {
        (Some(kind), true) => {
            let out = ListJson {
                list: kind,
                title: titles.title(kind),
                items: ws.board.list(kind).iter().filter(|&i| keep(i)).collect(),
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        (None, true) => {
            let mut snapshot: BoardSnapshot = ws.board.snapshot();
            for (kind, _) in ws.board.lists() {
                snapshot.list_mut(kind).retain(|i| keep(i));
            }
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        (Some(kind), false) => {
            let kept: Vec<&Item> = ws.board.list(kind).iter().filter(|&i| keep(i)).collect();
            for line in format_list(kind, titles, &kept) {
                println!("{}", line);
            }
        }
        (None, false) => {
            for line in format_board(&ws.board, titles, keep) {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

fn cmd_show(args: ShowArgs, ctx: &Context) -> CmdResult {
    let ws = read_workspace(ctx)?;
    if ctx.json {
        return print_item_json(&ws, &args.id);
    }
    let (list, index) = ws
        .board
        .locate(&args.id)
        .ok_or_else(|| BoardError::NotFound(args.id.clone()))?;
    let item = &ws.board.list(list)[index];
    for line in format_item_detail(item, list, index, &ws.config.lists) {
        println!("{}", line);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs, ctx: &Context) -> CmdResult {
    let list = board_ops::parse_list(&args.list)?;
    let (ws, item) = write_workspace(ctx, |ws| {
        Ok(board_ops::add_item(
            &mut ws.board,
            list,
            &args.name,
            args.desc.as_deref().unwrap_or(""),
            args.at,
            &ws.config.ids.prefix,
        )?)
    })?;
    if ctx.json {
        print_item_json(&ws, &item.id)
    } else {
        println!("{}", item.id);
        Ok(())
    }
}

fn cmd_rm(args: RmArgs, ctx: &Context) -> CmdResult {
    let (_, (deleted, missing)) = write_workspace(ctx, |ws| {
        let mut deleted = Vec::new();
        let mut missing = Vec::new();
        for id in &args.ids {
            match board_ops::delete_item(&mut ws.board, id) {
                Some(item) => deleted.push(item.id),
                None => missing.push(id.clone()),
            }
        }
        Ok((deleted, missing))
    })?;

    if ctx.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&RmJson { deleted, missing })?
        );
    } else {
        for id in &missing {
            eprintln!("warning: item not found: {}", id);
        }
    }
    Ok(())
}

fn cmd_mv(args: MvArgs, ctx: &Context) -> CmdResult {
    let target = board_ops::parse_list(&args.list)?;
    let (ws, ()) = write_workspace(ctx, |ws| {
        // Past-the-end positions clamp to the end of the list
        let position = args.position.unwrap_or(usize::MAX);
        Ok(board_ops::move_item(&mut ws.board, &args.id, target, position)?)
    })?;
    if ctx.json {
        print_item_json(&ws, &args.id)?;
    }
    Ok(())
}

fn cmd_reorder(args: ReorderArgs, ctx: &Context) -> CmdResult {
    let list = board_ops::parse_list(&args.list)?;
    let (ws, id) = write_workspace(ctx, |ws| {
        let id = ws.board.list(list).get(args.from).map(|i| i.id.clone());
        board_ops::reorder(&mut ws.board, list, args.from, args.to)?;
        Ok(id)
    })?;
    if ctx.json
        && let Some(id) = id
    {
        print_item_json(&ws, &id)?;
    }
    Ok(())
}

fn cmd_edit(args: EditArgs, ctx: &Context) -> CmdResult {
    if args.name.is_none() && args.desc.is_none() {
        return Err("nothing to change: pass --name and/or --desc".into());
    }
    let (ws, ()) = write_workspace(ctx, |ws| {
        Ok(board_ops::update_item(
            &mut ws.board,
            &args.id,
            args.name.as_deref(),
            args.desc.as_deref(),
        )?)
    })?;
    if ctx.json {
        print_item_json(&ws, &args.id)?;
    }
    Ok(())
}

fn cmd_step(args: StepArgs, ctx: &Context, forward: bool) -> CmdResult {
    let (ws, list) = write_workspace(ctx, |ws| {
        let list = if forward {
            board_ops::advance_item(&mut ws.board, &args.id)?
        } else {
            board_ops::retreat_item(&mut ws.board, &args.id)?
        };
        Ok(list)
    })?;
    if ctx.json {
        print_item_json(&ws, &args.id)
    } else {
        println!("{} -> {}", args.id, ws.config.lists.title(list));
        Ok(())
    }
}

fn cmd_import(args: ImportArgs, ctx: &Context) -> CmdResult {
    let text = read_input(&args.file)?;
    let snapshot: BoardSnapshot = serde_json::from_str(&text)
        .map_err(|e| format!("invalid snapshot {}: {}", args.file, e))?;
    let imported = board_ops::seed_board(snapshot)?;
    let count = imported.len();

    write_workspace(ctx, |ws| {
        if !args.replace && !ws.board.is_empty() {
            return Err(format!(
                "board already has {} items (use --replace to overwrite them)",
                ws.board.len()
            )
            .into());
        }
        ws.board = imported;
        info!("event=board_imported items={} replace={}", count, args.replace);
        Ok(())
    })?;

    if !ctx.json {
        println!("imported {} items", count);
    }
    Ok(())
}

fn cmd_title(args: TitleArgs, ctx: &Context) -> CmdResult {
    let list = board_ops::parse_list(&args.list)?;
    let title = args.title.trim();
    if title.is_empty() {
        return Err(BoardError::Validation("list title cannot be empty".into()).into());
    }

    let root = open_workspace(ctx)?;
    let board_dir = root.join(BOARD_DIR);
    let _lock = FileLock::acquire_default(&board_dir)?;
    let (_config, mut doc) = config_io::read_config(&board_dir)?;
    config_io::set_list_title(&mut doc, list, title);
    config_io::write_config(&board_dir, &doc)?;
    info!("event=list_retitled list={} title={:?}", list.key(), title);
    Ok(())
}
