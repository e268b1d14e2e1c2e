use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sb", about = concat!("skillboard v", env!("CARGO_PKG_VERSION"), " - a plain-text three-column board"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different workspace directory
    #[arg(short = 'C', long = "board-dir", global = true)]
    pub board_dir: Option<String>,

    /// Log level for board/logs (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a board in the current directory
    Init(InitArgs),
    /// Show the lists, or a single list
    List(ListArgs),
    /// Show one item
    Show(ShowArgs),
    /// Add an item to a list
    Add(AddArgs),
    /// Delete items
    Rm(RmArgs),
    /// Move an item to a list and position
    Mv(MvArgs),
    /// Reorder an item within a list
    Reorder(ReorderArgs),
    /// Rename an item or change its description
    Edit(EditArgs),
    /// Move an item to the next list (todo → inProgress → done)
    Next(StepArgs),
    /// Move an item back to the previous list
    Back(StepArgs),
    /// Load items from a JSON snapshot
    Import(ImportArgs),
    /// Set the display title of a list
    Title(TitleArgs),
}

impl Commands {
    /// Subcommand name, for log lines
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Init(_) => "init",
            Commands::List(_) => "list",
            Commands::Show(_) => "show",
            Commands::Add(_) => "add",
            Commands::Rm(_) => "rm",
            Commands::Mv(_) => "mv",
            Commands::Reorder(_) => "reorder",
            Commands::Edit(_) => "edit",
            Commands::Next(_) => "next",
            Commands::Back(_) => "back",
            Commands::Import(_) => "import",
            Commands::Title(_) => "title",
        }
    }
}

#[derive(Args)]
pub struct InitArgs {
    /// Board name (default: inferred from directory name)
    #[arg(long)]
    pub name: Option<String>,
    /// Overwrite an existing board
    #[arg(long)]
    pub force: bool,
    /// Start with a few sample skills in every list
    #[arg(long)]
    pub demo: bool,
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// List to show (todo, inProgress, done; default: all)
    pub list: Option<String>,
    /// Only items whose id, name or description match this regex
    #[arg(long)]
    pub grep: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Item ID
    pub id: String,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Target list (todo, inProgress, done)
    pub list: String,
    /// Item name
    pub name: String,
    /// Description
    #[arg(long, short = 'd')]
    pub desc: Option<String>,
    /// Insert at this 0-based position (default: end of list)
    #[arg(long)]
    pub at: Option<usize>,
}

#[derive(Args)]
pub struct RmArgs {
    /// Item IDs
    #[arg(required = true)]
    pub ids: Vec<String>,
}

#[derive(Args)]
pub struct MvArgs {
    /// Item ID
    pub id: String,
    /// Destination list
    pub list: String,
    /// 0-based position in the destination (default: end of list)
    pub position: Option<usize>,
}

#[derive(Args)]
pub struct ReorderArgs {
    /// List to reorder
    pub list: String,
    /// Current 0-based position
    pub from: usize,
    /// New 0-based position
    pub to: usize,
}

#[derive(Args)]
pub struct EditArgs {
    /// Item ID
    pub id: String,
    /// New name
    #[arg(long)]
    pub name: Option<String>,
    /// New description (empty string clears it)
    #[arg(long, short = 'd')]
    pub desc: Option<String>,
}

#[derive(Args)]
pub struct StepArgs {
    /// Item ID
    pub id: String,
}

#[derive(Args)]
pub struct ImportArgs {
    /// JSON file with `todo`, `inProgress` and `done` arrays ("-" for stdin)
    pub file: String,
    /// Replace the current items instead of requiring an empty board
    #[arg(long)]
    pub replace: bool,
}

#[derive(Args)]
pub struct TitleArgs {
    /// List whose title to change
    pub list: String,
    /// New display title
    pub title: String,
}
