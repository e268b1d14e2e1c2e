use std::error::Error;
use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{info, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::board_io::{self, BOARD_DIR};
use crate::io::lock::FileLock;
use crate::io::state::{UiState, read_ui_state, write_ui_state};
use crate::io::watcher::{BoardWatcher, FileEvent};
use crate::logging;
use crate::model::board::{Board, ListKind};
use crate::model::item::Item;
use crate::model::workspace::Workspace;

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Carrying an item around the board
    Move,
    /// Typing a name
    Edit,
}

/// Where the item being moved started, so Esc can put it back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveState {
    pub item_id: String,
    pub original_list: ListKind,
    pub original_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    /// Adding a new item at the end of this list
    NewItem(ListKind),
    /// Renaming an existing item
    Rename(String),
}

/// Single-line text input. `cursor` is a byte offset on a grapheme boundary.
#[derive(Debug, Clone)]
pub struct EditState {
    pub target: EditTarget,
    pub buffer: String,
    pub cursor: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Outcome of writing the board back to disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// board.md was changed by someone else; the disk version was loaded
    /// and the in-memory change dropped
    Conflict,
}

/// Main application state
pub struct App {
    pub ws: Workspace,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    /// Focused column
    pub list: ListKind,
    /// Cursor row per column, in board order
    pub rows: [usize; 3],
    pub move_state: Option<MoveState>,
    pub edit: Option<EditState>,
    pub status: Option<StatusMessage>,
    /// Board as last read from or written to disk
    synced: Board,
}

impl App {
    pub fn new(ws: Workspace) -> Self {
        let theme = Theme::from_config(&ws.config.ui);
        let synced = ws.board.clone();
        App {
            ws,
            mode: Mode::Navigate,
            should_quit: false,
            theme,
            list: ListKind::Todo,
            rows: [0; 3],
            move_state: None,
            edit: None,
            status: None,
            synced,
        }
    }

    /// Cursor row in the focused column
    pub fn row(&self) -> usize {
        self.rows[self.list.index()]
    }

    pub fn set_row(&mut self, row: usize) {
        self.rows[self.list.index()] = row;
        self.clamp_rows();
    }

    /// Keep every column's cursor inside its list
    pub fn clamp_rows(&mut self) {
        for kind in ListKind::ALL {
            let len = self.ws.board.list(kind).len();
            let row = &mut self.rows[kind.index()];
            *row = (*row).min(len.saturating_sub(1));
        }
    }

    /// The item under the cursor, if the focused column is not empty
    pub fn cursor_item(&self) -> Option<&Item> {
        self.ws.board.list(self.list).get(self.row())
    }

    /// Put the cursor on `id`, wherever it is
    pub fn focus_item(&mut self, id: &str) {
        if let Some((list, index)) = self.ws.board.locate(id) {
            self.list = list;
            self.rows[list.index()] = index;
        }
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: true,
        });
    }

    pub fn list_title(&self, kind: ListKind) -> &str {
        self.ws.config.lists.title(kind)
    }

    /// Write the board under the file lock. If the file changed on disk
    /// since we last saw it, the disk version wins.
    pub fn try_save(&mut self) -> Result<SaveOutcome, Box<dyn Error>> {
        let _lock = FileLock::acquire_default(&self.ws.board_dir)?;
        let on_disk = board_io::load_board(&self.ws.board_dir)?;
        if on_disk != self.synced {
            warn!("event=save_conflict items_on_disk={}", on_disk.len());
            self.ws.board = on_disk.clone();
            self.synced = on_disk;
            self.clamp_rows();
            return Ok(SaveOutcome::Conflict);
        }
        board_io::save_board(&self.ws)?;
        self.synced = self.ws.board.clone();
        Ok(SaveOutcome::Saved)
    }

    /// Save and report problems in the status row. Returns true when the
    /// change reached the disk.
    pub fn save(&mut self) -> bool {
        match self.try_save() {
            Ok(SaveOutcome::Saved) => true,
            Ok(SaveOutcome::Conflict) => {
                self.set_error("board.md changed on disk: reloaded, last change discarded");
                false
            }
            Err(e) => {
                // Unsaved edits must not ride along with a later save
                warn!("event=save_failed error={}", e);
                self.ws.board = self.synced.clone();
                self.clamp_rows();
                self.set_error(format!("save failed: {} (change discarded)", e));
                false
            }
        }
    }

    /// Pick up edits made by other processes. Our own saves look identical
    /// to what we hold and are ignored.
    pub fn reload_from_disk(&mut self) {
        match board_io::read_board_config(&self.ws.board_dir) {
            Ok(config) => {
                self.theme = Theme::from_config(&config.ui);
                self.ws.config = config;
            }
            Err(e) => {
                self.set_error(format!("could not reload board.toml: {}", e));
                return;
            }
        }
        let on_disk = match board_io::load_board(&self.ws.board_dir) {
            Ok(board) => board,
            Err(e) => {
                self.set_error(format!("could not reload board.md: {}", e));
                return;
            }
        };
        if on_disk == self.synced {
            return;
        }
        if self.mode == Mode::Move {
            self.move_state = None;
            self.mode = Mode::Navigate;
        }
        info!("event=board_reloaded items={}", on_disk.len());
        self.ws.board = on_disk.clone();
        self.synced = on_disk;
        self.clamp_rows();
        self.set_info("board.md changed on disk: reloaded");
    }
}

/// Restore the cursor from .state.json
pub fn restore_ui_state(app: &mut App) {
    if let Some(state) = read_ui_state(&app.ws.board_dir) {
        app.list = state.list;
        app.set_row(state.index);
    }
}

pub fn save_ui_state(app: &App) {
    let state = UiState {
        list: app.list,
        index: app.row(),
    };
    if let Err(e) = write_ui_state(&app.ws.board_dir, &state) {
        warn!("event=state_save_failed error={}", e);
    }
}

/// Run the TUI against the workspace found from `start`
pub fn run(start: &Path, log_level: Option<&str>) -> Result<(), Box<dyn Error>> {
    let root = board_io::discover_workspace(start)?;
    let board_dir = root.join(BOARD_DIR);
    logging::init_for_board(&board_dir, log_level);
    let ws = board_io::load_workspace(&root)?;

    let mut app = App::new(ws);
    restore_ui_state(&mut app);

    let watcher = match BoardWatcher::start(&board_dir) {
        Ok(w) => Some(w),
        Err(e) => {
            warn!("event=watcher_failed error={}", e);
            None
        }
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    info!("event=tui_started items={}", app.ws.board.len());
    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref());

    save_ui_state(&app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&BoardWatcher>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if let Some(watcher) = watcher {
            let events = watcher.poll();
            if events.iter().any(|e| matches!(e, FileEvent::Changed(_))) {
                app.reload_from_disk();
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
