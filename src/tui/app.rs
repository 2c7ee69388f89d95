use std::io;
use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::config_io::load_config;
use crate::model::config::BoardConfig;
use crate::model::roster::TAGS;
use crate::model::task::Status;
use crate::ops::board::{
    self, BoardCommand, CardModel, ColumnModel, Counters, FilterState, build_columns, counters,
};
use crate::ops::metrics::{MetricsReport, build_report};
use crate::ops::store::TaskStore;

use super::input;
use super::render;
use super::theme::Theme;

/// Which view is currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Board,
    Metrics,
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// A card is picked up and being dragged between columns
    Drag,
    /// The new-task form popup is open
    Form,
    /// A destructive action awaits confirmation
    Confirm,
}

/// The dragging half of the idle/dragging state machine. Holds both the
/// task id and a snapshot of the picked card; the snapshot is what the
/// board paints while the drag is in flight.
#[derive(Debug, Clone)]
pub struct DragState {
    pub task_id: String,
    pub card: CardModel,
    pub from: Status,
    pub target: Status,
}

/// Which form field has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Assignee,
    Tags,
}

impl FormField {
    pub fn next(self) -> FormField {
        match self {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Assignee,
            FormField::Assignee => FormField::Tags,
            FormField::Tags => FormField::Title,
        }
    }

    pub fn prev(self) -> FormField {
        match self {
            FormField::Title => FormField::Tags,
            FormField::Description => FormField::Title,
            FormField::Assignee => FormField::Description,
            FormField::Tags => FormField::Assignee,
        }
    }
}

/// State of the new-task popup form
#[derive(Debug, Clone)]
pub struct FormState {
    pub field: FormField,
    pub title: String,
    /// Byte offset into `title`, always on a grapheme boundary
    pub title_cursor: usize,
    pub description: String,
    pub description_cursor: usize,
    /// Index into the roster; None = unassigned
    pub assignee: Option<usize>,
    pub tags_selected: [bool; TAGS.len()],
    pub tag_cursor: usize,
}

impl FormState {
    pub fn new() -> FormState {
        FormState {
            field: FormField::Title,
            title: String::new(),
            title_cursor: 0,
            description: String::new(),
            description_cursor: 0,
            assignee: None,
            tags_selected: [false; TAGS.len()],
            tag_cursor: 0,
        }
    }

    pub fn selected_tags(&self) -> Vec<String> {
        TAGS.iter()
            .zip(self.tags_selected)
            .filter(|(_, on)| *on)
            .map(|(tag, _)| tag.to_string())
            .collect()
    }
}

impl Default for FormState {
    fn default() -> Self {
        FormState::new()
    }
}

/// A pending destructive action
#[derive(Debug, Clone)]
pub enum ConfirmAction {
    DeleteTask { id: String, title: String },
}

/// Main application state. Owns the store and the filter state; all
/// mutations go through `dispatch`.
pub struct App {
    pub store: TaskStore,
    pub filters: FilterState,
    pub theme: Theme,
    pub view: View,
    pub mode: Mode,
    pub should_quit: bool,
    /// Board cursor: column index and card index within that column
    pub selected_column: usize,
    pub selected_row: usize,
    /// First visible card per column
    pub column_scroll: [usize; 3],
    pub drag: Option<DragState>,
    pub form: Option<FormState>,
    pub confirm: Option<ConfirmAction>,
    /// Dashboard data, rebuilt when the metrics view is entered
    pub metrics: Option<MetricsReport>,
    pub status_message: Option<String>,
}

impl App {
    pub fn new(store: TaskStore, config: &BoardConfig, view: View) -> App {
        let mut app = App {
            store,
            filters: FilterState::default(),
            theme: Theme::from_config(&config.ui),
            view,
            mode: Mode::Navigate,
            should_quit: false,
            selected_column: 0,
            selected_row: 0,
            column_scroll: [0; 3],
            drag: None,
            form: None,
            confirm: None,
            metrics: None,
            status_message: None,
        };
        if app.view == View::Metrics {
            app.refresh_metrics();
        }
        app
    }

    /// Route a normalized command into the store/filter state
    pub fn dispatch(&mut self, command: BoardCommand) {
        board::dispatch(&mut self.store, &mut self.filters, command);
        self.clamp_cursor();
    }

    /// The three columns, rebuilt from the full sequence on every call
    pub fn columns(&self) -> [ColumnModel; 3] {
        build_columns(self.store.tasks(), &self.filters)
    }

    /// Unfiltered per-column counts and total
    pub fn counters(&self) -> Counters {
        counters(self.store.tasks())
    }

    pub fn selected_status(&self) -> Status {
        Status::ALL[self.selected_column.min(2)]
    }

    /// Card under the cursor, if any
    pub fn selected_card(&self) -> Option<CardModel> {
        let columns = self.columns();
        columns[self.selected_column.min(2)]
            .cards
            .get(self.selected_row)
            .cloned()
    }

    /// Keep the cursor inside the current column's card list
    pub fn clamp_cursor(&mut self) {
        let columns = self.columns();
        let len = columns[self.selected_column.min(2)].cards.len();
        if len == 0 {
            self.selected_row = 0;
        } else if self.selected_row >= len {
            self.selected_row = len - 1;
        }
    }

    /// Recompute the dashboard from the current task sequence, the
    /// metrics equivalent of a page load
    pub fn refresh_metrics(&mut self) {
        self.metrics = Some(build_report(self.store.tasks(), Utc::now()));
    }
}

/// Run the TUI application
pub fn run(data_dir: &Path, open_metrics: bool) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(data_dir)?;
    let config = load_config(data_dir);

    let store = if open_metrics {
        TaskStore::open_readonly(data_dir.to_path_buf())
    } else {
        TaskStore::open(data_dir.to_path_buf())
    };
    let view = if open_metrics { View::Metrics } else { View::Board };
    let mut app = App::new(store, &config, view);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
