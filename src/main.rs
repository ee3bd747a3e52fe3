mod app;
mod config;
mod core;
mod domain;
mod infrastructure;
mod modules;
mod store;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::app::{App, AppRequest, InputMode, StatusLevel};
use crate::core::{parse_command, Action, Command, ExportFormat, NavigateTarget, NotifyLevel};
use crate::infrastructure::backend::{Backend, FixtureBackend, SnapshotBackend};
use crate::infrastructure::runtime::{RuntimeBridge, RuntimeCommand, RuntimeEvent};
use crate::modules::export;
use crate::store::view_state;

#[derive(Debug, Parser)]
#[command(
    name = "scry",
    version,
    about = "Scry: a chain-data explorer TUI with multi-column sorting"
)]
struct Args {
    /// Snapshot JSON file to explore (overrides the config file)
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Do not load or save per-view sort state
    #[arg(long)]
    no_persist: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = config::load();

    let state_path = if args.no_persist {
        None
    } else {
        view_state::state_path()
    };
    let state = state_path
        .as_deref()
        .map(view_state::load)
        .unwrap_or_default();

    let backend: Box<dyn Backend> = match args.snapshot.clone().or(config.snapshot.clone()) {
        Some(path) => Box::new(SnapshotBackend::new(path)),
        None => Box::new(FixtureBackend),
    };

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let terminal_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(terminal_backend)?;

    let bridge = RuntimeBridge::new(backend);
    let mut app = App::new(&config, state);

    let result = run(&mut terminal, &mut app, &bridge);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Some(path) = state_path {
        if let Err(err) = view_state::save(&path, &app.view_state) {
            eprintln!("warning: could not save view state: {err:#}");
        }
    }

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    bridge: &RuntimeBridge,
) -> Result<()> {
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    loop {
        for evt in bridge.poll_events() {
            match evt {
                RuntimeEvent::SnapshotReady { source, snapshot } => {
                    app.apply_snapshot(source, *snapshot);
                }
                RuntimeEvent::LoadFailed { message } => {
                    app.loading = false;
                    app.set_status(message, StatusLevel::Error);
                }
            }
        }

        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let action = handle_key(app, key);
                    dispatch(app, bridge, action);
                }
                Event::Mouse(mouse) => {
                    handle_mouse(app, terminal.size()?, mouse);
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) -> Action {
    match app.input_mode {
        InputMode::Command => handle_command_key(app, key),
        InputMode::Normal => handle_normal_key(app, key),
    }
}

fn handle_normal_key(app: &mut App, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_buffer.clear();
            Action::None
        }
        KeyCode::Char('1') => Action::Navigate(NavigateTarget::Blocks),
        KeyCode::Char('2') => Action::Navigate(NavigateTarget::Transactions),
        KeyCode::Char('3') => Action::Navigate(NavigateTarget::Contracts),
        KeyCode::Char('4') => Action::Navigate(NavigateTarget::Monitors),
        KeyCode::Char('5') => Action::Navigate(NavigateTarget::Names),
        KeyCode::Tab => {
            app.next_section();
            Action::None
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_row(1);
            Action::None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_row(-1);
            Action::None
        }
        KeyCode::Char('h') | KeyCode::Left => {
            app.move_column(-1);
            Action::None
        }
        KeyCode::Char('l') | KeyCode::Right => {
            app.move_column(1);
            Action::None
        }
        // sort-click the highlighted column
        KeyCode::Char('s') | KeyCode::Enter => {
            let column = app.cursor(app.active_section).column;
            app.click_column(column);
            Action::None
        }
        KeyCode::Char('c') => Action::ClearSort,
        KeyCode::Char('e') => export_request(app, ExportFormat::Csv, None),
        KeyCode::Char('r') => Action::Reload,
        _ => Action::None,
    }
}

fn handle_command_key(app: &mut App, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_buffer.clear();
            Action::None
        }
        KeyCode::Backspace => {
            app.command_buffer.pop();
            Action::None
        }
        KeyCode::Enter => {
            let input = std::mem::take(&mut app.command_buffer);
            app.input_mode = InputMode::Normal;
            command_action(parse_command(&input))
        }
        KeyCode::Char(c) => {
            app.command_buffer.push(c);
            Action::None
        }
        _ => Action::None,
    }
}

fn handle_mouse(app: &mut App, size: ratatui::layout::Rect, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let areas = ui::layout::areas(size);
    if mouse.row != ui::header_row_y(areas.table) {
        return;
    }
    if let Some(column) = ui::column_at(app.active_section, areas.table, mouse.column) {
        app.click_column(column);
    }
}

fn command_action(cmd: Command) -> Action {
    match cmd {
        Command::Blocks => Action::Navigate(NavigateTarget::Blocks),
        Command::Transactions => Action::Navigate(NavigateTarget::Transactions),
        Command::Contracts => Action::Navigate(NavigateTarget::Contracts),
        Command::Monitors => Action::Navigate(NavigateTarget::Monitors),
        Command::Names => Action::Navigate(NavigateTarget::Names),
        Command::Sort { field, direction } => Action::SetSort { field, direction },
        Command::SortClear => Action::ClearSort,
        Command::Export { format, path } => Action::Export { format, path },
        Command::Reload => Action::Reload,
        Command::Quit => Action::Quit,
        Command::Unknown(input) => {
            Action::Notify(format!("Unknown command: {input}"), NotifyLevel::Warn)
        }
    }
}

fn export_request(app: &App, format: ExportFormat, path: Option<PathBuf>) -> Action {
    export::export_section(app, format, path)
}

fn dispatch(app: &mut App, bridge: &RuntimeBridge, action: Action) {
    let Some(request) = app.apply_action(action) else {
        return;
    };
    match request {
        AppRequest::Reload => {
            app.loading = true;
            if bridge.send(RuntimeCommand::Reload).is_err() {
                app.set_status("Backend worker is gone", StatusLevel::Error);
            } else {
                app.set_status("Reloading snapshot…", StatusLevel::Info);
            }
        }
        AppRequest::Export { format, path } => {
            let action = export_request(app, format, path);
            app.apply_action(action);
        }
    }
}
