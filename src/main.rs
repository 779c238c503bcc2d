use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use snake::app::App;
use snake::config::GameConfig;
use snake::core::constants::INPUT_POLL_MS;
use snake::records::{JsonRecordStore, MemoryRecordStore, RecordStore};
use snake::utils::logging;
use snake::{input, ui};
use std::io;
use std::time::{Duration, Instant};

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!("snake {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Snake - terminal snake game\n");
                println!("Usage: snake [option]\n");
                println!("Options:");
                println!("  --version  Show version information");
                println!("  --help     Show this help message\n");
                println!("Settings are read from ~/.snake/config.json.");
                println!("Records are kept in ~/.snake/records.json.");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'snake --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    if let Err(e) = logging::init() {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let config = GameConfig::load();
    let grid = config.grid().map_err(io::Error::other)?;
    let store: Box<dyn RecordStore> = match JsonRecordStore::in_data_dir(&config.records_file) {
        Ok(store) => {
            tracing::info!(path = %store.path().display(), "using record file");
            Box::new(store)
        }
        Err(e) => {
            tracing::warn!(error = %e, "no data directory, records will not be kept");
            Box::new(MemoryRecordStore::default())
        }
    };
    let mut app = App::new(grid, config.difficulty(), store);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "exiting after error");
    }
    result
}

/// Main loop: draw, wait for input until the next tick is due, then tick.
fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    let idle_poll = Duration::from_millis(INPUT_POLL_MS);
    let mut next_tick: Option<Instant> = None;

    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if app.should_exit() {
            return Ok(());
        }

        // Arm the tick clock on entering play; disarm it in menus and pause
        next_tick = match (app.tick_interval(), next_tick) {
            (Some(interval), None) => Some(Instant::now() + interval),
            (Some(_), armed) => armed,
            (None, _) => None,
        };

        let timeout = next_tick
            .map(|due| due.saturating_duration_since(Instant::now()))
            .unwrap_or(idle_poll);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if let Some(action) = input::map_key(key) {
                    app.handle(action).map_err(io::Error::other)?;
                }
            }
        }

        if let Some(due) = next_tick {
            if Instant::now() >= due {
                app.tick().map_err(io::Error::other)?;
                next_tick = app.tick_interval().map(|interval| Instant::now() + interval);
            }
        }
    }
}
