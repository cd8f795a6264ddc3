use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::RodioEngine;

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, problem) = settings::load_settings();
    let log_path = startup::init_logging(&settings);
    if let Some(msg) = problem {
        eprintln!("cadenza: {msg}");
        tracing::warn!("{msg}");
    }
    tracing::info!(log = ?log_path, "starting");

    let engine = RodioEngine::new()?;
    let store = startup::open_session_store(&settings);
    let tick = Duration::from_millis(settings.playback.tick_ms.max(1));
    let mut app = App::new(engine, store, settings);

    let args: Vec<PathBuf> = env::args_os().skip(1).map(PathBuf::from).collect();
    startup::apply_launch_args(&mut app, args);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::new(tick);
        event_loop::run(&mut terminal, &mut app, &mut state)
    })();

    app.save_session(true);
    tracing::info!("exiting");

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
