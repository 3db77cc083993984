#![warn(clippy::all, clippy::pedantic)]

use std::io;
use std::time::{Duration, Instant};

use blocktris::app::{App, AppResult};
use blocktris::config::{self, Config};
use blocktris::ui;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, error, info};
use ratatui::{Terminal, prelude::*};

const LOG_PATH: &str = "blocktris.log";

fn main() -> AppResult<()> {
    redirect_stderr_to_log()?;

    // Configure the logger to use stderr (which is now redirected to our file)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting Tetris");

    let config = match config::loader::load_config_from_file() {
        Ok(config) => {
            info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {e}");
            Config::default()
        }
    };

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(33); // ~30 FPS
    let app = App::new(config);
    let res = run_app(&mut terminal, app, tick_rate);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Game error: {err:?}");
        return Err(err);
    }

    info!("Exiting");
    Ok(())
}

#[cfg(unix)]
fn redirect_stderr_to_log() -> AppResult<()> {
    use std::os::fd::AsRawFd;

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(LOG_PATH)?;

    // Safety: both descriptors are open for the duration of the call; dup2 keeps its own copy
    let result = unsafe { libc::dup2(log_file.as_raw_fd(), io::stderr().as_raw_fd()) };
    if result == -1 {
        return Err(io::Error::last_os_error().into());
    }

    Ok(())
}

#[cfg(not(unix))]
fn redirect_stderr_to_log() -> AppResult<()> {
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    tick_rate: Duration,
) -> AppResult<()> {
    let mut last_render = Instant::now();

    // Explicitly flush any pending input events that might be in the buffer
    while event::poll(Duration::from_millis(0))? {
        let _ = event::read()?;
    }

    debug!("Event loop started");

    loop {
        if last_render.elapsed() >= tick_rate {
            terminal.draw(|f| ui::render(f, &app))?;
            last_render = Instant::now();
        }

        // Input and gravity run one after the other on this thread
        if event::poll(Duration::from_millis(5))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if app.should_quit {
            return Ok(());
        }

        app.update();
    }
}
