//! TUI command implementation

use crate::app::App;
use crate::tui::{handle_key, ui};
use anyhow::{Context, Result};
use crossterm::{
    cursor::Hide,
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use themeportal::{CatalogSource, Config, RodioAudio};
use tracing::{debug, info};

/// Run the TUI application
pub fn run_tui(config: Config) -> Result<()> {
    let source = CatalogSource::parse(&config.catalog);

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;
    execute!(stdout, crossterm::terminal::SetTitle("Theme Portal"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Initialize app and kick off the catalog load
    let mut app = App::new(config, source, Box::new(RodioAudio::new()));
    app.start_load();

    let result = run_loop(&mut terminal, &mut app);

    // Cleanup
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        crossterm::cursor::Show,
        LeaveAlternateScreen
    )?;

    info!("Session ended");
    result
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.tick(Instant::now());

        // Draw
        terminal.draw(|f| ui(f, app))?;

        // Poll events (16ms ≈ 60fps)
        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    debug!("KEY_EVENT: {:?}", key.code);
                    handle_key(app, key.code, Instant::now());
                }
                Event::Resize(cols, rows) => {
                    debug!("resized to {cols}x{rows}");
                }
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
