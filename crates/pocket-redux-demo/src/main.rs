use anyhow::Result;
use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    Terminal,
};
use std::io;
use std::time::Duration;

mod app;
mod keymap;
mod logger;
mod views;

use app::App;
use pocket_redux_config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load();
    let log_file = logger::init(config.log_level.as_deref())?;

    log::info!("Starting pocket-redux-demo, logging to {}", log_file.display());

    let mut app = App::new(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        log::error!("Exiting with error: {:#}", err);
    }

    log::info!("Exiting pocket-redux-demo");
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        if app.take_dirty() {
            terminal.draw(|frame| views::render(app, frame))?;
        }

        if !app.running {
            break;
        }

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                // Only process key press events (ignore key release)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(command) = keymap::command_for(&key) {
                        if let Err(e) = app.execute(command) {
                            log::error!("Command {:?} failed: {:#}", command, e);
                        }
                    }
                }
                Event::Resize(_, _) => app.mark_dirty(),
                _ => {}
            }
        }

        app.tick();
    }

    Ok(())
}
