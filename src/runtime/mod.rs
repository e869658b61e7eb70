use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use crate::config;
use crate::service::TaskService;

mod event_loop;
mod remote;
mod settings;
mod startup;

pub use settings::{LoadedSettings, load_settings};
pub use startup::write_dump;

/// Fetch the queue and run the terminal UI until the user quits.
pub fn run(settings: &config::Settings, service: &dyn TaskService) -> anyhow::Result<()> {
    let mut app = startup::load_queue(service, settings);
    info!(tasks = app.tasks.len(), "starting review session");

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, settings, &mut app, service);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
