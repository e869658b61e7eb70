use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

use crate::app::App;
use crate::config;
use crate::service::TaskService;
use crate::ui;

use super::remote::{commit, refresh};

/// Main terminal event loop: draws, reads keys and runs the request round
/// trip. Returns `Ok(())` when the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    service: &dyn TaskService,
) -> anyhow::Result<()> {
    loop {
        let display = app.display_indices();
        terminal.draw(|f| ui::draw(f, app, &display, settings))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, app, service) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Apply one key press. Returns `true` when the user asked to quit.
pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App, service: &dyn TaskService) -> bool {
    if app.filter_mode {
        match key.code {
            KeyCode::Esc => app.clear_filter(),
            KeyCode::Backspace => app.pop_filter_char(),
            KeyCode::Enter => app.exit_filter_mode(),
            KeyCode::Char('j') if key.modifiers.contains(KeyModifiers::CONTROL) => app.next(),
            KeyCode::Char('k') if key.modifiers.contains(KeyModifiers::CONTROL) => app.prev(),
            KeyCode::Down => app.next(),
            KeyCode::Up => app.prev(),
            KeyCode::Char(c) => {
                if !c.is_control() {
                    app.push_filter_char(c);
                }
            }
            _ => {}
        }
        return false;
    }

    if app.is_entering_search() {
        match key.code {
            KeyCode::Esc => app.search_cancel(),
            KeyCode::Tab => app.search_switch_field(),
            KeyCode::Backspace => app.search_pop_char(),
            KeyCode::Enter => {
                if let Some(mutation) = app.search_submit() {
                    commit(service, app, mutation);
                }
            }
            KeyCode::Char(c) => {
                if !c.is_control() {
                    app.search_push_char(c);
                }
            }
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('/') => app.enter_filter_mode(),
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Char('J') => app.candidate_cursor_down(),
        KeyCode::Char('K') => app.candidate_cursor_up(),
        KeyCode::Char('R') => {
            debug!("manual reload");
            refresh(service, app);
        }
        KeyCode::Enter => {
            if let Some(mutation) = app.select_highlighted_candidate() {
                commit(service, app, mutation);
            }
        }
        KeyCode::Char(c) => {
            if let Some(mutation) = app.press_action(c) {
                commit(service, app, mutation);
            }
        }
        _ => {}
    }

    false
}
