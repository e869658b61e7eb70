use std::io::Write;

use crate::app::App;
use crate::config;
use crate::review::{TaskPanel, render_task};
use crate::service::TaskService;

use super::remote::refresh;

/// Build the app and run the single initial fetch. A failed fetch leaves
/// an empty queue with the error in the banner.
pub fn load_queue(service: &dyn TaskService, settings: &config::Settings) -> App {
    let mut app = App::new(Vec::new(), settings.review.clone());
    refresh(service, &mut app);
    app
}

/// Print every task's text view, one block per task.
pub fn write_dump(
    service: &dyn TaskService,
    settings: &config::Settings,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let tasks = service.fetch_tasks()?;
    if tasks.is_empty() {
        writeln!(out, "no pending tasks")?;
        return Ok(());
    }

    let panel = TaskPanel::new(settings.review.show_candidates);
    for (i, (id, task)) in tasks.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "== task {id}: {} ==", task.label())?;
        writeln!(out, "{}", render_task(id, task, &panel, &settings.review).to_text())?;
    }
    Ok(())
}
