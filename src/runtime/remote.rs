use tracing::{info, warn};

use crate::app::App;
use crate::service::{Mutation, TaskService};

/// Re-fetch the queue and swap it into `app`, or raise the banner.
pub fn refresh(service: &dyn TaskService, app: &mut App) {
    match service.fetch_tasks() {
        Ok(tasks) => {
            info!(count = tasks.len(), "queue refreshed");
            app.replace_tasks(tasks);
        }
        Err(e) => {
            warn!(error = %e, "loading tasks failed");
            app.set_error(e.to_string());
        }
    }
}

/// Send `mutation`; on success re-fetch, on failure show the endpoint and
/// the error in the banner. Nothing is retried.
pub fn commit(service: &dyn TaskService, app: &mut App, mutation: Mutation) {
    match service.send(&mutation) {
        Ok(()) => refresh(service, app),
        Err(e) => {
            warn!(endpoint = mutation.endpoint, error = %e, "mutation failed");
            app.set_error(format!("{}: {e}", mutation.endpoint));
        }
    }
}
