use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;
use tracing::{debug, info};

use super::{Mutation, TaskService};
use crate::config::ServerSettings;
use crate::task::{Task, TaskId, parse_task_listing};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected task listing: {0}")]
    Decode(#[from] serde_json::Error),
}

/// [`TaskService`] backed by the import server's HTTP API.
pub struct HttpTaskService {
    base_url: String,
    http: Client,
}

impl HttpTaskService {
    pub fn new(settings: &ServerSettings) -> Result<Self, ServiceError> {
        let mut builder = Client::builder();
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            http: builder.build()?,
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

/// Turn a non-2xx response into [`ServiceError::Status`] carrying the raw body.
fn check_status(
    response: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(ServiceError::Status {
        status: status.as_u16(),
        body,
    })
}

impl TaskService for HttpTaskService {
    fn fetch_tasks(&self) -> Result<Vec<(TaskId, Task)>, ServiceError> {
        let url = self.url("/api/tasks");
        debug!(%url, "fetching tasks");
        let response = check_status(self.http.get(&url).send()?)?;
        let body = response.text()?;
        let tasks = parse_task_listing(&body)?;
        info!(count = tasks.len(), "task queue loaded");
        Ok(tasks)
    }

    fn send(&self, mutation: &Mutation) -> Result<(), ServiceError> {
        let url = self.url(mutation.endpoint);
        info!(endpoint = mutation.endpoint, body = %mutation.body, "sending mutation");
        check_status(self.http.put(&url).json(&mutation.body).send()?)?;
        Ok(())
    }
}
