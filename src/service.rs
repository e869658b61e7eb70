//! Remote import server: the request types, the action dispatch table and
//! the HTTP client.
//!
//! [`TaskService`] is the seam the runtime talks to, so the
//! request/refetch round trip can be exercised without a server.

mod client;
mod mutation;

pub use client::{HttpTaskService, ServiceError};
pub use mutation::*;

use crate::task::{Task, TaskId};

pub trait TaskService {
    /// `GET /api/tasks`, in queue order.
    fn fetch_tasks(&self) -> Result<Vec<(TaskId, Task)>, ServiceError>;

    /// Send one mutation. Only the status is checked; the body is ignored.
    fn send(&self, mutation: &Mutation) -> Result<(), ServiceError>;
}

#[cfg(test)]
pub(crate) mod fake;
