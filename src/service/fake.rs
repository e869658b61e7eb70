use std::cell::RefCell;
use std::collections::VecDeque;

use super::{Mutation, ServiceError, TaskService};
use crate::task::{Task, TaskId};

/// In-memory server: hands out queued listings and records every mutation.
#[derive(Default)]
pub struct FakeService {
    listings: RefCell<VecDeque<Result<Vec<(TaskId, Task)>, (u16, String)>>>,
    reject_sends: Option<(u16, String)>,
    pub sent: RefCell<Vec<Mutation>>,
    pub fetches: RefCell<usize>,
}

impl FakeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listing(self, tasks: Vec<(TaskId, Task)>) -> Self {
        self.listings.borrow_mut().push_back(Ok(tasks));
        self
    }

    pub fn with_failed_listing(self, status: u16, body: &str) -> Self {
        self.listings
            .borrow_mut()
            .push_back(Err((status, body.to_string())));
        self
    }

    pub fn rejecting_sends(mut self, status: u16, body: &str) -> Self {
        self.reject_sends = Some((status, body.to_string()));
        self
    }
}

impl TaskService for FakeService {
    fn fetch_tasks(&self) -> Result<Vec<(TaskId, Task)>, ServiceError> {
        *self.fetches.borrow_mut() += 1;
        match self.listings.borrow_mut().pop_front() {
            Some(Ok(tasks)) => Ok(tasks),
            Some(Err((status, body))) => Err(ServiceError::Status { status, body }),
            None => Ok(Vec::new()),
        }
    }

    fn send(&self, mutation: &Mutation) -> Result<(), ServiceError> {
        self.sent.borrow_mut().push(mutation.clone());
        match &self.reject_sends {
            Some((status, body)) => Err(ServiceError::Status {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(()),
        }
    }
}
