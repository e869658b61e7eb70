//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the task queue, the
//! per-task review panels, selection, filter and error state.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
