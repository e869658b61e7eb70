//! Per-task review: the panel state machine and the view builder.
//!
//! [`render_task`] turns a task and its [`TaskPanel`] into a [`TaskView`],
//! which the terminal UI draws and `--dump` prints.

mod panel;
mod render;
mod view;

pub use panel::{InputMode, TaskPanel};
pub use render::render_task;
pub use view::{PanelAction, TaskView, ViewBlock};

#[cfg(test)]
mod tests;
