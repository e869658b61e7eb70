//! Application model: `App`.
//!
//! The `App` struct holds the fetched task queue, one review panel per task,
//! the selection, the queue filter and the error banner.

use crate::config::ReviewSettings;
use crate::diff::has_change;
use crate::review::{PanelAction, TaskPanel, TaskView, render_task};
use crate::service::{Mutation, dispatch};
use crate::task::{Task, TaskId};

/// The main application model.
pub struct App {
    pub tasks: Vec<(TaskId, Task)>,
    pub panels: Vec<TaskPanel>,
    pub selected: usize,

    pub filter_mode: bool,
    pub filter_query: String,

    /// Load or mutation failure; replaces the task detail while set.
    pub error: Option<String>,

    settings: ReviewSettings,
    labels: Vec<String>,
}

impl App {
    /// Create a new `App` over the provided `tasks`.
    pub fn new(tasks: Vec<(TaskId, Task)>, settings: ReviewSettings) -> Self {
        let mut app = Self {
            tasks: Vec::new(),
            panels: Vec::new(),
            selected: 0,
            filter_mode: false,
            filter_query: String::new(),
            error: None,
            settings,
            labels: Vec::new(),
        };
        app.replace_tasks(tasks);
        app
    }

    /// Swap in a freshly fetched queue. Panels start over, the cursor is
    /// clamped and any banner is cleared.
    pub fn replace_tasks(&mut self, tasks: Vec<(TaskId, Task)>) {
        self.labels = tasks.iter().map(|(_, task)| task.label()).collect();
        self.panels = tasks
            .iter()
            .map(|_| TaskPanel::new(self.settings.show_candidates))
            .collect();
        self.tasks = tasks;
        self.error = None;
        if self.selected >= self.tasks.len() {
            self.selected = self.tasks.len().saturating_sub(1);
        }
        self.ensure_selected_visible();
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn has_tasks(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Queue label of task `index`.
    pub fn label(&self, index: usize) -> &str {
        self.labels.get(index).map(String::as_str).unwrap_or("")
    }

    /// Whether the displayed match of task `index` changes anything.
    pub fn is_changed(&self, index: usize) -> bool {
        self.tasks
            .get(index)
            .and_then(|(_, task)| {
                task.current_match()
                    .map(|candidate| has_change(task, candidate, &self.settings))
            })
            .unwrap_or(false)
    }

    /// The view of the selected task.
    pub fn selected_view(&self) -> Option<TaskView> {
        let (id, task) = self.tasks.get(self.selected)?;
        let panel = self.panels.get(self.selected)?;
        Some(render_task(id, task, panel, &self.settings))
    }

    fn selected_panel_mut(&mut self) -> Option<&mut TaskPanel> {
        self.panels.get_mut(self.selected)
    }

    fn selected_id(&self) -> Option<&TaskId> {
        self.tasks.get(self.selected).map(|(id, _)| id)
    }

    /// Handle an action key on the selected task.
    ///
    /// Returns the request to send when the key maps to a server action.
    /// Keys the task does not offer are ignored, as is everything while the
    /// error banner is up.
    pub fn press_action(&mut self, key: char) -> Option<Mutation> {
        if self.error.is_some() {
            return None;
        }
        let action = self.selected_view()?.action(key)?;
        match action {
            PanelAction::Run(name) => dispatch(name, self.selected_id()?),
            PanelAction::SearchByName => {
                self.selected_panel_mut()?.begin_search_by_name();
                None
            }
            PanelAction::SearchById => {
                self.selected_panel_mut()?.begin_search_by_id();
                None
            }
            PanelAction::ToggleCandidates => {
                self.selected_panel_mut()?.toggle_candidates();
                None
            }
        }
    }

    /// Select the highlighted candidate, if the candidate table is shown.
    pub fn select_highlighted_candidate(&self) -> Option<Mutation> {
        if self.error.is_some() {
            return None;
        }
        let view = self.selected_view()?;
        if !view.candidates_visible || view.search.is_some() {
            return None;
        }
        let row = view.candidates.iter().find(|row| row.highlighted)?;
        Some(Mutation::select_candidate(&view.id, row.index))
    }

    pub fn candidate_cursor_down(&mut self) {
        let count = self.selected_candidate_count();
        if let Some(panel) = self.selected_panel_mut() {
            panel.cursor_down(count);
        }
    }

    pub fn candidate_cursor_up(&mut self) {
        let count = self.selected_candidate_count();
        if let Some(panel) = self.selected_panel_mut() {
            panel.cursor_up(count);
        }
    }

    fn selected_candidate_count(&self) -> usize {
        self.tasks
            .get(self.selected)
            .map(|(_, task)| task.candidates.len())
            .unwrap_or(0)
    }

    /// Whether the selected task has a search form open.
    pub fn is_entering_search(&self) -> bool {
        self.panels
            .get(self.selected)
            .is_some_and(TaskPanel::is_entering)
    }

    pub fn search_push_char(&mut self, c: char) {
        if let Some(panel) = self.selected_panel_mut() {
            panel.push_char(c);
        }
    }

    pub fn search_pop_char(&mut self) {
        if let Some(panel) = self.selected_panel_mut() {
            panel.pop_char();
        }
    }

    pub fn search_switch_field(&mut self) {
        if let Some(panel) = self.selected_panel_mut() {
            panel.switch_field();
        }
    }

    pub fn search_cancel(&mut self) {
        if let Some(panel) = self.selected_panel_mut() {
            panel.cancel_input();
        }
    }

    /// Close the open search form and return its request.
    pub fn search_submit(&mut self) -> Option<Mutation> {
        let id = self.selected_id()?.clone();
        self.selected_panel_mut()?.submit(&id)
    }

    /// Return the indices of tasks matching the filter, in queue order.
    pub fn display_indices(&self) -> Vec<usize> {
        let query = self.filter_query.trim();
        (0..self.tasks.len())
            .filter(|&i| {
                query.is_empty() || Self::fuzzy_match_positions(self.label(i), query).is_some()
            })
            .collect()
    }

    /// Return the next visible index in the current display order after `current`.
    /// Wraps around to the first element.
    pub fn next_in_view_from(&self, current: usize) -> Option<usize> {
        let display = self.display_indices();
        if display.is_empty() {
            return None;
        }

        let pos = display.iter().position(|&i| i == current);
        match pos {
            Some(p) => Some(display[(p + 1) % display.len()]),
            None => Some(display[0]),
        }
    }

    /// Return the previous visible index in the current display order before `current`.
    /// Wraps around to the last element.
    pub fn prev_in_view_from(&self, current: usize) -> Option<usize> {
        let display = self.display_indices();
        if display.is_empty() {
            return None;
        }

        let pos = display.iter().position(|&i| i == current);
        match pos {
            Some(0) => Some(display[display.len() - 1]),
            Some(p) => Some(display[p - 1]),
            None => Some(display[display.len() - 1]),
        }
    }

    /// Fuzzy/subsequence match: return the character positions in `label`
    /// that match `query`, or `None` if not matched.
    pub fn fuzzy_match_positions(label: &str, query: &str) -> Option<Vec<usize>> {
        if query.is_empty() {
            return Some(Vec::new());
        }

        let mut positions: Vec<usize> = Vec::new();
        let mut label_iter = label.chars().enumerate();

        for qc in query.chars() {
            let qc_low = qc.to_ascii_lowercase();
            loop {
                match label_iter.next() {
                    Some((li, lc)) if lc.to_ascii_lowercase() == qc_low => {
                        positions.push(li);
                        break;
                    }
                    Some(_) => continue,
                    None => return None,
                }
            }
        }

        Some(positions)
    }

    /// Enter filter mode.
    pub fn enter_filter_mode(&mut self) {
        self.filter_mode = true;
        self.ensure_selected_visible();
    }
    /// Leave filter mode, keeping the query.
    pub fn exit_filter_mode(&mut self) {
        self.filter_mode = false;
    }
    /// Clear the active filter and restore selection visibility.
    pub fn clear_filter(&mut self) {
        self.filter_query.clear();
        self.filter_mode = false;
        self.ensure_selected_visible();
    }
    /// Append a character to the filter query.
    pub fn push_filter_char(&mut self, c: char) {
        self.filter_query.push(c);
        self.ensure_selected_visible();
    }
    /// Remove the last character from the filter query.
    pub fn pop_filter_char(&mut self) {
        self.filter_query.pop();
        self.ensure_selected_visible();
    }

    /// Ensure that `selected` is part of the filtered view, otherwise move
    /// selection to the first visible task.
    fn ensure_selected_visible(&mut self) {
        let display = self.display_indices();
        if display.is_empty() {
            return;
        }

        if !display.contains(&self.selected) {
            self.selected = display[0];
        }
    }
    /// Move selection to the next visible task.
    pub fn next(&mut self) {
        if let Some(next) = self.next_in_view_from(self.selected) {
            self.selected = next;
        }
    }

    /// Move selection to the previous visible task.
    pub fn prev(&mut self) {
        if let Some(prev) = self.prev_in_view_from(self.selected) {
            self.selected = prev;
        }
    }
}
