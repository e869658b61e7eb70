use crate::service::Mutation;
use crate::task::TaskId;

/// Which input of the search-by-name form has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Artist,
    Name,
}

/// Text entry state of a task panel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Idle,
    EnteringSearchByName {
        artist: String,
        name: String,
        field: SearchField,
    },
    EnteringSearchById {
        id: String,
    },
}

/// Client-side state of one task: candidate visibility, the candidate
/// cursor and any search being typed. Reset on every refresh.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskPanel {
    pub candidates_shown: bool,
    pub input: InputMode,
    pub candidate_cursor: usize,
}

impl TaskPanel {
    pub fn new(candidates_shown: bool) -> Self {
        Self {
            candidates_shown,
            ..Self::default()
        }
    }

    pub fn toggle_candidates(&mut self) {
        self.candidates_shown = !self.candidates_shown;
    }

    /// Move the candidate cursor down, wrapping around `count` rows.
    pub fn cursor_down(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.candidate_cursor = (self.candidate_cursor + 1) % count;
    }

    /// Move the candidate cursor up, wrapping around `count` rows.
    pub fn cursor_up(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.candidate_cursor = match self.candidate_cursor {
            0 => count - 1,
            c => (c - 1).min(count - 1),
        };
    }

    pub fn is_entering(&self) -> bool {
        self.input != InputMode::Idle
    }

    /// Open the search-by-name form. Replaces any other open form.
    pub fn begin_search_by_name(&mut self) {
        self.input = InputMode::EnteringSearchByName {
            artist: String::new(),
            name: String::new(),
            field: SearchField::Artist,
        };
    }

    /// Open the search-by-id form. Replaces any other open form.
    pub fn begin_search_by_id(&mut self) {
        self.input = InputMode::EnteringSearchById { id: String::new() };
    }

    pub fn cancel_input(&mut self) {
        self.input = InputMode::Idle;
    }

    /// Toggle focus between artist and name.
    pub fn switch_field(&mut self) {
        if let InputMode::EnteringSearchByName { field, .. } = &mut self.input {
            *field = match field {
                SearchField::Artist => SearchField::Name,
                SearchField::Name => SearchField::Artist,
            };
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(buf) = self.focused_buffer() {
            buf.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(buf) = self.focused_buffer() {
            buf.pop();
        }
    }

    fn focused_buffer(&mut self) -> Option<&mut String> {
        match &mut self.input {
            InputMode::Idle => None,
            InputMode::EnteringSearchByName {
                artist,
                name,
                field,
            } => match field {
                SearchField::Artist => Some(artist),
                SearchField::Name => Some(name),
            },
            InputMode::EnteringSearchById { id } => Some(id),
        }
    }

    /// Close the open form and build its search request.
    pub fn submit(&mut self, task: &TaskId) -> Option<Mutation> {
        match std::mem::take(&mut self.input) {
            InputMode::Idle => None,
            InputMode::EnteringSearchByName { artist, name, .. } => {
                Some(Mutation::search_by_name(task, &artist, &name))
            }
            InputMode::EnteringSearchById { id } => Some(Mutation::search_by_id(task, &id)),
        }
    }
}
