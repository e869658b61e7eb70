use crate::service::ActionName;
use crate::task::TaskId;

/// One piece of the task body, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewBlock {
    Line(String),
    /// Metadata shown under a heading (artist/album lines, URLs, leftovers).
    Indented(String),
    /// Terminal state of a task that offers no actions.
    Notice(String),
    /// Three columns: current, proposed, penalties.
    Table(Vec<[String; 3]>),
}

/// What pressing an action button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    Run(ActionName),
    SearchByName,
    SearchById,
    ToggleCandidates,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButton {
    pub key: char,
    pub label: String,
    pub action: PanelAction,
}

impl ActionButton {
    pub fn new(key: char, label: impl Into<String>, action: PanelAction) -> Self {
        Self {
            key,
            label: label.into(),
            action,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    pub focused: bool,
}

/// The search form shown in place of the action bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchForm {
    pub title: &'static str,
    pub fields: Vec<FormField>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRow {
    /// Position in the task's candidate list; sent back on selection.
    pub index: usize,
    pub text: String,
    pub highlighted: bool,
}

/// Everything shown for one task, independent of how it is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    pub id: TaskId,
    pub blocks: Vec<ViewBlock>,
    pub actions: Vec<ActionButton>,
    pub search: Option<SearchForm>,
    pub candidates: Vec<CandidateRow>,
    pub candidates_visible: bool,
}

const INDENT: &str = "  ";
const COLUMN_GAP: &str = "  ";

impl TaskView {
    pub fn new(id: TaskId) -> Self {
        Self {
            id,
            blocks: Vec::new(),
            actions: Vec::new(),
            search: None,
            candidates: Vec::new(),
            candidates_visible: false,
        }
    }

    pub fn line(&mut self, text: impl Into<String>) {
        self.blocks.push(ViewBlock::Line(text.into()));
    }

    pub fn indented(&mut self, text: impl Into<String>) {
        self.blocks.push(ViewBlock::Indented(text.into()));
    }

    /// The action bound to `key`, if the task currently offers it.
    pub fn action(&self, key: char) -> Option<PanelAction> {
        if self.search.is_some() {
            return None;
        }
        self.actions
            .iter()
            .find(|button| button.key == key)
            .map(|button| button.action)
    }

    /// Body blocks as plain lines, tables padded into columns.
    pub fn body_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for block in &self.blocks {
            match block {
                ViewBlock::Line(text) | ViewBlock::Notice(text) => lines.push(text.clone()),
                ViewBlock::Indented(text) => lines.push(format!("{INDENT}{text}")),
                ViewBlock::Table(rows) => lines.extend(table_lines(rows)),
            }
        }
        lines
    }

    /// The action bar, or the search form while one is open.
    pub fn controls_line(&self) -> Option<String> {
        if let Some(form) = &self.search {
            let fields: Vec<String> = form
                .fields
                .iter()
                .map(|f| {
                    let cursor = if f.focused { "_" } else { "" };
                    format!("{}: [{}{cursor}]", f.label, f.value)
                })
                .collect();
            return Some(format!("{}: {}", form.title, fields.join(COLUMN_GAP)));
        }
        if self.actions.is_empty() {
            return None;
        }
        let buttons: Vec<String> = self
            .actions
            .iter()
            .map(|b| format!("[{}] {}", b.key, b.label))
            .collect();
        Some(buttons.join(COLUMN_GAP))
    }

    pub fn candidate_line(row: &CandidateRow) -> String {
        format!("[{}] {}", row.index, row.text)
    }

    /// Plain-text rendering used by `--dump` and the tests.
    pub fn to_text(&self) -> String {
        let mut lines = self.body_lines();
        if let Some(controls) = self.controls_line() {
            lines.push(controls);
        }
        if self.candidates_visible && !self.candidates.is_empty() {
            lines.push("Candidates:".to_string());
            for row in &self.candidates {
                let marker = if row.highlighted { "> " } else { INDENT };
                lines.push(format!("{marker}{}", Self::candidate_line(row)));
            }
        }
        lines.join("\n")
    }
}

fn table_lines(rows: &[[String; 3]]) -> Vec<String> {
    let mut widths = [0usize; 3];
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    rows.iter()
        .map(|[lhs, rhs, penalties]| {
            let line = format!(
                "{lhs:<w0$}{COLUMN_GAP}{rhs:<w1$}{COLUMN_GAP}{penalties}",
                w0 = widths[0],
                w1 = widths[1],
            );
            line.trim_end().to_string()
        })
        .collect()
}
