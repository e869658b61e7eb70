use std::{collections::BTreeMap, fmt, sync::LazyLock};

use serde_json::{Value, json};

use crate::task::TaskId;

/// One state-changing request against the import server.
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation {
    /// Path below the server root, e.g. `/api/apply`.
    pub endpoint: &'static str,
    pub body: Value,
}

impl Mutation {
    fn for_task(endpoint: &'static str, id: &TaskId) -> Self {
        Self {
            endpoint,
            body: json!({ "task_index": id.as_str() }),
        }
    }

    /// Choose candidate `index` (its position in the task's candidate list).
    pub fn select_candidate(id: &TaskId, index: usize) -> Self {
        Self {
            endpoint: "/api/candidate",
            body: json!({ "task_index": id.as_str(), "candidate_index": index }),
        }
    }

    pub fn search_by_name(id: &TaskId, artist: &str, name: &str) -> Self {
        Self {
            endpoint: "/api/searchName",
            body: json!({ "task_index": id.as_str(), "artist": artist, "name": name }),
        }
    }

    pub fn search_by_id(id: &TaskId, search_id: &str) -> Self {
        Self {
            endpoint: "/api/searchId",
            body: json!({ "task_index": id.as_str(), "id": search_id }),
        }
    }

    pub fn resolve_duplicates(id: &TaskId, action: DuplicateAction) -> Self {
        Self {
            endpoint: "/api/resolveDuplicates",
            body: json!({ "task_index": id.as_str(), "duplicate_action": action.code() }),
        }
    }
}

/// How to resolve a collision with records already in the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateAction {
    KeepBoth,
    RemoveOld,
    MergeAll,
}

impl DuplicateAction {
    /// Single-letter code the server expects.
    pub fn code(self) -> &'static str {
        match self {
            DuplicateAction::KeepBoth => "k",
            DuplicateAction::RemoveOld => "r",
            DuplicateAction::MergeAll => "m",
        }
    }
}

/// Task-level actions that map directly onto a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ActionName {
    Apply,
    Skip,
    AsIs,
    AsTracks,
    SkipNew,
    KeepBoth,
    RemoveOld,
    MergeAll,
}

impl ActionName {
    pub const ALL: [ActionName; 8] = [
        ActionName::Apply,
        ActionName::Skip,
        ActionName::AsIs,
        ActionName::AsTracks,
        ActionName::SkipNew,
        ActionName::KeepBoth,
        ActionName::RemoveOld,
        ActionName::MergeAll,
    ];

    /// Button caption.
    pub fn label(self) -> &'static str {
        match self {
            ActionName::Apply => "Apply",
            ActionName::Skip => "Skip",
            ActionName::AsIs => "As Is",
            ActionName::AsTracks => "As Tracks",
            ActionName::SkipNew => "Skip new",
            ActionName::KeepBoth => "Keep both",
            ActionName::RemoveOld => "Remove old",
            ActionName::MergeAll => "Merge all",
        }
    }
}

impl fmt::Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub type ActionFn = fn(&TaskId) -> Mutation;

fn apply(id: &TaskId) -> Mutation {
    Mutation::for_task("/api/apply", id)
}

fn skip(id: &TaskId) -> Mutation {
    Mutation::for_task("/api/skip", id)
}

fn as_is(id: &TaskId) -> Mutation {
    Mutation::for_task("/api/asIs", id)
}

fn as_tracks(id: &TaskId) -> Mutation {
    Mutation::for_task("/api/asTracks", id)
}

fn keep_both(id: &TaskId) -> Mutation {
    Mutation::resolve_duplicates(id, DuplicateAction::KeepBoth)
}

fn remove_old(id: &TaskId) -> Mutation {
    Mutation::resolve_duplicates(id, DuplicateAction::RemoveOld)
}

fn merge_all(id: &TaskId) -> Mutation {
    Mutation::resolve_duplicates(id, DuplicateAction::MergeAll)
}

static ACTION_TABLE: LazyLock<BTreeMap<ActionName, ActionFn>> = LazyLock::new(|| {
    let mut map: BTreeMap<ActionName, ActionFn> = BTreeMap::new();
    map.insert(ActionName::Apply, apply);
    map.insert(ActionName::Skip, skip);
    map.insert(ActionName::AsIs, as_is);
    map.insert(ActionName::AsTracks, as_tracks);
    // Skipping a duplicate is an ordinary skip.
    map.insert(ActionName::SkipNew, skip);
    map.insert(ActionName::KeepBoth, keep_both);
    map.insert(ActionName::RemoveOld, remove_old);
    map.insert(ActionName::MergeAll, merge_all);
    map
});

/// Look up `action` in the dispatch table and build its request for task `id`.
pub fn dispatch(action: ActionName, id: &TaskId) -> Option<Mutation> {
    ACTION_TABLE.get(&action).map(|build| build(id))
}
