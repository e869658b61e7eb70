//! Wire model for pending import tasks.
//!
//! These types mirror what the import server's JSON encoder produces. Every
//! field is optional on the wire; absent or `null` values deserialize to
//! `None`/empty so a sparse task never fails to load.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque key of a task in the `GET /api/tasks` mapping.
///
/// Echoed back verbatim as `task_index` in every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Numeric ids sort numerically ("2" before "10"), anything else after them lexically.
impl Ord for TaskId {
    fn cmp(&self, other: &Self) -> Ordering {
        let key = |id: &TaskId| {
            let parsed = id.0.parse::<u64>();
            (parsed.is_err(), parsed.unwrap_or(0))
        };
        key(self)
            .cmp(&key(other))
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for TaskId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A loosely typed scalar (years arrive as numbers from some sources and as
/// strings from others).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
    Flag(bool),
}

impl Scalar {
    /// Whether the value counts as "present" for display purposes.
    pub fn is_truthy(&self) -> bool {
        match self {
            Scalar::Int(v) => *v != 0,
            Scalar::Float(v) => *v != 0.0 && !v.is_nan(),
            Scalar::Text(s) => !s.is_empty(),
            Scalar::Flag(b) => *b,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(v) => write!(f, "{v}"),
            Scalar::Float(v) => write!(f, "{v}"),
            Scalar::Text(s) => f.write_str(s),
            Scalar::Flag(b) => write!(f, "{b}"),
        }
    }
}

/// One audio file as seen by the importer (current tags + file properties).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AudioFileRecord {
    pub format: Option<String>,
    /// Bits per second.
    pub bitrate: Option<u64>,
    /// Seconds.
    pub length: Option<f64>,
    /// Bytes.
    pub filesize: Option<u64>,
    pub track: Option<u32>,
    pub title: Option<String>,
    pub path: Option<String>,
}

/// Metadata proposed by the matcher, for a whole album or a single track.
///
/// Album candidates fill the album fields and `tracks`; track entries (in a
/// mapping, in `extra_tracks` or as a singleton candidate) fill the track
/// fields.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CandidateInfo {
    pub artist: Option<String>,
    pub title: Option<String>,
    pub album: Option<String>,
    pub media: Option<String>,
    pub mediums: Option<u32>,
    pub year: Option<Scalar>,
    pub country: Option<String>,
    pub label: Option<String>,
    pub catalognum: Option<String>,
    pub albumdisambig: Option<String>,
    pub data_source: Option<String>,
    pub data_url: Option<String>,
    pub tracks: Vec<CandidateInfo>,

    pub track_id: Option<String>,
    pub index: Option<u32>,
    pub medium: Option<u32>,
    pub medium_index: Option<u32>,
    pub disctitle: Option<String>,
    pub length: Option<f64>,
}

/// Similarity distance of a candidate, lower is better.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Distance {
    /// In `[0, 1]`.
    pub distance: f64,
    /// Penalty categories such as `album_year` or `track_title`.
    pub penalties: Vec<String>,
    /// Per-track distances keyed by the candidate track's `track_id`.
    pub tracks: BTreeMap<String, Distance>,
}

/// One proposed match for a task.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Candidate {
    pub info: CandidateInfo,
    pub distance: Distance,
    /// (current item, candidate track) pairs of an album match.
    pub mapping: Vec<(AudioFileRecord, CandidateInfo)>,
    /// Candidate tracks with no current item.
    pub extra_tracks: Vec<CandidateInfo>,
    /// Current items with no candidate track.
    pub extra_items: Vec<AudioFileRecord>,
}

/// The task's source location: a single path or a list of path segments.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TaskPaths {
    Single(String),
    Segments(Vec<String>),
}

impl Default for TaskPaths {
    fn default() -> Self {
        Self::Segments(Vec::new())
    }
}

/// A library record the task collides with.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DuplicateRecord {
    /// Album tasks collide with whole albums.
    Album { items: Vec<AudioFileRecord> },
    /// Single-track tasks collide with single items.
    Item(AudioFileRecord),
}

impl DuplicateRecord {
    pub fn items(&self) -> &[AudioFileRecord] {
        match self {
            DuplicateRecord::Album { items } => items,
            DuplicateRecord::Item(record) => std::slice::from_ref(record),
        }
    }
}

/// One pending import decision.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Task {
    pub is_album: bool,
    pub paths: TaskPaths,
    pub items: Vec<AudioFileRecord>,
    pub candidates: Vec<Candidate>,
    /// Explicitly chosen candidate; the server sends `"None"` when there is none.
    #[serde(rename = "match", deserialize_with = "chosen_candidate")]
    pub chosen: Option<Candidate>,
    pub found_duplicates: Option<Vec<DuplicateRecord>>,
    pub imported_items: Option<Vec<AudioFileRecord>>,

    // Album tasks.
    pub cur_artist: Option<String>,
    pub cur_album: Option<String>,

    // Single-track tasks.
    pub artist: Option<String>,
    pub title: Option<String>,
}

impl Task {
    /// The candidate currently on display: the chosen one, else the best ranked.
    pub fn current_match(&self) -> Option<&Candidate> {
        self.chosen.as_ref().or_else(|| self.candidates.first())
    }

    /// Short "artist - album" / "artist - title" label for the queue list.
    pub fn label(&self) -> String {
        let (artist, name) = if self.is_album {
            (self.cur_artist.as_deref(), self.cur_album.as_deref())
        } else {
            (self.artist.as_deref(), self.title.as_deref())
        };
        match (
            artist.filter(|s| !s.is_empty()),
            name.filter(|s| !s.is_empty()),
        ) {
            (Some(a), Some(n)) => format!("{a} - {n}"),
            (None, Some(n)) => n.to_string(),
            (Some(a), None) => a.to_string(),
            (None, None) if self.is_album => "(unknown album)".to_string(),
            (None, None) => "(unknown track)".to_string(),
        }
    }
}

fn chosen_candidate<'de, D>(deserializer: D) -> Result<Option<Candidate>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Chosen {
        Candidate(Box<Candidate>),
        Placeholder(serde_json::Value),
    }

    Ok(match Option::<Chosen>::deserialize(deserializer)? {
        Some(Chosen::Candidate(candidate)) => Some(*candidate),
        Some(Chosen::Placeholder(_)) | None => None,
    })
}

/// A string field that is set and non-empty.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// A string field, with unset read as empty.
pub(crate) fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

/// Parse a `GET /api/tasks` body into tasks in queue order.
///
/// The server answers with an object keyed by task id, or with an empty array
/// when no import session is running.
pub fn parse_task_listing(body: &str) -> Result<Vec<(TaskId, Task)>, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    let keyed: BTreeMap<String, Task> = match value {
        serde_json::Value::Array(ref entries) if entries.is_empty() => BTreeMap::new(),
        other => serde_json::from_value(other)?,
    };

    let mut tasks: Vec<(TaskId, Task)> = keyed
        .into_iter()
        .map(|(id, task)| (TaskId(id), task))
        .collect();
    tasks.sort_by(|(a, _), (b, _)| a.cmp(b));
    Ok(tasks)
}
