//! What changed between a task's current metadata and a candidate, and the
//! annotations (penalties, disambiguation) shown next to a candidate.

use crate::config::ReviewSettings;
use crate::task::{Candidate, CandidateInfo, Distance, Task, present, text};

/// Penalty categories as `(year, title)`; empty when there are none.
pub fn penalty_label(distance: &Distance) -> String {
    if distance.penalties.is_empty() {
        return String::new();
    }

    let names: Vec<String> = distance
        .penalties
        .iter()
        .map(|key| {
            let key = key
                .strip_prefix("album_")
                .or_else(|| key.strip_prefix("track_"))
                .unwrap_or(key);
            key.replace('_', " ")
        })
        .collect();
    format!("({})", names.join(", "))
}

/// Secondary fields that tell near-identical candidates apart.
///
/// Order is fixed: source, media, year, country, label, catalog number,
/// disambiguation. The source is left out when it is `default_source`.
pub fn disambig_label(info: &CandidateInfo, default_source: &str) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(source) = present(&info.data_source) {
        if source != default_source {
            parts.push(source.to_string());
        }
    }
    if let Some(media) = present(&info.media) {
        match info.mediums {
            Some(n) if n > 1 => parts.push(format!("{n}x{media}")),
            _ => parts.push(media.to_string()),
        }
    }
    if let Some(year) = info.year.as_ref().filter(|y| y.is_truthy()) {
        parts.push(year.to_string());
    }
    for field in [&info.country, &info.label, &info.catalognum, &info.albumdisambig] {
        if let Some(v) = present(field) {
            parts.push(v.to_string());
        }
    }

    parts.join(", ")
}

/// Current artist/title of a single-track task differs from the candidate's.
pub fn track_identity_changed(task: &Task, info: &CandidateInfo) -> bool {
    text(&task.artist) != text(&info.artist) || text(&task.title) != text(&info.title)
}

/// Current artist/album of an album task differs from the candidate's.
///
/// An album-title difference does not count when the candidate album is the
/// various-artists sentinel.
pub fn album_identity_changed(task: &Task, info: &CandidateInfo, various_artists: &str) -> bool {
    let artist_changed = text(&task.cur_artist) != text(&info.artist);
    let album_changed =
        text(&task.cur_album) != text(&info.album) && text(&info.album) != various_artists;
    artist_changed || album_changed
}

/// A single-track match changes something: identity, penalties or disambiguation.
pub fn track_has_change(task: &Task, candidate: &Candidate, settings: &ReviewSettings) -> bool {
    track_identity_changed(task, &candidate.info) || is_annotated(candidate, settings)
}

/// An album match changes something: identity, penalties or disambiguation.
pub fn album_has_change(task: &Task, candidate: &Candidate, settings: &ReviewSettings) -> bool {
    album_identity_changed(task, &candidate.info, &settings.various_artists)
        || is_annotated(candidate, settings)
}

/// Whether showing `candidate` for `task` means anything would change.
pub fn has_change(task: &Task, candidate: &Candidate, settings: &ReviewSettings) -> bool {
    if task.is_album {
        album_has_change(task, candidate, settings)
    } else {
        track_has_change(task, candidate, settings)
    }
}

fn is_annotated(candidate: &Candidate, settings: &ReviewSettings) -> bool {
    !penalty_label(&candidate.distance).is_empty()
        || !disambig_label(&candidate.info, &settings.default_data_source).is_empty()
}

/// Whether the candidate artist is the various-artists sentinel, in which
/// case artist lines are blanked on both sides.
pub fn is_various_artists(info: &CandidateInfo, various_artists: &str) -> bool {
    text(&info.artist) == various_artists
}
