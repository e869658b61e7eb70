//! Track-level reconciliation of an album match: per-medium grouping of the
//! (current item, candidate track) pairs, number/title changes, and the
//! tracks left over on either side.

use crate::diff::penalty_label;
use crate::format::{format_duration, format_short_duration};
use crate::task::{AudioFileRecord, Candidate, CandidateInfo, present};

/// One row of the track comparison table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackRow {
    /// Medium / disc title heading, e.g. `CD 2: Bonus`.
    Medium(String),
    /// A pair whose title, number or per-track penalties differ.
    Change {
        lhs: String,
        rhs: String,
        penalties: String,
    },
}

impl TrackRow {
    /// The three table cells: current, proposed, penalties.
    pub fn cells(&self) -> [String; 3] {
        match self {
            TrackRow::Medium(title) => [title.clone(), String::new(), String::new()],
            TrackRow::Change {
                lhs,
                rhs,
                penalties,
            } => [format!(" * {lhs}"), format!("-> {rhs}"), penalties.clone()],
        }
    }
}

/// A titled list of leftover tracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackListSection {
    pub header: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackReconciliation {
    pub rows: Vec<TrackRow>,
    /// Candidate tracks no current item was matched to.
    pub missing: Option<TrackListSection>,
    /// Current items no candidate track was matched to.
    pub unmatched: Option<TrackListSection>,
}

/// Reconcile the track mapping of an album match.
pub fn reconcile_tracks(candidate: &Candidate) -> TrackReconciliation {
    let mut pairs: Vec<&(AudioFileRecord, CandidateInfo)> = candidate.mapping.iter().collect();
    pairs.sort_by_key(|(_, track)| (track.medium, track.index));

    let multi_medium = candidate.info.mediums.is_some_and(|n| n > 1);
    let media = present(&candidate.info.media).unwrap_or("Media");

    let mut rows: Vec<TrackRow> = Vec::new();
    let mut current_medium: Option<(Option<u32>, Option<&str>)> = None;

    for (item, track) in pairs {
        let disctitle = present(&track.disctitle);
        let medium_key = (track.medium, disctitle);
        if current_medium != Some(medium_key) {
            if let Some(header) = medium_header(media, track.medium, disctitle, multi_medium) {
                rows.push(TrackRow::Medium(header));
            }
            current_medium = Some(medium_key);
        }

        let mut lhs = present(&item.title)
            .or_else(|| present(&item.path))
            .unwrap_or("")
            .to_string();
        let mut rhs = track.title.clone().unwrap_or_default();

        if item.track != track.index {
            lhs = format!("(#{}) {lhs}", number_label(item.track));
            rhs = format!("(#{}) {rhs}", number_label(track.index));
        }

        let penalties = track
            .track_id
            .as_ref()
            .and_then(|id| candidate.distance.tracks.get(id))
            .map(penalty_label)
            .unwrap_or_default();

        if lhs != rhs || !penalties.is_empty() {
            rows.push(TrackRow::Change {
                lhs,
                rhs,
                penalties,
            });
        }
    }

    TrackReconciliation {
        rows,
        missing: missing_tracks(candidate),
        unmatched: unmatched_items(&candidate.extra_items),
    }
}

fn medium_header(
    media: &str,
    medium: Option<u32>,
    disctitle: Option<&str>,
    multi_medium: bool,
) -> Option<String> {
    match (multi_medium, disctitle) {
        (true, Some(title)) => Some(format!("{media} {}: {title}", number_label(medium))),
        (true, None) => Some(format!("{media} {}", number_label(medium))),
        (false, Some(title)) => Some(format!("{media}: {title}")),
        (false, None) => None,
    }
}

fn missing_tracks(candidate: &Candidate) -> Option<TrackListSection> {
    if candidate.extra_tracks.is_empty() {
        return None;
    }

    let lines = candidate
        .extra_tracks
        .iter()
        .map(|track| {
            format!(
                "! {} (#{}) ({})",
                track.title.as_deref().unwrap_or(""),
                number_label(track.index),
                format_duration(track.length.unwrap_or(0.0)),
            )
        })
        .collect();

    Some(TrackListSection {
        header: format!(
            "Missing tracks ({}/{})",
            candidate.extra_tracks.len(),
            candidate.info.tracks.len()
        ),
        lines,
    })
}

fn unmatched_items(items: &[AudioFileRecord]) -> Option<TrackListSection> {
    if items.is_empty() {
        return None;
    }

    let lines = items
        .iter()
        .map(|item| {
            let length = item
                .length
                .filter(|l| *l > 0.0)
                .map(|l| format!(" ({})", format_short_duration(l)))
                .unwrap_or_default();
            format!(
                "! {} (#{}){length}",
                item.title.as_deref().unwrap_or(""),
                number_label(item.track),
            )
        })
        .collect();

    Some(TrackListSection {
        header: format!("Unmatched tracks ({})", items.len()),
        lines,
    })
}

fn number_label(n: Option<u32>) -> String {
    n.map(|n| n.to_string()).unwrap_or_else(|| "?".to_string())
}
