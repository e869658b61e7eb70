use serde_json::json;

use super::*;
use crate::config::ReviewSettings;
use crate::service::{ActionName, Mutation};
use crate::task::{
    AudioFileRecord, Candidate, CandidateInfo, Distance, DuplicateRecord, Task, TaskId,
    TaskPaths,
};

fn settings() -> ReviewSettings {
    ReviewSettings::default()
}

fn track_candidate(artist: &str, title: &str, distance: f64) -> Candidate {
    Candidate {
        info: CandidateInfo {
            artist: Some(artist.into()),
            title: Some(title.into()),
            data_source: Some("MusicBrainz".into()),
            ..CandidateInfo::default()
        },
        distance: Distance {
            distance,
            ..Distance::default()
        },
        ..Candidate::default()
    }
}

fn track_task(artist: &str, title: &str, candidates: Vec<Candidate>) -> Task {
    Task {
        artist: Some(artist.into()),
        title: Some(title.into()),
        candidates,
        ..Task::default()
    }
}

fn mp3() -> AudioFileRecord {
    AudioFileRecord {
        format: Some("mp3".into()),
        bitrate: Some(320_000),
        length: Some(200.0),
        filesize: Some(8_000_000),
        ..AudioFileRecord::default()
    }
}

fn id() -> TaskId {
    TaskId::new("4")
}

#[test]
fn identical_track_renders_a_single_tagging_line() {
    let task = track_task(
        "X",
        "Y",
        vec![
            track_candidate("X", "Y", 0.05),
            track_candidate("X", "Y (Live)", 0.3),
            track_candidate("Z", "Y", 0.4),
        ],
    );
    let view = render_task(&id(), &task, &TaskPanel::default(), &settings());
    let body = view.body_lines();

    assert_eq!(body, vec!["Tagging track: X Y", "(Similarity: 95.00)"]);
    assert!(body.iter().all(|l| !l.starts_with("Correcting")));

    let indices: Vec<usize> = view.candidates.iter().map(|c| c.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    assert_eq!(view.candidates[1].text, "X - Y (Live) (70.00%)");

    let selected = Mutation::select_candidate(&view.id, view.candidates[2].index);
    assert_eq!(selected.endpoint, "/api/candidate");
    assert_eq!(
        selected.body,
        json!({ "task_index": "4", "candidate_index": 2 })
    );
}

#[test]
fn changed_track_shows_correction_block_and_url() {
    let mut candidate = track_candidate("X", "Y (Remastered)", 0.2);
    candidate.info.data_url = Some("https://musicbrainz.org/recording/1".into());
    candidate.distance.penalties = vec!["track_title".into()];
    candidate.info.data_source = Some("Discogs".into());
    let task = track_task("X", "Y", vec![candidate]);

    let view = render_task(&id(), &task, &TaskPanel::default(), &settings());
    assert_eq!(
        view.body_lines(),
        vec![
            "Correcting track tags from:",
            "  X - Y",
            "To:",
            "  X - Y (Remastered)",
            "  https://musicbrainz.org/recording/1",
            "(Similarity: 80.00) (title) (Discogs)",
        ]
    );
}

#[test]
fn explicit_match_wins_over_first_candidate() {
    let mut task = track_task("X", "Y", vec![track_candidate("X", "Y", 0.0)]);
    task.chosen = Some(track_candidate("Other", "Song", 0.5));

    let view = render_task(&id(), &task, &TaskPanel::default(), &settings());
    assert_eq!(view.body_lines()[0], "Correcting track tags from:");
    assert!(view.body_lines().contains(&"(Similarity: 50.00)".to_string()));
}

#[test]
fn action_bar_lists_every_comparison_action() {
    let task = track_task("X", "Y", vec![track_candidate("X", "Y", 0.0)]);
    let view = render_task(&id(), &task, &TaskPanel::default(), &settings());

    assert_eq!(
        view.controls_line().unwrap(),
        "[a] Apply  [s] Skip  [i] As Is  [t] As Tracks  [n] Search by name  [#] Search by id  [c] Show candidates"
    );
    assert_eq!(view.action('a'), Some(PanelAction::Run(ActionName::Apply)));
    assert_eq!(view.action('#'), Some(PanelAction::SearchById));
    assert_eq!(view.action('b'), None);
}

#[test]
fn duplicate_branch_summarizes_both_sides() {
    let mut task = track_task("X", "Y", vec![track_candidate("X", "Y", 0.0)]);
    task.found_duplicates = Some(vec![DuplicateRecord::Item(mp3())]);
    task.imported_items = Some(vec![mp3()]);

    let view = render_task(&id(), &task, &TaskPanel::default(), &settings());
    assert_eq!(
        view.body_lines(),
        vec![
            "\"X - Y\" is already in the Library",
            "Old: mp3, 320kbps, 03:20, 7.6 MiB",
            "New: mp3, 320kbps, 03:20, 7.6 MiB",
        ]
    );
    let keys: Vec<char> = view.actions.iter().map(|b| b.key).collect();
    assert_eq!(keys, vec!['s', 'b', 'r', 'm']);
    assert_eq!(view.action('s'), Some(PanelAction::Run(ActionName::SkipNew)));
    assert_eq!(view.action('a'), None);
    assert!(view.candidates.is_empty());
}

#[test]
fn album_duplicates_use_item_counts_and_placeholder() {
    let mut task = Task {
        is_album: true,
        cur_artist: Some("A".into()),
        cur_album: Some("B".into()),
        candidates: vec![Candidate::default()],
        ..Task::default()
    };
    task.found_duplicates = Some(vec![DuplicateRecord::Album {
        items: vec![mp3(), mp3()],
    }]);

    let view = render_task(&id(), &task, &TaskPanel::default(), &settings());
    let body = view.body_lines();
    assert_eq!(body[0], "\"A - B\" is already in the Library");
    assert_eq!(body[1], "Old: 2 items, mp3, 320kbps, 06:40, 15.3 MiB");
    assert_eq!(body[2], "New: (no items)");
}

#[test]
fn no_candidates_is_a_notice_after_the_paths() {
    let task = Task {
        is_album: true,
        paths: TaskPaths::Segments(vec!["/music/incoming".into(), "Album".into()]),
        items: vec![mp3(), mp3()],
        found_duplicates: Some(vec![]),
        ..Task::default()
    };

    let view = render_task(&id(), &task, &TaskPanel::default(), &settings());
    assert_eq!(
        view.body_lines(),
        vec!["/music/incoming", "Album (2 items)", "no candidates found"]
    );
    assert!(matches!(view.blocks.last(), Some(ViewBlock::Notice(_))));
    assert!(view.actions.is_empty());
    assert_eq!(view.controls_line(), None);
}

#[test]
fn single_path_gets_the_item_count() {
    let task = Task {
        is_album: true,
        paths: TaskPaths::Single("/music/x".into()),
        items: vec![mp3()],
        ..Task::default()
    };
    let view = render_task(&id(), &task, &TaskPanel::default(), &settings());
    assert_eq!(view.body_lines()[0], "/music/x (1 items)");
}

#[test]
fn various_artists_blanks_both_artist_sides() {
    let task = Task {
        is_album: true,
        cur_artist: Some("Various".into()),
        cur_album: Some("Comp".into()),
        candidates: vec![Candidate {
            info: CandidateInfo {
                artist: Some("Various Artists".into()),
                album: Some("Best Of".into()),
                ..CandidateInfo::default()
            },
            ..Candidate::default()
        }],
        ..Task::default()
    };

    let view = render_task(&id(), &task, &TaskPanel::default(), &settings());
    assert_eq!(
        view.body_lines()[..4],
        ["Correcting tags from:", "  Comp", "To:", "  Best Of"]
    );
}

#[test]
fn unchanged_album_lists_track_changes_as_a_table() {
    let task = Task {
        is_album: true,
        cur_artist: Some("Stereolab".into()),
        cur_album: Some("Dots".into()),
        candidates: vec![Candidate {
            info: CandidateInfo {
                artist: Some("Stereolab".into()),
                album: Some("Dots".into()),
                mediums: Some(1),
                data_url: Some("https://mb/r/1".into()),
                ..CandidateInfo::default()
            },
            distance: Distance {
                distance: 0.1,
                ..Distance::default()
            },
            mapping: vec![(
                AudioFileRecord {
                    title: Some("brakhage".into()),
                    track: Some(1),
                    ..AudioFileRecord::default()
                },
                CandidateInfo {
                    title: Some("Brakhage".into()),
                    index: Some(1),
                    medium: Some(1),
                    ..CandidateInfo::default()
                },
            )],
            extra_items: vec![AudioFileRecord {
                title: Some("hidden".into()),
                track: Some(9),
                ..AudioFileRecord::default()
            }],
            ..Candidate::default()
        }],
        ..Task::default()
    };

    let view = render_task(&id(), &task, &TaskPanel::default(), &settings());
    assert_eq!(
        view.body_lines(),
        vec![
            "Tagging:",
            "  Stereolab - Dots",
            "URL:",
            "  https://mb/r/1",
            "(Similarity: 90.00)",
            " * brakhage  -> Brakhage",
            "Unmatched tracks (1)",
            "  ! hidden (#9)",
        ]
    );
    assert_eq!(view.candidates[0].text, "Stereolab - Dots (90.00%)");
}

#[test]
fn unknown_album_placeholder_on_both_sides() {
    let task = Task {
        is_album: true,
        cur_artist: Some("Someone".into()),
        candidates: vec![Candidate::default()],
        ..Task::default()
    };
    let view = render_task(&id(), &task, &TaskPanel::default(), &settings());
    assert_eq!(
        view.body_lines()[..4],
        ["Correcting tags from:", "  Someone - ", "To:", "  (unknown album)"]
    );
}

#[test]
fn search_by_name_form_replaces_action_bar_and_submits() {
    let task = track_task("X", "Y", vec![track_candidate("X", "Y", 0.0)]);
    let mut panel = TaskPanel::default();
    panel.begin_search_by_name();
    panel.push_char('a');
    panel.push_char('b');
    panel.switch_field();
    panel.push_char('c');
    panel.push_char('d');
    panel.pop_char();

    let view = render_task(&id(), &task, &panel, &settings());
    assert!(view.actions.is_empty());
    assert_eq!(view.action('a'), None);
    assert_eq!(
        view.controls_line().unwrap(),
        "Search by name: artist: [ab]  name: [c_]"
    );

    let mutation = panel.submit(&id()).unwrap();
    assert_eq!(mutation, Mutation::search_by_name(&id(), "ab", "c"));
    assert_eq!(panel.input, InputMode::Idle);
    assert!(panel.submit(&id()).is_none());
}

#[test]
fn search_by_id_form_and_cancel() {
    let mut panel = TaskPanel::default();
    panel.begin_search_by_name();
    panel.begin_search_by_id();
    panel.push_char('7');
    panel.switch_field();
    assert_eq!(
        panel.input,
        InputMode::EnteringSearchById { id: "7".into() }
    );

    let task = track_task("X", "Y", vec![track_candidate("X", "Y", 0.0)]);
    let view = render_task(&id(), &task, &panel, &settings());
    assert_eq!(view.controls_line().unwrap(), "Search by id: id: [7_]");

    panel.cancel_input();
    assert!(!panel.is_entering());
    assert_eq!(panel.submit(&id()), None);
}

#[test]
fn candidate_table_follows_visibility_and_cursor() {
    let task = track_task(
        "X",
        "Y",
        vec![
            track_candidate("X", "Y", 0.0),
            track_candidate("X", "Z", 0.5),
        ],
    );
    let mut panel = TaskPanel::new(false);
    let hidden = render_task(&id(), &task, &panel, &settings());
    assert!(!hidden.candidates_visible);
    assert_eq!(hidden.candidates.len(), 2);
    assert!(!hidden.to_text().contains("Candidates:"));

    panel.toggle_candidates();
    panel.cursor_up(task.candidates.len());
    let shown = render_task(&id(), &task, &panel, &settings());
    assert!(shown.to_text().ends_with(
        "Candidates:\n  [0] X - Y (100.00%)\n> [1] X - Z (50.00%)"
    ));
    assert_eq!(shown.action('c'), Some(PanelAction::ToggleCandidates));
    assert!(shown.controls_line().unwrap().ends_with("[c] Hide candidates"));

    panel.cursor_down(2);
    assert_eq!(panel.candidate_cursor, 0);
}

#[test]
fn rendering_is_idempotent() {
    let mut candidate = track_candidate("X", "Q", 0.25);
    candidate.distance.penalties = vec!["album_year".into()];
    let task = track_task("X", "Y", vec![candidate]);
    let panel = TaskPanel::new(true);

    let first = render_task(&id(), &task, &panel, &settings());
    let second = render_task(&id(), &task, &panel, &settings());
    assert_eq!(first, second);
    assert_eq!(first.to_text(), second.to_text());
}
