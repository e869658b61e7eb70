use serde_json::json;

use super::*;
use crate::config::ReviewSettings;
use crate::task::{Candidate, CandidateInfo, DuplicateRecord, Task, TaskId};

fn candidate(artist: &str, title: &str) -> Candidate {
    Candidate {
        info: CandidateInfo {
            artist: Some(artist.into()),
            title: Some(title.into()),
            ..CandidateInfo::default()
        },
        ..Candidate::default()
    }
}

fn t(id: &str, artist: &str, title: &str) -> (TaskId, Task) {
    (
        TaskId::new(id),
        Task {
            artist: Some(artist.into()),
            title: Some(title.into()),
            candidates: vec![candidate(artist, title), candidate(artist, "Other")],
            ..Task::default()
        },
    )
}

fn app(tasks: Vec<(TaskId, Task)>) -> App {
    App::new(tasks, ReviewSettings::default())
}

#[test]
fn fuzzy_match_simple() {
    let label = "Hello - World";
    assert!(App::fuzzy_match_positions(label, "hw").is_some());
    assert!(App::fuzzy_match_positions(label, "ello").is_some());
    assert!(App::fuzzy_match_positions(label, "xyz").is_none());
}

#[test]
fn display_indices_uses_fuzzy_labels() {
    let mut app = app(vec![
        t("1", "Metallica", "Blackened"),
        t("2", "Black Sabbath", "Paranoid"),
    ]);
    app.filter_query = "mtbk".into();
    assert_eq!(app.display_indices(), vec![0]);

    app.filter_query = "   ".into();
    assert_eq!(app.display_indices(), vec![0, 1]);
}

#[test]
fn next_prev_wrap_within_the_filtered_view() {
    let mut app = app(vec![t("1", "A", "Alpha"), t("2", "B", "Beta"), t("3", "G", "Gamma")]);
    app.filter_query = "et".into();

    assert_eq!(app.next_in_view_from(0), Some(1));
    assert_eq!(app.prev_in_view_from(0), Some(1));

    app.filter_query.clear();
    app.prev();
    assert_eq!(app.selected, 2);
    app.next();
    assert_eq!(app.selected, 0);
}

#[test]
fn filter_moves_selection_onto_a_visible_task() {
    let mut app = app(vec![t("1", "A", "Alpha"), t("2", "B", "Beta")]);
    app.enter_filter_mode();
    app.push_filter_char('b');
    app.push_filter_char('e');
    assert_eq!(app.selected, 1);

    app.clear_filter();
    assert!(!app.filter_mode);
    assert_eq!(app.display_indices(), vec![0, 1]);
}

#[test]
fn replace_tasks_resets_panels_clamps_cursor_and_clears_banner() {
    let mut app = app(vec![t("1", "A", "a"), t("2", "B", "b"), t("3", "C", "c")]);
    app.selected = 2;
    app.press_action('c');
    app.set_error("boom");

    app.replace_tasks(vec![t("1", "A", "a")]);
    assert_eq!(app.selected, 0);
    assert_eq!(app.panels.len(), 1);
    assert!(!app.panels[0].candidates_shown);
    assert_eq!(app.error, None);

    app.replace_tasks(Vec::new());
    assert_eq!(app.selected, 0);
    assert!(app.selected_view().is_none());
}

#[test]
fn action_keys_dispatch_for_the_selected_task() {
    let mut app = app(vec![t("1", "A", "a"), t("2", "B", "b")]);
    app.next();

    let m = app.press_action('a').unwrap();
    assert_eq!(m.endpoint, "/api/apply");
    assert_eq!(m.body, json!({ "task_index": "2" }));

    assert!(app.press_action('b').is_none(), "keep both needs duplicates");
    assert!(app.press_action('x').is_none());
}

#[test]
fn duplicate_keys_only_on_duplicate_tasks() {
    let (id, mut task) = t("5", "A", "a");
    task.found_duplicates = Some(vec![DuplicateRecord::Item(Default::default())]);
    let mut app = app(vec![(id, task)]);

    let m = app.press_action('m').unwrap();
    assert_eq!(m.body, json!({ "task_index": "5", "duplicate_action": "m" }));
    assert_eq!(app.press_action('s').unwrap().endpoint, "/api/skip");
    assert!(app.press_action('a').is_none());
}

#[test]
fn candidate_selection_requires_the_table_to_be_shown() {
    let mut app = app(vec![t("1", "A", "a")]);
    assert!(app.select_highlighted_candidate().is_none());

    app.press_action('c');
    app.candidate_cursor_down();
    let m = app.select_highlighted_candidate().unwrap();
    assert_eq!(m.body, json!({ "task_index": "1", "candidate_index": 1 }));

    app.candidate_cursor_down();
    app.candidate_cursor_up();
    assert_eq!(app.panels[0].candidate_cursor, 1);
}

#[test]
fn search_input_round_trip() {
    let mut app = app(vec![t("9", "A", "a")]);
    assert!(!app.is_entering_search());

    app.press_action('n');
    assert!(app.is_entering_search());
    for c in "Can".chars() {
        app.search_push_char(c);
    }
    app.search_switch_field();
    for c in "Tago Mago!".chars() {
        app.search_push_char(c);
    }
    app.search_pop_char();
    assert!(app.press_action('a').is_none(), "action bar is replaced by the form");

    let m = app.search_submit().unwrap();
    assert_eq!(
        m.body,
        json!({ "task_index": "9", "artist": "Can", "name": "Tago Mago" })
    );
    assert!(!app.is_entering_search());

    app.press_action('#');
    app.search_push_char('x');
    app.search_cancel();
    assert!(app.search_submit().is_none());
}

#[test]
fn banner_blocks_actions() {
    let mut app = app(vec![t("1", "A", "a")]);
    app.set_error("server answered 500: nope");
    assert!(app.press_action('a').is_none());
    assert!(app.select_highlighted_candidate().is_none());
}

#[test]
fn changed_marker_reflects_the_current_match() {
    let (id, mut changed) = t("2", "A", "a");
    changed.candidates[0].info.title = Some("a (Live)".into());
    let app = app(vec![t("1", "A", "a"), (id, changed)]);

    assert!(!app.is_changed(0));
    assert!(app.is_changed(1));
    assert!(!app.is_changed(7));
    assert_eq!(app.label(1), "A - a");
}
