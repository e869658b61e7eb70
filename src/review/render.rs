use super::panel::{InputMode, SearchField, TaskPanel};
use super::view::{
    ActionButton, CandidateRow, FormField, PanelAction, SearchForm, TaskView, ViewBlock,
};
use crate::config::ReviewSettings;
use crate::diff::{
    album_identity_changed, disambig_label, is_various_artists, penalty_label,
    track_identity_changed,
};
use crate::format::similarity_percent;
use crate::reconcile::{TrackListSection, reconcile_tracks};
use crate::service::ActionName;
use crate::summary::summarize_or_placeholder;
use crate::task::{
    Candidate, DuplicateRecord, Task, TaskId, TaskPaths, present, text,
};

/// Build the view of one task. Pure: same inputs, same view.
pub fn render_task(
    id: &TaskId,
    task: &Task,
    panel: &TaskPanel,
    settings: &ReviewSettings,
) -> TaskView {
    let mut view = TaskView::new(id.clone());

    if task.is_album {
        path_lines(&mut view, &task.paths, task.items.len());
    }

    let matched = match task.current_match() {
        Some(candidate) if !task.candidates.is_empty() => candidate,
        _ => {
            view.blocks
                .push(ViewBlock::Notice("no candidates found".to_string()));
            return view;
        }
    };

    if let Some(duplicates) = &task.found_duplicates {
        duplicate_section(&mut view, task, duplicates);
        return view;
    }

    if task.is_album {
        album_comparison(&mut view, task, matched, settings);
    } else {
        track_comparison(&mut view, task, matched);
    }
    view.line(info_line(matched, settings));

    if task.is_album {
        track_changes(&mut view, matched);
    }

    action_bar(&mut view, panel);
    candidate_table(&mut view, task, panel, settings);
    view
}

fn path_lines(view: &mut TaskView, paths: &TaskPaths, item_count: usize) {
    match paths {
        TaskPaths::Single(path) => view.line(format!("{path} ({item_count} items)")),
        TaskPaths::Segments(segments) => {
            if let Some((last, leading)) = segments.split_last() {
                for segment in leading {
                    view.line(segment.clone());
                }
                view.line(format!("{last} ({item_count} items)"));
            }
        }
    }
}

fn duplicate_section(view: &mut TaskView, task: &Task, duplicates: &[DuplicateRecord]) {
    let (artist, name) = if task.is_album {
        (text(&task.cur_artist), text(&task.cur_album))
    } else {
        (text(&task.artist), text(&task.title))
    };
    let singleton = !task.is_album;

    view.line(format!("\"{artist} - {name}\" is already in the Library"));
    for duplicate in duplicates {
        view.line(format!(
            "Old: {}",
            summarize_or_placeholder(duplicate.items(), singleton)
        ));
    }
    let imported = task.imported_items.as_deref().unwrap_or(&[]);
    view.line(format!(
        "New: {}",
        summarize_or_placeholder(imported, singleton)
    ));

    view.actions = [
        ('s', ActionName::SkipNew),
        ('b', ActionName::KeepBoth),
        ('r', ActionName::RemoveOld),
        ('m', ActionName::MergeAll),
    ]
    .into_iter()
    .map(|(key, action)| ActionButton::new(key, action.label(), PanelAction::Run(action)))
    .collect();
}

fn track_comparison(view: &mut TaskView, task: &Task, matched: &Candidate) {
    let info = &matched.info;
    let (cur_artist, cur_title) = (text(&task.artist), text(&task.title));

    if track_identity_changed(task, info) {
        view.line("Correcting track tags from:");
        view.indented(format!("{cur_artist} - {cur_title}"));
        view.line("To:");
        view.indented(format!("{} - {}", text(&info.artist), text(&info.title)));
    } else {
        view.line(format!("Tagging track: {cur_artist} {cur_title}"));
    }

    if let Some(url) = present(&info.data_url) {
        view.indented(url);
    }
}

fn album_comparison(
    view: &mut TaskView,
    task: &Task,
    matched: &Candidate,
    settings: &ReviewSettings,
) {
    let info = &matched.info;

    if album_identity_changed(task, info, &settings.various_artists) {
        let blank_artists = is_various_artists(info, &settings.various_artists);
        let (artist_l, artist_r) = if blank_artists {
            ("", "")
        } else {
            (text(&task.cur_artist), text(&info.artist))
        };
        view.line("Correcting tags from:");
        view.indented(album_line(artist_l, text(&task.cur_album)));
        view.line("To:");
        view.indented(album_line(artist_r, text(&info.album)));
    } else {
        view.line("Tagging:");
        view.indented(format!("{} - {}", text(&info.artist), text(&info.album)));
    }

    if let Some(url) = present(&info.data_url) {
        view.line("URL:");
        view.indented(url);
    }
}

fn album_line(artist: &str, album: &str) -> String {
    if !artist.is_empty() {
        format!("{artist} - {album}")
    } else if !album.is_empty() {
        album.to_string()
    } else {
        "(unknown album)".to_string()
    }
}

/// `(Similarity: 95.00) (year) (Discogs, 2001)`
fn info_line(matched: &Candidate, settings: &ReviewSettings) -> String {
    let mut parts = vec![format!(
        "(Similarity: {})",
        similarity_percent(matched.distance.distance)
    )];
    let penalties = penalty_label(&matched.distance);
    if !penalties.is_empty() {
        parts.push(penalties);
    }
    let disambig = disambig_label(&matched.info, &settings.default_data_source);
    if !disambig.is_empty() {
        parts.push(format!("({disambig})"));
    }
    parts.join(" ")
}

fn track_changes(view: &mut TaskView, matched: &Candidate) {
    let reconciliation = reconcile_tracks(matched);
    if !reconciliation.rows.is_empty() {
        view.blocks.push(ViewBlock::Table(
            reconciliation.rows.iter().map(|row| row.cells()).collect(),
        ));
    }
    for section in [reconciliation.missing, reconciliation.unmatched]
        .into_iter()
        .flatten()
    {
        leftover_section(view, section);
    }
}

fn leftover_section(view: &mut TaskView, section: TrackListSection) {
    view.line(section.header);
    for line in section.lines {
        view.indented(line);
    }
}

fn action_bar(view: &mut TaskView, panel: &TaskPanel) {
    match &panel.input {
        InputMode::Idle => {
            let mut buttons: Vec<ActionButton> = [
                ('a', ActionName::Apply),
                ('s', ActionName::Skip),
                ('i', ActionName::AsIs),
                ('t', ActionName::AsTracks),
            ]
            .into_iter()
            .map(|(key, action)| ActionButton::new(key, action.label(), PanelAction::Run(action)))
            .collect();
            buttons.push(ActionButton::new(
                'n',
                "Search by name",
                PanelAction::SearchByName,
            ));
            buttons.push(ActionButton::new('#', "Search by id", PanelAction::SearchById));
            let toggle = if panel.candidates_shown {
                "Hide candidates"
            } else {
                "Show candidates"
            };
            buttons.push(ActionButton::new('c', toggle, PanelAction::ToggleCandidates));
            view.actions = buttons;
        }
        InputMode::EnteringSearchByName {
            artist,
            name,
            field,
        } => {
            view.search = Some(SearchForm {
                title: "Search by name",
                fields: vec![
                    FormField {
                        label: "artist",
                        value: artist.clone(),
                        focused: *field == SearchField::Artist,
                    },
                    FormField {
                        label: "name",
                        value: name.clone(),
                        focused: *field == SearchField::Name,
                    },
                ],
            });
        }
        InputMode::EnteringSearchById { id } => {
            view.search = Some(SearchForm {
                title: "Search by id",
                fields: vec![FormField {
                    label: "id",
                    value: id.clone(),
                    focused: true,
                }],
            });
        }
    }
}

fn candidate_table(
    view: &mut TaskView,
    task: &Task,
    panel: &TaskPanel,
    settings: &ReviewSettings,
) {
    view.candidates_visible = panel.candidates_shown;
    view.candidates = task
        .candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| CandidateRow {
            index,
            text: candidate_text(task.is_album, candidate, settings),
            highlighted: index == panel.candidate_cursor,
        })
        .collect();
}

/// `<artist> - <album|title> (<pct>%) <penalties> (<disambig>)`, empty parts dropped.
fn candidate_text(is_album: bool, candidate: &Candidate, settings: &ReviewSettings) -> String {
    let info = &candidate.info;
    let name = if is_album { &info.album } else { &info.title };

    let mut parts: Vec<String> = Vec::new();
    let identity: Vec<&str> = [present(&info.artist), present(name)]
        .into_iter()
        .flatten()
        .collect();
    if !identity.is_empty() {
        parts.push(identity.join(" - "));
    }
    parts.push(format!("({}%)", similarity_percent(candidate.distance.distance)));
    let penalties = penalty_label(&candidate.distance);
    if !penalties.is_empty() {
        parts.push(penalties);
    }
    let disambig = disambig_label(info, &settings.default_data_source);
    if !disambig.is_empty() {
        parts.push(format!("({disambig})"));
    }
    parts.join(" ")
}
