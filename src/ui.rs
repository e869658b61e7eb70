//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::App;
use crate::config::Settings;
use crate::review::{TaskView, ViewBlock};

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map: BTreeMap<&'static str, &'static str> = BTreeMap::new();
    map.insert("j/k", "task");
    map.insert("J/K", "candidate");
    map.insert("c", "candidates");
    map.insert("enter", "select candidate");
    map.insert("a", "apply");
    map.insert("s", "skip");
    map.insert("i", "as is");
    map.insert("t", "as tracks");
    map.insert("n/#", "search name/id");
    map.insert("b/r/m", "keep/remove/merge");
    map.insert("R", "reload");
    map.insert("/", "filter");
    map.insert("q", "quit");
    map
});

const LEFT_PAD: Padding = Padding {
    left: 1,
    right: 0,
    top: 0,
    bottom: 0,
};

/// Render the controls help text for the current input mode.
fn controls_text(app: &App) -> String {
    if app.filter_mode {
        return "[type] filter | [ctrl-j/k] move | [enter] keep filter | [esc] clear".to_string();
    }
    if app.is_entering_search() {
        return "[type] edit | [tab] switch field | [enter] search | [esc] cancel".to_string();
    }

    // Keep the rendered order stable and human-friendly.
    let order = [
        "j/k", "J/K", "c", "enter", "a", "s", "i", "t", "n/#", "b/r/m", "R", "/", "q",
    ];
    order
        .iter()
        .filter_map(|k| CONTROLS_MAP.get(k).map(|v| format!("[{k}] {v}")))
        .collect::<Vec<String>>()
        .join(" | ")
}

fn status_text(app: &App, settings: &Settings) -> String {
    let mut parts: Vec<String> = vec![
        format!("SERVER: {}", settings.server.base_url),
        format!("TASKS: {}", app.tasks.len()),
    ];

    let q = app.filter_query.trim();
    if app.filter_mode || !q.is_empty() {
        let mut filter_part = String::from("FILTER:");
        if !q.is_empty() {
            filter_part.push(' ');
            filter_part.push_str(q);
        }
        parts.push(filter_part);
    }

    let changed = (0..app.tasks.len()).filter(|&i| app.is_changed(i)).count();
    parts.push(format!("CHANGED: {changed}"));
    parts.join(" • ")
}

/// Uppercase the characters of `label` the filter matched.
fn highlight_matches(label: &str, query: &str) -> String {
    let Some(positions) = App::fuzzy_match_positions(label, query) else {
        return label.to_string();
    };

    let mut rendered = String::new();
    let mut pos_iter = positions.into_iter();
    let mut next_pos = pos_iter.next();
    for (ci, ch) in label.chars().enumerate() {
        if next_pos == Some(ci) {
            rendered.extend(ch.to_uppercase());
            next_pos = pos_iter.next();
        } else {
            rendered.push(ch);
        }
    }
    rendered
}

fn draw_queue(frame: &mut Frame, area: Rect, app: &App, display: &[usize], settings: &Settings) {
    let q = app.filter_query.trim();
    let marker = settings.ui.changed_marker.as_str();
    let blank = " ".repeat(marker.chars().count());

    // Center the selected task when possible; only build items for the visible window.
    let total = display.len();
    let list_height = area.height.saturating_sub(2) as usize;
    let sel_pos = display.iter().position(|&i| i == app.selected).unwrap_or(0);
    let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
        (0, total, sel_pos)
    } else {
        let half = list_height / 2;
        let mut start = sel_pos.saturating_sub(half);
        if start + list_height > total {
            start = total - list_height;
        }
        (start, start + list_height, sel_pos - start)
    };

    let items: Vec<ListItem> = display[start..end]
        .iter()
        .map(|&i| {
            let label = if q.is_empty() {
                app.label(i).to_string()
            } else {
                highlight_matches(app.label(i), q)
            };
            let mark = if app.is_changed(i) { marker } else { blank.as_str() };
            ListItem::new(format!("{mark} {label}"))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" queue "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ratatui::widgets::ListState::default();
    if total > 0 {
        state.select(Some(selected_pos_in_visible));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn view_lines(view: &TaskView) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();

    let notice = view
        .blocks
        .iter()
        .any(|block| matches!(block, ViewBlock::Notice(_)));
    for text in view.body_lines() {
        lines.push(Line::from(text));
    }
    if notice {
        if let Some(last) = lines.pop() {
            lines.push(last.italic().fg(Color::Yellow));
        }
    }

    if let Some(controls) = view.controls_line() {
        lines.push(Line::default());
        let line = Line::from(controls);
        lines.push(if view.search.is_some() {
            line.bold().fg(Color::Cyan)
        } else {
            line.bold()
        });
    }

    if view.candidates_visible && !view.candidates.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from("Candidates:").bold());
        for row in &view.candidates {
            let line = Line::from(format!("  {}", TaskView::candidate_line(row)));
            lines.push(if row.highlighted { line.reversed() } else { line });
        }
    }

    lines
}

fn draw_detail(frame: &mut Frame, area: Rect, app: &App) {
    if let Some(error) = &app.error {
        let banner = Paragraph::new(error.as_str())
            .fg(Color::Red)
            .block(Block::bordered().padding(LEFT_PAD).title(" error (R reloads) "))
            .wrap(Wrap { trim: false });
        frame.render_widget(banner, area);
        return;
    }

    let (title, lines) = match app.selected_view() {
        Some(view) => (format!(" task {} ", view.id), view_lines(&view)),
        None => (" task ".to_string(), vec![Line::from("no pending tasks")]),
    };
    let detail = Paragraph::new(lines)
        .block(Block::bordered().padding(LEFT_PAD).title(title))
        .wrap(Wrap { trim: false });
    frame.render_widget(detail, area);
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, display: &[usize], settings: &Settings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(settings.ui.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" tagreview ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let status = Paragraph::new(status_text(app, settings))
        .block(Block::bordered().padding(LEFT_PAD).title(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[1]);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[2]);
    draw_queue(frame, main[0], app, display, settings);
    draw_detail(frame, main[1], app);

    let footer = Paragraph::new(controls_text(app))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(LEFT_PAD),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}
