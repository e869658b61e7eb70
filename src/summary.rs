//! Aggregate a set of audio files into a one-line summary such as
//! `12 items, FLAC, 921kbps, 48:13, 402.3 MiB`.

use thiserror::Error;

use crate::format::{format_bytes, format_duration};
use crate::task::AudioFileRecord;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SummaryError {
    #[error("cannot summarize an empty set of items")]
    NoItems,
}

/// Summarize `items` as count, formats, average bitrate, total length and size.
///
/// `singleton` drops the leading item count. The average bitrate is floored
/// to whole kbps from the summed bits per second.
pub fn summarize_items(items: &[AudioFileRecord], singleton: bool) -> Result<String, SummaryError> {
    if items.is_empty() {
        return Err(SummaryError::NoItems);
    }

    let mut parts: Vec<String> = Vec::new();
    if !singleton {
        parts.push(format!("{} items", items.len()));
    }

    // First-seen order.
    let mut format_counts: Vec<(&str, usize)> = Vec::new();
    let mut total_bitrate: u64 = 0;
    let mut total_length: f64 = 0.0;
    let mut total_filesize: u64 = 0;

    for item in items {
        let format = item.format.as_deref().unwrap_or("");
        match format_counts.iter_mut().find(|(f, _)| *f == format) {
            Some((_, count)) => *count += 1,
            None => format_counts.push((format, 1)),
        }
        total_bitrate = total_bitrate.saturating_add(item.bitrate.unwrap_or(0));
        total_length += item.length.unwrap_or(0.0);
        total_filesize = total_filesize.saturating_add(item.filesize.unwrap_or(0));
    }

    if let [(format, _)] = format_counts.as_slice() {
        parts.push(format.to_string());
    } else {
        for (format, count) in &format_counts {
            parts.push(format!("{format} {count}"));
        }
    }

    parts.push(format!("{}kbps", total_bitrate / items.len() as u64 / 1000));
    parts.push(format_duration(total_length));
    parts.push(format_bytes(total_filesize as f64));

    Ok(parts.join(", "))
}

/// Like [`summarize_items`], degrading an empty set to `(no items)`.
pub fn summarize_or_placeholder(items: &[AudioFileRecord], singleton: bool) -> String {
    summarize_items(items, singleton).unwrap_or_else(|_| "(no items)".to_string())
}
