//! Display formatting for raw numeric values (distances, durations, sizes).

/// Unit prefixes walked by [`format_bytes`]. `H` is the overflow tier.
const BYTE_PREFIXES: [&str; 10] = ["", "K", "M", "G", "T", "P", "E", "Z", "Y", "H"];
const OVERFLOW_PREFIX: &str = "H";

/// Similarity percentage of a distance in `[0, 1]`, two decimals.
pub fn similarity_percent(distance: f64) -> String {
    format!("{:.2}", (1.0 - distance) * 100.0)
}

/// Format seconds as `MM:SS`, flooring partial seconds.
///
/// The first field is not capped, so long albums render as `100:00`.
pub fn format_duration(seconds: f64) -> String {
    let total = whole_seconds(seconds);
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Format seconds as `M:SS` with unpadded minutes.
///
/// Seconds are always zero-padded: `185 -> "3:05"`, never `3:5`.
pub fn format_short_duration(seconds: f64) -> String {
    let total = whole_seconds(seconds);
    format!("{}:{:02}", total / 60, total % 60)
}

/// Human-readable byte count: `512.0 B`, `1.5 KiB`, `7.6 MiB`, ...
///
/// The first tier is plain `B`, later tiers use binary `iB` suffixes.
/// Anything that would reach the overflow tier renders as `big`.
pub fn format_bytes(bytes: f64) -> String {
    let mut size = bytes;
    let mut unit = "B";
    for power in BYTE_PREFIXES {
        if power == OVERFLOW_PREFIX {
            break;
        }
        if size < 1024.0 {
            // Ties round up (`1.25 -> 1.3`); `{:.1}` alone rounds them to even.
            let shown = (size * 10.0).round() / 10.0;
            return format!("{shown:.1} {power}{unit}");
        }
        size /= 1024.0;
        unit = "iB";
    }
    "big".to_string()
}

fn whole_seconds(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    }
}
