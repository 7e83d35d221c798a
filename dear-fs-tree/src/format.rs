use std::time::SystemTime;

use chrono::{DateTime, Local};

/// Day, month abbreviation, 2-digit year, 24h clock (e.g. `02 Jan 06 15:04`).
const MODIFIED_FORMAT: &str = "%d %b %y %H:%M";

/// Human-readable byte size using binary multiples.
///
/// Below 1024 the plain integer is returned without a unit; otherwise the value
/// is divided by 1024 through KB, MB, GB and TB while it stays at or above 1024
/// and printed with two decimals.
///
/// ```
/// use dear_fs_tree::format_size;
/// assert_eq!(format_size(1023), "1023");
/// assert_eq!(format_size(1536), "1.50 KB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    let mut scaled = bytes as f64;
    let mut unit = None;
    for u in UNITS {
        if scaled < 1024.0 {
            break;
        }
        scaled /= 1024.0;
        unit = Some(u);
    }
    match unit {
        Some(u) => format!("{scaled:.2} {u}"),
        None => bytes.to_string(),
    }
}

/// Local modification time for display; `--` when unknown.
pub fn format_modified(modified: Option<SystemTime>) -> String {
    match modified {
        Some(t) => {
            let dt: DateTime<Local> = DateTime::<Local>::from(t);
            dt.format(MODIFIED_FORMAT).to_string()
        }
        None => "--".into(),
    }
}
