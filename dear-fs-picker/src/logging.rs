//! Logging setup for the picker.
//!
//! Everything goes to stderr: stdout carries nothing but the selected path.

use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "dear_fs_tree=info,dear_fs_picker=info,warn";

/// Install the global subscriber.
///
/// `filter` (from `--log`) wins over `RUST_LOG`, which wins over the default.
pub fn init_tracing(filter: Option<&str>) {
    let filter = match filter {
        Some(f) => EnvFilter::new(f),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()),
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
