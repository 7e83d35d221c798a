use std::io::{self, Write};

use dear_fs_tree::{
    DirectoryTreeOptions, MetadataCache, MetadataSource, NodeKind, directory_contents,
    directory_tree, format_modified, format_size,
};
use tracing::debug;

use crate::state::PickerState;

const NAME_WIDTH: usize = 48;

/// Draw one frame: the open part of the directory tree, then the file table of
/// the focused directory.
///
/// Called after every command; the cache keeps repeated frames free of
/// filesystem calls for paths already seen.
pub fn frame<W: Write, S: MetadataSource>(
    out: &mut W,
    cache: &mut MetadataCache<S>,
    state: &PickerState,
) -> io::Result<()> {
    let options = DirectoryTreeOptions::new()
        .show_hidden(state.show_hidden)
        .selected(state.selected.clone());

    writeln!(out, " {:<NAME_WIDTH$} {:>10}  {}", "Path", "Size", "Time")?;
    let tree = directory_tree(cache, &state.root, &options, |n| state.is_expanded(&n.path));
    let mut rows = 0usize;
    for node in tree {
        let marker = match (node.kind, state.is_expanded(&node.path)) {
            (NodeKind::Expandable, true) => 'v',
            (NodeKind::Expandable, false) => '>',
            (NodeKind::Leaf, _) => ' ',
        };
        let label = format!("{}{marker} {}", "  ".repeat(node.depth), node.name());
        writeln!(
            out,
            "{}{label:<NAME_WIDTH$} {:>10}  {}",
            selection_mark(node.selected),
            "--",
            format_modified(node.info.modified)
        )?;
        rows += 1;
    }
    if rows == 0 {
        writeln!(out, "  (cannot read {})", state.root)?;
    }

    writeln!(out)?;
    writeln!(out, "Files in {}", state.focused)?;
    let files = directory_contents(cache, &state.focused, state.show_hidden);
    if files.is_empty() {
        writeln!(out, "  (no files)")?;
    }
    for f in &files {
        let selected = state.selected.as_ref() == Some(&state.focused.join(&f.name));
        writeln!(
            out,
            "{}  {:<w$} {:>10}  {}",
            selection_mark(selected),
            f.name,
            format_size(f.size),
            format_modified(f.modified),
            w = NAME_WIDTH - 2
        )?;
    }

    writeln!(out)?;
    let selected = state
        .selected
        .as_ref()
        .map(|p| p.to_string())
        .unwrap_or_default();
    writeln!(
        out,
        "selected: {selected}   hidden: {}",
        if state.show_hidden { "shown" } else { "filtered" }
    )?;
    write!(out, "> ")?;
    out.flush()?;

    let counters = cache.counters();
    debug!(
        event = "frame.rendered",
        tree_rows = rows,
        files = files.len(),
        stat_hits = counters.stat_hits,
        stat_misses = counters.stat_misses,
        listing_hits = counters.listing_hits,
        listing_misses = counters.listing_misses,
        "frame rendered"
    );
    Ok(())
}

fn selection_mark(selected: bool) -> char {
    if selected { '*' } else { ' ' }
}
