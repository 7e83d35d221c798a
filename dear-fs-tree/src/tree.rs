use crate::cache::{DirectoryListing, MetadataCache};
use crate::fs::{EntryInfo, MetadataSource};
use crate::path_key::PathKey;

#[cfg(feature = "tracing")]
use tracing::trace;

/// Whether a directory node offers further descent in a tree view.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Has at least one visible directory child
    Expandable,
    /// No visible directory child, unreadable, or reached through a symbolic link
    Leaf,
}

/// One directory node produced by [`directory_tree`].
///
/// Derived per call, never cached: classification depends on the hidden
/// visibility setting which may change at runtime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryNodeView {
    /// Full key of the node
    pub path: PathKey,
    /// Resolved metadata of the node
    pub info: EntryInfo,
    /// Depth below the traversal root (root is 0)
    pub depth: usize,
    /// Expandable or leaf
    pub kind: NodeKind,
    /// Whether this node is the selected path
    pub selected: bool,
}

impl DirectoryNodeView {
    /// Display name (last path segment).
    pub fn name(&self) -> &str {
        self.path.name()
    }

    /// Shorthand for `kind == NodeKind::Expandable`.
    pub fn is_expandable(&self) -> bool {
        self.kind == NodeKind::Expandable
    }
}

/// Options for [`directory_tree`].
#[derive(Clone, Debug, Default)]
pub struct DirectoryTreeOptions {
    /// Include entries whose name starts with `.` (the root is always shown)
    pub show_hidden: bool,
    /// Path to flag as selected
    pub selected: Option<PathKey>,
}

impl DirectoryTreeOptions {
    /// Defaults: hidden entries filtered, nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show hidden entries.
    pub fn show_hidden(mut self, yes: bool) -> Self {
        self.show_hidden = yes;
        self
    }

    /// Flag `path` as selected.
    pub fn selected(mut self, path: impl Into<Option<PathKey>>) -> Self {
        self.selected = path.into();
        self
    }
}

/// Walk the directory-only tree below `root`, lazily.
///
/// Nodes come out depth-first in listing order. `descend` is asked once per
/// expandable node whether to visit its directory children; a tree view
/// answers with its "is this node open" state. Regular files never appear.
///
/// Unreadable nodes are skipped (a failed listing below the root still
/// yields the node, as a leaf); siblings are unaffected. If the root itself
/// cannot be read or is not a directory the iterator is empty.
///
/// Symbolic links to directories are yielded as leaves and never descended
/// through, so a link to an ancestor cannot make the walk unbounded.
pub fn directory_tree<'c, S, F>(
    cache: &'c mut MetadataCache<S>,
    root: &PathKey,
    options: &DirectoryTreeOptions,
    descend: F,
) -> DirectoryTree<'c, S, F>
where
    S: MetadataSource,
    F: FnMut(&DirectoryNodeView) -> bool,
{
    DirectoryTree {
        cache,
        options: options.clone(),
        stack: vec![(root.clone(), 0)],
        descend,
    }
}

/// Lazy iterator returned by [`directory_tree`].
pub struct DirectoryTree<'c, S, F> {
    cache: &'c mut MetadataCache<S>,
    options: DirectoryTreeOptions,
    stack: Vec<(PathKey, usize)>,
    descend: F,
}

impl<S, F> DirectoryTree<'_, S, F>
where
    S: MetadataSource,
    F: FnMut(&DirectoryNodeView) -> bool,
{
    fn visit(&mut self, path: PathKey, depth: usize) -> Option<DirectoryNodeView> {
        let is_root = depth == 0;
        let info = match self.cache.get_stat(&path) {
            Ok(v) => v,
            Err(_) => {
                trace_node_skipped(&path, "stat_failed");
                return None;
            }
        };
        if !is_root && !self.options.show_hidden && info.is_hidden() {
            return None;
        }
        if !info.is_dir {
            return None;
        }

        let mut children = Vec::new();
        // The root may itself be a link (e.g. a symlinked home); anything
        // below it is never entered through one.
        if is_root || !info.is_symlink {
            match self.cache.get_listing(&path) {
                Ok(listing) => {
                    children = visible_subdirectories(&listing, self.options.show_hidden)
                        .map(|c| c.name.clone())
                        .collect();
                }
                Err(_) if is_root => {
                    trace_node_skipped(&path, "root_unreadable");
                    return None;
                }
                Err(_) => trace_node_skipped(&path, "listing_failed"),
            }
        }

        let kind = if children.is_empty() {
            NodeKind::Leaf
        } else {
            NodeKind::Expandable
        };
        let node = DirectoryNodeView {
            selected: self.options.selected.as_ref() == Some(&path),
            path,
            info,
            depth,
            kind,
        };
        if kind == NodeKind::Expandable && (self.descend)(&node) {
            for name in children.iter().rev() {
                self.stack.push((node.path.join(name), depth + 1));
            }
        }
        Some(node)
    }
}

impl<S, F> Iterator for DirectoryTree<'_, S, F>
where
    S: MetadataSource,
    F: FnMut(&DirectoryNodeView) -> bool,
{
    type Item = DirectoryNodeView;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((path, depth)) = self.stack.pop() {
            if let Some(node) = self.visit(path, depth) {
                return Some(node);
            }
        }
        None
    }
}

/// Classify one directory without walking it.
///
/// Returns `None` if `dir` cannot be listed.
pub fn classify<S: MetadataSource>(
    cache: &mut MetadataCache<S>,
    dir: &PathKey,
    show_hidden: bool,
) -> Option<NodeKind> {
    let listing = cache.get_listing(dir).ok()?;
    if visible_subdirectories(&listing, show_hidden)
        .next()
        .is_some()
    {
        Some(NodeKind::Expandable)
    } else {
        Some(NodeKind::Leaf)
    }
}

/// Regular files (and links to them) directly inside `dir`, in listing order.
///
/// Directories are excluded; they are navigated through [`directory_tree`].
/// An unreadable `dir` yields an empty list.
pub fn directory_contents<S: MetadataSource>(
    cache: &mut MetadataCache<S>,
    dir: &PathKey,
    show_hidden: bool,
) -> Vec<EntryInfo> {
    let listing = match cache.get_listing(dir) {
        Ok(v) => v,
        Err(_) => {
            trace_node_skipped(dir, "contents_unreadable");
            return Vec::new();
        }
    };
    listing
        .values()
        .filter(|e| !e.is_dir)
        .filter(|e| show_hidden || !e.is_hidden())
        .cloned()
        .collect()
}

fn visible_subdirectories(
    listing: &DirectoryListing,
    show_hidden: bool,
) -> impl Iterator<Item = &EntryInfo> {
    listing
        .values()
        .filter(move |e| e.is_dir && (show_hidden || !e.is_hidden()))
}

#[cfg(feature = "tracing")]
fn trace_node_skipped(path: &PathKey, reason: &'static str) {
    trace!(event = "tree.node_skipped", path = %path, reason, "node skipped");
}

#[cfg(not(feature = "tracing"))]
fn trace_node_skipped(_path: &PathKey, _reason: &'static str) {}
