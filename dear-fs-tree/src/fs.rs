use std::path::Path;
use std::time::SystemTime;

use crate::core::LookupError;

#[cfg(feature = "tracing")]
use tracing::trace;

/// Metadata snapshot of one filesystem node.
///
/// For a symbolic link every field except `is_symlink` describes the resolved
/// target; a dangling link is a lookup failure, never a partial record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryInfo {
    /// Base name (no parent path)
    pub name: String,
    /// Whether the (resolved) node is a directory.
    pub is_dir: bool,
    /// Whether the path itself is a symbolic link.
    pub is_symlink: bool,
    /// Size in bytes (0 for directories).
    pub size: u64,
    /// Last modified timestamp (when available).
    pub modified: Option<SystemTime>,
}

impl EntryInfo {
    /// Build an entry from resolved `std::fs` metadata.
    pub(crate) fn from_metadata(name: String, md: &std::fs::Metadata, is_symlink: bool) -> Self {
        let is_dir = md.is_dir();
        Self {
            name,
            is_dir,
            is_symlink,
            size: if is_dir { 0 } else { md.len() },
            modified: md.modified().ok(),
        }
    }

    /// Whether the name starts with the hidden-name marker (`.`).
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// Source of filesystem metadata: the OS `stat` and `readdir` primitives.
///
/// Implementations must not cache; that is [`MetadataCache`](crate::MetadataCache)'s
/// job. Tests substitute a synthetic filesystem here.
pub trait MetadataSource {
    /// Stat a path, following symbolic links.
    fn stat(&self, path: &Path) -> Result<EntryInfo, LookupError>;
    /// List a directory's children in OS order.
    ///
    /// Children that are symbolic links are resolved with [`stat`](Self::stat)
    /// on the full child path. Children whose metadata cannot be resolved are
    /// skipped, and so are children whose name is not valid UTF-8 (they have no
    /// faithful [`PathKey`](crate::PathKey)).
    fn list_children(&self, dir: &Path) -> Result<Vec<EntryInfo>, LookupError>;
}

impl<S: MetadataSource + ?Sized> MetadataSource for &S {
    fn stat(&self, path: &Path) -> Result<EntryInfo, LookupError> {
        (**self).stat(path)
    }

    fn list_children(&self, dir: &Path) -> Result<Vec<EntryInfo>, LookupError> {
        (**self).list_children(dir)
    }
}

/// Default metadata source using `std::fs`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdMetadataSource;

impl MetadataSource for StdMetadataSource {
    /// One `lstat` for a plain node; a symbolic link costs a second `stat` to
    /// resolve its target, since `is_symlink` needs the unresolved type.
    fn stat(&self, path: &Path) -> Result<EntryInfo, LookupError> {
        let link_md = std::fs::symlink_metadata(path)?;
        let name = base_name(path);
        if link_md.file_type().is_symlink() {
            let md = std::fs::metadata(path)?;
            Ok(EntryInfo::from_metadata(name, &md, true))
        } else {
            Ok(EntryInfo::from_metadata(name, &link_md, false))
        }
    }

    fn list_children(&self, dir: &Path) -> Result<Vec<EntryInfo>, LookupError> {
        let mut out = Vec::new();
        let rd = std::fs::read_dir(dir)?;
        for e in rd {
            let e = match e {
                Ok(v) => v,
                Err(_) => continue,
            };
            let ft = match e.file_type() {
                Ok(v) => v,
                Err(_) => continue,
            };
            let name = match e.file_name().into_string() {
                Ok(v) => v,
                Err(raw) => {
                    trace_entry_skipped(dir, &raw, "non_utf8_name");
                    continue;
                }
            };
            let info = if ft.is_symlink() {
                // Never trust the entry type bit for links.
                match std::fs::metadata(e.path()) {
                    Ok(md) => EntryInfo::from_metadata(name, &md, true),
                    Err(_) => continue,
                }
            } else {
                match e.metadata() {
                    Ok(md) => EntryInfo::from_metadata(name, &md, false),
                    Err(_) => continue,
                }
            };
            out.push(info);
        }
        Ok(out)
    }
}

#[cfg(feature = "tracing")]
fn trace_entry_skipped(dir: &Path, name: &std::ffi::OsStr, reason: &'static str) {
    trace!(
        event = "source.entry_skipped",
        dir = %dir.display(),
        name = ?name,
        reason,
        "entry skipped"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_entry_skipped(_dir: &Path, _name: &std::ffi::OsStr, _reason: &'static str) {}

fn base_name(path: &Path) -> String {
    match path.file_name() {
        Some(n) => n.to_string_lossy().to_string(),
        None => path.to_string_lossy().to_string(),
    }
}
