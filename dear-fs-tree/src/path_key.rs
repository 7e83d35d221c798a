use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::core::PathKeyError;

const SEPARATOR: char = '/';
const ROOT: &str = "/";

/// Normalized, absolute, slash-joined path identifying one filesystem node.
///
/// Invariants:
/// - always starts with `/`, never ends with one (except the root itself)
/// - never contains empty, `.` or `..` segments
/// - the root is its own parent
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathKey(String);

impl PathKey {
    /// The filesystem root (`/`).
    pub fn root() -> Self {
        Self(ROOT.to_owned())
    }

    /// Build a key from an absolute path string, normalizing it lexically.
    ///
    /// Repeated separators collapse, `.` segments are dropped and `..` pops one
    /// segment (never above the root). Symbolic links are not resolved.
    pub fn new(raw: &str) -> Result<Self, PathKeyError> {
        if raw.is_empty() {
            return Err(PathKeyError::Empty);
        }
        if !raw.starts_with(SEPARATOR) {
            return Err(PathKeyError::Relative(raw.to_owned()));
        }
        let mut segments: Vec<&str> = Vec::new();
        for segment in raw.split(SEPARATOR) {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                s => segments.push(s),
            }
        }
        if segments.is_empty() {
            return Ok(Self::root());
        }
        let mut out = String::with_capacity(raw.len());
        for s in segments {
            out.push(SEPARATOR);
            out.push_str(s);
        }
        Ok(Self(out))
    }

    /// Build a key from a filesystem path (lossy for non UTF-8 names).
    pub fn from_path(path: &Path) -> Result<Self, PathKeyError> {
        Self::new(&path.to_string_lossy())
    }

    /// Append one child segment.
    ///
    /// Separators around `name` are ignored, so joining never yields `//`.
    pub fn join(&self, name: &str) -> PathKey {
        let name = name.trim_matches(SEPARATOR);
        if name.is_empty() {
            return self.clone();
        }
        if self.is_root() {
            Self(format!("{SEPARATOR}{name}"))
        } else {
            Self(format!("{}{SEPARATOR}{name}", self.0))
        }
    }

    /// Parent key. The root is its own parent.
    pub fn parent(&self) -> PathKey {
        match self.0.rfind(SEPARATOR) {
            Some(0) | None => Self::root(),
            Some(i) => Self(self.0[..i].to_owned()),
        }
    }

    /// Last segment (`/` for the root).
    pub fn name(&self) -> &str {
        if self.is_root() {
            return ROOT;
        }
        match self.0.rfind(SEPARATOR) {
            Some(i) => &self.0[i + 1..],
            None => &self.0,
        }
    }

    /// Whether this is the root key.
    pub fn is_root(&self) -> bool {
        self.0 == ROOT
    }

    /// Number of segments below the root.
    pub fn depth(&self) -> usize {
        if self.is_root() {
            0
        } else {
            self.0.matches(SEPARATOR).count()
        }
    }

    /// Whether `ancestor` is this key or one of its ancestors (segment-wise).
    pub fn starts_with(&self, ancestor: &PathKey) -> bool {
        if ancestor.is_root() || self.0 == ancestor.0 {
            return true;
        }
        self.0.starts_with(&ancestor.0) && self.0.as_bytes()[ancestor.0.len()] == b'/'
    }

    /// Key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key as a filesystem path.
    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<Path> for PathKey {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}

impl FromStr for PathKey {
    type Err = PathKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
