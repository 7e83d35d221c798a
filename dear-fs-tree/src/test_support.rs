//! Synthetic in-memory filesystem counting calls into the metadata source.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::core::LookupError;
use crate::fs::{EntryInfo, MetadataSource};

#[derive(Default)]
pub(crate) struct TestFs {
    nodes: HashMap<PathBuf, EntryInfo>,
    children: HashMap<PathBuf, Vec<String>>,
    links: HashMap<PathBuf, PathBuf>,
    denied: HashSet<PathBuf>,
    flaky_stats: RefCell<HashMap<PathBuf, usize>>,
    pub(crate) stat_calls: Cell<usize>,
    pub(crate) list_calls: Cell<usize>,
}

fn info(name: &str, is_dir: bool, size: u64) -> EntryInfo {
    EntryInfo {
        name: name.to_string(),
        is_dir,
        is_symlink: false,
        size,
        modified: None,
    }
}

impl TestFs {
    pub(crate) fn new() -> Self {
        let mut fs = Self::default();
        fs.nodes.insert(PathBuf::from("/"), info("/", true, 0));
        fs.children.insert(PathBuf::from("/"), Vec::new());
        fs
    }

    pub(crate) fn dir(mut self, path: &str) -> Self {
        let p = self.attach(path);
        let name = p.file_name().unwrap().to_string_lossy().to_string();
        self.nodes.insert(p.clone(), info(&name, true, 0));
        self.children.insert(p, Vec::new());
        self
    }

    pub(crate) fn file(mut self, path: &str, size: u64) -> Self {
        let p = self.attach(path);
        let name = p.file_name().unwrap().to_string_lossy().to_string();
        self.nodes.insert(p, info(&name, false, size));
        self
    }

    /// Symbolic link at `path` pointing to the absolute `target`.
    pub(crate) fn link(mut self, path: &str, target: &str) -> Self {
        let p = self.attach(path);
        self.links.insert(p, PathBuf::from(target));
        self
    }

    /// Listing `path` fails with `AccessDenied`.
    pub(crate) fn deny(mut self, path: &str) -> Self {
        self.denied.insert(PathBuf::from(path));
        self
    }

    /// The next `times` stats of `path` fail with `AccessDenied`.
    pub(crate) fn flaky_stat(self, path: &str, times: usize) -> Self {
        self.flaky_stats
            .borrow_mut()
            .insert(PathBuf::from(path), times);
        self
    }

    fn attach(&mut self, path: &str) -> PathBuf {
        let p = PathBuf::from(path);
        let parent = p.parent().unwrap().to_path_buf();
        let name = p.file_name().unwrap().to_string_lossy().to_string();
        self.children
            .get_mut(&parent)
            .expect("parent directory must be added first")
            .push(name);
        p
    }

    fn resolve(&self, path: &Path) -> Result<EntryInfo, LookupError> {
        if let Some(target) = self.links.get(path) {
            let mut out = self.resolve(target)?;
            out.name = path.file_name().unwrap().to_string_lossy().to_string();
            out.is_symlink = true;
            return Ok(out);
        }
        self.nodes.get(path).cloned().ok_or(LookupError::NotFound)
    }

    fn resolve_dir(&self, path: &Path) -> PathBuf {
        for ancestor in path.ancestors() {
            if let Some(target) = self.links.get(ancestor) {
                let rest = path.strip_prefix(ancestor).unwrap();
                if rest.as_os_str().is_empty() {
                    return self.resolve_dir(target);
                }
                return self.resolve_dir(&target.join(rest));
            }
        }
        path.to_path_buf()
    }
}

impl MetadataSource for TestFs {
    fn stat(&self, path: &Path) -> Result<EntryInfo, LookupError> {
        self.stat_calls.set(self.stat_calls.get() + 1);
        if let Some(left) = self.flaky_stats.borrow_mut().get_mut(path) {
            if *left > 0 {
                *left -= 1;
                return Err(LookupError::AccessDenied);
            }
        }
        self.resolve(path)
    }

    fn list_children(&self, dir: &Path) -> Result<Vec<EntryInfo>, LookupError> {
        self.list_calls.set(self.list_calls.get() + 1);
        if self.denied.contains(dir) {
            return Err(LookupError::AccessDenied);
        }
        let real = self.resolve_dir(dir);
        if !self.nodes.contains_key(&real) {
            return Err(LookupError::NotFound);
        }
        let Some(names) = self.children.get(&real) else {
            return Err(LookupError::NotADirectory);
        };
        Ok(names
            .iter()
            .filter_map(|name| self.resolve(&real.join(name)).ok())
            .collect())
    }
}
