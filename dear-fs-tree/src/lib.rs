#![deny(missing_docs)]
//! Lazy filesystem metadata cache and directory tree traversal.
//!
//! This crate backs a file-path picker that re-renders every frame. It answers
//! "what lives under this directory, and what are its sizes/times/types" while
//! issuing each `stat`/`readdir` at most once per session.
//!
//! Layers, each depending only on the one below:
//! - [`MetadataSource`]: wraps the OS stat/list primitives (symlinks resolved)
//! - [`MetadataCache`]: memoizes stats and listings per [`PathKey`]
//! - [`directory_tree`] / [`directory_contents`]: the two read-only queries a
//!   tree view and a file table consume
//!
//! The cache never invalidates. Its results are valid for one session as long
//! as nothing mutates the observed subtree behind its back.
//!
//! ```no_run
//! use dear_fs_tree::{DirectoryTreeOptions, MetadataCache, PathKey, directory_tree};
//!
//! let mut cache = MetadataCache::new();
//! let root = PathKey::root();
//! let options = DirectoryTreeOptions::new().show_hidden(false);
//! // Only expand the root itself.
//! for node in directory_tree(&mut cache, &root, &options, |n| n.path.is_root()) {
//!     println!("{}{}", "  ".repeat(node.depth), node.name());
//! }
//! ```

mod cache;
mod core;
mod format;
mod fs;
mod path_key;
#[cfg(test)]
mod test_support;
mod tree;

pub use cache::{CacheCounters, DirectoryListing, MetadataCache};
pub use core::{LookupError, PathKeyError};
pub use format::{format_modified, format_size};
pub use fs::{EntryInfo, MetadataSource, StdMetadataSource};
pub use path_key::PathKey;
pub use tree::{
    DirectoryNodeView, DirectoryTree, DirectoryTreeOptions, NodeKind, classify,
    directory_contents, directory_tree,
};
