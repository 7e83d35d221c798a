use dear_fs_tree::PathKey;
use indexmap::IndexSet;

use crate::command::{Command, HELP};

/// UI-owned state threaded into the tree queries every frame.
#[derive(Clone, Debug)]
pub struct PickerState {
    /// Root of the tree view
    pub root: PathKey,
    /// Directories currently open in the tree view
    pub expanded: IndexSet<PathKey>,
    /// Directory whose files are listed
    pub focused: PathKey,
    /// Path to print on confirmation
    pub selected: Option<PathKey>,
    /// Show entries starting with `.`
    pub show_hidden: bool,
}

/// What the loop should do after a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Render the next frame
    Continue,
    /// Print this path and exit successfully
    Confirm(PathKey),
    /// Exit without a selection
    Cancel,
    /// Show a message, then render the next frame
    Message(String),
}

impl PickerState {
    /// Start with the root open and focused.
    pub fn new(root: PathKey, show_hidden: bool) -> Self {
        let mut expanded = IndexSet::new();
        expanded.insert(root.clone());
        Self {
            focused: root.clone(),
            root,
            expanded,
            selected: None,
            show_hidden,
        }
    }

    /// Whether `path` is open in the tree view.
    pub fn is_expanded(&self, path: &PathKey) -> bool {
        self.expanded.contains(path)
    }

    /// Resolve user input against the focused directory.
    pub fn resolve(&self, input: &str) -> Option<PathKey> {
        if input.starts_with('/') {
            PathKey::new(input).ok()
        } else {
            PathKey::new(&format!("{}/{}", self.focused, input)).ok()
        }
    }

    /// Apply one command.
    pub fn apply(&mut self, command: Command) -> Outcome {
        match command {
            Command::Refresh => Outcome::Continue,
            Command::Toggle(p) => self.with_path(&p, |s, path| {
                if !s.expanded.shift_remove(&path) {
                    s.expanded.insert(path);
                }
            }),
            Command::Focus(p) => self.with_path(&p, |s, path| {
                s.focused = path.clone();
                s.selected = Some(path);
            }),
            Command::Pick(p) => self.with_path(&p, |s, path| s.selected = Some(path)),
            Command::ToggleHidden => {
                self.show_hidden = !self.show_hidden;
                Outcome::Continue
            }
            Command::Select => match &self.selected {
                Some(path) => Outcome::Confirm(path.clone()),
                None => Outcome::Message("nothing selected".into()),
            },
            Command::Cancel => Outcome::Cancel,
            Command::Help => Outcome::Message(HELP.into()),
        }
    }

    fn with_path(&mut self, input: &str, f: impl FnOnce(&mut Self, PathKey)) -> Outcome {
        match self.resolve(input) {
            Some(path) => {
                f(self, path);
                Outcome::Continue
            }
            None => Outcome::Message(format!("invalid path: {input}")),
        }
    }
}
