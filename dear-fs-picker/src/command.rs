use thiserror::Error;

/// One line of user input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Redraw without changing anything (blank line)
    Refresh,
    /// Expand or collapse a directory node
    Toggle(String),
    /// Show a directory's files (also selects it)
    Focus(String),
    /// Set the selected path
    Pick(String),
    /// Flip hidden-entry visibility
    ToggleHidden,
    /// Confirm the selection
    Select,
    /// Leave without a selection
    Cancel,
    /// Print the command list
    Help,
}

/// Errors returned by [`Command::parse`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown verb
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    /// Verb requires a path argument
    #[error("'{0}' needs a path")]
    MissingPath(&'static str),
}

/// Command list printed by `help`.
pub(crate) const HELP: &str = "\
commands:
  toggle|open <dir>   expand or collapse a directory
  focus|cd <dir>      show the files of a directory
  pick <path>         set the selected path
  hidden              show/hide entries starting with '.'
  select              print the selected path and exit
  cancel|quit         exit without a selection";

impl Command {
    /// Parse a line; paths keep inner whitespace.
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Command::Refresh);
        }
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((v, r)) => (v, r.trim()),
            None => (line, ""),
        };
        let path = |name: &'static str| {
            if rest.is_empty() {
                Err(CommandError::MissingPath(name))
            } else {
                Ok(rest.to_string())
            }
        };
        match verb {
            "toggle" | "open" => path("toggle").map(Command::Toggle),
            "focus" | "cd" => path("focus").map(Command::Focus),
            "pick" => path("pick").map(Command::Pick),
            "hidden" => Ok(Command::ToggleHidden),
            "select" => Ok(Command::Select),
            "cancel" | "quit" | "q" => Ok(Command::Cancel),
            "help" | "?" => Ok(Command::Help),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}
