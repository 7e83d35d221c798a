//! Terminal file-path picker.
//!
//! Shows a lazily expanded directory tree and the files of one directory,
//! reads commands from stdin and, on `select`, prints the chosen path on
//! stdout and exits 0. Cancelling (or EOF) exits 1.

mod command;
mod logging;
mod render;
mod state;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use dear_fs_tree::{MetadataCache, PathKey};
use tracing::info;

use crate::command::Command;
use crate::state::{Outcome, PickerState};

/// Pick a filesystem path interactively and print it on stdout.
#[derive(Parser, Debug)]
#[command(name = "dear-fs-picker", version, about)]
struct Args {
    /// Root of the directory tree
    #[arg(default_value = "/")]
    root: PathBuf,
    /// Start with hidden entries shown
    #[arg(long)]
    show_hidden: bool,
    /// Log filter (overrides RUST_LOG), e.g. `dear_fs_tree=trace`
    #[arg(long)]
    log: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_tracing(args.log.as_deref());
    match run(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let root = root_key(args.root)?;
    info!(root = %root, show_hidden = args.show_hidden, "picker started");

    let mut cache = MetadataCache::new();
    let mut state = PickerState::new(root, args.show_hidden);
    let mut ui = io::stderr().lock();
    let mut lines = io::stdin().lock().lines();

    loop {
        render::frame(&mut ui, &mut cache, &state).context("render frame")?;
        let Some(line) = lines.next() else {
            return Ok(ExitCode::from(1));
        };
        let line = line.context("read command")?;
        let command = match Command::parse(&line) {
            Ok(c) => c,
            Err(err) => {
                writeln!(ui, "{err}")?;
                continue;
            }
        };
        match state.apply(command) {
            Outcome::Continue => {}
            Outcome::Message(msg) => writeln!(ui, "{msg}")?,
            Outcome::Confirm(path) => {
                info!(path = %path, "path selected");
                println!("{path}");
                return Ok(ExitCode::SUCCESS);
            }
            Outcome::Cancel => return Ok(ExitCode::from(1)),
        }
    }
}

fn root_key(root: PathBuf) -> Result<PathKey> {
    let root = if root.is_absolute() {
        root
    } else {
        std::env::current_dir()
            .context("resolve working directory")?
            .join(root)
    };
    PathKey::from_path(&root).with_context(|| format!("invalid root {}", root.display()))
}
