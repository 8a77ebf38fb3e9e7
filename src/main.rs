//! muxpick entry point: argument handling and the select-then-attach flow.

use std::env;
use std::io;
use std::io::IsTerminal;

use anyhow::{bail, Result};

use muxpick::config::Config;
use muxpick::discovery::{self, resolve_dir_arg};
use muxpick::selector::{Choice, FsDirSource, Outcome, Selector};
use muxpick::terminal::TerminalGuard;
use muxpick::tmux::{self, NameRegistry};

const USAGE: &str = "muxpick - minimal tmux session switcher

Usage:
  muxpick              Show interactive session selector
  muxpick <path>       Create new session in directory (use . for current directory)
  muxpick --version    Show version information
  muxpick --help       Show this help message

Navigation:
  Type           Filter sessions and projects by name
  Digits         Jump straight to a numbered entry
  Arrow keys     Navigate up/down
  Enter          Select the highlighted entry
  ..             Go up one level when drilled into a project
  Esc/Ctrl+C     Cancel

Examples:
  muxpick              Select from sessions and discovered projects
  muxpick .            Create session in current directory
  muxpick ~/projects   Create session in ~/projects
";

fn main() -> Result<()> {
    let mut registry = NameRegistry::new();
    let args: Vec<String> = env::args().skip(1).collect();

    if let Some(arg) = args.first() {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("{}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" => {
                print!("{USAGE}");
                return Ok(());
            }
            _ => {}
        }

        if !arg.starts_with('-') {
            return create_session_from_path(&mut registry, arg);
        }

        bail!("unknown option: {arg}\nRun 'muxpick --help' for usage");
    }

    select_and_attach(&mut registry)
}

/// Show the selector and act on the user's choice.
fn select_and_attach(registry: &mut NameRegistry) -> Result<()> {
    if !io::stdin().is_terminal() {
        bail!("muxpick must be run in an interactive terminal");
    }

    let config = Config::load()?;
    let sessions = tmux::list_sessions()?;
    let dirs = discovery::discover_directories(&config.search_path_spec());

    // Fails on empty candidates here, before the terminal is touched.
    let mut selector = match Selector::new(sessions, dirs, FsDirSource) {
        Ok(selector) => selector,
        Err(err) => bail!("{err}"),
    };

    let outcome = {
        let _guard = TerminalGuard::acquire()?;
        selector.run(&mut io::stdin().lock(), &mut io::stdout().lock())?
        // Guard drops here: the terminal is restored before any handoff.
    };

    match outcome {
        Outcome::Cancelled => Ok(()),
        Outcome::Selected(Choice::Session(session)) => tmux::attach(&session.name),
        Outcome::Selected(Choice::Directory(dir)) => {
            let name = registry.resolve(&dir.path);
            tmux::create(&name, &dir.path)
        }
    }
}

/// Create (and attach to) a session rooted at the given path argument.
fn create_session_from_path(registry: &mut NameRegistry, arg: &str) -> Result<()> {
    let path = resolve_dir_arg(arg)?;
    let name = registry.resolve(&path);
    tmux::create(&name, &path)
}
