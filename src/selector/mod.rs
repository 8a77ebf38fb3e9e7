//! Interactive session/project selection.
//!
//! A raw-mode, single-keystroke menu over running sessions and discovered
//! project directories. Typing filters the listing, digits jump straight to
//! a numbered row, and directories with subdirectories can be drilled into.
//! The loop is synchronous and blocking-read driven: one input chunk, one
//! state transition, one repaint.

pub mod filter;
pub mod input;
pub mod render;

use std::fmt;
use std::io::{self, Read, Write};

use crate::discovery::{self, Directory};
use crate::tmux::Session;

use filter::Labeled;
use input::Key;

impl Labeled for Session {
    fn label(&self) -> &str {
        &self.name
    }
}

impl Labeled for Directory {
    fn label(&self) -> &str {
        &self.name
    }
}

/// The user's final selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// Attach to this running session.
    Session(Session),
    /// Create (or re-attach to) a session rooted at this directory.
    Directory(Directory),
}

/// How a selection run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Selected(Choice),
    Cancelled,
}

/// Fatal selector failures.
#[derive(Debug)]
pub enum SelectorError {
    /// Nothing to select: no sessions and no discovered projects.
    NoCandidates,
    /// The input stream closed or became unreadable.
    Input(io::Error),
    /// The output stream rejected a frame.
    Render(io::Error),
    /// A drill-down or pop could not list its directory.
    Listing(io::Error),
}

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorError::NoCandidates => write!(f, "no sessions or projects available"),
            SelectorError::Input(err) => write!(f, "failed to read input: {err}"),
            SelectorError::Render(err) => write!(f, "failed to draw selector: {err}"),
            SelectorError::Listing(err) => write!(f, "failed to read subdirectories: {err}"),
        }
    }
}

impl std::error::Error for SelectorError {}

/// Source of drill-down directory listings.
///
/// The selector owns navigation state; where subdirectories actually come
/// from sits behind this seam so the state machine can be driven in tests.
pub trait DirSource {
    fn subdirectories(&self, dir: &Directory) -> io::Result<Vec<Directory>>;
}

/// Filesystem-backed source used by the CLI.
pub struct FsDirSource;

impl DirSource for FsDirSource {
    fn subdirectories(&self, dir: &Directory) -> io::Result<Vec<Directory>> {
        discovery::subdirectories(dir)
    }
}

/// A visible row, pointing back at the underlying entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemRef {
    /// Index into the session list.
    Session(usize),
    /// Index into the current directory listing.
    Directory(usize),
}

/// The navigation state machine.
///
/// Sessions are selectable only at the top level: once drilled into a
/// directory, the candidate list holds that directory's subdirectories and
/// nothing else until the stack pops back to depth zero.
pub struct Selector<S: DirSource> {
    source: S,
    sessions: Vec<Session>,
    top_dirs: Vec<Directory>,
    /// Listing at the current drill depth (equals `top_dirs` at depth 0).
    current_dirs: Vec<Directory>,
    /// Drill-down path, innermost last.
    nav_stack: Vec<Directory>,
    query: String,
    cursor: usize,
    visible: Vec<ItemRef>,
    /// Directory awaiting a drill/create decision, when the modal is open.
    pending_drill: Option<Directory>,
}

impl<S: DirSource> Selector<S> {
    /// Build a selector over the sessions and top-level directories.
    ///
    /// Fails fast with [`SelectorError::NoCandidates`] when both lists are
    /// empty, before the caller touches the terminal.
    pub fn new(
        sessions: Vec<Session>,
        dirs: Vec<Directory>,
        source: S,
    ) -> Result<Self, SelectorError> {
        if sessions.is_empty() && dirs.is_empty() {
            return Err(SelectorError::NoCandidates);
        }

        let mut selector = Self {
            source,
            sessions,
            current_dirs: dirs.clone(),
            top_dirs: dirs,
            nav_stack: Vec::new(),
            query: String::new(),
            cursor: 0,
            visible: Vec::new(),
            pending_drill: None,
        };
        selector.refilter();
        Ok(selector)
    }

    /// Run the selection loop until the user picks, cancels, or input dies.
    pub fn run(
        &mut self,
        input: &mut impl Read,
        output: &mut impl Write,
    ) -> Result<Outcome, SelectorError> {
        loop {
            self.draw(output).map_err(SelectorError::Render)?;

            let Some(key) = input::read_key(input).map_err(SelectorError::Input)? else {
                continue;
            };

            if let Some(outcome) = self.step(key)? {
                return Ok(outcome);
            }
        }
    }

    /// Apply one input event. `None` means the loop continues.
    fn step(&mut self, key: Key) -> Result<Option<Outcome>, SelectorError> {
        if let Some(dir) = self.pending_drill.take() {
            return self.step_drill_prompt(dir, key);
        }

        match key {
            Key::Cancel => Ok(Some(Outcome::Cancelled)),
            Key::Confirm => match self.visible.get(self.cursor).copied() {
                Some(item) => self.select(item),
                // Nothing under the cursor; the menu simply redraws.
                None => Ok(None),
            },
            Key::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                Ok(None)
            }
            Key::Down => {
                if self.cursor + 1 < self.visible.len() {
                    self.cursor += 1;
                }
                Ok(None)
            }
            Key::Backspace => {
                self.query.pop();
                self.cursor = 0;
                self.refilter();
                Ok(None)
            }
            Key::Char(byte) => self.step_char(byte as char),
        }
    }

    /// Handle a printable keystroke: cancel shortcut, `..`, index jump, or
    /// filter text.
    fn step_char(&mut self, c: char) -> Result<Option<Outcome>, SelectorError> {
        if c == 'q' && self.query.is_empty() {
            return Ok(Some(Outcome::Cancelled));
        }

        let candidate = format!("{}{}", self.query, c);

        if candidate == ".." {
            self.pop_level()?;
            return Ok(None);
        }

        // An all-digit query is an index into the listing as currently
        // shown, taking effect immediately without Enter. A directory whose
        // name is literally numeric loses to the jump; the cursor keys still
        // reach it.
        if candidate.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = candidate.parse::<usize>() {
                if n >= 1 && n <= self.visible.len() {
                    let item = self.visible[n - 1];
                    self.query.clear();
                    self.cursor = 0;
                    self.refilter();
                    return self.select(item);
                }
            }
        }

        self.query.push(c);
        self.cursor = 0;
        self.refilter();
        Ok(None)
    }

    /// Handle the drill/create prompt. The modal has already been taken
    /// down; unhandled keys leave it dismissed.
    fn step_drill_prompt(
        &mut self,
        dir: Directory,
        key: Key,
    ) -> Result<Option<Outcome>, SelectorError> {
        match key {
            Key::Char(b'd') => {
                self.drill_into(dir)?;
                Ok(None)
            }
            Key::Char(b'c') => Ok(Some(Outcome::Selected(Choice::Directory(dir)))),
            Key::Cancel => Ok(Some(Outcome::Cancelled)),
            _ => Ok(None),
        }
    }

    /// Resolve a confirmed row into an outcome or the drill prompt.
    fn select(&mut self, item: ItemRef) -> Result<Option<Outcome>, SelectorError> {
        match item {
            ItemRef::Session(i) => Ok(Some(Outcome::Selected(Choice::Session(
                self.sessions[i].clone(),
            )))),
            ItemRef::Directory(i) => {
                let dir = self.current_dirs[i].clone();
                if dir.has_subdirs {
                    self.pending_drill = Some(dir);
                    Ok(None)
                } else {
                    Ok(Some(Outcome::Selected(Choice::Directory(dir))))
                }
            }
        }
    }

    /// Push a directory onto the navigation stack and show its children.
    fn drill_into(&mut self, dir: Directory) -> Result<(), SelectorError> {
        let subdirs = self
            .source
            .subdirectories(&dir)
            .map_err(SelectorError::Listing)?;

        self.nav_stack.push(dir);
        self.current_dirs = subdirs;
        self.query.clear();
        self.cursor = 0;
        self.refilter();
        Ok(())
    }

    /// Pop one drill level. At the top level this only clears the query.
    fn pop_level(&mut self) -> Result<(), SelectorError> {
        if self.nav_stack.pop().is_some() {
            self.current_dirs = match self.nav_stack.last() {
                Some(parent) => self
                    .source
                    .subdirectories(parent)
                    .map_err(SelectorError::Listing)?,
                None => self.top_dirs.clone(),
            };
        }

        self.query.clear();
        self.cursor = 0;
        self.refilter();
        Ok(())
    }

    /// Rebuild the visible rows from the query. Sessions appear only at
    /// depth zero, ahead of directories.
    fn refilter(&mut self) {
        self.visible.clear();

        if self.nav_stack.is_empty() {
            self.visible.extend(
                filter::filter(&self.sessions, &self.query)
                    .into_iter()
                    .map(ItemRef::Session),
            );
        }
        self.visible.extend(
            filter::filter(&self.current_dirs, &self.query)
                .into_iter()
                .map(ItemRef::Directory),
        );

        if self.cursor >= self.visible.len() {
            self.cursor = 0;
        }
    }

    /// Paint the current state.
    fn draw(&self, out: &mut impl Write) -> io::Result<()> {
        if let Some(dir) = &self.pending_drill {
            return render::draw_drill_prompt(out, &dir.name);
        }

        let rows = self
            .visible
            .iter()
            .map(|item| match *item {
                ItemRef::Session(i) => render::Row {
                    label: &self.sessions[i].name,
                    is_session: true,
                    has_subdirs: false,
                },
                ItemRef::Directory(i) => {
                    let dir = &self.current_dirs[i];
                    render::Row {
                        label: &dir.name,
                        is_session: false,
                        has_subdirs: dir.has_subdirs,
                    }
                }
            })
            .collect();

        let frame = render::Frame {
            location: self.nav_stack.last().map(|dir| dir.name.as_str()),
            rows,
            cursor: self.cursor,
            query: &self.query,
        };
        render::draw(out, &frame)
    }
}
