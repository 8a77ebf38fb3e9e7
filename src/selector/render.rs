//! Frame painting for the selector.
//!
//! Pure presentation: every frame is re-derived from selector state and
//! painted from the top of the alternate screen. The terminal is in raw
//! mode, so every line ends with an explicit `\r\n`.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{Clear, ClearType};

/// One selectable row.
pub struct Row<'a> {
    pub label: &'a str,
    pub is_session: bool,
    pub has_subdirs: bool,
}

/// Everything needed to paint one frame of the listing.
pub struct Frame<'a> {
    /// Name of the directory being browsed, when drilled down.
    pub location: Option<&'a str>,
    /// Visible rows, sessions first at top level.
    pub rows: Vec<Row<'a>>,
    /// Index of the highlighted row.
    pub cursor: usize,
    /// Current filter query, echoed on the prompt line.
    pub query: &'a str,
}

/// Paint the listing frame.
pub fn draw(out: &mut impl Write, frame: &Frame) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    write!(out, "\r\n")?;

    if let Some(location) = frame.location {
        write!(out, "{location}/\r\n\r\n")?;
    }

    let mut prev_was_session = false;
    for (i, row) in frame.rows.iter().enumerate() {
        if row.is_session && i == 0 {
            write!(out, "Sessions:\r\n")?;
        }
        if !row.is_session && frame.location.is_none() && (i == 0 || prev_was_session) {
            if prev_was_session {
                write!(out, "\r\n")?;
            }
            write!(out, "Projects:\r\n")?;
        }
        prev_was_session = row.is_session;

        let marker = if row.has_subdirs { " >" } else { "" };
        let line = format!("  [{}] {}{}", i + 1, row.label, marker);
        if i == frame.cursor {
            queue!(
                out,
                SetAttribute(Attribute::Reverse),
                Print(&line),
                SetAttribute(Attribute::Reset)
            )?;
            write!(out, "\r\n")?;
        } else {
            write!(out, "{line}\r\n")?;
        }
    }

    write!(out, "\r\n")?;
    if frame.location.is_some() {
        write!(out, "  [..] up\r\n\r\n")?;
    }
    write!(out, "> {}", frame.query)?;
    out.flush()
}

/// Paint the drill/create prompt shown after picking a directory that has
/// subdirectories.
pub fn draw_drill_prompt(out: &mut impl Write, dir_name: &str) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    write!(out, "\r\n{dir_name} contains subdirectories:\r\n\r\n")?;
    write!(out, "  [d] drill down\r\n")?;
    write!(out, "  [c] create session here\r\n")?;
    write!(out, "  [q] cancel\r\n\r\n")?;
    write!(out, "> ")?;
    out.flush()
}
