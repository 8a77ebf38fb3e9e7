//! Listing of running tmux sessions.

use std::process::Command;

use anyhow::{bail, Context, Result};

/// A running tmux session, identified by name.
///
/// Snapshot taken once per invocation; tmux guarantees name uniqueness
/// within one server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub name: String,
}

/// List all sessions on the tmux server.
///
/// A missing server is not an error: tmux exits with status 1 when no
/// server is running, which maps to an empty list.
pub fn list_sessions() -> Result<Vec<Session>> {
    let output = Command::new("tmux")
        .args(["-f", "/dev/null", "list-sessions", "-F", "#{session_name}"])
        .output()
        .context("failed to run tmux")?;

    if !output.status.success() {
        if output.status.code() == Some(1) {
            return Ok(Vec::new());
        }
        bail!(
            "failed to list tmux sessions: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(parse_session_list(&String::from_utf8_lossy(&output.stdout)))
}

/// Parse `list-sessions -F '#{session_name}'` output, one name per line.
fn parse_session_list(output: &str) -> Vec<Session> {
    output
        .lines()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| Session {
            name: name.to_string(),
        })
        .collect()
}
