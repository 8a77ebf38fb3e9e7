//! tmux process control: attaching, creating, and handing off the terminal.
//!
//! All invocations pass `-f /dev/null` so muxpick-managed sessions behave
//! the same regardless of the user's tmux config; the styling muxpick wants
//! is injected per session instead.

use std::env;
use std::ffi::CString;
use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context, Result};

/// Attach to (or, from inside tmux, switch to) an existing session.
///
/// On success the current process is replaced by tmux and this function
/// never returns.
pub fn attach(session_name: &str) -> Result<()> {
    configure_session(session_name);

    if inside_tmux() {
        exec_tmux(&["switch-client", "-t", session_name])
    } else {
        exec_tmux(&["attach-session", "-t", session_name])
    }
}

/// Create a session rooted at a directory, then attach to it.
///
/// The session is created detached first so it can be configured before the
/// terminal handoff. On success the current process is replaced by tmux.
pub fn create(session_name: &str, working_dir: &Path) -> Result<()> {
    run_tmux(&[
        "new-session",
        "-d",
        "-s",
        session_name,
        "-c",
        &working_dir.to_string_lossy(),
    ])
    .with_context(|| format!("failed to create session '{session_name}'"))?;

    configure_session(session_name);

    if inside_tmux() {
        exec_tmux(&["switch-client", "-t", session_name])
    } else {
        exec_tmux(&["attach-session", "-t", session_name])
    }
}

/// Whether this process is already running inside a tmux client.
fn inside_tmux() -> bool {
    env::var("TMUX").is_ok_and(|v| !v.is_empty())
}

/// Replace the current process with tmux.
///
/// Only returns on failure; on success tmux owns the terminal from here on.
fn exec_tmux(args: &[&str]) -> Result<()> {
    let mut argv = Vec::with_capacity(args.len() + 3);
    for arg in ["tmux", "-f", "/dev/null"].iter().chain(args) {
        argv.push(CString::new(*arg).context("argument contains a NUL byte")?);
    }

    // execvp never returns on success
    #[allow(unreachable_code)]
    match nix::unistd::execvp(&argv[0], &argv) {
        Ok(infallible) => match infallible {},
        Err(err) => bail!("failed to exec tmux: {err}"),
    }
}

/// Run a tmux command and wait for it to finish.
fn run_tmux(args: &[&str]) -> Result<()> {
    let status = Command::new("tmux")
        .args(["-f", "/dev/null"])
        .args(args)
        .status()
        .context("failed to run tmux")?;

    if !status.success() {
        bail!("tmux {} exited with {status}", args.join(" "));
    }
    Ok(())
}

/// Run a tmux command, ignoring failures.
///
/// Used for per-session configuration where failure is non-fatal.
fn run_tmux_silent(args: &[&str]) {
    let _ = Command::new("tmux")
        .args(["-f", "/dev/null"])
        .args(args)
        .output();
}

/// Inject muxpick's ergonomic defaults into a session.
///
/// Applied before every attach so sessions look the same however they were
/// created. All calls are best-effort.
fn configure_session(session_name: &str) {
    let target = format!("-t{session_name}");

    // Vi-style copy mode
    run_tmux_silent(&["set-option", &target, "mode-keys", "vi"]);
    run_tmux_silent(&[
        "bind-key",
        "-T",
        "copy-mode-vi",
        "v",
        "send-keys",
        "-X",
        "begin-selection",
    ]);
    run_tmux_silent(&[
        "bind-key",
        "-T",
        "copy-mode-vi",
        "y",
        "send-keys",
        "-X",
        "copy-selection-and-cancel",
    ]);

    // Status bar: near-black background, sage accent, muted window list
    run_tmux_silent(&["set-option", &target, "status", "on"]);
    run_tmux_silent(&[
        "set-option",
        &target,
        "status-style",
        "bg=colour232,fg=colour240",
    ]);
    run_tmux_silent(&["set-option", &target, "status-left-length", "40"]);
    run_tmux_silent(&["set-option", &target, "status-right-length", "40"]);
    run_tmux_silent(&["set-option", &target, "status-left", "#[fg=colour108][#S] "]);
    run_tmux_silent(&[
        "set-option",
        &target,
        "status-right",
        "#[fg=colour108]#(git -C #{pane_current_path} rev-parse --abbrev-ref HEAD 2>/dev/null) ",
    ]);
    run_tmux_silent(&["set-option", &target, "status-interval", "5"]);
    run_tmux_silent(&["set-option", &target, "window-status-separator", "  "]);
    run_tmux_silent(&[
        "set-window-option",
        &target,
        "window-status-format",
        "#[fg=colour240] #I:#W ",
    ]);
    run_tmux_silent(&[
        "set-window-option",
        &target,
        "window-status-current-format",
        "#[fg=white,bold] #I:#W ",
    ]);
}
