//! System clipboard access through the platform's clipboard helper binaries.

use anyhow::{anyhow, bail, Context, Result};
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

type Helper = (&'static str, &'static [&'static str]);

/// Candidate helpers, tried in order. Each reads the clipboard content from stdin.
const HELPERS: &[Helper] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("pbcopy", &[]),
    ("clip.exe", &[]),
];

/// Copy `text` to the system clipboard.
pub fn copy(text: &str) -> Result<()> {
    copy_with(HELPERS, text).map(|_| ())
}

/// Feed `text` to the first helper that runs and succeeds. Returns its name.
///
/// Helpers that are not installed, or that fail (e.g. `wl-copy` outside a
/// Wayland session), are skipped.
fn copy_with(helpers: &[Helper], text: &str) -> Result<&'static str> {
    let mut last_err = None;
    for &(program, args) in helpers {
        match run_helper(program, args, text) {
            Ok(true) => {
                tracing::debug!(helper = program, "copied to clipboard");
                return Ok(program);
            }
            Ok(false) => continue,
            Err(e) => {
                tracing::debug!(helper = program, error = %e, "clipboard helper failed");
                last_err = Some(e);
            }
        }
    }
    match last_err {
        Some(e) => Err(e.context("copy to clipboard")),
        None => bail!("no clipboard helper found (install wl-clipboard, xclip or xsel)"),
    }
}

/// Run one helper. `Ok(false)` means it is not installed.
fn run_helper(program: &str, args: &[&str], text: &str) -> Result<bool> {
    // The helper's output is discarded: xclip and xsel fork a process that keeps
    // serving the selection, and a piped stdout would never reach EOF.
    let mut child = match Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(child) => child,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e).with_context(|| format!("run {}", program)),
    };

    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };
    let status = child
        .wait()
        .with_context(|| format!("wait for {}", program))?;
    written.with_context(|| format!("write to {}", program))?;
    if !status.success() {
        return Err(anyhow!("{} exited with {}", program, status));
    }
    Ok(true)
}
