//! Hand the rendered message to the system clipboard.
//!
//! There is no portable clipboard API from a terminal, so this pipes the text
//! into the first clipboard tool found on `PATH`. `PARAYAN_CLIPBOARD` names an
//! explicit command (program plus whitespace-separated args) instead.
//!
//! # Tool priority
//! 1. `pbcopy` (macOS)
//! 2. `wl-copy` (Wayland)
//! 3. `xclip -selection clipboard`, then `xsel --clipboard --input` (X11)
//! 4. `clip.exe` (Windows / WSL)

use anyhow::{bail, Context};
use std::io::Write;
use std::process::{Command, Stdio};

pub const CLIPBOARD_ENV: &str = "PARAYAN_CLIPBOARD";

const CANDIDATES: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("clip.exe", &[]),
];

/// Program and arguments used to reach the clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardTool {
    pub program: String,
    pub args: Vec<String>,
}

impl ClipboardTool {
    fn parse(spec: &str) -> Option<Self> {
        let mut parts = spec.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }
}

/// The explicit override if set, otherwise the first candidate on `PATH`.
pub fn detect() -> Option<ClipboardTool> {
    if let Ok(spec) = std::env::var(CLIPBOARD_ENV) {
        return ClipboardTool::parse(&spec);
    }
    CANDIDATES
        .iter()
        .find(|(program, _)| which::which(program).is_ok())
        .map(|(program, args)| ClipboardTool {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        })
}

/// Copy `text` and return the program that received it.
pub fn copy(text: &str) -> anyhow::Result<String> {
    let tool = detect().context(
        "no clipboard tool found (install wl-copy, xclip or xsel, or set PARAYAN_CLIPBOARD)",
    )?;
    tracing::debug!(program = %tool.program, "copying message to clipboard");

    let mut child = Command::new(&tool.program)
        .args(&tool.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .spawn()
        .with_context(|| format!("failed to start clipboard tool '{}'", tool.program))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .with_context(|| format!("failed to write to '{}'", tool.program))?;
    }

    let status = child
        .wait()
        .with_context(|| format!("clipboard tool '{}' did not finish", tool.program))?;
    if !status.success() {
        bail!("clipboard tool '{}' exited with {status}", tool.program);
    }
    Ok(tool.program)
}
