//! Running terraform: plain (inherited stdio) or with filtered combined output.

use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use anyhow::{Context, Result};
use tracing::{debug, error, info, instrument, warn};

use crate::core::command::ToolCommand;
use crate::core::filter::{FilterState, FilterWindow, StreamFilter, Verdict};
use crate::error::TfwrapError;

/// Counters from one filtered run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSummary {
    pub forwarded: usize,
    /// Every suppressed line, begin and end markers included.
    pub dropped: usize,
    pub blocks_excluded: usize,
    /// Output ended inside a suppressed block.
    pub unterminated: bool,
}

/// Abstraction over how tool commands are executed.
///
/// Production code uses [`SystemRunner`]; tests record commands instead of
/// spawning terraform.
pub trait ToolRunner {
    /// Run `command` in `workdir`; a non-zero exit is an error.
    fn run(&self, command: &ToolCommand, workdir: &Path, windows: &[FilterWindow]) -> Result<()>;
}

/// Runner that spawns real processes, writing filtered output to stdout.
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    #[instrument(skip_all, fields(program = %command.program, filtered = command.filtered))]
    fn run(&self, command: &ToolCommand, workdir: &Path, windows: &[FilterWindow]) -> Result<()> {
        info!(cmd = %command.display(), workdir = %workdir.display(), "running");
        let status = if command.filtered {
            let stdout = std::io::stdout();
            let mut sink = stdout.lock();
            let (status, summary) = run_filtered(command, workdir, windows, &mut sink)?;
            if summary.unterminated {
                warn!("output ended inside a suppressed block; trailing lines were dropped");
            }
            status
        } else {
            run_inherited(command, workdir)?
        };
        check_status(command, status)
    }
}

fn build(command: &ToolCommand, workdir: &Path) -> Command {
    let mut cmd = Command::new(&command.program);
    cmd.args(&command.args).current_dir(workdir);
    for (key, value) in &command.env {
        cmd.env(key, value);
    }
    cmd
}

/// Map a non-zero exit to [`TfwrapError::Subprocess`].
pub fn check_status(command: &ToolCommand, status: ExitStatus) -> Result<()> {
    if status.success() {
        return Ok(());
    }
    warn!(exit_code = ?status.code(), cmd = %command.display(), "command failed");
    Err(TfwrapError::Subprocess {
        command: command.display(),
        code: status.code(),
    }
    .into())
}

/// Run with stdin/stdout/stderr inherited from the wrapper.
pub fn run_inherited(command: &ToolCommand, workdir: &Path) -> Result<ExitStatus> {
    debug!("spawning child process");
    build(command, workdir)
        .status()
        .with_context(|| format!("run {}", command.display()))
}

/// Run with stdout and stderr merged into one pipe, forwarding filtered lines
/// to `sink` as they arrive.
///
/// The read end is always closed and the child always waited on before this
/// returns, including when writing to `sink` fails.
pub fn run_filtered<W: Write>(
    command: &ToolCommand,
    workdir: &Path,
    windows: &[FilterWindow],
    sink: &mut W,
) -> Result<(ExitStatus, FilterSummary)> {
    let (reader, writer) = std::io::pipe().context("create output pipe")?;
    let mut cmd = build(command, workdir);
    cmd.stdin(Stdio::inherit())
        .stdout(writer.try_clone().context("clone output pipe")?)
        .stderr(writer);

    debug!("spawning child process");
    let mut child = match cmd.spawn() {
        Ok(c) => c,
        Err(e) => {
            error!(err = %e, "failed to spawn command");
            return Err(e).with_context(|| format!("spawn {}", command.display()));
        }
    };
    // `cmd` still owns the parent's copies of the write end; without dropping
    // them the reader never sees end of output.
    drop(cmd);

    let filtered = filter_stream(BufReader::new(reader), windows, sink);
    let status = child.wait().context("wait for command")?;
    debug!(exit_code = ?status.code(), "command finished");
    Ok((status, filtered?))
}

/// Drive a [`StreamFilter`] over `reader` line by line.
pub fn filter_stream<R: BufRead, W: Write>(
    mut reader: R,
    windows: &[FilterWindow],
    sink: &mut W,
) -> Result<FilterSummary> {
    let mut filter = StreamFilter::new(windows);
    let mut summary = FilterSummary::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .context("read output line")?;
        if n == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let out = match filter.feed(&line) {
            Verdict::Forward(l) => {
                summary.forwarded += 1;
                l.to_string()
            }
            Verdict::Notice(notice) => {
                summary.dropped += 1;
                summary.blocks_excluded += 1;
                debug!(notice = %notice, "suppressed block closed");
                notice
            }
            Verdict::Drop => {
                summary.dropped += 1;
                continue;
            }
        };
        writeln!(sink, "{out}").context("write output line")?;
        sink.flush().context("flush output")?;
    }

    summary.unterminated = matches!(filter.state(), FilterState::Suppressing(_));
    Ok(summary)
}
