//! Orchestration for `tfwrap lock`: refresh `.terraform.lock.hcl` for every
//! configured platform.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use crate::core::backend::lock_platform_args;
use crate::core::command::{ToolCommand, providers_lock_command};
use crate::io::process::ToolRunner;
use crate::io::settings::resolve;
use crate::io::workdir::WorkDir;

/// Run (or with `dry`, print) `terraform providers lock` in `workdir`.
pub fn run_lock<R: ToolRunner, W: Write>(
    workdir: &Path,
    dry: bool,
    runner: &R,
    out: &mut W,
) -> Result<ToolCommand> {
    WorkDir::new(workdir).ensure_config_files()?;
    let resolved = resolve(workdir)?;
    let settings = &resolved.settings;
    if settings.init.arch.is_empty() {
        warn!("init.arch is empty; terraform will lock for the current platform only");
    }

    let cmd = providers_lock_command(
        &settings.tool.binary,
        lock_platform_args(&settings.init.arch),
    );
    if dry {
        writeln!(out, "Dry run, skipping: {}", cmd.display()).context("write notice")?;
    } else {
        runner.run(&cmd, &resolved.workdir, &settings.output.suppress)?;
    }
    Ok(cmd)
}
