//! Orchestration for `tfwrap plan` and `tfwrap apply`.
//!
//! Output is streamed through the configured suppression windows.

use std::path::Path;

use anyhow::Result;
use tracing::debug;

use crate::core::command::{RunVerb, ToolCommand, run_command};
use crate::io::process::ToolRunner;
use crate::io::settings::resolve;
use crate::io::workdir::WorkDir;

pub fn run_verb<R: ToolRunner>(
    workdir: &Path,
    verb: RunVerb,
    extra: &[String],
    runner: &R,
) -> Result<ToolCommand> {
    WorkDir::new(workdir).ensure_config_files()?;
    let resolved = resolve(workdir)?;
    let settings = &resolved.settings;
    let cmd = run_command(&settings.tool.binary, verb, extra);
    debug!(%verb, windows = settings.output.suppress.len(), "running filtered");
    runner.run(&cmd, &resolved.workdir, &settings.output.suppress)?;
    Ok(cmd)
}
