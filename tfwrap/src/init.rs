//! Orchestration for `tfwrap init`.
//!
//! Initializes the current module with a backend configuration derived from
//! the repository settings and its path, and keeps `.terraform.lock.hcl` in
//! sync with the configured platforms.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::core::backend::{backend_config_args, lock_platform_args};
use crate::core::command::{ToolCommand, init_command, providers_lock_command};
use crate::core::init_plan::{InitInputs, InitPlan, plan_init};
use crate::io::process::ToolRunner;
use crate::io::settings::{Resolved, resolve};
use crate::io::workdir::{LOCK_FILE, STATIC_MARKER, WorkDir};

#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Refresh the lock file even if it exists.
    pub force: bool,
    /// Delete the lock file first (implies a refresh).
    pub clean: bool,
    /// Print commands instead of running them.
    pub dry: bool,
    /// Passed through to `terraform init` after the backend arguments.
    pub extra: Vec<String>,
}

/// What `tfwrap init` decided and built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitOutcome {
    pub plan: InitPlan,
    /// `None` for static directories.
    pub init: Option<ToolCommand>,
    /// `None` unless the lock file was refreshed.
    pub providers_lock: Option<ToolCommand>,
}

/// Run `tfwrap init` in `workdir`.
pub fn run_init<R: ToolRunner, W: Write>(
    workdir: &Path,
    options: &InitOptions,
    runner: &R,
    out: &mut W,
) -> Result<InitOutcome> {
    WorkDir::new(workdir).ensure_config_files()?;
    let resolved = resolve(workdir)?;
    init_resolved(&resolved, options, runner, out)
}

/// Run `tfwrap init` for an already resolved working directory.
pub fn init_resolved<R: ToolRunner, W: Write>(
    resolved: &Resolved,
    options: &InitOptions,
    runner: &R,
    out: &mut W,
) -> Result<InitOutcome> {
    let settings = &resolved.settings;
    let backend = settings.backend()?;
    let dir = WorkDir::new(&resolved.workdir);
    let windows = &settings.output.suppress;

    let inputs = InitInputs {
        force: options.force,
        clean: options.clean,
        dry: options.dry,
        lock_file_exists: dir.lock_file_exists(),
        is_static: dir.is_static(),
    };
    let plan = plan_init(inputs);
    debug!(?inputs, ?plan, path_id = %resolved.path_id, "init plan");

    if plan.remove_lock_file && dir.remove_lock_file()? {
        writeln!(out, "{LOCK_FILE} removed").context("write notice")?;
    }
    if plan.refresh_lock {
        writeln!(out, "{LOCK_FILE} will be updated").context("write notice")?;
    }

    let init = if plan.run_init {
        let args = backend_config_args(
            &resolved.path_id,
            backend,
            &options.extra,
            inputs.is_static,
        );
        let cmd = init_command(&settings.tool.binary, args, plan.refresh_lock);
        if options.dry {
            writeln!(out, "Dry run, skipping: {}", cmd.display()).context("write notice")?;
        } else {
            runner.run(&cmd, &resolved.workdir, windows)?;
        }
        Some(cmd)
    } else {
        writeln!(
            out,
            "{STATIC_MARKER} found in {}, skipping terraform init",
            resolved.workdir.display()
        )
        .context("write notice")?;
        None
    };

    let providers_lock = if plan.run_providers_lock {
        let cmd = providers_lock_command(
            &settings.tool.binary,
            lock_platform_args(&settings.init.arch),
        );
        runner.run(&cmd, &resolved.workdir, windows)?;
        Some(cmd)
    } else {
        if plan.refresh_lock {
            writeln!(out, "Dry run, skipping provider lock refresh").context("write notice")?;
        }
        None
    };

    info!(path_id = %resolved.path_id, dry = options.dry, "init finished");
    Ok(InitOutcome {
        plan,
        init,
        providers_lock,
    })
}
