//! Structured terraform invocations.
//!
//! A [`ToolCommand`] is plain data: program, argument vector and environment
//! overrides. Nothing is ever joined into a shell string for execution;
//! [`ToolCommand::display`] exists only for notices and logs.

use std::fmt;

/// Environment variable cleared while refreshing the provider lock file, so
/// checksums come from the registry rather than a local plugin cache.
pub const PLUGIN_CACHE_ENV: &str = "TF_PLUGIN_CACHE_DIR";

/// Terraform subcommands whose output goes through the stream filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunVerb {
    Plan,
    Apply,
}

impl RunVerb {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plan => "plan",
            Self::Apply => "apply",
        }
    }
}

impl fmt::Display for RunVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
    /// Variables set on top of the inherited environment.
    pub env: Vec<(String, String)>,
    /// Route combined output through the stream filter.
    pub filtered: bool,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
            filtered: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn filtered(mut self) -> Self {
        self.filtered = true;
        self
    }

    /// Human-readable rendering, e.g. `TF_PLUGIN_CACHE_DIR='' terraform init`.
    pub fn display(&self) -> String {
        let mut parts: Vec<String> = self
            .env
            .iter()
            .map(|(k, v)| format!("{k}={}", quote(v)))
            .collect();
        parts.push(quote(&self.program));
        parts.extend(self.args.iter().map(|a| quote(a)));
        parts.join(" ")
    }
}

fn quote(s: &str) -> String {
    let plain = !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_=./:,@+%".contains(c));
    if plain {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', r"'\''"))
    }
}

/// `terraform init` with backend arguments.
pub fn init_command(binary: &str, backend_args: Vec<String>, refresh_lock: bool) -> ToolCommand {
    let cmd = ToolCommand::new(binary).arg("init").args(backend_args);
    if refresh_lock {
        cmd.env(PLUGIN_CACHE_ENV, "")
    } else {
        cmd
    }
}

/// `terraform providers lock` for every configured platform.
pub fn providers_lock_command(binary: &str, platform_args: Vec<String>) -> ToolCommand {
    ToolCommand::new(binary)
        .arg("providers")
        .arg("lock")
        .args(platform_args)
        .env(PLUGIN_CACHE_ENV, "")
}

/// `terraform plan|apply` with passthrough arguments, output filtered.
pub fn run_command(binary: &str, verb: RunVerb, extra: &[String]) -> ToolCommand {
    ToolCommand::new(binary)
        .arg(verb.as_str())
        .args(extra.iter().cloned())
        .filtered()
}
