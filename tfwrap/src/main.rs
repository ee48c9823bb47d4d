//! `tfwrap`: run terraform init/lock/plan/apply with repository-wide settings.
//!
//! Reads `tfwrap.toml` at the git repository root. The module's path relative
//! to that root becomes its remote state key.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tfwrap::core::command::RunVerb;
use tfwrap::error::exit_code_for;
use tfwrap::init::{InitOptions, run_init};
use tfwrap::io::process::SystemRunner;
use tfwrap::lock::run_lock;
use tfwrap::logging;
use tfwrap::run::run_verb;

/// Output is forwarded line by line, so a prompt without a trailing newline
/// stays hidden until it is answered.
const APPLY_PROMPT_NOTE: &str = "Terraform's confirmation prompt is shown only after it is answered. \
Type `yes` and press Enter to apply, or pass `-- -auto-approve`.";

#[derive(Parser)]
#[command(
    name = "tfwrap",
    version,
    about = "Terraform wrapper with repository-wide backend and lock file settings"
)]
struct Cli {
    /// More diagnostics on stderr (-v info, -vv debug). `RUST_LOG` overrides.
    ///
    /// Give all `-v` flags on one side of the subcommand; counts do not add up
    /// across it.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Initialize the current module with a path-derived backend key.
    Init {
        /// Refresh `.terraform.lock.hcl` even if it exists.
        #[arg(short, long)]
        force: bool,
        /// Print commands instead of running them.
        #[arg(short, long)]
        dry: bool,
        /// Delete `.terraform.lock.hcl` before initializing.
        #[arg(long)]
        clean: bool,
        /// Extra arguments for `terraform init` (after `--`).
        #[arg(last = true)]
        extra: Vec<String>,
    },
    /// Refresh `.terraform.lock.hcl` for every configured platform.
    Lock {
        /// Print the command instead of running it.
        #[arg(short, long)]
        dry: bool,
    },
    /// Run `terraform plan` with filtered output.
    Plan {
        /// Extra arguments for `terraform plan` (after `--`).
        #[arg(last = true)]
        extra: Vec<String>,
    },
    /// Run `terraform apply` with filtered output.
    #[command(after_help = APPLY_PROMPT_NOTE)]
    Apply {
        /// Extra arguments for `terraform apply` (after `--`).
        #[arg(last = true)]
        extra: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if let Err(err) = run(cli) {
        eprintln!("error: {:#}", err);
        std::process::exit(exit_code_for(&err));
    }
}

fn run(cli: Cli) -> Result<()> {
    let workdir = std::env::current_dir().context("read current directory")?;
    let runner = SystemRunner;
    let mut out = std::io::stdout();

    match cli.command {
        Command::Init {
            force,
            dry,
            clean,
            extra,
        } => {
            let options = InitOptions {
                force,
                clean,
                dry,
                extra,
            };
            run_init(&workdir, &options, &runner, &mut out)?;
        }
        Command::Lock { dry } => {
            run_lock(&workdir, dry, &runner, &mut out)?;
        }
        Command::Plan { extra } => {
            run_verb(&workdir, RunVerb::Plan, &extra, &runner)?;
        }
        Command::Apply { extra } => {
            run_verb(&workdir, RunVerb::Apply, &extra, &runner)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_init_defaults() {
        let cli = Cli::parse_from(["tfwrap", "init"]);
        assert!(matches!(
            cli.command,
            Command::Init {
                force: false,
                dry: false,
                clean: false,
                ref extra,
            } if extra.is_empty()
        ));
    }

    #[test]
    fn parse_init_flags_and_passthrough() {
        let cli = Cli::parse_from(["tfwrap", "init", "-f", "--dry", "--", "-upgrade"]);
        match cli.command {
            Command::Init {
                force,
                dry,
                clean,
                extra,
            } => {
                assert!(force);
                assert!(dry);
                assert!(!clean);
                assert_eq!(extra, vec!["-upgrade"]);
            }
            _ => panic!("expected init"),
        }
    }

    #[test]
    fn parse_plan_passthrough() {
        let cli = Cli::parse_from(["tfwrap", "plan", "--", "-out=plan.bin", "-lock=false"]);
        match cli.command {
            Command::Plan { extra } => assert_eq!(extra, vec!["-out=plan.bin", "-lock=false"]),
            _ => panic!("expected plan"),
        }
    }

    #[test]
    fn parse_lock_dry() {
        let cli = Cli::parse_from(["tfwrap", "lock", "-d"]);
        assert!(matches!(cli.command, Command::Lock { dry: true }));
    }

    #[test]
    fn parse_verbosity_on_either_side_of_subcommand() {
        let cli = Cli::parse_from(["tfwrap", "plan", "-vv"]);
        assert_eq!(cli.verbose, 2);
        let cli = Cli::parse_from(["tfwrap", "-v", "-v", "apply"]);
        assert_eq!(cli.verbose, 2);
        let cli = Cli::parse_from(["tfwrap", "init", "-v"]);
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn apply_help_explains_confirmation_prompt() {
        use clap::CommandFactory;

        let cmd = Cli::command();
        let apply = cmd.find_subcommand("apply").expect("apply subcommand");
        let note = apply.get_after_help().expect("after help").to_string();
        assert!(note.contains("Type `yes`"));
        assert!(note.contains("-auto-approve"));
    }
}
