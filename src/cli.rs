//! CLI interface for jobcard.
//!
//! Stands in for the job card form: every subcommand is non-interactive,
//! arguments in, structured output out. Data goes to stdout, progress and
//! confirmations to stderr.
//!
//! - `jobcard draft …` — create, edit, resume, and discard local drafts.
//! - `jobcard equipment …` — browse the equipment catalog.
//! - `jobcard reference` — vessels, technologies, technicians, statuses.
//! - `jobcard whoami` — the acting role and what it may do.

mod draft;
mod equipment;
mod format;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::model::{Capability, Role, capabilities};
use crate::storage::Storage;

use draft::DraftCommand;
use equipment::EquipmentCommand;

/// Application context, created once in `main` and handed to every command.
pub struct App {
    pub config: Config,
    pub storage: Storage,
    pub catalog: Catalog,
}

/// jobcard — vessel maintenance job cards.
#[derive(Debug, Parser)]
#[command(name = "jobcard", after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    /// Act as this role instead of the configured one.
    #[arg(long, global = true, value_enum)]
    role: Option<RoleArg>,

    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r#"Workflow: logging an inspection
  1. jobcard draft new --vessel saxi --technology vibration --technician peet
     → prints a job number (e.g. JC-2601-007)
  2. jobcard equipment list --vessel saxi --technology vibration --search pump
  3. jobcard draft select JC-2601-007 SAX-VIB-001 --condition attention --notes "DE bearing noise"
  4. jobcard draft set JC-2601-007 --findings "Bearing wear on P-101A"
  5. jobcard draft list

Environment:
  JOBCARD_HOME  base directory for config.toml and drafts (default ~/.jobcard)
  JOBCARD_LOG   log filter, e.g. `debug` (default `warn`)"#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage local drafts: create, edit, list, delete.
    Draft {
        #[command(subcommand)]
        command: DraftCommand,
    },

    /// Browse the equipment catalog for a vessel and technology.
    Equipment {
        #[command(subcommand)]
        command: EquipmentCommand,
    },

    /// List the vessels, technologies, technicians, and job statuses.
    Reference,

    /// Show the acting role and its capabilities.
    Whoami,
}

impl Command {
    /// The capability a command needs, if any.
    fn required_capability(&self) -> Option<Capability> {
        match self {
            Self::Draft { command } => command.required_capability(),
            Self::Equipment { command } => command.required_capability(),
            Self::Reference | Self::Whoami => None,
        }
    }
}

/// CLI-facing role, mapped to the domain `Role`.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum RoleArg {
    Technician,
    Manager,
    #[value(name = "super_admin")]
    SuperAdmin,
}

impl RoleArg {
    fn to_domain(self) -> Role {
        match self {
            Self::Technician => Role::Technician,
            Self::Manager => Role::Manager,
            Self::SuperAdmin => Role::SuperAdmin,
        }
    }
}

/// Run the CLI, returning an error message on failure.
pub fn run(app: &App) -> Result<(), String> {
    let cli = Cli::parse();
    let role = cli.role.map_or(app.config.role, RoleArg::to_domain);

    authorize(role, &cli.command)?;

    match cli.command {
        Command::Draft { command } => draft::run(app, command),
        Command::Equipment { command } => equipment::run(app, command),
        Command::Reference => {
            for line in format::reference_lines() {
                println!("{line}");
            }
            Ok(())
        }
        Command::Whoami => cmd_whoami(role),
    }
}

/// Checks a command against the role's capabilities.
fn authorize(role: Role, command: &Command) -> Result<(), String> {
    let Some(needed) = command.required_capability() else {
        return Ok(());
    };
    if capabilities(role).contains(&needed) {
        debug!(%role, capability = %needed, "authorized");
        Ok(())
    } else {
        warn!(%role, capability = %needed, "denied");
        Err(format!("role '{role}' may not {needed}"))
    }
}

fn cmd_whoami(role: Role) -> Result<(), String> {
    println!("{role}");
    for cap in capabilities(role) {
        println!("  {cap}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("jobcard").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn parses_global_role_after_subcommand() {
        let cli = parse(&[
            "equipment",
            "areas",
            "--vessel",
            "saxi",
            "--technology",
            "vibration",
            "--role",
            "manager",
        ]);
        assert!(matches!(cli.role, Some(RoleArg::Manager)));
    }

    #[test]
    fn role_values_match_config_names() {
        let cli = parse(&["--role", "super_admin", "whoami"]);
        assert_eq!(cli.role.map(RoleArg::to_domain), Some(Role::SuperAdmin));
        assert_eq!(Role::SuperAdmin.to_string(), "super_admin");

        assert!(Cli::try_parse_from(["jobcard", "--role", "super-admin", "whoami"]).is_err());
    }

    #[test]
    fn status_values_match_reference_ids() {
        let cli = parse(&["draft", "set", "JC-2601-007", "--status", "in_progress"]);
        assert!(matches!(
            cli.command,
            Command::Draft {
                command: DraftCommand::Set { status: Some(s), .. }
            } if s.to_domain().id() == "in_progress"
        ));
    }

    #[test]
    fn technician_may_not_suggest_equipment_ids() {
        let cli = parse(&[
            "equipment",
            "next-id",
            "--vessel",
            "saxi",
            "--technology",
            "vibration",
        ]);
        let err = authorize(Role::Technician, &cli.command).unwrap_err();
        assert_eq!(err, "role 'technician' may not manage equipment");

        authorize(Role::Manager, &cli.command).unwrap();
    }

    #[test]
    fn every_role_may_create_drafts() {
        let cli = parse(&["draft", "new", "--vessel", "saxi", "--technology", "vibration"]);
        for role in [Role::Technician, Role::Manager, Role::SuperAdmin] {
            authorize(role, &cli.command).unwrap();
        }
    }

    #[test]
    fn read_only_commands_need_nothing() {
        for args in [
            &["whoami"][..],
            &["reference"],
            &["draft", "list"],
            &["equipment", "list", "--vessel", "saxi", "--technology", "oil"],
        ] {
            let cli = parse(args);
            assert_eq!(cli.command.required_capability(), None, "{args:?}");
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
