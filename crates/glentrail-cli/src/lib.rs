#![forbid(unsafe_code)]

//! Operations binary for the glentrail catalog. Every subcommand speaks the
//! same contract: payloads on stdout (plain `--json` switches them to machine
//! JSON), logs on stderr, and a stable exit code per failure class.

mod actions;

use clap::{error::ErrorKind, ArgAction, Parser, Subcommand};
use glentrail_core::{env_bool, ExitCode};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode as ProcessExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const CRATE_NAME: &str = "glentrail-cli";

#[derive(Parser)]
#[command(name = "glentrail")]
#[command(about = "Glentrail catalog operations CLI")]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[arg(long, global = true, default_value_t = false)]
    quiet: bool,
    #[arg(long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    Serve {
        #[arg(long)]
        addr: Option<String>,
        #[arg(long)]
        db: Option<PathBuf>,
    },
    Ingest {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        db: PathBuf,
    },
    InspectDb {
        #[arg(long)]
        db: PathBuf,
    },
    Reconcile {
        #[arg(long)]
        db: PathBuf,
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
}

#[derive(Clone, Copy)]
pub(crate) struct OutputMode {
    pub(crate) json: bool,
}

#[derive(Clone, Copy)]
struct LogFlags {
    quiet: bool,
    verbose: u8,
}

pub fn main_entry() -> ProcessExitCode {
    let wants_json = std::env::args().any(|arg| arg == "--json");
    match run() {
        Ok(()) => ProcessExitCode::from(ExitCode::Success as u8),
        Err(err) => {
            emit_error(&err, wants_json);
            ProcessExitCode::from(err.exit_code as u8)
        }
    }
}

fn run() -> Result<(), CliError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{err}");
                return Ok(());
            }
            _ => {
                return Err(CliError::usage("invalid command line arguments")
                    .with_detail("error", err.to_string()));
            }
        },
    };

    let output_mode = OutputMode { json: cli.json };
    let command = cli
        .command
        .ok_or_else(|| CliError::usage("missing command; see --help"))?;
    init_tracing(LogFlags {
        quiet: cli.quiet,
        verbose: cli.verbose,
    });

    match command {
        Commands::Serve { addr, db } => actions::run_serve(addr, db),
        Commands::Ingest { input, db } => actions::run_ingest(&input, &db, output_mode),
        Commands::InspectDb { db } => actions::run_inspect_db(&db, output_mode),
        Commands::Reconcile { db, dry_run } => actions::run_reconcile(&db, dry_run, output_mode),
    }
}

/// `--quiet` and `--verbose` set the fallback level; an explicit
/// `GLENTRAIL_LOG` filter always wins. Logs go to stderr so they never mix
/// with command payloads.
fn init_tracing(flags: LogFlags) {
    let fallback = if flags.quiet {
        "error"
    } else {
        match flags.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter =
        EnvFilter::try_from_env("GLENTRAIL_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));
    let registry = tracing_subscriber::registry().with(filter);
    if env_bool("GLENTRAIL_LOG_JSON", false) {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[derive(Debug, Serialize)]
struct MachineError {
    code: &'static str,
    message: String,
    details: BTreeMap<&'static str, String>,
}

#[derive(Debug)]
pub(crate) struct CliError {
    exit_code: ExitCode,
    machine: MachineError,
}

impl CliError {
    fn new(exit_code: ExitCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            machine: MachineError {
                code,
                message: message.into(),
                details: BTreeMap::new(),
            },
        }
    }

    fn usage(message: impl Into<String>) -> Self {
        Self::new(ExitCode::Usage, "usage_error", message)
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::new(ExitCode::Validation, "validation_error", message)
    }

    pub(crate) fn storage(message: impl Into<String>) -> Self {
        Self::new(ExitCode::Storage, "storage_error", message)
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self::new(ExitCode::Internal, "internal_error", message)
    }

    fn with_detail(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.machine.details.insert(key, value.into());
        self
    }
}

fn emit_error(error: &CliError, machine_json: bool) {
    if machine_json {
        match serde_json::to_string(&error.machine) {
            Ok(payload) => eprintln!("{payload}"),
            Err(_) => eprintln!(
                "{{\"code\":\"internal_error\",\"message\":\"failed to encode structured error\",\"details\":{{}}}}"
            ),
        }
    } else {
        eprintln!("{}", error.machine.message);
    }
}
