// crates/compose-guard-cli/src/main.rs
// ============================================================================
// Module: compose-guard CLI Entry Point
// Description: Command dispatcher for compose service presence checks.
// Purpose: Provide a localized CLI around the compose-guard core check.
// Dependencies: clap, compose-guard-core
// ============================================================================

//! ## Overview
//! The compose-guard CLI runs the service presence check against a compose
//! file, lists the expected services, and validates tool settings. All
//! user-facing strings are routed through the i18n catalog.
//!
//! Exit codes: `0` when every expected service is present, `1` when a service
//! is missing, `2` when the check could not run (I/O, parse, settings).

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use compose_guard_cli::i18n::Locale;
use compose_guard_cli::i18n::set_locale;
use compose_guard_cli::t;
use compose_guard_core::CheckAuditEvent;
use compose_guard_core::CheckAuditSink;
use compose_guard_core::CheckError;
use compose_guard_core::EXPECTED_SERVICES;
use compose_guard_core::GuardSettings;
use compose_guard_core::ServiceReport;
use compose_guard_core::check_report;
use compose_guard_core::locate_compose_file;
use compose_guard_core::run_check;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "COMPOSE_GUARD_LANG";
/// Environment variable overriding the compose file path.
const COMPOSE_FILE_ENV: &str = "COMPOSE_GUARD_FILE";
/// Exit code for a missing expected service.
const EXIT_MISSING_SERVICE: u8 = 1;
/// Exit code for checks that could not run.
const EXIT_SETUP: u8 = 2;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "compose-guard", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `COMPOSE_GUARD_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that the compose file defines every expected service.
    Check(CheckCommand),
    /// List the expected services in check order.
    Services,
    /// Settings utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a compose-guard settings file.
    Validate(ConfigValidateCommand),
}

/// Arguments for the presence check.
#[derive(Args, Debug)]
struct CheckCommand {
    /// Compose file to check (overrides `COMPOSE_GUARD_FILE` and settings).
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,
    /// Optional settings file path (defaults to compose-guard.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Report every missing and extra service instead of stopping at the first miss.
    #[arg(long, action = ArgAction::SetTrue)]
    report: bool,
}

/// Arguments for settings validation.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional settings file path (defaults to compose-guard.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Catalan.
    Ca,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Ca => Self::Ca,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper carrying a localized message and exit code.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
    /// Process exit code reported for this error.
    code: u8,
}

impl CliError {
    /// Constructs a setup-level [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
            code: EXIT_SETUP,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string(), err.code),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Check(command) => command_check(&command),
        Commands::Services => command_services(),
        Commands::Config {
            command,
        } => command_config(command),
    }
}

/// Prints top-level help.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Check Command
// ============================================================================

/// Executes the presence check.
fn command_check(command: &CheckCommand) -> CliResult<ExitCode> {
    let settings = GuardSettings::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let env_file = std::env::var(COMPOSE_FILE_ENV).ok();
    let cwd = std::env::current_dir()
        .map_err(|err| CliError::new(t!("check.cwd_failed", error = err)))?;
    let compose =
        resolve_compose_path(command.file.as_deref(), env_file.as_deref(), &settings, &cwd)?;
    let sink = settings
        .audit_sink()
        .map_err(|err| CliError::new(t!("check.audit.init_failed", error = err)))?;
    if command.report {
        check_with_report(&compose, sink.as_ref())
    } else {
        check_fail_fast(&compose, sink.as_ref())
    }
}

/// Runs the fail-fast check and prints its outcome.
fn check_fail_fast(compose: &Path, sink: &dyn CheckAuditSink) -> CliResult<ExitCode> {
    let result = run_check(compose);
    sink.record(&CheckAuditEvent::fail_fast(compose, &result));
    match result {
        Ok(()) => {
            write_stdout_line(&t!(
                "check.ok",
                count = EXPECTED_SERVICES.len(),
                file = compose.display()
            ))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            Ok(ExitCode::SUCCESS)
        }
        Err(CheckError::MissingService {
            service,
            file,
        }) => {
            write_stderr_line(&t!("check.missing", service = service, file = file))
                .map_err(|err| CliError::new(output_error("stderr", &err)))?;
            Ok(ExitCode::from(EXIT_MISSING_SERVICE))
        }
        Err(CheckError::Setup(error)) => {
            Err(CliError::new(t!("check.setup_failed", error = error)))
        }
    }
}

/// Runs the aggregated report and prints every section.
fn check_with_report(compose: &Path, sink: &dyn CheckAuditSink) -> CliResult<ExitCode> {
    let result = check_report(compose);
    sink.record(&CheckAuditEvent::report(compose, &result));
    let report =
        result.map_err(|error| CliError::new(t!("check.setup_failed", error = error)))?;
    for line in render_report(&report) {
        write_stdout_line(&line).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    if report.passed() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_MISSING_SERVICE))
    }
}

/// Renders the report sections as output lines.
fn render_report(report: &ServiceReport) -> Vec<String> {
    vec![
        t!("check.report.header", file = report.file),
        t!(
            "check.report.present",
            count = report.present.len(),
            services = join_or_none(&report.present)
        ),
        t!(
            "check.report.missing",
            count = report.missing.len(),
            services = join_or_none(&report.missing)
        ),
        t!("check.report.extra", count = report.extra.len(), services = join_or_none(&report.extra)),
    ]
}

/// Joins names with commas, or returns the localized "none".
fn join_or_none(names: &[String]) -> String {
    if names.is_empty() { t!("check.report.none") } else { names.join(", ") }
}

/// Resolves the compose file from flags, environment, settings, or the working tree.
fn resolve_compose_path(
    file: Option<&Path>,
    env_file: Option<&str>,
    settings: &GuardSettings,
    cwd: &Path,
) -> CliResult<PathBuf> {
    if let Some(file) = file {
        return Ok(file.to_path_buf());
    }
    if let Some(value) = env_file {
        if value.trim().is_empty() {
            return Err(CliError::new(t!("check.env.empty", env = COMPOSE_FILE_ENV)));
        }
        return Ok(PathBuf::from(value));
    }
    if let Some(file) = settings.compose_file() {
        return Ok(file);
    }
    locate_compose_file(cwd).map_err(|err| CliError::new(t!("check.locate_failed", error = err)))
}

// ============================================================================
// SECTION: Services Command
// ============================================================================

/// Prints the expected services, one per line.
fn command_services() -> CliResult<ExitCode> {
    for name in EXPECTED_SERVICES {
        write_stdout_line(name).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command),
    }
}

/// Executes the settings validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let _settings = GuardSettings::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    write_stdout_line(&t!("config.validate.ok"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Locale Helpers
// ============================================================================

/// Resolves the CLI locale from the flag or environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns the given exit code.
fn emit_error(message: &str, code: u8) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::from(code)
}
