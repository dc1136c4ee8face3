//! run-digest - schema and output digests for streamed agent runs
//!
//! Reads a run's event envelopes as JSON lines, prints the inferred schema
//! summary on stdout, and persists the schema and reconstructed run output.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use rd_config::resolve::ResolvedConfig;
use rd_config::{DigestConfig, CONFIG_SCHEMA_VERSION};
use rd_core::exit_codes::ExitCode;
use rd_core::logging::{init_logging, LogConfig, LogFormat, LogLevel};
use rd_core::paths::{OutputPaths, PathOverrides};
use rd_core::{persist, EnvelopeReader, RunDigest};
use tracing::{error, info, warn};

/// Digest a streamed agent run into a schema summary and its final output
#[derive(Parser)]
#[command(name = "run-digest")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Config file (TOML or JSON); falls back to RUN_DIGEST_CONFIG
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    /// Log format on stderr (human, jsonl)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Consume an event stream and produce its digest
    Digest(DigestArgs),
    /// Configuration management
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
struct DigestArgs {
    /// JSON-lines envelope file; stdin when omitted or "-"
    input: Option<PathBuf>,

    /// Name of the root run; events from other runs are not merged
    #[arg(long, env = "RUN_DIGEST_RUN_IDENTIFIER")]
    run_identifier: String,

    /// Schema summary output path (overrides EVENT_SCHEMA_PATH)
    #[arg(long)]
    schema_out: Option<PathBuf>,

    /// Run record output path (overrides EVENT_STREAM_PATH)
    #[arg(long)]
    events_out: Option<PathBuf>,

    /// Aggregate JSONL log path (overrides EVENT_AGGREGATE_PATH)
    #[arg(long)]
    aggregate_out: Option<PathBuf>,

    /// Print the schema summary without writing any files
    #[arg(long)]
    no_persist: bool,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Validate a configuration file
    Validate {
        /// File to validate
        path: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let cli_level = cli.global.log_level.or(if cli.global.quiet {
        Some(LogLevel::Error)
    } else {
        match cli.global.verbose {
            0 => None,
            1 => Some(LogLevel::Debug),
            _ => Some(LogLevel::Trace),
        }
    });
    init_logging(&LogConfig::from_env(cli_level, cli.global.log_format));

    let exit_code = match &cli.command {
        Commands::Digest(args) => run_digest(&cli.global, args),
        Commands::Config(args) => match &args.command {
            ConfigCommands::Show => run_config_show(&cli.global),
            ConfigCommands::Validate { path } => run_config_validate(path),
        },
    };

    std::process::exit(exit_code.as_i32());
}

fn run_digest(global: &GlobalOpts, args: &DigestArgs) -> ExitCode {
    let resolved = match ResolvedConfig::load(global.config.as_deref()) {
        Ok(resolved) => resolved,
        Err(e) => return output_error(ExitCode::from(&e), &e.to_string()),
    };
    info!(source = %resolved.source, "configuration loaded");

    let reader: Box<dyn BufRead> = match args.input.as_deref() {
        None => Box::new(io::stdin().lock()),
        Some(path) if path == Path::new("-") => Box::new(io::stdin().lock()),
        Some(path) => match File::open(path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => {
                return output_error(
                    ExitCode::ArgsError,
                    &format!("cannot open {}: {}", path.display(), e),
                )
            }
        },
    };

    let mut digest = RunDigest::new(args.run_identifier.as_str(), &resolved.config);
    for item in EnvelopeReader::new(reader) {
        match item {
            Ok(envelope) => digest.consume(&envelope),
            Err(e) if e.is_recoverable() => {
                warn!(error = %e, code = e.code(), "skipping malformed envelope");
            }
            Err(e) => {
                error!(error = %e, "event stream failed");
                return report_error(&e);
            }
        }
    }

    let outcome = digest.finish(Utc::now());
    match serde_json::to_string_pretty(&outcome.schema) {
        Ok(body) => println!("{}", body),
        Err(e) => return output_error(ExitCode::InternalError, &e.to_string()),
    }

    if args.no_persist {
        return ExitCode::Clean;
    }

    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(e) => return output_error(ExitCode::IoError, &e.to_string()),
    };
    let overrides = PathOverrides {
        schema: args.schema_out.clone(),
        record: args.events_out.clone(),
        aggregate: args.aggregate_out.clone(),
    };
    let paths = OutputPaths::resolve(
        &overrides,
        &outcome.record.run_identifier,
        &outcome.record.run_slug,
        &cwd,
    );

    let written = persist::write_schema(&paths.schema, &outcome.schema)
        .and_then(|_| persist::write_record(&paths.record, &outcome.record))
        .and_then(|_| persist::append_record(&paths.aggregate, &outcome.record));
    match written {
        Ok(()) => ExitCode::Clean,
        Err(e) => {
            error!(error = %e, "failed to persist digest");
            report_error(&e)
        }
    }
}

fn run_config_show(global: &GlobalOpts) -> ExitCode {
    let resolved = match ResolvedConfig::load(global.config.as_deref()) {
        Ok(resolved) => resolved,
        Err(e) => return output_error(ExitCode::from(&e), &e.to_string()),
    };
    let response = serde_json::json!({
        "source": resolved.source.to_string(),
        "path": resolved.path.as_ref().map(|p| p.display().to_string()),
        "config": resolved.config,
    });
    print_json(&response)
}

fn run_config_validate(path: &Path) -> ExitCode {
    match DigestConfig::load(path) {
        Ok(config) => {
            let response = serde_json::json!({
                "status": "valid",
                "path": path.display().to_string(),
                "schema_version": config.schema_version,
            });
            print_json(&response)
        }
        Err(e) => output_error(ExitCode::from(&e), &e.to_string()),
    }
}

fn print_json(value: &serde_json::Value) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(body) => {
            println!("{}", body);
            ExitCode::Clean
        }
        Err(e) => output_error(ExitCode::InternalError, &e.to_string()),
    }
}

/// Report an error as JSON on stderr and hand back its exit code.
fn output_error(code: ExitCode, message: &str) -> ExitCode {
    emit_error(code, message, None)
}

/// Like [`output_error`], with the digest error's own code and category.
fn report_error(e: &rd_common::Error) -> ExitCode {
    emit_error(ExitCode::from(e), &e.to_string(), Some(e.to_json()))
}

fn emit_error(code: ExitCode, message: &str, detail: Option<serde_json::Value>) -> ExitCode {
    let mut error = serde_json::json!({
        "code": code.code_name(),
        "exit_code": code.as_i32(),
        "message": message,
    });
    if let Some(detail) = detail {
        error["detail"] = detail;
    }
    let response = serde_json::json!({
        "schema_version": CONFIG_SCHEMA_VERSION,
        "generated_at": Utc::now().to_rfc3339(),
        "status": "error",
        "error": error,
    });
    eprintln!("{}", response);
    code
}
