use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ibmod::config::Config;
use ibmod::ibm::auth::EnvCredentials;
use ibmod::resource;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{Instrument, Level};
use uuid::Uuid;

/// Idempotent resource modules for IBM Cloud
#[derive(Parser, Debug)]
#[command(name = "ibmod", version, about, long_about = None)]
struct Args {
    /// Module to run (e.g. resource_key); use --list to see all
    module: Option<String>,

    /// Parameters as an inline JSON object
    #[arg(short, long)]
    params: Option<String>,

    /// Read parameters from a JSON file ("-" for stdin)
    #[arg(long, conflicts_with = "params")]
    params_file: Option<PathBuf>,

    /// List available modules and exit
    #[arg(long)]
    list: bool,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off")]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

/// Logging goes to a file; stdout must stay machine-parseable because the
/// orchestration engine reads the report from it.
fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .expect("Failed to open log file");

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("ibmod started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("ibmod").join("ibmod.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".ibmod").join("ibmod.log");
    }
    PathBuf::from("ibmod.log")
}

fn read_params(args: &Args) -> Result<serde_json::Value> {
    if let Some(inline) = &args.params {
        return serde_json::from_str(inline).context("Invalid inline parameter JSON");
    }

    if let Some(path) = &args.params_file {
        let content = if path.as_os_str() == "-" {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read parameters from stdin")?;
            buffer
        } else {
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read parameter file {:?}", path))?
        };
        return serde_json::from_str(&content).context("Invalid parameter file JSON");
    }

    // No parameters supplied at all; modules with no required options
    // accept an empty document.
    Ok(serde_json::json!({}))
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    if args.list {
        let mut keys = resource::get_all_resource_keys();
        keys.sort_unstable();
        for key in keys {
            println!("{}", key);
        }
        return ExitCode::SUCCESS;
    }

    let Some(module) = args.module.clone() else {
        eprintln!("Error: no module given. Use --list to see available modules.");
        return ExitCode::FAILURE;
    };

    let params = match read_params(&args) {
        Ok(params) => params,
        Err(err) => {
            eprintln!("Error: {err:?}");
            return ExitCode::FAILURE;
        }
    };

    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("module_run", module = %module, %run_id);

    let config = Config::load();
    let endpoints = config.effective_endpoints();

    let outcome = resource::run(&module, &params, &EnvCredentials, &endpoints)
        .instrument(span)
        .await;

    match outcome {
        Ok(report) => {
            tracing::info!("{}: changed={}", module, report.changed);
            match serde_json::to_string(&report) {
                Ok(wire) => println!("{}", wire),
                Err(err) => {
                    eprintln!("Error: failed to serialize report: {err}");
                    return ExitCode::FAILURE;
                }
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            let failure = err.into_failure();
            tracing::error!("{}: {}", module, failure.msg);
            match serde_json::to_string(&failure) {
                Ok(wire) => println!("{}", wire),
                Err(err) => eprintln!("Error: failed to serialize report: {err}"),
            }
            ExitCode::FAILURE
        }
    }
}
