use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::cli::args::Cli;
use crate::config::load_settings;
use crate::error::{MountError, StageError};
use crate::mount::SystemMountService;
use crate::stage::{run_stage, RsyncCopier};
use crate::types::RunMode;

pub mod args;

const CONFIG_FILE: &str = "/etc/distrstage.yaml";
const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    println!("distrstage {}", VERSION);
    println!("{}", Local::now().format("%d-%m-%Y %H:%M"));

    let config_path = cli.config.unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
    let settings = match load_settings(&config_path) {
        Ok(settings) => settings,
        Err(e) => {
            println!("failed to load config {}: {}", config_path.display(), e);
            std::process::exit(2);
        }
    };

    init_tracing(&settings.log_file);

    let run_mode = RunMode {
        dry_run: cli.dry_run,
        verbose: cli.verbose,
    };
    let inventory_path = cli
        .inventory
        .unwrap_or_else(|| settings.inventory_file(cli.inv.as_deref()));

    let service = SystemMountService::new(run_mode);
    let copier = RsyncCopier::new(settings.bw_limit_kb, run_mode);
    match run_stage(&service, &copier, &settings, &inventory_path) {
        Ok(()) => {
            info!("operation completed successfully");
            Ok(())
        }
        Err(err) => exit_for_error(&err),
    }
}

fn exit_for_error(err: &StageError) -> ! {
    let code = match err {
        StageError::Inventory(_) => 2,
        StageError::Mount(MountError::RemoteShare { .. }) => 14,
        _ => 1,
    };
    error!("critical error: {}", err);
    std::process::exit(code);
}

/// Every run logs to the console and appends to the configured log file so
/// operators can re-run failed copies from the durable record.
fn init_tracing(log_file: &Path) {
    let dir = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = log_file
        .file_name()
        .unwrap_or_else(|| OsStr::new("distrstage.log"));
    let file = tracing_appender::rolling::never(dir, name);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file),
        )
        .try_init();
}
