use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use logrecorder::config::LogConfig;
use logrecorder::logging::{self, ErrorReport, LogRecorder, RequestContext};

/// Append an error record to a log file
#[derive(Debug, Parser)]
#[command(name = "logrecorder", version, about)]
struct Cli {
    /// Error message written to the ERROR section
    message: String,

    /// Log file name inside the logs folder (".log" is appended if missing)
    #[arg(short, long, default_value = logging::DEFAULT_FILENAME)]
    file: String,

    /// Keep running after recording instead of stopping
    #[arg(long)]
    no_force_stop: bool,

    /// Do not print the HTML error banner
    #[arg(long)]
    no_display: bool,

    /// GET parameter as key=value (repeatable)
    #[arg(long = "get", value_name = "KEY=VALUE")]
    get: Vec<String>,

    /// POST parameter as key=value (repeatable)
    #[arg(long = "post", value_name = "KEY=VALUE")]
    post: Vec<String>,

    /// Override the configured logs folder
    #[arg(long)]
    logs_folder: Option<PathBuf>,

    /// Include the message in the banner
    #[arg(long)]
    show_errors: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init_stderr_logging() {
        eprintln!("Warning: {:#}", e);
    }

    let mut config = LogConfig::load()?;
    if let Some(folder) = cli.logs_folder {
        config.logs_folder = folder;
    }
    if cli.show_errors {
        config.show_errors = true;
    }

    let report = ErrorReport::new(cli.message)
        .filename(cli.file)
        .force_stop(!cli.no_force_stop)
        .display(!cli.no_display)
        .request(RequestContext::from_pairs(&cli.get, &cli.post)?);

    LogRecorder::new(config).record_error_or_exit(&report);

    Ok(())
}
