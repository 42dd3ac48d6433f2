//! File-based error recorder
//!
//! Displays the error banner, then appends one record to `<logs_folder>/<name>.log`,
//! creating the folder and seeding the file header when needed. Failures are reported
//! on the tracing error channel and returned in the outcome; they never panic.

use std::fs::{DirBuilder, OpenOptions};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use chrono::Local;

use crate::config::LogConfig;

use super::error::RecordError;
use super::format::{display_banner, ensure_log_suffix, header_seed};
use super::outcome::{Persisted, RecordOutcome};
use super::record::LogRecord;
use super::report::ErrorReport;
use super::stack::CallStack;

/// Files smaller than this are treated as uninitialized and get the header again
pub const EMPTY_FILE_THRESHOLD: u64 = 100;

/// Frames between `CallStack::capture` and the host: the public entry point that calls it
const ENTRY_FRAMES: usize = 1;

#[cfg(unix)]
const LOG_MODE: u32 = 0o775;

/// Records errors according to an injected configuration
#[derive(Debug, Clone)]
pub struct LogRecorder {
    config: LogConfig,
}

impl LogRecorder {
    pub fn new(config: LogConfig) -> Self {
        Self { config }
    }

    /// Path of the log file for `filename`, with the `.log` suffix enforced
    ///
    /// The name always resolves inside the logs folder: root, prefix and `..`
    /// components are dropped.
    pub fn log_path(&self, filename: &str) -> PathBuf {
        self.logs_folder().join(relative_log_path(filename))
    }

    fn logs_folder(&self) -> &Path {
        if self.config.logs_folder.as_os_str().is_empty() {
            Path::new(".")
        } else {
            &self.config.logs_folder
        }
    }

    /// Record an error, writing the banner to stdout
    #[inline(never)]
    pub fn record_error(&self, report: &ErrorReport) -> RecordOutcome {
        let stack = if self.config.save_errors {
            CallStack::capture(ENTRY_FRAMES)
        } else {
            CallStack::default()
        };
        let mut stdout = io::stdout().lock();
        self.record(report, &mut stdout, &stack)
    }

    /// Record an error, writing the banner to `out`
    #[inline(never)]
    pub fn record_error_to<W: Write>(&self, report: &ErrorReport, out: &mut W) -> RecordOutcome {
        let stack = if self.config.save_errors {
            CallStack::capture(ENTRY_FRAMES)
        } else {
            CallStack::default()
        };
        self.record(report, out, &stack)
    }

    /// Record an error and terminate the process if the report asks for it
    #[inline(never)]
    pub fn record_error_or_exit(&self, report: &ErrorReport) -> RecordOutcome {
        let stack = if self.config.save_errors {
            CallStack::capture(ENTRY_FRAMES)
        } else {
            CallStack::default()
        };
        let outcome = {
            let mut stdout = io::stdout().lock();
            self.record(report, &mut stdout, &stack)
        };
        outcome.exit_if_halted()
    }

    fn record<W: Write>(
        &self,
        report: &ErrorReport,
        out: &mut W,
        stack: &CallStack,
    ) -> RecordOutcome {
        if report.display {
            let message = self.config.show_errors.then_some(report.message.as_str());
            let shown = out
                .write_all(display_banner(message).as_bytes())
                .and_then(|_| out.flush());
            if let Err(e) = shown {
                tracing::warn!(target: "logrecorder", "Failed to write error banner: {}", e);
            }
        }

        if !self.config.save_errors {
            tracing::debug!(target: "logrecorder", "Saving errors is disabled, record skipped");
            return RecordOutcome::new(Persisted::Skipped, report.force_stop);
        }

        let persisted = match self.persist(report, stack) {
            Ok(path) => {
                tracing::debug!(target: "logrecorder", path = %path.display(), "Error recorded");
                Persisted::Written(path)
            }
            Err(err) => {
                tracing::error!(
                    target: "logrecorder",
                    path = %err.path().display(),
                    "{}",
                    err.system_message()
                );
                Persisted::Failed(err)
            }
        };

        RecordOutcome::new(persisted, report.force_stop)
    }

    fn persist(&self, report: &ErrorReport, stack: &CallStack) -> Result<PathBuf, RecordError> {
        let relative = relative_log_path(&report.filename);
        let filename = relative.to_string_lossy().into_owned();
        let path = self.logs_folder().join(&relative);

        let folder = path.parent().unwrap_or_else(|| self.logs_folder());
        ensure_folder(folder)?;

        if !path.exists() {
            seed_header(&path, &filename).map_err(|source| RecordError::CreateFile {
                path: path.clone(),
                source,
            })?;
        }

        let not_writable = |source: io::Error| RecordError::NotWritable {
            path: path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .append(true)
            .open(&path)
            .map_err(not_writable)?;
        let size = file.metadata().map_err(not_writable)?.len();

        if size < EMPTY_FILE_THRESHOLD {
            seed_header(&path, &filename).map_err(|source| RecordError::HeaderSeed {
                path: path.clone(),
                source,
            })?;
        }

        let record = LogRecord::compose(&report.message, Local::now(), stack, &report.request);
        file.write_all(record.render().as_bytes())
            .and_then(|_| file.flush())
            .map_err(|source| RecordError::Append {
                path: path.clone(),
                source,
            })?;

        Ok(path)
    }
}

/// `filename` with `.log` enforced, keeping only plain path components
fn relative_log_path(filename: &str) -> PathBuf {
    Path::new(&ensure_log_suffix(filename))
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect()
}

/// Create the logs folder (and missing parents) if it does not exist
fn ensure_folder(folder: &Path) -> Result<(), RecordError> {
    if folder.is_dir() {
        return Ok(());
    }

    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(LOG_MODE);
    }

    builder
        .create(folder)
        .map_err(|source| RecordError::CreateFolder {
            path: folder.to_path_buf(),
            source,
        })
}

/// Append the descriptive header (creating the file if needed) and open up its permissions
fn seed_header(path: &Path, filename: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(header_seed(filename, Local::now()).as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Err(e) = std::fs::set_permissions(path, std::fs::Permissions::from_mode(LOG_MODE))
        {
            tracing::debug!(target: "logrecorder", "Could not set log file mode: {}", e);
        }
    }

    Ok(())
}
