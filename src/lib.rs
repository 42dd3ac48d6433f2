//! logrecorder - append structured error records to log files
//!
//! One call displays an error banner, appends a timestamped TIME/ERROR/DEBUG/GET/POST/REQUEST
//! record to `<logs_folder>/<name>.log`, and tells the host whether to stop.

pub mod config;
pub mod logging;

pub use config::LogConfig;
pub use logging::{ErrorReport, LogRecorder, RecordOutcome};
