//! Error recording for logrecorder
//!
//! Provides the file-based [`LogRecorder`], the record layout it appends, and the
//! tracing setup used as the system error channel.

mod error;
mod format;
mod outcome;
mod record;
mod recorder;
mod report;
mod request;
mod stack;
mod subscriber;

pub use error::RecordError;
pub use format::{display_banner, ensure_log_suffix, header_seed, log_lines, log_title};
pub use outcome::{Continuation, HaltNotice, Persisted, RecordOutcome, HALT_EXIT_CODE};
pub use record::{count_section_headers, LogRecord, Section, SECTION_TITLES};
pub use recorder::{LogRecorder, EMPTY_FILE_THRESHOLD};
pub use report::{ErrorReport, DEFAULT_FILENAME};
pub use request::{render_params, Params, RequestContext};
pub use stack::{split_frames, CallStack, Frame};
pub use subscriber::init_stderr_logging;
