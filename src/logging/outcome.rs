//! What a record call did, and whether the host should stop

use std::io::Write;
use std::path::{Path, PathBuf};

use super::error::RecordError;

/// Exit status used when a halt is carried out
pub const HALT_EXIT_CODE: i32 = 1;

/// Fixed notice printed before halting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltNotice {
    /// Nothing was saved (persistence disabled or failed)
    EngineStop,
    /// The record was written
    LogSaved,
}

impl HaltNotice {
    pub fn text(&self) -> &'static str {
        match self {
            HaltNotice::EngineStop => "\nEngine force stop...\n",
            HaltNotice::LogSaved => "\nLog saved...<br>\nEngine force stop...\n",
        }
    }
}

/// Result of the persistence step
#[derive(Debug)]
pub enum Persisted {
    /// Record appended to this file
    Written(PathBuf),
    /// Persistence disabled by configuration
    Skipped,
    /// Best-effort write gave up
    Failed(RecordError),
}

/// What the caller should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    Continue,
    Halt(HaltNotice),
}

#[derive(Debug)]
pub struct RecordOutcome {
    pub persisted: Persisted,
    pub continuation: Continuation,
}

impl RecordOutcome {
    pub(crate) fn new(persisted: Persisted, force_stop: bool) -> Self {
        let continuation = if force_stop {
            let notice = match persisted {
                Persisted::Written(_) => HaltNotice::LogSaved,
                Persisted::Skipped | Persisted::Failed(_) => HaltNotice::EngineStop,
            };
            Continuation::Halt(notice)
        } else {
            Continuation::Continue
        };
        Self {
            persisted,
            continuation,
        }
    }

    pub fn must_halt(&self) -> bool {
        matches!(self.continuation, Continuation::Halt(_))
    }

    pub fn is_written(&self) -> bool {
        matches!(self.persisted, Persisted::Written(_))
    }

    /// Path of the written log file, if any
    pub fn path(&self) -> Option<&Path> {
        match &self.persisted {
            Persisted::Written(path) => Some(path),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&RecordError> {
        match &self.persisted {
            Persisted::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Print the halt notice to `out`; returns the notice when the caller must stop
    pub fn write_notice<W: Write>(&self, out: &mut W) -> std::io::Result<Option<HaltNotice>> {
        match self.continuation {
            Continuation::Continue => Ok(None),
            Continuation::Halt(notice) => {
                out.write_all(notice.text().as_bytes())?;
                out.flush()?;
                Ok(Some(notice))
            }
        }
    }

    /// Print the notice to stdout and terminate the process when a halt was requested
    pub fn exit_if_halted(self) -> Self {
        if self.must_halt() {
            // halts even when stdout is closed
            let _ = self.write_notice(&mut std::io::stdout().lock());
            std::process::exit(HALT_EXIT_CODE);
        }
        self
    }
}
