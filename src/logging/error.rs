//! Failures while persisting a record

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::friendly_io_error_message;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("log folder {path:?} does not exist and could not be created")]
    CreateFolder {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to create log file {path:?}")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("log file {path:?} is not writable")]
    NotWritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write header to log file {path:?}")]
    HeaderSeed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to append record to log file {path:?}")]
    Append {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RecordError {
    pub fn path(&self) -> &Path {
        match self {
            RecordError::CreateFolder { path, .. }
            | RecordError::CreateFile { path, .. }
            | RecordError::NotWritable { path, .. }
            | RecordError::HeaderSeed { path, .. }
            | RecordError::Append { path, .. } => path,
        }
    }

    pub fn io_error(&self) -> &io::Error {
        match self {
            RecordError::CreateFolder { source, .. }
            | RecordError::CreateFile { source, .. }
            | RecordError::NotWritable { source, .. }
            | RecordError::HeaderSeed { source, .. }
            | RecordError::Append { source, .. } => source,
        }
    }

    /// One-line description for the system error channel
    pub fn system_message(&self) -> String {
        friendly_io_error_message(self.io_error(), &self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_message_includes_path_and_cause() {
        let err = RecordError::NotWritable {
            path: PathBuf::from("/var/log/app/run1.log"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let message = err.system_message();
        assert!(message.contains("run1.log"));
        assert!(message.ends_with("permission denied"));
        assert_eq!(err.path(), Path::new("/var/log/app/run1.log"));
    }
}
