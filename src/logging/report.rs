//! A single record request

use super::request::RequestContext;

/// Default log file name (before the `.log` suffix is enforced)
pub const DEFAULT_FILENAME: &str = "logs";

/// One error to record, with per-call behaviour flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    /// Free text written to the ERROR section
    pub message: String,
    /// Target file name inside the logs folder
    pub filename: String,
    /// Ask the host to stop after recording (default: true)
    pub force_stop: bool,
    /// Render the banner to the output stream (default: true)
    pub display: bool,
    /// Request parameters for the GET/POST/REQUEST sections
    pub request: RequestContext,
}

impl ErrorReport {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            filename: DEFAULT_FILENAME.to_string(),
            force_stop: true,
            display: true,
            request: RequestContext::default(),
        }
    }

    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn force_stop(mut self, force_stop: bool) -> Self {
        self.force_stop = force_stop;
        self
    }

    pub fn display(mut self, display: bool) -> Self {
        self.display = display;
        self
    }

    pub fn request(mut self, request: RequestContext) -> Self {
        self.request = request;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let report = ErrorReport::new("boom");
        assert_eq!(report.filename, "logs");
        assert!(report.force_stop);
        assert!(report.display);
        assert!(report.request.get.is_empty());
    }

    #[test]
    fn test_builder() {
        let report = ErrorReport::new("boom")
            .filename("run1")
            .force_stop(false)
            .display(false)
            .request(RequestContext::new().with_get("a", "1"));
        assert_eq!(report.filename, "run1");
        assert!(!report.force_stop);
        assert!(!report.display);
        assert_eq!(report.request.get["a"], "1");
    }
}
