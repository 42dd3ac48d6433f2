//! The persisted record: six titled sections appended as one block

use chrono::{DateTime, Local};

use super::format::{log_lines, log_title, RECORD_BANNER_WIDTH, SECTION_WIDTH};
use super::request::{render_params, RequestContext};
use super::stack::CallStack;

/// Section titles, in write order
pub const SECTION_TITLES: [&str; 6] = ["TIME", "ERROR", "DEBUG", "GET", "POST", "REQUEST"];

/// One titled block of a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub body: String,
    /// Number of dash lines closing the section
    pub separator_lines: usize,
}

impl Section {
    fn new(title: &str, body: String) -> Self {
        Self {
            title: title.to_string(),
            body,
            separator_lines: 1,
        }
    }

    pub fn render(&self) -> String {
        let mut text = log_title(&self.title);
        text.push_str(&self.body);
        text.push_str(&log_lines(SECTION_WIDTH, self.separator_lines, '-'));
        text
    }
}

/// A full diagnostic record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    sections: Vec<Section>,
}

impl LogRecord {
    pub fn compose(
        message: &str,
        timestamp: DateTime<Local>,
        stack: &CallStack,
        request: &RequestContext,
    ) -> Self {
        let time = format!(
            "Microtime - {}.{:06}\nDate - {}\n\n",
            timestamp.timestamp(),
            timestamp.timestamp_subsec_micros(),
            timestamp.to_rfc2822()
        );

        let mut sections = vec![
            Section::new("TIME", time),
            Section::new("ERROR", format!("{}\n", message)),
            Section::new("DEBUG", format!("\n\n{}\n", stack)),
            Section::new("GET", params_body(&render_params(&request.get))),
            Section::new("POST", params_body(&render_params(&request.post))),
            Section::new("REQUEST", params_body(&render_params(&request.request()))),
        ];
        if let Some(last) = sections.last_mut() {
            last.separator_lines = 3;
        }

        Self { sections }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Full text of the record, written with a single append
    pub fn render(&self) -> String {
        let mut text = log_lines(RECORD_BANNER_WIDTH, 2, '*');
        for section in &self.sections {
            text.push_str(&section.render());
        }
        text
    }
}

fn params_body(rendered: &str) -> String {
    format!("\n\n{}\n", rendered)
}

/// Number of section header lines in a block of log text
///
/// Only exact `***TIME` .. `***REQUEST` lines count. A message line that is exactly one
/// of those headers is indistinguishable from a real one and is counted too.
pub fn count_section_headers(text: &str) -> usize {
    text.lines()
        .filter(|line| {
            line.strip_prefix("***")
                .is_some_and(|label| SECTION_TITLES.iter().any(|title| *title == label))
        })
        .count()
}
