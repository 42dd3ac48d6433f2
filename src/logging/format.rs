//! Text builders for log files and the display banner
//!
//! Pure string helpers: no state, no I/O.

use chrono::{DateTime, Local};

/// Suffix enforced on every log file name
pub const LOG_SUFFIX: &str = ".log";

/// Width of the separator lines closing each section
pub const SECTION_WIDTH: usize = 100;

/// Width of the star banner opening each record
pub const RECORD_BANNER_WIDTH: usize = 130;

const BANNER_COMMENT: &str =
    "<!-- ----------------------------------------------------------------------------- -->";

/// Heading shown in the display banner
pub const BANNER_HEADING: &str = "SOMETHING WENT WRONG";

/// Append `.log` unless the name already ends with it (case-insensitive)
pub fn ensure_log_suffix(filename: &str) -> String {
    let has_suffix = filename.len() >= LOG_SUFFIX.len()
        && filename
            .get(filename.len() - LOG_SUFFIX.len()..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(LOG_SUFFIX));

    if has_suffix {
        filename.to_string()
    } else {
        format!("{}{}", filename, LOG_SUFFIX)
    }
}

/// Section header line: blank lines, `***`, then the upper-cased label
pub fn log_title(label: &str) -> String {
    format!("\n\n***{}\n", label.to_uppercase())
}

/// Block of `count` lines, each `width` copies of `symbol`
pub fn log_lines(width: usize, count: usize, symbol: char) -> String {
    let line: String = std::iter::repeat(symbol).take(width).collect();
    let mut text = String::from("\n\n");
    for _ in 0..count {
        text.push_str(&line);
        text.push('\n');
    }
    text.push('\n');
    text
}

/// Descriptive preamble written at the top of a new (or emptied) log file
pub fn header_seed(filename: &str, created: DateTime<Local>) -> String {
    let mut text = String::from("/**\n");
    text.push_str(&format!(" * {}\n", filename));
    text.push_str(" *\n");
    text.push_str(" * @category   System\n");
    text.push_str(&format!(" * @package    {}\n", env!("CARGO_PKG_NAME")));
    text.push_str(&format!(" * @version    {}\n", env!("CARGO_PKG_VERSION")));
    text.push_str(&format!(" * @created    ({})\n", created.to_rfc2822()));
    text.push_str(" *\n");
    text.push_str(" *\n");
    text
}

/// HTML fragment shown to the user; the message is included only when given
pub fn display_banner(message: Option<&str>) -> String {
    let mut text = format!("\n{BANNER_COMMENT}\n{BANNER_COMMENT}\n");

    text.push_str("\n<div align=\"center\"><b style=\"color:red\">\n");
    text.push_str(&format!("<h2>{}</h2>\n", BANNER_HEADING));
    if let Some(message) = message {
        text.push_str(message);
        text.push('\n');
    }
    text.push_str("</b></div>\n");

    text.push_str(&format!("\n{BANNER_COMMENT}\n{BANNER_COMMENT}\n"));
    text
}
