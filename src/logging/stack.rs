//! Call-stack snapshots for the DEBUG section
//!
//! Frames are dropped by position, not by name: everything the backtrace machinery
//! itself pushes, the capture frame, then a caller-supplied number of frames.

use std::backtrace::Backtrace;
use std::fmt;

/// A single rendered stack frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Demangled symbol, or `<unknown>` when unresolved
    pub symbol: String,
    /// `at file:line:col` location, when debug info is available
    pub location: Option<String>,
}

/// Snapshot of the call stack at the time of recording
#[derive(Debug, Clone, Default)]
pub struct CallStack {
    frames: Vec<Frame>,
}

impl CallStack {
    /// Capture the current stack, dropping `skip` frames above the caller of `capture`
    ///
    /// `skip = 0` keeps the direct caller as the first frame.
    #[inline(never)]
    pub fn capture(skip: usize) -> Self {
        let rendered = Backtrace::force_capture().to_string();
        let frames = split_frames(&rendered);

        let machinery = frames
            .iter()
            .take_while(|frame| is_machinery(&frame.symbol))
            .count();

        // +1 for this function's own frame
        let frames = frames.into_iter().skip(machinery + 1 + skip).collect();
        Self { frames }
    }

    /// Build a snapshot from already-split frames
    pub fn from_frames(frames: Vec<Frame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl fmt::Display for CallStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return writeln!(f, "<no frames>");
        }
        for (index, frame) in self.frames.iter().enumerate() {
            writeln!(f, "{:>4}: {}", index, frame.symbol)?;
            if let Some(location) = &frame.location {
                writeln!(f, "        {}", location)?;
            }
        }
        Ok(())
    }
}

/// Frames pushed by the standard library while taking the backtrace
fn is_machinery(symbol: &str) -> bool {
    symbol.starts_with("std::backtrace") || symbol.starts_with("backtrace::")
}

/// Split `Backtrace` display output into frames
///
/// A frame starts at an `N: symbol` line. Inlined symbols are printed without an
/// index and count as frames of their own; `at ...` lines belong to the frame above.
/// Lines before the first indexed frame are ignored.
pub fn split_frames(text: &str) -> Vec<Frame> {
    let mut frames: Vec<Frame> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let symbol = match frame_header(trimmed) {
            Some(symbol) => symbol,
            None if frames.is_empty() => continue,
            None if trimmed.starts_with("at ") => {
                if let Some(frame) = frames.last_mut() {
                    frame.location.get_or_insert_with(|| trimmed.to_string());
                }
                continue;
            }
            None => trimmed,
        };

        let symbol = if symbol.is_empty() { "<unknown>" } else { symbol };
        frames.push(Frame {
            symbol: symbol.to_string(),
            location: None,
        });
    }

    frames
}

/// Returns the symbol part of an `N: symbol` line
fn frame_header(line: &str) -> Option<&str> {
    let (index, rest) = line.split_once(':')?;
    if index.is_empty() || !index.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(rest.trim())
}
