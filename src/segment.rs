//! Line-oriented segmentation of a bundle into output units.

use log::*;

use crate::grammar::MarkerMatcher;

/// A finished file: a path relative to the output root and its text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputUnit {
    pub path: String,
    pub content: String,
}

/// Lines collected since the last marker.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Segment {
    pub path: String,
    pub lines: Vec<String>,
}

impl Segment {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            lines: Vec::new(),
        }
    }

    /// Consumes the segment. Segments without a path or without any
    /// collected line produce nothing.
    pub fn flush(self) -> Option<OutputUnit> {
        if self.path.is_empty() || self.lines.is_empty() {
            debug!(
                "Nothing to write for '{}' ({} lines)",
                self.path,
                self.lines.len()
            );
            return None;
        }

        let mut content = self.lines.concat();
        // only the single final newline belongs to the marker layout
        if content.ends_with('\n') {
            content.pop();
        }

        Some(OutputUnit {
            path: self.path,
            content,
        })
    }
}

/// Single pass state machine turning lines into [`OutputUnit`]s.
pub struct Segmenter<'m> {
    matcher: &'m MarkerMatcher,
    current: Option<Segment>,
    line_num: usize,
    dropped: usize,
}

impl<'m> Segmenter<'m> {
    pub fn new(matcher: &'m MarkerMatcher) -> Self {
        Self {
            matcher,
            current: None,
            line_num: 0,
            dropped: 0,
        }
    }

    /// Number of lines fed so far.
    pub fn line_num(&self) -> usize {
        self.line_num
    }

    /// Number of segments that ended without producing a unit.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Feeds one line, terminator included. Returns the unit completed by
    /// a marker on this line, if any.
    pub fn feed(&mut self, line: &str) -> Option<OutputUnit> {
        self.line_num += 1;

        if let Some(raw) = self.matcher.capture(line) {
            debug!("Detected file marker (line {}): '{}'", self.line_num, raw);
            let unit = self.flush();
            let path = self.matcher.normalize(raw);
            debug!("New file path set to: '{path}'");
            self.current = Some(Segment::new(path));
            return unit;
        }

        match &mut self.current {
            Some(segment) => {
                if self.matcher.is_noise(line, &segment.path) {
                    trace!(
                        "Dropping fence line {} in '{}'",
                        self.line_num, segment.path
                    );
                } else {
                    segment.lines.push(line.to_owned());
                }
            }
            None => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    debug!(
                        "Ignoring line {} (no current file selected): '{}'",
                        self.line_num, trimmed
                    );
                }
            }
        }

        None
    }

    /// Flushes whatever segment is still open at end of input.
    pub fn finish(&mut self) -> Option<OutputUnit> {
        self.flush()
    }

    fn flush(&mut self) -> Option<OutputUnit> {
        let segment = self.current.take()?;
        let unit = segment.flush();
        if unit.is_none() {
            self.dropped += 1;
        }
        unit
    }
}
