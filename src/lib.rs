use log::*;

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

mod error;
pub mod grammar;
pub mod pack;
pub mod post;
pub mod segment;
pub mod sink;

pub use error::{Error, Result};
pub use grammar::{Grammar, MarkerMatcher, DEFAULT_ROOT};
pub use pack::pack_files;
pub use post::{mark_executable, DEFAULT_SCRIPT};
pub use segment::{OutputUnit, Segment, Segmenter};
pub use sink::{DirSink, Sink};

#[derive(Clone, Debug)]
pub struct ExtractOptions {
    /// Directory the extracted tree is written into.
    pub output: PathBuf,
    pub grammar: Grammar,
    /// Leading path component carried by every marker.
    pub root: String,
    /// Script made executable once extraction is done.
    pub script: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from("."),
            grammar: Grammar::default(),
            root: DEFAULT_ROOT.to_owned(),
            script: DEFAULT_SCRIPT.to_owned(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractReport {
    /// Relative paths written, in bundle order. Repeated paths appear twice.
    pub written: Vec<String>,
    /// Units whose write failed.
    pub failed: usize,
    /// Segments that had no path or no content.
    pub dropped: usize,
    pub lines: usize,
}

/// Splits the bundle read from `reader` into units and hands them to `sink`.
///
/// Write failures are logged and counted, only read failures abort the pass.
pub fn extract<R: BufRead, S: Sink>(
    mut reader: R,
    matcher: &MarkerMatcher,
    sink: &mut S,
) -> Result<ExtractReport> {
    let mut segmenter = Segmenter::new(matcher);
    let mut report = ExtractReport::default();
    let mut line = String::new();

    loop {
        line.clear();
        let read = reader.read_line(&mut line).map_err(|source| Error::Read {
            line: segmenter.line_num() + 1,
            source,
        })?;
        if read == 0 {
            break;
        }

        if let Some(unit) = segmenter.feed(&line) {
            write_unit(sink, &unit, &mut report)?;
        }
    }

    if let Some(unit) = segmenter.finish() {
        write_unit(sink, &unit, &mut report)?;
    }
    report.lines = segmenter.line_num();
    report.dropped = segmenter.dropped();

    Ok(report)
}

fn write_unit<S: Sink>(
    sink: &mut S,
    unit: &OutputUnit,
    report: &mut ExtractReport,
) -> Result<()> {
    match sink.write(unit) {
        Ok(()) => report.written.push(unit.path.clone()),
        Err(e) if e.is_recoverable() => {
            error!("Error writing file {}: {}", unit.path, e);
            report.failed += 1;
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

/// Extracts the bundle at `input` below `options.output`.
pub fn extract_file(input: impl AsRef<Path>, options: &ExtractOptions) -> Result<ExtractReport> {
    let input = input.as_ref();
    if !input.is_file() {
        return Err(Error::InputNotFound(input.to_owned()));
    }

    let matcher = MarkerMatcher::new(options.grammar, &options.root)?;

    info!("Starting extraction from '{}'...", input.display());
    fs::create_dir_all(&options.output)?;
    debug!("Output root: {}", options.output.display());

    let reader = BufReader::new(File::open(input)?);
    let mut sink = DirSink::new(&options.output);
    let report = extract(reader, &matcher, &mut sink)?;

    info!(
        "Extracted {} files ({} failed, {} empty) from {} lines",
        report.written.len(),
        report.failed,
        report.dropped,
        report.lines
    );

    info!("Making {} executable...", options.script);
    mark_executable(&options.output, &options.script)?;

    Ok(report)
}
