use log::*;
use walkdir::WalkDir;

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::grammar::{Grammar, MarkerMatcher};

/// Writes every text file under `root_path` into a single bundle.
///
/// Each file becomes a marker line followed by its content and one extra
/// newline, which extraction strips again. Files that are not valid UTF-8
/// are skipped. Returns the number of files written.
pub fn pack_files<W: Write>(
    root_path: impl AsRef<Path>,
    matcher: &MarkerMatcher,
    writer: &mut W,
) -> Result<usize> {
    let root_path = root_path.as_ref();
    let mut writer = BufWriter::new(writer);
    let mut count = 0;

    info!("Packing files from {}", root_path.display());
    for entry in WalkDir::new(root_path).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = match entry.path().strip_prefix(root_path) {
            Ok(relative) => bundle_path(relative),
            Err(_) => continue,
        };
        if relative.is_empty() {
            continue;
        }

        let content = match fs::read_to_string(entry.path()) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                warn!("Skipping {relative}: not a UTF-8 text file");
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        check_round_trip(matcher, &relative, &content);
        debug!("- {relative}");

        writeln!(writer, "{}", matcher.marker_for(&relative))?;
        writer.write_all(content.as_bytes())?;
        writer.write_all(b"\n")?;
        count += 1;
    }

    writer.flush()?;
    info!("Packed {count} files");
    Ok(count)
}

// always '/' separated, whatever the platform
fn bundle_path(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn check_round_trip(matcher: &MarkerMatcher, relative: &str, content: &str) {
    if matcher.grammar() == Grammar::Delimited && relative.contains(' ') {
        warn!("{relative}: spaces will be extracted as underscores");
    }

    for (idx, line) in content.lines().enumerate() {
        if matcher.capture(line).is_some() {
            warn!(
                "{relative}:{}: line looks like a file marker and will split the file",
                idx + 1
            );
        } else if matcher.is_noise(line, relative) {
            warn!(
                "{relative}:{}: code fence will be dropped on extraction",
                idx + 1
            );
        }
    }
}
