use log::*;

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};
use crate::segment::OutputUnit;

/// Destination for finished output units.
pub trait Sink {
    fn write(&mut self, unit: &OutputUnit) -> Result<()>;
}

/// Writes units as files below an output root, creating parent
/// directories and overwriting existing files.
#[derive(Clone, Debug)]
pub struct DirSink {
    root: PathBuf,
}

impl DirSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn target(&self, relative: &str) -> Result<PathBuf> {
        let relative = Path::new(relative);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(Error::UnsafePath(relative.to_owned()));
        }

        Ok(self.root.join(relative))
    }
}

impl Sink for DirSink {
    fn write(&mut self, unit: &OutputUnit) -> Result<()> {
        let path = self.target(&unit.path)?;
        let wrap = |source: io::Error| Error::Write {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(wrap)?;
        }

        let file = File::create(&path).map_err(wrap)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(unit.content.as_bytes()).map_err(wrap)?;
        writer.flush().map_err(wrap)?;

        info!("  Created: {}", unit.path);
        Ok(())
    }
}

impl Sink for Vec<OutputUnit> {
    fn write(&mut self, unit: &OutputUnit) -> Result<()> {
        self.push(unit.clone());
        Ok(())
    }
}
