//! Marker grammars and path normalization.
//!
//! A bundle marks the start of each file with a line carrying its path
//! below a root prefix (`farm` by default). Two marker shapes are
//! understood:
//!
//! ```text
//! farm/src/main.rs                          (bare)
//! --- FILE START: farm/src/main.rs ---      (delimited)
//! ```

use std::path::Path;
use std::sync::LazyLock;

use clap::ValueEnum;
use regex::Regex;

use crate::error::{Error, Result};

pub const DEFAULT_ROOT: &str = "farm";

const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown", "mdx"];

static FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^```[a-z]*$").unwrap());

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Grammar {
    /// The whole trimmed line is the path.
    #[default]
    Bare,
    /// `--- FILE START: <path> ---`, with code fences treated as noise.
    Delimited,
}

#[derive(Clone, Debug)]
pub struct MarkerMatcher {
    grammar: Grammar,
    root: String,
    pattern: Regex,
}

impl MarkerMatcher {
    pub fn new(grammar: Grammar, root: &str) -> Result<Self> {
        if root.is_empty() {
            return Err(Error::EmptyRoot);
        }

        let root_pattern = regex::escape(root);
        let pattern = match grammar {
            Grammar::Bare => format!(r"^{root_pattern}/.*$"),
            Grammar::Delimited => format!(r"^---\s*FILE START:\s*({root_pattern}/.*)\s*---$"),
        };

        Ok(Self {
            grammar,
            root: root.to_owned(),
            pattern: Regex::new(&pattern)?,
        })
    }

    pub fn grammar(&self) -> Grammar {
        self.grammar
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Returns the raw path carried by `line` if it is a marker.
    pub fn capture<'a>(&self, line: &'a str) -> Option<&'a str> {
        let trimmed = line.trim();
        match self.grammar {
            Grammar::Bare => self.pattern.is_match(trimmed).then_some(trimmed),
            Grammar::Delimited => self
                .pattern
                .captures(trimmed)
                .and_then(|caps| caps.get(1))
                .map(|path| path.as_str().trim()),
        }
    }

    /// Maps a captured marker path to a path relative to the output root.
    pub fn normalize(&self, raw: &str) -> String {
        let stripped = raw
            .strip_prefix(self.root.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(raw);

        match self.grammar {
            Grammar::Bare => stripped.to_owned(),
            Grammar::Delimited => stripped.replace(' ', "_"),
        }
    }

    /// Whether `line` should be dropped from a segment headed for `path`.
    pub fn is_noise(&self, line: &str, path: &str) -> bool {
        self.grammar == Grammar::Delimited && FENCE.is_match(line.trim()) && !is_markdown(path)
    }

    /// Renders the marker line for `relative`, without a line terminator.
    pub fn marker_for(&self, relative: &str) -> String {
        match self.grammar {
            Grammar::Bare => format!("{}/{}", self.root, relative),
            Grammar::Delimited => format!("--- FILE START: {}/{} ---", self.root, relative),
        }
    }
}

fn is_markdown(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            MARKDOWN_EXTENSIONS
                .iter()
                .any(|md| ext.eq_ignore_ascii_case(md))
        })
        .unwrap_or(false)
}
