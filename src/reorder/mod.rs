//! Moving one repository section of pacman.conf ahead of another.
//!
//! [`ConfigReorderer`] reads a configuration file once and answers questions
//! about the order of two sections. It can also produce a rewritten copy in
//! which the target section sits directly in front of the boundary section.
//! It never writes anything itself. Persisting the result is the caller's job
//! (see [`crate::resources::repo_priority`]).
pub mod header;
mod text;

use std::cell::OnceCell;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ReorderError;

pub use text::{ConfigText, SectionBlock};

/// Lazily loaded pacman.conf together with the two section names it cares
/// about.
///
/// The file is read on first use and cached for the lifetime of the value.
/// Construct a new reorderer to observe later changes on disk.
///
/// # Examples
///
/// ```
/// use repo_priority::reorder::ConfigReorderer;
///
/// let conf = ConfigReorderer::from_text(
///     "[core]\nServer=y\n[antergos]\nServer=x\n",
///     "antergos",
///     "core",
/// );
/// assert!(conf.has_target_section().unwrap());
/// assert!(!conf.is_target_before_boundary().unwrap());
/// assert_eq!(
///     conf.reorder().unwrap().lines(),
///     ["[antergos]\n", "Server=x\n", "\n", "[core]\n", "Server=y\n"]
/// );
/// ```
#[derive(Debug)]
pub struct ConfigReorderer {
    source: PathBuf,
    target: String,
    boundary: String,
    text: OnceCell<ConfigText>,
}

impl ConfigReorderer {
    /// Create a reorderer for the file at `source`. Nothing is read yet.
    #[must_use]
    pub fn new(
        source: impl Into<PathBuf>,
        target: impl Into<String>,
        boundary: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            boundary: boundary.into(),
            text: OnceCell::new(),
        }
    }

    /// Create a reorderer over in-memory content; [`load`](Self::load) never
    /// touches the filesystem.
    #[must_use]
    pub fn from_text(content: &str, target: impl Into<String>, boundary: impl Into<String>) -> Self {
        Self {
            source: PathBuf::new(),
            target: target.into(),
            boundary: boundary.into(),
            text: OnceCell::from(ConfigText::parse(content)),
        }
    }

    /// Path the configuration is read from.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Name of the section that has to come first.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Name of the section the target has to precede.
    #[must_use]
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Return the cached configuration, reading the file on first call.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderError::Read`] if the file is missing or unreadable.
    pub fn load(&self) -> Result<&ConfigText, ReorderError> {
        if let Some(text) = self.text.get() {
            return Ok(text);
        }
        let content = fs::read_to_string(&self.source).map_err(|source| ReorderError::Read {
            path: self.source.clone(),
            source,
        })?;
        Ok(self.text.get_or_init(|| ConfigText::parse(&content)))
    }

    /// Return `true` if any line mentions the target section, including
    /// commented-out or indented declarations.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderError::Read`] if the file cannot be loaded.
    pub fn has_target_section(&self) -> Result<bool, ReorderError> {
        Ok(self.load()?.mentions_section(&self.target))
    }

    /// Return `true` if the boundary section is declared by an uncommented
    /// header.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderError::Read`] if the file cannot be loaded.
    pub fn has_boundary_section(&self) -> Result<bool, ReorderError> {
        Ok(self.load()?.find_header(&self.boundary).is_some())
    }

    /// Return `true` if the target header appears before the first boundary
    /// header. Also `false` when the boundary is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderError::Read`] if the file cannot be loaded.
    pub fn is_target_before_boundary(&self) -> Result<bool, ReorderError> {
        Ok(self.load()?.declares_before(&self.target, &self.boundary))
    }

    /// Locate the target block as a line range.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderError::Read`] if the file cannot be loaded.
    pub fn locate_target_block(&self) -> Result<Option<SectionBlock>, ReorderError> {
        Ok(self.load()?.locate(&self.target))
    }

    /// The lines of the target block, header included. Empty when the target
    /// section is not declared.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderError::Read`] if the file cannot be loaded.
    pub fn extract_target_block(&self) -> Result<&[String], ReorderError> {
        let text = self.load()?;
        Ok(text
            .locate(&self.target)
            .map_or(&[][..], |block| text.block_lines(&block)))
    }

    /// Produce the full new content with the target block moved directly in
    /// front of the boundary header, followed by one blank line.
    ///
    /// The content is returned unchanged when the target already precedes the
    /// boundary or when there is no target block to move.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderError::Read`] if the file cannot be loaded, or
    /// [`ReorderError::BoundaryMissing`] if the target block exists but the
    /// boundary section does not.
    pub fn reorder(&self) -> Result<ConfigText, ReorderError> {
        move_before(self.load()?, &self.target, &self.boundary)
    }
}

/// Move the block of `target` in front of the first `boundary` header.
fn move_before(text: &ConfigText, target: &str, boundary: &str) -> Result<ConfigText, ReorderError> {
    if text.declares_before(target, boundary) {
        return Ok(text.clone());
    }
    let Some(block) = text.locate(target) else {
        return Ok(text.clone());
    };
    let Some(boundary_at) = text.find_header(boundary) else {
        return Err(ReorderError::BoundaryMissing {
            target: target.to_string(),
            boundary: boundary.to_string(),
        });
    };

    let eol = line_ending(text.lines().get(boundary_at).map(String::as_str));
    let mut moved = text.block_lines(&block).to_vec();
    // A block taken from the end of the file may lack its final newline.
    if let Some(last) = moved.last_mut()
        && !last.ends_with('\n')
    {
        last.push_str(eol);
    }

    let mut lines = Vec::with_capacity(text.len() + 1);
    for (idx, line) in text.lines().iter().enumerate() {
        if idx == boundary_at {
            lines.append(&mut moved);
            lines.push(eol.to_string());
        }
        if !block.contains(idx) {
            lines.push(line.clone());
        }
    }
    Ok(ConfigText::from(lines))
}

/// Line terminator used by `line`, defaulting to `\n`.
fn line_ending(line: Option<&str>) -> &'static str {
    if line.is_some_and(|l| l.ends_with("\r\n")) {
        "\r\n"
    } else {
        "\n"
    }
}
