//! Line-preserving view of a pacman.conf and the section blocks inside it.
use std::ops::Range;

use super::header;

/// The raw lines of one configuration file, line terminators included.
///
/// Concatenating [`lines`](Self::lines) reproduces the input byte for byte.
///
/// # Examples
///
/// ```
/// use repo_priority::reorder::ConfigText;
///
/// let text = ConfigText::parse("[core]\r\nInclude = x\nlast");
/// assert_eq!(text.lines(), ["[core]\r\n", "Include = x\n", "last"]);
/// assert_eq!(text.render(), "[core]\r\nInclude = x\nlast");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigText {
    lines: Vec<String>,
}

impl ConfigText {
    /// Split `content` into lines, keeping each line's terminator.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        Self {
            lines: content.split_inclusive('\n').map(String::from).collect(),
        }
    }

    /// All lines in file order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.lines.len()
    }

    /// Return `true` if the file has no lines at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Join the lines back into file content.
    #[must_use]
    pub fn render(&self) -> String {
        self.lines.concat()
    }

    /// Loose existence check: some line mentions `[name]` anywhere.
    #[must_use]
    pub fn mentions_section(&self, name: &str) -> bool {
        self.lines.iter().any(|line| header::mentions(line, name))
    }

    /// Index of the first line that declares section `name`.
    #[must_use]
    pub fn find_header(&self, name: &str) -> Option<usize> {
        self.lines.iter().position(|line| header::declares(line, name))
    }

    /// Return `true` if a `[first]` header appears before the first `[second]`
    /// header.
    ///
    /// The scan stops at the first `[second]` header. A missing `[second]`
    /// yields `false`.
    #[must_use]
    pub fn declares_before(&self, first: &str, second: &str) -> bool {
        let mut seen_first = false;
        for line in &self.lines {
            if header::declares(line, first) {
                seen_first = true;
            }
            if header::declares(line, second) {
                return seen_first;
            }
        }
        false
    }

    /// Locate the block of section `name`: its header line plus every line up
    /// to the next section header, enabled or commented out.
    #[must_use]
    pub fn locate(&self, name: &str) -> Option<SectionBlock> {
        let start = self.find_header(name)?;
        let end = self
            .lines
            .iter()
            .enumerate()
            .skip(start + 1)
            .find(|(_, line)| header::starts_any_section(line))
            .map_or(self.lines.len(), |(idx, _)| idx);
        Some(SectionBlock {
            name: name.to_string(),
            start,
            end,
        })
    }

    /// The lines covered by `block`, or an empty slice if the block does not
    /// belong to this text.
    #[must_use]
    pub fn block_lines(&self, block: &SectionBlock) -> &[String] {
        self.lines.get(block.range()).unwrap_or_default()
    }
}

impl From<Vec<String>> for ConfigText {
    fn from(lines: Vec<String>) -> Self {
        Self { lines }
    }
}

/// Position of one named section inside a [`ConfigText`].
///
/// Blocks are cheap and transient; recompute them whenever the text changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionBlock {
    name: String,
    start: usize,
    end: usize,
}

impl SectionBlock {
    /// Section name without brackets.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Index of the header line.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Index one past the last line of the block.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Half-open line range of the block.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Return `true` if line `idx` belongs to the block.
    #[must_use]
    pub const fn contains(&self, idx: usize) -> bool {
        idx >= self.start && idx < self.end
    }
}
