//! Line predicates for recognising pacman.conf section headers.
//!
//! Two kinds of match exist and must not be mixed up:
//!
//! - [`declares`] is the structural match used for ordering and extraction:
//!   optional leading whitespace, then `[name]`.
//! - [`mentions`] is the loose match used only to decide whether a section
//!   exists at all. It also catches commented-out or inline declarations.
//!
//! [`starts_any_section`] ends a block. A commented-out header such as
//! `#[testing]` counts, because a disabled repository is still a separate
//! block in the file.

/// Return `true` if `line` opens the section `name`, i.e. matches
/// `^\s*\[name\]`.
///
/// Anything may follow the closing bracket.
///
/// # Examples
///
/// ```
/// use repo_priority::reorder::header::declares;
///
/// assert!(declares("[core]\n", "core"));
/// assert!(declares("  [core] # official\n", "core"));
/// assert!(!declares("#[core]\n", "core"));
/// assert!(!declares("[core-testing]\n", "core"));
/// ```
#[must_use]
pub fn declares(line: &str, name: &str) -> bool {
    line.trim_start()
        .strip_prefix('[')
        .and_then(|rest| rest.strip_prefix(name))
        .is_some_and(|rest| rest.starts_with(']'))
}

/// Return `true` if the whitespace-trimmed `line` contains `[name]` anywhere.
///
/// # Examples
///
/// ```
/// use repo_priority::reorder::header::mentions;
///
/// assert!(mentions("#[antergos]\n", "antergos"));
/// assert!(mentions("  [antergos]  \n", "antergos"));
/// assert!(!mentions("Server = https://antergos.example\n", "antergos"));
/// ```
#[must_use]
pub fn mentions(line: &str, name: &str) -> bool {
    line.trim().contains(&token(name))
}

/// Return `true` if `line` looks like the header of any section, enabled or
/// commented out: `^[\s#]*\[\w`.
#[must_use]
pub fn starts_any_section(line: &str) -> bool {
    line.trim_start_matches(|c: char| c.is_whitespace() || c == '#')
        .strip_prefix('[')
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_alphanumeric() || c == '_')
}

/// The bracketed header token for `name`, e.g. `[core]`.
#[must_use]
pub fn token(name: &str) -> String {
    format!("[{name}]")
}
