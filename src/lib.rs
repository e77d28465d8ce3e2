//! Keeps one pacman repository ahead of another.
//!
//! Antergos packages override Arch ones, so `[antergos]` must be listed
//! before `[core]` in `/etc/pacman.conf`. This crate detects the wrong order
//! and writes a corrected copy to `pacman.conf.pacnew` for the user to review,
//! then notifies them.
//!
//! - **[`reorder`]**: line-preserving section detection and relocation
//! - **[`resources`]**: the check + apply resource wrapping the reorder
//! - **[`commands`]**: the run orchestration
//! - **[`notify`]**: notice banner and desktop notifier
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod notify;
pub mod reorder;
pub mod resources;
