//! Core business logic for the terminal application.
//!
//! This module provides:
//! - [`ShellEngine`] driving a session from key events to surface writes
//! - [`commands`] parsing and execution against the [`VirtualFs`]
//! - [`path`] resolution and the [`scheduler`] that paces output
//! - [`prompt`] for multi-turn dialogs such as `contact`

pub mod commands;
pub mod engine;
pub mod error;
mod filesystem;
pub mod path;
pub mod prompt;
pub mod scheduler;

pub use commands::{Command, CommandResult, Navigator, dispatch};
pub use engine::{Effect, ShellEngine, ShellSession, Submission, Surface};
pub use filesystem::VirtualFs;
