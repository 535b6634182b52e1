//! Command parsing and execution.
//!
//! This module provides:
//! - `Command` enum for parsed terminal commands
//! - `CommandResult` for command execution results
//! - `dispatch` for running a raw input line
//!
//! # Architecture
//!
//! Input is split on single spaces into a name and positional arguments,
//! parsed into the `Command` enum, then executed via `execute_command`.
//! Shortcut commands (`about`, `resume`, ...) are resolved to their canonical
//! variant with a fixed path during parsing, so execution never re-enters
//! another command.

mod execute;
mod result;

pub use execute::execute_command;
pub use result::CommandResult;

use std::fmt;

use crate::config::alias_paths;
use crate::core::VirtualFs;
use crate::core::error::NavigationError;

// =============================================================================
// Path Argument Type
// =============================================================================

/// A path argument passed to a command (e.g., `cd foo`, `cat bar.md`).
///
/// Stored as typed; resolution and existence checks happen during execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathArg(String);

impl PathArg {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PathArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for PathArg {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// =============================================================================
// Navigation Seam
// =============================================================================

/// Opens external references on behalf of `open`.
///
/// The browser implementation lives in [`crate::utils::dom`]; tests use a
/// recording fake.
pub trait Navigator {
    fn open(&self, url: &str) -> Result<(), NavigationError>;
}

// =============================================================================
// Command Enum
// =============================================================================

/// Parsed terminal command
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// List a directory (current directory when `None`)
    Ls(Option<PathArg>),
    Cat(Option<PathArg>),
    /// Change directory (root when `None`)
    Cd(Option<PathArg>),
    Open(Option<PathArg>),
    Guide,
    Help,
    Clear,
    Contact,
    Unknown(String),
}

impl Command {
    /// Parse command from name and arguments.
    ///
    /// Names are case-sensitive. Extra arguments are ignored.
    pub fn parse(name: &str, args: &[&str]) -> Self {
        let first = || args.first().map(|a| PathArg::new(*a));
        let fixed = |path: &str| Some(PathArg::new(path));

        match name {
            "ls" => Self::Ls(first()),
            "cat" => Self::Cat(first()),
            "cd" => Self::Cd(first()),
            "open" => Self::Open(first()),
            "guide" => Self::Guide,
            "help" => Self::Help,
            "clear" => Self::Clear,
            "contact" => Self::Contact,
            // Shortcuts
            "welcome" => Self::Cat(fixed(alias_paths::WELCOME)),
            "about" => Self::Cat(fixed(alias_paths::ABOUT)),
            "experience" => Self::Cat(fixed(alias_paths::EXPERIENCE)),
            "education" => Self::Cat(fixed(alias_paths::EDUCATION)),
            "certificates" => Self::Cat(fixed(alias_paths::CERTIFICATES)),
            "social" => Self::Cat(fixed(alias_paths::SOCIALS)),
            "projects" => Self::Ls(fixed(alias_paths::PROJECTS)),
            "resume" => Self::Open(fixed(alias_paths::RESUME)),
            _ => Self::Unknown(name.to_string()),
        }
    }

    /// Split a trimmed input line into a command.
    ///
    /// Splitting is on single spaces with no quoting, so `ls  x` passes an
    /// empty first argument.
    pub fn from_line(line: &str) -> Self {
        let mut parts = line.trim().split(' ');
        let name = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();
        Self::parse(name, &args)
    }
}

/// Parse and execute one input line.
pub fn dispatch(
    line: &str,
    fs: &VirtualFs,
    current_directory: &str,
    navigator: &dyn Navigator,
) -> CommandResult {
    execute_command(Command::from_line(line), fs, current_directory, navigator)
}

// =============================================================================
// Tests
// =============================================================================
