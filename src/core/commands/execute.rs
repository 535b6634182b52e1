//! Command execution logic.
//!
//! Contains the `execute_command` function that runs parsed commands
//! against the virtual filesystem and returns results. Handlers never touch
//! session state; everything they want changed travels back in the
//! [`CommandResult`].

use crate::config::{GUIDE_TEXT, contact};
use crate::core::VirtualFs;
use crate::core::path::resolve;
use crate::core::prompt::PromptKind;
use crate::models::FsNode;

use super::{Command, CommandResult, Navigator, PathArg};

/// Execute a parsed command.
///
/// # Arguments
///
/// * `cmd` - The parsed command to execute
/// * `fs` - Virtual filesystem
/// * `current_directory` - Canonical path relative paths resolve against
/// * `navigator` - Side-effect seam for `open`
pub fn execute_command(
    cmd: Command,
    fs: &VirtualFs,
    current_directory: &str,
    navigator: &dyn Navigator,
) -> CommandResult {
    match cmd {
        Command::Ls(path) => execute_ls(path, fs, current_directory),
        Command::Cat(path) => execute_cat(path, fs, current_directory),
        Command::Cd(path) => execute_cd(path, fs, current_directory),
        Command::Open(path) => execute_open(path, fs, current_directory, navigator),
        Command::Guide => CommandResult::output(GUIDE_TEXT),
        Command::Help => CommandResult::output("Command not found: help. Did you mean 'guide'?"),
        Command::Clear => CommandResult::clear(),
        Command::Contact => {
            CommandResult::prompt(PromptKind::Contact, Some(contact::INTRO.to_string()))
        }
        Command::Unknown(name) => CommandResult::output(format!("command not found: {}", name)),
    }
}

/// Execute `ls` command.
fn execute_ls(path: Option<PathArg>, fs: &VirtualFs, current_directory: &str) -> CommandResult {
    let target = path
        .as_ref()
        .map(PathArg::as_str)
        .filter(|p| !p.is_empty())
        .unwrap_or(".");

    match fs.list_dir(&resolve(target, current_directory)) {
        Some(names) => CommandResult::output(names.join("  ")),
        None => CommandResult::output(format!(
            "ls: cannot access '{}': No such file or directory",
            target
        )),
    }
}

/// Execute `cat` command.
fn execute_cat(path: Option<PathArg>, fs: &VirtualFs, current_directory: &str) -> CommandResult {
    let Some(path) = path else {
        return CommandResult::output("cat: missing operand");
    };

    match fs.get_entry(&resolve(path.as_str(), current_directory)) {
        None => CommandResult::output(format!("cat: '{}': No such file or directory", path)),
        Some(FsNode::Directory { .. }) => {
            CommandResult::output(format!("cat: '{}': Is a directory", path))
        }
        Some(FsNode::File {
            external_url: Some(_),
            content: None,
        }) => CommandResult::output(format!(
            "Content for '{}' is external.\nHint: Try 'open {}'",
            path, path
        )),
        Some(FsNode::File { content, .. }) => {
            CommandResult::output(content.clone().unwrap_or_default())
        }
    }
}

/// Execute `cd` command.
fn execute_cd(path: Option<PathArg>, fs: &VirtualFs, current_directory: &str) -> CommandResult {
    let Some(path) = path else {
        return CommandResult::change_directory(crate::core::path::ROOT);
    };

    let resolved = resolve(path.as_str(), current_directory);
    match fs.get_entry(&resolved) {
        Some(FsNode::Directory { .. }) => CommandResult::change_directory(resolved),
        _ => CommandResult::output(format!("cd: '{}': No such file or directory", path)),
    }
}

/// Execute `open` command.
///
/// The only handler with a side effect outside the shell: it asks the
/// navigator to show the file's external reference.
fn execute_open(
    path: Option<PathArg>,
    fs: &VirtualFs,
    current_directory: &str,
    navigator: &dyn Navigator,
) -> CommandResult {
    let Some(path) = path else {
        return CommandResult::output("open: missing operand");
    };

    let url = match fs.get_entry(&resolve(path.as_str(), current_directory)) {
        None => {
            return CommandResult::output(format!(
                "open: '{}': No such file or directory",
                path
            ));
        }
        Some(FsNode::Directory { .. }) => {
            return CommandResult::output(format!("open: '{}': Is a directory", path));
        }
        Some(node) => match node.external_url() {
            Some(url) => url,
            None => {
                return CommandResult::output(format!(
                    "open: '{}' does not have a URL to open",
                    path
                ));
            }
        },
    };

    match navigator.open(url) {
        Ok(()) => CommandResult::output(format!("Opening {}...", url)),
        Err(e) => {
            #[cfg(target_arch = "wasm32")]
            web_sys::console::warn_1(&format!("open '{}' failed: {}", url, e).into());
            CommandResult::output(format!("Failed to open {}: {}", url, e))
        }
    }
}
