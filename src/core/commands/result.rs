//! Command execution result type.

use crate::core::prompt::PromptKind;

/// Result of executing a command.
///
/// `output` is revealed first; the other fields are applied by the engine
/// only after the reveal has finished.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandResult {
    /// Text to reveal
    pub output: Option<String>,
    /// Directory to switch to (e.g., for `cd`)
    pub new_directory: Option<String>,
    /// Wipe the screen (for `clear`)
    pub clear_screen: bool,
    /// Interactive dialog to start
    pub start_prompt: Option<PromptKind>,
}

impl CommandResult {
    /// Create a result with just output.
    pub fn output(text: impl Into<String>) -> Self {
        Self {
            output: Some(text.into()),
            ..Default::default()
        }
    }

    /// Create a result that changes the current directory.
    pub fn change_directory(path: impl Into<String>) -> Self {
        Self {
            new_directory: Some(path.into()),
            ..Default::default()
        }
    }

    /// Create a result that clears the screen.
    pub fn clear() -> Self {
        Self {
            clear_screen: true,
            ..Default::default()
        }
    }

    /// Create a result that starts a dialog after optional introductory text.
    pub fn prompt(kind: PromptKind, intro: Option<String>) -> Self {
        Self {
            output: intro,
            start_prompt: Some(kind),
            ..Default::default()
        }
    }

    /// Output text, treating an empty string as no output.
    pub fn visible_output(&self) -> Option<&str> {
        self.output.as_deref().filter(|s| !s.is_empty())
    }
}
