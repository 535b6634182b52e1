//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.
//! Text assets are loaded at compile time using `include_str!`.

// =============================================================================
// Text Assets (loaded at compile time)
// =============================================================================

/// Static filesystem definition (TOML).
pub const FILESYSTEM_DEFINITION: &str = include_str!("../assets/filesystem.toml");

/// Help text for the `guide` command.
pub const GUIDE_TEXT: &str = include_str!("../assets/text/guide.txt");

// =============================================================================
// Prompt
// =============================================================================

/// User name shown in the prompt.
pub const PROMPT_USER: &str = "guest";

/// Host name shown in the prompt.
pub const PROMPT_HOST: &str = "portfolio";

/// Build the normal directory prompt, e.g. `guest@portfolio:~/projects$ `.
pub fn directory_prompt(current_directory: &str) -> String {
    format!("{}@{}:{}$ ", PROMPT_USER, PROMPT_HOST, current_directory)
}

/// Marker echoed when the interrupt key is pressed.
pub const INTERRUPT_MARKER: &str = "^C";

// =============================================================================
// Output Animation
// =============================================================================

/// Delay between revealed characters in milliseconds.
pub const TYPE_SPEED_MS: u32 = 10;

// =============================================================================
// Alias Targets
// =============================================================================

/// Fixed paths behind the shortcut commands.
pub mod alias_paths {
    pub const WELCOME: &str = "~/welcome.txt";
    pub const ABOUT: &str = "~/about.md";
    pub const EXPERIENCE: &str = "~/experience.md";
    pub const EDUCATION: &str = "~/education.md";
    pub const CERTIFICATES: &str = "~/certificates.md";
    pub const SOCIALS: &str = "~/socials.txt";
    pub const PROJECTS: &str = "~/projects";
    pub const RESUME: &str = "~/resume.pdf";
}

// =============================================================================
// Contact Dialog
// =============================================================================

/// Contact dialog texts.
pub mod contact {
    /// Shown before the first question.
    pub const INTRO: &str =
        "Leave me a message and I will get back to you.\nPress Ctrl+C at any time to cancel.";
    /// First question (answer is the sender address).
    pub const EMAIL_QUESTION: &str = "email: ";
    /// Second question (answer is the free-text message).
    pub const MESSAGE_QUESTION: &str = "message: ";
    /// Prefix shown while the submission is in flight.
    pub const SENDING_STATUS: &str = "Sending message...";
    /// Revealed after a successful submission.
    pub const SENT: &str = "Message sent. Thanks for reaching out!";
    /// Prefix of the failure message.
    pub const FAILED: &str = "Failed to send message";
}

// =============================================================================
// Network Configuration
// =============================================================================

/// Contact submission endpoint (POST, JSON body).
pub const CONTACT_ENDPOINT: &str = "/.netlify/functions/contact";

/// Fetch request timeout in milliseconds.
pub const FETCH_TIMEOUT_MS: i32 = 10000;

// =============================================================================
// Terminal Configuration
// =============================================================================

/// Maximum number of lines kept on the screen.
pub const MAX_SCROLLBACK_LINES: usize = 1000;
