//! The shell engine.
//!
//! [`ShellEngine`] owns the session and turns key events into surface writes.
//! It is fully synchronous: anything that has to wait is reported back to the
//! host as an [`Effect`], and the host calls [`ShellEngine::tick`] or
//! [`ShellEngine::finish_submission`] when the wait is over.
//!
//! # States
//!
//! - **Ready**: keys edit the input buffer, Enter dispatches a command
//! - **Writing**: a reveal is in flight; keys are discarded except Ctrl+C,
//!   which is deferred until the reveal ends
//! - **PromptActive**: a dialog owns the line; Enter answers the question
//!
//! Output of a command is always revealed in full before its directory
//! change, screen wipe or dialog start is applied.

use crate::config::{INTERRUPT_MARKER, TYPE_SPEED_MS, contact, directory_prompt};
use crate::core::VirtualFs;
use crate::core::commands::{CommandResult, Navigator, dispatch};
use crate::core::error::FetchError;
use crate::core::path::ROOT;
use crate::core::prompt::{Advance, Completion, PromptKind, PromptStateMachine};
use crate::core::scheduler::{OutputScheduler, Tick, Write};
use crate::models::{ContactForm, KeyAction, KeyEvent};

/// Erase one character cell to the left of the cursor.
const ERASE_SEQUENCE: &str = "\x08 \x08";

/// Display surface the engine writes to.
pub trait Surface {
    /// Write text at the cursor. `\r`, `\n` and `\x08` are control characters.
    fn write(&mut self, text: &str);
    /// Wipe everything, leaving the cursor at the top-left.
    fn clear(&mut self);
    /// Adapt to a new container size.
    fn fit(&mut self) {}
}

/// Work the host has to carry out after an engine call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    /// A reveal started; call [`ShellEngine::tick`] until it returns `None`.
    Reveal,
    /// Send the form, then report back via [`ShellEngine::finish_submission`].
    Submit(Submission),
}

/// A contact form waiting to be sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    /// Identifies the dialog; outcomes for an interrupted dialog are dropped.
    pub ticket: u64,
    pub form: ContactForm,
}

/// Deferred effects applied once a reveal has finished.
#[derive(Debug)]
enum AfterReveal {
    /// Draw the normal prompt.
    Prompt,
    /// Apply the non-output parts of a command result.
    Apply {
        new_directory: Option<String>,
        clear_screen: bool,
        start_prompt: Option<PromptKind>,
    },
}

/// Mutable state of one shell session.
#[derive(Debug)]
pub struct ShellSession {
    /// Canonical path of the working directory
    pub current_directory: String,
    /// Characters typed on the current line
    pub input_buffer: String,
    /// Submitted lines, most recent first
    pub history: Vec<String>,
    /// Selected history entry, `None` when editing a fresh line
    pub history_cursor: Option<usize>,
    pub prompt: PromptStateMachine,
}

impl ShellSession {
    pub fn new() -> Self {
        Self {
            current_directory: ROOT.to_string(),
            input_buffer: String::new(),
            history: Vec::new(),
            history_cursor: None,
            prompt: PromptStateMachine::new(),
        }
    }
}

impl Default for ShellSession {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ShellEngine<S, N> {
    surface: S,
    navigator: N,
    fs: VirtualFs,
    session: ShellSession,
    scheduler: OutputScheduler<AfterReveal>,
    /// Ctrl+C arrived during a reveal
    pending_interrupt: bool,
    submission_ticket: u64,
}

impl<S: Surface, N: Navigator> ShellEngine<S, N> {
    pub fn new(surface: S, navigator: N, fs: VirtualFs) -> Self {
        Self {
            surface,
            navigator,
            fs,
            session: ShellSession::new(),
            scheduler: OutputScheduler::new(TYPE_SPEED_MS),
            pending_interrupt: false,
            submission_ticket: 0,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn session(&self) -> &ShellSession {
        &self.session
    }

    pub fn current_directory(&self) -> &str {
        &self.session.current_directory
    }

    /// True while a reveal is in flight.
    pub fn is_writing(&self) -> bool {
        self.scheduler.is_writing()
    }

    /// The text at the start of the current input line.
    pub fn prompt_prefix(&self) -> String {
        if self.session.prompt.is_awaiting_completion() {
            return contact::SENDING_STATUS.to_string();
        }
        match self.session.prompt.state() {
            crate::core::prompt::PromptState::Active(p) => p
                .questions
                .get(p.current_index)
                .cloned()
                .unwrap_or_default(),
            crate::core::prompt::PromptState::Inactive => {
                directory_prompt(&self.session.current_directory)
            }
        }
    }

    // =========================================================================
    // Host Entry Points
    // =========================================================================

    /// Show the welcome text, then the first prompt.
    pub fn mount(&mut self) -> Effect {
        let welcome = dispatch(
            "welcome",
            &self.fs,
            &self.session.current_directory,
            &self.navigator,
        );
        match welcome.visible_output() {
            Some(text) => {
                let text = text.to_string();
                self.reveal(&text, AfterReveal::Prompt)
            }
            None => {
                self.draw_prompt();
                Effect::None
            }
        }
    }

    /// The host container changed size.
    pub fn resize(&mut self) {
        self.surface.fit();
    }

    /// The host surface is going away; drop any pending reveal.
    pub fn detach(&mut self) {
        self.scheduler.cancel();
        self.pending_interrupt = false;
    }

    /// Handle one keystroke.
    pub fn on_key(&mut self, event: &KeyEvent) -> Effect {
        let action = event.action();

        if self.is_writing() {
            if action == KeyAction::Interrupt {
                self.pending_interrupt = true;
            }
            return Effect::None;
        }

        if self.session.prompt.is_awaiting_completion() {
            if action == KeyAction::Interrupt {
                self.interrupt();
            }
            return Effect::None;
        }

        match action {
            KeyAction::Insert(ch) => {
                self.session.input_buffer.push(ch);
                self.write_char(ch);
            }
            KeyAction::Submit => return self.submit_line(),
            KeyAction::Erase => {
                // An empty buffer means the cursor sits right after the prefix
                if self.session.input_buffer.pop().is_some() {
                    self.surface.write(ERASE_SEQUENCE);
                }
            }
            KeyAction::HistoryPrevious if !self.session.prompt.is_active() => {
                self.history_previous();
            }
            KeyAction::HistoryNext if !self.session.prompt.is_active() => {
                self.history_next();
            }
            KeyAction::Interrupt => self.interrupt(),
            KeyAction::HistoryPrevious | KeyAction::HistoryNext | KeyAction::Ignored => {}
        }
        Effect::None
    }

    /// Reveal the next character.
    ///
    /// Returns the delay before the next call, or `None` once the reveal (and
    /// its deferred effects) are done.
    pub fn tick(&mut self) -> Option<u32> {
        match self.scheduler.tick()? {
            Tick::Reveal { ch, delay_ms } => {
                self.write_char(ch);
                Some(delay_ms)
            }
            Tick::Finished { ch, completion } => {
                self.write_char(ch);
                self.after_reveal(completion);
                self.is_writing().then_some(0)
            }
        }
    }

    /// Report the outcome of a [`Submission`].
    pub fn finish_submission(&mut self, ticket: u64, outcome: Result<(), FetchError>) -> Effect {
        if ticket != self.submission_ticket || !self.session.prompt.is_awaiting_completion() {
            #[cfg(target_arch = "wasm32")]
            web_sys::console::log_1(&format!("dropping stale submission #{}", ticket).into());
            return Effect::None;
        }

        self.session.prompt.resolve();
        let status = match outcome {
            Ok(()) => contact::SENT.to_string(),
            Err(e) => {
                #[cfg(target_arch = "wasm32")]
                web_sys::console::error_1(&format!("contact submission failed: {}", e).into());
                format!("{}: {}", contact::FAILED, e)
            }
        };

        self.surface.write("\r\n");
        self.reveal(&status, AfterReveal::Prompt)
    }

    // =========================================================================
    // Line Handling
    // =========================================================================

    fn submit_line(&mut self) -> Effect {
        self.surface.write("\r\n");
        let line = std::mem::take(&mut self.session.input_buffer);
        self.session.history_cursor = None;

        if self.session.prompt.is_active() {
            return self.answer_prompt(&line);
        }

        if line.trim().is_empty() {
            self.draw_prompt();
            return Effect::None;
        }

        let result = dispatch(
            &line,
            &self.fs,
            &self.session.current_directory,
            &self.navigator,
        );
        self.session.history.insert(0, line);
        self.present(result)
    }

    fn answer_prompt(&mut self, line: &str) -> Effect {
        match self.session.prompt.submit(line) {
            Advance::Next(question) => {
                self.draw_prefix(&question);
                Effect::None
            }
            Advance::Complete(Completion::Contact(form)) => {
                self.submission_ticket += 1;
                self.draw_prefix(contact::SENDING_STATUS);
                Effect::Submit(Submission {
                    ticket: self.submission_ticket,
                    form,
                })
            }
            Advance::Ignored => {
                self.draw_prompt();
                Effect::None
            }
        }
    }

    fn interrupt(&mut self) {
        self.surface.write(INTERRUPT_MARKER);
        self.session.input_buffer.clear();
        self.session.history_cursor = None;
        self.session.prompt.interrupt();
        self.draw_prompt();
    }

    fn history_previous(&mut self) {
        let next = self.session.history_cursor.map_or(0, |i| i + 1);
        let Some(entry) = self.session.history.get(next).cloned() else {
            return;
        };
        self.session.history_cursor = Some(next);
        self.replace_line(entry);
    }

    fn history_next(&mut self) {
        match self.session.history_cursor {
            None => {}
            Some(0) => {
                self.session.history_cursor = None;
                self.replace_line(String::new());
            }
            Some(i) => {
                self.session.history_cursor = Some(i - 1);
                let entry = self.session.history[i - 1].clone();
                self.replace_line(entry);
            }
        }
    }

    /// Erase the visible buffer and show `line` in its place.
    fn replace_line(&mut self, line: String) {
        let typed = self.session.input_buffer.chars().count();
        self.surface.write(&ERASE_SEQUENCE.repeat(typed));
        self.surface.write(&line);
        self.session.input_buffer = line;
    }

    // =========================================================================
    // Output
    // =========================================================================

    fn present(&mut self, result: CommandResult) -> Effect {
        let after = AfterReveal::Apply {
            new_directory: result.new_directory,
            clear_screen: result.clear_screen,
            start_prompt: result.start_prompt,
        };
        match result.output.filter(|s| !s.is_empty()) {
            Some(text) => self.reveal(&text, after),
            None => {
                self.after_reveal(after);
                Effect::None
            }
        }
    }

    fn reveal(&mut self, text: &str, after: AfterReveal) -> Effect {
        match self.scheduler.write(text, after) {
            Write::Started => Effect::Reveal,
            Write::Completed(after) => {
                self.after_reveal(after);
                Effect::None
            }
        }
    }

    fn after_reveal(&mut self, after: AfterReveal) {
        let interrupted = std::mem::take(&mut self.pending_interrupt);
        let mut cleared = false;
        let mut start_prompt = None;

        if let AfterReveal::Apply {
            new_directory,
            clear_screen,
            start_prompt: requested,
        } = after
        {
            if let Some(dir) = new_directory {
                self.session.current_directory = dir;
            }
            if clear_screen {
                self.surface.clear();
                cleared = true;
            }
            start_prompt = requested;
        }

        if interrupted {
            self.interrupt();
            return;
        }

        if let Some(kind) = start_prompt {
            match self.session.prompt.start(kind) {
                Ok(question) => {
                    self.draw_prefix(&question);
                    return;
                }
                Err(_e) => {
                    #[cfg(target_arch = "wasm32")]
                    web_sys::console::warn_1(&format!("cannot start prompt: {}", _e).into());
                }
            }
        }

        if cleared {
            // The wiped screen starts with the prompt, no blank line above it
            let prompt = self.prompt_prefix();
            self.surface.write(&prompt);
        } else {
            self.draw_prompt();
        }
    }

    fn draw_prompt(&mut self) {
        let prompt = directory_prompt(&self.session.current_directory);
        self.draw_prefix(&prompt);
    }

    fn draw_prefix(&mut self, prefix: &str) {
        self.surface.write("\r\n");
        self.surface.write(prefix);
    }

    fn write_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.surface.write(ch.encode_utf8(&mut buf));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::NavigationError;

    #[derive(Default)]
    struct Transcript {
        text: String,
        clears: usize,
        fits: usize,
    }

    impl Surface for Transcript {
        fn write(&mut self, text: &str) {
            self.text.push_str(text);
        }

        fn clear(&mut self) {
            self.text.clear();
            self.clears += 1;
        }

        fn fit(&mut self) {
            self.fits += 1;
        }
    }

    struct NoNavigation;

    impl Navigator for NoNavigation {
        fn open(&self, _url: &str) -> Result<(), NavigationError> {
            Ok(())
        }
    }

    type Engine = ShellEngine<Transcript, NoNavigation>;

    fn engine() -> Engine {
        ShellEngine::new(
            Transcript::default(),
            NoNavigation,
            VirtualFs::builtin().unwrap(),
        )
    }

    fn run_reveal(engine: &mut Engine) {
        while engine.tick().is_some() {}
    }

    fn type_str(engine: &mut Engine, text: &str) {
        for ch in text.chars() {
            assert_eq!(engine.on_key(&KeyEvent::plain(ch.to_string())), Effect::None);
        }
    }

    fn enter(engine: &mut Engine) -> Effect {
        let effect = engine.on_key(&KeyEvent::plain("Enter"));
        if effect == Effect::Reveal {
            run_reveal(engine);
        }
        effect
    }

    fn run_line(engine: &mut Engine, line: &str) -> Effect {
        type_str(engine, line);
        enter(engine)
    }

    fn take_text(engine: &mut Engine) -> String {
        std::mem::take(&mut engine.surface.text)
    }

    #[test]
    fn test_mount_reveals_welcome_then_prompt() {
        let mut engine = engine();
        assert_eq!(engine.mount(), Effect::Reveal);
        assert!(engine.is_writing());
        run_reveal(&mut engine);
        assert!(!engine.is_writing());

        let text = take_text(&mut engine);
        assert!(text.contains("Welcome to my terminal portfolio!"));
        assert!(text.ends_with("\r\nguest@portfolio:~$ "));
    }

    #[test]
    fn test_typing_echoes_and_buffers() {
        let mut engine = engine();
        type_str(&mut engine, "ls");
        assert_eq!(engine.session().input_buffer, "ls");
        assert_eq!(take_text(&mut engine), "ls");
    }

    #[test]
    fn test_erase_stops_at_prefix() {
        let mut engine = engine();
        type_str(&mut engine, "a");
        engine.on_key(&KeyEvent::plain("Backspace"));
        engine.on_key(&KeyEvent::plain("Backspace"));
        assert_eq!(engine.session().input_buffer, "");
        assert_eq!(take_text(&mut engine), "a\x08 \x08");
    }

    #[test]
    fn test_empty_line_redraws_prompt_without_history() {
        let mut engine = engine();
        type_str(&mut engine, "   ");
        assert_eq!(enter(&mut engine), Effect::None);
        assert!(engine.session().history.is_empty());
        assert_eq!(take_text(&mut engine), "   \r\n\r\nguest@portfolio:~$ ");
    }

    #[test]
    fn test_command_output_then_prompt() {
        let mut engine = engine();
        assert_eq!(run_line(&mut engine, "cat nope"), Effect::Reveal);
        assert_eq!(
            take_text(&mut engine),
            "cat nope\r\ncat: 'nope': No such file or directory\r\nguest@portfolio:~$ "
        );
    }

    #[test]
    fn test_keys_are_suppressed_while_writing() {
        let mut engine = engine();
        type_str(&mut engine, "guide");
        assert_eq!(engine.on_key(&KeyEvent::plain("Enter")), Effect::Reveal);

        engine.tick();
        assert_eq!(engine.on_key(&KeyEvent::plain("§")), Effect::None);
        assert_eq!(engine.on_key(&KeyEvent::plain("Enter")), Effect::None);
        assert_eq!(engine.session().input_buffer, "");
        assert_eq!(engine.session().history.len(), 1);

        run_reveal(&mut engine);
        assert!(!take_text(&mut engine).contains('§'));
    }

    #[test]
    fn test_directory_change_applies_after_reveal() {
        let mut engine = engine();
        assert_eq!(run_line(&mut engine, "cd projects"), Effect::None);
        assert_eq!(engine.current_directory(), "~/projects");
        assert!(take_text(&mut engine).ends_with("\r\nguest@portfolio:~/projects$ "));
    }

    #[test]
    fn test_history_navigation() {
        let mut engine = engine();
        run_line(&mut engine, "ls");
        run_line(&mut engine, "cd projects");
        assert_eq!(engine.session().history, vec!["cd projects", "ls"]);
        take_text(&mut engine);

        let up = KeyEvent::plain("ArrowUp");
        let down = KeyEvent::plain("ArrowDown");

        engine.on_key(&up);
        assert_eq!(engine.session().input_buffer, "cd projects");
        engine.on_key(&up);
        assert_eq!(engine.session().input_buffer, "ls");
        // Clamped at the oldest entry
        engine.on_key(&up);
        assert_eq!(engine.session().input_buffer, "ls");
        assert_eq!(engine.session().history_cursor, Some(1));

        engine.on_key(&down);
        assert_eq!(engine.session().input_buffer, "cd projects");
        engine.on_key(&down);
        assert_eq!(engine.session().input_buffer, "");
        assert_eq!(engine.session().history_cursor, None);
        engine.on_key(&down);
        assert_eq!(engine.session().history_cursor, None);

        // Navigating never adds entries
        assert_eq!(engine.session().history.len(), 2);
    }

    #[test]
    fn test_history_previous_on_empty_history() {
        let mut engine = engine();
        engine.on_key(&KeyEvent::plain("ArrowUp"));
        assert_eq!(engine.session().history_cursor, None);
        assert_eq!(take_text(&mut engine), "");
    }

    #[test]
    fn test_history_keeps_line_as_typed() {
        let mut engine = engine();
        run_line(&mut engine, " ls ");
        assert_eq!(engine.session().history, vec![" ls "]);
    }

    #[test]
    fn test_interrupt_resets_line() {
        let mut engine = engine();
        run_line(&mut engine, "ls");
        take_text(&mut engine);
        engine.on_key(&KeyEvent::plain("ArrowUp"));
        type_str(&mut engine, "x");

        engine.on_key(&KeyEvent::ctrl("c"));
        assert_eq!(engine.session().input_buffer, "");
        assert_eq!(engine.session().history_cursor, None);
        assert!(take_text(&mut engine).ends_with("^C\r\nguest@portfolio:~$ "));
    }

    #[test]
    fn test_clear_wipes_and_starts_with_prompt() {
        let mut engine = engine();
        run_line(&mut engine, "ls");
        assert_eq!(run_line(&mut engine, "clear"), Effect::None);
        assert_eq!(engine.surface().clears, 1);
        assert_eq!(engine.surface().text, "guest@portfolio:~$ ");
    }

    #[test]
    fn test_resize_fits_surface() {
        let mut engine = engine();
        engine.resize();
        assert_eq!(engine.surface().fits, 1);
    }

    fn start_contact(engine: &mut Engine) {
        assert_eq!(run_line(engine, "contact"), Effect::Reveal);
        assert!(engine.session().prompt.is_active());
        assert!(take_text(engine).ends_with("\r\nemail: "));
    }

    #[test]
    fn test_contact_dialog_submits_answers() {
        let mut engine = engine();
        start_contact(&mut engine);

        assert_eq!(run_line(&mut engine, "me@example.com"), Effect::None);
        assert!(take_text(&mut engine).ends_with("\r\nmessage: "));

        let effect = run_line(&mut engine, "hello  there ");
        let Effect::Submit(submission) = effect else {
            panic!("expected a submission, got {:?}", effect);
        };
        assert_eq!(submission.form.email, "me@example.com");
        assert_eq!(submission.form.message, "hello  there ");
        assert_eq!(engine.prompt_prefix(), contact::SENDING_STATUS);

        // Typing is ignored while sending
        type_str(&mut engine, "zz");
        assert_eq!(engine.session().input_buffer, "");

        let effect = engine.finish_submission(submission.ticket, Ok(()));
        assert_eq!(effect, Effect::Reveal);
        run_reveal(&mut engine);
        assert!(!engine.session().prompt.is_active());
        let text = take_text(&mut engine);
        assert!(text.contains(contact::SENT));
        assert!(text.ends_with("\r\nguest@portfolio:~$ "));
        // Answers never enter the command history
        assert_eq!(engine.session().history, vec!["contact"]);
    }

    #[test]
    fn test_contact_failure_returns_to_prompt() {
        let mut engine = engine();
        start_contact(&mut engine);
        run_line(&mut engine, "me@example.com");
        let Effect::Submit(submission) = run_line(&mut engine, "hi") else {
            panic!("expected a submission");
        };

        let effect = engine.finish_submission(submission.ticket, Err(FetchError::HttpError(500)));
        assert_eq!(effect, Effect::Reveal);
        run_reveal(&mut engine);
        let text = take_text(&mut engine);
        assert!(text.contains("Failed to send message: HTTP error: 500"));
        assert!(!engine.session().prompt.is_active());
    }

    #[test]
    fn test_history_keys_ignored_in_prompt() {
        let mut engine = engine();
        start_contact(&mut engine);
        engine.on_key(&KeyEvent::plain("ArrowUp"));
        assert_eq!(engine.session().input_buffer, "");
        assert_eq!(engine.session().history_cursor, None);
    }

    #[test]
    fn test_interrupt_cancels_prompt() {
        let mut engine = engine();
        start_contact(&mut engine);
        type_str(&mut engine, "half");
        engine.on_key(&KeyEvent::ctrl("c"));
        assert!(!engine.session().prompt.is_active());
        assert!(take_text(&mut engine).ends_with("^C\r\nguest@portfolio:~$ "));
    }

    #[test]
    fn test_stale_submission_is_dropped() {
        let mut engine = engine();
        start_contact(&mut engine);
        run_line(&mut engine, "me@example.com");
        let Effect::Submit(submission) = run_line(&mut engine, "hi") else {
            panic!("expected a submission");
        };

        engine.on_key(&KeyEvent::ctrl("c"));
        take_text(&mut engine);
        assert_eq!(engine.finish_submission(submission.ticket, Ok(())), Effect::None);
        assert_eq!(take_text(&mut engine), "");
    }

    #[test]
    fn test_interrupt_during_reveal_is_deferred() {
        let mut engine = engine();
        type_str(&mut engine, "contact");
        assert_eq!(engine.on_key(&KeyEvent::plain("Enter")), Effect::Reveal);
        engine.tick();
        engine.on_key(&KeyEvent::ctrl("c"));
        // The reveal keeps going
        assert!(engine.is_writing());
        run_reveal(&mut engine);

        assert!(!engine.session().prompt.is_active());
        let text = take_text(&mut engine);
        assert!(text.contains("Leave me a message"));
        assert!(text.ends_with("^C\r\nguest@portfolio:~$ "));
        assert!(!text.contains("email: "));
    }
}
