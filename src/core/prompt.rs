//! Multi-turn interactive dialogs.
//!
//! A dialog asks its questions one line at a time. Each submitted line is
//! stored verbatim; once the last answer arrives the machine hands out a
//! [`Completion`] exactly once and waits until the engine reports that the
//! asynchronous completion step has resolved.

use std::collections::BTreeMap;

use crate::config::contact;
use crate::core::error::PromptError;
use crate::models::ContactForm;

/// Dialogs that a command can start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptKind {
    /// Collect an email address and a message, then submit them.
    Contact,
}

impl PromptKind {
    pub fn questions(self) -> Vec<String> {
        match self {
            Self::Contact => vec![
                contact::EMAIL_QUESTION.to_string(),
                contact::MESSAGE_QUESTION.to_string(),
            ],
        }
    }

    /// Build the completion request from a full set of answers.
    fn complete(self, mut answers: BTreeMap<usize, String>) -> Completion {
        match self {
            Self::Contact => Completion::Contact(ContactForm {
                email: answers.remove(&0).unwrap_or_default(),
                message: answers.remove(&1).unwrap_or_default(),
            }),
        }
    }
}

/// What to do with a finished dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Completion {
    Contact(ContactForm),
}

/// State of a running dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivePrompt {
    pub kind: PromptKind,
    pub questions: Vec<String>,
    /// Index of the question being answered; equals `questions.len()` while
    /// the completion step is in flight.
    pub current_index: usize,
    pub answers: BTreeMap<usize, String>,
}

impl ActivePrompt {
    fn awaiting_completion(&self) -> bool {
        self.current_index >= self.questions.len()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PromptState {
    #[default]
    Inactive,
    Active(ActivePrompt),
}

/// Result of feeding one line to the machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Show this question next.
    Next(String),
    /// All questions answered; run the completion.
    Complete(Completion),
    /// Nothing to do (inactive, or already completing).
    Ignored,
}

#[derive(Clone, Debug, Default)]
pub struct PromptStateMachine {
    state: PromptState,
}

impl PromptStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PromptState {
        &self.state
    }

    /// Whether a dialog owns the input line (including while completing).
    pub fn is_active(&self) -> bool {
        matches!(self.state, PromptState::Active(_))
    }

    /// Whether the answers were handed out and the outcome is pending.
    pub fn is_awaiting_completion(&self) -> bool {
        matches!(&self.state, PromptState::Active(p) if p.awaiting_completion())
    }

    /// Start a dialog and return its first question.
    pub fn start(&mut self, kind: PromptKind) -> Result<String, PromptError> {
        if self.is_active() {
            return Err(PromptError::AlreadyActive);
        }
        let questions = kind.questions();
        let first = questions.first().cloned().unwrap_or_default();
        self.state = PromptState::Active(ActivePrompt {
            kind,
            questions,
            current_index: 0,
            answers: BTreeMap::new(),
        });
        Ok(first)
    }

    /// Record `input` as the answer to the current question.
    pub fn submit(&mut self, input: &str) -> Advance {
        let PromptState::Active(prompt) = &mut self.state else {
            return Advance::Ignored;
        };
        if prompt.awaiting_completion() {
            return Advance::Ignored;
        }

        prompt.answers.insert(prompt.current_index, input.to_string());
        prompt.current_index += 1;

        match prompt.questions.get(prompt.current_index) {
            Some(next) => Advance::Next(next.clone()),
            None => Advance::Complete(prompt.kind.complete(prompt.answers.clone())),
        }
    }

    /// The completion step resolved; return to normal entry.
    pub fn resolve(&mut self) {
        self.state = PromptState::Inactive;
    }

    /// Discard the dialog and its answers. Returns whether one was running.
    pub fn interrupt(&mut self) -> bool {
        let was_active = self.is_active();
        self.state = PromptState::Inactive;
        was_active
    }
}
