//! End-to-end sessions driven through the public engine API.

use std::cell::RefCell;
use std::rc::Rc;

use termfolio::core::error::{FetchError, NavigationError};
use termfolio::core::{Effect, Navigator, ShellEngine, Surface, VirtualFs};
use termfolio::models::{KeyEvent, Screen};

#[derive(Clone, Default)]
struct RecordingNavigator {
    opened: Rc<RefCell<Vec<String>>>,
}

impl Navigator for RecordingNavigator {
    fn open(&self, url: &str) -> Result<(), NavigationError> {
        self.opened.borrow_mut().push(url.to_string());
        Ok(())
    }
}

/// Counts wipes on top of a real screen.
#[derive(Default)]
struct CountingScreen {
    screen: Screen,
    clears: usize,
}

impl Surface for CountingScreen {
    fn write(&mut self, text: &str) {
        self.screen.write(text);
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.screen.clear();
    }
}

struct Session {
    engine: ShellEngine<CountingScreen, RecordingNavigator>,
    navigator: RecordingNavigator,
}

impl Session {
    fn start() -> Self {
        let navigator = RecordingNavigator::default();
        let mut engine = ShellEngine::new(
            CountingScreen::default(),
            navigator.clone(),
            VirtualFs::builtin().expect("builtin filesystem"),
        );
        let effect = engine.mount();
        let mut session = Self { engine, navigator };
        session.settle(effect);
        session
    }

    fn settle(&mut self, effect: Effect) -> Effect {
        if effect == Effect::Reveal {
            while self.engine.tick().is_some() {}
            return Effect::None;
        }
        effect
    }

    fn key(&mut self, event: KeyEvent) -> Effect {
        let effect = self.engine.on_key(&event);
        self.settle(effect)
    }

    fn run(&mut self, line: &str) -> Effect {
        for ch in line.chars() {
            self.key(KeyEvent::plain(ch.to_string()));
        }
        self.key(KeyEvent::plain("Enter"))
    }

    fn lines(&self) -> Vec<String> {
        self.engine
            .surface()
            .screen
            .text()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// The lines printed between the last command echo and the new prompt.
    fn last_output(&self) -> Vec<String> {
        let lines = self.lines();
        let end = lines.len() - 1;
        let start = lines[..end]
            .iter()
            .rposition(|l| l.starts_with("guest@portfolio:"))
            .map_or(0, |i| i + 1);
        lines[start..end].to_vec()
    }
}

#[test]
fn test_boot_shows_welcome_and_prompt() {
    let session = Session::start();
    let lines = session.lines();
    assert!(lines.iter().any(|l| l == "Welcome to my terminal portfolio!"));
    assert_eq!(lines.last().map(String::as_str), Some("guest@portfolio:~$"));
}

#[test]
fn test_ls_root_lists_in_definition_order() {
    let mut session = Session::start();
    session.run("ls ~");
    assert_eq!(
        session.last_output(),
        vec![
            "welcome.txt  about.md  experience.md  education.md  certificates.md  resume.pdf  projects/  socials.txt"
        ]
    );
}

#[test]
fn test_cd_then_ls_lists_projects() {
    let mut session = Session::start();
    session.run("cd projects");
    assert_eq!(session.engine.current_directory(), "~/projects");

    session.run("ls");
    assert_eq!(
        session.last_output(),
        vec!["uber-data-analysis.md  movie-recommender.md  data-warehouse.md"]
    );
    assert_eq!(
        session.lines().last().map(String::as_str),
        Some("guest@portfolio:~/projects$")
    );
}

#[test]
fn test_cat_missing_file() {
    let mut session = Session::start();
    session.run("cat missing.md");
    assert_eq!(
        session.last_output(),
        vec!["cat: 'missing.md': No such file or directory"]
    );
}

#[test]
fn test_clear_leaves_only_prompt() {
    let mut session = Session::start();
    session.run("about");
    session.run("clear");
    assert_eq!(session.engine.surface().clears, 1);
    assert_eq!(session.lines(), vec!["guest@portfolio:~$"]);

    session.run("ls");
    assert_eq!(session.lines()[0], "guest@portfolio:~$ ls");
}

#[test]
fn test_resume_opens_external_url() {
    let mut session = Session::start();
    session.run("resume");
    assert_eq!(
        *session.navigator.opened.borrow(),
        vec!["aniket_resume.pdf".to_string()]
    );
    assert_eq!(session.last_output(), vec!["Opening aniket_resume.pdf..."]);
}

#[test]
fn test_history_recall_runs_previous_command() {
    let mut session = Session::start();
    session.run("cd projects");
    session.run("cd ..");
    session.key(KeyEvent::plain("ArrowUp"));
    session.key(KeyEvent::plain("ArrowUp"));
    assert_eq!(session.engine.session().input_buffer, "cd projects");
    assert!(session.lines().last().is_some_and(|l| l.ends_with("$ cd projects")));

    session.key(KeyEvent::plain("Enter"));
    assert_eq!(session.engine.current_directory(), "~/projects");
    assert_eq!(session.engine.session().history.len(), 3);
}

#[test]
fn test_backspace_edits_visible_line() {
    let mut session = Session::start();
    for key in ["l", "x", "Backspace", "s"] {
        session.key(KeyEvent::plain(key));
    }
    assert_eq!(session.lines().last().map(String::as_str), Some("guest@portfolio:~$ ls"));
}

#[test]
fn test_unknown_command() {
    let mut session = Session::start();
    session.run("sudo rm -rf /");
    assert_eq!(session.last_output(), vec!["command not found: sudo"]);
}

#[test]
fn test_contact_round_trip() {
    let mut session = Session::start();
    session.run("contact");
    assert_eq!(session.lines().last().map(String::as_str), Some("email:"));

    session.run("me@example.com");
    let Effect::Submit(submission) = session.run("Loved the projects!") else {
        panic!("expected the form to be submitted");
    };
    assert_eq!(submission.form.email, "me@example.com");
    assert_eq!(submission.form.message, "Loved the projects!");

    let effect = session
        .engine
        .finish_submission(submission.ticket, Err(FetchError::Timeout));
    session.settle(effect);
    let lines = session.lines();
    assert_eq!(lines[lines.len() - 3], "Sending message...");
    assert_eq!(lines[lines.len() - 2], "Failed to send message: request timed out");
    assert_eq!(lines[lines.len() - 1], "guest@portfolio:~$");
    assert!(!session.engine.session().prompt.is_active());
}

#[test]
fn test_interrupt_abandons_contact() {
    let mut session = Session::start();
    session.run("contact");
    session.run("me@example.com");
    session.key(KeyEvent::ctrl("c"));

    assert!(!session.engine.session().prompt.is_active());
    let lines = session.lines();
    assert_eq!(lines[lines.len() - 2], "message: ^C");
    assert_eq!(lines[lines.len() - 1], "guest@portfolio:~$");

    // Back to normal commands
    session.run("cd projects");
    assert_eq!(session.engine.current_directory(), "~/projects");
}
