//! Interactive practice screen
//!
//! Owns the terminal while a `PracticeSession` runs. Each loop iteration
//! pumps the session up to the current instant, draws, then waits for a
//! key no longer than the session's next deadline.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::practice_view;
use crate::player::Command;
use crate::runtime::PracticeSession;

/// Longest wait between redraws, so the position display keeps moving.
const MAX_IDLE: Duration = Duration::from_millis(250);

/// What a key press asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Sync(Command),
    Previous,
    Last,
    ToggleSubtitle,
    Type(char),
    Backspace,
    ClearInput,
    Quit,
}

/// Map a key press to an action. Releases and repeats are ignored.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let action = match key.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Char('c') if ctrl => Action::Quit,
        KeyCode::Char('n') if ctrl => Action::Sync(Command::Next),
        KeyCode::Char('r') if ctrl => Action::Sync(Command::Repeat),
        KeyCode::Char('b') if ctrl => Action::Previous,
        KeyCode::Char('p') if ctrl => Action::Sync(Command::TogglePlay),
        KeyCode::Char('t') if ctrl => Action::ToggleSubtitle,
        KeyCode::Char('u') if ctrl => Action::ClearInput,
        KeyCode::Home => Action::Sync(Command::Jump(0)),
        KeyCode::End => Action::Last,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Char(_) if ctrl => return None,
        KeyCode::Char(c) => Action::Type(c),
        _ => return None,
    };
    Some(action)
}

pub struct PracticeApp {
    session: PracticeSession,
    should_quit: bool,
}

impl PracticeApp {
    pub fn new(session: PracticeSession) -> Self {
        Self {
            session,
            should_quit: false,
        }
    }

    pub fn session(&self) -> &PracticeSession {
        &self.session
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Apply one action at `now`.
    pub fn apply(&mut self, action: Action, now: Instant) {
        // Commands arm timers relative to the queue's clock
        self.session.pump(now);
        match action {
            Action::Sync(command) => {
                self.session.command(command);
            }
            Action::Previous => {
                self.session.previous();
            }
            Action::Last => {
                self.session.last();
            }
            Action::ToggleSubtitle => self.session.toggle_visibility(),
            Action::Type(c) => self.session.type_char(c),
            Action::Backspace => self.session.backspace(),
            Action::ClearInput => self.session.clear_typing(),
            Action::Quit => self.should_quit = true,
        }
        self.session.pump(now);
    }

    /// How long the loop may block waiting for input.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        match self.session.next_wakeup() {
            Some(at) => at.saturating_duration_since(now).min(MAX_IDLE),
            None => MAX_IDLE,
        }
    }

    /// Run until the user quits. Restores the terminal on every exit path.
    #[cfg(not(tarpaulin_include))]
    pub fn run(mut self) -> Result<()> {
        let mut terminal = ratatui::init();
        let result = self.event_loop(&mut terminal);
        ratatui::restore();
        self.session.shutdown();
        result
    }

    #[cfg(not(tarpaulin_include))]
    fn event_loop(&mut self, terminal: &mut ratatui::DefaultTerminal) -> Result<()> {
        while !self.should_quit {
            let now = Instant::now();
            self.session.pump(now);

            let view = self.session.view();
            let typing = self.session.typing().cloned();
            terminal.draw(|frame| practice_view::render(frame, &view, typing.as_ref()))?;

            if event::poll(self.poll_timeout(Instant::now()))? {
                if let TermEvent::Key(key) = event::read()? {
                    if let Some(action) = map_key(key) {
                        tracing::trace!(?action, "key action");
                        self.apply(action, Instant::now());
                    }
                }
            }
        }
        Ok(())
    }
}
