use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::data::{self, LoadError};
use crate::models::Question;
use crate::session::{Session, SessionError, ViewState};

const MAX_DELAY_SECS: u64 = 60;
const DEFAULT_RUN_SIZE: usize = 10;

/// Application state: one quiz session plus the setup-screen selectors.
pub struct App {
    session: Session,
    /// Where the question set came from, for reloading after exhaustion.
    source: PathBuf,
    requested_count: usize,
    delay_secs: u64,
    load_error: Option<String>,
}

impl App {
    pub fn new(
        source: PathBuf,
        questions: Vec<Question>,
        delay_secs: u64,
    ) -> Result<Self, SessionError> {
        let mut session = Session::new();
        session.load_question_set(questions)?;
        let requested_count = DEFAULT_RUN_SIZE.min(session.remaining_count());

        Ok(Self {
            session,
            source,
            requested_count,
            delay_secs: delay_secs.min(MAX_DELAY_SECS),
            load_error: None,
        })
    }

    pub fn view(&self, now: Instant) -> ViewState<'_> {
        self.session.current_view(now)
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn requested_count(&self) -> usize {
        self.requested_count
    }

    pub fn delay_secs(&self) -> u64 {
        self.delay_secs
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Raise the run size, capped at the remaining pool.
    pub fn increment_count(&mut self) {
        let max = self.session.remaining_count().max(1);
        self.requested_count = (self.requested_count + 1).min(max);
    }

    pub fn decrement_count(&mut self) {
        self.requested_count = self.requested_count.saturating_sub(1).max(1);
    }

    pub fn increment_delay(&mut self) {
        self.delay_secs = (self.delay_secs + 1).min(MAX_DELAY_SECS);
    }

    pub fn decrement_delay(&mut self) {
        self.delay_secs = self.delay_secs.saturating_sub(1);
    }

    /// Zero seconds means click-only: no automatic reveal.
    fn reveal_delay(&self) -> Option<Duration> {
        (self.delay_secs > 0).then(|| Duration::from_secs(self.delay_secs))
    }

    pub fn start_run(&mut self, now: Instant) -> Result<(), SessionError> {
        self.session
            .start_run(self.requested_count, self.reveal_delay(), now)
    }

    pub fn advance(&mut self, now: Instant) {
        // NoActiveRun is harmless here: a stray keypress between runs
        let _ = self.session.on_advance(now);
    }

    pub fn tick(&mut self, now: Instant) {
        // the clock ticks regardless of whether a run is active
        let _ = self.session.on_tick(now);
    }

    /// Retire a completed run and clamp the selector to the shrunken pool.
    pub fn finish_run(&mut self) {
        self.session.retire_completed_run();
        let remaining = self.session.remaining_count();
        if remaining > 0 {
            self.requested_count = self.requested_count.clamp(1, remaining);
        }
    }

    /// Re-read the source file as a fresh question set.
    pub fn reload(&mut self) -> Result<(), LoadError> {
        let questions = data::load_questions(&self.source)?;
        if self.session.load_question_set(questions).is_err() {
            return Err(LoadError::Empty);
        }
        self.requested_count = DEFAULT_RUN_SIZE.min(self.session.remaining_count());
        self.load_error = None;
        Ok(())
    }

    pub fn set_load_error(&mut self, message: String) {
        self.load_error = Some(message);
    }
}
