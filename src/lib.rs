//! # flashdrill
//!
//! A terminal flashcard drill: load a question/answer file, sample a random
//! subset, and walk through each card with a timed or click-triggered
//! answer reveal. Questions already seen are not resampled until the whole
//! set has been used up.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use flashdrill::{Drill, DrillError};
//!
//! fn main() -> Result<(), DrillError> {
//!     // Load questions from a CSV file, revealing answers after 5 seconds
//!     let drill = Drill::from_file("questions.csv", 5)?;
//!
//!     // Run the drill in the terminal
//!     drill.run()?;
//!
//!     Ok(())
//! }
//! ```

mod app;
mod data;
mod models;
mod session;
pub mod terminal;
mod ui;

use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

pub use app::App;
pub use data::{load_questions, LoadError};
pub use models::Question;
pub use session::{RevealState, Session, SessionError, ViewState};

/// How often the event loop wakes up to drive timed reveals.
const TICK_RATE: Duration = Duration::from_millis(100);

/// Error type for drill operations.
#[derive(Debug)]
pub enum DrillError {
    /// Error loading questions from file.
    Load(LoadError),
    /// IO error during drill execution.
    Io(io::Error),
}

impl std::fmt::Display for DrillError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrillError::Load(e) => write!(f, "Failed to load questions: {}", e),
            DrillError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for DrillError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DrillError::Load(e) => Some(e),
            DrillError::Io(e) => Some(e),
        }
    }
}

impl From<LoadError> for DrillError {
    fn from(err: LoadError) -> Self {
        DrillError::Load(err)
    }
}

impl From<io::Error> for DrillError {
    fn from(err: io::Error) -> Self {
        DrillError::Io(err)
    }
}

/// A flashcard drill that can be run in the terminal.
pub struct Drill {
    app: App,
}

impl Drill {
    /// Load a drill from a CSV, TSV or JSON file.
    ///
    /// `delay_secs` is the initial automatic-reveal delay; `0` means
    /// answers wait for a keypress. Both are adjustable on the setup
    /// screen.
    pub fn from_file<P: AsRef<Path>>(path: P, delay_secs: u64) -> Result<Self, DrillError> {
        let path = path.as_ref();
        let questions = data::load_questions(path)?;
        let app = App::new(path.to_path_buf(), questions, delay_secs)
            .map_err(|_| DrillError::Load(LoadError::Empty))?;
        Ok(Self { app })
    }

    /// Run the drill in the terminal.
    ///
    /// This will take over the terminal, display the drill UI, and return
    /// when the user quits.
    pub fn run(mut self) -> Result<(), DrillError> {
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self.app);
        terminal::restore()?;
        result
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(terminal: &mut terminal::DrillTerminal, app: &mut App) -> Result<(), DrillError> {
    loop {
        let now = Instant::now();
        app.tick(now);
        terminal.draw(|frame| ui::render(frame, app, now))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if handle_input(app, key.code, Instant::now()) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Which input map is active, derived from the session view.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Screen {
    Empty,
    Setup,
    Card,
    Complete,
    Exhausted,
}

fn screen_for(view: &ViewState<'_>) -> Screen {
    match view {
        ViewState::NoQuestionSet => Screen::Empty,
        ViewState::AwaitingStart { .. } => Screen::Setup,
        ViewState::Presenting { .. } => Screen::Card,
        ViewState::RunComplete { .. } => Screen::Complete,
        ViewState::SetExhausted => Screen::Exhausted,
    }
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode, now: Instant) -> bool {
    match screen_for(&app.view(now)) {
        Screen::Empty => matches!(key, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc),
        Screen::Setup => handle_setup_input(app, key, now),
        Screen::Card => handle_card_input(app, key, now),
        Screen::Complete => handle_complete_input(app, key),
        Screen::Exhausted => handle_exhausted_input(app, key),
    }
}

fn handle_setup_input(app: &mut App, key: KeyCode, now: Instant) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.increment_count();
            false
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.decrement_count();
            false
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.increment_delay();
            false
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.decrement_delay();
            false
        }
        KeyCode::Enter => {
            // the selectors are clamped to [1, remaining], so this holds
            let _ = app.start_run(now);
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_card_input(app: &mut App, key: KeyCode, now: Instant) -> bool {
    match key {
        // button and space bar are the same action: reveal, then next
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.advance(now);
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_complete_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.finish_run();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_exhausted_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('r') | KeyCode::Char('R') => {
            if let Err(e) = app.reload() {
                app.set_load_error(format!("reload failed: {}", e));
            }
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        _ => false,
    }
}
