//! Quiz session state machine.
//!
//! A [`Session`] owns the loaded question set, the pool of already-used
//! question ids, and the run currently being presented. It never sleeps or
//! reads the clock itself: timed reveals are modeled as a deadline compared
//! against an `Instant` supplied by the hosting event loop, so the same
//! state machine works under any render/tick cadence.

use std::collections::HashSet;
use std::fmt;
use std::time::{Duration, Instant};

use rand::seq::SliceRandom;

use crate::models::Question;

/// Whether the current card's answer is visible yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Hidden,
    Shown,
}

/// Error type for session operations.
///
/// Every rejected operation leaves the session unchanged.
#[derive(Debug)]
pub enum SessionError {
    /// A question set with zero questions was loaded.
    EmptySet,
    /// `start_run` was asked for a count outside `[1, remaining]`.
    InvalidCount { requested: usize, remaining: usize },
    /// A tick or advance event arrived with no run in progress.
    NoActiveRun,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::EmptySet => write!(f, "question set contains no questions"),
            SessionError::InvalidCount {
                requested,
                remaining,
            } => write!(
                f,
                "requested {} questions but only {} remain",
                requested, remaining
            ),
            SessionError::NoActiveRun => write!(f, "no quiz run in progress"),
        }
    }
}

impl std::error::Error for SessionError {}

/// What the host should currently be showing.
#[derive(Debug)]
pub enum ViewState<'a> {
    /// Nothing loaded yet.
    NoQuestionSet,
    /// A set is loaded and no run is in progress.
    AwaitingStart { remaining: usize },
    /// Mid-run, presenting one card.
    Presenting {
        question: &'a Question,
        /// 1-based position of the card within the run.
        position: usize,
        /// Number of cards in the run.
        total: usize,
        reveal: RevealState,
        /// Time left until the automatic reveal, when one is scheduled.
        time_until_reveal: Option<Duration>,
    },
    /// The cursor reached the end; the run is waiting to be retired.
    RunComplete { remaining: usize },
    /// Every question in the set has been used; new material is required.
    SetExhausted,
}

/// The run currently being presented.
struct ActiveRun {
    items: Vec<Question>,
    cursor: usize,
    reveal: RevealState,
    reveal_delay: Option<Duration>,
    reveal_deadline: Option<Instant>,
}

impl ActiveRun {
    fn new(items: Vec<Question>, reveal_delay: Option<Duration>, now: Instant) -> Self {
        Self {
            items,
            cursor: 0,
            reveal: RevealState::Hidden,
            reveal_deadline: reveal_delay.map(|delay| now + delay),
            reveal_delay,
        }
    }

    fn current(&self) -> Option<&Question> {
        self.items.get(self.cursor)
    }

    fn is_complete(&self) -> bool {
        self.cursor >= self.items.len()
    }
}

/// One user's quiz session.
#[derive(Default)]
pub struct Session {
    /// The loaded question set; empty means nothing is loaded.
    questions: Vec<Question>,
    /// Ids already presented to completion within this set's lifetime.
    used: HashSet<u32>,
    run: Option<ActiveRun>,
    /// Latched when the used pool covered the whole set; cleared on load.
    exhausted: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the question set wholesale.
    ///
    /// A new set is a fresh universe of ids: the used pool and any active
    /// run are discarded along with the previous set.
    pub fn load_question_set(&mut self, questions: Vec<Question>) -> Result<(), SessionError> {
        if questions.is_empty() {
            return Err(SessionError::EmptySet);
        }
        self.questions = questions;
        self.used.clear();
        self.run = None;
        self.exhausted = false;
        Ok(())
    }

    /// Number of questions not yet presented to completion.
    pub fn remaining_count(&self) -> usize {
        self.questions.len() - self.used.len()
    }

    /// Begin a run of `requested_count` questions sampled uniformly without
    /// replacement from the remaining pool.
    ///
    /// `reveal_delay` of `None` means click-only: answers wait for an
    /// explicit advance instead of a deadline. Any prior run is discarded;
    /// its unfinished items were never marked used and stay in the pool.
    pub fn start_run(
        &mut self,
        requested_count: usize,
        reveal_delay: Option<Duration>,
        now: Instant,
    ) -> Result<(), SessionError> {
        let remaining = self.remaining_count();
        if requested_count < 1 || requested_count > remaining {
            return Err(SessionError::InvalidCount {
                requested: requested_count,
                remaining,
            });
        }

        let pool: Vec<&Question> = self
            .questions
            .iter()
            .filter(|q| !self.used.contains(&q.id))
            .collect();
        let mut rng = rand::thread_rng();
        let items: Vec<Question> = pool
            .choose_multiple(&mut rng, requested_count)
            .map(|q| (*q).clone())
            .collect();

        self.run = Some(ActiveRun::new(items, reveal_delay, now));
        Ok(())
    }

    /// Pure query: what should the host render at `now`?
    pub fn current_view(&self, now: Instant) -> ViewState<'_> {
        if self.exhausted {
            return ViewState::SetExhausted;
        }
        if self.questions.is_empty() {
            return ViewState::NoQuestionSet;
        }
        match &self.run {
            None => ViewState::AwaitingStart {
                remaining: self.remaining_count(),
            },
            Some(run) => match run.current() {
                Some(question) => ViewState::Presenting {
                    question,
                    position: run.cursor + 1,
                    total: run.items.len(),
                    reveal: run.reveal,
                    time_until_reveal: match run.reveal {
                        RevealState::Hidden => run
                            .reveal_deadline
                            .map(|deadline| deadline.saturating_duration_since(now)),
                        RevealState::Shown => None,
                    },
                },
                None => ViewState::RunComplete {
                    remaining: self.remaining_count(),
                },
            },
        }
    }

    /// Timer event: reveal the answer once the deadline has passed.
    ///
    /// A no-op while the answer is already shown, or when the run is
    /// click-only and carries no deadline.
    pub fn on_tick(&mut self, now: Instant) -> Result<(), SessionError> {
        let run = self.run.as_mut().ok_or(SessionError::NoActiveRun)?;
        if run.reveal == RevealState::Hidden {
            if let Some(deadline) = run.reveal_deadline {
                if now >= deadline {
                    run.reveal = RevealState::Shown;
                    run.reveal_deadline = None;
                }
            }
        }
        Ok(())
    }

    /// User event: the single "next" action.
    ///
    /// First press reveals the answer (cancelling any pending deadline),
    /// second press retires the card. Advancing past the last card marks
    /// the run complete and moves its ids into the used pool; the run
    /// itself stays until [`Session::retire_completed_run`] so the host
    /// can render the completion screen.
    pub fn on_advance(&mut self, now: Instant) -> Result<(), SessionError> {
        let run = self.run.as_mut().ok_or(SessionError::NoActiveRun)?;
        match run.reveal {
            RevealState::Hidden => {
                run.reveal = RevealState::Shown;
                run.reveal_deadline = None;
            }
            RevealState::Shown => {
                run.cursor += 1;
                if run.cursor < run.items.len() {
                    run.reveal = RevealState::Hidden;
                    run.reveal_deadline = run.reveal_delay.map(|delay| now + delay);
                } else {
                    self.used.extend(run.items.iter().map(|q| q.id));
                }
            }
        }
        Ok(())
    }

    /// Finalize a completed run so a new one can start. Idempotent.
    ///
    /// When the used pool now covers the whole set, the set and pool are
    /// cleared and the session latches [`ViewState::SetExhausted`],
    /// forcing the host to load new material.
    pub fn retire_completed_run(&mut self) {
        let complete = self.run.as_ref().is_some_and(ActiveRun::is_complete);
        if !complete {
            return;
        }
        if let Some(run) = self.run.take() {
            self.used.extend(run.items.iter().map(|q| q.id));
        }
        if !self.questions.is_empty() && self.used.len() >= self.questions.len() {
            self.questions.clear();
            self.used.clear();
            self.exhausted = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: u32) -> Question {
        Question {
            id,
            prompt: format!("Q{}", id),
            answer: format!("A{}", id),
        }
    }

    fn set(n: u32) -> Vec<Question> {
        (0..n).map(question).collect()
    }

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    /// Click through every card of the active run, collecting ids in
    /// presentation order.
    fn drain_run(session: &mut Session, now: Instant) -> Vec<u32> {
        let mut ids = Vec::new();
        loop {
            match session.current_view(now) {
                ViewState::Presenting { question, .. } => ids.push(question.id),
                _ => break,
            }
            session.on_advance(now).unwrap(); // reveal
            session.on_advance(now).unwrap(); // retire card
        }
        ids
    }

    #[test]
    fn load_reports_full_remaining_count() {
        let mut session = Session::new();
        session.load_question_set(set(7)).unwrap();
        assert_eq!(session.remaining_count(), 7);
        assert!(matches!(
            session.current_view(Instant::now()),
            ViewState::AwaitingStart { remaining: 7 }
        ));
    }

    #[test]
    fn empty_set_is_rejected() {
        let mut session = Session::new();
        assert!(matches!(
            session.load_question_set(Vec::new()),
            Err(SessionError::EmptySet)
        ));
        assert_eq!(session.remaining_count(), 0);
        assert!(matches!(
            session.current_view(Instant::now()),
            ViewState::NoQuestionSet
        ));
    }

    #[test]
    fn loading_a_new_set_clears_history() {
        let t0 = Instant::now();
        let mut session = Session::new();
        session.load_question_set(set(3)).unwrap();
        session.start_run(2, None, t0).unwrap();
        drain_run(&mut session, t0);
        session.retire_completed_run();
        assert_eq!(session.remaining_count(), 1);

        session.load_question_set(set(5)).unwrap();
        assert_eq!(session.remaining_count(), 5);
        assert!(matches!(
            session.current_view(t0),
            ViewState::AwaitingStart { remaining: 5 }
        ));
    }

    #[test]
    fn invalid_count_leaves_state_unchanged() {
        let t0 = Instant::now();
        let mut session = Session::new();
        session.load_question_set(set(3)).unwrap();

        match session.start_run(5, None, t0) {
            Err(SessionError::InvalidCount {
                requested: 5,
                remaining: 3,
            }) => (),
            other => panic!("unexpected result: {:?}", other.err()),
        }
        assert!(matches!(
            session.start_run(0, None, t0),
            Err(SessionError::InvalidCount { .. })
        ));
        assert_eq!(session.remaining_count(), 3);
        assert!(matches!(
            session.current_view(t0),
            ViewState::AwaitingStart { remaining: 3 }
        ));
    }

    #[test]
    fn events_without_a_run_report_no_active_run() {
        let t0 = Instant::now();
        let mut session = Session::new();
        assert!(matches!(
            session.on_tick(t0),
            Err(SessionError::NoActiveRun)
        ));
        assert!(matches!(
            session.on_advance(t0),
            Err(SessionError::NoActiveRun)
        ));

        session.load_question_set(set(2)).unwrap();
        assert!(matches!(
            session.on_advance(t0),
            Err(SessionError::NoActiveRun)
        ));
    }

    #[test]
    fn tick_before_the_deadline_keeps_the_answer_hidden() {
        let t0 = Instant::now();
        let mut session = Session::new();
        session.load_question_set(set(1)).unwrap();
        session.start_run(1, Some(secs(5)), t0).unwrap();

        session.on_tick(t0 + secs(4)).unwrap();
        match session.current_view(t0 + secs(4)) {
            ViewState::Presenting {
                reveal,
                time_until_reveal,
                ..
            } => {
                assert_eq!(reveal, RevealState::Hidden);
                assert_eq!(time_until_reveal, Some(secs(1)));
            }
            view => panic!("unexpected view: {:?}", view),
        }

        session.on_tick(t0 + secs(5)).unwrap();
        match session.current_view(t0 + secs(5)) {
            ViewState::Presenting {
                reveal,
                time_until_reveal,
                ..
            } => {
                assert_eq!(reveal, RevealState::Shown);
                assert_eq!(time_until_reveal, None);
            }
            view => panic!("unexpected view: {:?}", view),
        }
    }

    #[test]
    fn early_advance_reveals_without_moving_the_cursor() {
        let t0 = Instant::now();
        let mut session = Session::new();
        session.load_question_set(set(2)).unwrap();
        session.start_run(2, Some(secs(5)), t0).unwrap();

        session.on_advance(t0 + secs(1)).unwrap();
        match session.current_view(t0 + secs(1)) {
            ViewState::Presenting {
                position,
                reveal,
                time_until_reveal,
                ..
            } => {
                assert_eq!(position, 1);
                assert_eq!(reveal, RevealState::Shown);
                // the pending deadline is cancelled by the early reveal
                assert_eq!(time_until_reveal, None);
            }
            view => panic!("unexpected view: {:?}", view),
        }

        // second press retires the card and re-arms the next deadline
        session.on_advance(t0 + secs(2)).unwrap();
        match session.current_view(t0 + secs(2)) {
            ViewState::Presenting {
                position,
                reveal,
                time_until_reveal,
                ..
            } => {
                assert_eq!(position, 2);
                assert_eq!(reveal, RevealState::Hidden);
                assert_eq!(time_until_reveal, Some(secs(5)));
            }
            view => panic!("unexpected view: {:?}", view),
        }
    }

    #[test]
    fn click_only_runs_wait_for_the_user() {
        let t0 = Instant::now();
        let mut session = Session::new();
        session.load_question_set(set(1)).unwrap();
        session.start_run(1, None, t0).unwrap();

        session.on_tick(t0 + secs(60)).unwrap();
        match session.current_view(t0 + secs(60)) {
            ViewState::Presenting {
                reveal,
                time_until_reveal,
                ..
            } => {
                assert_eq!(reveal, RevealState::Hidden);
                assert_eq!(time_until_reveal, None);
            }
            view => panic!("unexpected view: {:?}", view),
        }

        session.on_advance(t0 + secs(61)).unwrap();
        assert!(matches!(
            session.current_view(t0 + secs(61)),
            ViewState::Presenting {
                reveal: RevealState::Shown,
                ..
            }
        ));
    }

    #[test]
    fn retire_ignores_an_unfinished_run() {
        let t0 = Instant::now();
        let mut session = Session::new();
        session.load_question_set(set(2)).unwrap();
        session.start_run(1, None, t0).unwrap();

        session.retire_completed_run();
        assert!(matches!(
            session.current_view(t0),
            ViewState::Presenting { .. }
        ));
    }

    #[test]
    fn completed_run_grows_the_used_pool_by_its_size() {
        let t0 = Instant::now();
        let mut session = Session::new();
        session.load_question_set(set(5)).unwrap();
        session.start_run(3, None, t0).unwrap();

        let ids = drain_run(&mut session, t0);
        assert_eq!(ids.len(), 3);
        assert!(matches!(
            session.current_view(t0),
            ViewState::RunComplete { remaining: 2 }
        ));

        session.retire_completed_run();
        session.retire_completed_run(); // idempotent
        assert_eq!(session.remaining_count(), 2);
        assert!(matches!(
            session.current_view(t0),
            ViewState::AwaitingStart { remaining: 2 }
        ));
    }

    #[test]
    fn repeated_runs_never_resample_a_used_id() {
        let t0 = Instant::now();
        let mut session = Session::new();
        session.load_question_set(set(10)).unwrap();

        let mut seen = HashSet::new();
        for _ in 0..5 {
            session.start_run(2, None, t0).unwrap();
            let ids = drain_run(&mut session, t0);
            assert_eq!(ids.len(), 2);
            for id in ids {
                assert!(seen.insert(id), "id {} sampled twice", id);
            }
            session.retire_completed_run();
        }
        assert_eq!(seen.len(), 10);
        assert!(matches!(session.current_view(t0), ViewState::SetExhausted));
    }

    #[test]
    fn exhaustion_clears_the_set_and_forces_a_reload() {
        let t0 = Instant::now();
        let mut session = Session::new();
        session.load_question_set(set(2)).unwrap();
        session.start_run(2, None, t0).unwrap();
        drain_run(&mut session, t0);
        assert!(matches!(
            session.current_view(t0),
            ViewState::RunComplete { remaining: 0 }
        ));

        session.retire_completed_run();
        assert!(matches!(session.current_view(t0), ViewState::SetExhausted));
        assert_eq!(session.remaining_count(), 0);

        // a fresh upload recovers the session
        session.load_question_set(set(3)).unwrap();
        assert!(matches!(
            session.current_view(t0),
            ViewState::AwaitingStart { remaining: 3 }
        ));
    }

    #[test]
    fn timed_run_walkthrough() {
        let t0 = Instant::now();
        let mut session = Session::new();
        session.load_question_set(set(3)).unwrap();
        session.start_run(2, Some(secs(5)), t0).unwrap();

        let first_id = match session.current_view(t0) {
            ViewState::Presenting {
                question,
                position,
                total,
                reveal,
                time_until_reveal,
            } => {
                assert_eq!(position, 1);
                assert_eq!(total, 2);
                assert_eq!(reveal, RevealState::Hidden);
                assert_eq!(time_until_reveal, Some(secs(5)));
                question.id
            }
            view => panic!("unexpected view: {:?}", view),
        };

        session.on_tick(t0 + secs(5)).unwrap();
        assert!(matches!(
            session.current_view(t0 + secs(5)),
            ViewState::Presenting {
                reveal: RevealState::Shown,
                ..
            }
        ));

        session.on_advance(t0 + secs(6)).unwrap();
        let second_id = match session.current_view(t0 + secs(6)) {
            ViewState::Presenting {
                question,
                position,
                reveal,
                time_until_reveal,
                ..
            } => {
                assert_eq!(position, 2);
                assert_eq!(reveal, RevealState::Hidden);
                assert_eq!(time_until_reveal, Some(secs(5)));
                question.id
            }
            view => panic!("unexpected view: {:?}", view),
        };
        assert_ne!(first_id, second_id);

        session.on_advance(t0 + secs(7)).unwrap(); // reveal
        session.on_advance(t0 + secs(8)).unwrap(); // complete
        assert!(matches!(
            session.current_view(t0 + secs(8)),
            ViewState::RunComplete { remaining: 1 }
        ));

        session.retire_completed_run();
        assert_eq!(session.remaining_count(), 1);

        // the follow-up run gets the one question not yet used
        session.start_run(1, None, t0).unwrap();
        match session.current_view(t0) {
            ViewState::Presenting { question, .. } => {
                assert_ne!(question.id, first_id);
                assert_ne!(question.id, second_id);
            }
            view => panic!("unexpected view: {:?}", view),
        }
    }
}
