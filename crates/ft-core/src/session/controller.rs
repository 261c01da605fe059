//! Session controller: validated intents over the session store

use super::countdown::Countdown;
use super::history::{HistoryEntry, HistoryFilter};
use super::model::Session;
use super::store::{Action, SessionStore};
use super::validator::SessionValidator;
use crate::clock::{Clock, SystemClock};
use crate::config::TimerConfig;
use crate::error::ValidationError;
use crate::types::SessionId;
use std::sync::Arc;

/// Read-only view of session state for presentation code
///
/// Renderers that never dispatch intents should depend on this trait
/// rather than on [`SessionController`].
pub trait SessionView {
    /// All sessions in creation order
    fn sessions(&self) -> &[Session];

    /// The running session, if any
    fn active_session(&self) -> Option<&Session>;

    /// Seconds ticked since the active session started
    fn elapsed_seconds(&self) -> u64;

    /// Seconds left on the active session; 0 when nothing is active
    fn remaining_seconds(&self) -> u64 {
        self.active_session()
            .map(|s| s.planned_seconds().saturating_sub(self.elapsed_seconds()))
            .unwrap_or(0)
    }

    fn countdown(&self) -> Countdown {
        Countdown::from_seconds(self.remaining_seconds())
    }

    /// Remaining whole minutes, two digits
    fn minutes_display(&self) -> String {
        self.countdown().minutes_display()
    }

    /// Remaining seconds within the minute, two digits
    fn seconds_display(&self) -> String {
        self.countdown().seconds_display()
    }

    /// History rows, newest first
    fn history(&self, filter: &HistoryFilter) -> Vec<HistoryEntry> {
        HistoryEntry::collect(self.sessions(), filter)
    }
}

/// Result of recording a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No session is active; the tick was ignored
    Idle,
    /// The active session keeps counting down
    Running { remaining_seconds: u64 },
    /// The tick reached the planned duration and the session was finished
    Finished,
}

/// Controller for the session lifecycle
pub struct SessionController {
    /// Authoritative state
    store: SessionStore,
    /// Seconds ticked since the active session started
    elapsed_seconds: u64,
    /// Input validation for new sessions
    validator: SessionValidator,
    /// Source of timestamps stamped onto actions
    clock: Arc<dyn Clock>,
    /// Finish automatically when the countdown reaches zero
    auto_finish: bool,
}

impl SessionController {
    /// Create a controller with the given clock and default timer settings
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self::with_clock(Arc::new(clock))
    }

    /// Create a controller with a shared clock
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            store: SessionStore::new(),
            elapsed_seconds: 0,
            validator: SessionValidator::new(),
            clock,
            auto_finish: true,
        }
    }

    /// Apply timer settings (bounds and auto-finish)
    pub fn with_config(mut self, config: &TimerConfig) -> Self {
        self.validator = SessionValidator::from_config(config);
        self.auto_finish = config.auto_finish;
        self
    }

    pub fn validator(&self) -> &SessionValidator {
        &self.validator
    }

    /// Underlying store state
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn active_session_id(&self) -> Option<&SessionId> {
        self.store.active_session_id()
    }

    /// Apply an action to the store.
    ///
    /// Lower-level than the intent methods: no validation and the elapsed
    /// counter is left alone.
    pub fn dispatch(&mut self, action: Action) {
        tracing::debug!(action = action.name(), "dispatching session action");
        let store = std::mem::take(&mut self.store);
        self.store = store.apply(&action);
    }

    /// Start a new session.
    ///
    /// Rejects an empty task, a duration outside the configured bounds, or a
    /// request made while another session is running. On rejection nothing
    /// changes.
    pub fn create_session(
        &mut self,
        task: &str,
        planned_minutes: u32,
    ) -> Result<&Session, ValidationError> {
        let task = self.validator.validate(task, planned_minutes)?;
        if self.store.active_session().is_some() {
            return Err(ValidationError::SessionAlreadyActive);
        }

        let now = self.clock.now();
        let mut id = SessionId::generate_at(now);
        while self.store.get(&id).is_some() {
            id = SessionId::generate_at(now);
        }
        let session = Session::new(id, task, planned_minutes, now);
        tracing::info!(id = %session.id(), task, planned_minutes, "starting session");

        // a fresh id always appends
        let index = self.store.len();
        self.dispatch(Action::StartSession { session });
        self.elapsed_seconds = 0;

        debug_assert_eq!(self.store.len(), index + 1);
        Ok(&self.store.sessions()[index])
    }

    /// Close the active session as interrupted. No-op if nothing is active.
    pub fn interrupt_active_session(&mut self) -> Option<&Session> {
        let at = self.clock.now();
        self.close_active(Action::InterruptActiveSession { at })
    }

    /// Close the active session as finished. No-op if nothing is active.
    pub fn mark_active_session_finished(&mut self) -> Option<&Session> {
        let at = self.clock.now();
        self.close_active(Action::FinishActiveSession { at })
    }

    fn close_active(&mut self, action: Action) -> Option<&Session> {
        let Some(id) = self.store.active_session_id().cloned() else {
            tracing::debug!(action = action.name(), "no active session, ignoring");
            return None;
        };

        self.dispatch(action);
        let session = self.store.get(&id)?;
        tracing::info!(
            id = %id,
            status = %session.status(),
            elapsed_seconds = self.elapsed_seconds,
            "session ended"
        );
        Some(session)
    }

    /// Overwrite the elapsed counter
    pub fn set_elapsed_seconds(&mut self, seconds: u64) {
        self.elapsed_seconds = seconds;
    }

    /// Record elapsed time from the tick source.
    ///
    /// Ignored when no session is active. With auto-finish enabled, reaching
    /// the planned duration finishes the session and pins elapsed to it.
    pub fn tick(&mut self, elapsed_seconds: u64) -> TickOutcome {
        let Some(total) = self.store.active_session().map(Session::planned_seconds) else {
            return TickOutcome::Idle;
        };

        if self.auto_finish && elapsed_seconds >= total {
            self.elapsed_seconds = total;
            self.mark_active_session_finished();
            return TickOutcome::Finished;
        }

        self.elapsed_seconds = elapsed_seconds;
        TickOutcome::Running {
            remaining_seconds: self.remaining_seconds(),
        }
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl SessionView for SessionController {
    fn sessions(&self) -> &[Session] {
        self.store.sessions()
    }

    fn active_session(&self) -> Option<&Session> {
        self.store.active_session()
    }

    fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::session::SessionStatus;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 14, 0, 0).unwrap()
    }

    fn create_controller() -> (SessionController, FixedClock) {
        let clock = FixedClock::new(start());
        (SessionController::new(clock.clone()), clock)
    }

    #[test]
    fn test_create_session() {
        let (mut controller, _) = create_controller();
        controller.set_elapsed_seconds(99);

        let session = controller.create_session("Write paper", 25).unwrap();
        assert_eq!(session.task(), "Write paper");
        assert_eq!(session.started_at(), start());
        let id = session.id().clone();

        assert_eq!(controller.sessions().len(), 1);
        assert_eq!(controller.active_session_id(), Some(&id));
        assert_eq!(controller.elapsed_seconds(), 0);
        assert_eq!(controller.remaining_seconds(), 1500);
        assert_eq!(controller.countdown().to_string(), "25:00");
    }

    #[test]
    fn test_create_session_returns_the_appended_session() {
        let (mut controller, _) = create_controller();
        for task in ["First", "Second", "Third"] {
            let id = controller.create_session(task, 5).unwrap().id().clone();
            assert_eq!(controller.sessions().last().map(Session::id), Some(&id));
            assert_eq!(controller.active_session().map(Session::task), Some(task));
            controller.mark_active_session_finished();
        }
        assert_eq!(controller.sessions().len(), 3);
    }

    #[test]
    fn test_create_session_trims_task() {
        let (mut controller, _) = create_controller();
        let session = controller.create_session("  Read  ", 5).unwrap();
        assert_eq!(session.task(), "Read");
    }

    #[test]
    fn test_create_session_valid_range() {
        for minutes in 5..=60 {
            let (mut controller, _) = create_controller();
            assert!(controller.create_session("Task", minutes).is_ok());
            assert_eq!(controller.sessions().len(), 1);
            assert!(controller.active_session().is_some());
        }
    }

    #[test]
    fn test_create_session_rejects_invalid_input() {
        let (mut controller, _) = create_controller();
        controller.set_elapsed_seconds(7);
        let before = controller.store().clone();

        for (task, minutes) in [("", 25), ("   ", 25), ("Task", 0), ("Task", 4), ("Task", 61)] {
            assert!(controller.create_session(task, minutes).is_err());
        }

        assert_eq!(controller.store(), &before);
        assert_eq!(controller.elapsed_seconds(), 7);
    }

    #[test]
    fn test_create_session_while_active_rejected() {
        let (mut controller, _) = create_controller();
        controller.create_session("First", 25).unwrap();
        controller.tick(30);

        let err = controller.create_session("Second", 10).unwrap_err();
        assert_eq!(err, ValidationError::SessionAlreadyActive);
        assert_eq!(controller.sessions().len(), 1);
        assert_eq!(controller.elapsed_seconds(), 30);
    }

    #[test]
    fn test_interrupt_without_active_is_noop() {
        let (mut controller, _) = create_controller();
        let before = controller.store().clone();
        assert!(controller.interrupt_active_session().is_none());
        assert!(controller.mark_active_session_finished().is_none());
        assert_eq!(controller.store(), &before);
    }

    #[test]
    fn test_create_then_finish() {
        let (mut controller, clock) = create_controller();
        controller.create_session("Write paper", 25).unwrap();
        clock.advance(Duration::minutes(25));

        let session = controller.mark_active_session_finished().unwrap();
        assert_eq!(session.finished_at(), Some(start() + Duration::minutes(25)));
        assert_eq!(session.interrupted_at(), None);
        assert_eq!(controller.active_session_id(), None);
    }

    #[test]
    fn test_tick_then_interrupt() {
        let (mut controller, clock) = create_controller();
        controller.create_session("Write paper", 25).unwrap();

        assert_eq!(
            controller.tick(10),
            TickOutcome::Running {
                remaining_seconds: 1490
            }
        );
        controller.tick(20);
        assert_eq!(controller.elapsed_seconds(), 20);
        assert_eq!(controller.remaining_seconds(), 25 * 60 - 20);
        assert_eq!(controller.minutes_display(), "24");
        assert_eq!(controller.seconds_display(), "40");

        clock.advance(Duration::seconds(20));
        let session = controller.interrupt_active_session().unwrap();
        assert_eq!(session.status(), SessionStatus::Interrupted);
        assert!(controller.active_session().is_none());
        assert_eq!(controller.remaining_seconds(), 0);
        assert_eq!(controller.countdown().to_string(), "00:00");
    }

    #[test]
    fn test_tick_without_active_is_ignored() {
        let (mut controller, _) = create_controller();
        assert_eq!(controller.tick(5), TickOutcome::Idle);
        assert_eq!(controller.elapsed_seconds(), 0);
    }

    #[test]
    fn test_tick_auto_finishes() {
        let (mut controller, _) = create_controller();
        controller.create_session("Stretch", 5).unwrap();

        assert_eq!(controller.tick(300), TickOutcome::Finished);
        assert_eq!(controller.elapsed_seconds(), 300);
        assert!(controller.active_session().is_none());
        assert_eq!(
            controller.sessions()[0].status(),
            SessionStatus::Completed
        );
    }

    #[test]
    fn test_tick_without_auto_finish() {
        let clock = FixedClock::new(start());
        let config = TimerConfig {
            auto_finish: false,
            ..TimerConfig::default()
        };
        let mut controller = SessionController::new(clock).with_config(&config);
        controller.create_session("Stretch", 5).unwrap();

        assert_eq!(
            controller.tick(301),
            TickOutcome::Running {
                remaining_seconds: 0
            }
        );
        assert!(controller.active_session().is_some());
    }

    #[test]
    fn test_config_bounds_narrow_range() {
        let config = TimerConfig {
            min_minutes: 10,
            max_minutes: 30,
            ..TimerConfig::default()
        };
        let mut controller = SessionController::default().with_config(&config);
        assert!(controller.create_session("Short", 5).is_err());
        assert!(controller.create_session("Long", 45).is_err());
        assert!(controller.create_session("Deep work", 30).is_ok());
    }

    #[test]
    fn test_config_bounds_cannot_widen_range() {
        let config = TimerConfig {
            min_minutes: 1,
            max_minutes: 240,
            ..TimerConfig::default()
        };
        let mut controller = SessionController::default().with_config(&config);
        assert_eq!(
            controller.create_session("Tiny", 1).unwrap_err(),
            ValidationError::MinutesOutOfRange {
                minutes: 1,
                min: 5,
                max: 60
            }
        );
        assert!(controller.create_session("Huge", 240).is_err());
        assert!(controller.sessions().is_empty());
    }

    #[test]
    fn test_dispatch_unknown_is_noop() {
        let (mut controller, _) = create_controller();
        controller.create_session("Write paper", 25).unwrap();
        let before = controller.store().clone();
        controller.dispatch(Action::Unknown);
        assert_eq!(controller.store(), &before);
    }

    #[test]
    fn test_never_both_terminal_over_intent_sequences() {
        let (mut controller, clock) = create_controller();
        for round in 0..6u32 {
            let _ = controller.create_session("Loop", 5 + round);
            clock.advance(Duration::minutes(1));
            match round % 3 {
                0 => {
                    controller.interrupt_active_session();
                }
                1 => {
                    controller.tick(u64::from(5 + round) * 60);
                }
                _ => {
                    controller.mark_active_session_finished();
                }
            }
            controller.interrupt_active_session();
            controller.mark_active_session_finished();
        }

        assert_eq!(controller.sessions().len(), 6);
        for session in controller.sessions() {
            assert!(!(session.interrupted_at().is_some() && session.finished_at().is_some()));
            assert!(session.is_terminal());
        }
        assert!(controller.active_session().is_none());
    }

    #[test]
    fn test_history_through_view() {
        let (mut controller, clock) = create_controller();
        controller.create_session("First", 25).unwrap();
        controller.interrupt_active_session();
        clock.advance(Duration::minutes(5));
        controller.create_session("Second", 10).unwrap();

        fn render(view: &dyn SessionView) -> Vec<String> {
            view.history(&HistoryFilter::new())
                .into_iter()
                .map(|e| format!("{}:{}", e.task, e.status))
                .collect()
        }

        assert_eq!(
            render(&controller),
            vec!["Second:In progress".to_string(), "First:Interrupted".to_string()]
        );
    }
}
