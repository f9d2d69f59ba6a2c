//! Countdown state machine
//!
//! Idle -> Running (start, only with time left) -> Paused (toggle) -> ...
//! Reset returns to Idle from anywhere. Reaching 0:00 while active finishes
//! the countdown and returns to Idle.

use crate::timer::Ticker;
use crate::types::{Countdown, Field, RunState};
use std::time::Instant;
use tracing::{debug, info, trace};

/// Something the caller has to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// One or more ticks were applied
    Ticked(u32),
    /// The countdown reached 0:00 and the timer went back to Idle
    Finished,
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running, nothing changed
    Ignored,
    /// One second was removed
    Counted,
    /// The countdown is now 0:00
    Finished,
}

/// The timer widget: countdown, run state and its tick source
#[derive(Debug, Clone, Default)]
pub struct TimerWidget {
    countdown: Countdown,
    state: RunState,
    ticker: Ticker,
}

impl TimerWidget {
    pub fn with_countdown(mut self, countdown: Countdown) -> Self {
        self.countdown = countdown;
        self
    }

    pub fn countdown(&self) -> Countdown {
        self.countdown
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    #[cfg(test)]
    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    /// Start is only offered from Idle
    pub fn can_start(&self) -> bool {
        self.state == RunState::Idle
    }

    /// Pause/Resume is offered while active
    pub fn can_pause(&self) -> bool {
        self.state.is_active()
    }

    pub fn pause_label(&self) -> &'static str {
        if self.state == RunState::Paused {
            "Resume"
        } else {
            "Pause"
        }
    }

    /// Begin counting down. Returns false when nothing happened.
    pub fn start(&mut self, now: Instant) -> bool {
        if !self.can_start() || self.countdown.is_zero() {
            return false;
        }
        self.state = RunState::Running;
        self.ticker.start(now);
        info!(countdown = %self.countdown, "timer started");
        true
    }

    /// Switch between Running and Paused without touching the countdown
    pub fn toggle_pause(&mut self, now: Instant) -> bool {
        match self.state {
            RunState::Idle => return false,
            RunState::Running => {
                self.ticker.stop();
                self.state = RunState::Paused;
                info!(countdown = %self.countdown, "timer paused");
            }
            RunState::Paused => {
                self.ticker.start(now);
                self.state = RunState::Running;
                info!(countdown = %self.countdown, "timer resumed");
            }
        }
        true
    }

    /// Back to Idle at 0:00, whatever the current state
    pub fn reset(&mut self) {
        self.ticker.stop();
        self.state = RunState::Idle;
        self.countdown = Countdown::ZERO;
        info!("timer reset");
    }

    /// Apply one decrement while running
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != RunState::Running {
            return TickOutcome::Ignored;
        }
        self.countdown.decrement();
        trace!(remaining = %self.countdown, "tick");

        if self.countdown.is_zero() {
            self.finish();
            TickOutcome::Finished
        } else {
            TickOutcome::Counted
        }
    }

    /// Apply every tick that came due by `now`
    pub fn update(&mut self, now: Instant) -> Option<TimerEvent> {
        let due = self.ticker.poll(now);
        if due == 0 {
            return None;
        }

        let mut applied = 0;
        for _ in 0..due {
            match self.tick() {
                TickOutcome::Finished => return Some(TimerEvent::Finished),
                TickOutcome::Counted => applied += 1,
                TickOutcome::Ignored => break,
            }
        }
        (applied > 0).then_some(TimerEvent::Ticked(applied))
    }

    /// Edit the minutes field. Allowed in every state.
    pub fn set_minutes(&mut self, minutes: u32) -> Option<TimerEvent> {
        self.set_field(Field::Minutes, minutes)
    }

    /// Edit the seconds field, clamped to 59. Allowed in every state.
    pub fn set_seconds(&mut self, seconds: u32) -> Option<TimerEvent> {
        self.set_field(Field::Seconds, seconds)
    }

    fn set_field(&mut self, field: Field, value: u32) -> Option<TimerEvent> {
        self.countdown.set(field, value);
        debug!(field = field.label(), value = self.countdown.get(field), "countdown edited");

        if self.state.is_active() && self.countdown.is_zero() {
            self.finish();
            return Some(TimerEvent::Finished);
        }
        None
    }

    fn finish(&mut self) {
        self.ticker.stop();
        self.state = RunState::Idle;
        info!("timer finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn widget(minutes: u32, seconds: u32) -> TimerWidget {
        TimerWidget::default().with_countdown(Countdown::new(minutes, seconds))
    }

    #[test]
    fn test_start_requires_time() {
        let mut w = TimerWidget::default();
        assert!(!w.start(Instant::now()));
        assert_eq!(w.state(), RunState::Idle);
        assert!(!w.ticker().is_armed());
    }

    #[test]
    fn test_start_arms_ticker() {
        let mut w = widget(0, 5);
        assert!(w.start(Instant::now()));
        assert_eq!(w.state(), RunState::Running);
        assert!(w.ticker().is_armed());
        assert!(!w.can_start());
        assert!(w.can_pause());
    }

    #[test]
    fn test_start_ignored_while_paused() {
        let now = Instant::now();
        let mut w = widget(1, 0);
        w.start(now);
        w.toggle_pause(now);
        assert!(!w.start(now));
        assert_eq!(w.state(), RunState::Paused);
    }

    #[test]
    fn test_pause_keeps_countdown() {
        let now = Instant::now();
        let mut w = widget(3, 10);
        w.start(now);

        assert!(w.toggle_pause(now));
        assert_eq!(w.state(), RunState::Paused);
        assert_eq!(w.pause_label(), "Resume");
        assert_eq!(w.countdown(), Countdown::new(3, 10));
        assert!(!w.ticker().is_armed());

        assert!(w.toggle_pause(now));
        assert_eq!(w.state(), RunState::Running);
        assert_eq!(w.pause_label(), "Pause");
        assert_eq!(w.countdown(), Countdown::new(3, 10));
    }

    #[test]
    fn test_pause_from_idle_is_noop() {
        let mut w = widget(1, 0);
        assert!(!w.toggle_pause(Instant::now()));
        assert_eq!(w.state(), RunState::Idle);
    }

    #[test]
    fn test_paused_does_not_tick() {
        let t0 = Instant::now();
        let mut w = widget(0, 10);
        w.start(t0);
        w.toggle_pause(t0);
        assert_eq!(w.tick(), TickOutcome::Ignored);
        assert_eq!(w.update(t0 + Duration::from_secs(5)), None);
        assert_eq!(w.countdown(), Countdown::new(0, 10));
    }

    #[test]
    fn test_reset_from_every_state() {
        let now = Instant::now();

        let mut idle = widget(2, 2);
        idle.reset();

        let mut running = widget(2, 2);
        running.start(now);
        running.reset();

        let mut paused = widget(2, 2);
        paused.start(now);
        paused.toggle_pause(now);
        paused.reset();

        for w in [idle, running, paused] {
            assert_eq!(w.state(), RunState::Idle);
            assert_eq!(w.countdown(), Countdown::ZERO);
            assert!(!w.ticker().is_armed());
        }
    }

    #[test]
    fn test_tick_borrows_minute() {
        let mut w = widget(1, 0);
        w.start(Instant::now());
        assert_eq!(w.tick(), TickOutcome::Counted);
        assert_eq!(w.countdown(), Countdown::new(0, 59));
    }

    #[test]
    fn test_three_ticks_from_two_seconds() {
        let mut w = widget(0, 2);
        w.start(Instant::now());

        let outcomes: Vec<TickOutcome> = (0..3).map(|_| w.tick()).collect();
        let finished = outcomes
            .iter()
            .filter(|o| **o == TickOutcome::Finished)
            .count();

        assert_eq!(finished, 1);
        assert_eq!(outcomes[2], TickOutcome::Ignored);
        assert_eq!(w.countdown(), Countdown::ZERO);
        assert_eq!(w.state(), RunState::Idle);
        assert!(!w.ticker().is_armed());
    }

    #[test]
    fn test_update_drains_elapsed_periods() {
        let t0 = Instant::now();
        let mut w = widget(0, 10);
        w.start(t0);

        assert_eq!(w.update(t0 + Duration::from_millis(500)), None);
        assert_eq!(
            w.update(t0 + Duration::from_millis(3100)),
            Some(TimerEvent::Ticked(3))
        );
        assert_eq!(w.countdown(), Countdown::new(0, 7));
    }

    #[test]
    fn test_update_reports_finish_once() {
        let t0 = Instant::now();
        let mut w = widget(0, 2);
        w.start(t0);

        assert_eq!(
            w.update(t0 + Duration::from_secs(3)),
            Some(TimerEvent::Finished)
        );
        assert_eq!(w.update(t0 + Duration::from_secs(6)), None);
        assert_eq!(w.state(), RunState::Idle);
    }

    #[test]
    fn test_edit_while_running() {
        let mut w = widget(5, 0);
        w.start(Instant::now());
        assert_eq!(w.set_seconds(90), None);
        assert_eq!(w.countdown(), Countdown::new(5, 59));
        assert_eq!(w.state(), RunState::Running);
    }

    #[test]
    fn test_edit_to_zero_while_active_finishes() {
        let mut w = widget(0, 30);
        w.start(Instant::now());
        assert_eq!(w.set_seconds(0), Some(TimerEvent::Finished));
        assert_eq!(w.state(), RunState::Idle);
    }

    #[test]
    fn test_edit_to_zero_while_paused_finishes() {
        let t0 = Instant::now();
        let mut w = widget(1, 30);
        w.start(t0);
        assert!(w.toggle_pause(t0 + Duration::from_millis(500)));
        assert_eq!(w.state(), RunState::Paused);

        assert_eq!(w.set_minutes(0), None);
        assert_eq!(w.set_seconds(0), Some(TimerEvent::Finished));
        assert_eq!(w.state(), RunState::Idle);
        assert!(!w.ticker().is_armed());
        assert!(w.can_start());
    }

    #[test]
    fn test_edit_to_zero_while_idle_is_quiet() {
        let mut w = widget(0, 30);
        assert_eq!(w.set_seconds(0), None);
        assert_eq!(w.state(), RunState::Idle);
    }
}
