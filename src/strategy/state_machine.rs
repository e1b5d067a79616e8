//! Breach-rejection sequencing for the session range fade
//!
//! Explicit state machine: Idle -> Breached -> Rejected -> Entered, reset to
//! Idle at the daily boundary. Per-tick precedence is strict — breach
//! timeout, then rejection, then entry window — as early-return branches, so
//! no tick affects more than one transition.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::session_range::SessionRange;

/// Which side of the session range was breached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreachDirection {
    Upper,
    Lower,
}

impl std::fmt::Display for BreachDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BreachDirection::Upper => write!(f, "UPPER"),
            BreachDirection::Lower => write!(f, "LOWER"),
        }
    }
}

/// Breach record, kept through `Rejected` for stop-loss computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breach {
    pub direction: BreachDirection,
    pub at: DateTime<Utc>,
    pub price: f64,
}

/// Snap back inside the range after a breach
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rejection {
    pub at: DateTime<Utc>,
    pub price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SetupState {
    Idle,
    Breached(Breach),
    Rejected { breach: Breach, rejection: Rejection },
    Entered,
}

/// All per-day state, replaced as one unit at the daily boundary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyState {
    pub range: SessionRange,
    pub setup: SetupState,
}

impl DailyState {
    pub fn new() -> Self {
        Self {
            range: SessionRange::new(),
            setup: SetupState::Idle,
        }
    }
}

impl Default for DailyState {
    fn default() -> Self {
        Self::new()
    }
}

/// State machine parameters
#[derive(Debug, Clone)]
pub struct SetupConfig {
    /// Distance beyond the range boundary confirming a breach
    pub breach_threshold: f64,
    /// Max time in Breached without a rejection before reverting to Idle
    pub breach_timeout: Duration,
    /// Reference session end hour (UTC); the range finalizes here
    pub session_end_hour: u32,
    /// Entry window start hour (UTC)
    pub entry_hour: u32,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            breach_threshold: 0.0001,
            breach_timeout: Duration::minutes(30),
            session_end_hour: 8,
            entry_hour: 13,
        }
    }
}

/// Observable transitions emitted by `on_tick`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SetupEvent {
    RangeFinalized { high: f64, low: f64 },
    BreachDetected(Breach),
    BreachTimedOut,
    RejectionDetected { breach: Breach, rejection: Rejection },
    /// A completed breach-rejection sequence inside the entry window. The
    /// caller validates and sizes the trade, then confirms with
    /// `mark_entered`; until then this fires again on subsequent ticks.
    EntryWindow { breach: Breach, rejection: Rejection },
}

pub struct BreachRejection {
    config: SetupConfig,
    daily: DailyState,
}

impl BreachRejection {
    pub fn new(config: SetupConfig) -> Self {
        Self {
            config,
            daily: DailyState::new(),
        }
    }

    pub fn state(&self) -> SetupState {
        self.daily.setup
    }

    pub fn range(&self) -> &SessionRange {
        &self.daily.range
    }

    /// Daily reset: swap in a fresh `DailyState`. Idempotent.
    pub fn reset_daily(&mut self) {
        self.daily = DailyState::new();
    }

    /// Confirm that the order triple for today's setup was submitted
    pub fn mark_entered(&mut self) {
        self.daily.setup = SetupState::Entered;
    }

    /// Evaluate one tick. Returns at most one transition.
    pub fn on_tick(&mut self, hour: u32, price: f64, now: DateTime<Utc>) -> Option<SetupEvent> {
        if !self.daily.range.finalized {
            self.daily.range.observe(hour, price, self.config.session_end_hour);
            if self.daily.range.finalized {
                return Some(SetupEvent::RangeFinalized {
                    high: self.daily.range.high,
                    low: self.daily.range.low,
                });
            }
            return None;
        }

        match self.daily.setup {
            SetupState::Idle => {
                // An undefined range must never produce a breach
                if !self.daily.range.is_defined() {
                    return None;
                }
                let direction = if price > self.daily.range.high + self.config.breach_threshold {
                    BreachDirection::Upper
                } else if price < self.daily.range.low - self.config.breach_threshold {
                    BreachDirection::Lower
                } else {
                    return None;
                };
                let breach = Breach {
                    direction,
                    at: now,
                    price,
                };
                self.daily.setup = SetupState::Breached(breach);
                Some(SetupEvent::BreachDetected(breach))
            }
            SetupState::Breached(breach) => {
                // Timeout first: a stale breach never converts to a rejection
                if now - breach.at > self.config.breach_timeout {
                    self.daily.setup = SetupState::Idle;
                    return Some(SetupEvent::BreachTimedOut);
                }
                let rejected = match breach.direction {
                    BreachDirection::Upper => price < self.daily.range.high,
                    BreachDirection::Lower => price > self.daily.range.low,
                };
                if rejected {
                    let rejection = Rejection { at: now, price };
                    self.daily.setup = SetupState::Rejected { breach, rejection };
                    return Some(SetupEvent::RejectionDetected { breach, rejection });
                }
                None
            }
            SetupState::Rejected { breach, rejection } => {
                if hour >= self.config.entry_hour {
                    return Some(SetupEvent::EntryWindow { breach, rejection });
                }
                None
            }
            SetupState::Entered => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, hour, minute, 0).unwrap()
    }

    /// Drive the machine through the reference session so the range
    /// finalizes at {low: 1.0950, high: 1.1000}.
    fn machine_with_range() -> BreachRejection {
        let mut sm = BreachRejection::new(SetupConfig::default());
        sm.on_tick(1, 1.0980, at(1, 0));
        sm.on_tick(3, 1.1000, at(3, 0));
        sm.on_tick(5, 1.0950, at(5, 0));
        let event = sm.on_tick(8, 1.0990, at(8, 0));
        assert_eq!(
            event,
            Some(SetupEvent::RangeFinalized {
                high: 1.1000,
                low: 1.0950
            })
        );
        sm
    }

    #[test]
    fn test_upper_breach_detected_beyond_threshold() {
        let mut sm = machine_with_range();

        // 1.1001 is exactly at high + threshold: not yet a breach
        assert_eq!(sm.on_tick(9, 1.1001, at(9, 0)), None);

        let event = sm.on_tick(9, 1.1011, at(9, 1));
        match event {
            Some(SetupEvent::BreachDetected(breach)) => {
                assert_eq!(breach.direction, BreachDirection::Upper);
                assert_eq!(breach.price, 1.1011);
            }
            other => panic!("expected breach, got {other:?}"),
        }
    }

    #[test]
    fn test_lower_breach_detected() {
        let mut sm = machine_with_range();
        let event = sm.on_tick(9, 1.0948, at(9, 0));
        match event {
            Some(SetupEvent::BreachDetected(breach)) => {
                assert_eq!(breach.direction, BreachDirection::Lower);
            }
            other => panic!("expected breach, got {other:?}"),
        }
    }

    #[test]
    fn test_breach_timeout_returns_to_idle() {
        let mut sm = machine_with_range();
        sm.on_tick(9, 1.1011, at(9, 0));

        // 35 minutes later, still outside the range: timeout wins
        let event = sm.on_tick(9, 1.1015, at(9, 35));
        assert_eq!(event, Some(SetupEvent::BreachTimedOut));
        assert_eq!(sm.state(), SetupState::Idle);

        // A fresh breach must be re-detected before proceeding
        let event = sm.on_tick(9, 1.1012, at(9, 36));
        assert!(matches!(event, Some(SetupEvent::BreachDetected(_))));
    }

    #[test]
    fn test_timeout_takes_precedence_over_rejection() {
        let mut sm = machine_with_range();
        sm.on_tick(9, 1.1011, at(9, 0));

        // This tick is back inside the range AND past the timeout; the
        // timeout branch must commit first.
        let event = sm.on_tick(9, 1.0995, at(9, 31));
        assert_eq!(event, Some(SetupEvent::BreachTimedOut));
        assert_eq!(sm.state(), SetupState::Idle);
    }

    #[test]
    fn test_rejection_retains_breach_data() {
        let mut sm = machine_with_range();
        sm.on_tick(9, 1.1011, at(9, 0));

        let event = sm.on_tick(9, 1.0995, at(9, 10));
        match event {
            Some(SetupEvent::RejectionDetected { breach, rejection }) => {
                assert_eq!(breach.price, 1.1011);
                assert_eq!(rejection.price, 1.0995);
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_rejection_requires_crossing_the_breached_boundary() {
        let mut sm = machine_with_range();
        sm.on_tick(9, 1.1011, at(9, 0));

        // Still above the session high: no rejection
        assert_eq!(sm.on_tick(9, 1.1005, at(9, 5)), None);
        assert!(matches!(sm.state(), SetupState::Breached(_)));
    }

    #[test]
    fn test_entry_window_gated_on_hour() {
        let mut sm = machine_with_range();
        sm.on_tick(9, 1.1011, at(9, 0));
        sm.on_tick(9, 1.0995, at(9, 10));

        // Before the entry hour the machine sits in Rejected indefinitely
        assert_eq!(sm.on_tick(10, 1.0990, at(10, 0)), None);
        assert_eq!(sm.on_tick(12, 1.0990, at(12, 59)), None);

        let event = sm.on_tick(13, 1.0992, at(13, 0));
        assert!(matches!(event, Some(SetupEvent::EntryWindow { .. })));

        // Fires again until the caller confirms the entry
        assert!(matches!(
            sm.on_tick(13, 1.0991, at(13, 1)),
            Some(SetupEvent::EntryWindow { .. })
        ));

        sm.mark_entered();
        assert_eq!(sm.on_tick(13, 1.0990, at(13, 2)), None);
        assert_eq!(sm.state(), SetupState::Entered);
    }

    #[test]
    fn test_no_breach_against_undefined_range() {
        let mut sm = BreachRejection::new(SetupConfig::default());
        // First tick arrives after the window: sentinels are frozen
        sm.on_tick(9, 1.1000, at(9, 0));
        assert!(sm.range().finalized);
        assert!(!sm.range().is_defined());

        // Any price would "exceed" the 0.0 sentinel high; must short-circuit
        assert_eq!(sm.on_tick(9, 1.5000, at(9, 1)), None);
        assert_eq!(sm.state(), SetupState::Idle);
    }

    #[test]
    fn test_no_breach_before_finalization() {
        let mut sm = BreachRejection::new(SetupConfig::default());
        sm.on_tick(1, 1.1000, at(1, 0));
        // Well beyond the running high, but the range is not finalized yet
        assert_eq!(sm.on_tick(2, 1.2000, at(2, 0)), None);
        assert_eq!(sm.state(), SetupState::Idle);
    }

    #[test]
    fn test_daily_reset_is_idempotent() {
        let mut sm = machine_with_range();
        sm.on_tick(9, 1.1011, at(9, 0));

        sm.reset_daily();
        let once = (sm.state(), *sm.range());
        sm.reset_daily();
        assert_eq!((sm.state(), *sm.range()), once);
        assert_eq!(sm.state(), SetupState::Idle);
        assert!(!sm.range().finalized);
    }

    #[test]
    fn test_range_finalizes_exactly_once_per_day() {
        let mut sm = machine_with_range();
        // Later ticks never re-finalize
        for minute in 1..30 {
            let event = sm.on_tick(8, 1.0990, at(8, minute));
            assert!(!matches!(event, Some(SetupEvent::RangeFinalized { .. })));
        }
        // After the daily reset a new finalization can happen
        sm.reset_daily();
        sm.on_tick(2, 1.0970, at(2, 0));
        let event = sm.on_tick(8, 1.0980, at(8, 0));
        assert!(matches!(event, Some(SetupEvent::RangeFinalized { .. })));
    }
}
