use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

/// Per-session record of the most recent submission attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThrottleState {
    pub last_submission: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleDecision {
    Allowed,
    Rejected { until: DateTime<Utc> },
}

impl ThrottleDecision {
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

impl ThrottleState {
    /// Decides whether a submission at `now` may proceed.
    ///
    /// An allowed attempt moves the timestamp to `now`. A rejected attempt
    /// returns the state unchanged, so the existing wait window is not
    /// extended. A window too large to add to the timestamp keeps the session
    /// rejected until the end of representable time.
    pub fn check(self, now: DateTime<Utc>, window: Duration) -> (ThrottleDecision, Self) {
        if let Some(last_submission) = self.last_submission {
            let until = TimeDelta::from_std(window)
                .ok()
                .and_then(|window| last_submission.checked_add_signed(window))
                .unwrap_or(DateTime::<Utc>::MAX_UTC);
            if now < until {
                return (ThrottleDecision::Rejected { until }, self);
            }
        }

        (
            ThrottleDecision::Allowed,
            Self {
                last_submission: Some(now),
            },
        )
    }
}
