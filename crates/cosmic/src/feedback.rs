//! The copy button's "Copied!" confirmation.

use std::time::{Duration, Instant};

const IDLE_LABEL: &str = "Copy";
const CONFIRMED_LABEL: &str = "Copied!";

/// Label state: idle, or confirmed until a deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackState {
    Idle,
    Confirmed { until: Instant },
}

/// Copy-button label with a single auto-revert deadline.
///
/// Confirming again while confirmed moves the deadline instead of adding a
/// second timer.
#[derive(Debug, Clone)]
pub struct CopyFeedback {
    state: FeedbackState,
    duration: Duration,
}

impl CopyFeedback {
    pub fn new(duration: Duration) -> Self {
        Self {
            state: FeedbackState::Idle,
            duration,
        }
    }

    /// Show the confirmation for the next `duration`.
    pub fn confirm(&mut self, now: Instant) {
        self.state = FeedbackState::Confirmed {
            until: now + self.duration,
        };
    }

    /// Revert to idle once the deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        if let FeedbackState::Confirmed { until } = self.state
            && now >= until
        {
            self.state = FeedbackState::Idle;
        }
    }

    pub fn state(&self) -> FeedbackState {
        self.state
    }

    pub fn is_confirmed(&self, now: Instant) -> bool {
        matches!(self.state, FeedbackState::Confirmed { until } if now < until)
    }

    pub fn label(&self, now: Instant) -> &'static str {
        if self.is_confirmed(now) {
            CONFIRMED_LABEL
        } else {
            IDLE_LABEL
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(1800);

    #[test]
    fn test_idle_by_default() {
        let feedback = CopyFeedback::new(WINDOW);
        assert_eq!(feedback.state(), FeedbackState::Idle);
        assert_eq!(feedback.label(Instant::now()), "Copy");
    }

    #[test]
    fn test_reverts_after_exactly_1800ms() {
        let mut feedback = CopyFeedback::new(WINDOW);
        let clicked = Instant::now();
        feedback.confirm(clicked);
        assert_eq!(feedback.label(clicked), "Copied!");

        let just_before = clicked + WINDOW - Duration::from_millis(1);
        feedback.tick(just_before);
        assert_eq!(feedback.label(just_before), "Copied!");

        let deadline = clicked + WINDOW;
        assert_eq!(feedback.label(deadline), "Copy");
        feedback.tick(deadline);
        assert_eq!(feedback.state(), FeedbackState::Idle);
    }

    #[test]
    fn test_second_click_restarts_window() {
        let mut feedback = CopyFeedback::new(WINDOW);
        let first = Instant::now();
        feedback.confirm(first);

        let second = first + Duration::from_millis(1000);
        feedback.tick(second);
        feedback.confirm(second);

        // The first deadline no longer applies.
        let first_deadline = first + WINDOW;
        feedback.tick(first_deadline);
        assert_eq!(feedback.label(first_deadline), "Copied!");
        assert_eq!(
            feedback.state(),
            FeedbackState::Confirmed {
                until: second + WINDOW
            }
        );

        let second_deadline = second + WINDOW;
        feedback.tick(second_deadline);
        assert_eq!(feedback.label(second_deadline), "Copy");
    }
}
