//! Running hit rate of the predictor
//!
//! Every non-tie outcome that arrives after a prediction is graded against
//! it. Ties are skipped. Only an explicit board reset clears the counters;
//! the grid's overflow reset leaves them alone.

use crate::types::{Outcome, Side};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccuracyTracker {
    correct: u32,
    total: u32,
}

impl AccuracyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grade `outcome` against the prediction issued before it arrived.
    ///
    /// Returns `Some(hit)` when the round was graded, `None` when there was
    /// no prediction or the outcome was a tie.
    pub fn reconcile(&mut self, outcome: Outcome, last_prediction: Option<Side>) -> Option<bool> {
        let predicted = last_prediction?;
        let actual = outcome.side()?;

        let hit = actual == predicted;
        self.total += 1;
        if hit {
            self.correct += 1;
        }

        tracing::debug!(?predicted, ?actual, hit, correct = self.correct, total = self.total, "graded round");
        Some(hit)
    }

    /// Hit rate as a whole percentage; 100 before anything was graded
    pub fn accuracy(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        (self.correct as f64 / self.total as f64 * 100.0).round() as u8
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn reset(&mut self) {
        self.correct = 0;
        self.total = 0;
    }
}

impl fmt::Display for AccuracyTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}% ({}/{})", self.accuracy(), self.correct, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vacuous_accuracy() {
        let tracker = AccuracyTracker::new();
        assert_eq!(tracker.accuracy(), 100);
        assert_eq!(tracker.to_string(), "100% (0/0)");
    }

    #[test]
    fn test_three_of_four() {
        let mut tracker = AccuracyTracker::new();
        assert_eq!(tracker.reconcile(Outcome::Banker, Some(Side::Banker)), Some(true));
        assert_eq!(tracker.reconcile(Outcome::Player, Some(Side::Player)), Some(true));
        assert_eq!(tracker.reconcile(Outcome::Banker, Some(Side::Player)), Some(false));
        assert_eq!(tracker.reconcile(Outcome::Player, Some(Side::Player)), Some(true));

        assert_eq!(tracker.total(), 4);
        assert_eq!(tracker.correct(), 3);
        assert_eq!(tracker.accuracy(), 75);
        assert_eq!(tracker.to_string(), "75% (3/4)");
    }

    #[test]
    fn test_rounds_to_nearest() {
        let mut tracker = AccuracyTracker::new();
        tracker.reconcile(Outcome::Banker, Some(Side::Banker));
        tracker.reconcile(Outcome::Banker, Some(Side::Banker));
        tracker.reconcile(Outcome::Banker, Some(Side::Player));
        // 2/3 = 66.67
        assert_eq!(tracker.accuracy(), 67);
    }

    #[test]
    fn test_tie_never_graded() {
        let mut tracker = AccuracyTracker::new();
        tracker.reconcile(Outcome::Banker, Some(Side::Banker));
        assert_eq!(tracker.reconcile(Outcome::Tie, Some(Side::Banker)), None);
        assert_eq!(tracker.reconcile(Outcome::Tie, Some(Side::Player)), None);
        assert_eq!((tracker.correct(), tracker.total()), (1, 1));
    }

    #[test]
    fn test_no_prediction_is_noop() {
        let mut tracker = AccuracyTracker::new();
        assert_eq!(tracker.reconcile(Outcome::Player, None), None);
        assert_eq!(tracker.total(), 0);
    }

    #[test]
    fn test_reset() {
        let mut tracker = AccuracyTracker::new();
        tracker.reconcile(Outcome::Player, Some(Side::Banker));
        tracker.reset();
        assert_eq!((tracker.correct(), tracker.total()), (0, 0));
        assert_eq!(tracker.accuracy(), 100);
    }
}
