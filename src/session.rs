//! One tracking session: board, hit rate and the standing prediction
//!
//! Each recorded outcome is first graded against the standing prediction,
//! then placed on the board. Once the board holds enough samples the caller
//! may ask for the next prediction, which becomes the new standing one.
//!
//! Sessions share nothing, so any number can run side by side.

use crate::accuracy::AccuracyTracker;
use crate::config::EngineConfig;
use crate::grid::{GridSnapshot, OutcomeGrid, Placement};
use crate::predict::PredictionEngine;
use crate::types::{Outcome, Prediction};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether the board has enough history to predict from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SampleGate {
    Collecting { have: usize, need: usize },
    Ready,
}

/// Everything that changed when one outcome was recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundUpdate {
    pub placement: Placement,
    /// `Some(hit)` if the outcome was graded against a prediction
    pub graded: Option<bool>,
    pub gate: SampleGate,
}

#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    grid: OutcomeGrid,
    tracker: AccuracyTracker,
    engine: PredictionEngine,
    last_prediction: Option<Prediction>,
    min_samples: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Session {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            grid: OutcomeGrid::new(),
            tracker: AccuracyTracker::new(),
            engine: PredictionEngine::new(config.predictor),
            last_prediction: None,
            min_samples: config.min_samples,
        }
    }

    /// Record one observed outcome
    pub fn record(&mut self, outcome: Outcome) -> RoundUpdate {
        let called = self.last_prediction.as_ref().and_then(|p| p.outcome);
        let graded = self.tracker.reconcile(outcome, called);

        let placement = self.grid.append(outcome);
        if placement.reset {
            tracing::info!(session = %self.id, accuracy = %self.tracker, "board wiped on overflow, hit rate kept");
        }

        let gate = self.gate();
        if let SampleGate::Collecting { .. } = gate {
            self.last_prediction = None;
        }

        RoundUpdate { placement, graded, gate }
    }

    /// Current sample gate for the board
    pub fn gate(&self) -> SampleGate {
        let have = self.grid.len();
        if have < self.min_samples {
            SampleGate::Collecting {
                have,
                need: self.min_samples,
            }
        } else {
            SampleGate::Ready
        }
    }

    /// Run the engine over the board and make the result the standing prediction
    pub fn predict(&mut self, rng: &mut impl Rng) -> Prediction {
        let prediction = self.engine.predict(self.grid.events(), rng);
        tracing::info!(
            session = %self.id,
            outcome = %prediction.label(),
            confidence = prediction.confidence,
            reason = ?prediction.reason,
            "issued prediction"
        );
        self.last_prediction = Some(prediction.clone());
        prediction
    }

    /// Explicit user reset: clears the board, the hit rate and the standing prediction
    pub fn reset_board(&mut self) {
        self.grid.reset();
        self.tracker.reset();
        self.last_prediction = None;
        tracing::info!(session = %self.id, "board reset");
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn grid(&self) -> &OutcomeGrid {
        &self.grid
    }

    pub fn tracker(&self) -> &AccuracyTracker {
        &self.tracker
    }

    pub fn last_prediction(&self) -> Option<&Prediction> {
        self.last_prediction.as_ref()
    }

    pub fn snapshot(&self) -> GridSnapshot {
        self.grid.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Side, COLUMNS, ROWS};
    use rand::prelude::*;

    fn record_all(session: &mut Session, outcomes: &[Outcome]) {
        for &outcome in outcomes {
            session.record(outcome);
        }
    }

    #[test]
    fn test_collecting_until_min_samples() {
        let mut session = Session::default();
        for n in 1..5 {
            let update = session.record(Outcome::Banker);
            assert_eq!(update.gate, SampleGate::Collecting { have: n, need: 5 });
        }
        assert_eq!(session.record(Outcome::Player).gate, SampleGate::Ready);
    }

    #[test]
    fn test_prediction_is_graded_by_next_outcome() {
        let mut session = Session::default();
        let mut rng = StdRng::seed_from_u64(9);
        record_all(&mut session, &[Outcome::Banker; 5]);

        let prediction = session.predict(&mut rng);
        let called = prediction.outcome.unwrap();
        assert_eq!(session.last_prediction(), Some(&prediction));

        let update = session.record(called.outcome());
        assert_eq!(update.graded, Some(true));
        assert_eq!(session.tracker().total(), 1);
        assert_eq!(session.tracker().accuracy(), 100);

        // Standing prediction stays until replaced, so a miss is graded against it too
        let update = session.record(called.opposite().outcome());
        assert_eq!(update.graded, Some(false));
        assert_eq!(session.tracker().to_string(), "50% (1/2)");
    }

    #[test]
    fn test_tie_is_not_graded() {
        let mut session = Session::default();
        let mut rng = StdRng::seed_from_u64(5);
        record_all(&mut session, &[Outcome::Player; 5]);
        session.predict(&mut rng);

        let update = session.record(Outcome::Tie);
        assert_eq!(update.graded, None);
        assert_eq!(session.tracker().total(), 0);
    }

    #[test]
    fn test_nothing_graded_without_prediction() {
        let mut session = Session::default();
        record_all(&mut session, &[Outcome::Banker, Outcome::Player, Outcome::Banker]);
        assert_eq!(session.tracker().total(), 0);
        assert!(session.last_prediction().is_none());
    }

    #[test]
    fn test_overflow_keeps_accuracy() {
        let mut session = Session::default();
        let mut rng = StdRng::seed_from_u64(21);

        record_all(&mut session, &[Outcome::Banker; 5]);
        session.predict(&mut rng);
        while session.grid().len() < COLUMNS * ROWS {
            session.record(Outcome::Banker);
        }
        let graded_before = session.tracker().total();
        assert!(graded_before > 0);

        let update = session.record(Outcome::Player);
        assert!(update.placement.reset);
        assert_eq!(session.grid().len(), 1);
        // The overflowing outcome was graded before the wipe
        assert_eq!(session.tracker().total(), graded_before + 1);
        // Back below the sample gate, so the standing prediction is dropped
        assert_eq!(update.gate, SampleGate::Collecting { have: 1, need: 5 });
        assert!(session.last_prediction().is_none());
    }

    #[test]
    fn test_explicit_reset_clears_everything() {
        let mut session = Session::default();
        let mut rng = StdRng::seed_from_u64(2);
        record_all(&mut session, &[Outcome::Player; 6]);
        session.predict(&mut rng);
        session.record(Outcome::Player);
        assert_eq!(session.tracker().total(), 1);

        session.reset_board();
        assert!(session.grid().is_empty());
        assert_eq!(session.tracker().total(), 0);
        assert_eq!(session.tracker().correct(), 0);
        assert!(session.last_prediction().is_none());
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut first = Session::default();
        let mut second = Session::default();
        assert_ne!(first.id(), second.id());

        let mut rng = StdRng::seed_from_u64(8);
        record_all(&mut first, &[Outcome::Banker; 5]);
        first.predict(&mut rng);
        second.record(Outcome::Banker);

        assert!(second.last_prediction().is_none());
        assert_eq!(second.grid().len(), 1);
        assert_eq!(second.tracker().total(), 0);
    }

    #[test]
    fn test_custom_min_samples() {
        let mut session = Session::new(EngineConfig {
            min_samples: 2,
            ..Default::default()
        });
        assert!(matches!(session.record(Outcome::Tie).gate, SampleGate::Collecting { .. }));
        assert_eq!(session.record(Outcome::Tie).gate, SampleGate::Ready);

        let mut rng = StdRng::seed_from_u64(4);
        let prediction = session.predict(&mut rng);
        assert!(matches!(prediction.outcome, Some(Side::Banker) | Some(Side::Player)));
    }
}
