//! Next-hand prediction heuristic
//!
//! Scores Banker and Player from three layered signals:
//! 1. Streak: the last two outcomes match
//! 2. Alternation: the last two outcomes differ (history of 3+)
//! 3. Trend: the lagging side over the recent window gets a mean-reversion
//!    bonus, or a coin flip decides a small bonus when neither side leads
//!
//! Confidence is a random draw, not derived from the scores. A tie as the
//! most recent outcome knocks confidence down and overrides the reason.
//!
//! This is an informal heuristic. It makes no claim to be calibrated.

use crate::types::{Advice, Outcome, OutcomeEvent, Prediction, Reason, Side};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Weights and thresholds for the heuristic
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PredictorConfig {
    /// Bonus for the side on a streak
    pub streak_bonus: i32,
    /// Bonus for the side opposite the last outcome when alternating
    pub alternation_bonus: i32,
    /// Bonus for the lagging side when the window is lopsided
    pub trend_bonus: i32,
    /// Bonus for a random side when the window is balanced
    pub coin_bonus: i32,
    /// Number of most recent events the trend signal looks at
    pub trend_window: usize,
    /// Lead a side must exceed before the trend signal counters it
    pub trend_margin: usize,
    /// Inclusive bounds of the confidence draw
    pub confidence_min: i32,
    pub confidence_max: i32,
    /// Confidence deducted when the last outcome was a tie
    pub tie_penalty: i32,
    /// Advice thresholds, checked from the top down
    pub strong_go_at: u8,
    pub steady_go_at: u8,
    pub caution_at: u8,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            streak_bonus: 30,
            alternation_bonus: 35,
            trend_bonus: 20,
            coin_bonus: 10,
            trend_window: 10,
            trend_margin: 2,
            confidence_min: 65,
            confidence_max: 95,
            tie_penalty: 15,
            strong_go_at: 85,
            steady_go_at: 75,
            caution_at: 65,
        }
    }
}

/// The random inputs of one prediction, drawn up front
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Draw {
    /// Side that gets the coin bonus if the trend window is balanced
    pub coin: Side,
    /// Raw confidence before the tie penalty and clamping
    pub confidence: i32,
}

impl Draw {
    pub fn sample(config: &PredictorConfig, rng: &mut impl Rng) -> Self {
        let coin = if rng.gen_bool(0.5) { Side::Banker } else { Side::Player };
        let (low, high) = if config.confidence_min <= config.confidence_max {
            (config.confidence_min, config.confidence_max)
        } else {
            (config.confidence_max, config.confidence_min)
        };
        Self {
            coin,
            confidence: rng.gen_range(low..=high),
        }
    }
}

/// Accumulated per-side score plus the pattern that fired last
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scores {
    pub banker: i32,
    pub player: i32,
    pub reason: Reason,
}

impl Scores {
    fn add(&mut self, side: Side, bonus: i32) {
        match side {
            Side::Banker => self.banker += bonus,
            Side::Player => self.player += bonus,
        }
    }

    /// Higher score wins; an even score goes to Player
    pub fn winner(&self) -> Side {
        if self.banker > self.player {
            Side::Banker
        } else {
            Side::Player
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PredictionEngine {
    config: PredictorConfig,
}

impl PredictionEngine {
    pub fn new(config: PredictorConfig) -> Self {
        Self { config }
    }

    /// Predict the next outcome, drawing randomness from `rng`
    pub fn predict(&self, history: &[OutcomeEvent], rng: &mut impl Rng) -> Prediction {
        if history.is_empty() {
            return Prediction::waiting();
        }
        let draw = Draw::sample(&self.config, rng);
        self.predict_with(history, draw)
    }

    /// Deterministic core of [`predict`](Self::predict)
    pub fn predict_with(&self, history: &[OutcomeEvent], draw: Draw) -> Prediction {
        let Some(last1) = history.last().map(|e| e.outcome) else {
            return Prediction::waiting();
        };

        let scores = self.score(history, draw.coin);
        let mut reason = scores.reason;
        let mut confidence = draw.confidence;

        if last1.is_tie() {
            confidence -= self.config.tie_penalty;
            reason = Reason::RecentTie;
        }

        let confidence = confidence.clamp(0, 100) as u8;
        let prediction = Prediction {
            outcome: Some(scores.winner()),
            confidence,
            reason,
            advice: self.advice(confidence),
        };

        tracing::debug!(
            banker = scores.banker,
            player = scores.player,
            ?prediction,
            "scored history of {} events",
            history.len()
        );

        prediction
    }

    /// Run the three pattern signals and return the raw scores
    pub fn score(&self, history: &[OutcomeEvent], coin: Side) -> Scores {
        let mut scores = Scores {
            banker: 0,
            player: 0,
            reason: Reason::Baseline,
        };

        let len = history.len();
        let last1 = history.last().map(|e| e.outcome);
        let last2 = if len >= 2 { Some(history[len - 2].outcome) } else { None };

        if let (Some(last1), Some(last2)) = (last1, last2) {
            // Streak
            if last1 == last2 {
                if let Some(side) = last1.side() {
                    scores.add(side, self.config.streak_bonus);
                    scores.reason = Reason::Streak;
                }
            }

            // Alternation
            if len >= 3 && last1 != last2 && !last2.is_tie() {
                if let Some(side) = last1.side() {
                    scores.add(side.opposite(), self.config.alternation_bonus);
                    scores.reason = Reason::Alternation;
                }
            }
        }

        // Trend / mean reversion
        let window = &history[len.saturating_sub(self.config.trend_window)..];
        let banker = count(window, Outcome::Banker);
        let player = count(window, Outcome::Player);

        if banker > player + self.config.trend_margin {
            scores.add(Side::Player, self.config.trend_bonus);
        } else if player > banker + self.config.trend_margin {
            scores.add(Side::Banker, self.config.trend_bonus);
        } else {
            scores.add(coin, self.config.coin_bonus);
        }

        scores
    }

    /// Map a final confidence to advice
    pub fn advice(&self, confidence: u8) -> Advice {
        if confidence >= self.config.strong_go_at {
            Advice::StrongGo
        } else if confidence >= self.config.steady_go_at {
            Advice::SteadyGo
        } else if confidence >= self.config.caution_at {
            Advice::Caution
        } else {
            Advice::Skip
        }
    }
}

fn count(events: &[OutcomeEvent], outcome: Outcome) -> usize {
    events.iter().filter(|e| e.outcome == outcome).count()
}
