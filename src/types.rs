//! Core types for the Big Road tracker
//!
//! Everything here is a plain value: outcomes, placed grid events and
//! the prediction handed to presentation.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of columns on the board
pub const COLUMNS: usize = 14;

/// Number of rows on the board
pub const ROWS: usize = 6;

/// Minimum history length before a prediction may be requested
pub const MIN_SAMPLES: usize = 5;

/// One observed hand result
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Banker,
    Player,
    /// Neutral result, excluded from streak/alternation signals and scoring
    Tie,
}

/// One of the two competing sides a prediction can call
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Banker,
    Player,
}

/// An outcome placed on the board. Coordinates never change after placement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutcomeEvent {
    pub outcome: Outcome,
    pub column: usize,
    pub row: usize,
}

/// Why the engine called what it called
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    /// No history yet
    Waiting,
    /// Only the trend signal contributed
    Baseline,
    /// Last two outcomes matched
    Streak,
    /// Last two outcomes differed
    Alternation,
    /// The last outcome was a tie; confidence was penalized
    RecentTie,
}

/// Staking advice derived from confidence
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Advice {
    AwaitInput,
    StrongGo,
    SteadyGo,
    Caution,
    Skip,
}

/// Result of one engine run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Prediction {
    /// `None` when there was nothing to predict from
    pub outcome: Option<Side>,
    /// Percentage, always within 0..=100
    pub confidence: u8,
    pub reason: Reason,
    pub advice: Advice,
}

impl Outcome {
    /// The competing side this outcome belongs to, if any
    pub fn side(&self) -> Option<Side> {
        match self {
            Outcome::Banker => Some(Side::Banker),
            Outcome::Player => Some(Side::Player),
            Outcome::Tie => None,
        }
    }

    pub fn is_tie(&self) -> bool {
        matches!(self, Outcome::Tie)
    }

    /// Short marker label drawn inside each grid cell
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Banker => "B",
            Outcome::Player => "P",
            Outcome::Tie => "T",
        }
    }

    /// Marker fill color for graphical renderers
    pub fn color_hex(&self) -> &'static str {
        match self {
            Outcome::Banker => "#ef4444",
            Outcome::Player => "#3b82f6",
            Outcome::Tie => "#10b981",
        }
    }
}

impl FromStr for Outcome {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "b" | "banker" => Ok(Outcome::Banker),
            "p" | "player" => Ok(Outcome::Player),
            "t" | "tie" => Ok(Outcome::Tie),
            other => bail!("unknown outcome '{}': expected b, p or t", other),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Banker => write!(f, "BANKER"),
            Outcome::Player => write!(f, "PLAYER"),
            Outcome::Tie => write!(f, "TIE"),
        }
    }
}

impl Side {
    pub fn opposite(&self) -> Side {
        match self {
            Side::Banker => Side::Player,
            Side::Player => Side::Banker,
        }
    }

    pub fn outcome(&self) -> Outcome {
        match self {
            Side::Banker => Outcome::Banker,
            Side::Player => Outcome::Player,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.outcome(), f)
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Reason::Waiting => "Waiting for data",
            Reason::Baseline => "Trend matrix",
            Reason::Streak => "Streak (dragon)",
            Reason::Alternation => "Alternation (ping pong)",
            Reason::RecentTie => "Tie just landed (risky)",
        };
        f.write_str(text)
    }
}

impl fmt::Display for Advice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Advice::AwaitInput => "Enter results to begin",
            Advice::StrongGo => "Confident, go in",
            Advice::SteadyGo => "Keep stakes steady",
            Advice::Caution => "Stake lightly",
            Advice::Skip => "Sit this one out",
        };
        f.write_str(text)
    }
}

impl Prediction {
    /// Placeholder returned before any outcome has been recorded
    pub fn waiting() -> Self {
        Self {
            outcome: None,
            confidence: 0,
            reason: Reason::Waiting,
            advice: Advice::AwaitInput,
        }
    }

    /// Label for the called side, `?` when unknown
    pub fn label(&self) -> String {
        match self.outcome {
            Some(side) => side.to_string(),
            None => "?".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_parse() {
        assert_eq!("b".parse::<Outcome>().unwrap(), Outcome::Banker);
        assert_eq!(" Player ".parse::<Outcome>().unwrap(), Outcome::Player);
        assert_eq!("T".parse::<Outcome>().unwrap(), Outcome::Tie);
        assert!("x".parse::<Outcome>().is_err());
    }

    #[test]
    fn test_side_mapping() {
        assert_eq!(Outcome::Banker.side(), Some(Side::Banker));
        assert_eq!(Outcome::Tie.side(), None);
        assert_eq!(Side::Banker.opposite(), Side::Player);
        assert_eq!(Side::Player.outcome(), Outcome::Player);
        assert_eq!(Outcome::Tie.label(), "T");
        assert_eq!(Outcome::Banker.color_hex(), "#ef4444");
    }

    #[test]
    fn test_prediction_serializes_lowercase() {
        let prediction = Prediction {
            outcome: Some(Side::Banker),
            confidence: 80,
            reason: Reason::RecentTie,
            advice: Advice::SteadyGo,
        };
        let json = serde_json::to_value(&prediction).unwrap();
        assert_eq!(json["outcome"], "banker");
        assert_eq!(json["reason"], "recent_tie");
        assert_eq!(json["advice"], "steady_go");
    }

    #[test]
    fn test_waiting_label() {
        assert_eq!(Prediction::waiting().label(), "?");
    }
}
