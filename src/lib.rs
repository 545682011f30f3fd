//! bigroad - Big Road tracker and next-hand predictor
//!
//! Tracks a Banker/Player/Tie sequence on a 14x6 road board, calls the
//! next hand with a confidence and a reason, and keeps score of how often
//! those calls land.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use bigroad::{Session, Outcome, MemoryLedger, request_prediction, GateOutcome};
//! use rand::thread_rng;
//!
//! let mut session = Session::default();
//! let mut ledger = MemoryLedger::with_credits("alice", 10);
//!
//! for outcome in [Outcome::Banker, Outcome::Banker, Outcome::Player, Outcome::Tie, Outcome::Banker] {
//!     let update = session.record(outcome);
//!     // hand session.snapshot() to a renderer
//! }
//!
//! if let GateOutcome::Predicted { prediction, .. } =
//!     request_prediction(&mut session, &mut ledger, "alice", &mut thread_rng())
//! {
//!     println!("{} {}% - {}", prediction.label(), prediction.confidence, prediction.advice);
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  record()   ┌──────────────────────────────────────┐
//! │    caller    │ ──────────▶ │ Session                              │
//! └──────┬───────┘             │  AccuracyTracker ◀─ last prediction  │
//!        │                     │  OutcomeGrid (14x6, wipe on full)    │
//!        │ request_prediction  │  PredictionEngine (streak/alt/trend) │
//!        ▼                     └──────────────────┬───────────────────┘
//! ┌──────────────┐                                │ snapshot()
//! │ CreditGate   │                                ▼
//! └──────────────┘                         ┌──────────────┐
//!                                          │  Renderer    │
//!                                          └──────────────┘
//! ```

pub mod accuracy;
pub mod config;
pub mod credits;
pub mod db;
pub mod grid;
pub mod predict;
pub mod render;
pub mod session;
pub mod types;

pub use accuracy::AccuracyTracker;
pub use config::EngineConfig;
pub use credits::{request_prediction, CreditGate, DebitStatus, GateOutcome, MemoryLedger, SqliteLedger};
pub use grid::{GridSnapshot, OutcomeGrid, Placement};
pub use predict::{Draw, PredictionEngine, PredictorConfig, Scores};
pub use render::{render_text, reveal, JsonRenderer, Renderer, TextRenderer};
pub use session::{RoundUpdate, SampleGate, Session};
pub use types::*;
