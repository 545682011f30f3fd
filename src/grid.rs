//! Big Road grid placement
//!
//! Outcomes are packed column-first: each new outcome goes to the column
//! with the fewest markers (leftmost on ties). This is not true streak
//! grouping; it approximates the left-to-right, top-to-bottom fill order of
//! a road chart without look-ahead.
//!
//! When every column already holds `ROWS` markers the board wipes itself and
//! starts over at (0, 0). That overflow reset only touches the grid; the
//! accuracy counters live elsewhere and survive it.

use crate::types::{Outcome, OutcomeEvent, COLUMNS, ROWS};
use serde::{Deserialize, Serialize};

/// Where an append landed, and whether the board had to be wiped first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub event: OutcomeEvent,
    /// The board was full and was cleared before placing `event`
    pub reset: bool,
}

/// Read-only view handed to renderers after every mutation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GridSnapshot {
    pub columns: usize,
    pub rows: usize,
    pub events: Vec<OutcomeEvent>,
}

#[derive(Debug, Clone)]
pub struct OutcomeGrid {
    events: Vec<OutcomeEvent>,
    column_counts: [usize; COLUMNS],
}

impl Default for OutcomeGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl OutcomeGrid {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(COLUMNS * ROWS),
            column_counts: [0; COLUMNS],
        }
    }

    /// Place an outcome on the board
    pub fn append(&mut self, outcome: Outcome) -> Placement {
        let (mut column, mut row) = self.shortest_column();
        let mut reset = false;

        if row >= ROWS {
            tracing::info!(events = self.events.len(), "board full, starting a new road");
            self.reset();
            column = 0;
            row = 0;
            reset = true;
        }

        let event = OutcomeEvent { outcome, column, row };
        self.events.push(event);
        self.column_counts[column] += 1;

        tracing::debug!(?outcome, column, row, "placed outcome");

        Placement { event, reset }
    }

    /// Clear every marker unconditionally
    pub fn reset(&mut self) {
        self.events.clear();
        self.column_counts = [0; COLUMNS];
    }

    /// Column with the smallest fill count (leftmost wins ties), and that count
    fn shortest_column(&self) -> (usize, usize) {
        let mut best = 0;
        for column in 1..COLUMNS {
            if self.column_counts[column] < self.column_counts[best] {
                best = column;
            }
        }
        (best, self.column_counts[best])
    }

    /// Events in insertion order since the last reset
    pub fn events(&self) -> &[OutcomeEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn column_counts(&self) -> &[usize; COLUMNS] {
        &self.column_counts
    }

    /// Markers the board holds before the next append wipes it
    pub fn capacity(&self) -> usize {
        COLUMNS * ROWS
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            columns: COLUMNS,
            rows: ROWS,
            events: self.events.clone(),
        }
    }
}
