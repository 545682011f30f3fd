//! Prediction credits
//!
//! Every prediction costs one credit. The gate sits outside the session:
//! the session never knows about balances, and a failed debit never blocks
//! or changes a prediction. It is logged and reported back to the caller,
//! who decides how to warn the user. Nothing here retries.

use crate::db;
use crate::session::{SampleGate, Session};
use crate::types::Prediction;
use anyhow::{bail, Result};
use chrono::Utc;
use rand::Rng;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::Path;

/// Balance lookup and decrement for an account
pub trait CreditGate {
    fn balance(&self, account: &str) -> Result<i64>;

    /// Take one credit. Best effort from the caller's point of view.
    fn debit(&mut self, account: &str) -> Result<()>;
}

/// What happened to the credit after a prediction ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebitStatus {
    Charged,
    Failed(String),
}

/// Result of asking for a prediction through the gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Not enough history on the board yet
    Collecting { have: usize, need: usize },
    /// No credit left; the session was not touched
    OutOfCredits,
    /// The ledger could not be read; the session was not touched
    BalanceUnavailable(String),
    Predicted {
        prediction: Prediction,
        debit: DebitStatus,
    },
}

/// Check the sample gate and balance, charge one credit, then predict
pub fn request_prediction<G: CreditGate + ?Sized>(
    session: &mut Session,
    gate: &mut G,
    account: &str,
    rng: &mut impl Rng,
) -> GateOutcome {
    if let SampleGate::Collecting { have, need } = session.gate() {
        return GateOutcome::Collecting { have, need };
    }

    let balance = match gate.balance(account) {
        Ok(balance) => balance,
        Err(e) => {
            tracing::warn!(account, error = %e, "could not read credit balance");
            return GateOutcome::BalanceUnavailable(e.to_string());
        }
    };
    if balance <= 0 {
        tracing::info!(account, "prediction refused, no credits");
        return GateOutcome::OutOfCredits;
    }

    let debit = match gate.debit(account) {
        Ok(()) => DebitStatus::Charged,
        Err(e) => {
            tracing::warn!(account, error = %e, "credit debit failed, predicting anyway");
            DebitStatus::Failed(e.to_string())
        }
    };

    let prediction = session.predict(rng);
    GateOutcome::Predicted { prediction, debit }
}

/// Credit ledger backed by SQLite
pub struct SqliteLedger {
    conn: Connection,
}

impl SqliteLedger {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            conn: db::init_db(path)?,
        })
    }

    pub fn from_connection(conn: Connection) -> Result<Self> {
        db::init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Add credits to an account, creating it if needed. Returns the new balance.
    pub fn grant(&mut self, account: &str, amount: i64) -> Result<i64> {
        let now = Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO accounts (id, credits, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                credits = credits + ?2,
                updated_at = ?3",
            params![account, amount, now],
        )?;
        tx.execute(
            "INSERT INTO credit_events (account_id, delta, note, recorded_at)
             VALUES (?1, ?2, 'grant', ?3)",
            params![account, amount, now],
        )?;
        tx.commit()?;

        tracing::info!(account, amount, "granted credits");
        self.balance(account)
    }

    /// Number of ledger entries recorded for an account
    pub fn history_len(&self, account: &str) -> Result<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM credit_events WHERE account_id = ?1",
            [account],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

impl CreditGate for SqliteLedger {
    fn balance(&self, account: &str) -> Result<i64> {
        let credits: Option<i64> = self
            .conn
            .query_row(
                "SELECT credits FROM accounts WHERE id = ?1",
                [account],
                |row| row.get(0),
            )
            .optional()?;
        Ok(credits.unwrap_or(0))
    }

    fn debit(&mut self, account: &str) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;
        let rows = tx.execute(
            "UPDATE accounts
             SET credits = credits - 1,
                 updated_at = ?2
             WHERE id = ?1",
            params![account, now],
        )?;
        if rows == 0 {
            bail!("no such account: {}", account);
        }
        tx.execute(
            "INSERT INTO credit_events (account_id, delta, note, recorded_at)
             VALUES (?1, -1, 'prediction', ?2)",
            params![account, now],
        )?;
        tx.commit()?;
        Ok(())
    }
}

/// In-process ledger for tests and throwaway sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    balances: HashMap<String, i64>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credits(account: &str, credits: i64) -> Self {
        let mut ledger = Self::new();
        ledger.balances.insert(account.to_string(), credits);
        ledger
    }
}

impl CreditGate for MemoryLedger {
    fn balance(&self, account: &str) -> Result<i64> {
        Ok(self.balances.get(account).copied().unwrap_or(0))
    }

    fn debit(&mut self, account: &str) -> Result<()> {
        match self.balances.get_mut(account) {
            Some(credits) => {
                *credits -= 1;
                Ok(())
            }
            None => bail!("no such account: {}", account),
        }
    }
}
