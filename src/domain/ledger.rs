use crate::error::GateError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tokio::sync::Mutex;

/// A strictly positive number of tokens requested by a caller.
///
/// Parsing rejects zero, negative and non-numeric input so the ledger only
/// ever sees costs that can be debited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cost(u64);

impl Cost {
    pub fn new(value: u64) -> Result<Self, GateError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(GateError::BadRequest(
                "Cost parameter is required".to_string(),
            ))
        }
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl TryFrom<i64> for Cost {
    type Error = GateError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let value = u64::try_from(value)
            .map_err(|_| GateError::BadRequest("Cost must be positive".to_string()))?;
        Self::new(value)
    }
}

impl FromStr for Cost {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u64>()
            .map_err(|_| GateError::BadRequest("Wrong format for cost".to_string()))?;
        Self::new(value)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebitOutcome {
    /// The cost was taken; carries the balance left afterwards.
    Debited(u64),
    /// The balance could not cover the cost and was left untouched.
    Insufficient { balance: u64 },
}

/// The single token balance shared by every request.
///
/// The balance is an unsigned counter behind a mutex; the only mutation is
/// [`Ledger::try_debit`], which reads, checks and writes under one guard.
#[derive(Debug)]
pub struct Ledger {
    balance: Mutex<u64>,
}

impl Ledger {
    pub fn new(initial_balance: u64) -> Self {
        Self {
            balance: Mutex::new(initial_balance),
        }
    }

    pub async fn try_debit(&self, cost: Cost) -> DebitOutcome {
        let mut balance = self.balance.lock().await;
        match balance.checked_sub(cost.value()) {
            Some(remaining) => {
                *balance = remaining;
                DebitOutcome::Debited(remaining)
            }
            None => DebitOutcome::Insufficient { balance: *balance },
        }
    }

    pub async fn balance(&self) -> u64 {
        *self.balance.lock().await
    }
}
