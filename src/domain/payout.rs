use super::ledger::Cost;
use serde::{Deserialize, Serialize};

/// Body of a server-to-server payout notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutRequest {
    pub cost: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutReceipt {
    pub accepted: bool,
    pub cost: Cost,
}

impl PayoutReceipt {
    pub fn accepted(cost: Cost) -> Self {
        Self {
            accepted: true,
            cost,
        }
    }
}
