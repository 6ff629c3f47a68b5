//! Settlement Suggestions
//!
//! Turns net balances into a short list of transfers: debtors and
//! creditors are sorted largest-first and matched greedily until every
//! net is inside the minimum-transfer epsilon. Greedy matching gives the
//! minimal transfer count for the common case; provably optimal
//! transaction minimization is out of scope.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::ledger::balance::Balance;

/// Configuration for settlement suggestions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementConfig {
    /// Nets smaller than this are treated as already settled
    pub min_transfer: f64,
    /// Currency the transfers are denominated in; must match the
    /// currency the balances were computed in
    pub currency: String,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            min_transfer: 0.01,
            currency: "USD".to_string(),
        }
    }
}

impl SettlementConfig {
    /// Validate configuration values and return errors for invalid settings.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !self.min_transfer.is_finite() || self.min_transfer <= 0.0 {
            errors.push(format!(
                "min_transfer must be a positive finite number, got {}",
                self.min_transfer
            ));
        }
        if self.currency.trim().is_empty() {
            errors.push("currency must not be empty".to_string());
        }
        errors
    }
}

/// A suggested repayment between two participants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    /// Who pays
    pub from: String,
    /// Who receives
    pub to: String,
    /// Amount rounded to cents
    pub amount: f64,
    /// Currency of the amount
    pub currency: String,
}

/// Settlement planner
pub struct SettlementPlanner {
    /// Configuration
    pub config: SettlementConfig,
}

impl SettlementPlanner {
    /// Create with default config
    pub fn new() -> Self {
        Self {
            config: SettlementConfig::default(),
        }
    }

    /// Create with custom config
    pub fn with_config(config: SettlementConfig) -> Self {
        Self { config }
    }

    /// Suggest transfers that settle the given balances.
    ///
    /// Residual nets below `min_transfer` are dropped, so float crumbs
    /// from the balance reduction never become one-cent transfers.
    pub fn suggest(&self, balances: &[Balance]) -> Vec<Transfer> {
        let eps = self.config.min_transfer;

        let mut debtors: Vec<(String, f64)> = balances
            .iter()
            .filter(|b| b.net < -eps)
            .map(|b| (b.participant.clone(), -b.net))
            .collect();
        let mut creditors: Vec<(String, f64)> = balances
            .iter()
            .filter(|b| b.net > eps)
            .map(|b| (b.participant.clone(), b.net))
            .collect();

        let descending =
            |a: &(String, f64), b: &(String, f64)| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal);
        debtors.sort_by(descending);
        creditors.sort_by(descending);

        let mut transfers = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < debtors.len() && j < creditors.len() {
            let amount = debtors[i].1.min(creditors[j].1);
            if amount >= eps {
                transfers.push(Transfer {
                    from: debtors[i].0.clone(),
                    to: creditors[j].0.clone(),
                    amount: round_cents(amount),
                    currency: self.config.currency.clone(),
                });
            }
            debtors[i].1 -= amount;
            creditors[j].1 -= amount;
            if debtors[i].1 < eps {
                i += 1;
            }
            if creditors[j].1 < eps {
                j += 1;
            }
        }

        transfers
    }
}

impl Default for SettlementPlanner {
    fn default() -> Self {
        Self::new()
    }
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
