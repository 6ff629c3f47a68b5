//! Balance Computation
//!
//! Reduces an expense list into per-participant totals in one target
//! currency: what each person paid out, what their equal shares add up
//! to, and the resulting net.

use serde::{Deserialize, Serialize};

use crate::ledger::currency::ExchangeRates;
use crate::ledger::types::Expense;

/// Per-participant totals in the target currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    /// Participant name
    pub participant: String,
    /// Total this participant paid out
    pub paid: f64,
    /// Total of this participant's equal shares
    pub share: f64,
    /// `paid - share`; positive means the group owes them
    pub net: f64,
}

impl Balance {
    fn new(participant: &str) -> Self {
        Self {
            participant: participant.to_string(),
            paid: 0.0,
            share: 0.0,
            net: 0.0,
        }
    }
}

/// Index of the participant's slot, creating it on first sight.
///
/// Linear scan keeps first-seen order for the output; rosters are small.
fn slot(balances: &mut Vec<Balance>, name: &str) -> usize {
    match balances.iter().position(|b| b.participant == name) {
        Some(i) => i,
        None => {
            balances.push(Balance::new(name));
            balances.len() - 1
        }
    }
}

/// Compute per-participant balances over an expense list.
///
/// Every amount is normalized to `target` first; an expense in a currency
/// the rate table cannot resolve aborts the whole computation. Expenses
/// with an empty participant list contribute to the payer's `paid` but
/// produce no shares.
pub fn compute_balances(
    expenses: &[Expense],
    rates: &ExchangeRates,
    target: &str,
) -> crate::Result<Vec<Balance>> {
    let mut balances: Vec<Balance> = Vec::new();

    for expense in expenses {
        let amount = rates.convert(expense.amount, &expense.currency, target)?;

        let payer = slot(&mut balances, &expense.paid_by);
        balances[payer].paid += amount;

        if expense.participants.is_empty() {
            continue;
        }
        let share = amount / expense.participants.len() as f64;
        for participant in &expense.participants {
            let idx = slot(&mut balances, participant);
            balances[idx].share += share;
        }
    }

    for balance in &mut balances {
        balance.net = balance.paid - balance.share;
    }

    Ok(balances)
}
