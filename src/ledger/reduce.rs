//! Subtract recorded payments from gross debt

use crate::models::Settlement;

use super::matrix::DebtMatrix;

/// Apply settlements in record order to a copy of `gross`.
///
/// A payment only ever reduces the exact `from → to` entry; a payment with
/// no matching debt is ignored, and overpayment clamps the entry to zero.
pub fn apply_settlements(gross: &DebtMatrix, settlements: &[Settlement]) -> DebtMatrix {
    let mut net = gross.clone();
    for settlement in settlements {
        if !net.settle(settlement.from, settlement.to, settlement.amount.to_major()) {
            tracing::debug!(
                settlement = %settlement.id,
                from = %settlement.from,
                to = %settlement.to,
                "no outstanding debt for settlement"
            );
        }
    }
    net
}
