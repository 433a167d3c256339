//! Portfolio Aggregation
//!
//! Pure derived-metrics computation over the current investment
//! collection. Re-run in full on every store notification; deterministic,
//! no side effects, no caching.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::model::{AssetType, InvestmentAsset};

/// One asset type's share of the portfolio
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSlice {
    #[serde(rename = "type")]
    pub asset_type: AssetType,

    /// Summed current value of the group's members
    pub value: Decimal,

    /// Share of total portfolio value; 0 when the portfolio is worth 0
    pub percentage: Decimal,
}

/// Portfolio-level derived metrics, computed fresh on every render
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateMetrics {
    /// Σ purchase price × quantity
    pub total_invested: Decimal,

    /// Σ current price × quantity (purchase-price fallback per asset)
    pub total_current_value: Decimal,

    /// total current value − total invested
    pub absolute_profitability: Decimal,

    /// Profitability as a percentage of invested; 0 when nothing invested
    pub profitability_percentage: Decimal,

    /// Number of records in the input
    pub asset_count: usize,

    /// Per-type breakdown, in first-encountered type order.
    /// The ordering is cosmetic (stable chart coloring), not semantic.
    pub allocation: Vec<AllocationSlice>,
}

impl AggregateMetrics {
    /// Metrics of an empty portfolio: all zeros, empty breakdown
    pub fn empty() -> Self {
        Self {
            total_invested: Decimal::ZERO,
            total_current_value: Decimal::ZERO,
            absolute_profitability: Decimal::ZERO,
            profitability_percentage: Decimal::ZERO,
            asset_count: 0,
            allocation: Vec::new(),
        }
    }
}

/// Compute portfolio-level metrics for a collection of assets.
///
/// Duplicates are not deduplicated; the caller guarantees id uniqueness.
/// Malformed numeric input is a precondition violation handled by the
/// data-entry layer, not here.
pub fn aggregate(assets: &[InvestmentAsset]) -> AggregateMetrics {
    let mut total_invested = Decimal::ZERO;
    let mut total_current_value = Decimal::ZERO;
    let mut groups: Vec<(AssetType, Decimal)> = Vec::new();

    for asset in assets {
        total_invested += asset.cost_basis();
        let value = asset.current_value();
        total_current_value += value;

        match groups.iter_mut().find(|(t, _)| *t == asset.asset_type) {
            Some((_, group_value)) => *group_value += value,
            None => groups.push((asset.asset_type, value)),
        }
    }

    let absolute_profitability = total_current_value - total_invested;

    let profitability_percentage = if total_invested > Decimal::ZERO {
        (absolute_profitability / total_invested) * dec!(100)
    } else {
        Decimal::ZERO
    };

    let allocation = groups
        .into_iter()
        .map(|(asset_type, value)| {
            let percentage = if total_current_value > Decimal::ZERO {
                (value / total_current_value) * dec!(100)
            } else {
                Decimal::ZERO
            };
            AllocationSlice {
                asset_type,
                value,
                percentage,
            }
        })
        .collect();

    AggregateMetrics {
        total_invested,
        total_current_value,
        absolute_profitability,
        profitability_percentage,
        asset_count: assets.len(),
        allocation,
    }
}
