//! # portfolio-advisor
//!
//! Personal investment-portfolio domain logic: asset records, portfolio
//! aggregation, and AI-backed analysis and alert generation.
//!
//! ## Shape of the system
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  InvestmentStore (live subscription)                        │
//! │        │ full collection on every change                    │
//! │        ▼                                                    │
//! │  aggregate() ──▶ AggregateMetrics (totals, P&L, allocation) │
//! │                                                             │
//! │  flows::analyze ──▶ LlmProvider ──▶ PortfolioAnalysis       │
//! │  flows::alerts  ──▶ LlmProvider ──▶ Vec<SmartAlert>         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The aggregator is a pure function re-run on every store notification;
//! it never caches. The two AI flows are single stateless round trips
//! whose responses are schema-validated before anything reaches a user:
//! the model's output is untrusted free-form generation, so the boundary
//! fails closed on any shape it does not recognize.

pub mod aggregate;
pub mod error;
pub mod flows;
pub mod model;
pub mod store;

pub use aggregate::{aggregate, AggregateMetrics, AllocationSlice};
pub use error::{AdvisorError, Result};
pub use model::{
    AlertType, AssetType, InvestmentAsset, NewInvestment, PortfolioSnapshot, RiskProfile,
    SmartAlert,
};
pub use store::{InvestmentStore, MemoryInvestmentStore};

/// System prompt shared by the analysis and alert-generation flows
pub const INVESTMENT_ASSISTANT_PROMPT: &str = r#"You are an AI-powered investment assistant that analyzes user investment portfolios, assesses risk profiles, and provides personalized recommendations and alerts.

## Ground Rules

1. **Respond with JSON only** - No prose before or after the JSON object
2. **Be clear, objective, and minimal** - Alerts and recommendations must be actionable
3. **Never invent holdings** - Reason only about the assets you are given
4. **Risk profiles** are one of: Conservative, Moderate, Aggressive

## Alert Types

- High Volatility: an asset is experiencing high volatility
- Excessive Concentration: the portfolio is concentrated in a single asset or sector
- High-Risk Exposure: risk exposure exceeds what the user's profile supports
- Investment Opportunity: an opportunity aligned with the user's profile
- Maturity Reminder: an upcoming maturity date for a fixed-income holding"#;
