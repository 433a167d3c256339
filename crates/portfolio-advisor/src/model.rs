//! Domain Models
//!
//! Core data types for investment portfolio tracking.
//! Uses `rust_decimal` for all monetary values - never use f64 for money!

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AdvisorError, Result};

/// Category of an investment asset
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetType {
    Equity,
    RealEstateFund,
    FixedIncome,
    Cryptocurrency,
    #[serde(rename = "ETF")]
    Etf,
    Pension,
    Cash,
}

impl AssetType {
    /// Human-readable label, also used in AI payloads
    pub fn label(&self) -> &'static str {
        match self {
            AssetType::Equity => "Equity",
            AssetType::RealEstateFund => "Real Estate Fund",
            AssetType::FixedIncome => "Fixed Income",
            AssetType::Cryptocurrency => "Cryptocurrency",
            AssetType::Etf => "ETF",
            AssetType::Pension => "Pension",
            AssetType::Cash => "Cash",
        }
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One purchased holding in a user's portfolio
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentAsset {
    /// Opaque id assigned by the storage layer
    pub id: Uuid,

    /// Owning user id
    pub user_id: String,

    /// Display name (e.g., "AAPL", "Treasury 2029")
    pub name: String,

    /// Asset category
    #[serde(rename = "type")]
    pub asset_type: AssetType,

    /// Calendar date of purchase (no time component)
    pub purchase_date: NaiveDate,

    /// Unit price at purchase, currency-agnostic
    pub purchase_price: Decimal,

    /// Latest known unit price; None means unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_price: Option<Decimal>,

    /// Quantity held; fractional allowed (crypto)
    pub quantity: Decimal,

    /// Brokerage the asset was purchased through
    pub brokerage: String,

    /// Optional free-text note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl InvestmentAsset {
    /// Cost basis: purchase price × quantity
    pub fn cost_basis(&self) -> Decimal {
        self.purchase_price * self.quantity
    }

    /// Current unit price, falling back to the purchase price when unknown.
    ///
    /// Unknown current price means "assume no gain/loss for this asset" -
    /// a default substitution, not an error. This is the one fallback
    /// policy applied everywhere (list, dashboard, aggregator).
    pub fn current_unit_price(&self) -> Decimal {
        self.current_price.unwrap_or(self.purchase_price)
    }

    /// Current value: current unit price × quantity
    pub fn current_value(&self) -> Decimal {
        self.current_unit_price() * self.quantity
    }

    /// Unrealized profit: current value − cost basis
    pub fn profit(&self) -> Decimal {
        self.current_value() - self.cost_basis()
    }

    /// Unrealized profit percentage; 0 when cost basis is 0
    pub fn profit_percent(&self) -> Decimal {
        let cost = self.cost_basis();
        if cost > Decimal::ZERO {
            (self.profit() / cost) * dec!(100)
        } else {
            Decimal::ZERO
        }
    }
}

/// Input for creating or fully replacing an investment record.
///
/// Ids and ownership are assigned by the store; edits are full-record
/// replacements, never partial patches.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvestment {
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub purchase_date: NaiveDate,
    pub purchase_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price: Option<Decimal>,
    pub quantity: Decimal,
    pub brokerage: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewInvestment {
    /// Validate the form-level invariants before the record is persisted
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AdvisorError::Validation("Name must not be empty".into()));
        }
        if self.brokerage.trim().is_empty() {
            return Err(AdvisorError::Validation("Brokerage must not be empty".into()));
        }
        if self.purchase_price <= Decimal::ZERO {
            return Err(AdvisorError::Validation(
                "Purchase price must be positive".into(),
            ));
        }
        if self.quantity <= Decimal::ZERO {
            return Err(AdvisorError::Validation("Quantity must be positive".into()));
        }
        if let Some(current) = self.current_price {
            if current < Decimal::ZERO {
                return Err(AdvisorError::Validation(
                    "Current price must not be negative".into(),
                ));
            }
        }
        Ok(())
    }

    /// Materialize into a stored asset for the given owner
    pub fn into_asset(self, user_id: impl Into<String>, id: Uuid) -> InvestmentAsset {
        InvestmentAsset {
            id,
            user_id: user_id.into(),
            name: self.name,
            asset_type: self.asset_type,
            purchase_date: self.purchase_date,
            purchase_price: self.purchase_price,
            current_price: self.current_price,
            quantity: self.quantity,
            brokerage: self.brokerage,
            notes: self.notes,
        }
    }
}

/// A point-in-time portfolio valuation, used for historical trend display.
///
/// Append-only from this system's perspective; the writer is an external
/// process.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    pub date: NaiveDate,
    pub total_value: Decimal,
}

/// The five recognized smart-alert categories
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertType {
    #[serde(rename = "High Volatility")]
    HighVolatility,
    #[serde(rename = "Excessive Concentration")]
    ExcessiveConcentration,
    #[serde(rename = "High-Risk Exposure")]
    HighRiskExposure,
    #[serde(rename = "Investment Opportunity")]
    InvestmentOpportunity,
    #[serde(rename = "Maturity Reminder")]
    MaturityReminder,
}

impl AlertType {
    /// Parse a tag produced by the model.
    ///
    /// Tolerant of case and hyphen/space variation; anything else is an
    /// unrecognized tag and the caller must drop the alert rather than
    /// display it raw.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let normalized: String = tag
            .trim()
            .chars()
            .filter_map(|c| match c {
                '-' | ' ' | '_' => None,
                c => Some(c.to_ascii_lowercase()),
            })
            .collect();

        match normalized.as_str() {
            "highvolatility" => Some(AlertType::HighVolatility),
            "excessiveconcentration" => Some(AlertType::ExcessiveConcentration),
            "highriskexposure" => Some(AlertType::HighRiskExposure),
            "investmentopportunity" => Some(AlertType::InvestmentOpportunity),
            "maturityreminder" => Some(AlertType::MaturityReminder),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AlertType::HighVolatility => "High Volatility",
            AlertType::ExcessiveConcentration => "Excessive Concentration",
            AlertType::HighRiskExposure => "High-Risk Exposure",
            AlertType::InvestmentOpportunity => "Investment Opportunity",
            AlertType::MaturityReminder => "Maturity Reminder",
        }
    }
}

impl std::fmt::Display for AlertType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Advisory message produced by the alert-generation flow.
///
/// Never mutated after creation; only displayed or discarded.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartAlert {
    pub id: Uuid,

    #[serde(rename = "type")]
    pub alert_type: AlertType,

    pub message: String,

    /// Related asset name, if the alert concerns a specific holding
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,

    /// Issue date
    pub date: NaiveDate,
}

/// Risk profile labels the analysis flow is expected to produce.
///
/// Free text at the AI boundary (not enum-enforced there); this type is
/// only for matching known labels for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskProfile {
    Conservative,
    Moderate,
    Aggressive,
}

impl RiskProfile {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "conservative" => Some(RiskProfile::Conservative),
            "moderate" => Some(RiskProfile::Moderate),
            "aggressive" => Some(RiskProfile::Aggressive),
            _ => None,
        }
    }
}

impl std::fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskProfile::Conservative => write!(f, "Conservative"),
            RiskProfile::Moderate => write!(f, "Moderate"),
            RiskProfile::Aggressive => write!(f, "Aggressive"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(purchase: Decimal, current: Option<Decimal>, quantity: Decimal) -> InvestmentAsset {
        InvestmentAsset {
            id: Uuid::new_v4(),
            user_id: "user-1".into(),
            name: "AAPL".into(),
            asset_type: AssetType::Equity,
            purchase_date: NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
            purchase_price: purchase,
            current_price: current,
            quantity,
            brokerage: "TestBroker".into(),
            notes: None,
        }
    }

    #[test]
    fn test_asset_profit() {
        let a = asset(dec!(150), Some(dec!(175.25)), dec!(10));
        assert_eq!(a.cost_basis(), dec!(1500));
        assert_eq!(a.current_value(), dec!(1752.50));
        assert_eq!(a.profit(), dec!(252.50));
    }

    #[test]
    fn test_current_price_fallback() {
        // Unknown current price: assume no gain/loss
        let a = asset(dec!(150), None, dec!(10));
        assert_eq!(a.current_value(), a.cost_basis());
        assert_eq!(a.profit(), Decimal::ZERO);
        assert_eq!(a.profit_percent(), Decimal::ZERO);
    }

    #[test]
    fn test_fractional_quantity() {
        let a = asset(dec!(45000), Some(dec!(65000)), dec!(0.1));
        assert_eq!(a.cost_basis(), dec!(4500.0));
        assert_eq!(a.profit(), dec!(2000.0));
    }

    #[test]
    fn test_new_investment_validation() {
        let input = NewInvestment {
            name: "AAPL".into(),
            asset_type: AssetType::Equity,
            purchase_date: NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
            purchase_price: dec!(150),
            current_price: None,
            quantity: dec!(10),
            brokerage: "TestBroker".into(),
            notes: None,
        };
        assert!(input.validate().is_ok());

        let mut bad = input.clone();
        bad.quantity = Decimal::ZERO;
        assert!(bad.validate().is_err());

        let mut bad = input.clone();
        bad.purchase_price = dec!(-1);
        assert!(bad.validate().is_err());

        let mut bad = input;
        bad.name = "  ".into();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_alert_type_from_tag() {
        assert_eq!(
            AlertType::from_tag("High Volatility"),
            Some(AlertType::HighVolatility)
        );
        assert_eq!(
            AlertType::from_tag("high-risk exposure"),
            Some(AlertType::HighRiskExposure)
        );
        assert_eq!(
            AlertType::from_tag("maturity_reminder"),
            Some(AlertType::MaturityReminder)
        );
        assert_eq!(AlertType::from_tag("Meme Season"), None);
    }

    #[test]
    fn test_risk_profile_from_label() {
        assert_eq!(
            RiskProfile::from_label("  aggressive "),
            Some(RiskProfile::Aggressive)
        );
        assert_eq!(RiskProfile::from_label("degenerate"), None);
    }

    #[test]
    fn test_asset_type_serde() {
        let json = serde_json::to_string(&AssetType::Etf).unwrap();
        assert_eq!(json, "\"ETF\"");
        let back: AssetType = serde_json::from_str("\"RealEstateFund\"").unwrap();
        assert_eq!(back, AssetType::RealEstateFund);
    }
}
