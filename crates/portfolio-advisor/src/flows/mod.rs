//! AI Flows
//!
//! The two structured request/response contracts spoken with the hosted
//! model: full portfolio analysis and alert generation. Each flow is one
//! stateless round trip; no retries, no streaming, no partial results.
//!
//! The model's output is untrusted free-form generation. Both flows parse
//! it against an explicit schema and fail closed: a response that does
//! not conform is rejected (or, for individual alerts, dropped), never
//! displayed as structured data.

mod alerts;
mod analyze;

pub use alerts::{generate_alerts, parse_alerts_response};
pub use analyze::{analyze_portfolio, parse_analysis_response, PortfolioAnalysis};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::Result;
use crate::model::InvestmentAsset;

/// Read-only projection of an asset for the analysis payload.
///
/// Id and current price are deliberately excluded from what the model
/// sees.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AssetProjection<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    asset_type: &'static str,
    purchase_date: NaiveDate,
    purchase_price: Decimal,
    quantity: Decimal,
    brokerage: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
}

/// Render the asset list as the JSON block embedded in prompts
fn project_assets(assets: &[InvestmentAsset]) -> Result<String> {
    let projections: Vec<AssetProjection<'_>> = assets
        .iter()
        .map(|a| AssetProjection {
            name: &a.name,
            asset_type: a.asset_type.label(),
            purchase_date: a.purchase_date,
            purchase_price: a.purchase_price,
            quantity: a.quantity,
            brokerage: &a.brokerage,
            notes: a.notes.as_deref(),
        })
        .collect();

    Ok(serde_json::to_string_pretty(&projections)?)
}

/// Strip markdown code fences the model routinely wraps JSON in
fn strip_code_fences(raw: &str) -> &str {
    raw.trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

/// Truncate raw model output for log lines
fn excerpt(raw: &str) -> &str {
    match raw.char_indices().nth(200) {
        Some((idx, _)) => &raw[..idx],
        None => raw,
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted provider for flow tests

    use assistant_core::{
        error::Result,
        message::Message,
        provider::{
            Completion, FinishReason, GenerationOptions, LlmProvider, ModelInfo, ProviderInfo,
        },
    };
    use async_trait::async_trait;

    /// Provider that replays a canned completion
    pub struct ScriptedProvider {
        reply: String,
    }

    impl ScriptedProvider {
        pub fn new(reply: impl Into<String>) -> Self {
            Self { reply: reply.into() }
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        async fn info(&self) -> Result<ProviderInfo> {
            Ok(ProviderInfo {
                name: "Scripted".into(),
                version: None,
                models: Vec::new(),
            })
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        async fn complete(
            &self,
            _messages: &[Message],
            options: &GenerationOptions,
        ) -> Result<Completion> {
            Ok(Completion {
                content: self.reply.clone(),
                model: options.model.clone(),
                usage: None,
                finish_reason: Some(FinishReason::Stop),
            })
        }

        async fn list_models(&self) -> Result<Vec<ModelInfo>> {
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AssetType;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn test_projection_excludes_id_and_current_price() {
        let asset = InvestmentAsset {
            id: Uuid::new_v4(),
            user_id: "alice".into(),
            name: "AAPL".into(),
            asset_type: AssetType::Equity,
            purchase_date: chrono::NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
            purchase_price: dec!(150),
            current_price: Some(dec!(175.25)),
            quantity: dec!(10),
            brokerage: "TestBroker".into(),
            notes: Some("long term".into()),
        };

        let json = project_assets(std::slice::from_ref(&asset)).unwrap();
        assert!(json.contains("\"purchasePrice\""));
        assert!(json.contains("\"Equity\""));
        assert!(json.contains("long term"));
        assert!(!json.contains("currentPrice"));
        assert!(!json.contains(&asset.id.to_string()));
        assert!(!json.contains("alice"));
    }
}
