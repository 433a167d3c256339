//! Alert Generation Flow
//!
//! Turns a completed portfolio analysis into structured smart alerts.
//! Each alert's type tag is validated against the five recognized
//! categories; unrecognized tags are dropped, not displayed raw.

use assistant_core::{
    message::Message,
    provider::{GenerationOptions, LlmProvider},
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use super::{excerpt, strip_code_fences};
use crate::error::{AdvisorError, Result};
use crate::model::{AlertType, SmartAlert};
use crate::INVESTMENT_ASSISTANT_PROMPT;

/// Envelope the model must return
#[derive(Deserialize)]
struct AlertsEnvelope {
    alerts: Vec<RawAlert>,
}

/// One alert as emitted by the model, before validation
#[derive(Deserialize)]
struct RawAlert {
    #[serde(rename = "type")]
    tag: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    asset: Option<String>,
}

/// Parse and validate a raw model completion as a list of smart alerts.
///
/// The envelope itself must conform (an `alerts` array is required);
/// within it, alerts with unrecognized type tags or missing messages are
/// dropped with a warning rather than failing the whole response.
pub fn parse_alerts_response(raw: &str) -> Result<Vec<SmartAlert>> {
    let cleaned = strip_code_fences(raw);

    let envelope: AlertsEnvelope = serde_json::from_str(cleaned).map_err(|e| {
        tracing::warn!(error = %e, raw = excerpt(raw), "alerts response failed validation");
        AdvisorError::MalformedResponse(format!("alerts response: {e}"))
    })?;

    let today = Utc::now().date_naive();
    let mut alerts = Vec::with_capacity(envelope.alerts.len());

    for raw_alert in envelope.alerts {
        let Some(alert_type) = AlertType::from_tag(&raw_alert.tag) else {
            tracing::warn!(tag = %raw_alert.tag, "dropping alert with unrecognized type tag");
            continue;
        };

        let Some(message) = raw_alert.message.filter(|m| !m.trim().is_empty()) else {
            tracing::warn!(%alert_type, "dropping alert without a message");
            continue;
        };

        alerts.push(SmartAlert {
            id: Uuid::new_v4(),
            alert_type,
            message,
            asset: raw_alert.asset.filter(|a| !a.trim().is_empty()),
            date: today,
        });
    }

    Ok(alerts)
}

fn build_prompt(portfolio_analysis: &str, risk_profile: &str) -> String {
    format!(
        r#"Based on the user's portfolio analysis and risk profile, identify potential risks and opportunities and generate relevant alerts.

Portfolio Analysis: {portfolio_analysis}
Risk Profile: {risk_profile}

Consider the following alert types:
- High Volatility: an asset in the portfolio is experiencing high volatility
- Excessive Concentration: the portfolio is excessively concentrated in a single asset or sector
- High-Risk Exposure: the portfolio has high-risk exposure given the user's risk profile
- Investment Opportunity: a potential investment opportunity aligned with the user's risk profile
- Maturity Reminder: an upcoming maturity date for a fixed-income investment

The alerts should be clear, concise, and actionable.

Respond with a JSON object containing an "alerts" array, where each alert has a "type" and "message" field and an optional "asset" field:
{{
  "alerts": [
    {{
      "type": "High Volatility",
      "message": "Asset XYZ is experiencing high volatility. Consider rebalancing your portfolio.",
      "asset": "XYZ"
    }},
    {{
      "type": "Excessive Concentration",
      "message": "Your portfolio is heavily concentrated in the tech sector. Diversify to reduce risk."
    }}
  ]
}}"#
    )
}

/// Run the alert-generation round trip.
pub async fn generate_alerts(
    provider: &dyn LlmProvider,
    options: &GenerationOptions,
    portfolio_analysis: &str,
    risk_profile: &str,
) -> Result<Vec<SmartAlert>> {
    let messages = vec![
        Message::system(INVESTMENT_ASSISTANT_PROMPT),
        Message::user(build_prompt(portfolio_analysis, risk_profile)),
    ];

    let completion = provider.complete(&messages, options).await?;
    tracing::debug!(model = %completion.model, "received alerts completion");

    parse_alerts_response(&completion.content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::testing::ScriptedProvider;

    #[test]
    fn test_parse_valid_alerts() {
        let raw = r#"{
            "alerts": [
                {"type": "High Volatility", "message": "BTC is swinging hard.", "asset": "BTC"},
                {"type": "Maturity Reminder", "message": "Treasury 2025 matures in 30 days.", "asset": "Treasury 2025"}
            ]
        }"#;

        let alerts = parse_alerts_response(raw).unwrap();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].alert_type, AlertType::HighVolatility);
        assert_eq!(alerts[0].asset.as_deref(), Some("BTC"));
        assert_eq!(alerts[1].alert_type, AlertType::MaturityReminder);
    }

    #[test]
    fn test_unrecognized_tag_dropped() {
        let raw = r#"{
            "alerts": [
                {"type": "Meme Season", "message": "To the moon."},
                {"type": "Excessive Concentration", "message": "Too much crypto."}
            ]
        }"#;

        let alerts = parse_alerts_response(raw).unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, AlertType::ExcessiveConcentration);
    }

    #[test]
    fn test_missing_message_dropped() {
        let raw = r#"{
            "alerts": [
                {"type": "High Volatility"},
                {"type": "High-Risk Exposure", "message": "   "},
                {"type": "Investment Opportunity", "message": "Consider index funds."}
            ]
        }"#;

        let alerts = parse_alerts_response(raw).unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, AlertType::InvestmentOpportunity);
    }

    #[test]
    fn test_missing_envelope_rejected() {
        let err = parse_alerts_response(r#"{"warnings": []}"#).unwrap_err();
        assert!(matches!(err, AdvisorError::MalformedResponse(_)));
    }

    #[test]
    fn test_empty_alerts_list_is_valid() {
        let alerts = parse_alerts_response(r#"{"alerts": []}"#).unwrap();
        assert!(alerts.is_empty());
    }

    #[tokio::test]
    async fn test_round_trip_with_scripted_provider() {
        let reply = r#"```json
{"alerts": [{"type": "high volatility", "message": "ETH moved 12% today.", "asset": "ETH"}]}
```"#;
        let provider = ScriptedProvider::new(reply);
        let options = GenerationOptions::default();

        let alerts = generate_alerts(&provider, &options, "Heavy crypto tilt.", "Moderate")
            .await
            .unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, AlertType::HighVolatility);
    }
}
