//! Portfolio Analysis Flow
//!
//! Packages the user's holdings and stated financial goals into an
//! analysis request, and validates the three-field structured response.

use assistant_core::{
    message::Message,
    provider::{GenerationOptions, LlmProvider},
};
use serde::{Deserialize, Serialize};

use super::{excerpt, project_assets, strip_code_fences};
use crate::error::{AdvisorError, Result};
use crate::model::{InvestmentAsset, RiskProfile};
use crate::INVESTMENT_ASSISTANT_PROMPT;

/// Structured analysis returned by the model.
///
/// All three fields are required; a response missing any of them is a
/// validation failure, never partially rendered.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioAnalysis {
    /// Expected to be Conservative, Moderate, or Aggressive, but carried
    /// as free text at this boundary
    pub risk_profile: String,

    /// Personalized recommendations, free text
    pub recommendations: String,

    /// Alert summary, free text (the structured alerts come from the
    /// alert-generation flow)
    pub alerts: String,
}

impl PortfolioAnalysis {
    /// The risk profile matched against the known label set, for display
    pub fn known_risk_profile(&self) -> Option<RiskProfile> {
        RiskProfile::from_label(&self.risk_profile)
    }
}

/// Parse and validate a raw model completion as a portfolio analysis
pub fn parse_analysis_response(raw: &str) -> Result<PortfolioAnalysis> {
    let cleaned = strip_code_fences(raw);

    serde_json::from_str(cleaned).map_err(|e| {
        tracing::warn!(error = %e, raw = excerpt(raw), "analysis response failed validation");
        AdvisorError::MalformedResponse(format!("analysis response: {e}"))
    })
}

fn build_prompt(assets_json: &str, financial_goals: &str) -> String {
    format!(
        r#"Analyze the user's investment portfolio below.

Investments:
{assets_json}

Financial Goals: {financial_goals}

Based on the portfolio and the user's financial goals, assess the user's risk profile as Conservative, Moderate, or Aggressive. Generate personalized investment recommendations and intelligent alerts for high volatility, excessive concentration, high-risk exposure, and investment opportunities.

Respond with a single JSON object:
{{
  "riskProfile": "Conservative | Moderate | Aggressive",
  "recommendations": "personalized investment recommendations",
  "alerts": "intelligent alerts summary"
}}"#
    )
}

/// Run the full portfolio-analysis round trip.
///
/// One request, one response; a transport failure or a malformed
/// response surfaces once and is not retried.
pub async fn analyze_portfolio(
    provider: &dyn LlmProvider,
    options: &GenerationOptions,
    assets: &[InvestmentAsset],
    financial_goals: &str,
) -> Result<PortfolioAnalysis> {
    let assets_json = project_assets(assets)?;

    let messages = vec![
        Message::system(INVESTMENT_ASSISTANT_PROMPT),
        Message::user(build_prompt(&assets_json, financial_goals)),
    ];

    let completion = provider.complete(&messages, options).await?;
    tracing::debug!(model = %completion.model, "received analysis completion");

    parse_analysis_response(&completion.content)
}
