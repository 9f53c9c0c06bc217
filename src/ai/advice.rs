//! Savings advice generation
//!
//! Advice is informational only: it consumes the computed results and the
//! original records but never feeds back into the tax computation. A
//! failed advice call is masked with a default payload so the tax results
//! stay visible.

use super::{AiError, GeminiClient};
use crate::profile::{DeductionRecord, IncomeRecord};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Advice payload returned by the model (or the fallback)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdviceReport {
    pub summary: String,
    #[serde(rename = "savingsPotential")]
    pub savings_potential: Decimal,
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Suggestion {
    pub category: String,
    pub action: String,
    #[serde(rename = "estimatedSaving")]
    pub estimated_saving: Decimal,
}

impl Default for Suggestion {
    fn default() -> Self {
        Suggestion {
            category: String::new(),
            action: String::new(),
            estimated_saving: Decimal::ZERO,
        }
    }
}

const FALLBACK_SUMMARY: &str = "We couldn't generate specific advice right now, \
    but maximizing your 80C is always a good start!";

impl Default for AdviceReport {
    fn default() -> Self {
        AdviceReport::fallback()
    }
}

impl AdviceReport {
    /// Non-empty payload used whenever the advice call fails
    pub fn fallback() -> Self {
        AdviceReport {
            summary: FALLBACK_SUMMARY.to_string(),
            savings_potential: Decimal::ZERO,
            suggestions: Vec::new(),
        }
    }
}

/// Request savings suggestions. Never fails: any error is logged and
/// replaced by [`AdviceReport::fallback`].
pub fn generate_advice(
    client: &GeminiClient,
    income: &IncomeRecord,
    deductions: &DeductionRecord,
    total_tax_new: Decimal,
    total_tax_old: Decimal,
) -> AdviceReport {
    match request_advice(client, income, deductions, total_tax_new, total_tax_old) {
        Ok(report) => report,
        Err(err) => {
            log::warn!("advice generation failed, using fallback: {}", err);
            AdviceReport::fallback()
        }
    }
}

fn request_advice(
    client: &GeminiClient,
    income: &IncomeRecord,
    deductions: &DeductionRecord,
    total_tax_new: Decimal,
    total_tax_old: Decimal,
) -> Result<AdviceReport, AiError> {
    let prompt = build_prompt(income, deductions, total_tax_new, total_tax_old);
    let payload = client.generate_json(&prompt, response_schema(), Some(0.7))?;
    let report: AdviceReport = serde_json::from_str(&payload)?;
    Ok(report)
}

fn build_prompt(
    income: &IncomeRecord,
    deductions: &DeductionRecord,
    total_tax_new: Decimal,
    total_tax_old: Decimal,
) -> String {
    format!(
        "Analyze this Indian taxpayer's profile.\n\n\
         Data:\n\
         Gross Salary: ₹{}\n\
         80C Investments: ₹{} (Limit 1.5L)\n\
         80D Medical: ₹{}\n\
         Rent Paid: ₹{}\n\n\
         Calculated Tax (New Regime): ₹{}\n\
         Calculated Tax (Old Regime): ₹{}\n\n\
         Provide 3 specific, actionable suggestions to save tax. Focus on \
         utilizing unused limits (80C, NPS 80CCD(1B), Health Insurance). \
         Keep the tone encouraging and simple.",
        income.gross_annual_salary,
        deductions.section_80c_investments,
        deductions.section_80d_premium,
        income.annual_rent_paid,
        total_tax_new,
        total_tax_old,
    )
}

fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING", "description": "A friendly, human-readable summary of the tax situation" },
            "savingsPotential": { "type": "NUMBER", "description": "Estimated amount of tax the user could still save" },
            "suggestions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "category": { "type": "STRING", "description": "E.g., 80C, 80D, NPS" },
                        "action": { "type": "STRING", "description": "Specific action to take (e.g., 'Invest ₹50k in ELSS')" },
                        "estimatedSaving": { "type": "NUMBER", "description": "Tax saved by taking this action" }
                    }
                }
            }
        }
    })
}
