//! Extraction boundary: free-form financial text to normalized records
//!
//! All defaulting lives here, never inside the tax engine. The named
//! fallback rules are:
//!
//! - a field the model could not recover becomes 0
//! - basic salary missing while gross is known: estimated as 40% of gross
//! - professional tax: flat 2,400 default
//! - negative amounts are clamped to 0

use super::{AiError, GeminiClient};
use crate::profile::{default_professional_tax, DeductionRecord, IncomeRecord};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use serde_json::{json, Value};

/// Raw fields as the model reports them; everything optional, coercion
/// happens in [`into_records`]
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractedFields {
    #[serde(rename = "grossSalary")]
    pub gross_salary: Option<Decimal>,
    #[serde(rename = "basicSalary")]
    pub basic_salary: Option<Decimal>,
    #[serde(rename = "hraReceived")]
    pub hra_received: Option<Decimal>,
    #[serde(rename = "rentPaid")]
    pub rent_paid: Option<Decimal>,
    #[serde(rename = "investments80C")]
    pub investments_80c: Option<Decimal>,
    #[serde(rename = "medicalPremium80D")]
    pub medical_premium_80d: Option<Decimal>,
    #[serde(rename = "nps80CCD")]
    pub nps_80ccd: Option<Decimal>,
    #[serde(rename = "otherIncome")]
    pub other_income: Option<Decimal>,
}

/// Share of gross salary assumed to be basic pay when the text does not
/// break the salary down
const BASIC_SALARY_FALLBACK_RATIO: Decimal = dec!(0.4);

/// Extract income and deduction records from free text. A failed request
/// or an unparseable payload is surfaced as an error - the caller must not
/// see fabricated records.
pub fn extract_financial_data(
    client: &GeminiClient,
    text: &str,
) -> Result<(IncomeRecord, DeductionRecord), AiError> {
    let payload = client.generate_json(&build_prompt(text), response_schema(), None)?;
    let fields: ExtractedFields = serde_json::from_str(&payload)?;
    Ok(into_records(fields))
}

/// Apply the fallback rules and produce clamped records
pub fn into_records(fields: ExtractedFields) -> (IncomeRecord, DeductionRecord) {
    let gross = fields.gross_salary.unwrap_or(Decimal::ZERO);
    let basic = match fields.basic_salary {
        Some(basic) => basic,
        None => {
            let estimate = gross * BASIC_SALARY_FALLBACK_RATIO;
            if estimate > Decimal::ZERO {
                log::info!("basic salary not found, estimating 40% of gross");
            }
            estimate
        }
    };

    let income = IncomeRecord {
        gross_annual_salary: gross,
        basic_annual_salary: basic,
        annual_hra_received: fields.hra_received.unwrap_or(Decimal::ZERO),
        annual_rent_paid: fields.rent_paid.unwrap_or(Decimal::ZERO),
        // not reliably inferable from free text
        special_allowance: Decimal::ZERO,
        leave_travel_allowance: Decimal::ZERO,
        other_annual_income: fields.other_income.unwrap_or(Decimal::ZERO),
    }
    .clamped();

    let deductions = DeductionRecord {
        section_80c_investments: fields.investments_80c.unwrap_or(Decimal::ZERO),
        section_80d_premium: fields.medical_premium_80d.unwrap_or(Decimal::ZERO),
        section_80ccd_contribution: fields.nps_80ccd.unwrap_or(Decimal::ZERO),
        professional_tax: default_professional_tax(),
    }
    .clamped();

    (income, deductions)
}

fn build_prompt(text: &str) -> String {
    format!(
        "Extract annual financial details from the following text. \
         Assume amounts are in INR. If a value is missing, use 0.\n\n\
         Text: \"{}\"",
        text.trim()
    )
}

/// Structured-output schema for the extraction call (Gemini OpenAPI subset)
fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "grossSalary": { "type": "NUMBER", "description": "Total annual gross salary" },
            "basicSalary": { "type": "NUMBER", "description": "Annual basic salary component" },
            "hraReceived": { "type": "NUMBER", "description": "Annual house rent allowance received from employer" },
            "rentPaid": { "type": "NUMBER", "description": "Annual rent paid by the user (if mentioned)" },
            "investments80C": { "type": "NUMBER", "description": "Total investments under 80C (PPF, ELSS, LIC, EPF)" },
            "medicalPremium80D": { "type": "NUMBER", "description": "Medical insurance premiums paid" },
            "nps80CCD": { "type": "NUMBER", "description": "Investments in the National Pension System" },
            "otherIncome": { "type": "NUMBER", "description": "Income from other sources (interest, dividends)" }
        },
        "required": ["grossSalary", "basicSalary"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_payload_maps_to_records() {
        let fields: ExtractedFields = serde_json::from_str(
            r#"{
                "grossSalary": 1500000,
                "basicSalary": 600000,
                "hraReceived": 300000,
                "rentPaid": 180000,
                "investments80C": 120000,
                "medicalPremium80D": 20000,
                "nps80CCD": 0,
                "otherIncome": 15000
            }"#,
        )
        .unwrap();

        let (income, deductions) = into_records(fields);
        assert_eq!(income.gross_annual_salary, dec!(1500000));
        assert_eq!(income.basic_annual_salary, dec!(600000));
        assert_eq!(income.annual_rent_paid, dec!(180000));
        assert_eq!(income.other_annual_income, dec!(15000));
        assert_eq!(deductions.section_80c_investments, dec!(120000));
        assert_eq!(deductions.section_80d_premium, dec!(20000));
        assert_eq!(deductions.professional_tax, dec!(2400));
    }

    #[test]
    fn missing_basic_salary_estimated_from_gross() {
        let fields: ExtractedFields =
            serde_json::from_str(r#"{ "grossSalary": 1000000 }"#).unwrap();
        let (income, _) = into_records(fields);
        assert_eq!(income.basic_annual_salary, dec!(400000));
    }

    #[test]
    fn nothing_recovered_yields_zeroed_records() {
        let (income, deductions) = into_records(ExtractedFields::default());
        assert_eq!(income.gross_annual_salary, Decimal::ZERO);
        assert_eq!(income.basic_annual_salary, Decimal::ZERO);
        assert_eq!(deductions.section_80c_investments, Decimal::ZERO);
        // professional tax keeps its flat default
        assert_eq!(deductions.professional_tax, dec!(2400));
    }

    #[test]
    fn negative_model_output_clamped() {
        let fields: ExtractedFields = serde_json::from_str(
            r#"{ "grossSalary": 900000, "rentPaid": -5000, "investments80C": -1 }"#,
        )
        .unwrap();
        let (income, deductions) = into_records(fields);
        assert_eq!(income.annual_rent_paid, Decimal::ZERO);
        assert_eq!(deductions.section_80c_investments, Decimal::ZERO);
    }

    #[test]
    fn malformed_payload_is_a_json_error() {
        let result: Result<ExtractedFields, _> =
            serde_json::from_str("here is your data: {").map_err(AiError::from);
        assert!(matches!(result, Err(AiError::Json(_))));
    }
}
