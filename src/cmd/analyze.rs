//! Analyze command - full pipeline from free text to regime comparison
//! and savings advice
//!
//! Two terminal outcomes only: success (both regimes computed, advice
//! possibly defaulted) or extraction failure.

use crate::ai::{advice, extract, gemini, GeminiClient};
use crate::cmd::{display, read_input_text, resolve_tax_year};
use crate::tax::{calculate_new_regime, calculate_old_regime};
use anyhow::Context;
use clap::Args;
use std::env;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct AnalyzeCommand {
    /// Text file with free-form financial details (or stdin with "-")
    #[arg(short, long, default_value = "-")]
    input: PathBuf,

    /// Tax year to use (e.g., 2025 for FY 2024-25); defaults to the current FY
    #[arg(short, long)]
    year: Option<i32>,

    /// Use the non-metro HRA factor (40% of basic instead of 50%)
    #[arg(long)]
    non_metro: bool,

    /// Gemini model to use
    #[arg(long, default_value = gemini::DEFAULT_MODEL)]
    model: String,

    /// Skip the savings-advice call
    #[arg(long)]
    no_advice: bool,

    /// Output as JSON instead of formatted tables
    #[arg(long)]
    json: bool,
}

impl AnalyzeCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let text = read_input_text(&self.input)?;
        let api_key = env::var(gemini::API_KEY_VAR)
            .with_context(|| format!("{} must be set", gemini::API_KEY_VAR))?;
        let client = GeminiClient::new(api_key, self.model.clone());

        // Extraction failure is terminal - never fabricate a record
        let (income, deductions) = extract::extract_financial_data(&client, &text)
            .context("failed to extract financial data from the input text")?;
        log::info!(
            "extracted gross salary {} with {} in 80C investments",
            income.gross_annual_salary,
            deductions.section_80c_investments
        );

        let year = resolve_tax_year(self.year);
        let old = calculate_old_regime(&income, &deductions, !self.non_metro, year);
        let new = calculate_new_regime(&income, year);

        // Advice degrades to a default payload rather than failing the run
        let advice = if self.no_advice {
            None
        } else {
            Some(advice::generate_advice(
                &client,
                &income,
                &deductions,
                new.total_tax,
                old.total_tax,
            ))
        };

        if self.json {
            display::print_json(&old, &new, advice.as_ref(), year)
        } else {
            display::print_comparison(&old, &new, year);
            if let Some(advice) = &advice {
                display::print_advice(advice);
            }
            Ok(())
        }
    }
}
