//! Shared output formatting for regime comparisons

use crate::ai::advice::AdviceReport;
use crate::tax::{recommended_regime, Regime, TaxResult, TaxYear};
use rust_decimal::Decimal;
use serde::Serialize;
use std::io;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

/// Row of the per-regime summary table
#[derive(Debug, Tabled)]
struct SummaryRow {
    #[tabled(rename = "Regime")]
    regime: String,

    #[tabled(rename = "Taxable Income")]
    taxable_income: String,

    #[tabled(rename = "Base Tax")]
    base_tax: String,

    #[tabled(rename = "Cess")]
    cess: String,

    #[tabled(rename = "Total Tax")]
    total_tax: String,

    #[tabled(rename = "Effective Rate")]
    effective_rate: String,
}

/// Row of a slab breakdown table (also the CSV record shape)
#[derive(Debug, Tabled, Serialize)]
pub struct BreakdownRow {
    #[tabled(rename = "Regime")]
    pub regime: String,

    #[tabled(rename = "Slab")]
    pub slab: String,

    #[tabled(rename = "Rate %")]
    pub rate_percent: String,

    #[tabled(rename = "Tax")]
    pub tax: String,
}

pub fn print_comparison(old: &TaxResult, new: &TaxResult, year: TaxYear) {
    println!();
    println!("REGIME COMPARISON (FY {})", year.display());
    println!();

    let rows = vec![summary_row(old), summary_row(new)];
    print_table(Table::new(rows));
    println!();

    for result in [old, new] {
        println!("{} slab breakdown:", result.regime.display());
        print_table(Table::new(breakdown_rows(result)));
        println!();
    }

    let recommended = recommended_regime(old, new);
    let savings = (old.total_tax - new.total_tax).abs();
    if savings > Decimal::ZERO {
        println!(
            "RECOMMENDED: {} (saves {})",
            recommended.display(),
            format_inr(savings)
        );
    } else {
        println!("RECOMMENDED: {} (equal liability)", recommended.display());
    }
    println!();
}

pub fn print_advice(advice: &AdviceReport) {
    println!("SAVINGS ADVICE");
    println!("  {}", advice.summary);
    if advice.savings_potential > Decimal::ZERO {
        println!("  Savings potential: {}", format_inr(advice.savings_potential));
    }
    println!();

    if !advice.suggestions.is_empty() {
        let rows: Vec<SuggestionRow> = advice.suggestions.iter().map(SuggestionRow::from).collect();
        print_table(Table::new(rows));
        println!();
    }
}

/// Write both breakdowns as CSV to the given writer
pub fn write_breakdown_csv<W: io::Write>(
    old: &TaxResult,
    new: &TaxResult,
    writer: W,
) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for result in [old, new] {
        for row in breakdown_rows(result) {
            wtr.serialize(row)?;
        }
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_json(
    old: &TaxResult,
    new: &TaxResult,
    advice: Option<&AdviceReport>,
    year: TaxYear,
) -> anyhow::Result<()> {
    let data = ComparisonData::build(old, new, advice, year);
    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}

/// JSON output structure for `--json`
#[derive(Debug, Serialize)]
struct ComparisonData {
    tax_year: String,
    recommended_regime: String,
    savings_vs_other: String,
    old_regime: RegimeData,
    new_regime: RegimeData,
    #[serde(skip_serializing_if = "Option::is_none")]
    advice: Option<AdviceData>,
}

#[derive(Debug, Serialize)]
struct RegimeData {
    taxable_income: String,
    base_tax: String,
    cess: String,
    total_tax: String,
    effective_rate_pct: String,
    breakdown: Vec<BreakdownEntry>,
}

#[derive(Debug, Serialize)]
struct BreakdownEntry {
    slab: String,
    rate_pct: String,
    tax: String,
}

#[derive(Debug, Serialize)]
struct AdviceData {
    summary: String,
    savings_potential: String,
    suggestions: Vec<SuggestionData>,
}

#[derive(Debug, Serialize)]
struct SuggestionData {
    category: String,
    action: String,
    estimated_saving: String,
}

impl ComparisonData {
    fn build(
        old: &TaxResult,
        new: &TaxResult,
        advice: Option<&AdviceReport>,
        year: TaxYear,
    ) -> Self {
        let recommended = recommended_regime(old, new);
        ComparisonData {
            tax_year: year.display(),
            recommended_regime: match recommended {
                Regime::Old => "OLD".to_string(),
                Regime::New => "NEW".to_string(),
            },
            savings_vs_other: format!("{:.2}", (old.total_tax - new.total_tax).abs()),
            old_regime: RegimeData::from(old),
            new_regime: RegimeData::from(new),
            advice: advice.map(AdviceData::from),
        }
    }
}

impl From<&TaxResult> for RegimeData {
    fn from(result: &TaxResult) -> Self {
        RegimeData {
            taxable_income: format!("{:.2}", result.taxable_income),
            base_tax: format!("{:.2}", result.base_tax),
            cess: format!("{:.2}", result.cess),
            total_tax: format!("{:.2}", result.total_tax),
            effective_rate_pct: format!("{:.2}", result.effective_rate_percent),
            breakdown: result
                .breakdown
                .iter()
                .map(|c| BreakdownEntry {
                    slab: c.slab.clone(),
                    rate_pct: format!("{:.1}", c.rate_percent),
                    tax: format!("{:.2}", c.amount),
                })
                .collect(),
        }
    }
}

impl From<&AdviceReport> for AdviceData {
    fn from(advice: &AdviceReport) -> Self {
        AdviceData {
            summary: advice.summary.clone(),
            savings_potential: format!("{:.2}", advice.savings_potential),
            suggestions: advice
                .suggestions
                .iter()
                .map(|s| SuggestionData {
                    category: s.category.clone(),
                    action: s.action.clone(),
                    estimated_saving: format!("{:.2}", s.estimated_saving),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Tabled)]
struct SuggestionRow {
    #[tabled(rename = "Category")]
    category: String,

    #[tabled(rename = "Action")]
    action: String,

    #[tabled(rename = "Est. Saving")]
    estimated_saving: String,
}

impl From<&crate::ai::advice::Suggestion> for SuggestionRow {
    fn from(s: &crate::ai::advice::Suggestion) -> Self {
        SuggestionRow {
            category: s.category.clone(),
            action: s.action.clone(),
            estimated_saving: format_inr(s.estimated_saving),
        }
    }
}

fn summary_row(result: &TaxResult) -> SummaryRow {
    SummaryRow {
        regime: result.regime.display().to_string(),
        taxable_income: format_inr(result.taxable_income),
        base_tax: format_inr(result.base_tax),
        cess: format_inr(result.cess),
        total_tax: format_inr(result.total_tax),
        effective_rate: format!("{:.2}%", result.effective_rate_percent),
    }
}

fn breakdown_rows(result: &TaxResult) -> Vec<BreakdownRow> {
    result
        .breakdown
        .iter()
        .map(|c| BreakdownRow {
            regime: result.regime.display().to_string(),
            slab: c.slab.clone(),
            rate_percent: format!("{:.1}", c.rate_percent),
            tax: format_inr(c.amount),
        })
        .collect()
}

fn print_table(mut table: Table) {
    let rendered = table
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", rendered);
}

pub fn format_inr(amount: Decimal) -> String {
    format!("₹{:.2}", amount)
}
