//! Compute command - deterministic regime comparison from structured input

use crate::cmd::{display, read_input_text, resolve_tax_year};
use crate::profile::AnalysisInput;
use crate::tax::{calculate_new_regime, calculate_old_regime};
use clap::Args;
use std::io;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ComputeCommand {
    /// JSON file with income and deductions (or stdin with "-")
    #[arg(short, long)]
    input: PathBuf,

    /// Tax year to use (e.g., 2025 for FY 2024-25); defaults to the current FY
    #[arg(short, long)]
    year: Option<i32>,

    /// Use the non-metro HRA factor (40% of basic instead of 50%)
    #[arg(long)]
    non_metro: bool,

    /// Output as JSON instead of formatted tables
    #[arg(long)]
    json: bool,

    /// Output the slab breakdowns as CSV
    #[arg(long, conflicts_with = "json")]
    csv: bool,
}

impl ComputeCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let text = read_input_text(&self.input)?;
        let input: AnalysisInput = serde_json::from_str(&text)?;
        let input = input.clamped();
        let year = resolve_tax_year(self.year);

        let old = calculate_old_regime(&input.income, &input.deductions, !self.non_metro, year);
        let new = calculate_new_regime(&input.income, year);

        if self.json {
            display::print_json(&old, &new, None, year)
        } else if self.csv {
            display::write_breakdown_csv(&old, &new, io::stdout())
        } else {
            display::print_comparison(&old, &new, year);
            Ok(())
        }
    }
}
