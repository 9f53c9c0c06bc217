//! CLI subcommands

pub mod analyze;
pub mod compute;
pub mod display;
pub mod schema;

use crate::tax::TaxYear;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Read input text from a file (or stdin with "-")
pub fn read_input_text(path: &Path) -> anyhow::Result<String> {
    let text = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin().lock().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(path)?
    };

    if text.trim().is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
    }
    Ok(text)
}

/// Tax year from the CLI flag, defaulting to the FY containing today
pub fn resolve_tax_year(year: Option<i32>) -> TaxYear {
    year.map(TaxYear)
        .unwrap_or_else(|| TaxYear::from_date(chrono::Local::now().date_naive()))
}
