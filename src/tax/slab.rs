//! Progressive slab walk shared by both regime calculators

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// A marginal tax band: cumulative upper limit (`None` = unbounded, must be
/// the last entry) and the rate applied to income within the band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slab {
    pub upper_limit: Option<Decimal>,
    pub rate: Decimal,
}

impl Slab {
    pub fn up_to(upper_limit: Decimal, rate: Decimal) -> Self {
        Slab {
            upper_limit: Some(upper_limit),
            rate,
        }
    }

    pub fn unbounded(rate: Decimal) -> Self {
        Slab {
            upper_limit: None,
            rate,
        }
    }
}

/// One line of the slab breakdown: income range label, marginal rate in
/// percent, and the tax contributed by that band
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlabComponent {
    pub slab: String,
    pub rate_percent: Decimal,
    pub amount: Decimal,
}

/// Result of walking the slab table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlabTax {
    pub tax: Decimal,
    pub breakdown: Vec<SlabComponent>,
}

/// Walk the slabs in ascending order accumulating marginal tax.
///
/// Each band taxes `min(income, upper_limit) - previous_limit`, so a
/// boundary rupee belongs to the lower band. Bands with zero contribution
/// (including the tax-free band) are omitted from the breakdown.
/// Non-positive income yields zero tax and an empty breakdown.
pub fn compute_slab_tax(taxable_income: Decimal, slabs: &[Slab]) -> SlabTax {
    let mut tax = Decimal::ZERO;
    let mut previous_limit = Decimal::ZERO;
    let mut breakdown = Vec::new();

    for slab in slabs {
        if taxable_income <= previous_limit {
            break;
        }

        let band_top = slab
            .upper_limit
            .map_or(taxable_income, |limit| taxable_income.min(limit));
        let taxable_amount = band_top - previous_limit;
        let slab_tax = taxable_amount * slab.rate;
        tax += slab_tax;

        if slab_tax > Decimal::ZERO {
            breakdown.push(SlabComponent {
                slab: format!("{} - {}", format_lakh(previous_limit), format_lakh(band_top)),
                rate_percent: slab.rate * dec!(100),
                amount: slab_tax,
            });
        }

        previous_limit = slab.upper_limit.unwrap_or(taxable_income);
    }

    SlabTax { tax, breakdown }
}

/// Display an amount in lakh units with one decimal place, e.g. "₹7.0L"
fn format_lakh(amount: Decimal) -> String {
    format!("₹{:.1}L", amount / dec!(100000))
}
