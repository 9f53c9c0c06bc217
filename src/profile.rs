use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Normalized annual income figures for a salaried taxpayer.
///
/// All amounts are whole rupees (major currency unit). The engine does not
/// enforce `basic + hra <= gross` - extracted data can be inconsistent and
/// the calculators must tolerate it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct IncomeRecord {
    pub gross_annual_salary: Decimal,
    pub basic_annual_salary: Decimal,
    pub annual_hra_received: Decimal,
    pub annual_rent_paid: Decimal,
    /// Reserved: tracked for display, unused by the current tax formulas
    pub special_allowance: Decimal,
    /// Reserved: tracked for display, unused by the current tax formulas
    pub leave_travel_allowance: Decimal,
    pub other_annual_income: Decimal,
}

impl IncomeRecord {
    /// Floor every field at zero. Applied once at the input boundary so the
    /// calculators only ever see non-negative amounts.
    pub fn clamped(self) -> Self {
        IncomeRecord {
            gross_annual_salary: self.gross_annual_salary.max(Decimal::ZERO),
            basic_annual_salary: self.basic_annual_salary.max(Decimal::ZERO),
            annual_hra_received: self.annual_hra_received.max(Decimal::ZERO),
            annual_rent_paid: self.annual_rent_paid.max(Decimal::ZERO),
            special_allowance: self.special_allowance.max(Decimal::ZERO),
            leave_travel_allowance: self.leave_travel_allowance.max(Decimal::ZERO),
            other_annual_income: self.other_annual_income.max(Decimal::ZERO),
        }
    }
}

/// Deductions claimed under the Old Regime.
///
/// Statutory caps (80C: 1.5L, 80D: 25k, 80CCD(1B): 50k) are applied by the
/// calculator, not here - callers supply raw amounts. The HRA exemption is
/// always computed from the income record, never supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DeductionRecord {
    pub section_80c_investments: Decimal,
    pub section_80d_premium: Decimal,
    pub section_80ccd_contribution: Decimal,
    pub professional_tax: Decimal,
}

/// Flat professional tax assumed when the input does not specify one.
pub fn default_professional_tax() -> Decimal {
    dec!(2400)
}

impl Default for DeductionRecord {
    fn default() -> Self {
        DeductionRecord {
            section_80c_investments: Decimal::ZERO,
            section_80d_premium: Decimal::ZERO,
            section_80ccd_contribution: Decimal::ZERO,
            professional_tax: default_professional_tax(),
        }
    }
}

impl DeductionRecord {
    pub fn clamped(self) -> Self {
        DeductionRecord {
            section_80c_investments: self.section_80c_investments.max(Decimal::ZERO),
            section_80d_premium: self.section_80d_premium.max(Decimal::ZERO),
            section_80ccd_contribution: self.section_80ccd_contribution.max(Decimal::ZERO),
            professional_tax: self.professional_tax.max(Decimal::ZERO),
        }
    }
}

/// Structured input for the `compute` command: one income record plus one
/// deduction record, both in whole rupees.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AnalysisInput {
    pub income: IncomeRecord,
    pub deductions: DeductionRecord,
}

impl AnalysisInput {
    pub fn clamped(self) -> Self {
        AnalysisInput {
            income: self.income.clamped(),
            deductions: self.deductions.clamped(),
        }
    }
}
