//! Old and New Regime liability calculators
//!
//! Both calculators are pure: identical inputs always produce identical
//! results, and every subtotal is clamped rather than rejected, so they
//! cannot fail.

use crate::profile::{DeductionRecord, IncomeRecord};
use crate::tax::hra::hra_exemption;
use crate::tax::slab::{compute_slab_tax, SlabComponent, SlabTax};
use crate::tax::year::TaxYear;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// The two statutory computation methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Regime {
    Old,
    New,
}

impl Regime {
    pub fn display(&self) -> &'static str {
        match self {
            Regime::Old => "Old Regime",
            Regime::New => "New Regime",
        }
    }
}

impl std::fmt::Display for Regime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display())
    }
}

/// Liability under one regime
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxResult {
    pub regime: Regime,
    pub taxable_income: Decimal,
    /// Tax after the slab walk and any rebate zeroing, before cess
    pub base_tax: Decimal,
    pub cess: Decimal,
    pub total_tax: Decimal,
    pub effective_rate_percent: Decimal,
    pub breakdown: Vec<SlabComponent>,
}

const REBATE_LABEL: &str = "Rebate u/s 87A";

fn rebate_entry() -> SlabComponent {
    SlabComponent {
        slab: REBATE_LABEL.to_string(),
        rate_percent: Decimal::ZERO,
        amount: Decimal::ZERO,
    }
}

/// New Regime: flat standard deduction, no other exemptions, FY-specific
/// slab table, rebate cliff at 7L
pub fn calculate_new_regime(income: &IncomeRecord, year: TaxYear) -> TaxResult {
    let standard_deduction = year.standard_deduction(Regime::New);
    let taxable_income = (income.gross_annual_salary + income.other_annual_income
        - standard_deduction)
        .max(Decimal::ZERO);

    let SlabTax { mut tax, mut breakdown } =
        compute_slab_tax(taxable_income, &year.new_regime_slabs());

    // Hard cliff: one rupee above the threshold is taxed from the first
    // applicable slab, no marginal relief
    if taxable_income <= year.rebate_threshold(Regime::New) {
        tax = Decimal::ZERO;
        breakdown = vec![rebate_entry()];
    }

    finish(Regime::New, taxable_income, tax, breakdown, income, year)
}

/// Old Regime: HRA exemption plus capped section deductions, rebate cliff
/// at 5L
pub fn calculate_old_regime(
    income: &IncomeRecord,
    deductions: &DeductionRecord,
    metro: bool,
    year: TaxYear,
) -> TaxResult {
    let exemption = hra_exemption(
        income.basic_annual_salary,
        income.annual_hra_received,
        income.annual_rent_paid,
        metro,
    );

    let capped_80c = deductions.section_80c_investments.min(year.section_80c_cap());
    let capped_80d = deductions.section_80d_premium.min(year.section_80d_cap());
    let capped_80ccd = deductions
        .section_80ccd_contribution
        .min(year.section_80ccd_1b_cap());

    let total_deductions = capped_80c
        + capped_80d
        + capped_80ccd
        + year.standard_deduction(Regime::Old)
        + exemption
        + deductions.professional_tax;

    let taxable_income = (income.gross_annual_salary + income.other_annual_income
        - total_deductions)
        .max(Decimal::ZERO);

    let SlabTax { mut tax, mut breakdown } =
        compute_slab_tax(taxable_income, &year.old_regime_slabs());

    if taxable_income <= year.rebate_threshold(Regime::Old) {
        tax = Decimal::ZERO;
        breakdown = vec![rebate_entry()];
    }

    finish(Regime::Old, taxable_income, tax, breakdown, income, year)
}

fn finish(
    regime: Regime,
    taxable_income: Decimal,
    base_tax: Decimal,
    breakdown: Vec<SlabComponent>,
    income: &IncomeRecord,
    year: TaxYear,
) -> TaxResult {
    let cess = base_tax * year.cess_rate();
    let total_tax = base_tax + cess;

    // Denominator guard is on gross salary, matching the ratio itself
    let effective_rate_percent = if income.gross_annual_salary > Decimal::ZERO {
        total_tax / income.gross_annual_salary * dec!(100)
    } else {
        Decimal::ZERO
    };

    TaxResult {
        regime,
        taxable_income,
        base_tax,
        cess,
        total_tax,
        effective_rate_percent,
        breakdown,
    }
}

/// The regime to recommend: New on strictly lower total tax, Old otherwise
pub fn recommended_regime(old: &TaxResult, new: &TaxResult) -> Regime {
    if new.total_tax < old.total_tax {
        Regime::New
    } else {
        Regime::Old
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FY: TaxYear = TaxYear(2025);

    fn income(gross: Decimal) -> IncomeRecord {
        IncomeRecord {
            gross_annual_salary: gross,
            ..Default::default()
        }
    }

    fn scenario_income() -> IncomeRecord {
        IncomeRecord {
            gross_annual_salary: dec!(1500000),
            basic_annual_salary: dec!(600000),
            annual_hra_received: dec!(300000),
            annual_rent_paid: dec!(180000),
            ..Default::default()
        }
    }

    fn scenario_deductions() -> DeductionRecord {
        DeductionRecord {
            section_80c_investments: dec!(120000),
            section_80d_premium: dec!(20000),
            section_80ccd_contribution: Decimal::ZERO,
            professional_tax: dec!(2400),
        }
    }

    #[test]
    fn new_regime_rebate_cliff() {
        // taxable exactly 7L: full rebate
        let result = calculate_new_regime(&income(dec!(775000)), FY);
        assert_eq!(result.taxable_income, dec!(700000));
        assert_eq!(result.total_tax, Decimal::ZERO);
        assert_eq!(result.breakdown.len(), 1);
        assert_eq!(result.breakdown[0].slab, "Rebate u/s 87A");
        assert_eq!(result.breakdown[0].amount, Decimal::ZERO);

        // one rupee over: taxed by the full slab walk
        let result = calculate_new_regime(&income(dec!(775001)), FY);
        assert_eq!(result.taxable_income, dec!(700001));
        assert!(result.total_tax > Decimal::ZERO);
        assert_eq!(result.base_tax, dec!(20000.10));
    }

    #[test]
    fn old_regime_rebate_cliff() {
        // deductions: std 50k + PT 2.4k; no HRA (no rent), no sections
        let deductions = DeductionRecord {
            professional_tax: dec!(2400),
            ..DeductionRecord::default()
        };
        let result = calculate_old_regime(&income(dec!(552400)), &deductions, true, FY);
        assert_eq!(result.taxable_income, dec!(500000));
        assert_eq!(result.total_tax, Decimal::ZERO);
        assert_eq!(result.breakdown[0].slab, "Rebate u/s 87A");

        let result = calculate_old_regime(&income(dec!(552401)), &deductions, true, FY);
        assert_eq!(result.taxable_income, dec!(500001));
        assert!(result.total_tax > Decimal::ZERO);
    }

    #[test]
    fn new_regime_end_to_end_scenario() {
        let result = calculate_new_regime(&scenario_income(), FY);
        assert_eq!(result.taxable_income, dec!(1425000));
        assert_eq!(result.base_tax, dec!(125000));
        assert_eq!(result.cess, dec!(5000));
        assert_eq!(result.total_tax, dec!(130000));
    }

    #[test]
    fn old_regime_end_to_end_scenario() {
        let result =
            calculate_old_regime(&scenario_income(), &scenario_deductions(), true, FY);
        // 120k (80C) + 20k (80D) + 50k (std) + 120k (HRA) + 2.4k (PT)
        assert_eq!(result.taxable_income, dec!(1187600));
        assert_eq!(result.base_tax, dec!(168780));
        assert_eq!(result.cess, dec!(6751.2));
        assert_eq!(result.total_tax, dec!(175531.2));
    }

    #[test]
    fn new_regime_recommended_when_cheaper() {
        let old = calculate_old_regime(&scenario_income(), &scenario_deductions(), true, FY);
        let new = calculate_new_regime(&scenario_income(), FY);
        assert!(new.total_tax < old.total_tax);
        assert_eq!(recommended_regime(&old, &new), Regime::New);
    }

    #[test]
    fn tie_goes_to_old_regime() {
        let zero_income = IncomeRecord::default();
        let old =
            calculate_old_regime(&zero_income, &DeductionRecord::default(), true, FY);
        let new = calculate_new_regime(&zero_income, FY);
        assert_eq!(old.total_tax, new.total_tax);
        assert_eq!(recommended_regime(&old, &new), Regime::Old);
    }

    #[test]
    fn section_caps_applied() {
        let income = scenario_income();
        let over_cap = DeductionRecord {
            section_80c_investments: dec!(500000),
            section_80d_premium: dec!(100000),
            section_80ccd_contribution: dec!(200000),
            professional_tax: dec!(2400),
        };
        let result = calculate_old_regime(&income, &over_cap, true, FY);
        // 150k + 25k + 50k + 50k (std) + 120k (HRA) + 2.4k (PT) = 397.4k
        assert_eq!(result.taxable_income, dec!(1102600));
    }

    #[test]
    fn cess_is_four_percent_of_base_tax() {
        for gross in [dec!(800000), dec!(1200000), dec!(2500000)] {
            let result = calculate_new_regime(&income(gross), FY);
            assert_eq!(result.cess, result.base_tax * dec!(0.04));
            assert_eq!(result.total_tax, result.base_tax + result.cess);
        }
    }

    #[test]
    fn effective_rate_guarded_on_zero_gross() {
        let record = IncomeRecord {
            other_annual_income: dec!(1200000),
            ..Default::default()
        };
        let result = calculate_new_regime(&record, FY);
        assert!(result.total_tax > Decimal::ZERO);
        assert_eq!(result.effective_rate_percent, Decimal::ZERO);
    }

    #[test]
    fn deductions_exceeding_income_clamp_taxable_to_zero() {
        let record = IncomeRecord {
            gross_annual_salary: dec!(40000),
            ..Default::default()
        };
        let result =
            calculate_old_regime(&record, &DeductionRecord::default(), true, FY);
        assert_eq!(result.taxable_income, Decimal::ZERO);
        assert_eq!(result.total_tax, Decimal::ZERO);
    }

    #[test]
    fn new_regime_ignores_hra_and_sections() {
        let with_hra = scenario_income();
        let without_hra = IncomeRecord {
            annual_hra_received: Decimal::ZERO,
            annual_rent_paid: Decimal::ZERO,
            ..scenario_income()
        };
        assert_eq!(
            calculate_new_regime(&with_hra, FY),
            calculate_new_regime(&without_hra, FY)
        );
    }

    #[test]
    fn calculators_are_idempotent() {
        let income = scenario_income();
        let deductions = scenario_deductions();
        assert_eq!(
            calculate_old_regime(&income, &deductions, true, FY),
            calculate_old_regime(&income, &deductions, true, FY)
        );
        assert_eq!(
            calculate_new_regime(&income, FY),
            calculate_new_regime(&income, FY)
        );
    }
}
