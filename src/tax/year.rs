use crate::tax::regime::Regime;
use crate::tax::slab::Slab;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Indian Financial Year (runs 1 April to 31 March)
/// The year value represents the end year (e.g., 2025 = FY 2024-25)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaxYear(pub i32);

impl TaxYear {
    /// Create a tax year from a date
    pub fn from_date(date: NaiveDate) -> Self {
        let year = date.year();
        // FY starts 1 April
        // On or after 1 April the date falls in the FY ending next March
        if date >= NaiveDate::from_ymd_opt(year, 4, 1).unwrap() {
            TaxYear(year + 1)
        } else {
            TaxYear(year)
        }
    }

    /// Start date of the financial year (1 April of previous year)
    pub fn start_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.0 - 1, 4, 1).unwrap()
    }

    /// End date of the financial year (31 March)
    pub fn end_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.0, 3, 31).unwrap()
    }

    /// Display as "2024-25" format
    pub fn display(&self) -> String {
        format!("{}-{:02}", self.0 - 1, self.0 % 100)
    }

    /// New Regime slab table: cumulative upper limits with marginal rates,
    /// last band unbounded
    pub fn new_regime_slabs(&self) -> Vec<Slab> {
        match self.0 {
            // FY 2024-25 onwards (Budget 2024 slabs)
            2025.. => vec![
                Slab::up_to(dec!(300000), dec!(0)),
                Slab::up_to(dec!(700000), dec!(0.05)),
                Slab::up_to(dec!(1000000), dec!(0.10)),
                Slab::up_to(dec!(1200000), dec!(0.15)),
                Slab::up_to(dec!(1500000), dec!(0.20)),
                Slab::unbounded(dec!(0.30)),
            ],
            // FY 2023-24 (Budget 2023 slabs)
            _ => vec![
                Slab::up_to(dec!(300000), dec!(0)),
                Slab::up_to(dec!(600000), dec!(0.05)),
                Slab::up_to(dec!(900000), dec!(0.10)),
                Slab::up_to(dec!(1200000), dec!(0.15)),
                Slab::up_to(dec!(1500000), dec!(0.20)),
                Slab::unbounded(dec!(0.30)),
            ],
        }
    }

    /// Old Regime slab table (general citizen, under 60); unchanged for years
    pub fn old_regime_slabs(&self) -> Vec<Slab> {
        vec![
            Slab::up_to(dec!(250000), dec!(0)),
            Slab::up_to(dec!(500000), dec!(0.05)),
            Slab::up_to(dec!(1000000), dec!(0.20)),
            Slab::unbounded(dec!(0.30)),
        ]
    }

    /// Standard deduction for salaried income
    pub fn standard_deduction(&self, regime: Regime) -> Decimal {
        match (regime, self.0) {
            // Raised to 75k for the New Regime from FY 2024-25
            (Regime::New, 2025..) => dec!(75000),
            (Regime::New, _) => dec!(50000),
            (Regime::Old, _) => dec!(50000),
        }
    }

    /// Rebate u/s 87A threshold: total tax is zeroed when taxable income is
    /// at or below this amount (a cliff, not marginal relief)
    pub fn rebate_threshold(&self, regime: Regime) -> Decimal {
        match regime {
            Regime::New => dec!(700000),
            Regime::Old => dec!(500000),
        }
    }

    /// Health and education cess rate, applied on top of base tax
    pub fn cess_rate(&self) -> Decimal {
        dec!(0.04)
    }

    /// Section 80C investment cap (PPF, ELSS, LIC, EPF)
    pub fn section_80c_cap(&self) -> Decimal {
        dec!(150000)
    }

    /// Section 80D medical insurance cap (self, under 60)
    pub fn section_80d_cap(&self) -> Decimal {
        dec!(25000)
    }

    /// Section 80CCD(1B) NPS contribution cap
    pub fn section_80ccd_1b_cap(&self) -> Decimal {
        dec!(50000)
    }
}

impl std::fmt::Display for TaxYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tax_year_from_date_before_april_1() {
        // 31 March 2025 is in FY 2024-25
        let date = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        assert_eq!(TaxYear::from_date(date), TaxYear(2025));
    }

    #[test]
    fn tax_year_from_date_on_april_1() {
        // 1 April 2025 is in FY 2025-26
        let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        assert_eq!(TaxYear::from_date(date), TaxYear(2026));
    }

    #[test]
    fn tax_year_from_date_december() {
        // 31 December 2024 is in FY 2024-25
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(TaxYear::from_date(date), TaxYear(2025));
    }

    #[test]
    fn tax_year_display() {
        assert_eq!(TaxYear(2024).display(), "2023-24");
        assert_eq!(TaxYear(2025).display(), "2024-25");
        assert_eq!(TaxYear(2026).display(), "2025-26");
    }

    #[test]
    fn tax_year_start_end_dates() {
        let fy = TaxYear(2025);
        assert_eq!(fy.start_date(), NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
        assert_eq!(fy.end_date(), NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());
    }

    #[test]
    fn new_regime_slabs_fy_2024_25() {
        let slabs = TaxYear(2025).new_regime_slabs();
        assert_eq!(slabs.len(), 6);
        assert_eq!(slabs[1].upper_limit, Some(dec!(700000)));
        assert_eq!(slabs[1].rate, dec!(0.05));
        assert_eq!(slabs[5].upper_limit, None);
        assert_eq!(slabs[5].rate, dec!(0.30));
    }

    #[test]
    fn new_regime_slabs_fy_2023_24() {
        let slabs = TaxYear(2024).new_regime_slabs();
        assert_eq!(slabs[1].upper_limit, Some(dec!(600000)));
        assert_eq!(slabs[2].upper_limit, Some(dec!(900000)));
    }

    #[test]
    fn standard_deductions() {
        assert_eq!(TaxYear(2025).standard_deduction(Regime::New), dec!(75000));
        assert_eq!(TaxYear(2024).standard_deduction(Regime::New), dec!(50000));
        assert_eq!(TaxYear(2025).standard_deduction(Regime::Old), dec!(50000));
    }

    #[test]
    fn rebate_thresholds() {
        let fy = TaxYear(2025);
        assert_eq!(fy.rebate_threshold(Regime::New), dec!(700000));
        assert_eq!(fy.rebate_threshold(Regime::Old), dec!(500000));
    }

    #[test]
    fn deduction_caps() {
        let fy = TaxYear(2025);
        assert_eq!(fy.section_80c_cap(), dec!(150000));
        assert_eq!(fy.section_80d_cap(), dec!(25000));
        assert_eq!(fy.section_80ccd_1b_cap(), dec!(50000));
    }
}
