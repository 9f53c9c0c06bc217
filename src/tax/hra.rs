//! House Rent Allowance exemption (Old Regime only)

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Exempt portion of HRA: the least of HRA received, 50% of basic (40%
/// non-metro), and rent paid less 10% of basic, floored at zero.
///
/// No rent paid means no exemption, whatever the salary structure.
pub fn hra_exemption(
    basic_salary: Decimal,
    hra_received: Decimal,
    rent_paid: Decimal,
    metro: bool,
) -> Decimal {
    if rent_paid.is_zero() {
        return Decimal::ZERO;
    }

    let salary_factor = if metro { dec!(0.5) } else { dec!(0.4) };
    let basic_component = salary_factor * basic_salary;
    let rent_excess = rent_paid - dec!(0.10) * basic_salary;

    hra_received
        .min(basic_component)
        .min(rent_excess)
        .max(Decimal::ZERO)
}
