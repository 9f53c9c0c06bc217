pub mod hra;
pub mod regime;
pub mod slab;
pub mod year;

pub use regime::{calculate_new_regime, calculate_old_regime, recommended_regime, Regime, TaxResult};
pub use year::TaxYear;
