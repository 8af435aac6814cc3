pub mod diagnostics;
pub mod serials;
pub mod units;
