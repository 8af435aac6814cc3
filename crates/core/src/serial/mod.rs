//! Serial-number classification.
//!
//! Pure logic: the record-keeping layer passes a scanned serial or barcode
//! and stores whatever comes back.

pub mod classifier;
pub mod rules;

pub use classifier::{
    classify_serial, classify_serial_with, ClassificationInfo, DeviceType, PatchStatus,
};
pub use rules::SerialRuleSet;
