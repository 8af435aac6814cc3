//! Diagnostic classification engine for console repair triage.
//!
//! Everything in this crate is pure: no I/O, no shared mutable state. The
//! API crate and any record-keeping layer call into these functions and
//! persist the results themselves.

pub mod diagnostics;
pub mod error;
pub mod intake;
pub mod pins;
pub mod reading;
pub mod rulebook;
pub mod serial;
pub mod severity;
pub mod test_method;
