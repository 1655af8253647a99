//! Shared domain types for the LoRA scan service.
//!
//! Holds the store record field sets, the scan status projection, and
//! common type aliases. Everything here is plain data plus synchronous
//! logic; all I/O lives in the client crates.

pub mod record;
pub mod scan;
pub mod types;
