//! CivitAI catalog client and record extraction.
//!
//! Wraps the public CivitAI REST API (model metadata lookup) using
//! [`reqwest`], deserializes catalog documents into typed structs, and
//! flattens them into the field sets the store writes.

pub mod client;
pub mod extract;
pub mod model;
