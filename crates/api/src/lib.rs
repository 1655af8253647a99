//! HTTP control surface for the LoRA scan service.
//!
//! Exposes the scan job controller over a small JSON API and wires the
//! catalog and store clients into it. The binary entry point lives in
//! `main.rs`; everything here is a library so integration tests can
//! build the exact production router.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod scanner;
pub mod state;
