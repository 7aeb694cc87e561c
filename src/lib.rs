//! Pay calculator library crate.
//!
//! This crate implements the 7th Pay Commission salary calculation for
//! Indian central-government employees.  Applications may call the
//! pure calculators in [`allowances`] directly, run a whole input
//! snapshot through [`engine::calculate`], or embed the HTTP API via
//! [`api::build_router`].

pub mod models;
pub mod error;
pub mod matrix;
pub mod allowances;
pub mod engine;
pub mod format;
pub mod config;
pub mod api;
