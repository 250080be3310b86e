//! Code explainer library crate
//!
//! Exposes the explain pipeline so the binary, integration tests and
//! benchmarks can drive it without going through terminal startup.

pub mod analysis;
pub mod app;
pub mod config;
pub mod decode;
pub mod diff;
pub mod error;
pub mod explain;
pub mod history;
pub mod llm;
pub mod logging;
pub mod report;
pub mod sample;
pub mod ui;
