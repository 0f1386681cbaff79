//! admitcalc-core — Catalog, chance calculator, and ranking engine.
//!
//! This crate defines the university/program data model, the pure admission
//! chance calculator, and the orchestrator that scores and ranks a selection
//! of the catalog.

pub mod calculator;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
