//! # Core Module
//!
//! Stateless foundation of HydroFold: the residue table, the chain model and
//! the small amount of vector geometry the engine needs.
//!
//! - **Molecular Representation** ([`models`]) - Residues, chains, bonds and the chain builder
//! - **Utilities** ([`utils`]) - Residue code tables and geometry helpers

pub mod models;
pub mod utils;
