//! # HydroFold Core Library
//!
//! A small force-relaxation engine that folds an amino-acid chain with ad hoc
//! hydropathy nudges, bond-length enforcement and steric repulsion, and
//! mirrors each step into a pluggable scene.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Residue table, chain model and geometry helpers.
//!
//! - **[`engine`]: The Logic Core.** Configuration, the per-tick relaxation pass,
//!   the renderer seam (`Scene`, `FrameClock`) and progress reporting.
//!
//! - **[`workflows`]: The Public API.** Ties the two together into a bounded,
//!   cancellable relaxation run.

pub mod core;
pub mod engine;
pub mod workflows;
