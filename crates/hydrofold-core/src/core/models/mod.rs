//! # Core Models Module
//!
//! Data structures for the residue chain that the relaxation engine folds.
//!
//! ## Key Components
//!
//! - [`residue`] - Amino acid identity, hydropathy classification and the per-residue state
//! - [`chain`] - The ordered residue chain, its bonds and derived quantities (center of mass)
//! - [`builder`] - Construction of a chain from a one-letter sequence
//!
//! ## Usage
//!
//! ```ignore
//! use hydrofold::core::models::builder::ChainBuilder;
//!
//! let chain = ChainBuilder::new().build("HSGRVHYEAALQ")?;
//! assert_eq!(chain.bond_count(), 11);
//! let com = chain.center_of_mass()?;
//! ```

pub mod builder;
pub mod chain;
pub mod residue;
