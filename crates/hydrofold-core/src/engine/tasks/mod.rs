//! The per-tick relaxation steps, applied in this order by
//! [`RelaxationEngine`](super::relaxation::RelaxationEngine):
//!
//! 1. [`centering`] - pull the whole chain back toward the origin
//! 2. [`hydropathy`] - unit nudges away from / toward the center of mass
//! 3. [`bond_length`] - enforce the bond-length policy down the chain
//! 4. [`steric`] - separate overlapping residue pairs

pub mod bond_length;
pub mod centering;
pub mod hydropathy;
pub mod steric;
