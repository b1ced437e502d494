use super::residue::Residue;
use crate::core::utils::geometry;
use itertools::Itertools;
use nalgebra::{Point3, Vector3};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ChainError {
    #[error("Chain with {len} residue(s) is degenerate for this operation")]
    Degenerate { len: usize },
}

/// Covalent link between residue `start` and residue `start + 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bond {
    pub start: usize,
    pub pos: Point3<f64>,
    pub axis: Vector3<f64>,
}

impl Bond {
    pub fn between(start: usize, from: &Point3<f64>, to: &Point3<f64>) -> Self {
        Self {
            start,
            pos: *from,
            axis: to - from,
        }
    }

    pub fn end_index(&self) -> usize {
        self.start + 1
    }

    pub fn end(&self) -> Point3<f64> {
        self.pos + self.axis
    }

    pub fn length(&self) -> f64 {
        self.axis.norm()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Chain {
    pub(crate) residues: Vec<Residue>, // Sequence order, fixed after construction
}

impl Chain {
    pub(crate) fn from_residues(residues: Vec<Residue>) -> Self {
        Self { residues }
    }

    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    pub(crate) fn residues_mut(&mut self) -> &mut [Residue] {
        &mut self.residues
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn bond_count(&self) -> usize {
        self.residues.len().saturating_sub(1)
    }

    /// Bonds re-read from the current residue positions.
    pub fn bonds(&self) -> Vec<Bond> {
        self.residues
            .iter()
            .tuple_windows()
            .enumerate()
            .map(|(i, (a, b))| Bond::between(i, &a.position, &b.position))
            .collect()
    }

    pub fn positions(&self) -> Vec<Point3<f64>> {
        self.residues.iter().map(|r| r.position).collect()
    }

    pub fn sequence(&self) -> String {
        self.residues
            .iter()
            .map(|r| r.residue_type.to_one_letter())
            .collect()
    }

    pub fn center_of_mass(&self) -> Result<Point3<f64>, ChainError> {
        geometry::centroid(&self.positions()).ok_or(ChainError::Degenerate { len: 0 })
    }

    /// Fails unless the chain has at least one bond.
    pub fn require_bonded(&self) -> Result<(), ChainError> {
        if self.residues.len() < 2 {
            return Err(ChainError::Degenerate {
                len: self.residues.len(),
            });
        }
        Ok(())
    }

    pub fn radius_of_gyration(&self) -> Option<f64> {
        geometry::radius_of_gyration(&self.positions())
    }

    /// Smallest `distance - (r_i + r_j)` over all residue pairs; negative means overlap.
    pub fn min_clearance(&self) -> Option<f64> {
        self.residues
            .iter()
            .tuple_combinations()
            .map(|(a, b)| geometry::distance(&a.position, &b.position) - (a.radius + b.radius))
            .reduce(f64::min)
    }
}
