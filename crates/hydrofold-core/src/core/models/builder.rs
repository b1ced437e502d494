use super::chain::Chain;
use super::residue::{AminoAcidType, Classification, Residue, ResidueError};
use nalgebra::Point3;
use std::collections::HashMap;
use tracing::debug;

pub const DEFAULT_RESIDUE_RADIUS: f64 = 1.0;

/// Starting point for the residue at `index`.
///
/// The curve has no physical meaning; x grows by 3 per residue, so no two
/// residues start on top of each other.
pub fn initial_position(index: usize) -> Point3<f64> {
    Point3::new((3 * index) as f64, (index ^ 2) as f64, (index ^ 3) as f64)
}

#[derive(Debug, Clone)]
pub struct ChainBuilder {
    radius: f64,
    overrides: HashMap<AminoAcidType, Classification>,
}

impl Default for ChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainBuilder {
    pub fn new() -> Self {
        Self {
            radius: DEFAULT_RESIDUE_RADIUS,
            overrides: HashMap::new(),
        }
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_classification_overrides(
        mut self,
        overrides: HashMap<AminoAcidType, Classification>,
    ) -> Self {
        self.overrides.extend(overrides);
        self
    }

    pub fn build(&self, sequence: &str) -> Result<Chain, ResidueError> {
        let residues = sequence
            .chars()
            .enumerate()
            .map(|(position, code)| {
                let residue_type = AminoAcidType::from_one_letter(code)
                    .map_err(|_| ResidueError::UnknownResidueInSequence { code, position })?;
                let mut residue =
                    Residue::new(residue_type, initial_position(position), self.radius);
                if let Some(&classification) = self.overrides.get(&residue_type) {
                    residue.classification = classification;
                }
                Ok(residue)
            })
            .collect::<Result<Vec<_>, ResidueError>>()?;

        debug!(
            residues = residues.len(),
            bonds = residues.len().saturating_sub(1),
            "Built chain from sequence."
        );
        Ok(Chain::from_residues(residues))
    }
}
