use crate::core::models::residue::{Classification, Residue};
use crate::core::utils::geometry;
use nalgebra::Point3;

/// Moves hydrophilic residues away from `center_of_mass` and hydrophobic ones
/// toward it by exactly `magnitude`. Neutral residues and residues sitting on
/// the center are left in place.
///
/// Returns the number of residues that moved.
pub fn run(residues: &mut [Residue], center_of_mass: &Point3<f64>, magnitude: f64) -> usize {
    let mut nudged = 0;
    for residue in residues.iter_mut() {
        let outward = residue.position - center_of_mass;
        let direction = match residue.classification {
            Classification::Hydrophilic => outward,
            Classification::Hydrophobic => -outward,
            Classification::Neutral => continue,
        };
        if let Some(unit) = geometry::unit_direction(&direction) {
            residue.position += unit * magnitude;
            nudged += 1;
        }
    }
    nudged
}
