use crate::core::models::residue::Residue;
use nalgebra::Point3;

/// Shifts every residue by `-center_of_mass * strength`.
///
/// Returns the center of mass after the shift.
pub fn run(residues: &mut [Residue], center_of_mass: &Point3<f64>, strength: f64) -> Point3<f64> {
    let shift = -center_of_mass.coords * strength;
    for residue in residues.iter_mut() {
        residue.position += shift;
    }
    center_of_mass + shift
}
