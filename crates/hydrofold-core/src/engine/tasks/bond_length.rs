use crate::core::models::chain::Bond;
use crate::core::models::residue::Residue;
use crate::core::utils::geometry;
use crate::engine::config::BondLengthPolicy;
use nalgebra::Vector3;

/// Walks the bonds in sequence order, moving the far endpoint of every bond the
/// policy rejects so that the bond has the policy's target length.
///
/// Each correction is visible to the next bond, so a correction near the start
/// of the chain drags the rest of the chain along. Returns the number of
/// corrected bonds.
pub fn run(residues: &mut [Residue], policy: &BondLengthPolicy) -> usize {
    let mut corrected = 0;
    for start in 0..residues.len().saturating_sub(1) {
        let bond = Bond::between(
            start,
            &residues[start].position,
            &residues[start + 1].position,
        );
        if let Some(target) = policy.corrected_length(bond.length()) {
            let direction = geometry::unit_direction_or(&bond.axis, Vector3::x());
            let axis = direction * target;
            residues[bond.end_index()].position = bond.pos + axis;
            corrected += 1;
        }
    }
    corrected
}
