use crate::core::models::residue::Residue;
use crate::core::utils::geometry;
use itertools::Itertools;
use nalgebra::Vector3;
use tracing::{trace, warn};

/// Overlaps shallower than this are treated as contact.
pub const OVERLAP_TOLERANCE: f64 = 1e-9;

/// Minimum sweeps granted per residue, so long chains can settle even when
/// the configured limit is lower.
pub const SWEEPS_PER_RESIDUE: usize = 8;

/// Sweep limit for a chain of `residue_count`: the configured limit, raised to
/// [`SWEEPS_PER_RESIDUE`] sweeps per residue.
pub fn sweep_limit(max_sweeps: usize, residue_count: usize) -> usize {
    max_sweeps.max(residue_count.saturating_mul(SWEEPS_PER_RESIDUE))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StericReport {
    pub overlaps_resolved: usize,
    pub sweeps: usize,
    pub converged: bool,
}

/// Separates one pair if it overlaps. Both residues move half the overlap in
/// opposite directions, leaving them exactly in contact.
pub fn resolve_pair(a: &mut Residue, b: &mut Residue) -> bool {
    let delta = a.position - b.position;
    let distance = delta.norm();
    let contact = a.radius + b.radius;
    if distance >= contact - OVERLAP_TOLERANCE {
        return false;
    }
    let direction = geometry::unit_direction_or(&delta, Vector3::x());
    let half_overlap = (contact - distance) / 2.0;
    a.position += direction * half_overlap;
    b.position -= direction * half_overlap;
    true
}

/// Sweeps all unordered pairs until a full sweep finds no overlap or
/// `max_sweeps` is reached.
pub fn run(residues: &mut [Residue], max_sweeps: usize) -> StericReport {
    let mut report = StericReport::default();
    let pairs: Vec<(usize, usize)> = (0..residues.len()).tuple_combinations().collect();

    while report.sweeps < max_sweeps {
        report.sweeps += 1;
        let mut resolved_this_sweep = 0;
        for &(i, j) in &pairs {
            let (head, tail) = residues.split_at_mut(j);
            if resolve_pair(&mut head[i], &mut tail[0]) {
                resolved_this_sweep += 1;
            }
        }
        trace!(
            sweep = report.sweeps,
            resolved = resolved_this_sweep,
            "Steric sweep finished."
        );
        report.overlaps_resolved += resolved_this_sweep;
        if resolved_this_sweep == 0 {
            report.converged = true;
            return report;
        }
    }

    warn!(
        sweeps = report.sweeps,
        "Steric repulsion did not settle within the sweep limit."
    );
    report
}
