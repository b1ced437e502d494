use super::config::ForceConfig;
use super::tasks::{self, steric::StericReport};
use crate::core::models::chain::{Chain, ChainError};
use nalgebra::Point3;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Relaxed,
    /// The chain had no residues, so there was nothing to do.
    Skipped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub outcome: TickOutcome,
    pub center_of_mass: Option<Point3<f64>>,
    pub residues_nudged: usize,
    pub bonds_corrected: usize,
    pub steric: StericReport,
    pub radius_of_gyration: Option<f64>,
}

impl TickReport {
    fn skipped() -> Self {
        Self {
            outcome: TickOutcome::Skipped,
            center_of_mass: None,
            residues_nudged: 0,
            bonds_corrected: 0,
            steric: StericReport::default(),
            radius_of_gyration: None,
        }
    }
}

/// Applies one tick of ad hoc hydropathy forces to a chain.
#[derive(Debug, Clone)]
pub struct RelaxationEngine {
    forces: ForceConfig,
}

impl RelaxationEngine {
    pub fn new(forces: ForceConfig) -> Self {
        Self { forces }
    }

    pub fn tick(&self, chain: &mut Chain) -> TickReport {
        let center_of_mass = match chain.center_of_mass() {
            Ok(com) => com,
            Err(ChainError::Degenerate { len }) => {
                trace!(len, "Skipping tick on empty chain.");
                return TickReport::skipped();
            }
        };

        let residues = chain.residues_mut();
        let shifted_center =
            tasks::centering::run(residues, &center_of_mass, self.forces.centering_strength);
        let residues_nudged =
            tasks::hydropathy::run(residues, &shifted_center, self.forces.nudge_magnitude);
        let bonds_corrected = tasks::bond_length::run(residues, &self.forces.bond_policy);
        let max_sweeps =
            tasks::steric::sweep_limit(self.forces.max_repulsion_sweeps, residues.len());
        let steric = tasks::steric::run(residues, max_sweeps);

        let report = TickReport {
            outcome: TickOutcome::Relaxed,
            center_of_mass: Some(center_of_mass),
            residues_nudged,
            bonds_corrected,
            steric,
            radius_of_gyration: chain.radius_of_gyration(),
        };
        trace!(
            nudged = report.residues_nudged,
            bonds = report.bonds_corrected,
            overlaps = report.steric.overlaps_resolved,
            sweeps = report.steric.sweeps,
            "Tick applied."
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::builder::ChainBuilder;
    use crate::core::models::residue::{AminoAcidType, Classification, Residue};
    use crate::engine::config::{BondLengthPolicy, DEFAULT_MAX_REPULSION_SWEEPS, RelaxationConfig};
    use itertools::Itertools;
    use std::collections::HashMap;

    const SAMPLE: &str = "HSGRVHYEAALQEIDSDFDDGIIKYTYQLG";

    fn default_engine() -> RelaxationEngine {
        RelaxationEngine::new(RelaxationConfig::default().forces)
    }

    fn neutral_pair(a: Point3<f64>, b: Point3<f64>) -> Chain {
        let mut first = Residue::new(AminoAcidType::Glycine, a, 1.0);
        let mut second = Residue::new(AminoAcidType::Glycine, b, 1.0);
        first.classification = Classification::Neutral;
        second.classification = Classification::Neutral;
        Chain::from_residues(vec![first, second])
    }

    fn assert_no_overlaps(chain: &Chain) {
        for (a, b) in chain.residues().iter().tuple_combinations() {
            let distance = (a.position - b.position).norm();
            assert!(
                distance >= a.radius + b.radius - 1e-6,
                "{} and {} overlap: distance {distance}",
                a.name(),
                b.name()
            );
        }
    }

    #[test]
    fn empty_chain_tick_is_skipped() {
        let mut chain = ChainBuilder::new().build("").unwrap();
        let report = default_engine().tick(&mut chain);
        assert_eq!(report.outcome, TickOutcome::Skipped);
        assert!(report.center_of_mass.is_none());
        assert!(chain.is_empty());
    }

    #[test]
    fn single_residue_tick_is_safe() {
        let mut chain = ChainBuilder::new().build("K").unwrap();
        let report = default_engine().tick(&mut chain);
        assert_eq!(report.outcome, TickOutcome::Relaxed);
        assert_eq!(report.bonds_corrected, 0);
        // A lone residue is its own center of mass, so it gets no nudge.
        assert_eq!(report.residues_nudged, 0);
        let expected = Point3::new(0.0, 2.0, 3.0) * 0.9;
        assert!((chain.residues()[0].position - expected).norm() < 1e-12);
    }

    #[test]
    fn centroid_contracts_by_centering_strength_for_balanced_chain() {
        // Neutral residues already 4 apart: only the centering step moves them.
        let mut chain = neutral_pair(Point3::new(8.0, 2.0, 0.0), Point3::new(12.0, 2.0, 0.0));
        let before = chain.center_of_mass().unwrap();

        let report = default_engine().tick(&mut chain);

        let after = chain.center_of_mass().unwrap();
        assert_eq!(report.residues_nudged, 0);
        assert_eq!(report.steric.overlaps_resolved, 0);
        assert!((after - before * 0.9).norm() < 1e-9);
    }

    #[test]
    fn tick_reports_center_of_mass_from_before_the_correction() {
        let mut chain = ChainBuilder::new().build(SAMPLE).unwrap();
        let before = chain.center_of_mass().unwrap();
        let report = default_engine().tick(&mut chain);
        assert_eq!(report.center_of_mass, Some(before));
        assert!(report.radius_of_gyration.unwrap().is_finite());
        assert_eq!(report.residues_nudged, 30);
    }

    #[test]
    fn literal_policy_corrects_every_bond() {
        let mut forces = RelaxationConfig::default().forces;
        forces.max_repulsion_sweeps = 1;
        let mut chain = ChainBuilder::new().build("HSGRV").unwrap();
        let report = RelaxationEngine::new(forces).tick(&mut chain);
        assert_eq!(report.bonds_corrected, 4);
    }

    #[test]
    fn two_overlapping_residues_end_in_contact() {
        let mut chain = neutral_pair(Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 0.0));
        let mut forces = RelaxationConfig::default().forces;
        forces.centering_strength = 0.0;
        forces.bond_policy = BondLengthPolicy::band(0.5, 12.0);
        // Bond is 0 long, clamped to 0.5, then steric repulsion opens it to 2.
        let report = RelaxationEngine::new(forces).tick(&mut chain);
        assert_eq!(report.bonds_corrected, 1);
        assert_eq!(report.steric.overlaps_resolved, 1);
        let distance = (chain.residues()[0].position - chain.residues()[1].position).norm();
        assert!((distance - 2.0).abs() < 1e-9);
    }

    #[test]
    fn sample_chain_stays_overlap_free_over_many_ticks() {
        let mut chain = ChainBuilder::new().build(SAMPLE).unwrap();
        assert_eq!(chain.len(), 30);
        assert_eq!(chain.bonds().len(), 29);

        let engine = default_engine();
        for _ in 0..50 {
            let report = engine.tick(&mut chain);
            assert!(report.steric.converged);
            assert_no_overlaps(&chain);
        }
    }

    #[test]
    fn band_policy_run_stays_overlap_free() {
        let overrides = HashMap::from([(AminoAcidType::Glycine, Classification::Neutral)]);
        let mut chain = ChainBuilder::new()
            .with_classification_overrides(overrides)
            .build(SAMPLE)
            .unwrap();
        let mut forces = RelaxationConfig::default().forces;
        forces.bond_policy = BondLengthPolicy::band(8.0, 12.0);
        let engine = RelaxationEngine::new(forces);
        for _ in 0..20 {
            engine.tick(&mut chain);
            assert_no_overlaps(&chain);
        }
    }

    #[test]
    fn nudges_break_centroid_contraction_on_sample_chain() {
        let mut chain = ChainBuilder::new().build(SAMPLE).unwrap();
        let before = chain.center_of_mass().unwrap();
        assert!((before - Point3::new(43.5, 14.633, 14.633)).norm() < 1e-3);

        default_engine().tick(&mut chain);

        // Nudges, bond rescaling and repulsion all move the centroid, so it
        // lands well away from the pure (1 - k) contraction.
        let after = chain.center_of_mass().unwrap();
        assert!((after - Point3::new(37.69, 12.01, 11.74)).norm() < 0.02);
        assert!((after - before * 0.9).norm() > 1.0);
    }

    #[test]
    fn long_chain_settles_every_tick() {
        let sequence = "L".repeat(150);
        let mut chain = ChainBuilder::new().build(&sequence).unwrap();
        let engine = default_engine();
        // Past roughly tick 190 this chain needs more than the default 100 sweeps.
        let mut most_sweeps = 0;
        for tick in 0..220 {
            let report = engine.tick(&mut chain);
            assert!(report.steric.converged, "tick {tick} did not settle");
            assert!(chain.min_clearance().unwrap() >= -1e-8);
            most_sweeps = most_sweeps.max(report.steric.sweeps);
        }
        assert!(most_sweeps > DEFAULT_MAX_REPULSION_SWEEPS);
    }
}
