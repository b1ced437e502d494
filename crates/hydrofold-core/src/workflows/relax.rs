use crate::core::models::builder::ChainBuilder;
use crate::core::models::chain::Chain;
use crate::engine::clock::{self, FrameClock};
use crate::engine::config::RelaxationConfig;
use crate::engine::control::{CancellationToken, StopReason};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::relaxation::RelaxationEngine;
use crate::engine::scene::{Scene, SceneBinding};
use nalgebra::Point3;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct RelaxationSummary {
    pub ticks: u64,
    pub stop_reason: StopReason,
    pub center_of_mass: Option<Point3<f64>>,
    pub radius_of_gyration: Option<f64>,
    pub min_clearance: Option<f64>,
    /// Ticks whose steric pass hit the sweep limit with overlaps left.
    pub unsettled_ticks: u64,
}

/// Builds a chain from `sequence` using the residue settings in `config`.
pub fn build_chain(sequence: &str, config: &RelaxationConfig) -> Result<Chain, EngineError> {
    let chain = ChainBuilder::new()
        .with_radius(config.residues.radius)
        .with_classification_overrides(config.residues.classification_overrides.clone())
        .build(sequence)?;
    Ok(chain)
}

/// Relaxes `chain` in place, mirroring every tick into `scene`.
///
/// The loop checks `cancel` and the tick budget before every tick, so a
/// budget of `Some(n)` runs exactly `n` ticks unless cancelled first.
#[instrument(skip_all, name = "relaxation_workflow", fields(residues = chain.len()))]
pub fn run<S: Scene + ?Sized>(
    chain: &mut Chain,
    config: &RelaxationConfig,
    scene: &mut S,
    clock: &mut dyn FrameClock,
    reporter: &ProgressReporter,
    cancel: &CancellationToken,
) -> Result<RelaxationSummary, EngineError> {
    config.validate()?;

    reporter.report(Progress::PhaseStart {
        name: "Binding Scene",
    });
    let binding = SceneBinding::attach(chain, scene);
    debug!(
        spheres = binding.spheres().len(),
        cylinders = binding.cylinders().len(),
        "Chain attached to scene."
    );
    reporter.report(Progress::PhaseFinish);

    if let Err(e) = chain.require_bonded() {
        warn!("{e}; relaxation will only recenter the chain.");
    }

    let engine = RelaxationEngine::new(config.forces.clone());
    let tick_budget = config.simulation.tick_budget;
    info!(?tick_budget, "Starting relaxation loop.");
    reporter.report(Progress::RunStart { tick_budget });

    let mut ticks = 0u64;
    let mut unsettled_ticks = 0u64;
    let stop_reason = loop {
        if cancel.is_cancelled() {
            break StopReason::Cancelled;
        }
        if tick_budget.is_some_and(|budget| ticks >= budget) {
            break StopReason::BudgetExhausted;
        }

        let report = engine.tick(chain);
        binding.sync(chain, scene)?;
        ticks += 1;
        if !report.steric.converged {
            unsettled_ticks += 1;
        }

        reporter.report(Progress::TickFinished {
            tick: ticks,
            radius_of_gyration: report.radius_of_gyration.unwrap_or(0.0),
        });
        clock.wait_for_next_frame();
    };
    reporter.report(Progress::RunFinish);

    let summary = RelaxationSummary {
        ticks,
        stop_reason,
        center_of_mass: chain.center_of_mass().ok(),
        radius_of_gyration: chain.radius_of_gyration(),
        min_clearance: chain.min_clearance(),
        unsettled_ticks,
    };
    info!(
        ticks = summary.ticks,
        stop_reason = ?summary.stop_reason,
        unsettled = summary.unsettled_ticks,
        "Relaxation finished."
    );
    Ok(summary)
}

/// Builds the chain for `sequence` and relaxes it with a clock paced by
/// `config.simulation.frame_rate_hz`.
pub fn run_sequence<S: Scene + ?Sized>(
    sequence: &str,
    config: &RelaxationConfig,
    scene: &mut S,
    reporter: &ProgressReporter,
    cancel: &CancellationToken,
) -> Result<(Chain, RelaxationSummary), EngineError> {
    config.validate()?;
    let mut chain = build_chain(sequence, config)?;
    let mut clock = clock::clock_for_rate(config.simulation.frame_rate_hz)?;
    let summary = run(&mut chain, config, scene, clock.as_mut(), reporter, cancel)?;
    Ok((chain, summary))
}
