use crate::cli::RunArgs;
use crate::config::PartialRelaxationConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use hydrofold::{
    core::models::chain::Chain,
    engine::{
        control::{CancellationToken, StopReason},
        progress::ProgressReporter,
        scene::HeadlessScene,
    },
    workflows::{self, relax::RelaxationSummary},
};
use tracing::{debug, info, warn};

pub fn run(args: RunArgs) -> Result<()> {
    let partial_config = match &args.config {
        Some(path) => PartialRelaxationConfig::from_file(path)?,
        None => PartialRelaxationConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let final_config = partial_config.merge_with_cli(&args)?;
    debug!("Final configuration: {:?}", final_config);

    let cancel = CancellationToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || handler_token.cancel()).map_err(|e| {
        CliError::Other(anyhow::anyhow!("Failed to install Ctrl-C handler: {e}"))
    })?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let mut scene = HeadlessScene::new();

    println!("Folding {} residue(s)...", args.sequence.chars().count());
    info!("Invoking the core relaxation workflow...");

    let (chain, summary) = workflows::relax::run_sequence(
        &args.sequence,
        &final_config,
        &mut scene,
        &reporter,
        &cancel,
    )?;

    info!(
        shapes = scene.len(),
        updates = scene.update_count(),
        "Headless scene finished."
    );
    if summary.unsettled_ticks > 0 {
        warn!(
            "{} tick(s) ended with overlaps still present.",
            summary.unsettled_ticks
        );
    }

    print!("{}", format_summary(&chain, &summary));
    Ok(())
}

fn format_summary(chain: &Chain, summary: &RelaxationSummary) -> String {
    let reason = match summary.stop_reason {
        StopReason::BudgetExhausted => "tick budget reached",
        StopReason::Cancelled => "cancelled",
    };
    let mut lines = vec![
        format!(
            "✓ Relaxation stopped after {} tick(s) ({reason}).",
            summary.ticks
        ),
        format!(
            "  Residues: {} | Bonds: {}",
            chain.len(),
            chain.bond_count()
        ),
    ];
    if let Some(com) = summary.center_of_mass {
        lines.push(format!(
            "  Center of mass: ({:.3}, {:.3}, {:.3})",
            com.x, com.y, com.z
        ));
    }
    if let Some(rg) = summary.radius_of_gyration {
        lines.push(format!("  Radius of gyration: {rg:.3}"));
    }
    if let Some(clearance) = summary.min_clearance {
        lines.push(format!("  Minimum clearance: {clearance:.3}"));
    }
    if summary.unsettled_ticks > 0 {
        lines.push(format!("  Unsettled ticks: {}", summary.unsettled_ticks));
    }
    lines.join("\n") + "\n"
}
