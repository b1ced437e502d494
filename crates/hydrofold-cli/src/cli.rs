use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_SEQUENCE: &str = "HSGRVHYEAALQEIDSDFDDGIIKYTYQLG";

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "HydroFold Developers",
    version,
    about = "HydroFold CLI - fold a toy amino-acid chain with hydropathy-driven force relaxation.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a chain from a sequence and relax it in a headless scene.
    Run(RunArgs),
    /// Print the residue table: codes, classification and display color.
    Residues,
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    // --- Input ---
    /// One-letter amino-acid sequence to fold.
    #[arg(short = 'i', long, value_name = "SEQUENCE", default_value = DEFAULT_SEQUENCE)]
    pub sequence: String,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Simulation Overrides ---
    /// Stop after this many ticks. Without it the run continues until Ctrl-C.
    #[arg(short = 'n', long, value_name = "INT")]
    pub ticks: Option<u64>,

    /// Cap the loop at this many ticks per second.
    #[arg(short, long, value_name = "HZ", conflicts_with = "unthrottled")]
    pub rate: Option<f64>,

    /// Run ticks back to back without frame pacing.
    #[arg(long)]
    pub unthrottled: bool,

    // --- Force Overrides ---
    /// Use the bond-length band MIN,MAX instead of the fixed-length rule.
    #[arg(long, value_name = "MIN,MAX", value_parser = parse_band)]
    pub band: Option<(f64, f64)>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S forces.centering-strength=0.2
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

pub(crate) fn parse_band(s: &str) -> Result<(f64, f64), String> {
    let (min, max) = s
        .split_once(',')
        .ok_or_else(|| format!("expected MIN,MAX, got '{s}'"))?;
    let min = min
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid band minimum '{min}': {e}"))?;
    let max = max
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid band maximum '{max}': {e}"))?;
    Ok((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_defaults_to_sample_sequence() {
        let cli = Cli::parse_from(["hydrofold", "run"]);
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.sequence, DEFAULT_SEQUENCE);
                assert!(args.ticks.is_none());
                assert!(args.band.is_none());
                assert!(!args.unthrottled);
            }
            other => panic!("expected run, got {other:?}"),
        }
    }

    #[test]
    fn band_argument_is_parsed() {
        let cli = Cli::parse_from(["hydrofold", "run", "--band", "8, 12", "-n", "10"]);
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.band, Some((8.0, 12.0)));
                assert_eq!(args.ticks, Some(10));
            }
            other => panic!("expected run, got {other:?}"),
        }
    }

    #[test]
    fn malformed_band_is_rejected() {
        assert!(Cli::try_parse_from(["hydrofold", "run", "--band", "8"]).is_err());
        assert!(Cli::try_parse_from(["hydrofold", "run", "--band", "a,b"]).is_err());
    }

    #[test]
    fn rate_conflicts_with_unthrottled() {
        assert!(
            Cli::try_parse_from(["hydrofold", "run", "--rate", "10", "--unthrottled"]).is_err()
        );
    }

    #[test]
    fn global_flags_apply_to_subcommands() {
        let cli = Cli::parse_from(["hydrofold", "residues", "-vv"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Residues));
    }
}
