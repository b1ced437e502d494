use crate::cli::{self, RunArgs};
use crate::error::{CliError, Result};
use hydrofold::core::models::residue::{AminoAcidType, Classification};
use hydrofold::engine::config::{self as core_config, BondLengthPolicy};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialForcesConfig {
    #[serde(rename = "centering-strength")]
    centering_strength: Option<f64>,
    #[serde(rename = "nudge-magnitude")]
    nudge_magnitude: Option<f64>,
    #[serde(rename = "max-repulsion-sweeps")]
    max_repulsion_sweeps: Option<usize>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", tag = "type", deny_unknown_fields)]
enum PartialBondsConfig {
    Literal {
        #[serde(rename = "threshold-high")]
        threshold_high: Option<f64>,
        #[serde(rename = "threshold-low")]
        threshold_low: Option<f64>,
        length: Option<f64>,
    },
    Band {
        min: f64,
        max: f64,
    },
}

impl From<PartialBondsConfig> for BondLengthPolicy {
    fn from(p: PartialBondsConfig) -> Self {
        match p {
            PartialBondsConfig::Literal {
                threshold_high,
                threshold_low,
                length,
            } => BondLengthPolicy::Literal {
                threshold_high: threshold_high
                    .unwrap_or(core_config::DEFAULT_LITERAL_THRESHOLD_HIGH),
                threshold_low: threshold_low.unwrap_or(core_config::DEFAULT_LITERAL_THRESHOLD_LOW),
                length: length.unwrap_or(core_config::DEFAULT_BOND_LENGTH),
            },
            PartialBondsConfig::Band { min, max } => BondLengthPolicy::band(min, max),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialSimulationConfig {
    ticks: Option<u64>,
    #[serde(rename = "rate-hz")]
    rate_hz: Option<f64>,
    unthrottled: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialResiduesConfig {
    radius: Option<f64>,
    /// Residue code (one-letter or three-letter) to classification.
    #[serde(default)]
    classification: HashMap<String, Classification>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialRelaxationConfig {
    forces: Option<PartialForcesConfig>,
    bonds: Option<PartialBondsConfig>,
    simulation: Option<PartialSimulationConfig>,
    residues: Option<PartialResiduesConfig>,
}

impl PartialRelaxationConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Resolves the final core configuration with precedence
    /// `--set` > dedicated flags > file > built-in defaults.
    pub fn merge_with_cli(mut self, args: &RunArgs) -> Result<core_config::RelaxationConfig> {
        self.apply_flags(args);
        self.apply_set_values(&args.set_values)?;

        let forces = self.forces.unwrap_or_default();
        let simulation = self.simulation.unwrap_or_default();
        let residues = self.residues.unwrap_or_default();

        let mut builder = core_config::RelaxationConfigBuilder::new().tick_budget(simulation.ticks);
        if let Some(k) = forces.centering_strength {
            builder = builder.centering_strength(k);
        }
        if let Some(magnitude) = forces.nudge_magnitude {
            builder = builder.nudge_magnitude(magnitude);
        }
        if let Some(sweeps) = forces.max_repulsion_sweeps {
            builder = builder.max_repulsion_sweeps(sweeps);
        }
        if let Some(bonds) = self.bonds {
            builder = builder.bond_policy(bonds.into());
        }

        builder = if simulation.unthrottled.unwrap_or(false) {
            builder.frame_rate_hz(None)
        } else {
            builder.frame_rate_hz(Some(
                simulation
                    .rate_hz
                    .unwrap_or(core_config::DEFAULT_FRAME_RATE_HZ),
            ))
        };

        if let Some(radius) = residues.radius {
            builder = builder.residue_radius(radius);
        }
        for (code, classification) in residues.classification {
            builder = builder.classification_override(parse_residue_code(&code)?, classification);
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_flags(&mut self, args: &RunArgs) {
        let simulation = self.simulation.get_or_insert_with(Default::default);
        if let Some(ticks) = args.ticks {
            simulation.ticks = Some(ticks);
        }
        if let Some(rate) = args.rate {
            simulation.rate_hz = Some(rate);
            simulation.unthrottled = Some(false);
        }
        if args.unthrottled {
            simulation.unthrottled = Some(true);
        }
        if let Some((min, max)) = args.band {
            self.bonds = Some(PartialBondsConfig::Band { min, max });
        }
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value_str) = kv_pair.split_once('=').ok_or_else(|| {
                CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                ))
            })?;

            match key {
                "forces.centering-strength" => {
                    self.forces
                        .get_or_insert_with(Default::default)
                        .centering_strength = Some(parse_value(key, value_str)?);
                }
                "forces.nudge-magnitude" => {
                    self.forces
                        .get_or_insert_with(Default::default)
                        .nudge_magnitude = Some(parse_value(key, value_str)?);
                }
                "forces.max-repulsion-sweeps" => {
                    self.forces
                        .get_or_insert_with(Default::default)
                        .max_repulsion_sweeps = Some(parse_value(key, value_str)?);
                }
                "bonds.band" => {
                    let (min, max) =
                        cli::parse_band(value_str).map_err(CliError::Config)?;
                    self.bonds = Some(PartialBondsConfig::Band { min, max });
                }
                "bonds.length" => {
                    self.bonds = Some(PartialBondsConfig::Literal {
                        threshold_high: None,
                        threshold_low: None,
                        length: Some(parse_value(key, value_str)?),
                    });
                }
                "simulation.ticks" => {
                    self.simulation
                        .get_or_insert_with(Default::default)
                        .ticks = Some(parse_value(key, value_str)?);
                }
                "simulation.rate-hz" => {
                    let simulation = self.simulation.get_or_insert_with(Default::default);
                    simulation.rate_hz = Some(parse_value(key, value_str)?);
                    simulation.unthrottled = Some(false);
                }
                "simulation.unthrottled" => {
                    self.simulation
                        .get_or_insert_with(Default::default)
                        .unthrottled = Some(parse_value(key, value_str)?);
                }
                "residues.radius" => {
                    self.residues
                        .get_or_insert_with(Default::default)
                        .radius = Some(parse_value(key, value_str)?);
                }
                _ => {
                    if let Some(code) = key.strip_prefix("residues.classification.") {
                        let classification = parse_classification(value_str)?;
                        self.residues
                            .get_or_insert_with(Default::default)
                            .classification
                            .insert(code.to_string(), classification);
                    } else {
                        return Err(CliError::Config(format!(
                            "Unsupported configuration key for --set: '{}'",
                            key
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, value_str: &str) -> Result<T> {
    value_str.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid value for {}: {}", key, value_str))
    })
}

fn parse_classification(value_str: &str) -> Result<Classification> {
    match value_str.trim().to_ascii_lowercase().as_str() {
        "hydrophilic" => Ok(Classification::Hydrophilic),
        "hydrophobic" => Ok(Classification::Hydrophobic),
        "neutral" => Ok(Classification::Neutral),
        other => Err(CliError::Config(format!(
            "Unknown classification '{}'. Expected hydrophilic, hydrophobic or neutral.",
            other
        ))),
    }
}

fn parse_residue_code(code: &str) -> Result<AminoAcidType> {
    let mut chars = code.chars();
    let parsed = match (chars.next(), chars.next()) {
        (Some(c), None) => AminoAcidType::from_one_letter(c),
        _ => AminoAcidType::from_str(code),
    };
    parsed.map_err(|e| CliError::Config(format!("Invalid classification override: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::{TempDir, tempdir};

    fn write_config_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let file_path = dir.path().join(name);
        fs::write(&file_path, content).unwrap();
        file_path
    }

    fn run_args(extra: &[&str]) -> RunArgs {
        let mut args = vec!["hydrofold", "run"];
        args.extend_from_slice(extra);
        match Cli::parse_from(args).command {
            Commands::Run(args) => args,
            other => panic!("Expected 'run' subcommand, got {other:?}"),
        }
    }

    const FULL_CONFIG: &str = r#"
        [forces]
        centering-strength = 0.2
        nudge-magnitude = 0.5
        max-repulsion-sweeps = 10

        [bonds]
        type = "band"
        min = 8.0
        max = 12.0

        [simulation]
        ticks = 250
        rate-hz = 30.0

        [residues]
        radius = 1.5

        [residues.classification]
        G = "neutral"
        his = "hydrophobic"
    "#;

    #[test]
    fn empty_config_yields_core_defaults() {
        let final_config = PartialRelaxationConfig::default()
            .merge_with_cli(&run_args(&[]))
            .unwrap();
        assert_eq!(final_config, core_config::RelaxationConfig::default());
    }

    #[test]
    fn load_from_file_and_merge() {
        let dir = tempdir().unwrap();
        let path = write_config_file(&dir, "full.toml", FULL_CONFIG);

        let final_config = PartialRelaxationConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&run_args(&[]))
            .unwrap();

        assert_eq!(final_config.forces.centering_strength, 0.2);
        assert_eq!(final_config.forces.nudge_magnitude, 0.5);
        assert_eq!(final_config.forces.max_repulsion_sweeps, 10);
        assert_eq!(
            final_config.forces.bond_policy,
            BondLengthPolicy::band(8.0, 12.0)
        );
        assert_eq!(final_config.simulation.tick_budget, Some(250));
        assert_eq!(final_config.simulation.frame_rate_hz, Some(30.0));
        assert_eq!(final_config.residues.radius, 1.5);
        assert_eq!(
            final_config.residues.classification_overrides[&AminoAcidType::Glycine],
            Classification::Neutral
        );
        assert_eq!(
            final_config.residues.classification_overrides[&AminoAcidType::Histidine],
            Classification::Hydrophobic
        );
    }

    #[test]
    fn literal_bonds_section_fills_missing_thresholds() {
        let partial = PartialRelaxationConfig::from_toml_str(
            r#"
            [bonds]
            type = "literal"
            length = 5.0
            "#,
        )
        .unwrap();
        let final_config = partial.merge_with_cli(&run_args(&[])).unwrap();
        assert_eq!(
            final_config.forces.bond_policy,
            BondLengthPolicy::Literal {
                threshold_high: 3.0,
                threshold_low: 4.0,
                length: 5.0,
            }
        );
    }

    #[test]
    fn cli_flags_override_file_values() {
        let dir = tempdir().unwrap();
        let path = write_config_file(&dir, "override.toml", FULL_CONFIG);

        let args = run_args(&["-n", "5", "--unthrottled", "--band", "6,9"]);
        let final_config = PartialRelaxationConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&args)
            .unwrap();

        assert_eq!(final_config.simulation.tick_budget, Some(5));
        assert_eq!(final_config.simulation.frame_rate_hz, None);
        assert_eq!(
            final_config.forces.bond_policy,
            BondLengthPolicy::band(6.0, 9.0)
        );
        assert_eq!(final_config.forces.centering_strength, 0.2);
    }

    #[test]
    fn set_values_override_flags_and_file() {
        let dir = tempdir().unwrap();
        let path = write_config_file(&dir, "set.toml", FULL_CONFIG);

        let args = run_args(&[
            "-n",
            "5",
            "-S",
            "simulation.ticks=7",
            "-S",
            "forces.centering-strength=0.05",
            "-S",
            "bonds.length=4.5",
            "-S",
            "residues.classification.W=neutral",
        ]);
        let final_config = PartialRelaxationConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&args)
            .unwrap();

        assert_eq!(final_config.simulation.tick_budget, Some(7));
        assert_eq!(final_config.forces.centering_strength, 0.05);
        assert_eq!(
            final_config.forces.bond_policy,
            BondLengthPolicy::Literal {
                threshold_high: 3.0,
                threshold_low: 4.0,
                length: 4.5,
            }
        );
        assert_eq!(
            final_config.residues.classification_overrides[&AminoAcidType::Tryptophan],
            Classification::Neutral
        );
        assert_eq!(final_config.forces.nudge_magnitude, 0.5);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(PartialRelaxationConfig::from_toml_str("[forces]\nstrength = 1.0\n").is_err());
        assert!(PartialRelaxationConfig::from_toml_str("[rendering]\n").is_err());

        let args = run_args(&["-S", "forces.gravity=9.8"]);
        let result = PartialRelaxationConfig::default().merge_with_cli(&args);
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("forces.gravity")));
    }

    #[test]
    fn malformed_set_values_are_rejected() {
        let args = run_args(&["-S", "simulation.ticks"]);
        let result = PartialRelaxationConfig::default().merge_with_cli(&args);
        assert!(matches!(result, Err(CliError::Config(_))));

        let args = run_args(&["-S", "simulation.ticks=many"]);
        let result = PartialRelaxationConfig::default().merge_with_cli(&args);
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn invalid_values_surface_as_config_errors() {
        let args = run_args(&["--band", "12,8"]);
        let result = PartialRelaxationConfig::default().merge_with_cli(&args);
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("bond_policy")));

        let partial = PartialRelaxationConfig::from_toml_str(
            "[residues.classification]\nX = \"neutral\"\n",
        )
        .unwrap();
        assert!(matches!(
            partial.merge_with_cli(&run_args(&[])),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let result = PartialRelaxationConfig::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    fn malformed_file_reports_its_path() {
        let dir = tempdir().unwrap();
        let path = write_config_file(&dir, "broken.toml", "[forces\n");
        match PartialRelaxationConfig::from_file(&path) {
            Err(CliError::FileParsing { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("Expected FileParsing error, got {other:?}"),
        }
    }
}
