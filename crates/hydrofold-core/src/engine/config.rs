use crate::core::models::builder::DEFAULT_RESIDUE_RADIUS;
use crate::core::models::residue::{AminoAcidType, Classification};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_CENTERING_STRENGTH: f64 = 0.1;
pub const DEFAULT_NUDGE_MAGNITUDE: f64 = 1.0;
pub const DEFAULT_BOND_LENGTH: f64 = 4.0;
pub const DEFAULT_LITERAL_THRESHOLD_HIGH: f64 = 3.0;
pub const DEFAULT_LITERAL_THRESHOLD_LOW: f64 = 4.0;
pub const DEFAULT_MAX_REPULSION_SWEEPS: usize = 100;
pub const DEFAULT_FRAME_RATE_HZ: f64 = 20.0;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },
}

/// When and how a bond's length is corrected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BondLengthPolicy {
    /// Rescale to `length` whenever `len > threshold_high || len < threshold_low`.
    ///
    /// With the default thresholds (3, 4) the condition holds for every
    /// length, so each bond ends up exactly `length` long.
    Literal {
        threshold_high: f64,
        threshold_low: f64,
        length: f64,
    },
    /// Clamp lengths outside `[min, max]` to the nearest bound.
    Band { min: f64, max: f64 },
}

impl BondLengthPolicy {
    pub const fn literal() -> Self {
        Self::Literal {
            threshold_high: DEFAULT_LITERAL_THRESHOLD_HIGH,
            threshold_low: DEFAULT_LITERAL_THRESHOLD_LOW,
            length: DEFAULT_BOND_LENGTH,
        }
    }

    pub const fn band(min: f64, max: f64) -> Self {
        Self::Band { min, max }
    }

    /// Target length for a bond currently `length` long, or `None` if it is acceptable.
    pub fn corrected_length(&self, length: f64) -> Option<f64> {
        match *self {
            Self::Literal {
                threshold_high,
                threshold_low,
                length: target,
            } => (length > threshold_high || length < threshold_low).then_some(target),
            Self::Band { min, max } => {
                if length < min {
                    Some(min)
                } else if length > max {
                    Some(max)
                } else {
                    None
                }
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::Literal { length, .. } if !(length.is_finite() && length > 0.0) => {
                Err(ConfigError::InvalidValue {
                    parameter: "bond_policy.length",
                    reason: format!("must be a positive finite number, got {length}"),
                })
            }
            Self::Band { min, max }
                if !(min.is_finite() && max.is_finite() && 0.0 < min && min <= max) =>
            {
                Err(ConfigError::InvalidValue {
                    parameter: "bond_policy",
                    reason: format!("band must satisfy 0 < min <= max, got [{min}, {max}]"),
                })
            }
            _ => Ok(()),
        }
    }
}

/// Time between frames at `rate_hz` ticks per second.
///
/// Fails for rates that are not positive or whose interval does not fit in a
/// [`Duration`].
pub fn frame_interval(rate_hz: f64) -> Result<Duration, ConfigError> {
    if !(rate_hz.is_finite() && rate_hz > 0.0) {
        return Err(ConfigError::InvalidValue {
            parameter: "frame_rate_hz",
            reason: format!("must be positive, got {rate_hz}"),
        });
    }
    Duration::try_from_secs_f64(1.0 / rate_hz).map_err(|e| ConfigError::InvalidValue {
        parameter: "frame_rate_hz",
        reason: format!("{rate_hz} Hz has no representable frame interval: {e}"),
    })
}

impl Default for BondLengthPolicy {
    fn default() -> Self {
        Self::literal()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForceConfig {
    pub centering_strength: f64,
    pub nudge_magnitude: f64,
    pub bond_policy: BondLengthPolicy,
    pub max_repulsion_sweeps: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// `None` runs until cancelled.
    pub tick_budget: Option<u64>,
    /// `None` disables frame pacing.
    pub frame_rate_hz: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResidueConfig {
    pub radius: f64,
    pub classification_overrides: HashMap<AminoAcidType, Classification>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelaxationConfig {
    pub forces: ForceConfig,
    pub simulation: SimulationConfig,
    pub residues: ResidueConfig,
}

impl Default for RelaxationConfig {
    fn default() -> Self {
        Self {
            forces: ForceConfig {
                centering_strength: DEFAULT_CENTERING_STRENGTH,
                nudge_magnitude: DEFAULT_NUDGE_MAGNITUDE,
                bond_policy: BondLengthPolicy::literal(),
                max_repulsion_sweeps: DEFAULT_MAX_REPULSION_SWEEPS,
            },
            simulation: SimulationConfig {
                tick_budget: None,
                frame_rate_hz: Some(DEFAULT_FRAME_RATE_HZ),
            },
            residues: ResidueConfig {
                radius: DEFAULT_RESIDUE_RADIUS,
                classification_overrides: HashMap::new(),
            },
        }
    }
}

#[derive(Default)]
pub struct RelaxationConfigBuilder {
    centering_strength: Option<f64>,
    nudge_magnitude: Option<f64>,
    bond_policy: Option<BondLengthPolicy>,
    max_repulsion_sweeps: Option<usize>,
    tick_budget: Option<u64>,
    frame_rate_hz: Option<Option<f64>>,
    residue_radius: Option<f64>,
    classification_overrides: HashMap<AminoAcidType, Classification>,
}

impl RelaxationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn centering_strength(mut self, k: f64) -> Self {
        self.centering_strength = Some(k);
        self
    }
    pub fn nudge_magnitude(mut self, magnitude: f64) -> Self {
        self.nudge_magnitude = Some(magnitude);
        self
    }
    pub fn bond_policy(mut self, policy: BondLengthPolicy) -> Self {
        self.bond_policy = Some(policy);
        self
    }
    pub fn max_repulsion_sweeps(mut self, sweeps: usize) -> Self {
        self.max_repulsion_sweeps = Some(sweeps);
        self
    }
    pub fn tick_budget(mut self, budget: Option<u64>) -> Self {
        self.tick_budget = budget;
        self
    }
    pub fn frame_rate_hz(mut self, rate: Option<f64>) -> Self {
        self.frame_rate_hz = Some(rate);
        self
    }
    pub fn residue_radius(mut self, radius: f64) -> Self {
        self.residue_radius = Some(radius);
        self
    }
    pub fn classification_override(
        mut self,
        residue_type: AminoAcidType,
        classification: Classification,
    ) -> Self {
        self.classification_overrides
            .insert(residue_type, classification);
        self
    }

    pub fn build(self) -> Result<RelaxationConfig, ConfigError> {
        let forces = ForceConfig {
            centering_strength: self
                .centering_strength
                .unwrap_or(DEFAULT_CENTERING_STRENGTH),
            nudge_magnitude: self.nudge_magnitude.unwrap_or(DEFAULT_NUDGE_MAGNITUDE),
            bond_policy: self.bond_policy.unwrap_or_default(),
            max_repulsion_sweeps: self
                .max_repulsion_sweeps
                .unwrap_or(DEFAULT_MAX_REPULSION_SWEEPS),
        };
        let simulation = SimulationConfig {
            tick_budget: self.tick_budget,
            frame_rate_hz: self.frame_rate_hz.unwrap_or(Some(DEFAULT_FRAME_RATE_HZ)),
        };
        let residues = ResidueConfig {
            radius: self.residue_radius.unwrap_or(DEFAULT_RESIDUE_RADIUS),
            classification_overrides: self.classification_overrides,
        };

        let config = RelaxationConfig {
            forces,
            simulation,
            residues,
        };
        config.validate()?;
        Ok(config)
    }
}

impl RelaxationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = |parameter: &'static str, value: f64| {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::InvalidValue {
                    parameter,
                    reason: format!("must be a non-negative finite number, got {value}"),
                })
            }
        };

        non_negative("centering_strength", self.forces.centering_strength)?;
        non_negative("nudge_magnitude", self.forces.nudge_magnitude)?;
        self.forces.bond_policy.validate()?;
        if self.forces.max_repulsion_sweeps == 0 {
            return Err(ConfigError::InvalidValue {
                parameter: "max_repulsion_sweeps",
                reason: "at least one sweep is required".to_string(),
            });
        }
        if let Some(rate) = self.simulation.frame_rate_hz {
            frame_interval(rate)?;
        }
        if !(self.residues.radius.is_finite() && self.residues.radius > 0.0) {
            return Err(ConfigError::InvalidValue {
                parameter: "residue_radius",
                reason: format!("must be positive, got {}", self.residues.radius),
            });
        }
        Ok(())
    }
}
