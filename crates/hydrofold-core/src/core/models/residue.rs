use crate::core::utils::identifiers;
use nalgebra::Point3;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AminoAcidType {
    // --- Aliphatic, Nonpolar ---
    Alanine,    // Alanine (ALA)
    Glycine,    // Glycine (GLY)
    Isoleucine, // Isoleucine (ILE)
    Leucine,    // Leucine (LEU)
    Proline,    // Proline (PRO)
    Valine,     // Valine (VAL)

    // --- Aromatic ---
    Phenylalanine, // Phenylalanine (PHE)
    Tryptophan,    // Tryptophan (TRP)
    Tyrosine,      // Tyrosine (TYR)

    // --- Polar, Uncharged ---
    Asparagine, // Asparagine (ASN)
    Cysteine,   // Cysteine (CYS)
    Glutamine,  // Glutamine (GLN)
    Serine,     // Serine (SER)
    Threonine,  // Threonine (THR)
    Methionine, // Methionine (MET)

    // --- Positively Charged (Basic) ---
    Arginine,  // Arginine (ARG)
    Lysine,    // Lysine (LYS)
    Histidine, // Histidine (HIS)

    // --- Negatively Charged (Acidic) ---
    AsparticAcid, // Aspartic Acid (ASP)
    GlutamicAcid, // Glutamic Acid (GLU)
}

/// How a residue reacts to the chain's center of mass during relaxation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    /// Pushed away from the center of mass.
    Hydrophilic,
    /// Pulled toward the center of mass.
    Hydrophobic,
    /// Left alone.
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const GREY: Color = Color::new(0.5, 0.5, 0.5);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResidueError {
    #[error("Unknown residue code '{code}'; expected one of the 20 standard one-letter codes")]
    UnknownResidue { code: char },

    #[error("Unknown residue code '{code}' at sequence position {position}")]
    UnknownResidueInSequence { code: char, position: usize },

    #[error("Unknown residue name '{0}'")]
    UnknownResidueName(String),
}

impl AminoAcidType {
    pub const ALL: [AminoAcidType; 20] = [
        Self::Alanine,
        Self::Arginine,
        Self::Asparagine,
        Self::AsparticAcid,
        Self::Cysteine,
        Self::Glutamine,
        Self::GlutamicAcid,
        Self::Glycine,
        Self::Histidine,
        Self::Isoleucine,
        Self::Leucine,
        Self::Lysine,
        Self::Methionine,
        Self::Phenylalanine,
        Self::Proline,
        Self::Serine,
        Self::Threonine,
        Self::Tryptophan,
        Self::Tyrosine,
        Self::Valine,
    ];

    pub fn from_one_letter(code: char) -> Result<Self, ResidueError> {
        identifiers::residue_type_from_one_letter(code)
            .ok_or(ResidueError::UnknownResidue { code })
    }

    pub fn to_one_letter(self) -> char {
        match self {
            Self::Alanine => 'A',
            Self::Arginine => 'R',
            Self::Asparagine => 'N',
            Self::AsparticAcid => 'D',
            Self::Cysteine => 'C',
            Self::Glutamine => 'Q',
            Self::GlutamicAcid => 'E',
            Self::Glycine => 'G',
            Self::Histidine => 'H',
            Self::Isoleucine => 'I',
            Self::Leucine => 'L',
            Self::Lysine => 'K',
            Self::Methionine => 'M',
            Self::Phenylalanine => 'F',
            Self::Proline => 'P',
            Self::Serine => 'S',
            Self::Threonine => 'T',
            Self::Tryptophan => 'W',
            Self::Tyrosine => 'Y',
            Self::Valine => 'V',
        }
    }

    pub fn to_three_letter(self) -> &'static str {
        match self {
            Self::Alanine => "ALA",
            Self::Arginine => "ARG",
            Self::Asparagine => "ASN",
            Self::AsparticAcid => "ASP",
            Self::Cysteine => "CYS",
            Self::Glutamine => "GLN",
            Self::GlutamicAcid => "GLU",
            Self::Glycine => "GLY",
            Self::Histidine => "HIS",
            Self::Isoleucine => "ILE",
            Self::Leucine => "LEU",
            Self::Lysine => "LYS",
            Self::Methionine => "MET",
            Self::Phenylalanine => "PHE",
            Self::Proline => "PRO",
            Self::Serine => "SER",
            Self::Threonine => "THR",
            Self::Tryptophan => "TRP",
            Self::Tyrosine => "TYR",
            Self::Valine => "VAL",
        }
    }

    pub fn classification(self) -> Classification {
        match self {
            Self::Arginine
            | Self::Asparagine
            | Self::AsparticAcid
            | Self::Glutamine
            | Self::GlutamicAcid
            | Self::Histidine
            | Self::Lysine
            | Self::Serine
            | Self::Threonine
            | Self::Tyrosine => Classification::Hydrophilic,
            Self::Alanine
            | Self::Cysteine
            | Self::Glycine
            | Self::Isoleucine
            | Self::Leucine
            | Self::Methionine
            | Self::Phenylalanine
            | Self::Proline
            | Self::Tryptophan
            | Self::Valine => Classification::Hydrophobic,
        }
    }

    pub fn display_color(self) -> Color {
        match self {
            Self::Alanine => Color::new(0.8, 0.8, 0.8),
            Self::Arginine => Color::new(0.0, 1.0, 1.0),
            Self::Asparagine => Color::new(0.5, 0.5, 1.0),
            Self::AsparticAcid => Color::new(1.0, 0.0, 0.0),
            Self::Cysteine => Color::new(1.0, 1.0, 0.0),
            Self::GlutamicAcid => Color::new(1.0, 0.5, 0.0),
            _ => Color::GREY,
        }
    }
}

impl FromStr for AminoAcidType {
    type Err = ResidueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        identifiers::residue_type_from_three_letter(s)
            .ok_or_else(|| ResidueError::UnknownResidueName(s.to_string()))
    }
}

impl fmt::Display for AminoAcidType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_three_letter())
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Classification::Hydrophilic => "hydrophilic",
                Classification::Hydrophobic => "hydrophobic",
                Classification::Neutral => "neutral",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    pub residue_type: AminoAcidType,        // Amino acid identity
    pub classification: Classification,    // Drives the per-tick nudge
    pub position: Point3<f64>,              // Authoritative position, mutated every tick
    pub radius: f64,                        // Steric and display radius
    pub color: Color,                       // Display color handed to the scene
}

impl Residue {
    pub fn new(residue_type: AminoAcidType, position: Point3<f64>, radius: f64) -> Self {
        Self {
            residue_type,
            classification: residue_type.classification(),
            position,
            radius,
            color: residue_type.display_color(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.residue_type.to_three_letter()
    }
}
