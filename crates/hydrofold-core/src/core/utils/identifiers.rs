use crate::core::models::residue::AminoAcidType;
use phf::{Map, phf_map};

static ONE_LETTER_CODES: Map<char, AminoAcidType> = phf_map! {
    'A' => AminoAcidType::Alanine,
    'R' => AminoAcidType::Arginine,
    'N' => AminoAcidType::Asparagine,
    'D' => AminoAcidType::AsparticAcid,
    'C' => AminoAcidType::Cysteine,
    'E' => AminoAcidType::GlutamicAcid,
    'Q' => AminoAcidType::Glutamine,
    'G' => AminoAcidType::Glycine,
    'H' => AminoAcidType::Histidine,
    'I' => AminoAcidType::Isoleucine,
    'L' => AminoAcidType::Leucine,
    'K' => AminoAcidType::Lysine,
    'M' => AminoAcidType::Methionine,
    'F' => AminoAcidType::Phenylalanine,
    'P' => AminoAcidType::Proline,
    'S' => AminoAcidType::Serine,
    'T' => AminoAcidType::Threonine,
    'W' => AminoAcidType::Tryptophan,
    'Y' => AminoAcidType::Tyrosine,
    'V' => AminoAcidType::Valine,
};

static THREE_LETTER_CODES: Map<&'static str, AminoAcidType> = phf_map! {
    "ALA" => AminoAcidType::Alanine,
    "ARG" => AminoAcidType::Arginine,
    "ASN" => AminoAcidType::Asparagine,
    "ASP" => AminoAcidType::AsparticAcid,
    "CYS" => AminoAcidType::Cysteine,
    "GLU" => AminoAcidType::GlutamicAcid,
    "GLN" => AminoAcidType::Glutamine,
    "GLY" => AminoAcidType::Glycine,
    "HIS" => AminoAcidType::Histidine,
    "ILE" => AminoAcidType::Isoleucine,
    "LEU" => AminoAcidType::Leucine,
    "LYS" => AminoAcidType::Lysine,
    "MET" => AminoAcidType::Methionine,
    "PHE" => AminoAcidType::Phenylalanine,
    "PRO" => AminoAcidType::Proline,
    "SER" => AminoAcidType::Serine,
    "THR" => AminoAcidType::Threonine,
    "TRP" => AminoAcidType::Tryptophan,
    "TYR" => AminoAcidType::Tyrosine,
    "VAL" => AminoAcidType::Valine,
};

pub fn residue_type_from_one_letter(code: char) -> Option<AminoAcidType> {
    ONE_LETTER_CODES.get(&code).copied()
}

pub fn residue_type_from_three_letter(name: &str) -> Option<AminoAcidType> {
    THREE_LETTER_CODES
        .get(name.trim().to_ascii_uppercase().as_str())
        .copied()
}
