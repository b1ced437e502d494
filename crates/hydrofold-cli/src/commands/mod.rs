pub mod residues;
pub mod run;
