use crate::error::Result;
use hydrofold::core::models::residue::AminoAcidType;

pub fn run() -> Result<()> {
    print!("{}", residue_table());
    Ok(())
}

fn residue_table() -> String {
    let header = format!(
        "{:<6} {:<6} {:<14} {}",
        "Code", "Name", "Class", "Color (r, g, b)"
    );
    let rows = AminoAcidType::ALL.iter().map(|residue_type| {
        let color = residue_type.display_color();
        format!(
            "{:<6} {:<6} {:<14} ({:.2}, {:.2}, {:.2})",
            residue_type.to_one_letter(),
            residue_type.to_three_letter(),
            residue_type.classification().to_string(),
            color.r,
            color.g,
            color.b
        )
    });
    std::iter::once(header)
        .chain(rows)
        .map(|line| line + "\n")
        .collect()
}
