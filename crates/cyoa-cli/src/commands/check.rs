use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use cyoa_core::validate;

pub fn run(file: &Path) -> Result<(), String> {
    let adventure = super::load(file)?;
    let issues = validate(&adventure);

    if issues.is_empty() {
        println!(
            "  All checks passed for {} ({} scene{}).",
            file.display(),
            adventure.len(),
            super::plural(adventure.len())
        );
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Level", "Scene", "Message"]);
    for issue in &issues {
        let level = if issue.is_error { "error" } else { "warning" };
        table.add_row(vec![level, issue.scene.as_str(), issue.message.as_str()]);
    }
    println!("{table}");

    let errors = issues.iter().filter(|i| i.is_error).count();
    let warnings = issues.len() - errors;
    println!(
        "  {} error{}, {} warning{}",
        errors,
        super::plural(errors),
        warnings,
        super::plural(warnings)
    );

    if errors > 0 {
        Err(format!("{} has unreachable scenes", file.display()))
    } else {
        Ok(())
    }
}
