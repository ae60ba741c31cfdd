use std::path::Path;

use cyoa_core::AdventureMeta;
use cyoa_core::transport::share_link;

pub fn run(file: &Path, base: &str, meta: AdventureMeta) -> Result<(), String> {
    let adventure = super::load(file)?;
    let link = share_link(base, &adventure, &meta).map_err(|e| e.to_string())?;
    println!("{link}");
    Ok(())
}
