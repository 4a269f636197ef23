use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::recipe::Recipe;

/// Write all recipes as one pretty-printed UTF-8 JSON array, replacing `path`.
pub fn write_json(path: &Path, recipes: &[Recipe]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, recipes)
        .with_context(|| format!("Failed to serialize recipes to {:?}", path))?;
    out.flush()?;
    out.get_ref().sync_all()?;
    Ok(())
}
