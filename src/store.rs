use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info;

use crate::db;
use crate::export;
use crate::recipe::Recipe;

/// A destination for the completed record set of one run.
///
/// Sinks are written one after another with no shared transaction: if the
/// process dies between them, the JSON file and the database disagree.
pub trait RecordSink {
    fn name(&self) -> &'static str;
    fn write_records(&mut self, recipes: &[Recipe]) -> Result<usize>;
}

pub struct JsonSink {
    path: PathBuf,
}

impl JsonSink {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl RecordSink for JsonSink {
    fn name(&self) -> &'static str {
        "json"
    }

    fn write_records(&mut self, recipes: &[Recipe]) -> Result<usize> {
        export::write_json(&self.path, recipes)?;
        Ok(recipes.len())
    }
}

pub struct SqliteSink {
    path: PathBuf,
}

impl SqliteSink {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl RecordSink for SqliteSink {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn write_records(&mut self, recipes: &[Recipe]) -> Result<usize> {
        let conn = db::connect(&self.path)?;
        db::init_schema(&conn)?;
        db::save_recipes(&conn, recipes)
    }
}

pub struct PersistReport {
    pub json_written: usize,
    pub db_written: usize,
}

/// JSON document first, then the relational upserts.
pub fn persist(recipes: &[Recipe], json_path: &Path, db_path: &Path) -> Result<PersistReport> {
    let mut json = JsonSink::new(json_path);
    let mut sqlite = SqliteSink::new(db_path);
    let json_written = write_to(&mut json, recipes)?;
    let db_written = write_to(&mut sqlite, recipes)?;
    Ok(PersistReport {
        json_written,
        db_written,
    })
}

fn write_to(sink: &mut dyn RecordSink, recipes: &[Recipe]) -> Result<usize> {
    let n = sink.write_records(recipes)?;
    info!("Wrote {} recipes to {} sink", n, sink.name());
    Ok(n)
}
