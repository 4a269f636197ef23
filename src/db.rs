use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};

use crate::recipe::Recipe;

pub fn connect(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS recipes (
            id          TEXT PRIMARY KEY,
            title       TEXT,
            category    TEXT,
            serving     TEXT,
            image_url   TEXT,
            cook_time   TEXT,
            difficulty  TEXT,
            ingredients TEXT,
            steps       TEXT
        );
        ",
    )?;
    Ok(())
}

// ── Writing ──

/// Upsert every recipe, committing once at the end.
pub fn save_recipes(conn: &Connection, recipes: &[Recipe]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut count = 0;
    {
        let mut stmt = tx.prepare(
            "INSERT OR REPLACE INTO recipes
             (id, title, category, serving, image_url, cook_time, difficulty, ingredients, steps)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )?;
        for r in recipes {
            let ingredients = serde_json::to_string(&r.ingredients)?;
            let steps = serde_json::to_string(&r.steps)?;
            count += stmt.execute(rusqlite::params![
                r.id, r.title, r.category, r.serving, r.image_url, r.cook_time, r.difficulty,
                ingredients, steps,
            ])?;
        }
    }
    tx.commit()?;
    Ok(count)
}

// ── Reading ──

pub fn load_recipe(conn: &Connection, id: &str) -> Result<Option<Recipe>> {
    let row = conn
        .query_row(
            "SELECT id, COALESCE(title,''), COALESCE(category,''), COALESCE(serving,''),
                    COALESCE(image_url,''), COALESCE(cook_time,''), COALESCE(difficulty,''),
                    COALESCE(ingredients,'{}'), COALESCE(steps,'[]')
             FROM recipes WHERE id = ?1",
            [id],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, String>(6)?,
                    row.get::<_, String>(7)?,
                    row.get::<_, String>(8)?,
                ))
            },
        )
        .optional()?;

    let Some((id, title, category, serving, image_url, cook_time, difficulty, ingredients, steps)) =
        row
    else {
        return Ok(None);
    };

    Ok(Some(Recipe {
        ingredients: serde_json::from_str(&ingredients)
            .with_context(|| format!("Bad ingredients JSON for {}", id))?,
        steps: serde_json::from_str(&steps)
            .with_context(|| format!("Bad steps JSON for {}", id))?,
        id,
        title,
        category,
        serving,
        image_url,
        cook_time,
        difficulty,
    }))
}

// ── Stats ──

pub struct Stats {
    pub total: usize,
    pub by_category: Vec<(String, usize)>,
}

pub fn get_stats(conn: &Connection) -> Result<Stats> {
    let total: usize = conn.query_row("SELECT COUNT(*) FROM recipes", [], |r| r.get(0))?;
    let mut stmt = conn.prepare(
        "SELECT COALESCE(category,''), COUNT(*) FROM recipes
         GROUP BY category ORDER BY COUNT(*) DESC, category",
    )?;
    let by_category = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Stats { total, by_category })
}
