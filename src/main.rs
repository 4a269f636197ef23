mod crawl;
mod db;
mod detail;
mod error;
mod export;
mod fetch;
mod listing;
mod parser;
mod recipe;
mod settings;
mod site;
mod store;
#[cfg(test)]
mod testing;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::crawl::Crawler;
use crate::fetch::{HttpTransport, NoPacer, Pacer};
use crate::settings::{Settings, DB_FILE, JSON_FILE};
use crate::site::Site;

#[derive(Parser)]
#[command(name = "recipe_crawler", about = "Category-based recipe crawler (JSON + SQLite)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl every configured category and write recipes.json + recipes.db (default)
    Crawl {
        /// Recipe ids to collect per category
        #[arg(short = 'n', long)]
        per_category: Option<usize>,
        /// Output directory (default: next to the executable)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
        /// Skip the sleeps between requests
        #[arg(long)]
        no_delay: bool,
    },
    /// Show stored recipe counts per category
    Stats {
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
    /// Print one stored recipe as JSON
    Show {
        id: String,
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let mut settings = Settings::load()?;

    let command = cli.command.unwrap_or(Commands::Crawl {
        per_category: None,
        out_dir: None,
        no_delay: false,
    });

    let result = match command {
        Commands::Crawl {
            per_category,
            out_dir,
            no_delay,
        } => {
            if let Some(n) = per_category {
                settings.per_category = n;
            }
            let dir = settings.output_dir(out_dir.as_deref());
            if no_delay {
                run_crawl(&settings, NoPacer, &dir).await
            } else {
                let pacer = settings.pacer();
                run_crawl(&settings, pacer, &dir).await
            }
        }
        Commands::Stats { out_dir } => {
            let path = settings.output_dir(out_dir.as_deref()).join(DB_FILE);
            let conn = db::connect(&path)?;
            db::init_schema(&conn)?;
            let s = db::get_stats(&conn)?;
            println!("Database: {}", path.display());
            println!("Total:    {}", s.total);
            for (category, count) in &s.by_category {
                println!("  {:<12} {:>5}", category, count);
            }
            Ok(())
        }
        Commands::Show { id, out_dir } => {
            let path = settings.output_dir(out_dir.as_deref()).join(DB_FILE);
            let conn = db::connect(&path)?;
            db::init_schema(&conn)?;
            match db::load_recipe(&conn, &id)? {
                Some(r) => println!("{}", serde_json::to_string_pretty(&r)?),
                None => println!("No recipe with id {}", id),
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

async fn run_crawl<P: Pacer>(settings: &Settings, pacer: P, dir: &Path) -> anyhow::Result<()> {
    let transport = HttpTransport::new(settings.timeout())?;
    let crawler = Crawler::new(
        transport,
        pacer,
        Site::new(&settings.base_url),
        settings.per_category,
    );

    let report = crawler.run(&settings.categories).await;

    std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
    let json_path = dir.join(JSON_FILE);
    let db_path = dir.join(DB_FILE);
    let written = store::persist(&report.recipes, &json_path, &db_path)?;

    for c in &report.categories {
        println!(
            "{:<12} found {:>3} | ok {:>3} | failed {:>3}",
            c.label, c.found, c.ok, c.failed
        );
    }
    println!(
        "Saved {} recipes to {} and {} rows to {} ({} failed).",
        written.json_written,
        json_path.display(),
        written.db_written,
        db_path.display(),
        report.failed()
    );
    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
