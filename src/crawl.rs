use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use crate::detail;
use crate::fetch::{Pacer, Pause, Transport};
use crate::listing;
use crate::recipe::{Category, Recipe};
use crate::site::Site;

/// Per-category outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryReport {
    pub label: String,
    pub found: usize,
    pub ok: usize,
    pub failed: usize,
}

pub struct RunReport {
    pub recipes: Vec<Recipe>,
    pub categories: Vec<CategoryReport>,
}

impl RunReport {
    pub fn failed(&self) -> usize {
        self.categories.iter().map(|c| c.failed).sum()
    }
}

/// Drives listing enumeration then detail extraction, one request at a time.
pub struct Crawler<T, P> {
    transport: T,
    pacer: P,
    site: Site,
    per_category: usize,
}

impl<T: Transport, P: Pacer> Crawler<T, P> {
    pub fn new(transport: T, pacer: P, site: Site, per_category: usize) -> Self {
        Self {
            transport,
            pacer,
            site,
            per_category,
        }
    }

    /// Crawl every category in order. A failing item or category never stops the run.
    pub async fn run(&self, categories: &[Category]) -> RunReport {
        let mut recipes = Vec::new();
        let mut reports = Vec::with_capacity(categories.len());
        for category in categories {
            let (acc, report) = self.crawl_category(category, recipes).await;
            recipes = acc;
            reports.push(report);
        }
        RunReport {
            recipes,
            categories: reports,
        }
    }

    /// Append one category's records to `acc` and hand it back.
    pub async fn crawl_category(
        &self,
        category: &Category,
        mut acc: Vec<Recipe>,
    ) -> (Vec<Recipe>, CategoryReport) {
        info!("Category: {} (cat4 = {})", category.label, category.token);
        let ids = listing::collect_identifiers(
            &self.transport,
            &self.pacer,
            &self.site,
            &category.token,
            self.per_category,
        )
        .await;
        info!("{} ids to crawl for {}", ids.len(), category.label);

        let mut report = CategoryReport {
            label: category.label.clone(),
            found: ids.len(),
            ok: 0,
            failed: 0,
        };

        let pb = progress_bar(ids.len());
        for id in &ids {
            pb.set_message(id.clone());
            debug!("Crawling {}", id);
            match detail::extract(&self.transport, &self.site, id, &category.label).await {
                Ok(recipe) => {
                    acc.push(recipe);
                    report.ok += 1;
                }
                Err(e) => {
                    warn!("Skipping recipe {}: {}", id, e);
                    report.failed += 1;
                }
            }
            pb.inc(1);
            self.pacer.pause(Pause::Detail).await;
        }
        pb.finish_and_clear();

        info!(
            "{}: {} ok, {} failed",
            category.label, report.ok, report.failed
        );
        (acc, report)
    }
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) =
        ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("=> "));
    }
    pb
}
