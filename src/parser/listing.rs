use std::sync::LazyLock;

use scraper::{Html, Selector};

static LINK_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".common_sp_link").unwrap());

pub struct ListingPage {
    /// Number of item links on the page, including ones without a usable id.
    pub links: usize,
    /// Identifiers in page order.
    pub ids: Vec<String>,
}

pub fn parse_listing(html: &str) -> ListingPage {
    let doc = Html::parse_document(html);
    let mut links = 0;
    let mut ids = Vec::new();
    for el in doc.select(&LINK_SEL) {
        links += 1;
        if let Some(id) = el.value().attr("href").and_then(id_from_href) {
            ids.push(id);
        }
    }
    ListingPage { links, ids }
}

/// Last path segment of an item link: `/recipe/6912345` -> `6912345`.
fn id_from_href(href: &str) -> Option<String> {
    let last = href.rsplit('/').next()?.trim();
    if last.is_empty() {
        None
    } else {
        Some(last.to_string())
    }
}
