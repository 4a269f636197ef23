use crate::error::CrawlError;
use crate::fetch::Transport;
use crate::parser::parse_detail;
use crate::recipe::Recipe;
use crate::site::Site;

/// Fetch and parse one detail page. Any `Err` means "skip this item".
pub async fn extract<T: Transport>(
    transport: &T,
    site: &Site,
    id: &str,
    category: &str,
) -> Result<Recipe, CrawlError> {
    let html = transport.get(&site.detail_url(id)).await?;
    parse_detail(&html, id, category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::detail::NO_TITLE;
    use crate::testing::{detail_html, FakeTransport};

    #[tokio::test]
    async fn fetches_and_parses() {
        let site = Site::default();
        let transport = FakeTransport::new().page(&site.detail_url("77"), &detail_html("순두부찌개"));
        let r = extract(&transport, &site, "77", "찌개").await.unwrap();
        assert_eq!(r.id, "77");
        assert_eq!(r.category, "찌개");
        assert_eq!(r.title, "순두부찌개");
        assert_eq!(r.serving, "2인분");
        assert_eq!(r.ingredients["두부"], "1모");
        assert_eq!(r.steps, vec!["끓인다."]);
    }

    #[tokio::test]
    async fn fetch_failure_yields_no_record() {
        let site = Site::default();
        let transport = FakeTransport::new().status(&site.detail_url("78"), 500);
        let err = extract(&transport, &site, "78", "찌개").await.unwrap_err();
        assert!(matches!(err, CrawlError::Fetch(_)));
    }

    #[tokio::test]
    async fn blank_page_still_has_id_and_category() {
        let site = Site::default();
        let transport = FakeTransport::new().page(&site.detail_url("79"), "");
        let r = extract(&transport, &site, "79", "빵").await.unwrap();
        assert_eq!((r.id.as_str(), r.category.as_str()), ("79", "빵"));
        assert_eq!(r.title, NO_TITLE);
    }
}
