use crate::recipe::CategoryToken;

pub const DEFAULT_BASE_URL: &str = "https://www.10000recipe.com";

/// URL shapes of the recipe site.
#[derive(Debug, Clone)]
pub struct Site {
    base_url: String,
}

impl Site {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn listing_url(&self, token: &CategoryToken, page: u32) -> String {
        format!("{}/recipe/list.html?cat4={}&page={}", self.base_url, token, page)
    }

    pub fn detail_url(&self, id: &str) -> String {
        format!("{}/recipe/{}", self.base_url, id)
    }
}

impl Default for Site {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
