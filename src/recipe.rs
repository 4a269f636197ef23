use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::CrawlError;

/// One extracted recipe. Field order here is the key order of the JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub category: String,
    pub serving: String,
    pub image_url: String,
    pub cook_time: String,
    pub difficulty: String,
    /// name -> amount, in first-seen order
    pub ingredients: IndexMap<String, String>,
    pub steps: Vec<String>,
}

/// Scalar fields filled from the selector table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub title: String,
    pub serving: String,
    pub image_url: String,
    pub cook_time: String,
    pub difficulty: String,
}

impl Recipe {
    pub fn new(
        id: &str,
        category: &str,
        summary: Summary,
        ingredients: IndexMap<String, String>,
        steps: Vec<String>,
    ) -> Result<Self, CrawlError> {
        if id.trim().is_empty() {
            return Err(CrawlError::InvalidRecord("empty id".into()));
        }
        if category.trim().is_empty() {
            return Err(CrawlError::InvalidRecord(format!("empty category for {}", id)));
        }
        let Summary {
            title,
            serving,
            image_url,
            cook_time,
            difficulty,
        } = summary;
        Ok(Self {
            id: id.to_string(),
            title,
            category: category.to_string(),
            serving,
            image_url,
            cook_time,
            difficulty,
            ingredients,
            steps,
        })
    }
}

/// A human-readable label paired with the site's grouping token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub label: String,
    pub token: CategoryToken,
}

impl Category {
    pub fn new(label: &str, token: i64) -> Self {
        Self {
            label: label.to_string(),
            token: CategoryToken::Number(token),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryToken {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for CategoryToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}
