use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::ingredients;
use crate::error::CrawlError;
use crate::recipe::{Recipe, Summary};

/// Title used when the page has no summary heading.
pub const NO_TITLE: &str = "제목 없음";

static SERVING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\s*(?:인분|servings?)").unwrap());

static INGREDIENT_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".ready_ingre3 ul li").unwrap());
static STEP_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".view_step_cont").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Serving,
    ImageUrl,
    CookTime,
    Difficulty,
}

#[derive(Debug, Clone, Copy)]
enum Source {
    /// Trimmed text content.
    Text,
    Attr(&'static str),
}

struct Rule {
    field: Field,
    selector: &'static str,
    source: Source,
    default: &'static str,
    post: Option<fn(&str) -> String>,
}

const RULES: &[Rule] = &[
    Rule {
        field: Field::Title,
        selector: ".view2_summary h3",
        source: Source::Text,
        default: NO_TITLE,
        post: None,
    },
    Rule {
        field: Field::Serving,
        selector: ".view2_summary_info1",
        source: Source::Text,
        default: "",
        post: Some(extract_serving),
    },
    Rule {
        field: Field::ImageUrl,
        selector: ".centeredcrop img",
        source: Source::Attr("src"),
        default: "",
        post: None,
    },
    Rule {
        field: Field::CookTime,
        selector: ".view2_summary_info2",
        source: Source::Text,
        default: "",
        post: None,
    },
    Rule {
        field: Field::Difficulty,
        selector: ".view2_summary_info3",
        source: Source::Text,
        default: "",
        post: None,
    },
];

struct CompiledRule {
    rule: &'static Rule,
    selector: Selector,
}

static COMPILED: LazyLock<Vec<CompiledRule>> = LazyLock::new(|| {
    RULES
        .iter()
        .map(|rule| CompiledRule {
            rule,
            selector: Selector::parse(rule.selector).unwrap(),
        })
        .collect()
});

impl CompiledRule {
    /// First match wins; a missing region or attribute yields the default.
    fn apply(&self, doc: &Html) -> String {
        let raw = doc.select(&self.selector).next().and_then(|el| match self.rule.source {
            Source::Text => Some(element_text(&el).trim().to_string()),
            Source::Attr(name) => el.value().attr(name).map(str::to_string),
        });
        match raw {
            Some(v) => match self.rule.post {
                Some(post) => post(&v),
                None => v,
            },
            None => self.rule.default.to_string(),
        }
    }
}

fn element_text(el: &ElementRef) -> String {
    el.text().collect()
}

/// Pull "<n> servings" out of the summary line, else return it trimmed.
pub fn extract_serving(raw: &str) -> String {
    match SERVING_RE.find(raw) {
        Some(m) => m.as_str().to_string(),
        None => raw.trim().to_string(),
    }
}

fn summary(doc: &Html) -> Summary {
    let mut s = Summary::default();
    for compiled in COMPILED.iter() {
        let value = compiled.apply(doc);
        match compiled.rule.field {
            Field::Title => s.title = value,
            Field::Serving => s.serving = value,
            Field::ImageUrl => s.image_url = value,
            Field::CookTime => s.cook_time = value,
            Field::Difficulty => s.difficulty = value,
        }
    }
    s
}

fn ingredient_map(doc: &Html) -> IndexMap<String, String> {
    let mut map = IndexMap::new();
    for li in doc.select(&INGREDIENT_SEL) {
        let text = element_text(&li);
        if text.trim().is_empty() {
            continue;
        }
        if let Some((name, amount)) = ingredients::normalize(&text) {
            if !name.is_empty() && !amount.is_empty() {
                // later duplicates overwrite, position stays
                map.insert(name, amount);
            }
        }
    }
    map
}

fn steps(doc: &Html) -> Vec<String> {
    doc.select(&STEP_SEL)
        .map(|el| element_text(&el).trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Map a detail page to a record. Missing regions fall back per field.
pub fn parse_detail(html: &str, id: &str, category: &str) -> Result<Recipe, CrawlError> {
    let doc = Html::parse_document(html);
    Recipe::new(id, category, summary(&doc), ingredient_map(&doc), steps(&doc))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap()
    }

    #[test]
    fn serving_keeps_only_the_match() {
        assert_eq!(extract_serving("2 servings, Easy"), "2 servings");
        assert_eq!(extract_serving("  3인분  30분 이내 "), "3인분");
        assert_eq!(extract_serving("  no match here \n"), "no match here");
        assert_eq!(extract_serving(""), "");
    }

    #[test]
    fn full_page() {
        let r = parse_detail(&fixture("recipe_detail"), "6912345", "국/탕").unwrap();
        assert_eq!(r.id, "6912345");
        assert_eq!(r.category, "국/탕");
        assert_eq!(r.title, "소고기 무국");
        assert_eq!(r.serving, "4인분");
        assert_eq!(r.image_url, "https://recipe1.ezmember.co.kr/cache/main.jpg");
        assert_eq!(r.cook_time, "30분 이내");
        assert_eq!(r.difficulty, "아무나");

        let names: Vec<&str> = r.ingredients.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["소고기", "무", "국간장"]);
        assert_eq!(r.ingredients["소고기"], "200g");
        // second "무" row overwrites the first
        assert_eq!(r.ingredients["무"], "1/3개");
        assert_eq!(r.ingredients["국간장"], "2큰술");

        assert_eq!(
            r.steps,
            vec![
                "소고기를 참기름에 볶아주세요.",
                "무를 넣고 함께 볶다가 물을 부어주세요.",
                "국간장으로 간을 맞춰 완성합니다.",
            ]
        );
    }

    #[test]
    fn empty_page_falls_back_per_field() {
        let r = parse_detail("<html><body></body></html>", "42", "Soup").unwrap();
        assert_eq!(r.id, "42");
        assert_eq!(r.category, "Soup");
        assert_eq!(r.title, NO_TITLE);
        assert_eq!(r.serving, "");
        assert_eq!(r.image_url, "");
        assert_eq!(r.cook_time, "");
        assert_eq!(r.difficulty, "");
        assert!(r.ingredients.is_empty());
        assert!(r.steps.is_empty());
    }

    #[test]
    fn image_without_src_is_empty() {
        let html = r#"<div class="centeredcrop"><img alt="x"></div>
                      <div class="view2_summary"><h3>  Title  </h3></div>"#;
        let r = parse_detail(html, "1", "Soup").unwrap();
        assert_eq!(r.image_url, "");
        assert_eq!(r.title, "Title");
    }

    #[test]
    fn serving_without_pattern_keeps_raw_text() {
        let html = r#"<div class="view2_summary_info1"> 조금 많이 </div>"#;
        let r = parse_detail(html, "1", "Soup").unwrap();
        assert_eq!(r.serving, "조금 많이");
    }

    #[test]
    fn missing_id_is_rejected() {
        assert!(parse_detail("<html></html>", "", "Soup").is_err());
    }
}
