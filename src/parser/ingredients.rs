use std::sync::LazyLock;

use regex::Regex;

/// Label of the shop button rendered inside each ingredient row.
pub const PURCHASE_MARKER: &str = "구매";

static GAP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{2,}|\s{2,}").unwrap());

/// Split a raw ingredient row into (name, amount).
///
/// The row is cut on runs of two or more whitespace characters; the first
/// segment is the name and the second the amount, anything after is ignored.
/// Rows that do not split return `None`. Either half may still be empty,
/// e.g. when a blank-line gap is followed by indentation.
pub fn normalize(raw: &str) -> Option<(String, String)> {
    let text = raw.replace(PURCHASE_MARKER, "");
    let text = text.trim();
    let mut parts = GAP_RE.split(text);
    let name = parts.next()?;
    let amount = parts.next()?;
    Some((name.trim().to_string(), amount.trim().to_string()))
}
