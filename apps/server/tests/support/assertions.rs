use anyhow::Context as _;
use axum::http::StatusCode;
use serde_json::Value;

pub fn assert_status(actual: StatusCode, expected: StatusCode, context: &str) {
    assert_eq!(actual, expected, "{context}: unexpected status");
}

/// Assert an error body carries the given code and return its field error names.
pub fn assert_error_code(body: &Value, code: u64) -> Vec<String> {
    assert_eq!(body["code"].as_u64(), Some(code), "error body: {body}");
    assert!(body["title"].is_string(), "error body: {body}");
    assert!(body["message"].is_string(), "error body: {body}");
    body["fieldErrors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e["name"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

pub fn page_content(page: &Value) -> anyhow::Result<&Vec<Value>> {
    page["content"].as_array().context("page.content is array")
}

/// Titles of a page's recipes, in response order.
pub fn page_titles(page: &Value) -> anyhow::Result<Vec<String>> {
    Ok(page_content(page)?
        .iter()
        .filter_map(|r| r["title"].as_str().map(String::from))
        .collect())
}

/// Titles sorted alphabetically, for order-insensitive comparisons.
pub fn sorted_titles(page: &Value) -> anyhow::Result<Vec<String>> {
    let mut titles = page_titles(page)?;
    titles.sort();
    Ok(titles)
}

pub fn total_elements(page: &Value) -> anyhow::Result<i64> {
    page["totalElements"]
        .as_i64()
        .context("page.totalElements is integer")
}

/// Ingredient `(name, quantity)` pairs of one recipe body.
pub fn ingredient_quantities(recipe: &Value) -> anyhow::Result<Vec<(String, i64)>> {
    recipe["ingredients"]
        .as_array()
        .context("recipe.ingredients is array")?
        .iter()
        .map(|i| {
            Ok((
                i["name"].as_str().context("ingredient.name")?.to_string(),
                i["quantity"].as_i64().context("ingredient.quantity")?,
            ))
        })
        .collect()
}
