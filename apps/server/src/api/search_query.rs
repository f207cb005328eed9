//! Query-string parsing for `GET /v1/recipes`

use chrono::{DateTime, Utc};

use crate::db::search::params::SearchFilters;
use crate::models::PageRequest;
use crate::{Error, Result};

fn parse_form_urlencoded(s: &str) -> Vec<(String, String)> {
    url::form_urlencoded::parse(s.as_bytes())
        .into_owned()
        .collect()
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(Error::invalid_field(
            name,
            format!("Invalid boolean value: {value}"),
        )),
    }
}

fn parse_i32(name: &str, value: &str) -> Result<i32> {
    value
        .parse()
        .map_err(|_| Error::invalid_field(name, format!("Invalid integer value: {value}")))
}

fn parse_u32(name: &str, value: &str) -> Result<u32> {
    value.parse().map_err(|_| {
        Error::invalid_field(name, format!("Must be a non-negative integer: {value}"))
    })
}

fn parse_instant(name: &str, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| Error::invalid_field(name, format!("Invalid instant: {value}")))
}

/// Append the comma-separated names in `value`, trimmed, skipping empties.
fn push_names(target: &mut Option<Vec<String>>, value: &str) {
    let names = target.get_or_insert_with(Vec::new);
    names.extend(
        value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from),
    );
}

/// Build [`SearchFilters`] from a raw query string.
///
/// List parameters may repeat and may be comma-separated; for every other
/// parameter the last occurrence wins. Empty values count as absent and
/// unknown parameters are ignored.
pub fn parse_search_query(raw_query: Option<&str>, default_page_size: u32) -> Result<SearchFilters> {
    let items = raw_query.map(parse_form_urlencoded).unwrap_or_default();

    let mut filters = SearchFilters::default();
    let mut page: u32 = 0;
    let mut page_size = default_page_size;

    for (key, value) in &items {
        let key = key.as_str();
        if value.is_empty() && !matches!(key, "includedIngredients" | "excludedIngredients") {
            continue;
        }

        match key {
            "vegetarian" => filters.vegetarian = Some(parse_bool(key, value)?),
            "servings" => filters.servings = parse_i32(key, value)?,
            "includedIngredients" => push_names(&mut filters.included_ingredients, value),
            "excludedIngredients" => push_names(&mut filters.excluded_ingredients, value),
            "instruction" => filters.instruction = Some(value.clone()),
            "createdAfter" => filters.created_after = Some(parse_instant(key, value)?),
            "createdBefore" => filters.created_before = Some(parse_instant(key, value)?),
            "page" => page = parse_u32(key, value)?,
            "pageSize" => {
                page_size = parse_u32(key, value)?;
                if page_size == 0 {
                    return Err(Error::invalid_field(key, "Page size must not be less than one"));
                }
            }
            "sort" => filters.sort = value.clone(),
            _ => {}
        }
    }

    filters.page = PageRequest::new(page, page_size);
    Ok(filters)
}
