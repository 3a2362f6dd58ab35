//! Turns scraped text into typed values.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;

static OUT_OF_FIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9.,]+)\s*out of\s*5").expect("valid rating regex"));

static NUMERIC_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9.,]+").expect("valid number regex"));

pub const MAX_RATING: f64 = 5.0;

/// Reads a star rating from icon alt text such as "4.5 out of 5 stars".
/// Falls back to the first number in the text. A comma decimal separator
/// is accepted. Values outside 0..=5 are rejected.
pub fn parse_rating(text: &str) -> Option<f64> {
    let token = OUT_OF_FIVE
        .captures(text)
        .and_then(|c| c.get(1))
        .or_else(|| NUMERIC_TOKEN.find(text))?
        .as_str();

    let rating = parse_decimal_prefix(&token.replacen(',', ".", 1))?;
    (0.0..=MAX_RATING).contains(&rating).then_some(rating)
}

/// Reads a review count like "1,234" or "12.345". Whitespace is ignored and
/// grouping separators are dropped.
pub fn parse_reviews_count(text: &str) -> Option<u64> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let digits: String = NUMERIC_TOKEN
        .find(&compact)?
        .as_str()
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Longest leading `digits[.digits]` run of `token`, as a number.
fn parse_decimal_prefix(token: &str) -> Option<f64> {
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in token.char_indices() {
        match c {
            '0'..='9' => end = i + 1,
            '.' if !seen_dot => {
                seen_dot = true;
                end = i + 1;
            }
            _ => break,
        }
    }
    token[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Resolves a scraped href against the shop's base (`https://host`, no
/// trailing slash). URLs with a host, and `data:` URIs, are returned as is.
/// Protocol-relative references borrow the base's scheme; anything else,
/// including host-less `word:rest` strings, is appended to the base.
pub fn make_absolute(href: &str, site_base: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    if Url::parse(href).is_ok_and(|url| url.has_host() || url.scheme() == "data") {
        return Some(href.to_string());
    }
    if href.starts_with("//") {
        let scheme = site_base
            .split_once("://")
            .map(|(scheme, _)| scheme)
            .unwrap_or("https");
        return Some(format!("{scheme}:{href}"));
    }
    if href.starts_with('/') {
        return Some(format!("{site_base}{href}"));
    }
    Some(format!("{site_base}/{href}"))
}
