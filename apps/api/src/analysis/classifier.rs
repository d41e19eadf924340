//! Classifier: scans CV text against the pattern dictionary.
//!
//! Every function here is total: text that matches nothing degrades to
//! an empty set, the fallback language, or a zero estimate.

use std::collections::BTreeSet;

use crate::analysis::patterns::{Category, CATEGORY_DICTIONARY, LANGUAGE_PATTERN, YEAR_PATTERN};

/// Language reported when no known language name appears in the text.
pub const FALLBACK_LANGUAGE: &str = "Turkish";

/// Earliest year accepted by the experience heuristic.
pub const MIN_ACCEPTED_YEAR: i32 = 2000;

/// Returns every category with at least one matching pattern.
/// The first matching pattern settles a category; there is no scoring.
pub fn find_categories(text: &str) -> BTreeSet<Category> {
    let text_low = text.to_lowercase();
    CATEGORY_DICTIONARY
        .iter()
        .filter(|entry| entry.patterns.iter().any(|p| p.is_match(&text_low)))
        .map(|entry| entry.category)
        .collect()
}

/// Returns capitalised, sorted, unique language names.
/// Falls back to `["Turkish"]` when none are found.
pub fn detect_languages(text: &str) -> Vec<String> {
    let text_low = text.to_lowercase();
    let found: BTreeSet<String> = LANGUAGE_PATTERN
        .find_iter(&text_low)
        .map(|m| capitalize(m.as_str()))
        .collect();

    if found.is_empty() {
        vec![FALLBACK_LANGUAGE.to_string()]
    } else {
        found.into_iter().collect()
    }
}

/// Naive experience estimate: the largest gap between `current_year` and any
/// year token in `MIN_ACCEPTED_YEAR..=current_year`.
///
/// Any 4-digit token in range counts, so phone numbers or postcodes can
/// inflate the estimate.
pub fn estimate_experience(text: &str, current_year: i32) -> u32 {
    YEAR_PATTERN
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<i32>().ok())
        .filter(|year| (MIN_ACCEPTED_YEAR..=current_year).contains(year))
        .map(|year| (current_year - year) as u32)
        .max()
        .unwrap_or(0)
}

/// Uppercases the first character and lowercases the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
