// CV analysis engine: pattern dictionary, classifier, report synthesis.
// Pure and synchronous; the HTTP layer lives in `handlers`.

pub mod classifier;
pub mod handlers;
pub mod patterns;
pub mod render;
pub mod synthesizer;

use chrono::{Datelike, Local};
use serde::Serialize;

use crate::analysis::patterns::Category;
use crate::config::ReportProfile;

/// Extracted text shorter than this (in characters) is rejected before analysis.
pub const MIN_TEXT_CHARS: usize = 20;

/// Full result of one analysis run. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    /// Matched categories, sorted by label.
    pub tech: Vec<Category>,
    pub languages: Vec<String>,
    pub experience_years_est: u32,
    pub strengths: Vec<String>,
    pub improve: Vec<String>,
    pub roles: Vec<String>,
    pub projects: Vec<String>,
    pub letter: String,
}

/// Runs the classifier and the synthesizer over `text`.
/// Deterministic for a given `(text, profile, current_year)`.
pub fn analyze(text: &str, profile: &ReportProfile, current_year: i32) -> AnalysisResult {
    let tech = classifier::find_categories(text);
    let languages = classifier::detect_languages(text);
    let experience_years_est = classifier::estimate_experience(text, current_year);
    let report = synthesizer::synthesize(&tech, profile);

    AnalysisResult {
        tech: tech.into_iter().collect(),
        languages,
        experience_years_est,
        strengths: report.strengths,
        improve: report.improve,
        roles: report.roles,
        projects: report.projects,
        letter: report.letter,
    }
}

/// Current calendar year on the local clock.
pub fn current_year() -> i32 {
    Local::now().year()
}
