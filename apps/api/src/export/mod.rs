//! Report export: serializes an analysis and the raw CV text into a .docx.

pub mod docx;

use thiserror::Error;

use crate::analysis::AnalysisResult;
use crate::config::ReportProfile;
use crate::export::docx::DocxBuilder;

/// Maximum number of characters of raw CV text copied into the export.
pub const RAW_TEXT_LIMIT: usize = 5000;

pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Error)]
pub enum ExportError {
    /// docx-rs failed to write the package archive.
    #[error("docx packaging failed: {0}")]
    Pack(String),
}

/// Builds the review document: header block, one bulleted section per
/// narrative list, the letter, and the truncated raw text.
pub fn build_docx(
    analysis: &AnalysisResult,
    raw_text: &str,
    profile: &ReportProfile,
) -> Result<Vec<u8>, ExportError> {
    let title = format!("{} — CV Review", profile.display_name);
    let mut doc = DocxBuilder::new();

    doc.heading(1, title)
        .paragraph(format!("Target Role: {}", profile.target_role))
        .paragraph(format!(
            "University: {} | Program: {} | Internship: {}",
            profile.institution, profile.program, profile.start_date
        ))
        .paragraph("");

    let sections: [(&str, &[String]); 4] = [
        ("Key Strengths", analysis.strengths.as_slice()),
        ("Areas to Improve", analysis.improve.as_slice()),
        ("Suggested Roles", analysis.roles.as_slice()),
        ("Mini Project Ideas", analysis.projects.as_slice()),
    ];
    for (heading, items) in sections {
        doc.heading(2, heading).bullets(items.iter().cloned());
    }

    doc.heading(2, "Motivation Letter (EN)")
        .paragraph(analysis.letter.as_str());

    doc.heading(2, "Extracted CV Text (raw)")
        .paragraph(truncate_chars(raw_text, RAW_TEXT_LIMIT));

    doc.build()
}

/// First `limit` characters (not bytes) of `text`.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

/// Download name: display name lowercased, spaces to underscores, fixed suffix.
pub fn export_filename(display_name: &str) -> String {
    format!("{}_cv_review.docx", display_name.to_lowercase().replace(' ', "_"))
}
