//! Markdown rendering of an analysis, for clients that display the report inline.

use crate::analysis::AnalysisResult;

/// One `- item` line per entry.
pub fn bullet(items: &[String]) -> String {
    items
        .iter()
        .map(|i| format!("- {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_markdown(result: &AnalysisResult) -> String {
    let sections: [(&str, &[String]); 4] = [
        ("Key Strengths", result.strengths.as_slice()),
        ("Areas to Improve", result.improve.as_slice()),
        ("Suggested Roles", result.roles.as_slice()),
        ("Mini Project Ideas", result.projects.as_slice()),
    ];

    let mut out = String::new();
    for (heading, items) in sections {
        out.push_str(&format!("### {heading}\n{}\n\n", bullet(items)));
    }
    out.push_str(&format!(
        "### Motivation Letter (EN)\n```\n{}\n```\n",
        result.letter
    ));
    out
}
