//! Pattern dictionary: the closed category vocabulary and the regexes that detect it.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A detected skill/technology/domain.
///
/// Variants are declared in label byte order so that the derived `Ord`
/// renders sets sorted by label (`api` < `c` < `c++` < ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "api")]
    Api,
    #[serde(rename = "c")]
    C,
    #[serde(rename = "c++")]
    Cpp,
    #[serde(rename = "cloud")]
    Cloud,
    #[serde(rename = "cv")]
    Cv,
    #[serde(rename = "dl")]
    Dl,
    #[serde(rename = "git")]
    Git,
    #[serde(rename = "java")]
    Java,
    #[serde(rename = "js")]
    Js,
    #[serde(rename = "ml")]
    Ml,
    #[serde(rename = "nlp")]
    Nlp,
    #[serde(rename = "node")]
    Node,
    #[serde(rename = "python")]
    Python,
    #[serde(rename = "react")]
    React,
    #[serde(rename = "sql")]
    Sql,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Api => "api",
            Category::C => "c",
            Category::Cpp => "c++",
            Category::Cloud => "cloud",
            Category::Cv => "cv",
            Category::Dl => "dl",
            Category::Git => "git",
            Category::Java => "java",
            Category::Js => "js",
            Category::Ml => "ml",
            Category::Nlp => "nlp",
            Category::Node => "node",
            Category::Python => "python",
            Category::React => "react",
            Category::Sql => "sql",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw pattern table, in dictionary order. Matching is case-insensitive and
/// unanchored unless a pattern carries its own `\b`.
const CATEGORY_PATTERNS: &[(Category, &[&str])] = &[
    (Category::Python, &["python"]),
    (Category::Java, &["java"]),
    (Category::Cpp, &[r"c\+\+"]),
    (Category::C, &[r"\bc\b"]),
    (Category::Js, &["javascript", r"\bjs\b"]),
    (Category::React, &["react", "react native"]),
    (Category::Node, &["node"]),
    (Category::Sql, &["sql", "postgres", "mysql"]),
    (Category::Ml, &["machine learning", r"\bml\b", "scikit", "sklearn", "numpy", "pandas"]),
    (Category::Dl, &["deep learning", "pytorch", "tensorflow", "keras"]),
    (Category::Cv, &["computer vision", "opencv", "image", "yolo"]),
    (Category::Nlp, &["nlp", "transformer", "bert", "hugging face", "spacy"]),
    (Category::Api, &["api", "rest", "fastapi", "flask", "django"]),
    (Category::Cloud, &["aws", "gcp", "azure"]),
    (Category::Git, &["git", "github", "gitlab"]),
];

/// A category with its compiled patterns.
pub struct CategoryPatterns {
    pub category: Category,
    pub patterns: Vec<Regex>,
}

pub static CATEGORY_DICTIONARY: LazyLock<Vec<CategoryPatterns>> = LazyLock::new(|| {
    CATEGORY_PATTERNS
        .iter()
        .map(|(category, raw)| CategoryPatterns {
            category: *category,
            patterns: raw.iter().map(|p| case_insensitive(p)).collect(),
        })
        .collect()
});

/// Closed list of spoken languages, matched as whole words.
pub static LANGUAGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    case_insensitive(r"\b(english|turkish|german|french|italian|albanian|kurdish)\b")
});

/// Four-digit year token. Deliberately unanchored: `12019` yields `2019`.
pub static YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(20\d{2}|19\d{2})").expect("Invalid year regex pattern"));

fn case_insensitive(pattern: &str) -> Regex {
    Regex::new(&format!("(?i){pattern}")).expect("Invalid category regex pattern")
}
