//! Report synthesis: ordered rule tables that turn a category set into
//! narrative lists, plus the motivation letter template.
//!
//! Output order is table order.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::analysis::patterns::Category;
use crate::config::ReportProfile;

/// Condition under which a rule contributes its sentence.
#[derive(Debug, Clone, Copy)]
pub enum When {
    Has(Category),
    HasAny(&'static [Category]),
    Lacks(Category),
    LacksAll(&'static [Category]),
    Always,
}

impl When {
    pub fn holds(self, tech: &BTreeSet<Category>) -> bool {
        match self {
            When::Has(c) => tech.contains(&c),
            When::HasAny(cs) => cs.iter().any(|c| tech.contains(c)),
            When::Lacks(c) => !tech.contains(&c),
            When::LacksAll(cs) => cs.iter().all(|c| !tech.contains(c)),
            When::Always => true,
        }
    }
}

/// One `(predicate, sentence)` pair.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub when: When,
    pub text: &'static str,
}

const fn rule(when: When, text: &'static str) -> Rule {
    Rule { when, text }
}

pub const STRENGTH_RULES: &[Rule] = &[
    rule(
        When::Has(Category::Python),
        "Python ile uygulama geliştirme",
    ),
    rule(
        When::HasAny(&[Category::Ml, Category::Dl]),
        "Makine öğrenmesi için NumPy/Pandas/Scikit deneyimi",
    ),
    rule(
        When::Has(Category::Cv),
        "Görüntü işleme / OpenCV ile deneyim",
    ),
    rule(
        When::Has(Category::Nlp),
        "Doğal dil işleme (Transformer/BERT) bilgisi",
    ),
    rule(
        When::Has(Category::React),
        "React/React Native ile ön-yüz/mobil geliştirme",
    ),
    rule(
        When::Has(Category::Api),
        "REST API (Flask/FastAPI) ile servis geliştirme",
    ),
    rule(
        When::Has(Category::Git),
        "Git ve GitHub akışlarına hakimiyet",
    ),
];

/// Used when no strength rule fired.
pub const FALLBACK_STRENGTH: &str = "Temel programlama ve algoritma bilgisi";

/// Always appended after the conditional strengths.
pub const CLOSING_STRENGTH: &str = "Araştırmacı ve proje odaklı çalışma yaklaşımı";

pub const IMPROVEMENT_RULES: &[Rule] = &[
    rule(
        When::Lacks(Category::Cloud),
        "Bulut (AWS/GCP) üzerinde basit bir deploy (FastAPI + Docker)",
    ),
    rule(When::Lacks(Category::Sql), "SQL ve temel veri modelleri"),
    rule(
        When::LacksAll(&[Category::Cv, Category::Nlp, Category::Ml]),
        "Bir yapay zeka alanında mini proje (CV veya NLP)",
    ),
    rule(When::Always, "Unit test ve basit CI (GitHub Actions)"),
    rule(
        When::Lacks(Category::React),
        "Basit bir React/Next.js portföy",
    ),
];

pub const SUGGESTED_ROLES: &[&str] = &[
    "AI/ML Intern (Computer Vision veya NLP)",
    "Python Backend Intern (FastAPI/Django)",
    "Data Intern (Pandas, SQL, raporlama)",
    "Mobile Intern (React Native)",
    "Automation/Script Intern (Python + GitHub Actions)",
];

/// The project idea describing this service itself; present in every report.
pub const THIS_TOOL_PROJECT: &str =
    "CV Analiz Aracı: PDF’ten bilgi çıkaran ve öneri üreten Streamlit uygulaması (bu proje)";

pub const PROJECT_RULES: &[Rule] = &[
    rule(
        When::Has(Category::Cv),
        "Realtime Image Captioner: OpenCV + küçük bir CNN/Transformer, Streamlit arayüzü",
    ),
    rule(
        When::Has(Category::Nlp),
        "Türkçe Duygu Analizi: küçük veri + Logistic Regression/Transformer, FastAPI servis",
    ),
    rule(When::Always, THIS_TOOL_PROJECT),
    rule(
        When::Has(Category::React),
        "React Native ile AI destekli metin özetleyici mobil uygulama",
    ),
];

/// Letter phrase used instead of the category list when nothing matched.
pub const EMPTY_TECH_PHRASE: &str = "Python and core CS concepts";

/// Narrative half of an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub strengths: Vec<String>,
    pub improve: Vec<String>,
    pub roles: Vec<String>,
    pub projects: Vec<String>,
    pub letter: String,
}

/// Evaluates every rule table against `tech`. Never fails; an empty set
/// produces only fallback and constant entries.
pub fn synthesize(tech: &BTreeSet<Category>, profile: &ReportProfile) -> Report {
    let mut strengths = apply_rules(STRENGTH_RULES, tech);
    if strengths.is_empty() {
        strengths.push(FALLBACK_STRENGTH.to_string());
    }
    strengths.push(CLOSING_STRENGTH.to_string());

    Report {
        strengths,
        improve: apply_rules(IMPROVEMENT_RULES, tech),
        roles: SUGGESTED_ROLES.iter().map(|r| r.to_string()).collect(),
        projects: apply_rules(PROJECT_RULES, tech),
        letter: compose_letter(tech, profile),
    }
}

fn apply_rules(rules: &[Rule], tech: &BTreeSet<Category>) -> Vec<String> {
    rules
        .iter()
        .filter(|r| r.when.holds(tech))
        .map(|r| r.text.to_string())
        .collect()
}

/// Fills the fixed motivation letter template.
pub fn compose_letter(tech: &BTreeSet<Category>, profile: &ReportProfile) -> String {
    let experience = if tech.is_empty() {
        EMPTY_TECH_PHRASE.to_string()
    } else {
        tech.iter().map(|c| c.label()).collect::<Vec<_>>().join(", ")
    };

    format!(
        "Dear Hiring Team,\n\n\
         I am {name}, a final-year {program} student at {institution}. \
         My focus is {role}. I am seeking a long-term internship starting {start}. \
         I have hands-on experience with {experience}, \
         and I enjoy building real products. I will be happy to contribute, learn fast and deliver.\n\n\
         Best regards,\n{name}",
        name = profile.display_name,
        program = profile.program,
        institution = profile.institution,
        role = profile.target_role,
        start = profile.start_date,
    )
}
