use anyhow::{Context, Result};
use serde::Serialize;

use crate::session::DEFAULT_MAX_SESSIONS;

/// Identity values substituted verbatim into the report and letter.
/// None of these affect classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportProfile {
    pub display_name: String,
    pub target_role: String,
    pub institution: String,
    pub program: String,
    pub start_date: String,
}

impl Default for ReportProfile {
    fn default() -> Self {
        Self {
            display_name: "Applicant".to_string(),
            target_role: "AI & Python Developer".to_string(),
            institution: "Manisa Celal Bayar Üniversitesi".to_string(),
            program: "Computer Engineering".to_string(),
            start_date: "2026".to_string(),
        }
    }
}

impl ReportProfile {
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            display_name: env_or("STUDENT_NAME", defaults.display_name),
            target_role: env_or("ROLE_TARGET", defaults.target_role),
            institution: env_or("UNIVERSITY", defaults.institution),
            program: env_or("PROGRAM", defaults.program),
            start_date: env_or("INTERNSHIP_START", defaults.start_date),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Every variable has a default, so startup only fails on malformed numbers.
#[derive(Debug, Clone)]
pub struct Config {
    pub profile: ReportProfile,
    pub port: u16,
    pub max_upload_bytes: usize,
    /// Upper bound on in-memory sessions; the oldest analysis is evicted beyond it.
    pub max_sessions: usize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            profile: ReportProfile::from_env(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| "10485760".to_string())
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            max_sessions: std::env::var("MAX_SESSIONS")
                .unwrap_or_else(|_| DEFAULT_MAX_SESSIONS.to_string())
                .parse::<usize>()
                .context("MAX_SESSIONS must be a session count")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}
