//! The fixed candidate profile interpolated into letter and CV templates.
//!
//! Plain data, injected into the generation layer only. The extraction and
//! scoring core never reads it.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub current_role: String,
    pub company: String,
    pub years_experience: u32,
    pub core_skills: Vec<String>,
    pub brands_managed: Vec<String>,
    pub certifications: Vec<String>,
}

impl Default for CandidateProfile {
    fn default() -> Self {
        CandidateProfile {
            name: "Marco Bianchi".to_string(),
            email: "marco.bianchi@example.com".to_string(),
            phone: "+39 333 1234567".to_string(),
            current_role: "Digital Consultant".to_string(),
            company: "Mediahub Italia".to_string(),
            years_experience: 8,
            core_skills: vec![
                "Digital Strategy",
                "Media Planning",
                "Budget Management",
                "Performance Analysis",
                "Data Analysis",
                "Campaign Optimization",
                "Meta Ads",
                "Google Ads",
                "TikTok",
                "Programmatic",
                "Google Analytics 4",
                "Looker Studio",
                "Power BI",
                "AI for Marketing",
                "Prompt Engineering",
                "Team Management",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            brands_managed: vec!["Honda", "Levi's", "Acuvue", "Ceres"]
                .into_iter()
                .map(String::from)
                .collect(),
            certifications: vec![
                "AI for Marketing (Fastweb Digital Academy)",
                "Prompt Engineering",
                "Advanced Web Analytics",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

impl CandidateProfile {
    /// Loads the profile from `path` when given, otherwise the built-in one.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            None => Ok(Self::default()),
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading profile {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("parsing profile {}", path.display()))
            }
        }
    }

    /// Case-insensitive check used by the suggestion rules.
    pub fn has_skill(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.core_skills
            .iter()
            .any(|s| s.to_lowercase().contains(&needle))
    }
}
