//! Requirement extraction: tools, years of experience and soft skills
//! mentioned in a JD, detected by fixed pattern tables.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Known tool and platform names, in detection order. Matched as
/// case-insensitive substrings, as the postings spell them loosely.
const TOOL_TABLE: &[&str] = &[
    "adobe creative suite",
    "photoshop",
    "illustrator",
    "premiere",
    "after effects",
    "indesign",
    "excel",
    "powerpoint",
    "power bi",
    "looker studio",
    "google analytics",
    "tableau",
    "meta",
    "facebook",
    "instagram",
    "tiktok",
    "linkedin",
    "youtube",
    "jira",
    "trello",
    "asana",
    "monday",
    "canva",
    "figma",
    "sketch",
];

/// Soft-skill vocabulary, mixed Italian/English like the postings.
const SOFT_SKILL_TABLE: &[&str] = &[
    "team",
    "comunicazione",
    "problem solving",
    "autonomia",
    "creatività",
    "organizzazione",
    "flessibilità",
    "leadership",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JdRequirements {
    pub tools: Vec<String>,
    pub experience_years: Option<u32>,
    pub soft_skills: Vec<String>,
}

fn years_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)[\s-]+(anni|anno|years|year)").expect("valid pattern"))
}

/// Scans a JD for known tools, a years-of-experience figure and soft skills.
pub fn extract_requirements(jd_text: &str) -> JdRequirements {
    let jd_lower = jd_text.to_lowercase();

    let tools: Vec<String> = TOOL_TABLE
        .iter()
        .filter(|tool| jd_lower.contains(*tool))
        .map(|tool| tool.to_string())
        .collect();

    let experience_years = years_re()
        .captures(&jd_lower)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok());

    let soft_skills: Vec<String> = SOFT_SKILL_TABLE
        .iter()
        .filter(|skill| jd_lower.contains(*skill))
        .map(|skill| skill.to_string())
        .collect();

    JdRequirements {
        tools,
        experience_years,
        soft_skills,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_tools_in_table_order() {
        let reqs = extract_requirements(
            "Richiesta conoscenza di Google Analytics, Excel e Power BI. Excel avanzato.",
        );
        assert_eq!(reqs.tools, vec!["excel", "power bi", "google analytics"]);
    }

    #[test]
    fn test_tools_deduplicated() {
        let reqs = extract_requirements("Excel excel EXCEL");
        assert_eq!(reqs.tools, vec!["excel"]);
    }

    #[test]
    fn test_years_italian() {
        let reqs = extract_requirements("Almeno 3 anni di esperienza nel ruolo");
        assert_eq!(reqs.experience_years, Some(3));
    }

    #[test]
    fn test_years_english() {
        let reqs = extract_requirements("Minimum 5 years of experience");
        assert_eq!(reqs.experience_years, Some(5));
    }

    #[test]
    fn test_years_absent() {
        let reqs = extract_requirements("Esperienza pregressa gradita");
        assert_eq!(reqs.experience_years, None);
    }

    #[test]
    fn test_soft_skills_detected() {
        let reqs = extract_requirements(
            "Ottime doti di comunicazione, leadership e problem solving richieste",
        );
        assert_eq!(
            reqs.soft_skills,
            vec!["comunicazione", "problem solving", "leadership"]
        );
    }

    #[test]
    fn test_empty_jd_yields_empty_requirements() {
        let reqs = extract_requirements("");
        assert!(reqs.tools.is_empty());
        assert!(reqs.soft_skills.is_empty());
        assert_eq!(reqs.experience_years, None);
    }
}
