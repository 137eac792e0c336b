//! JD classification: one closed category enum from one function.
//! Template selection downstream is a pure match on the result.

use serde::{Deserialize, Serialize};

/// The JD genres the letter templates distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JdCategory {
    Creative,
    Product,
    Analytics,
    General,
}

const CREATIVE_MARKERS: &[&str] = &["creative", "grafica", "design", "video", "contenuti"];
const PRODUCT_MARKERS: &[&str] = &["product", "prodotto", "roadmap", "sviluppo"];
const ANALYTICS_MARKERS: &[&str] = &["analytics", "data", "performance", "kpi", "roi"];

/// Classifies a JD. Precedence: Creative over Product over Analytics,
/// General when nothing matches.
pub fn classify(jd_text: &str) -> JdCategory {
    let jd_lower = jd_text.to_lowercase();
    if contains_any(&jd_lower, CREATIVE_MARKERS) {
        JdCategory::Creative
    } else if contains_any(&jd_lower, PRODUCT_MARKERS) {
        JdCategory::Product
    } else if contains_any(&jd_lower, ANALYTICS_MARKERS) {
        JdCategory::Analytics
    } else {
        JdCategory::General
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creative_jd() {
        assert_eq!(
            classify("Cerchiamo un content creator per video e grafica"),
            JdCategory::Creative
        );
    }

    #[test]
    fn test_product_jd() {
        assert_eq!(
            classify("Product manager per la roadmap di prodotto"),
            JdCategory::Product
        );
    }

    #[test]
    fn test_analytics_jd() {
        assert_eq!(
            classify("Analisi KPI e performance reporting"),
            JdCategory::Analytics
        );
    }

    #[test]
    fn test_general_fallback() {
        assert_eq!(classify("Posizione aperta a Milano"), JdCategory::General);
    }

    #[test]
    fn test_creative_wins_over_analytics() {
        assert_eq!(
            classify("Design di dashboard e analisi performance KPI"),
            JdCategory::Creative
        );
    }

    #[test]
    fn test_product_wins_over_analytics() {
        assert_eq!(
            classify("Product analytics e data reporting"),
            JdCategory::Product
        );
    }

    #[test]
    fn test_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&JdCategory::Creative).unwrap(),
            "\"creative\""
        );
    }
}
