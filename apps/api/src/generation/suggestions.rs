//! Tailoring suggestions: a fixed rule list keyed on JD content, plus a
//! warning for JD tools missing from the profile skills.

use crate::generation::profile::CandidateProfile;
use crate::generation::requirements::JdRequirements;

/// Tools worth flagging when the JD asks for them and the profile lacks them.
const WATCHED_TOOLS: &[&str] = &["excel", "powerpoint", "power bi", "google analytics", "jira"];

/// Builds the CV-tailoring suggestion list for a JD.
pub fn build_suggestions(
    profile: &CandidateProfile,
    reqs: &JdRequirements,
    jd_text: &str,
) -> Vec<String> {
    let jd_lower = jd_text.to_lowercase();
    let mut suggestions = Vec::new();

    if contains_any(&jd_lower, &["budget", "costi"]) {
        suggestions.push(
            "Evidenzia esperienza in budget management e negoziazione con fornitori \
nella sezione Work Experience"
                .to_string(),
        );
    }

    if contains_any(&jd_lower, &["team", "coordinamento"]) {
        suggestions.push(
            "Sottolinea la gestione di team e coordinamento stakeholder cross-funzionali"
                .to_string(),
        );
    }

    if contains_any(&jd_lower, &["international", "globale"]) {
        suggestions.push(format!(
            "Metti in risalto l'esperienza con clienti internazionali ({})",
            profile
                .brands_managed
                .iter()
                .take(3)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }

    if reqs.experience_years.is_some_and(|y| y <= 3) {
        suggestions.push(
            "Il ruolo richiede meno esperienza: puoi enfatizzare progetti side e \
certificazioni recenti"
                .to_string(),
        );
    }

    if jd_lower.contains("product") {
        suggestions.push(
            "Aggiungi bullet point su lancio prodotti e roadmap nella sezione Work Experience"
                .to_string(),
        );
    }

    if contains_any(&jd_lower, &["creative", "contenuti"]) {
        suggestions.push(
            "Evidenzia collaborazione con team creativi e sviluppo asset performanti".to_string(),
        );
    }

    if contains_any(&jd_lower, &["jira", "agile"]) {
        suggestions.push(
            "Menziona familiarità con metodologie agile se hai esperienza (anche indiretta)"
                .to_string(),
        );
    }

    let missing_tools: Vec<&str> = WATCHED_TOOLS
        .iter()
        .filter(|tool| jd_lower.contains(*tool) && !profile.has_skill(tool))
        .copied()
        .collect();
    if !missing_tools.is_empty() {
        suggestions.push(format!(
            "Keyword mancanti importanti: {} - valuta se hai esperienza anche \
indiretta da menzionare",
            missing_tools.join(", ")
        ));
    }

    suggestions
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::requirements::extract_requirements;

    fn profile() -> CandidateProfile {
        CandidateProfile::default()
    }

    fn suggestions_for(jd: &str) -> Vec<String> {
        build_suggestions(&profile(), &extract_requirements(jd), jd)
    }

    #[test]
    fn test_budget_rule() {
        let s = suggestions_for("Gestione budget pubblicitario");
        assert!(s.iter().any(|x| x.contains("budget management")));
    }

    #[test]
    fn test_junior_role_rule() {
        let s = suggestions_for("Richiesti 2 anni di esperienza");
        assert!(s.iter().any(|x| x.contains("meno esperienza")));
    }

    #[test]
    fn test_senior_role_skips_junior_rule() {
        let s = suggestions_for("Richiesti 8 anni di esperienza");
        assert!(!s.iter().any(|x| x.contains("meno esperienza")));
    }

    #[test]
    fn test_missing_tool_warning_only_for_unknown_tools() {
        // jira is in the JD but not in the default profile skills
        let s = suggestions_for("Richiesta conoscenza di Jira e Power BI");
        let warning = s
            .iter()
            .find(|x| x.contains("Keyword mancanti"))
            .expect("missing-tools warning expected");
        assert!(warning.contains("jira"));
        assert!(!warning.contains("power bi"), "known skills are not flagged");
    }

    #[test]
    fn test_international_rule_names_brands() {
        let s = suggestions_for("International clients across markets");
        assert!(s.iter().any(|x| x.contains("Honda")));
    }

    #[test]
    fn test_bland_jd_yields_no_suggestions() {
        assert!(suggestions_for("Posizione aperta a Milano").is_empty());
    }
}
