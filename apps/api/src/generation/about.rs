//! CV "about" section: short English prose assembled from the focus areas
//! a JD signals, the tools it names, and the profile.

use std::sync::OnceLock;

use regex::Regex;

use crate::generation::profile::CandidateProfile;
use crate::generation::requirements::JdRequirements;

/// (marker words, focus-area label) pairs checked independently.
const FOCUS_AREAS: &[(&[&str], &str)] = &[
    (&["performance", "roi", "kpi"], "performance analysis"),
    (&["strategy", "strategic"], "strategic planning"),
    (&["product"], "product management"),
    (&["creative", "content"], "content creation"),
    (&["data", "analytics"], "data analysis"),
];

fn ai_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\bai\b|artificial intelligence|automation").expect("valid pattern")
    })
}

/// Builds the about paragraph for a JD.
pub fn build_about_section(
    profile: &CandidateProfile,
    reqs: &JdRequirements,
    jd_text: &str,
) -> String {
    let jd_lower = jd_text.to_lowercase();

    let mut focus: Vec<&str> = FOCUS_AREAS
        .iter()
        .filter(|(markers, _)| markers.iter().any(|m| jd_lower.contains(m)))
        .map(|(_, label)| *label)
        .collect();
    if focus.is_empty() {
        focus = vec!["digital strategy", "campaign optimization"];
    }

    let mut about = format!(
        "{role} with over {years} years of experience in {areas} for international brands. ",
        role = profile.current_role,
        years = profile.years_experience,
        areas = focus[..focus.len().min(2)].join(" and "),
    );

    if !reqs.tools.is_empty() {
        let tools: Vec<&str> = reqs.tools.iter().take(4).map(String::as_str).collect();
        about.push_str(&format!("Proficient in {}, ", tools.join(", ")));
    }

    about.push_str(
        "specialized in optimizing omnichannel strategies and leveraging data-driven \
insights to improve marketing performance. ",
    );

    if ai_re().is_match(&jd_lower) {
        about.push_str(
            "Certified in AI-driven marketing with hands-on experience in implementing \
AI tools for campaign optimization and automation. ",
        );
    }

    if ["manager", "specialist", "lead"].iter().any(|m| jd_lower.contains(m)) {
        let target = if jd_lower.contains("product") {
            "product management"
        } else {
            "strategic marketing roles"
        };
        about.push_str(&format!(
            "Currently seeking opportunities in {target} to leverage analytical skills \
and drive business growth."
        ));
    }

    about.trim().to_string()
}
