//! Cover-letter assembly: a fixed Italian prose skeleton interpolated with
//! profile and extracted-requirement data, with an optional LLM draft that
//! falls back to the template on any failure.

use tracing::warn;

use crate::generation::classify::JdCategory;
use crate::generation::profile::CandidateProfile;
use crate::generation::requirements::JdRequirements;
use crate::llm_client::LlmClient;

const DRAFT_MAX_TOKENS: u32 = 800;
const DRAFT_JD_CHARS: usize = 1200;

/// Where the final letter text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterSource {
    Template,
    Llm,
}

impl LetterSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LetterSource::Template => "template",
            LetterSource::Llm => "llm",
        }
    }
}

/// Assembles the deterministic template letter. Always succeeds.
pub fn build_cover_letter(
    profile: &CandidateProfile,
    reqs: &JdRequirements,
    category: JdCategory,
    company: &str,
    role: &str,
    location: &str,
) -> String {
    let mut letter = format!(
        "Oggetto: Candidatura per {role} – {location}\n\n\
Gentile Team Selezione {company},\n\n\
desidero candidarmi per la posizione di {role}. Con oltre {years} anni di \
esperienza in digital marketing e gestione di campagne per brand \
internazionali, ritengo di poter portare un contributo concreto al vostro team.",
        years = profile.years_experience,
    );

    letter.push_str("\n\n");
    letter.push_str(&skills_paragraph(profile, reqs, category));

    if !reqs.tools.is_empty() {
        letter.push_str("\n\n");
        letter.push_str(&format!(
            "Ho solida padronanza di {tools} per analisi di mercato e reportistica \
manageriale. La mia esperienza con clienti internazionali ({brands}) mi ha \
permesso di sviluppare eccellenti competenze in inglese e capacità di \
coordinamento con stakeholder globali.",
            tools = join_first(&reqs.tools, 4),
            brands = join_first(&profile.brands_managed, 3),
        ));
    }

    letter.push_str("\n\n");
    letter.push_str(&format!(
        "Un aspetto che mi differenzia è l'integrazione di competenze in AI \
applicata al marketing, certificate attraverso corsi specializzati \
({certs}). Ho utilizzato queste competenze in progetti personali di web \
development e automazione, ottenendo risultati misurabili in termini di \
engagement e conversioni.",
        certs = join_first(&profile.certifications, 3),
    ));

    letter.push_str("\n\n");
    letter.push_str(&format!(
        "Sono motivato dalla possibilità di contribuire agli obiettivi di \
{company} e mettere a disposizione un approccio analitico, orientato ai \
risultati e in continua evoluzione rispetto alle nuove tecnologie digitali.\n\n\
Resto a disposizione per un colloquio conoscitivo.\n\n\
Cordiali saluti,\n\n\
{name}\n{email} | {phone}",
        name = profile.name,
        email = profile.email,
        phone = profile.phone,
    ));

    letter
}

/// The category-specific competence paragraph. Analytics and General share
/// the data-driven variant.
fn skills_paragraph(
    profile: &CandidateProfile,
    reqs: &JdRequirements,
    category: JdCategory,
) -> String {
    match category {
        JdCategory::Creative => format!(
            "Nel mio ruolo attuale di {role} presso {company}, ho sviluppato \
competenze nella creazione e ottimizzazione di contenuti digitali multi-canale, \
collaborando costantemente con team creativi per sviluppare asset pubblicitari \
performanti. Ho esperienza nella gestione di progetti che integrano storytelling \
visivo, video content e design strategico.",
            role = profile.current_role,
            company = profile.company,
        ),
        JdCategory::Product => format!(
            "Nel mio ruolo attuale di {role} presso {company}, mi occupo della \
definizione di strategie digitali annuali e del lancio di nuovi prodotti. Ho \
esperienza diretta nell'analisi dei trend di mercato, nella valutazione di \
fornitori e soluzioni tecnologiche, e nella collaborazione con team \
cross-funzionali per portare prodotti digitali sul mercato, dalla roadmap \
strategica al monitoraggio delle performance post-lancio.",
            role = profile.current_role,
            company = profile.company,
        ),
        JdCategory::Analytics | JdCategory::General => {
            let tools = if reqs.tools.is_empty() {
                "Google Analytics 4, Power BI e Looker Studio".to_string()
            } else {
                join_first(&reqs.tools, 3)
            };
            format!(
                "Nel mio ruolo attuale di {role} presso {company}, gestisco strategie \
di advertising per brand come {brands}, con focus su ottimizzazione delle \
performance e analisi data-driven. Ho esperienza nella gestione di budget \
multi-canale, nel monitoraggio di KPI attraverso strumenti come {tools}, e \
nell'implementazione di strategie di testing per massimizzare il ROI.",
                role = profile.current_role,
                company = profile.company,
                brands = join_first(&profile.brands_managed, 3),
            )
        }
    }
}

fn join_first(items: &[String], n: usize) -> String {
    items
        .iter()
        .take(n)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Tries an LLM draft, falling back to the template on any failure.
/// Never errors: the template is the guaranteed floor.
pub async fn draft_or_template(
    llm: Option<&LlmClient>,
    profile: &CandidateProfile,
    reqs: &JdRequirements,
    category: JdCategory,
    company: &str,
    role: &str,
    location: &str,
    jd_text: &str,
) -> (String, LetterSource) {
    if let Some(llm) = llm {
        let prompt = build_draft_prompt(profile, company, role, location, jd_text);
        match llm.call_text(&prompt, None, DRAFT_MAX_TOKENS).await {
            Ok(letter) => return (letter, LetterSource::Llm),
            Err(e) => warn!("LLM letter draft unavailable, using template: {e}"),
        }
    }
    (
        build_cover_letter(profile, reqs, category, company, role, location),
        LetterSource::Template,
    )
}

fn build_draft_prompt(
    profile: &CandidateProfile,
    company: &str,
    role: &str,
    location: &str,
    jd_text: &str,
) -> String {
    format!(
        "Scrivi una cover letter in italiano per la posizione di {role} presso \
{company} ({location}).\n\n\
Profilo del candidato:\n\
- Nome: {name}\n\
- Ruolo attuale: {current_role} presso {current_company}\n\
- Anni di esperienza: {years}\n\
- Competenze principali: {skills}\n\
- Brand gestiti: {brands}\n\n\
Job description (estratto):\n{excerpt}\n\n\
Requisiti: tono professionale ma diretto, massimo 5 paragrafi, chiusura con \
nome e contatti ({email} | {phone}). Rispondi SOLO con il testo della lettera.",
        name = profile.name,
        current_role = profile.current_role,
        current_company = profile.company,
        years = profile.years_experience,
        skills = join_first(&profile.core_skills, 8),
        brands = join_first(&profile.brands_managed, 3),
        email = profile.email,
        phone = profile.phone,
        excerpt = crate::analysis::validate::truncate_chars(jd_text, DRAFT_JD_CHARS),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::requirements::extract_requirements;

    fn profile() -> CandidateProfile {
        CandidateProfile::default()
    }

    #[test]
    fn test_letter_contains_interpolations() {
        let reqs = JdRequirements::default();
        let letter = build_cover_letter(
            &profile(),
            &reqs,
            JdCategory::General,
            "Acme",
            "Media Planner",
            "Roma",
        );
        assert!(letter.contains("Acme"));
        assert!(letter.contains("Media Planner"));
        assert!(letter.contains("Roma"));
        assert!(letter.contains(&profile().name));
        assert!(letter.contains(&profile().email));
    }

    #[test]
    fn test_creative_category_selects_creative_paragraph() {
        let letter = build_cover_letter(
            &profile(),
            &JdRequirements::default(),
            JdCategory::Creative,
            "Acme",
            "Art Director",
            "Milano",
        );
        assert!(letter.contains("contenuti digitali multi-canale"));
        assert!(!letter.contains("roadmap strategica"));
    }

    #[test]
    fn test_product_category_selects_product_paragraph() {
        let letter = build_cover_letter(
            &profile(),
            &JdRequirements::default(),
            JdCategory::Product,
            "Acme",
            "Product Manager",
            "Milano",
        );
        assert!(letter.contains("roadmap strategica"));
    }

    #[test]
    fn test_tools_paragraph_only_when_tools_detected() {
        let with_tools = extract_requirements("Richiesto Excel e Power BI");
        let letter = build_cover_letter(
            &profile(),
            &with_tools,
            JdCategory::General,
            "Acme",
            "Analyst",
            "Roma",
        );
        assert!(letter.contains("Ho solida padronanza di excel, power bi"));

        let without = JdRequirements::default();
        let letter = build_cover_letter(
            &profile(),
            &without,
            JdCategory::General,
            "Acme",
            "Analyst",
            "Roma",
        );
        assert!(!letter.contains("Ho solida padronanza"));
    }

    #[test]
    fn test_generic_paragraph_falls_back_to_default_tools() {
        let letter = build_cover_letter(
            &profile(),
            &JdRequirements::default(),
            JdCategory::Analytics,
            "Acme",
            "Analyst",
            "Roma",
        );
        assert!(letter.contains("Google Analytics 4, Power BI e Looker Studio"));
    }

    #[tokio::test]
    async fn test_draft_without_llm_uses_template() {
        let (letter, source) = draft_or_template(
            None,
            &profile(),
            &JdRequirements::default(),
            JdCategory::General,
            "Acme",
            "Analyst",
            "Roma",
            "jd text",
        )
        .await;
        assert_eq!(source, LetterSource::Template);
        assert!(letter.contains("Acme"));
    }

    #[test]
    fn test_draft_prompt_carries_profile_and_jd() {
        let prompt = build_draft_prompt(&profile(), "Acme", "Analyst", "Roma", "JD body here");
        assert!(prompt.contains("Acme"));
        assert!(prompt.contains("JD body here"));
        assert!(prompt.contains(&profile().name));
    }
}
