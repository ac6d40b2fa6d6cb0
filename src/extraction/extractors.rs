// src/extraction/extractors.rs
//! One function per `JobDetails` field. Each one terminates in a placeholder
//! or `None`; none of them can fail.

use std::collections::HashSet;

use super::document::ParsedDocument;
use super::rules::*;
use super::{Industry, JobType};

/// Longest requirement line kept from either extraction pass.
const MAX_REQUIREMENT_LEN: usize = 200;

pub fn extract_title(document: &ParsedDocument) -> String {
    TITLE_CASCADE
        .first_text(document)
        .or_else(|| document.page_title().map(|title| strip_title_suffix(&title)))
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| UNKNOWN_TITLE.to_string())
}

/// "Rust Engineer - Jobs at Acme" -> "Rust Engineer"
pub fn strip_title_suffix(title: &str) -> String {
    match TITLE_SUFFIX.as_ref() {
        Some(suffix) => suffix.replace_all(title, "").trim().to_string(),
        None => title.trim().to_string(),
    }
}

pub fn extract_company_name(document: &ParsedDocument) -> String {
    COMPANY_CASCADE
        .first_text(document)
        .or_else(|| COMPANY_TEXT_CASCADE.first_match(document, is_plausible_company))
        .unwrap_or_else(|| UNKNOWN_COMPANY.to_string())
}

fn is_plausible_company(candidate: &str) -> bool {
    candidate.chars().count() > 2 && !COMPANY_FALSE_POSITIVES.contains(&candidate)
}

pub fn extract_description(document: &ParsedDocument) -> String {
    // A matched description node wins even when it is empty.
    if let Some(description) = DESCRIPTION_CASCADE.first_match(document, |_| true) {
        return description;
    }

    let text = DESCRIPTION_CONTAINER_SELECTORS
        .iter()
        .find_map(|selector| document.select_first(selector))
        .map(|container| ParsedDocument::element_text(container, " "))
        .unwrap_or_else(|| document.full_text(" "));

    text.chars().take(DESCRIPTION_FALLBACK_LIMIT).collect()
}

/// Labelled requirement sentences from `description`, then requirement-like
/// list items and paragraphs, de-duplicated and capped.
pub fn extract_requirements(document: &ParsedDocument, description: &str) -> Vec<String> {
    let labelled = REQUIREMENT_REGEXES
        .iter()
        .flat_map(|re| re.captures_iter(description))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|text| {
            let len = text.chars().count();
            len > 10 && len <= MAX_REQUIREMENT_LEN
        });

    let structural: Vec<String> = match REQUIREMENT_NODE_SELECTOR.as_ref() {
        Some(selector) => document
            .select_all(selector)
            .map(|element| ParsedDocument::element_text(element, " "))
            .filter(|text| {
                let len = text.chars().count();
                len > 20 && len < MAX_REQUIREMENT_LEN && mentions_requirement(text)
            })
            .collect(),
        None => Vec::new(),
    };

    dedup_capped(labelled.chain(structural), MAX_REQUIREMENTS)
}

fn mentions_requirement(text: &str) -> bool {
    let lower = text.to_lowercase();
    REQUIREMENT_KEYWORDS
        .iter()
        .any(|keyword| lower.contains(keyword))
}

/// Keeps the first spelling of each entry; entries differing only in case or
/// spacing count as duplicates.
fn dedup_capped(candidates: impl IntoIterator<Item = String>, limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut kept = Vec::new();

    for candidate in candidates {
        if kept.len() == limit {
            break;
        }
        let key = candidate
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        if seen.insert(key) {
            kept.push(candidate);
        }
    }

    kept
}

pub fn extract_salary(document: &ParsedDocument) -> Option<String> {
    SALARY_CASCADE.first_text(document)
}

pub fn extract_location(document: &ParsedDocument) -> Option<String> {
    LOCATION_CASCADE.first_text(document)
}

pub fn extract_job_type(document: &ParsedDocument) -> Option<JobType> {
    let re = JOB_TYPE_REGEX.as_ref()?;
    let text = document.visible_text().to_lowercase();
    re.captures(&text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| JobType::from_token(m.as_str()))
}

pub fn extract_industry(document: &ParsedDocument, company_name: &str) -> Option<Industry> {
    let haystack = format!("{} {}", document.visible_text(), company_name).to_lowercase();
    INDUSTRY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| haystack.contains(keyword)))
        .map(|(industry, _)| *industry)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(html: &str) -> ParsedDocument {
        ParsedDocument::parse(html)
    }

    #[test]
    fn title_prefers_site_specific_selector() {
        let d = doc(r#"<h1>Generic</h1><h1 data-automation="job-detail-title">Data Engineer</h1>"#);
        assert_eq!(extract_title(&d), "Data Engineer");
    }

    #[test]
    fn title_from_test_id_attribute() {
        let d = doc(r#"<div data-testid="job-title">Staff Engineer</div>"#);
        assert_eq!(extract_title(&d), "Staff Engineer");
    }

    #[test]
    fn title_falls_back_to_page_title_without_suffix() {
        let d = doc("<title>Platform Engineer | Careers at Initech</title><p>body</p>");
        assert_eq!(extract_title(&d), "Platform Engineer");
    }

    #[test]
    fn title_suffix_is_case_insensitive() {
        assert_eq!(strip_title_suffix("QA Lead - HIRING now"), "QA Lead");
        assert_eq!(strip_title_suffix("Front-End Developer"), "Front-End Developer");
    }

    #[test]
    fn title_placeholder_when_nothing_matches() {
        assert_eq!(extract_title(&doc("<p>nothing here</p>")), UNKNOWN_TITLE);
        assert_eq!(extract_title(&doc("<title> - Jobs</title>")), UNKNOWN_TITLE);
    }

    #[test]
    fn company_from_selector() {
        let d = doc(r#"<div class="company"><a href="/c">Globex</a></div>"#);
        assert_eq!(extract_company_name(&d), "Globex");
    }

    #[test]
    fn company_from_label() {
        let d = doc("<p>Employer: Wayne Enterprises</p>");
        assert_eq!(extract_company_name(&d), "Wayne Enterprises");
    }

    #[test]
    fn company_from_at_phrase() {
        let d = doc("<p>Join the team at Hooli today</p>");
        assert_eq!(extract_company_name(&d), "Hooli");
    }

    #[test]
    fn company_from_at_sign() {
        let d = doc("<p>Send your CV @ Initech today</p>");
        assert_eq!(extract_company_name(&d), "Initech");
    }

    #[test]
    fn company_from_seeks_phrase() {
        let d = doc("<p>Initrode seeks a data analyst</p>");
        assert_eq!(extract_company_name(&d), "Initrode");
    }

    #[test]
    fn company_from_looking_for_phrase() {
        let d = doc("<p>Vandelay Industries looking for importers</p>");
        assert_eq!(extract_company_name(&d), "Vandelay Industries");
    }

    #[test]
    fn company_rejects_false_positives() {
        let d = doc("<p>Company: Apply Now</p>");
        assert_eq!(extract_company_name(&d), UNKNOWN_COMPANY);
    }

    #[test]
    fn description_uses_first_matching_selector() {
        let d = doc(
            r#"<div class="description">Second</div><div class="job-description"><p>First</p><p>part</p></div>"#,
        );
        assert_eq!(extract_description(&d), "First part");
    }

    #[test]
    fn description_falls_back_to_main_then_document() {
        let d = doc("<main>Main text</main><p>outside</p>");
        assert_eq!(extract_description(&d), "Main text");

        let d = doc("<p>just</p><p>paragraphs</p>");
        assert_eq!(extract_description(&d), "just paragraphs");
    }

    #[test]
    fn requirements_combine_both_passes() {
        let d = doc(
            "<ul><li>Strong knowledge of distributed systems</li><li>short skill</li></ul>",
        );
        let reqs = extract_requirements(&d, "Must have: a valid driver licence. Nice extras.");
        assert!(reqs.contains(&"a valid driver licence".to_string()));
        assert!(reqs.contains(&"Strong knowledge of distributed systems".to_string()));
        assert_eq!(reqs.len(), 2);
    }

    #[test]
    fn requirements_drop_duplicates_and_cap_at_ten() {
        let items: String = (0..15)
            .map(|i| format!("<li>At least {} years of industry experience</li>", i))
            .chain(std::iter::once(
                "<li>At least 0 years of industry  EXPERIENCE</li>".to_string(),
            ))
            .collect();
        let reqs = extract_requirements(&doc(&format!("<ul>{}</ul>", items)), "");
        assert_eq!(reqs.len(), 10);
        let unique: HashSet<_> = reqs.iter().map(|r| r.to_lowercase()).collect();
        assert_eq!(unique.len(), reqs.len());
    }

    #[test]
    fn salary_patterns_in_order() {
        let d = doc("<p>Package: $120,000 - $140,000 per year plus super</p>");
        assert_eq!(
            extract_salary(&d).as_deref(),
            Some("$120,000 - $140,000 per year")
        );

        let d = doc("<p>Paying 90k - 110k annually</p>");
        assert_eq!(extract_salary(&d).as_deref(), Some("90k - 110k annually"));

        let d = doc("<dt>Salary</dt><dd>Competitive, negotiable</dd>");
        assert_eq!(extract_salary(&d).as_deref(), Some("Competitive, negotiable"));

        let d = doc("<p>Base salary: 95k DOE</p>");
        assert_eq!(extract_salary(&d).as_deref(), Some("95k DOE"));

        assert_eq!(extract_salary(&doc("<p>No money talk</p>")), None);
        assert_eq!(
            extract_salary(&doc("<p>We offer a competitive salary and benefits</p>")),
            None
        );
    }

    #[test]
    fn location_requires_structural_hook() {
        let d = doc(r#"<span class="job-location">Sydney NSW</span>"#);
        assert_eq!(extract_location(&d).as_deref(), Some("Sydney NSW"));
        assert_eq!(extract_location(&doc("<p>Location: Perth</p>")), None);

        let d = doc(r#"<div data-testid="location">Brisbane QLD</div>"#);
        assert_eq!(extract_location(&d).as_deref(), Some("Brisbane QLD"));
    }

    #[test]
    fn job_type_is_normalised() {
        let d = doc("<p>This is a FULL-TIME role</p>");
        assert_eq!(extract_job_type(&d), Some(JobType::FullTime));
        assert_eq!(JobType::FullTime.to_string(), "Full-time");
        assert_eq!(extract_job_type(&doc("<p>contractor wanted</p>")), None);
    }

    #[test]
    fn industry_uses_company_name_too() {
        let d = doc("<p>Nothing specific</p>");
        assert_eq!(
            extract_industry(&d, "Northside Hospital"),
            Some(Industry::Healthcare)
        );
        assert_eq!(extract_industry(&d, "Acme"), None);
    }
}
