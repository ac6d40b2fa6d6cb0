// src/extraction/mod.rs
//! Heuristic job posting extraction.
//!
//! Every field comes from an ordered cascade of CSS selectors and text
//! patterns over one parsed document. Extraction never fails: a field with no
//! hit degrades to a placeholder (title, company) or to `None`.

pub mod cascade;
pub mod document;
pub mod extractors;
pub mod rules;

pub use document::ParsedDocument;
pub use extractors::*;

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDetails {
    pub company_name: String,
    pub job_title: String,
    pub job_description: String,
    pub requirements: Vec<String>,
    pub salary_range: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<JobType>,
    pub industry: Option<Industry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Temporary,
    Permanent,
    Casual,
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Contract => "Contract",
            JobType::Temporary => "Temporary",
            JobType::Permanent => "Permanent",
            JobType::Casual => "Casual",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Industry {
    Technology,
    Finance,
    Healthcare,
    Education,
    Retail,
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Industry::Technology => "Technology",
            Industry::Finance => "Finance",
            Industry::Healthcare => "Healthcare",
            Industry::Education => "Education",
            Industry::Retail => "Retail",
        };
        f.write_str(label)
    }
}

/// Run every sub-extractor over `document`.
pub fn extract(document: &ParsedDocument) -> JobDetails {
    let job_title = extract_title(document);
    let company_name = extract_company_name(document);
    let job_description = extract_description(document);
    let requirements = extract_requirements(document, &job_description);
    let salary_range = extract_salary(document);
    let location = extract_location(document);
    let job_type = extract_job_type(document);
    let industry = extract_industry(document, &company_name);

    debug!(
        "Extracted {} requirements, salary: {:?}, location: {:?}, type: {:?}, industry: {:?}",
        requirements.len(),
        salary_range,
        location,
        job_type,
        industry
    );

    JobDetails {
        company_name,
        job_title,
        job_description,
        requirements,
        salary_range,
        location,
        job_type,
        industry,
    }
}

/// Parse `html` and extract. `source_url` is only used for logging.
pub fn extract_job_details(html: &str, source_url: &str) -> JobDetails {
    let document = ParsedDocument::parse(html);
    let details = extract(&document);

    info!(
        "Extracted job from {}: {} at {}",
        source_url, details.job_title, details.company_name
    );

    details
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_labels_serialize_as_displayed() {
        let json = serde_json::to_string(&JobType::PartTime).unwrap();
        assert_eq!(json, "\"Part-time\"");
        let json = serde_json::to_string(&Industry::Finance).unwrap();
        assert_eq!(json, "\"Finance\"");
    }

    #[test]
    fn empty_input_degrades_to_placeholders() {
        let details = extract_job_details("", "https://example.com/empty");
        assert_eq!(details.job_title, rules::UNKNOWN_TITLE);
        assert_eq!(details.company_name, rules::UNKNOWN_COMPANY);
        assert_eq!(details.job_description, "");
        assert!(details.requirements.is_empty());
        assert_eq!(details.salary_range, None);
        assert_eq!(details.location, None);
        assert_eq!(details.job_type, None);
        assert_eq!(details.industry, None);
    }

    #[test]
    fn malformed_markup_is_tolerated() {
        let details = extract_job_details(
            "<div><h1>Broken <b>Title</h1><p>unclosed <li>Degree in computer science required",
            "https://example.com/broken",
        );
        assert_eq!(details.job_title, "Broken Title");
        assert_eq!(details.industry, Some(Industry::Technology));
    }
}
