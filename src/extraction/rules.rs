// src/extraction/rules.rs
//! Selector, pattern and keyword tables for job posting extraction.

use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;
use tracing::warn;

use super::cascade::StrategySpec::{Pattern, Selector as Css};
use super::cascade::{Cascade, StrategySpec};
use super::{Industry, JobType};

pub const UNKNOWN_TITLE: &str = "Unknown Position";
pub const UNKNOWN_COMPANY: &str = "Company Name Not Found";

pub const DESCRIPTION_FALLBACK_LIMIT: usize = 2000;
pub const MAX_REQUIREMENTS: usize = 10;

/// Capitalised phrases the company patterns pick up from calls to action.
pub const COMPANY_FALSE_POSITIVES: [&str; 3] = ["Apply Now", "Click Here", "More Info"];

const TITLE_TABLE: &[StrategySpec] = &[
    Css(r#"h1[data-automation="job-detail-title"]"#), // SEEK
    Css("h1.jobsearch-JobInfoHeader-title"),          // Indeed
    Css(".job-title h1"),
    Css(".job-header h1"),
    Css("h1"),
    Css(r#"[data-testid="job-title"]"#),
];

const COMPANY_TABLE: &[StrategySpec] = &[
    Css(r#"[data-automation="advertiser-name"]"#), // SEEK
    Css(".company-name"),
    Css(".employer-name"),
    Css(r#"[data-testid="company-name"]"#),
    Css(".company a"),
];

/// Fallback when no company node exists: labelled or capitalised phrases in the page text.
const COMPANY_TEXT_TABLE: &[StrategySpec] = &[
    Pattern {
        regex: r"(?:Company|Employer|Organization):\s*([A-Z][a-zA-Z &'.]+)",
        group: 1,
    },
    Pattern {
        regex: r"(?:\bat|@)\s+([A-Z][a-zA-Z\s&'.]+?)(?:\s|$)",
        group: 1,
    },
    Pattern {
        regex: r"([A-Z][a-zA-Z &'.]{2,30})\s+(?:is hiring|seeks|looking for)",
        group: 1,
    },
];

const DESCRIPTION_TABLE: &[StrategySpec] = &[
    Css(r#"[data-automation="jobAdDetails"]"#),
    Css(".job-description"),
    Css(".jobsearch-jobDescriptionText"),
    Css(".job-details"),
    Css(".description"),
];

const DESCRIPTION_CONTAINERS: [&str; 2] = ["article", "main"];

const LOCATION_TABLE: &[StrategySpec] = &[
    Css(r#"[data-automation="job-detail-location"]"#),
    Css(".location"),
    Css(".job-location"),
    Css(r#"[data-testid="location"]"#),
];

const SALARY_TABLE: &[StrategySpec] = &[
    Pattern {
        regex: r"(?i)\$[\d,]+(?:\s*-\s*\$[\d,]+)?(?:\s*(?:per\s+year|annually|pa)\b)?",
        group: 0,
    },
    Pattern {
        regex: r"(?i)\b[\d,]+k?\s*-\s*[\d,]+k?\s*(?:per\s+year|annually|pa)\b",
        group: 0,
    },
    Pattern {
        regex: r"(?im)(?:^\s*salary\s*:?|\bsalary:)\s*([^.\n]+)",
        group: 1,
    },
];

const REQUIREMENT_PATTERNS: [&str; 3] = [
    r"(?i)(?:requirements?|qualifications?|skills?|must have)[:\s]*([^.]+)",
    r"(?i)(?:you will need|we are looking for|ideal candidate)[:\s]*([^.]+)",
    r"(?i)(?:essential|required|mandatory)[:\s]*([^.]+)",
];

/// List items and paragraphs mentioning one of these read as requirements.
pub const REQUIREMENT_KEYWORDS: [&str; 5] =
    ["experience", "skill", "knowledge", "degree", "certification"];

const JOB_TYPE_PATTERN: &str = r"\b(full-time|part-time|contract|temporary|permanent|casual)\b";

/// Industry keyword lists, in priority order. Keywords are lower case and
/// matched as substrings of the lower-cased page text.
pub const INDUSTRY_KEYWORDS: [(Industry, &[&str]); 5] = [
    (
        Industry::Technology,
        &["software", "tech", "digital", "computer"],
    ),
    (
        Industry::Finance,
        &["bank", "finance", "investment", "accounting"],
    ),
    (
        Industry::Healthcare,
        &["health", "medical", "hospital", "pharmaceutical"],
    ),
    (
        Industry::Education,
        &["university", "school", "education", "academic"],
    ),
    (Industry::Retail, &["retail", "store", "shop", "commerce"]),
];

pub static TITLE_CASCADE: LazyLock<Cascade> =
    LazyLock::new(|| Cascade::compile("title", TITLE_TABLE));
pub static COMPANY_CASCADE: LazyLock<Cascade> =
    LazyLock::new(|| Cascade::compile("company", COMPANY_TABLE));
pub static COMPANY_TEXT_CASCADE: LazyLock<Cascade> =
    LazyLock::new(|| Cascade::compile("company text", COMPANY_TEXT_TABLE));
pub static DESCRIPTION_CASCADE: LazyLock<Cascade> =
    LazyLock::new(|| Cascade::compile("description", DESCRIPTION_TABLE));
pub static LOCATION_CASCADE: LazyLock<Cascade> =
    LazyLock::new(|| Cascade::compile("location", LOCATION_TABLE));
pub static SALARY_CASCADE: LazyLock<Cascade> =
    LazyLock::new(|| Cascade::compile("salary", SALARY_TABLE));

pub static TITLE_SUFFIX: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile_regex(r"(?i)\s*[-|]\s*(Jobs?|Careers?|Hiring).*$"));

pub static REQUIREMENT_REGEXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    REQUIREMENT_PATTERNS
        .iter()
        .filter_map(|pattern| compile_regex(pattern))
        .collect()
});

pub static JOB_TYPE_REGEX: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile_regex(JOB_TYPE_PATTERN));

pub static DESCRIPTION_CONTAINER_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    DESCRIPTION_CONTAINERS
        .iter()
        .filter_map(|css| compile_selector(css))
        .collect()
});

pub static REQUIREMENT_NODE_SELECTOR: LazyLock<Option<Selector>> =
    LazyLock::new(|| compile_selector("li, p"));

impl JobType {
    pub(crate) fn from_token(token: &str) -> Option<Self> {
        match token {
            "full-time" => Some(JobType::FullTime),
            "part-time" => Some(JobType::PartTime),
            "contract" => Some(JobType::Contract),
            "temporary" => Some(JobType::Temporary),
            "permanent" => Some(JobType::Permanent),
            "casual" => Some(JobType::Casual),
            _ => None,
        }
    }
}

fn compile_regex(pattern: &str) -> Option<Regex> {
    Regex::new(pattern)
        .map_err(|e| warn!("Invalid extraction pattern {:?}: {}", pattern, e))
        .ok()
}

fn compile_selector(css: &str) -> Option<Selector> {
    Selector::parse(css)
        .map_err(|e| warn!("Invalid extraction selector {:?}: {}", css, e))
        .ok()
}
