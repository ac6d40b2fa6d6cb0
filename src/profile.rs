// src/profile.rs
use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Experience years must be between 0 and 50, got {0}")]
    ExperienceOutOfRange(i32),

    #[error("At least one skill is required")]
    NoSkills,

    #[error("Job URL must be an absolute http(s) URL: {0}")]
    InvalidJobUrl(String),

    #[error("Invalid application id: {0}")]
    InvalidApplicationId(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub experience_years: i32,
    pub degree: String,
    pub skills: Vec<String>,
    #[serde(default)]
    pub previous_roles: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
    pub linkedin_url: Option<String>,
    pub portfolio_url: Option<String>,
}

impl UserProfile {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("name", &self.name),
            ("phone", &self.phone),
            ("degree", &self.degree),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::EmptyField(field));
            }
        }

        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail(self.email.clone()));
        }

        if !(0..=50).contains(&self.experience_years) {
            return Err(ValidationError::ExperienceOutOfRange(self.experience_years));
        }

        if self.skills.iter().all(|skill| skill.trim().is_empty()) {
            return Err(ValidationError::NoSkills);
        }

        Ok(())
    }
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.trim().split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !domain.contains(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

/// Parse and check a job posting URL.
pub fn validate_job_url(raw: &str) -> Result<Url, ValidationError> {
    match Url::parse(raw.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => Ok(url),
        _ => Err(ValidationError::InvalidJobUrl(raw.to_string())),
    }
}

fn default_style() -> String {
    "professional".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobApplicationRequest {
    pub job_url: String,
    pub user_profile: UserProfile,
    #[serde(default = "default_style")]
    pub cover_letter_style: String,
    #[serde(default)]
    pub include_salary_expectation: bool,
    pub custom_message: Option<String>,
}

impl JobApplicationRequest {
    pub fn validate(&self) -> Result<Url, ValidationError> {
        let url = validate_job_url(&self.job_url)?;
        self.user_profile.validate()?;
        Ok(url)
    }
}

#[cfg(test)]
pub(crate) fn sample_profile() -> UserProfile {
    UserProfile {
        name: "Jane Citizen".to_string(),
        email: "jane@example.com".to_string(),
        phone: "+61 400 000 000".to_string(),
        experience_years: 6,
        degree: "Bachelor of Computer Science".to_string(),
        skills: vec![
            "Rust".to_string(),
            "PostgreSQL".to_string(),
            "Kubernetes".to_string(),
            "Terraform".to_string(),
        ],
        previous_roles: vec!["Backend Engineer".to_string(), "SRE".to_string()],
        achievements: vec!["Cut p99 latency by 40%".to_string()],
        linkedin_url: Some("https://linkedin.com/in/jane".to_string()),
        portfolio_url: None,
    }
}
