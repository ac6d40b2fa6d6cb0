// src/cover_letter.rs
use anyhow::{Context, Result};
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{info, warn};

use crate::extraction::JobDetails;
use crate::profile::UserProfile;

const PROFESSIONAL_TEMPLATE: &str = include_str!("../templates/cover_letters/professional.txt");
const CREATIVE_TEMPLATE: &str = include_str!("../templates/cover_letters/creative.txt");
const TECHNICAL_TEMPLATE: &str = include_str!("../templates/cover_letters/technical.txt");

static PLACEHOLDER: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\{\{(\w+)\}\}")
        .map_err(|e| warn!("Invalid placeholder pattern: {}", e))
        .ok()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoverLetterStyle {
    Professional,
    Creative,
    Technical,
}

impl CoverLetterStyle {
    pub const ALL: [CoverLetterStyle; 3] = [
        CoverLetterStyle::Professional,
        CoverLetterStyle::Creative,
        CoverLetterStyle::Technical,
    ];

    /// Unknown names fall back to `Professional`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "creative" => CoverLetterStyle::Creative,
            "technical" => CoverLetterStyle::Technical,
            _ => CoverLetterStyle::Professional,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CoverLetterStyle::Professional => "professional",
            CoverLetterStyle::Creative => "creative",
            CoverLetterStyle::Technical => "technical",
        }
    }

    fn builtin_template(&self) -> &'static str {
        match self {
            CoverLetterStyle::Professional => PROFESSIONAL_TEMPLATE,
            CoverLetterStyle::Creative => CREATIVE_TEMPLATE,
            CoverLetterStyle::Technical => TECHNICAL_TEMPLATE,
        }
    }
}

impl fmt::Display for CoverLetterStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default)]
pub struct LetterOptions {
    pub custom_message: Option<String>,
    pub include_salary_expectation: bool,
}

pub struct CoverLetterGenerator {
    templates: HashMap<CoverLetterStyle, String>,
}

impl Default for CoverLetterGenerator {
    fn default() -> Self {
        Self {
            templates: CoverLetterStyle::ALL
                .iter()
                .map(|style| (*style, style.builtin_template().to_string()))
                .collect(),
        }
    }
}

impl CoverLetterGenerator {
    /// Built-in templates, each replaced by `<dir>/<style>.txt` when that file exists.
    pub fn load(templates_dir: Option<&Path>) -> Result<Self> {
        let mut generator = Self::default();

        let Some(dir) = templates_dir else {
            return Ok(generator);
        };

        for style in CoverLetterStyle::ALL {
            let path = dir.join(format!("{}.txt", style.as_str()));
            if path.exists() {
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read template: {}", path.display()))?;
                info!("Using custom {} template from {}", style, path.display());
                generator.templates.insert(style, content);
            }
        }

        Ok(generator)
    }

    pub fn generate(
        &self,
        job: &JobDetails,
        profile: &UserProfile,
        style: CoverLetterStyle,
        options: &LetterOptions,
    ) -> String {
        let template = self
            .templates
            .get(&style)
            .map(String::as_str)
            .unwrap_or_else(|| style.builtin_template());

        let variables = Self::template_variables(job, profile, options);
        render_template(template, &variables)
    }

    fn template_variables(
        job: &JobDetails,
        profile: &UserProfile,
        options: &LetterOptions,
    ) -> HashMap<&'static str, String> {
        let custom_message = options
            .custom_message
            .as_deref()
            .map(str::trim)
            .filter(|message| !message.is_empty());

        let salary_note = match (options.include_salary_expectation, &job.salary_range) {
            (false, _) => String::new(),
            (true, Some(salary)) => format!(
                "I note the advertised salary of {}, which is in line with my expectations.",
                salary
            ),
            (true, None) => {
                "I would be happy to discuss salary expectations at a time that suits you."
                    .to_string()
            }
        };

        let previous_roles = profile.previous_roles.join(" and ");
        let has_roles = !profile.previous_roles.is_empty();

        let mut vars = HashMap::new();
        vars.insert("company_name", job.company_name.clone());
        vars.insert("job_title", job.job_title.clone());
        vars.insert("attraction_reason", attraction_reason(job));
        vars.insert("name", profile.name.clone());
        vars.insert("email", profile.email.clone());
        vars.insert("phone", profile.phone.clone());
        vars.insert("experience_years", profile.experience_years.to_string());
        vars.insert("degree", profile.degree.clone());
        vars.insert("skills", profile.skills.join(", "));
        vars.insert(
            "top_skills",
            profile
                .skills
                .iter()
                .take(3)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        );
        vars.insert("skill_bullets", bullets(&profile.skills));
        vars.insert("role_bullets", bullets(&profile.previous_roles));
        vars.insert("achievement_bullets", bullets(&profile.achievements));
        vars.insert(
            "previous_roles_clause",
            if has_roles {
                format!("In my previous roles as {}, ", previous_roles)
            } else {
                String::new()
            },
        );
        vars.insert(
            "previous_roles_bullet",
            if has_roles {
                format!("• Proven track record in {}", previous_roles)
            } else {
                String::new()
            },
        );
        vars.insert(
            "achievements_block",
            if profile.achievements.is_empty() {
                String::new()
            } else {
                format!(
                    "Some of my key achievements include:\n{}",
                    bullets(&profile.achievements)
                )
            },
        );
        vars.insert("salary_note", salary_note);
        vars.insert(
            "custom_message",
            custom_message.unwrap_or_default().to_string(),
        );
        vars.insert(
            "technical_note",
            custom_message
                .map(|message| format!("Technical Note: {}", message))
                .unwrap_or_default(),
        );
        vars.insert(
            "linkedin_line",
            labelled_line("LinkedIn", profile.linkedin_url.as_deref()),
        );
        vars.insert(
            "portfolio_line",
            labelled_line("Portfolio", profile.portfolio_url.as_deref()),
        );
        vars.insert(
            "portfolio_github_line",
            labelled_line("Portfolio/GitHub", profile.portfolio_url.as_deref()),
        );
        vars
    }
}

/// Why the applicant is drawn to the company, from what the posting revealed.
pub fn attraction_reason(job: &JobDetails) -> String {
    if let Some(industry) = job.industry {
        return format!("your reputation for innovation in the {}", industry);
    }

    let title = job.job_title.to_lowercase();
    if title.contains("senior") || title.contains("lead") {
        return format!("the challenging nature of the {} role", job.job_title);
    }

    "your company's commitment to excellence and growth".to_string()
}

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(|item| format!("• {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn labelled_line(label: &str, value: Option<&str>) -> String {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => format!("{}: {}", label, value),
        None => String::new(),
    }
}

/// One pass over `line`; inserted values are never scanned again. Unknown
/// keys are left as written.
fn substitute(line: &str, variables: &HashMap<&'static str, String>) -> String {
    let Some(placeholder) = PLACEHOLDER.as_ref() else {
        return line.to_string();
    };

    placeholder
        .replace_all(line, |caps: &Captures| match variables.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Substitute `{{key}}` placeholders line by line.
///
/// A template line whose placeholders all render empty is dropped, and runs
/// of blank lines collapse to one.
pub fn render_template(template: &str, variables: &HashMap<&'static str, String>) -> String {
    let mut lines: Vec<String> = Vec::new();

    for line in template.lines() {
        let rendered = substitute(line, variables);

        if line.contains("{{") && rendered.trim().is_empty() {
            continue;
        }

        let blank = rendered.trim().is_empty();
        if blank && lines.last().is_none_or(|last| last.trim().is_empty()) {
            continue;
        }
        lines.push(rendered.trim_end().to_string());
    }

    while lines.last().is_some_and(|last| last.is_empty()) {
        lines.pop();
    }

    let mut letter = lines.join("\n");
    letter.push('\n');
    letter
}
