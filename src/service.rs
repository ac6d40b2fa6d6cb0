// src/service.rs
use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::cover_letter::{CoverLetterGenerator, CoverLetterStyle, LetterOptions};
use crate::extraction::{extract_job_details, JobDetails};
use crate::environment::EnvironmentConfig;
use crate::fetch::{HtmlCache, JobFetcher};
use crate::profile::{validate_job_url, JobApplicationRequest, ValidationError};
use crate::store::{ApplicationMetadata, ApplicationStore};

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to fetch job posting")]
    FetchFailed,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationResponse {
    pub success: bool,
    pub application_id: Uuid,
    pub company_name: String,
    pub job_title: String,
    pub cover_letter_path: PathBuf,
    pub message: String,
}

/// Fetch, extract, render and store, in that order.
pub struct ApplicationGenerator {
    fetcher: JobFetcher,
    letters: CoverLetterGenerator,
    store: ApplicationStore,
}

impl ApplicationGenerator {
    pub fn new(fetcher: JobFetcher, letters: CoverLetterGenerator, store: ApplicationStore) -> Self {
        Self {
            fetcher,
            letters,
            store,
        }
    }

    pub fn from_config(config: &EnvironmentConfig) -> Result<Self> {
        let cache = HtmlCache::new(&config.cache_path, config.cache_ttl());
        let fetcher = JobFetcher::new(&config.user_agent, config.fetch_timeout(), Some(cache))?;
        let letters = CoverLetterGenerator::load(config.templates_path.as_deref())?;
        let store = ApplicationStore::new(&config.output_path);

        Ok(Self::new(fetcher, letters, store))
    }

    pub fn store(&self) -> &ApplicationStore {
        &self.store
    }

    pub async fn generate(
        &self,
        request: &JobApplicationRequest,
    ) -> Result<ApplicationResponse, GenerateError> {
        let url = request.validate()?;

        let Some(html) = self.fetcher.fetch_html(url.as_str()).await else {
            warn!("No job posting retrieved from {}", url);
            return Err(GenerateError::FetchFailed);
        };

        let job_details = extract_job_details(&html, url.as_str());
        let style = CoverLetterStyle::parse(&request.cover_letter_style);
        let options = LetterOptions {
            custom_message: request.custom_message.clone(),
            include_salary_expectation: request.include_salary_expectation,
        };
        let cover_letter =
            self.letters
                .generate(&job_details, &request.user_profile, style, &options);

        let metadata = ApplicationMetadata {
            application_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            job_details,
            user_profile: request.user_profile.clone(),
            cover_letter_style: style.to_string(),
            custom_message: request.custom_message.clone(),
        };
        let cover_letter_path = self.store.save(&metadata, &cover_letter).await?;

        info!(
            "Generated {} cover letter {} for {}",
            style, metadata.application_id, metadata.user_profile.name
        );

        Ok(ApplicationResponse {
            success: true,
            application_id: metadata.application_id,
            company_name: metadata.job_details.company_name,
            job_title: metadata.job_details.job_title,
            cover_letter_path,
            message: "Application generated successfully".to_string(),
        })
    }

    pub async fn preview(&self, raw_url: &str) -> Result<JobDetails, GenerateError> {
        let url = validate_job_url(raw_url)?;

        let html = self
            .fetcher
            .fetch_html(url.as_str())
            .await
            .ok_or(GenerateError::FetchFailed)?;

        Ok(extract_job_details(&html, url.as_str()))
    }
}
