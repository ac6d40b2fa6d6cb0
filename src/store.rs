// src/store.rs
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};
use uuid::Uuid;

use crate::extraction::JobDetails;
use crate::profile::{UserProfile, ValidationError};

const COVER_LETTER_SUFFIX: &str = "_cover_letter.txt";
const METADATA_SUFFIX: &str = "_metadata.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationMetadata {
    pub application_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub job_details: JobDetails,
    pub user_profile: UserProfile,
    pub cover_letter_style: String,
    pub custom_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationSummary {
    pub application_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub company_name: String,
    pub job_title: String,
    pub applicant_name: String,
}

impl From<&ApplicationMetadata> for ApplicationSummary {
    fn from(metadata: &ApplicationMetadata) -> Self {
        Self {
            application_id: metadata.application_id,
            timestamp: metadata.timestamp,
            company_name: metadata.job_details.company_name.clone(),
            job_title: metadata.job_details.job_title.clone(),
            applicant_name: metadata.user_profile.name.clone(),
        }
    }
}

/// Accept only canonical UUIDs as application ids.
pub fn parse_application_id(raw: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ValidationError::InvalidApplicationId(raw.to_string()))
}

/// Generated cover letters and their metadata, flat in one directory.
#[derive(Debug, Clone)]
pub struct ApplicationStore {
    dir: PathBuf,
}

impl ApplicationStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn letter_file(&self, id: Uuid) -> PathBuf {
        self.dir.join(format!("{}{}", id, COVER_LETTER_SUFFIX))
    }

    fn metadata_file(&self, id: Uuid) -> PathBuf {
        self.dir.join(format!("{}{}", id, METADATA_SUFFIX))
    }

    /// Write both files; returns the cover letter path.
    pub async fn save(&self, metadata: &ApplicationMetadata, cover_letter: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create directory: {}", self.dir.display()))?;

        let letter_path = self.letter_file(metadata.application_id);
        fs::write(&letter_path, cover_letter)
            .await
            .with_context(|| format!("Failed to write file: {}", letter_path.display()))?;

        let metadata_path = self.metadata_file(metadata.application_id);
        let json = serde_json::to_string_pretty(metadata).context("Failed to serialize metadata")?;
        fs::write(&metadata_path, json)
            .await
            .with_context(|| format!("Failed to write file: {}", metadata_path.display()))?;

        info!(
            "Saved application {} for {} at {}",
            metadata.application_id, metadata.job_details.job_title, metadata.job_details.company_name
        );
        Ok(letter_path)
    }

    pub async fn load(&self, id: Uuid) -> Result<Option<ApplicationMetadata>> {
        let path = self.metadata_file(id);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        let metadata = serde_json::from_str(&content)
            .with_context(|| format!("Invalid metadata: {}", path.display()))?;
        Ok(Some(metadata))
    }

    /// Newest first. Unreadable metadata files are skipped.
    pub async fn list(&self) -> Result<Vec<ApplicationSummary>> {
        let mut summaries = Vec::new();

        if !self.dir.exists() {
            return Ok(summaries);
        }

        let mut entries = fs::read_dir(&self.dir)
            .await
            .with_context(|| format!("Failed to read directory: {}", self.dir.display()))?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_metadata = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(METADATA_SUFFIX));
            if !is_metadata {
                continue;
            }

            let parsed = fs::read_to_string(&path)
                .await
                .map_err(anyhow::Error::from)
                .and_then(|content| {
                    serde_json::from_str::<ApplicationMetadata>(&content).map_err(Into::into)
                });

            match parsed {
                Ok(metadata) => summaries.push(ApplicationSummary::from(&metadata)),
                Err(e) => warn!("Skipping unreadable metadata {}: {}", path.display(), e),
            }
        }

        summaries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(summaries)
    }

    /// Names of the removed files; empty when the application does not exist.
    pub async fn delete(&self, id: Uuid) -> Result<Vec<String>> {
        let mut deleted = Vec::new();

        for path in [self.letter_file(id), self.metadata_file(id)] {
            if !path.exists() {
                continue;
            }
            fs::remove_file(&path)
                .await
                .with_context(|| format!("Failed to remove file: {}", path.display()))?;
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                deleted.push(name.to_string());
            }
        }

        if !deleted.is_empty() {
            info!("Deleted application {}: {:?}", id, deleted);
        }
        Ok(deleted)
    }

    pub fn cover_letter_path(&self, id: Uuid) -> Option<PathBuf> {
        let path = self.letter_file(id);
        path.exists().then_some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::sample_profile;
    use chrono::Duration;
    use tempfile::TempDir;

    fn metadata(company: &str, minutes_ago: i64) -> ApplicationMetadata {
        ApplicationMetadata {
            application_id: Uuid::new_v4(),
            timestamp: Utc::now() - Duration::minutes(minutes_ago),
            job_details: JobDetails {
                company_name: company.to_string(),
                job_title: "Rust Engineer".to_string(),
                job_description: "Build things".to_string(),
                requirements: vec![],
                salary_range: None,
                location: None,
                job_type: None,
                industry: None,
            },
            user_profile: sample_profile(),
            cover_letter_style: "professional".to_string(),
            custom_message: None,
        }
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let store = ApplicationStore::new(temp.path().join("applications"));
        let record = metadata("Acme", 0);

        let letter_path = store.save(&record, "Dear Acme").await.unwrap();
        assert!(letter_path.ends_with(format!("{}_cover_letter.txt", record.application_id)));
        assert_eq!(std::fs::read_to_string(&letter_path).unwrap(), "Dear Acme");
        assert_eq!(store.cover_letter_path(record.application_id), Some(letter_path));

        let loaded = store.load(record.application_id).await.unwrap();
        assert_eq!(loaded, Some(record));
    }

    #[tokio::test]
    async fn test_list_newest_first_and_skips_garbage() {
        let temp = TempDir::new().unwrap();
        let store = ApplicationStore::new(temp.path());

        let older = metadata("Older Co", 30);
        let newer = metadata("Newer Co", 1);
        store.save(&older, "a").await.unwrap();
        store.save(&newer, "b").await.unwrap();
        std::fs::write(temp.path().join("broken_metadata.json"), "{ nope").unwrap();

        let listed = store.list().await.unwrap();
        let companies: Vec<_> = listed.iter().map(|s| s.company_name.as_str()).collect();
        assert_eq!(companies, vec!["Newer Co", "Older Co"]);
        assert_eq!(listed[0].applicant_name, "Jane Citizen");
    }

    #[tokio::test]
    async fn test_list_missing_directory_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = ApplicationStore::new(temp.path().join("absent"));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let temp = TempDir::new().unwrap();
        let store = ApplicationStore::new(temp.path());
        let record = metadata("Acme", 0);
        store.save(&record, "letter").await.unwrap();

        let deleted = store.delete(record.application_id).await.unwrap();
        assert_eq!(
            deleted,
            vec![
                format!("{}_cover_letter.txt", record.application_id),
                format!("{}_metadata.json", record.application_id),
            ]
        );
        assert!(store.delete(record.application_id).await.unwrap().is_empty());
        assert_eq!(store.cover_letter_path(record.application_id), None);
    }

    #[test]
    fn test_parse_application_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_application_id(&id.to_string()), Ok(id));
        assert!(parse_application_id("../../etc/passwd").is_err());
        assert!(parse_application_id("").is_err());
    }
}
