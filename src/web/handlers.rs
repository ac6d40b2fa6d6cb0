// src/web/handlers.rs
use crate::profile::JobApplicationRequest;
use crate::service::{ApplicationGenerator, ApplicationResponse};
use crate::store::parse_application_id;
use crate::web::types::*;

use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info, warn};

pub async fn generate_application_handler(
    request: Json<JobApplicationRequest>,
    generator: &State<ApplicationGenerator>,
) -> Result<Json<ApplicationResponse>, ApiError> {
    info!("Application requested for {}", request.job_url);

    match generator.generate(&request).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            warn!("Application for {} failed: {}", request.job_url, e);
            Err(e.into())
        }
    }
}

pub async fn job_preview_handler(
    url: Option<String>,
    generator: &State<ApplicationGenerator>,
) -> Result<Json<PreviewResponse>, ApiError> {
    let url = url.unwrap_or_default();
    let job_details = generator.preview(&url).await?;

    Ok(Json(PreviewResponse {
        success: true,
        job_details,
    }))
}

pub async fn download_cover_letter_handler(
    id: &str,
    generator: &State<ApplicationGenerator>,
) -> Result<TextFileResponse, ApiError> {
    let id = parse_application_id(id).map_err(|e| ApiError::validation(&e))?;

    let path = generator
        .store()
        .cover_letter_path(id)
        .ok_or_else(|| ApiError::not_found(id))?;

    let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
        error!("Failed to read {}: {}", path.display(), e);
        ApiError::internal(&e.into())
    })?;

    Ok(TextFileResponse {
        content,
        filename: format!("cover_letter_{}.txt", id),
    })
}

pub async fn list_applications_handler(
    generator: &State<ApplicationGenerator>,
) -> Result<Json<ApplicationsResponse>, ApiError> {
    let applications = generator.store().list().await.map_err(|e| {
        error!("Failed to list applications: {:#}", e);
        ApiError::internal(&e)
    })?;

    Ok(Json(ApplicationsResponse {
        success: true,
        count: applications.len(),
        applications,
    }))
}

pub async fn delete_application_handler(
    id: &str,
    generator: &State<ApplicationGenerator>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = parse_application_id(id).map_err(|e| ApiError::validation(&e))?;

    let deleted_files = generator.store().delete(id).await.map_err(|e| {
        error!("Failed to delete application {}: {:#}", id, e);
        ApiError::internal(&e)
    })?;

    if deleted_files.is_empty() {
        return Err(ApiError::not_found(id));
    }

    Ok(Json(DeleteResponse {
        success: true,
        message: format!("Application {} deleted", id),
        deleted_files,
    }))
}
