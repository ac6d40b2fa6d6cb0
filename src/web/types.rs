// src/web/types.rs
use rocket::http::{ContentType, Status};
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::serde::Serialize;
use rocket::{Request, Response};
use uuid::Uuid;

use crate::extraction::JobDetails;
use crate::profile::ValidationError;
use crate::service::GenerateError;
use crate::store::ApplicationSummary;

pub struct TextFileResponse {
    pub content: String,
    pub filename: String,
}

impl<'r> Responder<'r, 'static> for TextFileResponse {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        Response::build()
            .header(ContentType::Plain)
            .raw_header(
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", self.filename),
            )
            .sized_body(self.content.len(), std::io::Cursor::new(self.content))
            .ok()
    }
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, error_code: &str, suggestions: &[&str]) -> Self {
        Self {
            success: false,
            error: error.into(),
            error_code: error_code.to_string(),
            suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Error body with the status it is sent under.
#[derive(Debug)]
pub struct ApiError {
    pub status: Status,
    pub body: ErrorResponse,
}

impl ApiError {
    pub fn validation(error: &ValidationError) -> Self {
        let (code, suggestions): (&str, &[&str]) = match error {
            ValidationError::InvalidJobUrl(_) => (
                "INVALID_JOB_URL",
                &["Provide the full http(s) address of the job posting"],
            ),
            ValidationError::InvalidApplicationId(_) => (
                "INVALID_APPLICATION_ID",
                &["Use an application_id returned by /api/generate-application"],
            ),
            _ => (
                "VALIDATION_ERROR",
                &["Check the user_profile fields and try again"],
            ),
        };
        Self {
            status: Status::BadRequest,
            body: ErrorResponse::new(error.to_string(), code, suggestions),
        }
    }

    pub fn fetch_failed() -> Self {
        Self {
            status: Status::BadRequest,
            body: ErrorResponse::new(
                "Failed to fetch job posting",
                "FETCH_FAILED",
                &[
                    "Check that the job URL is publicly reachable",
                    "Try again later if the site is rate limiting",
                ],
            ),
        }
    }

    pub fn not_found(id: Uuid) -> Self {
        Self {
            status: Status::NotFound,
            body: ErrorResponse::new(
                format!("Application not found: {}", id),
                "NOT_FOUND",
                &["List existing applications with GET /api/applications"],
            ),
        }
    }

    pub fn internal(error: &anyhow::Error) -> Self {
        Self {
            status: Status::InternalServerError,
            body: ErrorResponse::new(
                format!("{:#}", error),
                "INTERNAL_ERROR",
                &["Try again in a few moments"],
            ),
        }
    }
}

impl From<GenerateError> for ApiError {
    fn from(error: GenerateError) -> Self {
        match error {
            GenerateError::Validation(e) => ApiError::validation(&e),
            GenerateError::FetchFailed => ApiError::fetch_failed(),
            GenerateError::Internal(e) => ApiError::internal(&e),
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        (self.status, Json(self.body)).respond_to(request)
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct PreviewResponse {
    pub success: bool,
    pub job_details: JobDetails,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ApplicationsResponse {
    pub success: bool,
    pub count: usize,
    pub applications: Vec<ApplicationSummary>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
    pub deleted_files: Vec<String>,
}
