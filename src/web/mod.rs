// src/web/mod.rs
pub mod handlers;
pub mod types;

pub use handlers::*;
pub use types::*;

use crate::profile::JobApplicationRequest;
use crate::service::{ApplicationGenerator, ApplicationResponse};
use anyhow::{anyhow, Result};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::{
    catchers, delete, get, options, post, routes, Build, Request, Response, Rocket, State,
};
use tracing::info;

const INDEX_PAGE: &str = include_str!("../../static/index.html");

pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, DELETE, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[get("/")]
pub fn index() -> RawHtml<&'static str> {
    RawHtml(INDEX_PAGE)
}

#[get("/health")]
pub fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[post("/generate-application", data = "<request>")]
pub async fn generate_application(
    request: Json<JobApplicationRequest>,
    generator: &State<ApplicationGenerator>,
) -> Result<Json<ApplicationResponse>, ApiError> {
    handlers::generate_application_handler(request, generator).await
}

#[get("/job-preview?<url>")]
pub async fn job_preview(
    url: Option<String>,
    generator: &State<ApplicationGenerator>,
) -> Result<Json<PreviewResponse>, ApiError> {
    handlers::job_preview_handler(url, generator).await
}

#[get("/download/<id>/cover-letter")]
pub async fn download_cover_letter(
    id: &str,
    generator: &State<ApplicationGenerator>,
) -> Result<TextFileResponse, ApiError> {
    handlers::download_cover_letter_handler(id, generator).await
}

#[get("/applications")]
pub async fn list_applications(
    generator: &State<ApplicationGenerator>,
) -> Result<Json<ApplicationsResponse>, ApiError> {
    handlers::list_applications_handler(generator).await
}

#[delete("/applications/<id>")]
pub async fn delete_application(
    id: &str,
    generator: &State<ApplicationGenerator>,
) -> Result<Json<DeleteResponse>, ApiError> {
    handlers::delete_application_handler(id, generator).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

#[rocket::catch(400)]
pub fn bad_request() -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        "Invalid request format",
        "BAD_REQUEST",
        &[
            "Check your request JSON format",
            "Verify all required fields are present",
        ],
    ))
}

#[rocket::catch(404)]
pub fn not_found() -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        "Resource not found",
        "NOT_FOUND",
        &["Check the endpoint path"],
    ))
}

#[rocket::catch(422)]
pub fn unprocessable_entity() -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        "Request body could not be processed",
        "UNPROCESSABLE_ENTITY",
        &[
            "Send job_url and user_profile as JSON",
            "Check field types, e.g. experience_years must be a number",
        ],
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        "Internal server error",
        "INTERNAL_ERROR",
        &[
            "Try again in a few moments",
            "Contact support if the problem persists",
        ],
    ))
}

pub fn build_rocket(generator: ApplicationGenerator) -> Rocket<Build> {
    rocket::build()
        .attach(Cors)
        .manage(generator)
        .register(
            "/",
            catchers![bad_request, not_found, unprocessable_entity, internal_error],
        )
        .mount("/", routes![index, options])
        .mount(
            "/api",
            routes![
                health,
                generate_application,
                job_preview,
                download_cover_letter,
                list_applications,
                delete_application,
            ],
        )
}

pub async fn start_web_server(generator: ApplicationGenerator, port: u16) -> Result<()> {
    info!("Starting job application API server");
    info!("Applications: {}", generator.store().dir().display());
    info!("Server: http://0.0.0.0:{}", port);

    let figment = rocket::Config::figment()
        .merge(("port", port))
        .merge(("address", "0.0.0.0"));

    let _rocket = build_rocket(generator)
        .configure(figment)
        .launch()
        .await
        .map_err(|e| anyhow!("Web server failed: {}", e))?;

    Ok(())
}
