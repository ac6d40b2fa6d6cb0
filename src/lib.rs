pub mod cli;
pub mod cover_letter;
pub mod environment;
pub mod extraction;
pub mod fetch;
pub mod logging;
pub mod profile;
pub mod service;
pub mod store;
pub mod web;

pub use cover_letter::{CoverLetterGenerator, CoverLetterStyle, LetterOptions};
pub use environment::EnvironmentConfig;
pub use extraction::{extract_job_details, Industry, JobDetails, JobType, ParsedDocument};
pub use fetch::{FetchError, HtmlCache, JobFetcher};
pub use profile::{JobApplicationRequest, UserProfile, ValidationError};
pub use service::{ApplicationGenerator, ApplicationResponse, GenerateError};
pub use store::{ApplicationMetadata, ApplicationStore, ApplicationSummary};
pub use web::{build_rocket, start_web_server};
