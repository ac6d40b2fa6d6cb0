// src/cli.rs
use crate::environment::EnvironmentConfig;
use crate::extraction::extract_job_details;
use crate::profile::{JobApplicationRequest, UserProfile};
use crate::service::ApplicationGenerator;
use crate::store::parse_application_id;
use crate::web::start_web_server;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "jobapp")]
#[command(about = "Extract job postings and generate tailored cover letters")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Run the HTTP API server
    Serve,
    /// Fetch a job posting and print the extracted details
    Preview { url: String },
    /// Extract job details from a saved HTML file
    Extract {
        file: PathBuf,
        /// Source URL, used for logging only
        #[arg(long)]
        url: Option<String>,
    },
    /// Generate and store a cover letter
    Generate {
        #[arg(long)]
        url: String,
        /// JSON file holding the user profile
        #[arg(long)]
        profile: PathBuf,
        #[arg(long, default_value = "professional")]
        style: String,
        #[arg(long)]
        custom_message: Option<String>,
        #[arg(long)]
        include_salary: bool,
    },
    /// List stored applications, newest first
    List,
    /// Delete a stored application
    Delete { id: String },
}

pub async fn handle_command(command: Command, config: &EnvironmentConfig) -> Result<()> {
    if let Command::Extract { file, url } = &command {
        let html = tokio::fs::read_to_string(file)
            .await
            .with_context(|| format!("Failed to read file: {}", file.display()))?;
        let source = url
            .clone()
            .unwrap_or_else(|| format!("file://{}", file.display()));
        let details = extract_job_details(&html, &source);
        println!("{}", serde_json::to_string_pretty(&details)?);
        return Ok(());
    }

    config.ensure_directories().await?;
    let generator = ApplicationGenerator::from_config(config)?;

    match command {
        Command::Serve => start_web_server(generator, config.port).await?,

        Command::Preview { url } => {
            let details = generator.preview(&url).await?;
            println!("{}", serde_json::to_string_pretty(&details)?);
        }

        Command::Generate {
            url,
            profile,
            style,
            custom_message,
            include_salary,
        } => {
            let content = tokio::fs::read_to_string(&profile)
                .await
                .with_context(|| format!("Failed to read profile: {}", profile.display()))?;
            let user_profile: UserProfile = serde_json::from_str(&content)
                .with_context(|| format!("Invalid profile JSON: {}", profile.display()))?;

            let request = JobApplicationRequest {
                job_url: url,
                user_profile,
                cover_letter_style: style,
                include_salary_expectation: include_salary,
                custom_message,
            };

            let response = generator.generate(&request).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }

        Command::List => {
            let applications = generator.store().list().await?;
            if applications.is_empty() {
                println!("No applications found.");
            } else {
                println!(
                    "{:<38} {:<18} {:<25} {:<30}",
                    "ID", "Created", "Company", "Position"
                );
                println!("{}", "-".repeat(111));
                for app in applications {
                    println!(
                        "{:<38} {:<18} {:<25} {:<30}",
                        app.application_id,
                        app.timestamp.format("%Y-%m-%d %H:%M"),
                        app.company_name,
                        app.job_title
                    );
                }
            }
        }

        Command::Delete { id } => {
            let id = parse_application_id(&id)?;
            let deleted = generator.store().delete(id).await?;
            if deleted.is_empty() {
                anyhow::bail!("Application not found: {}", id);
            }
            info!("Deleted application {}", id);
            for name in deleted {
                println!("Deleted {}", name);
            }
        }

        Command::Extract { .. } => {}
    }

    Ok(())
}
