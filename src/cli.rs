// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::app::{App, Route};
use crate::config::ClientConfig;
use crate::render::render;

#[derive(Parser)]
#[command(name = "ats-client")]
#[command(about = "Command-line client for the ATS API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to config YAML. If omitted, uses ./ats-client.yaml if present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override log filter (trace/debug/info/warn/error or directives).
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create an account
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        full_name: Option<String>,
    },
    /// Log in and persist the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the persisted session token
    Logout,
    /// Show the account behind the current token
    Whoami,
    /// Manage job postings
    Jobs {
        #[command(subcommand)]
        command: JobsCommand,
    },
    /// Manage uploaded resumes
    Resumes {
        #[command(subcommand)]
        command: ResumesCommand,
    },
    /// Score a resume against a job
    Match { resume_id: String, job_id: String },
}

#[derive(Subcommand)]
pub enum JobsCommand {
    /// List one page of jobs (pages start at 1)
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Comma-separated
        #[arg(long, default_value = "")]
        skills: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        skills: String,
    },
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum ResumesCommand {
    /// List one page of resumes (pages start at 1)
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    Upload { file: PathBuf },
    Delete { id: i64 },
    /// Poll until the server has parsed a resume
    Wait {
        id: i64,
        #[arg(long, default_value_t = 100)]
        attempts: u32,
        #[arg(long, default_value_t = 100)]
        interval_ms: u64,
    },
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = ClientConfig::load(cli.config.as_deref())?;
    init_logging(&config.log_path, cli.log_level.as_deref())?;
    info!("Using API at {}", config.api_base_url);

    let mut app = App::from_config(&config)?;
    app.start().await;

    let ok = handle_command(&mut app, cli.command).await;
    print!("{}", render(&app));

    if !ok {
        let message = app
            .ops()
            .error()
            .unwrap_or_else(|| "Operation failed".to_string());
        anyhow::bail!(message);
    }
    Ok(())
}

pub async fn handle_command(app: &mut App, command: Command) -> bool {
    match command {
        Command::Signup {
            email,
            password,
            full_name,
        } => {
            app.auth.email = email;
            app.auth.password = password;
            app.auth.full_name = full_name.unwrap_or_default();
            app.navigate(Route::Auth);
            app.signup().await.is_some()
        }

        Command::Login { email, password } => {
            app.auth.email = email;
            app.auth.password = password;
            app.login().await
        }

        Command::Logout => {
            app.logout().await;
            true
        }

        Command::Whoami => {
            let ok = app.whoami().await.is_some();
            app.navigate(Route::Auth);
            ok
        }

        Command::Jobs { command } => {
            app.navigate(Route::Jobs);
            match command {
                JobsCommand::List { page } => app.show_jobs_page(page.saturating_sub(1)).await,
                JobsCommand::Create {
                    title,
                    description,
                    skills,
                } => {
                    app.jobs.title = title;
                    app.jobs.description = description;
                    app.jobs.skills = skills;
                    app.create_job().await.is_some()
                }
                JobsCommand::Update {
                    id,
                    title,
                    description,
                    skills,
                } => {
                    app.jobs.title = title;
                    app.jobs.description = description;
                    app.jobs.skills = skills;
                    app.update_job(id).await.is_some()
                }
                JobsCommand::Delete { id } => app.delete_job(id).await,
            }
        }

        Command::Resumes { command } => {
            app.navigate(Route::Resumes);
            match command {
                ResumesCommand::List { page } => {
                    app.show_resumes_page(page.saturating_sub(1)).await
                }
                ResumesCommand::Upload { file } => {
                    app.resumes.file = Some(file);
                    app.upload_resume().await.is_some()
                }
                ResumesCommand::Delete { id } => app.delete_resume(id).await,
                ResumesCommand::Wait {
                    id,
                    attempts,
                    interval_ms,
                } => {
                    let parsed = app
                        .wait_for_resume(id, attempts, Duration::from_millis(interval_ms))
                        .await;
                    if parsed == Some(false) {
                        app.ops()
                            .reject(&format!("Resume #{} not parsed after {} attempts", id, attempts));
                    }
                    parsed == Some(true)
                }
            }
        }

        Command::Match { resume_id, job_id } => {
            app.navigate(Route::Match);
            app.matching.resume_id = resume_id;
            app.matching.job_id = job_id;
            app.run_match().await.is_some()
        }
    }
}

/// JSON logs to `log_path`; stdout stays free for rendered output
fn init_logging(log_path: &Path, log_level: Option<&str>) -> Result<()> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    let filter = match log_level {
        Some(level) => EnvFilter::try_new(level)
            .with_context(|| format!("Invalid log level: {}", level))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(Mutex::new(file))
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(filter)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}
