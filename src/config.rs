use crate::views::RenderMode;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::env;

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub render: RenderMode,
}

/// One-shot maintenance tasks selected on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tasks {
    pub migrate: bool,
    pub seed: bool,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "Local Library catalog server")]
pub struct Args {
    /// Host to bind to (overrides LIBRARY_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides LIBRARY_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Database URL (overrides LIBRARY_DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Page format (overrides LIBRARY_RENDER)
    #[arg(long, value_enum)]
    pub render: Option<RenderMode>,

    /// Apply the schema and exit
    #[arg(long)]
    pub migrate: bool,

    /// Insert a demo catalog and exit
    #[arg(long)]
    pub seed: bool,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig and the requested tasks.
    pub fn from_env_and_args() -> Result<(Self, Tasks)> {
        Self::from_args(Args::parse())
    }

    pub fn from_args(args: Args) -> Result<(Self, Tasks)> {
        // --- Environment fallback ---
        let env_host = env::var("LIBRARY_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let env_port = match env::var("LIBRARY_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("parsing LIBRARY_PORT value `{}`", value))?,
            Err(env::VarError::NotPresent) => 3000,
            Err(err) => return Err(err).context("reading LIBRARY_PORT"),
        };
        let env_db = env::var("LIBRARY_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://./data/library.db".into());
        let env_render = match env::var("LIBRARY_RENDER") {
            Ok(value) => RenderMode::from_str(&value, true)
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("parsing LIBRARY_RENDER value `{}`", value))?,
            Err(env::VarError::NotPresent) => RenderMode::Html,
            Err(err) => return Err(err).context("reading LIBRARY_RENDER"),
        };

        // --- Merge ---
        let cfg = Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            database_url: args.database_url.unwrap_or(env_db),
            render: args.render.unwrap_or(env_render),
        };
        let tasks = Tasks {
            migrate: args.migrate,
            seed: args.seed,
        };

        Ok((cfg, tasks))
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
