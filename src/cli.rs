//! Command-line interface parsing for shellcache
//!
//! This module handles parsing of CLI arguments using clap: a required
//! `--origin` base URL, an optional cache root override, and the two
//! subcommands mirroring the worker's operations.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// The origin argument is not an absolute base URL
    #[error("Invalid origin '{0}': expected an absolute URL such as http://localhost:81")]
    InvalidOrigin(String),
}

/// shellcache - precache the meeting app shell and serve requests cache-first
#[derive(Parser, Debug)]
#[command(name = "shellcache")]
#[command(about = "Meeting app shell precache and cache-first fetch")]
#[command(version)]
pub struct Cli {
    /// Origin server the shell paths are resolved against
    ///
    /// Examples:
    ///   shellcache --origin http://localhost:81 install
    ///   shellcache --origin http://localhost:81 fetch /view
    #[arg(long, value_name = "URL")]
    pub origin: String,

    /// Override the cache root directory (defaults to the user cache dir)
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// The two operations the worker exposes
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch every app shell resource and store it in the cache
    Install,

    /// Resolve one request cache-first, writing the response body to stdout
    Fetch {
        /// Request path, resolved against the origin (e.g. /view)
        path: String,

        /// HTTP method for the request identity
        #[arg(long, default_value = "GET")]
        method: String,
    },
}

/// Validated configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Parsed origin base URL
    pub origin: Url,
    /// Cache root override, if any
    pub cache_dir: Option<PathBuf>,
}

impl RunConfig {
    /// Creates a RunConfig from parsed CLI arguments.
    ///
    /// # Arguments
    /// * `cli` - The parsed CLI struct
    ///
    /// # Returns
    /// * `Ok(RunConfig)` with the validated origin
    /// * `Err(CliError)` if the origin is not an absolute base URL
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let origin =
            Url::parse(&cli.origin).map_err(|_| CliError::InvalidOrigin(cli.origin.clone()))?;

        // "localhost:81" parses as scheme "localhost", which can never serve
        // as a join base
        if origin.cannot_be_a_base() {
            return Err(CliError::InvalidOrigin(cli.origin.clone()));
        }

        Ok(Self {
            origin,
            cache_dir: cli.cache_dir.clone(),
        })
    }
}
