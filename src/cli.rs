// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things), then turn the raw
// strings into validated Settings before anything touches the network.
// =============================================================================

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use std::time::Duration;
use url::Url;

use crate::checker::CheckerConfig;

pub const DEFAULT_VALIDATOR: &str = "http://localhost:8080/check";

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
#[derive(Parser, Debug)]
#[command(
    name = "site-validator",
    version = "0.1.0",
    about = "Recursively validate a website with the W3C markup validator",
    long_about = "site-validator fetches a page, uploads it to a W3C validator instance and \
                  follows every root-relative link on the same host until the whole site \
                  has been checked."
)]
pub struct Cli {
    /// URL to start validation of (e.g., https://example.com/)
    #[arg(long)]
    pub url: String,

    /// W3C validation service
    #[arg(long, default_value = DEFAULT_VALIDATOR)]
    pub validator: String,

    /// Accept status codes other than 200
    #[arg(long)]
    pub ignore_status: bool,

    /// Print the validator's response when a page is rejected
    #[arg(long)]
    pub print_message: bool,

    /// Only check the start URL, do not follow links
    #[arg(long)]
    pub no_follow: bool,

    /// Print a JSON summary of all checked pages when done
    #[arg(long)]
    pub json: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,
}

/// Validated configuration for one run
#[derive(Debug, Clone)]
pub struct Settings {
    pub start_url: Url,
    pub checker: CheckerConfig,
    pub recursive: bool,
    pub json: bool,
}

impl Cli {
    // Checks the raw arguments and converts them into Settings
    //
    // Fails if a required URL is empty or can't be parsed.
    pub fn settings(&self) -> Result<Settings> {
        if self.url.is_empty() {
            bail!("url is required");
        }
        if self.validator.is_empty() {
            bail!("validator service is required");
        }

        let mut start_url = Url::parse(&self.url)
            .map_err(|e| anyhow!("Invalid URL '{}': {}", self.url, e))?;
        // The start page is a visited-set key like any other page
        start_url.set_fragment(None);

        let validator = Url::parse(&self.validator)
            .map_err(|e| anyhow!("Invalid validator URL '{}': {}", self.validator, e))?;

        Ok(Settings {
            start_url,
            checker: CheckerConfig {
                validator,
                check_status_code: !self.ignore_status,
                print_message: self.print_message,
                timeout: Duration::from_secs(self.timeout),
            },
            recursive: !self.no_follow,
            json: self.json,
        })
    }
}
