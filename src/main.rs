// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Build the HTTP checker that talks to the validator
// 3. Crawl the site, printing [OK] / [ERROR] for every page
// 4. Optionally print a JSON summary
// 5. Exit with proper code (0 = crawl finished, 1 = bad arguments or I/O error)
//
// Individual page failures do NOT change the exit code. They are reported as
// they happen and the crawl carries on.
//
// Rust concepts used:
// - async/await: Because the HTTP client is async
// - Result<T, E>: For error handling (T = success type, E = error type)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod checker; // src/checker/ - fetching, validating and link extraction
mod cli; // src/cli.rs - command-line parsing
mod crawl; // src/crawl/ - the depth-first walk and its bookkeeping
mod logging; // src/logging.rs - tracing setup

use clap::Parser; // Parser trait enables the parse() method
use cli::{Cli, Settings};

use anyhow::Result;
use std::io::{self, Write};

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    logging::init_logging();

    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version and missing --url
    let cli = Cli::parse();

    let exit_code = match run(&cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = crawl completed (whatever the pages' verdicts)
//   Err = invalid arguments or stdout/stderr could not be written
async fn run(cli: &Cli) -> Result<i32> {
    let settings = cli.settings()?;
    let checker = checker::HttpChecker::new(settings.checker.clone())?;

    validate_site(&settings, checker, &mut io::stdout(), &mut io::stderr()).await
}

// Crawls the site with the given checker and writes all program output
//
// stdout/stderr are passed in so the whole run can be replayed in tests
// against a fake checker.
async fn validate_site<C, O, E>(
    settings: &Settings,
    checker: C,
    out: &mut O,
    err: &mut E,
) -> Result<i32>
where
    C: checker::PageChecker,
    O: Write,
    E: Write,
{
    writeln!(out, "Using {} ...", settings.checker.validator)?;

    let mut crawler = crawl::Crawler::new(checker, settings.recursive);
    crawler
        .recursive_check(settings.start_url.clone(), &settings.start_url, &mut *out, &mut *err)
        .await?;

    let visited = crawler.visited();
    tracing::info!(
        pages = visited.len(),
        ok = visited.ok_count(),
        failed = visited.failed_count(),
        "crawl finished"
    );

    if settings.json {
        print_report(settings, &crawler, &mut *out)?;
    }
    out.flush()?;

    // Page failures were already reported line by line
    Ok(0)
}

// Prints the JSON summary of the crawl
fn print_report<C, O>(settings: &Settings, crawler: &crawl::Crawler<C>, out: &mut O) -> Result<()>
where
    C: checker::PageChecker,
    O: Write,
{
    let report = crawl::CrawlReport::new(
        &settings.start_url,
        &settings.checker.validator,
        crawler.visited(),
    );
    let json_output = serde_json::to_string_pretty(&report)?;
    writeln!(out, "{}", json_output)?;
    Ok(())
}
