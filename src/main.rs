// src/main.rs
// =============================================================================
// This is the entry point of gh-activity.
//
// What happens here:
// 1. Parse command-line arguments using clap (bad --page never gets further)
// 2. Fetch one page of the user's public events
// 3. Push every record through the pipeline and print the lines
// 4. Exit with proper code (0 = done, 1 = fetch failed, 2 = unexpected error)
//
// Rust concepts used:
// - async/await: the HTTP request is the only thing we wait on
// - Result<T, E>: expected failures are ActivityError values we print
//   ourselves; anyhow::Error is left for the truly unexpected
// - Generic writers (W: Write): tests pass a Vec<u8> instead of stdout
// =============================================================================

// Module declarations - one per source file / directory under src/
mod cli;
mod error;
mod event;
mod github;
mod logging;
mod pipeline;
mod style;

use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use reqwest::Client;
use tracing::debug;
use url::Url;

use cli::Cli;
use error::ActivityError;
use github::EventsRequest;
use pipeline::RunSummary;
use style::Painter;

// A single request, so there is nothing for a multi-threaded runtime to do
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // clap prints usage and exits with code 2 on bad arguments, including
    // a --page outside 1-10, before anything else runs
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    // Decide once whether to colour; every printed line goes through it
    let painter = Painter::from_choice(cli.color);

    let exit_code = match run(&cli, painter).await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole anyhow context chain on one line
            eprintln!("{}", painter.error_line(&format!("Error: {:#}", e)));
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns the exit code for the failures we expect and report ourselves;
// Err is reserved for anything unexpected
async fn run(cli: &Cli, painter: Painter) -> Result<i32> {
    let mut stdout = io::stdout();

    // Username checks that clap can't express (empty, contains "/", ...)
    let request = match cli.events_request() {
        Ok(request) => request,
        Err(error) => return report(&mut stdout, painter, error),
    };

    writeln!(
        stdout,
        "{}",
        painter.info_line(&format!(
            "Fetching data for user: {}, page: {}",
            request.username(),
            cli.page
        ))
    )?;

    let client = github::build_client(Duration::from_secs(cli.timeout))?;
    // Lock once instead of on every writeln!
    let mut out = stdout.lock();

    match show_activity(&client, &cli.api_url, &request, painter, &mut out).await {
        Ok(summary) => {
            debug!(?summary, "done");
            Ok(0)
        }
        Err(error) => report(&mut out, painter, error),
    }
}

/// Fetches one page and prints it; nothing is written if the fetch fails
async fn show_activity<W: Write>(
    client: &Client,
    api_base: &Url,
    request: &EventsRequest,
    painter: Painter,
    out: &mut W,
) -> Result<RunSummary, ActivityError> {
    // Any fetch error returns here, before a single event line is written
    let records = github::fetch_events(client, api_base, request).await?;

    if records.is_empty() {
        writeln!(out, "{}", painter.info_line("No public activity found on this page."))?;
        return Ok(RunSummary::default());
    }

    // pipeline::run only fails if writing fails; `?` wraps the io::Error
    // into ActivityError::Output
    Ok(pipeline::run(&records, painter, out)?)
}

// Errors are shown like any other output line, just with their own marker
fn report<W: Write>(out: &mut W, painter: Painter, error: ActivityError) -> Result<i32> {
    debug!(?error, "run failed");
    writeln!(out, "{}", painter.error_line(&error.to_string()))?;
    Ok(error.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::test_server::{http_response, serve_once, test_client};

    #[tokio::test]
    async fn test_not_found_prints_nothing() {
        let base = serve_once(Some(http_response("404 Not Found", "{}"))).await;
        let client = test_client(Duration::from_secs(5));
        let request = EventsRequest::new("ghost-user", 0).unwrap();
        let mut out = Vec::new();

        let result = show_activity(&client, &base, &request, Painter::plain(), &mut out).await;
        assert!(matches!(result, Err(ActivityError::NotFound)));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_page_is_formatted_in_order() {
        let body = r#"[
            {"type":"WatchEvent","repo":{"name":"o/one"},"created_at":"2024-05-01T00:00:00Z","payload":{"action":"started"}},
            {"type":"GollumEvent","repo":{"name":"o/wiki"},"created_at":"2024-05-01T00:00:01Z","payload":{}},
            {"type":"PublicEvent","repo":{"name":"o/two"},"created_at":"2024-05-01T00:00:02Z","payload":{}}
        ]"#;
        let base = serve_once(Some(http_response("200 OK", body))).await;
        let client = test_client(Duration::from_secs(5));
        let request = EventsRequest::new("octocat", 0).unwrap();
        let mut out = Vec::new();

        let summary = show_activity(&client, &base, &request, Painter::plain(), &mut out)
            .await
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines,
            vec![
                "    -Started watching o/one at 2024-05-01T00:00:00Z!",
                "    -Changed visibility of o/two from private to public at 2024-05-01T00:00:02Z!",
            ]
        );
        assert_eq!(summary.printed, 2);
        assert_eq!(summary.unknown, 1);
    }

    #[tokio::test]
    async fn test_empty_page_says_so() {
        let base = serve_once(Some(http_response("200 OK", "[]"))).await;
        let client = test_client(Duration::from_secs(5));
        let request = EventsRequest::new("octocat", 0).unwrap();
        let mut out = Vec::new();

        let summary = show_activity(&client, &base, &request, Painter::plain(), &mut out)
            .await
            .unwrap();
        assert_eq!(summary, RunSummary::default());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "No public activity found on this page.\n"
        );
    }

    #[test]
    fn test_report_uses_error_marker() {
        let mut out = Vec::new();
        let code = report(&mut out, Painter::plain(), ActivityError::Timeout).unwrap();
        assert_eq!(code, 1);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "    !Timeout! Please check your connection!\n"
        );
    }
}
