// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
//   gh-activity <USERNAME> [--page N]
//
// clap validates the page range (1-10) itself, so an out-of-range page is
// rejected with a usage error before any request is made.
//
// Rust concepts used:
// - derive macros: #[derive(Parser)] generates the whole argument parser
//   from this struct; doc comments become the --help text
// - env fallbacks: `env = "..."` lets a variable stand in for a flag
// =============================================================================

use clap::Parser;

use crate::github::EventsRequest;
use crate::error::ActivityError;
use crate::style::ColorChoice;

// The top-level CLI definition
#[derive(Parser, Debug)]
#[command(
    name = "gh-activity",
    version,
    about = "Fetch GitHub activity for a specific user",
    long_about = "gh-activity prints a GitHub user's recent public events (pushes, issues, \
                  pull requests, stars, ...) as one readable line per event."
)]
pub struct Cli {
    /// GitHub username whose public events to show
    // Positional, since it has no #[arg(short/long)]
    pub username: String,

    /// Page number to fetch (1-10)
    // u8 plus a range parser: "0", "11" and "-1" are all usage errors
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub page: u8,

    /// Seconds to wait for GitHub before giving up
    #[arg(long, env = "GH_ACTIVITY_TIMEOUT", default_value_t = 5,
          value_parser = clap::value_parser!(u64).range(1..=60))]
    pub timeout: u64,

    /// Base URL of the GitHub REST API
    // Parsed into a Url by clap, so a garbage value fails at startup
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub api_url: url::Url,

    /// When to use colours
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Log debug diagnostics to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The request to send: CLI pages are 1-based, requests are zero-based
    pub fn events_request(&self) -> Result<EventsRequest, ActivityError> {
        // page is at least 1 here; saturating_sub just avoids a panic path
        EventsRequest::new(&self.username, self.page.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_defaults_to_one() {
        let cli = Cli::try_parse_from(["gh-activity", "octocat"]).unwrap();
        assert_eq!(cli.page, 1);
        assert_eq!(cli.color, ColorChoice::Auto);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_page_bounds() {
        assert!(Cli::try_parse_from(["gh-activity", "octocat", "--page", "0"]).is_err());
        assert!(Cli::try_parse_from(["gh-activity", "octocat", "-p", "11"]).is_err());
        assert!(Cli::try_parse_from(["gh-activity", "octocat", "-p", "-1"]).is_err());

        let cli = Cli::try_parse_from(["gh-activity", "octocat", "-p", "10"]).unwrap();
        assert_eq!(cli.page, 10);
    }

    #[test]
    fn test_username_is_required() {
        assert!(Cli::try_parse_from(["gh-activity"]).is_err());
    }

    #[test]
    fn test_events_request_uses_zero_based_index() {
        let base = url::Url::parse("https://api.github.com").unwrap();
        let cli = Cli::try_parse_from(["gh-activity", "octocat", "-p", "3"]).unwrap();
        let request = cli.events_request().unwrap();
        assert_eq!(
            request.url(&base).unwrap().as_str(),
            "https://api.github.com/users/octocat/events?page=3"
        );
    }
}
