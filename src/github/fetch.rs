// src/github/fetch.rs
// =============================================================================
// This module fetches one page of a user's public events.
//
// Strategy:
// - Build https://api.github.com/users/{username}/events?page={n}
// - Make a single GET with a bounded timeout (no retries)
// - Sort the outcome into ActivityError variants the caller can report
// - Hand back the raw JSON records untouched; decoding happens per record
//   in the pipeline so one bad record can't sink the whole page
//
// Page numbering: callers work with a zero-based page index, the API is
// 1-based, so index 0 is sent as page=1.
//
// Rust concepts used:
// - serde derive: the page envelope only accepts an array of JSON objects,
//   so anything else fails at the HTTP boundary as InvalidBody
// - From impls: `?` turns reqwest and serde_json errors into ActivityError
// =============================================================================

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info};
use url::Url;

use crate::error::ActivityError;

/// The API only serves the first ten pages of a feed
pub const MAX_PAGES: u8 = 10;

/// The body of a 200 answer: a JSON array whose items are all objects
///
/// Items stay untyped here; each one is decoded on its own later.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct EventsPage {
    records: Vec<Map<String, Value>>,
}

/// Who and which page to fetch, already validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventsRequest {
    username: String,
    page_index: u8,
}

impl EventsRequest {
    /// Validates the username and the zero-based page index
    pub fn new(username: &str, page_index: u8) -> Result<Self, ActivityError> {
        // The username becomes a path segment, so anything that would change
        // the shape of the URL is refused up front
        if username.is_empty() {
            return Err(ActivityError::Validation(
                "username must not be empty".to_string(),
            ));
        }
        if username
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#'))
        {
            return Err(ActivityError::Validation(format!(
                "'{}' is not a valid GitHub username",
                username
            )));
        }
        // clap already checks the 1-10 range; this guards other callers
        if page_index >= MAX_PAGES {
            return Err(ActivityError::Validation(format!(
                "page number must be between 1 and {}",
                MAX_PAGES
            )));
        }

        Ok(EventsRequest {
            username: username.to_string(),
            page_index,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// The events URL for this request under `api_base`
    ///
    /// Example:
    ///   api_base = "https://api.github.com", username = "octocat", index 0
    ///   -> "https://api.github.com/users/octocat/events?page=1"
    pub fn url(&self, api_base: &Url) -> Result<Url, ActivityError> {
        let mut url = api_base.clone();
        // path_segments_mut() fails only for "cannot-be-a-base" URLs such as
        // "mailto:x"; pop_if_empty() drops the trailing "/" of ".../v3/"
        url.path_segments_mut()
            .map_err(|_| {
                ActivityError::Validation(format!("'{}' can't be used as an API URL", api_base))
            })?
            .pop_if_empty()
            .extend(&["users", self.username.as_str(), "events"]);

        // u16 so that index 255 can't overflow
        let page = u16::from(self.page_index) + 1;
        url.query_pairs_mut()
            .clear()
            .append_pair("page", &page.to_string());
        Ok(url)
    }
}

/// Creates the HTTP client used for the request
///
/// GitHub rejects requests without a User-Agent, so we always send one.
pub fn build_client(timeout: Duration) -> Result<Client, ActivityError> {
    // Ask for the versioned JSON media type GitHub documents for REST calls
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

    // The timeout covers the whole request, connect through last body byte
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .default_headers(headers)
        .build()?;
    Ok(client)
}

/// Fetches one page of events
///
/// Returns the raw records in the order the API sent them.
pub async fn fetch_events(
    client: &Client,
    api_base: &Url,
    request: &EventsRequest,
) -> Result<Vec<Value>, ActivityError> {
    let url = request.url(api_base)?;
    debug!(%url, "fetching events");

    // send() only fails on transport problems; HTTP error statuses come
    // back as a normal response and are sorted out by check_status()
    let response = client.get(url).send().await?;
    check_status(response.status())?;

    // Read the body as text first so a malformed body is reported as
    // InvalidBody (serde_json::Error) rather than as a transport error
    let body = response.text().await?;
    let page: EventsPage = serde_json::from_str(&body)?;
    let records: Vec<Value> = page.records.into_iter().map(Value::Object).collect();

    info!(
        username = request.username(),
        count = records.len(),
        "fetched events"
    );
    Ok(records)
}

// 200 is the only answer with events in it
fn check_status(status: StatusCode) -> Result<(), ActivityError> {
    match status {
        StatusCode::OK => Ok(()),
        StatusCode::NOT_FOUND => Err(ActivityError::NotFound),
        other => Err(ActivityError::Http {
            status: other.as_u16(),
        }),
    }
}
