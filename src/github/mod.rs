// src/github/mod.rs
// =============================================================================
// This module talks to the GitHub REST API.
//
// Currently implements:
// - Building the /users/{username}/events URL for one page
// - A single GET with a timeout, classified into ActivityError
//
// Deliberately absent: authentication, rate-limit handling, following
// pagination links. One invocation = one page = one request.
// =============================================================================

mod fetch;

#[cfg(test)]
pub(crate) mod test_server;

pub use fetch::{build_client, fetch_events, EventsRequest};
