// src/event/kind.rs
// =============================================================================
// The discriminant of an event record: the `type` tag the GitHub events API
// puts on every item ("PushEvent", "WatchEvent", ...).
//
// The API grows new event types over time, so anything we don't recognise
// becomes `EventKind::Unknown` instead of an error.
// =============================================================================

use std::fmt;

/// One of the sixteen event kinds we know how to format, or `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    CommitComment,
    Create,
    Delete,
    Fork,
    IssueComment,
    Issues,
    Member,
    Public,
    PullRequest,
    PullRequestReview,
    PullRequestReviewComment,
    PullRequestReviewThread,
    Push,
    Release,
    Sponsorship,
    Watch,
    /// Holds the raw tag so it can still be logged
    Unknown(String),
}

impl EventKind {
    /// Every known kind, in the order the API documents them
    pub const KNOWN: [EventKind; 16] = [
        EventKind::CommitComment,
        EventKind::Create,
        EventKind::Delete,
        EventKind::Fork,
        EventKind::IssueComment,
        EventKind::Issues,
        EventKind::Member,
        EventKind::Public,
        EventKind::PullRequest,
        EventKind::PullRequestReview,
        EventKind::PullRequestReviewComment,
        EventKind::PullRequestReviewThread,
        EventKind::Push,
        EventKind::Release,
        EventKind::Sponsorship,
        EventKind::Watch,
    ];

    /// Maps an API `type` tag to a kind
    ///
    /// Example: "PushEvent" -> EventKind::Push
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "CommitCommentEvent" => EventKind::CommitComment,
            "CreateEvent" => EventKind::Create,
            "DeleteEvent" => EventKind::Delete,
            "ForkEvent" => EventKind::Fork,
            "IssueCommentEvent" => EventKind::IssueComment,
            "IssuesEvent" => EventKind::Issues,
            "MemberEvent" => EventKind::Member,
            "PublicEvent" => EventKind::Public,
            "PullRequestEvent" => EventKind::PullRequest,
            "PullRequestReviewEvent" => EventKind::PullRequestReview,
            "PullRequestReviewCommentEvent" => EventKind::PullRequestReviewComment,
            "PullRequestReviewThreadEvent" => EventKind::PullRequestReviewThread,
            "PushEvent" => EventKind::Push,
            "ReleaseEvent" => EventKind::Release,
            "SponsorshipEvent" => EventKind::Sponsorship,
            "WatchEvent" => EventKind::Watch,
            other => EventKind::Unknown(other.to_string()),
        }
    }

    /// The API tag for this kind
    pub fn tag(&self) -> &str {
        match self {
            EventKind::CommitComment => "CommitCommentEvent",
            EventKind::Create => "CreateEvent",
            EventKind::Delete => "DeleteEvent",
            EventKind::Fork => "ForkEvent",
            EventKind::IssueComment => "IssueCommentEvent",
            EventKind::Issues => "IssuesEvent",
            EventKind::Member => "MemberEvent",
            EventKind::Public => "PublicEvent",
            EventKind::PullRequest => "PullRequestEvent",
            EventKind::PullRequestReview => "PullRequestReviewEvent",
            EventKind::PullRequestReviewComment => "PullRequestReviewCommentEvent",
            EventKind::PullRequestReviewThread => "PullRequestReviewThreadEvent",
            EventKind::Push => "PushEvent",
            EventKind::Release => "ReleaseEvent",
            EventKind::Sponsorship => "SponsorshipEvent",
            EventKind::Watch => "WatchEvent",
            EventKind::Unknown(tag) => tag,
        }
    }

    pub fn is_known(&self) -> bool {
        EventKind::KNOWN.contains(self)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
