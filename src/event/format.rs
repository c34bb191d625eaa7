// src/event/format.rs
// =============================================================================
// One formatter per event kind.
//
// Each formatter turns a decoded EventRecord into display lines. Every kind
// produces exactly one line except PushEvent, which produces a summary line
// plus one line per commit.
//
// Formatting is pure: lines are plain text here and only get colour when
// `Line::render` is handed a Painter.
//
// Phrasing rules shared by all kinds:
// - the verb is the payload's `action` with its first letter upper-cased
//   ("created" -> "Created"); kinds without an action use a fixed verb
// - "edited" events show the old value only when it actually differs from
//   the new one; an unchanged diff produces no clause at all
// - comment bodies and commit messages are cut down to their first line
// =============================================================================

use crate::style::Painter;

use super::record::{Commit, EventRecord, Payload, RefChange, RoleChange};

/// A single rendered line of output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// A sentence describing one event
    Event(String),
    /// One commit underneath a push summary
    Commit { short_sha: String, text: String },
}

impl Line {
    /// The sentence without any decoration
    pub fn text(&self) -> String {
        match self {
            Line::Event(sentence) => sentence.clone(),
            Line::Commit { short_sha, text } => format!("{}: {}", short_sha, text),
        }
    }

    pub fn render(&self, painter: Painter) -> String {
        match self {
            Line::Event(sentence) => painter.event_line(sentence),
            Line::Commit { short_sha, text } => painter.commit_line(short_sha, text),
        }
    }
}

/// Formats a decoded record into its display line(s)
pub fn format_event(record: &EventRecord) -> Vec<Line> {
    let repo = record.repo.as_str();

    let sentence = match &record.payload {
        Payload::CommitComment {
            action,
            commit_id,
            body,
        } => format!(
            "{} a comment on commit {} in {} at {}: {}",
            verb(action),
            commit_id,
            repo,
            record.created_at,
            quote(body)
        ),

        Payload::Create(change) => ref_sentence("Created", change, repo, &record.created_at),
        Payload::Delete(change) => ref_sentence("Deleted", change, repo, &record.created_at),

        Payload::Fork { forkee } => {
            format!("Forked {} into {} at {}!", repo, forkee, record.created_at)
        }

        Payload::IssueComment {
            action,
            issue_url,
            body,
            previous_body,
        } => format!(
            "{} a comment on {} in {} at {}: {}{}",
            verb(action),
            issue_url,
            repo,
            timestamp(record, action),
            quote(body),
            previously(previous_body.as_deref(), Some(body.as_str()))
        ),

        Payload::Issues {
            action,
            url,
            title,
            body,
            previous_title,
            previous_body,
        } => {
            if action == "edited" {
                let mut clauses = String::new();
                if let Some(old) = changed(previous_title.as_deref(), Some(title.as_str())) {
                    clauses.push_str(&format!(", renamed from \"{}\" to \"{}\"", old, title));
                }
                if changed(previous_body.as_deref(), body.as_deref()).is_some() {
                    clauses.push_str(", updated the description");
                }
                format!(
                    "Edited an issue at {} in {}{} at {}!",
                    url,
                    repo,
                    clauses,
                    record.edited_at()
                )
            } else {
                format!(
                    "{} an issue \"{}\" at {} in {} at {}!",
                    verb(action),
                    first_line(title),
                    url,
                    repo,
                    record.created_at
                )
            }
        }

        Payload::Member {
            action,
            login,
            role,
        } => format!(
            "{} member github.com/{} in {}{} at {}!",
            verb(action),
            login,
            repo,
            role_clause(role.as_ref()),
            timestamp(record, action)
        ),

        Payload::Public => format!(
            "Changed visibility of {} from private to public at {}!",
            repo, record.created_at
        ),

        Payload::PullRequest {
            action,
            url,
            title,
            updated_at,
            previous_title,
            reason,
        } => {
            let mut sentence = format!(
                "{} a pull request {} (\"{}\") in {}",
                verb(action),
                url,
                first_line(title),
                repo
            );
            if let Some(old) = changed(previous_title.as_deref(), Some(title.as_str())) {
                sentence.push_str(&format!(", renamed from \"{}\"", old));
            }
            if let Some(reason) = reason {
                sentence.push_str(&format!(" because {}", reason));
            }
            sentence.push_str(&format!(" at {}!", updated_at));
            sentence
        }

        Payload::PullRequestReview {
            action,
            url,
            body,
            previous_body,
        } => {
            let mut sentence = format!(
                "{} a review on {} in {} at {}",
                verb(action),
                url,
                repo,
                timestamp(record, action)
            );
            if let Some(body) = body.as_deref().filter(|b| !b.trim().is_empty()) {
                sentence.push_str(&format!(": {}", quote(body)));
            }
            sentence.push_str(&previously(previous_body.as_deref(), body.as_deref()));
            sentence
        }

        Payload::PullRequestReviewComment {
            action,
            url,
            body,
            previous_body,
        } => format!(
            "{} a review comment on {} in {} at {}: {}{}",
            verb(action),
            url,
            repo,
            timestamp(record, action),
            quote(body),
            previously(previous_body.as_deref(), Some(body.as_str()))
        ),

        Payload::PullRequestReviewThread {
            action,
            url,
            updated_at,
        } => format!(
            "Marked pull request {} as {} in {} at {}!",
            url, action, repo, updated_at
        ),

        Payload::Push { commits } => return push_lines(commits, repo, &record.created_at),

        Payload::Release { action, url, tag } => format!(
            "{} release {} at {} in {} at {}!",
            verb(action),
            tag,
            url,
            repo,
            record.created_at
        ),

        Payload::Sponsorship {
            action,
            sponsor,
            sponsorable,
        } => format!(
            "{} a sponsorship with {} as sponsor and {} as sponsorable in {} at {}!",
            verb(action),
            sponsor,
            sponsorable,
            repo,
            record.created_at
        ),

        Payload::Watch { action } => format!(
            "{} watching {} at {}!",
            verb(action),
            repo,
            record.created_at
        ),
    };

    vec![Line::Event(sentence)]
}

fn push_lines(commits: &[Commit], repo: &str, created_at: &str) -> Vec<Line> {
    let noun = if commits.len() == 1 { "commit" } else { "commits" };
    let mut lines = Vec::with_capacity(commits.len() + 1);
    lines.push(Line::Event(format!(
        "Pushed {} {} to {} at {}:",
        commits.len(),
        noun,
        repo,
        created_at
    )));

    for commit in commits {
        lines.push(Line::Commit {
            short_sha: short_sha(&commit.sha).to_string(),
            text: format!("{} (by {})", first_line(&commit.message), commit.author_email),
        });
    }
    lines
}

fn ref_sentence(verb: &str, change: &RefChange, repo: &str, at: &str) -> String {
    match &change.git_ref {
        Some(name) => format!(
            "{} a {} {} in {} at {}!",
            verb, change.ref_type, name, repo, at
        ),
        None => format!("{} a {} in {} at {}!", verb, change.ref_type, repo, at),
    }
}

fn role_clause(role: Option<&RoleChange>) -> String {
    match role {
        None => String::new(),
        Some(RoleChange { from: None, to }) => format!(" as {}", to),
        Some(RoleChange { from: Some(from), to }) if from == to => String::new(),
        Some(RoleChange { from: Some(from), to }) => format!(" from {} to {}", from, to),
    }
}

/// `" (previously "...")"` when the old body differs from the new one
fn previously(old: Option<&str>, new: Option<&str>) -> String {
    match changed(old, new) {
        Some(old) => format!(" (previously {})", quote(old)),
        None => String::new(),
    }
}

/// Returns the old value only if there is one and it differs from the new one
///
/// An absent new value compares equal to an empty string, since the API
/// sends `null` for an emptied body.
fn changed<'a>(old: Option<&'a str>, new: Option<&str>) -> Option<&'a str> {
    let old = old?;
    if old == new.unwrap_or("") {
        None
    } else {
        Some(old)
    }
}

fn timestamp<'a>(record: &'a EventRecord, action: &str) -> &'a str {
    if action == "edited" {
        record.edited_at()
    } else {
        &record.created_at
    }
}

/// "created" -> "Created"
fn verb(action: &str) -> String {
    let mut chars = action.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

fn quote(text: &str) -> String {
    format!("\"{}\"", first_line(text))
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("").trim_end()
}

fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}
