// src/event/record.rs
// =============================================================================
// The typed representation of one event from the feed.
//
// Decoding is schema-per-kind: the kind tag picks which fields are read out
// of `payload`, and the result is one variant of the `Payload` enum. Once a
// record has been decoded, formatters never touch JSON again.
//
// Raw shape (trimmed):
//   {
//     "type": "PushEvent",
//     "repo": { "name": "octocat/hello-world" },
//     "created_at": "2024-05-01T12:00:00Z",
//     "payload": { "commits": [ ... ] }
//   }
// =============================================================================

use serde_json::Value;

use super::field::{Fields, MalformedEvent, Problem};
use super::kind::EventKind;

/// One decoded event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub kind: EventKind,
    /// `repo.name`, e.g. "octocat/hello-world"
    pub repo: String,
    /// ISO-8601 exactly as the API sent it; never reparsed
    pub created_at: String,
    /// Only some feeds carry a record-level `updated_at`
    pub updated_at: Option<String>,
    pub payload: Payload,
}

/// Kind-specific data, already validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    CommitComment {
        action: String,
        commit_id: String,
        body: String,
    },
    Create(RefChange),
    Delete(RefChange),
    Fork {
        forkee: String,
    },
    IssueComment {
        action: String,
        issue_url: String,
        body: String,
        previous_body: Option<String>,
    },
    Issues {
        action: String,
        url: String,
        title: String,
        body: Option<String>,
        previous_title: Option<String>,
        previous_body: Option<String>,
    },
    Member {
        action: String,
        login: String,
        /// Only decoded for "edited"
        role: Option<RoleChange>,
    },
    Public,
    PullRequest {
        action: String,
        url: String,
        title: String,
        updated_at: String,
        previous_title: Option<String>,
        /// Only decoded for "dequeued"
        reason: Option<String>,
    },
    PullRequestReview {
        action: String,
        url: String,
        body: Option<String>,
        previous_body: Option<String>,
    },
    PullRequestReviewComment {
        action: String,
        url: String,
        body: String,
        previous_body: Option<String>,
    },
    PullRequestReviewThread {
        action: String,
        url: String,
        updated_at: String,
    },
    Push {
        commits: Vec<Commit>,
    },
    Release {
        action: String,
        url: String,
        tag: String,
    },
    Sponsorship {
        action: String,
        sponsor: String,
        sponsorable: String,
    },
    Watch {
        action: String,
    },
}

/// Create/Delete payload: what kind of ref, and its name if there is one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefChange {
    /// "branch", "tag" or "repository"
    pub ref_type: String,
    /// null when a whole repository was created
    pub git_ref: Option<String>,
}

/// A member's permission change on an "edited" MemberEvent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleChange {
    pub from: Option<String>,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub sha: String,
    pub message: String,
    pub author_email: String,
}

impl EventKind {
    /// Reads the `type` tag of a raw record; no tag at all counts as unknown
    pub fn of(raw: &Value) -> EventKind {
        match raw.get("type").and_then(Value::as_str) {
            Some(tag) => EventKind::from_tag(tag),
            None => EventKind::Unknown(String::new()),
        }
    }
}

impl EventRecord {
    /// Decodes a raw record of a known kind
    ///
    /// Fails with `MalformedEvent` if any field the kind requires is missing
    /// or has the wrong type. An unknown kind has no schema and is refused
    /// the same way, on its `type` field.
    pub fn decode(kind: EventKind, raw: &Value) -> Result<Self, MalformedEvent> {
        let root = Fields::root(&kind, raw)?;

        let repo = root.str_at("repo.name")?.to_string();
        let created_at = root.str("created_at")?.to_string();
        let updated_at = root.opt_str("updated_at")?.map(str::to_string);

        let payload = decode_payload(&root)?;

        Ok(EventRecord {
            kind,
            repo,
            created_at,
            updated_at,
            payload,
        })
    }

    /// Timestamp to show for an "edited" event
    pub fn edited_at(&self) -> &str {
        self.updated_at.as_deref().unwrap_or(&self.created_at)
    }
}

// Each kind reads only its own fields out of `payload`
fn decode_payload(root: &Fields<'_>) -> Result<Payload, MalformedEvent> {
    let payload = || root.obj("payload");

    let decoded = match root.kind() {
        EventKind::Unknown(_) => {
            return Err(MalformedEvent {
                kind: root.kind().clone(),
                field: "type".to_string(),
                problem: Problem::WrongType {
                    expected: "a known event type",
                },
            })
        }
        // the payload of a PublicEvent is always empty
        EventKind::Public => Payload::Public,
        EventKind::CommitComment => {
            let p = &payload()?;
            Payload::CommitComment {
                action: action(p)?,
                commit_id: owned(p.str_at("comment.commit_id")?),
                body: owned(p.str_at("comment.body")?),
            }
        }
        EventKind::Create => Payload::Create(ref_change(&payload()?)?),
        EventKind::Delete => Payload::Delete(ref_change(&payload()?)?),
        EventKind::Fork => Payload::Fork {
            forkee: owned(payload()?.str_at("forkee.name")?),
        },
        EventKind::IssueComment => {
            let p = &payload()?;
            let action = action(p)?;
            let previous_body = edited_only(&action, || p.opt_str_at("changes.body.from"))?;
            Payload::IssueComment {
                issue_url: owned(p.str_at("issue.html_url")?),
                body: owned(p.str_at("comment.body")?),
                action,
                previous_body,
            }
        }
        EventKind::Issues => {
            let p = &payload()?;
            let action = action(p)?;
            let issue = p.obj("issue")?;
            let previous_title = edited_only(&action, || p.opt_str_at("changes.title.from"))?;
            let previous_body = edited_only(&action, || p.opt_str_at("changes.body.from"))?;
            Payload::Issues {
                url: owned(issue.str("html_url")?),
                title: owned(issue.str("title")?),
                body: issue.opt_str("body")?.map(owned),
                action,
                previous_title,
                previous_body,
            }
        }
        EventKind::Member => {
            let p = &payload()?;
            let action = action(p)?;
            let login = owned(p.str_at("member.login")?);
            let role = if action == "edited" {
                Some(RoleChange {
                    from: p
                        .opt_str_at("changes.old_permission.from")?
                        .filter(|from| !from.is_empty())
                        .map(owned),
                    to: owned(p.str_at("changes.permission.to")?),
                })
            } else {
                None
            };
            Payload::Member {
                action,
                login,
                role,
            }
        }
        EventKind::PullRequest => {
            let p = &payload()?;
            let action = action(p)?;
            let pr = p.obj("pull_request")?;
            let previous_title = edited_only(&action, || p.opt_str_at("changes.title.from"))?;
            let reason = if action == "dequeued" {
                Some(owned(p.str("reason")?))
            } else {
                None
            };
            Payload::PullRequest {
                url: owned(pr.str("html_url")?),
                title: owned(pr.str("title")?),
                updated_at: owned(pr.str("updated_at")?),
                action,
                previous_title,
                reason,
            }
        }
        EventKind::PullRequestReview => {
            let p = &payload()?;
            let action = action(p)?;
            let previous_body = edited_only(&action, || p.opt_str_at("changes.body.from"))?;
            Payload::PullRequestReview {
                url: owned(p.str_at("pull_request.html_url")?),
                body: p.obj("review")?.opt_str("body")?.map(owned),
                action,
                previous_body,
            }
        }
        EventKind::PullRequestReviewComment => {
            let p = &payload()?;
            let action = action(p)?;
            let previous_body = edited_only(&action, || p.opt_str_at("changes.body.from"))?;
            Payload::PullRequestReviewComment {
                url: owned(p.str_at("pull_request.html_url")?),
                body: owned(p.str_at("comment.body")?),
                action,
                previous_body,
            }
        }
        EventKind::PullRequestReviewThread => {
            let p = &payload()?;
            let pr = p.obj("pull_request")?;
            Payload::PullRequestReviewThread {
                action: action(p)?,
                url: owned(pr.str("html_url")?),
                updated_at: owned(pr.str("updated_at")?),
            }
        }
        EventKind::Push => {
            let p = &payload()?;
            let commits = p
                .objects("commits")?
                .iter()
                .map(|c| -> Result<Commit, MalformedEvent> {
                    Ok(Commit {
                        sha: owned(c.non_empty_str("sha")?),
                        message: owned(c.str("message")?),
                        author_email: owned(c.str_at("author.email")?),
                    })
                })
                .collect::<Result<Vec<_>, MalformedEvent>>()?;
            Payload::Push { commits }
        }
        EventKind::Release => {
            let p = &payload()?;
            let release = p.obj("release")?;
            Payload::Release {
                action: action(p)?,
                url: owned(release.str("html_url")?),
                tag: owned(release.str("tag_name")?),
            }
        }
        EventKind::Sponsorship => {
            let p = &payload()?;
            Payload::Sponsorship {
                action: action(p)?,
                sponsor: owned(p.str_at("sponsorship.sponsor.email")?),
                sponsorable: owned(p.str_at("sponsorship.sponsorable.email")?),
            }
        }
        EventKind::Watch => Payload::Watch {
            action: action(&payload()?)?,
        },
    };
    Ok(decoded)
}

fn action(p: &Fields<'_>) -> Result<String, MalformedEvent> {
    p.non_empty_str("action").map(owned)
}

fn ref_change(p: &Fields<'_>) -> Result<RefChange, MalformedEvent> {
    Ok(RefChange {
        ref_type: owned(p.non_empty_str("ref_type")?),
        git_ref: p.opt_str("ref")?.map(owned),
    })
}

// `changes` only means something when the action is "edited"
fn edited_only<'a, F>(action: &str, read: F) -> Result<Option<String>, MalformedEvent>
where
    F: FnOnce() -> Result<Option<&'a str>, MalformedEvent>,
{
    if action != "edited" {
        return Ok(None);
    }
    Ok(read()?.map(owned))
}

fn owned(s: &str) -> String {
    s.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(kind: &str, payload: Value) -> Value {
        json!({
            "type": kind,
            "repo": { "name": "octocat/hello-world" },
            "created_at": "2024-05-01T12:00:00Z",
            "payload": payload,
        })
    }

    #[test]
    fn test_kind_of_reads_type_tag() {
        assert_eq!(EventKind::of(&raw("PushEvent", json!({}))), EventKind::Push);
        assert_eq!(
            EventKind::of(&json!({ "repo": {} })),
            EventKind::Unknown(String::new())
        );
    }

    #[test]
    fn test_decode_push_keeps_commit_order() {
        let value = raw(
            "PushEvent",
            json!({ "commits": [
                { "sha": "1111111aaaa", "message": "first", "author": { "email": "a@x.io" } },
                { "sha": "2222222bbbb", "message": "second", "author": { "email": "b@x.io" } },
            ]}),
        );
        let record = EventRecord::decode(EventKind::Push, &value).unwrap();
        assert_eq!(record.repo, "octocat/hello-world");
        match record.payload {
            Payload::Push { commits } => {
                assert_eq!(commits.len(), 2);
                assert_eq!(commits[0].message, "first");
                assert_eq!(commits[1].author_email, "b@x.io");
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[test]
    fn test_missing_repo_name_is_malformed() {
        let value = json!({
            "type": "WatchEvent",
            "repo": {},
            "created_at": "2024-05-01T12:00:00Z",
            "payload": { "action": "started" },
        });
        let err = EventRecord::decode(EventKind::Watch, &value).unwrap_err();
        assert_eq!(err.field, "repo.name");
        assert_eq!(err.kind, EventKind::Watch);
    }

    #[test]
    fn test_member_changes_ignored_unless_edited() {
        let value = raw(
            "MemberEvent",
            json!({ "action": "added", "member": { "login": "hubot" } }),
        );
        let record = EventRecord::decode(EventKind::Member, &value).unwrap();
        assert!(matches!(record.payload, Payload::Member { role: None, .. }));
    }

    #[test]
    fn test_member_edited_requires_new_role() {
        let value = raw(
            "MemberEvent",
            json!({ "action": "edited", "member": { "login": "hubot" }, "changes": {} }),
        );
        let err = EventRecord::decode(EventKind::Member, &value).unwrap_err();
        assert_eq!(err.field, "payload.changes.permission");
    }

    #[test]
    fn test_dequeued_pull_request_requires_reason() {
        let value = raw(
            "PullRequestEvent",
            json!({
                "action": "dequeued",
                "pull_request": {
                    "html_url": "https://github.com/o/r/pull/1",
                    "title": "Fix",
                    "updated_at": "2024-05-02T00:00:00Z",
                },
            }),
        );
        let err = EventRecord::decode(EventKind::PullRequest, &value).unwrap_err();
        assert_eq!(err.field, "payload.reason");
        assert_eq!(err.problem, Problem::Missing);
    }

    #[test]
    fn test_public_event_needs_no_payload() {
        let value = json!({
            "type": "PublicEvent",
            "repo": { "name": "octocat/hello-world" },
            "created_at": "2024-05-01T12:00:00Z",
        });
        let record = EventRecord::decode(EventKind::Public, &value).unwrap();
        assert_eq!(record.payload, Payload::Public);
    }

    #[test]
    fn test_unknown_kind_never_decodes_to_a_payload() {
        let value = raw("GollumEvent", json!({}));
        let kind = EventKind::of(&value);
        let err = EventRecord::decode(kind.clone(), &value).unwrap_err();
        assert_eq!(err.kind, kind);
        assert_eq!(err.field, "type");
        assert_eq!(
            err.problem,
            Problem::WrongType {
                expected: "a known event type"
            }
        );
    }

    #[test]
    fn test_edited_at_prefers_updated_at() {
        let mut value = raw("WatchEvent", json!({ "action": "started" }));
        let record = EventRecord::decode(EventKind::Watch, &value).unwrap();
        assert_eq!(record.edited_at(), "2024-05-01T12:00:00Z");

        value["updated_at"] = json!("2024-06-01T00:00:00Z");
        let record = EventRecord::decode(EventKind::Watch, &value).unwrap();
        assert_eq!(record.edited_at(), "2024-06-01T00:00:00Z");
    }
}
