use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use validator::Validate;

use super::{
    comment::Comment,
    segment::MessageSegment,
    vote::{UseCaseShare, VotingStats},
};

/// A community post as persisted under the posts key.
/// Common fields live here; variant-specific fields live in `body`,
/// which is flattened so the JSON carries a top-level `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,

    pub author: Author,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub likes: u64,

    #[serde(default)]
    pub comments: Vec<Comment>,

    #[serde(default)]
    pub view_count: u64,

    pub created_at: DateTime<Utc>,

    #[serde(default = "default_true")]
    pub allow_copy: bool,

    #[serde(flatten)]
    pub body: PostBody,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Variant payloads. The tag decides which fields readers look at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PostBody {
    ChatSharing(ChatPost),
    PromptSharing(PromptPost),
    CommunityEvent(EventPost),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatPost {
    #[serde(default)]
    pub segments: Vec<MessageSegment>,

    /// The author's own commentary on the conversation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_content: Option<String>,

    /// Raw pasted transcript the segments were parsed from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_history: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptPost {
    #[serde(default)]
    pub prompt_content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_output: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_case: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,

    /// Pre-voting-system upvote counter, only read by the hot score.
    #[serde(rename = "votes", default, skip_serializing_if = "Option::is_none")]
    pub legacy_votes: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voting_stats: Option<VotingStats>,

    #[serde(default)]
    pub use_case_breakdown: Vec<UseCaseShare>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPost {
    /// Free-form date as entered (RFC 3339, `YYYY-MM-DDTHH:MM` or `YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    #[serde(default, alias = "eventLink", skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    #[serde(default)]
    pub interested_count: u64,
}

/// Discriminant of `PostBody`, used for feed filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostKind {
    ChatSharing,
    PromptSharing,
    CommunityEvent,
}

impl Post {
    pub fn kind(&self) -> PostKind {
        match self.body {
            PostBody::ChatSharing(_) => PostKind::ChatSharing,
            PostBody::PromptSharing(_) => PostKind::PromptSharing,
            PostBody::CommunityEvent(_) => PostKind::CommunityEvent,
        }
    }

    pub fn as_prompt(&self) -> Option<&PromptPost> {
        match &self.body {
            PostBody::PromptSharing(prompt) => Some(prompt),
            _ => None,
        }
    }

    pub fn as_prompt_mut(&mut self) -> Option<&mut PromptPost> {
        match &mut self.body {
            PostBody::PromptSharing(prompt) => Some(prompt),
            _ => None,
        }
    }

    pub fn as_event(&self) -> Option<&EventPost> {
        match &self.body {
            PostBody::CommunityEvent(event) => Some(event),
            _ => None,
        }
    }
}

/// DTO for creating a new post.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Title length must be between 1 and 100 chars"
    ))]
    pub title: String,

    #[validate(length(max = 2000))]
    pub intro: Option<String>,

    #[serde(default)]
    #[validate(length(max = 10, message = "At most 10 tags"))]
    pub tags: Vec<String>,

    #[serde(default = "default_true")]
    pub allow_copy: bool,

    #[serde(flatten)]
    #[validate(custom(function = validate_body))]
    pub body: PostBody,
}

/// Variant-level rules the derive cannot express.
fn validate_body(body: &PostBody) -> Result<(), validator::ValidationError> {
    match body {
        PostBody::ChatSharing(_) => Ok(()),
        PostBody::PromptSharing(prompt) => {
            if prompt.prompt_content.trim().is_empty() {
                return Err(validator::ValidationError::new("prompt_content_required"));
            }
            if prompt.prompt_content.len() > 20000 {
                return Err(validator::ValidationError::new("prompt_content_too_long"));
            }
            Ok(())
        }
        PostBody::CommunityEvent(event) => match &event.link {
            Some(link) if !link.trim().is_empty() => validate_url_string(link),
            _ => Ok(()),
        },
    }
}

/// Validates that a string is a correctly formatted URL.
fn validate_url_string(url: &str) -> Result<(), validator::ValidationError> {
    if url.len() > 500 {
        return Err(validator::ValidationError::new("url_too_long"));
    }
    if Url::parse(url).is_err() {
        return Err(validator::ValidationError::new("invalid_url"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_tagged_prompt_post() {
        let raw = r##"{
            "id": "prompt_1",
            "title": "Chain of thought",
            "type": "prompt_sharing",
            "author": { "name": "David Kim" },
            "segments": [],
            "tags": ["#AI"],
            "likes": 3,
            "comments": [],
            "viewCount": 10,
            "createdAt": "2024-01-20T10:00:00Z",
            "allowCopy": true,
            "promptContent": "Think step by step.",
            "votingStats": {
                "totalVotes": 2, "effectiveness": 4.5, "workedPerfectly": 1,
                "workedWithTweaks": 1, "partiallyHelpful": 0, "didntWork": 0,
                "successRate": 100
            }
        }"##;

        let post: Post = serde_json::from_str(raw).unwrap();
        assert_eq!(post.kind(), PostKind::PromptSharing);
        let prompt = post.as_prompt().unwrap();
        assert_eq!(prompt.prompt_content, "Think step by step.");
        assert_eq!(prompt.voting_stats.as_ref().unwrap().total_votes, 2);
    }

    #[test]
    fn event_accepts_legacy_link_field() {
        let raw = r#"{
            "id": "event_1", "title": "Meetup", "type": "community_event",
            "author": { "name": "Ana" }, "createdAt": "2024-01-20T10:00:00Z",
            "eventDate": "2024-02-10T09:00:00Z", "eventLink": "https://example.com/meetup"
        }"#;

        let post: Post = serde_json::from_str(raw).unwrap();
        let event = post.as_event().unwrap();
        assert_eq!(event.link.as_deref(), Some("https://example.com/meetup"));
        assert_eq!(post.likes, 0);
        assert!(post.allow_copy);
    }

    #[test]
    fn rejects_event_with_invalid_link() {
        let new_post = NewPost {
            title: "Meetup".to_string(),
            intro: None,
            tags: vec![],
            allow_copy: true,
            body: PostBody::CommunityEvent(EventPost {
                link: Some("not a url".to_string()),
                ..Default::default()
            }),
        };
        assert!(new_post.validate().is_err());
    }
}
