use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use super::{POSTS_KEY, Repository};
use crate::{
    error::AppError,
    feed,
    models::post::{Author, NewPost, Post, PostBody, PostKind},
    parser::parse_transcript,
    store::KeyValueStore,
    utils::html::clean_html,
};

fn clean_optional(text: Option<String>) -> Option<String> {
    text.map(|t| clean_html(t.trim())).filter(|t| !t.is_empty())
}

/// Trims tags and drops blanks and repeats, keeping first occurrence order.
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

impl<S: KeyValueStore> Repository<S> {
    /// All posts in stored order (newest created first).
    pub fn posts(&self) -> Vec<Post> {
        self.load_list(POSTS_KEY)
    }

    pub fn post(&self, id: &str) -> Option<Post> {
        self.posts().into_iter().find(|p| p.id == id)
    }

    /// Create a new post authored by the current profile.
    /// Chat posts submitted with only a raw transcript get it parsed here.
    pub fn create_post(&mut self, payload: NewPost) -> Result<Post, AppError> {
        payload.validate()?;

        let title = clean_html(payload.title.trim());
        if title.is_empty() {
            return Err(AppError::BadRequest("Title is empty".to_string()));
        }

        let user = self.current_user();

        let body = match payload.body {
            PostBody::ChatSharing(mut chat) => {
                if chat.segments.is_empty() {
                    if let Some(history) = chat.chat_history.as_deref() {
                        chat.segments = parse_transcript(history);
                    }
                }
                chat.user_content = clean_optional(chat.user_content);
                PostBody::ChatSharing(chat)
            }
            // Voting state starts empty whatever the caller sent.
            PostBody::PromptSharing(mut prompt) => {
                prompt.voting_stats = None;
                prompt.use_case_breakdown.clear();
                prompt.legacy_votes = None;
                PostBody::PromptSharing(prompt)
            }
            PostBody::CommunityEvent(mut event) => {
                event.event_location = clean_optional(event.event_location);
                event.interested_count = 0;
                PostBody::CommunityEvent(event)
            }
        };

        let post = Post {
            id: format!("post_{}", Uuid::new_v4().simple()),
            title,
            intro: clean_optional(payload.intro),
            author: Author {
                name: user.name,
                avatar: user.avatar,
            },
            tags: normalize_tags(payload.tags),
            likes: 0,
            comments: Vec::new(),
            view_count: 0,
            created_at: Utc::now(),
            allow_copy: payload.allow_copy,
            body,
        };

        let mut posts = self.posts();
        posts.insert(0, post.clone());
        self.save_list(POSTS_KEY, &posts)?;

        self.add_published_post(&post.id)?;

        tracing::info!("Created {:?} post {}", post.kind(), post.id);
        Ok(post)
    }

    /// Applies `mutate` to the post with `id` and persists the result.
    pub fn update_post<F>(&mut self, id: &str, mutate: F) -> Result<Post, AppError>
    where
        F: FnOnce(&mut Post),
    {
        let mut posts = self.posts();
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(AppError::NotFound("Post not found".to_string()))?;

        mutate(post);
        let updated = post.clone();

        self.save_list(POSTS_KEY, &posts)?;
        Ok(updated)
    }

    /// Returns false when no such post existed.
    pub fn delete_post(&mut self, id: &str) -> Result<bool, AppError> {
        let mut posts = self.posts();
        let before = posts.len();
        posts.retain(|p| p.id != id);

        if posts.len() == before {
            return Ok(false);
        }

        self.save_list(POSTS_KEY, &posts)?;
        tracing::info!("Deleted post {}", id);
        Ok(true)
    }

    /// Most recent posts first.
    pub fn latest(&self, limit: usize) -> Vec<Post> {
        let mut posts = self.posts();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts.truncate(limit);
        posts
    }

    /// Home feed: the latest `limit` posts narrowed by search text and tags.
    pub fn feed(&self, limit: usize, query: &str, tags: &[String]) -> Vec<Post> {
        feed::filter_posts(self.latest(limit), query, tags)
    }

    /// Hottest of the 50 most recent posts, optionally of one kind.
    pub fn trending(&self, kind: Option<PostKind>) -> Vec<Post> {
        feed::trending(self.latest(50), kind)
    }
}
