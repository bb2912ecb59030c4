use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use super::Repository;
use crate::{
    error::AppError,
    models::{
        comment::{Comment, NewComment},
        post::Post,
    },
    store::KeyValueStore,
    utils::html::clean_html,
};

impl<S: KeyValueStore> Repository<S> {
    /// Counts one view of a post.
    pub fn increment_view_count(&mut self, id: &str) -> Result<Post, AppError> {
        self.update_post(id, |post| post.view_count += 1)
    }

    /// Toggle Like on a post for the current profile.
    /// Returns whether the post is liked afterwards.
    pub fn toggle_like(&mut self, id: &str) -> Result<bool, AppError> {
        let mut user = self.current_user();
        let is_liked = user.liked_posts.iter().any(|p| p == id);

        self.update_post(id, |post| {
            if is_liked {
                post.likes = post.likes.saturating_sub(1);
            } else {
                post.likes += 1;
            }
        })?;

        if is_liked {
            user.liked_posts.retain(|p| p != id);
        } else {
            user.liked_posts.push(id.to_string());
        }
        self.save_current_user(&user)?;

        Ok(!is_liked)
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.current_user().liked_posts.iter().any(|p| p == id)
    }

    /// Append a comment to a post.
    pub fn add_comment(
        &mut self,
        post_id: &str,
        author: &str,
        payload: NewComment,
    ) -> Result<Post, AppError> {
        payload.validate()?;

        let content = clean_html(payload.content.trim());
        if content.is_empty() {
            return Err(AppError::BadRequest("Comment is empty".to_string()));
        }

        let comment = Comment {
            id: format!("com_{}", Uuid::new_v4().simple()),
            author: author.to_string(),
            content,
            created_at: Utc::now(),
        };

        let post = self.update_post(post_id, |post| post.comments.push(comment))?;
        tracing::info!("Comment added to post {}", post_id);
        Ok(post)
    }
}
