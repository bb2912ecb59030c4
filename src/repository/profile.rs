use super::{Repository, USER_KEY};
use crate::{
    error::AppError,
    models::{post::Post, user::User},
    store::KeyValueStore,
};

impl<S: KeyValueStore> Repository<S> {
    /// The stored profile, or the demo profile if none is stored yet.
    pub fn current_user(&self) -> User {
        match self.store.get(USER_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::error!("Error parsing {}: {}", USER_KEY, e);
                User::demo()
            }),
            Ok(None) => User::demo(),
            Err(e) => {
                tracing::error!("Error reading {}: {}", USER_KEY, e);
                User::demo()
            }
        }
    }

    pub(crate) fn save_current_user(&mut self, user: &User) -> Result<(), AppError> {
        let raw = serde_json::to_string(user)?;
        self.store.set(USER_KEY, raw)
    }

    /// Applies `mutate` to the profile and persists it.
    pub fn update_current_user<F>(&mut self, mutate: F) -> Result<User, AppError>
    where
        F: FnOnce(&mut User),
    {
        let mut user = self.current_user();
        mutate(&mut user);
        self.save_current_user(&user)?;
        Ok(user)
    }

    /// Returns whether the post is bookmarked afterwards.
    pub fn toggle_bookmark(&mut self, post_id: &str) -> Result<bool, AppError> {
        let mut user = self.current_user();
        let is_bookmarked = user.bookmarked_posts.iter().any(|p| p == post_id);

        if is_bookmarked {
            user.bookmarked_posts.retain(|p| p != post_id);
        } else {
            if self.post(post_id).is_none() {
                return Err(AppError::NotFound("Post not found".to_string()));
            }
            user.bookmarked_posts.push(post_id.to_string());
        }

        self.save_current_user(&user)?;
        Ok(!is_bookmarked)
    }

    pub fn is_bookmarked(&self, post_id: &str) -> bool {
        self.current_user()
            .bookmarked_posts
            .iter()
            .any(|p| p == post_id)
    }

    /// Bookmarked posts that still exist, in feed order.
    pub fn bookmarked_posts(&self) -> Vec<Post> {
        let user = self.current_user();
        self.posts()
            .into_iter()
            .filter(|p| user.bookmarked_posts.contains(&p.id))
            .collect()
    }

    pub fn published_posts(&self) -> Vec<Post> {
        let user = self.current_user();
        self.posts()
            .into_iter()
            .filter(|p| user.published_posts.contains(&p.id))
            .collect()
    }

    pub(crate) fn add_published_post(&mut self, post_id: &str) -> Result<(), AppError> {
        let mut user = self.current_user();
        if !user.published_posts.iter().any(|p| p == post_id) {
            user.published_posts.push(post_id.to_string());
            self.save_current_user(&user)?;
        }
        Ok(())
    }

    /// Adds `delta` coins (may be negative). The balance never drops below zero.
    pub fn update_ai_coins(&mut self, delta: i64) -> Result<u64, AppError> {
        let user = self.update_current_user(|user| {
            user.ai_coins = user.ai_coins.saturating_add_signed(delta);
        })?;
        Ok(user.ai_coins)
    }
}
