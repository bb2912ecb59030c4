use std::slice;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use super::{POSTS_KEY, Repository, VOTES_KEY};
use crate::{
    aggregator::{merge_votes, use_case_breakdown},
    error::AppError,
    models::{
        post::Post,
        vote::{NewVote, Vote},
    },
    store::KeyValueStore,
};

impl<S: KeyValueStore> Repository<S> {
    /// The append-only vote log for every post.
    pub fn votes(&self) -> Vec<Vote> {
        self.load_list(VOTES_KEY)
    }

    pub fn votes_for_post(&self, post_id: &str) -> Vec<Vote> {
        self.votes()
            .into_iter()
            .filter(|v| v.post_id == post_id)
            .collect()
    }

    pub fn has_user_voted(&self, post_id: &str, user_id: &str) -> bool {
        self.votes()
            .iter()
            .any(|v| v.post_id == post_id && v.user_id == user_id)
    }

    /// Record the current profile's rating of a prompt post.
    ///
    /// Only the new vote is merged into `votingStats`; the use-case breakdown
    /// is rebuilt from the post's whole vote log.
    pub fn submit_vote(&mut self, post_id: &str, payload: NewVote) -> Result<Post, AppError> {
        payload.validate()?;

        let mut posts = self.posts();
        let post = posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or(AppError::NotFound("Post not found".to_string()))?;
        let prompt = post.as_prompt_mut().ok_or(AppError::BadRequest(
            "Only prompt posts can be voted on".to_string(),
        ))?;

        // Votes are keyed by display name, like the rest of the profile data.
        let user_id = self.current_user().name;
        if self.has_user_voted(post_id, &user_id) {
            return Err(AppError::Conflict("Already voted on this post".to_string()));
        }

        let vote = Vote {
            id: format!("vote_{}", Uuid::new_v4().simple()),
            user_id,
            post_id: post_id.to_string(),
            effectiveness: payload.effectiveness,
            use_case: payload
                .use_case
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty()),
            tags: payload
                .tags
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            created_at: Utc::now(),
        };

        let stats = merge_votes(prompt.voting_stats.as_ref(), slice::from_ref(&vote))?;

        let mut votes = self.votes();
        votes.push(vote);
        let history: Vec<Vote> = votes
            .iter()
            .filter(|v| v.post_id == post_id)
            .cloned()
            .collect();

        prompt.voting_stats = Some(stats);
        prompt.use_case_breakdown = use_case_breakdown(&history);
        let updated = post.clone();

        // Stats are merged incrementally, so the post is written before the
        // log. A failed post write leaves nothing recorded.
        self.save_list(POSTS_KEY, &posts)?;
        self.save_list(VOTES_KEY, &votes)?;

        tracing::info!(
            "Vote recorded on {}: {} votes, effectiveness {}",
            post_id,
            history.len(),
            updated
                .as_prompt()
                .and_then(|p| p.voting_stats.as_ref())
                .map_or(0.0, |s| s.effectiveness)
        );
        Ok(updated)
    }
}
