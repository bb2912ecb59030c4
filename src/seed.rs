use crate::{error::AppError, models::post::Post};

const SEED_POSTS: &str = include_str!("../seed/posts.json");

/// Posts written to a fresh store on first initialisation.
pub fn initial_posts() -> Result<Vec<Post>, AppError> {
    Ok(serde_json::from_str(SEED_POSTS)?)
}
