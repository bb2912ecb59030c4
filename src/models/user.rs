// src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The single local profile of whoever is using this store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,

    /// Display name. Also the identity votes are recorded under.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    /// Tipping balance. Never negative.
    #[serde(default)]
    pub ai_coins: u64,

    #[serde(default)]
    pub bookmarked_posts: Vec<String>,

    #[serde(default)]
    pub published_posts: Vec<String>,

    /// Posts this profile has liked, so a second like toggles it off.
    #[serde(default)]
    pub liked_posts: Vec<String>,

    pub created_at: DateTime<Utc>,
}

impl User {
    /// Profile used until one has been persisted.
    pub fn demo() -> Self {
        Self {
            id: "demo_user".to_string(),
            name: "Demo User".to_string(),
            avatar: Some("https://api.dicebear.com/7.x/avataaars/svg?seed=DemoUser".to_string()),
            ai_coins: 247,
            bookmarked_posts: Vec::new(),
            published_posts: Vec::new(),
            liked_posts: Vec::new(),
            created_at: Utc::now(),
        }
    }
}
