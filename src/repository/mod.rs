// src/repository/mod.rs

// Each collection lives under one key as a JSON document and every mutation
// is a read-modify-write of that whole document. Single writer only.

pub mod community;
pub mod interaction;
pub mod profile;
pub mod voting;

use serde::{Serialize, de::DeserializeOwned};

use crate::{error::AppError, models::post::Post, store::KeyValueStore};

pub const POSTS_KEY: &str = "ai_community_posts";
pub const USER_KEY: &str = "ai_community_user";
pub const INIT_KEY: &str = "ai_community_initialized";
pub const VOTES_KEY: &str = "ai_community_votes";

pub struct Repository<S> {
    store: S,
}

impl<S: KeyValueStore> Repository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Seeds `seed` as the post list unless the store was initialised before.
    /// Returns whether seeding happened.
    pub fn initialize(&mut self, seed: &[Post]) -> Result<bool, AppError> {
        if self.store.get(INIT_KEY)?.is_some() {
            tracing::info!("Data already initialized, preserving user data");
            return Ok(false);
        }

        tracing::info!("Initializing data with {} posts", seed.len());
        self.save_list(POSTS_KEY, seed)?;
        self.store.set(INIT_KEY, "true".to_string())?;
        Ok(true)
    }

    /// Reads a JSON array. Missing, unreadable or malformed data reads as empty.
    fn load_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::error!("Error reading {}: {}", key, e);
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::error!("Error parsing {}: {}", key, e);
            Vec::new()
        })
    }

    fn save_list<T: Serialize>(&mut self, key: &str, items: &[T]) -> Result<(), AppError> {
        let raw = serde_json::to_string(items)?;
        self.store.set(key, raw)
    }
}
