// src/lib.rs

pub mod aggregator;
pub mod config;
pub mod error;
pub mod feed;
pub mod models;
pub mod parser;
pub mod repository;
pub mod seed;
pub mod store;
pub mod utils;

// Re-export specific items for convenience
pub use parser::{TranscriptParser, format_transcript, parse_transcript};
pub use repository::Repository;
