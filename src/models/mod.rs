// src/models/mod.rs

pub mod comment;
pub mod post;
pub mod segment;
pub mod user;
pub mod vote;
