// src/feed.rs

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::models::post::{EventPost, Post, PostKind};

/// Case-insensitive match on title or intro, AND at least one of `tags`.
/// An empty query or empty tag list matches everything.
pub fn filter_posts(posts: Vec<Post>, query: &str, tags: &[String]) -> Vec<Post> {
    let query = query.trim().to_lowercase();

    posts
        .into_iter()
        .filter(|post| {
            let matches_search = query.is_empty()
                || post.title.to_lowercase().contains(&query)
                || post
                    .intro
                    .as_deref()
                    .is_some_and(|intro| intro.to_lowercase().contains(&query));

            let matches_tags = tags.is_empty() || tags.iter().any(|t| post.tags.contains(t));

            matches_search && matches_tags
        })
        .collect()
}

/// Engagement score used by the trending pages.
pub fn hot_score(post: &Post) -> f64 {
    let mut score = (post.likes * 3 + post.comments.len() as u64 * 2 + post.view_count) as f64;

    let prompt = post.as_prompt();
    match prompt.and_then(|p| p.voting_stats.as_ref()) {
        Some(stats) => score += stats.total_votes as f64 * 5.0 + stats.effectiveness * 10.0,
        None => {
            score += prompt.and_then(|p| p.legacy_votes).unwrap_or(0) as f64 * 4.0;
        }
    }

    score
}

/// Parses the loosely formatted event date.
fn event_time(event: &EventPost) -> Option<DateTime<Utc>> {
    let raw = event.event_date.as_deref()?.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Posts of `kind` (or all), hottest first.
///
/// Events are ordered by calendar day, soonest first, and by interest within
/// a day. Undated events go last.
pub fn trending(posts: Vec<Post>, kind: Option<PostKind>) -> Vec<Post> {
    let mut posts: Vec<Post> = posts
        .into_iter()
        .filter(|p| kind.is_none_or(|k| p.kind() == k))
        .collect();

    if kind == Some(PostKind::CommunityEvent) {
        posts.sort_by_cached_key(|post| {
            let event = post.as_event();
            let day = event.and_then(event_time).map(|t| t.date_naive());
            let interested = event.map_or(0, |e| e.interested_count);
            (day.is_none(), day, std::cmp::Reverse(interested))
        });
    } else {
        posts.sort_by(|a, b| hot_score(b).total_cmp(&hot_score(a)));
    }

    posts
}
