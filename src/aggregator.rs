// src/aggregator.rs

// Vote statistics for prompt posts. `merge_votes` folds new votes into the
// existing aggregate, `use_case_breakdown` always reads the full vote list.

use crate::{
    error::AppError,
    models::vote::{UseCaseShare, Vote, VotingStats},
};

/// Rounds to one decimal place.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn percent(part: u64, whole: u64) -> u64 {
    (part as f64 * 100.0 / whole as f64).round() as u64
}

fn check_effectiveness(vote: &Vote) -> Result<(), AppError> {
    if !(1..=5).contains(&vote.effectiveness) {
        return Err(AppError::BadRequest(format!(
            "vote {} has effectiveness {}, expected 1 to 5",
            vote.id, vote.effectiveness
        )));
    }
    Ok(())
}

/// Combines `existing` (absent means no votes yet) with `batch`.
///
/// The average is weighted by vote count and the bucket counters are summed.
/// Fails on an out-of-range effectiveness or when there would be zero votes.
pub fn merge_votes(existing: Option<&VotingStats>, batch: &[Vote]) -> Result<VotingStats, AppError> {
    for vote in batch {
        check_effectiveness(vote)?;
    }

    let base = existing.cloned().unwrap_or_default();
    let added = batch.len() as u64;
    let total_votes = base.total_votes + added;
    if total_votes == 0 {
        return Err(AppError::BadRequest(
            "cannot aggregate an empty batch with no prior votes".to_string(),
        ));
    }

    let batch_sum: u64 = batch.iter().map(|v| u64::from(v.effectiveness)).sum();
    let effectiveness =
        (base.effectiveness * base.total_votes as f64 + batch_sum as f64) / total_votes as f64;

    let count = |pred: fn(u8) -> bool| batch.iter().filter(|v| pred(v.effectiveness)).count() as u64;
    let worked_perfectly = base.worked_perfectly + count(|e| e == 5);
    let worked_with_tweaks = base.worked_with_tweaks + count(|e| e == 4);
    let partially_helpful = base.partially_helpful + count(|e| e == 3);
    let didnt_work = base.didnt_work + count(|e| e <= 2);

    let stats = VotingStats {
        total_votes,
        effectiveness: round1(effectiveness),
        worked_perfectly,
        worked_with_tweaks,
        partially_helpful,
        didnt_work,
        success_rate: percent(worked_perfectly + worked_with_tweaks, total_votes),
    };

    tracing::debug!(
        "Merged {} votes into stats: total={}, effectiveness={}",
        added,
        stats.total_votes,
        stats.effectiveness
    );
    Ok(stats)
}

/// Groups the full vote history of a post by use case, in first-seen order.
///
/// Votes without a use case are left out of the groups but still count in
/// the denominator, so percentages need not sum to 100.
pub fn use_case_breakdown(votes: &[Vote]) -> Vec<UseCaseShare> {
    // (name, effectiveness sum, count)
    let mut groups: Vec<(&str, u64, u64)> = Vec::new();

    for vote in votes {
        let Some(name) = vote.use_case.as_deref().filter(|n| !n.is_empty()) else {
            continue;
        };
        match groups.iter_mut().find(|(n, _, _)| *n == name) {
            Some(group) => {
                group.1 += u64::from(vote.effectiveness);
                group.2 += 1;
            }
            None => groups.push((name, u64::from(vote.effectiveness), 1)),
        }
    }

    let all = votes.len() as u64;
    groups
        .into_iter()
        .map(|(name, sum, count)| UseCaseShare {
            name: name.to_string(),
            rating: round1(sum as f64 / count as f64),
            percentage: percent(count, all),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn vote(effectiveness: u8, use_case: Option<&str>) -> Vote {
        Vote {
            id: format!("vote_{}", effectiveness),
            user_id: "tester".to_string(),
            post_id: "prompt_1".to_string(),
            effectiveness,
            use_case: use_case.map(str::to_string),
            tags: vec![],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn first_vote_from_empty() {
        let stats = merge_votes(None, &[vote(5, None)]).unwrap();
        assert_eq!(stats.total_votes, 1);
        assert_eq!(stats.effectiveness, 5.0);
        assert_eq!(stats.worked_perfectly, 1);
        assert_eq!(stats.success_rate, 100);
    }

    #[test]
    fn weighted_average_with_prior_stats() {
        let prior = VotingStats {
            total_votes: 10,
            effectiveness: 4.0,
            ..Default::default()
        };
        let stats = merge_votes(Some(&prior), &[vote(5, None)]).unwrap();
        assert_eq!(stats.total_votes, 11);
        assert_eq!(stats.effectiveness, 4.1);
    }

    #[test]
    fn buckets_and_success_rate() {
        let batch = [vote(5, None), vote(4, None), vote(3, None), vote(2, None), vote(1, None)];
        let stats = merge_votes(None, &batch).unwrap();
        assert_eq!(stats.worked_perfectly, 1);
        assert_eq!(stats.worked_with_tweaks, 1);
        assert_eq!(stats.partially_helpful, 1);
        assert_eq!(stats.didnt_work, 2);
        assert_eq!(stats.success_rate, 40);
        assert_eq!(stats.effectiveness, 3.0);
    }

    #[test]
    fn rejects_out_of_range_effectiveness() {
        assert!(matches!(merge_votes(None, &[vote(0, None)]), Err(AppError::BadRequest(_))));
        assert!(matches!(merge_votes(None, &[vote(6, None)]), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn rejects_empty_merge_without_history() {
        assert!(merge_votes(None, &[]).is_err());

        let prior = VotingStats {
            total_votes: 3,
            effectiveness: 4.3,
            worked_perfectly: 2,
            success_rate: 67,
            ..Default::default()
        };
        assert_eq!(merge_votes(Some(&prior), &[]).unwrap().total_votes, 3);
    }

    #[test]
    fn breakdown_groups_by_use_case() {
        let votes = [
            vote(5, Some("Research")),
            vote(4, Some("Research")),
            vote(2, Some("Planning")),
            vote(5, None),
        ];
        let shares = use_case_breakdown(&votes);
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].name, "Research");
        assert_eq!(shares[0].rating, 4.5);
        assert_eq!(shares[0].percentage, 50);
        assert_eq!(shares[1].name, "Planning");
        assert_eq!(shares[1].percentage, 25);
    }

    #[test]
    fn breakdown_percentages_stay_within_rounding_drift() {
        let votes = [vote(5, Some("a")), vote(4, Some("b")), vote(3, Some("c"))];
        let total: u64 = use_case_breakdown(&votes).iter().map(|s| s.percentage).sum();
        // Three shares of 33% each.
        assert_eq!(total, 99);
    }
}
