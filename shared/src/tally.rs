use crate::models::VoteResult;

/// Builds per-option results from vote counts indexed by option position.
///
/// The total is the sum of the supplied counts, so votes pointing past the
/// current option list never reach the tally. With no votes every percentage is 0.
pub fn tally(counts: &[i64]) -> Vec<VoteResult> {
    let total: i64 = counts.iter().sum();

    counts.iter()
        .enumerate()
        .map(|(option_index, &votes)| VoteResult {
            option_index,
            votes,
            percentage: percentage(votes, total),
        })
        .collect()
}

fn percentage(votes: i64, total: i64) -> f64 {
    if total > 0 {
        votes as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}

