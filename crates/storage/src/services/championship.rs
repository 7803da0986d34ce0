use uuid::Uuid;

use super::ranking::{RankingInput, rank_entries};

/// A member's reduced championship result: the best `counted_scores` totals
/// and their sum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChampionshipScore {
    pub score: u32,
    /// The totals that counted, highest first.
    pub counted: Vec<u32>,
}

/// Keeps the top `counted_scores` totals and sums them. A member with fewer
/// qualifying totals counts whatever they have; there is no zero-padding.
pub fn championship_score(totals: &[u32], counted_scores: usize) -> ChampionshipScore {
    let mut counted = totals.to_vec();
    counted.sort_unstable_by(|a, b| b.cmp(a));
    counted.truncate(counted_scores);
    ChampionshipScore {
        score: counted.iter().sum(),
        counted,
    }
}

#[derive(Debug, Clone)]
pub struct StandingEntry {
    pub member_id: Uuid,
    pub rank: u32,
    pub score: u32,
    pub counted: Vec<u32>,
    pub tied: bool,
}

/// Reduces each member's qualifying totals to a championship score and ranks
/// the field by score descending. Equal scores share a dense rank and are
/// flagged tied; no secondary tie-break is applied.
pub fn compute_standings(
    totals_by_member: Vec<(Uuid, Vec<u32>)>,
    counted_scores: usize,
) -> Vec<StandingEntry> {
    let scores: Vec<(Uuid, ChampionshipScore)> = totals_by_member
        .into_iter()
        .map(|(member_id, totals)| (member_id, championship_score(&totals, counted_scores)))
        .collect();

    let ranked = rank_entries(
        scores
            .iter()
            .map(|(member_id, s)| RankingInput {
                id: *member_id,
                total: s.score,
                x_count: 0,
            })
            .collect(),
    );

    ranked
        .into_iter()
        .map(|entry| {
            let counted = scores
                .iter()
                .find(|(member_id, _)| *member_id == entry.id)
                .map(|(_, s)| s.counted.clone())
                .unwrap_or_default();
            StandingEntry {
                member_id: entry.id,
                rank: entry.rank,
                score: entry.total,
                counted,
                tied: entry.tied,
            }
        })
        .collect()
}
