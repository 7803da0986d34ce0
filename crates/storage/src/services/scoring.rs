use uuid::Uuid;

use crate::models::{ArrowValue, Round, Session};

/// Totals for one end. `arrows_scored` is how many arrows were actually
/// present; arrows not yet entered contribute nothing, they are not misses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndScore {
    pub end_no: u32,
    pub total: u32,
    pub x_count: u32,
    pub arrows_scored: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeScore {
    pub range_id: Uuid,
    pub distance_m: u32,
    pub total: u32,
    pub x_count: u32,
    pub ends: Vec<EndScore>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionScore {
    pub ranges: Vec<RangeScore>,
    pub total: u32,
    pub x_count: u32,
}

/// Sums an arrow sequence: X and 10 both score ten points, M scores zero,
/// X alone increments the X count.
pub fn score_end(arrows: &[ArrowValue]) -> (u32, u32) {
    let total = arrows.iter().map(|a| a.points()).sum();
    let x_count = arrows.iter().filter(|a| a.is_x()).count() as u32;
    (total, x_count)
}

/// Rolls a session up into per-range and grand totals, in the round's range
/// order. Total over any well-formed input: missing ends and short ends are
/// normal partial data, a session with no ends totals 0, and recomputation
/// over the same arrows always yields the same result.
pub fn aggregate_session(session: &Session, round: &Round) -> SessionScore {
    let mut ranges = Vec::with_capacity(round.ranges.len());
    let mut total = 0;
    let mut x_count = 0;

    for range in &round.ranges {
        let mut range_score = RangeScore {
            range_id: range.range_id,
            distance_m: range.distance_m,
            total: 0,
            x_count: 0,
            ends: Vec::new(),
        };

        for end in session.ends_for_range(range.range_id) {
            let (end_total, end_x) = score_end(&end.arrows);
            range_score.total += end_total;
            range_score.x_count += end_x;
            range_score.ends.push(EndScore {
                end_no: end.end_no,
                total: end_total,
                x_count: end_x,
                arrows_scored: end.arrows.len(),
            });
        }

        total += range_score.total;
        x_count += range_score.x_count;
        ranges.push(range_score);
    }

    SessionScore {
        ranges,
        total,
        x_count,
    }
}
