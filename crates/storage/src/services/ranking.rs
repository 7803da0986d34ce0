use uuid::Uuid;

/// One rankable result: a frozen total plus the X count used as the first
/// tie-break. Entries without a frozen total never reach this service.
#[derive(Debug, Clone, Copy)]
pub struct RankingInput {
    pub id: Uuid,
    pub total: u32,
    pub x_count: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct RankedEntry {
    pub id: Uuid,
    pub rank: u32,
    pub total: u32,
    pub x_count: u32,
    /// Still tied after the X-count tie-break; flagged for a manual
    /// tie-break rather than silently ordered.
    pub tied: bool,
}

/// Orders entries by total descending, then X count descending, and assigns
/// dense ranks (1, 2, 2, 3). Entries equal on both keys share a rank and are
/// flagged `tied`; among them the caller's input order is preserved.
pub fn rank_entries(mut entries: Vec<RankingInput>) -> Vec<RankedEntry> {
    entries.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| b.x_count.cmp(&a.x_count))
    });

    let mut ranked: Vec<RankedEntry> = Vec::with_capacity(entries.len());
    let mut rank = 0;
    let mut previous: Option<(u32, u32)> = None;

    for entry in entries {
        let key = (entry.total, entry.x_count);
        if previous != Some(key) {
            rank += 1;
            previous = Some(key);
        } else {
            // Shared rank: mark the whole group, including the first member.
            if let Some(last) = ranked.last_mut() {
                last.tied = true;
            }
        }
        let tied = ranked
            .last()
            .is_some_and(|last| last.rank == rank && last.tied);
        ranked.push(RankedEntry {
            id: entry.id,
            rank,
            total: entry.total,
            x_count: entry.x_count,
            tied,
        });
    }

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(total: u32, x_count: u32) -> RankingInput {
        RankingInput {
            id: Uuid::new_v4(),
            total,
            x_count,
        }
    }

    #[test]
    fn test_ranks_descending_by_total() {
        let ranked = rank_entries(vec![input(410, 5), input(395, 8), input(385, 2)]);
        let order: Vec<(u32, u32)> = ranked.iter().map(|e| (e.rank, e.total)).collect();
        assert_eq!(order, vec![(1, 410), (2, 395), (3, 385)]);
        assert!(ranked.iter().all(|e| !e.tied));
    }

    #[test]
    fn test_inserting_an_entry_shifts_lower_ranks() {
        let ranked = rank_entries(vec![
            input(410, 5),
            input(395, 8),
            input(385, 2),
            input(400, 3),
        ]);
        let totals_by_rank: Vec<(u32, u32)> = ranked.iter().map(|e| (e.rank, e.total)).collect();
        assert_eq!(totals_by_rank, vec![(1, 410), (2, 400), (3, 395), (4, 385)]);
    }

    #[test]
    fn test_x_count_breaks_equal_totals() {
        let ranked = rank_entries(vec![input(700, 10), input(700, 14)]);
        assert_eq!(ranked[0].x_count, 14);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[1].rank, 2);
        assert!(!ranked[0].tied);
    }

    #[test]
    fn test_full_tie_shares_rank_and_is_flagged() {
        let ranked = rank_entries(vec![input(700, 10), input(700, 10), input(650, 0)]);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[1].rank, 1);
        assert!(ranked[0].tied);
        assert!(ranked[1].tied);
        assert_eq!(ranked[2].rank, 2);
        assert!(!ranked[2].tied);
    }

    #[test]
    fn test_tied_entries_keep_input_order() {
        let first = input(700, 10);
        let second = input(700, 10);
        let ranked = rank_entries(vec![first, second]);
        assert_eq!(ranked[0].id, first.id);
        assert_eq!(ranked[1].id, second.id);
    }

    #[test]
    fn test_empty_input() {
        assert!(rank_entries(Vec::new()).is_empty());
    }
}
