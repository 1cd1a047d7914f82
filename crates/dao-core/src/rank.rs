use crate::clock::Moment;
use crate::model::AppData;
use crate::notice::Notice;
use crate::types::MilestoneKind;

// ---------------------------------------------------------------------------
// Rank table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rank {
    pub threshold: i64,
    pub name: &'static str,
}

/// Ascending by threshold. The first entry is the floor for negative totals.
pub const RANKS: &[Rank] = &[
    Rank { threshold: i64::MIN, name: "Qi Deviant" },
    Rank { threshold: 0, name: "Recruit" },
    Rank { threshold: 100, name: "Rank 1 Novice" },
    Rank { threshold: 200, name: "Rank 2 Master" },
    Rank { threshold: 400, name: "Rank 3 Elder" },
    Rank { threshold: 800, name: "Rank 4 King" },
    Rank { threshold: 1600, name: "Rank 5 Emperor" },
    Rank { threshold: 3200, name: "Rank 6 Immortal" },
    Rank { threshold: 6400, name: "Rank 7 Taoist" },
    Rank { threshold: 12800, name: "Rank 8 Overlord" },
    Rank { threshold: 25600, name: "Rank 9 Venerable" },
    Rank { threshold: 51200, name: "Rank 10 Eternal" },
];

/// Highest-threshold rank whose threshold is <= `points`.
pub fn rank_for(points: i64) -> &'static Rank {
    RANKS
        .iter()
        .rev()
        .find(|r| points >= r.threshold)
        .unwrap_or(&RANKS[0])
}

fn position(name: &str) -> Option<usize> {
    RANKS.iter().position(|r| r.name == name)
}

/// The next rank above `points`, if any, with the essence still needed.
pub fn next_rank(points: i64) -> Option<(&'static Rank, i64)> {
    RANKS
        .iter()
        .find(|r| r.threshold > points)
        .map(|r| (r, r.threshold - points))
}

/// Recompute `stats.rank` from `stats.total_points`. A change in either
/// direction emits a notice; a promotion is also written to the milestone log.
pub fn check_rank(data: &mut AppData, moment: &Moment, notices: &mut Vec<Notice>) {
    let computed = rank_for(data.stats.total_points);
    if data.stats.rank == computed.name {
        return;
    }
    let previous = std::mem::replace(&mut data.stats.rank, computed.name.to_string());
    let promoted = match (position(&previous), position(computed.name)) {
        (Some(old), Some(new)) => new > old,
        _ => true,
    };
    tracing::debug!(from = %previous, to = computed.name, promoted, "rank changed");
    if promoted {
        data.record_milestone(
            MilestoneKind::RankUp,
            format!("Ascended to {}", computed.name),
            format!(
                "Reached {} Primeval Essence and broke through to {}.",
                data.stats.total_points, computed.name
            ),
            moment,
        );
    }
    notices.push(Notice::RankChanged {
        from: previous,
        to: computed.name.to_string(),
        promoted,
    });
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
