use crate::clock::Moment;
use crate::error::{DaoError, Result};
use crate::model::{AppData, Nemesis, DEFAULT_RANK};
use crate::notice::Notice;
use crate::types::MilestoneKind;
use serde::{Deserialize, Serialize};

/// A rival as described by the generative collaborator, before it is given an
/// identity in the aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NemesisDraft {
    pub name: String,
    pub title: String,
    pub rank: String,
    pub points: i64,
    #[serde(default)]
    pub backstory: String,
    #[serde(default)]
    pub last_action: String,
}

/// Rivals advance at most once per this many days during a refresh.
pub const RIVAL_UPDATE_DAYS: i64 = 7;

/// Whether a first rival should be summoned: none exists yet and the user has
/// left the starting rank.
pub fn first_rival_due(data: &AppData) -> bool {
    data.nemesis.is_empty() && data.stats.rank != DEFAULT_RANK
}

/// Rivals whose last advance is older than the update window.
pub fn stale_rivals(data: &AppData, moment: &Moment) -> Vec<u64> {
    data.nemesis
        .iter()
        .filter(|n| moment.days_since(n.last_updated) > RIVAL_UPDATE_DAYS)
        .map(|n| n.id)
        .collect()
}

/// Add a new rival. Returns its id.
pub fn add(data: &mut AppData, draft: NemesisDraft, moment: &Moment, notices: &mut Vec<Notice>) -> u64 {
    let id = data.next_id(moment);
    let name = draft.name.clone();
    data.nemesis.push(Nemesis {
        id,
        name: draft.name,
        title: draft.title,
        rank: draft.rank,
        points: draft.points,
        backstory: draft.backstory,
        last_action: draft.last_action,
        last_updated: moment.now,
    });
    data.record_milestone(
        MilestoneKind::NemesisGenerated,
        format!("A rival emerges: {name}"),
        "A new challenger has appeared on your path.",
        moment,
    );
    notices.push(Notice::RivalEmerges { name });
    id
}

/// Replace the rival `id` with the drafted fields, keeping its identity.
pub fn update(data: &mut AppData, id: u64, draft: NemesisDraft, moment: &Moment) -> Result<()> {
    let slot = data
        .nemesis
        .iter_mut()
        .find(|n| n.id == id)
        .ok_or(DaoError::NemesisNotFound(id))?;
    *slot = Nemesis {
        id,
        name: draft.name,
        title: draft.title,
        rank: draft.rank,
        points: draft.points,
        backstory: draft.backstory,
        last_action: draft.last_action,
        last_updated: moment.now,
    };
    Ok(())
}

pub fn delete(data: &mut AppData, id: u64) -> Result<()> {
    let before = data.nemesis.len();
    data.nemesis.retain(|n| n.id != id);
    if data.nemesis.len() == before {
        return Err(DaoError::NemesisNotFound(id));
    }
    Ok(())
}

/// Merge a batch of resolved rival updates into the latest snapshot.
///
/// Updates for rivals deleted in the meantime are dropped. Returns how many
/// rivals changed.
pub fn merge_updates(
    data: &mut AppData,
    updates: Vec<(u64, NemesisDraft)>,
    moment: &Moment,
    notices: &mut Vec<Notice>,
) -> usize {
    let mut changed = 0;
    for (id, draft) in updates {
        match update(data, id, draft, moment) {
            Ok(()) => changed += 1,
            Err(_) => tracing::debug!(id, "dropping update for departed rival"),
        }
    }
    if changed > 0 {
        notices.push(Notice::RivalsUpdated { count: changed });
    }
    changed
}

impl From<&Nemesis> for NemesisDraft {
    fn from(n: &Nemesis) -> Self {
        Self {
            name: n.name.clone(),
            title: n.title.clone(),
            rank: n.rank.clone(),
            points: n.points,
            backstory: n.backstory.clone(),
            last_action: n.last_action.clone(),
        }
    }
}
