use crate::achievement::check_achievements;
use crate::clock::Moment;
use crate::error::{DaoError, Result};
use crate::model::{AppData, Tribulation};
use crate::notice::Notice;
use crate::rank::check_rank;
use crate::types::MilestoneKind;
use serde::{Deserialize, Serialize};

/// A tribulation left pending for longer than this many days fails on its own.
pub const TRIBULATION_WINDOW_DAYS: i64 = 7;

/// The fields the generative collaborator fills in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TribulationDraft {
    pub title: String,
    pub description: String,
    pub reward: i64,
    pub penalty: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TribulationOutcome {
    Completed,
    Failed,
}

/// What the weekly check decided should happen next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TribulationDue {
    /// Nothing to do.
    None,
    /// A fresh tribulation should be requested from the collaborator.
    Generate,
    /// The pending tribulation timed out and must be failed.
    AutoFail,
}

/// Store a freshly generated tribulation, replacing any previous one.
pub fn accept(data: &mut AppData, draft: TribulationDraft, moment: &Moment, notices: &mut Vec<Notice>) {
    notices.push(Notice::TribulationDescends {
        title: draft.title.clone(),
    });
    data.tribulation = Some(Tribulation {
        title: draft.title,
        description: draft.description,
        reward: draft.reward.max(0),
        penalty: draft.penalty.max(0),
        completed: false,
        failed: false,
        generated_date: moment.now,
    });
}

/// Resolve the active tribulation. Only a pending one can be resolved.
pub fn resolve(
    data: &mut AppData,
    outcome: TribulationOutcome,
    moment: &Moment,
    notices: &mut Vec<Notice>,
) -> Result<()> {
    resolve_inner(data, outcome, false, moment, notices)
}

fn resolve_inner(
    data: &mut AppData,
    outcome: TribulationOutcome,
    automatic: bool,
    moment: &Moment,
    notices: &mut Vec<Notice>,
) -> Result<()> {
    let trib = data.tribulation.as_mut().ok_or(DaoError::NoTribulation)?;
    if !trib.is_pending() {
        return Err(DaoError::TribulationResolved(trib.title.clone()));
    }
    let title = trib.title.clone();
    match outcome {
        TribulationOutcome::Completed => {
            trib.completed = true;
            let reward = trib.reward;
            data.stats.total_points = data.stats.total_points.saturating_add(reward);
            data.record_milestone(
                MilestoneKind::TribulationComplete,
                format!("Survived: {title}"),
                format!("Earned {reward} Primeval Essence."),
                moment,
            );
            notices.push(Notice::TribulationSurvived { reward });
        }
        TribulationOutcome::Failed => {
            trib.failed = true;
            let penalty = trib.penalty;
            data.stats.total_points = data.stats.total_points.saturating_sub(penalty).max(0);
            data.record_milestone(
                MilestoneKind::TribulationFailed,
                format!("Failed: {title}"),
                format!("Lost {penalty} Primeval Essence."),
                moment,
            );
            notices.push(Notice::TribulationFailed { penalty, automatic });
        }
    }
    tracing::debug!(%title, ?outcome, automatic, "tribulation resolved");
    check_rank(data, moment, notices);
    check_achievements(data, notices);
    Ok(())
}

/// Decide whether a tribulation should be generated or auto-failed.
///
/// With none on record, one is due on Mondays. A pending one older than the
/// window fails. A resolved one older than the window is replaced.
pub fn due(data: &AppData, moment: &Moment) -> TribulationDue {
    match &data.tribulation {
        None if moment.is_monday() => TribulationDue::Generate,
        None => TribulationDue::None,
        Some(trib) => {
            if moment.days_since(trib.generated_date) <= TRIBULATION_WINDOW_DAYS {
                TribulationDue::None
            } else if trib.is_pending() {
                TribulationDue::AutoFail
            } else {
                TribulationDue::Generate
            }
        }
    }
}

/// Fail a timed-out tribulation. Returns true if one was failed.
pub fn expire(data: &mut AppData, moment: &Moment, notices: &mut Vec<Notice>) -> Result<bool> {
    if due(data, moment) != TribulationDue::AutoFail {
        return Ok(false);
    }
    resolve_inner(data, TribulationOutcome::Failed, true, moment, notices)?;
    Ok(true)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn monday() -> Moment {
        Moment::on(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap())
    }

    fn draft() -> TribulationDraft {
        TribulationDraft {
            title: "Trial of the Iron Will".into(),
            description: "Ship the prototype.".into(),
            reward: 200,
            penalty: 100,
        }
    }

    #[test]
    fn monday_without_tribulation_is_due() {
        let data = AppData::default();
        assert_eq!(due(&data, &monday()), TribulationDue::Generate);
        assert_eq!(due(&data, &monday().plus_days(1)), TribulationDue::None);
    }

    #[test]
    fn completing_awards_reward_and_achievement() {
        let mut data = AppData::default();
        let mut notices = Vec::new();
        accept(&mut data, draft(), &monday(), &mut notices);
        resolve(&mut data, TribulationOutcome::Completed, &monday(), &mut notices).unwrap();

        assert_eq!(data.stats.total_points, 200);
        assert_eq!(data.stats.rank, "Rank 2 Master");
        assert!(data.stats.has_achievement("tribulation_survived"));
        assert!(data
            .milestones
            .iter()
            .any(|m| m.kind == MilestoneKind::TribulationComplete));
    }

    #[test]
    fn failing_floors_at_zero() {
        let mut data = AppData::default();
        data.stats.total_points = 30;
        let mut notices = Vec::new();
        accept(&mut data, draft(), &monday(), &mut notices);
        resolve(&mut data, TribulationOutcome::Failed, &monday(), &mut notices).unwrap();
        assert_eq!(data.stats.total_points, 0);
        assert!(data.tribulation.as_ref().unwrap().failed);
    }

    #[test]
    fn resolved_tribulation_cannot_be_resolved_again() {
        let mut data = AppData::default();
        let mut notices = Vec::new();
        accept(&mut data, draft(), &monday(), &mut notices);
        resolve(&mut data, TribulationOutcome::Completed, &monday(), &mut notices).unwrap();
        let again = resolve(&mut data, TribulationOutcome::Failed, &monday(), &mut notices);
        assert!(matches!(again, Err(DaoError::TribulationResolved(_))));
        assert_eq!(data.stats.total_points, 200);
    }

    #[test]
    fn resolve_without_tribulation_errors() {
        let mut data = AppData::default();
        let mut notices = Vec::new();
        assert!(matches!(
            resolve(&mut data, TribulationOutcome::Completed, &monday(), &mut notices),
            Err(DaoError::NoTribulation)
        ));
    }

    #[test]
    fn eight_idle_days_auto_fail() {
        let mut data = AppData::default();
        data.stats.total_points = 250;
        data.stats.rank = "Rank 2 Master".into();
        let mut notices = Vec::new();
        accept(&mut data, draft(), &monday(), &mut notices);

        let week_later = monday().plus_days(7);
        assert_eq!(due(&data, &week_later), TribulationDue::None);
        assert!(!expire(&mut data, &week_later, &mut notices).unwrap());

        let later = monday().plus_days(8);
        assert_eq!(due(&data, &later), TribulationDue::AutoFail);
        assert!(expire(&mut data, &later, &mut notices).unwrap());
        assert!(data.tribulation.as_ref().unwrap().failed);
        assert_eq!(data.stats.total_points, 150);
        assert!(notices.contains(&Notice::TribulationFailed {
            penalty: 100,
            automatic: true
        }));

        // Once resolved and stale, a new one is requested.
        assert_eq!(due(&data, &later), TribulationDue::Generate);
    }

    #[test]
    fn negative_draft_values_are_clamped() {
        let mut data = AppData::default();
        let mut notices = Vec::new();
        let mut d = draft();
        d.penalty = -40;
        accept(&mut data, d, &monday(), &mut notices);
        assert_eq!(data.tribulation.as_ref().unwrap().penalty, 0);
    }

    #[test]
    fn oversized_reward_saturates() {
        let mut data = AppData::default();
        data.stats.total_points = 10;
        let mut notices = Vec::new();
        let mut d = draft();
        d.reward = i64::MAX;
        accept(&mut data, d, &monday(), &mut notices);
        resolve(&mut data, TribulationOutcome::Completed, &monday(), &mut notices).unwrap();
        assert_eq!(data.stats.total_points, i64::MAX);
        assert_eq!(data.stats.rank, "Rank 10 Eternal");
    }
}
