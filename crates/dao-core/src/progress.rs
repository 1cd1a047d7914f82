//! The point economy: awarding and retracting essence, the daily aperture,
//! the streak counter and the reward accumulator.

use crate::achievement::check_achievements;
use crate::clock::Moment;
use crate::error::{DaoError, Result};
use crate::model::{AppData, Task};
use crate::notice::Notice;
use crate::rank::check_rank;
use crate::types::MilestoneKind;

// ---------------------------------------------------------------------------
// Completion accounting
// ---------------------------------------------------------------------------

/// Reconcile the economy after a whole scheme flips state.
///
/// Completing awards at most the remaining daily capacity. Un-completing
/// retracts the full `actual_points` but leaves the daily counter alone, so
/// toggling cannot be used to refill the aperture.
pub fn settle_completion(
    data: &mut AppData,
    task: &Task,
    is_completing: bool,
    moment: &Moment,
    notices: &mut Vec<Notice>,
) {
    let points = task.actual_points.max(0);
    if is_completing {
        let essence = points.min(data.stats.remaining_capacity());
        if essence < points {
            notices.push(Notice::CapacityReached {
                awarded: essence.max(0),
                requested: points,
            });
        }
        if essence > 0 {
            data.stats.total_points += essence;
            data.stats.current_essence_earned_today += essence;
            data.reward_system.progress += essence;
            data.stats.record_daily(moment.today, essence);
        }
        data.stats.all_time_tasks_completed += 1;
        update_streak(data, moment);
        tracing::debug!(task = task.id, essence, "scheme completed");
    } else {
        data.stats.total_points = (data.stats.total_points - points).max(0);
        data.reward_system.progress = (data.reward_system.progress - points).max(0);
        data.stats.all_time_tasks_completed = data.stats.all_time_tasks_completed.saturating_sub(1);
        data.stats.retract_daily(moment.today, points);
        tracing::debug!(task = task.id, points, "scheme reopened");
    }
    check_rank(data, moment, notices);
    check_achievements(data, notices);
}

// ---------------------------------------------------------------------------
// Streak
// ---------------------------------------------------------------------------

/// Same day: no-op. Yesterday: extend. Anything else: restart at 1.
pub fn update_streak(data: &mut AppData, moment: &Moment) {
    let today = moment.today;
    match data.stats.last_completed_date {
        Some(last) if last == today => return,
        Some(last) if last == moment.yesterday() => data.stats.streak += 1,
        _ => data.stats.streak = 1,
    }
    data.stats.last_completed_date = Some(today);
}

// ---------------------------------------------------------------------------
// Daily aperture
// ---------------------------------------------------------------------------

/// Lazily roll the daily earning counter over when the local date changes.
/// Returns true if a reset happened.
pub fn reset_daily_capacity(data: &mut AppData, moment: &Moment) -> bool {
    if data.stats.last_date_for_essence == Some(moment.today) {
        return false;
    }
    data.stats.current_essence_earned_today = 0;
    data.stats.last_date_for_essence = Some(moment.today);
    true
}

pub fn set_daily_capacity(data: &mut AppData, capacity: i64) -> Result<()> {
    if capacity <= 0 {
        return Err(DaoError::InvalidAmount(capacity));
    }
    data.stats.daily_essence_capacity = capacity;
    Ok(())
}

// ---------------------------------------------------------------------------
// Waste essence
// ---------------------------------------------------------------------------

/// Deduct essence as penance for a transgression. Can demote.
pub fn waste_essence(
    data: &mut AppData,
    amount: i64,
    reason: &str,
    moment: &Moment,
    notices: &mut Vec<Notice>,
) -> Result<()> {
    if amount <= 0 {
        return Err(DaoError::InvalidAmount(amount));
    }
    let reason = match reason.trim() {
        "" => "unspecified transgression",
        r => r,
    };
    data.stats.total_points = (data.stats.total_points - amount).max(0);
    data.reward_system.progress = (data.reward_system.progress - amount).max(0);
    notices.push(Notice::EssenceWasted {
        amount,
        reason: reason.to_string(),
    });
    check_rank(data, moment, notices);
    Ok(())
}

// ---------------------------------------------------------------------------
// Reward system
// ---------------------------------------------------------------------------

/// Partial update: only the provided fields change.
pub fn set_reward(data: &mut AppData, text: Option<&str>, goal: Option<i64>) -> Result<()> {
    if let Some(goal) = goal {
        if goal <= 0 {
            return Err(DaoError::InvalidAmount(goal));
        }
        data.reward_system.goal = goal;
    }
    if let Some(text) = text {
        data.reward_system.text = text.to_string();
    }
    Ok(())
}

pub fn claim_reward(data: &mut AppData, moment: &Moment, notices: &mut Vec<Notice>) -> Result<()> {
    if !data.reward_system.is_ready() {
        return Err(DaoError::RewardNotReady {
            progress: data.reward_system.progress,
            goal: data.reward_system.goal,
        });
    }
    data.reward_system.progress = 0;
    data.stats.rewards_claimed += 1;
    let text = data.reward_system.text.clone();
    data.record_milestone(
        MilestoneKind::RewardClaimed,
        "Gu Refined",
        if text.is_empty() {
            "Claimed a well-earned reward.".to_string()
        } else {
            format!("Claimed: {text}")
        },
        moment,
    );
    notices.push(Notice::RewardClaimed { text });
    check_achievements(data, notices);
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
