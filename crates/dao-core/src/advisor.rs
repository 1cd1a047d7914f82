use crate::clock::Moment;
use crate::model::{AdvisorFeedback, AppData};
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Advice older than this many days is refreshed.
pub const ADVISOR_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorDraft {
    pub headline: String,
    pub praise: String,
    pub critique: String,
    pub suggestion: String,
}

/// What the advisor is told about the past week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekSummary {
    pub objective: String,
    pub short_term_goal: String,
    pub completed_tasks: Vec<String>,
    pub incomplete_tasks: Vec<String>,
    pub points_gained: i64,
    pub rank: String,
}

pub fn summarize_week(data: &AppData, moment: &Moment) -> WeekSummary {
    let since = moment.today - Duration::days(6);
    let (done, open): (Vec<_>, Vec<_>) = data.weekly_tasks.iter().map(|(_, t)| t).partition(|t| t.completed);
    WeekSummary {
        objective: data.objective.clone(),
        short_term_goal: data.short_term_goal.clone(),
        completed_tasks: done.into_iter().map(|t| t.text.clone()).collect(),
        incomplete_tasks: open.into_iter().map(|t| t.text.clone()).collect(),
        points_gained: data
            .stats
            .daily_progress
            .iter()
            .filter(|d| d.date >= since && d.date <= moment.today)
            .map(|d| d.points)
            .sum(),
        rank: data.stats.rank.clone(),
    }
}

/// Due on Mondays when no advice exists, or once the last advice has aged
/// past the window.
pub fn advisor_due(data: &AppData, moment: &Moment) -> bool {
    match &data.advisor {
        None => moment.is_monday(),
        Some(a) => moment.days_since(a.generated_date) > ADVISOR_WINDOW_DAYS,
    }
}

pub fn set_advisor(data: &mut AppData, draft: AdvisorDraft, moment: &Moment) {
    data.advisor = Some(AdvisorFeedback {
        headline: draft.headline,
        praise: draft.praise,
        critique: draft.critique,
        suggestion: draft.suggestion,
        generated_date: moment.now,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Task;
    use crate::types::Difficulty;
    use chrono::NaiveDate;

    fn monday() -> Moment {
        Moment::on(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap())
    }

    fn draft() -> AdvisorDraft {
        AdvisorDraft {
            headline: "A Double-Edged Sword".into(),
            praise: "Diligent.".into(),
            critique: "Unbalanced.".into(),
            suggestion: "Rest.".into(),
        }
    }

    #[test]
    fn week_summary_splits_tasks_and_sums_recent_points() {
        let mut data = AppData::default();
        let mut done = Task::new(1, "Run", Difficulty::Easy);
        done.completed = true;
        data.weekly_tasks.monday.push(done);
        data.weekly_tasks
            .tuesday
            .push(Task::new(2, "Read", Difficulty::Easy));
        let today = monday().today;
        data.stats.record_daily(today, 10);
        data.stats.record_daily(today - Duration::days(6), 5);
        data.stats.record_daily(today - Duration::days(7), 100);

        let summary = summarize_week(&data, &monday());
        assert_eq!(summary.completed_tasks, vec!["Run"]);
        assert_eq!(summary.incomplete_tasks, vec!["Read"]);
        assert_eq!(summary.points_gained, 15);
    }

    #[test]
    fn advisor_cadence() {
        let mut data = AppData::default();
        assert!(advisor_due(&data, &monday()));
        assert!(!advisor_due(&data, &monday().plus_days(2)));

        set_advisor(&mut data, draft(), &monday());
        assert!(!advisor_due(&data, &monday().plus_days(7)));
        assert!(advisor_due(&data, &monday().plus_days(8)));
    }
}
