use crate::achievement::check_achievements;
use crate::clock::Moment;
use crate::error::{DaoError, Result};
use crate::model::{AppData, SubTask, Task, FOCUS_LIMIT};
use crate::notice::{FocusRejection, Notice};
use crate::progress::settle_completion;
use crate::types::Day;
use serde::Serialize;

// ---------------------------------------------------------------------------
// TaskAction
// ---------------------------------------------------------------------------

/// Every mutation the scheme board accepts.
#[derive(Debug, Clone)]
pub enum TaskAction {
    Add { day: Day, task: Task },
    AddMultiple { day: Day, tasks: Vec<Task> },
    AddSubtask { task_id: u64, text: String },
    /// `id` may name a scheme or a subtask.
    Toggle { id: u64 },
    Update { task: Task },
    /// `id` may name a scheme or a subtask.
    Delete { id: u64 },
    Focus { id: u64 },
    Unfocus { id: u64 },
}

/// Apply one action to the board, reconcile the economy when a whole scheme
/// flips, then re-evaluate achievements.
///
/// Operations naming an unknown id, or carrying a negative essence value,
/// fail before touching `data`. A focus request that would overflow the list
/// or duplicate an entry is refused with a notice and leaves `data` unchanged.
pub fn apply(
    data: &mut AppData,
    action: TaskAction,
    moment: &Moment,
    notices: &mut Vec<Notice>,
) -> Result<()> {
    match action {
        TaskAction::Add { day, task } => {
            check_points(&task)?;
            add(data, day, task);
        }
        TaskAction::AddMultiple { day, tasks } => {
            tasks.iter().try_for_each(check_points)?;
            for task in tasks {
                add(data, day, task);
            }
        }
        TaskAction::AddSubtask { task_id, text } => {
            let id = data.next_id(moment);
            let task = data
                .weekly_tasks
                .find_mut(task_id)
                .ok_or(DaoError::TaskNotFound(task_id))?;
            task.subtasks.push(SubTask {
                id,
                text,
                completed: false,
            });
        }
        TaskAction::Toggle { id } => toggle(data, id, moment, notices)?,
        TaskAction::Update { task } => {
            check_points(&task)?;
            let slot = data
                .weekly_tasks
                .find_mut(task.id)
                .ok_or(DaoError::TaskNotFound(task.id))?;
            *slot = task;
        }
        TaskAction::Delete { id } => delete(data, id)?,
        TaskAction::Focus { id } => {
            if data.weekly_tasks.find(id).is_none() {
                return Err(DaoError::TaskNotFound(id));
            }
            if data.top3_task_ids.contains(&id) {
                notices.push(Notice::FocusRejected {
                    reason: FocusRejection::AlreadyFocused,
                });
            } else if data.top3_task_ids.len() >= FOCUS_LIMIT {
                notices.push(Notice::FocusRejected {
                    reason: FocusRejection::Full,
                });
            } else {
                data.top3_task_ids.push(id);
            }
        }
        TaskAction::Unfocus { id } => data.top3_task_ids.retain(|&f| f != id),
    }
    check_achievements(data, notices);
    Ok(())
}

/// Essence values below zero would let a reopen mint points.
fn check_points(task: &Task) -> Result<()> {
    if task.actual_points < 0 {
        return Err(DaoError::InvalidPoints(task.actual_points));
    }
    Ok(())
}

fn add(data: &mut AppData, day: Day, task: Task) {
    data.weekly_tasks.day_mut(day).push(task);
    data.stats.tasks_started += 1;
}

fn toggle(data: &mut AppData, id: u64, moment: &Moment, notices: &mut Vec<Notice>) -> Result<()> {
    if let Some(task) = data.weekly_tasks.find_mut(id) {
        task.completed = !task.completed;
        let completed = task.completed;
        for sub in &mut task.subtasks {
            sub.completed = completed;
        }
        let snapshot = task.clone();
        settle_completion(data, &snapshot, completed, moment, notices);
        return Ok(());
    }

    let (day, idx) = data
        .weekly_tasks
        .locate_subtask_owner(id)
        .ok_or(DaoError::TaskNotFound(id))?;
    let parent = &mut data.weekly_tasks.day_mut(day)[idx];
    if let Some(sub) = parent.subtasks.iter_mut().find(|s| s.id == id) {
        sub.completed = !sub.completed;
        if !sub.completed {
            parent.completed = false;
        }
    }
    Ok(())
}

fn delete(data: &mut AppData, id: u64) -> Result<()> {
    if let Some((day, idx)) = data.weekly_tasks.locate(id) {
        data.weekly_tasks.day_mut(day).remove(idx);
        data.top3_task_ids.retain(|&f| f != id);
        return Ok(());
    }
    let (day, idx) = data
        .weekly_tasks
        .locate_subtask_owner(id)
        .ok_or(DaoError::TaskNotFound(id))?;
    data.weekly_tasks.day_mut(day)[idx]
        .subtasks
        .retain(|s| s.id != id);
    Ok(())
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct SearchHit<'a> {
    pub day: Day,
    #[serde(flatten)]
    pub task: &'a Task,
}

/// Case-insensitive match on scheme text, benefits or any subtask text.
/// An empty query matches nothing.
pub fn search<'a>(data: &'a AppData, query: &str) -> Vec<SearchHit<'a>> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    data.weekly_tasks
        .iter()
        .filter(|(_, t)| {
            t.text.to_lowercase().contains(&needle)
                || t.benefits.to_lowercase().contains(&needle)
                || t.subtasks
                    .iter()
                    .any(|s| s.text.to_lowercase().contains(&needle))
        })
        .map(|(day, task)| SearchHit { day, task })
        .collect()
}

/// The focused schemes that still exist, in focus order.
pub fn focused(data: &AppData) -> Vec<&Task> {
    data.top3_task_ids
        .iter()
        .filter_map(|&id| data.weekly_tasks.find(id))
        .collect()
}

/// Human-readable summary: "3/5 schemes complete, 2 pending"
pub fn summarize(data: &AppData) -> String {
    let total = data.weekly_tasks.len();
    let done = data.weekly_tasks.iter().filter(|(_, t)| t.completed).count();
    format!("{done}/{total} schemes complete, {} pending", total - done)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Difficulty;
    use chrono::NaiveDate;

    fn monday() -> Moment {
        Moment::on(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap())
    }

    fn run(data: &mut AppData, action: TaskAction) -> Vec<Notice> {
        let mut notices = Vec::new();
        apply(data, action, &monday(), &mut notices).unwrap();
        notices
    }

    fn board_with(ids: &[u64], points: i64) -> AppData {
        let mut data = AppData::default();
        for &id in ids {
            run(
                &mut data,
                TaskAction::Add {
                    day: Day::Monday,
                    task: Task::new(id, format!("scheme {id}"), Difficulty::Medium).with_points(points),
                },
            );
        }
        data
    }

    #[test]
    fn add_counts_started() {
        let mut data = AppData::default();
        run(
            &mut data,
            TaskAction::AddMultiple {
                day: Day::Friday,
                tasks: vec![
                    Task::new(1, "a", Difficulty::Easy),
                    Task::new(2, "b", Difficulty::Easy),
                ],
            },
        );
        assert_eq!(data.stats.tasks_started, 2);
        let ids: Vec<u64> = data.weekly_tasks.friday.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn toggle_twice_restores_economy_but_not_aperture() {
        let mut data = board_with(&[1], 20);
        let before = data.clone();
        run(&mut data, TaskAction::Toggle { id: 1 });
        assert_eq!(data.stats.total_points, 20);
        run(&mut data, TaskAction::Toggle { id: 1 });

        assert_eq!(data.stats.total_points, before.stats.total_points);
        assert_eq!(
            data.stats.all_time_tasks_completed,
            before.stats.all_time_tasks_completed
        );
        assert_eq!(data.reward_system.progress, before.reward_system.progress);
        assert_eq!(data.stats.current_essence_earned_today, 20);
    }

    #[test]
    fn toggle_twice_restores_totals_at_any_value() {
        for points in [0, 1, 5, 10, 50, 100] {
            let mut data = board_with(&[1], points);
            data.stats.total_points = 250;
            data.reward_system.progress = 30;
            data.stats.all_time_tasks_completed = 4;
            let before = data.clone();

            run(&mut data, TaskAction::Toggle { id: 1 });
            run(&mut data, TaskAction::Toggle { id: 1 });

            assert_eq!(data.stats.total_points, before.stats.total_points, "points {points}");
            assert_eq!(data.reward_system.progress, before.reward_system.progress);
            assert_eq!(
                data.stats.all_time_tasks_completed,
                before.stats.all_time_tasks_completed
            );
        }
    }

    #[test]
    fn negative_points_are_rejected() {
        let mut data = board_with(&[1], 5);
        let before = data.clone();
        let mut notices = Vec::new();
        let negative = Task::new(2, "mint", Difficulty::Easy).with_points(-500);

        let add = apply(
            &mut data,
            TaskAction::Add {
                day: Day::Monday,
                task: negative.clone(),
            },
            &monday(),
            &mut notices,
        );
        assert!(matches!(add, Err(DaoError::InvalidPoints(-500))));

        let many = apply(
            &mut data,
            TaskAction::AddMultiple {
                day: Day::Monday,
                tasks: vec![Task::new(3, "fine", Difficulty::Easy), negative],
            },
            &monday(),
            &mut notices,
        );
        assert!(matches!(many, Err(DaoError::InvalidPoints(-500))));

        let update = apply(
            &mut data,
            TaskAction::Update {
                task: Task::new(1, "scheme 1", Difficulty::Medium).with_points(-1),
            },
            &monday(),
            &mut notices,
        );
        assert!(matches!(update, Err(DaoError::InvalidPoints(-1))));
        assert_eq!(data, before);
    }

    #[test]
    fn completing_cascades_to_subtasks() {
        let mut data = board_with(&[1], 5);
        run(
            &mut data,
            TaskAction::AddSubtask {
                task_id: 1,
                text: "step".into(),
            },
        );
        run(&mut data, TaskAction::Toggle { id: 1 });
        let task = data.weekly_tasks.find(1).unwrap();
        assert!(task.completed);
        assert!(task.subtasks.iter().all(|s| s.completed));
    }

    #[test]
    fn unchecking_subtask_reopens_parent_without_points() {
        let mut data = board_with(&[1], 5);
        run(
            &mut data,
            TaskAction::AddSubtask {
                task_id: 1,
                text: "step".into(),
            },
        );
        run(&mut data, TaskAction::Toggle { id: 1 });
        let sub_id = data.weekly_tasks.find(1).unwrap().subtasks[0].id;
        let points = data.stats.total_points;

        run(&mut data, TaskAction::Toggle { id: sub_id });
        let task = data.weekly_tasks.find(1).unwrap();
        assert!(!task.completed);
        assert!(!task.subtasks[0].completed);
        assert_eq!(data.stats.total_points, points);
    }

    #[test]
    fn unknown_id_is_rejected_without_change() {
        let mut data = board_with(&[1], 5);
        let before = data.clone();
        let mut notices = Vec::new();
        let err = apply(&mut data, TaskAction::Toggle { id: 99 }, &monday(), &mut notices);
        assert!(matches!(err, Err(DaoError::TaskNotFound(99))));
        assert_eq!(data, before);
    }

    #[test]
    fn update_replaces_whole_task() {
        let mut data = board_with(&[1], 5);
        let replacement = Task::new(1, "renamed", Difficulty::Hard).with_benefits("clarity");
        run(&mut data, TaskAction::Update { task: replacement.clone() });
        assert_eq!(data.weekly_tasks.find(1).unwrap(), &replacement);
        assert!(data.stats.has_achievement("first_benefit"));
    }

    #[test]
    fn delete_prunes_focus() {
        let mut data = board_with(&[1, 2], 5);
        run(&mut data, TaskAction::Focus { id: 1 });
        run(&mut data, TaskAction::Delete { id: 1 });
        assert!(data.weekly_tasks.find(1).is_none());
        assert!(data.top3_task_ids.is_empty());
    }

    #[test]
    fn delete_falls_back_to_subtask() {
        let mut data = board_with(&[1], 5);
        run(
            &mut data,
            TaskAction::AddSubtask {
                task_id: 1,
                text: "step".into(),
            },
        );
        let sub_id = data.weekly_tasks.find(1).unwrap().subtasks[0].id;
        run(&mut data, TaskAction::Delete { id: sub_id });
        assert!(data.weekly_tasks.find(1).unwrap().subtasks.is_empty());
    }

    #[test]
    fn fourth_focus_is_rejected() {
        let mut data = board_with(&[1, 2, 3, 4], 5);
        for id in 1..=3 {
            run(&mut data, TaskAction::Focus { id });
        }
        let notices = run(&mut data, TaskAction::Focus { id: 4 });
        assert_eq!(data.top3_task_ids, vec![1, 2, 3]);
        assert_eq!(
            notices,
            vec![Notice::FocusRejected {
                reason: FocusRejection::Full
            }]
        );
    }

    #[test]
    fn focusing_unknown_scheme_fails() {
        let mut data = AppData::default();
        let mut notices = Vec::new();
        let err = apply(&mut data, TaskAction::Focus { id: 424242 }, &monday(), &mut notices);
        assert!(matches!(err, Err(DaoError::TaskNotFound(424242))));
        assert!(data.top3_task_ids.is_empty());
        assert!(notices.is_empty());
    }

    #[test]
    fn duplicate_focus_is_rejected() {
        let mut data = board_with(&[1], 5);
        run(&mut data, TaskAction::Focus { id: 1 });
        let notices = run(&mut data, TaskAction::Focus { id: 1 });
        assert_eq!(data.top3_task_ids, vec![1]);
        assert!(matches!(
            notices[0],
            Notice::FocusRejected {
                reason: FocusRejection::AlreadyFocused
            }
        ));
    }

    #[test]
    fn unfocus_is_unconditional() {
        let mut data = board_with(&[1], 5);
        run(&mut data, TaskAction::Unfocus { id: 42 });
        run(&mut data, TaskAction::Focus { id: 1 });
        run(&mut data, TaskAction::Unfocus { id: 1 });
        assert!(data.top3_task_ids.is_empty());
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let mut data = AppData::default();
        data.weekly_tasks
            .monday
            .push(Task::new(1, "Temper the Body", Difficulty::Easy));
        data.weekly_tasks
            .tuesday
            .push(Task::new(2, "Read", Difficulty::Easy).with_benefits("sharpen the MIND"));
        assert_eq!(search(&data, "temper").len(), 1);
        let hits = search(&data, "mind");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].day, Day::Tuesday);
        assert!(search(&data, "   ").is_empty());
    }

    #[test]
    fn summary_counts() {
        let mut data = board_with(&[1, 2], 5);
        run(&mut data, TaskAction::Toggle { id: 2 });
        assert_eq!(summarize(&data), "1/2 schemes complete, 1 pending");
    }
}
