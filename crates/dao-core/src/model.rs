use crate::clock::Moment;
use crate::types::{Day, Difficulty, MilestoneKind, Sentiment};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_RANK: &str = "Recruit";
pub const DEFAULT_REWARD_GOAL: i64 = 50;
pub const DEFAULT_DAILY_CAPACITY: i64 = 100;
pub const FOCUS_LIMIT: usize = 3;

// ---------------------------------------------------------------------------
// Task / SubTask
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubTask {
    pub id: u64,
    pub text: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub text: String,
    pub benefits: String,
    pub completed: bool,
    pub difficulty: Difficulty,
    pub actual_points: i64,
    pub subtasks: Vec<SubTask>,
}

impl Task {
    /// A fresh, incomplete scheme worth the difficulty's default essence.
    pub fn new(id: u64, text: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            id,
            text: text.into(),
            benefits: String::new(),
            completed: false,
            difficulty,
            actual_points: difficulty.default_points(),
            subtasks: Vec::new(),
        }
    }

    pub fn with_benefits(mut self, benefits: impl Into<String>) -> Self {
        self.benefits = benefits.into();
        self
    }

    pub fn with_points(mut self, points: i64) -> Self {
        self.actual_points = points;
        self
    }
}

// ---------------------------------------------------------------------------
// WeeklyTasks
// ---------------------------------------------------------------------------

/// Schemes grouped by day. Every day key is always present; a blob missing a
/// day back-fills it as an empty list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeeklyTasks {
    pub monday: Vec<Task>,
    pub tuesday: Vec<Task>,
    pub wednesday: Vec<Task>,
    pub thursday: Vec<Task>,
    pub friday: Vec<Task>,
    pub saturday: Vec<Task>,
    pub sunday: Vec<Task>,
}

impl WeeklyTasks {
    pub fn day(&self, day: Day) -> &Vec<Task> {
        match day {
            Day::Monday => &self.monday,
            Day::Tuesday => &self.tuesday,
            Day::Wednesday => &self.wednesday,
            Day::Thursday => &self.thursday,
            Day::Friday => &self.friday,
            Day::Saturday => &self.saturday,
            Day::Sunday => &self.sunday,
        }
    }

    pub fn day_mut(&mut self, day: Day) -> &mut Vec<Task> {
        match day {
            Day::Monday => &mut self.monday,
            Day::Tuesday => &mut self.tuesday,
            Day::Wednesday => &mut self.wednesday,
            Day::Thursday => &mut self.thursday,
            Day::Friday => &mut self.friday,
            Day::Saturday => &mut self.saturday,
            Day::Sunday => &mut self.sunday,
        }
    }

    /// All schemes in day order (monday first), then list order.
    pub fn iter(&self) -> impl Iterator<Item = (Day, &Task)> {
        Day::all()
            .iter()
            .flat_map(move |&d| self.day(d).iter().map(move |t| (d, t)))
    }

    /// Location of the first scheme with `id`, in search order.
    pub fn locate(&self, id: u64) -> Option<(Day, usize)> {
        Day::all().iter().find_map(|&d| {
            self.day(d)
                .iter()
                .position(|t| t.id == id)
                .map(|idx| (d, idx))
        })
    }

    pub fn find(&self, id: u64) -> Option<&Task> {
        self.iter().map(|(_, t)| t).find(|t| t.id == id)
    }

    pub fn find_mut(&mut self, id: u64) -> Option<&mut Task> {
        let (day, idx) = self.locate(id)?;
        self.day_mut(day).get_mut(idx)
    }

    /// Location of the scheme owning the subtask `id`.
    pub fn locate_subtask_owner(&self, id: u64) -> Option<(Day, usize)> {
        Day::all().iter().find_map(|&d| {
            self.day(d)
                .iter()
                .position(|t| t.subtasks.iter().any(|s| s.id == id))
                .map(|idx| (d, idx))
        })
    }

    pub fn len(&self) -> usize {
        Day::all().iter().map(|&d| self.day(d).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyProgress {
    pub date: NaiveDate,
    pub points: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Stats {
    pub total_points: i64,
    pub tasks_started: u64,
    pub all_time_tasks_completed: u64,
    pub rewards_claimed: u64,
    pub rank: String,
    pub streak: u32,
    pub last_completed_date: Option<NaiveDate>,
    pub achievements: BTreeMap<String, bool>,
    pub daily_progress: Vec<DailyProgress>,
    pub daily_essence_capacity: i64,
    pub current_essence_earned_today: i64,
    pub last_date_for_essence: Option<NaiveDate>,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            total_points: 0,
            tasks_started: 0,
            all_time_tasks_completed: 0,
            rewards_claimed: 0,
            rank: DEFAULT_RANK.to_string(),
            streak: 0,
            last_completed_date: None,
            achievements: BTreeMap::new(),
            daily_progress: Vec::new(),
            daily_essence_capacity: DEFAULT_DAILY_CAPACITY,
            current_essence_earned_today: 0,
            last_date_for_essence: None,
        }
    }
}

impl Stats {
    pub fn has_achievement(&self, key: &str) -> bool {
        self.achievements.get(key).copied().unwrap_or(false)
    }

    /// Essence still absorbable today.
    pub fn remaining_capacity(&self) -> i64 {
        (self.daily_essence_capacity - self.current_essence_earned_today).max(0)
    }

    pub fn progress_for(&self, date: NaiveDate) -> Option<&DailyProgress> {
        self.daily_progress.iter().find(|d| d.date == date)
    }

    fn progress_for_mut(&mut self, date: NaiveDate) -> Option<&mut DailyProgress> {
        self.daily_progress.iter_mut().find(|d| d.date == date)
    }

    /// Add `points` to the entry for `date`, creating it if absent.
    pub fn record_daily(&mut self, date: NaiveDate, points: i64) {
        match self.progress_for_mut(date) {
            Some(entry) => entry.points += points,
            None => self.daily_progress.push(DailyProgress { date, points }),
        }
    }

    /// Remove up to `points` from the entry for `date`, if one exists.
    pub fn retract_daily(&mut self, date: NaiveDate, points: i64) {
        if let Some(entry) = self.progress_for_mut(date) {
            entry.points = (entry.points - points).max(0);
        }
    }
}

// ---------------------------------------------------------------------------
// RewardSystem
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RewardSystem {
    pub text: String,
    pub goal: i64,
    pub progress: i64,
}

impl Default for RewardSystem {
    fn default() -> Self {
        Self {
            text: String::new(),
            goal: DEFAULT_REWARD_GOAL,
            progress: 0,
        }
    }
}

impl RewardSystem {
    pub fn is_ready(&self) -> bool {
        self.progress >= self.goal
    }
}

// ---------------------------------------------------------------------------
// Tribulation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tribulation {
    pub title: String,
    pub description: String,
    pub reward: i64,
    pub penalty: i64,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub failed: bool,
    pub generated_date: DateTime<Utc>,
}

impl Tribulation {
    pub fn is_pending(&self) -> bool {
        !self.completed && !self.failed
    }
}

// ---------------------------------------------------------------------------
// Nemesis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nemesis {
    pub id: u64,
    pub name: String,
    pub title: String,
    pub rank: String,
    pub points: i64,
    #[serde(default)]
    pub backstory: String,
    #[serde(default)]
    pub last_action: String,
    pub last_updated: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Journal / Advisor / Milestones / Mind palace
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JournalAnalysis {
    pub sentiment: Sentiment,
    pub themes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: u64,
    pub date: DateTime<Utc>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<JournalAnalysis>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorFeedback {
    pub headline: String,
    pub praise: String,
    pub critique: String,
    pub suggestion: String,
    pub generated_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: MilestoneKind,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MindPalace {
    pub image_url: Option<String>,
    pub last_generated: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// AppData
// ---------------------------------------------------------------------------

/// The whole persisted document. Every field back-fills from its default when
/// missing, so older blobs load without migration code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppData {
    pub objective: String,
    pub short_term_goal: String,
    pub todays_goal: String,
    pub weekly_goal: String,
    pub motivation: String,
    pub distractions: String,
    pub sacrifice: String,
    pub weekly_tasks: WeeklyTasks,
    #[serde(rename = "top3TaskIds")]
    pub top3_task_ids: Vec<u64>,
    pub stats: Stats,
    pub reward_system: RewardSystem,
    pub tribulation: Option<Tribulation>,
    pub journal_entries: Vec<JournalEntry>,
    pub advisor: Option<AdvisorFeedback>,
    pub nemesis: Vec<Nemesis>,
    pub milestones: Vec<Milestone>,
    pub mind_palace: MindPalace,
}

impl AppData {
    /// Default aggregate with a specific daily essence capacity.
    pub fn with_capacity(daily_essence_capacity: i64) -> Self {
        let mut data = Self::default();
        data.stats.daily_essence_capacity = daily_essence_capacity;
        data
    }

    /// A fresh identifier: the current epoch millisecond, bumped past every id
    /// already in the document so rapid successive calls never collide.
    pub fn next_id(&self, moment: &Moment) -> u64 {
        let now = u64::try_from(moment.now.timestamp_millis()).unwrap_or(0);
        let highest = self
            .weekly_tasks
            .iter()
            .flat_map(|(_, t)| std::iter::once(t.id).chain(t.subtasks.iter().map(|s| s.id)))
            .chain(self.nemesis.iter().map(|n| n.id))
            .chain(self.journal_entries.iter().map(|e| e.id))
            .chain(self.milestones.iter().map(|m| m.id))
            .max()
            .unwrap_or(0);
        now.max(highest + 1)
    }

    pub fn record_milestone(
        &mut self,
        kind: MilestoneKind,
        title: impl Into<String>,
        description: impl Into<String>,
        moment: &Moment,
    ) {
        let id = self.next_id(moment);
        // Newest first, matching the journal.
        self.milestones.insert(
            0,
            Milestone {
                id,
                kind,
                title: title.into(),
                description: description.into(),
                date: moment.now,
            },
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
