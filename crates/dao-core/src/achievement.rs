use crate::model::AppData;
use crate::notice::Notice;
use crate::types::Difficulty;

pub struct Achievement {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub condition: fn(&AppData) -> bool,
}

pub const ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        key: "first_benefit",
        name: "Calculating Mind",
        description: "Define the benefits for your first scheme.",
        condition: |d| d.weekly_tasks.iter().any(|(_, t)| !t.benefits.is_empty()),
    },
    Achievement {
        key: "first_task",
        name: "First Blood",
        description: "Complete your first scheme.",
        condition: |d| d.stats.all_time_tasks_completed >= 1,
    },
    Achievement {
        key: "ten_tasks",
        name: "Warrior",
        description: "Complete 10 schemes.",
        condition: |d| d.stats.all_time_tasks_completed >= 10,
    },
    Achievement {
        key: "fifty_tasks",
        name: "Veteran",
        description: "Complete 50 schemes.",
        condition: |d| d.stats.all_time_tasks_completed >= 50,
    },
    Achievement {
        key: "first_hard",
        name: "Berserker",
        description: "Complete a Heavenly-level scheme.",
        condition: |d| {
            d.weekly_tasks.iter().any(|(_, t)| {
                t.completed && (t.difficulty == Difficulty::Hard || t.actual_points >= 10)
            })
        },
    },
    Achievement {
        key: "streak_7",
        name: "Relentless",
        description: "Maintain a 7-day streak.",
        condition: |d| d.stats.streak >= 7,
    },
    Achievement {
        key: "first_reward",
        name: "Just Rewards",
        description: "Refine your first Gu.",
        condition: |d| d.stats.rewards_claimed >= 1,
    },
    Achievement {
        key: "tribulation_survived",
        name: "Heaven Defying",
        description: "Survive your first Heavenly Tribulation.",
        condition: |d| d.tribulation.as_ref().is_some_and(|t| t.completed),
    },
    Achievement {
        key: "first_journal",
        name: "Inner Reflections",
        description: "Write your first journal entry.",
        condition: |d| !d.journal_entries.is_empty(),
    },
];

pub fn find(key: &str) -> Option<&'static Achievement> {
    ACHIEVEMENTS.iter().find(|a| a.key == key)
}

/// Set every achievement whose condition now holds. Flags already set are
/// never re-examined or cleared. Returns the names unlocked by this pass and
/// pushes a single notice for the batch.
pub fn check_achievements(data: &mut AppData, notices: &mut Vec<Notice>) -> Vec<&'static str> {
    let mut unlocked = Vec::new();
    for achievement in ACHIEVEMENTS {
        if data.stats.has_achievement(achievement.key) {
            continue;
        }
        if (achievement.condition)(data) {
            data.stats
                .achievements
                .insert(achievement.key.to_string(), true);
            unlocked.push(achievement.name);
        }
    }
    if !unlocked.is_empty() {
        tracing::debug!(unlocked = ?unlocked, "achievements unlocked");
        notices.push(Notice::AchievementsUnlocked {
            names: unlocked.iter().map(|s| s.to_string()).collect(),
        });
    }
    unlocked
}
