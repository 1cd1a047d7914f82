use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Day
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub fn all() -> &'static [Day] {
        &[
            Day::Monday,
            Day::Tuesday,
            Day::Wednesday,
            Day::Thursday,
            Day::Friday,
            Day::Saturday,
            Day::Sunday,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
            Day::Sunday => "sunday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Day {
    type Err = crate::error::DaoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Day::all()
            .iter()
            .copied()
            .find(|d| d.as_str() == lower || d.as_str()[..3] == lower)
            .ok_or_else(|| crate::error::DaoError::InvalidDay(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    Scene,
    VenerableScene,
}

impl Difficulty {
    pub fn all() -> &'static [Difficulty] {
        &[
            Difficulty::Easy,
            Difficulty::Medium,
            Difficulty::Hard,
            Difficulty::Scene,
            Difficulty::VenerableScene,
        ]
    }

    /// Essence awarded for a scheme of this difficulty when no explicit
    /// value is given.
    pub fn default_points(self) -> i64 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 5,
            Difficulty::Hard => 10,
            Difficulty::Scene => 50,
            Difficulty::VenerableScene => 100,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Scene => "scene",
            Difficulty::VenerableScene => "venerable-scene",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = crate::error::DaoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::all()
            .iter()
            .copied()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| crate::error::DaoError::InvalidDifficulty(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// MilestoneKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MilestoneKind {
    RankUp,
    TribulationComplete,
    TribulationFailed,
    RewardClaimed,
    NemesisGenerated,
    JournalEntry,
}

impl MilestoneKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MilestoneKind::RankUp => "RANK_UP",
            MilestoneKind::TribulationComplete => "TRIBULATION_COMPLETE",
            MilestoneKind::TribulationFailed => "TRIBULATION_FAILED",
            MilestoneKind::RewardClaimed => "REWARD_CLAIMED",
            MilestoneKind::NemesisGenerated => "NEMESIS_GENERATED",
            MilestoneKind::JournalEntry => "JOURNAL_ENTRY",
        }
    }
}

impl fmt::Display for MilestoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Sentiment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        })
    }
}

// ---------------------------------------------------------------------------
// GoalField
// ---------------------------------------------------------------------------

/// The free-text fields of the aggregate that the user edits directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalField {
    Objective,
    ShortTermGoal,
    TodaysGoal,
    WeeklyGoal,
    Motivation,
    Distractions,
    Sacrifice,
}

impl GoalField {
    pub fn all() -> &'static [GoalField] {
        &[
            GoalField::Objective,
            GoalField::ShortTermGoal,
            GoalField::TodaysGoal,
            GoalField::WeeklyGoal,
            GoalField::Motivation,
            GoalField::Distractions,
            GoalField::Sacrifice,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GoalField::Objective => "objective",
            GoalField::ShortTermGoal => "short-term",
            GoalField::TodaysGoal => "today",
            GoalField::WeeklyGoal => "weekly",
            GoalField::Motivation => "motivation",
            GoalField::Distractions => "distractions",
            GoalField::Sacrifice => "sacrifice",
        }
    }
}

impl fmt::Display for GoalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GoalField {
    type Err = crate::error::DaoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GoalField::all()
            .iter()
            .copied()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| crate::error::DaoError::InvalidGoalField(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_parses_full_and_short_names() {
        assert_eq!("Monday".parse::<Day>().unwrap(), Day::Monday);
        assert_eq!("sun".parse::<Day>().unwrap(), Day::Sunday);
        assert!("someday".parse::<Day>().is_err());
    }

    #[test]
    fn day_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Day::Friday).unwrap(), "\"friday\"");
    }

    #[test]
    fn difficulty_default_points() {
        assert_eq!(Difficulty::Easy.default_points(), 1);
        assert_eq!(Difficulty::Medium.default_points(), 5);
        assert_eq!(Difficulty::Hard.default_points(), 10);
        assert_eq!(Difficulty::Scene.default_points(), 50);
        assert_eq!(Difficulty::VenerableScene.default_points(), 100);
    }

    #[test]
    fn difficulty_wire_name_is_kebab_case() {
        let json = serde_json::to_string(&Difficulty::VenerableScene).unwrap();
        assert_eq!(json, "\"venerable-scene\"");
        assert_eq!(
            "venerable-scene".parse::<Difficulty>().unwrap(),
            Difficulty::VenerableScene
        );
    }

    #[test]
    fn milestone_kind_wire_name() {
        let json = serde_json::to_string(&MilestoneKind::TribulationFailed).unwrap();
        assert_eq!(json, "\"TRIBULATION_FAILED\"");
    }

    #[test]
    fn goal_field_parse() {
        assert_eq!("short-term".parse::<GoalField>().unwrap(), GoalField::ShortTermGoal);
        assert!("nonsense".parse::<GoalField>().is_err());
    }
}
