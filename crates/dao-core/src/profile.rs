use crate::clock::Moment;
use crate::model::AppData;
use crate::types::GoalField;

pub fn goal(data: &AppData, field: GoalField) -> &str {
    match field {
        GoalField::Objective => &data.objective,
        GoalField::ShortTermGoal => &data.short_term_goal,
        GoalField::TodaysGoal => &data.todays_goal,
        GoalField::WeeklyGoal => &data.weekly_goal,
        GoalField::Motivation => &data.motivation,
        GoalField::Distractions => &data.distractions,
        GoalField::Sacrifice => &data.sacrifice,
    }
}

pub fn set_goal(data: &mut AppData, field: GoalField, text: &str) {
    let slot = match field {
        GoalField::Objective => &mut data.objective,
        GoalField::ShortTermGoal => &mut data.short_term_goal,
        GoalField::TodaysGoal => &mut data.todays_goal,
        GoalField::WeeklyGoal => &mut data.weekly_goal,
        GoalField::Motivation => &mut data.motivation,
        GoalField::Distractions => &mut data.distractions,
        GoalField::Sacrifice => &mut data.sacrifice,
    };
    *slot = text.to_string();
}

/// Store a freshly rendered mind-palace image.
pub fn set_mind_palace(data: &mut AppData, image_url: impl Into<String>, moment: &Moment) {
    data.mind_palace.image_url = Some(image_url.into());
    data.mind_palace.last_generated = Some(moment.now);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn every_field_round_trips() {
        let mut data = AppData::default();
        for (i, &field) in GoalField::all().iter().enumerate() {
            set_goal(&mut data, field, &format!("text {i}"));
        }
        for (i, &field) in GoalField::all().iter().enumerate() {
            assert_eq!(goal(&data, field), format!("text {i}"));
        }
        assert_eq!(data.objective, "text 0");
    }

    #[test]
    fn mind_palace_records_time() {
        let mut data = AppData::default();
        let m = Moment::on(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
        set_mind_palace(&mut data, "data:image/png;base64,AAAA", &m);
        assert_eq!(data.mind_palace.last_generated, Some(m.now));
    }
}
