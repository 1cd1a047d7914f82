use crate::model::AppData;
use serde::Serialize;

/// The legendary figures every cultivator is measured against.
pub const VENERABLES: &[(&str, i64)] = &[
    ("Primordial Origin", 1_000_000),
    ("Star Constellation", 950_000),
    ("Limitless", 920_000),
    ("Reckless Savage", 880_000),
    ("Red Lotus", 850_000),
    ("Genesis Lotus", 820_000),
    ("Thieving Heaven", 800_000),
    ("Giant Sun", 780_000),
    ("Spectral Soul", 760_000),
    ("Paradise Earth", 740_000),
    ("Great Dream", 720_000),
    ("Fang Yuan", 700_000),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Contestant {
    Venerable,
    User,
    Rival,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    /// 1-based place.
    pub place: usize,
    pub name: String,
    pub points: i64,
    pub contestant: Contestant,
}

/// Venerables, the user ("You") and every rival, best first. Ties keep the
/// venerable-user-rival order.
pub fn standings(data: &AppData) -> Vec<Standing> {
    let mut all: Vec<(String, i64, Contestant)> = VENERABLES
        .iter()
        .map(|(name, points)| (name.to_string(), *points, Contestant::Venerable))
        .collect();
    all.push(("You".to_string(), data.stats.total_points, Contestant::User));
    all.extend(
        data.nemesis
            .iter()
            .map(|n| (n.name.clone(), n.points, Contestant::Rival)),
    );
    all.sort_by(|a, b| b.1.cmp(&a.1));
    all.into_iter()
        .enumerate()
        .map(|(i, (name, points, contestant))| Standing {
            place: i + 1,
            name,
            points,
            contestant,
        })
        .collect()
}

/// The user's own place on the board.
pub fn user_place(data: &AppData) -> usize {
    standings(data)
        .iter()
        .find(|s| s.contestant == Contestant::User)
        .map(|s| s.place)
        .unwrap_or(VENERABLES.len() + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Nemesis;
    use chrono::Utc;

    #[test]
    fn user_trails_venerables() {
        let data = AppData::default();
        let board = standings(&data);
        assert_eq!(board[0].name, "Primordial Origin");
        assert_eq!(user_place(&data), VENERABLES.len() + 1);
    }

    #[test]
    fn rivals_are_ranked_with_user() {
        let mut data = AppData::default();
        data.stats.total_points = 40;
        data.nemesis.push(Nemesis {
            id: 1,
            name: "Xiao Chen".into(),
            title: "Shadow Sovereign".into(),
            rank: "Rank 1 Novice".into(),
            points: 120,
            backstory: String::new(),
            last_action: String::new(),
            last_updated: Utc::now(),
        });
        let board = standings(&data);
        let rival = board.iter().find(|s| s.name == "Xiao Chen").unwrap();
        let you = board.iter().find(|s| s.name == "You").unwrap();
        assert!(rival.place < you.place);
        assert_eq!(rival.contestant, Contestant::Rival);
    }
}
