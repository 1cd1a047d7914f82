use super::Context;
use crate::output::{print_json, print_table};
use dao_core::achievement::ACHIEVEMENTS;
use dao_core::leaderboard::{self, Contestant};

pub fn leaderboard(ctx: &Context) -> anyhow::Result<()> {
    let engine = ctx.open()?;
    let standings = leaderboard::standings(engine.data());
    if ctx.json {
        return print_json(&standings);
    }
    let rows = standings
        .iter()
        .map(|s| {
            let tag = match s.contestant {
                Contestant::User => "<- you",
                Contestant::Rival => "rival",
                Contestant::Venerable => "",
            };
            vec![
                s.place.to_string(),
                s.name.clone(),
                s.points.to_string(),
                tag.to_string(),
            ]
        })
        .collect();
    print_table(&["#", "NAME", "ESSENCE", ""], rows);
    Ok(())
}

pub fn history(ctx: &Context, limit: Option<usize>) -> anyhow::Result<()> {
    let engine = ctx.open()?;
    let milestones: Vec<_> = engine
        .data()
        .milestones
        .iter()
        .take(limit.unwrap_or(usize::MAX))
        .collect();
    if ctx.json {
        return print_json(&milestones);
    }
    if milestones.is_empty() {
        println!("No milestones yet.");
        return Ok(());
    }
    let rows = milestones
        .iter()
        .map(|m| {
            vec![
                m.date.format("%Y-%m-%d").to_string(),
                m.kind.to_string(),
                m.title.clone(),
                m.description.clone(),
            ]
        })
        .collect();
    print_table(&["DATE", "TYPE", "TITLE", "DESCRIPTION"], rows);
    Ok(())
}

pub fn achievements(ctx: &Context) -> anyhow::Result<()> {
    let engine = ctx.open()?;
    let stats = &engine.data().stats;
    if ctx.json {
        let items: Vec<_> = ACHIEVEMENTS
            .iter()
            .map(|a| {
                serde_json::json!({
                    "key": a.key,
                    "name": a.name,
                    "description": a.description,
                    "unlocked": stats.has_achievement(a.key),
                })
            })
            .collect();
        return print_json(&items);
    }
    let rows = ACHIEVEMENTS
        .iter()
        .map(|a| {
            vec![
                if stats.has_achievement(a.key) { "x".into() } else { String::new() },
                a.name.to_string(),
                a.description.to_string(),
            ]
        })
        .collect();
    print_table(&["", "NAME", "DESCRIPTION"], rows);
    Ok(())
}
