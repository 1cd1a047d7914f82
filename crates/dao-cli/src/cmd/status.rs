use super::Context;
use crate::output::print_json;
use dao_core::{leaderboard, rank, task};

pub fn run(ctx: &Context) -> anyhow::Result<()> {
    let engine = ctx.open()?;
    let data = engine.data();
    let stats = &data.stats;
    let next = rank::next_rank(stats.total_points);
    let focused = task::focused(data);

    if ctx.json {
        print_json(&serde_json::json!({
            "user": engine.key(),
            "rank": stats.rank,
            "total_points": stats.total_points,
            "next_rank": next.map(|(r, needed)| serde_json::json!({ "name": r.name, "needed": needed })),
            "streak": stats.streak,
            "essence_today": stats.current_essence_earned_today,
            "daily_capacity": stats.daily_essence_capacity,
            "reward": data.reward_system,
            "tribulation": data.tribulation,
            "focus": focused,
            "place": leaderboard::user_place(data),
            "schemes": task::summarize(data),
        }))?;
        return Ok(());
    }

    if !data.objective.is_empty() {
        println!("Grand scheme: {}", data.objective);
    }
    println!("Rank:      {} ({} Primeval Essence)", stats.rank, stats.total_points);
    match next {
        Some((r, needed)) => println!("Next:      {} in {needed}", r.name),
        None => println!("Next:      the summit has been reached"),
    }
    println!(
        "Aperture:  {}/{} absorbed today",
        stats.current_essence_earned_today, stats.daily_essence_capacity
    );
    println!("Streak:    {} day(s)", stats.streak);
    let reward = &data.reward_system;
    let label = if reward.text.is_empty() { "(unset)" } else { reward.text.as_str() };
    let ready = if reward.is_ready() { " [ready]" } else { "" };
    println!("Reward:    {label} {}/{}{ready}", reward.progress, reward.goal);
    if let Some(trib) = &data.tribulation {
        let state = if trib.completed {
            "survived"
        } else if trib.failed {
            "failed"
        } else {
            "pending"
        };
        println!("Tribulation: {} [{state}]", trib.title);
    }
    println!("Leaderboard place: {}", leaderboard::user_place(data));
    println!("Schemes:   {}", task::summarize(data));
    if !focused.is_empty() {
        println!("Focus:");
        for t in focused {
            let mark = if t.completed { "x" } else { " " };
            println!("  [{mark}] {} ({})", t.text, t.id);
        }
    }
    Ok(())
}
