use super::Context;
use crate::output::{print_json, report};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum RewardSubcommand {
    /// Show the reward and progress toward it
    Show,
    /// Change the reward text and/or essence goal
    Set {
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        goal: Option<i64>,
    },
    /// Claim the reward once the goal is met
    Claim,
}

pub fn run(ctx: &Context, subcmd: RewardSubcommand) -> anyhow::Result<()> {
    match subcmd {
        RewardSubcommand::Show => show(ctx),
        RewardSubcommand::Set { text, goal } => set(ctx, text.as_deref(), goal),
        RewardSubcommand::Claim => claim(ctx),
    }
}

fn show(ctx: &Context) -> anyhow::Result<()> {
    let engine = ctx.open()?;
    let reward = &engine.data().reward_system;
    if ctx.json {
        return print_json(reward);
    }
    let text = if reward.text.is_empty() { "(unset)" } else { reward.text.as_str() };
    println!("Reward:   {text}");
    println!("Progress: {}/{}", reward.progress, reward.goal);
    if reward.is_ready() {
        println!("Ready to claim.");
    }
    Ok(())
}

fn set(ctx: &Context, text: Option<&str>, goal: Option<i64>) -> anyhow::Result<()> {
    if text.is_none() && goal.is_none() {
        anyhow::bail!("nothing to change: pass --text and/or --goal");
    }
    let mut engine = ctx.open()?;
    let notices = engine.set_reward(text, goal, &ctx.moment())?;
    let reward = &engine.data().reward_system;
    report(
        ctx.json,
        reward,
        &format!("Reward set: {} ({} essence)", reward.text, reward.goal),
        &notices,
    )
}

fn claim(ctx: &Context) -> anyhow::Result<()> {
    let mut engine = ctx.open()?;
    let notices = engine.claim_reward(&ctx.moment())?;
    report(
        ctx.json,
        &serde_json::json!({ "rewards_claimed": engine.data().stats.rewards_claimed }),
        "",
        &notices,
    )
}

pub fn waste(ctx: &Context, amount: i64, reason: &str) -> anyhow::Result<()> {
    let mut engine = ctx.open()?;
    let notices = engine.waste_essence(amount, reason, &ctx.moment())?;
    let stats = &engine.data().stats;
    report(
        ctx.json,
        &serde_json::json!({ "total_points": stats.total_points, "rank": stats.rank }),
        "",
        &notices,
    )
}

pub fn capacity(ctx: &Context, amount: i64) -> anyhow::Result<()> {
    let mut engine = ctx.open()?;
    let notices = engine.set_capacity(amount, &ctx.moment())?;
    let stats = &engine.data().stats;
    report(
        ctx.json,
        &serde_json::json!({
            "daily_capacity": stats.daily_essence_capacity,
            "essence_today": stats.current_essence_earned_today,
        }),
        &format!("Aperture set to {} essence per day", stats.daily_essence_capacity),
        &notices,
    )
}
