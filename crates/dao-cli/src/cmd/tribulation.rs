use super::{read_input, Context};
use crate::output::{print_json, report};
use anyhow::Context as _;
use clap::Subcommand;
use dao_core::tribulation::{TribulationDraft, TribulationOutcome};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum TribulationSubcommand {
    /// Show the current tribulation
    Show,
    /// Accept a tribulation from a JSON file ('-' for stdin)
    Accept { file: PathBuf },
    /// Ask the oracle for a new tribulation now
    Summon,
    /// Mark the tribulation survived
    Complete,
    /// Mark the tribulation failed
    Fail,
}

pub fn run(ctx: &Context, subcmd: TribulationSubcommand) -> anyhow::Result<()> {
    match subcmd {
        TribulationSubcommand::Show => show(ctx),
        TribulationSubcommand::Accept { file } => accept(ctx, &file),
        TribulationSubcommand::Summon => summon(ctx),
        TribulationSubcommand::Complete => resolve(ctx, TribulationOutcome::Completed),
        TribulationSubcommand::Fail => resolve(ctx, TribulationOutcome::Failed),
    }
}

fn show(ctx: &Context) -> anyhow::Result<()> {
    let engine = ctx.open()?;
    let trib = engine.data().tribulation.as_ref();
    if ctx.json {
        return print_json(&trib);
    }
    let Some(t) = trib else {
        println!("No tribulation has descended.");
        return Ok(());
    };
    let state = if t.completed {
        "survived"
    } else if t.failed {
        "failed"
    } else {
        "pending"
    };
    println!("{} [{state}]", t.title);
    println!("{}", t.description);
    println!("Reward: {}  Penalty: {}", t.reward, t.penalty);
    println!("Descended: {}", t.generated_date.format("%Y-%m-%d"));
    Ok(())
}

fn accept(ctx: &Context, file: &std::path::Path) -> anyhow::Result<()> {
    let raw = read_input(file)?;
    let draft: TribulationDraft =
        serde_json::from_str(&raw).context("tribulation must be JSON with title, description, reward, penalty")?;
    let mut engine = ctx.open()?;
    let notices = engine.accept_tribulation(draft, &ctx.moment())?;
    report(ctx.json, &engine.data().tribulation, "", &notices)
}

fn summon(ctx: &Context) -> anyhow::Result<()> {
    let oracle = ctx.oracle()?;
    let mut engine = ctx.open()?;
    let notices = engine
        .summon_tribulation(&oracle, &ctx.moment())
        .context("failed to summon a tribulation")?;
    report(ctx.json, &engine.data().tribulation, "", &notices)
}

fn resolve(ctx: &Context, outcome: TribulationOutcome) -> anyhow::Result<()> {
    let mut engine = ctx.open()?;
    let notices = engine.resolve_tribulation(outcome, &ctx.moment())?;
    let stats = &engine.data().stats;
    report(
        ctx.json,
        &serde_json::json!({
            "outcome": outcome,
            "total_points": stats.total_points,
            "rank": stats.rank,
        }),
        "",
        &notices,
    )
}
