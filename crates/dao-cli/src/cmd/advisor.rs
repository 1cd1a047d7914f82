use super::Context;
use crate::output::{print_json, report};
use anyhow::Context as _;
use clap::Subcommand;
use dao_core::advisor::summarize_week;

#[derive(Subcommand)]
pub enum AdvisorSubcommand {
    /// Show the latest counsel
    Show,
    /// Ask the advisor to review the past week now
    Consult,
    /// Show what the advisor is told about the past week
    Week,
}

#[derive(Subcommand)]
pub enum MindPalaceSubcommand {
    /// Show the last rendered image
    Show,
    /// Render a new image from goals and recent milestones
    Render,
}

pub fn run(ctx: &Context, subcmd: AdvisorSubcommand) -> anyhow::Result<()> {
    match subcmd {
        AdvisorSubcommand::Show => show(ctx),
        AdvisorSubcommand::Consult => consult(ctx),
        AdvisorSubcommand::Week => week(ctx),
    }
}

fn show(ctx: &Context) -> anyhow::Result<()> {
    let engine = ctx.open()?;
    let advisor = engine.data().advisor.as_ref();
    if ctx.json {
        return print_json(&advisor);
    }
    let Some(a) = advisor else {
        println!("The advisor has not spoken yet.");
        return Ok(());
    };
    println!("{}  ({})", a.headline, a.generated_date.format("%Y-%m-%d"));
    println!("Praise:     {}", a.praise);
    println!("Critique:   {}", a.critique);
    println!("Suggestion: {}", a.suggestion);
    Ok(())
}

fn consult(ctx: &Context) -> anyhow::Result<()> {
    let oracle = ctx.oracle()?;
    let mut engine = ctx.open()?;
    let notices = engine
        .consult_advisor(&oracle, &ctx.moment())
        .context("failed to consult the advisor")?;
    if ctx.json {
        return report(true, &engine.data().advisor, "", &notices);
    }
    show(ctx)?;
    crate::output::print_notices(&notices);
    Ok(())
}

fn week(ctx: &Context) -> anyhow::Result<()> {
    let engine = ctx.open()?;
    let summary = summarize_week(engine.data(), &ctx.moment());
    if ctx.json {
        return print_json(&summary);
    }
    println!("Rank:          {}", summary.rank);
    println!("Essence gained: {}", summary.points_gained);
    println!("Completed:     {}", summary.completed_tasks.join(", "));
    println!("Incomplete:    {}", summary.incomplete_tasks.join(", "));
    Ok(())
}

pub fn run_mind_palace(ctx: &Context, subcmd: MindPalaceSubcommand) -> anyhow::Result<()> {
    match subcmd {
        MindPalaceSubcommand::Show => {
            let engine = ctx.open()?;
            let palace = &engine.data().mind_palace;
            if ctx.json {
                return print_json(palace);
            }
            match (&palace.image_url, &palace.last_generated) {
                (Some(url), Some(at)) => println!("{url}\nRendered {}", at.format("%Y-%m-%d")),
                (Some(url), None) => println!("{url}"),
                _ => println!("The mind palace has not been rendered yet."),
            }
            Ok(())
        }
        MindPalaceSubcommand::Render => {
            let oracle = ctx.oracle()?;
            let mut engine = ctx.open()?;
            let notices = engine
                .render_mind_palace(&oracle, &ctx.moment())
                .context("failed to render the mind palace")?;
            let palace = &engine.data().mind_palace;
            report(
                ctx.json,
                palace,
                palace.image_url.as_deref().unwrap_or_default(),
                &notices,
            )
        }
    }
}
