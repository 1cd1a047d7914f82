use super::Context;
use crate::output::{print_json, print_table, report};
use anyhow::Context as _;
use clap::Subcommand;
use dao_core::oracle;
use dao_core::types::Day;

#[derive(Subcommand)]
pub enum SchemesSubcommand {
    /// Generate 3-5 schemes for a goal and add them to a day
    Generate {
        #[arg(required = true)]
        goal: Vec<String>,
        /// Day to place the schemes on
        #[arg(long, default_value = "monday")]
        day: Day,
        /// Show the proposals without adding them
        #[arg(long)]
        dry_run: bool,
    },
}

pub fn run(ctx: &Context, subcmd: SchemesSubcommand) -> anyhow::Result<()> {
    match subcmd {
        SchemesSubcommand::Generate { goal, day, dry_run } => {
            generate(ctx, &goal.join(" "), day, dry_run)
        }
    }
}

fn generate(ctx: &Context, goal: &str, day: Day, dry_run: bool) -> anyhow::Result<()> {
    let oracle = ctx.oracle()?;
    let mut engine = ctx.open()?;
    let drafts = oracle::generate_schemes(&oracle, engine.data(), goal)
        .context("failed to generate schemes")?;

    if dry_run {
        if ctx.json {
            return print_json(&drafts);
        }
        let rows = drafts
            .iter()
            .map(|d| {
                vec![
                    d.difficulty.to_string(),
                    d.actual_points
                        .unwrap_or_else(|| d.difficulty.default_points())
                        .to_string(),
                    d.text.clone(),
                ]
            })
            .collect();
        print_table(&["DIFFICULTY", "ESSENCE", "TEXT"], rows);
        return Ok(());
    }

    let count = drafts.len();
    let (ids, notices) = engine.add_schemes(day, drafts, &ctx.moment())?;
    report(
        ctx.json,
        &serde_json::json!({ "day": day, "ids": ids }),
        &format!("Added {count} scheme(s) to {day}"),
        &notices,
    )
}
