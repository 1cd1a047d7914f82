use super::Context;
use crate::output::{print_json, report};
use clap::Subcommand;
use dao_core::profile;
use dao_core::types::GoalField;

#[derive(Subcommand)]
pub enum GoalSubcommand {
    /// Show one field, or all of them
    Show { field: Option<GoalField> },
    /// Replace a field: objective, short-term, today, weekly, motivation,
    /// distractions or sacrifice
    Set {
        field: GoalField,
        #[arg(required = true)]
        text: Vec<String>,
    },
}

pub fn run(ctx: &Context, subcmd: GoalSubcommand) -> anyhow::Result<()> {
    match subcmd {
        GoalSubcommand::Show { field } => show(ctx, field),
        GoalSubcommand::Set { field, text } => set(ctx, field, &text.join(" ")),
    }
}

fn show(ctx: &Context, field: Option<GoalField>) -> anyhow::Result<()> {
    let engine = ctx.open()?;
    let data = engine.data();
    let fields: Vec<GoalField> = match field {
        Some(f) => vec![f],
        None => GoalField::all().to_vec(),
    };

    if ctx.json {
        let map: serde_json::Map<String, serde_json::Value> = fields
            .iter()
            .map(|&f| (f.to_string(), profile::goal(data, f).into()))
            .collect();
        return print_json(&map);
    }

    for f in fields {
        let text = profile::goal(data, f);
        println!("{:<13} {}", format!("{f}:"), if text.is_empty() { "-" } else { text });
    }
    Ok(())
}

fn set(ctx: &Context, field: GoalField, text: &str) -> anyhow::Result<()> {
    let mut engine = ctx.open()?;
    let notices = engine.set_goal(field, text, &ctx.moment())?;
    report(
        ctx.json,
        &serde_json::json!({ "field": field.to_string(), "text": text }),
        &format!("{field} updated"),
        &notices,
    )
}
