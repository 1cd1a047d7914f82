use super::Context;
use crate::output::{print_json, print_table, report};
use anyhow::Context as _;
use clap::Subcommand;
use dao_core::task::{self as task_ops, TaskAction};
use dao_core::types::{Day, Difficulty};

#[derive(Subcommand)]
pub enum TaskSubcommand {
    /// Add a scheme to a day
    Add {
        day: Day,
        #[arg(required = true)]
        text: Vec<String>,
        /// easy, medium, hard, scene or venerable-scene
        #[arg(long, short = 'd', default_value = "easy")]
        difficulty: Difficulty,
        /// How the scheme serves your goals
        #[arg(long, short = 'b', default_value = "")]
        benefits: String,
        /// Essence awarded (default: the difficulty's value)
        #[arg(long, short = 'p', value_parser = clap::value_parser!(i64).range(0..))]
        points: Option<i64>,
    },
    /// Add a subtask to a scheme
    Subtask {
        task_id: u64,
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Complete or reopen a scheme or subtask
    Toggle { id: u64 },
    /// Edit a scheme's fields
    Edit {
        id: u64,
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        benefits: Option<String>,
        #[arg(long)]
        difficulty: Option<Difficulty>,
        #[arg(long, value_parser = clap::value_parser!(i64).range(0..))]
        points: Option<i64>,
    },
    /// Delete a scheme or subtask
    Delete { id: u64 },
    /// Add a scheme to the focus list (at most three)
    Focus { id: u64 },
    /// Remove a scheme from the focus list
    Unfocus { id: u64 },
    /// List schemes, optionally for one day
    List {
        #[arg(long)]
        day: Option<Day>,
    },
    /// Search scheme text, benefits and subtasks
    Search {
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Let the oracle rewrite a scheme's benefits
    Refine { id: u64 },
}

pub fn run(ctx: &Context, subcmd: TaskSubcommand) -> anyhow::Result<()> {
    match subcmd {
        TaskSubcommand::Add {
            day,
            text,
            difficulty,
            benefits,
            points,
        } => add(ctx, day, &text.join(" "), difficulty, &benefits, points),
        TaskSubcommand::Subtask { task_id, text } => subtask(ctx, task_id, &text.join(" ")),
        TaskSubcommand::Toggle { id } => toggle(ctx, id),
        TaskSubcommand::Edit {
            id,
            text,
            benefits,
            difficulty,
            points,
        } => edit(ctx, id, text, benefits, difficulty, points),
        TaskSubcommand::Delete { id } => simple(ctx, TaskAction::Delete { id }, "Deleted", id),
        TaskSubcommand::Focus { id } => simple(ctx, TaskAction::Focus { id }, "Focused", id),
        TaskSubcommand::Unfocus { id } => simple(ctx, TaskAction::Unfocus { id }, "Unfocused", id),
        TaskSubcommand::List { day } => list(ctx, day),
        TaskSubcommand::Search { query } => search(ctx, &query.join(" ")),
        TaskSubcommand::Refine { id } => refine(ctx, id),
    }
}

fn add(
    ctx: &Context,
    day: Day,
    text: &str,
    difficulty: Difficulty,
    benefits: &str,
    points: Option<i64>,
) -> anyhow::Result<()> {
    let mut engine = ctx.open()?;
    let (id, notices) = engine
        .add_task(day, text, difficulty, benefits, points, &ctx.moment())
        .context("failed to add scheme")?;
    report(
        ctx.json,
        &serde_json::json!({ "id": id, "day": day, "text": text }),
        &format!("Added scheme [{id}] to {day}: {text}"),
        &notices,
    )
}

fn subtask(ctx: &Context, task_id: u64, text: &str) -> anyhow::Result<()> {
    let mut engine = ctx.open()?;
    let notices = engine.add_subtask(task_id, text, &ctx.moment())?;
    let id = engine
        .data()
        .weekly_tasks
        .find(task_id)
        .and_then(|t| t.subtasks.last())
        .map(|s| s.id)
        .unwrap_or_default();
    report(
        ctx.json,
        &serde_json::json!({ "id": id, "task_id": task_id, "text": text }),
        &format!("Added subtask [{id}] to scheme [{task_id}]"),
        &notices,
    )
}

fn toggle(ctx: &Context, id: u64) -> anyhow::Result<()> {
    let mut engine = ctx.open()?;
    let notices = engine.apply_task(TaskAction::Toggle { id }, &ctx.moment())?;
    let data = engine.data();
    let completed = match data.weekly_tasks.find(id) {
        Some(t) => t.completed,
        None => data
            .weekly_tasks
            .iter()
            .flat_map(|(_, t)| t.subtasks.iter())
            .find(|s| s.id == id)
            .map(|s| s.completed)
            .unwrap_or_default(),
    };
    let verb = if completed { "Completed" } else { "Reopened" };
    report(
        ctx.json,
        &serde_json::json!({
            "id": id,
            "completed": completed,
            "total_points": data.stats.total_points,
            "rank": data.stats.rank,
        }),
        &format!("{verb} [{id}]"),
        &notices,
    )
}

fn edit(
    ctx: &Context,
    id: u64,
    text: Option<String>,
    benefits: Option<String>,
    difficulty: Option<Difficulty>,
    points: Option<i64>,
) -> anyhow::Result<()> {
    let mut engine = ctx.open()?;
    let mut task = engine
        .data()
        .weekly_tasks
        .find(id)
        .cloned()
        .ok_or(dao_core::DaoError::TaskNotFound(id))?;
    if let Some(text) = text {
        task.text = text;
    }
    if let Some(benefits) = benefits {
        task.benefits = benefits;
    }
    if let Some(difficulty) = difficulty {
        task.difficulty = difficulty;
        if points.is_none() {
            task.actual_points = difficulty.default_points();
        }
    }
    if let Some(points) = points {
        task.actual_points = points;
    }
    let notices = engine.apply_task(TaskAction::Update { task: task.clone() }, &ctx.moment())?;
    report(ctx.json, &task, &format!("Updated scheme [{id}]"), &notices)
}

fn simple(ctx: &Context, action: TaskAction, verb: &str, id: u64) -> anyhow::Result<()> {
    let mut engine = ctx.open()?;
    let notices = engine.apply_task(action, &ctx.moment())?;
    report(
        ctx.json,
        &serde_json::json!({ "id": id, "focus": engine.data().top3_task_ids }),
        &format!("{verb} [{id}]"),
        &notices,
    )
}

fn list(ctx: &Context, day: Option<Day>) -> anyhow::Result<()> {
    let engine = ctx.open()?;
    let data = engine.data();
    let tasks: Vec<_> = data
        .weekly_tasks
        .iter()
        .filter(|(d, _)| day.map_or(true, |want| *d == want))
        .collect();

    if ctx.json {
        let items: Vec<_> = tasks
            .iter()
            .map(|(d, t)| task_ops::SearchHit { day: *d, task: *t })
            .collect();
        print_json(&items)?;
        return Ok(());
    }

    if tasks.is_empty() {
        println!("No schemes.");
        return Ok(());
    }

    let rows = tasks
        .iter()
        .map(|(d, t)| {
            let subs_done = t.subtasks.iter().filter(|s| s.completed).count();
            vec![
                t.id.to_string(),
                d.to_string(),
                if t.completed { "x".into() } else { String::new() },
                t.difficulty.to_string(),
                t.actual_points.to_string(),
                if t.subtasks.is_empty() {
                    String::new()
                } else {
                    format!("{subs_done}/{}", t.subtasks.len())
                },
                t.text.clone(),
            ]
        })
        .collect();
    print_table(&["ID", "DAY", "DONE", "DIFFICULTY", "ESSENCE", "SUBTASKS", "TEXT"], rows);
    println!("{}", task_ops::summarize(data));
    Ok(())
}

fn search(ctx: &Context, query: &str) -> anyhow::Result<()> {
    let engine = ctx.open()?;
    let hits = task_ops::search(engine.data(), query);

    if ctx.json {
        print_json(&hits)?;
        return Ok(());
    }

    if hits.is_empty() {
        println!("No schemes match '{query}'.");
        return Ok(());
    }
    let rows = hits
        .iter()
        .map(|h| vec![h.task.id.to_string(), h.day.to_string(), h.task.text.clone()])
        .collect();
    print_table(&["ID", "DAY", "TEXT"], rows);
    Ok(())
}

fn refine(ctx: &Context, id: u64) -> anyhow::Result<()> {
    let oracle = ctx.oracle()?;
    let mut engine = ctx.open()?;
    let notices = engine
        .refine_benefits(&oracle, id, &ctx.moment())
        .context("failed to refine benefits")?;
    let benefits = engine
        .data()
        .weekly_tasks
        .find(id)
        .map(|t| t.benefits.clone())
        .unwrap_or_default();
    report(
        ctx.json,
        &serde_json::json!({ "id": id, "benefits": benefits }),
        &format!("Benefits of [{id}]: {benefits}"),
        &notices,
    )
}
