use super::Context;
use crate::output::report;
use dao_core::oracle::Oracle;

pub fn run(ctx: &Context, offline: bool) -> anyhow::Result<()> {
    let oracle = if offline { None } else { ctx.optional_oracle()? };
    if oracle.is_none() && !offline {
        tracing::info!("no oracle configured, only expiring tribulations");
    }
    let mut engine = ctx.open()?;
    let notices = engine.refresh(oracle.as_ref().map(|o| o as &dyn Oracle), &ctx.moment())?;
    let message = if notices.is_empty() { "Nothing was due." } else { "" };
    report(
        ctx.json,
        &serde_json::json!({ "date": ctx.moment().today_iso() }),
        message,
        &notices,
    )
}
