use super::Context;

pub fn run(ctx: &Context, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let tracker = ctx.tracker()?;
    let habit = tracker.get(name)?;
    println!("{}", serde_json::to_string_pretty(&tracker.status(&habit, ctx.now))?);
    Ok(())
}
