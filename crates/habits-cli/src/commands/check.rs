use super::Context;

pub fn run(ctx: &Context, name: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = ctx.tracker()?;
    let check_in = tracker.check_in(name, ctx.now)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&check_in)?);
    } else {
        println!("{}", check_in.message);
    }
    Ok(())
}
