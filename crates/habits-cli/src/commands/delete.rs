use super::Context;

pub fn run(ctx: &Context, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = ctx.tracker()?;
    tracker.delete(name)?;
    println!("Stopped tracking '{}'.", name.trim());
    Ok(())
}
