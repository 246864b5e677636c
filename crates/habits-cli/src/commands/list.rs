use habits_core::HabitStatus;

use super::Context;

pub fn run(ctx: &Context, all: bool, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let tracker = ctx.tracker()?;
    let habits = if all {
        tracker.list_all()?
    } else {
        tracker.list_active()?
    };
    let statuses: Vec<HabitStatus> = habits
        .iter()
        .map(|habit| tracker.status(habit, ctx.now))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&statuses)?);
        return Ok(());
    }

    if statuses.is_empty() {
        println!("You are not tracking any habits yet.");
        return Ok(());
    }

    println!("You are tracking following habits:");
    for status in &statuses {
        println!("{}", format_line(status));
    }
    Ok(())
}

fn format_line(status: &HabitStatus) -> String {
    let habit = &status.habit;
    let note = if habit.done {
        "completed".to_string()
    } else if status.broken {
        "streak broken".to_string()
    } else if status.at_risk {
        "check in today to keep it".to_string()
    } else {
        match status.days_since {
            Some(0) => "done today".to_string(),
            Some(days) => format!("last done {days} days ago"),
            None => "last check-in is in the future".to_string(),
        }
    };
    format!("{}  ({}-day streak, {note})", habit.name, habit.streak)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use habits_core::Habit;

    fn status(done: bool, days_since: Option<u32>, at_risk: bool, broken: bool) -> HabitStatus {
        HabitStatus {
            habit: Habit {
                name: "piano".into(),
                last_performed: Utc.with_ymd_and_hms(2021, 10, 15, 17, 8, 0).unwrap(),
                streak: 4,
                done,
            },
            days_since,
            at_risk,
            broken,
        }
    }

    #[test]
    fn line_mentions_streak_and_state() {
        assert_eq!(
            format_line(&status(false, Some(0), false, false)),
            "piano  (4-day streak, done today)"
        );
        assert!(format_line(&status(false, Some(1), true, false)).contains("check in today"));
        assert!(format_line(&status(false, Some(5), false, true)).contains("streak broken"));
        assert!(format_line(&status(true, Some(5), false, false)).contains("completed"));
        assert!(format_line(&status(false, None, false, false)).contains("future"));
    }
}
