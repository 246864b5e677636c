//! HTML rendering.
//!
//! Pages are small enough to build with `format!`; every piece of user text
//! goes through [`escape`].

use habits_core::HabitStatus;

/// Shown for any unexpected backend failure.
pub const GENERIC_ALERT: &str =
    "Something went wrong. Please try again, and contact us if the problem persists.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Error,
    Success,
    Neutral,
}

impl AlertLevel {
    pub fn color(self) -> &'static str {
        match self {
            AlertLevel::Error => "red",
            AlertLevel::Success => "green",
            AlertLevel::Neutral => "blue",
        }
    }
}

/// Banner message at the top of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
}

impl Alert {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: AlertLevel::Error,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: AlertLevel::Success,
            message: message.into(),
        }
    }

    pub fn neutral(message: impl Into<String>) -> Self {
        Self {
            level: AlertLevel::Neutral,
            message: message.into(),
        }
    }
}

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, alert: Option<&Alert>, body: &str) -> String {
    let alert = alert
        .map(|a| {
            format!(
                r#"<div class="alert" style="border-left: 4px solid {color}; padding: 0.5em 1em;">{message}</div>"#,
                color = a.level.color(),
                message = escape(&a.message),
            )
        })
        .unwrap_or_default();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} - Habits</title>
</head>
<body>
<nav><a href="/">Habits</a> | <a href="/habit">New habit</a></nav>
{alert}
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
    )
}

/// Home page: every habit with perform and delete buttons.
pub fn home(statuses: &[HabitStatus], alert: Option<&Alert>) -> String {
    if statuses.is_empty() {
        return layout(
            "Home",
            alert,
            r#"<p>You are not tracking any habits yet. <a href="/habit">Add one</a>.</p>"#,
        );
    }

    let mut rows = String::new();
    for status in statuses {
        let habit = &status.habit;
        let name = escape(&habit.name);
        let state = if habit.done {
            "completed"
        } else if status.broken {
            "streak broken"
        } else if status.at_risk {
            "do it today"
        } else {
            "on track"
        };
        let perform = if habit.done {
            String::new()
        } else {
            format!(
                r#"<form method="post" action="/perform"><input type="hidden" name="perform" value="{name}"><button type="submit">Done today</button></form>"#
            )
        };
        rows.push_str(&format!(
            r#"<tr><td>{name}</td><td>{streak}</td><td>{last}</td><td>{state}</td><td>{perform}</td><td><form method="post" action="/"><input type="hidden" name="delete" value="{name}"><button type="submit">Delete</button></form></td></tr>
"#,
            streak = habit.streak,
            last = habit.last_performed.format("%Y-%m-%d %H:%M UTC"),
        ));
    }

    let body = format!(
        "<h1>You are tracking following habits</h1>\n<table>\n<tr><th>Habit</th><th>Streak</th><th>Last performed</th><th>State</th><th></th><th></th></tr>\n{rows}</table>"
    );
    layout("Home", alert, &body)
}

/// New-habit form.
pub fn new_habit(alert: Option<&Alert>) -> String {
    layout(
        "New habit",
        alert,
        r#"<h1>Start a new habit</h1>
<form method="post" action="/habit">
<label>Name <input type="text" name="name" required></label>
<button type="submit">Create</button>
</form>"#,
    )
}

/// Result page after a check-in.
pub fn perform(alert: &Alert) -> String {
    layout(
        "Check-in",
        Some(alert),
        r#"<p><a href="/">Back to your habits</a></p>"#,
    )
}

/// Bare page carrying only an alert, used for errors.
pub fn error(alert: &Alert) -> String {
    layout("Error", Some(alert), r#"<p><a href="/">Back to your habits</a></p>"#)
}
