//! Terminal rendering of session read models

use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use ft_core::session::{HistoryFilter, SessionStatus, SessionView};

/// Countdown line for the active session, or an idle notice
pub fn status_line(view: &dyn SessionView) -> String {
    match view.active_session() {
        Some(session) => format!(
            "{} {} remaining on {}",
            "⏱".cyan(),
            view.countdown().to_string().bold(),
            session.task().cyan()
        ),
        None => format!("{} No active session", "·".dimmed()),
    }
}

/// History table, newest first
pub fn history_table(view: &dyn SessionView, now: DateTime<Utc>) -> String {
    let rows = view.history(&HistoryFilter::new());
    if rows.is_empty() {
        return "No sessions yet.".to_string();
    }

    let task_width = rows
        .iter()
        .map(|r| r.task.chars().count())
        .max()
        .unwrap_or(0)
        .max("Task".len());

    let mut out = format!(
        "{}\n",
        format!(
            "{:<task_width$}  {:<12}  {:<16}  {}",
            "Task", "Duration", "Started", "Status"
        )
        .bold()
    );
    for row in rows {
        out.push_str(&format!(
            "{:<task_width$}  {:<12}  {:<16}  {}\n",
            row.task,
            row.duration_label(),
            row.started_label(now),
            status_badge(row.status)
        ));
    }
    out
}

/// Status label colored like a traffic light
pub fn status_badge(status: SessionStatus) -> ColoredString {
    match status {
        SessionStatus::Completed => status.label().green(),
        SessionStatus::InProgress => status.label().yellow(),
        SessionStatus::Interrupted => status.label().red(),
    }
}
