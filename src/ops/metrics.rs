use chrono::{DateTime, Duration, Utc};

use crate::model::roster::{Person, ROSTER};
use crate::model::task::{Status, Task};

/// Days before an incomplete task gets a warning in the aging table
pub const AGING_WARN_DAYS: i64 = 7;

/// Trailing window for the velocity figure, in days
const VELOCITY_WINDOW_DAYS: i64 = 7;

/// Headline figures for the dashboard
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kpis {
    pub total: usize,
    pub completed: usize,
    /// Percentage 0–100, rounded; 0 when there are no tasks
    pub completion_rate: u32,
    /// Completed tasks per day over the trailing week, one decimal.
    /// Measured against creation time: the data model has no completion
    /// timestamp, so this is an approximation, kept as-is.
    pub velocity: f64,
}

/// One point of the 7-day burndown series
#[derive(Debug, Clone, PartialEq)]
pub struct BurndownPoint {
    /// Calendar label, e.g. "3 Aug"
    pub label: String,
    pub remaining: u64,
}

/// Tasks assigned to one roster member (exact name matches only)
#[derive(Debug, Clone, Copy)]
pub struct PersonCount {
    pub person: &'static Person,
    pub count: usize,
}

/// One slice of the status distribution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusSlice {
    pub status: Status,
    pub count: usize,
    /// Rounded percentage of the total; 0 when the board is empty
    pub share: u32,
}

/// One row of the oldest-incomplete table
#[derive(Debug, Clone, PartialEq)]
pub struct AgingRow {
    pub title: String,
    /// Verbatim assignee; empty renders as an "unassigned" placeholder
    pub assignee: String,
    pub status: Status,
    pub days_active: i64,
    /// Set when the task has been sitting for more than a week
    pub warning: bool,
    pub tags: Vec<String>,
}

/// The full dashboard, derived from the task sequence in one pass at load
/// time. Read-only: building a report never touches the store.
#[derive(Debug, Clone)]
pub struct MetricsReport {
    pub kpis: Kpis,
    pub burndown: Vec<BurndownPoint>,
    pub by_person: Vec<PersonCount>,
    pub by_status: Vec<StatusSlice>,
    pub oldest_incomplete: Vec<AgingRow>,
    pub generated_at: DateTime<Utc>,
}

pub fn build_report(tasks: &[Task], now: DateTime<Utc>) -> MetricsReport {
    MetricsReport {
        kpis: kpis(tasks, now),
        burndown: burndown(tasks.len(), now),
        by_person: by_person(tasks),
        by_status: by_status(tasks),
        oldest_incomplete: oldest_incomplete(tasks, now),
        generated_at: now,
    }
}

fn kpis(tasks: &[Task], now: DateTime<Utc>) -> Kpis {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.status == Status::Done).count();
    let completion_rate = if total > 0 {
        ((completed as f64 / total as f64) * 100.0).round() as u32
    } else {
        0
    };

    let window_start = now - Duration::days(VELOCITY_WINDOW_DAYS);
    let recent_completed = tasks
        .iter()
        .filter(|t| t.status == Status::Done && t.created_at >= window_start)
        .count();
    let velocity = (recent_completed as f64 / VELOCITY_WINDOW_DAYS as f64 * 10.0).round() / 10.0;

    Kpis {
        total,
        completed,
        completion_rate,
        velocity,
    }
}

/// Synthetic burndown over the trailing week. No historical snapshots are
/// persisted, so the series is a simulated decay of the current total:
/// `remaining = max(0, total - floor(day_index * total * 0.15))`.
fn burndown(total: usize, now: DateTime<Utc>) -> Vec<BurndownPoint> {
    (0..7)
        .map(|day_index| {
            let date = now - Duration::days(6 - day_index);
            let burned = ((day_index as f64) * (total as f64) * 0.15).floor() as u64;
            BurndownPoint {
                label: format!("{} {}", date.format("%-d"), date.format("%b")),
                remaining: (total as u64).saturating_sub(burned),
            }
        })
        .collect()
}

/// Counts per roster entry, roster order preserved. Assignees that do not
/// match the roster exactly are excluded from this series.
fn by_person(tasks: &[Task]) -> Vec<PersonCount> {
    ROSTER
        .iter()
        .map(|person| PersonCount {
            person,
            count: tasks.iter().filter(|t| t.assignee == person.name).count(),
        })
        .collect()
}

fn by_status(tasks: &[Task]) -> Vec<StatusSlice> {
    let total = tasks.len();
    Status::ALL
        .iter()
        .map(|&status| {
            let count = tasks.iter().filter(|t| t.status == status).count();
            let share = if total > 0 {
                ((count as f64 / total as f64) * 100.0).round() as u32
            } else {
                0
            };
            StatusSlice {
                status,
                count,
                share,
            }
        })
        .collect()
}

/// The five oldest tasks that are not done, ascending by creation time
fn oldest_incomplete(tasks: &[Task], now: DateTime<Utc>) -> Vec<AgingRow> {
    let mut incomplete: Vec<&Task> = tasks.iter().filter(|t| t.status != Status::Done).collect();
    incomplete.sort_by_key(|t| t.created_at);

    incomplete
        .into_iter()
        .take(5)
        .map(|task| {
            let days_active = (now - task.created_at).num_days();
            AgingRow {
                title: task.title.clone(),
                assignee: task.assignee.clone(),
                status: task.status,
                days_active,
                warning: days_active > AGING_WARN_DAYS,
                tags: task.tags.clone(),
            }
        })
        .collect()
}
