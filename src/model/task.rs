use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which board column owns a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Todo,
    InProgress,
    Done,
}

impl Status {
    /// Column order, left to right
    pub const ALL: [Status; 3] = [Status::Todo, Status::InProgress, Status::Done];

    /// Column heading
    pub fn label(self) -> &'static str {
        match self {
            Status::Todo => "To Do",
            Status::InProgress => "In Progress",
            Status::Done => "Done",
        }
    }

    /// Column index, 0-based from the left
    pub fn index(self) -> usize {
        match self {
            Status::Todo => 0,
            Status::InProgress => 1,
            Status::Done => 2,
        }
    }

    /// Next column to the left (clamped at the first)
    pub fn left(self) -> Status {
        match self {
            Status::Todo => Status::Todo,
            Status::InProgress => Status::Todo,
            Status::Done => Status::InProgress,
        }
    }

    /// Next column to the right (clamped at the last)
    pub fn right(self) -> Status {
        match self {
            Status::Todo => Status::InProgress,
            Status::InProgress => Status::Done,
            Status::Done => Status::Done,
        }
    }
}

/// A task card. `assignee` and `tags` are stored verbatim; they are matched
/// against the static roster and tag vocabulary at display time only.
/// `created_at` is set once at creation and never updated afterwards;
/// status changes leave it untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: Status,
    /// Display name; empty = unassigned
    #[serde(default)]
    pub assignee: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create a new task in the To Do column with a fresh id.
    /// Callers are responsible for trimming and validating `title`.
    pub fn new(title: String, description: String, assignee: String, tags: Vec<String>) -> Self {
        Task {
            id: generate_id(),
            title,
            description,
            status: Status::Todo,
            assignee,
            tags,
            created_at: Utc::now(),
        }
    }

    pub fn is_assigned(&self) -> bool {
        !self.assignee.is_empty()
    }

    /// First 6 characters of the id, display-only (never used for lookups)
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(6) {
            Some((i, _)) => &self.id[..i],
            None => &self.id,
        }
    }
}

static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate an opaque unique task id: `task_<unix-millis>_<pid><seq>`.
/// The pid + per-process counter suffix keeps ids unique across concurrent
/// processes sharing a data directory within the same millisecond.
pub fn generate_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let seq = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!(
        "task_{}_{}x{}",
        millis,
        base36(process::id() as u64),
        base36(seq)
    )
}

fn base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn status_serializes_to_wire_names() {
        assert_eq!(serde_json::to_string(&Status::Todo).unwrap(), "\"todo\"");
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            "\"inprogress\""
        );
        assert_eq!(serde_json::to_string(&Status::Done).unwrap(), "\"done\"");
    }

    #[test]
    fn status_column_stepping_clamps() {
        assert_eq!(Status::Todo.left(), Status::Todo);
        assert_eq!(Status::Todo.right(), Status::InProgress);
        assert_eq!(Status::Done.right(), Status::Done);
        assert_eq!(Status::Done.left(), Status::InProgress);
    }

    #[test]
    fn generated_ids_are_unique_and_opaque() {
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            let id = generate_id();
            assert!(id.starts_with("task_"));
            assert!(seen.insert(id));
        }
    }

    #[test]
    fn new_task_lands_in_todo() {
        let task = Task::new(
            "Write docs".into(),
            String::new(),
            String::new(),
            Vec::new(),
        );
        assert_eq!(task.status, Status::Todo);
        assert!(!task.id.is_empty());
        assert!(!task.is_assigned());
    }

    #[test]
    fn short_id_is_display_prefix() {
        let mut task = Task::new("t".into(), String::new(), String::new(), Vec::new());
        task.id = "task_1700000000000_abcd".into();
        assert_eq!(task.short_id(), "task_1");
        task.id = "abc".into();
        assert_eq!(task.short_id(), "abc");
    }

    #[test]
    fn task_deserializes_original_payload() {
        // Wire shape produced by earlier versions of the board
        let json = r#"{
            "id": "task_1699999999999_k3j2h1",
            "title": "Implementar tablero Kanban",
            "description": "Crear las tres columnas",
            "status": "inprogress",
            "assignee": "Luis Martínez",
            "tags": ["Feature", "Urgente"],
            "createdAt": "2026-08-01T10:30:00Z"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.status, Status::InProgress);
        assert_eq!(task.assignee, "Luis Martínez");
        assert_eq!(task.tags, vec!["Feature", "Urgente"]);

        // Optional fields may be absent entirely
        let minimal = r#"{
            "id": "task_1_0x0",
            "title": "bare",
            "status": "todo",
            "createdAt": "2026-08-01T00:00:00Z"
        }"#;
        let task: Task = serde_json::from_str(minimal).unwrap();
        assert_eq!(task.description, "");
        assert_eq!(task.assignee, "");
        assert!(task.tags.is_empty());
    }
}
