use chrono::Local;

use crate::model::roster::{Person, find_person};
use crate::model::task::{Status, Task};
use crate::ops::store::TaskStore;

/// Active display filters. Both are optional and combine with AND; they
/// affect what the board shows, never the persisted data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Exact assignee name
    pub person: Option<String>,
    /// Single tag label
    pub tag: Option<String>,
}

impl FilterState {
    pub fn is_active(&self) -> bool {
        self.person.is_some() || self.tag.is_some()
    }

    pub fn passes(&self, task: &Task) -> bool {
        if let Some(person) = &self.person
            && task.assignee != *person
        {
            return false;
        }
        if let Some(tag) = &self.tag
            && !task.tags.iter().any(|t| t == tag)
        {
            return false;
        }
        true
    }

    pub fn clear(&mut self) {
        self.person = None;
        self.tag = None;
    }
}

/// Everything the presentation layer needs to paint one card
#[derive(Debug, Clone)]
pub struct CardModel {
    /// Real id, used for commands
    pub id: String,
    /// First 6 characters, display-only
    pub short_id: String,
    pub title: String,
    pub description: String,
    /// Roster entry resolved by exact name match; a free-text assignee
    /// resolves to None and renders without an avatar row
    pub person: Option<&'static Person>,
    pub tags: Vec<String>,
    /// Formatted creation date
    pub created_label: String,
}

impl CardModel {
    fn from_task(task: &Task) -> CardModel {
        CardModel {
            id: task.id.clone(),
            short_id: task.short_id().to_string(),
            title: task.title.clone(),
            description: task.description.clone(),
            person: if task.is_assigned() {
                find_person(&task.assignee)
            } else {
                None
            },
            tags: task.tags.clone(),
            created_label: format_created(task),
        }
    }
}

fn format_created(task: &Task) -> String {
    let local = task.created_at.with_timezone(&Local);
    local.format("%d %b %Y").to_string()
}

/// One board column: the cards that belong to its status and pass the filter
#[derive(Debug, Clone)]
pub struct ColumnModel {
    pub status: Status,
    pub cards: Vec<CardModel>,
}

/// Rebuild all three columns from scratch (no diffing against prior state)
pub fn build_columns(tasks: &[Task], filter: &FilterState) -> [ColumnModel; 3] {
    Status::ALL.map(|status| ColumnModel {
        status,
        cards: tasks
            .iter()
            .filter(|t| t.status == status && filter.passes(t))
            .map(CardModel::from_task)
            .collect(),
    })
}

/// Per-column counts plus the grand total, always over the full unfiltered
/// sequence: active filters never change the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counters {
    pub todo: usize,
    pub in_progress: usize,
    pub done: usize,
    pub total: usize,
}

impl Counters {
    pub fn for_status(&self, status: Status) -> usize {
        match status {
            Status::Todo => self.todo,
            Status::InProgress => self.in_progress,
            Status::Done => self.done,
        }
    }
}

pub fn counters(tasks: &[Task]) -> Counters {
    let mut counters = Counters {
        todo: 0,
        in_progress: 0,
        done: 0,
        total: tasks.len(),
    };
    for task in tasks {
        match task.status {
            Status::Todo => counters.todo += 1,
            Status::InProgress => counters.in_progress += 1,
            Status::Done => counters.done += 1,
        }
    }
    counters
}

/// The normalized input command set. Key handlers build one of these and
/// dispatch it; nothing else mutates the store or the filters.
#[derive(Debug, Clone)]
pub enum BoardCommand {
    Create {
        title: String,
        description: String,
        assignee: String,
        tags: Vec<String>,
    },
    UpdateStatus {
        id: String,
        status: Status,
    },
    Delete {
        id: String,
    },
    SetPersonFilter(Option<String>),
    SetTagFilter(Option<String>),
    ClearFilters,
}

pub fn dispatch(store: &mut TaskStore, filter: &mut FilterState, command: BoardCommand) {
    match command {
        BoardCommand::Create {
            title,
            description,
            assignee,
            tags,
        } => {
            store.create(&title, &description, &assignee, tags);
        }
        BoardCommand::UpdateStatus { id, status } => {
            store.update_status(&id, status);
        }
        BoardCommand::Delete { id } => {
            store.delete(&id);
        }
        BoardCommand::SetPersonFilter(person) => filter.person = person,
        BoardCommand::SetTagFilter(tag) => filter.tag = tag,
        BoardCommand::ClearFilters => filter.clear(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn task(title: &str, status: Status, assignee: &str, tags: &[&str]) -> Task {
        let mut t = Task::new(
            title.into(),
            String::new(),
            assignee.into(),
            tags.iter().map(|s| s.to_string()).collect(),
        );
        t.status = status;
        t
    }

    #[test]
    fn filter_truth_table() {
        let t = task("t", Status::Todo, "Ana Gómez", &["Bug", "Urgente"]);

        let none = FilterState::default();
        assert!(none.passes(&t));
        assert!(!none.is_active());

        let person_hit = FilterState {
            person: Some("Ana Gómez".into()),
            tag: None,
        };
        assert!(person_hit.passes(&t));

        let person_miss = FilterState {
            person: Some("Luis Martínez".into()),
            tag: None,
        };
        assert!(!person_miss.passes(&t));

        let tag_hit = FilterState {
            person: None,
            tag: Some("Bug".into()),
        };
        assert!(tag_hit.passes(&t));

        let tag_miss = FilterState {
            person: None,
            tag: Some("Testing".into()),
        };
        assert!(!tag_miss.passes(&t));

        // Both set: AND
        let both = FilterState {
            person: Some("Ana Gómez".into()),
            tag: Some("Testing".into()),
        };
        assert!(!both.passes(&t));
        let both_hit = FilterState {
            person: Some("Ana Gómez".into()),
            tag: Some("Urgente".into()),
        };
        assert!(both_hit.passes(&t));
    }

    #[test]
    fn columns_bucket_by_status_and_filter() {
        let tasks = vec![
            task("a", Status::Todo, "Ana Gómez", &["Bug"]),
            task("b", Status::Todo, "Luis Martínez", &[]),
            task("c", Status::InProgress, "Ana Gómez", &[]),
            task("d", Status::Done, "", &["Bug"]),
        ];

        let all = build_columns(&tasks, &FilterState::default());
        assert_eq!(all[0].cards.len(), 2);
        assert_eq!(all[1].cards.len(), 1);
        assert_eq!(all[2].cards.len(), 1);

        let filter = FilterState {
            person: Some("Ana Gómez".into()),
            tag: None,
        };
        let filtered = build_columns(&tasks, &filter);
        assert_eq!(filtered[0].cards.len(), 1);
        assert_eq!(filtered[0].cards[0].title, "a");
        assert_eq!(filtered[1].cards.len(), 1);
        assert_eq!(filtered[2].cards.len(), 0);
    }

    #[test]
    fn counters_ignore_filters() {
        let tasks = vec![
            task("a", Status::Todo, "Ana Gómez", &[]),
            task("b", Status::InProgress, "Luis Martínez", &[]),
            task("c", Status::Done, "Luis Martínez", &[]),
            task("d", Status::Done, "", &[]),
        ];

        // A filter may be active; the counters still reflect the full set
        let counts = counters(&tasks);
        assert_eq!(counts.todo, 1);
        assert_eq!(counts.in_progress, 1);
        assert_eq!(counts.done, 2);
        assert_eq!(counts.total, 4);
        assert_eq!(counts.for_status(Status::Done), 2);
    }

    #[test]
    fn card_resolves_roster_and_free_text_assignees() {
        let known = CardModel::from_task(&task("a", Status::Todo, "Marta Ruiz", &[]));
        assert_eq!(known.person.map(|p| p.initials), Some("MR"));

        let free_text = CardModel::from_task(&task("b", Status::Todo, "someone external", &[]));
        assert!(free_text.person.is_none());

        let unassigned = CardModel::from_task(&task("c", Status::Todo, "", &[]));
        assert!(unassigned.person.is_none());
    }
}
