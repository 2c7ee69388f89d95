/// A member of the fixed team roster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Person {
    /// Display name, matched exactly against `Task::assignee`
    pub name: &'static str,
    /// Avatar initials
    pub initials: &'static str,
    /// Avatar color, `#rrggbb`
    pub color: &'static str,
}

/// The assignable people. Hardcoded: the roster is not configurable at
/// runtime, not persisted, and not enforced against task data.
pub static ROSTER: [Person; 5] = [
    Person {
        name: "Ana Gómez",
        initials: "AG",
        color: "#ec4899",
    },
    Person {
        name: "Luis Martínez",
        initials: "LM",
        color: "#3b82f6",
    },
    Person {
        name: "Marta Ruiz",
        initials: "MR",
        color: "#8b5cf6",
    },
    Person {
        name: "Pablo Schmidt",
        initials: "PS",
        color: "#10b981",
    },
    Person {
        name: "Sofía López",
        initials: "SL",
        color: "#f59e0b",
    },
];

/// The tag vocabulary offered by the creation form and the tag filter
pub const TAGS: [&str; 5] = ["Bug", "Feature", "Documentation", "Testing", "Urgente"];

/// Exact-name roster lookup. Free-text assignees return None and render
/// without an avatar.
pub fn find_person(name: &str) -> Option<&'static Person> {
    ROSTER.iter().find(|p| p.name == name)
}
