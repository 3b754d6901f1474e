//! Pure queries over a snapshot of one owner's todos.
//!
//! None of these functions mutate their input; each returns a new `Vec`.

use crate::types::{CategoryId, Priority, Todo};
use chrono::{DateTime, Utc};

/// Sort key for a priority: high=1, medium=2, low=3
#[must_use]
pub const fn priority_rank(priority: Priority) -> u8 {
    match priority {
        Priority::High => 1,
        Priority::Medium => 2,
        Priority::Low => 3,
    }
}

/// Todos with the given priority
#[must_use]
pub fn filter_by_priority(todos: &[Todo], priority: Priority) -> Vec<Todo> {
    todos
        .iter()
        .filter(|t| t.priority == priority)
        .cloned()
        .collect()
}

/// Todos in the given category
#[must_use]
pub fn filter_by_category(todos: &[Todo], category_id: CategoryId) -> Vec<Todo> {
    todos
        .iter()
        .filter(|t| t.category_id == Some(category_id))
        .cloned()
        .collect()
}

/// Open todos whose due date is strictly before `now`
#[must_use]
pub fn filter_overdue(todos: &[Todo], now: DateTime<Utc>) -> Vec<Todo> {
    todos.iter().filter(|t| t.is_overdue(now)).cloned().collect()
}

/// Case-insensitive substring match on text, description or any tag
///
/// A blank query matches everything.
#[must_use]
pub fn search(todos: &[Todo], query: &str) -> Vec<Todo> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return todos.to_vec();
    }

    let matches = |haystack: &str| haystack.to_lowercase().contains(&needle);
    todos
        .iter()
        .filter(|t| {
            matches(&t.text)
                || t.description.as_deref().is_some_and(matches)
                || t.tags.iter().any(|tag| matches(tag))
        })
        .cloned()
        .collect()
}

/// Stable sort by priority rank, then creation time ascending
#[must_use]
pub fn sort_by_priority_then_created(todos: &[Todo]) -> Vec<Todo> {
    let mut sorted = todos.to_vec();
    sorted.sort_by_key(|t| (priority_rank(t.priority), t.created_at));
    sorted
}

/// Listing filters, applied in field order, then the optional sort
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoQuery {
    /// Keep only this priority
    pub priority: Option<Priority>,
    /// Keep only this category
    pub category: Option<CategoryId>,
    /// Keep only overdue todos
    pub overdue: bool,
    /// Keep only todos matching this text
    pub search: Option<String>,
    /// Order by priority then creation time instead of insertion order
    pub sort: bool,
}

impl TodoQuery {
    /// Runs the query over `todos`
    #[must_use]
    pub fn apply(&self, todos: &[Todo], now: DateTime<Utc>) -> Vec<Todo> {
        let mut result = todos.to_vec();

        if let Some(priority) = self.priority {
            result = filter_by_priority(&result, priority);
        }
        if let Some(category) = self.category {
            result = filter_by_category(&result, category);
        }
        if self.overdue {
            result = filter_overdue(&result, now);
        }
        if let Some(query) = &self.search {
            result = search(&result, query);
        }
        if self.sort {
            result = sort_by_priority_then_created(&result);
        }

        result
    }
}
