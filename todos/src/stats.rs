//! Derived statistics for one owner's todos.

use crate::types::{Priority, Status, Todo};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Todo counts per priority
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PriorityBreakdown {
    /// High priority todos
    pub high: usize,
    /// Medium priority todos
    pub medium: usize,
    /// Low priority todos
    pub low: usize,
}

/// Todo counts per status
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StatusBreakdown {
    /// Not started
    pub pending: usize,
    /// Being worked on
    pub in_progress: usize,
    /// Done
    pub completed: usize,
    /// Abandoned
    pub cancelled: usize,
}

/// Summary counts over a set of todos
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TodoStatistics {
    /// Number of todos
    pub total: usize,
    /// Number of completed todos
    pub completed: usize,
    /// `total - completed`
    pub pending: usize,
    /// Open todos past their due date
    pub overdue: usize,
    /// Percentage completed, one decimal place; 0 when empty
    pub completion_rate: f64,
    /// Counts per priority
    pub by_priority: PriorityBreakdown,
    /// Counts per status
    pub by_status: StatusBreakdown,
}

/// Computes statistics for `todos` as of `now`
#[must_use]
pub fn statistics(todos: &[Todo], now: DateTime<Utc>) -> TodoStatistics {
    let mut by_priority = PriorityBreakdown::default();
    let mut by_status = StatusBreakdown::default();
    let mut completed = 0;
    let mut overdue = 0;

    for todo in todos {
        match todo.priority {
            Priority::High => by_priority.high += 1,
            Priority::Medium => by_priority.medium += 1,
            Priority::Low => by_priority.low += 1,
        }
        match todo.status {
            Status::Pending => by_status.pending += 1,
            Status::InProgress => by_status.in_progress += 1,
            Status::Completed => by_status.completed += 1,
            Status::Cancelled => by_status.cancelled += 1,
        }
        if todo.completed {
            completed += 1;
        }
        if todo.is_overdue(now) {
            overdue += 1;
        }
    }

    let total = todos.len();
    TodoStatistics {
        total,
        completed,
        pending: total - completed,
        overdue,
        completion_rate: completion_rate(completed, total),
        by_priority,
        by_status,
    }
}

#[allow(clippy::cast_precision_loss)] // counts stay far below 2^52
fn completion_rate(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let percent = completed as f64 / total as f64 * 100.0;
    (percent * 10.0).round_ties_even() / 10.0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{Owner, TodoId};
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn todo(n: u128, priority: Priority, status: Status) -> Todo {
        let mut todo = Todo {
            id: TodoId::from_uuid(Uuid::from_u128(n)),
            owner: Owner::parse("ayse").unwrap(),
            text: format!("todo {n}"),
            description: None,
            priority,
            status,
            completed: false,
            due_date: None,
            tags: Vec::new(),
            category_id: None,
            created_at: now(),
            updated_at: now(),
        };
        todo.set_status(status);
        todo
    }

    #[test]
    fn empty_set_has_zero_rate() {
        let stats = statistics(&[], now());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.pending, 0);
        assert!(stats.completion_rate.abs() < f64::EPSILON);
    }

    #[test]
    fn rate_rounds_half_to_even() {
        assert!((completion_rate(1, 16) - 6.2).abs() < 1e-9);
        assert!((completion_rate(5, 16) - 31.2).abs() < 1e-9);
        assert!((completion_rate(3, 16) - 18.8).abs() < 1e-9);
        assert!((completion_rate(2, 3) - 66.7).abs() < 1e-9);
        assert!((completion_rate(16, 16) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn counts_and_rounds_rate() {
        let mut late = todo(3, Priority::Low, Status::InProgress);
        late.due_date = Some(now() - Duration::days(1));
        let todos = vec![
            todo(1, Priority::High, Status::Completed),
            todo(2, Priority::High, Status::Pending),
            late,
        ];

        let stats = statistics(&todos, now());
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.overdue, 1);
        assert!((stats.completion_rate - 33.3).abs() < 1e-9);
        assert_eq!(
            stats.by_priority,
            PriorityBreakdown {
                high: 2,
                medium: 0,
                low: 1
            }
        );
        assert_eq!(stats.by_status.in_progress, 1);
        assert_eq!(stats.by_status.completed, 1);
    }

    fn arb_status() -> impl Strategy<Value = Status> {
        prop_oneof![
            Just(Status::Pending),
            Just(Status::InProgress),
            Just(Status::Completed),
            Just(Status::Cancelled),
        ]
    }

    proptest! {
        #[test]
        fn completed_plus_pending_is_total(statuses in prop::collection::vec(arb_status(), 0..60)) {
            let todos: Vec<Todo> = statuses
                .iter()
                .enumerate()
                .map(|(i, s)| todo(i as u128, Priority::Medium, *s))
                .collect();

            let stats = statistics(&todos, now());
            prop_assert_eq!(stats.completed + stats.pending, stats.total);
            prop_assert_eq!(stats.completed, stats.by_status.completed);
            prop_assert!((0.0..=100.0).contains(&stats.completion_rate));
        }
    }
}
