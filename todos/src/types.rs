//! Domain types for todos and categories.

use crate::error::TodoError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Shortest accepted todo text, in characters.
pub const MIN_TEXT_CHARS: usize = 2;

/// Longest accepted todo text, in characters.
pub const MAX_TEXT_CHARS: usize = 500;

/// Color given to a category created without one.
pub const DEFAULT_CATEGORY_COLOR: &str = "#007bff";

/// The username a todo or category belongs to
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Owner(String);

impl Owner {
    /// Parses a username, trimming surrounding whitespace
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Validation`] if the name is empty after trimming.
    pub fn parse(name: &str) -> Result<Self, TodoError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(TodoError::validation("username cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the username
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a todo item
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(Uuid);

impl TodoId {
    /// Creates a `TodoId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TodoId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Unique identifier for a category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(Uuid);

impl CategoryId {
    /// Creates a `CategoryId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CategoryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// How urgent a todo is
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Can wait
    Low,
    /// Normal urgency
    #[default]
    Medium,
    /// Do first
    High,
}

impl Priority {
    /// The English label used on the wire
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = TodoError;

    /// Accepts the English labels and the legacy Turkish ones, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" | "düşük" => Ok(Self::Low),
            "medium" | "orta" => Ok(Self::Medium),
            "high" | "yüksek" => Ok(Self::High),
            _ => Err(TodoError::invalid_value("priority", s)),
        }
    }
}

/// Where a todo is in its lifecycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Not started
    #[default]
    Pending,
    /// Being worked on
    InProgress,
    /// Done
    Completed,
    /// Abandoned
    Cancelled,
}

impl Status {
    /// The English label used on the wire
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether this is [`Status::Completed`]
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" | "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(TodoError::invalid_value("status", s)),
        }
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier
    pub id: TodoId,
    /// Who the todo belongs to; never changes
    pub owner: Owner,
    /// What needs doing
    pub text: String,
    /// Optional longer description
    pub description: Option<String>,
    /// How urgent it is
    pub priority: Priority,
    /// Lifecycle status
    pub status: Status,
    /// Mirrors `status == Completed`
    pub completed: bool,
    /// When it should be done by
    pub due_date: Option<DateTime<Utc>>,
    /// Free-form labels, unique and in insertion order
    pub tags: Vec<String>,
    /// Advisory link to a category; not checked for existence
    pub category_id: Option<CategoryId>,
    /// When the todo was created
    pub created_at: DateTime<Utc>,
    /// When the todo was last changed
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Whether the due date has passed and the todo is still open
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < now)
    }

    /// Whole days until the due date, negative once it has passed
    ///
    /// Rounds toward negative infinity, so a todo due one hour ago is `-1`.
    #[must_use]
    pub fn days_until_due(&self, now: DateTime<Utc>) -> Option<i64> {
        const SECONDS_PER_DAY: i64 = 86_400;
        self.due_date
            .map(|due| (due - now).num_seconds().div_euclid(SECONDS_PER_DAY))
    }

    /// Whether the todo carries `tag`
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Sets `status` and keeps `completed` in step with it
    pub(crate) fn set_status(&mut self, status: Status) {
        self.status = status;
        self.completed = status.is_completed();
    }

    /// Sets `completed` and derives `status` from it
    pub(crate) fn set_completed(&mut self, completed: bool) {
        self.set_status(if completed {
            Status::Completed
        } else {
            Status::Pending
        });
    }
}

/// Fields supplied when creating a todo
///
/// Unset optional fields take their defaults (`medium`, `pending`, no tags).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoDraft {
    /// What needs doing
    pub text: String,
    /// Optional longer description
    pub description: Option<String>,
    /// Defaults to [`Priority::Medium`]
    pub priority: Option<Priority>,
    /// Defaults to [`Status::Pending`]
    pub status: Option<Status>,
    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,
    /// Initial tags (normalized on create)
    pub tags: Vec<String>,
    /// Optional category
    pub category_id: Option<CategoryId>,
}

impl TodoDraft {
    /// A draft with only the text set
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Sets the priority
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the status
    #[must_use]
    pub const fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the due date
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial tags
    #[must_use]
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the category
    #[must_use]
    pub const fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
}

/// A partial update to a todo
///
/// `None` leaves a field alone. For clearable fields the inner `Option`
/// distinguishes "set" (`Some(Some(v))`) from "clear" (`Some(None)`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoPatch {
    /// New text
    pub text: Option<String>,
    /// Set or clear the description
    pub description: Option<Option<String>>,
    /// New priority
    pub priority: Option<Priority>,
    /// New status; derives `completed`
    pub status: Option<Status>,
    /// New completion flag; derives `status` when `status` is not given
    pub completed: Option<bool>,
    /// Set or clear the due date
    pub due_date: Option<Option<DateTime<Utc>>>,
    /// Replace all tags
    pub tags: Option<Vec<String>>,
    /// Set or clear the category
    pub category_id: Option<Option<CategoryId>>,
}

/// A named, colored grouping of todos
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,
    /// Who the category belongs to
    pub owner: Owner,
    /// Display name, trimmed and non-empty
    pub name: String,
    /// Hex color starting with `#`
    pub color: String,
    /// When the category was created
    pub created_at: DateTime<Utc>,
}

/// All todos, in insertion order
#[derive(Clone, Debug, Default)]
pub struct TodoState {
    /// Every todo of every owner
    pub todos: Vec<Todo>,
}

impl TodoState {
    /// Creates a new empty todo state
    #[must_use]
    pub const fn new() -> Self {
        Self { todos: Vec::new() }
    }

    /// Returns the number of todos across all owners
    #[must_use]
    pub fn count(&self) -> usize {
        self.todos.len()
    }

    /// Returns a todo by ID regardless of owner
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// Returns a copy of `owner`'s todos in insertion order
    #[must_use]
    pub fn owned_by(&self, owner: &Owner) -> Vec<Todo> {
        self.todos
            .iter()
            .filter(|t| &t.owner == owner)
            .cloned()
            .collect()
    }

    /// Returns a todo if it exists and belongs to `owner`
    ///
    /// # Errors
    ///
    /// - [`TodoError::NotFound`] if no todo has this id
    /// - [`TodoError::Ownership`] if it belongs to someone else
    pub fn get_owned(&self, owner: &Owner, id: TodoId) -> Result<&Todo, TodoError> {
        let todo = self.get(id).ok_or_else(|| TodoError::NotFound {
            resource: "todo",
            id: id.to_string(),
        })?;

        if &todo.owner != owner {
            return Err(TodoError::Ownership {
                resource: "todo",
                id: id.to_string(),
            });
        }

        Ok(todo)
    }
}

/// Trims todo text and checks it is within the accepted length
pub(crate) fn validate_text(text: &str) -> Result<String, TodoError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TodoError::validation("todo text cannot be blank"));
    }
    let len = trimmed.chars().count();
    if (MIN_TEXT_CHARS..=MAX_TEXT_CHARS).contains(&len) {
        Ok(trimmed.to_string())
    } else {
        Err(TodoError::validation(format!(
            "todo text must be between {MIN_TEXT_CHARS} and {MAX_TEXT_CHARS} characters (got {len})"
        )))
    }
}

/// Trims tags, drops empty ones and suppresses duplicates, keeping first occurrence order
pub(crate) fn normalize_tags<I, T>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let mut normalized: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if !tag.is_empty() && !normalized.iter().any(|t| t == tag) {
            normalized.push(tag.to_string());
        }
    }
    normalized
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn sample(now: DateTime<Utc>) -> Todo {
        Todo {
            id: TodoId::from_uuid(Uuid::from_u128(1)),
            owner: Owner::parse("ayse").unwrap(),
            text: "Buy milk".to_string(),
            description: None,
            priority: Priority::default(),
            status: Status::default(),
            completed: false,
            due_date: None,
            tags: Vec::new(),
            category_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!("HIGH".parse::<Priority>(), Ok(Priority::High));
        assert_eq!("Low".parse::<Priority>(), Ok(Priority::Low));
        assert_eq!("yüksek".parse::<Priority>(), Ok(Priority::High));
        assert_eq!("orta".parse::<Priority>(), Ok(Priority::Medium));
        assert_eq!("düşük".parse::<Priority>(), Ok(Priority::Low));
        assert_eq!(
            "urgent".parse::<Priority>(),
            Err(TodoError::invalid_value("priority", "urgent"))
        );
    }

    #[test]
    fn status_accepts_hyphenated_in_progress() {
        assert_eq!("in-progress".parse::<Status>(), Ok(Status::InProgress));
        assert_eq!("In_Progress".parse::<Status>(), Ok(Status::InProgress));
        assert!("done".parse::<Status>().is_err());
    }

    #[test]
    fn labels_serialize_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
    }

    #[test]
    fn owner_is_trimmed_and_non_empty() {
        assert_eq!(Owner::parse("  mehmet ").unwrap().as_str(), "mehmet");
        assert!(Owner::parse("   ").is_err());
    }

    #[test]
    fn overdue_requires_open_todo_with_past_due_date() {
        let now = noon();
        let mut todo = sample(now);
        assert!(!todo.is_overdue(now));

        todo.due_date = Some(now - Duration::days(1));
        assert!(todo.is_overdue(now));

        todo.set_completed(true);
        assert!(!todo.is_overdue(now));
    }

    #[test]
    fn days_until_due_floors() {
        let now = noon();
        let mut todo = sample(now);
        assert_eq!(todo.days_until_due(now), None);

        todo.due_date = Some(now + Duration::days(3));
        assert_eq!(todo.days_until_due(now), Some(3));

        todo.due_date = Some(now - Duration::hours(1));
        assert_eq!(todo.days_until_due(now), Some(-1));
    }

    #[test]
    fn status_and_completed_stay_consistent() {
        let mut todo = sample(noon());
        todo.set_status(Status::Completed);
        assert!(todo.completed);
        todo.set_status(Status::Cancelled);
        assert!(!todo.completed);
        todo.set_completed(true);
        assert_eq!(todo.status, Status::Completed);
        todo.set_completed(false);
        assert_eq!(todo.status, Status::Pending);
    }

    #[test]
    fn text_length_counts_characters() {
        assert!(validate_text("ab").is_ok());
        assert!(validate_text("a").is_err());
        assert!(validate_text("çö").is_ok());
        assert!(validate_text(&"x".repeat(500)).is_ok());
        assert!(validate_text(&"x".repeat(501)).is_err());
    }

    #[test]
    fn text_length_ignores_surrounding_whitespace() {
        assert!(validate_text("   ").is_err());
        assert!(validate_text(" a ").is_err());
        assert_eq!(validate_text("  ab \n").unwrap(), "ab");
        assert!(validate_text(&format!(" {} ", "x".repeat(500))).is_ok());
    }

    #[test]
    fn tags_are_trimmed_and_deduplicated() {
        assert_eq!(
            normalize_tags([" work ", "", "home", "work", "  "]),
            vec!["work".to_string(), "home".to_string()]
        );
    }

    #[test]
    fn get_owned_distinguishes_missing_from_foreign() {
        let now = noon();
        let todo = sample(now);
        let id = todo.id;
        let state = TodoState { todos: vec![todo] };

        let ayse = Owner::parse("ayse").unwrap();
        let ali = Owner::parse("ali").unwrap();

        assert!(state.get_owned(&ayse, id).is_ok());
        assert!(matches!(
            state.get_owned(&ali, id),
            Err(TodoError::Ownership { .. })
        ));
        assert!(matches!(
            state.get_owned(&ayse, TodoId::from_uuid(Uuid::from_u128(9))),
            Err(TodoError::NotFound { .. })
        ));
    }
}
