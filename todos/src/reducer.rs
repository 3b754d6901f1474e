//! Reducer logic for todos.
//!
//! Commands are validated against current state, turned into a [`TodoEvent`]
//! and the event is applied. A rejected command never touches state.

use crate::error::TodoError;
use crate::types::{
    Owner, Todo, TodoDraft, TodoId, TodoPatch, TodoState, normalize_tags, validate_text,
};
use serde::Serialize;
use std::sync::Arc;
use todocast_core::environment::{Clock, IdGenerator};
use todocast_core::reducer::Reducer;

/// Environment dependencies for the todo and category reducers
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Clock for generating timestamps
    pub clock: Arc<dyn Clock>,
    /// Source of fresh record ids
    pub ids: Arc<dyn IdGenerator>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }
}

/// Commands accepted by the todo store
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TodoAction {
    /// Create a new todo
    Create {
        /// Acting user, becomes the todo's owner
        owner: Owner,
        /// Initial fields
        draft: TodoDraft,
    },

    /// Change some fields of a todo
    Update {
        /// Acting user
        owner: Owner,
        /// Todo to change
        id: TodoId,
        /// Fields to change
        patch: TodoPatch,
    },

    /// Flip the completion flag
    ToggleComplete {
        /// Acting user
        owner: Owner,
        /// Todo to toggle
        id: TodoId,
    },

    /// Remove a todo
    Delete {
        /// Acting user
        owner: Owner,
        /// Todo to remove
        id: TodoId,
    },

    /// Attach a tag
    AddTag {
        /// Acting user
        owner: Owner,
        /// Todo to tag
        id: TodoId,
        /// Tag to add (trimmed)
        tag: String,
    },

    /// Detach a tag
    RemoveTag {
        /// Acting user
        owner: Owner,
        /// Todo to untag
        id: TodoId,
        /// Tag to remove (trimmed)
        tag: String,
    },
}

/// What an accepted command did
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "todo", rename_all = "snake_case")]
pub enum TodoEvent {
    /// Todo was created
    Created(Todo),
    /// Todo fields were changed
    Updated(Todo),
    /// Completion flag was flipped
    Toggled(Todo),
    /// Todo was removed
    Deleted(TodoId),
    /// Tag was attached
    TagAdded(Todo),
    /// Tag was detached
    TagRemoved(Todo),
    /// Command was valid but changed nothing
    Unchanged(Todo),
}

impl TodoEvent {
    /// The resulting todo, for every event except `Deleted`
    #[must_use]
    pub const fn todo(&self) -> Option<&Todo> {
        match self {
            Self::Created(todo)
            | Self::Updated(todo)
            | Self::Toggled(todo)
            | Self::TagAdded(todo)
            | Self::TagRemoved(todo)
            | Self::Unchanged(todo) => Some(todo),
            Self::Deleted(_) => None,
        }
    }

    /// Consumes the event, returning the resulting todo
    #[must_use]
    pub fn into_todo(self) -> Option<Todo> {
        match self {
            Self::Created(todo)
            | Self::Updated(todo)
            | Self::Toggled(todo)
            | Self::TagAdded(todo)
            | Self::TagRemoved(todo)
            | Self::Unchanged(todo) => Some(todo),
            Self::Deleted(_) => None,
        }
    }
}

/// Reducer for the todo store
#[derive(Clone, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn create(
        owner: Owner,
        draft: TodoDraft,
        env: &TodoEnvironment,
    ) -> Result<TodoEvent, TodoError> {
        let text = validate_text(&draft.text)?;

        let now = env.clock.now();
        let mut todo = Todo {
            id: TodoId::from_uuid(env.ids.next_id()),
            owner,
            text,
            description: draft.description,
            priority: draft.priority.unwrap_or_default(),
            status: draft.status.unwrap_or_default(),
            completed: false,
            due_date: draft.due_date,
            tags: normalize_tags(draft.tags),
            category_id: draft.category_id,
            created_at: now,
            updated_at: now,
        };
        todo.set_status(todo.status);

        Ok(TodoEvent::Created(todo))
    }

    fn update(
        state: &TodoState,
        owner: &Owner,
        id: TodoId,
        patch: TodoPatch,
        env: &TodoEnvironment,
    ) -> Result<TodoEvent, TodoError> {
        let mut todo = state.get_owned(owner, id)?.clone();

        let text = patch.text.as_deref().map(validate_text).transpose()?;

        match (patch.status, patch.completed) {
            (Some(status), Some(completed)) if completed != status.is_completed() => {
                return Err(TodoError::validation(format!(
                    "completed={completed} contradicts status '{status}'"
                )));
            }
            (Some(status), _) => todo.set_status(status),
            (None, Some(completed)) => todo.set_completed(completed),
            (None, None) => {}
        }

        if let Some(text) = text {
            todo.text = text;
        }
        if let Some(description) = patch.description {
            todo.description = description;
        }
        if let Some(priority) = patch.priority {
            todo.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            todo.due_date = due_date;
        }
        if let Some(tags) = patch.tags {
            todo.tags = normalize_tags(tags);
        }
        if let Some(category_id) = patch.category_id {
            todo.category_id = category_id;
        }
        todo.updated_at = env.clock.now();

        Ok(TodoEvent::Updated(todo))
    }

    fn toggle(
        state: &TodoState,
        owner: &Owner,
        id: TodoId,
        env: &TodoEnvironment,
    ) -> Result<TodoEvent, TodoError> {
        let mut todo = state.get_owned(owner, id)?.clone();
        todo.set_completed(!todo.completed);
        todo.updated_at = env.clock.now();
        Ok(TodoEvent::Toggled(todo))
    }

    fn delete(state: &TodoState, owner: &Owner, id: TodoId) -> Result<TodoEvent, TodoError> {
        state.get_owned(owner, id)?;
        Ok(TodoEvent::Deleted(id))
    }

    fn add_tag(
        state: &TodoState,
        owner: &Owner,
        id: TodoId,
        tag: &str,
        env: &TodoEnvironment,
    ) -> Result<TodoEvent, TodoError> {
        let tag = non_empty_tag(tag)?;
        let mut todo = state.get_owned(owner, id)?.clone();

        if todo.has_tag(tag) {
            return Ok(TodoEvent::Unchanged(todo));
        }

        todo.tags.push(tag.to_string());
        todo.updated_at = env.clock.now();
        Ok(TodoEvent::TagAdded(todo))
    }

    fn remove_tag(
        state: &TodoState,
        owner: &Owner,
        id: TodoId,
        tag: &str,
        env: &TodoEnvironment,
    ) -> Result<TodoEvent, TodoError> {
        let tag = non_empty_tag(tag)?;
        let mut todo = state.get_owned(owner, id)?.clone();

        if !todo.has_tag(tag) {
            return Ok(TodoEvent::Unchanged(todo));
        }

        todo.tags.retain(|t| t != tag);
        todo.updated_at = env.clock.now();
        Ok(TodoEvent::TagRemoved(todo))
    }

    /// Applies an event to state
    fn apply_event(state: &mut TodoState, event: &TodoEvent) {
        match event {
            TodoEvent::Created(todo) => state.todos.push(todo.clone()),
            TodoEvent::Updated(todo)
            | TodoEvent::Toggled(todo)
            | TodoEvent::TagAdded(todo)
            | TodoEvent::TagRemoved(todo) => {
                if let Some(existing) = state.todos.iter_mut().find(|t| t.id == todo.id) {
                    *existing = todo.clone();
                }
            }
            TodoEvent::Deleted(id) => state.todos.retain(|t| t.id != *id),
            TodoEvent::Unchanged(_) => {}
        }
    }
}

fn non_empty_tag(tag: &str) -> Result<&str, TodoError> {
    let tag = tag.trim();
    if tag.is_empty() {
        return Err(TodoError::validation("tag cannot be empty"));
    }
    Ok(tag)
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;
    type Output = TodoEvent;
    type Error = TodoError;

    fn reduce(
        &self,
        state: &mut TodoState,
        action: TodoAction,
        env: &TodoEnvironment,
    ) -> Result<TodoEvent, TodoError> {
        let result = match action {
            TodoAction::Create { owner, draft } => Self::create(owner, draft, env),
            TodoAction::Update { owner, id, patch } => Self::update(state, &owner, id, patch, env),
            TodoAction::ToggleComplete { owner, id } => Self::toggle(state, &owner, id, env),
            TodoAction::Delete { owner, id } => Self::delete(state, &owner, id),
            TodoAction::AddTag { owner, id, tag } => Self::add_tag(state, &owner, id, &tag, env),
            TodoAction::RemoveTag { owner, id, tag } => {
                Self::remove_tag(state, &owner, id, &tag, env)
            }
        };

        match result {
            Ok(event) => {
                Self::apply_event(state, &event);
                tracing::debug!(?event, "Todo command accepted");
                Ok(event)
            }
            Err(error) => {
                tracing::warn!(%error, "Todo command rejected");
                Err(error)
            }
        }
    }
}
