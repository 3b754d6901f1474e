//! Todo endpoints.
//!
//! ```text
//! GET    /api/todos                 list (priority, category, overdue, q, sort)
//! POST   /api/todos                 create
//! GET    /api/todos/stats           statistics
//! GET    /api/todos/:id             fetch one
//! PATCH  /api/todos/:id             update
//! DELETE /api/todos/:id             delete
//! POST   /api/todos/:id/toggle      toggle completion
//! POST   /api/todos/:id/tags        add tag
//! DELETE /api/todos/:id/tags/:tag   remove tag
//! ```

use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::response::ApiResponse;
use crate::state::AppState;
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use todocast_todos::{
    CategoryId, Priority, Status, Todo, TodoAction, TodoDraft, TodoError, TodoId, TodoPatch,
    TodoQuery, TodoStatistics, statistics,
};

/// Query string for `GET /api/todos`
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Priority label
    pub priority: Option<String>,
    /// Category id
    pub category: Option<String>,
    /// Only overdue todos (`true`/`1` or `false`/`0`)
    pub overdue: Option<String>,
    /// Search text
    pub q: Option<String>,
    /// `priority` to sort by priority, `created` (default) for insertion order
    pub sort: Option<String>,
}

impl ListParams {
    fn into_query(self) -> Result<TodoQuery, AppError> {
        let priority = self
            .priority
            .as_deref()
            .map(str::parse::<Priority>)
            .transpose()?;

        let category = self
            .category
            .as_deref()
            .map(|raw| {
                raw.parse::<CategoryId>()
                    .map_err(|_| AppError::bad_request(format!("invalid category id '{raw}'")))
            })
            .transpose()?;

        let sort = match self.sort.as_deref().map(str::trim) {
            None | Some("" | "created") => false,
            Some("priority") => true,
            Some(other) => return Err(TodoError::invalid_value("sort", other).into()),
        };

        let overdue = match self.overdue.as_deref().map(str::trim) {
            None | Some("" | "false" | "0") => false,
            Some("true" | "1") => true,
            Some(other) => return Err(TodoError::invalid_value("overdue", other).into()),
        };

        Ok(TodoQuery {
            priority,
            category,
            overdue,
            search: self.q,
            sort,
        })
    }
}

/// Body of `POST /api/todos`
#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    /// What needs doing
    pub text: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Priority label
    #[serde(default)]
    pub priority: Option<String>,
    /// Status label
    #[serde(default)]
    pub status: Option<String>,
    /// Due date (RFC 3339)
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    /// Initial tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Category id
    #[serde(default)]
    pub category_id: Option<CategoryId>,
}

impl TryFrom<CreateTodoRequest> for TodoDraft {
    type Error = TodoError;

    fn try_from(request: CreateTodoRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            text: request.text,
            description: request.description,
            priority: request.priority.as_deref().map(str::parse).transpose()?,
            status: request.status.as_deref().map(str::parse).transpose()?,
            due_date: request.due_date,
            tags: request.tags,
            category_id: request.category_id,
        })
    }
}

/// Body of `PATCH /api/todos/:id`
///
/// An absent field is left alone; `null` clears a clearable field.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoRequest {
    /// New text
    #[serde(default)]
    pub text: Option<String>,
    /// Set or clear the description
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    /// New priority label
    #[serde(default)]
    pub priority: Option<String>,
    /// New status label
    #[serde(default)]
    pub status: Option<String>,
    /// New completion flag
    #[serde(default)]
    pub completed: Option<bool>,
    /// Set or clear the due date
    #[serde(default, deserialize_with = "present")]
    pub due_date: Option<Option<DateTime<Utc>>>,
    /// Replace all tags
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Set or clear the category
    #[serde(default, deserialize_with = "present")]
    pub category_id: Option<Option<CategoryId>>,
}

/// Marks a field that appeared in the body, even as `null`
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl TryFrom<UpdateTodoRequest> for TodoPatch {
    type Error = TodoError;

    fn try_from(request: UpdateTodoRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            text: request.text,
            description: request.description,
            priority: request
                .priority
                .as_deref()
                .map(str::parse::<Priority>)
                .transpose()?,
            status: request
                .status
                .as_deref()
                .map(str::parse::<Status>)
                .transpose()?,
            completed: request.completed,
            due_date: request.due_date,
            tags: request.tags,
            category_id: request.category_id,
        })
    }
}

/// Body of `POST /api/todos/:id/tags`
#[derive(Debug, Deserialize)]
pub struct TagRequest {
    /// Tag to add
    pub tag: String,
}

/// Payload of a successful delete
#[derive(Debug, Serialize)]
pub struct Deleted {
    /// Id of the removed todo
    pub deleted: TodoId,
}

fn parse_id(raw: &str) -> Result<TodoId, AppError> {
    raw.parse()
        .map_err(|_| AppError::bad_request(format!("invalid todo id '{raw}'")))
}

/// Unwraps the todo carried by an event
fn event_todo(event: todocast_todos::TodoEvent) -> Result<Todo, AppError> {
    event
        .into_todo()
        .ok_or_else(|| AppError::internal("command produced no todo"))
}

/// `GET /api/todos`
///
/// # Errors
///
/// 400 for a malformed query, 422 for an unknown priority or sort label.
pub async fn list<W>(
    State(state): State<AppState<W>>,
    CurrentUser(owner): CurrentUser,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<ApiResponse<Vec<Todo>>, AppError> {
    let Query(params) = params?;
    let query = params.into_query()?;

    let todos = state.todos.state(|s| s.owned_by(&owner)).await;
    let todos = query.apply(&todos, state.clock.now());

    Ok(ApiResponse::list(todos))
}

/// `POST /api/todos`
///
/// # Errors
///
/// 422 for invalid text length or labels.
pub async fn create<W>(
    State(state): State<AppState<W>>,
    CurrentUser(owner): CurrentUser,
    body: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<(StatusCode, ApiResponse<Todo>), AppError> {
    let Json(request) = body?;
    let draft = TodoDraft::try_from(request)?;

    let event = state.todos.send(TodoAction::Create { owner, draft }).await?;
    let todo = event_todo(event)?;

    tracing::info!(id = %todo.id, "Todo created");
    Ok((StatusCode::CREATED, ApiResponse::new(todo)))
}

/// `GET /api/todos/stats`
pub async fn stats<W>(
    State(state): State<AppState<W>>,
    CurrentUser(owner): CurrentUser,
) -> ApiResponse<TodoStatistics> {
    let todos = state.todos.state(|s| s.owned_by(&owner)).await;
    ApiResponse::new(statistics(&todos, state.clock.now()))
}

/// `GET /api/todos/:id`
///
/// # Errors
///
/// 400 for a malformed id, 404 when missing, 403 when owned by someone else.
pub async fn get<W>(
    State(state): State<AppState<W>>,
    CurrentUser(owner): CurrentUser,
    id: Result<Path<String>, PathRejection>,
) -> Result<ApiResponse<Todo>, AppError> {
    let Path(raw) = id?;
    let id = parse_id(&raw)?;

    let todo = state
        .todos
        .state(|s| s.get_owned(&owner, id).cloned())
        .await?;

    Ok(ApiResponse::new(todo))
}

/// `PATCH /api/todos/:id`
///
/// # Errors
///
/// 400, 403, 404 or 422 as for the underlying command.
pub async fn update<W>(
    State(state): State<AppState<W>>,
    CurrentUser(owner): CurrentUser,
    id: Result<Path<String>, PathRejection>,
    body: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> Result<ApiResponse<Todo>, AppError> {
    let Path(raw) = id?;
    let id = parse_id(&raw)?;
    let Json(request) = body?;
    let patch = TodoPatch::try_from(request)?;

    let event = state
        .todos
        .send(TodoAction::Update { owner, id, patch })
        .await?;

    Ok(ApiResponse::new(event_todo(event)?))
}

/// `POST /api/todos/:id/toggle`
///
/// # Errors
///
/// 400, 403 or 404.
pub async fn toggle<W>(
    State(state): State<AppState<W>>,
    CurrentUser(owner): CurrentUser,
    id: Result<Path<String>, PathRejection>,
) -> Result<ApiResponse<Todo>, AppError> {
    let Path(raw) = id?;
    let id = parse_id(&raw)?;

    let event = state
        .todos
        .send(TodoAction::ToggleComplete { owner, id })
        .await?;

    Ok(ApiResponse::new(event_todo(event)?))
}

/// `DELETE /api/todos/:id`
///
/// # Errors
///
/// 400, 403 or 404.
pub async fn delete<W>(
    State(state): State<AppState<W>>,
    CurrentUser(owner): CurrentUser,
    id: Result<Path<String>, PathRejection>,
) -> Result<ApiResponse<Deleted>, AppError> {
    let Path(raw) = id?;
    let id = parse_id(&raw)?;

    state.todos.send(TodoAction::Delete { owner, id }).await?;

    tracing::info!(%id, "Todo deleted");
    Ok(ApiResponse::new(Deleted { deleted: id }))
}

/// `POST /api/todos/:id/tags`
///
/// # Errors
///
/// 400, 403, 404, or 422 for a blank tag.
pub async fn add_tag<W>(
    State(state): State<AppState<W>>,
    CurrentUser(owner): CurrentUser,
    id: Result<Path<String>, PathRejection>,
    body: Result<Json<TagRequest>, JsonRejection>,
) -> Result<ApiResponse<Todo>, AppError> {
    let Path(raw) = id?;
    let id = parse_id(&raw)?;
    let Json(TagRequest { tag }) = body?;

    let event = state
        .todos
        .send(TodoAction::AddTag { owner, id, tag })
        .await?;

    Ok(ApiResponse::new(event_todo(event)?))
}

/// `DELETE /api/todos/:id/tags/:tag`
///
/// # Errors
///
/// 400, 403, 404, or 422 for a blank tag.
pub async fn remove_tag<W>(
    State(state): State<AppState<W>>,
    CurrentUser(owner): CurrentUser,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<ApiResponse<Todo>, AppError> {
    let Path((raw, tag)) = path?;
    let id = parse_id(&raw)?;

    let event = state
        .todos
        .send(TodoAction::RemoveTag { owner, id, tag })
        .await?;

    Ok(ApiResponse::new(event_todo(event)?))
}
